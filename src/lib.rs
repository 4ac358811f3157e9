//! # natseq - Natural Numbers Viewer
//!
//! A terminal viewer for the first N natural numbers using ratatui.
//!
//! ## Architecture
//!
//! The application follows an event-driven architecture with clear separation:
//! - `generator`: Input validation, sequence generation and statistics
//! - `model`: Application state (input, sequence, display mode, scroll)
//! - `event`: Keyboard event handling
//! - `ui`: TUI rendering with ratatui
//! - `controller`: Orchestration of state transitions
//! - `logging`: Optional file logging

pub mod controller;
pub mod event;
pub mod generator;
pub mod logging;
pub mod model;
pub mod ui;
