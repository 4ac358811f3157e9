//! Natural number sequence generation.
//!
//! This module turns the raw text typed by the user into the sequence
//! `1, 2, ..., N` and derives everything the views display from it:
//! - Lenient integer parsing of the input
//! - Bound validation (`1 <= N <= 1000`)
//! - Sum (closed form), average and last value
//! - Plain text formatting for the list view and the formula panel
//!
//! ## Parsing
//!
//! ```text
//! "  42"   -> 42
//! "12abc"  -> 12     (trailing garbage ignored)
//! "3.7"    -> 3
//! "0x10"   -> 16
//! "abc"    -> NotANumber
//! "-5"     -> NonPositive
//! "1001"   -> TooLarge
//! ```

use thiserror::Error;

/// Largest accepted bound.
pub const MAX_BOUND: u32 = 1000;

/// Number of entries in the grid palette.
pub const PALETTE_SIZE: usize = 12;

/// Errors that can occur while validating the requested bound.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Please enter a valid number")]
    NotANumber,

    #[error("Please enter a positive number")]
    NonPositive,

    #[error("Please enter a number less than or equal to 1000")]
    TooLarge,
}

/// Result type for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// The contiguous run `1..=N`.
///
/// The values are private: the only way to obtain a non-empty instance is
/// through [`generate`] or [`NaturalNumbers::up_to`], so the contents are
/// always exactly `1..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaturalNumbers {
    values: Vec<u32>,
}

impl NaturalNumbers {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds `1..=bound` for an already validated bound.
    pub fn up_to(bound: u32) -> GenerateResult<Self> {
        validate_bound(i64::from(bound))?;
        Ok(Self {
            values: (1..=bound).collect(),
        })
    }

    /// Returns the number of elements (which is also N).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been generated yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the last (largest) element.
    pub fn last(&self) -> Option<u32> {
        self.values.last().copied()
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied()
    }

    /// Drops all elements.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Parses the leading integer of `input`.
///
/// Leading whitespace and an optional sign are accepted, then the longest
/// run of ASCII digits (hexadecimal after a `0x` prefix). Anything after
/// the digits is ignored. Values that do not fit in an `i64` saturate.
pub fn parse_integer_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    // "0x"/"0X" switches to hexadecimal digits
    let (radix, digits) = match digits.get(..2) {
        Some("0x") | Some("0X") => (16, &digits[2..]),
        _ => (10, digits),
    };

    let digit_count = digits.chars().take_while(|c| c.is_digit(radix)).count();
    if digit_count == 0 {
        return None;
    }

    let magnitude = digits[..digit_count].chars().fold(0i64, |acc, c| {
        let digit = c.to_digit(radix).map_or(0, i64::from);
        acc.saturating_mul(i64::from(radix)).saturating_add(digit)
    });

    Some(if negative { -magnitude } else { magnitude })
}

/// Checks that `value` lies in `1..=MAX_BOUND`.
pub fn validate_bound(value: i64) -> GenerateResult<u32> {
    if value <= 0 {
        return Err(GenerateError::NonPositive);
    }
    if value > i64::from(MAX_BOUND) {
        return Err(GenerateError::TooLarge);
    }
    // In range, so the conversion cannot fail.
    u32::try_from(value).map_err(|_| GenerateError::TooLarge)
}

/// Validates `input` and generates `1..=N`.
pub fn generate(input: &str) -> GenerateResult<NaturalNumbers> {
    let value = parse_integer_prefix(input).ok_or(GenerateError::NotANumber)?;
    let bound = validate_bound(value)?;
    NaturalNumbers::up_to(bound)
}

/// Sum of the sequence, computed as `n * (n + 1) / 2`.
pub fn compute_sum(numbers: &NaturalNumbers) -> u64 {
    let n = numbers.len() as u64;
    n * (n + 1) / 2
}

/// Joins the sequence with `", "`.
pub fn format_list(numbers: &NaturalNumbers) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Palette slot used to color the grid cell of `n`.
pub fn cell_color_index(n: u32) -> usize {
    n as usize % PALETTE_SIZE
}

/// Summary figures shown in the statistics view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    /// Number of elements (N)
    pub count: usize,
    /// Sum of all elements
    pub sum: u64,
    /// Last element (equal to N)
    pub last: u32,
}

impl Statistics {
    /// Computes statistics; `None` when nothing has been generated.
    pub fn from_sequence(numbers: &NaturalNumbers) -> Option<Self> {
        let last = numbers.last()?;
        Some(Self {
            count: numbers.len(),
            sum: compute_sum(numbers),
            last,
        })
    }

    /// Arithmetic mean.
    pub fn average(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }

    /// Mean with two decimal places.
    pub fn average_display(&self) -> String {
        format!("{:.2}", self.average())
    }

    /// Lines of the "Formula for Sum" panel.
    ///
    /// `times` is the multiplication sign to use (`×` or `x`).
    pub fn formula_lines(&self, times: &str) -> [String; 3] {
        [
            format!("Sum = n {times} (n + 1) / 2"),
            format!("Where n = {}", self.count),
            format!(
                "Sum = {} {times} {} / 2 = {}",
                self.count,
                self.count + 1,
                self.sum
            ),
        ]
    }
}
