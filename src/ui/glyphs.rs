/// Symbols that have an ASCII fallback for limited terminals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub times: &'static str,
    pub cursor: &'static str,
    pub h_separator: &'static str,
    pub arrow_up: &'static str,
    pub arrow_down: &'static str,
    pub bullet: &'static str,
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

fn ascii() -> Glyphs {
    Glyphs {
        times: "x",
        cursor: "_",
        h_separator: "-",
        arrow_up: "^",
        arrow_down: "v",
        bullet: "*",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        times: "×",
        cursor: "█",
        h_separator: "─",
        arrow_up: "↑",
        arrow_down: "↓",
        bullet: "•",
    }
}
