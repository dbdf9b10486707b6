use std::fmt::Display;

/// Letter grades on the ten point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    O,
    E,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 7] = [
        Grade::O,
        Grade::E,
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::F,
    ];

    pub fn points(self) -> u8 {
        match self {
            Grade::O => 10,
            Grade::E => 9,
            Grade::A => 8,
            Grade::B => 7,
            Grade::C => 6,
            Grade::D => 5,
            Grade::F => 4,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Grade::O => 'O',
            Grade::E => 'E',
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        }
    }

    /// Exact, case sensitive lookup of a single letter.
    pub fn from_letter(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|grade| grade.letter() == ch)
    }

    pub fn from_text(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::from_letter(ch),
            _ => None,
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Points for the raw selector text. Unset and unknown grades are worth nothing.
pub fn grade_points(text: &str) -> u8 {
    Grade::from_text(text).map(Grade::points).unwrap_or(0)
}

/// Selector value after `text`, wrapping through the unset state.
pub fn next_option(text: &str) -> String {
    match Grade::from_text(text) {
        None => Grade::ALL[0].to_string(),
        Some(Grade::F) => String::new(),
        Some(grade) => {
            let index = Grade::ALL.iter().position(|g| *g == grade).unwrap_or(0);
            Grade::ALL[index + 1].to_string()
        }
    }
}

pub fn prev_option(text: &str) -> String {
    match Grade::from_text(text) {
        None => Grade::F.to_string(),
        Some(Grade::O) => String::new(),
        Some(grade) => {
            let index = Grade::ALL.iter().position(|g| *g == grade).unwrap_or(1);
            Grade::ALL[index - 1].to_string()
        }
    }
}
