//! Character classes shared by the generator and the evaluator.

use std::fmt;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const DEFAULT_SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.?/|~";

/// One of the four character classes, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Lower,
        CharClass::Upper,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    /// Classifies a single character. Anything that is not alphanumeric is a symbol.
    pub fn of(c: char) -> Option<CharClass> {
        if c.is_lowercase() {
            Some(CharClass::Lower)
        } else if c.is_uppercase() {
            Some(CharClass::Upper)
        } else if c.is_numeric() {
            Some(CharClass::Digit)
        } else if !c.is_alphanumeric() {
            Some(CharClass::Symbol)
        } else {
            // caseless letters (e.g. CJK) belong to no class
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharClass::Lower => "lower",
            CharClass::Upper => "upper",
            CharClass::Digit => "digit",
            CharClass::Symbol => "symbol",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which classes occur at least once in a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterClasses {
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl CharacterClasses {
    pub fn of(text: &str) -> Self {
        let mut classes = CharacterClasses::default();
        for c in text.chars() {
            match CharClass::of(c) {
                Some(CharClass::Lower) => classes.lower = true,
                Some(CharClass::Upper) => classes.upper = true,
                Some(CharClass::Digit) => classes.digit = true,
                Some(CharClass::Symbol) => classes.symbol = true,
                None => {}
            }
        }
        classes
    }

    pub fn contains(&self, class: CharClass) -> bool {
        match class {
            CharClass::Lower => self.lower,
            CharClass::Upper => self.upper,
            CharClass::Digit => self.digit,
            CharClass::Symbol => self.symbol,
        }
    }

    /// Number of classes present, 0 to 4.
    pub fn variety(&self) -> usize {
        CharClass::ALL.iter().filter(|&&c| self.contains(c)).count()
    }

    /// Absent classes, in reporting order.
    pub fn missing(&self) -> Vec<CharClass> {
        CharClass::ALL
            .into_iter()
            .filter(|&c| !self.contains(c))
            .collect()
    }
}
