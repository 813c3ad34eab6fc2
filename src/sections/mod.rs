//! Strength evaluation sections
//!
//! Each section analyzes a specific aspect of password strength and is
//! independent of the others.

mod coverage;
mod denylist;
mod length;
mod repetition;
mod variety;

pub use coverage::class_coverage_section;
pub use denylist::common_pattern_section;
pub use length::length_section;
pub use repetition::repetition_section;
pub use variety::variety_bonus_section;

use crate::classes::CharacterClasses;
use crate::evaluator::StrengthPolicy;

/// Everything a section may look at, computed once per evaluation.
pub struct Subject<'a> {
    pub password: &'a str,
    /// Length in characters, not bytes.
    pub length: usize,
    pub classes: CharacterClasses,
    pub policy: &'a StrengthPolicy,
}

impl<'a> Subject<'a> {
    pub fn new(password: &'a str, policy: &'a StrengthPolicy) -> Self {
        Self {
            password,
            length: password.chars().count(),
            classes: CharacterClasses::of(password),
            policy,
        }
    }
}

/// Result of a single section.
///
/// Score and feedback are reported separately: the variety section can
/// withhold its point without complaining, or complain without it mattering
/// to the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOutcome {
    pub points: u8,
    pub feedback: Option<String>,
}

impl SectionOutcome {
    pub fn pass() -> Self {
        Self {
            points: 1,
            feedback: None,
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            points: 0,
            feedback: Some(reason.into()),
        }
    }

    pub fn neutral() -> Self {
        Self {
            points: 0,
            feedback: None,
        }
    }
}

pub type Section = fn(&Subject<'_>) -> SectionOutcome;

#[cfg(test)]
pub(crate) fn subject_for<'a>(password: &'a str, policy: &'a StrengthPolicy) -> Subject<'a> {
    Subject::new(password, policy)
}
