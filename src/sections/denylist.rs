//! Denylist section - checks for common words and keyboard sequences.

use crate::denylist::contains_common_pattern;
use super::{SectionOutcome, Subject};

/// Checks if the password contains a common word or pattern.
pub fn common_pattern_section(subject: &Subject<'_>) -> SectionOutcome {
    if contains_common_pattern(subject.password) {
        return SectionOutcome::fail("Contains common word/pattern.");
    }
    SectionOutcome::pass()
}
