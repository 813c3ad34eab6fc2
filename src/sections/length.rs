//! Length section - checks password minimum length.

use super::{SectionOutcome, Subject};

/// Checks if the password meets the policy's minimum length.
///
/// # Returns
/// - a failure with reason if password is too short
/// - one point if password has sufficient length
pub fn length_section(subject: &Subject<'_>) -> SectionOutcome {
    if subject.length < subject.policy.min_length {
        return SectionOutcome::fail(format!("Too short (min {}).", subject.policy.min_length));
    }
    SectionOutcome::pass()
}
