//! Variety section - bonus point for mixed classes and extra length.

use super::{SectionOutcome, Subject};

/// Extra characters beyond the minimum needed for the bonus.
const BONUS_EXTRA_LENGTH: usize = 4;

/// Awards a bonus point for three or more classes with length at least
/// `min_length + 4`. Missing the bonus is silent unless fewer than two
/// classes are present.
pub fn variety_bonus_section(subject: &Subject<'_>) -> SectionOutcome {
    let variety = subject.classes.variety();
    let bonus_length = subject.policy.min_length.saturating_add(BONUS_EXTRA_LENGTH);

    if variety >= 3 && subject.length >= bonus_length {
        SectionOutcome::pass()
    } else if variety < 2 {
        SectionOutcome::fail("Low variety of characters.")
    } else {
        SectionOutcome::neutral()
    }
}
