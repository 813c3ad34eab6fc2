//! Repetition section - detects runs of the same character.

use super::{SectionOutcome, Subject};

const MAX_RUN: usize = 2;

/// Flags any character repeated three or more times in a row.
pub fn repetition_section(subject: &Subject<'_>) -> SectionOutcome {
    let mut run = 0;
    let mut previous = None;
    for c in subject.password.chars() {
        if previous == Some(c) {
            run += 1;
            if run > MAX_RUN {
                return SectionOutcome::fail("Contains repeated characters (e.g., 'aaa').");
            }
        } else {
            run = 1;
            previous = Some(c);
        }
    }
    SectionOutcome::pass()
}
