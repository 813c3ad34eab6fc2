//! Class coverage section - checks for lowercase, uppercase, digits, symbols.

use super::{SectionOutcome, Subject};

/// Checks if the password contains every character class, when required.
///
/// Missing classes are listed in a fixed order: lower, upper, digit, symbol.
pub fn class_coverage_section(subject: &Subject<'_>) -> SectionOutcome {
    if !subject.policy.require_all_classes {
        return SectionOutcome::pass();
    }

    let missing: Vec<&str> = subject
        .classes
        .missing()
        .into_iter()
        .map(|class| class.name())
        .collect();

    if !missing.is_empty() {
        return SectionOutcome::fail(format!(
            "Missing character classes: {}.",
            missing.join(", ")
        ));
    }
    SectionOutcome::pass()
}
