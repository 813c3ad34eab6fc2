//! Password strength evaluator - main evaluation logic.

use secrecy::ExposeSecret;

#[cfg(feature = "async")]
use secrecy::SecretString;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::sections::{
    Section, Subject, class_coverage_section, common_pattern_section, length_section,
    repetition_section, variety_bonus_section,
};

pub const DEFAULT_MIN_LENGTH: usize = 12;

/// Score needed, together with empty feedback, for a passing verdict.
pub const PASSING_SCORE: u8 = 4;
pub const MAX_SCORE: u8 = 5;

/// Constraints applied during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthPolicy {
    pub min_length: usize,
    pub require_all_classes: bool,
}

impl StrengthPolicy {
    /// A `min_length` of zero is raised to one.
    pub fn new(min_length: usize, require_all_classes: bool) -> Self {
        Self {
            min_length: min_length.max(1),
            require_all_classes,
        }
    }
}

impl Default for StrengthPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH, true)
    }
}

/// Verdict for a single password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthResult {
    pub ok: bool,
    pub score: u8,
    pub feedback: Vec<String>,
}

/// Evaluates password strength against `policy`.
///
/// Pure and deterministic: the same input always yields the same result.
/// `ok` requires both a score of at least 4 and no feedback; the two are
/// checked separately because a rule can complain without costing a point.
pub fn evaluate_strength<S>(password: &S, policy: &StrengthPolicy) -> StrengthResult
where
    S: ExposeSecret<str> + ?Sized,
{
    let subject = Subject::new(password.expose_secret(), policy);

    // Orchestrator: execute sections in sequence
    let sections: [(&str, Section); 5] = [
        ("length", length_section),
        ("coverage", class_coverage_section),
        ("repetition", repetition_section),
        ("denylist", common_pattern_section),
        ("variety", variety_bonus_section),
    ];

    let mut score: u8 = 0;
    let mut feedback: Vec<String> = Vec::new();

    for (_section_name, section_fn) in sections {
        let outcome = section_fn(&subject);
        score += outcome.points;
        if let Some(reason) = outcome.feedback {
            #[cfg(feature = "tracing")]
            tracing::trace!(section = _section_name, "section produced feedback");
            if !feedback.contains(&reason) {
                feedback.push(reason);
            }
        }
    }

    let score = score.min(MAX_SCORE);
    let ok = score >= PASSING_SCORE && feedback.is_empty();

    #[cfg(feature = "tracing")]
    tracing::debug!(score, ok, feedback_items = feedback.len(), "strength evaluated");

    StrengthResult {
        ok,
        score,
        feedback,
    }
}

/// Async version that sends the evaluation result via channel.
///
/// Waits `debounce` first so callers evaluating on every keystroke can
/// cancel superseded requests; nothing is sent once `token` is cancelled.
#[cfg(feature = "async")]
pub async fn evaluate_strength_tx(
    password: &SecretString,
    policy: StrengthPolicy,
    debounce: std::time::Duration,
    token: CancellationToken,
    tx: mpsc::Sender<StrengthResult>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("evaluation is about to start...");

    if !debounce.is_zero() {
        tokio::time::sleep(debounce).await;
    }
    if token.is_cancelled() {
        #[cfg(feature = "tracing")]
        tracing::debug!("evaluation cancelled before start");
        return;
    }

    let evaluation = evaluate_strength(password, &policy);

    if let Err(_e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send strength evaluation result: {}", _e);
    }
}
