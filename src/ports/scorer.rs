//! Scoring port: trait for the fitted preprocessing transform plus model.
//!
//! The application only depends on this trait. Concrete implementations live
//! in `adapters`.

use crate::domain::FeatureRecord;

/// Failures of the scoring boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// The model or its preprocessing transform is not loaded.
    #[error("Scoring unavailable: {0}")]
    Unavailable(String),

    /// The record was rejected (e.g. unseen category) or the model output is
    /// not a probability.
    #[error("Scoring failed: {0}")]
    Failed(String),
}

/// Trait for risk scoring.
///
/// Implementations are read-only once constructed and may be shared across
/// sessions.
pub trait RiskScorer: Send + Sync {
    /// Apply the preprocessing transform and the model to `record`.
    ///
    /// # Returns
    /// Probability of the positive (high-risk) class in `[0, 1]`.
    ///
    /// # Errors
    /// Returns `ScoringError::Unavailable` if nothing is loaded.
    /// Returns `ScoringError::Failed` if the record is rejected.
    fn score(&self, record: &FeatureRecord) -> Result<f64, ScoringError>;

    /// Whether a model is loaded and `score` can succeed.
    fn is_ready(&self) -> bool;
}

/// Reject anything that is not a probability.
///
/// # Errors
/// Returns `ScoringError::Failed` for NaN, infinities or values outside `[0, 1]`.
pub fn ensure_probability(p: f64) -> Result<f64, ScoringError> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(ScoringError::Failed(format!(
            "model returned {p}, expected a probability in [0, 1]"
        )))
    }
}
