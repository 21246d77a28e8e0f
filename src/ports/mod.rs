//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the intake logic and the scoring model.

mod scorer;

pub use scorer::{ensure_probability, RiskScorer, ScoringError};
