//! # Cardiorisk
//!
//! Guided heart-attack risk intake.
//!
//! A six-step wizard collects a person's demographics, lifestyle,
//! environment, medical history and lab values, derives the feature record a
//! trained model expects and turns the model's probability into a
//! high/low-risk verdict with advisory text.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: field catalog, wizard state, validation, feature derivation, verdicts
//! - `ports`: the `RiskScorer` boundary
//! - `adapters`: exported-pipeline scorer and log sanitization
//! - `application`: the wizard controller
//! - `config`: environment configuration
//! - `tui`: terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{NavigationError, WizardController};
pub use domain::{FeatureRecord, Verdict, WizardState};

/// Result type for Cardiorisk operations
pub type Result<T> = std::result::Result<T, CardioriskError>;

/// Main error type for Cardiorisk
#[derive(Debug, thiserror::Error)]
pub enum CardioriskError {
    #[error("Invalid answer: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Navigation refused: {0}")]
    Navigation(#[from] application::NavigationError),

    #[error("Feature derivation failed: {0}")]
    Derivation(#[from] domain::DerivationError),

    #[error(transparent)]
    Scoring(#[from] ports::ScoringError),

    #[error("Model not loaded: {0}")]
    Model(#[from] adapters::ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
