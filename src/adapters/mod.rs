//! Adapters layer: Concrete implementations of ports.
//!
//! - `pipeline`: exported preprocessing transform plus logistic model
//! - `sanitize`: redaction of health answers from log output

pub mod pipeline;
pub mod sanitize;

pub use pipeline::{ColumnTransform, ExportedPipeline, ModelError, PipelineScorer};
