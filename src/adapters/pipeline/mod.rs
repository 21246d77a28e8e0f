//! Pipeline adapter: implementation of `RiskScorer` over an exported model.
//!
//! The training side exports the fitted preprocessing transform and the
//! classifier head as one JSON document:
//!
//! - `columns`: one transform per record column, in record order
//!   (`scale` standardizes a number, `one_hot` expands a category over a
//!   fixed vocabulary, `passthrough` keeps a number as is)
//! - `coefficients`: one weight per expanded input
//! - `intercept`
//!
//! The probability is `sigmoid(w · x + b)`.
//!
//! # Integrity
//!
//! If a `manifest.json` sits next to the model file, it must bind the model
//! file name to its SHA-256 digest; a missing entry or a digest mismatch
//! refuses the load.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureRecord, FeatureValue, FEATURE_NAMES};
use crate::ports::{ensure_probability, RiskScorer, ScoringError};

/// Supported export format version.
const PIPELINE_VERSION: u32 = 1;

/// Errors raised while loading an exported pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read model artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model format: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Model integrity check failed: {0}")]
    Integrity(String),

    #[error("Model schema does not match the feature record: {0}")]
    Schema(String),
}

/// Transform applied to one record column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transform", rename_all = "snake_case")]
pub enum ColumnTransform {
    Scale { feature: String, mean: f64, scale: f64 },
    OneHot { feature: String, categories: Vec<String> },
    Passthrough { feature: String },
}

impl ColumnTransform {
    #[must_use]
    pub fn feature(&self) -> &str {
        match self {
            Self::Scale { feature, .. }
            | Self::OneHot { feature, .. }
            | Self::Passthrough { feature } => feature,
        }
    }

    /// Number of model inputs this column expands to.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::OneHot { categories, .. } => categories.len(),
            Self::Scale { .. } | Self::Passthrough { .. } => 1,
        }
    }

    fn apply(&self, value: FeatureValue, out: &mut Vec<f64>) -> Result<(), ScoringError> {
        match (self, value) {
            (Self::Scale { mean, scale, .. }, FeatureValue::Number(x)) => {
                out.push((x - mean) / scale);
            }
            (Self::Passthrough { .. }, FeatureValue::Number(x)) => out.push(x),
            (Self::OneHot { feature, categories }, FeatureValue::Category(code)) => {
                if !categories.iter().any(|c| c == code) {
                    return Err(ScoringError::Failed(format!(
                        "{feature}: unseen category '{code}'"
                    )));
                }
                out.extend(categories.iter().map(|c| if c == code { 1.0 } else { 0.0 }));
            }
            (Self::OneHot { feature, .. }, FeatureValue::Number(_)) => {
                return Err(ScoringError::Failed(format!(
                    "{feature}: one-hot transform received a number"
                )));
            }
            (Self::Scale { feature, .. } | Self::Passthrough { feature }, FeatureValue::Category(_)) => {
                return Err(ScoringError::Failed(format!(
                    "{feature}: numeric transform received a category"
                )));
            }
        }
        Ok(())
    }
}

/// Fitted pipeline as exported by the training side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedPipeline {
    pub version: u32,
    pub columns: Vec<ColumnTransform>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl ExportedPipeline {
    /// Check the export against the record layout.
    ///
    /// # Errors
    /// Returns `ModelError::Schema` describing the first mismatch.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.version != PIPELINE_VERSION {
            return Err(ModelError::Schema(format!(
                "unsupported pipeline version {} (expected {PIPELINE_VERSION})",
                self.version
            )));
        }

        let names: Vec<&str> = self.columns.iter().map(ColumnTransform::feature).collect();
        if names != FEATURE_NAMES {
            return Err(ModelError::Schema(format!(
                "columns {names:?} do not match {FEATURE_NAMES:?}"
            )));
        }

        for column in &self.columns {
            match column {
                ColumnTransform::Scale { feature, mean, scale } => {
                    if !mean.is_finite() || !scale.is_finite() || *scale == 0.0 {
                        return Err(ModelError::Schema(format!(
                            "{feature}: scale parameters must be finite and non-zero"
                        )));
                    }
                }
                ColumnTransform::OneHot { feature, categories } if categories.is_empty() => {
                    return Err(ModelError::Schema(format!("{feature}: empty category list")));
                }
                _ => {}
            }
        }

        let width: usize = self.columns.iter().map(ColumnTransform::width).sum();
        if self.coefficients.len() != width {
            return Err(ModelError::Schema(format!(
                "{} coefficients for {width} expanded inputs",
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::Schema("non-finite model weights".into()));
        }
        Ok(())
    }

    /// Apply the preprocessing transform.
    fn transform(&self, record: &FeatureRecord) -> Result<Vec<f64>, ScoringError> {
        let mut x = Vec::with_capacity(self.coefficients.len());
        for (column, (_, value)) in self.columns.iter().zip(record.columns()) {
            column.apply(value, &mut x)?;
        }
        Ok(x)
    }

    fn predict(&self, record: &FeatureRecord) -> Result<f64, ScoringError> {
        let x = self.transform(record)?;
        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(&x)
                .map(|(w, v)| w * v)
                .sum::<f64>();
        ensure_probability(sigmoid(z))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[derive(Debug, Deserialize)]
struct Manifest {
    files: BTreeMap<String, String>,
}

fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn read(path: &Path) -> Result<Vec<u8>, ModelError> {
    fs::read(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Verify the model bytes against `manifest.json`, if one is present.
fn verify_manifest(model_path: &Path, model_bytes: &[u8]) -> Result<bool, ModelError> {
    let Some(dir) = model_path.parent() else {
        return Ok(false);
    };
    let manifest_path = dir.join("manifest.json");
    if !manifest_path.exists() {
        return Ok(false);
    }

    let manifest: Manifest = serde_json::from_slice(&read(&manifest_path)?)?;
    let file_name = model_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ModelError::Integrity(format!("unusable model path {model_path:?}")))?;
    let expected = manifest.files.get(file_name).ok_or_else(|| {
        ModelError::Integrity(format!("manifest.json does not list {file_name}"))
    })?;

    let actual = sha256_hex(model_bytes);
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(ModelError::Integrity(format!("digest mismatch for {file_name}")));
    }
    Ok(true)
}

/// Risk scorer backed by an exported pipeline.
///
/// Starts unloaded; `score` reports `ScoringError::Unavailable` until
/// [`PipelineScorer::load_model`] succeeds.
#[derive(Debug, Default)]
pub struct PipelineScorer {
    model: Option<ExportedPipeline>,
}

impl PipelineScorer {
    /// Create an unloaded scorer.
    #[must_use]
    pub fn new() -> Self {
        Self { model: None }
    }

    /// Create a scorer from an in-memory export.
    ///
    /// # Errors
    /// Returns `ModelError::Schema` if the export does not fit the record.
    pub fn from_pipeline(pipeline: ExportedPipeline) -> Result<Self, ModelError> {
        pipeline.validate()?;
        Ok(Self {
            model: Some(pipeline),
        })
    }

    /// Load an exported pipeline from disk.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, fails its manifest check, or
    /// does not match the record layout. The scorer stays as it was.
    pub fn load_model(&mut self, path: &Path) -> Result<(), ModelError> {
        let bytes = read(path)?;
        let verified = verify_manifest(path, &bytes)?;
        let pipeline: ExportedPipeline = serde_json::from_slice(&bytes)?;
        pipeline.validate()?;

        tracing::info!(
            "Loaded scoring pipeline from {:?} (columns={}, inputs={}, manifest_verified={})",
            path,
            pipeline.columns.len(),
            pipeline.coefficients.len(),
            verified
        );
        if !verified {
            tracing::warn!("No manifest.json next to the model; integrity not verified");
        }

        self.model = Some(pipeline);
        Ok(())
    }
}

impl RiskScorer for PipelineScorer {
    fn score(&self, record: &FeatureRecord) -> Result<f64, ScoringError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| ScoringError::Unavailable("no scoring pipeline loaded".into()))?;
        model.predict(record)
    }

    fn is_ready(&self) -> bool {
        self.model.is_some()
    }
}
