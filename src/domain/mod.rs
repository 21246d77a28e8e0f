//! Domain layer: intake schema, wizard state and pure transformations.
//!
//! Nothing in here performs I/O. Every function is deterministic except
//! verdict identifiers and timestamps.

pub mod catalog;
pub mod codes;
mod features;
mod locale;
mod validation;
mod verdict;
mod wizard;

pub use catalog::{
    catalog, Answer, FieldDomain, FieldId, FieldKind, FieldSpec, FieldValue, Step,
    ValidationError, FIELD_COUNT, STEP_COUNT,
};
pub use features::{
    derive_features, AgeGroup, DerivationError, FeatureRecord, FeatureValue, FEATURE_COUNT,
    FEATURE_NAMES,
};
pub use locale::{Locale, UiText};
pub use validation::{all_steps_complete, first_incomplete_step, is_step_complete, step_issues};
pub use verdict::{classify, RiskLabel, Verdict, RISK_THRESHOLD};
pub use wizard::WizardState;
