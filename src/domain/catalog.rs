//! Field catalog for the heart-attack risk intake.
//!
//! A static table of every input field: its step binding, its domain and its
//! default. The table is indexed by [`FieldId`] and never changes at runtime.

use serde::{Deserialize, Serialize};

use super::codes::{
    AlcoholConsumption, Choice, DietaryHabits, EkgResult, Gender, IncomeLevel, Level, Region,
    SmokingStatus, YesNo,
};

/// Number of fields collected by the intake.
pub const FIELD_COUNT: usize = 28;

/// Number of wizard steps.
pub const STEP_COUNT: u8 = 6;

/// Identifier of every input field.
///
/// Declaration order matches [`FieldId::ALL`] and the catalog table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldId {
    // Step 1: personal data
    Age,
    Gender,
    IncomeLevel,
    // Step 2: lifestyle
    SmokingStatus,
    AlcoholConsumption,
    DietaryHabits,
    PhysicalActivity,
    // Step 3: environment
    Region,
    SleepHours,
    AirPollutionExposure,
    StressLevel,
    // Step 4: medical history
    HasDiabetes,
    HasHypertension,
    HasObesity,
    ParticipatedInFreeScreening,
    // Step 5: heart history and medication
    FamilyHistory,
    PreviousHeartDisease,
    MedicationUsage,
    EkgResults,
    // Step 6: labs and vitals
    BpSystolic,
    CholesterolLevel,
    CholesterolLdl,
    FastingBloodSugar,
    BpDiastolic,
    CholesterolHdl,
    Triglycerides,
    WaistCircumference,
    HeartRate,
}

impl FieldId {
    pub const ALL: [FieldId; FIELD_COUNT] = [
        Self::Age,
        Self::Gender,
        Self::IncomeLevel,
        Self::SmokingStatus,
        Self::AlcoholConsumption,
        Self::DietaryHabits,
        Self::PhysicalActivity,
        Self::Region,
        Self::SleepHours,
        Self::AirPollutionExposure,
        Self::StressLevel,
        Self::HasDiabetes,
        Self::HasHypertension,
        Self::HasObesity,
        Self::ParticipatedInFreeScreening,
        Self::FamilyHistory,
        Self::PreviousHeartDisease,
        Self::MedicationUsage,
        Self::EkgResults,
        Self::BpSystolic,
        Self::CholesterolLevel,
        Self::CholesterolLdl,
        Self::FastingBloodSugar,
        Self::BpDiastolic,
        Self::CholesterolHdl,
        Self::Triglycerides,
        Self::WaistCircumference,
        Self::HeartRate,
    ];

    /// Position in [`FieldId::ALL`] and in the catalog table.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable wire key of the field.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::IncomeLevel => "income_level",
            Self::SmokingStatus => "smoking_status",
            Self::AlcoholConsumption => "alcohol_consumption",
            Self::DietaryHabits => "dietary_habits",
            Self::PhysicalActivity => "physical_activity",
            Self::Region => "region",
            Self::SleepHours => "sleep_hours",
            Self::AirPollutionExposure => "air_pollution_exposure",
            Self::StressLevel => "stress_level",
            Self::HasDiabetes => "has_diabetes",
            Self::HasHypertension => "has_hypertension",
            Self::HasObesity => "has_obesity",
            Self::ParticipatedInFreeScreening => "participated_in_free_screening",
            Self::FamilyHistory => "family_history",
            Self::PreviousHeartDisease => "previous_heart_disease",
            Self::MedicationUsage => "medication_usage",
            Self::EkgResults => "EKG_results",
            Self::BpSystolic => "bp_systolic",
            Self::CholesterolLevel => "cholesterol_level",
            Self::CholesterolLdl => "cholesterol_ldl",
            Self::FastingBloodSugar => "fasting_blood_sugar",
            Self::BpDiastolic => "bp_diastolic",
            Self::CholesterolHdl => "cholesterol_hdl",
            Self::Triglycerides => "triglycerides",
            Self::WaistCircumference => "waist_circumference",
            Self::HeartRate => "heart_rate",
        }
    }

    /// Look a field up by its wire key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.key() == key)
    }

    /// Catalog entry for this field.
    #[must_use]
    pub fn spec(self) -> &'static FieldSpec {
        &CATALOG[self.index()]
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Wizard step index, always within `1..=STEP_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Step(u8);

impl Step {
    pub const FIRST: Step = Step(1);
    pub const LAST: Step = Step(STEP_COUNT);

    /// Build a step from its 1-based number.
    #[must_use]
    pub fn new(number: u8) -> Option<Self> {
        (1..=STEP_COUNT).contains(&number).then_some(Self(number))
    }

    /// 1-based step number.
    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }

    /// Following step, capped at the last one.
    #[must_use]
    pub fn next(self) -> Self {
        Self((self.0 + 1).min(STEP_COUNT))
    }

    /// Preceding step, floored at the first one.
    #[must_use]
    pub fn prev(self) -> Self {
        Self(self.0.saturating_sub(1).max(1))
    }

    #[must_use]
    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// All steps in presentation order.
    pub fn all() -> impl Iterator<Item = Step> {
        (1..=STEP_COUNT).map(Step)
    }

    /// Fields bound to this step, in presentation order.
    pub fn fields(self) -> impl Iterator<Item = FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(move |id| id.spec().step == self)
    }

    /// Completion ratio shown by progress indicators: `(step - 1) / (STEP_COUNT - 1)`.
    #[must_use]
    pub fn progress(self) -> f64 {
        f64::from(self.0 - 1) / f64::from(STEP_COUNT - 1)
    }
}

impl TryFrom<u8> for Step {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("step {value} outside 1..={STEP_COUNT}"))
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.0
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Numeric,
    Categorical,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
        }
    }
}

/// Allowed values of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDomain {
    /// Inclusive range. `integral` fields reject fractional values.
    Numeric { min: f64, max: f64, integral: bool },
    /// Closed label set.
    Choice(&'static [&'static str]),
}

impl FieldDomain {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Numeric { .. } => FieldKind::Numeric,
            Self::Choice(_) => FieldKind::Categorical,
        }
    }
}

/// A stored field value.
///
/// Choice labels are interned from the catalog, so a stored label always
/// points at the catalog's own string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Choice(&'static str),
}

impl FieldValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Choice(_) => None,
        }
    }

    #[must_use]
    pub fn as_choice(&self) -> Option<&'static str> {
        match self {
            Self::Choice(label) => Some(label),
            Self::Number(_) => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Choice(label) => f.write_str(label),
        }
    }
}

/// An inbound answer from the UI boundary, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Answer<'a> {
    Number(f64),
    Choice(&'a str),
}

impl From<f64> for Answer<'_> {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Answer<'_> {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl<'a> From<&'a str> for Answer<'a> {
    fn from(label: &'a str) -> Self {
        Self::Choice(label)
    }
}

/// A value rejected by a field's domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: FieldId,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field}: {value} must be a whole number")]
    NotIntegral { field: FieldId, value: f64 },

    #[error("{field}: value is not a finite number")]
    NotFinite { field: FieldId },

    #[error("{field}: '{label}' is not an allowed choice")]
    UnknownChoice { field: FieldId, label: String },

    #[error("{field} expects a {expected} value")]
    KindMismatch { field: FieldId, expected: FieldKind },
}

impl ValidationError {
    /// Field the error refers to.
    #[must_use]
    pub fn field(&self) -> FieldId {
        match self {
            Self::OutOfRange { field, .. }
            | Self::NotIntegral { field, .. }
            | Self::NotFinite { field }
            | Self::UnknownChoice { field, .. }
            | Self::KindMismatch { field, .. } => *field,
        }
    }
}

/// Catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub step: Step,
    pub domain: FieldDomain,
    pub default: FieldValue,
}

impl FieldSpec {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.domain.kind()
    }

    /// Validate an inbound answer and return the value to store.
    ///
    /// # Errors
    /// Returns `ValidationError` if the answer is outside the field's domain.
    pub fn accept(&self, answer: Answer<'_>) -> Result<FieldValue, ValidationError> {
        match (self.domain, answer) {
            (FieldDomain::Numeric { .. }, Answer::Number(n)) => {
                self.check_number(n)?;
                Ok(FieldValue::Number(n))
            }
            (FieldDomain::Choice(labels), Answer::Choice(label)) => labels
                .iter()
                .copied()
                .find(|allowed| *allowed == label)
                .map(FieldValue::Choice)
                .ok_or_else(|| ValidationError::UnknownChoice {
                    field: self.id,
                    label: label.to_string(),
                }),
            _ => Err(ValidationError::KindMismatch {
                field: self.id,
                expected: self.kind(),
            }),
        }
    }

    /// Check a stored value against the domain.
    ///
    /// # Errors
    /// Returns `ValidationError` if the value is outside the field's domain.
    pub fn check(&self, value: &FieldValue) -> Result<(), ValidationError> {
        match value {
            FieldValue::Number(n) => self.accept(Answer::Number(*n)).map(|_| ()),
            FieldValue::Choice(label) => self.accept(Answer::Choice(label)).map(|_| ()),
        }
    }

    fn check_number(&self, n: f64) -> Result<(), ValidationError> {
        let FieldDomain::Numeric { min, max, integral } = self.domain else {
            return Err(ValidationError::KindMismatch {
                field: self.id,
                expected: self.kind(),
            });
        };
        if !n.is_finite() {
            return Err(ValidationError::NotFinite { field: self.id });
        }
        if !(min..=max).contains(&n) {
            return Err(ValidationError::OutOfRange {
                field: self.id,
                value: n,
                min,
                max,
            });
        }
        if integral && n.fract() != 0.0 {
            return Err(ValidationError::NotIntegral {
                field: self.id,
                value: n,
            });
        }
        Ok(())
    }
}

const fn integer(id: FieldId, step: u8, min: f64, max: f64, default: f64) -> FieldSpec {
    FieldSpec {
        id,
        step: Step(step),
        domain: FieldDomain::Numeric {
            min,
            max,
            integral: true,
        },
        default: FieldValue::Number(default),
    }
}

const fn decimal(id: FieldId, step: u8, min: f64, max: f64, default: f64) -> FieldSpec {
    FieldSpec {
        id,
        step: Step(step),
        domain: FieldDomain::Numeric {
            min,
            max,
            integral: false,
        },
        default: FieldValue::Number(default),
    }
}

const fn choice(
    id: FieldId,
    step: u8,
    labels: &'static [&'static str],
    default: &'static str,
) -> FieldSpec {
    FieldSpec {
        id,
        step: Step(step),
        domain: FieldDomain::Choice(labels),
        default: FieldValue::Choice(default),
    }
}

static CATALOG: [FieldSpec; FIELD_COUNT] = [
    integer(FieldId::Age, 1, 18.0, 100.0, 45.0),
    choice(FieldId::Gender, 1, Gender::LABELS, "Male"),
    choice(FieldId::IncomeLevel, 1, IncomeLevel::LABELS, "Low"),
    choice(FieldId::SmokingStatus, 2, SmokingStatus::LABELS, "Never"),
    choice(FieldId::AlcoholConsumption, 2, AlcoholConsumption::LABELS, "Unknown"),
    choice(FieldId::DietaryHabits, 2, DietaryHabits::LABELS, "Healthy"),
    choice(FieldId::PhysicalActivity, 2, Level::LABELS, "Moderate"),
    choice(FieldId::Region, 3, Region::LABELS, "Urban"),
    decimal(FieldId::SleepHours, 3, 0.0, 24.0, 7.0),
    choice(FieldId::AirPollutionExposure, 3, Level::LABELS, "Low"),
    choice(FieldId::StressLevel, 3, Level::LABELS, "Low"),
    choice(FieldId::HasDiabetes, 4, YesNo::LABELS, "Tidak"),
    choice(FieldId::HasHypertension, 4, YesNo::LABELS, "Tidak"),
    choice(FieldId::HasObesity, 4, YesNo::LABELS, "Tidak"),
    choice(FieldId::ParticipatedInFreeScreening, 4, YesNo::LABELS, "Tidak"),
    choice(FieldId::FamilyHistory, 5, YesNo::LABELS, "Tidak"),
    choice(FieldId::PreviousHeartDisease, 5, YesNo::LABELS, "Tidak"),
    choice(FieldId::MedicationUsage, 5, YesNo::LABELS, "Tidak"),
    choice(FieldId::EkgResults, 5, EkgResult::LABELS, "Normal"),
    integer(FieldId::BpSystolic, 6, 90.0, 200.0, 120.0),
    integer(FieldId::CholesterolLevel, 6, 100.0, 400.0, 200.0),
    integer(FieldId::CholesterolLdl, 6, 50.0, 250.0, 100.0),
    integer(FieldId::FastingBloodSugar, 6, 60.0, 300.0, 90.0),
    integer(FieldId::BpDiastolic, 6, 60.0, 130.0, 80.0),
    integer(FieldId::CholesterolHdl, 6, 20.0, 100.0, 50.0),
    integer(FieldId::Triglycerides, 6, 50.0, 500.0, 150.0),
    integer(FieldId::WaistCircumference, 6, 50.0, 150.0, 80.0),
    integer(FieldId::HeartRate, 6, 50.0, 150.0, 75.0),
];

/// The whole catalog, in [`FieldId::ALL`] order.
#[must_use]
pub fn catalog() -> &'static [FieldSpec; FIELD_COUNT] {
    &CATALOG
}
