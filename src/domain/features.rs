//! Feature derivation: complete wizard answers to the model's input record.
//!
//! The record layout is fixed by the fitted preprocessing transform. Column
//! names and order must match it exactly:
//!
//! ```text
//! age, gender, region, income_level, hypertension, diabetes,
//! cholesterol_level, obesity, waist_circumference, family_history,
//! smoking_status, alcohol_consumption, physical_activity, dietary_habits,
//! air_pollution_exposure, stress_level, sleep_hours,
//! blood_pressure_systolic, blood_pressure_diastolic, fasting_blood_sugar,
//! cholesterol_hdl, cholesterol_ldl, triglycerides, EKG_results,
//! previous_heart_disease, medication_usage, participated_in_free_screening,
//! Age_Group, is_smoker, Total_Risk_Factors
//! ```
//!
//! `heart_rate` is collected by the intake but is not part of the record.

use serde::Serialize;

use super::catalog::FieldId;
use super::codes::{
    AlcoholConsumption, CanonicalCode, Choice, DietaryHabits, EkgResult, Gender, IncomeLevel,
    Level, Region, SmokingStatus, YesNo,
};
use super::wizard::WizardState;

/// Number of columns in a [`FeatureRecord`].
pub const FEATURE_COUNT: usize = 30;

/// Column names in record order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "gender",
    "region",
    "income_level",
    "hypertension",
    "diabetes",
    "cholesterol_level",
    "obesity",
    "waist_circumference",
    "family_history",
    "smoking_status",
    "alcohol_consumption",
    "physical_activity",
    "dietary_habits",
    "air_pollution_exposure",
    "stress_level",
    "sleep_hours",
    "blood_pressure_systolic",
    "blood_pressure_diastolic",
    "fasting_blood_sugar",
    "cholesterol_hdl",
    "cholesterol_ldl",
    "triglycerides",
    "EKG_results",
    "previous_heart_disease",
    "medication_usage",
    "participated_in_free_screening",
    "Age_Group",
    "is_smoker",
    "Total_Risk_Factors",
];

/// Internal invariant violations while deriving features.
///
/// These indicate drift between the catalog and the code tables, never bad
/// user input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DerivationError {
    #[error("{field}: label '{label}' has no canonical code")]
    UnmappedLabel { field: FieldId, label: String },

    #[error("{field}: stored value has the wrong kind")]
    KindMismatch { field: FieldId },
}

/// Age bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeGroup {
    Young,
    Middle,
    Senior,
}

impl AgeGroup {
    /// `age <= 35` is Young, `36..=55` is Middle, above 55 is Senior.
    #[must_use]
    pub fn from_age(age: f64) -> Self {
        if age <= 35.0 {
            Self::Young
        } else if age <= 55.0 {
            Self::Middle
        } else {
            Self::Senior
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Young => "Young",
            Self::Middle => "Middle",
            Self::Senior => "Senior",
        }
    }
}

/// One column value as seen by the preprocessing transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Category(&'static str),
}

/// Model-ready feature record, built fresh for each submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub age: f64,
    #[serde(serialize_with = "as_code")]
    pub gender: Gender,
    #[serde(serialize_with = "as_code")]
    pub region: Region,
    #[serde(serialize_with = "as_code")]
    pub income_level: IncomeLevel,
    pub hypertension: u8,
    pub diabetes: u8,
    pub cholesterol_level: f64,
    pub obesity: u8,
    pub waist_circumference: f64,
    pub family_history: u8,
    #[serde(serialize_with = "as_code")]
    pub smoking_status: SmokingStatus,
    #[serde(serialize_with = "as_code")]
    pub alcohol_consumption: AlcoholConsumption,
    #[serde(serialize_with = "as_code")]
    pub physical_activity: Level,
    #[serde(serialize_with = "as_code")]
    pub dietary_habits: DietaryHabits,
    #[serde(serialize_with = "as_code")]
    pub air_pollution_exposure: Level,
    #[serde(serialize_with = "as_code")]
    pub stress_level: Level,
    pub sleep_hours: f64,
    pub blood_pressure_systolic: f64,
    pub blood_pressure_diastolic: f64,
    pub fasting_blood_sugar: f64,
    pub cholesterol_hdl: f64,
    pub cholesterol_ldl: f64,
    pub triglycerides: f64,
    #[serde(rename = "EKG_results", serialize_with = "as_code")]
    pub ekg_results: EkgResult,
    pub previous_heart_disease: u8,
    pub medication_usage: u8,
    pub participated_in_free_screening: u8,
    #[serde(rename = "Age_Group")]
    pub age_group: AgeGroup,
    pub is_smoker: u8,
    #[serde(rename = "Total_Risk_Factors")]
    pub total_risk_factors: u8,
}

fn as_code<T: CanonicalCode, S: serde::Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value.code())
}

impl FeatureRecord {
    /// Columns as `(name, value)` pairs in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn columns(&self) -> [(&'static str, FeatureValue); FEATURE_COUNT] {
        use FeatureValue::{Category, Number};

        let flag = |v: u8| Number(f64::from(v));
        let values = [
            Number(self.age),
            Category(self.gender.code()),
            Category(self.region.code()),
            Category(self.income_level.code()),
            flag(self.hypertension),
            flag(self.diabetes),
            Number(self.cholesterol_level),
            flag(self.obesity),
            Number(self.waist_circumference),
            flag(self.family_history),
            Category(self.smoking_status.code()),
            Category(self.alcohol_consumption.code()),
            Category(self.physical_activity.code()),
            Category(self.dietary_habits.code()),
            Category(self.air_pollution_exposure.code()),
            Category(self.stress_level.code()),
            Number(self.sleep_hours),
            Number(self.blood_pressure_systolic),
            Number(self.blood_pressure_diastolic),
            Number(self.fasting_blood_sugar),
            Number(self.cholesterol_hdl),
            Number(self.cholesterol_ldl),
            Number(self.triglycerides),
            Category(self.ekg_results.code()),
            flag(self.previous_heart_disease),
            flag(self.medication_usage),
            flag(self.participated_in_free_screening),
            Category(self.age_group.code()),
            flag(self.is_smoker),
            flag(self.total_risk_factors),
        ];

        std::array::from_fn(|i| (FEATURE_NAMES[i], values[i]))
    }
}

struct Reader<'a> {
    state: &'a WizardState,
}

impl Reader<'_> {
    fn number(&self, id: FieldId) -> Result<f64, DerivationError> {
        self.state
            .number(id)
            .ok_or(DerivationError::KindMismatch { field: id })
    }

    fn code<T: Choice>(&self, id: FieldId) -> Result<T, DerivationError> {
        let label = self
            .state
            .choice(id)
            .ok_or(DerivationError::KindMismatch { field: id })?;
        T::from_label(label).ok_or_else(|| DerivationError::UnmappedLabel {
            field: id,
            label: label.to_string(),
        })
    }

    fn flag(&self, id: FieldId) -> Result<u8, DerivationError> {
        self.code::<YesNo>(id).map(YesNo::flag)
    }
}

/// Derive the model input record from complete wizard answers.
///
/// # Errors
/// Returns `DerivationError` only if a stored label has no canonical code or
/// a stored value has the wrong kind; both mean the catalog and the code
/// tables have drifted apart.
pub fn derive_features(state: &WizardState) -> Result<FeatureRecord, DerivationError> {
    let r = Reader { state };

    let age = r.number(FieldId::Age)?;
    let smoking_status: SmokingStatus = r.code(FieldId::SmokingStatus)?;
    let hypertension = r.flag(FieldId::HasHypertension)?;
    let diabetes = r.flag(FieldId::HasDiabetes)?;
    let obesity = r.flag(FieldId::HasObesity)?;
    let is_smoker = u8::from(smoking_status.is_smoker());

    Ok(FeatureRecord {
        age,
        gender: r.code(FieldId::Gender)?,
        region: r.code(FieldId::Region)?,
        income_level: r.code(FieldId::IncomeLevel)?,
        hypertension,
        diabetes,
        cholesterol_level: r.number(FieldId::CholesterolLevel)?,
        obesity,
        waist_circumference: r.number(FieldId::WaistCircumference)?,
        family_history: r.flag(FieldId::FamilyHistory)?,
        smoking_status,
        alcohol_consumption: r.code(FieldId::AlcoholConsumption)?,
        physical_activity: r.code(FieldId::PhysicalActivity)?,
        dietary_habits: r.code(FieldId::DietaryHabits)?,
        air_pollution_exposure: r.code(FieldId::AirPollutionExposure)?,
        stress_level: r.code(FieldId::StressLevel)?,
        sleep_hours: r.number(FieldId::SleepHours)?,
        blood_pressure_systolic: r.number(FieldId::BpSystolic)?,
        blood_pressure_diastolic: r.number(FieldId::BpDiastolic)?,
        fasting_blood_sugar: r.number(FieldId::FastingBloodSugar)?,
        cholesterol_hdl: r.number(FieldId::CholesterolHdl)?,
        cholesterol_ldl: r.number(FieldId::CholesterolLdl)?,
        triglycerides: r.number(FieldId::Triglycerides)?,
        ekg_results: r.code(FieldId::EkgResults)?,
        previous_heart_disease: r.flag(FieldId::PreviousHeartDisease)?,
        medication_usage: r.flag(FieldId::MedicationUsage)?,
        participated_in_free_screening: r.flag(FieldId::ParticipatedInFreeScreening)?,
        age_group: AgeGroup::from_age(age),
        is_smoker,
        total_risk_factors: hypertension + diabetes + obesity + is_smoker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Answer, FieldValue, Step};

    fn state_with(answers: &[(FieldId, Answer<'_>)]) -> WizardState {
        let mut state = WizardState::new();
        for (id, answer) in answers {
            state.set_field(*id, *answer).expect("valid answer");
        }
        state
    }

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(AgeGroup::from_age(18.0), AgeGroup::Young);
        assert_eq!(AgeGroup::from_age(35.0), AgeGroup::Young);
        assert_eq!(AgeGroup::from_age(36.0), AgeGroup::Middle);
        assert_eq!(AgeGroup::from_age(55.0), AgeGroup::Middle);
        assert_eq!(AgeGroup::from_age(56.0), AgeGroup::Senior);
        assert_eq!(AgeGroup::from_age(100.0), AgeGroup::Senior);
    }

    #[test]
    fn test_smoker_flag_uses_recoded_status() {
        for (label, expected) in [("Current", 1), ("Past", 1), ("Never", 0)] {
            let state = state_with(&[(FieldId::SmokingStatus, Answer::Choice(label))]);
            let record = derive_features(&state).expect("derivable");
            assert_eq!(record.is_smoker, expected, "smoking_status={label}");
        }
    }

    #[test]
    fn test_total_risk_factors() {
        let state = state_with(&[
            (FieldId::HasHypertension, Answer::Choice("Ya")),
            (FieldId::HasDiabetes, Answer::Choice("Ya")),
            (FieldId::HasObesity, Answer::Choice("Tidak")),
            (FieldId::SmokingStatus, Answer::Choice("Current")),
        ]);
        let record = derive_features(&state).expect("derivable");
        assert_eq!(record.hypertension, 1);
        assert_eq!(record.diabetes, 1);
        assert_eq!(record.obesity, 0);
        assert_eq!(record.is_smoker, 1);
        assert_eq!(record.total_risk_factors, 3);
    }

    #[test]
    fn test_all_risk_factors_present() {
        let state = state_with(&[
            (FieldId::HasHypertension, Answer::Choice("Ya")),
            (FieldId::HasDiabetes, Answer::Choice("Ya")),
            (FieldId::HasObesity, Answer::Choice("Ya")),
            (FieldId::SmokingStatus, Answer::Choice("Past")),
        ]);
        assert_eq!(derive_features(&state).expect("derivable").total_risk_factors, 4);
    }

    #[test]
    fn test_defaults_derive_to_low_risk_profile() {
        let record = derive_features(&WizardState::new()).expect("derivable");
        assert_eq!(record.age_group, AgeGroup::Middle);
        assert_eq!(record.is_smoker, 0);
        assert_eq!(record.total_risk_factors, 0);
        assert_eq!(record.alcohol_consumption, AlcoholConsumption::Unknown);
        assert_eq!(record.participated_in_free_screening, 0);
    }

    #[test]
    fn test_columns_follow_feature_names() {
        let record = derive_features(&WizardState::new()).expect("derivable");
        let names: Vec<&str> = record.columns().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, FEATURE_NAMES);

        let columns = record.columns();
        assert_eq!(columns[0].1, FeatureValue::Number(45.0));
        assert_eq!(columns[1].1, FeatureValue::Category("Male"));
        assert_eq!(columns[23].1, FeatureValue::Category("Normal"));
        assert_eq!(columns[27].1, FeatureValue::Category("Middle"));
    }

    #[test]
    fn test_serialized_keys_follow_feature_names() {
        let record = derive_features(&WizardState::new()).expect("derivable");
        let json = serde_json::to_string(&record).expect("serializable");

        let mut last = 0;
        for name in FEATURE_NAMES {
            let needle = format!("\"{name}\":");
            let pos = json.find(&needle).unwrap_or_else(|| panic!("{name} missing"));
            assert!(pos >= last, "{name} out of order");
            last = pos;
        }
        assert!(json.contains("\"smoking_status\":\"Never\""));
        assert!(!json.contains("heart_rate"));
    }

    #[test]
    fn test_unmapped_label_is_reported() {
        let state = WizardState::from_values(
            Step::LAST,
            [(FieldId::Gender, FieldValue::Choice("Unspecified"))],
        );
        assert_eq!(
            derive_features(&state),
            Err(DerivationError::UnmappedLabel {
                field: FieldId::Gender,
                label: "Unspecified".to_string(),
            })
        );
    }

    #[test]
    fn test_wrong_kind_is_reported() {
        let state =
            WizardState::from_values(Step::LAST, [(FieldId::Age, FieldValue::Choice("Senior"))]);
        assert_eq!(
            derive_features(&state),
            Err(DerivationError::KindMismatch { field: FieldId::Age })
        );
    }
}
