//! Step validation: gates forward navigation through the wizard.

use super::catalog::{Step, ValidationError};
use super::wizard::WizardState;

/// Whether every field bound to `step` holds an in-domain value.
#[must_use]
pub fn is_step_complete(step: Step, state: &WizardState) -> bool {
    step.fields()
        .all(|id| id.spec().check(&state.value(id)).is_ok())
}

/// Every out-of-domain field of `step`, in presentation order.
#[must_use]
pub fn step_issues(step: Step, state: &WizardState) -> Vec<ValidationError> {
    step.fields()
        .filter_map(|id| id.spec().check(&state.value(id)).err())
        .collect()
}

/// Whether the whole intake is ready for feature derivation.
#[must_use]
pub fn all_steps_complete(state: &WizardState) -> bool {
    Step::all().all(|step| is_step_complete(step, state))
}

/// First step holding an out-of-domain value, if any.
#[must_use]
pub fn first_incomplete_step(state: &WizardState) -> Option<Step> {
    Step::all().find(|step| !is_step_complete(*step, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{FieldId, FieldValue};

    fn with(id: FieldId, value: FieldValue) -> WizardState {
        WizardState::from_values(Step::FIRST, [(id, value)])
    }

    #[test]
    fn test_defaults_complete_every_step() {
        let state = WizardState::new();
        assert!(Step::all().all(|s| is_step_complete(s, &state)));
        assert!(all_steps_complete(&state));
        assert_eq!(first_incomplete_step(&state), None);
    }

    #[test]
    fn test_age_boundaries() {
        let step1 = Step::FIRST;
        assert!(is_step_complete(step1, &with(FieldId::Age, FieldValue::Number(18.0))));
        assert!(is_step_complete(step1, &with(FieldId::Age, FieldValue::Number(100.0))));
        assert!(!is_step_complete(step1, &with(FieldId::Age, FieldValue::Number(17.0))));
        assert!(!is_step_complete(step1, &with(FieldId::Age, FieldValue::Number(101.0))));
    }

    #[test]
    fn test_sleep_hours_boundaries() {
        let step3 = Step::new(3).expect("valid step");
        for ok in [0.0, 24.0] {
            let state = with(FieldId::SleepHours, FieldValue::Number(ok));
            assert!(is_step_complete(step3, &state), "sleep_hours={ok}");
        }
        for bad in [-0.5, 24.5, f64::INFINITY] {
            let state = with(FieldId::SleepHours, FieldValue::Number(bad));
            assert!(!is_step_complete(step3, &state), "sleep_hours={bad}");
        }
    }

    #[test]
    fn test_lab_ranges() {
        let step6 = Step::LAST;
        let cases = [
            (FieldId::BpSystolic, 90.0, 200.0),
            (FieldId::BpDiastolic, 60.0, 130.0),
            (FieldId::CholesterolLevel, 100.0, 400.0),
            (FieldId::CholesterolLdl, 50.0, 250.0),
            (FieldId::CholesterolHdl, 20.0, 100.0),
            (FieldId::FastingBloodSugar, 60.0, 300.0),
            (FieldId::Triglycerides, 50.0, 500.0),
            (FieldId::WaistCircumference, 50.0, 150.0),
            (FieldId::HeartRate, 50.0, 150.0),
        ];
        for (id, min, max) in cases {
            assert!(is_step_complete(step6, &with(id, FieldValue::Number(min))), "{id} min");
            assert!(is_step_complete(step6, &with(id, FieldValue::Number(max))), "{id} max");
            assert!(!is_step_complete(step6, &with(id, FieldValue::Number(min - 1.0))), "{id} below");
            assert!(!is_step_complete(step6, &with(id, FieldValue::Number(max + 1.0))), "{id} above");
        }
    }

    #[test]
    fn test_categorical_membership() {
        let step2 = Step::new(2).expect("valid step");
        let state = with(FieldId::SmokingStatus, FieldValue::Choice("Occasionally"));
        assert!(!is_step_complete(step2, &state));

        let issues = step_issues(step2, &state);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field(), FieldId::SmokingStatus);
        assert_eq!(first_incomplete_step(&state), Some(step2));
    }

    #[test]
    fn test_kind_mismatch_is_incomplete() {
        let state = with(FieldId::Gender, FieldValue::Number(1.0));
        assert!(!is_step_complete(Step::FIRST, &state));
        assert!(!all_steps_complete(&state));
    }

    #[test]
    fn test_other_steps_unaffected() {
        let state = with(FieldId::Age, FieldValue::Number(5.0));
        assert!(!is_step_complete(Step::FIRST, &state));
        assert!(is_step_complete(Step::LAST, &state));
    }
}
