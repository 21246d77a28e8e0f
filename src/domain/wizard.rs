//! Wizard state: the collected answers and the active step.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use super::catalog::{catalog, Answer, FieldId, FieldValue, Step, ValidationError, FIELD_COUNT};

/// All answers collected so far plus the active step.
///
/// Every field holds a value at all times; fields the user has not visited
/// hold their catalog default.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    step: Step,
    values: [FieldValue; FIELD_COUNT],
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// Fresh state: step 1 and every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: Step::FIRST,
            values: std::array::from_fn(|i| catalog()[i].default),
        }
    }

    /// Build a state from previously collected values (resume / prefill).
    ///
    /// Fields absent from `values` get their defaults. Values are taken as
    /// given; use the step validator before relying on them.
    #[must_use]
    pub fn from_values(step: Step, values: impl IntoIterator<Item = (FieldId, FieldValue)>) -> Self {
        let mut state = Self::new();
        state.step = step;
        for (id, value) in values {
            state.values[id.index()] = value;
        }
        state
    }

    /// Active step.
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    pub(crate) fn set_step(&mut self, step: Step) {
        self.step = step;
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, id: FieldId) -> FieldValue {
        self.values[id.index()]
    }

    /// Numeric value of a field, if it holds a number.
    #[must_use]
    pub fn number(&self, id: FieldId) -> Option<f64> {
        self.value(id).as_number()
    }

    /// Choice label of a field, if it holds one.
    #[must_use]
    pub fn choice(&self, id: FieldId) -> Option<&'static str> {
        self.value(id).as_choice()
    }

    /// All fields with their current values, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, FieldValue)> + '_ {
        FieldId::ALL.into_iter().map(|id| (id, self.value(id)))
    }

    /// Validate and store an answer.
    ///
    /// # Errors
    /// Returns `ValidationError` if the answer is outside the field's domain;
    /// the state is left unchanged.
    pub fn set_field(&mut self, id: FieldId, answer: Answer<'_>) -> Result<(), ValidationError> {
        let value = id.spec().accept(answer)?;
        self.values[id.index()] = value;
        Ok(())
    }

    /// Restore every default and go back to step 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Serialize for WizardState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Snapshot<'a> {
            step: Step,
            values: BTreeMap<&'a str, FieldValue>,
        }

        Snapshot {
            step: self.step,
            values: self.iter().map(|(id, v)| (id.key(), v)).collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_holds_all_defaults() {
        let state = WizardState::new();
        assert_eq!(state.step(), Step::FIRST);
        assert_eq!(state.number(FieldId::Age), Some(45.0));
        assert_eq!(state.choice(FieldId::Gender), Some("Male"));
        assert_eq!(state.number(FieldId::SleepHours), Some(7.0));
        assert_eq!(state.choice(FieldId::HasDiabetes), Some("Tidak"));
        assert_eq!(state.number(FieldId::HeartRate), Some(75.0));
        assert_eq!(state.iter().count(), FIELD_COUNT);
    }

    #[test]
    fn test_set_field_rejects_without_partial_write() {
        let mut state = WizardState::new();
        let before = state.clone();

        assert!(state.set_field(FieldId::Age, Answer::Number(101.0)).is_err());
        assert!(state.set_field(FieldId::Gender, Answer::Choice("Other")).is_err());
        assert!(state.set_field(FieldId::Age, Answer::Choice("Male")).is_err());
        assert_eq!(state, before);

        state
            .set_field(FieldId::Age, Answer::Number(60.0))
            .expect("in range");
        assert_eq!(state.number(FieldId::Age), Some(60.0));
    }

    #[test]
    fn test_from_values_fills_defaults() {
        let state = WizardState::from_values(
            Step::LAST,
            [(FieldId::Age, FieldValue::Number(70.0))],
        );
        assert_eq!(state.step(), Step::LAST);
        assert_eq!(state.number(FieldId::Age), Some(70.0));
        assert_eq!(state.choice(FieldId::Region), Some("Urban"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = WizardState::new();
        state
            .set_field(FieldId::SmokingStatus, Answer::Choice("Current"))
            .expect("valid");
        state.set_step(Step::LAST);
        state.reset();
        assert_eq!(state, WizardState::new());
    }

    #[test]
    fn test_snapshot_serializes_by_key() {
        let state = WizardState::new();
        let json = serde_json::to_value(&state).expect("serializable");
        assert_eq!(json["step"], 1);
        assert_eq!(json["values"]["age"], 45.0);
        assert_eq!(json["values"]["EKG_results"], "Normal");
    }
}
