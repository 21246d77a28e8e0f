//! End-to-end intake: answers through the wizard, derivation, scoring and verdict.

use cardiorisk::adapters::PipelineScorer;
use cardiorisk::application::{user_message, WizardController};
use cardiorisk::domain::{
    derive_features, Answer, FeatureValue, FieldId, Locale, RiskLabel, Step,
};
use cardiorisk::ports::{RiskScorer, ScoringError};
use cardiorisk::{CardioriskError, FeatureRecord};

struct FixedScorer(Result<f64, ScoringError>);

impl RiskScorer for FixedScorer {
    fn score(&self, _record: &FeatureRecord) -> Result<f64, ScoringError> {
        self.0.clone()
    }

    fn is_ready(&self) -> bool {
        self.0.is_ok()
    }
}

fn scenario() -> WizardController {
    let mut c = WizardController::with_locale(Locale::Indonesian);
    c.set_field(FieldId::Age, Answer::Number(60.0)).expect("valid age");
    c.set_field(FieldId::Gender, Answer::Choice("Male")).expect("valid gender");
    c.set_field(FieldId::HasHypertension, Answer::Choice("Ya")).expect("valid");
    c.set_field(FieldId::HasDiabetes, Answer::Choice("Tidak")).expect("valid");
    c.set_field(FieldId::HasObesity, Answer::Choice("Tidak")).expect("valid");
    c.set_field(FieldId::SmokingStatus, Answer::Choice("Current")).expect("valid");
    while !c.step().is_last() {
        c.advance().expect("every step complete");
    }
    c
}

#[test]
fn scenario_derives_senior_smoker_with_two_risk_factors() {
    let c = scenario();
    let record = derive_features(c.state()).expect("derivable");

    assert_eq!(record.age_group.code(), "Senior");
    assert_eq!(record.is_smoker, 1);
    assert_eq!(record.total_risk_factors, 2);
    assert_eq!(record.hypertension, 1);
    assert_eq!(record.diabetes, 0);
    assert_eq!(record.obesity, 0);

    let columns = record.columns();
    assert_eq!(columns[1], ("gender", FeatureValue::Category("Male")));
    assert_eq!(columns[10], ("smoking_status", FeatureValue::Category("Current")));
}

#[test]
fn scenario_scored_at_73_percent_is_high_risk() {
    let mut c = scenario();
    let verdict = c.submit(&FixedScorer(Ok(0.73))).expect("scored");

    assert_eq!(verdict.label, RiskLabel::High);
    assert_eq!(verdict.probability, 0.73);
    assert_eq!(verdict.display_percentage(), "73.0%");
    assert_eq!(verdict.headline(), "BERISIKO TINGGI");
    assert_eq!(c.verdict(), Some(&verdict));
}

#[test]
fn failed_scoring_keeps_answers_and_produces_no_verdict() {
    let mut c = scenario();
    let before = c.state().clone();

    let err = c
        .submit(&FixedScorer(Err(ScoringError::Failed("unseen category".into()))))
        .expect_err("scoring fails");

    assert!(matches!(err, CardioriskError::Scoring(ScoringError::Failed(_))));
    assert_eq!(c.state(), &before);
    assert!(c.verdict().is_none());
    assert_eq!(
        user_message(&err, Locale::Indonesian),
        "Terjadi kesalahan teknis. Silakan coba lagi nanti."
    );
}

#[test]
fn missing_model_surfaces_technical_error() {
    let mut c = scenario();
    let scorer = PipelineScorer::new();
    assert!(!scorer.is_ready());

    let err = c.submit(&scorer).expect_err("no model loaded");
    assert!(matches!(err, CardioriskError::Scoring(ScoringError::Unavailable(_))));
    assert!(c.verdict().is_none());
}

#[test]
fn restart_after_result_starts_fresh() {
    let mut c = scenario();
    c.submit(&FixedScorer(Ok(0.2))).expect("scored");
    assert!(c.verdict().is_some());

    c.restart();
    assert_eq!(c.step(), Step::FIRST);
    assert!(c.verdict().is_none());
    assert_eq!(c.state().number(FieldId::Age), Some(45.0));
    assert_eq!(c.state().choice(FieldId::SmokingStatus), Some("Never"));
}
