//! Wizard controller: drives one intake session from step 1 to a verdict.
//!
//! The controller owns its `WizardState`; nothing is shared between sessions.
//! Scoring may run elsewhere (the TUI uses a worker thread), so submission is
//! split in two halves tied together by a ticket:
//!
//! 1. [`WizardController::begin_submission`] derives the feature record
//! 2. the caller scores it
//! 3. [`WizardController::finish_submission`] classifies the outcome
//!
//! While a ticket is outstanding the session is frozen: edits and forward
//! navigation are refused. A restart cancels the ticket.

use crate::domain::{
    all_steps_complete, classify, derive_features, first_incomplete_step, step_issues, Answer,
    FeatureRecord, FieldId, Locale, Step, ValidationError, Verdict, WizardState,
};
use crate::ports::{ensure_probability, RiskScorer, ScoringError};
use crate::CardioriskError;

/// Navigation and submission refusals.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavigationError {
    #[error("Step {step} has {} field(s) out of range", .issues.len())]
    StepIncomplete {
        step: Step,
        issues: Vec<ValidationError>,
    },

    #[error("Submission is only possible from step 6 (currently step {step})")]
    NotFinalStep { step: Step },

    #[error("A submission is already being scored")]
    ScoringInProgress,

    #[error("Submission {ticket} is no longer current")]
    StaleSubmission { ticket: u64 },
}

/// Record handed out by [`WizardController::begin_submission`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub ticket: u64,
    pub record: FeatureRecord,
}

/// One intake session.
#[derive(Debug, Clone)]
pub struct WizardController {
    state: WizardState,
    verdict: Option<Verdict>,
    locale: Locale,
    pending: Option<u64>,
    next_ticket: u64,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    /// Fresh session with the default locale.
    #[must_use]
    pub fn new() -> Self {
        Self::with_locale(Locale::default())
    }

    #[must_use]
    pub fn with_locale(locale: Locale) -> Self {
        Self::resume(WizardState::new(), locale)
    }

    /// Continue a session from previously collected state.
    #[must_use]
    pub fn resume(state: WizardState, locale: Locale) -> Self {
        Self {
            state,
            verdict: None,
            locale,
            pending: None,
            next_ticket: 1,
        }
    }

    #[must_use]
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.state.step()
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Verdict of the last successful submission, if any.
    #[must_use]
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    #[must_use]
    pub fn is_scoring(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the active step may be left forward.
    #[must_use]
    pub fn is_current_step_complete(&self) -> bool {
        crate::domain::is_step_complete(self.step(), &self.state)
    }

    /// Validate and store one answer.
    ///
    /// # Errors
    /// Returns `ValidationError` for an out-of-domain answer and
    /// `NavigationError::ScoringInProgress` while a submission is outstanding.
    /// The state is unchanged in both cases.
    pub fn set_field(&mut self, id: FieldId, answer: Answer<'_>) -> Result<(), CardioriskError> {
        if self.pending.is_some() {
            return Err(NavigationError::ScoringInProgress.into());
        }
        self.state.set_field(id, answer).map_err(|e| {
            tracing::debug!(field = %id, "Answer rejected");
            CardioriskError::from(e)
        })
    }

    /// Move to the next step.
    ///
    /// # Errors
    /// Returns `NavigationError::StepIncomplete` listing the offending fields,
    /// or `NavigationError::ScoringInProgress`.
    pub fn advance(&mut self) -> Result<Step, NavigationError> {
        if self.pending.is_some() {
            return Err(NavigationError::ScoringInProgress);
        }

        let step = self.step();
        let issues = step_issues(step, &self.state);
        if !issues.is_empty() {
            tracing::warn!(step = step.number(), issues = issues.len(), "Cannot advance");
            return Err(NavigationError::StepIncomplete { step, issues });
        }

        let next = step.next();
        self.state.set_step(next);
        tracing::debug!(from = step.number(), to = next.number(), "Advanced");
        Ok(next)
    }

    /// Move to the previous step. Values are kept.
    pub fn retreat(&mut self) -> Step {
        if self.pending.is_none() {
            let prev = self.step().prev();
            self.state.set_step(prev);
            tracing::debug!(to = prev.number(), "Retreated");
        }
        self.step()
    }

    /// Discard everything and start over at step 1.
    pub fn restart(&mut self) {
        if let Some(ticket) = self.pending.take() {
            tracing::info!(ticket, "Restart cancelled an outstanding submission");
        }
        self.state.reset();
        self.verdict = None;
        tracing::info!("Session restarted");
    }

    /// Freeze the session and derive the record to score.
    ///
    /// # Errors
    /// Returns `NavigationError` when not on step 6, when some step is
    /// incomplete or when a submission is outstanding, and `DerivationError`
    /// if the catalog and code tables disagree.
    pub fn begin_submission(&mut self) -> Result<PendingSubmission, CardioriskError> {
        let step = self.step();
        if self.pending.is_some() {
            return Err(NavigationError::ScoringInProgress.into());
        }
        if !step.is_last() {
            return Err(NavigationError::NotFinalStep { step }.into());
        }
        if !all_steps_complete(&self.state) {
            let bad = first_incomplete_step(&self.state).unwrap_or(step);
            let issues = step_issues(bad, &self.state);
            tracing::warn!(step = bad.number(), "Submission refused: incomplete step");
            return Err(NavigationError::StepIncomplete { step: bad, issues }.into());
        }

        self.verdict = None;
        let record = derive_features(&self.state).map_err(|e| {
            tracing::error!("Feature derivation failed: {}", e);
            CardioriskError::from(e)
        })?;

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(ticket);
        tracing::info!(ticket, "Submission started");
        Ok(PendingSubmission { ticket, record })
    }

    /// Classify the scoring outcome of a pending submission.
    ///
    /// # Errors
    /// Returns `NavigationError::StaleSubmission` if `ticket` is not the
    /// outstanding one, or the `ScoringError` of a failed score. A score
    /// outside `[0, 1]` counts as `ScoringError::Failed`. Field values are
    /// untouched either way.
    pub fn finish_submission(
        &mut self,
        ticket: u64,
        outcome: Result<f64, ScoringError>,
    ) -> Result<Verdict, CardioriskError> {
        if self.pending != Some(ticket) {
            tracing::warn!(ticket, "Ignoring stale scoring outcome");
            return Err(NavigationError::StaleSubmission { ticket }.into());
        }
        self.pending = None;

        match outcome.and_then(ensure_probability) {
            Ok(probability) => {
                let verdict = classify(probability, self.locale);
                tracing::info!(ticket, label = %verdict.label, "Submission scored");
                self.verdict = Some(verdict.clone());
                Ok(verdict)
            }
            Err(e) => {
                tracing::error!(ticket, "Scoring failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Score synchronously with `scorer`.
    ///
    /// # Errors
    /// See [`Self::begin_submission`] and [`Self::finish_submission`].
    pub fn submit(&mut self, scorer: &dyn RiskScorer) -> Result<Verdict, CardioriskError> {
        let PendingSubmission { ticket, record } = self.begin_submission()?;
        let outcome = scorer.score(&record);
        self.finish_submission(ticket, outcome)
    }
}

/// Text shown to the user for an error.
///
/// Scoring and internal failures get a generic message; the details only go
/// to the log.
#[must_use]
pub fn user_message(error: &CardioriskError, locale: Locale) -> String {
    let text = |en: &str, id: &str| match locale {
        Locale::English => en.to_string(),
        Locale::Indonesian => id.to_string(),
    };
    match error {
        CardioriskError::Validation(e) => {
            let field = locale.field_caption(e.field());
            text(
                &format!("Invalid value for {field}."),
                &format!("Nilai {field} tidak valid."),
            )
        }
        CardioriskError::Navigation(NavigationError::StepIncomplete { step, issues }) => {
            let fields = issues
                .iter()
                .map(|e| locale.field_caption(e.field()))
                .collect::<Vec<_>>()
                .join(", ");
            let title = locale.step_title(*step);
            text(
                &format!("Cannot proceed: check {fields} ({title})."),
                &format!("Tidak dapat melanjutkan: periksa {fields} ({title})."),
            )
        }
        CardioriskError::Navigation(NavigationError::ScoringInProgress) => text(
            "Analysis in progress, please wait.",
            "Sedang menganalisis, mohon tunggu.",
        ),
        CardioriskError::Navigation(_) => text("Cannot proceed.", "Tidak dapat melanjutkan."),
        _ => text(
            "A technical error occurred. Please try again later.",
            "Terjadi kesalahan teknis. Silakan coba lagi nanti.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldValue, RiskLabel};
    use proptest::prelude::*;

    struct FixedScorer(Result<f64, ScoringError>);

    impl RiskScorer for FixedScorer {
        fn score(&self, _record: &FeatureRecord) -> Result<f64, ScoringError> {
            self.0.clone()
        }

        fn is_ready(&self) -> bool {
            self.0.is_ok()
        }
    }

    fn at_final_step() -> WizardController {
        let mut c = WizardController::new();
        while !c.step().is_last() {
            c.advance().expect("defaults are complete");
        }
        c
    }

    #[test]
    fn test_advance_caps_at_final_step() {
        let mut c = at_final_step();
        assert_eq!(c.step().number(), 6);
        assert_eq!(c.advance().expect("complete").number(), 6);
    }

    #[test]
    fn test_retreat_floors_at_first_step() {
        let mut c = WizardController::new();
        assert_eq!(c.retreat(), Step::FIRST);
    }

    #[test]
    fn test_advance_refused_on_incomplete_step() {
        let state = WizardState::from_values(
            Step::FIRST,
            [(FieldId::Age, FieldValue::Number(17.0))],
        );
        let mut c = WizardController::resume(state, Locale::English);

        let err = c.advance().expect_err("age 17 is out of range");
        match err {
            NavigationError::StepIncomplete { step, issues } => {
                assert_eq!(step, Step::FIRST);
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field(), FieldId::Age);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(c.step(), Step::FIRST);
    }

    #[test]
    fn test_set_field_rejects_out_of_domain() {
        let mut c = WizardController::new();
        let before = c.state().clone();
        assert!(matches!(
            c.set_field(FieldId::Age, Answer::Number(101.0)),
            Err(CardioriskError::Validation(_))
        ));
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn test_submit_requires_final_step() {
        let mut c = WizardController::new();
        let scorer = FixedScorer(Ok(0.2));
        assert!(matches!(
            c.submit(&scorer),
            Err(CardioriskError::Navigation(NavigationError::NotFinalStep { .. }))
        ));
    }

    #[test]
    fn test_submit_stores_verdict() {
        let mut c = at_final_step();
        let verdict = c.submit(&FixedScorer(Ok(0.2))).expect("scores");
        assert_eq!(verdict.label, RiskLabel::Low);
        assert_eq!(c.verdict(), Some(&verdict));
        assert!(!c.is_scoring());
    }

    #[test]
    fn test_failed_scoring_leaves_values_and_no_verdict() {
        let mut c = at_final_step();
        c.submit(&FixedScorer(Ok(0.9))).expect("scores");
        let before = c.state().clone();

        let err = c
            .submit(&FixedScorer(Err(ScoringError::Failed("boom".into()))))
            .expect_err("scoring fails");
        assert!(matches!(err, CardioriskError::Scoring(_)));
        assert_eq!(c.state(), &before);
        assert!(c.verdict().is_none());
        assert!(!c.is_scoring());
    }

    #[test]
    fn test_non_probability_scores_are_rejected() {
        for bad in [f64::NAN, -0.1, 1.01, 1.7, f64::INFINITY] {
            let mut c = at_final_step();
            c.submit(&FixedScorer(Ok(0.9))).expect("scores");
            let before = c.state().clone();

            let err = c.submit(&FixedScorer(Ok(bad))).expect_err("not a probability");
            assert!(
                matches!(err, CardioriskError::Scoring(ScoringError::Failed(_))),
                "{bad} gave {err:?}"
            );
            assert!(c.verdict().is_none());
            assert!(!c.is_scoring());
            assert_eq!(c.state(), &before);
            assert!(user_message(&err, Locale::English).contains("technical error"));
        }
    }

    #[test]
    fn test_session_frozen_while_scoring() {
        let mut c = at_final_step();
        let pending = c.begin_submission().expect("ready");

        assert!(c.is_scoring());
        assert!(matches!(
            c.set_field(FieldId::Age, Answer::Number(40.0)),
            Err(CardioriskError::Navigation(NavigationError::ScoringInProgress))
        ));
        assert_eq!(c.advance(), Err(NavigationError::ScoringInProgress));
        assert_eq!(c.retreat().number(), 6);
        assert!(matches!(
            c.begin_submission(),
            Err(CardioriskError::Navigation(NavigationError::ScoringInProgress))
        ));

        c.finish_submission(pending.ticket, Ok(0.7)).expect("current ticket");
        assert!(c.verdict().is_some_and(Verdict::is_high_risk));
    }

    #[test]
    fn test_restart_cancels_pending_submission() {
        let mut c = at_final_step();
        let pending = c.begin_submission().expect("ready");
        c.restart();

        assert!(!c.is_scoring());
        assert!(matches!(
            c.finish_submission(pending.ticket, Ok(0.9)),
            Err(CardioriskError::Navigation(NavigationError::StaleSubmission { .. }))
        ));
        assert!(c.verdict().is_none());
        assert_eq!(c.step(), Step::FIRST);
    }

    #[test]
    fn test_user_message_hides_scoring_details() {
        let err = CardioriskError::from(ScoringError::Failed("unseen category 'x'".into()));
        let msg = user_message(&err, Locale::English);
        assert!(msg.contains("technical error"));
        assert!(!msg.contains("unseen"));

        let msg = user_message(&err, Locale::Indonesian);
        assert!(msg.contains("kesalahan teknis"));
    }

    #[test]
    fn test_user_message_names_incomplete_fields() {
        let err = CardioriskError::from(NavigationError::StepIncomplete {
            step: Step::FIRST,
            issues: vec![ValidationError::NotFinite { field: FieldId::Age }],
        });
        assert_eq!(
            user_message(&err, Locale::English),
            "Cannot proceed: check Age (Personal Data)."
        );
    }

    fn nav_ops() -> impl Strategy<Value = Vec<bool>> {
        prop::collection::vec(any::<bool>(), 0..40)
    }

    proptest! {
        #[test]
        fn prop_navigation_preserves_values(
            age in 18u8..=100,
            sleep in 0u8..=24,
            ops in nav_ops(),
        ) {
            let mut c = WizardController::new();
            c.set_field(FieldId::Age, Answer::Number(f64::from(age))).expect("in range");
            c.set_field(FieldId::SleepHours, Answer::Number(f64::from(sleep))).expect("in range");
            let values: Vec<_> = c.state().iter().collect();

            for forward in ops {
                if forward {
                    c.advance().expect("every step is complete");
                } else {
                    c.retreat();
                }
                let n = c.step().number();
                prop_assert!((1..=6).contains(&n));
            }

            prop_assert_eq!(c.state().iter().collect::<Vec<_>>(), values);
        }

        #[test]
        fn prop_restart_restores_defaults(
            age in 18u8..=100,
            smoking in prop::sample::select(vec!["Never", "Past", "Current"]),
            steps in 0usize..6,
            probability in 0.0f64..=1.0,
            submit in any::<bool>(),
        ) {
            let mut c = WizardController::new();
            c.set_field(FieldId::Age, Answer::Number(f64::from(age))).expect("in range");
            c.set_field(FieldId::SmokingStatus, Answer::Choice(smoking)).expect("allowed");
            for _ in 0..steps {
                c.advance().expect("complete");
            }
            if submit && c.step().is_last() {
                c.submit(&FixedScorer(Ok(probability))).expect("scores");
            }

            c.restart();

            prop_assert_eq!(c.state(), &WizardState::new());
            prop_assert!(c.verdict().is_none());
            prop_assert_eq!(c.step(), Step::FIRST);
        }
    }
}
