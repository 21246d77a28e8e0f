//! Main TUI application state machine.
//!
//! Handles:
//! - Screen switching between wizard, scoring and result
//! - Input event handling
//! - Scoring via background worker

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::PipelineScorer;
use crate::application::{NavigationError, WizardController};
use crate::config::AppConfig;
use crate::domain::Locale;
use crate::ports::RiskScorer;
use crate::CardioriskError;

use super::ui::{
    render_disclaimer,
    result::{render_result, render_scoring},
    wizard::{load_sample_answers, render_wizard, WizardFormState},
};
use super::worker::{ScoringProgress, ScoringWorker, ScoringWorkerHandle};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Wizard,
    Scoring,
    Result,
}

/// Main application state
pub struct App {
    screen: Screen,

    should_quit: bool,

    /// The intake session
    controller: WizardController,

    /// Shared, read-only after load
    scorer: Arc<dyn RiskScorer>,

    form: WizardFormState,

    /// Pending scoring worker (if running)
    pending_worker: Option<ScoringWorkerHandle>,

    /// Fake progress for the scoring screen
    scoring_progress: f64,

    scoring_started_at: Option<Instant>,
}

impl App {
    /// Create the application with the pipeline scorer from `config`.
    ///
    /// A model that cannot be loaded is logged, not fatal: the wizard still
    /// runs and submission reports a technical error.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let mut scorer = PipelineScorer::new();
        if let Err(e) = scorer.load_model(&config.model_path) {
            tracing::error!("Scoring pipeline unavailable: {}", e);
        }
        Self::with_dependencies(Arc::new(scorer), config.locale)
    }

    /// Create the application with an injected scorer.
    #[must_use]
    pub fn with_dependencies(scorer: Arc<dyn RiskScorer>, locale: Locale) -> Self {
        Self {
            screen: Screen::Wizard,
            should_quit: false,
            controller: WizardController::with_locale(locale),
            scorer,
            form: WizardFormState::default(),
            pending_worker: None,
            scoring_progress: 0.0,
            scoring_started_at: None,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        self.form.reset();
        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();
            self.tick_scoring_progress();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let locale = self.controller.locale();
                match (self.screen, self.controller.verdict()) {
                    (Screen::Scoring, _) => {
                        render_scoring(f, chunks[0], self.scoring_progress, locale);
                    }
                    (Screen::Result, Some(verdict)) => render_result(f, chunks[0], verdict),
                    _ => render_wizard(
                        f,
                        chunks[0],
                        &self.form,
                        &self.controller,
                        self.scorer.is_ready(),
                    ),
                }

                render_disclaimer(f, chunks[1], locale);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background worker for progress updates.
    fn poll_worker(&mut self) {
        loop {
            let Some(progress) = self
                .pending_worker
                .as_ref()
                .and_then(ScoringWorkerHandle::try_recv)
            else {
                break;
            };

            match progress {
                ScoringProgress::Scoring => {}
                ScoringProgress::Complete { ticket, outcome } => {
                    self.pending_worker = None;
                    self.scoring_started_at = None;
                    match self.controller.finish_submission(ticket, outcome) {
                        Ok(_) => self.screen = Screen::Result,
                        Err(CardioriskError::Navigation(NavigationError::StaleSubmission {
                            ..
                        })) => {}
                        Err(e) => {
                            self.screen = Screen::Wizard;
                            self.form.show_error(&e, self.controller.locale());
                        }
                    }
                    break;
                }
            }
        }
    }

    fn tick_scoring_progress(&mut self) {
        let Some(started_at) = self.scoring_started_at else {
            return;
        };
        // Approaches 95% asymptotically until the worker finishes.
        let elapsed = started_at.elapsed().as_secs_f64();
        let target = 0.95 * (1.0 - (-elapsed / 0.6).exp());
        self.scoring_progress = self.scoring_progress.max(target);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('r') => self.restart(),
                _ => {}
            }
            return;
        }
        if key == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Wizard => self.handle_wizard_key(key),
            Screen::Scoring => {}
            Screen::Result => match key {
                KeyCode::Enter => self.restart(),
                // Back to step 6 with every answer kept; the verdict stays
                // until the next submission replaces it.
                KeyCode::Esc => {
                    self.form.reset();
                    self.screen = Screen::Wizard;
                }
                _ => {}
            },
        }
    }

    fn handle_wizard_key(&mut self, key: KeyCode) {
        let step = self.controller.step();
        let outcome = match key {
            KeyCode::Up => self.form.commit(&mut self.controller).map(|()| {
                self.form.prev_field(step);
            }),
            KeyCode::Down | KeyCode::Tab => self.form.commit(&mut self.controller).map(|()| {
                self.form.next_field(step);
            }),
            KeyCode::Left => self.form.cycle_choice(&mut self.controller, false),
            KeyCode::Right => self.form.cycle_choice(&mut self.controller, true),
            KeyCode::Char('s' | 'S') => {
                self.form.discard_edit();
                load_sample_answers(&mut self.controller)
            }
            KeyCode::Char(c) => {
                self.form.input_char(step, c);
                Ok(())
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                Ok(())
            }
            KeyCode::Esc => {
                if self.form.edit.is_empty() {
                    if self.controller.retreat() != step {
                        self.form.reset();
                    }
                } else {
                    self.form.discard_edit();
                }
                Ok(())
            }
            KeyCode::Enter => self.enter(),
            _ => Ok(()),
        };

        match outcome {
            Ok(()) => self.form.error_message = None,
            Err(e) => self.form.show_error(&e, self.controller.locale()),
        }
    }

    /// Commit the edit, then advance or submit.
    fn enter(&mut self) -> crate::Result<()> {
        self.form.commit(&mut self.controller)?;

        if !self.controller.step().is_last() {
            self.controller.advance()?;
            self.form.reset();
            return Ok(());
        }

        let submission = self.controller.begin_submission()?;
        self.form.reset();
        self.pending_worker = Some(ScoringWorker::spawn(self.scorer.clone(), submission));
        self.scoring_progress = 0.0;
        self.scoring_started_at = Some(Instant::now());
        self.screen = Screen::Scoring;
        Ok(())
    }

    fn restart(&mut self) {
        self.controller.restart();
        self.form.reset();
        self.pending_worker = None;
        self.scoring_started_at = None;
        self.scoring_progress = 0.0;
        self.screen = Screen::Wizard;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureRecord, FieldId, RiskLabel, Step, WizardState};
    use crate::ports::ScoringError;

    struct FixedScorer(Result<f64, ScoringError>);

    impl RiskScorer for FixedScorer {
        fn score(&self, _record: &FeatureRecord) -> Result<f64, ScoringError> {
            self.0.clone()
        }

        fn is_ready(&self) -> bool {
            self.0.is_ok()
        }
    }

    fn app(outcome: Result<f64, ScoringError>) -> App {
        App::with_dependencies(Arc::new(FixedScorer(outcome)), Locale::English)
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn wait_for_worker(app: &mut App) {
        for _ in 0..250 {
            app.poll_worker();
            if app.pending_worker.is_none() {
                return;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        panic!("scoring worker did not finish");
    }

    fn submit_sample(app: &mut App) {
        press(app, KeyCode::Char('S'));
        for _ in 0..5 {
            press(app, KeyCode::Enter);
        }
        assert_eq!(app.controller().step(), Step::LAST);
        press(app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Scoring);
        wait_for_worker(app);
    }

    #[test]
    fn test_sample_answers_reach_result() {
        let mut app = app(Ok(0.73));
        submit_sample(&mut app);

        assert_eq!(app.screen(), Screen::Result);
        let verdict = app.controller().verdict().expect("verdict");
        assert_eq!(verdict.label, RiskLabel::High);
        assert_eq!(verdict.display_percentage(), "73.0%");
    }

    #[test]
    fn test_esc_on_result_keeps_answers_for_resubmission() {
        let mut app = app(Ok(0.73));
        submit_sample(&mut app);
        let answers = app.controller().state().clone();

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Wizard);
        assert_eq!(app.controller().step(), Step::LAST);
        assert_eq!(app.controller().state(), &answers);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Scoring);
        wait_for_worker(&mut app);
        assert_eq!(app.screen(), Screen::Result);
        assert_eq!(app.controller().state(), &answers);
    }

    #[test]
    fn test_out_of_range_score_returns_to_wizard() {
        let mut app = app(Ok(f64::NAN));
        submit_sample(&mut app);

        assert_eq!(app.screen(), Screen::Wizard);
        assert!(app.controller().verdict().is_none());
        let message = app.form.error_message.as_deref().expect("error shown");
        assert!(message.contains("technical error"));
    }

    #[test]
    fn test_scoring_failure_returns_to_wizard() {
        let mut app = app(Err(ScoringError::Unavailable("no model".into())));
        submit_sample(&mut app);

        assert_eq!(app.screen(), Screen::Wizard);
        assert!(app.controller().verdict().is_none());
        assert_eq!(app.controller().state().number(FieldId::Age), Some(60.0));
        let message = app.form.error_message.as_deref().expect("error shown");
        assert!(message.contains("technical error"));
    }

    #[test]
    fn test_typing_and_restart() {
        let mut app = app(Ok(0.1));
        press(&mut app, KeyCode::Char('7'));
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.controller().state().number(FieldId::Age), Some(70.0));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller().step().number(), 2);

        app.handle_key(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(app.controller().state(), &WizardState::new());
        assert_eq!(app.screen(), Screen::Wizard);
    }

    #[test]
    fn test_out_of_range_entry_shows_error() {
        let mut app = app(Ok(0.1));
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('7'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.controller().step(), Step::FIRST);
        assert_eq!(app.controller().state().number(FieldId::Age), Some(45.0));
        assert_eq!(app.form.error_message.as_deref(), Some("Invalid value for Age."));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(Ok(0.1));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app(Ok(0.1));
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
