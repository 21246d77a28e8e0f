//! Wizard view: one step of the intake at a time.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::application::{user_message, WizardController};
use crate::domain::{Answer, FieldDomain, FieldId, FieldValue, Locale, Step, UiText};
use crate::tui::styles::MedicalTheme;
use crate::CardioriskError;

/// Answers loaded with the `S` key.
pub const SAMPLE_ANSWERS: [(FieldId, Answer<'static>); 28] = [
    (FieldId::Age, Answer::Number(60.0)),
    (FieldId::Gender, Answer::Choice("Male")),
    (FieldId::IncomeLevel, Answer::Choice("Middle")),
    (FieldId::SmokingStatus, Answer::Choice("Current")),
    (FieldId::AlcoholConsumption, Answer::Choice("Moderate")),
    (FieldId::DietaryHabits, Answer::Choice("Unhealthy")),
    (FieldId::PhysicalActivity, Answer::Choice("Low")),
    (FieldId::Region, Answer::Choice("Urban")),
    (FieldId::SleepHours, Answer::Number(5.5)),
    (FieldId::AirPollutionExposure, Answer::Choice("High")),
    (FieldId::StressLevel, Answer::Choice("High")),
    (FieldId::HasDiabetes, Answer::Choice("Tidak")),
    (FieldId::HasHypertension, Answer::Choice("Ya")),
    (FieldId::HasObesity, Answer::Choice("Tidak")),
    (FieldId::ParticipatedInFreeScreening, Answer::Choice("Tidak")),
    (FieldId::FamilyHistory, Answer::Choice("Ya")),
    (FieldId::PreviousHeartDisease, Answer::Choice("Tidak")),
    (FieldId::MedicationUsage, Answer::Choice("Ya")),
    (FieldId::EkgResults, Answer::Choice("Normal")),
    (FieldId::BpSystolic, Answer::Number(150.0)),
    (FieldId::CholesterolLevel, Answer::Number(240.0)),
    (FieldId::CholesterolLdl, Answer::Number(160.0)),
    (FieldId::FastingBloodSugar, Answer::Number(110.0)),
    (FieldId::BpDiastolic, Answer::Number(95.0)),
    (FieldId::CholesterolHdl, Answer::Number(40.0)),
    (FieldId::Triglycerides, Answer::Number(200.0)),
    (FieldId::WaistCircumference, Answer::Number(98.0)),
    (FieldId::HeartRate, Answer::Number(80.0)),
];

/// Cursor and numeric edit buffer for the active step.
#[derive(Debug, Default)]
pub struct WizardFormState {
    pub selected: usize,
    /// Digits typed into the selected numeric field, not yet committed
    pub edit: String,
    pub error_message: Option<String>,
}

impl WizardFormState {
    /// Field under the cursor.
    #[must_use]
    pub fn selected_field(&self, step: Step) -> Option<FieldId> {
        step.fields().nth(self.selected)
    }

    pub fn next_field(&mut self, step: Step) {
        let count = step.fields().count();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn prev_field(&mut self, step: Step) {
        let count = step.fields().count();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    /// Append to the edit buffer if the selected field is numeric.
    pub fn input_char(&mut self, step: Step, c: char) {
        let numeric = self
            .selected_field(step)
            .is_some_and(|id| matches!(id.spec().domain, FieldDomain::Numeric { .. }));
        if numeric && (c.is_ascii_digit() || c == '.') && self.edit.len() < 8 {
            self.edit.push(c);
            self.error_message = None;
        }
    }

    pub fn delete_char(&mut self) {
        self.edit.pop();
    }

    /// Drop the edit buffer.
    pub fn discard_edit(&mut self) {
        self.edit.zeroize();
    }

    /// Store the edit buffer into the selected field.
    ///
    /// The buffer is wiped whether or not the value is accepted. An empty
    /// buffer keeps the stored value.
    ///
    /// # Errors
    /// Returns the controller's error for a rejected value. Unparseable input
    /// is reported as not-a-number for that field.
    pub fn commit(&mut self, controller: &mut WizardController) -> Result<(), CardioriskError> {
        if self.edit.is_empty() {
            return Ok(());
        }
        let Some(id) = self.selected_field(controller.step()) else {
            self.edit.zeroize();
            return Ok(());
        };

        let parsed = self.edit.parse::<f64>();
        self.edit.zeroize();
        let value = parsed.unwrap_or(f64::NAN);
        controller.set_field(id, Answer::Number(value))
    }

    /// Cycle the selected choice field forward or backward.
    ///
    /// # Errors
    /// Returns the controller's error if the session is frozen.
    pub fn cycle_choice(
        &mut self,
        controller: &mut WizardController,
        forward: bool,
    ) -> Result<(), CardioriskError> {
        let Some(id) = self.selected_field(controller.step()) else {
            return Ok(());
        };
        let FieldDomain::Choice(labels) = id.spec().domain else {
            return Ok(());
        };
        let current = controller.state().choice(id).unwrap_or_default();
        let pos = labels.iter().position(|l| *l == current).unwrap_or(0);
        let next = if forward {
            (pos + 1) % labels.len()
        } else {
            (pos + labels.len() - 1) % labels.len()
        };
        controller.set_field(id, Answer::Choice(labels[next]))
    }

    /// Show `error` in the footer.
    pub fn show_error(&mut self, error: &CardioriskError, locale: Locale) {
        self.error_message = Some(user_message(error, locale));
    }

    /// Fresh form after a step change or restart.
    pub fn reset(&mut self) {
        self.edit.zeroize();
        self.selected = 0;
        self.error_message = None;
    }
}

/// Store [`SAMPLE_ANSWERS`] into the session.
///
/// # Errors
/// Returns the first rejected answer (only while scoring is in progress).
pub fn load_sample_answers(controller: &mut WizardController) -> Result<(), CardioriskError> {
    for (id, answer) in SAMPLE_ANSWERS {
        controller.set_field(id, answer)?;
    }
    Ok(())
}

/// Render the active wizard step.
///
/// Without a loaded model the footer says so in place of the key hints.
pub fn render_wizard(
    f: &mut Frame,
    area: Rect,
    form: &WizardFormState,
    controller: &WizardController,
    model_ready: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_header(f, chunks[0], controller);
    render_progress(f, chunks[1], controller.step());
    render_fields(f, chunks[2], form, controller);
    render_footer(f, chunks[3], form, controller, model_ready);
}

fn render_header(f: &mut Frame, area: Rect, controller: &WizardController) {
    let step = controller.step();
    let locale = controller.locale();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(
            format!(
                "{} {step}/6: {}",
                locale.ui(UiText::Step),
                locale.step_title(step)
            ),
            MedicalTheme::title(),
        ),
        Span::styled(
            format!(" │ {}", locale.ui(UiText::AppTitle)),
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_progress(f: &mut Frame, area: Rect, step: Step) {
    let progress = step.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(MedicalTheme::info())
        .percent((progress * 100.0).round() as u16)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, area);
}

fn value_text(
    id: FieldId,
    value: FieldValue,
    locale: Locale,
    form: &WizardFormState,
    is_selected: bool,
) -> String {
    match value {
        _ if is_selected && !form.edit.is_empty() => format!("{}▌", form.edit),
        FieldValue::Number(n) => match id.spec().domain {
            FieldDomain::Numeric { integral: true, .. } => format!("{n:.0}"),
            _ => format!("{n:.1}"),
        },
        FieldValue::Choice(label) => {
            let caption = locale.choice_caption(label);
            if is_selected {
                format!("◀ {caption} ▶")
            } else {
                caption.to_string()
            }
        }
    }
}

fn render_fields(f: &mut Frame, area: Rect, form: &WizardFormState, controller: &WizardController) {
    let locale = controller.locale();
    let items: Vec<ListItem> = controller
        .step()
        .fields()
        .enumerate()
        .map(|(i, id)| {
            let is_selected = i == form.selected;
            let value = value_text(id, controller.state().value(id), locale, form, is_selected);
            let caption = format!(" {:<34}", locale.field_caption(id));
            let line = if is_selected {
                Line::from(vec![
                    Span::styled(caption, MedicalTheme::selected()),
                    Span::styled(format!(" {value} "), MedicalTheme::selected()),
                ])
            } else {
                Line::from(vec![
                    Span::styled(caption, MedicalTheme::text_secondary()),
                    Span::styled(format!(" {value}"), MedicalTheme::text()),
                ])
            };
            ListItem::new(line)
        })
        .collect();

    let border_style = if controller.is_current_step_complete() {
        MedicalTheme::border_focused()
    } else {
        MedicalTheme::danger()
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(list, area);
}

/// Key hints in the active locale.
fn key_hints(locale: Locale, last_step: bool) -> Line<'static> {
    let enter = if last_step {
        UiText::Analyze
    } else {
        UiText::Next
    };
    let hints = [
        ("[↑↓] ", UiText::Field),
        ("[←→] ", UiText::Choice),
        ("[Enter] ", enter),
        ("[Esc] ", UiText::Back),
        ("[S] ", UiText::Sample),
        ("[^R] ", UiText::Restart),
        ("[q] ", UiText::Quit),
    ];
    Line::from(
        hints
            .into_iter()
            .flat_map(|(key, text)| {
                [
                    Span::styled(key, MedicalTheme::key_hint()),
                    Span::styled(locale.ui(text), MedicalTheme::key_desc()),
                ]
            })
            .collect::<Vec<_>>(),
    )
}

fn render_footer(
    f: &mut Frame,
    area: Rect,
    form: &WizardFormState,
    controller: &WizardController,
    model_ready: bool,
) {
    let locale = controller.locale();
    let content = if let Some(err) = &form.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else if !model_ready && controller.step().is_last() {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(locale.ui(UiText::ModelUnavailable), MedicalTheme::danger()),
        ])
    } else {
        key_hints(locale, controller.step().is_last())
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
