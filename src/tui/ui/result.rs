//! Scoring progress and verdict views.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Locale, RiskLabel, UiText, Verdict};
use crate::tui::styles::MedicalTheme;

/// Render the scoring progress screen.
pub fn render_scoring(f: &mut Frame, area: Rect, progress: f64, locale: Locale) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(area);

    let stage = match locale {
        Locale::English => "Analyzing your health data...",
        Locale::Indonesian => "Sedang menganalisis data kesehatan Anda...",
    };
    let stage_text = Paragraph::new(Line::from(Span::styled(stage, MedicalTheme::subtitle())))
        .alignment(Alignment::Center);
    f.render_widget(stage_text, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::info())
        .percent((progress.clamp(0.0, 1.0) * 100.0) as u16)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);
}

/// Render a verdict.
pub fn render_result(f: &mut Frame, area: Rect, verdict: &Verdict) {
    let locale = verdict.locale;
    let block = Block::default()
        .title(Span::styled(locale.ui(UiText::ResultTitle), MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Headline
            Constraint::Length(4), // Probability
            Constraint::Length(4), // Advisory
            Constraint::Min(0),
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(inner);

    let risk_style = MedicalTheme::risk_label(verdict.label);
    let icon = match verdict.label {
        RiskLabel::Low => "OK",
        RiskLabel::High => "!",
    };
    let headline = Paragraph::new(Line::from(Span::styled(
        format!("{icon} {}", verdict.headline()),
        risk_style.add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(headline, chunks[0]);

    let caption = match locale {
        Locale::English => " Risk Probability ",
        Locale::Indonesian => " Probabilitas Risiko ",
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(caption, MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(risk_style)
        .percent(verdict.percentage().clamp(0.0, 100.0) as u16)
        .label(verdict.display_percentage());
    f.render_widget(gauge, chunks[1]);

    let advisory = Paragraph::new(Line::from(Span::styled(
        verdict.advisory.as_str(),
        MedicalTheme::text(),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(advisory, chunks[2]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled(locale.ui(UiText::EditAnswers), MedicalTheme::key_desc()),
        Span::styled("[Enter/^R] ", MedicalTheme::key_hint()),
        Span::styled(locale.ui(UiText::StartOver), MedicalTheme::key_desc()),
        Span::styled("[q] ", MedicalTheme::key_hint()),
        Span::styled(locale.ui(UiText::Quit), MedicalTheme::key_desc()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[4]);
}
