//! Colors and styles for the intake screens.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskLabel;

/// Palette shared by the wizard, scoring and result views.
pub struct MedicalTheme;

impl MedicalTheme {
    /// Selected row and focused borders.
    pub const ACCENT: Color = Color::Rgb(13, 148, 136);

    /// Subtitles and key hints.
    pub const ACCENT_LIGHT: Color = Color::Rgb(45, 212, 191);

    pub const BORDER: Color = Color::Rgb(148, 163, 184);

    /// Low-risk verdicts.
    pub const LOW_RISK: Color = Color::Rgb(16, 185, 129);

    /// High-risk verdicts, incomplete steps and error lines.
    pub const HIGH_RISK: Color = Color::Rgb(244, 63, 94);

    /// Step and scoring gauges.
    pub const PROGRESS: Color = Color::Rgb(59, 130, 246);

    pub const SELECTED_FG: Color = Color::Rgb(15, 23, 42);

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252);

    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);

    /// Disclaimer.
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::ACCENT_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::LOW_RISK)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::HIGH_RISK)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::PROGRESS)
    }

    /// Field row under the cursor.
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::SELECTED_FG)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Border of a complete step or of the result panel.
    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn risk_label(label: RiskLabel) -> Style {
        match label {
            RiskLabel::Low => Self::success(),
            RiskLabel::High => Self::danger(),
        }
    }
}
