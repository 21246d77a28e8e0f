//! UI module: View components for the TUI.

pub mod result;
pub mod wizard;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::Locale;
use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect, locale: Locale) {
    let text = match locale {
        Locale::English => {
            "DISCLAIMER: This tool gives an indicative estimate from a statistical model \
             and does not replace a medical examination."
        }
        Locale::Indonesian => {
            "DISCLAIMER: Alat ini memberikan perkiraan indikatif dari model statistik \
             dan tidak menggantikan pemeriksaan dokter."
        }
    };

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(Line::from(vec![Span::styled(text, MedicalTheme::text_muted())]))
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
