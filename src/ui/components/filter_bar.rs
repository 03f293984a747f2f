use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::session::question::{Difficulty, Kind};
use crate::ui::theme::Theme;

/// Segmented display of the active filter: question kind and difficulty.
/// The active segment is drawn inverted, the rest dimmed.
pub struct FilterBar<'a> {
    kind: Kind,
    difficulty: Difficulty,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    pub fn new(kind: Kind, difficulty: Difficulty, theme: &'a Theme) -> Self {
        Self {
            kind,
            difficulty,
            theme,
        }
    }

    fn segment(&self, label: &str, active: bool) -> Span<'static> {
        let colors = &self.theme.colors;
        let text = format!(" {label} ");
        if active {
            Span::styled(
                text,
                Style::default()
                    .fg(colors.header_bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(text, Style::default().fg(colors.text_dim()))
        }
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut spans = vec![Span::styled(" [t] ", Style::default().fg(colors.text_dim()))];
        for kind in [Kind::Boolean, Kind::Multiple] {
            spans.push(self.segment(kind.label(), kind == self.kind));
        }
        spans.push(Span::styled("  [d] ", Style::default().fg(colors.text_dim())));
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            spans.push(self.segment(difficulty.label(), difficulty == self.difficulty));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
