use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::record::AnswerRecord;
use crate::ui::theme::Theme;

/// Recent answers, newest first. Wide layouts only.
pub struct HistorySidebar<'a> {
    history: &'a [AnswerRecord],
    theme: &'a Theme,
}

impl<'a> HistorySidebar<'a> {
    pub fn new(history: &'a [AnswerRecord], theme: &'a Theme) -> Self {
        Self { history, theme }
    }
}

impl Widget for HistorySidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" History ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.history.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                " No answers yet",
                Style::default().fg(colors.text_dim()),
            )))
            .render(inner, buf);
            return;
        }

        let visible = self.history.iter().rev().take(inner.height as usize);
        let prompt_width = (inner.width as usize).saturating_sub(13);
        let mut lines: Vec<Line> = Vec::new();
        for record in visible {
            let mark = if record.correct { "+" } else { "x" };
            let mark_style = Style::default().fg(if record.correct {
                colors.success()
            } else {
                colors.error()
            });
            let mut prompt: String = record.prompt.chars().take(prompt_width).collect();
            if record.prompt.chars().count() > prompt_width {
                prompt.push('…');
            }
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", record.at.format("%H:%M:%S")),
                    Style::default().fg(colors.text_dim()),
                ),
                Span::styled(format!("{mark} "), mark_style),
                Span::styled(prompt, Style::default().fg(colors.fg())),
            ]));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
