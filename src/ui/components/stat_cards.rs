use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Row of four stat tiles: score, accuracy, current streak, best streak.
pub struct StatCards<'a> {
    score: u32,
    accuracy: u32,
    streak: u32,
    best_streak: u32,
    theme: &'a Theme,
}

impl<'a> StatCards<'a> {
    pub fn new(score: u32, accuracy: u32, streak: u32, best_streak: u32, theme: &'a Theme) -> Self {
        Self {
            score,
            accuracy,
            streak,
            best_streak,
            theme,
        }
    }
}

impl Widget for StatCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let cards: [(&str, String); 4] = [
            ("Score", format!("{}", self.score)),
            ("Accuracy", format!("{}%", self.accuracy)),
            ("Streak", format!("{}", self.streak)),
            ("Best Streak", format!("{}", self.best_streak)),
        ];

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        for (i, (label, value)) in cards.iter().enumerate() {
            let block = Block::bordered()
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg()));
            let inner = block.inner(layout[i]);
            block.render(layout[i], buf);

            let lines = vec![
                Line::from(Span::styled(
                    value.clone(),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*label, Style::default().fg(colors.text_dim()))),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(inner, buf);
        }
    }
}
