use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Terminal win state: centered congratulations box drawn over the quiz
/// screen. Visible until the session is reset.
pub struct WinOverlay<'a> {
    target_correct: u32,
    score: u32,
    asked: u32,
    accuracy: u32,
    best_streak: u32,
    theme: &'a Theme,
}

impl<'a> WinOverlay<'a> {
    pub fn new(
        target_correct: u32,
        score: u32,
        asked: u32,
        accuracy: u32,
        best_streak: u32,
        theme: &'a Theme,
    ) -> Self {
        Self {
            target_correct,
            score,
            asked,
            accuracy,
            best_streak,
            theme,
        }
    }
}

impl Widget for WinOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" You won! ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            "Congratulations!",
            Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let subtitle = Paragraph::new(Line::from(Span::styled(
            format!("You reached {} correct answers.", self.target_correct),
            Style::default().fg(colors.fg()),
        )))
        .alignment(Alignment::Center);
        subtitle.render(layout[1], buf);

        let stats = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Score ", Style::default().fg(colors.text_dim())),
                Span::styled(
                    format!("{}", self.score),
                    Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Questions ", Style::default().fg(colors.text_dim())),
                Span::styled(format!("{}", self.asked), Style::default().fg(colors.accent())),
            ]),
            Line::from(vec![
                Span::styled("Accuracy ", Style::default().fg(colors.text_dim())),
                Span::styled(format!("{}%", self.accuracy), Style::default().fg(colors.accent())),
                Span::styled("   Best streak ", Style::default().fg(colors.text_dim())),
                Span::styled(
                    format!("{}", self.best_streak),
                    Style::default().fg(colors.accent()),
                ),
            ]),
        ])
        .alignment(Alignment::Center);
        stats.render(layout[2], buf);

        let footer = Paragraph::new(Line::from(Span::styled(
            "[Enter] Play again  [q] Quit",
            Style::default().fg(colors.text_dim()),
        )))
        .alignment(Alignment::Center);
        footer.render(layout[4], buf);
    }
}
