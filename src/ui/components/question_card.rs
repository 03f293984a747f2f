use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::question::Question;
use crate::ui::theme::Theme;

/// The active question: prompt, choice list, and the answer feedback line.
///
/// Before an answer, the cursor row is highlighted; after an answer the
/// correct choice is revealed in green and a wrong pick shown in red, the
/// rest dimmed.
pub struct QuestionCard<'a> {
    question: &'a Question,
    selected: Option<&'a str>,
    cursor: usize,
    loading: bool,
    theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(
        question: &'a Question,
        selected: Option<&'a str>,
        cursor: usize,
        loading: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            question,
            selected,
            cursor,
            loading,
            theme,
        }
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = format!(" {} ", self.question.category);
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(if self.selected.is_some() {
                colors.border()
            } else {
                colors.border_focused()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let choice_rows = self.question.choices.len() as u16;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(choice_rows.saturating_mul(2)),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let prompt_style = if self.loading {
            Style::default().fg(colors.text_dim())
        } else {
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
        };
        let prompt = Paragraph::new(Line::from(Span::styled(
            self.question.prompt.as_str(),
            prompt_style,
        )))
        .wrap(Wrap { trim: true });
        prompt.render(layout[0], buf);

        let choice_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.question
                    .choices
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        let answered = self.selected.is_some();
        for (i, choice) in self.question.choices.iter().enumerate() {
            let is_cursor = !answered && i == self.cursor;
            let is_correct = *choice == self.question.correct_answer;
            let is_picked = self.selected == Some(choice.as_str());

            let style = if answered && is_correct {
                Style::default()
                    .fg(colors.choice_correct())
                    .bg(colors.choice_correct_bg())
                    .add_modifier(Modifier::BOLD)
            } else if answered && is_picked {
                Style::default()
                    .fg(colors.choice_incorrect())
                    .bg(colors.choice_incorrect_bg())
            } else if answered {
                Style::default().fg(colors.text_dim())
            } else if is_cursor {
                Style::default()
                    .fg(colors.cursor_fg())
                    .bg(colors.cursor_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let marker = if is_cursor { ">" } else { " " };
            let text = format!(" {marker} [{}] {choice} ", i + 1);
            if i < choice_layout.len() {
                Paragraph::new(Line::from(Span::styled(text, style))).render(choice_layout[i], buf);
            }
        }

        if let Some(selected) = self.selected {
            let correct = selected == self.question.correct_answer;
            let feedback = if correct {
                Line::from(Span::styled(
                    " Correct!",
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        " Incorrect.",
                        Style::default()
                            .fg(colors.error())
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" Correct answer: {}", self.question.correct_answer),
                        Style::default().fg(colors.fg()),
                    ),
                    Span::styled("  [n] Next question", Style::default().fg(colors.text_dim())),
                ])
            };
            Paragraph::new(feedback).render(layout[3], buf);
        }
    }
}
