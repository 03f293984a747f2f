mod app;
mod config;
mod event;
mod session;
mod source;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use session::quiz::LoadState;
use source::http::HttpQuestionSource;
use ui::components::filter_bar::FilterBar;
use ui::components::history_sidebar::HistorySidebar;
use ui::components::progress_bar::ProgressBar;
use ui::components::question_card::QuestionCard;
use ui::components::stat_cards::StatCards;
use ui::components::win_overlay::WinOverlay;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "trivr", version, about = "Terminal trivia quiz with remote question sources")]
struct Cli {
    #[arg(short, long, help = "Base URL of the trivia API")]
    api_url: Option<String>,

    #[arg(short, long, help = "Question kind (boolean, multiple)")]
    kind: Option<String>,

    #[arg(short, long, help = "Question difficulty (easy, medium, hard)")]
    difficulty: Option<String>,

    #[arg(short, long, help = "Correct answers needed to win")]
    target: Option<u32>,

    #[arg(long, help = "Theme name")]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    if let Some(kind) = cli.kind {
        config.kind = kind;
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(target) = cli.target {
        config.target_correct = target;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config.validate();

    let events = EventHandler::new(Duration::from_millis(100));
    let source = Arc::new(HttpQuestionSource::new(&config.api_base_url));
    let mut app = App::new(config, source, events.sender());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::QuestionLoaded { generation, result } => {
                app.on_question_loaded(generation, result);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    // The win overlay narrows the key surface to "play again" and quit.
    if app.session.won() {
        match key.code {
            KeyCode::Enter | KeyCode::Char('r') => app.reset_session(),
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.pick_current(),
        KeyCode::Char(ch @ '1'..='9') => {
            app.pick_index(ch as usize - '1' as usize);
        }
        KeyCode::Char('n') => app.request_question(),
        KeyCode::Char('t') => app.toggle_kind(),
        KeyCode::Char('d') => app.cycle_difficulty(),
        KeyCode::Char('r') => app.reset_session(),
        KeyCode::Char('s') => app.go_to_settings(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            let _ = app.config.save();
            app.go_to_quiz();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.settings_selected > 0 {
                app.settings_selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected < 3 {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            app.settings_cycle_forward();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.settings_cycle_backward();
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let session = &app.session;

    let app_layout = AppLayout::new(area);
    let tier = app_layout.tier;

    // Header: name badge, session summary, filter segments.
    let header_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(app_layout.header);

    let summary = if tier.show_stat_cards(area.height) {
        format!(
            " {}/{} correct",
            session.correct_count, session.target_correct
        )
    } else {
        // Narrow layouts fold the stat cards into the header.
        format!(
            " Score {} | Acc {}% | Streak {} | {}/{}",
            session.score(),
            session.accuracy(),
            session.streak,
            session.correct_count,
            session.target_correct
        )
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " trivr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            summary,
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, header_rows[0]);

    let filter = FilterBar::new(session.kind, session.difficulty, app.theme);
    frame.render_widget(filter, header_rows[1]);

    // Main column: stat cards, progress bar, status line, question card.
    let show_cards = tier.show_stat_cards(area.height);
    let show_progress = tier.show_progress_bar(area.height);

    let mut constraints: Vec<Constraint> = Vec::new();
    if show_cards {
        constraints.push(Constraint::Length(4));
    }
    if show_progress {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(8));

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    let mut idx = 0;
    if show_cards {
        let cards = StatCards::new(
            session.score(),
            session.accuracy(),
            session.streak,
            session.best_streak,
            app.theme,
        );
        frame.render_widget(cards, main_layout[idx]);
        idx += 1;
    }

    if show_progress {
        let progress = ProgressBar::new(
            session.asked_count,
            app.config.progress_span,
            session.progress(app.config.progress_span),
            app.theme,
        );
        frame.render_widget(progress, main_layout[idx]);
        idx += 1;
    }

    let status = match &session.load_state {
        LoadState::Loading => Some(Span::styled(
            " Loading…",
            Style::default().fg(colors.text_dim()),
        )),
        LoadState::Failed(message) => Some(Span::styled(
            format!(" Error: {message}"),
            Style::default().fg(colors.error()),
        )),
        _ => None,
    };
    if let Some(status) = status {
        frame.render_widget(Paragraph::new(Line::from(status)), main_layout[idx]);
    }
    idx += 1;

    if let Some(ref question) = session.current_question {
        let card = QuestionCard::new(
            question,
            session.selected_choice.as_deref(),
            app.choice_cursor,
            session.is_loading(),
            app.theme,
        );
        frame.render_widget(card, main_layout[idx]);
    } else {
        let hint = match &session.load_state {
            LoadState::Failed(_) => " No question. Press [n] to retry.",
            LoadState::Loading => " Fetching a question…",
            _ => " Press [n] to load a question.",
        };
        let placeholder = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(colors.text_dim()),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, main_layout[idx]);
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        let sidebar = HistorySidebar::new(&session.history, app.theme);
        frame.render_widget(sidebar, sidebar_area);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [1-9/Enter] Answer  [n] Next  [t] Kind  [d] Difficulty  [r] Reset  [s] Settings  [q] Quit ",
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, app_layout.footer);

    if session.won() {
        let overlay_area = ui::layout::centered_rect(50, 50, area);
        let overlay = WinOverlay::new(
            session.target_correct,
            session.score(),
            session.asked_count,
            session.accuracy(),
            session.best_streak,
            app.theme,
        );
        frame.render_widget(overlay, overlay_area);
    }
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 70, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        ("Theme".to_string(), app.config.theme.clone()),
        (
            "Target correct".to_string(),
            format!("{}", app.config.target_correct),
        ),
        (
            "Auto-advance delay".to_string(),
            format!("{} ms", app.config.advance_delay_ms),
        ),
        (
            "Progress span".to_string(),
            format!("{} questions", app.config.progress_span),
        ),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.text_dim()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(3))
                .collect::<Vec<_>>(),
        )
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_text = format!("{indicator}{label}:");
        let value_text = format!("  < {value} >");

        let label_style = Style::default()
            .fg(if is_selected {
                colors.accent()
            } else {
                colors.fg()
            })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });

        let value_style = Style::default().fg(if is_selected {
            colors.warning()
        } else {
            colors.text_dim()
        });

        let lines = vec![
            Line::from(Span::styled(label_text, label_style)),
            Line::from(Span::styled(value_text, value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
