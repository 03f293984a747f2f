use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::event::AppEvent;
use crate::session::question::Question;
use crate::session::quiz::QuizSession;
use crate::source::QuestionSource;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Quiz,
    Settings,
}

/// UI-facing shell around the session: owns the screen, the choice cursor,
/// the auto-advance deadline, and the fetch plumbing. All session mutation
/// happens on the main loop; fetch threads only send events.
pub struct App {
    pub screen: AppScreen,
    pub session: QuizSession,
    pub config: Config,
    pub theme: &'static Theme,
    pub choice_cursor: usize,
    pub settings_selected: usize,
    pub should_quit: bool,
    advance_at: Option<(u64, Instant)>,
    source: Arc<dyn QuestionSource>,
    tx: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(config: Config, source: Arc<dyn QuestionSource>, tx: mpsc::Sender<AppEvent>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let mut session = QuizSession::new(config.kind(), config.difficulty(), config.target_correct);
        session.history_limit = config.history_limit;

        let mut app = Self {
            screen: AppScreen::Quiz,
            session,
            config,
            theme,
            choice_cursor: 0,
            settings_selected: 0,
            should_quit: false,
            advance_at: None,
            source,
            tx,
        };
        app.request_question();
        app
    }

    /// Start a load for the current filter. Any pending auto-advance dies
    /// here; the in-flight fetch (if any) is not cancelled, but its result
    /// will fail the generation check when it lands.
    pub fn request_question(&mut self) {
        let generation = self.session.begin_load();
        self.advance_at = None;
        self.choice_cursor = 0;

        let kind = self.session.kind;
        let difficulty = self.session.difficulty;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = source.fetch(kind, difficulty).map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::QuestionLoaded { generation, result });
        });
    }

    pub fn on_question_loaded(&mut self, generation: u64, result: Result<Question, String>) {
        if self.session.apply_load(generation, result) {
            self.choice_cursor = 0;
        }
    }

    /// Tick handler: fire the auto-advance once its deadline passes, unless
    /// the session moved on (generation mismatch) or the win overlay is up.
    pub fn on_tick(&mut self) {
        if let Some((generation, at)) = self.advance_at {
            if Instant::now() >= at {
                self.advance_at = None;
                if generation == self.session.generation() && !self.session.won() {
                    self.request_question();
                }
            }
        }
    }

    pub fn cursor_up(&mut self) {
        let len = self.choice_count();
        if len == 0 || self.session.is_answered() {
            return;
        }
        self.choice_cursor = if self.choice_cursor == 0 {
            len - 1
        } else {
            self.choice_cursor - 1
        };
    }

    pub fn cursor_down(&mut self) {
        let len = self.choice_count();
        if len == 0 || self.session.is_answered() {
            return;
        }
        self.choice_cursor = (self.choice_cursor + 1) % len;
    }

    pub fn pick_current(&mut self) {
        self.pick_index(self.choice_cursor);
    }

    pub fn pick_index(&mut self, index: usize) {
        let Some(choice) = self
            .session
            .current_question
            .as_ref()
            .and_then(|q| q.choices.get(index))
            .cloned()
        else {
            return;
        };
        if let Some(correct) = self.session.select_choice(&choice) {
            if correct && !self.session.won() {
                let delay = Duration::from_millis(self.config.advance_delay_ms);
                self.advance_at = Some((self.session.generation(), Instant::now() + delay));
            }
        }
    }

    pub fn toggle_kind(&mut self) {
        let kind = self.session.kind.toggled();
        if self.session.change_filter(Some(kind), None) {
            self.request_question();
        }
    }

    pub fn cycle_difficulty(&mut self) {
        let difficulty = self.session.difficulty.next();
        if self.session.change_filter(None, Some(difficulty)) {
            self.request_question();
        }
    }

    /// Restart after a win (or at any point): counters drop to zero
    /// immediately, then a fresh load starts.
    pub fn reset_session(&mut self) {
        self.session.reset();
        self.advance_at = None;
        self.request_question();
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn go_to_quiz(&mut self) {
        self.screen = AppScreen::Quiz;
    }

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = (idx + 1) % themes.len();
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                self.reload_theme();
            }
            1 => {
                self.config.target_correct = (self.config.target_correct + 1).min(20);
                self.session.target_correct = self.config.target_correct;
            }
            2 => {
                self.config.advance_delay_ms = (self.config.advance_delay_ms + 100).min(3000);
            }
            3 => {
                self.config.progress_span = (self.config.progress_span + 5).min(50);
            }
            _ => {}
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = if idx == 0 { themes.len() - 1 } else { idx - 1 };
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                self.reload_theme();
            }
            1 => {
                self.config.target_correct = self.config.target_correct.saturating_sub(1).max(1);
                self.session.target_correct = self.config.target_correct;
            }
            2 => {
                self.config.advance_delay_ms = self.config.advance_delay_ms.saturating_sub(100);
            }
            3 => {
                self.config.progress_span = self.config.progress_span.saturating_sub(5).max(5);
            }
            _ => {}
        }
    }

    fn reload_theme(&mut self) {
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
        }
    }

    fn choice_count(&self) -> usize {
        self.session
            .current_question
            .as_ref()
            .map(|q| q.choices.len())
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub fn advance_pending(&self) -> bool {
        self.advance_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::question::{Difficulty, Kind};
    use crate::source::SourceError;

    /// Source that answers every fetch with the same boolean question.
    struct FixedSource;

    impl QuestionSource for FixedSource {
        fn fetch(&self, kind: Kind, difficulty: Difficulty) -> Result<Question, SourceError> {
            Ok(Question {
                id: "fixed".to_string(),
                kind,
                difficulty,
                prompt: "The sky is blue.".to_string(),
                choices: vec!["True".to_string(), "False".to_string()],
                correct_answer: "True".to_string(),
                category: "General Knowledge".to_string(),
            })
        }
    }

    fn app_with_loaded_question() -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(Config::default(), Arc::new(FixedSource), tx);
        // Deliver the initial fetch synchronously.
        loop {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                AppEvent::QuestionLoaded { generation, result } => {
                    app.on_question_loaded(generation, result);
                    break;
                }
                _ => {}
            }
        }
        (app, rx)
    }

    #[test]
    fn test_initial_fetch_lands_and_clears_cursor() {
        let (app, _rx) = app_with_loaded_question();
        assert!(app.session.current_question.is_some());
        assert_eq!(app.session.asked_count, 1);
        assert_eq!(app.choice_cursor, 0);
    }

    #[test]
    fn test_correct_pick_schedules_auto_advance() {
        let (mut app, _rx) = app_with_loaded_question();
        app.pick_index(0); // "True" is correct
        assert!(app.advance_pending());
        assert_eq!(app.session.correct_count, 1);
    }

    #[test]
    fn test_incorrect_pick_does_not_schedule_advance() {
        let (mut app, _rx) = app_with_loaded_question();
        app.pick_index(1);
        assert!(!app.advance_pending());
        assert_eq!(app.session.correct_count, 0);
    }

    #[test]
    fn test_winning_pick_suppresses_auto_advance() {
        let (mut app, rx) = app_with_loaded_question();
        app.config.target_correct = 1;
        app.session.target_correct = 1;
        app.pick_index(0);
        assert!(app.session.won());
        assert!(!app.advance_pending());
        drop(rx);
    }

    #[test]
    fn test_cursor_wraps_and_locks_after_answer() {
        let (mut app, _rx) = app_with_loaded_question();
        app.cursor_down();
        assert_eq!(app.choice_cursor, 1);
        app.cursor_down();
        assert_eq!(app.choice_cursor, 0);
        app.cursor_up();
        assert_eq!(app.choice_cursor, 1);

        app.pick_current();
        app.cursor_up();
        assert_eq!(app.choice_cursor, 1);
    }

    #[test]
    fn test_reset_session_starts_fresh_load() {
        let (mut app, rx) = app_with_loaded_question();
        app.pick_index(0);
        app.reset_session();
        assert_eq!(app.session.correct_count, 0);
        assert_eq!(app.session.asked_count, 0);
        assert!(!app.advance_pending());

        // The reset kicked off a new fetch.
        let mut saw_load = false;
        while let Ok(event) = rx.recv_timeout(Duration::from_secs(5)) {
            if let AppEvent::QuestionLoaded { generation, result } = event {
                app.on_question_loaded(generation, result);
                saw_load = true;
                break;
            }
        }
        assert!(saw_load);
        assert_eq!(app.session.asked_count, 1);
    }

    #[test]
    fn test_filter_change_triggers_replacement_load() {
        let (mut app, rx) = app_with_loaded_question();
        let asked_before = app.session.asked_count;
        app.toggle_kind();
        assert_eq!(app.session.kind, Kind::Multiple);
        assert!(app.session.is_loading());

        while let Ok(event) = rx.recv_timeout(Duration::from_secs(5)) {
            if let AppEvent::QuestionLoaded { generation, result } = event {
                app.on_question_loaded(generation, result);
                break;
            }
        }
        // The replaced question is not double-counted beyond the new load.
        assert_eq!(app.session.asked_count, asked_before + 1);
    }
}
