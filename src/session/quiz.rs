use crate::session::question::{Difficulty, Kind, Question};
use crate::session::record::AnswerRecord;

/// Load lifecycle of the current question. Exactly one variant holds at any
/// time; `Failed` carries the message shown in the status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// All mutable state for one play-through.
///
/// The session is synchronous and single-owner: fetches and timers live in
/// the app shell, and their completions are applied here tagged with the
/// generation they were started under. A completion whose generation no
/// longer matches is discarded, so a reset or filter change can never be
/// overwritten by a stale response.
pub struct QuizSession {
    pub kind: Kind,
    pub difficulty: Difficulty,
    pub load_state: LoadState,
    pub current_question: Option<Question>,
    pub selected_choice: Option<String>,
    pub correct_count: u32,
    pub asked_count: u32,
    pub target_correct: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub history: Vec<AnswerRecord>,
    pub history_limit: usize,
    generation: u64,
}

impl QuizSession {
    pub fn new(kind: Kind, difficulty: Difficulty, target_correct: u32) -> Self {
        Self {
            kind,
            difficulty,
            load_state: LoadState::Idle,
            current_question: None,
            selected_choice: None,
            correct_count: 0,
            asked_count: 0,
            target_correct,
            streak: 0,
            best_streak: 0,
            history: Vec::new(),
            history_limit: 50,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new load: clear the previous selection and any error, enter
    /// `Loading`, and return the new generation for the caller to tag its
    /// fetch with. The old question stays visible until the result lands.
    pub fn begin_load(&mut self) -> u64 {
        self.selected_choice = None;
        self.load_state = LoadState::Loading;
        self.generation += 1;
        self.generation
    }

    /// Apply a fetch completion. Returns false if the completion is stale
    /// (its generation no longer matches) and the session is unchanged.
    pub fn apply_load(&mut self, generation: u64, result: Result<Question, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(question) => {
                self.current_question = Some(question);
                self.load_state = LoadState::Loaded;
                self.asked_count += 1;
            }
            Err(message) => {
                self.current_question = None;
                self.load_state = LoadState::Failed(message);
            }
        }
        true
    }

    /// Register the user's pick for the current question. A no-op (`None`)
    /// unless a question is loaded, unanswered, and `choice` is one of its
    /// choices. Returns whether the pick was correct.
    pub fn select_choice(&mut self, choice: &str) -> Option<bool> {
        if self.load_state != LoadState::Loaded || self.selected_choice.is_some() {
            return None;
        }
        let question = self.current_question.as_ref()?;
        if !question.choices.iter().any(|c| c == choice) {
            return None;
        }

        let correct = choice == question.correct_answer;
        self.selected_choice = Some(choice.to_string());
        if correct {
            self.correct_count += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }

        self.history
            .push(AnswerRecord::from_answer(question, choice, correct));
        if self.history.len() > self.history_limit {
            self.history.remove(0);
        }

        Some(correct)
    }

    /// Whether the recorded pick matched the correct answer. `None` while
    /// unanswered.
    pub fn answer_was_correct(&self) -> Option<bool> {
        let selected = self.selected_choice.as_deref()?;
        let question = self.current_question.as_ref()?;
        Some(selected == question.correct_answer)
    }

    /// Update the filter. Returns true when a question is currently held and
    /// the caller should start a replacement load immediately; the replaced
    /// question is not counted as asked-and-abandoned.
    pub fn change_filter(&mut self, kind: Option<Kind>, difficulty: Option<Difficulty>) -> bool {
        if let Some(kind) = kind {
            self.kind = kind;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        self.current_question.is_some()
    }

    /// Restart the play-through. Counters are zeroed synchronously and the
    /// generation is bumped so any in-flight fetch or pending auto-advance is
    /// discarded; the caller follows up with a fresh load.
    pub fn reset(&mut self) {
        self.correct_count = 0;
        self.asked_count = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.selected_choice = None;
        self.current_question = None;
        self.history.clear();
        self.load_state = LoadState::Idle;
        self.generation += 1;
    }

    pub fn won(&self) -> bool {
        self.correct_count >= self.target_correct
    }

    pub fn score(&self) -> u32 {
        self.correct_count * 10
    }

    /// Percentage of asked questions answered correctly, rounded. 0 before
    /// anything was asked.
    pub fn accuracy(&self) -> u32 {
        if self.asked_count == 0 {
            return 0;
        }
        (self.correct_count as f64 / self.asked_count as f64 * 100.0).round() as u32
    }

    /// Fraction of `span` questions asked so far. The span is a pacing
    /// display independent of the win target.
    pub fn progress(&self, span: u32) -> f64 {
        if span == 0 {
            return 0.0;
        }
        (self.asked_count as f64 / span as f64).clamp(0.0, 1.0)
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn is_answered(&self) -> bool {
        self.selected_choice.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boolean_question(correct: &str) -> Question {
        Question {
            id: format!("q-{correct}"),
            kind: Kind::Boolean,
            difficulty: Difficulty::Easy,
            prompt: "The sky is blue.".to_string(),
            choices: vec!["True".to_string(), "False".to_string()],
            correct_answer: correct.to_string(),
            category: "General Knowledge".to_string(),
        }
    }

    fn session() -> QuizSession {
        QuizSession::new(Kind::Boolean, Difficulty::Easy, 5)
    }

    /// Load one question into the session and return it for assertions.
    fn load(session: &mut QuizSession, question: Question) {
        let generation = session.begin_load();
        assert!(session.apply_load(generation, Ok(question)));
    }

    #[test]
    fn test_new_session_is_idle_and_zeroed() {
        let s = session();
        assert_eq!(s.load_state, LoadState::Idle);
        assert!(s.current_question.is_none());
        assert!(s.selected_choice.is_none());
        assert_eq!(s.correct_count, 0);
        assert_eq!(s.asked_count, 0);
        assert!(!s.won());
    }

    #[test]
    fn test_load_success_increments_asked_and_clears_selection() {
        let mut s = session();
        load(&mut s, boolean_question("True"));
        s.select_choice("True");

        let before = s.asked_count;
        load(&mut s, boolean_question("False"));
        assert_eq!(s.asked_count, before + 1);
        assert!(s.selected_choice.is_none());
        assert_eq!(s.load_state, LoadState::Loaded);
    }

    #[test]
    fn test_load_failure_keeps_asked_and_clears_question() {
        let mut s = session();
        load(&mut s, boolean_question("True"));
        assert_eq!(s.asked_count, 1);

        let generation = s.begin_load();
        assert!(s.apply_load(generation, Err("HTTP 500".to_string())));
        assert_eq!(s.load_state, LoadState::Failed("HTTP 500".to_string()));
        assert_eq!(s.load_state.error(), Some("HTTP 500"));
        assert!(s.current_question.is_none());
        assert_eq!(s.asked_count, 1);
    }

    #[test]
    fn test_begin_load_clears_error() {
        let mut s = session();
        let generation = s.begin_load();
        s.apply_load(generation, Err("HTTP 503".to_string()));
        s.begin_load();
        assert_eq!(s.load_state, LoadState::Loading);
        assert!(s.load_state.error().is_none());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut s = session();
        let first = s.begin_load();
        let second = s.begin_load();

        assert!(!s.apply_load(first, Ok(boolean_question("True"))));
        assert!(s.current_question.is_none());
        assert_eq!(s.asked_count, 0);

        assert!(s.apply_load(second, Ok(boolean_question("False"))));
        assert_eq!(s.asked_count, 1);
    }

    #[test]
    fn test_correct_pick_updates_counters() {
        let mut s = session();
        load(&mut s, boolean_question("True"));
        assert_eq!(s.select_choice("True"), Some(true));
        assert_eq!(s.correct_count, 1);
        assert_eq!(s.asked_count, 1);
        assert_eq!(s.streak, 1);
        assert_eq!(s.answer_was_correct(), Some(true));
    }

    #[test]
    fn test_incorrect_pick_resets_streak_only() {
        let mut s = session();
        load(&mut s, boolean_question("True"));
        s.select_choice("True");
        load(&mut s, boolean_question("True"));
        assert_eq!(s.select_choice("False"), Some(false));
        assert_eq!(s.correct_count, 1);
        assert_eq!(s.asked_count, 2);
        assert_eq!(s.streak, 0);
        assert_eq!(s.best_streak, 1);
        assert_eq!(s.answer_was_correct(), Some(false));
    }

    #[test]
    fn test_second_pick_is_a_no_op() {
        let mut s = session();
        load(&mut s, boolean_question("True"));
        assert_eq!(s.select_choice("False"), Some(false));
        assert_eq!(s.select_choice("True"), None);
        assert_eq!(s.correct_count, 0);
        assert_eq!(s.selected_choice.as_deref(), Some("False"));
    }

    #[test]
    fn test_pick_requires_loaded_state() {
        let mut s = session();
        assert_eq!(s.select_choice("True"), None);

        s.begin_load();
        assert_eq!(s.select_choice("True"), None);

        let generation = s.generation();
        s.apply_load(generation, Err("HTTP 500".to_string()));
        assert_eq!(s.select_choice("True"), None);
        assert_eq!(s.asked_count, 0);
    }

    #[test]
    fn test_pick_outside_choices_is_rejected() {
        let mut s = session();
        load(&mut s, boolean_question("True"));
        assert_eq!(s.select_choice("Maybe"), None);
        assert!(s.selected_choice.is_none());
    }

    #[test]
    fn test_correct_never_exceeds_asked() {
        let mut s = session();
        for round in 0..20 {
            load(&mut s, boolean_question("True"));
            let pick = if round % 3 == 0 { "False" } else { "True" };
            s.select_choice(pick);
            // An extra pick each round must stay a no-op.
            s.select_choice("True");
            assert!(s.correct_count <= s.asked_count);
        }
    }

    #[test]
    fn test_won_flips_at_target_and_persists() {
        let mut s = session();
        for i in 0..5 {
            assert!(!s.won(), "won before {i} correct answers");
            load(&mut s, boolean_question("True"));
            s.select_choice("True");
        }
        assert!(s.won());
        assert_eq!(s.correct_count, 5);

        // Further loads do not un-win the session.
        load(&mut s, boolean_question("True"));
        assert!(s.won());

        s.reset();
        assert!(!s.won());
    }

    #[test]
    fn test_reset_zeroes_counters_synchronously() {
        let mut s = session();
        load(&mut s, boolean_question("True"));
        s.select_choice("True");
        let pending = s.generation();

        s.reset();
        assert_eq!(s.correct_count, 0);
        assert_eq!(s.asked_count, 0);
        assert_eq!(s.streak, 0);
        assert_eq!(s.best_streak, 0);
        assert!(s.current_question.is_none());
        assert!(s.selected_choice.is_none());
        assert!(s.history.is_empty());
        assert_eq!(s.load_state, LoadState::Idle);

        // A fetch started before the reset can no longer land.
        assert!(!s.apply_load(pending, Ok(boolean_question("True"))));
        assert!(s.current_question.is_none());
    }

    #[test]
    fn test_change_filter_requests_reload_only_with_question() {
        let mut s = session();
        assert!(!s.change_filter(Some(Kind::Multiple), None));
        assert_eq!(s.kind, Kind::Multiple);

        load(&mut s, boolean_question("True"));
        assert!(s.change_filter(None, Some(Difficulty::Hard)));
        assert_eq!(s.difficulty, Difficulty::Hard);
        assert_eq!(s.kind, Kind::Multiple);
    }

    #[test]
    fn test_score_and_accuracy() {
        let mut s = session();
        assert_eq!(s.accuracy(), 0);

        load(&mut s, boolean_question("True"));
        s.select_choice("True");
        load(&mut s, boolean_question("True"));
        s.select_choice("False");
        load(&mut s, boolean_question("True"));
        s.select_choice("True");

        assert_eq!(s.score(), 20);
        // 2 of 3 rounds to 67%.
        assert_eq!(s.accuracy(), 67);
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut s = session();
        assert_eq!(s.progress(10), 0.0);
        for _ in 0..12 {
            load(&mut s, boolean_question("True"));
        }
        assert_eq!(s.progress(10), 1.0);
        assert_eq!(s.progress(0), 0.0);
    }

    #[test]
    fn test_history_records_answers_and_caps() {
        let mut s = session();
        s.history_limit = 3;
        for round in 0..5 {
            load(&mut s, boolean_question("True"));
            let pick = if round == 4 { "False" } else { "True" };
            s.select_choice(pick);
        }
        assert_eq!(s.history.len(), 3);
        let last = s.history.last().unwrap();
        assert!(!last.correct);
        assert_eq!(last.selected, "False");
        assert_eq!(last.correct_answer, "True");
    }

    #[test]
    fn test_best_streak_high_water() {
        let mut s = QuizSession::new(Kind::Boolean, Difficulty::Easy, 10);
        let picks = ["True", "True", "False", "True", "True", "True", "False"];
        for pick in picks {
            load(&mut s, boolean_question("True"));
            s.select_choice(pick);
        }
        assert_eq!(s.streak, 0);
        assert_eq!(s.best_streak, 3);
    }
}
