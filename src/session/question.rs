use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Boolean,
    Multiple,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Multiple => "multiple",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Kind::Boolean => "True/False",
            Kind::Multiple => "Multiple choice",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Kind::Boolean),
            "multiple" => Some(Kind::Multiple),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Kind::Boolean => Kind::Multiple,
            Kind::Multiple => Kind::Boolean,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// One trivia question as delivered by the API. Immutable once received.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub difficulty: Difficulty,
    #[serde(rename = "question")]
    pub prompt: String,
    pub choices: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    pub category: String,
}

impl Question {
    /// Structural checks applied at the source boundary before a question
    /// reaches the session. The answer must appear among the choices exactly
    /// once or picking the true answer could never register a match.
    pub fn validate(&self) -> Result<(), String> {
        if self.choices.is_empty() {
            return Err("question has no choices".to_string());
        }
        let matches = self
            .choices
            .iter()
            .filter(|c| **c == self.correct_answer)
            .count();
        match matches {
            1 => Ok(()),
            0 => Err("correct answer is not among the choices".to_string()),
            n => Err(format!("correct answer appears {n} times in the choices")),
        }
    }
}
