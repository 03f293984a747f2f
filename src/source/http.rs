use crate::session::question::{Difficulty, Kind, Question};
use crate::source::{QuestionSource, SourceError};

/// Remote trivia API client: one GET per question against
/// `{base}/api/trivia?type={kind}&difficulty={difficulty}`.
pub struct HttpQuestionSource {
    base_url: String,
}

impl HttpQuestionSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn question_url(&self, kind: Kind, difficulty: Difficulty) -> String {
        format!(
            "{}/api/trivia?type={}&difficulty={}",
            self.base_url,
            kind.as_str(),
            difficulty.as_str()
        )
    }
}

impl QuestionSource for HttpQuestionSource {
    fn fetch(&self, kind: Kind, difficulty: Difficulty) -> Result<Question, SourceError> {
        let body = fetch_body(&self.question_url(kind, difficulty))?;
        decode_question(&body)
    }
}

/// Decode and validate a question document. Validation failures surface as a
/// load failure instead of silently breaking answer matching later.
fn decode_question(body: &str) -> Result<Question, SourceError> {
    let question: Question =
        serde_json::from_str(body).map_err(|e| SourceError::InvalidQuestion(e.to_string()))?;
    question.validate().map_err(SourceError::InvalidQuestion)?;
    Ok(question)
}

#[cfg(feature = "network")]
fn fetch_body(url: &str) -> Result<String, SourceError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| SourceError::Network(e.to_string()))?;
    let response = client
        .get(url)
        .send()
        .map_err(|e| SourceError::Network(e.to_string()))?;
    if !response.status().is_success() {
        return Err(SourceError::Http(response.status().as_u16()));
    }
    response.text().map_err(|e| SourceError::Network(e.to_string()))
}

#[cfg(not(feature = "network"))]
fn fetch_body(_url: &str) -> Result<String, SourceError> {
    Err(SourceError::Network(
        "built without network support".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_url_shape() {
        let source = HttpQuestionSource::new("http://localhost:3000/");
        assert_eq!(
            source.question_url(Kind::Boolean, Difficulty::Easy),
            "http://localhost:3000/api/trivia?type=boolean&difficulty=easy"
        );
        assert_eq!(
            source.question_url(Kind::Multiple, Difficulty::Hard),
            "http://localhost:3000/api/trivia?type=multiple&difficulty=hard"
        );
    }

    #[test]
    fn test_decode_valid_document() {
        let body = r#"{
            "id": "q1",
            "type": "boolean",
            "difficulty": "easy",
            "question": "Rust has a garbage collector.",
            "choices": ["True", "False"],
            "correctAnswer": "False",
            "category": "Computers"
        }"#;
        let question = decode_question(body).unwrap();
        assert_eq!(question.correct_answer, "False");
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let err = decode_question("not json").unwrap_err();
        assert!(matches!(err, SourceError::InvalidQuestion(_)));
    }

    #[test]
    fn test_decode_rejects_structurally_invalid_question() {
        // Well-formed JSON whose answer is not among the choices.
        let body = r#"{
            "id": "q2",
            "type": "boolean",
            "difficulty": "easy",
            "question": "Water is wet.",
            "choices": ["True", "False"],
            "correctAnswer": "Yes",
            "category": "Science"
        }"#;
        let err = decode_question(body).unwrap_err();
        assert!(err.to_string().starts_with("invalid question:"));
    }
}
