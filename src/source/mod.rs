pub mod http;

use thiserror::Error;

use crate::session::question::{Difficulty, Kind, Question};

/// Failure modes of a question fetch. All of them collapse into the
/// session's `Failed(message)` state; the variants exist so the HTTP layer
/// and tests can distinguish what actually went wrong.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP {0}")]
    Http(u16),
    #[error("{0}")]
    Network(String),
    #[error("invalid question: {0}")]
    InvalidQuestion(String),
}

/// A capability that produces one question per call for the given filter.
///
/// `fetch` blocks the calling thread; the app shell runs it on a worker
/// thread and routes the result back through the event channel.
pub trait QuestionSource: Send + Sync {
    fn fetch(&self, kind: Kind, difficulty: Difficulty) -> Result<Question, SourceError>;
}
