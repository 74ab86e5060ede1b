use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Quiz has no questions")]
    EmptyQuestionSet,

    #[error("Question {question} has no options")]
    NoOptions { question: usize },

    #[error("{unanswered} question(s) still unanswered")]
    Incomplete { unanswered: usize },

    #[error("A submission is already in progress")]
    SubmissionInFlight,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FullscreenError {
    #[error("Fullscreen request denied: {0}")]
    Denied(String),

    #[error("Fullscreen is not supported here")]
    Unsupported,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
