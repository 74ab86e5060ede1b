use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl Question {
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.is_correct)
    }

    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }

    /// True when the option at `option_idx` exists and is flagged correct.
    pub fn is_correct_choice(&self, option_idx: usize) -> bool {
        self.options.get(option_idx).map(|o| o.is_correct).unwrap_or(false)
    }
}

/// One day's quiz as served by the course API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizDay {
    pub day_number: u32,
    #[serde(default)]
    pub title: Option<String>,
    pub questions: Vec<Question>,
}

/// A persisted attempt. Read-only on this side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub day_number: u32,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
    pub total_questions: u32,
    pub attempt_number: u32,
    #[serde(default)]
    pub is_completed: bool,
}
