use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::quiz::{AttemptRecord, Question, QuizDay};

/// Body of `POST /quiz/submit`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub course_url: String,
    pub day_number: u32,
    pub questions: Vec<Question>,
    pub selected_answers: Vec<i64>,
    pub score: u32,
    pub submitted_date: DateTime<Utc>,
    pub attempt_number: u32,
}

impl SubmissionPayload {
    pub fn new(
        course_url: String,
        day_number: u32,
        questions: Vec<Question>,
        selected: &[usize],
        score: u32,
        attempt_number: u32,
    ) -> Self {
        let selected: Vec<Option<usize>> = selected.iter().copied().map(Some).collect();
        Self {
            course_url,
            day_number,
            questions,
            selected_answers: encode_selection(&selected),
            score,
            submitted_date: Utc::now(),
            attempt_number,
        }
    }
}

/// Wire encoding of selections: unanswered is `-1`.
pub fn encode_selection(selected: &[Option<usize>]) -> Vec<i64> {
    selected
        .iter()
        .map(|s| s.map(|idx| idx as i64).unwrap_or(-1))
        .collect()
}

/// The course backend as seen by the quiz page.
pub trait QuizApi {
    async fn fetch_quiz(&self, course_url: &str, day_number: u32) -> Result<QuizDay, ApiError>;
    async fn fetch_attempts(
        &self,
        course_url: &str,
        day_number: u32,
    ) -> Result<Vec<AttemptRecord>, ApiError>;
    async fn submit_attempt(&self, payload: &SubmissionPayload) -> Result<AttemptRecord, ApiError>;
}

#[derive(Clone)]
pub struct HttpQuizApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQuizApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        course_url: &str,
        day_number: u32,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {} ({} day {})", url, course_url, day_number);
        let resp = self
            .client
            .get(url)
            .query(&[("courseUrl", course_url.to_string()), ("dayNumber", day_number.to_string())])
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        decode_body(status, &body)
    }
}

/// Turns a raw response into `T`, treating any non-2xx status as an error.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status, body: body.to_string() });
    }
    Ok(serde_json::from_str(body)?)
}

impl QuizApi for HttpQuizApi {
    async fn fetch_quiz(&self, course_url: &str, day_number: u32) -> Result<QuizDay, ApiError> {
        self.get_json("/quiz", course_url, day_number).await
    }

    async fn fetch_attempts(
        &self,
        course_url: &str,
        day_number: u32,
    ) -> Result<Vec<AttemptRecord>, ApiError> {
        self.get_json("/quiz/attempts", course_url, day_number).await
    }

    async fn submit_attempt(&self, payload: &SubmissionPayload) -> Result<AttemptRecord, ApiError> {
        let url = self.url("/quiz/submit");
        debug!("POST {} attempt {}", url, payload.attempt_number);
        let resp = self.client.post(url).json(payload).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        decode_body(status, &body)
    }
}
