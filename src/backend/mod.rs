pub mod api;

use api::{HttpQuizApi, QuizApi, SubmissionPayload};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::quiz::{AttemptRecord, QuizDay};

#[derive(Debug)]
pub enum AppCmd {
    FetchQuiz { course_url: String, day_number: u32 },
    FetchAttempts { course_url: String, day_number: u32 },
    SubmitAttempt(SubmissionPayload),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    QuizLoaded(QuizDay),
    AttemptsFetched(Vec<AttemptRecord>),
    AttemptSubmitted(AttemptRecord),
    SubmitFailed(String),
    LoadFailed(String),
}

/// Drains UI commands, talks to the course API and reports back as events.
pub struct Backend<A> {
    api: A,
    cmd_rx: mpsc::UnboundedReceiver<AppCmd>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl<A: QuizApi> Backend<A> {
    pub fn new(
        api: A,
        cmd_rx: mpsc::UnboundedReceiver<AppCmd>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self { api, cmd_rx, event_tx }
    }

    pub async fn run(&mut self) {
        while let Some(cmd) = self.cmd_rx.recv().await {
            self.handle_command(cmd).await;
        }
        info!("Command channel closed, backend stopping");
    }

    fn emit(&self, event: AppEvent) {
        if self.event_tx.send(event).is_err() {
            warn!("Event receiver dropped");
        }
    }

    async fn handle_command(&mut self, cmd: AppCmd) {
        match cmd {
            AppCmd::FetchQuiz { course_url, day_number } => {
                match self.api.fetch_quiz(&course_url, day_number).await {
                    Ok(day) => {
                        info!(
                            "Loaded day {} with {} questions",
                            day.day_number,
                            day.questions.len()
                        );
                        self.emit(AppEvent::QuizLoaded(day));
                    }
                    Err(e) => {
                        error!("Failed to load quiz for {} day {}: {}", course_url, day_number, e);
                        self.emit(AppEvent::LoadFailed(format!("Could not load quiz: {}", e)));
                    }
                }
            }
            AppCmd::FetchAttempts { course_url, day_number } => {
                match self.api.fetch_attempts(&course_url, day_number).await {
                    Ok(attempts) => self.emit(AppEvent::AttemptsFetched(attempts)),
                    Err(e) => {
                        error!(
                            "Failed to fetch attempts for {} day {}: {}",
                            course_url, day_number, e
                        );
                        let message = format!("Could not load previous attempts: {}", e);
                        self.emit(AppEvent::LoadFailed(message));
                    }
                }
            }
            AppCmd::SubmitAttempt(payload) => {
                info!(
                    "Submitting attempt {} for {} day {}",
                    payload.attempt_number, payload.course_url, payload.day_number
                );
                match self.api.submit_attempt(&payload).await {
                    Ok(record) => self.emit(AppEvent::AttemptSubmitted(record)),
                    Err(e) => {
                        error!("Submission failed: {}", e);
                        self.emit(AppEvent::SubmitFailed(format!("Submission failed: {}", e)));
                    }
                }
            }
        }
    }
}

pub async fn init(
    cmd_rx: mpsc::UnboundedReceiver<AppCmd>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    config: Config,
) {
    info!("Backend using API at {}", config.api_base_url);
    let api = HttpQuizApi::new(&config.api_base_url);
    Backend::new(api, cmd_rx, event_tx).run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::quiz::model::QuizOption;
    use crate::quiz::Question;
    use chrono::Utc;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeApi {
        fail_submit: bool,
        submitted: Rc<RefCell<Vec<SubmissionPayload>>>,
    }

    fn sample_day() -> QuizDay {
        QuizDay {
            day_number: 3,
            title: Some("Ownership".into()),
            questions: vec![Question {
                text: "Who owns a moved value?".into(),
                options: vec![
                    QuizOption { text: "The new binding".into(), is_correct: true },
                    QuizOption { text: "Nobody".into(), is_correct: false },
                ],
            }],
        }
    }

    impl QuizApi for FakeApi {
        async fn fetch_quiz(
            &self,
            _course_url: &str,
            day_number: u32,
        ) -> Result<QuizDay, ApiError> {
            if day_number == 3 {
                Ok(sample_day())
            } else {
                Err(ApiError::Status { status: 404, body: "missing".into() })
            }
        }

        async fn fetch_attempts(
            &self,
            _course_url: &str,
            _day_number: u32,
        ) -> Result<Vec<AttemptRecord>, ApiError> {
            Ok(vec![])
        }

        async fn submit_attempt(
            &self,
            payload: &SubmissionPayload,
        ) -> Result<AttemptRecord, ApiError> {
            if self.fail_submit {
                return Err(ApiError::Status { status: 500, body: "boom".into() });
            }
            self.submitted.borrow_mut().push(payload.clone());
            Ok(AttemptRecord {
                day_number: payload.day_number,
                score: payload.score,
                completed_at: payload.submitted_date,
                total_questions: payload.questions.len() as u32,
                attempt_number: payload.attempt_number,
                is_completed: payload.score >= 10,
            })
        }
    }

    async fn run_commands(api: FakeApi, cmds: Vec<AppCmd>) -> Vec<AppEvent> {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        for cmd in cmds {
            cmd_tx.send(cmd).unwrap();
        }
        drop(cmd_tx);

        let mut backend = Backend::new(api, cmd_rx, event_tx);
        backend.run().await;

        let mut events = vec![];
        while let Ok(ev) = event_rx.try_recv() {
            events.push(ev);
        }
        events
    }

    fn payload(score: u32) -> SubmissionPayload {
        SubmissionPayload::new("rust-101".into(), 3, sample_day().questions, &[0], score, 1)
    }

    #[tokio::test]
    async fn test_fetch_quiz_and_attempts() {
        let events = run_commands(
            FakeApi::default(),
            vec![
                AppCmd::FetchQuiz { course_url: "rust-101".into(), day_number: 3 },
                AppCmd::FetchAttempts { course_url: "rust-101".into(), day_number: 3 },
            ],
        )
        .await;

        assert_eq!(
            events,
            vec![AppEvent::QuizLoaded(sample_day()), AppEvent::AttemptsFetched(vec![])]
        );
    }

    #[tokio::test]
    async fn test_missing_quiz_reports_load_failure() {
        let events = run_commands(
            FakeApi::default(),
            vec![AppCmd::FetchQuiz { course_url: "rust-101".into(), day_number: 9 }],
        )
        .await;

        match events.as_slice() {
            [AppEvent::LoadFailed(msg)] => assert!(msg.contains("404")),
            other => panic!("Unexpected events: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_success_confirms_attempt() {
        let api = FakeApi::default();
        let submitted = api.submitted.clone();
        let events = run_commands(api, vec![AppCmd::SubmitAttempt(payload(100))]).await;

        assert_eq!(submitted.borrow().len(), 1);
        match events.as_slice() {
            [AppEvent::AttemptSubmitted(record)] => {
                assert_eq!(record.score, 100);
                assert_eq!(record.attempt_number, 1);
                assert!(record.is_completed);
                assert!(record.completed_at <= Utc::now());
            }
            other => panic!("Unexpected events: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_failure_is_reported() {
        let api = FakeApi { fail_submit: true, ..FakeApi::default() };
        let events = run_commands(api, vec![AppCmd::SubmitAttempt(payload(0))]).await;

        match events.as_slice() {
            [AppEvent::SubmitFailed(msg)] => assert!(msg.contains("500")),
            other => panic!("Unexpected events: {:?}", other),
        }
    }
}
