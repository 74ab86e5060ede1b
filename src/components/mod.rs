pub mod dom_fullscreen;
pub mod home_page;
pub mod nav_bar;
pub mod quiz_page;
pub mod quiz_session;
pub mod results;
pub mod toast;

use dioxus::prelude::*;
use tracing::debug;

use crate::backend::AppEvent;
use crate::quiz::{AttemptGate, AttemptRecord, QuizDay, QuizSession, Submission};
use toast::{Toast, ToastKind};

#[derive(Clone, Copy)]
pub struct AppState {
    pub quiz_day: Signal<Option<QuizDay>>,
    pub attempts: Signal<Vec<AttemptRecord>>,
    pub loading: Signal<bool>,
    // Present only while a quiz is being taken
    pub session: Signal<Option<QuizSession>>,
    pub pending_submission: Signal<Option<Submission>>,
    pub last_result: Signal<Option<(AttemptRecord, Submission)>>,
    pub toasts: Signal<Vec<Toast>>,
    pub next_toast_id: Signal<u64>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            quiz_day: use_signal(|| None),
            attempts: use_signal(|| vec![]),
            loading: use_signal(|| false),
            session: use_signal(|| None),
            pending_submission: use_signal(|| None),
            last_result: use_signal(|| None),
            toasts: use_signal(|| vec![]),
            next_toast_id: use_signal(|| 0),
        }
    }

    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) {
        let id = *self.next_toast_id.peek();
        self.next_toast_id.set(id + 1);
        self.toasts.write().push(Toast { id, kind, message: message.into() });
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.write().retain(|t| t.id != id);
    }

    /// Folds a backend event into the UI state.
    pub fn apply(&mut self, event: AppEvent, gate: &AttemptGate) {
        debug!("Applying event {:?}", event);
        match event {
            AppEvent::QuizLoaded(day) => {
                self.quiz_day.set(Some(day));
                self.loading.set(false);
            }
            AppEvent::AttemptsFetched(attempts) => {
                self.attempts.set(attempts);
            }
            AppEvent::AttemptSubmitted(record) => {
                let result = settle_submitted(
                    gate,
                    &mut self.attempts.write(),
                    &mut self.pending_submission.write(),
                    &mut self.session.write(),
                    record,
                );
                if result.is_some() {
                    self.last_result.set(result);
                }
                self.notify(ToastKind::Info, "Quiz submitted");
            }
            AppEvent::SubmitFailed(message) => {
                settle_failed(&mut self.pending_submission.write(), &mut self.session.write());
                self.notify(ToastKind::Error, message);
            }
            AppEvent::LoadFailed(message) => {
                self.loading.set(false);
                self.notify(ToastKind::Error, message);
            }
        }
    }
}

/// A stored attempt ends the running session. The record goes to the front
/// of the history and is paired with the answers that produced it.
fn settle_submitted(
    gate: &AttemptGate,
    attempts: &mut Vec<AttemptRecord>,
    pending: &mut Option<Submission>,
    session: &mut Option<QuizSession>,
    record: AttemptRecord,
) -> Option<(AttemptRecord, Submission)> {
    gate.record(attempts, record.clone());
    *session = None;
    pending.take().map(|submission| (record, submission))
}

/// A rejected submit keeps the session and its answers, and reopens it for
/// another try.
fn settle_failed(pending: &mut Option<Submission>, session: &mut Option<QuizSession>) {
    *pending = None;
    if let Some(session) = session.as_mut() {
        session.submit_failed();
    }
}

pub async fn sleep_ms(ms: u32) {
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(ms as u64)).await;

    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;
    use crate::quiz::model::QuizOption;
    use crate::quiz::Question;
    use chrono::Utc;

    fn running_session() -> QuizSession {
        let questions = (0..2)
            .map(|n| Question {
                text: format!("Question {}", n),
                options: vec![
                    QuizOption { text: "Right".into(), is_correct: true },
                    QuizOption { text: "Wrong".into(), is_correct: false },
                ],
            })
            .collect();
        let mut session = QuizSession::new(questions).expect("Failed to create session");
        session.select_option(0, 0);
        session.select_option(1, 1);
        session
    }

    fn record(attempt_number: u32, score: u32) -> AttemptRecord {
        AttemptRecord {
            day_number: 1,
            score,
            completed_at: Utc::now(),
            total_questions: 2,
            attempt_number,
            is_completed: score >= 10,
        }
    }

    #[test]
    fn test_submitted_attempt_ends_session_and_leads_history() {
        let gate = AttemptGate::default();
        let mut attempts = vec![record(1, 0)];
        let mut session = Some(running_session());
        let submission = session.as_mut().unwrap().begin_submit().expect("Session is complete");
        let mut pending = Some(submission.clone());

        let stored = record(2, 50);

        let result =
            settle_submitted(&gate, &mut attempts, &mut pending, &mut session, stored.clone());

        assert_eq!(result, Some((stored, submission)));
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].attempt_number, 2);
        assert_eq!(pending, None);
        assert!(session.is_none());
    }

    #[test]
    fn test_failed_submit_keeps_answers_and_allows_retry() {
        let mut session = Some(running_session());
        let submission = session.as_mut().unwrap().begin_submit().expect("Session is complete");
        let mut pending = Some(submission.clone());
        assert_eq!(session.as_mut().unwrap().begin_submit(), Err(QuizError::SubmissionInFlight));

        settle_failed(&mut pending, &mut session);

        assert_eq!(pending, None);
        let session = session.as_mut().expect("Session survives a failed submit");
        assert!(!session.is_submitting());
        assert_eq!(session.selected_at(0), Some(0));
        assert_eq!(session.selected_at(1), Some(1));
        assert_eq!(session.begin_submit(), Ok(submission));
    }

    #[test]
    fn test_failed_submit_without_session_is_harmless() {
        let mut pending = None;
        let mut session = None;
        settle_failed(&mut pending, &mut session);
        assert!(session.is_none());
    }
}
