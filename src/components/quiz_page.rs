use dioxus::prelude::*;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info};

use crate::backend::api::SubmissionPayload;
use crate::backend::{AppCmd, AppEvent};
use crate::components::quiz_session::QuizSessionComponent;
use crate::components::results::ResultsComponent;
use crate::components::toast::ToastKind;
use crate::components::AppState;
use crate::config::Config;
use crate::quiz::{AttemptRecord, GateDecision, Question, QuizDay, QuizSession, Submission};

/// Questions of the loaded day, if it is the day the route asks for. A
/// response for a previously routed day must not be started or submitted.
fn routed_questions(loaded: Option<&QuizDay>, day_number: u32) -> Option<Vec<Question>> {
    loaded
        .filter(|day| day.day_number == day_number)
        .map(|day| day.questions.clone())
}

/// Hosts one day's quiz: attempt gate, history, and the session view while
/// an attempt is running. Persistence goes through the backend actor.
#[component]
pub fn QuizPageComponent(course_url: String, day_number: u32) -> Element {
    let mut app_state = use_context::<AppState>();
    let cmd_tx = use_context::<UnboundedSender<AppCmd>>();
    let config = use_context::<Config>();
    let gate = config.attempt_gate();

    // Props are plain values; re-run the fetch whenever the route changes them
    let cmd_tx_effect = cmd_tx.clone();
    let course_submit = course_url.clone();
    use_effect(use_reactive!(|(course_url, day_number)| {
        info!("Loading day {} of {}", day_number, course_url);
        app_state.loading.set(true);
        app_state.quiz_day.set(None);
        app_state.attempts.set(vec![]);
        app_state.session.set(None);
        app_state.last_result.set(None);
        let _ = cmd_tx_effect.send(AppCmd::FetchQuiz {
            course_url: course_url.clone(),
            day_number,
        });
        let _ = cmd_tx_effect.send(AppCmd::FetchAttempts { course_url, day_number });
    }));

    let start_quiz = move |_| {
        if !gate.can_attempt(&app_state.attempts.read()) {
            app_state.notify(ToastKind::Error, "No attempts left for this quiz");
            return;
        }
        let questions = routed_questions(app_state.quiz_day.read().as_ref(), day_number);
        let Some(questions) = questions else {
            return;
        };
        match QuizSession::new(questions) {
            Ok(session) => {
                app_state.last_result.set(None);
                app_state.session.set(Some(session));
            }
            Err(e) => {
                error!("Cannot start quiz: {}", e);
                app_state.notify(ToastKind::Error, e.to_string());
            }
        }
    };

    let cmd_tx_submit = cmd_tx.clone();
    let on_complete = move |submission: Submission| {
        let questions = routed_questions(app_state.quiz_day.read().as_ref(), day_number);
        let Some(questions) = questions else {
            error!("Loaded quiz does not match day {}", day_number);
            let message = "Quiz changed, reload the page".to_string();
            app_state.apply(AppEvent::SubmitFailed(message), &gate);
            return;
        };
        let attempt_number = gate.next_attempt_number(&app_state.attempts.read());
        let payload = SubmissionPayload::new(
            course_submit.clone(),
            day_number,
            questions,
            &submission.selected,
            submission.score,
            attempt_number,
        );
        app_state.pending_submission.set(Some(submission));
        if cmd_tx_submit.send(AppCmd::SubmitAttempt(payload)).is_err() {
            error!("Backend is not running");
            app_state.apply(AppEvent::SubmitFailed("Backend unavailable".to_string()), &gate);
        }
    };

    let on_cancel = move |_| {
        info!("Quiz abandoned");
        app_state.session.set(None);
    };

    let quiz_day = app_state.quiz_day.read().clone();
    let attempts = app_state.attempts.read().clone();
    let in_session = app_state.session.read().is_some();
    let loading = *app_state.loading.read();

    if in_session {
        if let Some(day) = quiz_day.as_ref() {
            return rsx! {
                QuizSessionComponent {
                    day_number: day.day_number,
                    title: day.title.clone(),
                    on_complete: on_complete,
                    on_cancel: on_cancel,
                }
            };
        }
    }

    let decision = gate.decision(&attempts);
    let best = gate.best_score(&attempts);
    let question_count = quiz_day.as_ref().map(|d| d.questions.len()).unwrap_or(0);
    let title = quiz_day
        .as_ref()
        .and_then(|d| d.title.clone())
        .unwrap_or_else(|| format!("Day {} Quiz", day_number));
    let last_result = app_state.last_result.read().clone();

    rsx! {
        div { class: "page-container py-8 animate-fade-in",
            div { class: "page-header",
                h1 { class: "page-title", "📝 {title}" }
                p { class: "text-[var(--text-secondary)] mt-1",
                    "{question_count} questions • No Time Limit • {gate.max_attempts} attempts allowed"
                }
            }

            if let (Some((record, submission)), Some(day)) = (last_result, quiz_day.as_ref()) {
                ResultsComponent {
                    questions: day.questions.clone(),
                    passed: gate.is_passed(record.score),
                    record: record,
                    submission: submission,
                }
            }

            div { class: "panel mb-6",
                if loading {
                    p { class: "text-[var(--text-secondary)]", "Loading quiz..." }
                } else {
                    match decision {
                        GateDecision::Available { remaining } => rsx! {
                            div { class: "flex justify-between items-center",
                                p { "{remaining} attempt(s) remaining" }
                                button {
                                    class: "btn btn-primary",
                                    disabled: question_count == 0,
                                    onclick: start_quiz,
                                    if attempts.is_empty() { "Start Quiz" } else { "Retry Quiz" }
                                }
                            }
                        },
                        GateDecision::Completed => rsx! {
                            p { class: "text-[var(--success)]", "✅ Quiz completed for this day." }
                        },
                        GateDecision::Exhausted => rsx! {
                            p { class: "text-[var(--warning)]", "No attempts left for this quiz." }
                        },
                    }
                }
                if let Some(best) = best {
                    p { class: "text-sm text-[var(--text-secondary)] mt-3",
                        "Best score: {best}%"
                        if gate.is_passed(best) { " • Passed" } else { " • Pass mark {gate.pass_threshold}%" }
                    }
                }
            }

            AttemptHistory { attempts: attempts }
        }
    }
}

#[component]
fn AttemptHistory(attempts: Vec<AttemptRecord>) -> Element {
    rsx! {
        div { class: "panel",
            h2 { class: "panel-title mb-3", "Previous Attempts" }
            if attempts.is_empty() {
                div { class: "empty-state py-6",
                    div { class: "empty-state-icon", "🗒" }
                    p { class: "empty-state-text", "No attempts yet." }
                }
            } else {
                table { class: "w-full text-sm",
                    thead {
                        tr {
                            th { class: "text-left", "Attempt" }
                            th { class: "text-left", "Score" }
                            th { class: "text-left", "Questions" }
                            th { class: "text-left", "Date" }
                            th { class: "text-left", "Status" }
                        }
                    }
                    tbody {
                        for attempt in attempts.iter() {
                            {
                                let date = attempt.completed_at.format("%Y-%m-%d").to_string();
                                let status = if attempt.is_completed { "Completed" } else { "Incomplete" };
                                rsx! {
                                    tr { key: "{attempt.attempt_number}",
                                        td { "#{attempt.attempt_number}" }
                                        td { "{attempt.score}%" }
                                        td { "{attempt.total_questions}" }
                                        td { "{date}" }
                                        td { "{status}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::model::QuizOption;

    fn day(day_number: u32) -> QuizDay {
        QuizDay {
            day_number,
            title: None,
            questions: vec![Question {
                text: format!("Day {} question", day_number),
                options: vec![QuizOption { text: "Yes".into(), is_correct: true }],
            }],
        }
    }

    #[test]
    fn test_routed_questions_match_day() {
        let loaded = day(1);
        let questions = routed_questions(Some(&loaded), 1).expect("Day 1 is loaded");
        assert_eq!(questions[0].text, "Day 1 question");
    }

    #[test]
    fn test_stale_day_is_not_used_after_route_change() {
        let loaded = day(1);
        assert_eq!(routed_questions(Some(&loaded), 2), None);
        assert_eq!(routed_questions(None, 2), None);
    }
}
