use std::rc::Rc;

use dioxus::prelude::*;

use crate::components::dom_fullscreen::DomFullscreen;
use crate::components::toast::ToastKind;
use crate::components::{sleep_ms, AppState};
use crate::config::Config;
use crate::quiz::fullscreen::FullscreenManager;
use crate::quiz::keys::{map_key, QuizCommand, QuizKey};
use crate::quiz::{QuestionStatus, Submission};

fn quiz_key(key: &Key) -> QuizKey {
    match key {
        Key::ArrowLeft => QuizKey::ArrowLeft,
        Key::ArrowRight => QuizKey::ArrowRight,
        Key::Character(s) => s.chars().next().map(QuizKey::Char).unwrap_or(QuizKey::Other),
        _ => QuizKey::Other,
    }
}

fn status_class(status: QuestionStatus, is_current: bool) -> &'static str {
    match (status, is_current) {
        (_, true) => "palette-btn palette-current",
        (QuestionStatus::Marked, _) => "palette-btn palette-marked",
        (QuestionStatus::Answered, _) => "palette-btn palette-answered",
        (QuestionStatus::NotAnswered, _) => "palette-btn palette-not-answered",
        (QuestionStatus::NotVisited, _) => "palette-btn",
    }
}

fn toggle_fullscreen(manager: Signal<FullscreenManager<DomFullscreen>>, mut app_state: AppState) {
    let request = manager.read().toggle();
    spawn(async move {
        if let Err(e) = request.await {
            app_state.notify(ToastKind::Error, e.to_string());
        }
    });
}

/// The quiz-taking view. Reads and mutates `AppState::session`; hands the
/// scored answers to `on_complete` exactly once per successful submit.
#[component]
pub fn QuizSessionComponent(
    day_number: u32,
    title: Option<String>,
    on_complete: EventHandler<Submission>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut app_state = use_context::<AppState>();
    let config = use_context::<Config>();
    let mut session_signal = app_state.session;
    let mut fullscreen = use_signal(|| FullscreenManager::new(DomFullscreen));

    // Dropped with the view, which unsubscribes from the platform
    use_hook(move || {
        let sub = fullscreen.peek().subscribe(move |flag| {
            if fullscreen.peek().would_change(flag) {
                fullscreen.write().on_change(flag);
            }
        });
        Rc::new(sub)
    });

    let delay_ms = config.fullscreen_delay_ms;
    use_hook(move || {
        let request = fullscreen.peek().enter_on_start(sleep_ms(delay_ms));
        spawn(async move {
            if let Err(e) = request.await {
                app_state.notify(ToastKind::Error, format!("{}. Continuing in windowed mode.", e));
            }
        })
    });

    let guard = session_signal.read();
    let Some(session) = guard.as_ref() else {
        return rsx! {};
    };

    let current_idx = session.current_index();
    let total = session.len();
    let question = session.current_question().clone();
    let option_count = question.options.len();
    let selected = session.selected_at(current_idx);
    let is_first = session.is_first();
    let is_last = session.is_last();
    let is_marked = session.is_marked(current_idx);
    let complete = session.is_complete();
    let submitting = session.is_submitting();
    let summary = session.status_summary();
    let progress = session.progress_percent();
    let statuses: Vec<QuestionStatus> = (0..total).map(|i| session.status(i)).collect();
    drop(guard);

    let is_fullscreen = fullscreen.read().is_fullscreen();
    let heading = title.unwrap_or_else(|| format!("Day {} Quiz", day_number));

    rsx! {
        div {
            class: "quiz-session page-container py-6 animate-fade-in outline-none",
            tabindex: "0",
            onmounted: move |e: MountedEvent| async move {
                let _ = e.set_focus(true).await;
            },
            onkeydown: move |e: KeyboardEvent| {
                let key = quiz_key(&e.key());
                match map_key(&key, option_count, false) {
                    Some(QuizCommand::ToggleFullscreen) => toggle_fullscreen(fullscreen, app_state),
                    Some(cmd) => {
                        e.prevent_default();
                        if let Some(s) = session_signal.write().as_mut() {
                            s.apply(cmd);
                        }
                    }
                    None => {}
                }
            },

            // Header
            div { class: "flex justify-between items-center mb-4",
                div {
                    h2 { class: "text-xl font-bold", "{heading}" }
                    p { class: "text-sm text-[var(--text-secondary)]",
                        "Question {current_idx + 1} of {total} • No Time Limit"
                    }
                }
                div { class: "flex gap-2",
                    button {
                        class: "btn btn-secondary btn-sm",
                        title: "Toggle fullscreen (F)",
                        onclick: move |_| toggle_fullscreen(fullscreen, app_state),
                        if is_fullscreen { "⤢ Exit Fullscreen" } else { "⛶ Fullscreen" }
                    }
                    button {
                        class: "btn btn-ghost btn-sm",
                        onclick: move |_| on_cancel.call(()),
                        "✕ Cancel"
                    }
                }
            }

            // Progress bar
            div { class: "w-full bg-[var(--bg-secondary)] rounded-full h-2 mb-6",
                div {
                    class: "bg-[var(--primary)] h-2 rounded-full transition-all",
                    style: "width: {progress}%"
                }
            }

            div { class: "grid gap-6 md:grid-cols-[1fr_260px]",
                // Question panel
                div { class: "panel",
                    div { class: "flex justify-between text-xs text-[var(--text-muted)] mb-2",
                        span { "Marks: 1.00" }
                        span { "Negative: 0.00" }
                    }
                    h3 { class: "text-lg font-semibold mb-4", "{question.text}" }

                    div { class: "space-y-3",
                        for (idx, option) in question.options.iter().enumerate() {
                            {
                                let is_selected = selected == Some(idx);
                                let option_text = option.text.clone();
                                rsx! {
                                    button {
                                        key: "{idx}",
                                        class: if is_selected { "option option-selected" } else { "option" },
                                        onclick: move |_| {
                                            if let Some(s) = session_signal.write().as_mut() {
                                                s.select_option(current_idx, idx);
                                            }
                                        },
                                        span { class: "option-key", "{idx + 1}" }
                                        span { "{option_text}" }
                                    }
                                }
                            }
                        }
                    }

                    // Navigation
                    div { class: "flex flex-wrap justify-between gap-2 mt-6",
                        div { class: "flex gap-2",
                            button {
                                class: "btn btn-secondary",
                                disabled: selected.is_none(),
                                onclick: move |_| {
                                    if let Some(s) = session_signal.write().as_mut() {
                                        s.clear_current_answer();
                                    }
                                },
                                "Clear Response"
                            }
                            button {
                                class: "btn btn-secondary",
                                onclick: move |_| {
                                    if let Some(s) = session_signal.write().as_mut() {
                                        s.mark_for_review_and_next();
                                    }
                                },
                                "Mark for Review & Next"
                            }
                            if is_marked {
                                button {
                                    class: "btn btn-ghost",
                                    onclick: move |_| {
                                        if let Some(s) = session_signal.write().as_mut() {
                                            s.unmark(current_idx);
                                        }
                                    },
                                    "Unmark"
                                }
                            }
                        }
                        div { class: "flex gap-2",
                            button {
                                class: "btn btn-secondary",
                                disabled: is_first,
                                onclick: move |_| {
                                    if let Some(s) = session_signal.write().as_mut() {
                                        s.previous();
                                    }
                                },
                                "← Previous"
                            }
                            button {
                                class: "btn btn-primary",
                                disabled: is_last,
                                onclick: move |_| {
                                    if let Some(s) = session_signal.write().as_mut() {
                                        s.next();
                                    }
                                },
                                "Next →"
                            }
                        }
                    }
                }

                // Question palette
                div { class: "panel",
                    h4 { class: "font-bold mb-3", "Questions" }
                    div { class: "grid grid-cols-5 gap-2 mb-4",
                        for (idx, status) in statuses.into_iter().enumerate() {
                            button {
                                key: "{idx}",
                                class: status_class(status, idx == current_idx),
                                onclick: move |_| {
                                    if let Some(s) = session_signal.write().as_mut() {
                                        s.go_to(idx);
                                    }
                                },
                                "{idx + 1}"
                            }
                        }
                    }
                    ul { class: "text-xs space-y-1 text-[var(--text-secondary)] mb-4",
                        li { span { class: "legend legend-answered" } "Answered: {summary.answered}" }
                        li { span { class: "legend legend-not-answered" } "Not Answered: {summary.not_answered}" }
                        li { span { class: "legend legend-marked" } "Marked for Review: {summary.marked}" }
                        li { span { class: "legend" } "Not Visited: {summary.not_visited}" }
                    }
                    button {
                        class: "btn btn-primary w-full",
                        disabled: !complete || submitting,
                        onclick: move |_| {
                            let result = session_signal.write().as_mut().map(|s| s.begin_submit());
                            match result {
                                Some(Ok(submission)) => on_complete.call(submission),
                                Some(Err(e)) => app_state.notify(ToastKind::Error, e.to_string()),
                                None => {}
                            }
                        },
                        if submitting {
                            "Submitting…"
                        } else if complete {
                            "Submit Quiz ✓"
                        } else {
                            "Answer all questions"
                        }
                    }
                }
            }
        }
    }
}
