use dioxus::prelude::*;

use crate::quiz::review::{build_review, Outcome};
use crate::quiz::{AttemptRecord, Question, Submission};

#[component]
pub fn ResultsComponent(
    questions: Vec<Question>,
    record: AttemptRecord,
    submission: Submission,
    passed: bool,
) -> Element {
    let selected: Vec<Option<usize>> = submission.selected.iter().copied().map(Some).collect();
    let sheet = build_review(&questions, &selected);
    let submitted_at = record.completed_at.format("%Y-%m-%d %H:%M").to_string();

    rsx! {
        div { class: "panel mb-6",
            div { class: "text-center mb-6",
                div { class: "text-6xl mb-2", if passed { "🎉" } else { "📚" } }
                h2 {
                    class: if passed {
                        "text-2xl font-bold text-[var(--success)]"
                    } else {
                        "text-2xl font-bold text-[var(--warning)]"
                    },
                    if passed { "Congratulations, you passed!" } else { "Keep Learning!" }
                }
                div { class: "text-4xl font-bold my-3", "{submission.score}%" }
                p { class: "text-sm text-[var(--text-secondary)]",
                    "Attempt {record.attempt_number} • {submitted_at}"
                }
                p { class: "text-sm text-[var(--text-secondary)] mt-1",
                    "{sheet.correct} correct • {sheet.incorrect} incorrect • {sheet.unanswered} unanswered"
                }
            }

            div { class: "space-y-3",
                for row in sheet.rows {
                    {
                        let (badge, badge_class) = match row.outcome {
                            Outcome::Correct => ("✓ Correct", "badge badge-success"),
                            Outcome::Incorrect => ("✗ Incorrect", "badge badge-error"),
                            Outcome::Unanswered => ("– Skipped", "badge"),
                        };
                        let your_answer = row.selected_text.clone().unwrap_or_else(|| "—".to_string());
                        let correct_answer = row.correct_text.clone().unwrap_or_else(|| "—".to_string());
                        rsx! {
                            div { key: "{row.number}", class: "p-4 rounded-lg bg-[var(--bg-secondary)] border border-[var(--border)]",
                                div { class: "flex justify-between items-start gap-4 mb-2",
                                    h3 { class: "font-semibold", "{row.number}. {row.question}" }
                                    span { class: "{badge_class}", "{badge}" }
                                }
                                p { class: "text-sm", "Your answer: {your_answer}" }
                                if row.outcome != Outcome::Correct {
                                    p { class: "text-sm text-[var(--success)]", "Correct answer: {correct_answer}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
