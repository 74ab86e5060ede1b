use dioxus::prelude::*;
use crate::Route;

/// Entry point for picking which course day to open.
#[component]
pub fn HomeComponent() -> Element {
    let mut course_url = use_signal(|| String::new());
    let mut day_input = use_signal(|| "1".to_string());

    let day_number = day_input().trim().parse::<u32>().ok();
    let ready = !course_url().trim().is_empty() && day_number.is_some();

    rsx! {
        div { class: "page-container py-8 animate-fade-in",
            div { class: "page-header",
                h1 { class: "page-title", "🎓 Daily Quizzes" }
                p { class: "text-[var(--text-secondary)] mt-1", "Pick a course and day to open its quiz" }
            }

            div { class: "panel grid gap-4 max-w-md",
                div { class: "form-group",
                    label { class: "form-label", "Course" }
                    input {
                        class: "input",
                        placeholder: "course-slug",
                        value: "{course_url}",
                        oninput: move |e| course_url.set(e.value())
                    }
                }
                div { class: "form-group",
                    label { class: "form-label", "Day" }
                    input {
                        class: "input",
                        "type": "number",
                        "min": "1",
                        value: "{day_input}",
                        oninput: move |e| day_input.set(e.value())
                    }
                }
                if let (true, Some(day)) = (ready, day_number) {
                    Link {
                        to: Route::QuizPageComponent { course_url: course_url().trim().to_string(), day_number: day },
                        class: "btn btn-primary text-center",
                        "Open Quiz"
                    }
                } else {
                    button { class: "btn btn-primary", disabled: true, "Open Quiz" }
                }
            }
        }
    }
}
