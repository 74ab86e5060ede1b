use dioxus::prelude::*;

use crate::components::{sleep_ms, AppState};
use crate::config::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[component]
pub fn ToastHost() -> Element {
    let app_state = use_context::<AppState>();
    let toasts = app_state.toasts.read().clone();

    rsx! {
        div { class: "fixed bottom-4 right-4 z-[200] flex flex-col gap-2",
            for toast in toasts {
                ToastItem { key: "{toast.id}", toast: toast.clone() }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast) -> Element {
    let mut app_state = use_context::<AppState>();
    let config = use_context::<Config>();
    let id = toast.id;

    use_hook(move || {
        spawn(async move {
            sleep_ms(config.toast_ttl_ms).await;
            app_state.dismiss(id);
        })
    });

    let class = match toast.kind {
        ToastKind::Info => "toast toast-info animate-fade-in",
        ToastKind::Error => "toast toast-error animate-fade-in",
    };

    rsx! {
        div { class: "{class}",
            span { "{toast.message}" }
            button {
                class: "toast-close",
                onclick: move |_| app_state.dismiss(id),
                "✕"
            }
        }
    }
}
