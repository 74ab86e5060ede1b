use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;
use tracing::debug;

use crate::error::FullscreenError;
use crate::quiz::fullscreen::{ChangeSubscription, FullscreenPlatform};

const ENTER_JS: &str = r#"
    if (!document.fullscreenEnabled) { return "unsupported"; }
    try {
        await document.documentElement.requestFullscreen();
        return "ok";
    } catch (e) {
        return String((e && e.message) || e);
    }
"#;

const EXIT_JS: &str = r#"
    if (!document.fullscreenElement) { return "ok"; }
    try {
        await document.exitFullscreen();
        return "ok";
    } catch (e) {
        return String((e && e.message) || e);
    }
"#;

static NEXT_WATCH_ID: AtomicU64 = AtomicU64::new(0);

// One handler slot per subscription id
fn watch_js(id: u64) -> String {
    format!(
        r#"
    const handlers = (window.__quizFullscreenHandlers ||= {{}});
    const handler = () => dioxus.send(document.fullscreenElement !== null);
    handlers[{id}] = handler;
    document.addEventListener("fullscreenchange", handler);
    handler();
    await new Promise(() => {{}});
"#
    )
}

fn unwatch_js(id: u64) -> String {
    format!(
        r#"
    const handlers = window.__quizFullscreenHandlers || {{}};
    if (handlers[{id}]) {{
        document.removeEventListener("fullscreenchange", handlers[{id}]);
        delete handlers[{id}];
    }}
"#
    )
}

/// Browser fullscreen API driven through the renderer's JS bridge.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomFullscreen;

async fn run_request(js: &str) -> Result<(), FullscreenError> {
    let outcome = document::eval(js)
        .join::<String>()
        .await
        .map_err(|e| FullscreenError::Denied(format!("{:?}", e)))?;
    match outcome.as_str() {
        "ok" => Ok(()),
        "unsupported" => Err(FullscreenError::Unsupported),
        reason => Err(FullscreenError::Denied(reason.to_string())),
    }
}

impl FullscreenPlatform for DomFullscreen {
    async fn enter(&self) -> Result<(), FullscreenError> {
        run_request(ENTER_JS).await
    }

    async fn exit(&self) -> Result<(), FullscreenError> {
        run_request(EXIT_JS).await
    }

    fn subscribe(&self, mut on_change: Box<dyn FnMut(bool)>) -> ChangeSubscription {
        let id = NEXT_WATCH_ID.fetch_add(1, Ordering::Relaxed);
        let mut watcher = document::eval(&watch_js(id));
        let task = spawn(async move {
            while let Ok(is_fullscreen) = watcher.recv::<bool>().await {
                on_change(is_fullscreen);
            }
            debug!("Fullscreen watcher {} ended", id);
        });
        ChangeSubscription::new(move || {
            task.cancel();
            let _ = document::eval(&unwatch_js(id));
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watchers_use_separate_slots() {
        let first = watch_js(1);
        let second = watch_js(2);
        assert!(first.contains("handlers[1] = handler"));
        assert!(second.contains("handlers[2] = handler"));
        assert!(!second.contains("handlers[1]"));
    }

    #[test]
    fn test_unwatch_removes_only_its_own_listener() {
        let teardown = unwatch_js(1);
        assert!(teardown.contains("removeEventListener(\"fullscreenchange\", handlers[1])"));
        assert!(teardown.contains("delete handlers[1]"));
        assert!(!teardown.contains("handlers[2]"));
    }
}
