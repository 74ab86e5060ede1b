mod backend;
mod components;
mod config;
mod error;
mod quiz;

use components::home_page::HomeComponent;
use components::nav_bar::NavComponent;
use components::quiz_page::QuizPageComponent;
use components::AppState;

use backend::{AppCmd, AppEvent};
use config::Config;
use dioxus::prelude::*;
use tokio::sync::mpsc;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[layout(NavComponent)]
    #[route("/")]
    HomeComponent {},
    #[route("/course/:course_url/day/:day_number")]
    QuizPageComponent { course_url: String, day_number: u32 },
}

fn main() {
    // The launcher may already have installed a logger
    #[cfg(not(target_arch = "wasm32"))]
    let _ = tracing_subscriber::fmt().try_init();

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context_provider(Config::from_env);
    let app_state = AppState::new();
    use_context_provider(|| app_state);

    let cmd_tx = use_hook(move || {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<AppCmd>();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
        let gate = config.attempt_gate();

        spawn(backend::init(cmd_rx, event_tx, config));

        let mut state = app_state;
        spawn(async move {
            while let Some(event) = event_rx.recv().await {
                state.apply(event, &gate);
            }
        });
        cmd_tx
    });
    use_context_provider(|| cmd_tx);

    rsx! {
        document::Stylesheet {href: asset!("/assets/main.css")}
        Router::<Route> {}
    }
}
