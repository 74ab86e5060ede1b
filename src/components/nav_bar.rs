use dioxus::prelude::*;
use crate::Route;
use crate::components::toast::ToastHost;

#[component]
pub fn NavComponent() -> Element {
    rsx! {
        div { class: "min-h-screen flex flex-col",
            nav { class: "nav-bar",
                div { class: "page-container",
                    div { class: "nav-logo",
                        div { class: "logo-icon" }
                        span { class: "logo-text", "Course Quiz" }
                    }

                    div { class: "nav-links",
                        Link {
                            to: Route::HomeComponent {},
                            class: "nav-link",
                            active_class: "active",
                            "Home"
                        }
                    }
                }
            }

            div { class: "fixed-header-spacer" }

            div { class: "flex-1",
                Outlet::<Route> {}
            }

            ToastHost {}
        }
    }
}
