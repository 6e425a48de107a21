//! Public status page: frontend/backend reachability. Never requires a
//! session, so it stays usable when everything else is broken.

use dioxus::prelude::*;
use ui::use_api;

#[component]
pub fn Health() -> Element {
    let api = use_api();

    let mut status = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.health_check().await }
        }
    });

    rsx! {
        div {
            class: "health-view",
            h2 { "Service status" }

            div {
                class: "health-row",
                span { class: "health-label", "Frontend" }
                span { class: "health-badge health-badge--up", "running" }
                span { class: "muted", "You are looking at it." }
            }

            {match &*status.read() {
                Some(report) => {
                    let (badge, text) = if report.backend_reachable {
                        ("health-badge health-badge--up", "reachable")
                    } else {
                        ("health-badge health-badge--down", "unreachable")
                    };
                    let message = report.message.clone();
                    rsx! {
                        div {
                            class: "health-row",
                            span { class: "health-label", "Backend" }
                            span { class: "{badge}", "{text}" }
                            span { class: "muted", "{message}" }
                        }
                    }
                }
                None => rsx! {
                    div {
                        class: "health-row",
                        span { class: "health-label", "Backend" }
                        span { class: "health-badge", "checking\u{2026}" }
                    }
                },
            }}

            button {
                class: "secondary",
                onclick: move |_| status.restart(),
                "Check again"
            }
        }
    }
}
