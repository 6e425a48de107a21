use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        div {
            class: "not-found",
            h2 { "Page not found" }
            p { class: "muted", "There is nothing at {path}." }
            Link { to: Route::Home {}, "Back to the dashboard" }
        }
    }
}
