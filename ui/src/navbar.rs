use dioxus::prelude::*;

/// Top navigation bar. The web crate fills it with its own router links.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        header {
            class: "navbar",
            {children}
        }
    }
}
