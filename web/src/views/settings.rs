//! Settings: account summary, backend connection, sign out.

use dioxus::prelude::*;
use ui::{sign_out, use_api, use_auth};

use crate::Route;

#[component]
pub fn Settings() -> Element {
    let api = use_api();
    let auth = use_auth();
    let nav = use_navigator();

    let base_url = api.config().base_url.clone();
    let state = auth();
    let username = state
        .user
        .as_ref()
        .map(|u| u.username.clone())
        .unwrap_or_default();
    let email = state
        .user
        .as_ref()
        .map(|u| u.email.clone())
        .unwrap_or_default();

    let handle_sign_out = move |_| {
        let api = api.clone();
        spawn(async move {
            sign_out(&api, auth).await;
            nav.replace(Route::Login {
                redirect: String::new(),
            });
        });
    };

    rsx! {
        div {
            class: "records-view",
            h2 { "Settings" }

            section {
                class: "settings-section",
                h3 { "Account" }
                p { "Signed in as {username} ({email})" }
                button {
                    class: "danger",
                    onclick: handle_sign_out,
                    "Sign out"
                }
            }

            section {
                class: "settings-section",
                h3 { "Backend" }
                p { "API base URL: {base_url}" }
                p {
                    class: "muted",
                    "Service status is available on the "
                    Link { to: Route::Health {}, "status page" }
                    "."
                }
            }
        }
    }
}
