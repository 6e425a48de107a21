//! Login page.

use api::Credentials;
use dioxus::prelude::*;
use ui::{notify, sign_in, use_api, use_auth, use_notices, NoticeLevel};

use crate::Route;

#[component]
pub fn Login(redirect: String) -> Element {
    let api = use_api();
    let auth = use_auth();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut notices = use_notices();

    // Already signed in: nothing to do here.
    if !auth().loading && auth().is_authenticated() {
        nav.replace(Route::Home {});
        return rsx! {};
    }

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let redirect = redirect.clone();
        spawn(async move {
            if username().trim().is_empty() || password().is_empty() {
                notify(
                    &mut notices,
                    NoticeLevel::Error,
                    "Please enter your username and password",
                );
                return;
            }
            loading.set(true);
            let credentials = Credentials {
                username: username().trim().to_string(),
                password: password(),
            };
            match sign_in(&api, auth, credentials).await {
                Ok(user) => {
                    notify(
                        &mut notices,
                        NoticeLevel::Success,
                        &format!("Welcome back, {}", user.username),
                    );
                    if redirect.is_empty() {
                        nav.replace(Route::Home {});
                    } else {
                        nav.replace(redirect.as_str());
                    }
                }
                Err(_) => {
                    // the auth state carries the message; just unfreeze the form
                    loading.set(false);
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            h1 { "Health Records" }
            p { class: "muted", "Sign in to manage your family's health records." }

            form {
                class: "auth-form",
                onsubmit: handle_submit,

                if let Some(err) = auth().error {
                    div { class: "form-error", "{err}" }
                }

                div {
                    class: "form-field",
                    label { "Username" }
                    input {
                        r#type: "text",
                        value: username(),
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Password" }
                    input {
                        r#type: "password",
                        value: password(),
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in\u{2026}" } else { "Sign in" }
                }
            }

            p {
                class: "auth-switch",
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
