//! Registration page.

use api::Registration;
use dioxus::prelude::*;
use ui::{notify, sign_up, use_api, use_auth, use_notices, NoticeLevel};

use crate::Route;

#[component]
pub fn Register() -> Element {
    let api = use_api();
    let auth = use_auth();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut notices = use_notices();

    if !auth().loading && auth().is_authenticated() {
        nav.replace(Route::Home {});
        return rsx! {};
    }

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            let name = username().trim().to_string();
            let mail = email().trim().to_string();
            let pass = password();

            if name.is_empty() {
                notify(&mut notices, NoticeLevel::Error, "Username is required");
                return;
            }
            if mail.is_empty() || !mail.contains('@') {
                notify(&mut notices, NoticeLevel::Error, "Please enter a valid email");
                return;
            }
            if pass.len() < 8 {
                notify(
                    &mut notices,
                    NoticeLevel::Error,
                    "Password must be at least 8 characters",
                );
                return;
            }
            if pass != confirm_password() {
                notify(&mut notices, NoticeLevel::Error, "Passwords do not match");
                return;
            }

            loading.set(true);
            let data = Registration {
                username: name,
                email: mail,
                phone: {
                    let p = phone().trim().to_string();
                    if p.is_empty() {
                        None
                    } else {
                        Some(p)
                    }
                },
                password: pass.clone(),
                password_confirm: pass,
            };
            match sign_up(&api, auth, data).await {
                Ok(user) => {
                    notify(
                        &mut notices,
                        NoticeLevel::Success,
                        &format!("Account {} created, please sign in", user.username),
                    );
                    nav.replace(Route::Login {
                        redirect: String::new(),
                    });
                }
                Err(_) => {
                    loading.set(false);
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            h1 { "Create account" }
            p { class: "muted", "Set up a space for your family's health records." }

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
                    label { "Email" }
                    input {
                        r#type: "email",
                        value: email(),
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Phone (optional)" }
                    input {
                        r#type: "tel",
                        value: phone(),
                        oninput: move |evt| phone.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Password" }
                    input {
                        r#type: "password",
                        placeholder: "At least 8 characters",
                        value: password(),
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Confirm password" }
                    input {
                        r#type: "password",
                        value: confirm_password(),
                        oninput: move |evt| confirm_password.set(evt.value()),
                    }
                }
                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account\u{2026}" } else { "Sign up" }
                }
            }

            p {
                class: "auth-switch",
                "Already have an account? "
                Link {
                    to: Route::Login { redirect: String::new() },
                    "Sign in"
                }
            }
        }
    }
}
