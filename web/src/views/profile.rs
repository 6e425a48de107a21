//! Profile page: view and edit the account's profile fields.

use api::ProfileUpdate;
use chrono::NaiveDate;
use dioxus::prelude::*;
use ui::{note_session_expiry, notify, use_api, use_auth, use_notices, NoticeLevel};

#[component]
pub fn Profile() -> Element {
    let api = use_api();
    let auth = use_auth();
    let notices = use_notices();
    let mut loaded = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut birth_date = use_signal(String::new);
    let mut blood_type = use_signal(String::new);
    let mut hobbies = use_signal(String::new);
    let mut emergency_contact = use_signal(String::new);

    {
        let api = api.clone();
        let _ = use_resource(move || {
            let api = api.clone();
            async move {
                match api.load_profile().await {
                    Ok(profile) => {
                        username.set(profile.username.clone());
                        email.set(profile.email.clone());
                        phone.set(profile.phone.clone().unwrap_or_default());
                        birth_date.set(
                            profile.birth_date.map(|d| d.to_string()).unwrap_or_default(),
                        );
                        blood_type.set(profile.blood_type.clone().unwrap_or_default());
                        hobbies.set(profile.hobbies.clone().unwrap_or_default());
                        emergency_contact
                            .set(profile.emergency_contact.clone().unwrap_or_default());
                        loaded.set(true);
                    }
                    Err(err) => {
                        tracing::warn!(%err, "failed to load profile");
                        note_session_expiry(auth, &err);
                    }
                }
            }
        });
    }

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            let mut notices = notices;
            let parsed_birth_date = {
                let raw = birth_date();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    match trimmed.parse::<NaiveDate>() {
                        Ok(date) => Some(date),
                        Err(_) => {
                            notify(
                                &mut notices,
                                NoticeLevel::Error,
                                "Birth date is not a valid date",
                            );
                            return;
                        }
                    }
                }
            };

            saving.set(true);
            let changes = ProfileUpdate {
                email: Some(email().trim().to_string()),
                phone: Some(phone().trim().to_string()),
                birth_date: parsed_birth_date,
                blood_type: Some(blood_type().trim().to_string()),
                hobbies: Some(hobbies().trim().to_string()),
                emergency_contact: Some(emergency_contact().trim().to_string()),
            };
            match api.update_profile(&changes).await {
                Ok(_) => notify(&mut notices, NoticeLevel::Success, "Profile updated"),
                Err(err) => {
                    note_session_expiry(auth, &err);
                    notify(
                        &mut notices,
                        NoticeLevel::Error,
                        &err.user_message("Failed to update profile"),
                    );
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: "records-view",
            h2 { "Profile" }

            if !loaded() {
                p { class: "muted", "Loading profile\u{2026}" }
            } else {
                form {
                    class: "record-form",
                    onsubmit: handle_save,

                    div {
                        class: "form-row",
                        div {
                            class: "form-field",
                            label { "Username" }
                            input { r#type: "text", value: username(), disabled: true }
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
                    }

                    div {
                        class: "form-row",
                        div {
                            class: "form-field",
                            label { "Phone" }
                            input {
                                r#type: "tel",
                                value: phone(),
                                oninput: move |evt| phone.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Birth date" }
                            input {
                                r#type: "date",
                                value: birth_date(),
                                oninput: move |evt| birth_date.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Blood type" }
                            select {
                                value: blood_type(),
                                onchange: move |evt| blood_type.set(evt.value()),
                                option { value: "", "Unknown" }
                                option { value: "A", "A" }
                                option { value: "B", "B" }
                                option { value: "AB", "AB" }
                                option { value: "O", "O" }
                            }
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Hobbies" }
                        textarea {
                            value: hobbies(),
                            oninput: move |evt| hobbies.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Emergency contact" }
                        input {
                            r#type: "text",
                            value: emergency_contact(),
                            oninput: move |evt| emergency_contact.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-actions",
                        button {
                            class: "primary",
                            r#type: "submit",
                            disabled: saving(),
                            if saving() { "Saving\u{2026}" } else { "Save profile" }
                        }
                    }
                }
            }
        }
    }
}
