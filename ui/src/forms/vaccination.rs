//! Vaccination record form.

use api::VaccinationRecord;
use dioxus::prelude::*;

use super::{none_if_empty, parse_date, parse_optional_date, REQUIRED_FIELDS_MESSAGE};
use crate::notify::{notify, use_notices, NoticeLevel};
use crate::tag_editor::TagListEditor;

fn validate(
    id: Option<u64>,
    vaccine_name: &str,
    vaccination_date: &str,
    manufacturer: &str,
    batch_number: &str,
    site: &str,
    next_dose_date: &str,
    reactions: &[String],
    notes: &str,
) -> Result<VaccinationRecord, String> {
    if vaccine_name.trim().is_empty()
        || vaccination_date.trim().is_empty()
        || site.trim().is_empty()
    {
        return Err(REQUIRED_FIELDS_MESSAGE.to_string());
    }

    let date = parse_date(vaccination_date, "Vaccination date")?;
    let next_dose = parse_optional_date(next_dose_date, "Next dose date")?;
    if let Some(next_dose) = next_dose {
        if next_dose < date {
            return Err("Next dose date cannot be earlier than the vaccination date".to_string());
        }
    }

    Ok(VaccinationRecord {
        id,
        vaccine_name: vaccine_name.trim().to_string(),
        vaccination_date: date,
        manufacturer: none_if_empty(manufacturer),
        batch_number: none_if_empty(batch_number),
        site: site.trim().to_string(),
        next_dose_date: next_dose,
        reactions: reactions.to_vec(),
        notes: none_if_empty(notes),
    })
}

#[component]
pub fn VaccinationRecordForm(
    initial: Option<VaccinationRecord>,
    on_submit: EventHandler<VaccinationRecord>,
    on_cancel: EventHandler<()>,
) -> Element {
    let record_id = initial.as_ref().and_then(|r| r.id);
    let mut vaccine_name =
        use_signal(|| initial.as_ref().map(|r| r.vaccine_name.clone()).unwrap_or_default());
    let mut vaccination_date = use_signal(|| {
        initial
            .as_ref()
            .map(|r| r.vaccination_date.to_string())
            .unwrap_or_default()
    });
    let mut manufacturer = use_signal(|| {
        initial
            .as_ref()
            .and_then(|r| r.manufacturer.clone())
            .unwrap_or_default()
    });
    let mut batch_number = use_signal(|| {
        initial
            .as_ref()
            .and_then(|r| r.batch_number.clone())
            .unwrap_or_default()
    });
    let mut site =
        use_signal(|| initial.as_ref().map(|r| r.site.clone()).unwrap_or_default());
    let mut next_dose_date = use_signal(|| {
        initial
            .as_ref()
            .and_then(|r| r.next_dose_date)
            .map(|d| d.to_string())
            .unwrap_or_default()
    });
    let reactions =
        use_signal(|| initial.as_ref().map(|r| r.reactions.clone()).unwrap_or_default());
    let mut notes = use_signal(|| {
        initial
            .as_ref()
            .and_then(|r| r.notes.clone())
            .unwrap_or_default()
    });
    let mut error = use_signal(|| Option::<String>::None);
    let mut notices = use_notices();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match validate(
            record_id,
            &vaccine_name(),
            &vaccination_date(),
            &manufacturer(),
            &batch_number(),
            &site(),
            &next_dose_date(),
            &reactions(),
            &notes(),
        ) {
            Ok(payload) => {
                error.set(None);
                on_submit.call(payload);
            }
            Err(message) => {
                notify(&mut notices, NoticeLevel::Error, &message);
                error.set(Some(message));
            }
        }
    };

    rsx! {
        form {
            class: "record-form",
            onsubmit: handle_submit,

            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { "Vaccine name *" }
                    input {
                        r#type: "text",
                        value: vaccine_name(),
                        oninput: move |evt| vaccine_name.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Vaccination date *" }
                    input {
                        r#type: "date",
                        value: vaccination_date(),
                        oninput: move |evt| vaccination_date.set(evt.value()),
                    }
                }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { "Manufacturer" }
                    input {
                        r#type: "text",
                        value: manufacturer(),
                        oninput: move |evt| manufacturer.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Batch number" }
                    input {
                        r#type: "text",
                        value: batch_number(),
                        oninput: move |evt| batch_number.set(evt.value()),
                    }
                }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { "Injection site *" }
                    input {
                        r#type: "text",
                        placeholder: "e.g. left arm",
                        value: site(),
                        oninput: move |evt| site.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Next dose date" }
                    input {
                        r#type: "date",
                        value: next_dose_date(),
                        oninput: move |evt| next_dose_date.set(evt.value()),
                    }
                }
            }

            TagListEditor {
                label: "Reactions",
                placeholder: "Add a reaction and press Enter",
                tags: reactions,
            }

            div {
                class: "form-field",
                label { "Notes" }
                textarea {
                    value: notes(),
                    oninput: move |evt| notes.set(evt.value()),
                }
            }

            div {
                class: "form-actions",
                button {
                    class: "primary",
                    r#type: "submit",
                    if record_id.is_some() { "Save changes" } else { "Create record" }
                }
                button {
                    class: "secondary",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let err = validate(None, "HPV", "", "", "", "left arm", "", &[], "").unwrap_err();
        assert_eq!(err, REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_next_dose_before_vaccination_blocks() {
        let err = validate(
            None,
            "HPV",
            "2024-03-20",
            "",
            "",
            "left arm",
            "2024-03-01",
            &[],
            "",
        )
        .unwrap_err();
        assert_eq!(
            err,
            "Next dose date cannot be earlier than the vaccination date"
        );
    }

    #[test]
    fn test_valid_dose() {
        let payload = validate(
            None,
            "HPV",
            "2024-03-20",
            " BioPharm ",
            "B-172",
            "left arm",
            "2024-09-20",
            &["sore arm".to_string()],
            "",
        )
        .unwrap();

        assert_eq!(payload.manufacturer.as_deref(), Some("BioPharm"));
        assert_eq!(
            payload.next_dose_date.map(|d| d.to_string()),
            Some("2024-09-20".into())
        );
        assert_eq!(payload.reactions.len(), 1);
    }
}
