//! Medication record form.

use api::MedicationRecord;
use dioxus::prelude::*;

use super::{none_if_empty, parse_date, parse_optional_date, REQUIRED_FIELDS_MESSAGE};
use crate::notify::{notify, use_notices, NoticeLevel};
use crate::tag_editor::TagListEditor;

/// Check the field values and assemble the normalized payload.
fn validate(
    id: Option<u64>,
    name: &str,
    dosage: &str,
    frequency: &str,
    start_date: &str,
    end_date: &str,
    side_effects: &[String],
    notes: &str,
) -> Result<MedicationRecord, String> {
    if name.trim().is_empty()
        || dosage.trim().is_empty()
        || frequency.trim().is_empty()
        || start_date.trim().is_empty()
    {
        return Err(REQUIRED_FIELDS_MESSAGE.to_string());
    }

    let start = parse_date(start_date, "Start date")?;
    let end = parse_optional_date(end_date, "End date")?;
    if let Some(end) = end {
        if end < start {
            return Err("End date cannot be earlier than start date".to_string());
        }
    }

    Ok(MedicationRecord {
        id,
        medication_name: name.trim().to_string(),
        dosage: dosage.trim().to_string(),
        frequency: frequency.trim().to_string(),
        start_date: start,
        end_date: end,
        side_effects: side_effects.to_vec(),
        notes: none_if_empty(notes),
    })
}

#[component]
pub fn MedicationRecordForm(
    initial: Option<MedicationRecord>,
    on_submit: EventHandler<MedicationRecord>,
    on_cancel: EventHandler<()>,
) -> Element {
    let record_id = initial.as_ref().and_then(|r| r.id);
    let mut name =
        use_signal(|| initial.as_ref().map(|r| r.medication_name.clone()).unwrap_or_default());
    let mut dosage =
        use_signal(|| initial.as_ref().map(|r| r.dosage.clone()).unwrap_or_default());
    let mut frequency =
        use_signal(|| initial.as_ref().map(|r| r.frequency.clone()).unwrap_or_default());
    let mut start_date = use_signal(|| {
        initial
            .as_ref()
            .map(|r| r.start_date.to_string())
            .unwrap_or_default()
    });
    let mut end_date = use_signal(|| {
        initial
            .as_ref()
            .and_then(|r| r.end_date)
            .map(|d| d.to_string())
            .unwrap_or_default()
    });
    let side_effects =
        use_signal(|| initial.as_ref().map(|r| r.side_effects.clone()).unwrap_or_default());
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
            &name(),
            &dosage(),
            &frequency(),
            &start_date(),
            &end_date(),
            &side_effects(),
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
                    label { "Medication name *" }
                    input {
                        r#type: "text",
                        value: name(),
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Dosage *" }
                    input {
                        r#type: "text",
                        placeholder: "e.g. 200mg",
                        value: dosage(),
                        oninput: move |evt| dosage.set(evt.value()),
                    }
                }
            }

            div {
                class: "form-field",
                label { "Frequency *" }
                input {
                    r#type: "text",
                    placeholder: "e.g. three times daily",
                    value: frequency(),
                    oninput: move |evt| frequency.set(evt.value()),
                }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { "Start date *" }
                    input {
                        r#type: "date",
                        value: start_date(),
                        oninput: move |evt| start_date.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "End date" }
                    input {
                        r#type: "date",
                        value: end_date(),
                        oninput: move |evt| end_date.set(evt.value()),
                    }
                }
            }

            TagListEditor {
                label: "Side effects",
                placeholder: "Add a side effect and press Enter",
                tags: side_effects,
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
    fn test_missing_required_fields_block_submission() {
        let err = validate(None, "", "", "", "", "", &[], "").unwrap_err();
        assert_eq!(err, REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_end_date_before_start_date_blocks_submission() {
        let err = validate(
            None,
            "Ibuprofen",
            "200mg",
            "three times daily",
            "2024-03-20",
            "2024-03-19",
            &[],
            "",
        )
        .unwrap_err();
        assert_eq!(err, "End date cannot be earlier than start date");
    }

    #[test]
    fn test_valid_payload_is_normalized() {
        let payload = validate(
            None,
            " Ibuprofen ",
            "200mg",
            "three times daily",
            "2024-03-20",
            "2024-03-25",
            &["dizziness".to_string()],
            "  ",
        )
        .unwrap();

        assert_eq!(payload.id, None);
        assert_eq!(payload.medication_name, "Ibuprofen");
        assert_eq!(payload.end_date.map(|d| d.to_string()), Some("2024-03-25".into()));
        assert_eq!(payload.side_effects, vec!["dizziness".to_string()]);
        assert_eq!(payload.notes, None);
    }

    #[test]
    fn test_open_ended_course_allowed() {
        let payload = validate(
            Some(4),
            "Ibuprofen",
            "200mg",
            "as needed",
            "2024-03-20",
            "",
            &[],
            "",
        )
        .unwrap();
        assert_eq!(payload.id, Some(4));
        assert!(payload.end_date.is_none());
    }
}
