//! Medical visit form.

use api::MedicalRecord;
use dioxus::prelude::*;

use super::{none_if_empty, parse_date, REQUIRED_FIELDS_MESSAGE};
use crate::notify::{notify, use_notices, NoticeLevel};
use crate::tag_editor::TagListEditor;

/// Hospital departments offered in the picker.
const DEPARTMENTS: &[&str] = &[
    "Internal medicine",
    "Surgery",
    "Pediatrics",
    "Obstetrics",
    "Ophthalmology",
    "ENT",
    "Dental",
    "Dermatology",
    "Psychiatry",
    "Traditional medicine",
];

fn validate(
    id: Option<u64>,
    visit_date: &str,
    hospital: &str,
    department: &str,
    doctor_name: &str,
    reason: &str,
    diagnosis: &str,
    prescriptions: &[String],
    notes: &str,
) -> Result<MedicalRecord, String> {
    if visit_date.trim().is_empty()
        || hospital.trim().is_empty()
        || department.trim().is_empty()
        || reason.trim().is_empty()
    {
        return Err(REQUIRED_FIELDS_MESSAGE.to_string());
    }

    Ok(MedicalRecord {
        id,
        visit_date: parse_date(visit_date, "Visit date")?,
        hospital: hospital.trim().to_string(),
        department: department.trim().to_string(),
        doctor_name: none_if_empty(doctor_name),
        reason: reason.trim().to_string(),
        diagnosis: none_if_empty(diagnosis),
        prescriptions: prescriptions.to_vec(),
        notes: none_if_empty(notes),
    })
}

#[component]
pub fn MedicalRecordForm(
    initial: Option<MedicalRecord>,
    on_submit: EventHandler<MedicalRecord>,
    on_cancel: EventHandler<()>,
) -> Element {
    let record_id = initial.as_ref().and_then(|r| r.id);
    let mut visit_date = use_signal(|| {
        initial
            .as_ref()
            .map(|r| r.visit_date.to_string())
            .unwrap_or_default()
    });
    let mut hospital =
        use_signal(|| initial.as_ref().map(|r| r.hospital.clone()).unwrap_or_default());
    let mut department = use_signal(|| {
        initial
            .as_ref()
            .map(|r| r.department.clone())
            .unwrap_or_else(|| DEPARTMENTS[0].to_string())
    });
    let mut doctor_name = use_signal(|| {
        initial
            .as_ref()
            .and_then(|r| r.doctor_name.clone())
            .unwrap_or_default()
    });
    let mut reason =
        use_signal(|| initial.as_ref().map(|r| r.reason.clone()).unwrap_or_default());
    let mut diagnosis = use_signal(|| {
        initial
            .as_ref()
            .and_then(|r| r.diagnosis.clone())
            .unwrap_or_default()
    });
    let prescriptions =
        use_signal(|| initial.as_ref().map(|r| r.prescriptions.clone()).unwrap_or_default());
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
            &visit_date(),
            &hospital(),
            &department(),
            &doctor_name(),
            &reason(),
            &diagnosis(),
            &prescriptions(),
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
                    label { "Visit date *" }
                    input {
                        r#type: "date",
                        value: visit_date(),
                        oninput: move |evt| visit_date.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Hospital *" }
                    input {
                        r#type: "text",
                        value: hospital(),
                        oninput: move |evt| hospital.set(evt.value()),
                    }
                }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { "Department *" }
                    select {
                        value: department(),
                        onchange: move |evt| department.set(evt.value()),
                        for dept in DEPARTMENTS {
                            option { key: "{dept}", value: "{dept}", "{dept}" }
                        }
                    }
                }
                div {
                    class: "form-field",
                    label { "Doctor" }
                    input {
                        r#type: "text",
                        value: doctor_name(),
                        oninput: move |evt| doctor_name.set(evt.value()),
                    }
                }
            }

            div {
                class: "form-field",
                label { "Reason for visit *" }
                textarea {
                    placeholder: "Symptoms, chief complaint",
                    value: reason(),
                    oninput: move |evt| reason.set(evt.value()),
                }
            }

            div {
                class: "form-field",
                label { "Diagnosis" }
                textarea {
                    value: diagnosis(),
                    oninput: move |evt| diagnosis.set(evt.value()),
                }
            }

            TagListEditor {
                label: "Prescriptions",
                placeholder: "Add a prescription and press Enter",
                tags: prescriptions,
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
        let err = validate(None, "2024-03-01", "", "Surgery", "", "cold", "", &[], "")
            .unwrap_err();
        assert_eq!(err, REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let err = validate(
            None,
            "03/01/2024",
            "City Hospital",
            "Surgery",
            "",
            "cold",
            "",
            &[],
            "",
        )
        .unwrap_err();
        assert_eq!(err, "Visit date is not a valid date");
    }

    #[test]
    fn test_valid_visit() {
        let payload = validate(
            None,
            "2024-03-01",
            "City Hospital",
            "Internal medicine",
            " Dr. Chen ",
            "Persistent cough",
            "",
            &["amoxicillin".to_string()],
            "",
        )
        .unwrap();

        assert_eq!(payload.doctor_name.as_deref(), Some("Dr. Chen"));
        assert_eq!(payload.diagnosis, None);
        assert_eq!(payload.prescriptions.len(), 1);
    }
}
