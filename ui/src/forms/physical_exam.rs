//! Physical exam form.
//!
//! The largest form: vitals are numeric fields, exam items are a tag list,
//! and when the overall result is "abnormal" an inline editor collects the
//! out-of-range items (name / measured value / reference range).

use api::{AbnormalItem, ExamResult, PhysicalExam};
use dioxus::prelude::*;

use super::{none_if_empty, parse_date, parse_number, parse_optional_date, REQUIRED_FIELDS_MESSAGE};
use crate::notify::{notify, use_notices, NoticeLevel};
use crate::tag_editor::TagListEditor;

/// Raw field values as bound to the inputs.
#[derive(Clone, Debug, Default, PartialEq)]
struct ExamFields {
    id: Option<u64>,
    exam_date: String,
    hospital: String,
    exam_type: String,
    height: String,
    weight: String,
    systolic: String,
    diastolic: String,
    heart_rate: String,
    temperature: String,
    exam_items: Vec<String>,
    result: ExamResult,
    abnormal_items: Vec<AbnormalItem>,
    doctor_advice: String,
    next_exam_date: String,
    notes: String,
}

fn result_value(result: ExamResult) -> &'static str {
    match result {
        ExamResult::Normal => "normal",
        ExamResult::Abnormal => "abnormal",
    }
}

fn validate(fields: &ExamFields) -> Result<PhysicalExam, String> {
    if fields.exam_date.trim().is_empty()
        || fields.hospital.trim().is_empty()
        || fields.exam_type.trim().is_empty()
        || fields.height.trim().is_empty()
        || fields.weight.trim().is_empty()
        || fields.systolic.trim().is_empty()
        || fields.diastolic.trim().is_empty()
        || fields.heart_rate.trim().is_empty()
        || fields.temperature.trim().is_empty()
    {
        return Err(REQUIRED_FIELDS_MESSAGE.to_string());
    }

    let exam_date = parse_date(&fields.exam_date, "Exam date")?;
    let next_exam_date = parse_optional_date(&fields.next_exam_date, "Next exam date")?;
    if let Some(next) = next_exam_date {
        if next < exam_date {
            return Err("Next exam date cannot be earlier than the exam date".to_string());
        }
    }

    // abnormal findings only make sense on an abnormal result
    let abnormal_items = match fields.result {
        ExamResult::Abnormal => fields.abnormal_items.clone(),
        ExamResult::Normal => Vec::new(),
    };

    Ok(PhysicalExam {
        id: fields.id,
        exam_date,
        hospital: fields.hospital.trim().to_string(),
        exam_type: fields.exam_type.trim().to_string(),
        height: parse_number(&fields.height, "Height")?,
        weight: parse_number(&fields.weight, "Weight")?,
        systolic_pressure: parse_number(&fields.systolic, "Systolic pressure")?,
        diastolic_pressure: parse_number(&fields.diastolic, "Diastolic pressure")?,
        heart_rate: parse_number(&fields.heart_rate, "Heart rate")?,
        temperature: parse_number(&fields.temperature, "Temperature")?,
        exam_items: fields.exam_items.clone(),
        result: fields.result,
        abnormal_items,
        doctor_advice: none_if_empty(&fields.doctor_advice),
        next_exam_date,
        notes: none_if_empty(&fields.notes),
    })
}

#[component]
pub fn PhysicalExamForm(
    initial: Option<PhysicalExam>,
    on_submit: EventHandler<PhysicalExam>,
    on_cancel: EventHandler<()>,
) -> Element {
    let record_id = initial.as_ref().and_then(|r| r.id);
    let mut exam_date = use_signal(|| {
        initial
            .as_ref()
            .map(|r| r.exam_date.to_string())
            .unwrap_or_default()
    });
    let mut hospital =
        use_signal(|| initial.as_ref().map(|r| r.hospital.clone()).unwrap_or_default());
    let mut exam_type = use_signal(|| {
        initial
            .as_ref()
            .map(|r| r.exam_type.clone())
            .unwrap_or_else(|| "Annual checkup".to_string())
    });
    let mut height = use_signal(|| {
        initial.as_ref().map(|r| r.height.to_string()).unwrap_or_default()
    });
    let mut weight = use_signal(|| {
        initial.as_ref().map(|r| r.weight.to_string()).unwrap_or_default()
    });
    let mut systolic = use_signal(|| {
        initial
            .as_ref()
            .map(|r| r.systolic_pressure.to_string())
            .unwrap_or_default()
    });
    let mut diastolic = use_signal(|| {
        initial
            .as_ref()
            .map(|r| r.diastolic_pressure.to_string())
            .unwrap_or_default()
    });
    let mut heart_rate = use_signal(|| {
        initial
            .as_ref()
            .map(|r| r.heart_rate.to_string())
            .unwrap_or_default()
    });
    let mut temperature = use_signal(|| {
        initial
            .as_ref()
            .map(|r| r.temperature.to_string())
            .unwrap_or_default()
    });
    let exam_items =
        use_signal(|| initial.as_ref().map(|r| r.exam_items.clone()).unwrap_or_default());
    let mut result =
        use_signal(|| initial.as_ref().map(|r| r.result).unwrap_or_default());
    let mut abnormal_items =
        use_signal(|| initial.as_ref().map(|r| r.abnormal_items.clone()).unwrap_or_default());
    let mut doctor_advice = use_signal(|| {
        initial
            .as_ref()
            .and_then(|r| r.doctor_advice.clone())
            .unwrap_or_default()
    });
    let mut next_exam_date = use_signal(|| {
        initial
            .as_ref()
            .and_then(|r| r.next_exam_date)
            .map(|d| d.to_string())
            .unwrap_or_default()
    });
    let mut notes = use_signal(|| {
        initial
            .as_ref()
            .and_then(|r| r.notes.clone())
            .unwrap_or_default()
    });
    let mut error = use_signal(|| Option::<String>::None);
    let mut notices = use_notices();

    // drafts for the abnormal-item editor
    let mut item_name = use_signal(String::new);
    let mut item_value = use_signal(String::new);
    let mut item_reference = use_signal(String::new);

    let mut add_abnormal_item = move || {
        let name = item_name().trim().to_string();
        let value = item_value().trim().to_string();
        let reference = item_reference().trim().to_string();
        if name.is_empty() || value.is_empty() {
            return;
        }
        abnormal_items.write().push(AbnormalItem {
            name,
            value,
            reference,
        });
        item_name.set(String::new());
        item_value.set(String::new());
        item_reference.set(String::new());
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let fields = ExamFields {
            id: record_id,
            exam_date: exam_date(),
            hospital: hospital(),
            exam_type: exam_type(),
            height: height(),
            weight: weight(),
            systolic: systolic(),
            diastolic: diastolic(),
            heart_rate: heart_rate(),
            temperature: temperature(),
            exam_items: exam_items(),
            result: result(),
            abnormal_items: abnormal_items(),
            doctor_advice: doctor_advice(),
            next_exam_date: next_exam_date(),
            notes: notes(),
        };
        match validate(&fields) {
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

    let current_items: Vec<AbnormalItem> = abnormal_items();

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
                    label { "Exam date *" }
                    input {
                        r#type: "date",
                        value: exam_date(),
                        oninput: move |evt| exam_date.set(evt.value()),
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
                div {
                    class: "form-field",
                    label { "Exam type *" }
                    input {
                        r#type: "text",
                        value: exam_type(),
                        oninput: move |evt| exam_type.set(evt.value()),
                    }
                }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { "Height (cm) *" }
                    input {
                        r#type: "number",
                        step: "0.1",
                        value: height(),
                        oninput: move |evt| height.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Weight (kg) *" }
                    input {
                        r#type: "number",
                        step: "0.1",
                        value: weight(),
                        oninput: move |evt| weight.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Temperature (\u{00b0}C) *" }
                    input {
                        r#type: "number",
                        step: "0.1",
                        value: temperature(),
                        oninput: move |evt| temperature.set(evt.value()),
                    }
                }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { "Systolic (mmHg) *" }
                    input {
                        r#type: "number",
                        value: systolic(),
                        oninput: move |evt| systolic.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Diastolic (mmHg) *" }
                    input {
                        r#type: "number",
                        value: diastolic(),
                        oninput: move |evt| diastolic.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Heart rate (bpm) *" }
                    input {
                        r#type: "number",
                        value: heart_rate(),
                        oninput: move |evt| heart_rate.set(evt.value()),
                    }
                }
            }

            TagListEditor {
                label: "Exam items",
                placeholder: "Add an exam item and press Enter",
                tags: exam_items,
            }

            div {
                class: "form-field",
                label { "Overall result *" }
                select {
                    value: result_value(result()),
                    onchange: move |evt| {
                        result.set(if evt.value() == "abnormal" {
                            ExamResult::Abnormal
                        } else {
                            ExamResult::Normal
                        });
                    },
                    option { value: "normal", "Normal" }
                    option { value: "abnormal", "Abnormal" }
                }
            }

            if result() == ExamResult::Abnormal {
                div {
                    class: "abnormal-items",
                    label { "Abnormal findings" }
                    for (index, item) in current_items.into_iter().enumerate() {
                        div {
                            key: "{item.name}-{index}",
                            class: "abnormal-item",
                            span { class: "abnormal-item-name", "{item.name}" }
                            span { "{item.value}" }
                            span { class: "abnormal-item-reference", "ref: {item.reference}" }
                            button {
                                class: "tag-close",
                                r#type: "button",
                                onclick: move |_| {
                                    abnormal_items.write().remove(index);
                                },
                                "\u{00d7}"
                            }
                        }
                    }
                    div {
                        class: "form-row",
                        input {
                            r#type: "text",
                            placeholder: "Item",
                            value: item_name(),
                            oninput: move |evt| item_name.set(evt.value()),
                        }
                        input {
                            r#type: "text",
                            placeholder: "Measured value",
                            value: item_value(),
                            oninput: move |evt| item_value.set(evt.value()),
                        }
                        input {
                            r#type: "text",
                            placeholder: "Reference range",
                            value: item_reference(),
                            oninput: move |evt| item_reference.set(evt.value()),
                        }
                        button {
                            class: "secondary",
                            r#type: "button",
                            onclick: move |_| add_abnormal_item(),
                            "Add"
                        }
                    }
                }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { "Doctor's advice" }
                    textarea {
                        value: doctor_advice(),
                        oninput: move |evt| doctor_advice.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Next exam date" }
                    input {
                        r#type: "date",
                        value: next_exam_date(),
                        oninput: move |evt| next_exam_date.set(evt.value()),
                    }
                }
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

    fn filled_fields() -> ExamFields {
        ExamFields {
            id: None,
            exam_date: "2024-03-10".to_string(),
            hospital: "City Hospital".to_string(),
            exam_type: "Annual checkup".to_string(),
            height: "172.5".to_string(),
            weight: "70".to_string(),
            systolic: "120".to_string(),
            diastolic: "80".to_string(),
            heart_rate: "68".to_string(),
            temperature: "36.5".to_string(),
            exam_items: vec!["blood panel".to_string()],
            result: ExamResult::Normal,
            abnormal_items: Vec::new(),
            doctor_advice: String::new(),
            next_exam_date: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_required_fields() {
        let mut fields = filled_fields();
        fields.hospital = String::new();
        assert_eq!(validate(&fields).unwrap_err(), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_non_numeric_vitals_rejected() {
        let mut fields = filled_fields();
        fields.heart_rate = "fast".to_string();
        assert_eq!(validate(&fields).unwrap_err(), "Heart rate must be a number");
    }

    #[test]
    fn test_next_exam_date_before_exam_date_blocks() {
        let mut fields = filled_fields();
        fields.next_exam_date = "2024-01-01".to_string();
        assert_eq!(
            validate(&fields).unwrap_err(),
            "Next exam date cannot be earlier than the exam date"
        );
    }

    #[test]
    fn test_normal_result_drops_abnormal_items() {
        let mut fields = filled_fields();
        fields.abnormal_items = vec![AbnormalItem {
            name: "ALT".to_string(),
            value: "80".to_string(),
            reference: "7-40".to_string(),
        }];
        let payload = validate(&fields).unwrap();
        assert!(payload.abnormal_items.is_empty());
    }

    #[test]
    fn test_abnormal_result_keeps_items() {
        let mut fields = filled_fields();
        fields.result = ExamResult::Abnormal;
        fields.abnormal_items = vec![AbnormalItem {
            name: "ALT".to_string(),
            value: "80".to_string(),
            reference: "7-40".to_string(),
        }];
        let payload = validate(&fields).unwrap();
        assert_eq!(payload.result, ExamResult::Abnormal);
        assert_eq!(payload.abnormal_items.len(), 1);
        assert_eq!(payload.height, 172.5);
    }
}
