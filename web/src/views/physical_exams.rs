//! Physical exams: list, create, edit, delete, and the per-exam report page
//! with multipart upload.

use api::{ExamReport, ExamResult, PhysicalExam};
use dioxus::prelude::*;
use ui::{
    note_session_expiry, notify, use_api, use_auth, use_notices, use_records, NoticeLevel,
    PhysicalExamForm,
};

use crate::Route;

#[component]
pub fn PhysicalExams() -> Element {
    let records = use_records::<PhysicalExam>();
    let state = records.state();
    let mut show_form = use_signal(|| false);
    let mut editing = use_signal(|| Option::<PhysicalExam>::None);
    let mut confirm_delete = use_signal(|| Option::<u64>::None);
    let notices = use_notices();

    {
        let records = records.clone();
        let _ = use_resource(move || {
            let records = records.clone();
            async move {
                let _ = records.load().await;
            }
        });
    }

    let handle_submit = {
        let records = records.clone();
        move |payload: PhysicalExam| {
            let records = records.clone();
            spawn(async move {
                let mut notices = notices;
                let outcome = match payload.id {
                    Some(id) => records.update(id, payload).await.map(|_| ()),
                    None => records.create(payload).await.map(|_| ()),
                };
                if outcome.is_ok() {
                    notify(&mut notices, NoticeLevel::Success, "Physical exam saved");
                    show_form.set(false);
                    editing.set(None);
                }
            });
        }
    };

    let handle_delete = {
        let records = records.clone();
        move |id: u64| {
            let records = records.clone();
            spawn(async move {
                let mut notices = notices;
                if records.remove(id).await.is_ok() {
                    notify(&mut notices, NoticeLevel::Success, "Physical exam deleted");
                }
                confirm_delete.set(None);
            });
        }
    };

    let current = state();
    let rows: Vec<PhysicalExam> = current.records.items().to_vec();

    rsx! {
        div {
            class: "records-view",
            div {
                class: "records-header",
                h2 { "Physical exams" }
                button {
                    class: "primary",
                    onclick: move |_| {
                        editing.set(None);
                        show_form.set(true);
                    },
                    "Add exam"
                }
            }

            if let Some(err) = current.error.clone() {
                div { class: "form-error", "{err}" }
            }
            if current.loading {
                p { class: "muted", "Loading\u{2026}" }
            }

            if show_form() {
                div {
                    class: "form-panel",
                    PhysicalExamForm {
                        initial: editing(),
                        on_submit: handle_submit,
                        on_cancel: move |_| {
                            show_form.set(false);
                            editing.set(None);
                        },
                    }
                }
            }

            if rows.is_empty() && !current.loading {
                p { class: "muted", "No exams recorded yet." }
            } else {
                table {
                    class: "records-table",
                    thead {
                        tr {
                            th { "Date" }
                            th { "Hospital" }
                            th { "Type" }
                            th { "Blood pressure" }
                            th { "Result" }
                            th { "" }
                        }
                    }
                    tbody {
                        for record in rows {
                            tr {
                                key: "{record.id.unwrap_or_default()}",
                                td { "{record.exam_date}" }
                                td { "{record.hospital}" }
                                td { "{record.exam_type}" }
                                td { "{record.systolic_pressure}/{record.diastolic_pressure}" }
                                td {
                                    if record.result == ExamResult::Abnormal {
                                        span { class: "result result--abnormal", "abnormal" }
                                    } else {
                                        span { class: "result result--normal", "normal" }
                                    }
                                }
                                td {
                                    class: "row-actions",
                                    if let Some(id) = record.id {
                                        Link {
                                            class: "secondary link-as-button",
                                            to: Route::PhysicalExamReport { id },
                                            "Report"
                                        }
                                    }
                                    button {
                                        class: "secondary",
                                        onclick: {
                                            let record = record.clone();
                                            move |_| {
                                                editing.set(Some(record.clone()));
                                                show_form.set(true);
                                            }
                                        },
                                        "Edit"
                                    }
                                    if confirm_delete() == record.id {
                                        button {
                                            class: "danger",
                                            onclick: {
                                                let mut handle_delete = handle_delete.clone();
                                                let id = record.id;
                                                move |_| {
                                                    if let Some(id) = id {
                                                        handle_delete(id);
                                                    }
                                                }
                                            },
                                            "Confirm"
                                        }
                                        button {
                                            class: "secondary",
                                            onclick: move |_| confirm_delete.set(None),
                                            "Keep"
                                        }
                                    } else {
                                        button {
                                            class: "danger",
                                            onclick: {
                                                let id = record.id;
                                                move |_| confirm_delete.set(id)
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Detail page for one exam: measurements, abnormal findings, and the
/// uploaded report document.
#[component]
pub fn PhysicalExamReport(id: u64) -> Element {
    let api = use_api();
    let auth = use_auth();
    let notices = use_notices();
    let mut uploading = use_signal(|| false);
    let mut report = use_signal(|| Option::<ExamReport>::None);

    let exam = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let result = api.get_physical_exam(id).await;
                if let Err(err) = &result {
                    note_session_expiry(auth, err);
                }
                result
            }
        }
    });

    // the report may not exist yet; a failed fetch just means "none"
    {
        let api = api.clone();
        let _ = use_resource(move || {
            let api = api.clone();
            async move {
                if let Ok(existing) = api.get_exam_report(id).await {
                    report.set(Some(existing));
                }
            }
        });
    }

    let handle_upload = move |evt: FormEvent| {
        let api = api.clone();
        spawn(async move {
            let mut notices = notices;
            let Some(engine) = evt.files() else {
                return;
            };
            let Some(name) = engine.files().into_iter().next() else {
                return;
            };
            let Some(bytes) = engine.read_file(&name).await else {
                notify(&mut notices, NoticeLevel::Error, "Could not read the selected file");
                return;
            };
            uploading.set(true);
            match api.upload_exam_report(id, &name, bytes).await {
                Ok(uploaded) => {
                    report.set(Some(uploaded));
                    notify(&mut notices, NoticeLevel::Success, "Report uploaded");
                }
                Err(err) => {
                    note_session_expiry(auth, &err);
                    notify(
                        &mut notices,
                        NoticeLevel::Error,
                        &err.user_message("Failed to upload the report"),
                    );
                }
            }
            uploading.set(false);
        });
    };

    rsx! {
        div {
            class: "records-view",
            div {
                class: "records-header",
                h2 { "Exam report" }
                Link {
                    class: "secondary link-as-button",
                    to: Route::PhysicalExams {},
                    "Back to exams"
                }
            }

            {match &*exam.read() {
                Some(Ok(exam)) => rsx! {
                    div {
                        class: "exam-detail",
                        p { "{exam.exam_type} at {exam.hospital} on {exam.exam_date}" }
                        ul {
                            class: "exam-vitals",
                            li { "Height: {exam.height} cm" }
                            li { "Weight: {exam.weight} kg" }
                            li { "Blood pressure: {exam.systolic_pressure}/{exam.diastolic_pressure} mmHg" }
                            li { "Heart rate: {exam.heart_rate} bpm" }
                            li { "Temperature: {exam.temperature} \u{00b0}C" }
                        }
                        if !exam.abnormal_items.is_empty() {
                            h3 { "Abnormal findings" }
                            ul {
                                for item in exam.abnormal_items.iter() {
                                    li {
                                        key: "{item.name}",
                                        "{item.name}: {item.value} (ref: {item.reference})"
                                    }
                                }
                            }
                        }
                        if let Some(advice) = exam.doctor_advice.clone() {
                            p { class: "muted", "Doctor's advice: {advice}" }
                        }
                    }
                },
                Some(Err(_)) => rsx! { p { class: "muted", "This exam could not be loaded." } },
                None => rsx! { p { class: "muted", "Loading exam\u{2026}" } },
            }}

            div {
                class: "report-upload",
                h3 { "Report document" }
                if let Some(existing) = report() {
                    p {
                        "Uploaded on {existing.upload_date}: "
                        a { href: "{existing.report_file}", target: "_blank", "open report" }
                    }
                } else {
                    p { class: "muted", "No report uploaded yet." }
                }
                input {
                    r#type: "file",
                    accept: ".pdf,.jpg,.jpeg,.png",
                    disabled: uploading(),
                    onchange: handle_upload,
                }
                if uploading() {
                    p { class: "muted", "Uploading\u{2026}" }
                }
            }
        }
    }
}
