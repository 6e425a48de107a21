//! Vaccination records: list, create, edit, delete.

use api::VaccinationRecord;
use dioxus::prelude::*;
use ui::{notify, use_notices, use_records, NoticeLevel, VaccinationRecordForm};

#[component]
pub fn VaccinationRecords() -> Element {
    let records = use_records::<VaccinationRecord>();
    let state = records.state();
    let mut show_form = use_signal(|| false);
    let mut editing = use_signal(|| Option::<VaccinationRecord>::None);
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
        move |payload: VaccinationRecord| {
            let records = records.clone();
            spawn(async move {
                let mut notices = notices;
                let outcome = match payload.id {
                    Some(id) => records.update(id, payload).await.map(|_| ()),
                    None => records.create(payload).await.map(|_| ()),
                };
                if outcome.is_ok() {
                    notify(&mut notices, NoticeLevel::Success, "Vaccination record saved");
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
                    notify(&mut notices, NoticeLevel::Success, "Vaccination record deleted");
                }
                confirm_delete.set(None);
            });
        }
    };

    let current = state();
    let rows: Vec<VaccinationRecord> = current.records.items().to_vec();

    rsx! {
        div {
            class: "records-view",
            div {
                class: "records-header",
                h2 { "Vaccinations" }
                button {
                    class: "primary",
                    onclick: move |_| {
                        editing.set(None);
                        show_form.set(true);
                    },
                    "Add vaccination"
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
                    VaccinationRecordForm {
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
                p { class: "muted", "No vaccinations recorded yet." }
            } else {
                table {
                    class: "records-table",
                    thead {
                        tr {
                            th { "Vaccine" }
                            th { "Date" }
                            th { "Site" }
                            th { "Manufacturer" }
                            th { "Next dose" }
                            th { "Reactions" }
                            th { "" }
                        }
                    }
                    tbody {
                        for record in rows {
                            tr {
                                key: "{record.id.unwrap_or_default()}",
                                td { "{record.vaccine_name}" }
                                td { "{record.vaccination_date}" }
                                td { "{record.site}" }
                                td {
                                    {record.manufacturer.clone().unwrap_or_else(|| "\u{2014}".to_string())}
                                }
                                td {
                                    {record.next_dose_date.map(|d| d.to_string()).unwrap_or_else(|| "\u{2014}".to_string())}
                                }
                                td { {record.reactions.join(", ")} }
                                td {
                                    class: "row-actions",
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
