//! Home dashboard: overview statistics, trends, body model, recent activity.

use api::ActivityKind;
use dioxus::prelude::*;
use ui::{use_api, use_auth, BodyModel, RecentActivityList, StatCards, TrendChart};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let api = use_api();
    let auth = use_auth();
    let nav = use_navigator();

    let stats = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let result = api.get_overview_statistics().await;
                if let Err(err) = &result {
                    ui::note_session_expiry(auth, err);
                }
                result
            }
        }
    });
    let trends = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let result = api.get_health_trends().await;
                if let Err(err) = &result {
                    ui::note_session_expiry(auth, err);
                }
                result
            }
        }
    });
    let activities = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let result = api.get_recent_activities().await;
                if let Err(err) = &result {
                    ui::note_session_expiry(auth, err);
                }
                result
            }
        }
    });
    let organs = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let result = api.get_abnormal_organs().await;
                if let Err(err) = &result {
                    ui::note_session_expiry(auth, err);
                }
                result
            }
        }
    });

    let username = auth()
        .user
        .as_ref()
        .map(|u| u.username.clone())
        .unwrap_or_default();

    let open_record = move |record: api::RelatedRecord| {
        match record.kind {
            ActivityKind::Medical => nav.push(Route::MedicalRecords {}),
            ActivityKind::Medication => nav.push(Route::MedicationRecords {}),
            ActivityKind::Vaccination => nav.push(Route::VaccinationRecords {}),
            ActivityKind::Physical => nav.push(Route::PhysicalExams {}),
        };
    };

    rsx! {
        div {
            class: "home-view",
            h2 { "Hello, {username}" }

            {match &*stats.read() {
                Some(Ok(s)) => rsx! { StatCards { stats: *s } },
                Some(Err(_)) => rsx! { p { class: "muted", "Overview statistics are unavailable." } },
                None => rsx! { p { class: "muted", "Loading overview\u{2026}" } },
            }}

            div {
                class: "home-grid",
                div {
                    class: "home-main-column",
                    {match &*trends.read() {
                        Some(Ok(t)) => rsx! { TrendChart { trends: t.clone() } },
                        Some(Err(_)) => rsx! { p { class: "muted", "Trend data is unavailable." } },
                        None => rsx! { p { class: "muted", "Loading trends\u{2026}" } },
                    }}
                    {match &*activities.read() {
                        Some(Ok(list)) => rsx! { RecentActivityList { activities: list.clone() } },
                        Some(Err(_)) => rsx! { p { class: "muted", "Recent activity is unavailable." } },
                        None => rsx! { p { class: "muted", "Loading activity\u{2026}" } },
                    }}
                }
                div {
                    class: "home-side-column",
                    {match &*organs.read() {
                        Some(Ok(list)) => rsx! {
                            BodyModel {
                                organs: list.clone(),
                                on_open_record: open_record,
                            }
                        },
                        Some(Err(_)) => rsx! { p { class: "muted", "Body overview is unavailable." } },
                        None => rsx! { p { class: "muted", "Loading body overview\u{2026}" } },
                    }}
                }
            }
        }
    }
}
