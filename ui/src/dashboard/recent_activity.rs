use api::{ActivityKind, RecentActivity};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPills, FaStethoscope, FaSuitcaseMedical, FaSyringe};
use dioxus_free_icons::Icon;

fn kind_label(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::Medical => "Medical visit",
        ActivityKind::Medication => "Medication",
        ActivityKind::Vaccination => "Vaccination",
        ActivityKind::Physical => "Physical exam",
    }
}

/// The latest record activity, newest first as served by the backend.
#[component]
pub fn RecentActivityList(activities: Vec<RecentActivity>) -> Element {
    rsx! {
        div {
            class: "recent-activity",
            h3 { "Recent activity" }
            if activities.is_empty() {
                p { class: "muted", "Nothing recorded yet." }
            } else {
                ul {
                    for activity in activities {
                        li {
                            key: "{activity.id}",
                            class: "activity-entry",
                            span {
                                class: "activity-icon",
                                {match activity.kind {
                                    ActivityKind::Medical => rsx! { Icon { icon: FaSuitcaseMedical, width: 16, height: 16 } },
                                    ActivityKind::Medication => rsx! { Icon { icon: FaPills, width: 16, height: 16 } },
                                    ActivityKind::Vaccination => rsx! { Icon { icon: FaSyringe, width: 16, height: 16 } },
                                    ActivityKind::Physical => rsx! { Icon { icon: FaStethoscope, width: 16, height: 16 } },
                                }}
                            }
                            div {
                                class: "activity-body",
                                span { class: "activity-title",
                                    if activity.title.is_empty() {
                                        {kind_label(activity.kind)}
                                    } else {
                                        "{activity.title}"
                                    }
                                }
                                span { class: "activity-description", "{activity.description}" }
                            }
                            span { class: "activity-date", "{activity.date}" }
                        }
                    }
                }
            }
        }
    }
}
