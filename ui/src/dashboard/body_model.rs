//! Body model with organ markers.
//!
//! A simple SVG silhouette with one marker per abnormal organ, colored by
//! severity. Clicking a marker (or a list entry for organs without a mapped
//! position) opens a detail panel with the description and links to the
//! related records.

use api::{AbnormalOrgan, OrganStatus, RelatedRecord};
use dioxus::prelude::*;

const VIEW_W: f32 = 300.0;
const VIEW_H: f32 = 420.0;

/// Marker coordinates on the silhouette for known organ names.
pub(crate) fn organ_position(name: &str) -> Option<(f32, f32)> {
    let name = name.to_lowercase();
    let pos = if name.contains("brain") {
        (150.0, 52.0)
    } else if name.contains("thyroid") || name.contains("throat") {
        (150.0, 96.0)
    } else if name.contains("heart") {
        (162.0, 158.0)
    } else if name.contains("lung") {
        (132.0, 150.0)
    } else if name.contains("liver") {
        (134.0, 196.0)
    } else if name.contains("stomach") {
        (164.0, 200.0)
    } else if name.contains("pancreas") {
        (152.0, 214.0)
    } else if name.contains("kidney") {
        (170.0, 224.0)
    } else if name.contains("intestine") || name.contains("bowel") {
        (150.0, 248.0)
    } else {
        return None;
    };
    Some(pos)
}

pub(crate) fn status_color(status: OrganStatus) -> &'static str {
    match status {
        OrganStatus::Mild => "#f6c344",
        OrganStatus::Moderate => "#f08c3a",
        OrganStatus::Severe => "#e05252",
    }
}

fn status_label(status: OrganStatus) -> &'static str {
    match status {
        OrganStatus::Mild => "mild",
        OrganStatus::Moderate => "moderate",
        OrganStatus::Severe => "severe",
    }
}

#[component]
pub fn BodyModel(
    organs: Vec<AbnormalOrgan>,
    on_open_record: EventHandler<RelatedRecord>,
) -> Element {
    let mut selected = use_signal(|| Option::<u64>::None);

    let detail = selected().and_then(|id| organs.iter().find(|o| o.id == id).cloned());
    let markers: Vec<(AbnormalOrgan, (f32, f32))> = organs
        .iter()
        .filter_map(|o| organ_position(&o.name).map(|pos| (o.clone(), pos)))
        .collect();

    rsx! {
        div {
            class: "body-model-container",
            h3 { "Body overview" }
            div {
                class: "body-model-layout",
                svg {
                    class: "body-model",
                    view_box: "0 0 {VIEW_W} {VIEW_H}",
                    preserve_aspect_ratio: "xMidYMid meet",

                    // silhouette
                    circle { cx: "150", cy: "52", r: "30", class: "silhouette" }
                    rect {
                        x: "112", y: "92", width: "76", height: "170",
                        rx: "26", class: "silhouette",
                    }
                    rect {
                        x: "84", y: "102", width: "22", height: "120",
                        rx: "11", class: "silhouette",
                    }
                    rect {
                        x: "194", y: "102", width: "22", height: "120",
                        rx: "11", class: "silhouette",
                    }
                    rect {
                        x: "118", y: "262", width: "26", height: "130",
                        rx: "13", class: "silhouette",
                    }
                    rect {
                        x: "156", y: "262", width: "26", height: "130",
                        rx: "13", class: "silhouette",
                    }

                    for (organ, (x, y)) in markers {
                        circle {
                            key: "{organ.id}",
                            cx: "{x}",
                            cy: "{y}",
                            r: "9",
                            fill: status_color(organ.status),
                            class: "organ-marker",
                            onclick: {
                                let id = organ.id;
                                move |_| selected.set(Some(id))
                            },
                            title { "{organ.name}" }
                        }
                    }
                }

                div {
                    class: "organ-panel",
                    if organs.is_empty() {
                        p { class: "muted", "No abnormal findings. Keep it up!" }
                    } else if let Some(organ) = detail {
                        h4 { "{organ.name}" }
                        span {
                            class: "organ-status",
                            style: "color: {status_color(organ.status)};",
                            "{status_label(organ.status)}"
                        }
                        p { "{organ.description}" }
                        if !organ.related_records.is_empty() {
                            h5 { "Related records" }
                            ul {
                                for record in organ.related_records.iter().cloned() {
                                    li {
                                        key: "{record.id}",
                                        button {
                                            class: "link-button",
                                            onclick: {
                                                let record = record.clone();
                                                move |_| on_open_record.call(record.clone())
                                            },
                                            "{record.date}"
                                        }
                                    }
                                }
                            }
                        }
                    } else {
                        p { class: "muted", "Select a marker to see details." }
                        ul {
                            class: "organ-list",
                            for organ in organs.iter() {
                                li {
                                    key: "{organ.id}",
                                    button {
                                        class: "link-button",
                                        onclick: {
                                            let id = organ.id;
                                            move |_| selected.set(Some(id))
                                        },
                                        span {
                                            class: "legend-swatch",
                                            style: "background: {status_color(organ.status)};",
                                        }
                                        "{organ.name}"
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_organs_have_positions() {
        assert!(organ_position("Heart").is_some());
        assert!(organ_position("left kidney").is_some());
        assert!(organ_position("Lungs").is_some());
    }

    #[test]
    fn test_unknown_organ_has_no_marker() {
        assert!(organ_position("spleen").is_none());
    }

    #[test]
    fn test_severity_colors_are_distinct() {
        let colors = [
            status_color(OrganStatus::Mild),
            status_color(OrganStatus::Moderate),
            status_color(OrganStatus::Severe),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }
}
