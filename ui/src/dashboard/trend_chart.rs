//! SVG trend chart for the measurement series.
//!
//! Each series is normalised to its own min/max so unrelated units (mmHg,
//! kg, mmol/L) share one canvas. Geometry is computed by pure helpers.

use api::HealthTrends;
use dioxus::prelude::*;

const WIDTH: f32 = 640.0;
const HEIGHT: f32 = 240.0;
const PADDING: f32 = 16.0;

struct Series<'a> {
    label: &'static str,
    color: &'static str,
    values: &'a [f32],
}

/// Map a series onto `points` for an SVG polyline, normalised to the
/// series' own range. A flat series draws as a horizontal midline.
pub(crate) fn polyline_points(values: &[f32], width: f32, height: f32, padding: f32) -> String {
    if values.len() < 2 {
        return String::new();
    }
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let span = max - min;
    let inner_w = width - padding * 2.0;
    let inner_h = height - padding * 2.0;
    let step = inner_w / (values.len() - 1) as f32;

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = padding + step * i as f32;
            let norm = if span == 0.0 { 0.5 } else { (v - min) / span };
            let y = padding + inner_h * (1.0 - norm);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn TrendChart(trends: HealthTrends) -> Element {
    let series = [
        Series {
            label: "Weight",
            color: "#3a7bd5",
            values: &trends.weight,
        },
        Series {
            label: "Systolic",
            color: "#e05252",
            values: &trends.blood_pressure.systolic,
        },
        Series {
            label: "Diastolic",
            color: "#f08c3a",
            values: &trends.blood_pressure.diastolic,
        },
        Series {
            label: "Blood sugar",
            color: "#3aa675",
            values: &trends.blood_sugar,
        },
    ];

    let first_date = trends.dates.first().map(|d| d.to_string()).unwrap_or_default();
    let last_date = trends.dates.last().map(|d| d.to_string()).unwrap_or_default();

    rsx! {
        div {
            class: "trend-chart",
            h3 { "Health trends" }
            if trends.dates.len() < 2 {
                p { class: "muted", "Not enough data to draw trends yet." }
            } else {
                svg {
                    view_box: "0 0 {WIDTH} {HEIGHT}",
                    preserve_aspect_ratio: "xMidYMid meet",
                    rect {
                        x: "0",
                        y: "0",
                        width: "{WIDTH}",
                        height: "{HEIGHT}",
                        fill: "none",
                    }
                    for s in series.iter().filter(|s| s.values.len() >= 2) {
                        polyline {
                            points: polyline_points(s.values, WIDTH, HEIGHT, PADDING),
                            fill: "none",
                            stroke: s.color,
                            stroke_width: "2",
                        }
                    }
                }
                div {
                    class: "trend-axis",
                    span { "{first_date}" }
                    span { "{last_date}" }
                }
                div {
                    class: "trend-legend",
                    for s in series.iter() {
                        span {
                            class: "legend-item",
                            span {
                                class: "legend-swatch",
                                style: "background: {s.color};",
                            }
                            "{s.label}"
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
    fn test_too_few_points_yields_empty() {
        assert_eq!(polyline_points(&[70.0], 640.0, 240.0, 16.0), "");
        assert_eq!(polyline_points(&[], 640.0, 240.0, 16.0), "");
    }

    #[test]
    fn test_endpoints_span_the_canvas() {
        let points = polyline_points(&[0.0, 10.0], 640.0, 240.0, 16.0);
        let coords: Vec<&str> = points.split(' ').collect();
        assert_eq!(coords.len(), 2);
        // min lands at the bottom of the inner area, max at the top
        assert_eq!(coords[0], "16.0,224.0");
        assert_eq!(coords[1], "624.0,16.0");
    }

    #[test]
    fn test_flat_series_draws_midline() {
        let points = polyline_points(&[5.0, 5.0, 5.0], 640.0, 240.0, 16.0);
        for coord in points.split(' ') {
            let y: f32 = coord.split(',').nth(1).unwrap().parse().unwrap();
            assert_eq!(y, 120.0);
        }
    }
}
