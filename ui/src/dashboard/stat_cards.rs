use api::HealthStatistics;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPills, FaStethoscope, FaSuitcaseMedical, FaSyringe};
use dioxus_free_icons::Icon;

/// Per-record-type totals as a row of cards.
#[component]
pub fn StatCards(stats: HealthStatistics) -> Element {
    rsx! {
        div {
            class: "stat-cards",
            div {
                class: "stat-card",
                Icon { icon: FaSuitcaseMedical, width: 22, height: 22 }
                span { class: "stat-value", "{stats.medical_records.total}" }
                span { class: "stat-label", "Medical visits" }
            }
            div {
                class: "stat-card",
                Icon { icon: FaPills, width: 22, height: 22 }
                span { class: "stat-value", "{stats.medication_records.total}" }
                span { class: "stat-label", "Medications" }
            }
            div {
                class: "stat-card",
                Icon { icon: FaSyringe, width: 22, height: 22 }
                span { class: "stat-value", "{stats.vaccination_records.total}" }
                span { class: "stat-label", "Vaccinations" }
            }
            div {
                class: "stat-card",
                Icon { icon: FaStethoscope, width: 22, height: 22 }
                span { class: "stat-value", "{stats.physical_exams.total}" }
                span { class: "stat-label", "Physical exams" }
            }
        }
    }
}
