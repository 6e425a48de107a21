//! Dashboard overview endpoints.
//!
//! Read-only aggregates served under `/overview/`: per-record-type counters,
//! measurement trends, the recent-activity feed, and the abnormal-organ list
//! behind the body-model widget.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use store::KeyValueStorage;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::HttpTransport;

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct RecordCount {
    pub total: u32,
}

/// Per-record-type totals for the stat cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct HealthStatistics {
    pub medical_records: RecordCount,
    pub medication_records: RecordCount,
    pub vaccination_records: RecordCount,
    pub physical_exams: RecordCount,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BloodPressureSeries {
    pub systolic: Vec<f32>,
    pub diastolic: Vec<f32>,
}

/// Measurement series for the trend chart. All vectors are indexed by
/// `dates`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthTrends {
    pub dates: Vec<NaiveDate>,
    pub blood_pressure: BloodPressureSeries,
    #[serde(default)]
    pub blood_sugar: Vec<f32>,
    #[serde(default)]
    pub weight: Vec<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Medical,
    Medication,
    Vaccination,
    Physical,
}

/// One entry in the recent-activity feed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecentActivity {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default)]
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganStatus {
    Mild,
    Moderate,
    Severe,
}

/// A record linked to an abnormal finding.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RelatedRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub date: NaiveDate,
}

/// An organ flagged by the backend from recent exam results.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AbnormalOrgan {
    pub id: u64,
    pub name: String,
    pub status: OrganStatus,
    pub description: String,
    #[serde(default, rename = "relatedRecords")]
    pub related_records: Vec<RelatedRecord>,
}

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    pub async fn get_overview_statistics(&self) -> Result<HealthStatistics, ApiError> {
        self.get_json("/overview/statistics/").await
    }

    pub async fn get_health_trends(&self) -> Result<HealthTrends, ApiError> {
        self.get_json("/overview/health-trends/").await
    }

    pub async fn get_recent_activities(&self) -> Result<Vec<RecentActivity>, ApiError> {
        self.get_json("/overview/recent-activities/").await
    }

    pub async fn get_abnormal_organs(&self) -> Result<Vec<AbnormalOrgan>, ApiError> {
        self.get_json("/overview/abnormal-organs/").await
    }

    pub async fn get_organ_details(&self, organ_id: u64) -> Result<AbnormalOrgan, ApiError> {
        self.get_json(&format!("/overview/organs/{organ_id}/")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client_with, response};
    use serde_json::json;

    #[tokio::test]
    async fn test_trends_contract() {
        let (client, _transport, _storage) = client_with(|_req| {
            Ok(response(
                200,
                json!({
                    "dates": ["2024-03-01", "2024-03-02", "2024-03-03"],
                    "bloodPressure": { "systolic": [120, 118, 122], "diastolic": [80, 78, 82] },
                    "bloodSugar": [5.6, 5.8, 5.7],
                    "weight": [70, 70.5, 70.2]
                }),
            ))
        });
        client.session().set_access_token("t1");

        let trends = client.get_health_trends().await.unwrap();

        assert_eq!(trends.dates.len(), 3);
        assert_eq!(trends.blood_pressure.systolic[0], 120.0);
        assert_eq!(trends.blood_sugar[1], 5.8);
    }

    #[tokio::test]
    async fn test_abnormal_organs_contract() {
        let (client, _transport, _storage) = client_with(|_req| {
            Ok(response(
                200,
                json!([{
                    "id": 2,
                    "name": "liver",
                    "status": "severe",
                    "description": "Elevated liver enzymes",
                    "relatedRecords": [{ "id": 7, "type": "medical", "date": "2024-03-02" }]
                }]),
            ))
        });
        client.session().set_access_token("t1");

        let organs = client.get_abnormal_organs().await.unwrap();

        assert_eq!(organs.len(), 1);
        assert_eq!(organs[0].status, OrganStatus::Severe);
        assert_eq!(organs[0].related_records[0].kind, ActivityKind::Medical);
    }
}
