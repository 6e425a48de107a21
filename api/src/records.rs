//! Record contract types and their CRUD endpoints.
//!
//! Four independent record collections live under `/records/`:
//! `medical`, `medication`, `vaccination`, `physical`. Each supports
//! list/create/update/delete by id, plus a multipart upload endpoint for its
//! attachment kind (visit documents, medication photos, vaccination
//! certificates, exam reports).

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use store::{KeyValueStorage, Keyed};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{FormField, HttpTransport};

/// A doctor's visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub visit_date: NaiveDate,
    pub hospital: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    /// Why the visit happened (chief complaint).
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub prescriptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A course of medication.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub medication_name: String,
    pub dosage: String,
    /// Free-text schedule, e.g. "three times daily".
    pub frequency: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub side_effects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A vaccine dose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VaccinationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub vaccine_name: String,
    pub vaccination_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    /// Injection site, e.g. "left arm".
    pub site: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_dose_date: Option<NaiveDate>,
    #[serde(default)]
    pub reactions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamResult {
    #[default]
    Normal,
    Abnormal,
}

/// One out-of-range measurement in an exam report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbnormalItem {
    pub name: String,
    pub value: String,
    /// The lab's reference range for this item.
    pub reference: String,
}

/// A physical examination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicalExam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub exam_date: NaiveDate,
    pub hospital: String,
    pub exam_type: String,
    pub height: f32,
    pub weight: f32,
    pub systolic_pressure: u16,
    pub diastolic_pressure: u16,
    pub heart_rate: u16,
    pub temperature: f32,
    #[serde(default)]
    pub exam_items: Vec<String>,
    pub result: ExamResult,
    #[serde(default)]
    pub abnormal_items: Vec<AbnormalItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_advice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_exam_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Keyed for MedicalRecord {
    fn key(&self) -> Option<u64> {
        self.id
    }
}

impl Keyed for MedicationRecord {
    fn key(&self) -> Option<u64> {
        self.id
    }
}

impl Keyed for VaccinationRecord {
    fn key(&self) -> Option<u64> {
        self.id
    }
}

impl Keyed for PhysicalExam {
    fn key(&self) -> Option<u64> {
        self.id
    }
}

/// A file attached to a medical record.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MedicalAttachment {
    pub id: u64,
    pub medical_record_id: u64,
    pub file_path: String,
    #[serde(default)]
    pub file_type: Option<String>,
    pub upload_date: String,
}

/// A photo attached to a medication record.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MedicationImage {
    pub id: u64,
    pub medication_record_id: u64,
    pub image_path: String,
    pub upload_date: String,
}

/// A certificate attached to a vaccination record.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VaccinationCertificate {
    pub id: u64,
    pub vaccination_record_id: u64,
    pub certificate_path: String,
    pub upload_date: String,
}

/// An uploaded exam report document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExamReport {
    pub id: u64,
    pub physical_exam_id: u64,
    pub report_file: String,
    pub upload_date: String,
}

/// List endpoints answer either a bare array or a DRF pagination envelope;
/// both normalize to a plain `Vec`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListReply<T> {
    Plain(Vec<T>),
    Paginated { results: Vec<T> },
}

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    async fn get_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>, ApiError> {
        let reply: ListReply<R> = self.get_json(path).await?;
        Ok(match reply {
            ListReply::Plain(items) => items,
            ListReply::Paginated { results } => results,
        })
    }

    // Medical visits

    pub async fn list_medical_records(&self) -> Result<Vec<MedicalRecord>, ApiError> {
        self.get_list("/records/medical/").await
    }

    pub async fn get_medical_record(&self, id: u64) -> Result<MedicalRecord, ApiError> {
        self.get_json(&format!("/records/medical/{id}/")).await
    }

    pub async fn create_medical_record(
        &self,
        draft: &MedicalRecord,
    ) -> Result<MedicalRecord, ApiError> {
        self.post_json("/records/medical/", draft).await
    }

    pub async fn update_medical_record(
        &self,
        id: u64,
        record: &MedicalRecord,
    ) -> Result<MedicalRecord, ApiError> {
        self.put_json(&format!("/records/medical/{id}/"), record).await
    }

    pub async fn delete_medical_record(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/records/medical/{id}/")).await
    }

    pub async fn upload_medical_attachment(
        &self,
        record_id: u64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<MedicalAttachment, ApiError> {
        self.post_multipart(
            "/records/attachments/",
            vec![
                FormField::File {
                    name: "file".to_string(),
                    filename: filename.to_string(),
                    bytes,
                },
                FormField::Text {
                    name: "medical_record_id".to_string(),
                    value: record_id.to_string(),
                },
            ],
        )
        .await
    }

    // Medications

    pub async fn list_medication_records(&self) -> Result<Vec<MedicationRecord>, ApiError> {
        self.get_list("/records/medication/").await
    }

    pub async fn get_medication_record(&self, id: u64) -> Result<MedicationRecord, ApiError> {
        self.get_json(&format!("/records/medication/{id}/")).await
    }

    pub async fn create_medication_record(
        &self,
        draft: &MedicationRecord,
    ) -> Result<MedicationRecord, ApiError> {
        self.post_json("/records/medication/", draft).await
    }

    pub async fn update_medication_record(
        &self,
        id: u64,
        record: &MedicationRecord,
    ) -> Result<MedicationRecord, ApiError> {
        self.put_json(&format!("/records/medication/{id}/"), record)
            .await
    }

    pub async fn delete_medication_record(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/records/medication/{id}/")).await
    }

    pub async fn upload_medication_image(
        &self,
        record_id: u64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<MedicationImage, ApiError> {
        self.post_multipart(
            "/records/medication-images/",
            vec![
                FormField::File {
                    name: "image".to_string(),
                    filename: filename.to_string(),
                    bytes,
                },
                FormField::Text {
                    name: "medication_record_id".to_string(),
                    value: record_id.to_string(),
                },
            ],
        )
        .await
    }

    // Vaccinations

    pub async fn list_vaccination_records(&self) -> Result<Vec<VaccinationRecord>, ApiError> {
        self.get_list("/records/vaccination/").await
    }

    pub async fn get_vaccination_record(&self, id: u64) -> Result<VaccinationRecord, ApiError> {
        self.get_json(&format!("/records/vaccination/{id}/")).await
    }

    pub async fn create_vaccination_record(
        &self,
        draft: &VaccinationRecord,
    ) -> Result<VaccinationRecord, ApiError> {
        self.post_json("/records/vaccination/", draft).await
    }

    pub async fn update_vaccination_record(
        &self,
        id: u64,
        record: &VaccinationRecord,
    ) -> Result<VaccinationRecord, ApiError> {
        self.put_json(&format!("/records/vaccination/{id}/"), record)
            .await
    }

    pub async fn delete_vaccination_record(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/records/vaccination/{id}/")).await
    }

    pub async fn upload_vaccination_certificate(
        &self,
        record_id: u64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<VaccinationCertificate, ApiError> {
        self.post_multipart(
            "/records/vaccination-certificates/",
            vec![
                FormField::File {
                    name: "certificate".to_string(),
                    filename: filename.to_string(),
                    bytes,
                },
                FormField::Text {
                    name: "vaccination_record_id".to_string(),
                    value: record_id.to_string(),
                },
            ],
        )
        .await
    }

    // Physical exams

    pub async fn list_physical_exams(&self) -> Result<Vec<PhysicalExam>, ApiError> {
        self.get_list("/records/physical/").await
    }

    pub async fn get_physical_exam(&self, id: u64) -> Result<PhysicalExam, ApiError> {
        self.get_json(&format!("/records/physical/{id}/")).await
    }

    pub async fn create_physical_exam(
        &self,
        draft: &PhysicalExam,
    ) -> Result<PhysicalExam, ApiError> {
        self.post_json("/records/physical/", draft).await
    }

    pub async fn update_physical_exam(
        &self,
        id: u64,
        record: &PhysicalExam,
    ) -> Result<PhysicalExam, ApiError> {
        self.put_json(&format!("/records/physical/{id}/"), record)
            .await
    }

    pub async fn delete_physical_exam(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/records/physical/{id}/")).await
    }

    pub async fn upload_exam_report(
        &self,
        exam_id: u64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<ExamReport, ApiError> {
        self.post_multipart(
            "/records/physical-exam-reports/",
            vec![
                FormField::File {
                    name: "report_file".to_string(),
                    filename: filename.to_string(),
                    bytes,
                },
                FormField::Text {
                    name: "physical_exam_id".to_string(),
                    value: exam_id.to_string(),
                },
            ],
        )
        .await
    }

    /// The report uploaded for an exam, if any.
    pub async fn get_exam_report(&self, exam_id: u64) -> Result<ExamReport, ApiError> {
        self.get_json(&format!("/records/physical-exam-reports/physical-exam/{exam_id}/"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client_with, response};
    use serde_json::json;

    fn medication_json() -> serde_json::Value {
        json!({
            "id": 3,
            "medication_name": "Ibuprofen",
            "dosage": "200mg",
            "frequency": "three times daily",
            "start_date": "2024-03-20",
            "end_date": "2024-03-25",
            "side_effects": ["dizziness"]
        })
    }

    #[tokio::test]
    async fn test_list_accepts_bare_array() {
        let (client, _transport, _storage) =
            client_with(|_req| Ok(response(200, json!([medication_json()]))));
        client.session().set_access_token("t1");

        let records = client.list_medication_records().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].medication_name, "Ibuprofen");
        assert_eq!(records[0].id, Some(3));
    }

    #[tokio::test]
    async fn test_list_accepts_pagination_envelope() {
        let (client, _transport, _storage) = client_with(|_req| {
            Ok(response(
                200,
                json!({ "count": 1, "next": null, "previous": null, "results": [medication_json()] }),
            ))
        });
        client.session().set_access_token("t1");

        let records = client.list_medication_records().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].end_date.map(|d| d.to_string()), Some("2024-03-25".into()));
    }

    #[tokio::test]
    async fn test_create_omits_draft_id() {
        let (client, transport, _storage) =
            client_with(|_req| Ok(response(201, medication_json())));
        client.session().set_access_token("t1");

        let draft = MedicationRecord {
            id: None,
            medication_name: "Ibuprofen".to_string(),
            dosage: "200mg".to_string(),
            frequency: "three times daily".to_string(),
            start_date: "2024-03-20".parse().unwrap(),
            end_date: None,
            side_effects: vec![],
            notes: None,
        };
        let created = client.create_medication_record(&draft).await.unwrap();

        assert_eq!(created.id, Some(3));
        let sent = transport.sent();
        let body = sent[0].body.as_ref().unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["medication_name"], "Ibuprofen");
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_fields() {
        let (client, transport, _storage) = client_with(|_req| {
            Ok(response(
                201,
                json!({ "id": 9, "physical_exam_id": 4, "report_file": "reports/r.pdf", "upload_date": "2024-04-01" }),
            ))
        });
        client.session().set_access_token("t1");

        let report = client
            .upload_exam_report(4, "r.pdf", vec![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(report.physical_exam_id, 4);
        let sent = transport.sent();
        let form = sent[0].form.as_ref().unwrap();
        assert_eq!(form.len(), 2);
        assert!(matches!(&form[0], FormField::File { name, filename, bytes }
            if name == "report_file" && filename == "r.pdf" && bytes.len() == 3));
    }

    #[test]
    fn test_exam_result_wire_format() {
        assert_eq!(serde_json::to_string(&ExamResult::Abnormal).unwrap(), "\"abnormal\"");
        let parsed: ExamResult = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(parsed, ExamResult::Normal);
    }
}
