//! Entity forms.
//!
//! Each form binds signals to its entity's field set, validates on submit
//! (required fields plus cross-field date checks), surfaces a single error
//! notification when validation fails, and emits `submit` with the
//! normalized payload or `cancel`. Validation lives in pure `validate`
//! functions so it is testable without a DOM.

mod medical;
mod medication;
mod physical_exam;
mod vaccination;

pub use medical::MedicalRecordForm;
pub use medication::MedicationRecordForm;
pub use physical_exam::PhysicalExamForm;
pub use vaccination::VaccinationRecordForm;

use chrono::NaiveDate;

pub(crate) const REQUIRED_FIELDS_MESSAGE: &str = "Please complete all required fields";

pub(crate) fn parse_date(value: &str, label: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("{label} is not a valid date"))
}

/// Empty input means "not provided"; anything else must parse.
pub(crate) fn parse_optional_date(value: &str, label: &str) -> Result<Option<NaiveDate>, String> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_date(value, label).map(Some)
}

pub(crate) fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn parse_number<T: std::str::FromStr>(value: &str, label: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{label} must be a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date("", "End date"), Ok(None));
        assert_eq!(parse_optional_date("  ", "End date"), Ok(None));
        assert!(parse_optional_date("2024-03-20", "End date").unwrap().is_some());
        assert!(parse_optional_date("not-a-date", "End date").is_err());
    }

    #[test]
    fn test_none_if_empty() {
        assert_eq!(none_if_empty("  "), None);
        assert_eq!(none_if_empty(" x "), Some("x".to_string()));
    }
}
