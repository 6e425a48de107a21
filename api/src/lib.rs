//! # api crate — typed REST client for the health-record backend
//!
//! Everything the frontends need to talk to the backend lives here: the
//! contract types for each resource, the shared request pipeline with its
//! two interceptors, and per-resource endpoint groups.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: bearer attachment, 401 refresh-and-replay, single-flight refresh lock |
//! | [`transport`] | The [`HttpTransport`] seam and the production [`ReqwestTransport`] |
//! | [`auth`] | Login, registration, session restore, logout, profile |
//! | [`records`] | The four record collections and their uploads |
//! | [`overview`] | Dashboard aggregates: statistics, trends, activities, abnormal organs |
//! | [`health`] | Public backend reachability probe |
//! | [`config`] | Backend base URL and request timeout |
//! | [`error`] | [`ApiError`] taxonomy |
//!
//! The client is generic over transport and storage, so tests run the whole
//! interceptor pipeline against a scripted transport and an in-memory store.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod overview;
pub mod records;
pub mod transport;

pub use auth::{Credentials, ProfileUpdate, Registration, User, UserProfile};
pub use client::{ApiClient, Session};
pub use config::ApiConfig;
pub use error::ApiError;
pub use health::HealthStatus;
pub use overview::{
    AbnormalOrgan, ActivityKind, HealthStatistics, HealthTrends, OrganStatus, RecentActivity,
    RelatedRecord,
};
pub use records::{
    AbnormalItem, ExamReport, ExamResult, MedicalRecord, MedicationRecord, PhysicalExam,
    VaccinationRecord,
};
pub use transport::{HttpTransport, ReqwestTransport};
