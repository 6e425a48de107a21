//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod client;
pub use client::{make_api, use_api, Api, PlatformStorage};

mod auth;
pub use auth::{
    note_session_expiry, session_expired, sign_in, sign_out, sign_up, use_auth, AuthProvider,
    AuthState,
};

mod notify;
pub use notify::{
    notify, use_notices, Notice, NoticeBoard, NoticeLevel, NotificationProvider, NotificationTray,
};

pub mod records;
pub use records::{use_records, RecordResource, RecordsHandle, RecordsState};

mod tag_editor;
pub use tag_editor::TagListEditor;

pub mod forms;
pub use forms::{
    MedicalRecordForm, MedicationRecordForm, PhysicalExamForm, VaccinationRecordForm,
};

pub mod dashboard;
pub use dashboard::{BodyModel, RecentActivityList, StatCards, TrendChart};

mod navbar;
pub use navbar::Navbar;
