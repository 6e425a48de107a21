//! Per-entity record state containers.
//!
//! Every record type follows the same four-operation contract: set a loading
//! flag, call the endpoint, mutate the in-memory collection on success,
//! store a readable error and re-raise on failure. [`RecordResource`] binds
//! a contract type to its endpoints; [`RecordsHandle`] carries the shared
//! state signal the views render from.

use api::{ApiError, MedicalRecord, MedicationRecord, PhysicalExam, VaccinationRecord};
use dioxus::prelude::*;
use store::{Collection, Keyed};

use crate::auth::{note_session_expiry, use_auth, AuthState};
use crate::client::{use_api, Api};

/// Reactive state for one record collection.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordsState<T> {
    pub records: Collection<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for RecordsState<T> {
    fn default() -> Self {
        Self {
            records: Collection::default(),
            loading: false,
            error: None,
        }
    }
}

/// Binds a record contract type to its backend endpoints.
pub trait RecordResource: Keyed + Clone + PartialEq + 'static {
    /// Noun used in fallback error messages, e.g. "medical record".
    const LABEL: &'static str;

    async fn list(api: &Api) -> Result<Vec<Self>, ApiError>;
    async fn create(api: &Api, draft: Self) -> Result<Self, ApiError>;
    async fn update(api: &Api, id: u64, value: Self) -> Result<Self, ApiError>;
    async fn remove(api: &Api, id: u64) -> Result<(), ApiError>;
}

impl RecordResource for MedicalRecord {
    const LABEL: &'static str = "medical record";

    async fn list(api: &Api) -> Result<Vec<Self>, ApiError> {
        api.list_medical_records().await
    }
    async fn create(api: &Api, draft: Self) -> Result<Self, ApiError> {
        api.create_medical_record(&draft).await
    }
    async fn update(api: &Api, id: u64, value: Self) -> Result<Self, ApiError> {
        api.update_medical_record(id, &value).await
    }
    async fn remove(api: &Api, id: u64) -> Result<(), ApiError> {
        api.delete_medical_record(id).await
    }
}

impl RecordResource for MedicationRecord {
    const LABEL: &'static str = "medication record";

    async fn list(api: &Api) -> Result<Vec<Self>, ApiError> {
        api.list_medication_records().await
    }
    async fn create(api: &Api, draft: Self) -> Result<Self, ApiError> {
        api.create_medication_record(&draft).await
    }
    async fn update(api: &Api, id: u64, value: Self) -> Result<Self, ApiError> {
        api.update_medication_record(id, &value).await
    }
    async fn remove(api: &Api, id: u64) -> Result<(), ApiError> {
        api.delete_medication_record(id).await
    }
}

impl RecordResource for VaccinationRecord {
    const LABEL: &'static str = "vaccination record";

    async fn list(api: &Api) -> Result<Vec<Self>, ApiError> {
        api.list_vaccination_records().await
    }
    async fn create(api: &Api, draft: Self) -> Result<Self, ApiError> {
        api.create_vaccination_record(&draft).await
    }
    async fn update(api: &Api, id: u64, value: Self) -> Result<Self, ApiError> {
        api.update_vaccination_record(id, &value).await
    }
    async fn remove(api: &Api, id: u64) -> Result<(), ApiError> {
        api.delete_vaccination_record(id).await
    }
}

impl RecordResource for PhysicalExam {
    const LABEL: &'static str = "physical exam";

    async fn list(api: &Api) -> Result<Vec<Self>, ApiError> {
        api.list_physical_exams().await
    }
    async fn create(api: &Api, draft: Self) -> Result<Self, ApiError> {
        api.create_physical_exam(&draft).await
    }
    async fn update(api: &Api, id: u64, value: Self) -> Result<Self, ApiError> {
        api.update_physical_exam(id, &value).await
    }
    async fn remove(api: &Api, id: u64) -> Result<(), ApiError> {
        api.delete_physical_exam(id).await
    }
}

/// Handle over one record collection: the state signal plus the client.
pub struct RecordsHandle<T: RecordResource> {
    state: Signal<RecordsState<T>>,
    auth: Signal<AuthState>,
    api: Api,
}

impl<T: RecordResource> Clone for RecordsHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            auth: self.auth,
            api: self.api.clone(),
        }
    }
}

/// Create the state container for a record collection.
pub fn use_records<T: RecordResource>() -> RecordsHandle<T> {
    let api = use_api();
    let auth = use_auth();
    let state = use_signal(RecordsState::<T>::default);
    RecordsHandle { state, auth, api }
}

impl<T: RecordResource> RecordsHandle<T> {
    pub fn state(&self) -> Signal<RecordsState<T>> {
        self.state
    }

    fn begin(&self) {
        let mut state = self.state;
        let mut state = state.write();
        state.loading = true;
        state.error = None;
    }

    fn finish(&self) {
        let mut state = self.state;
        state.write().loading = false;
    }

    fn fail(&self, err: &ApiError, fallback: String) {
        tracing::warn!(%err, resource = T::LABEL, "record operation failed");
        note_session_expiry(self.auth, err);
        let mut state = self.state;
        let mut state = state.write();
        state.loading = false;
        state.error = Some(err.user_message(&fallback));
    }

    /// Fetch the collection from the backend.
    pub async fn load(&self) -> Result<(), ApiError> {
        self.begin();
        match T::list(&self.api).await {
            Ok(items) => {
                let mut state = self.state;
                let mut state = state.write();
                state.records.set(items);
                state.loading = false;
                Ok(())
            }
            Err(err) => {
                self.fail(&err, format!("Failed to load {}s", T::LABEL));
                Err(err)
            }
        }
    }

    /// Create a record and append it to the collection.
    pub async fn create(&self, draft: T) -> Result<T, ApiError> {
        self.begin();
        match T::create(&self.api, draft).await {
            Ok(created) => {
                let mut state = self.state;
                state.write().records.insert(created.clone());
                self.finish();
                Ok(created)
            }
            Err(err) => {
                self.fail(&err, format!("Failed to create {}", T::LABEL));
                Err(err)
            }
        }
    }

    /// Update a record in place by id.
    pub async fn update(&self, id: u64, value: T) -> Result<T, ApiError> {
        self.begin();
        match T::update(&self.api, id, value).await {
            Ok(updated) => {
                let mut state = self.state;
                state.write().records.replace(id, updated.clone());
                self.finish();
                Ok(updated)
            }
            Err(err) => {
                self.fail(&err, format!("Failed to update {}", T::LABEL));
                Err(err)
            }
        }
    }

    /// Delete a record and drop it from the collection.
    pub async fn remove(&self, id: u64) -> Result<(), ApiError> {
        self.begin();
        match T::remove(&self.api, id).await {
            Ok(()) => {
                let mut state = self.state;
                state.write().records.remove(id);
                self.finish();
                Ok(())
            }
            Err(err) => {
                self.fail(&err, format!("Failed to delete {}", T::LABEL));
                Err(err)
            }
        }
    }
}
