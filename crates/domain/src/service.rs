use ledgerdesk_core::{AppResult, EntityKind, NonEmptyString, RecordId};
use serde::{Deserialize, Serialize};

use crate::record::{DraftRecord, Record, RecordPatch};

/// Downloadable form attached to a service offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceForm {
    name: NonEmptyString,
    file: String,
    price: NonEmptyString,
    description: String,
}

impl ServiceForm {
    /// Creates a validated service form.
    ///
    /// `file` is the stored file path and may be empty when no upload
    /// exists yet.
    pub fn new(
        name: impl Into<String>,
        file: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            file: file.into(),
            price: NonEmptyString::new(price)?,
            description: description.into(),
        })
    }

    /// Returns the form display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the stored file path, empty when no upload exists.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the price label.
    #[must_use]
    pub fn price(&self) -> &NonEmptyString {
        &self.price
    }

    /// Returns the form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Service offering with its attached forms.
///
/// Forms are owned exclusively by their parent offering and are addressed
/// by position, matching the wire contract for nested form deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    id: RecordId,
    #[serde(rename = "service")]
    name: NonEmptyString,
    forms: Vec<ServiceForm>,
}

impl ServiceOffering {
    /// Creates a validated service offering.
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        forms: Vec<ServiceForm>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            forms,
        })
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the offering name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the attached forms in submission order.
    #[must_use]
    pub fn forms(&self) -> &[ServiceForm] {
        &self.forms
    }

    /// Removes and returns the form at `index`, or `None` when out of range.
    pub fn remove_form_at(&mut self, index: usize) -> Option<ServiceForm> {
        (index < self.forms.len()).then(|| self.forms.remove(index))
    }
}

impl Record for ServiceOffering {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn kind() -> EntityKind {
        EntityKind::Service
    }
}

/// Binary upload carried by a form draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormUpload {
    /// Original file name, also used as the stored path.
    pub file_name: String,
    /// MIME content type.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Create payload for one form attached to a service offering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFormDraft {
    /// Form display name.
    pub name: String,
    /// Price label.
    pub price: String,
    /// Form description.
    pub description: String,
    /// Optional binary upload; absent when the form has no file yet.
    pub upload: Option<FormUpload>,
}

impl ServiceFormDraft {
    /// Builds the stored form, using the upload file name as the stored path.
    pub(crate) fn materialize(self) -> AppResult<ServiceForm> {
        let file = self
            .upload
            .map(|upload| upload.file_name)
            .unwrap_or_default();
        ServiceForm::new(self.name, file, self.price, self.description)
    }
}

/// Create payload for a service offering and its forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDraft {
    /// Offering name.
    pub name: String,
    /// Form drafts in submission order.
    pub forms: Vec<ServiceFormDraft>,
}

impl DraftRecord for ServiceDraft {
    type Entity = ServiceOffering;

    fn materialize(self, id: RecordId) -> AppResult<ServiceOffering> {
        let forms = self
            .forms
            .into_iter()
            .map(ServiceFormDraft::materialize)
            .collect::<AppResult<Vec<_>>>()?;
        ServiceOffering::new(id, self.name, forms)
    }
}

/// Full update payload for a service offering, re-submitting its forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUpdate {
    /// Identifier of the offering being updated.
    pub service_id: RecordId,
    /// New offering name.
    pub service_name: String,
    /// Replacement form drafts in submission order.
    pub forms: Vec<ServiceFormDraft>,
}

impl RecordPatch for ServiceUpdate {
    type Entity = ServiceOffering;

    fn target(&self) -> RecordId {
        self.service_id
    }

    fn apply_to(self, _existing: &ServiceOffering) -> AppResult<ServiceOffering> {
        let forms = self
            .forms
            .into_iter()
            .map(ServiceFormDraft::materialize)
            .collect::<AppResult<Vec<_>>>()?;
        ServiceOffering::new(self.service_id, self.service_name, forms)
    }
}

/// Result of deleting a single form from an offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRemoval {
    /// Parent offering identifier.
    pub service_id: RecordId,
    /// Zero-based position of the removed form.
    pub form_index: usize,
}
