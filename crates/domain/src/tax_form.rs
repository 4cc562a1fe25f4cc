use chrono::NaiveDate;
use ledgerdesk_core::{AppResult, EntityKind, NonEmptyString, RecordId};
use serde::{Deserialize, Serialize};

use crate::record::{DraftRecord, Record, RecordPatch};

/// Tax calendar entry tracking a filing form and its due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxForm {
    id: RecordId,
    form_no: NonEmptyString,
    latest_revision_date: NaiveDate,
    form_name: NonEmptyString,
    due_date: NaiveDate,
}

impl TaxForm {
    /// Creates a validated tax calendar entry.
    pub fn new(
        id: RecordId,
        form_no: impl Into<String>,
        latest_revision_date: NaiveDate,
        form_name: impl Into<String>,
        due_date: NaiveDate,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            form_no: NonEmptyString::new(form_no)?,
            latest_revision_date,
            form_name: NonEmptyString::new(form_name)?,
            due_date,
        })
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the government form number.
    #[must_use]
    pub fn form_no(&self) -> &NonEmptyString {
        &self.form_no
    }

    /// Returns the date of the latest form revision.
    #[must_use]
    pub fn latest_revision_date(&self) -> NaiveDate {
        self.latest_revision_date
    }

    /// Returns the human-readable form name.
    #[must_use]
    pub fn form_name(&self) -> &NonEmptyString {
        &self.form_name
    }

    /// Returns the filing due date.
    #[must_use]
    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }
}

impl Record for TaxForm {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn kind() -> EntityKind {
        EntityKind::TaxForm
    }
}

/// Updates replace the stored entry wholesale, so the update payload for a
/// tax form is the full entry itself.
impl RecordPatch for TaxForm {
    type Entity = TaxForm;

    fn target(&self) -> RecordId {
        self.id
    }

    fn apply_to(self, _existing: &TaxForm) -> AppResult<TaxForm> {
        Ok(self)
    }
}

/// Create payload for a tax calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxFormDraft {
    /// Government form number.
    pub form_no: String,
    /// Date of the latest form revision.
    pub latest_revision_date: NaiveDate,
    /// Human-readable form name.
    pub form_name: String,
    /// Filing due date.
    pub due_date: NaiveDate,
}

impl DraftRecord for TaxFormDraft {
    type Entity = TaxForm;

    fn materialize(self, id: RecordId) -> AppResult<TaxForm> {
        TaxForm::new(
            id,
            self.form_no,
            self.latest_revision_date,
            self.form_name,
            self.due_date,
        )
    }
}
