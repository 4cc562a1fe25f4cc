use ledgerdesk_core::{AppResult, EntityKind, NonEmptyString, RecordId};
use serde::{Deserialize, Serialize};

use crate::record::{DraftRecord, Record, RecordPatch};

/// Bookkeeping client with contact and registration details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: RecordId,
    name: NonEmptyString,
    phone: NonEmptyString,
    address: NonEmptyString,
    business_type: NonEmptyString,
    business_name: NonEmptyString,
    tin_id: NonEmptyString,
}

impl Client {
    /// Creates a validated client record.
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        business_type: impl Into<String>,
        business_name: impl Into<String>,
        tin_id: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            phone: NonEmptyString::new(phone)?,
            address: NonEmptyString::new(address)?,
            business_type: NonEmptyString::new(business_type)?,
            business_name: NonEmptyString::new(business_name)?,
            tin_id: NonEmptyString::new(tin_id)?,
        })
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the client display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the contact phone number.
    #[must_use]
    pub fn phone(&self) -> &NonEmptyString {
        &self.phone
    }

    /// Returns the mailing address.
    #[must_use]
    pub fn address(&self) -> &NonEmptyString {
        &self.address
    }

    /// Returns the kind of business operated.
    #[must_use]
    pub fn business_type(&self) -> &NonEmptyString {
        &self.business_type
    }

    /// Returns the registered business name.
    #[must_use]
    pub fn business_name(&self) -> &NonEmptyString {
        &self.business_name
    }

    /// Returns the tax identification number.
    #[must_use]
    pub fn tin_id(&self) -> &NonEmptyString {
        &self.tin_id
    }
}

impl Record for Client {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn kind() -> EntityKind {
        EntityKind::Client
    }
}

/// Updates replace the stored record wholesale, so the update payload for a
/// client is the full client itself.
impl RecordPatch for Client {
    type Entity = Client;

    fn target(&self) -> RecordId {
        self.id
    }

    fn apply_to(self, _existing: &Client) -> AppResult<Client> {
        Ok(self)
    }
}

/// Create payload for a client; identity is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientDraft {
    /// Client display name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Mailing address.
    pub address: String,
    /// Kind of business operated.
    pub business_type: String,
    /// Registered business name.
    pub business_name: String,
    /// Tax identification number.
    pub tin_id: String,
}

impl DraftRecord for ClientDraft {
    type Entity = Client;

    fn materialize(self, id: RecordId) -> AppResult<Client> {
        Client::new(
            id,
            self.name,
            self.phone,
            self.address,
            self.business_type,
            self.business_name,
            self.tin_id,
        )
    }
}
