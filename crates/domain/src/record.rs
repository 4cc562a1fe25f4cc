use ledgerdesk_core::{AppResult, EntityKind, RecordId};

/// A record held in per-family list state.
pub trait Record {
    /// Returns the store-assigned identifier.
    fn record_id(&self) -> RecordId;

    /// Returns the entity family this record belongs to.
    fn kind() -> EntityKind;
}

/// Create payload that becomes an entity once the store assigns identity.
pub trait DraftRecord {
    /// Entity produced by this draft.
    type Entity: Record;

    /// Builds the entity with the store-assigned identifier.
    fn materialize(self, id: RecordId) -> AppResult<Self::Entity>;
}

/// Update payload addressed at an existing record.
pub trait RecordPatch {
    /// Entity this patch applies to.
    type Entity: Record;

    /// Returns the identifier of the record being updated.
    fn target(&self) -> RecordId;

    /// Produces the updated entity from the stored one.
    fn apply_to(self, existing: &Self::Entity) -> AppResult<Self::Entity>;
}
