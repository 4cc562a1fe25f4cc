use async_trait::async_trait;
use ledgerdesk_core::{AppResult, RecordId};
use ledgerdesk_domain::{
    Client, ClientDraft, FormRemoval, Record, ServiceDraft, ServiceOffering, ServiceUpdate,
    TaxForm, TaxFormDraft,
};

/// Data-access port for one entity family.
///
/// Implementations normalize every failure into the operation-specific
/// error variants and report outcomes on the user notification channel
/// where the adapter carries one.
#[async_trait]
pub trait EntityGateway: Send + Sync {
    /// Entity family served by this gateway.
    type Entity: Record + Clone + Send + Sync + 'static;
    /// Create payload accepted by [`EntityGateway::add`].
    type Draft: Send + 'static;
    /// Update payload accepted by [`EntityGateway::update`].
    type Update: Send + 'static;

    /// Fetches the full collection.
    async fn fetch_all(&self) -> AppResult<Vec<Self::Entity>>;

    /// Fetches a single record by identifier.
    async fn fetch_one(&self, id: RecordId) -> AppResult<Self::Entity>;

    /// Creates a record and returns it with store-assigned identity.
    async fn add(&self, draft: Self::Draft) -> AppResult<Self::Entity>;

    /// Updates a record and returns the stored result.
    async fn update(&self, update: Self::Update) -> AppResult<Self::Entity>;

    /// Deletes a record, returning the same identifier so callers can drop
    /// it from local state without a second round-trip.
    async fn delete(&self, id: RecordId) -> AppResult<RecordId>;
}

/// Gateway to the clients family.
pub type ClientGateway = dyn EntityGateway<Entity = Client, Draft = ClientDraft, Update = Client>;

/// Gateway to the tax calendar family.
pub type TaxCalendarGateway =
    dyn EntityGateway<Entity = TaxForm, Draft = TaxFormDraft, Update = TaxForm>;

/// Data-access port for the service offering family.
///
/// Extends the common contract with the offering-specific operations:
/// name-only rename, positional form deletion, and cascading delete.
#[async_trait]
pub trait ServiceCatalogGateway:
    EntityGateway<Entity = ServiceOffering, Draft = ServiceDraft, Update = ServiceUpdate>
{
    /// Renames an offering without touching its forms.
    async fn update_name(&self, service_id: RecordId, name: String) -> AppResult<ServiceOffering>;

    /// Deletes the form at `form_index` from an offering.
    async fn delete_form(&self, service_id: RecordId, form_index: usize) -> AppResult<FormRemoval>;

    /// Deletes an offering together with all of its forms.
    async fn delete_with_forms(&self, service_id: RecordId) -> AppResult<RecordId>;
}
