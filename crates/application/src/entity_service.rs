//! Orchestration services binding gateways to family stores.

use std::sync::Arc;

use ledgerdesk_core::{AppResult, RecordId};

use crate::entity_store::EntityStore;
use crate::gateway::{ClientGateway, EntityGateway, TaxCalendarGateway};

mod catalog;

#[cfg(test)]
mod tests;

pub use catalog::CatalogService;

/// Orchestrates one entity family: every operation runs through the gateway
/// and lands in the family store as a canonical transition.
///
/// Failures are recorded in the store and propagated to the caller; no
/// operation is retried.
pub struct EntityService<G>
where
    G: EntityGateway + ?Sized,
{
    gateway: Arc<G>,
    store: Arc<EntityStore<G::Entity>>,
}

/// Client family service.
pub type ClientService = EntityService<ClientGateway>;

/// Tax calendar family service.
pub type TaxCalendarService = EntityService<TaxCalendarGateway>;

impl<G> EntityService<G>
where
    G: EntityGateway + ?Sized,
{
    /// Creates a service with a fresh store.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_store(gateway, Arc::new(EntityStore::new()))
    }

    /// Creates a service over an existing store.
    #[must_use]
    pub fn with_store(gateway: Arc<G>, store: Arc<EntityStore<G::Entity>>) -> Self {
        Self { gateway, store }
    }

    /// Returns the family store.
    #[must_use]
    pub fn store(&self) -> &Arc<EntityStore<G::Entity>> {
        &self.store
    }

    /// Refetches the full collection into the store.
    pub async fn refresh(&self) -> AppResult<()> {
        let operation = self.store.begin_operation().await;
        match self.gateway.fetch_all().await {
            Ok(records) => {
                self.store.record_fetched(operation, records).await;
                Ok(())
            }
            Err(error) => {
                self.store.record_failed(operation, error.to_string()).await;
                Err(error)
            }
        }
    }

    /// Fetches one record into the store's current slot.
    pub async fn load(&self, id: RecordId) -> AppResult<G::Entity> {
        let operation = self.store.begin_operation().await;
        match self.gateway.fetch_one(id).await {
            Ok(record) => {
                self.store.record_loaded(operation, record.clone()).await;
                Ok(record)
            }
            Err(error) => {
                self.store.record_failed(operation, error.to_string()).await;
                Err(error)
            }
        }
    }

    /// Creates a record and appends it to the store.
    pub async fn add(&self, draft: G::Draft) -> AppResult<G::Entity> {
        let operation = self.store.begin_operation().await;
        match self.gateway.add(draft).await {
            Ok(record) => {
                self.store.record_added(operation, record.clone()).await;
                Ok(record)
            }
            Err(error) => {
                self.store.record_failed(operation, error.to_string()).await;
                Err(error)
            }
        }
    }

    /// Updates a record in place in the store.
    pub async fn update(&self, update: G::Update) -> AppResult<G::Entity> {
        let operation = self.store.begin_operation().await;
        match self.gateway.update(update).await {
            Ok(record) => {
                self.store.record_updated(operation, record.clone()).await;
                Ok(record)
            }
            Err(error) => {
                self.store.record_failed(operation, error.to_string()).await;
                Err(error)
            }
        }
    }

    /// Deletes a record and drops it from the store, marking state stale.
    pub async fn remove(&self, id: RecordId) -> AppResult<RecordId> {
        let operation = self.store.begin_operation().await;
        match self.gateway.delete(id).await {
            Ok(deleted) => {
                self.store.record_removed(operation, deleted).await;
                Ok(deleted)
            }
            Err(error) => {
                self.store.record_failed(operation, error.to_string()).await;
                Err(error)
            }
        }
    }

    /// Refetches once when the store is marked stale.
    ///
    /// Returns whether a refetch ran. When the refetch fails the stale
    /// marker is left set so the next sync tries again.
    pub async fn sync(&self) -> AppResult<bool> {
        if !self.store.reload_requested().await {
            return Ok(false);
        }

        self.refresh().await?;
        self.store.reset_reload().await;
        Ok(true)
    }
}

impl<G> Clone for EntityService<G>
where
    G: EntityGateway + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            store: Arc::clone(&self.store),
        }
    }
}
