use ledgerdesk_core::{AppResult, RecordId};
use ledgerdesk_domain::{FormRemoval, ServiceOffering};

use crate::gateway::ServiceCatalogGateway;

use super::EntityService;

/// Service offering family service, including form-level operations.
pub type CatalogService = EntityService<dyn ServiceCatalogGateway>;

impl EntityService<dyn ServiceCatalogGateway> {
    /// Renames an offering and replaces it in the store.
    pub async fn rename(
        &self,
        service_id: RecordId,
        name: impl Into<String>,
    ) -> AppResult<ServiceOffering> {
        let operation = self.store.begin_operation().await;
        match self.gateway.update_name(service_id, name.into()).await {
            Ok(offering) => {
                self.store.record_updated(operation, offering.clone()).await;
                Ok(offering)
            }
            Err(error) => {
                self.store.record_failed(operation, error.to_string()).await;
                Err(error)
            }
        }
    }

    /// Deletes one form from an offering by position.
    ///
    /// The parent offering is patched in place; the family list stays
    /// accurate, so no stale marker is set.
    pub async fn remove_form(
        &self,
        service_id: RecordId,
        form_index: usize,
    ) -> AppResult<FormRemoval> {
        let operation = self.store.begin_operation().await;
        match self.gateway.delete_form(service_id, form_index).await {
            Ok(removal) => {
                self.store.record_form_removed(operation, removal).await;
                Ok(removal)
            }
            Err(error) => {
                self.store.record_failed(operation, error.to_string()).await;
                Err(error)
            }
        }
    }

    /// Deletes an offering and its forms, marking state stale.
    pub async fn remove_with_forms(&self, service_id: RecordId) -> AppResult<RecordId> {
        let operation = self.store.begin_operation().await;
        match self.gateway.delete_with_forms(service_id).await {
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
}
