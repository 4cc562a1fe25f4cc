use std::marker::PhantomData;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use ledgerdesk_application::{EntityGateway, ServiceCatalogGateway};
use ledgerdesk_core::{AppError, AppResult, EntityKind, RecordId};
use ledgerdesk_domain::{
    Client, ClientDraft, DraftRecord, FormRemoval, Record, RecordPatch, ServiceDraft,
    ServiceOffering, ServiceUpdate, TaxForm, TaxFormDraft,
};
use tokio::sync::RwLock;

/// Process-local gateway holding one family's records.
///
/// Identifiers are assigned monotonically, mirroring the external store's
/// contract. Failures are reported as errors only; user-facing notices are
/// a REST adapter concern.
pub struct InMemoryGateway<D: DraftRecord, U> {
    records: RwLock<Vec<D::Entity>>,
    next_id: AtomicI64,
    _marker: PhantomData<fn(D, U)>,
}

/// In-memory clients gateway.
pub type InMemoryClientsGateway = InMemoryGateway<ClientDraft, Client>;

/// In-memory service offering gateway.
pub type InMemoryServicesGateway = InMemoryGateway<ServiceDraft, ServiceUpdate>;

/// In-memory tax calendar gateway.
pub type InMemoryTaxCalendarGateway = InMemoryGateway<TaxFormDraft, TaxForm>;

impl<D: DraftRecord, U> InMemoryGateway<D, U> {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            _marker: PhantomData,
        }
    }

    /// Creates a gateway seeded with existing records.
    #[must_use]
    pub fn with_records(records: Vec<D::Entity>) -> Self {
        let next_id = records
            .iter()
            .map(|record| record.record_id().as_i64())
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            records: RwLock::new(records),
            next_id: AtomicI64::new(next_id),
            _marker: PhantomData,
        }
    }
}

impl<D: DraftRecord, U> Default for InMemoryGateway<D, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<D, U> EntityGateway for InMemoryGateway<D, U>
where
    D: DraftRecord + Send + Sync + 'static,
    D::Entity: Clone + Send + Sync + 'static,
    U: RecordPatch<Entity = D::Entity> + Send + Sync + 'static,
{
    type Entity = D::Entity;
    type Draft = D;
    type Update = U;

    async fn fetch_all(&self) -> AppResult<Vec<D::Entity>> {
        Ok(self.records.read().await.clone())
    }

    async fn fetch_one(&self, id: RecordId) -> AppResult<D::Entity> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.record_id() == id)
            .cloned()
            .ok_or_else(|| AppError::FetchFailed {
                kind: D::Entity::kind(),
                detail: format!("no record with id {id}"),
            })
    }

    async fn add(&self, draft: D) -> AppResult<D::Entity> {
        let id = RecordId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = draft.materialize(id).map_err(|error| AppError::AddFailed {
            kind: D::Entity::kind(),
            detail: error.to_string(),
        })?;

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, update: U) -> AppResult<D::Entity> {
        let target = update.target();
        let mut records = self.records.write().await;
        let Some(position) = records
            .iter()
            .position(|record| record.record_id() == target)
        else {
            return Err(AppError::UpdateFailed {
                kind: D::Entity::kind(),
                detail: format!("no record with id {target}"),
            });
        };

        let updated = update
            .apply_to(&records[position])
            .map_err(|error| AppError::UpdateFailed {
                kind: D::Entity::kind(),
                detail: error.to_string(),
            })?;
        records[position] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: RecordId) -> AppResult<RecordId> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.record_id() != id);

        if records.len() == before {
            return Err(AppError::DeleteFailed {
                kind: D::Entity::kind(),
                detail: format!("no record with id {id}"),
            });
        }

        Ok(id)
    }
}

#[async_trait]
impl ServiceCatalogGateway for InMemoryServicesGateway {
    async fn update_name(&self, service_id: RecordId, name: String) -> AppResult<ServiceOffering> {
        let mut records = self.records.write().await;
        let Some(position) = records
            .iter()
            .position(|offering| offering.record_id() == service_id)
        else {
            return Err(AppError::UpdateFailed {
                kind: EntityKind::Service,
                detail: format!("no record with id {service_id}"),
            });
        };

        let renamed = ServiceOffering::new(service_id, name, records[position].forms().to_vec())
            .map_err(|error| AppError::UpdateFailed {
                kind: EntityKind::Service,
                detail: error.to_string(),
            })?;
        records[position] = renamed.clone();
        Ok(renamed)
    }

    async fn delete_form(&self, service_id: RecordId, form_index: usize) -> AppResult<FormRemoval> {
        let mut records = self.records.write().await;
        let offering = records
            .iter_mut()
            .find(|offering| offering.record_id() == service_id)
            .ok_or_else(|| AppError::DeleteFailed {
                kind: EntityKind::Form,
                detail: format!("no service with id {service_id}"),
            })?;

        offering
            .remove_form_at(form_index)
            .ok_or_else(|| AppError::DeleteFailed {
                kind: EntityKind::Form,
                detail: format!("service {service_id} has no form at index {form_index}"),
            })?;

        Ok(FormRemoval {
            service_id,
            form_index,
        })
    }

    async fn delete_with_forms(&self, service_id: RecordId) -> AppResult<RecordId> {
        EntityGateway::delete(self, service_id).await
    }
}
