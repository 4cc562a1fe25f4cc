use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use ledgerdesk_core::{AppError, AppResult, EntityKind, RecordId};
use ledgerdesk_domain::{
    Client, ClientDraft, DraftRecord, FormRemoval, RecordPatch, ServiceDraft, ServiceForm,
    ServiceFormDraft, ServiceOffering, ServiceUpdate,
};
use tokio::sync::Mutex;

use crate::entity_store::EntityStore;
use crate::gateway::{EntityGateway, ServiceCatalogGateway};

use super::{CatalogService, ClientService, EntityService};

fn client(id: i64) -> Client {
    Client::new(
        RecordId::new(id),
        format!("Client {id}"),
        "555-0100",
        "12 Ledger Lane",
        "retail",
        format!("Business {id}"),
        format!("TIN-{id}"),
    )
    .unwrap_or_else(|_| unreachable!())
}

fn offering(id: i64, name: &str, form_names: &[&str]) -> ServiceOffering {
    let forms = form_names
        .iter()
        .map(|form| ServiceForm::new(*form, "", "25", "").unwrap_or_else(|_| unreachable!()))
        .collect();
    ServiceOffering::new(RecordId::new(id), name, forms).unwrap_or_else(|_| unreachable!())
}

struct FakeClientsGateway {
    records: Mutex<Vec<Client>>,
    next_id: AtomicI64,
    fail: AtomicBool,
    fetches: AtomicUsize,
}

impl FakeClientsGateway {
    fn seeded(records: Vec<Client>) -> Self {
        let next_id = records
            .iter()
            .map(|record| record.id().as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            records: Mutex::new(records),
            next_id: AtomicI64::new(next_id),
            fail: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        }
    }

    fn fail_fetches(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityGateway for FakeClientsGateway {
    type Entity = Client;
    type Draft = ClientDraft;
    type Update = Client;

    async fn fetch_all(&self) -> AppResult<Vec<Client>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::FetchFailed {
                kind: EntityKind::Client,
                detail: "status 500: boom".to_owned(),
            });
        }

        Ok(self.records.lock().await.clone())
    }

    async fn fetch_one(&self, id: RecordId) -> AppResult<Client> {
        self.records
            .lock()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| AppError::FetchFailed {
                kind: EntityKind::Client,
                detail: format!("no record with id {id}"),
            })
    }

    async fn add(&self, draft: ClientDraft) -> AppResult<Client> {
        let id = RecordId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = draft.materialize(id)?;
        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, update: Client) -> AppResult<Client> {
        let mut records = self.records.lock().await;
        if let Some(existing) = records.iter_mut().find(|record| record.id() == update.id()) {
            *existing = update.clone();
        }

        Ok(update)
    }

    async fn delete(&self, id: RecordId) -> AppResult<RecordId> {
        self.records.lock().await.retain(|record| record.id() != id);
        Ok(id)
    }
}

struct FakeServicesGateway {
    offerings: Mutex<Vec<ServiceOffering>>,
    next_id: AtomicI64,
}

impl FakeServicesGateway {
    fn seeded(offerings: Vec<ServiceOffering>) -> Self {
        let next_id = offerings
            .iter()
            .map(|offering| offering.id().as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            offerings: Mutex::new(offerings),
            next_id: AtomicI64::new(next_id),
        }
    }
}

#[async_trait]
impl EntityGateway for FakeServicesGateway {
    type Entity = ServiceOffering;
    type Draft = ServiceDraft;
    type Update = ServiceUpdate;

    async fn fetch_all(&self) -> AppResult<Vec<ServiceOffering>> {
        Ok(self.offerings.lock().await.clone())
    }

    async fn fetch_one(&self, id: RecordId) -> AppResult<ServiceOffering> {
        self.offerings
            .lock()
            .await
            .iter()
            .find(|offering| offering.id() == id)
            .cloned()
            .ok_or_else(|| AppError::FetchFailed {
                kind: EntityKind::Service,
                detail: format!("no record with id {id}"),
            })
    }

    async fn add(&self, draft: ServiceDraft) -> AppResult<ServiceOffering> {
        let id = RecordId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = draft.materialize(id)?;
        self.offerings.lock().await.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: ServiceUpdate) -> AppResult<ServiceOffering> {
        let mut offerings = self.offerings.lock().await;
        let position = offerings
            .iter()
            .position(|offering| offering.id() == update.service_id)
            .ok_or_else(|| AppError::UpdateFailed {
                kind: EntityKind::Service,
                detail: format!("no record with id {}", update.service_id),
            })?;
        let updated = update.apply_to(&offerings[position])?;
        offerings[position] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: RecordId) -> AppResult<RecordId> {
        self.offerings
            .lock()
            .await
            .retain(|offering| offering.id() != id);
        Ok(id)
    }
}

#[async_trait]
impl ServiceCatalogGateway for FakeServicesGateway {
    async fn update_name(&self, service_id: RecordId, name: String) -> AppResult<ServiceOffering> {
        let mut offerings = self.offerings.lock().await;
        let position = offerings
            .iter()
            .position(|offering| offering.id() == service_id)
            .ok_or_else(|| AppError::UpdateFailed {
                kind: EntityKind::Service,
                detail: format!("no record with id {service_id}"),
            })?;
        let renamed = ServiceOffering::new(service_id, name, offerings[position].forms().to_vec())?;
        offerings[position] = renamed.clone();
        Ok(renamed)
    }

    async fn delete_form(&self, service_id: RecordId, form_index: usize) -> AppResult<FormRemoval> {
        let mut offerings = self.offerings.lock().await;
        let offering = offerings
            .iter_mut()
            .find(|offering| offering.id() == service_id)
            .ok_or_else(|| AppError::DeleteFailed {
                kind: EntityKind::Form,
                detail: format!("no service with id {service_id}"),
            })?;
        offering
            .remove_form_at(form_index)
            .ok_or_else(|| AppError::DeleteFailed {
                kind: EntityKind::Form,
                detail: format!("no form at index {form_index}"),
            })?;

        Ok(FormRemoval {
            service_id,
            form_index,
        })
    }

    async fn delete_with_forms(&self, service_id: RecordId) -> AppResult<RecordId> {
        self.offerings
            .lock()
            .await
            .retain(|offering| offering.id() != service_id);
        Ok(service_id)
    }
}

#[tokio::test]
async fn refresh_replaces_store_records() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![client(1), client(2)]));
    let service: ClientService = EntityService::new(gateway);

    let result = service.refresh().await;
    assert!(result.is_ok());

    let state = service.store().state().await;
    assert_eq!(state.records.len(), 2);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn load_sets_current_record() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![client(1)]));
    let service: ClientService = EntityService::new(gateway);

    let result = service.load(RecordId::new(1)).await;
    assert!(result.is_ok());

    let state = service.store().state().await;
    assert!(state.records.is_empty());
    assert_eq!(
        state.current.map(|record| record.id()),
        Some(RecordId::new(1))
    );
}

#[tokio::test]
async fn add_appends_created_record() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![client(1)]));
    let service: ClientService = EntityService::new(gateway);
    service.refresh().await.unwrap_or_else(|_| unreachable!());

    let draft = ClientDraft {
        name: "June Reyes".to_owned(),
        phone: "555-0147".to_owned(),
        address: "47 Harbor Row".to_owned(),
        business_type: "retail".to_owned(),
        business_name: "Reyes Trading".to_owned(),
        tin_id: "TIN-2291".to_owned(),
    };
    let result = service.add(draft).await;
    assert!(result.is_ok());
    let created = result.unwrap_or_else(|_| unreachable!());
    assert_eq!(created.id(), RecordId::new(2));

    let state = service.store().state().await;
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.records[1].name().as_str(), "June Reyes");
}

#[tokio::test]
async fn update_for_unknown_id_leaves_list_unchanged() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![client(1)]));
    let service: ClientService = EntityService::new(gateway);
    service.refresh().await.unwrap_or_else(|_| unreachable!());

    let result = service.update(client(9)).await;
    assert!(result.is_ok());

    let state = service.store().state().await;
    assert_eq!(state.records.len(), 1);
    assert_eq!(state.records[0].id(), RecordId::new(1));
    assert!(!state.loading);
}

#[tokio::test]
async fn remove_drops_record_and_requests_reload() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![client(1), client(2)]));
    let service: ClientService = EntityService::new(gateway);
    service.refresh().await.unwrap_or_else(|_| unreachable!());

    let result = service.remove(RecordId::new(1)).await;
    assert!(result.is_ok());

    let state = service.store().state().await;
    assert_eq!(state.records.len(), 1);
    assert!(state.reload);
}

#[tokio::test]
async fn add_then_remove_roundtrip_tracks_flags() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![]));
    let service: ClientService = EntityService::new(gateway);

    let draft = ClientDraft {
        name: "Acme".to_owned(),
        phone: "12345".to_owned(),
        address: "1 Rd".to_owned(),
        business_type: "Retail".to_owned(),
        business_name: "Acme Co".to_owned(),
        tin_id: "TIN1".to_owned(),
    };
    let created = service.add(draft).await.unwrap_or_else(|_| unreachable!());

    let state = service.store().state().await;
    assert_eq!(state.records.len(), 1);
    assert!(!state.loading);

    service
        .remove(created.id())
        .await
        .unwrap_or_else(|_| unreachable!());

    let state = service.store().state().await;
    assert!(state.records.is_empty());
    assert!(state.reload);
}

#[tokio::test]
async fn failed_fetch_preserves_previous_records() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![client(1), client(2)]));
    let service: ClientService = EntityService::new(gateway.clone());
    service.refresh().await.unwrap_or_else(|_| unreachable!());

    gateway.fail_fetches(true);
    let result = service.refresh().await;
    assert!(result.is_err());

    let state = service.store().state().await;
    assert_eq!(state.records.len(), 2);
    assert!(!state.loading);
    assert!(state.error.as_deref().is_some_and(|error| !error.is_empty()));
}

#[tokio::test]
async fn sync_skips_refetch_when_not_requested() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![client(1)]));
    let service: ClientService = EntityService::new(gateway.clone());

    let result = service.sync().await;
    assert!(matches!(result, Ok(false)));
    assert_eq!(gateway.fetch_count(), 0);
}

#[tokio::test]
async fn sync_refetches_once_and_clears_marker() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![client(1), client(2)]));
    let service: ClientService = EntityService::new(gateway.clone());
    service.refresh().await.unwrap_or_else(|_| unreachable!());
    service
        .remove(RecordId::new(1))
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = service.sync().await;
    assert!(matches!(result, Ok(true)));
    assert_eq!(gateway.fetch_count(), 2);

    let state = service.store().state().await;
    assert!(!state.reload);
    assert_eq!(state.records.len(), 1);
}

#[tokio::test]
async fn failed_refresh_keeps_stale_marker_and_records_error() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![client(1)]));
    let service: ClientService = EntityService::new(gateway.clone());
    service.refresh().await.unwrap_or_else(|_| unreachable!());
    service
        .remove(RecordId::new(1))
        .await
        .unwrap_or_else(|_| unreachable!());

    gateway.fail_fetches(true);
    let result = service.sync().await;
    assert!(matches!(result, Err(AppError::FetchFailed { .. })));

    let state = service.store().state().await;
    assert!(state.reload);
    assert!(
        state
            .error
            .as_deref()
            .is_some_and(|error| error.contains("failed to fetch clients"))
    );
}

#[tokio::test]
async fn next_operation_clears_recorded_error() {
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![]));
    let service: ClientService = EntityService::new(gateway.clone());

    gateway.fail_fetches(true);
    let failed = service.refresh().await;
    assert!(failed.is_err());
    assert!(service.store().state().await.error.is_some());

    gateway.fail_fetches(false);
    let recovered = service.refresh().await;
    assert!(recovered.is_ok());
    assert!(service.store().state().await.error.is_none());
}

#[tokio::test]
async fn with_store_shares_injected_state() {
    let store = Arc::new(EntityStore::new());
    let gateway = Arc::new(FakeClientsGateway::seeded(vec![client(1)]));
    let service: ClientService = EntityService::with_store(gateway, store.clone());

    service.refresh().await.unwrap_or_else(|_| unreachable!());
    assert_eq!(store.state().await.records.len(), 1);
}

#[tokio::test]
async fn rename_replaces_offering_in_store() {
    let gateway = Arc::new(FakeServicesGateway::seeded(vec![offering(
        5,
        "Tax Filing",
        &["W-2"],
    )]));
    let service: CatalogService = EntityService::new(gateway);
    service.refresh().await.unwrap_or_else(|_| unreachable!());

    let result = service.rename(RecordId::new(5), "Payroll").await;
    assert!(result.is_ok());

    let state = service.store().state().await;
    assert_eq!(state.records[0].name().as_str(), "Payroll");
    assert_eq!(state.records[0].forms().len(), 1);
}

#[tokio::test]
async fn remove_form_patches_parent_offering() {
    let gateway = Arc::new(FakeServicesGateway::seeded(vec![offering(
        5,
        "Tax Filing",
        &["W-2", "1099"],
    )]));
    let service: CatalogService = EntityService::new(gateway);
    service.refresh().await.unwrap_or_else(|_| unreachable!());

    let result = service.remove_form(RecordId::new(5), 0).await;
    assert!(result.is_ok());

    let state = service.store().state().await;
    assert_eq!(state.records.len(), 1);
    assert_eq!(state.records[0].forms().len(), 1);
    assert_eq!(state.records[0].forms()[0].name().as_str(), "1099");
    assert!(!state.reload);
}

#[tokio::test]
async fn remove_with_forms_drops_offering_and_requests_reload() {
    let gateway = Arc::new(FakeServicesGateway::seeded(vec![offering(
        5,
        "Tax Filing",
        &["W-2"],
    )]));
    let service: CatalogService = EntityService::new(gateway);
    service.refresh().await.unwrap_or_else(|_| unreachable!());

    let result = service.remove_with_forms(RecordId::new(5)).await;
    assert!(result.is_ok());

    let state = service.store().state().await;
    assert!(state.records.is_empty());
    assert!(state.reload);
}

#[tokio::test]
async fn full_update_resubmits_offering_forms() {
    let gateway = Arc::new(FakeServicesGateway::seeded(vec![offering(
        5,
        "Tax Filing",
        &["W-2"],
    )]));
    let service: CatalogService = EntityService::new(gateway);
    service.refresh().await.unwrap_or_else(|_| unreachable!());

    let update = ServiceUpdate {
        service_id: RecordId::new(5),
        service_name: "Tax Filing & Advisory".to_owned(),
        forms: vec![
            ServiceFormDraft {
                name: "W-2".to_owned(),
                price: "25".to_owned(),
                description: String::new(),
                upload: None,
            },
            ServiceFormDraft {
                name: "K-1".to_owned(),
                price: "40".to_owned(),
                description: String::new(),
                upload: None,
            },
        ],
    };
    let result = service.update(update).await;
    assert!(result.is_ok());

    let state = service.store().state().await;
    assert_eq!(state.records[0].name().as_str(), "Tax Filing & Advisory");
    assert_eq!(state.records[0].forms().len(), 2);
}

#[tokio::test]
async fn sequential_updates_replace_forms_in_order() {
    let gateway = Arc::new(FakeServicesGateway::seeded(vec![offering(
        5,
        "Tax Filing",
        &["W-2"],
    )]));
    let service: CatalogService = EntityService::new(gateway);
    service.refresh().await.unwrap_or_else(|_| unreachable!());

    let first = ServiceUpdate {
        service_id: RecordId::new(5),
        service_name: "Tax Filing".to_owned(),
        forms: vec![
            ServiceFormDraft {
                name: "1099".to_owned(),
                price: "30".to_owned(),
                description: String::new(),
                upload: None,
            },
            ServiceFormDraft {
                name: "K-1".to_owned(),
                price: "40".to_owned(),
                description: String::new(),
                upload: None,
            },
        ],
    };
    service.update(first).await.unwrap_or_else(|_| unreachable!());

    let second = ServiceUpdate {
        service_id: RecordId::new(5),
        service_name: "Tax Filing".to_owned(),
        forms: vec![ServiceFormDraft {
            name: "Schedule C".to_owned(),
            price: "55".to_owned(),
            description: String::new(),
            upload: None,
        }],
    };
    service.update(second).await.unwrap_or_else(|_| unreachable!());

    let state = service.store().state().await;
    assert_eq!(state.records[0].forms().len(), 1);
    assert_eq!(state.records[0].forms()[0].name().as_str(), "Schedule C");
}
