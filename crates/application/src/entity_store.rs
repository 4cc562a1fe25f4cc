//! Per-family list state with canonical transitions.

use std::collections::HashSet;

use ledgerdesk_core::RecordId;
use ledgerdesk_domain::{FormRemoval, Record, ServiceOffering};
use tokio::sync::RwLock;
use uuid::Uuid;


/// Identifier for one in-flight store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(Uuid);

impl OperationId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Point-in-time snapshot of one entity family's state.
#[derive(Debug, Clone)]
pub struct EntityState<E> {
    /// Records in fetch or insertion order.
    pub records: Vec<E>,
    /// Selected record for detail and edit flows.
    pub current: Option<E>,
    /// True while any operation is in flight.
    pub loading: bool,
    /// Message from the most recent failure, cleared when a new operation
    /// starts.
    pub error: Option<String>,
    /// True when local state is known stale and a refetch is required.
    pub reload: bool,
}

#[derive(Debug)]
struct StoreState<E> {
    records: Vec<E>,
    current: Option<E>,
    in_flight: HashSet<OperationId>,
    error: Option<String>,
    reload: bool,
    detached: bool,
}

/// List state for one entity family.
///
/// The store owns the authoritative record list; consumers read snapshots
/// and every mutation flows through one of the canonical transitions. The
/// loading flag is derived from the set of in-flight operations, so
/// overlapping operations only clear it once the last one resolves.
/// Results apply in resolution order regardless of start order.
#[derive(Debug)]
pub struct EntityStore<E> {
    state: RwLock<StoreState<E>>,
}

impl<E> EntityStore<E>
where
    E: Record + Clone,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                records: Vec::new(),
                current: None,
                in_flight: HashSet::new(),
                error: None,
                reload: false,
                detached: false,
            }),
        }
    }

    /// Registers a new in-flight operation and clears the previous error.
    pub async fn begin_operation(&self) -> OperationId {
        let operation = OperationId::new();
        let mut state = self.state.write().await;
        if state.detached {
            return operation;
        }

        state.error = None;
        state.in_flight.insert(operation);
        operation
    }

    /// Replaces the record list after a collection fetch.
    pub async fn record_fetched(&self, operation: OperationId, records: Vec<E>) {
        let mut state = self.state.write().await;
        if state.detached {
            return;
        }

        state.in_flight.remove(&operation);
        state.records = records;
    }

    /// Stores the selected record after a single-record fetch.
    ///
    /// The record list is left untouched.
    pub async fn record_loaded(&self, operation: OperationId, record: E) {
        let mut state = self.state.write().await;
        if state.detached {
            return;
        }

        state.in_flight.remove(&operation);
        state.current = Some(record);
    }

    /// Appends a newly created record. Identity is not de-duplicated.
    pub async fn record_added(&self, operation: OperationId, record: E) {
        let mut state = self.state.write().await;
        if state.detached {
            return;
        }

        state.in_flight.remove(&operation);
        state.records.push(record);
    }

    /// Replaces the record with the same identity in place.
    ///
    /// A record that is no longer in the list is ignored.
    pub async fn record_updated(&self, operation: OperationId, record: E) {
        let mut state = self.state.write().await;
        if state.detached {
            return;
        }

        state.in_flight.remove(&operation);
        if let Some(existing) = state
            .records
            .iter_mut()
            .find(|existing| existing.record_id() == record.record_id())
        {
            *existing = record;
        }
    }

    /// Drops every record with the given identity and marks state stale.
    pub async fn record_removed(&self, operation: OperationId, id: RecordId) {
        let mut state = self.state.write().await;
        if state.detached {
            return;
        }

        state.in_flight.remove(&operation);
        state.records.retain(|record| record.record_id() != id);
        state.reload = true;
    }

    /// Records a failed operation.
    pub async fn record_failed(&self, operation: OperationId, message: impl Into<String>) {
        let mut state = self.state.write().await;
        if state.detached {
            return;
        }

        state.in_flight.remove(&operation);
        state.error = Some(message.into());
    }

    /// Marks local state stale so the next sync refetches.
    pub async fn trigger_reload(&self) {
        let mut state = self.state.write().await;
        if state.detached {
            return;
        }

        state.reload = true;
    }

    /// Clears the stale marker after a successful refetch.
    pub async fn reset_reload(&self) {
        let mut state = self.state.write().await;
        if state.detached {
            return;
        }

        state.reload = false;
    }

    /// Abandons the store: every later transition is ignored.
    ///
    /// In-flight operations are dropped so a late resolution cannot park
    /// the loading flag.
    pub async fn detach(&self) {
        let mut state = self.state.write().await;
        state.detached = true;
        state.in_flight.clear();
    }

    /// Returns true while any operation is in flight.
    pub async fn is_loading(&self) -> bool {
        !self.state.read().await.in_flight.is_empty()
    }

    /// Returns true when local state is stale and needs a refetch.
    pub async fn reload_requested(&self) -> bool {
        self.state.read().await.reload
    }

    /// Returns a point-in-time snapshot of the family state.
    pub async fn state(&self) -> EntityState<E> {
        let state = self.state.read().await;
        EntityState {
            records: state.records.clone(),
            current: state.current.clone(),
            loading: !state.in_flight.is_empty(),
            error: state.error.clone(),
            reload: state.reload,
        }
    }
}

impl<E> Default for EntityStore<E>
where
    E: Record + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore<ServiceOffering> {
    /// Removes one form from the offering that owns it, by position.
    ///
    /// Unknown offering ids and out-of-range positions are ignored. The
    /// stale marker is not set; the offering list itself is still accurate.
    pub async fn record_form_removed(&self, operation: OperationId, removal: FormRemoval) {
        let mut state = self.state.write().await;
        if state.detached {
            return;
        }

        state.in_flight.remove(&operation);
        if let Some(offering) = state
            .records
            .iter_mut()
            .find(|offering| offering.record_id() == removal.service_id)
        {
            let _ = offering.remove_form_at(removal.form_index);
        }
    }
}
