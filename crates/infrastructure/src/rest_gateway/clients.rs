use std::sync::Arc;

use async_trait::async_trait;
use ledgerdesk_application::{EntityGateway, Notifier};
use ledgerdesk_core::{AppError, AppResult, EntityKind, RecordId};
use ledgerdesk_domain::{Client, ClientDraft};
use tracing::debug;

use crate::notices;

use super::{RestGatewayConfig, RestTransport};

const COLLECTION: &str = "/api/clients";
const KIND: EntityKind = EntityKind::Client;

/// REST gateway serving bookkeeping client records.
pub struct RestClientsGateway {
    transport: RestTransport,
}

impl RestClientsGateway {
    /// Creates a gateway against the configured API origin.
    pub fn new(config: &RestGatewayConfig, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        Ok(Self {
            transport: RestTransport::new(config, notifier)?,
        })
    }
}

#[async_trait]
impl EntityGateway for RestClientsGateway {
    type Entity = Client;
    type Draft = ClientDraft;
    type Update = Client;

    async fn fetch_all(&self) -> AppResult<Vec<Client>> {
        let request = self.transport.get(COLLECTION);
        match self.transport.read_json::<Vec<Client>>(request).await {
            Ok(clients) => {
                debug!(count = clients.len(), "fetched clients");
                Ok(clients)
            }
            Err(detail) => Err(self.transport.report_failure(
                notices::fetch_many_failed(KIND),
                AppError::FetchFailed { kind: KIND, detail },
            )),
        }
    }

    async fn fetch_one(&self, id: RecordId) -> AppResult<Client> {
        let request = self.transport.get(&format!("{COLLECTION}/{id}"));
        match self.transport.read_json::<Client>(request).await {
            Ok(client) => Ok(client),
            Err(detail) => Err(self.transport.report_failure(
                notices::fetch_one_failed(KIND),
                AppError::FetchFailed { kind: KIND, detail },
            )),
        }
    }

    async fn add(&self, draft: ClientDraft) -> AppResult<Client> {
        let request = self.transport.post(COLLECTION).json(&draft);
        match self.transport.read_json::<Client>(request).await {
            Ok(client) => {
                self.transport.report_success(notices::added(KIND));
                Ok(client)
            }
            Err(detail) => Err(self.transport.report_failure(
                notices::add_failed(KIND),
                AppError::AddFailed { kind: KIND, detail },
            )),
        }
    }

    async fn update(&self, update: Client) -> AppResult<Client> {
        let request = self
            .transport
            .put(&format!("{COLLECTION}/{}", update.id()))
            .json(&update);
        match self.transport.read_json::<Client>(request).await {
            Ok(client) => {
                self.transport.report_success(notices::updated(KIND));
                Ok(client)
            }
            Err(detail) => Err(self.transport.report_failure(
                notices::update_failed(KIND),
                AppError::UpdateFailed { kind: KIND, detail },
            )),
        }
    }

    async fn delete(&self, id: RecordId) -> AppResult<RecordId> {
        let request = self.transport.delete(&format!("{COLLECTION}/{id}"));
        match self.transport.expect_success(request).await {
            Ok(_) => {
                self.transport.report_success(notices::deleted(KIND));
                Ok(id)
            }
            Err(detail) => Err(self.transport.report_failure(
                notices::delete_failed(KIND),
                AppError::DeleteFailed { kind: KIND, detail },
            )),
        }
    }
}
