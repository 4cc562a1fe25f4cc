//! Ledgerdesk data-layer probe.
//!
//! Runs a smoke pass over the entity services so a deployment (or a local
//! checkout with the in-memory backend) can be verified end to end from the
//! command line.

#![forbid(unsafe_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use ledgerdesk_application::{
    CatalogService, ClientService, EntityService, Notifier, TaxCalendarService,
};
use ledgerdesk_core::{AppError, AppResult};
use ledgerdesk_domain::{Client, ClientDraft, ServiceDraft, ServiceFormDraft, TaxFormDraft};
use ledgerdesk_infrastructure::{
    InMemoryClientsGateway, InMemoryServicesGateway, InMemoryTaxCalendarGateway,
    RestClientsGateway, RestGatewayConfig, RestServicesGateway, RestTaxCalendarGateway,
    TracingNotifier,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Rest,
    Memory,
}

#[derive(Debug, Clone)]
struct ProbeConfig {
    backend: Backend,
    api_base_url: Option<Url>,
    http_timeout_secs: u64,
}

impl ProbeConfig {
    fn load() -> AppResult<Self> {
        let backend = match env::var("LEDGERDESK_BACKEND") {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "rest" => Backend::Rest,
                "memory" => Backend::Memory,
                other => {
                    return Err(AppError::Validation(format!(
                        "invalid LEDGERDESK_BACKEND value '{other}': expected 'rest' or 'memory'"
                    )));
                }
            },
            Err(_) => Backend::Rest,
        };

        let api_base_url = match env::var("LEDGERDESK_API_URL") {
            Ok(value) => {
                let parsed = Url::parse(&value).map_err(|error| {
                    AppError::Validation(format!(
                        "invalid LEDGERDESK_API_URL value '{value}': {error}"
                    ))
                })?;
                Some(parsed)
            }
            Err(_) => None,
        };

        let http_timeout_secs = parse_env_u64("LEDGERDESK_HTTP_TIMEOUT_SECS", 15)?;
        if http_timeout_secs == 0 {
            return Err(AppError::Validation(
                "LEDGERDESK_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            backend,
            api_base_url,
            http_timeout_secs,
        })
    }
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|_| AppError::Validation(format!("invalid {name} value '{value}'"))),
        Err(_) => Ok(default),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ProbeConfig::load()?;
    match config.backend {
        Backend::Rest => probe_rest(&config).await,
        Backend::Memory => probe_memory().await,
    }
}

/// Checks that every family endpoint is reachable on the configured API.
async fn probe_rest(config: &ProbeConfig) -> AppResult<()> {
    let Some(base_url) = config.api_base_url.clone() else {
        return Err(AppError::Validation(
            "LEDGERDESK_API_URL must be set for the rest backend".to_owned(),
        ));
    };

    let mut gateway_config = RestGatewayConfig::new(base_url);
    gateway_config.timeout = Duration::from_secs(config.http_timeout_secs);
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier::new());

    info!(api_base_url = %gateway_config.base_url, "ledgerdesk probe started");

    let clients: ClientService = EntityService::new(Arc::new(RestClientsGateway::new(
        &gateway_config,
        notifier.clone(),
    )?));
    let catalog: CatalogService = EntityService::new(Arc::new(RestServicesGateway::new(
        &gateway_config,
        notifier.clone(),
    )?));
    let tax_calendar: TaxCalendarService = EntityService::new(Arc::new(
        RestTaxCalendarGateway::new(&gateway_config, notifier)?,
    ));

    clients.refresh().await?;
    info!(
        count = clients.store().state().await.records.len(),
        "clients endpoint reachable"
    );

    catalog.refresh().await?;
    info!(
        count = catalog.store().state().await.records.len(),
        "services endpoint reachable"
    );

    tax_calendar.refresh().await?;
    info!(
        count = tax_calendar.store().state().await.records.len(),
        "tax calendar endpoint reachable"
    );

    Ok(())
}

/// Runs a full create/update/delete/sync pass against in-memory gateways.
async fn probe_memory() -> AppResult<()> {
    info!("ledgerdesk probe started with the in-memory backend");

    let clients: ClientService = EntityService::new(Arc::new(InMemoryClientsGateway::new()));
    let added = clients
        .add(ClientDraft {
            name: "June Reyes".to_owned(),
            phone: "555-0147".to_owned(),
            address: "47 Harbor Row".to_owned(),
            business_type: "retail".to_owned(),
            business_name: "Reyes Trading".to_owned(),
            tin_id: "TIN-2291".to_owned(),
        })
        .await?;
    clients
        .update(Client::new(
            added.id(),
            "June Reyes-Cruz",
            added.phone().as_str(),
            added.address().as_str(),
            added.business_type().as_str(),
            added.business_name().as_str(),
            added.tin_id().as_str(),
        )?)
        .await?;
    clients.remove(added.id()).await?;
    let refetched = clients.sync().await?;
    info!(refetched, "client roundtrip complete");

    let catalog: CatalogService = EntityService::new(Arc::new(InMemoryServicesGateway::new()));
    let offering = catalog
        .add(ServiceDraft {
            name: "Tax Filing".to_owned(),
            forms: vec![ServiceFormDraft {
                name: "Registration".to_owned(),
                price: "25".to_owned(),
                description: "Initial registration form".to_owned(),
                upload: None,
            }],
        })
        .await?;
    catalog.rename(offering.id(), "Tax Filing & Advisory").await?;
    catalog.remove_form(offering.id(), 0).await?;
    catalog.remove_with_forms(offering.id()).await?;
    let refetched = catalog.sync().await?;
    info!(refetched, "service roundtrip complete");

    let tax_calendar: TaxCalendarService =
        EntityService::new(Arc::new(InMemoryTaxCalendarGateway::new()));
    let entry = tax_calendar
        .add(TaxFormDraft {
            form_no: "1701Q".to_owned(),
            latest_revision_date: date(2024, 1, 15)?,
            form_name: "Quarterly Income Tax Return".to_owned(),
            due_date: date(2026, 4, 15)?,
        })
        .await?;
    tax_calendar.remove(entry.id()).await?;
    let refetched = tax_calendar.sync().await?;
    info!(refetched, "tax calendar roundtrip complete");

    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::Validation(format!("invalid date {year}-{month:02}-{day:02}")))
}
