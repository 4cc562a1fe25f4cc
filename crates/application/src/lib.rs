//! Application services and ports for the admin data layer.

#![forbid(unsafe_code)]

mod entity_service;
mod entity_store;
mod gateway;
mod notifier;

pub use entity_service::{CatalogService, ClientService, EntityService, TaxCalendarService};
pub use entity_store::{EntityState, EntityStore, OperationId};
pub use gateway::{ClientGateway, EntityGateway, ServiceCatalogGateway, TaxCalendarGateway};
pub use notifier::{Notice, NoticeLevel, Notifier};
