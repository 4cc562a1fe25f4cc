//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_gateway;
mod notices;
mod rest_gateway;
mod tracing_notifier;

pub use in_memory_gateway::{
    InMemoryClientsGateway, InMemoryGateway, InMemoryServicesGateway, InMemoryTaxCalendarGateway,
};
pub use rest_gateway::{
    RestClientsGateway, RestGatewayConfig, RestServicesGateway, RestTaxCalendarGateway,
};
pub use tracing_notifier::TracingNotifier;
