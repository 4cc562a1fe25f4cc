//! Domain entities and invariants for the Ledgerdesk admin data layer.

#![forbid(unsafe_code)]

mod client;
mod record;
mod service;
mod tax_form;

pub use client::{Client, ClientDraft};
pub use record::{DraftRecord, Record, RecordPatch};
pub use service::{
    FormRemoval, FormUpload, ServiceDraft, ServiceForm, ServiceFormDraft, ServiceOffering,
    ServiceUpdate,
};
pub use tax_form::{TaxForm, TaxFormDraft};
