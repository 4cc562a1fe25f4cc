//! Canonical copy for user-facing notices.
//!
//! Message spelling is part of the observable contract; keep changes here
//! in step with the gateway contract tests.

use ledgerdesk_core::EntityKind;

pub(crate) fn fetch_many_failed(kind: EntityKind) -> String {
    format!("Failed to fetch {}", kind.plural())
}

pub(crate) fn fetch_one_failed(kind: EntityKind) -> String {
    format!("Failed to fetch {}", kind.singular())
}

pub(crate) fn added(kind: EntityKind) -> String {
    format!("{} added successfully!", kind.title())
}

pub(crate) fn add_failed(kind: EntityKind) -> String {
    format!("Failed to add {}", kind.singular())
}

pub(crate) fn updated(kind: EntityKind) -> String {
    format!("{} updated successfully!", kind.title())
}

pub(crate) fn update_failed(kind: EntityKind) -> String {
    format!("Failed to update {}", kind.singular())
}

pub(crate) fn deleted(kind: EntityKind) -> String {
    format!("{} deleted successfully!", kind.title())
}

pub(crate) fn delete_failed(kind: EntityKind) -> String {
    format!("Failed to delete {}", kind.singular())
}

pub(crate) const SERVICE_NAME_UPDATED: &str = "Service name updated successfully!";
pub(crate) const SERVICE_NAME_UPDATE_FAILED: &str = "Failed to update service name";
pub(crate) const SERVICE_WITH_FORMS_DELETED: &str = "Service and its forms deleted successfully!";
