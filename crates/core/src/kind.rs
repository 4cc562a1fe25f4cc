use serde::{Deserialize, Serialize};

/// Entity families served by the admin data layer.
///
/// The labels feed error messages and user-facing notices, so their
/// spelling is part of the observable contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Bookkeeping client records.
    Client,
    /// Service offerings with attached downloadable forms.
    Service,
    /// Tax calendar entries.
    TaxForm,
    /// A single form attached to a service offering.
    Form,
}

impl EntityKind {
    /// Returns the lower-case singular label.
    #[must_use]
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Service => "service",
            Self::TaxForm => "tax form",
            Self::Form => "form",
        }
    }

    /// Returns the lower-case plural label.
    #[must_use]
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Client => "clients",
            Self::Service => "services",
            Self::TaxForm => "tax forms",
            Self::Form => "forms",
        }
    }

    /// Returns the sentence-case label used in user-facing notices.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Service => "Service",
            Self::TaxForm => "Tax form",
            Self::Form => "Form",
        }
    }
}
