use std::sync::Arc;

use async_trait::async_trait;
use ledgerdesk_application::{EntityGateway, Notifier, ServiceCatalogGateway};
use ledgerdesk_core::{AppError, AppResult, EntityKind, RecordId};
use ledgerdesk_domain::{FormRemoval, ServiceDraft, ServiceFormDraft, ServiceOffering, ServiceUpdate};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tracing::debug;

use crate::notices;

use super::{RestGatewayConfig, RestTransport};

const COLLECTION: &str = "/api/services";
const KIND: EntityKind = EntityKind::Service;

#[derive(Debug, Serialize)]
struct RenamePayload<'a> {
    service: &'a str,
}

/// REST gateway serving service offerings and their forms.
pub struct RestServicesGateway {
    transport: RestTransport,
}

impl RestServicesGateway {
    /// Creates a gateway against the configured API origin.
    pub fn new(config: &RestGatewayConfig, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        Ok(Self {
            transport: RestTransport::new(config, notifier)?,
        })
    }
}

/// Encodes form drafts as the nested multipart fields the API expects:
/// `forms[i][name]`, `forms[i][file]`, `forms[i][price]`,
/// `forms[i][description]`, with an empty text `file` field when the draft
/// carries no upload.
fn append_form_fields(mut form: Form, drafts: Vec<ServiceFormDraft>) -> AppResult<Form> {
    for (index, draft) in drafts.into_iter().enumerate() {
        form = form.text(format!("forms[{index}][name]"), draft.name);
        form = match draft.upload {
            Some(upload) => {
                let part = Part::bytes(upload.bytes)
                    .file_name(upload.file_name)
                    .mime_str(upload.content_type.as_str())
                    .map_err(|error| {
                        AppError::Validation(format!(
                            "invalid content type for form upload: {error}"
                        ))
                    })?;
                form.part(format!("forms[{index}][file]"), part)
            }
            None => form.text(format!("forms[{index}][file]"), String::new()),
        };
        form = form.text(format!("forms[{index}][price]"), draft.price);
        form = form.text(format!("forms[{index}][description]"), draft.description);
    }

    Ok(form)
}

fn draft_submission(draft: ServiceDraft) -> AppResult<Form> {
    let form = Form::new().text("service", draft.name);
    append_form_fields(form, draft.forms)
}

fn update_submission(update: ServiceUpdate) -> AppResult<Form> {
    let form = Form::new()
        .text("service_id", update.service_id.to_string())
        .text("service_name", update.service_name);
    append_form_fields(form, update.forms)
}

#[async_trait]
impl EntityGateway for RestServicesGateway {
    type Entity = ServiceOffering;
    type Draft = ServiceDraft;
    type Update = ServiceUpdate;

    async fn fetch_all(&self) -> AppResult<Vec<ServiceOffering>> {
        let request = self.transport.get(COLLECTION);
        match self.transport.read_json::<Vec<ServiceOffering>>(request).await {
            Ok(offerings) => {
                debug!(count = offerings.len(), "fetched services");
                Ok(offerings)
            }
            Err(detail) => Err(self.transport.report_failure(
                notices::fetch_many_failed(KIND),
                AppError::FetchFailed { kind: KIND, detail },
            )),
        }
    }

    async fn fetch_one(&self, id: RecordId) -> AppResult<ServiceOffering> {
        let request = self.transport.get(&format!("{COLLECTION}/{id}"));
        match self.transport.read_json::<ServiceOffering>(request).await {
            Ok(offering) => Ok(offering),
            Err(detail) => Err(self.transport.report_failure(
                notices::fetch_one_failed(KIND),
                AppError::FetchFailed { kind: KIND, detail },
            )),
        }
    }

    async fn add(&self, draft: ServiceDraft) -> AppResult<ServiceOffering> {
        let submission = match draft_submission(draft) {
            Ok(submission) => submission,
            Err(error) => {
                return Err(self.transport.report_failure(
                    notices::add_failed(KIND),
                    AppError::AddFailed {
                        kind: KIND,
                        detail: error.to_string(),
                    },
                ));
            }
        };

        let request = self.transport.post(COLLECTION).multipart(submission);
        match self.transport.read_json::<ServiceOffering>(request).await {
            Ok(offering) => {
                self.transport.report_success(notices::added(KIND));
                Ok(offering)
            }
            Err(detail) => Err(self.transport.report_failure(
                notices::add_failed(KIND),
                AppError::AddFailed { kind: KIND, detail },
            )),
        }
    }

    async fn update(&self, update: ServiceUpdate) -> AppResult<ServiceOffering> {
        let service_id = update.service_id;
        let submission = match update_submission(update) {
            Ok(submission) => submission,
            Err(error) => {
                return Err(self.transport.report_failure(
                    notices::update_failed(KIND),
                    AppError::UpdateFailed {
                        kind: KIND,
                        detail: error.to_string(),
                    },
                ));
            }
        };

        // Full updates are POSTed to the item endpoint; PUT is reserved for
        // the JSON rename payload.
        let request = self
            .transport
            .post(&format!("{COLLECTION}/{service_id}"))
            .multipart(submission);
        match self.transport.read_json::<ServiceOffering>(request).await {
            Ok(offering) => {
                self.transport.report_success(notices::updated(KIND));
                Ok(offering)
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

#[async_trait]
impl ServiceCatalogGateway for RestServicesGateway {
    async fn update_name(&self, service_id: RecordId, name: String) -> AppResult<ServiceOffering> {
        let request = self
            .transport
            .put(&format!("{COLLECTION}/{service_id}"))
            .json(&RenamePayload {
                service: name.as_str(),
            });
        match self.transport.read_json::<ServiceOffering>(request).await {
            Ok(offering) => {
                self.transport
                    .report_success(notices::SERVICE_NAME_UPDATED.to_owned());
                Ok(offering)
            }
            Err(detail) => Err(self.transport.report_failure(
                notices::SERVICE_NAME_UPDATE_FAILED.to_owned(),
                AppError::UpdateFailed { kind: KIND, detail },
            )),
        }
    }

    async fn delete_form(&self, service_id: RecordId, form_index: usize) -> AppResult<FormRemoval> {
        let request = self
            .transport
            .delete(&format!("{COLLECTION}/{service_id}/forms/{form_index}"));
        match self.transport.expect_success(request).await {
            Ok(_) => {
                self.transport
                    .report_success(notices::deleted(EntityKind::Form));
                Ok(FormRemoval {
                    service_id,
                    form_index,
                })
            }
            Err(detail) => Err(self.transport.report_failure(
                notices::delete_failed(EntityKind::Form),
                AppError::DeleteFailed {
                    kind: EntityKind::Form,
                    detail,
                },
            )),
        }
    }

    async fn delete_with_forms(&self, service_id: RecordId) -> AppResult<RecordId> {
        let request = self.transport.delete(&format!("{COLLECTION}/{service_id}"));
        match self.transport.expect_success(request).await {
            Ok(_) => {
                self.transport
                    .report_success(notices::SERVICE_WITH_FORMS_DELETED.to_owned());
                Ok(service_id)
            }
            Err(detail) => Err(self.transport.report_failure(
                notices::delete_failed(KIND),
                AppError::DeleteFailed { kind: KIND, detail },
            )),
        }
    }
}
