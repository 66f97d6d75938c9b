// src/services/api_client.rs
//! The only network boundary of the widget: JSON POSTs to `/api/lead`
//! and `/api/chat`. No retries here; resubmission is the UI's call.

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::api_base_for_host;
use crate::error::AppError;
use crate::message::{ApiEnvelope, ChatRequest, LeadPayload};

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base: base.into(),
        }
    }

    /// Backend root chosen from the page's host name, as the page does.
    pub fn for_host(host: &str) -> Self {
        Self::new(api_base_for_host(host))
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<ApiEnvelope, AppError> {
        let url = format!("{}{}", self.base, path);
        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        // The body may be empty or malformed even on error statuses; an
        // unreadable body reads as an empty envelope, not a parse failure.
        let envelope: ApiEnvelope = response.json().await.unwrap_or_default();

        if !status.is_success() || !envelope.ok {
            let message = envelope
                .error
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            warn!(%url, status = status.as_u16(), "backend rejected request: {message}");
            return Err(AppError::ServerRejected(message));
        }
        Ok(envelope)
    }

    pub async fn submit_lead(&self, payload: &LeadPayload) -> Result<(), AppError> {
        debug!(source = %payload.source, form = %payload.form_id, "submitting lead");
        self.post_json("/api/lead", payload).await?;
        Ok(())
    }

    /// One chat round trip. An `ok` response without text yields the same
    /// ellipsis the widget has always shown.
    pub async fn request_answer(&self, request: &ChatRequest) -> Result<String, AppError> {
        debug!(
            session = %request.session_id,
            history = request.meta.history.len(),
            "requesting chat answer"
        );
        let envelope = self.post_json("/api/chat", request).await?;
        Ok(envelope.answer.unwrap_or_else(|| "…".to_string()))
    }
}
