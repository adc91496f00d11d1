//! HTTP admin backend. Implements AdminBackend over JSON procedure calls.
//!
//! Each procedure is `POST {base_url}/{procedure}` answering with the envelope
//! `{success, error?, data?}`. Transport problems are mapped into `RawFailure`
//! codes the classifier understands; nothing is retried here.

use crate::domain::{
    DomainError, Provider, ReassignOrderRequest, ReassignmentReceipt, ServiceType,
    SuspendCustomerRequest, SuspensionReceipt,
};
use crate::ports::{AdminBackend, RawFailure, RemoteResult, Reply};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Reply envelope shared by all procedures.
#[derive(Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    data: Option<T>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProvidersQuery {
    service_type: ServiceType,
}

/// Remote backend reached over HTTP.
pub struct HttpAdminBackend {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpAdminBackend {
    /// Create a backend client.
    ///
    /// # Arguments
    /// * `base_url` - Procedure root (e.g. "https://admin.example.com/api")
    /// * `api_token` - Optional bearer token
    /// * `timeout` - Per-request timeout; expiry surfaces as `deadline-exceeded`
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
        })
    }

    async fn call<B, T>(&self, procedure: &str, body: &B) -> RemoteResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, procedure);
        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_failure)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(procedure, status = %status, "admin backend returned error status");
            return Err(status_failure(
                status,
                text.chars().take(200).collect::<String>(),
            ));
        }

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            if e.is_timeout() {
                RawFailure::new("deadline-exceeded", e.to_string())
            } else {
                RawFailure::new("malformed-response", e.to_string())
            }
        })?;

        if !envelope.success {
            let message = envelope
                .error
                .unwrap_or_else(|| "operation declined".to_string());
            debug!(procedure, error = %message, "admin backend declined");
            return Ok(Reply::Declined(message));
        }

        envelope
            .data
            .map(Reply::Done)
            .ok_or_else(|| RawFailure::new("malformed-response", "success reply without data"))
    }
}

fn transport_failure(e: reqwest::Error) -> RawFailure {
    let code = if e.is_timeout() {
        "deadline-exceeded"
    } else if e.is_connect() {
        "unavailable"
    } else if e.is_request() {
        "network-error"
    } else {
        "transport"
    };
    RawFailure::new(code, e.to_string())
}

fn status_failure(status: StatusCode, body: String) -> RawFailure {
    let code = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "permission-denied".to_string(),
        StatusCode::SERVICE_UNAVAILABLE => "unavailable".to_string(),
        StatusCode::GATEWAY_TIMEOUT | StatusCode::REQUEST_TIMEOUT => {
            "deadline-exceeded".to_string()
        }
        other => format!("http-{}", other.as_u16()),
    };
    RawFailure::new(code, format!("HTTP {}: {}", status, body))
}

#[async_trait::async_trait]
impl AdminBackend for HttpAdminBackend {
    async fn available_providers(
        &self,
        service_type: ServiceType,
    ) -> RemoteResult<Vec<Provider>> {
        self.call("getAvailableProviders", &ProvidersQuery { service_type })
            .await
    }

    async fn reassign_order(
        &self,
        request: &ReassignOrderRequest,
    ) -> RemoteResult<ReassignmentReceipt> {
        self.call("reassignOrder", request).await
    }

    async fn suspend_customer(
        &self,
        request: &SuspendCustomerRequest,
    ) -> RemoteResult<SuspensionReceipt> {
        self.call("suspendCustomer", request).await
    }
}
