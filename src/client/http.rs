//! HTTP implementation of [`MarketplaceApi`] over the vendor's JSON 1.1 protocol.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Request};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{ApiError, MarketplaceApi, Params};
use crate::config::{Config, Credentials};

const TARGET_PREFIX: &str = "MTurkRequesterServiceV20170117";
const JSON_1_1: &str = "application/x-amz-json-1.1";

/// Attaches authentication to an outgoing request.
///
/// The marketplace expects requests signed with the requester's key pair.
/// Signing is supplied by the caller.
pub trait Signer: Send + Sync {
    fn sign(&self, credentials: &Credentials, request: &mut Request) -> Result<(), ApiError>;
}

/// Sends requests as-is. Useful against local mocks or a signing proxy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsigned;

impl Signer for Unsigned {
    fn sign(&self, _credentials: &Credentials, _request: &mut Request) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Error body returned by the marketplace on failure.
#[derive(Debug, Deserialize)]
struct ServiceFault {
    #[serde(rename = "__type", default)]
    kind: String,
    #[serde(rename = "Message", alias = "message", default)]
    message: String,
}

/// Builds an [`HttpApi`] with a custom HTTP client.
pub struct Builder<S> {
    endpoint: String,
    credentials: Credentials,
    signer: S,
    client: Option<Client>,
}

impl<S: Signer> Builder<S> {
    /// Sets a custom [`reqwest::Client`].
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Creates the `HttpApi`.
    ///
    /// # Errors
    ///
    /// Fails if the default HTTP client cannot be constructed.
    pub fn build(self) -> Result<HttpApi<S>, ApiError> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(Duration::from_secs(60))
                .connect_timeout(Duration::from_secs(10))
                .build()?,
        };

        Ok(HttpApi {
            client,
            endpoint: self.endpoint.trim_end_matches('/').to_string(),
            credentials: self.credentials,
            signer: self.signer,
        })
    }
}

/// Marketplace client speaking HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi<S> {
    client: Client,
    endpoint: String,
    credentials: Credentials,
    signer: S,
}

impl<S: Signer> HttpApi<S> {
    pub fn builder(endpoint: &str, credentials: Credentials, signer: S) -> Builder<S> {
        Builder {
            endpoint: endpoint.to_string(),
            credentials,
            signer,
            client: None,
        }
    }

    /// Targets the endpoint and credentials held by `config`.
    pub fn from_config(config: &Config, signer: S) -> Result<Self, ApiError> {
        Self::builder(config.endpoint(), config.credentials().clone(), signer).build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn invoke(&self, action: &str, params: &Params) -> Result<Value, ApiError> {
        let target = format!("{TARGET_PREFIX}.{action}");
        let mut request = self
            .client
            .post(format!("{}/", self.endpoint))
            .header(CONTENT_TYPE, JSON_1_1)
            .header("X-Amz-Target", &target)
            .body(serde_json::to_vec(params)?)
            .build()?;

        self.signer.sign(&self.credentials, &mut request)?;

        debug!("POST {} ({})", self.endpoint, target);
        let response = self.client.execute(request).await?;
        let status = response.status();
        debug!("{} answered {}", action, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let fault: Option<ServiceFault> = serde_json::from_str(&body).ok();
            let (code, message) = match fault {
                Some(fault) => (
                    fault.kind.rsplit('#').next().unwrap_or_default().to_string(),
                    fault.message,
                ),
                None => (String::new(), body),
            };
            return Err(ApiError::Service {
                status,
                code,
                message,
            });
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(Value::Object(Params::new()));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl<S: Signer> MarketplaceApi for HttpApi<S> {
    async fn create_hit(&self, params: Params) -> Result<Value, ApiError> {
        self.invoke("CreateHIT", &params).await
    }

    async fn update_expiration_for_hit(&self, params: Params) -> Result<Value, ApiError> {
        self.invoke("UpdateExpirationForHIT", &params).await
    }

    async fn delete_hit(&self, params: Params) -> Result<Value, ApiError> {
        self.invoke("DeleteHIT", &params).await
    }

    async fn approve_assignment(&self, params: Params) -> Result<Value, ApiError> {
        self.invoke("ApproveAssignment", &params).await
    }

    async fn reject_assignment(&self, params: Params) -> Result<Value, ApiError> {
        self.invoke("RejectAssignment", &params).await
    }

    async fn send_bonus(&self, params: Params) -> Result<Value, ApiError> {
        self.invoke("SendBonus", &params).await
    }

    async fn create_worker_block(&self, params: Params) -> Result<Value, ApiError> {
        self.invoke("CreateWorkerBlock", &params).await
    }

    async fn delete_worker_block(&self, params: Params) -> Result<Value, ApiError> {
        self.invoke("DeleteWorkerBlock", &params).await
    }

    async fn notify_workers(&self, params: Params) -> Result<Value, ApiError> {
        self.invoke("NotifyWorkers", &params).await
    }

    async fn get_account_balance(&self) -> Result<Value, ApiError> {
        self.invoke("GetAccountBalance", &Params::new()).await
    }
}
