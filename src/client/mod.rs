//! Capability interface to the marketplace requester API.
//!
//! Every method mirrors one vendor action and takes the vendor's parameter
//! names verbatim. Transport, signing and throttling live behind this trait.

mod http;

pub use http::{Builder, HttpApi, Signer, Unsigned};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

/// Parameters for one vendor action, keyed by the vendor's field names.
pub type Params = Map<String, Value>;

/// Errors reported by a [`MarketplaceApi`] implementation.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The marketplace answered with a non-success status.
    #[error("marketplace rejected request ({status}): {code}: {message}")]
    Service {
        status: StatusCode,
        code: String,
        message: String,
    },

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to sign request: {0}")]
    Signing(String),
}

/// Vendor actions the requester relies on.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    async fn create_hit(&self, params: Params) -> Result<Value, ApiError>;

    async fn update_expiration_for_hit(&self, params: Params) -> Result<Value, ApiError>;

    async fn delete_hit(&self, params: Params) -> Result<Value, ApiError>;

    async fn approve_assignment(&self, params: Params) -> Result<Value, ApiError>;

    async fn reject_assignment(&self, params: Params) -> Result<Value, ApiError>;

    async fn send_bonus(&self, params: Params) -> Result<Value, ApiError>;

    async fn create_worker_block(&self, params: Params) -> Result<Value, ApiError>;

    async fn delete_worker_block(&self, params: Params) -> Result<Value, ApiError>;

    async fn notify_workers(&self, params: Params) -> Result<Value, ApiError>;

    async fn get_account_balance(&self) -> Result<Value, ApiError>;
}
