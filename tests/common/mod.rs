#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use turkic::{ApiError, Config, MarketplaceApi, Params, Requester};

/// One captured capability call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub action: &'static str,
    pub params: Params,
}

/// In-memory marketplace that records calls and answers with canned replies.
#[derive(Clone, Default)]
pub struct RecordingApi {
    calls: Arc<Mutex<Vec<Call>>>,
    replies: Arc<Mutex<HashMap<&'static str, Value>>>,
}

impl RecordingApi {
    pub fn reply(self, action: &'static str, body: Value) -> Self {
        self.replies.lock().expect("lock poisoned").insert(action, body);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    pub fn actions(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|c| c.action).collect()
    }

    fn record(&self, action: &'static str, params: Params) -> Result<Value, ApiError> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(Call { action, params });
        Ok(self
            .replies
            .lock()
            .expect("lock poisoned")
            .get(action)
            .cloned()
            .unwrap_or_else(|| json!({})))
    }
}

#[async_trait]
impl MarketplaceApi for RecordingApi {
    async fn create_hit(&self, params: Params) -> Result<Value, ApiError> {
        self.record("CreateHIT", params)
    }

    async fn update_expiration_for_hit(&self, params: Params) -> Result<Value, ApiError> {
        self.record("UpdateExpirationForHIT", params)
    }

    async fn delete_hit(&self, params: Params) -> Result<Value, ApiError> {
        self.record("DeleteHIT", params)
    }

    async fn approve_assignment(&self, params: Params) -> Result<Value, ApiError> {
        self.record("ApproveAssignment", params)
    }

    async fn reject_assignment(&self, params: Params) -> Result<Value, ApiError> {
        self.record("RejectAssignment", params)
    }

    async fn send_bonus(&self, params: Params) -> Result<Value, ApiError> {
        self.record("SendBonus", params)
    }

    async fn create_worker_block(&self, params: Params) -> Result<Value, ApiError> {
        self.record("CreateWorkerBlock", params)
    }

    async fn delete_worker_block(&self, params: Params) -> Result<Value, ApiError> {
        self.record("DeleteWorkerBlock", params)
    }

    async fn notify_workers(&self, params: Params) -> Result<Value, ApiError> {
        self.record("NotifyWorkers", params)
    }

    async fn get_account_balance(&self) -> Result<Value, ApiError> {
        self.record("GetAccountBalance", Params::new())
    }
}

pub fn config() -> Config {
    Config::new("secret", "AKIDEXAMPLE", "https://tasks.example.com/", true)
}

pub fn requester(api: &RecordingApi) -> Requester<RecordingApi> {
    Requester::new(config(), api.clone())
}
