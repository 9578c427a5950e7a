//! Task-lifecycle operations on the marketplace.

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::client::{MarketplaceApi, Params};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::hit::{money, NewHit};
use crate::operation::Operation;
use crate::response::{Field, FieldKind, Response};

/// Requester-side client: friendly methods over the marketplace capability.
#[derive(Debug, Clone)]
pub struct Requester<A> {
    config: Config,
    api: A,
}

impl<A: MarketplaceApi> Requester<A> {
    pub fn new(config: Config, api: A) -> Self {
        Self { config, api }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Sends one operation and wraps the reply.
    pub async fn request(&self, operation: Operation, params: Params) -> Result<Response> {
        info!("Request to MTurk: {}", operation);
        for (key, value) in &params {
            debug!("  {}: {}", key, value);
        }

        let api = &self.api;
        let data = match operation {
            Operation::CreateHit => api.create_hit(params).await?,
            Operation::DisableHit => {
                let mut expire = params.clone();
                expire.insert("ExpireAt".into(), json!(0));
                api.update_expiration_for_hit(expire).await?;
                api.delete_hit(params).await?
            }
            Operation::ApproveAssignment => api.approve_assignment(params).await?,
            Operation::RejectAssignment => api.reject_assignment(params).await?,
            Operation::GrantBonus => api.send_bonus(params).await?,
            Operation::BlockWorker => api.create_worker_block(params).await?,
            Operation::UnblockWorker => api.delete_worker_block(params).await?,
            Operation::NotifyWorkers => api.notify_workers(params).await?,
            Operation::GetAccountBalance => api.get_account_balance().await?,
        };

        Ok(Response::new(operation, data))
    }

    /// Publishes a task.
    ///
    /// The returned response has `task_id` and `task_type_id` stored.
    ///
    /// # Errors
    ///
    /// [`Error::Communication`] if the reply lacks either id.
    pub async fn create_hit(&self, hit: &NewHit) -> Result<Response> {
        let params = hit.to_params(self.config.localhost())?;
        let mut response = self.request(Operation::CreateHit, params).await?;
        response.store("HIT/HITId", "task_id", FieldKind::Text)?;
        response.store("HIT/HITTypeId", "task_type_id", FieldKind::Text)?;
        Ok(response)
    }

    /// Expires the task and removes it from the marketplace.
    pub async fn disable_hit(&self, hit_id: &str) -> Result<Response> {
        self.request(Operation::DisableHit, params([("HITId", json!(hit_id))]))
            .await
    }

    /// Approves the assignment and pays the worker.
    pub async fn approve_assignment(&self, assignment_id: &str, feedback: &str) -> Result<Response> {
        self.request(
            Operation::ApproveAssignment,
            params([
                ("AssignmentId", json!(assignment_id)),
                ("RequesterFeedback", json!(feedback)),
            ]),
        )
        .await
    }

    /// Rejects the assignment; the worker is not paid.
    pub async fn reject_assignment(&self, assignment_id: &str, feedback: &str) -> Result<Response> {
        self.request(
            Operation::RejectAssignment,
            params([
                ("AssignmentId", json!(assignment_id)),
                ("RequesterFeedback", json!(feedback)),
            ]),
        )
        .await
    }

    /// Pays a bonus on top of the assignment reward.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAmount`] for sub-cent amounts; nothing is sent.
    pub async fn grant_bonus(
        &self,
        worker_id: &str,
        assignment_id: &str,
        amount: f64,
        reason: &str,
    ) -> Result<Response> {
        self.request(
            Operation::GrantBonus,
            params([
                ("WorkerId", json!(worker_id)),
                ("AssignmentId", json!(assignment_id)),
                ("BonusAmount", json!(money(amount)?)),
                ("Reason", json!(reason)),
            ]),
        )
        .await
    }

    /// Blocks the worker from all of this requester's tasks.
    pub async fn block_worker(&self, worker_id: &str, reason: &str) -> Result<Response> {
        self.request(
            Operation::BlockWorker,
            params([("WorkerId", json!(worker_id)), ("Reason", json!(reason))]),
        )
        .await
    }

    pub async fn unblock_worker(&self, worker_id: &str, reason: &str) -> Result<Response> {
        self.request(
            Operation::UnblockWorker,
            params([("WorkerId", json!(worker_id)), ("Reason", json!(reason))]),
        )
        .await
    }

    /// Sends a message to a single worker.
    pub async fn notify_worker(
        &self,
        worker_id: &str,
        subject: &str,
        message: &str,
    ) -> Result<Response> {
        self.request(
            Operation::NotifyWorkers,
            params([
                ("Subject", json!(subject)),
                ("MessageText", json!(message)),
                ("WorkerIds", json!([worker_id])),
            ]),
        )
        .await
    }

    /// Available account balance in USD.
    ///
    /// # Errors
    ///
    /// [`Error::Communication`] if the reply has no `AvailableBalance`.
    pub async fn balance(&self) -> Result<f64> {
        let mut response = self
            .request(Operation::GetAccountBalance, Params::new())
            .await?;
        let amount = response.store("AvailableBalance", "amount", FieldKind::Float)?;
        Ok(amount.as_f64().unwrap_or_default())
    }

    /// Disables every task on the account.
    pub fn purge(&self) -> Result<()> {
        Err(Error::NotImplemented("purge"))
    }

    pub fn get_statistic(&self, _statistic: &str, _kind: &str, _period: &str) -> Result<Field> {
        Err(Error::NotImplemented("get_statistic"))
    }

    pub fn reward_payout(&self) -> Result<f64> {
        Err(Error::NotImplemented("reward_payout"))
    }

    pub fn approval_percentage(&self) -> Result<f64> {
        Err(Error::NotImplemented("approval_percentage"))
    }

    /// Fees paid to the marketplace.
    pub fn fee_payout(&self) -> Result<f64> {
        Err(Error::NotImplemented("fee_payout"))
    }

    /// Number of tasks created.
    pub fn created_count(&self) -> Result<u64> {
        Err(Error::NotImplemented("created_count"))
    }
}

fn params<const N: usize>(pairs: [(&str, Value); N]) -> Params {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
