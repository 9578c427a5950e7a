//! Requester-side client for the Mechanical Turk crowdsourcing marketplace.
//!
//! [`Requester`] maps task-lifecycle calls (publish, disable, approve,
//! reject, bonus, block, notify, balance) onto a [`MarketplaceApi`]
//! capability and returns [`Response`]s from which reply fields can be
//! extracted by path.
//!
//! ```no_run
//! use turkic::{Config, HttpApi, NewHit, Requester, Unsigned};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let api = HttpApi::from_config(&config, Unsigned)?;
//! let requester = Requester::new(config, api);
//!
//! let hit = NewHit::new("Label images", "Draw boxes", "?id=7", 0.05, 3600, 86400)
//!     .min_approval_percent(95);
//! let response = requester.create_hit(&hit).await?;
//! println!("created {:?}", response.task_id());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod hit;
pub mod operation;
pub mod requester;
pub mod response;

pub use client::{ApiError, HttpApi, MarketplaceApi, Params, Signer, Unsigned};
pub use config::{Config, Credentials};
pub use error::{CommunicationError, Error, Result};
pub use hit::{NewHit, QualificationRequirement};
pub use operation::Operation;
pub use requester::Requester;
pub use response::{find, Field, FieldKind, Response};
