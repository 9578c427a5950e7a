//! Configuration for talking to the marketplace.

use anyhow::{Context, Result};
use std::env;
use std::fmt;

const SANDBOX_ENDPOINT: &str = "https://mturk-requester-sandbox.us-east-1.amazonaws.com";
const PRODUCTION_ENDPOINT: &str = "https://mturk-requester.us-east-1.amazonaws.com";

/// Access key pair used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Requester configuration. Immutable once built.
#[derive(Debug, Clone)]
pub struct Config {
    /// Signing key pair
    credentials: Credentials,

    /// Base URL that hosts the task pages shown to workers
    localhost: String,

    /// Target the sandbox instead of production
    sandbox: bool,
}

impl Config {
    pub fn new(signature: &str, access_key: &str, localhost: &str, sandbox: bool) -> Self {
        Self {
            credentials: Credentials {
                access_key: access_key.to_string(),
                secret_key: signature.to_string(),
            },
            localhost: localhost.trim_end_matches('/').to_string(),
            sandbox,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let signature = env::var("TURKIC_SIGNATURE")
            .context("TURKIC_SIGNATURE environment variable not set")?;

        let access_key = env::var("TURKIC_ACCESS_KEY")
            .context("TURKIC_ACCESS_KEY environment variable not set")?;

        let localhost = env::var("TURKIC_LOCALHOST")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let sandbox = match env::var("TURKIC_SANDBOX") {
            Ok(raw) => parse_flag(&raw)
                .with_context(|| format!("TURKIC_SANDBOX is not a boolean: {raw:?}"))?,
            Err(_) => false,
        };

        Ok(Self::new(&signature, &access_key, &localhost, sandbox))
    }

    pub fn localhost(&self) -> &str {
        &self.localhost
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    /// The requester API endpoint selected by the sandbox flag.
    pub fn endpoint(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_ENDPOINT
        } else {
            PRODUCTION_ENDPOINT
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
