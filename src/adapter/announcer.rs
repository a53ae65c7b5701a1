use std::time::Duration;

use anyhow::{anyhow, Context};
use log::debug;
use reqwest::{blocking::Client, Url};
use serde::{Deserialize, Serialize};

use crate::model::SignedTransaction;
use crate::Result;

/// Errors reported while announcing a transaction.
#[derive(Debug, thiserror::Error)]
pub enum AnnounceError {
    /// The node url cannot be parsed.
    #[error("Invalid node url '{0}'.")]
    InvalidUrl(String),

    /// The node refused the transaction.
    #[error("Node rejected the transaction ({status}): {code}: {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },
}

/// What the node answered to an accepted announce.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnnounceResponse {
    pub message: String,
}

/// Transaction announcer trait.
///
/// Pushes signed transactions to a node. Implementations return once the node
/// accepted the payload, they do not wait for confirmation.
pub trait TransactionAnnouncer {
    fn announce(&self, url: &str, transaction: &SignedTransaction) -> Result<AnnounceResponse>;
}

#[derive(Serialize)]
struct AnnounceRequest<'a> {
    payload: &'a str,
}

#[derive(Deserialize)]
struct NodeError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Announcer talking to the REST gateway of a node.
#[derive(Debug, Clone)]
pub struct HttpTransactionAnnouncer {
    client: Client,
}

impl HttpTransactionAnnouncer {
    /// Default timeout of announce requests.
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .context("Cannot create the HTTP client.")?;

        Ok(Self { client })
    }

    /// Url of the transaction endpoint of the given node.
    fn endpoint(url: &str) -> Result<Url> {
        let base = Url::parse(&format!("{}/", url.trim().trim_end_matches('/')))
            .map_err(|_| anyhow!(AnnounceError::InvalidUrl(url.to_string())))?;

        base.join("transactions")
            .map_err(|_| anyhow!(AnnounceError::InvalidUrl(url.to_string())))
    }
}

impl TransactionAnnouncer for HttpTransactionAnnouncer {
    fn announce(&self, url: &str, transaction: &SignedTransaction) -> Result<AnnounceResponse> {
        let endpoint = Self::endpoint(url)?;
        debug!("Announcing transaction {} to '{}'.", transaction.hash, endpoint);

        let response = self
            .client
            .put(endpoint.clone())
            .json(&AnnounceRequest {
                payload: &transaction.payload,
            })
            .send()
            .with_context(|| format!("Cannot reach node '{}'.", endpoint))?;
        let status = response.status();
        let body = response
            .text()
            .with_context(|| format!("Cannot read the answer of node '{}'.", endpoint))?;

        if !status.is_success() {
            let (code, message) = match serde_json::from_str::<NodeError>(&body) {
                Ok(error) => (error.code, error.message),
                Err(_) => (
                    status.canonical_reason().unwrap_or("Unknown").to_string(),
                    body,
                ),
            };

            return Err(anyhow!(AnnounceError::Rejected {
                status: status.as_u16(),
                code,
                message,
            }));
        }

        Ok(serde_json::from_str(&body).unwrap_or(AnnounceResponse { message: body }))
    }
}
