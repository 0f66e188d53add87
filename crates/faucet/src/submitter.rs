//! Claim submission against the faucet backend
//!
//! One POST per attempt, no retries. The backend's loosely-shaped JSON reply
//! is decoded into a tagged union at this boundary instead of being probed
//! optimistically for fields.

use serde::Serialize;
use sokushuu_chain::{Address, ChainId};
use tracing::{info, warn};

/// Message shown when the transport fails or the reply is unusable.
pub const SERVER_ERROR_MESSAGE: &str = "Something is wrong with the server, please try again";

/// One claim attempt: target chain and recipient.
#[derive(Debug, Clone)]
pub struct ClaimRequest {
    pub chain: ChainId,
    pub address: Address,
}

/// Outcome of one claim attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimResult {
    Success { tx_hash: String },
    Failure { message: String },
}

/// Decoded shape of the backend reply.
#[derive(Debug, PartialEq, Eq)]
enum BackendReply {
    /// `ok == true` with a transaction hash
    Accepted { tx_hash: String },
    /// A JSON object that is not an acceptance (`ok: false`, missing hash)
    Rejected { message: String },
    /// Anything that is not a JSON object
    Malformed,
}

fn decode_reply(value: &serde_json::Value) -> BackendReply {
    let ok = value.get("ok").and_then(serde_json::Value::as_bool);
    let hash = value.get("hash").and_then(serde_json::Value::as_str);

    if ok == Some(true) {
        if let Some(hash) = hash {
            return BackendReply::Accepted {
                tx_hash: hash.to_string(),
            };
        }
    }

    if value.is_object() {
        let message = value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string());
        return BackendReply::Rejected { message };
    }

    BackendReply::Malformed
}

#[derive(Serialize)]
struct ClaimBody<'a> {
    address: &'a str,
}

/// Issues claim requests to the faucet backend.
///
/// Callers are expected to validate the address first; the submitter trusts
/// its input and reports whatever the backend decides.
pub struct ClaimSubmitter {
    backend_base_uri: String,
    client: reqwest::Client,
}

impl ClaimSubmitter {
    pub fn new(backend_base_uri: impl Into<String>) -> Self {
        Self {
            backend_base_uri: backend_base_uri.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Submit one claim. Atomic from the caller's perspective: every path,
    /// including transport failure, settles as a [`ClaimResult`].
    pub async fn submit(&self, request: &ClaimRequest) -> ClaimResult {
        let uri = format!(
            "{}/faucet/{}",
            self.backend_base_uri.trim_end_matches('/'),
            request.chain
        );
        info!("Submitting claim for {} to {}", request.address, uri);

        let response = self
            .client
            .post(&uri)
            .json(&ClaimBody {
                address: request.address.as_str(),
            })
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!("Claim request failed: {}", e);
                return ClaimResult::Failure {
                    message: SERVER_ERROR_MESSAGE.to_string(),
                };
            }
        };

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Claim response was not JSON: {}", e);
                return ClaimResult::Failure {
                    message: SERVER_ERROR_MESSAGE.to_string(),
                };
            }
        };

        match decode_reply(&body) {
            BackendReply::Accepted { tx_hash } => {
                info!("Claim accepted, tx hash {}", tx_hash);
                ClaimResult::Success { tx_hash }
            }
            BackendReply::Rejected { message } => {
                info!("Claim rejected: {}", message);
                ClaimResult::Failure { message }
            }
            BackendReply::Malformed => {
                warn!("Claim response had an unexpected shape: {}", body);
                ClaimResult::Failure {
                    message: SERVER_ERROR_MESSAGE.to_string(),
                }
            }
        }
    }
}
