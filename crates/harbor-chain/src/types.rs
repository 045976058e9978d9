use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Shared clock object passed to time-stamped move entry points.
pub const CLOCK_OBJECT_ID: &str = "0x6";

/// One move-call as the relay expects it.
#[derive(Debug, Clone, Serialize)]
pub struct MoveCall {
    pub package: String,
    pub module: String,
    pub function: String,
    pub arguments: Vec<Value>,
}

/// Relay verdict for a submitted transaction. Anything other than
/// `succeeded: true` is fatal to the request that triggered the call.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResult {
    pub succeeded: bool,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("relay transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("relay rejected {function}: {reason}")]
    Rejected { function: String, reason: String },
}
