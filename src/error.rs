//! # Bridge Errors
//!
//! Failure taxonomy for bridged calls. None of these are fatal: the exported
//! entry points log them and return.

use thiserror::Error;

/// Why a dispatch did not reach the managed target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// No target object has been registered from the managed side.
    #[error("Not initialized")]
    NotInitialized,

    /// The calling thread could not be registered with the managed runtime.
    #[error("Can't attach current thread: {0}")]
    ThreadAttachFailed(String),

    /// The target's class or the requested method could not be resolved.
    #[error("Can't resolve {method}{signature} on target: {reason}")]
    MethodResolutionFailed {
        method: String,
        signature: String,
        reason: String,
    },
}

impl BridgeError {
    /// Build a resolution failure for the given method.
    pub fn resolution(method: &str, signature: &str, reason: impl Into<String>) -> Self {
        BridgeError::MethodResolutionFailed {
            method: method.to_string(),
            signature: signature.to_string(),
            reason: reason.into(),
        }
    }
}

/// Configuration parse errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}
