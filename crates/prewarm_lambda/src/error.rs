//! Invocation-level failures.
//!
//! Anything represented here fails the Lambda invocation so the platform's
//! redelivery and alerting can react. "Nothing to do" conditions are not
//! errors; they surface as `PipelineOutcome::Skipped`.

use prewarm_core::config::ConfigError;
use prewarm_core::credentials::CredentialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrewarmError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("control plane {operation} failed: {message}")]
    ControlPlane {
        operation: &'static str,
        message: String,
    },

    #[error("secret store lookup failed: {0}")]
    SecretStore(String),

    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("data plane {operation} failed: {message}")]
    DataPlane {
        operation: &'static str,
        message: String,
    },

    #[error(
        "instance '{instance_identifier}' missing from endpoint '{endpoint_identifier}' after update; a concurrent update likely overwrote it"
    )]
    MembershipNotPersisted {
        endpoint_identifier: String,
        instance_identifier: String,
    },

    #[error("invalid event payload: {0}")]
    InvalidEvent(#[from] serde_json::Error),
}

impl PrewarmError {
    pub fn control_plane(operation: &'static str, message: impl ToString) -> Self {
        Self::ControlPlane {
            operation,
            message: message.to_string(),
        }
    }

    pub fn data_plane(operation: &'static str, message: impl ToString) -> Self {
        Self::DataPlane {
            operation,
            message: message.to_string(),
        }
    }

    pub fn secret_store(message: impl ToString) -> Self {
        Self::SecretStore(message.to_string())
    }
}
