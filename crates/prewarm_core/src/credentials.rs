use std::fmt;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("secret '{secret_ref}' has no string value")]
    MissingSecretString { secret_ref: String },

    #[error("secret payload is not valid JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("secret payload field '{0}' is empty")]
    EmptyField(&'static str),
}

/// Database login decoded from the secret store. Held only for the lifetime
/// of one data-plane connection.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decodes an RDS-style secret string (`{"username": .., "password": .., ...}`).
/// Extra keys such as `engine` or `host` are ignored.
pub fn decode_secret_payload(payload: &str) -> Result<Credential, CredentialError> {
    let credential: Credential = serde_json::from_str(payload)?;

    if credential.username.trim().is_empty() {
        return Err(CredentialError::EmptyField("username"));
    }
    if credential.password.is_empty() {
        return Err(CredentialError::EmptyField("password"));
    }

    Ok(credential)
}
