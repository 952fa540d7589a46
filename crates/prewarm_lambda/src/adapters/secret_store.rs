use async_trait::async_trait;

use crate::error::PrewarmError;

#[async_trait]
pub trait SecretStore: Send + Sync {
    /// String payload of the secret, or `None` when it only holds binary data.
    async fn get_secret_string(&self, secret_ref: &str) -> Result<Option<String>, PrewarmError>;
}
