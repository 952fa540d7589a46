use async_trait::async_trait;
use aws_sdk_secretsmanager::error::DisplayErrorContext;

use crate::adapters::secret_store::SecretStore;
use crate::error::PrewarmError;

#[derive(Debug, Clone)]
pub struct SecretsManagerStore {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManagerStore {
    pub fn new(client: aws_sdk_secretsmanager::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn get_secret_string(&self, secret_ref: &str) -> Result<Option<String>, PrewarmError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_ref)
            .send()
            .await
            .map_err(|error| PrewarmError::secret_store(DisplayErrorContext(&error)))?;

        Ok(output.secret_string().map(str::to_string))
    }
}
