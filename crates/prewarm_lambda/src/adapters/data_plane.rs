use std::time::Duration;

use async_trait::async_trait;
use prewarm_core::config::{DbSslMode, PrewarmMode};
use prewarm_core::credentials::Credential;

use crate::error::PrewarmError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub ssl_mode: DbSslMode,
    pub connect_timeout: Duration,
}

#[async_trait]
pub trait DataPlaneConnector: Send + Sync {
    async fn connect(
        &self,
        target: &ConnectionTarget,
        credential: &Credential,
    ) -> Result<Box<dyn PrewarmSession>, PrewarmError>;
}

/// One open database connection.
#[async_trait]
pub trait PrewarmSession: Send {
    /// Loads `relation` into the page cache; returns the number of blocks read.
    async fn prewarm(&mut self, relation: &str, mode: PrewarmMode) -> Result<i64, PrewarmError>;

    async fn close(self: Box<Self>) -> Result<(), PrewarmError>;
}
