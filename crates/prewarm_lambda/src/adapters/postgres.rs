//! Postgres data plane for `pg_prewarm`.
//!
//! One plain connection per invocation; there is no pool because the handler
//! issues a short, strictly sequential burst of statements against a replica
//! that changes with every event.

use async_trait::async_trait;
use prewarm_core::config::{DbSslMode, PrewarmMode};
use prewarm_core::credentials::Credential;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use sqlx::Connection;

use crate::adapters::data_plane::{ConnectionTarget, DataPlaneConnector, PrewarmSession};
use crate::error::PrewarmError;

pub const APPLICATION_NAME: &str = "aurora-replica-prewarmer";

/// Relation name and mode are bound parameters; the relation is resolved by
/// the server through the regclass cast.
const PREWARM_SQL: &str = "SELECT pg_prewarm($1::text::regclass, $2)";

#[derive(Debug, Default, Clone, Copy)]
pub struct PgDataPlane;

#[async_trait]
impl DataPlaneConnector for PgDataPlane {
    async fn connect(
        &self,
        target: &ConnectionTarget,
        credential: &Credential,
    ) -> Result<Box<dyn PrewarmSession>, PrewarmError> {
        let options = connect_options(target, credential);
        let connection =
            tokio::time::timeout(target.connect_timeout, PgConnection::connect_with(&options))
                .await
                .map_err(|_| {
                    PrewarmError::data_plane(
                        "connect",
                        format!(
                            "timed out after {}s connecting to {}:{}",
                            target.connect_timeout.as_secs(),
                            target.host,
                            target.port
                        ),
                    )
                })?
                .map_err(|error| PrewarmError::data_plane("connect", error))?;

        Ok(Box::new(PgPrewarmSession { connection }))
    }
}

struct PgPrewarmSession {
    connection: PgConnection,
}

#[async_trait]
impl PrewarmSession for PgPrewarmSession {
    async fn prewarm(&mut self, relation: &str, mode: PrewarmMode) -> Result<i64, PrewarmError> {
        sqlx::query_scalar::<_, i64>(PREWARM_SQL)
            .bind(relation)
            .bind(mode.as_str())
            .fetch_one(&mut self.connection)
            .await
            .map_err(|error| PrewarmError::data_plane("pg_prewarm", error))
    }

    async fn close(self: Box<Self>) -> Result<(), PrewarmError> {
        self.connection
            .close()
            .await
            .map_err(|error| PrewarmError::data_plane("close", error))
    }
}

fn connect_options(target: &ConnectionTarget, credential: &Credential) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&target.host)
        .port(target.port)
        .database(&target.database)
        .username(&credential.username)
        .password(&credential.password)
        .ssl_mode(pg_ssl_mode(target.ssl_mode))
        .application_name(APPLICATION_NAME)
}

fn pg_ssl_mode(mode: DbSslMode) -> PgSslMode {
    match mode {
        DbSslMode::Disable => PgSslMode::Disable,
        DbSslMode::Prefer => PgSslMode::Prefer,
        DbSslMode::Require => PgSslMode::Require,
        DbSslMode::VerifyCa => PgSslMode::VerifyCa,
        DbSslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}
