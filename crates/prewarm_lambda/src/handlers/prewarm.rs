use prewarm_core::config::PrewarmMode;
use prewarm_core::credentials::Credential;
use tracing::{info, warn};

use crate::adapters::data_plane::{ConnectionTarget, DataPlaneConnector, PrewarmSession};
use crate::error::PrewarmError;

const COMPONENT: &str = "prewarm_executor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrewarmedRelation {
    pub relation: String,
    pub blocks: i64,
}

/// Prewarms `relations` in order over a single connection.
///
/// The first failing relation aborts the rest. The session is closed on every
/// path out of the loop.
pub async fn prewarm_relations(
    connector: &dyn DataPlaneConnector,
    target: &ConnectionTarget,
    credential: &Credential,
    relations: &[String],
    mode: PrewarmMode,
) -> Result<Vec<PrewarmedRelation>, PrewarmError> {
    let mut session = connector.connect(target, credential).await?;
    info!(
        component = COMPONENT,
        event = "connected",
        host = %target.host,
        port = target.port,
        database = %target.database
    );

    let result = prewarm_each(&mut *session, relations, mode).await;

    if let Err(close_error) = session.close().await {
        warn!(
            component = COMPONENT,
            event = "close_failed",
            error = %close_error
        );
    }

    result
}

async fn prewarm_each(
    session: &mut dyn PrewarmSession,
    relations: &[String],
    mode: PrewarmMode,
) -> Result<Vec<PrewarmedRelation>, PrewarmError> {
    let mut prewarmed = Vec::with_capacity(relations.len());
    for relation in relations {
        let blocks = session.prewarm(relation, mode).await?;
        info!(
            component = COMPONENT,
            event = "relation_prewarmed",
            relation = %relation,
            mode = mode.as_str(),
            blocks
        );
        prewarmed.push(PrewarmedRelation {
            relation: relation.clone(),
            blocks,
        });
    }

    Ok(prewarmed)
}
