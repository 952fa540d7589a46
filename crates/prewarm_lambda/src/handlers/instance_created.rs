use chrono::{DateTime, Utc};
use prewarm_core::config::PrewarmConfig;
use prewarm_core::contract::{LifecycleEvent, PipelineOutcome, PipelineStage};
use prewarm_core::credentials::{decode_secret_payload, Credential, CredentialError};
use prewarm_core::event_filter::relevant_source_identifier;
use prewarm_core::topology::{select_reader_member, writer_identifier};
use serde_json::Value;
use tracing::{error, info};

use crate::adapters::control_plane::ControlPlane;
use crate::adapters::data_plane::{ConnectionTarget, DataPlaneConnector};
use crate::adapters::secret_store::SecretStore;
use crate::error::PrewarmError;
use crate::handlers::membership::{add_static_member, MembershipOutcome};
use crate::handlers::prewarm::prewarm_relations;

const COMPONENT: &str = "instance_created_handler";

/// Reconciles one "new DB instance" lifecycle event: prewarm the replica,
/// then register it on the custom endpoint.
pub struct InstanceCreatedHandler<'a> {
    config: &'a PrewarmConfig,
    control_plane: &'a dyn ControlPlane,
    secret_store: &'a dyn SecretStore,
    data_plane: &'a dyn DataPlaneConnector,
}

impl<'a> InstanceCreatedHandler<'a> {
    pub fn new(
        config: &'a PrewarmConfig,
        control_plane: &'a dyn ControlPlane,
        secret_store: &'a dyn SecretStore,
        data_plane: &'a dyn DataPlaneConnector,
    ) -> Self {
        Self {
            config,
            control_plane,
            secret_store,
            data_plane,
        }
    }

    pub async fn handle_payload(&self, payload: Value) -> Result<PipelineOutcome, PrewarmError> {
        if !payload.is_object() {
            return Err(PrewarmError::InvalidEvent(serde::de::Error::custom(
                "event payload must be a JSON object",
            )));
        }
        let event: LifecycleEvent = serde_json::from_value(payload)?;

        match self.reconcile(&event).await {
            Ok(outcome) => Ok(outcome),
            Err(failure) => {
                error!(
                    component = COMPONENT,
                    event = "reconcile_failed",
                    event_id = %event.id,
                    source_identifier = %event.detail.source_identifier,
                    error = %failure
                );
                Err(failure)
            }
        }
    }

    pub async fn reconcile(&self, event: &LifecycleEvent) -> Result<PipelineOutcome, PrewarmError> {
        let source_identifier = match relevant_source_identifier(event) {
            Ok(value) => value,
            Err(reason) => {
                info!(
                    component = COMPONENT,
                    event = "event_ignored",
                    event_id = %event.id,
                    reason = %reason
                );
                return Ok(PipelineOutcome::Ignored {
                    reason: reason.to_string(),
                });
            }
        };
        info!(
            component = COMPONENT,
            event = "reconcile_started",
            event_id = %event.id,
            source_identifier,
            cluster = %self.config.cluster_identifier,
            event_lag_ms = ?event_lag_ms(event)
        );

        let Some(cluster) = self
            .control_plane
            .describe_cluster(&self.config.cluster_identifier)
            .await?
        else {
            return Ok(skipped(
                PipelineStage::TopologyResolved,
                format!("cluster '{}' not found", self.config.cluster_identifier),
            ));
        };

        let Some(member) = select_reader_member(&cluster, source_identifier) else {
            let reason = if writer_identifier(&cluster) == Some(source_identifier) {
                format!(
                    "instance '{source_identifier}' is the writer of cluster '{}'",
                    cluster.cluster_identifier
                )
            } else {
                format!(
                    "instance '{source_identifier}' is not a reader of cluster '{}'",
                    cluster.cluster_identifier
                )
            };
            return Ok(skipped(PipelineStage::TopologyResolved, reason));
        };
        let instance_identifier = member.instance_identifier.clone();

        let Some(instance) = self
            .control_plane
            .describe_instance(&instance_identifier)
            .await?
        else {
            return Ok(skipped(
                PipelineStage::EndpointResolved,
                format!("instance '{instance_identifier}' not found"),
            ));
        };
        let Some((host, port)) = instance.network_endpoint() else {
            return Ok(skipped(
                PipelineStage::EndpointResolved,
                format!("instance '{instance_identifier}' has no endpoint yet"),
            ));
        };
        let target = ConnectionTarget {
            host: host.to_string(),
            port,
            database: self.config.database_name.clone(),
            ssl_mode: self.config.ssl_mode,
            connect_timeout: self.config.connect_timeout,
        };

        let credential = self.fetch_credential().await?;
        let prewarmed = prewarm_relations(
            self.data_plane,
            &target,
            &credential,
            &self.config.relations,
            self.config.prewarm_mode,
        )
        .await?;
        drop(credential);
        info!(
            component = COMPONENT,
            event = "prewarm_completed",
            instance = %instance_identifier,
            relations = prewarmed.len(),
            blocks = prewarmed.iter().map(|relation| relation.blocks).sum::<i64>()
        );

        let (static_members, membership_changed) = match add_static_member(
            self.control_plane,
            &self.config.cluster_identifier,
            &self.config.endpoint_identifier,
            &instance_identifier,
        )
        .await?
        {
            MembershipOutcome::EndpointMissing => {
                return Ok(skipped(
                    PipelineStage::MembershipUpdated,
                    format!(
                        "custom endpoint '{}' not found",
                        self.config.endpoint_identifier
                    ),
                ));
            }
            MembershipOutcome::Unchanged { static_members } => (static_members, false),
            MembershipOutcome::Updated { static_members } => (static_members, true),
        };

        info!(
            component = COMPONENT,
            event = "reconcile_completed",
            instance = %instance_identifier,
            endpoint = %self.config.endpoint_identifier,
            membership_changed
        );
        Ok(PipelineOutcome::Completed {
            instance_identifier,
            relations_prewarmed: prewarmed
                .into_iter()
                .map(|relation| relation.relation)
                .collect(),
            static_members,
            membership_changed,
        })
    }

    async fn fetch_credential(&self) -> Result<Credential, PrewarmError> {
        let payload = self
            .secret_store
            .get_secret_string(&self.config.secret_ref)
            .await?
            .ok_or_else(|| CredentialError::MissingSecretString {
                secret_ref: self.config.secret_ref.clone(),
            })?;

        Ok(decode_secret_payload(&payload)?)
    }
}

fn skipped(stage: PipelineStage, reason: String) -> PipelineOutcome {
    info!(
        component = COMPONENT,
        event = "stage_skipped",
        stage = stage.as_str(),
        reason = %reason
    );
    PipelineOutcome::Skipped { stage, reason }
}

fn event_lag_ms(event: &LifecycleEvent) -> Option<i64> {
    DateTime::parse_from_rfc3339(&event.time)
        .ok()
        .map(|time| (Utc::now() - time.with_timezone(&Utc)).num_milliseconds())
}
