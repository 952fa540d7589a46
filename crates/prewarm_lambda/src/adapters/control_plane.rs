use async_trait::async_trait;
use prewarm_core::contract::{ClusterDescriptor, EndpointDescriptor, InstanceDescriptor};

use crate::error::PrewarmError;

/// Cluster control-plane operations the pipeline depends on.
///
/// Lookups return `Ok(None)` when the resource does not exist; transport and
/// authorization failures are errors.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn describe_cluster(
        &self,
        cluster_identifier: &str,
    ) -> Result<Option<ClusterDescriptor>, PrewarmError>;

    async fn describe_instance(
        &self,
        instance_identifier: &str,
    ) -> Result<Option<InstanceDescriptor>, PrewarmError>;

    async fn describe_endpoint(
        &self,
        cluster_identifier: &str,
        endpoint_identifier: &str,
    ) -> Result<Option<EndpointDescriptor>, PrewarmError>;

    /// Replaces the endpoint's static member list with `static_members`.
    async fn modify_endpoint_static_members(
        &self,
        endpoint_identifier: &str,
        static_members: &[String],
    ) -> Result<(), PrewarmError>;
}
