use async_trait::async_trait;
use aws_sdk_rds::error::DisplayErrorContext;
use prewarm_core::contract::{
    ClusterDescriptor, ClusterMember, EndpointDescriptor, InstanceDescriptor,
};

use crate::adapters::control_plane::ControlPlane;
use crate::error::PrewarmError;

/// [`ControlPlane`] backed by the RDS API.
#[derive(Debug, Clone)]
pub struct RdsControlPlane {
    client: aws_sdk_rds::Client,
}

impl RdsControlPlane {
    pub fn new(client: aws_sdk_rds::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ControlPlane for RdsControlPlane {
    async fn describe_cluster(
        &self,
        cluster_identifier: &str,
    ) -> Result<Option<ClusterDescriptor>, PrewarmError> {
        let output = match self
            .client
            .describe_db_clusters()
            .db_cluster_identifier(cluster_identifier)
            .send()
            .await
        {
            Ok(output) => output,
            Err(error)
                if error
                    .as_service_error()
                    .is_some_and(|service| service.is_db_cluster_not_found_fault()) =>
            {
                return Ok(None);
            }
            Err(error) => {
                return Err(PrewarmError::control_plane(
                    "DescribeDBClusters",
                    DisplayErrorContext(&error),
                ))
            }
        };

        Ok(output.db_clusters().first().map(|cluster| ClusterDescriptor {
            cluster_identifier: cluster
                .db_cluster_identifier()
                .unwrap_or(cluster_identifier)
                .to_string(),
            members: cluster
                .db_cluster_members()
                .iter()
                .filter_map(|member| {
                    Some(ClusterMember {
                        instance_identifier: member.db_instance_identifier()?.to_string(),
                        is_writer: member.is_cluster_writer().unwrap_or(false),
                    })
                })
                .collect(),
        }))
    }

    async fn describe_instance(
        &self,
        instance_identifier: &str,
    ) -> Result<Option<InstanceDescriptor>, PrewarmError> {
        let output = match self
            .client
            .describe_db_instances()
            .db_instance_identifier(instance_identifier)
            .send()
            .await
        {
            Ok(output) => output,
            Err(error)
                if error
                    .as_service_error()
                    .is_some_and(|service| service.is_db_instance_not_found_fault()) =>
            {
                return Ok(None);
            }
            Err(error) => {
                return Err(PrewarmError::control_plane(
                    "DescribeDBInstances",
                    DisplayErrorContext(&error),
                ))
            }
        };

        Ok(output.db_instances().first().map(|instance| {
            let endpoint = instance.endpoint();
            InstanceDescriptor {
                instance_identifier: instance
                    .db_instance_identifier()
                    .unwrap_or(instance_identifier)
                    .to_string(),
                address: endpoint
                    .and_then(|endpoint| endpoint.address())
                    .map(str::to_string),
                port: endpoint
                    .and_then(|endpoint| endpoint.port())
                    .and_then(|port| u16::try_from(port).ok()),
            }
        }))
    }

    async fn describe_endpoint(
        &self,
        cluster_identifier: &str,
        endpoint_identifier: &str,
    ) -> Result<Option<EndpointDescriptor>, PrewarmError> {
        let output = match self
            .client
            .describe_db_cluster_endpoints()
            .db_cluster_identifier(cluster_identifier)
            .db_cluster_endpoint_identifier(endpoint_identifier)
            .send()
            .await
        {
            Ok(output) => output,
            Err(error)
                if error
                    .as_service_error()
                    .is_some_and(|service| service.is_db_cluster_not_found_fault()) =>
            {
                return Ok(None);
            }
            Err(error) => {
                return Err(PrewarmError::control_plane(
                    "DescribeDBClusterEndpoints",
                    DisplayErrorContext(&error),
                ))
            }
        };

        Ok(output
            .db_cluster_endpoints()
            .iter()
            .find(|endpoint| {
                endpoint
                    .db_cluster_endpoint_identifier()
                    .is_some_and(|id| id.eq_ignore_ascii_case(endpoint_identifier))
            })
            .map(|endpoint| EndpointDescriptor {
                endpoint_identifier: endpoint_identifier.to_string(),
                static_members: endpoint.static_members().to_vec(),
            }))
    }

    async fn modify_endpoint_static_members(
        &self,
        endpoint_identifier: &str,
        static_members: &[String],
    ) -> Result<(), PrewarmError> {
        self.client
            .modify_db_cluster_endpoint()
            .db_cluster_endpoint_identifier(endpoint_identifier)
            .set_static_members(Some(static_members.to_vec()))
            .send()
            .await
            .map(|_| ())
            .map_err(|error| {
                PrewarmError::control_plane("ModifyDBClusterEndpoint", DisplayErrorContext(&error))
            })
    }
}
