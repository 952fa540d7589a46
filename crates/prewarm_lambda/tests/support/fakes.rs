use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use prewarm_core::config::PrewarmMode;
use prewarm_core::contract::{ClusterDescriptor, EndpointDescriptor, InstanceDescriptor};
use prewarm_core::credentials::Credential;
use prewarm_lambda::adapters::control_plane::ControlPlane;
use prewarm_lambda::adapters::data_plane::{
    ConnectionTarget, DataPlaneConnector, PrewarmSession,
};
use prewarm_lambda::adapters::secret_store::SecretStore;
use prewarm_lambda::error::PrewarmError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlPlaneCall {
    DescribeCluster(String),
    DescribeInstance(String),
    DescribeEndpoint(String),
    ModifyEndpoint(String, Vec<String>),
}

/// In-memory control plane that records every call.
#[derive(Default)]
pub struct FakeControlPlane {
    clusters: HashMap<String, ClusterDescriptor>,
    instances: HashMap<String, InstanceDescriptor>,
    endpoints: Mutex<HashMap<String, Vec<String>>>,
    calls: Mutex<Vec<ControlPlaneCall>>,
    fail_describe_cluster: bool,
    /// Simulates a concurrent writer whose update lands right after ours.
    overwrite_after_modify: Option<Vec<String>>,
}

impl FakeControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, cluster: ClusterDescriptor) -> Self {
        self.clusters
            .insert(cluster.cluster_identifier.clone(), cluster);
        self
    }

    pub fn with_instance(mut self, instance: InstanceDescriptor) -> Self {
        self.instances
            .insert(instance.instance_identifier.clone(), instance);
        self
    }

    pub fn with_endpoint(self, endpoint_identifier: &str, static_members: &[&str]) -> Self {
        self.endpoints.lock().expect("poisoned mutex").insert(
            endpoint_identifier.to_string(),
            static_members.iter().map(|value| value.to_string()).collect(),
        );
        self
    }

    pub fn failing_describe_cluster(mut self) -> Self {
        self.fail_describe_cluster = true;
        self
    }

    pub fn overwritten_after_modify(mut self, static_members: &[&str]) -> Self {
        self.overwrite_after_modify =
            Some(static_members.iter().map(|value| value.to_string()).collect());
        self
    }

    pub fn calls(&self) -> Vec<ControlPlaneCall> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub fn modify_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ControlPlaneCall::ModifyEndpoint(_, members) => Some(members),
                _ => None,
            })
            .collect()
    }

    pub fn static_members(&self, endpoint_identifier: &str) -> Option<Vec<String>> {
        self.endpoints
            .lock()
            .expect("poisoned mutex")
            .get(endpoint_identifier)
            .cloned()
    }

    fn record(&self, call: ControlPlaneCall) {
        self.calls.lock().expect("poisoned mutex").push(call);
    }
}

#[async_trait]
impl ControlPlane for FakeControlPlane {
    async fn describe_cluster(
        &self,
        cluster_identifier: &str,
    ) -> Result<Option<ClusterDescriptor>, PrewarmError> {
        self.record(ControlPlaneCall::DescribeCluster(
            cluster_identifier.to_string(),
        ));
        if self.fail_describe_cluster {
            return Err(PrewarmError::control_plane(
                "DescribeDBClusters",
                "service unavailable",
            ));
        }
        Ok(self.clusters.get(cluster_identifier).cloned())
    }

    async fn describe_instance(
        &self,
        instance_identifier: &str,
    ) -> Result<Option<InstanceDescriptor>, PrewarmError> {
        self.record(ControlPlaneCall::DescribeInstance(
            instance_identifier.to_string(),
        ));
        Ok(self.instances.get(instance_identifier).cloned())
    }

    async fn describe_endpoint(
        &self,
        _cluster_identifier: &str,
        endpoint_identifier: &str,
    ) -> Result<Option<EndpointDescriptor>, PrewarmError> {
        self.record(ControlPlaneCall::DescribeEndpoint(
            endpoint_identifier.to_string(),
        ));
        Ok(self
            .static_members(endpoint_identifier)
            .map(|static_members| EndpointDescriptor {
                endpoint_identifier: endpoint_identifier.to_string(),
                static_members,
            }))
    }

    async fn modify_endpoint_static_members(
        &self,
        endpoint_identifier: &str,
        static_members: &[String],
    ) -> Result<(), PrewarmError> {
        self.record(ControlPlaneCall::ModifyEndpoint(
            endpoint_identifier.to_string(),
            static_members.to_vec(),
        ));
        let stored = self
            .overwrite_after_modify
            .clone()
            .unwrap_or_else(|| static_members.to_vec());
        self.endpoints
            .lock()
            .expect("poisoned mutex")
            .insert(endpoint_identifier.to_string(), stored);
        Ok(())
    }
}

pub struct FakeSecretStore {
    payload: Option<String>,
    lookups: Mutex<Vec<String>>,
}

impl FakeSecretStore {
    pub fn with_payload(payload: &str) -> Self {
        Self {
            payload: Some(payload.to_string()),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn binary_only() -> Self {
        Self {
            payload: None,
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().expect("poisoned mutex").clone()
    }
}

#[async_trait]
impl SecretStore for FakeSecretStore {
    async fn get_secret_string(&self, secret_ref: &str) -> Result<Option<String>, PrewarmError> {
        self.lookups
            .lock()
            .expect("poisoned mutex")
            .push(secret_ref.to_string());
        Ok(self.payload.clone())
    }
}

#[derive(Debug, Default)]
pub struct DataPlaneLog {
    pub connections: Vec<(ConnectionTarget, String)>,
    pub commands: Vec<(String, PrewarmMode)>,
    pub closed: usize,
}

/// Data plane that records connections and `pg_prewarm` calls.
#[derive(Default)]
pub struct RecordingDataPlane {
    log: Arc<Mutex<DataPlaneLog>>,
    failing_relation: Option<String>,
}

impl RecordingDataPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(relation: &str) -> Self {
        Self {
            log: Arc::default(),
            failing_relation: Some(relation.to_string()),
        }
    }

    pub fn connection_count(&self) -> usize {
        self.log.lock().expect("poisoned mutex").connections.len()
    }

    pub fn connected_host(&self) -> Option<String> {
        self.log
            .lock()
            .expect("poisoned mutex")
            .connections
            .first()
            .map(|(target, _)| target.host.clone())
    }

    pub fn connected_user(&self) -> Option<String> {
        self.log
            .lock()
            .expect("poisoned mutex")
            .connections
            .first()
            .map(|(_, username)| username.clone())
    }

    pub fn commands(&self) -> Vec<String> {
        self.log
            .lock()
            .expect("poisoned mutex")
            .commands
            .iter()
            .map(|(relation, _)| relation.clone())
            .collect()
    }

    pub fn closed(&self) -> usize {
        self.log.lock().expect("poisoned mutex").closed
    }
}

struct RecordingSession {
    log: Arc<Mutex<DataPlaneLog>>,
    failing_relation: Option<String>,
}

#[async_trait]
impl DataPlaneConnector for RecordingDataPlane {
    async fn connect(
        &self,
        target: &ConnectionTarget,
        credential: &Credential,
    ) -> Result<Box<dyn PrewarmSession>, PrewarmError> {
        self.log
            .lock()
            .expect("poisoned mutex")
            .connections
            .push((target.clone(), credential.username.clone()));
        Ok(Box::new(RecordingSession {
            log: Arc::clone(&self.log),
            failing_relation: self.failing_relation.clone(),
        }))
    }
}

#[async_trait]
impl PrewarmSession for RecordingSession {
    async fn prewarm(&mut self, relation: &str, mode: PrewarmMode) -> Result<i64, PrewarmError> {
        self.log
            .lock()
            .expect("poisoned mutex")
            .commands
            .push((relation.to_string(), mode));
        if self.failing_relation.as_deref() == Some(relation) {
            return Err(PrewarmError::data_plane(
                "pg_prewarm",
                format!("relation \"{relation}\" does not exist"),
            ));
        }
        Ok(64)
    }

    async fn close(self: Box<Self>) -> Result<(), PrewarmError> {
        self.log.lock().expect("poisoned mutex").closed += 1;
        Ok(())
    }
}
