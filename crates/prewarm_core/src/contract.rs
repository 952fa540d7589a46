use serde::{Deserialize, Serialize};

pub const RDS_EVENT_SOURCE: &str = "aws.rds";
pub const RDS_INSTANCE_EVENT_DETAIL_TYPE: &str = "RDS DB Instance Event";
pub const NEW_INSTANCE_EVENT_ID: &str = "RDS-EVENT-0005";
pub const DB_INSTANCE_SOURCE_TYPE: &str = "DB_INSTANCE";

/// EventBridge envelope delivered to the handler.
///
/// Every field defaults when absent so that any JSON object parses; the
/// relevance decision is left to [`crate::event_filter`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LifecycleEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(rename = "detail-type", default)]
    pub detail_type: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub detail: RdsInstanceEventDetail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RdsInstanceEventDetail {
    #[serde(rename = "EventCategories", default)]
    pub event_categories: Vec<String>,
    #[serde(rename = "SourceType", default)]
    pub source_type: String,
    #[serde(rename = "SourceArn", default)]
    pub source_arn: String,
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "SourceIdentifier", default)]
    pub source_identifier: String,
    #[serde(rename = "EventID", alias = "EventId", default)]
    pub event_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterDescriptor {
    pub cluster_identifier: String,
    pub members: Vec<ClusterMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterMember {
    pub instance_identifier: String,
    pub is_writer: bool,
}

/// Instance as reported by the control plane. `address` and `port` stay
/// `None` while the instance is still provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDescriptor {
    pub instance_identifier: String,
    pub address: Option<String>,
    pub port: Option<u16>,
}

impl InstanceDescriptor {
    pub fn network_endpoint(&self) -> Option<(&str, u16)> {
        match (self.address.as_deref(), self.port) {
            (Some(address), Some(port)) if !address.is_empty() => Some((address, port)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub endpoint_identifier: String,
    pub static_members: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Filtered,
    TopologyResolved,
    EndpointResolved,
    Authenticated,
    Prewarmed,
    MembershipUpdated,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Filtered => "filtered",
            Self::TopologyResolved => "topology_resolved",
            Self::EndpointResolved => "endpoint_resolved",
            Self::Authenticated => "authenticated",
            Self::Prewarmed => "prewarmed",
            Self::MembershipUpdated => "membership_updated",
        }
    }
}

/// Result of one invocation that did not fail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    Ignored {
        reason: String,
    },
    /// A precondition for `stage` was absent; nothing after it ran.
    Skipped {
        stage: PipelineStage,
        reason: String,
    },
    Completed {
        instance_identifier: String,
        relations_prewarmed: Vec<String>,
        static_members: Vec<String>,
        membership_changed: bool,
    },
}
