#![allow(dead_code)]

pub mod fakes;

use std::time::Duration;

use prewarm_core::config::{DbSslMode, PrewarmConfig, PrewarmMode};
use prewarm_core::contract::{
    ClusterDescriptor, ClusterMember, InstanceDescriptor, LifecycleEvent, RdsInstanceEventDetail,
    DB_INSTANCE_SOURCE_TYPE, NEW_INSTANCE_EVENT_ID, RDS_EVENT_SOURCE,
    RDS_INSTANCE_EVENT_DETAIL_TYPE,
};

pub const CLUSTER: &str = "db1";
pub const ENDPOINT: &str = "ro-endpoint";
pub const SECRET_REF: &str = "arn:aws:secretsmanager:eu-west-1:123456789012:secret:db1-prewarmer";

pub fn config(relations: &[&str]) -> PrewarmConfig {
    PrewarmConfig {
        cluster_identifier: CLUSTER.to_string(),
        relations: relations.iter().map(|value| value.to_string()).collect(),
        endpoint_identifier: ENDPOINT.to_string(),
        secret_ref: SECRET_REF.to_string(),
        database_name: "app".to_string(),
        prewarm_mode: PrewarmMode::Buffer,
        ssl_mode: DbSslMode::Require,
        connect_timeout: Duration::from_secs(5),
    }
}

/// `db1` with `writer-a` as writer and `reader-b` as reader.
pub fn two_member_cluster() -> ClusterDescriptor {
    ClusterDescriptor {
        cluster_identifier: CLUSTER.to_string(),
        members: vec![
            ClusterMember {
                instance_identifier: "writer-a".to_string(),
                is_writer: true,
            },
            ClusterMember {
                instance_identifier: "reader-b".to_string(),
                is_writer: false,
            },
        ],
    }
}

pub fn ready_instance(instance_identifier: &str) -> InstanceDescriptor {
    InstanceDescriptor {
        instance_identifier: instance_identifier.to_string(),
        address: Some(format!("{instance_identifier}.abc123.eu-west-1.rds.amazonaws.com")),
        port: Some(5432),
    }
}

pub fn new_instance_event(source_identifier: &str) -> LifecycleEvent {
    LifecycleEvent {
        id: "68f6e973-1a0c-d37b-f2f2-94a7f62ffd4e".to_string(),
        source: RDS_EVENT_SOURCE.to_string(),
        detail_type: RDS_INSTANCE_EVENT_DETAIL_TYPE.to_string(),
        time: "2026-10-17T12:00:00Z".to_string(),
        detail: RdsInstanceEventDetail {
            event_categories: vec!["creation".to_string()],
            source_type: DB_INSTANCE_SOURCE_TYPE.to_string(),
            source_identifier: source_identifier.to_string(),
            event_id: NEW_INSTANCE_EVENT_ID.to_string(),
            message: "DB instance created".to_string(),
            ..RdsInstanceEventDetail::default()
        },
        ..LifecycleEvent::default()
    }
}

pub const VALID_SECRET: &str = r#"{"engine":"postgres","username":"prewarmer","password":"s3cret"}"#;
