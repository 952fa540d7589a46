use prewarm_core::topology::merge_static_members;
use tracing::info;

use crate::adapters::control_plane::ControlPlane;
use crate::error::PrewarmError;

const COMPONENT: &str = "endpoint_membership";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipOutcome {
    EndpointMissing,
    Unchanged { static_members: Vec<String> },
    Updated { static_members: Vec<String> },
}

/// Adds `instance_identifier` to the custom endpoint's static members.
///
/// RDS offers no conditional write for endpoint membership, so concurrent
/// invocations can still lose each other's additions between describe and
/// modify. The list is re-read after writing and a missing member fails the
/// invocation; redelivery then converges because the union is idempotent.
pub async fn add_static_member(
    control_plane: &dyn ControlPlane,
    cluster_identifier: &str,
    endpoint_identifier: &str,
    instance_identifier: &str,
) -> Result<MembershipOutcome, PrewarmError> {
    let Some(endpoint) = control_plane
        .describe_endpoint(cluster_identifier, endpoint_identifier)
        .await?
    else {
        return Ok(MembershipOutcome::EndpointMissing);
    };

    let update = merge_static_members(&endpoint.static_members, instance_identifier);
    if !update.changed {
        info!(
            component = COMPONENT,
            event = "static_members_unchanged",
            endpoint = endpoint_identifier,
            instance = instance_identifier
        );
        return Ok(MembershipOutcome::Unchanged {
            static_members: update.members,
        });
    }

    info!(
        component = COMPONENT,
        event = "static_members_updating",
        endpoint = endpoint_identifier,
        previous = ?endpoint.static_members,
        next = ?update.members
    );
    control_plane
        .modify_endpoint_static_members(endpoint_identifier, &update.members)
        .await?;

    let persisted = control_plane
        .describe_endpoint(cluster_identifier, endpoint_identifier)
        .await?
        .is_some_and(|current| {
            current
                .static_members
                .iter()
                .any(|member| member == instance_identifier)
        });
    if !persisted {
        return Err(PrewarmError::MembershipNotPersisted {
            endpoint_identifier: endpoint_identifier.to_string(),
            instance_identifier: instance_identifier.to_string(),
        });
    }

    Ok(MembershipOutcome::Updated {
        static_members: update.members,
    })
}
