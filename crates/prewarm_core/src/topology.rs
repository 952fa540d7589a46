use std::collections::HashSet;

use crate::contract::{ClusterDescriptor, ClusterMember};

/// First non-writer member whose identifier equals `source_identifier`.
pub fn select_reader_member<'a>(
    cluster: &'a ClusterDescriptor,
    source_identifier: &str,
) -> Option<&'a ClusterMember> {
    cluster
        .members
        .iter()
        .find(|member| member.instance_identifier == source_identifier && !member.is_writer)
}

pub fn writer_identifier(cluster: &ClusterDescriptor) -> Option<&str> {
    cluster
        .members
        .iter()
        .find(|member| member.is_writer)
        .map(|member| member.instance_identifier.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMembersUpdate {
    pub members: Vec<String>,
    pub changed: bool,
}

/// Set union of the observed static members and `new_member`.
///
/// Existing members keep their first-seen order and lose duplicates; the new
/// member is appended only when absent. `changed` is false when writing the
/// result back would be a no-op.
pub fn merge_static_members(existing: &[String], new_member: &str) -> StaticMembersUpdate {
    let mut seen = HashSet::with_capacity(existing.len() + 1);
    let mut members = Vec::with_capacity(existing.len() + 1);
    for member in existing {
        if seen.insert(member.as_str()) {
            members.push(member.clone());
        }
    }

    if !seen.contains(new_member) {
        members.push(new_member.to_string());
    }

    let changed = members.as_slice() != existing;
    StaticMembersUpdate { members, changed }
}
