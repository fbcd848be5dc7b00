//! Grant and revoke entry points.
//!
//! A request is translated into a one-item policy in the category it acts on
//! (allow for grants, deny for revokes) and applied through the same
//! machinery as any other policy.

use std::collections::BTreeSet;

use tracing::debug;

use crate::apply::apply_policy;
use crate::types::{GrantRevokeRequest, ItemCategory, Policy, PolicyItem, PrincipalKind};

/// Grant the request's access types to its users and groups.
///
/// With `replace_existing_permissions`, the named principals are first
/// removed from the allow list so the grant replaces what they had there.
/// Returns true if the policy changed.
pub fn process_grant(policy: &mut Policy, request: &GrantRevokeRequest) -> bool {
    debug!(
        event = "Grant",
        phase = "Start",
        users = request.users.len(),
        groups = request.groups.len(),
        access_types = request.access_types.len(),
        delegate_admin = request.delegate_admin,
        replace = request.replace_existing_permissions
    );

    let mut changed = false;
    if request.replace_existing_permissions {
        changed = remove_from_allow(policy, &request.users, &request.groups);
    }

    let applied = applied_policy(request, ItemCategory::Allow);
    changed = apply_policy(policy, &applied) || changed;

    debug!(event = "Grant", phase = "Done", changed = changed);
    changed
}

/// Revoke the request's access types from its users and groups.
///
/// With `replace_existing_permissions`, the named principals are only
/// removed from the allow list and nothing else is applied. Otherwise the
/// request is applied as a deny, which strips the access types from the
/// principals' allows and records them as allow exceptions.
pub fn process_revoke(policy: &mut Policy, request: &GrantRevokeRequest) -> bool {
    debug!(
        event = "Revoke",
        phase = "Start",
        users = request.users.len(),
        groups = request.groups.len(),
        access_types = request.access_types.len(),
        delegate_admin = request.delegate_admin,
        replace = request.replace_existing_permissions
    );

    let changed = if request.replace_existing_permissions {
        remove_from_allow(policy, &request.users, &request.groups)
    } else {
        let applied = applied_policy(request, ItemCategory::Deny);
        apply_policy(policy, &applied)
    };

    debug!(event = "Revoke", phase = "Done", changed = changed);
    changed
}

/// A policy holding the request's item in `category` and nothing else.
pub fn applied_policy(request: &GrantRevokeRequest, category: ItemCategory) -> Policy {
    Policy::new().with_item(category, request.to_policy_item())
}

/// Remove `users` and `groups` from every allow item, dropping items left
/// with no principals. Deny and exception items are not touched.
///
/// Returns true if any principal or item was removed.
pub fn remove_from_allow(
    policy: &mut Policy,
    users: &BTreeSet<String>,
    groups: &BTreeSet<String>,
) -> bool {
    let mut changed = false;
    policy.allow.retain_mut(|item| {
        changed |= remove_principals(item, PrincipalKind::User, users);
        changed |= remove_principals(item, PrincipalKind::Group, groups);
        if item.has_principals() {
            true
        } else {
            changed = true;
            false
        }
    });

    debug!(
        event = "ReplacePermissions",
        phase = "Done",
        users = users.len(),
        groups = groups.len(),
        changed = changed
    );
    changed
}

fn remove_principals(item: &mut PolicyItem, kind: PrincipalKind, names: &BTreeSet<String>) -> bool {
    let principals = item.principals_mut(kind);
    let before = principals.len();
    principals.retain(|p| !names.contains(p));
    principals.len() != before
}
