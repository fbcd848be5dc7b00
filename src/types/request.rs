//! Grant and revoke request type.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::access::ItemAccess;
use super::policy_item::PolicyItem;

/// An instruction to grant or revoke access types for a set of users and
/// groups. The same shape serves both directions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GrantRevokeRequest {
    pub users: BTreeSet<String>,
    pub groups: BTreeSet<String>,
    pub access_types: BTreeSet<String>,
    pub delegate_admin: bool,
    /// Purge the named principals from the allow list before applying.
    pub replace_existing_permissions: bool,
}

impl GrantRevokeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users.extend(users.into_iter().map(Into::into));
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn with_access_types<I, S>(mut self, access_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.access_types
            .extend(access_types.into_iter().map(Into::into));
        self
    }

    pub fn with_delegate_admin(mut self, delegate_admin: bool) -> Self {
        self.delegate_admin = delegate_admin;
        self
    }

    pub fn with_replace_existing_permissions(mut self, replace: bool) -> Self {
        self.replace_existing_permissions = replace;
        self
    }

    /// The single policy item this request asks to apply: every named
    /// principal, one allowed access per access type, and the delegate-admin
    /// flag.
    pub fn to_policy_item(&self) -> PolicyItem {
        PolicyItem {
            users: self.users.iter().cloned().collect(),
            groups: self.groups.iter().cloned().collect(),
            accesses: self
                .access_types
                .iter()
                .map(|t| ItemAccess::allowed(t.as_str()))
                .collect(),
            delegate_admin: self.delegate_admin,
            conditions: Vec::new(),
        }
    }
}
