//! A single permission grant attached to a set of users and groups.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display as StrumDisplay};
use utoipa::ToSchema;

use super::access::{ItemAccess, ItemCondition};

/// Items with more conditions than this are never merged with other items.
pub const MAX_MERGEABLE_CONDITIONS: usize = 1;

/// Rendered in place of an access type for delegate-admin signatures.
pub const DELEGATE_ADMIN_MARKER: &str = "delegateAdmin";

/// The two kinds of principal a policy item can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum PrincipalKind {
    User,
    Group,
}

impl PrincipalKind {
    pub const ALL: [PrincipalKind; 2] = [PrincipalKind::User, PrincipalKind::Group];
}

/// Permissions granted to a set of principals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyItem {
    pub users: Vec<String>,
    pub groups: Vec<String>,
    pub accesses: Vec<ItemAccess>,
    pub delegate_admin: bool,
    pub conditions: Vec<ItemCondition>,
}

/// The part of an item that decides whether two items can be merged: the
/// set of access-type names plus the delegate-admin flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessSignature {
    access_types: BTreeSet<String>,
    delegate_admin: bool,
}

impl Display for AccessSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let marker = self.delegate_admin.then_some(DELEGATE_ADMIN_MARKER);
        write!(
            f,
            "{}",
            self.access_types.iter().map(String::as_str).chain(marker).join(",")
        )
    }
}

impl PolicyItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty item naming only `name`.
    pub fn for_principal(kind: PrincipalKind, name: &str) -> Self {
        let mut item = PolicyItem::new();
        item.principals_mut(kind).push(name.to_string());
        item
    }

    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for user in users {
            self.add_principal(PrincipalKind::User, user.as_ref());
        }
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for group in groups {
            self.add_principal(PrincipalKind::Group, group.as_ref());
        }
        self
    }

    /// Add an allowed access for each of `access_types`.
    pub fn with_accesses<I, S>(mut self, access_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accesses: Vec<ItemAccess> = access_types
            .into_iter()
            .map(|t| ItemAccess::allowed(t.as_ref()))
            .collect();
        self.add_accesses(&accesses);
        self
    }

    pub fn with_delegate_admin(mut self, delegate_admin: bool) -> Self {
        self.delegate_admin = delegate_admin;
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<ItemCondition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn principals(&self, kind: PrincipalKind) -> &[String] {
        match kind {
            PrincipalKind::User => &self.users,
            PrincipalKind::Group => &self.groups,
        }
    }

    pub fn principals_mut(&mut self, kind: PrincipalKind) -> &mut Vec<String> {
        match kind {
            PrincipalKind::User => &mut self.users,
            PrincipalKind::Group => &mut self.groups,
        }
    }

    pub fn contains_principal(&self, kind: PrincipalKind, name: &str) -> bool {
        self.principals(kind).iter().any(|p| p == name)
    }

    /// Add a principal unless already present. Returns true if it was added.
    pub fn add_principal(&mut self, kind: PrincipalKind, name: &str) -> bool {
        if self.contains_principal(kind, name) {
            return false;
        }
        self.principals_mut(kind).push(name.to_string());
        true
    }

    /// Remove every occurrence of a principal. Returns true if any was removed.
    pub fn remove_principal(&mut self, kind: PrincipalKind, name: &str) -> bool {
        let principals = self.principals_mut(kind);
        let before = principals.len();
        principals.retain(|p| p != name);
        principals.len() != before
    }

    pub fn has_principals(&self) -> bool {
        !self.users.is_empty() || !self.groups.is_empty()
    }

    pub fn has_permissions(&self) -> bool {
        !self.accesses.is_empty() || self.delegate_admin
    }

    /// An item that names nobody or grants nothing.
    pub fn is_degenerate(&self) -> bool {
        !self.has_principals() || !self.has_permissions()
    }

    pub fn is_mergeable(&self) -> bool {
        self.conditions.len() <= MAX_MERGEABLE_CONDITIONS
    }

    pub fn access(&self, access_type: &str) -> Option<&ItemAccess> {
        self.accesses.iter().find(|a| a.access_type == access_type)
    }

    pub fn access_types(&self) -> impl Iterator<Item = &str> {
        self.accesses.iter().map(|a| a.access_type.as_str())
    }

    /// Union `accesses` into this item by access type. Existing entries are
    /// flipped to allowed; missing ones are appended as allowed.
    ///
    /// Returns true if anything changed.
    pub fn add_accesses(&mut self, accesses: &[ItemAccess]) -> bool {
        let mut changed = false;
        for access in accesses {
            match self
                .accesses
                .iter_mut()
                .find(|a| a.access_type == access.access_type)
            {
                Some(existing) => {
                    if !existing.is_allowed {
                        existing.is_allowed = true;
                        changed = true;
                    }
                }
                None => {
                    self.accesses
                        .push(ItemAccess::allowed(access.access_type.clone()));
                    changed = true;
                }
            }
        }
        changed
    }

    /// Drop every entry whose type matches one of `accesses`.
    ///
    /// Returns true if anything was removed.
    pub fn remove_accesses(&mut self, accesses: &[ItemAccess]) -> bool {
        let before = self.accesses.len();
        self.accesses
            .retain(|a| !accesses.iter().any(|r| r.access_type == a.access_type));
        self.accesses.len() != before
    }

    /// Fold another item's permissions into this one.
    pub(crate) fn absorb_permissions(&mut self, other: &PolicyItem) {
        if other.delegate_admin {
            self.delegate_admin = true;
        }
        self.add_accesses(&other.accesses);
    }

    /// Add the other item's users and groups that this one does not already
    /// name, keeping first-appearance order.
    pub(crate) fn absorb_principals(&mut self, other: &PolicyItem) {
        for kind in PrincipalKind::ALL {
            for name in other.principals(kind) {
                self.add_principal(kind, name);
            }
        }
    }

    pub fn signature(&self) -> AccessSignature {
        AccessSignature {
            access_types: self.access_types().map(str::to_string).collect(),
            delegate_admin: self.delegate_admin,
        }
    }
}

impl Display for PolicyItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "users=[{}] groups=[{}] accesses=[{}] delegate_admin={}",
            self.users.join(", "),
            self.groups.join(", "),
            self.accesses.iter().join(", "),
            self.delegate_admin
        )?;
        if !self.conditions.is_empty() {
            write!(f, " conditions={}", self.conditions.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[test]
    fn test_for_principal_names_only_that_principal() {
        let item = PolicyItem::for_principal(PrincipalKind::Group, "admins");
        assert_eq!(item.groups, vec!["admins"]);
        assert!(item.users.is_empty());
        assert!(item.accesses.is_empty());
        assert!(!item.delegate_admin);
    }

    #[test]
    fn test_add_principal_deduplicates() {
        let mut item = PolicyItem::new().with_users(["alice", "alice", "bob"]);
        assert_eq!(item.users, vec!["alice", "bob"]);
        assert!(!item.add_principal(PrincipalKind::User, "bob"));
        assert!(item.add_principal(PrincipalKind::User, "carol"));
        assert_eq!(item.users, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_remove_principal() {
        let mut item = PolicyItem::new().with_users(["alice", "bob"]).with_groups(["alice"]);
        assert!(item.remove_principal(PrincipalKind::User, "alice"));
        assert!(!item.remove_principal(PrincipalKind::User, "alice"));
        assert_eq!(item.users, vec!["bob"]);
        // Users and groups are separate namespaces.
        assert_eq!(item.groups, vec!["alice"]);
    }

    #[test]
    fn test_add_accesses_unions_by_type() {
        let mut item = PolicyItem::new().with_accesses(["read"]);
        item.accesses.push(ItemAccess::new("write", false));

        let changed = item.add_accesses(&[
            ItemAccess::allowed("read"),
            ItemAccess::allowed("write"),
            ItemAccess::allowed("delete"),
        ]);

        assert!(changed);
        assert_eq!(
            item.accesses,
            vec![
                ItemAccess::allowed("read"),
                ItemAccess::allowed("write"),
                ItemAccess::allowed("delete"),
            ]
        );
        assert!(!item.add_accesses(&[ItemAccess::allowed("read")]));
    }

    #[test]
    fn test_remove_accesses_deletes_entries_regardless_of_flag() {
        let mut item = PolicyItem::new().with_accesses(["read", "write"]);
        item.accesses.push(ItemAccess::new("delete", false));

        assert!(item.remove_accesses(&[ItemAccess::allowed("write"), ItemAccess::allowed("delete")]));
        assert_eq!(item.access_types().collect::<Vec<_>>(), vec!["read"]);
        assert!(!item.remove_accesses(&[ItemAccess::allowed("alter")]));
    }

    #[parameterized(
        complete = { &["alice"], &[], &["read"], false, false },
        delegate_admin_only = { &["alice"], &[], &[], true, false },
        group_only = { &[], &["admins"], &["read"], false, false },
        no_principals = { &[], &[], &["read"], true, true },
        no_permissions = { &["alice"], &["admins"], &[], false, true },
    )]
    fn test_is_degenerate(
        users: &[&str],
        groups: &[&str],
        accesses: &[&str],
        delegate_admin: bool,
        expected: bool,
    ) {
        let item = PolicyItem::new()
            .with_users(users)
            .with_groups(groups)
            .with_accesses(accesses)
            .with_delegate_admin(delegate_admin);
        assert_eq!(item.is_degenerate(), expected);
    }

    #[test]
    fn test_signature_ignores_order_and_principals() {
        let a = PolicyItem::new().with_users(["alice"]).with_accesses(["write", "read"]);
        let b = PolicyItem::new().with_groups(["devs"]).with_accesses(["read", "write"]);
        assert_eq!(a.signature(), b.signature());
        assert_eq!(a.signature().to_string(), "read,write");
    }

    #[test]
    fn test_signature_distinguishes_delegate_admin() {
        let plain = PolicyItem::new().with_accesses(["read"]);
        let admin = PolicyItem::new().with_accesses(["read"]).with_delegate_admin(true);
        assert_ne!(plain.signature(), admin.signature());
        assert_eq!(admin.signature().to_string(), "read,delegateAdmin");
    }

    #[test]
    fn test_signature_does_not_collide_on_concatenation() {
        let a = PolicyItem::new().with_accesses(["ab", "c"]);
        let b = PolicyItem::new().with_accesses(["a", "bc"]);
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn test_is_mergeable_threshold() {
        let one = PolicyItem::new().with_conditions(vec![ItemCondition::new("ip", ["a"])]);
        let two = PolicyItem::new().with_conditions(vec![
            ItemCondition::new("ip", ["a"]),
            ItemCondition::new("time", ["b"]),
        ]);
        assert!(PolicyItem::new().is_mergeable());
        assert!(one.is_mergeable());
        assert!(!two.is_mergeable());
    }

    #[test]
    fn test_display() {
        let item = PolicyItem::new()
            .with_users(["alice", "bob"])
            .with_groups(["devs"])
            .with_accesses(["read"])
            .with_delegate_admin(true);
        assert_eq!(
            item.to_string(),
            "users=[alice, bob] groups=[devs] accesses=[read] delegate_admin=true"
        );
    }

    #[test]
    fn test_wire_format_defaults() {
        let item: PolicyItem =
            serde_json::from_str(r#"{"users": ["alice"], "accesses": [{"type": "read", "isAllowed": true}]}"#)
                .unwrap();
        assert_eq!(item.users, vec!["alice"]);
        assert!(item.groups.is_empty());
        assert!(!item.delegate_admin);
        assert!(item.conditions.is_empty());

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["delegateAdmin"], serde_json::json!(false));
    }
}
