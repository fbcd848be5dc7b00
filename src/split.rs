//! Per-principal decomposition of shared policy items.
//!
//! Before a request is applied, every principal it names is pulled out of the
//! items it currently shares with others. Each principal ends up with at most
//! one consolidated item per category, which can then be edited without
//! affecting anyone else. After editing, those items are appended back to the
//! policy and compaction merges them with their peers again.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::types::{CategorySlots, ItemCategory, Policy, PolicyItem, PrincipalKind};

/// Users and groups named anywhere in a set of items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectedPrincipals {
    pub users: BTreeSet<String>,
    pub groups: BTreeSet<String>,
}

impl AffectedPrincipals {
    pub fn get(&self, kind: PrincipalKind) -> &BTreeSet<String> {
        match kind {
            PrincipalKind::User => &self.users,
            PrincipalKind::Group => &self.groups,
        }
    }

    pub fn len(&self) -> usize {
        self.users.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.groups.is_empty()
    }
}

/// Collect the union of users and groups referenced by `items`.
pub fn extract_principals(items: &[PolicyItem]) -> AffectedPrincipals {
    let mut principals = AffectedPrincipals::default();
    for item in items {
        principals.users.extend(item.users.iter().cloned());
        principals.groups.extend(item.groups.iter().cloned());
    }
    principals
}

/// Pull `name` out of every item in `items` that names it.
///
/// Returns a single item naming only `name` that carries the union of the
/// accesses and delegate-admin flags of every item it was found in, or `None`
/// if no item named it. The principal is removed from the source items; an
/// item left without principals stays in place for compaction to discard.
pub fn split_principal(
    items: &mut [PolicyItem],
    kind: PrincipalKind,
    name: &str,
) -> Option<PolicyItem> {
    let mut consolidated: Option<PolicyItem> = None;
    for item in items.iter().filter(|i| i.contains_principal(kind, name)) {
        consolidated
            .get_or_insert_with(|| PolicyItem::for_principal(kind, name))
            .absorb_permissions(item);
    }

    if consolidated.is_some() {
        for item in items.iter_mut() {
            item.remove_principal(kind, name);
        }
    }

    consolidated
}

/// Each affected principal's consolidated item per category.
#[derive(Debug, Clone, Default)]
pub struct PrincipalItems {
    users: BTreeMap<String, CategorySlots<PolicyItem>>,
    groups: BTreeMap<String, CategorySlots<PolicyItem>>,
}

impl PrincipalItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split every principal in `principals` out of all four categories of
    /// `policy`.
    pub fn split_from(policy: &mut Policy, principals: &AffectedPrincipals) -> Self {
        debug!(
            event = "Split",
            phase = "Start",
            users = principals.users.len(),
            groups = principals.groups.len()
        );

        let mut table = PrincipalItems::new();
        for kind in PrincipalKind::ALL {
            for name in principals.get(kind) {
                let slots = table.table_mut(kind).entry(name.clone()).or_default();
                for category in ItemCategory::ALL {
                    let item = split_principal(policy.items_mut(category), kind, name);
                    slots.set(category, item);
                }
            }
        }

        debug!(
            event = "Split",
            phase = "Done",
            extracted = table.extracted_count()
        );
        table
    }

    pub fn table(&self, kind: PrincipalKind) -> &BTreeMap<String, CategorySlots<PolicyItem>> {
        match kind {
            PrincipalKind::User => &self.users,
            PrincipalKind::Group => &self.groups,
        }
    }

    pub fn table_mut(
        &mut self,
        kind: PrincipalKind,
    ) -> &mut BTreeMap<String, CategorySlots<PolicyItem>> {
        match kind {
            PrincipalKind::User => &mut self.users,
            PrincipalKind::Group => &mut self.groups,
        }
    }

    pub fn slots(&self, kind: PrincipalKind, name: &str) -> Option<&CategorySlots<PolicyItem>> {
        self.table(kind).get(name)
    }

    /// Number of occupied slots across all principals.
    pub fn extracted_count(&self) -> usize {
        PrincipalKind::ALL
            .iter()
            .flat_map(|kind| self.table(*kind).values())
            .map(|slots| slots.iter().count())
            .sum()
    }

    /// Append every occupied slot to the matching category of `policy`,
    /// users before groups.
    pub fn merge_into(self, policy: &mut Policy) {
        let PrincipalItems { users, groups } = self;
        for slots in users.into_values().chain(groups.into_values()) {
            for (category, item) in slots.into_occupied() {
                policy.items_mut(category).push(item);
            }
        }
    }
}
