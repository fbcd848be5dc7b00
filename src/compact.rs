//! Removal of degenerate items and merging of items that grant the same
//! permissions.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::types::{AccessSignature, ItemCategory, Policy, PolicyItem};

/// Compact every category of `policy` in place.
///
/// Degenerate items (no principals, or no accesses without delegate-admin)
/// are dropped, then items sharing an access signature within a category are
/// merged. The result reports that compaction ran over a non-empty policy,
/// not whether anything was actually rewritten.
pub fn compact_policy(policy: &mut Policy) -> bool {
    let ran = !policy.is_empty();
    let before = policy.item_count();

    let mut dropped = 0;
    for category in ItemCategory::ALL {
        let items = policy.items_mut(category);
        let count = items.len();
        items.retain(|item| !item.is_degenerate());
        dropped += count - items.len();
    }

    for category in ItemCategory::ALL {
        let items = std::mem::take(policy.items_mut(category));
        *policy.items_mut(category) = merge_items(items);
    }

    debug!(
        event = "Compact",
        phase = "Done",
        items_before = before,
        items_after = policy.item_count(),
        dropped = dropped,
        ran = ran
    );

    ran
}

/// Merge items that share an access signature, unioning their users and
/// groups into the first of them.
///
/// Items with more than one condition are passed through untouched. Each
/// merged item keeps the position of its first member.
pub fn merge_items(items: Vec<PolicyItem>) -> Vec<PolicyItem> {
    let mut merged: Vec<PolicyItem> = Vec::with_capacity(items.len());
    let mut positions: HashMap<AccessSignature, usize> = HashMap::new();

    for item in items {
        if !item.is_mergeable() {
            merged.push(item);
            continue;
        }
        match positions.entry(item.signature()) {
            Entry::Occupied(entry) => merged[*entry.get()].absorb_principals(&item),
            Entry::Vacant(entry) => {
                entry.insert(merged.len());
                merged.push(item);
            }
        }
    }

    merged
}
