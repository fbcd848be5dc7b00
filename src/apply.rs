use tracing::{debug, warn};

use crate::compact::compact_policy;
use crate::rules::rule_for;
use crate::split::{PrincipalItems, extract_principals};
use crate::types::{CategorySlots, ItemCategory, Policy, PolicyItem, PrincipalKind};

/// Apply every category of `applied` to `existing`, in category order.
///
/// Each category is applied and reported on its own; the result is true if
/// any of them changed the policy.
pub fn apply_policy(existing: &mut Policy, applied: &Policy) -> bool {
    let mut changed = false;
    for category in ItemCategory::ALL {
        changed |= apply_category(existing, applied, category);
    }
    changed
}

/// Apply the items `applied` holds for `category` to `existing`.
///
/// Every principal the applied items name is split out of `existing`, the
/// applied permissions (and their cross-category side effects) are folded
/// into that principal's items, and the results are written back and
/// compacted. Does nothing and returns false if `applied` has no items in
/// `category`.
pub fn apply_category(existing: &mut Policy, applied: &Policy, category: ItemCategory) -> bool {
    let applied_items = applied.items(category);
    if applied_items.is_empty() {
        return false;
    }

    let principals = extract_principals(applied_items);
    debug!(
        event = "Apply",
        phase = "Start",
        category = %category,
        items = applied_items.len(),
        principals = principals.len()
    );

    let mut table = PrincipalItems::split_from(existing, &principals);
    apply_items(applied_items, category, &mut table);
    table.merge_into(existing);

    let changed = compact_policy(existing);

    debug!(
        event = "Apply",
        phase = "Done",
        category = %category,
        changed = changed
    );
    changed
}

fn apply_items(applied_items: &[PolicyItem], category: ItemCategory, table: &mut PrincipalItems) {
    let rule = rule_for(category);

    for kind in PrincipalKind::ALL {
        for applied in applied_items {
            for name in applied.principals(kind) {
                let slots = table
                    .table_mut(kind)
                    .entry(name.clone())
                    .or_insert_with(|| {
                        warn!(
                            event = "Apply",
                            phase = "Slots",
                            kind = %kind,
                            principal = %name,
                            "principal missing from split table"
                        );
                        CategorySlots::new()
                    });

                grant_in_slot(slots, category, kind, name, applied);
                for target in rule.remove_from {
                    if let Some(item) = slots.get_mut(*target) {
                        item.remove_accesses(&applied.accesses);
                    }
                }
                for target in rule.add_to {
                    grant_in_slot(slots, *target, kind, name, applied);
                }
            }
        }
    }
}

fn grant_in_slot(
    slots: &mut CategorySlots<PolicyItem>,
    category: ItemCategory,
    kind: PrincipalKind,
    name: &str,
    applied: &PolicyItem,
) {
    slots
        .get_or_insert_with(category, || PolicyItem::for_principal(kind, name))
        .absorb_permissions(applied);
}
