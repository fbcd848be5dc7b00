//! How applying permissions in one category affects a principal's items in
//! the other categories.
//!
//! | applied          | accesses removed from          | accesses added to |
//! |------------------|--------------------------------|-------------------|
//! | allow            | deny, allow_exception          | deny_exception    |
//! | deny             | allow, deny_exception          | allow_exception   |
//! | allow_exception  | allow                          |                   |
//! | deny_exception   |                                |                   |

use crate::types::ItemCategory;

/// Side effects of applying an item in `category` for one principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: ItemCategory,
    /// Categories whose existing entries for the applied access types are dropped.
    pub remove_from: &'static [ItemCategory],
    /// Categories that also receive the applied access types.
    pub add_to: &'static [ItemCategory],
}

/// Indexed by [`ItemCategory::index`].
pub static RULE_TABLE: [CategoryRule; 4] = [
    CategoryRule {
        category: ItemCategory::Allow,
        remove_from: &[ItemCategory::Deny, ItemCategory::AllowException],
        add_to: &[ItemCategory::DenyException],
    },
    CategoryRule {
        category: ItemCategory::Deny,
        remove_from: &[ItemCategory::Allow, ItemCategory::DenyException],
        add_to: &[ItemCategory::AllowException],
    },
    CategoryRule {
        category: ItemCategory::AllowException,
        remove_from: &[ItemCategory::Allow],
        add_to: &[],
    },
    CategoryRule {
        category: ItemCategory::DenyException,
        remove_from: &[],
        add_to: &[],
    },
];

pub fn rule_for(category: ItemCategory) -> &'static CategoryRule {
    &RULE_TABLE[category.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[test]
    fn test_table_is_indexed_by_category() {
        for category in ItemCategory::ALL {
            assert_eq!(rule_for(category).category, category);
        }
    }

    #[test]
    fn test_rules_never_target_their_own_category() {
        for rule in RULE_TABLE.iter() {
            assert!(!rule.remove_from.contains(&rule.category));
            assert!(!rule.add_to.contains(&rule.category));
        }
    }

    #[test]
    fn test_rules_never_add_and_remove_the_same_category() {
        for rule in RULE_TABLE.iter() {
            for target in rule.add_to {
                assert!(
                    !rule.remove_from.contains(target),
                    "{} both adds to and removes from {}",
                    rule.category,
                    target
                );
            }
        }
    }

    #[parameterized(
        allow = { ItemCategory::Allow, &[ItemCategory::Deny, ItemCategory::AllowException], &[ItemCategory::DenyException] },
        deny = { ItemCategory::Deny, &[ItemCategory::Allow, ItemCategory::DenyException], &[ItemCategory::AllowException] },
        allow_exception = { ItemCategory::AllowException, &[ItemCategory::Allow], &[] },
        deny_exception = { ItemCategory::DenyException, &[], &[] },
    )]
    fn test_rule_contents(
        category: ItemCategory,
        remove_from: &[ItemCategory],
        add_to: &[ItemCategory],
    ) {
        let rule = rule_for(category);
        assert_eq!(rule.remove_from, remove_from);
        assert_eq!(rule.add_to, add_to);
    }
}
