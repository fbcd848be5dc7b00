//! The policy being edited: four categorized lists of policy items.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::category::ItemCategory;
use super::policy_item::PolicyItem;

/// An access-control policy's permission items, split into allow, deny and
/// their exceptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Policy {
    #[serde(rename = "policyItems")]
    pub allow: Vec<PolicyItem>,
    #[serde(rename = "denyPolicyItems")]
    pub deny: Vec<PolicyItem>,
    pub allow_exceptions: Vec<PolicyItem>,
    pub deny_exceptions: Vec<PolicyItem>,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to append an item to a category.
    pub fn with_item(mut self, category: ItemCategory, item: PolicyItem) -> Self {
        self.items_mut(category).push(item);
        self
    }

    pub fn items(&self, category: ItemCategory) -> &[PolicyItem] {
        match category {
            ItemCategory::Allow => &self.allow,
            ItemCategory::Deny => &self.deny,
            ItemCategory::AllowException => &self.allow_exceptions,
            ItemCategory::DenyException => &self.deny_exceptions,
        }
    }

    pub fn items_mut(&mut self, category: ItemCategory) -> &mut Vec<PolicyItem> {
        match category {
            ItemCategory::Allow => &mut self.allow,
            ItemCategory::Deny => &mut self.deny,
            ItemCategory::AllowException => &mut self.allow_exceptions,
            ItemCategory::DenyException => &mut self.deny_exceptions,
        }
    }

    /// Total number of items across all categories.
    pub fn item_count(&self) -> usize {
        ItemCategory::ALL
            .iter()
            .map(|category| self.items(*category).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Whether any item in any category carries at least one condition.
    pub fn contains_conditions(&self) -> bool {
        ItemCategory::ALL
            .iter()
            .flat_map(|category| self.items(*category))
            .any(|item| !item.conditions.is_empty())
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let lines: Vec<String> = ItemCategory::ALL
            .iter()
            .flat_map(|category| {
                self.items(*category)
                    .iter()
                    .map(move |item| format!("{category}: {item}"))
            })
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}
