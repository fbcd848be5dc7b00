//! The four policy item categories and a fixed-size per-category slot table.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString};
use utoipa::ToSchema;

/// Which list of a policy an item lives in.
///
/// The declaration order is the order requests are applied in and the order
/// per-principal slots are written back to a policy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemCategory {
    /// Grants access.
    Allow,
    /// Denies access, overriding allows.
    Deny,
    /// Carves an exception out of an allow.
    AllowException,
    /// Carves an exception out of a deny.
    DenyException,
}

impl ItemCategory {
    /// All categories in application order.
    pub const ALL: [ItemCategory; 4] = [
        ItemCategory::Allow,
        ItemCategory::Deny,
        ItemCategory::AllowException,
        ItemCategory::DenyException,
    ];

    /// Position of this category in [`ItemCategory::ALL`].
    pub const fn index(self) -> usize {
        match self {
            ItemCategory::Allow => 0,
            ItemCategory::Deny => 1,
            ItemCategory::AllowException => 2,
            ItemCategory::DenyException => 3,
        }
    }
}

/// One optional value per category, addressed by [`ItemCategory`] rather
/// than by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlots<T> {
    slots: [Option<T>; 4],
}

impl<T> Default for CategorySlots<T> {
    fn default() -> Self {
        CategorySlots {
            slots: [None, None, None, None],
        }
    }
}

impl<T> CategorySlots<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: ItemCategory) -> Option<&T> {
        self.slots[category.index()].as_ref()
    }

    pub fn get_mut(&mut self, category: ItemCategory) -> Option<&mut T> {
        self.slots[category.index()].as_mut()
    }

    /// Store `value`, returning whatever the slot held before.
    pub fn set(&mut self, category: ItemCategory, value: Option<T>) -> Option<T> {
        std::mem::replace(&mut self.slots[category.index()], value)
    }

    /// Get the slot value, creating it with `init` when empty.
    pub fn get_or_insert_with<F>(&mut self, category: ItemCategory, init: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.slots[category.index()].get_or_insert_with(init)
    }

    /// Occupied slots in category order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemCategory, &T)> {
        ItemCategory::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(category, slot)| slot.as_ref().map(|value| (category, value)))
    }

    /// Consume the table, yielding occupied slots in category order.
    pub fn into_occupied(self) -> impl Iterator<Item = (ItemCategory, T)> {
        ItemCategory::ALL
            .into_iter()
            .zip(self.slots)
            .filter_map(|(category, slot)| slot.map(|value| (category, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
