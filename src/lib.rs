//! Grant and revoke reconciliation for access-control policies.
//!
//! A [`Policy`] holds four lists of [`PolicyItem`]s: allow, deny, and an
//! exception list for each. [`process_grant`] and [`process_revoke`] edit a
//! policy in place so that the requested principals end up with (or without)
//! the requested access types, updating the other lists where a grant or
//! revoke conflicts with them, and leave the policy compacted: no empty items
//! and no two items in one list granting the same permissions.
//!
//! ```rust
//! use policy_grants::{GrantRevokeRequest, Policy, process_grant};
//!
//! let mut policy = Policy::new();
//! let request = GrantRevokeRequest::new()
//!     .with_users(["alice"])
//!     .with_access_types(["read"]);
//!
//! assert!(process_grant(&mut policy, &request));
//! assert_eq!(policy.allow[0].users, vec!["alice"]);
//! ```

pub use apply::{apply_category, apply_policy};
pub use compact::{compact_policy, merge_items};
pub use error::PolicyError;
pub use grant::{applied_policy, process_grant, process_revoke, remove_from_allow};
pub use loader::{load_policy, load_request};
pub use rules::{CategoryRule, RULE_TABLE, rule_for};
pub use split::{AffectedPrincipals, PrincipalItems, extract_principals, split_principal};
pub use types::{
    AccessSignature, CategorySlots, DELEGATE_ADMIN_MARKER, GrantRevokeRequest, ItemAccess,
    ItemCategory, ItemCondition, MAX_MERGEABLE_CONDITIONS, Policy, PolicyItem, PrincipalKind,
};

mod apply;
mod compact;
mod error;
mod grant;
mod loader;
mod rules;
mod split;
mod types;

#[cfg(test)]
mod tests;
