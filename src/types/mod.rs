//! Data model for policies and grant/revoke requests.
//!
//! Wire names follow the policy admin JSON format:
//! - Policy: `policyItems`, `denyPolicyItems`, `allowExceptions`, `denyExceptions`
//! - PolicyItem: `users`, `groups`, `accesses`, `delegateAdmin`, `conditions`
//! - Request: `users`, `groups`, `accessTypes`, `delegateAdmin`, `replaceExistingPermissions`

mod access;
mod category;
mod policy;
mod policy_item;
mod request;

pub use access::{ItemAccess, ItemCondition};
pub use category::{CategorySlots, ItemCategory};
pub use policy::Policy;
pub use policy_item::{
    AccessSignature, DELEGATE_ADMIN_MARKER, MAX_MERGEABLE_CONDITIONS, PolicyItem, PrincipalKind,
};
pub use request::GrantRevokeRequest;
