use crate::error::PolicyError;
use crate::types::{GrantRevokeRequest, Policy};

/// Parse a policy from its JSON wire form.
///
/// Any JSON errors are mapped into `PolicyError::ParseError`.
///
/// Example:
/// ```rust
/// use policy_grants::load_policy;
/// let policy_text = r#"{
///     "policyItems": [
///         { "users": ["alice"], "accesses": [{ "type": "read", "isAllowed": true }] }
///     ]
/// }"#;
/// let policy = load_policy(policy_text).unwrap();
/// assert_eq!(policy.allow.len(), 1);
/// ```
pub fn load_policy(text: &str) -> Result<Policy, PolicyError> {
    Ok(serde_json::from_str(text)?)
}

/// Parse a grant or revoke request from its JSON wire form.
pub fn load_request(text: &str) -> Result<GrantRevokeRequest, PolicyError> {
    Ok(serde_json::from_str(text)?)
}
