//! Access entries and opaque item conditions.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A named access type (e.g. `read`) and whether it is allowed.
///
/// Items hold at most one entry per access type; the flag can be toggled in
/// place, which is why this is not modeled as a plain set of names.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ItemAccess {
    #[serde(rename = "type")]
    pub access_type: String,
    #[serde(default = "default_is_allowed")]
    pub is_allowed: bool,
}

fn default_is_allowed() -> bool {
    true
}

impl ItemAccess {
    /// An allowed access of the given type.
    pub fn allowed<S: Into<String>>(access_type: S) -> Self {
        ItemAccess {
            access_type: access_type.into(),
            is_allowed: true,
        }
    }

    pub fn new<S: Into<String>>(access_type: S, is_allowed: bool) -> Self {
        ItemAccess {
            access_type: access_type.into(),
            is_allowed,
        }
    }
}

impl Display for ItemAccess {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_allowed {
            write!(f, "{}", self.access_type)
        } else {
            write!(f, "!{}", self.access_type)
        }
    }
}

/// A condition attached to a policy item. Never interpreted here; only the
/// number of conditions on an item matters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct ItemCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl ItemCondition {
    pub fn new<T, I, S>(condition_type: T, values: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ItemCondition {
            condition_type: condition_type.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}
