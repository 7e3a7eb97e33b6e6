//! External policy descriptors.
//!
//! These are the shapes a policy-distribution collaborator hands to the
//! engine and the shapes the engine reports back. Members the engine requires
//! (`matcher.prefixes`, `action.set_weight`, a non-empty `statements`) are
//! optional on the wire so that their absence reaches policy construction and
//! is rejected there as a configuration error rather than a parse error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RibPolicyError};
use crate::route::Prefix;

/// Policy: ordered statements plus a time-to-live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDescriptor {
    /// Seconds, relative to construction time. When reported by a live policy
    /// this is the remaining time, not the originally configured TTL.
    pub ttl_secs: i64,
    #[serde(default)]
    pub statements: Vec<StatementDescriptor>,
}

impl PolicyDescriptor {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| RibPolicyError::BadRequest(format!("invalid policy json: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| RibPolicyError::Internal(format!("policy serialization failed: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatementDescriptor {
    /// Diagnostic only.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub matcher: MatcherDescriptor,
    #[serde(default)]
    pub action: ActionDescriptor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatcherDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefixes: Option<Vec<Prefix>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_weight: Option<WeightAction>,
}

/// Weight rewrite: a default weight plus per-area overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightAction {
    pub default_weight: u32,
    #[serde(default)]
    pub area_to_weight: BTreeMap<String, u32>,
}

impl WeightAction {
    pub fn new(default_weight: u32) -> Self {
        Self {
            default_weight,
            area_to_weight: BTreeMap::new(),
        }
    }

    pub fn with_area(mut self, area: impl Into<String>, weight: u32) -> Self {
        self.area_to_weight.insert(area.into(), weight);
        self
    }

    /// Weight for a next-hop in `area`: the area override if one exists,
    /// otherwise the default. Next-hops without an area get the default.
    pub fn weight_for(&self, area: Option<&str>) -> u32 {
        area.and_then(|a| self.area_to_weight.get(a).copied())
            .unwrap_or(self.default_weight)
    }
}

impl StatementDescriptor {
    /// Statement matching `prefixes` and rewriting weights with `action`.
    pub fn new(
        name: impl Into<String>,
        prefixes: impl IntoIterator<Item = Prefix>,
        action: WeightAction,
    ) -> Self {
        Self {
            name: name.into(),
            matcher: MatcherDescriptor {
                prefixes: Some(prefixes.into_iter().collect()),
            },
            action: ActionDescriptor {
                set_weight: Some(action),
            },
        }
    }
}
