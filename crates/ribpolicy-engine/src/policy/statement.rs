//! Single policy statement: exact prefix match plus a weight rewrite.

use std::collections::HashSet;

use ribpolicy_core::descriptor::{
    ActionDescriptor, MatcherDescriptor, StatementDescriptor, WeightAction,
};
use ribpolicy_core::error::{Result, RibPolicyError};
use ribpolicy_core::route::{Prefix, RouteEntry};

/// Compiled statement. Construct via [`RibPolicyStatement::new`]; an instance
/// always has a non-empty match set and a weight action.
#[derive(Debug, Clone)]
pub struct RibPolicyStatement {
    name: String,
    action: WeightAction,
    prefix_set: HashSet<Prefix>,
}

impl RibPolicyStatement {
    pub fn new(stmt: &StatementDescriptor) -> Result<Self> {
        let action = stmt.action.set_weight.clone().ok_or_else(|| {
            RibPolicyError::Config(format!(
                "statement {:?}: missing action.set_weight",
                stmt.name
            ))
        })?;

        let prefixes = match &stmt.matcher.prefixes {
            Some(p) if !p.is_empty() => p,
            Some(_) => {
                return Err(RibPolicyError::Config(format!(
                    "statement {:?}: matcher.prefixes must not be empty",
                    stmt.name
                )));
            }
            None => {
                return Err(RibPolicyError::Config(format!(
                    "statement {:?}: missing matcher.prefixes",
                    stmt.name
                )));
            }
        };

        // Host bits are cleared: 10.1.2.3/8 keys as 10.0.0.0/8.
        let prefix_set = prefixes.iter().map(|p| p.trunc()).collect();

        Ok(Self {
            name: stmt.name.clone(),
            action,
            prefix_set,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> &WeightAction {
        &self.action
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &Prefix> {
        self.prefix_set.iter()
    }

    /// Exact-prefix membership; no longest-prefix or containment matching.
    /// The route prefix is masked the same way as the configured prefixes.
    pub fn matches(&self, route: &RouteEntry) -> bool {
        self.prefix_set.contains(&route.prefix.trunc())
    }

    /// Rewrite next-hop weights of a matching route. Next-hops whose new weight
    /// is 0 are removed; next-hops that become identical collapse into one.
    /// Returns false, leaving the route untouched, if the route doesn't match.
    pub fn apply_action(&self, route: &mut RouteEntry) -> bool {
        if !self.matches(route) {
            return false;
        }

        let before = route.nexthops.len();
        route.nexthops = route
            .nexthops
            .drain()
            .filter_map(|mut nh| {
                let weight = self.action.weight_for(nh.area.as_deref());
                if weight == 0 {
                    return None;
                }
                nh.weight = weight;
                Some(nh)
            })
            .collect();

        tracing::debug!(
            statement = %self.name,
            prefix = %route.prefix,
            before,
            after = route.nexthops.len(),
            "policy statement applied"
        );
        true
    }

    /// Descriptor for this statement. Prefixes come out in set order, which
    /// need not match the order originally supplied.
    pub fn to_descriptor(&self) -> StatementDescriptor {
        StatementDescriptor {
            name: self.name.clone(),
            matcher: MatcherDescriptor {
                prefixes: Some(self.prefix_set.iter().copied().collect()),
            },
            action: ActionDescriptor {
                set_weight: Some(self.action.clone()),
            },
        }
    }
}
