use std::sync::Arc;
use std::time::{Duration, Instant};

use ribpolicy_core::clock::Clock;
use ribpolicy_core::descriptor::PolicyDescriptor;
use ribpolicy_core::error::{Result, RibPolicyError};
use ribpolicy_core::route::RouteEntry;

use super::statement::RibPolicyStatement;

/// Compiled, time-bounded policy.
///
/// Statements are evaluated in the order supplied; the first one that matches
/// a route is the only one applied. Expiry is fixed at construction and
/// liveness is recomputed against the clock on every query.
/// Construct once per update, then share via Arc.
#[derive(Debug, Clone)]
pub struct RibPolicy {
    statements: Vec<RibPolicyStatement>,
    valid_until: Instant,
    clock: Arc<dyn Clock>,
}

impl RibPolicy {
    /// Build a policy from its descriptor. All-or-nothing: any invalid
    /// statement fails the whole policy.
    pub fn new(policy: &PolicyDescriptor, clock: Arc<dyn Clock>) -> Result<Self> {
        let now = clock.now();
        let ttl = Duration::from_secs(policy.ttl_secs.unsigned_abs());
        let valid_until = if policy.ttl_secs >= 0 {
            now.checked_add(ttl).ok_or_else(|| {
                RibPolicyError::Config(format!("ttl_secs out of range: {}", policy.ttl_secs))
            })?
        } else {
            // Already expired; clamp if the clock can't represent the past instant.
            now.checked_sub(ttl).unwrap_or(now)
        };

        if policy.statements.is_empty() {
            return Err(RibPolicyError::Config("missing policy.statements".into()));
        }

        let statements = policy
            .statements
            .iter()
            .map(RibPolicyStatement::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            statements,
            valid_until,
            clock,
        })
    }

    pub fn statements(&self) -> &[RibPolicyStatement] {
        &self.statements
    }

    /// Remaining lifetime in milliseconds; negative once expired.
    pub fn remaining_ttl_ms(&self) -> i64 {
        let now = self.clock.now();
        match self.valid_until.checked_duration_since(now) {
            Some(left) => i64::try_from(left.as_millis()).unwrap_or(i64::MAX),
            None => {
                let over = now.duration_since(self.valid_until).as_millis();
                -i64::try_from(over).unwrap_or(i64::MAX)
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ttl_ms() > 0
    }

    /// True if any statement matches the route.
    pub fn matches(&self, route: &RouteEntry) -> bool {
        self.statements.iter().any(|s| s.matches(route))
    }

    /// Apply the first matching statement. Returns false, leaving the route
    /// untouched, when no statement matches.
    pub fn apply_action(&self, route: &mut RouteEntry) -> bool {
        self.statements.iter().any(|s| s.apply_action(route))
    }

    /// Descriptor for the current state. `ttl_secs` is the remaining
    /// lifetime in whole seconds (truncated toward zero), so it shrinks
    /// between calls.
    pub fn to_descriptor(&self) -> PolicyDescriptor {
        PolicyDescriptor {
            ttl_secs: self.remaining_ttl_ms() / 1000,
            statements: self
                .statements
                .iter()
                .map(RibPolicyStatement::to_descriptor)
                .collect(),
        }
    }
}
