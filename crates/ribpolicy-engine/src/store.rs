//! Installed-policy store.
//!
//! Holds at most one policy. Updates replace it wholesale and only on
//! success, so a rejected descriptor leaves the previous policy in force.
//! Expiry is passive: an expired policy is never applied, and is dropped by
//! `evict_expired` (driven by the sweeper task).

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use ribpolicy_core::clock::Clock;
use ribpolicy_core::descriptor::PolicyDescriptor;
use ribpolicy_core::error::{Result, RibPolicyError};
use ribpolicy_core::route::RouteEntry;

use crate::policy::RibPolicy;

#[derive(Debug)]
pub struct RibPolicyStore {
    clock: Arc<dyn Clock>,
    current: Mutex<Option<Arc<RibPolicy>>>,
}

impl RibPolicyStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            current: Mutex::new(None),
        }
    }

    fn slot(&self) -> Result<MutexGuard<'_, Option<Arc<RibPolicy>>>> {
        self.current
            .lock()
            .map_err(|_| RibPolicyError::Internal("policy store lock poisoned".into()))
    }

    /// Compile and install `descriptor`, replacing any installed policy.
    pub fn set_policy(&self, descriptor: &PolicyDescriptor) -> Result<()> {
        let policy = match RibPolicy::new(descriptor, Arc::clone(&self.clock)) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "rib policy update rejected; keeping previous policy");
                return Err(e);
            }
        };

        tracing::info!(
            statements = policy.statements().len(),
            ttl_secs = descriptor.ttl_secs,
            "rib policy installed"
        );
        *self.slot()? = Some(Arc::new(policy));
        Ok(())
    }

    /// Descriptor of the installed policy, with its remaining TTL.
    pub fn get_policy(&self) -> Result<PolicyDescriptor> {
        self.active_policy()?
            .map(|p| p.to_descriptor())
            .ok_or_else(|| RibPolicyError::NotFound("rib policy not set".into()))
    }

    /// Installed policy, if still active.
    pub fn active_policy(&self) -> Result<Option<Arc<RibPolicy>>> {
        Ok(self.slot()?.as_ref().filter(|p| p.is_active()).cloned())
    }

    /// Whether a policy is installed, active or not yet evicted.
    pub fn has_policy(&self) -> Result<bool> {
        Ok(self.slot()?.is_some())
    }

    /// Drop the installed policy if it has expired. Returns whether one was dropped.
    pub fn evict_expired(&self) -> Result<bool> {
        let mut slot = self.slot()?;
        match slot.as_ref() {
            Some(p) if !p.is_active() => {
                tracing::info!(
                    remaining_ttl_ms = p.remaining_ttl_ms(),
                    "rib policy expired; evicting"
                );
                *slot = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }

    /// Apply the active policy to one route. Returns whether it was rewritten.
    pub fn apply(&self, route: &mut RouteEntry) -> Result<bool> {
        Ok(match self.active_policy()? {
            Some(p) => p.apply_action(route),
            None => false,
        })
    }

    /// Apply the active policy to a batch of routes. Returns how many were rewritten.
    pub fn apply_all(&self, routes: &mut [RouteEntry]) -> Result<usize> {
        let Some(policy) = self.active_policy()? else {
            return Ok(0);
        };
        let mut rewritten = 0;
        for route in routes.iter_mut() {
            if policy.apply_action(route) {
                rewritten += 1;
            }
        }
        Ok(rewritten)
    }
}

/// Periodically evict an expired policy from `store`.
pub fn spawn_expiry_sweeper(
    store: Arc<RibPolicyStore>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(period);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            if let Err(e) = store.evict_expired() {
                tracing::error!(error = %e, "expiry sweep failed");
                return;
            }
        }
    })
}
