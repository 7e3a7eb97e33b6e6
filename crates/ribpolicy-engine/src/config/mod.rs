//! Engine config loader (strict parsing).
//!
//! The YAML file carries the sweeper period and, optionally, the policy to
//! install at startup. Unknown keys are rejected at every level, including
//! inside the policy descriptor.

pub mod schema;

use std::fs;
use std::path::Path;

use ribpolicy_core::error::{Result, RibPolicyError};

use crate::store::RibPolicyStore;

pub use schema::{EngineConfig, EngineSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        RibPolicyError::Internal(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<EngineConfig> {
    let cfg: EngineConfig = serde_yaml::from_str(s)
        .map_err(|e| RibPolicyError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Install the startup policy from `cfg` into `store`. Returns whether the
/// config carried one.
pub fn install_startup_policy(cfg: &EngineConfig, store: &RibPolicyStore) -> Result<bool> {
    match &cfg.policy {
        Some(policy) => {
            store.set_policy(policy)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
