use std::time::Duration;

use ribpolicy_core::descriptor::PolicyDescriptor;
use ribpolicy_core::error::{Result, RibPolicyError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub version: u32,

    #[serde(default)]
    pub engine: EngineSection,

    /// Policy installed at startup.
    #[serde(default)]
    pub policy: Option<PolicyDescriptor>,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RibPolicyError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.engine.validate()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            sweep_interval_ms: default_sweep_interval_ms(),
        }
    }
}

impl EngineSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.sweep_interval_ms) {
            return Err(RibPolicyError::BadRequest(
                "engine.sweep_interval_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

fn default_sweep_interval_ms() -> u64 {
    1000
}
