use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static agent options. Every field has a default so a partial file is enough.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AgentConfig {
    pub username: String,
    pub battle_format: String,
    pub spread_damage_mod: f32,
    /// Emit per-slot candidate traces at `debug` level.
    pub debug_decisions: bool,
    /// Report fallbacks at `warn` level.
    pub verbose: bool,
    /// Reserved; no scoring rule reads it.
    pub early_turns: u32,
    /// Seed for the random fallback chooser.
    pub seed: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            username: "PaXBotVGC".to_string(),
            battle_format: "gen9randomdoublesbattle".to_string(),
            spread_damage_mod: 0.75,
            debug_decisions: true,
            verbose: true,
            early_turns: 3,
            seed: 0,
        }
    }
}

impl AgentConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let parsed: AgentConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.spread_damage_mod > 0.0 && self.spread_damage_mod <= 1.0) {
            anyhow::bail!(
                "spread_damage_mod must be in (0, 1], got {}",
                self.spread_damage_mod
            );
        }
        if self.battle_format.trim().is_empty() {
            anyhow::bail!("battle_format must not be empty");
        }
        Ok(())
    }
}
