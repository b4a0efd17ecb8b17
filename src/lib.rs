//! Turn decision core for a two-versus-two battle agent.
//!
//! The entry point is [`decision::DecisionEngine`]: feed it a
//! [`model::TurnSnapshot`] per turn and a [`model::BattleSummary`] after each
//! battle.

pub mod ally;
pub mod batch;
pub mod classify;
pub mod client;
pub mod config;
pub mod decision;
pub mod model;
pub mod profile;
pub mod resolver;
pub mod scoring;
pub mod target;
pub mod types;

use crate::model::{BattleSummary, TurnSnapshot};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// Commonly used exports for embedding clients.
pub mod prelude {
    pub use crate::client::{RandomChooser, SeededRandomChooser, SlotAction, SlotOrder, TurnOrder};
    pub use crate::config::AgentConfig;
    pub use crate::decision::{Decision, DecisionEngine, DecisionKind};
    pub use crate::model::{BattleSummary, Combatant, Move, MoveCategory, TurnSnapshot};
    pub use crate::profile::{OpponentProfile, ProfileStore};
    pub use crate::target::MoveTarget;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn load_one_or_many<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed: OneOrMany<T> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    Ok(match parsed {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

/// A single snapshot object or an array of them.
pub fn load_snapshots(path: &Path) -> anyhow::Result<Vec<TurnSnapshot>> {
    load_one_or_many(path)
}

pub fn load_summaries(path: &Path) -> anyhow::Result<Vec<BattleSummary>> {
    load_one_or_many(path)
}
