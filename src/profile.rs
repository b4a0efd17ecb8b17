//! Per-opponent memory of observed tendencies for the lifetime of the process.

use crate::classify::{is_protect, is_speed_control};
use crate::model::{to_id, BattleSummary};
use serde::Serialize;
use std::collections::HashMap;

pub const UNKNOWN_OPPONENT: &str = "_unknown_";

/// Flags only ever flip from `false` to `true`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct OpponentProfile {
    pub shown_protect: bool,
    pub shown_speed_control: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfileStore {
    profiles: HashMap<String, OpponentProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read path used while scoring. An unseen opponent reads as the
    /// all-false profile but is not stored, since `decide` only borrows the
    /// store; entries appear on the first `profile_mut`, so `len` counts
    /// opponents with a recorded battle.
    pub fn get(&self, opponent: &str) -> OpponentProfile {
        self.profiles.get(opponent).copied().unwrap_or_default()
    }

    pub fn profile_mut(&mut self, opponent: &str) -> &mut OpponentProfile {
        self.profiles.entry(opponent.to_string()).or_default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// End-of-battle update from the opponent's revealed roster.
    pub fn record_battle(&mut self, summary: &BattleSummary) {
        let key = summary.opponent.as_deref().unwrap_or(UNKNOWN_OPPONENT);
        let profile = self.profile_mut(key);
        for mon in &summary.opponent_team {
            for raw in &mon.known_moves {
                let id = to_id(raw);
                if is_protect(&id) {
                    profile.shown_protect = true;
                }
                if is_speed_control(&id) {
                    profile.shown_speed_control = true;
                }
            }
        }
    }
}
