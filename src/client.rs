//! Seam to the battle client: turn orders and the uniform-random chooser.

use crate::classify::requires_explicit_target;
use crate::model::{Move, TurnSnapshot};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SlotOrder {
    pub move_id: String,
    /// Opposing protocol slot (1 or 2); `None` lets the simulator resolve it.
    pub target: Option<u8>,
}

impl SlotOrder {
    pub fn new(mv: &Move, target: Option<u8>) -> Self {
        SlotOrder {
            move_id: mv.id.clone(),
            target,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SlotAction {
    Move(SlotOrder),
    /// Slot is empty this turn.
    Pass,
    /// Let the simulator pick.
    Default,
}

impl SlotAction {
    fn choice(&self) -> String {
        match self {
            SlotAction::Move(order) => match order.target {
                Some(t) => format!("move {} {}", order.move_id, t),
                None => format!("move {}", order.move_id),
            },
            SlotAction::Pass => "pass".to_string(),
            SlotAction::Default => "default".to_string(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TurnOrder {
    pub slots: [SlotAction; 2],
}

impl TurnOrder {
    pub fn double(first: SlotAction, second: SlotAction) -> Self {
        TurnOrder {
            slots: [first, second],
        }
    }

    /// Simulator choice line, e.g. `/choose move earthquake, move protect`.
    pub fn to_choice_string(&self) -> String {
        format!("/choose {}, {}", self.slots[0].choice(), self.slots[1].choice())
    }
}

pub trait RandomChooser {
    fn choose_random(&mut self, snapshot: &TurnSnapshot) -> TurnOrder;
}

/// Uniformly random legal move (and target when one is required) per live slot.
pub struct SeededRandomChooser {
    rng: SmallRng,
}

impl SeededRandomChooser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomChooser for SeededRandomChooser {
    fn choose_random(&mut self, snapshot: &TurnSnapshot) -> TurnOrder {
        let targets: Vec<u8> = snapshot
            .live_opponents()
            .into_iter()
            .map(|(slot, _)| slot)
            .collect();
        let mut pick = |slot: usize| -> SlotAction {
            if snapshot.agent(slot).is_none() {
                return SlotAction::Pass;
            }
            let Some(mv) = snapshot.moves_for(slot).choose(&mut self.rng) else {
                return SlotAction::Default;
            };
            let target = if requires_explicit_target(mv) {
                targets.choose(&mut self.rng).copied()
            } else {
                None
            };
            SlotAction::Move(SlotOrder::new(mv, target))
        };
        let first = pick(0);
        let second = pick(1);
        TurnOrder::double(first, second)
    }
}
