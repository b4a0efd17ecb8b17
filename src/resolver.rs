// Ref: pokemon-showdown/sim/battle.ts: modify()/boost table; sim/battle-actions.ts: getDamage.
use crate::model::{Combatant, Move, MoveCategory};
use crate::types::TypeChart;

pub const STAB_MULTIPLIER: f32 = 1.5;
pub const BURN_ATTACK_MULTIPLIER: f32 = 0.65;

/// Type multiplier of `move_type` against `defender`; neutral when either side is missing.
pub fn effectiveness(chart: &TypeChart, move_type: Option<&str>, defender: Option<&Combatant>) -> f32 {
    match (move_type, defender) {
        (Some(t), Some(d)) if !t.is_empty() => chart.effectiveness(t, &d.types),
        _ => 1.0,
    }
}

pub fn stab(mv: &Move, attacker: &Combatant) -> f32 {
    match mv.move_type.as_deref() {
        Some(t) if attacker.has_type(t) => STAB_MULTIPLIER,
        _ => 1.0,
    }
}

pub fn accuracy(mv: &Move) -> f32 {
    match mv.accuracy {
        Some(acc) if acc > 0.0 => acc,
        _ => 1.0,
    }
}

pub fn stage_multiplier(stage: i8) -> f32 {
    let stage = stage.clamp(-6, 6) as f32;
    if stage >= 0.0 {
        (2.0 + stage) / 2.0
    } else {
        2.0 / (2.0 - stage)
    }
}

pub fn attack_multiplier(attacker: &Combatant, mv: &Move) -> f32 {
    match mv.category {
        MoveCategory::Physical => {
            let mut mult = stage_multiplier(attacker.boosts.atk);
            if attacker.is_burned() {
                mult *= BURN_ATTACK_MULTIPLIER;
            }
            mult
        }
        MoveCategory::Special => stage_multiplier(attacker.boosts.spa),
        MoveCategory::Status => 1.0,
    }
}
