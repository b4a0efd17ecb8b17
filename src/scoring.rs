//! Heuristic move scoring against one target or against every live foe.

use crate::ally::ally_safe;
use crate::classify::{
    can_hit_ally, is_cooldown, is_protect, utility_kind, BoostStat, UtilityKind,
    FRIENDLY_FIRE_IDS, UNSAFE_ON_ALLY_IDS,
};
use crate::model::{Combatant, Move};
use crate::profile::OpponentProfile;
use crate::resolver::{accuracy, attack_multiplier, effectiveness, stab};
use crate::types::TypeChart;

pub const MAX_STAGE: i8 = 6;
pub const SETUP_BASE: f32 = 26.0;
pub const SETUP_PER_STAGE: f32 = 1.5;
pub const SPEED_CONTROL_BASE: f32 = 32.0;
pub const SPEED_CONTROL_PER_STAGE: f32 = 3.0;
pub const REDIRECT_SCORE: f32 = 28.0;
pub const PROTECT_BASE: f32 = 28.0;
pub const PROTECT_HABIT_BONUS: f32 = 3.0;
pub const WIDE_GUARD_SCORE: f32 = 27.0;
pub const PIVOT_BASE: f32 = 12.0;
pub const PIVOT_DROP_BONUS: f32 = 3.0;
pub const FILLER_SCORE: f32 = 4.0;

pub const LOW_HP_THRESHOLD: f32 = 0.35;
pub const COOLDOWN_PENALTY: f32 = 0.70;
pub const PROTECT_RISK_FACTOR: f32 = 0.6;
pub const FRIENDLY_FIRE_PENALTY: f32 = 0.20;
pub const SPREAD_COVERAGE_BONUS: f32 = 1.03;

/// Tier bonuses applied to one damage term.
#[derive(Clone, Copy, Debug)]
struct DamageBonuses {
    quad: f32,
    double: f32,
    low_hp: f32,
}

const SINGLE_BONUSES: DamageBonuses = DamageBonuses {
    quad: 1.20,
    double: 1.12,
    low_hp: 1.15,
};

const SPREAD_BONUSES: DamageBonuses = DamageBonuses {
    quad: 1.12,
    double: 1.06,
    low_hp: 1.10,
};

/// Everything a scorer reads besides the move and the combatants.
#[derive(Clone, Copy, Debug)]
pub struct ScoringContext<'a> {
    pub chart: &'a TypeChart,
    pub profile: OpponentProfile,
    pub spread_damage_mod: f32,
}

impl<'a> ScoringContext<'a> {
    pub fn new(chart: &'a TypeChart, profile: OpponentProfile, spread_damage_mod: f32) -> Self {
        Self {
            chart,
            profile,
            spread_damage_mod,
        }
    }
}

pub fn protect_risk_factor(target: &Combatant) -> f32 {
    match target.last_move.as_deref() {
        Some(id) if is_protect(id) => PROTECT_RISK_FACTOR,
        _ => 1.0,
    }
}

/// Score of `mv` used by `actor` on `target`. Zero means "never pick".
pub fn score_single(ctx: &ScoringContext<'_>, mv: &Move, actor: &Combatant, target: &Combatant) -> f32 {
    if mv.is_damaging() && can_hit_ally(mv.target) && UNSAFE_ON_ALLY_IDS.contains(mv.id.as_str()) {
        return 0.0;
    }
    if !mv.is_damaging() {
        return score_utility(ctx, mv, actor);
    }
    let eff = effectiveness(ctx.chart, mv.move_type.as_deref(), Some(target));
    if eff == 0.0 {
        return 0.0;
    }
    let mut score = damage_term(mv, actor, target, eff, SINGLE_BONUSES);
    if is_cooldown(mv) {
        score *= COOLDOWN_PENALTY;
    }
    score * protect_risk_factor(target)
}

/// Score of a non-damaging move; independent of the target.
pub fn score_utility(ctx: &ScoringContext<'_>, mv: &Move, actor: &Combatant) -> f32 {
    let boosts = &actor.boosts;
    match utility_kind(&mv.id) {
        UtilityKind::Setup(stat) => {
            let stage = match stat {
                BoostStat::Attack => boosts.atk,
                BoostStat::SpecialAttack => boosts.spa,
            };
            let needed = (-stage.clamp(-MAX_STAGE, MAX_STAGE)).max(0);
            SETUP_BASE + SETUP_PER_STAGE * needed as f32
        }
        UtilityKind::SpeedControl => {
            let deficit = (i32::from(actor.is_paralyzed()) - i32::from(boosts.spe)).max(0);
            SPEED_CONTROL_BASE + SPEED_CONTROL_PER_STAGE * deficit as f32
        }
        UtilityKind::Redirection => REDIRECT_SCORE,
        UtilityKind::Protection => {
            if ctx.profile.shown_protect {
                PROTECT_BASE + PROTECT_HABIT_BONUS
            } else {
                PROTECT_BASE
            }
        }
        UtilityKind::FieldProtection => WIDE_GUARD_SCORE,
        UtilityKind::Pivot => {
            if boosts.atk <= -2 || boosts.spa <= -2 {
                PIVOT_BASE + PIVOT_DROP_BONUS
            } else {
                PIVOT_BASE
            }
        }
        UtilityKind::Other => FILLER_SCORE,
    }
}

/// Aggregate score of a multi-target move over every live opponent.
pub fn score_spread(
    ctx: &ScoringContext<'_>,
    mv: &Move,
    actor: &Combatant,
    opponents: &[&Combatant],
    ally: Option<&Combatant>,
) -> f32 {
    if !mv.is_damaging() {
        return 0.0;
    }
    let mut total = 0.0;
    let mut hits = 0usize;
    for target in opponents.iter().filter(|t| t.is_live()) {
        let eff = effectiveness(ctx.chart, mv.move_type.as_deref(), Some(*target));
        if eff == 0.0 {
            continue;
        }
        hits += 1;
        total += damage_term(mv, actor, target, eff, SPREAD_BONUSES) * protect_risk_factor(target);
    }
    if FRIENDLY_FIRE_IDS.contains(mv.id.as_str())
        && ally.is_some()
        && hits > 0
        && !ally_safe(&mv.id, mv.move_type.as_deref(), ally)
    {
        total *= FRIENDLY_FIRE_PENALTY;
    }
    total * ctx.spread_damage_mod * SPREAD_COVERAGE_BONUS
}

fn damage_term(mv: &Move, actor: &Combatant, target: &Combatant, eff: f32, bonuses: DamageBonuses) -> f32 {
    let mut score =
        mv.base_power as f32 * stab(mv, actor) * eff * accuracy(mv) * attack_multiplier(actor, mv);
    if eff >= 4.0 {
        score *= bonuses.quad;
    } else if eff >= 2.0 {
        score *= bonuses.double;
    }
    if target.hp_fraction < LOW_HP_THRESHOLD {
        score *= bonuses.low_hp;
    }
    score
}
