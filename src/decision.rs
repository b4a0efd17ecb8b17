//! Per-turn orchestration: candidates per slot, target binding, and the
//! fallback chain that guarantees an order every turn.

use crate::classify::{is_spread, requires_explicit_target};
use crate::client::{RandomChooser, SlotAction, SlotOrder, TurnOrder};
use crate::config::AgentConfig;
use crate::model::{BattleSummary, Combatant, Move, TurnSnapshot};
use crate::profile::ProfileStore;
use crate::scoring::{score_single, score_spread, ScoringContext};
use crate::types::TypeChart;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

/// Bias toward the foe slot 0 already committed to.
pub const FOCUS_FIRE_BIAS: f32 = 1.20;
const TRACE_DEPTH: usize = 3;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecisionError {
    #[error("no active combatant on the agent's side")]
    NoActiveCombatant,
    #[error("slot {slot} has no damaging move to fall back on")]
    NoUsableMove { slot: usize },
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateTag {
    Spread,
    Single,
    Utility,
}

#[derive(Clone, Debug)]
pub struct Candidate<'a> {
    pub score: f32,
    pub mv: &'a Move,
    /// Opposing protocol slot, 0 when the move takes no explicit target.
    pub target: u8,
    pub tag: CandidateTag,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateTrace {
    pub move_id: String,
    pub score: f32,
    pub target: u8,
    pub tag: CandidateTag,
}

impl From<&Candidate<'_>> for CandidateTrace {
    fn from(c: &Candidate<'_>) -> Self {
        CandidateTrace {
            move_id: c.mv.id.clone(),
            score: c.score,
            target: c.target,
            tag: c.tag,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotOutcome {
    Best,
    FallbackAttack,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlotTrace {
    pub slot: usize,
    pub species: String,
    pub hp_fraction: f32,
    pub top: Vec<CandidateTrace>,
    pub outcome: SlotOutcome,
    pub action: SlotAction,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionKind {
    Heuristic,
    RandomFallback { reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Decision {
    pub turn: u32,
    pub kind: DecisionKind,
    pub order: TurnOrder,
    pub trace: Vec<SlotTrace>,
}

impl Decision {
    pub fn is_random(&self) -> bool {
        matches!(self.kind, DecisionKind::RandomFallback { .. })
    }
}

/// The agent's decision core. Profiles are read while deciding and written
/// only through [`DecisionEngine::on_battle_finished`].
#[derive(Clone, Debug, Default)]
pub struct DecisionEngine {
    config: AgentConfig,
    profiles: ProfileStore,
}

impl DecisionEngine {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            profiles: ProfileStore::new(),
        }
    }

    pub fn with_profiles(config: AgentConfig, profiles: ProfileStore) -> Self {
        Self { config, profiles }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// Always yields an order; any planning error turns into a random turn.
    pub fn decide(&self, snapshot: &TurnSnapshot, chooser: &mut dyn RandomChooser) -> Decision {
        match self.plan_turn(snapshot) {
            Ok((order, trace)) => {
                if self.config.debug_decisions {
                    tracing::debug!(turn = snapshot.turn, choice = %order.to_choice_string(), "double order ready");
                }
                Decision {
                    turn: snapshot.turn,
                    kind: DecisionKind::Heuristic,
                    order,
                    trace,
                }
            }
            Err(err) => {
                if self.config.verbose {
                    tracing::warn!(turn = snapshot.turn, error = %err, "falling back to a random turn");
                }
                Decision {
                    turn: snapshot.turn,
                    kind: DecisionKind::RandomFallback {
                        reason: err.to_string(),
                    },
                    order: chooser.choose_random(snapshot),
                    trace: Vec::new(),
                }
            }
        }
    }

    pub fn on_battle_finished(&mut self, summary: &BattleSummary) {
        self.profiles.record_battle(summary);
        if self.config.debug_decisions {
            tracing::debug!(opponent = ?summary.opponent, "battle finished");
        }
    }

    fn plan_turn(&self, snapshot: &TurnSnapshot) -> Result<(TurnOrder, Vec<SlotTrace>), DecisionError> {
        if snapshot.my_active.len() > 2 || snapshot.opp_active.len() > 2 {
            return Err(DecisionError::Malformed(format!(
                "expected at most two actives per side, got {} and {}",
                snapshot.my_active.len(),
                snapshot.opp_active.len()
            )));
        }
        if snapshot.agent(0).is_none() && snapshot.agent(1).is_none() {
            return Err(DecisionError::NoActiveCombatant);
        }
        let format = snapshot
            .format
            .as_deref()
            .unwrap_or(self.config.battle_format.as_str());
        let ctx = ScoringContext::new(
            TypeChart::for_format(format),
            self.profiles.get(snapshot.opponent_key()),
            self.config.spread_damage_mod,
        );
        let opponents = snapshot.live_opponents();

        let mut slots = [SlotAction::Pass, SlotAction::Pass];
        let mut traces = Vec::new();
        let mut focus: Option<u8> = None;
        for slot in 0..2 {
            let Some(actor) = snapshot.agent(slot) else {
                continue;
            };
            let ally = snapshot.ally_of(slot);
            let (trace, committed) =
                self.plan_slot(&ctx, snapshot, slot, actor, ally, &opponents, focus)?;
            if slot == 0 {
                focus = committed;
            }
            slots[slot] = trace.action.clone();
            traces.push(trace);
        }
        Ok((TurnOrder { slots }, traces))
    }

    #[allow(clippy::too_many_arguments)]
    fn plan_slot(
        &self,
        ctx: &ScoringContext<'_>,
        snapshot: &TurnSnapshot,
        slot: usize,
        actor: &Combatant,
        ally: Option<&Combatant>,
        opponents: &[(u8, &Combatant)],
        focus: Option<u8>,
    ) -> Result<(SlotTrace, Option<u8>), DecisionError> {
        let moves = snapshot.moves_for(slot);
        let candidates = build_candidates(ctx, moves, actor, ally, opponents, focus)?;
        let top: Vec<CandidateTrace> = candidates.iter().take(TRACE_DEPTH).map(Into::into).collect();
        if self.config.debug_decisions {
            tracing::debug!(
                turn = snapshot.turn,
                slot,
                species = %actor.species,
                hp = actor.hp_fraction,
                top = ?top,
                "slot candidates"
            );
        }

        let (action, outcome, committed) = match candidates.first() {
            Some(best) => {
                let target = (requires_explicit_target(best.mv) && best.target != 0)
                    .then_some(best.target);
                (
                    SlotAction::Move(SlotOrder::new(best.mv, target)),
                    SlotOutcome::Best,
                    target,
                )
            }
            None => {
                let mv = fallback_attack(moves).ok_or(DecisionError::NoUsableMove { slot })?;
                let target = if requires_explicit_target(mv) {
                    opponents.first().map(|(s, _)| *s)
                } else {
                    None
                };
                (
                    SlotAction::Move(SlotOrder::new(mv, target)),
                    SlotOutcome::FallbackAttack,
                    None,
                )
            }
        };
        if self.config.debug_decisions {
            tracing::debug!(turn = snapshot.turn, slot, action = ?action, outcome = ?outcome, "slot decided");
        }
        Ok((
            SlotTrace {
                slot,
                species: actor.species.clone(),
                hp_fraction: actor.hp_fraction,
                top,
                outcome,
                action,
            },
            committed,
        ))
    }
}

/// Ranked candidates, best first; ties keep evaluation order (spread pass,
/// then single-target pass).
pub fn build_candidates<'m>(
    ctx: &ScoringContext<'_>,
    moves: &'m [Move],
    actor: &Combatant,
    ally: Option<&Combatant>,
    opponents: &[(u8, &Combatant)],
    focus: Option<u8>,
) -> Result<Vec<Candidate<'m>>, DecisionError> {
    let mut candidates = Vec::new();
    if opponents.is_empty() {
        return Ok(candidates);
    }
    let foes: Vec<&Combatant> = opponents.iter().map(|(_, c)| *c).collect();

    // Status moves that classify as spread (Trick Room, Haze) score zero here.
    for mv in moves.iter().filter(|m| is_spread(m)) {
        let score = score_spread(ctx, mv, actor, &foes, ally);
        push_scored(&mut candidates, score, mv, 0, CandidateTag::Spread)?;
    }
    for mv in moves.iter().filter(|m| !is_spread(m)) {
        let tag = if mv.is_damaging() {
            CandidateTag::Single
        } else {
            CandidateTag::Utility
        };
        for (slot, target) in opponents {
            let mut score = score_single(ctx, mv, actor, target);
            if focus == Some(*slot) {
                score *= FOCUS_FIRE_BIAS;
            }
            push_scored(&mut candidates, score, mv, *slot, tag)?;
        }
    }
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(candidates)
}

fn push_scored<'m>(
    candidates: &mut Vec<Candidate<'m>>,
    score: f32,
    mv: &'m Move,
    target: u8,
    tag: CandidateTag,
) -> Result<(), DecisionError> {
    if !score.is_finite() {
        return Err(DecisionError::Malformed(format!(
            "non-finite score {score} for {}",
            mv.id
        )));
    }
    if score > 0.0 {
        candidates.push(Candidate {
            score,
            mv,
            target,
            tag,
        });
    }
    Ok(())
}

/// First damaging single-target move, else the first damaging move of any kind.
pub fn fallback_attack(moves: &[Move]) -> Option<&Move> {
    moves
        .iter()
        .find(|m| m.is_damaging() && !is_spread(m))
        .or_else(|| moves.iter().find(|m| m.is_damaging()))
}
