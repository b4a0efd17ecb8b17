use crate::target::MoveTarget;
use serde::{Deserialize, Deserializer, Serialize};

/// Clients send `Physical`, `PHYSICAL` or `physical`; anything unrecognized is `Status`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    #[default]
    Status,
}

impl From<String> for MoveCategory {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "physical" => MoveCategory::Physical,
            "special" => MoveCategory::Special,
            _ => MoveCategory::Status,
        }
    }
}

/// Only burn and paralysis feed into scoring; everything else is carried as `Other`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum StatusCondition {
    Burn,
    Paralysis,
    Other,
}

impl From<String> for StatusCondition {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "brn" | "burn" => StatusCondition::Burn,
            "par" | "paralysis" => StatusCondition::Paralysis,
            _ => StatusCondition::Other,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatBoosts {
    #[serde(default, deserialize_with = "de_or_default")]
    pub atk: i8,
    #[serde(default, deserialize_with = "de_or_default")]
    pub def: i8,
    #[serde(default, deserialize_with = "de_or_default")]
    pub spa: i8,
    #[serde(default, deserialize_with = "de_or_default")]
    pub spd: i8,
    #[serde(default, deserialize_with = "de_or_default")]
    pub spe: i8,
    #[serde(default, alias = "accuracy", deserialize_with = "de_or_default")]
    pub acc: i8,
    #[serde(default, alias = "evasion", deserialize_with = "de_or_default")]
    pub eva: i8,
}

fn full_hp() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Combatant {
    #[serde(default, deserialize_with = "de_or_default")]
    pub species: String,
    #[serde(default = "full_hp", alias = "current_hp_fraction", deserialize_with = "de_hp")]
    pub hp_fraction: f32,
    #[serde(default)]
    pub status: Option<StatusCondition>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub boosts: StatBoosts,
    #[serde(default, deserialize_with = "de_or_default")]
    pub types: Vec<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub fainted: bool,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub last_move: Option<String>,
    /// Move ids revealed so far; only read from the opponent's roster.
    #[serde(default, alias = "moves", deserialize_with = "de_or_default")]
    pub known_moves: Vec<String>,
}

impl Combatant {
    pub fn new(species: &str, types: &[&str]) -> Self {
        Combatant {
            species: species.to_string(),
            hp_fraction: 1.0,
            status: None,
            boosts: StatBoosts::default(),
            types: types.iter().map(|t| t.to_string()).collect(),
            ability: None,
            item: None,
            fainted: false,
            last_move: None,
            known_moves: Vec::new(),
        }
    }

    pub fn is_live(&self) -> bool {
        !self.fainted && self.hp_fraction > 0.0
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    pub fn ability_id(&self) -> String {
        self.ability.as_deref().map(to_id).unwrap_or_default()
    }

    pub fn item_id(&self) -> String {
        self.item.as_deref().map(to_id).unwrap_or_default()
    }

    pub fn is_burned(&self) -> bool {
        self.status == Some(StatusCondition::Burn)
    }

    pub fn is_paralyzed(&self) -> bool {
        self.status == Some(StatusCondition::Paralysis)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Move {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub move_type: Option<String>,
    #[serde(default, alias = "power", deserialize_with = "de_or_default")]
    pub base_power: u32,
    /// Hit chance in (0, 1]; `None` never misses.
    #[serde(default, deserialize_with = "de_accuracy")]
    pub accuracy: Option<f32>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub category: MoveCategory,
    #[serde(default)]
    pub target: MoveTarget,
    #[serde(default, deserialize_with = "de_or_default")]
    pub recharge: bool,
}

impl Move {
    pub fn new(id: &str, move_type: &str, category: MoveCategory, base_power: u32) -> Self {
        Move {
            id: to_id(id),
            move_type: Some(move_type.to_string()),
            base_power,
            accuracy: None,
            category,
            target: MoveTarget::Normal,
            recharge: false,
        }
    }

    pub fn with_target(mut self, target: MoveTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    pub fn is_damaging(&self) -> bool {
        self.base_power > 0
    }
}

/// Read-only view of one decision point, as handed over by the battle client.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TurnSnapshot {
    #[serde(default, deserialize_with = "de_or_default")]
    pub turn: u32,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default, alias = "opponent_username")]
    pub opponent: Option<String>,
    #[serde(default, alias = "active_pokemon", deserialize_with = "de_or_default")]
    pub my_active: Vec<Option<Combatant>>,
    #[serde(default, alias = "opponent_active_pokemon", deserialize_with = "de_or_default")]
    pub opp_active: Vec<Option<Combatant>>,
    #[serde(default, alias = "available_moves", deserialize_with = "de_or_default")]
    pub legal_moves: Vec<Vec<Move>>,
}

impl TurnSnapshot {
    /// Live agent combatant in `slot` (0 or 1).
    pub fn agent(&self, slot: usize) -> Option<&Combatant> {
        self.my_active
            .get(slot)
            .and_then(|c| c.as_ref())
            .filter(|c| c.is_live())
    }

    pub fn ally_of(&self, slot: usize) -> Option<&Combatant> {
        self.agent(1 - slot.min(1))
    }

    /// Live opponents paired with their 1-indexed protocol slot.
    pub fn live_opponents(&self) -> Vec<(u8, &Combatant)> {
        self.opp_active
            .iter()
            .take(2)
            .enumerate()
            .filter_map(|(idx, c)| {
                c.as_ref()
                    .filter(|c| c.is_live())
                    .map(|c| (idx as u8 + 1, c))
            })
            .collect()
    }

    pub fn moves_for(&self, slot: usize) -> &[Move] {
        self.legal_moves.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn opponent_key(&self) -> &str {
        self.opponent.as_deref().unwrap_or(crate::profile::UNKNOWN_OPPONENT)
    }
}

/// Payload of the end-of-battle hook.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BattleSummary {
    #[serde(default, alias = "opponent_username")]
    pub opponent: Option<String>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub opponent_team: Vec<Combatant>,
}

/// Showdown-style id: lowercase ASCII alphanumerics. Underscores survive so
/// legacy ids such as `water_spout` keep matching.
pub fn to_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// An explicit `null` reads the same as a missing key.
fn de_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn de_hp<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or_else(full_hp))
}

fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(to_id).unwrap_or_default())
}

fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(to_id).filter(|id| !id.is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAccuracy {
    Chance(f32),
    AlwaysHits(bool),
}

// `true` (and anything non-positive) means the move cannot miss; values above 1 are percentages.
fn de_accuracy<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAccuracy>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawAccuracy::Chance(value)) if value > 1.0 => Some((value / 100.0).min(1.0)),
        Some(RawAccuracy::Chance(value)) if value > 0.0 => Some(value),
        _ => None,
    })
}
