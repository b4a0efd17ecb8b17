//! Boundary adapter for a move's target field.
//!
//! Battle clients hand the target over as a plain string, as an enumerator
//! name (`ALL_ADJACENT_FOES`), or as an object carrying `name`/`value`. All of
//! these collapse into [`MoveTarget`] during deserialization, so nothing past
//! this module ever looks at the raw representation.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(from = "RawTarget", into = "String")]
pub enum MoveTarget {
    SelfUser,
    Ally,
    AdjacentAlly,
    AdjacentAllyOrSelf,
    AdjacentFoe,
    Any,
    Normal,
    AllAdjacentFoes,
    AllAdjacent,
    All,
    FoeSide,
    AllySide,
    AllyTeam,
    Allies,
    RandomNormal,
    Scripted,
    #[default]
    Unknown,
}

impl MoveTarget {
    /// Parse an already-flattened id (`alladjacentfoes`, `randomnormal`, ...).
    pub fn from_id(id: &str) -> Self {
        match normalize(id).as_str() {
            "self" => MoveTarget::SelfUser,
            "ally" => MoveTarget::Ally,
            "adjacentally" => MoveTarget::AdjacentAlly,
            "adjacentallyorself" => MoveTarget::AdjacentAllyOrSelf,
            "adjacentfoe" => MoveTarget::AdjacentFoe,
            "any" => MoveTarget::Any,
            "normal" => MoveTarget::Normal,
            "alladjacentfoes" => MoveTarget::AllAdjacentFoes,
            "alladjacent" => MoveTarget::AllAdjacent,
            "all" => MoveTarget::All,
            "foeside" => MoveTarget::FoeSide,
            "allyside" => MoveTarget::AllySide,
            "allyteam" => MoveTarget::AllyTeam,
            "allies" => MoveTarget::Allies,
            "randomnormal" => MoveTarget::RandomNormal,
            "scripted" => MoveTarget::Scripted,
            _ => MoveTarget::Unknown,
        }
    }

    /// Canonical lowercase id; empty for [`MoveTarget::Unknown`].
    pub fn as_id(self) -> &'static str {
        match self {
            MoveTarget::SelfUser => "self",
            MoveTarget::Ally => "ally",
            MoveTarget::AdjacentAlly => "adjacentally",
            MoveTarget::AdjacentAllyOrSelf => "adjacentallyorself",
            MoveTarget::AdjacentFoe => "adjacentfoe",
            MoveTarget::Any => "any",
            MoveTarget::Normal => "normal",
            MoveTarget::AllAdjacentFoes => "alladjacentfoes",
            MoveTarget::AllAdjacent => "alladjacent",
            MoveTarget::All => "all",
            MoveTarget::FoeSide => "foeside",
            MoveTarget::AllySide => "allyside",
            MoveTarget::AllyTeam => "allyteam",
            MoveTarget::Allies => "allies",
            MoveTarget::RandomNormal => "randomnormal",
            MoveTarget::Scripted => "scripted",
            MoveTarget::Unknown => "",
        }
    }
}

impl From<MoveTarget> for String {
    fn from(target: MoveTarget) -> Self {
        target.as_id().to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTarget {
    Text(String),
    Named { name: serde_json::Value },
    Valued { value: serde_json::Value },
    Other(serde_json::Value),
}

impl From<RawTarget> for MoveTarget {
    fn from(raw: RawTarget) -> Self {
        match raw {
            RawTarget::Text(text) => MoveTarget::from_id(&text),
            RawTarget::Named { name } => MoveTarget::from_id(&scalar_text(&name)),
            RawTarget::Valued { value } => MoveTarget::from_id(&scalar_text(&value)),
            RawTarget::Other(_) => MoveTarget::Unknown,
        }
    }
}

fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

// `ALL_ADJACENT_FOES`, `all-adjacent-foes` and `allAdjacentFoes` are the same target.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
