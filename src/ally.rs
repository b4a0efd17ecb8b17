//! Whether an area move that also reaches the partner leaves it unharmed.

use crate::model::Combatant;

/// `move_type` is accepted for callers that only know the element; the rule
/// table itself is keyed on move ids.
pub fn ally_safe(move_id: &str, _move_type: Option<&str>, ally: Option<&Combatant>) -> bool {
    let Some(ally) = ally else {
        return true;
    };
    let ability = ally.ability_id();
    if ability == "telepathy" {
        return true;
    }
    match move_id {
        "earthquake" | "bulldoze" => {
            ally.has_type("Flying") || ability == "levitate" || ally.item_id() == "airballoon"
        }
        "explosion" | "selfdestruct" => ally.has_type("Ghost"),
        "discharge" => {
            ally.has_type("Ground") || matches!(ability.as_str(), "voltabsorb" | "lightningrod")
        }
        "surf" | "water_spout" => matches!(ability.as_str(), "waterabsorb" | "dryskin"),
        "heatwave" | "eruption" => ability == "flashfire",
        "sludgewave" => false,
        _ => false,
    }
}
