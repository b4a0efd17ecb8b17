//! Static move knowledge: which ids hit several targets, which need an
//! explicit target slot, and what kind of utility a status move provides.

use crate::model::Move;
use crate::target::MoveTarget;
use phf::phf_set;

/// Substring keys; `swordsdance` also covers ids that embed it.
pub static SETUP_IDS: phf::Set<&'static str> = phf_set! {
    "swordsdance", "nastyplot", "calmmind", "quiverdance", "bulkup",
};
pub static PROTECT_IDS: phf::Set<&'static str> = phf_set! {
    "protect", "detect", "spikyshield", "kingsshield", "banefulbunker", "silktrap",
};
/// Substring keys, like [`SETUP_IDS`].
pub static SPEED_CONTROL_IDS: phf::Set<&'static str> = phf_set! {
    "trickroom", "tailwind", "icywind", "electroweb",
};
pub static REDIRECT_IDS: phf::Set<&'static str> = phf_set! {
    "followme", "ragepowder",
};
pub static PIVOT_IDS: phf::Set<&'static str> = phf_set! {
    "uturn", "voltswitch", "flipturn", "partingshot", "teleport",
};
pub static WIDE_GUARD_IDS: phf::Set<&'static str> = phf_set! {
    "wideguard",
};
pub static SPREAD_IDS: phf::Set<&'static str> = phf_set! {
    "earthquake", "bulldoze", "rockslide", "dazzlinggleam", "heatwave",
    "snarl", "muddywater", "eruption", "blizzard", "discharge", "hypervoice",
    "sludgewave", "water_spout", "makeitrain", "glaciallance", "originpulse",
    "precipiceblades", "astralbarrage",
};
/// Area moves that also strike the user's partner.
pub static FRIENDLY_FIRE_IDS: phf::Set<&'static str> = phf_set! {
    "earthquake", "bulldoze", "eruption", "water_spout", "surf", "discharge",
    "sludgewave", "explosion", "selfdestruct",
};
/// Damaging single-target moves that must never be aimed at the partner.
pub static UNSAFE_ON_ALLY_IDS: phf::Set<&'static str> = phf_set! {
    "beatup",
};
pub static COOLDOWN_IDS: phf::Set<&'static str> = phf_set! {
    "hyperbeam",
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoostStat {
    Attack,
    SpecialAttack,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UtilityKind {
    Setup(BoostStat),
    SpeedControl,
    Redirection,
    Protection,
    FieldProtection,
    Pivot,
    Other,
}

pub fn is_spread(mv: &Move) -> bool {
    SPREAD_IDS.contains(mv.id.as_str())
        || matches!(
            mv.target,
            MoveTarget::AllAdjacentFoes
                | MoveTarget::AllAdjacent
                | MoveTarget::All
                | MoveTarget::FoeSide
        )
}

/// In doubles, `normal`/`adjacentFoe`/`adjacentAlly`/`any` are ambiguous and
/// have to be bound to a concrete opposing slot (1 or 2).
pub fn requires_explicit_target(mv: &Move) -> bool {
    if is_spread(mv) {
        return false;
    }
    matches!(
        mv.target,
        MoveTarget::Normal | MoveTarget::AdjacentFoe | MoveTarget::AdjacentAlly | MoveTarget::Any
    )
}

/// Targets that could land on the user's own partner.
pub fn can_hit_ally(target: MoveTarget) -> bool {
    matches!(
        target,
        MoveTarget::AdjacentAlly | MoveTarget::Ally | MoveTarget::Any
    )
}

pub fn is_protect(id: &str) -> bool {
    PROTECT_IDS.contains(id)
}

pub fn is_speed_control(id: &str) -> bool {
    SPEED_CONTROL_IDS.iter().any(|key| id.contains(key))
}

pub fn is_cooldown(mv: &Move) -> bool {
    mv.recharge || COOLDOWN_IDS.contains(mv.id.as_str())
}

pub fn utility_kind(id: &str) -> UtilityKind {
    if SETUP_IDS.iter().any(|key| id.contains(key)) {
        let stat = if id.contains("swordsdance") || id.contains("bulkup") {
            BoostStat::Attack
        } else {
            BoostStat::SpecialAttack
        };
        return UtilityKind::Setup(stat);
    }
    if is_speed_control(id) {
        return UtilityKind::SpeedControl;
    }
    if REDIRECT_IDS.contains(id) {
        return UtilityKind::Redirection;
    }
    if is_protect(id) {
        return UtilityKind::Protection;
    }
    if WIDE_GUARD_IDS.contains(id) {
        return UtilityKind::FieldProtection;
    }
    if PIVOT_IDS.contains(id) {
        return UtilityKind::Pivot;
    }
    UtilityKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MoveCategory;

    fn mv(id: &str, target: MoveTarget) -> Move {
        Move::new(id, "normal", MoveCategory::Physical, 80).with_target(target)
    }

    #[test]
    fn spread_by_id_or_target() {
        assert!(is_spread(&mv("rockslide", MoveTarget::Normal)));
        assert!(is_spread(&mv("lavaplume", MoveTarget::AllAdjacent)));
        assert!(is_spread(&mv("spikes", MoveTarget::FoeSide)));
        assert!(!is_spread(&mv("tackle", MoveTarget::Normal)));
    }

    #[test]
    fn explicit_target_only_for_ambiguous_single_targets() {
        assert!(requires_explicit_target(&mv("tackle", MoveTarget::Normal)));
        assert!(requires_explicit_target(&mv("aurasphere", MoveTarget::Any)));
        assert!(!requires_explicit_target(&mv("protect", MoveTarget::SelfUser)));
        assert!(!requires_explicit_target(&mv("tailwind", MoveTarget::AllySide)));
        assert!(!requires_explicit_target(&mv("outrage", MoveTarget::RandomNormal)));
        assert!(!requires_explicit_target(&mv("earthquake", MoveTarget::Normal)));
        assert!(!requires_explicit_target(&mv("mystery", MoveTarget::Unknown)));
    }

    #[test]
    fn utility_priority_order() {
        assert_eq!(utility_kind("swordsdance"), UtilityKind::Setup(BoostStat::Attack));
        assert_eq!(utility_kind("calmmind"), UtilityKind::Setup(BoostStat::SpecialAttack));
        assert_eq!(utility_kind("trickroom"), UtilityKind::SpeedControl);
        assert_eq!(utility_kind("ragepowder"), UtilityKind::Redirection);
        assert_eq!(utility_kind("spikyshield"), UtilityKind::Protection);
        assert_eq!(utility_kind("wideguard"), UtilityKind::FieldProtection);
        assert_eq!(utility_kind("partingshot"), UtilityKind::Pivot);
        assert_eq!(utility_kind("willowisp"), UtilityKind::Other);
    }
}
