use proptest::prelude::*;
use vgc_doubles_agent::decision::build_candidates;
use vgc_doubles_agent::model::{Combatant, Move, MoveCategory, StatusCondition};
use vgc_doubles_agent::profile::OpponentProfile;
use vgc_doubles_agent::scoring::{score_single, score_spread, ScoringContext};
use vgc_doubles_agent::target::MoveTarget;
use vgc_doubles_agent::types::TypeChart;

fn ctx(profile: OpponentProfile) -> ScoringContext<'static> {
    ScoringContext::new(TypeChart::for_format("gen9randomdoublesbattle"), profile, 0.75)
}

fn make_move(id: &str, move_type: &str, category: MoveCategory, power: u32, target: MoveTarget) -> Move {
    Move::new(id, move_type, category, power).with_target(target)
}

fn make_mon(name: &str, types: &[&str]) -> Combatant {
    Combatant::new(name, types)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn unrecognized_status_move_scores_filler() {
    let mv = make_move("willowisp", "fire", MoveCategory::Status, 0, MoveTarget::Normal);
    let me = make_mon("Rotom-Wash", &["Electric", "Water"]);
    let foe = make_mon("Urshifu", &["Fighting", "Water"]);
    assert_eq!(score_single(&ctx(OpponentProfile::default()), &mv, &me, &foe), 4.0);
}

#[test]
fn neutral_attack_scores_power_times_stab() {
    let c = ctx(OpponentProfile::default());
    let foe = make_mon("Gastrodon", &["Water", "Ground"]);
    let stab_move = make_move("bodyslam", "normal", MoveCategory::Physical, 85, MoveTarget::Normal);
    let off_type = make_move("xscissor", "bug", MoveCategory::Physical, 80, MoveTarget::Normal);
    let me = make_mon("Ursaluna", &["Normal", "Ground"]);
    assert_eq!(score_single(&c, &stab_move, &me, &foe), 85.0 * 1.5);
    assert_eq!(score_single(&c, &off_type, &me, &foe), 80.0);
}

#[test]
fn quad_effective_attack_gets_tier_bonus() {
    let c = ctx(OpponentProfile::default());
    let me = make_mon("Glimmora", &["Rock", "Poison"]);
    let icebeam = make_move("icebeam", "ice", MoveCategory::Special, 90, MoveTarget::Normal);
    let quad = score_single(&c, &icebeam, &me, &make_mon("Dragonite", &["Dragon", "Flying"]));
    let neutral = score_single(&c, &icebeam, &me, &make_mon("Snorlax", &["Normal"]));
    assert_close(quad / (neutral * 4.0), 1.20);
    let double = score_single(&c, &icebeam, &me, &make_mon("Garchomp", &["Dragon", "Ground"]));
    assert_close(double, 90.0 * 4.0 * 1.20);
    let super_eff = score_single(&c, &icebeam, &me, &make_mon("Tornadus", &["Flying"]));
    assert_close(super_eff, 90.0 * 2.0 * 1.12);
}

#[test]
fn immune_target_scores_zero() {
    let c = ctx(OpponentProfile::default());
    let me = make_mon("Garchomp", &["Dragon", "Ground"]);
    let mv = make_move("highhorsepower", "ground", MoveCategory::Physical, 95, MoveTarget::Normal);
    assert_eq!(score_single(&c, &mv, &me, &make_mon("Talonflame", &["Fire", "Flying"])), 0.0);
}

#[test]
fn low_hp_and_cooldown_adjustments() {
    let c = ctx(OpponentProfile::default());
    let me = make_mon("Porygon2", &["Normal"]);
    let mut weak_foe = make_mon("Amoonguss", &["Grass", "Poison"]);
    weak_foe.hp_fraction = 0.3;
    let hyperbeam = make_move("hyperbeam", "normal", MoveCategory::Special, 150, MoveTarget::Normal);
    assert_close(score_single(&c, &hyperbeam, &me, &weak_foe), 150.0 * 1.5 * 1.15 * 0.70);

    let mut recharge = make_move("gigaimpact", "normal", MoveCategory::Physical, 150, MoveTarget::Normal);
    recharge.recharge = true;
    let healthy = make_mon("Amoonguss", &["Grass", "Poison"]);
    assert_close(score_single(&c, &recharge, &me, &healthy), 150.0 * 1.5 * 0.70);
}

#[test]
fn protecting_target_is_discounted() {
    let c = ctx(OpponentProfile::default());
    let me = make_mon("Flutter Mane", &["Ghost", "Fairy"]);
    let mv = make_move("moonblast", "fairy", MoveCategory::Special, 95, MoveTarget::Normal);
    let mut foe = make_mon("Chien-Pao", &["Dark", "Ice"]);
    let open = score_single(&c, &mv, &me, &foe);
    foe.last_move = Some("protect".to_string());
    let guarded = score_single(&c, &mv, &me, &foe);
    assert_close(guarded, open * 0.6);
}

#[test]
fn ally_targetable_unsafe_move_scores_zero() {
    let c = ctx(OpponentProfile::default());
    let me = make_mon("Whimsicott", &["Grass", "Fairy"]);
    let beatup = make_move("beatup", "dark", MoveCategory::Physical, 10, MoveTarget::AdjacentAlly);
    for foe in [make_mon("Mew", &["Psychic"]), make_mon("Snorlax", &["Normal"])] {
        assert_eq!(score_single(&c, &beatup, &me, &foe), 0.0);
    }
    let aimed = make_move("beatup", "dark", MoveCategory::Physical, 10, MoveTarget::Normal);
    assert!(score_single(&c, &aimed, &me, &make_mon("Mew", &["Psychic"])) > 0.0);
}

#[test]
fn burned_physical_attacker_is_weakened() {
    let c = ctx(OpponentProfile::default());
    let mut me = make_mon("Rillaboom", &["Grass"]);
    me.status = Some(StatusCondition::Burn);
    let mv = make_move("woodhammer", "grass", MoveCategory::Physical, 120, MoveTarget::Normal);
    let foe = make_mon("Snorlax", &["Normal"]);
    assert_close(score_single(&c, &mv, &me, &foe), 120.0 * 1.5 * 0.65);
}

#[test]
fn utility_scores() {
    let foe = make_mon("Snorlax", &["Normal"]);
    let plain = ctx(OpponentProfile::default());
    let status = |id: &str| make_move(id, "normal", MoveCategory::Status, 0, MoveTarget::SelfUser);

    let mut me = make_mon("Kingambit", &["Dark", "Steel"]);
    assert_eq!(score_single(&plain, &status("swordsdance"), &me, &foe), 26.0);
    me.boosts.atk = -2;
    assert_eq!(score_single(&plain, &status("swordsdance"), &me, &foe), 26.0 + 1.5 * 2.0);
    me.boosts.atk = 6;
    assert_eq!(score_single(&plain, &status("swordsdance"), &me, &foe), 26.0);
    me.boosts.spa = -6;
    assert_eq!(score_single(&plain, &status("nastyplot"), &me, &foe), 26.0 + 1.5 * 6.0);

    let mut slow = make_mon("Tornadus", &["Flying"]);
    slow.boosts.spe = -1;
    slow.status = Some(StatusCondition::Paralysis);
    assert_eq!(score_single(&plain, &status("tailwind"), &slow, &foe), 32.0 + 3.0 * 2.0);

    assert_eq!(score_single(&plain, &status("followme"), &me, &foe), 28.0);
    assert_eq!(score_single(&plain, &status("protect"), &me, &foe), 28.0);
    let wary = ctx(OpponentProfile {
        shown_protect: true,
        shown_speed_control: false,
    });
    assert_eq!(score_single(&wary, &status("protect"), &me, &foe), 31.0);
    assert_eq!(score_single(&plain, &status("wideguard"), &me, &foe), 27.0);

    let mut drained = make_mon("Incineroar", &["Fire", "Dark"]);
    assert_eq!(score_single(&plain, &status("partingshot"), &drained, &foe), 12.0);
    drained.boosts.spa = -2;
    assert_eq!(score_single(&plain, &status("partingshot"), &drained, &foe), 15.0);
}

#[test]
fn spread_sums_targets_then_applies_modifiers() {
    let c = ctx(OpponentProfile::default());
    let me = make_mon("Tyranitar", &["Dark"]);
    let rockslide = make_move("rockslide", "rock", MoveCategory::Physical, 75, MoveTarget::AllAdjacentFoes)
        .with_accuracy(0.9);
    let a = make_mon("Snorlax", &["Normal"]);
    let b = make_mon("Charizard", &["Fire", "Flying"]);
    let part_a = 75.0 * 0.9;
    let part_b = 75.0 * 0.9 * 4.0 * 1.12;
    let score = score_spread(&c, &rockslide, &me, &[&a, &b], None);
    assert_close(score, (part_a + part_b) * 0.75 * 1.03);
}

#[test]
fn spread_skips_immune_targets() {
    let c = ctx(OpponentProfile::default());
    let me = make_mon("Garchomp", &["Dragon", "Ground"]);
    let eq = make_move("earthquake", "ground", MoveCategory::Physical, 100, MoveTarget::AllAdjacent);
    let grounded = make_mon("Heatran", &["Fire", "Steel"]);
    let flyer = make_mon("Corviknight", &["Flying", "Steel"]);
    let score = score_spread(&c, &eq, &me, &[&grounded, &flyer], None);
    assert_close(score, 100.0 * 1.5 * 4.0 * 1.12 * 0.75 * 1.03);
    assert_eq!(score_spread(&c, &eq, &me, &[&flyer], None), 0.0);
}

#[test]
fn friendly_fire_penalty_depends_on_ally() {
    let c = ctx(OpponentProfile::default());
    let me = make_mon("Garchomp", &["Dragon", "Ground"]);
    let eq = make_move("earthquake", "ground", MoveCategory::Physical, 100, MoveTarget::AllAdjacent);
    let foes = [make_mon("Snorlax", &["Normal"]), make_mon("Kangaskhan", &["Normal"])];
    let foes: Vec<&Combatant> = foes.iter().collect();

    let flying_ally = make_mon("Tornadus", &["Flying"]);
    let grounded_ally = make_mon("Incineroar", &["Fire", "Dark"]);
    let safe = score_spread(&c, &eq, &me, &foes, Some(&flying_ally));
    let unsafe_score = score_spread(&c, &eq, &me, &foes, Some(&grounded_ally));
    assert_close(safe, 300.0 * 0.75 * 1.03);
    assert_close(unsafe_score, safe * 0.20);
}

#[test]
fn non_damaging_spread_scores_zero() {
    let c = ctx(OpponentProfile::default());
    let me = make_mon("Indeedee", &["Psychic", "Fairy"]);
    let tr = make_move("trickroom", "psychic", MoveCategory::Status, 0, MoveTarget::All);
    assert_eq!(score_spread(&c, &tr, &me, &[&make_mon("Snorlax", &["Normal"])], None), 0.0);
}

const TYPE_NAMES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

const MOVE_IDS: [&str; 12] = [
    "tackle", "earthquake", "rockslide", "hyperbeam", "surf", "heatwave", "beatup",
    "swordsdance", "tailwind", "protect", "followme", "partingshot",
];

prop_compose! {
    fn arb_mon()(
        first in prop::sample::select(TYPE_NAMES.to_vec()),
        second in prop::sample::select(TYPE_NAMES.to_vec()),
        atk in -6i8..=6,
        spa in -6i8..=6,
        spe in -6i8..=6,
        hp in 0.01f32..=1.0,
        status in 0u8..3,
    ) -> Combatant {
        let mut mon = make_mon("Ditto", &[first, second]);
        mon.boosts.atk = atk;
        mon.boosts.spa = spa;
        mon.boosts.spe = spe;
        mon.hp_fraction = hp;
        mon.status = match status {
            1 => Some(StatusCondition::Burn),
            2 => Some(StatusCondition::Paralysis),
            _ => None,
        };
        mon
    }
}

prop_compose! {
    fn arb_move()(
        id in prop::sample::select(MOVE_IDS.to_vec()),
        move_type in prop::sample::select(TYPE_NAMES.to_vec()),
        power in 0u32..=250,
        accuracy in prop::option::of(0.01f32..=1.0),
        physical in any::<bool>(),
        target in prop::sample::select(vec![
            MoveTarget::Normal,
            MoveTarget::AllAdjacentFoes,
            MoveTarget::AllAdjacent,
            MoveTarget::SelfUser,
        ]),
    ) -> Move {
        let category = match (power, physical) {
            (0, _) => MoveCategory::Status,
            (_, true) => MoveCategory::Physical,
            (_, false) => MoveCategory::Special,
        };
        let mv = make_move(id, move_type, category, power, target);
        match accuracy {
            Some(chance) => mv.with_accuracy(chance),
            None => mv,
        }
    }
}

proptest! {
    #[test]
    fn scores_are_never_negative(
        me in arb_mon(),
        ally in prop::option::of(arb_mon()),
        foe_a in arb_mon(),
        foe_b in arb_mon(),
        moves in prop::collection::vec(arb_move(), 1..5),
        shown_protect in any::<bool>(),
        focus in prop::option::of(1u8..=2),
    ) {
        let c = ctx(OpponentProfile { shown_protect, shown_speed_control: false });
        for mv in &moves {
            prop_assert!(score_single(&c, mv, &me, &foe_a) >= 0.0);
            prop_assert!(score_spread(&c, mv, &me, &[&foe_a, &foe_b], ally.as_ref()) >= 0.0);
        }
        let opponents = [(1u8, &foe_a), (2u8, &foe_b)];
        let candidates = build_candidates(&c, &moves, &me, ally.as_ref(), &opponents, focus)
            .expect("finite scores");
        for candidate in &candidates {
            prop_assert!(candidate.score > 0.0 && candidate.score.is_finite());
        }
    }
}
