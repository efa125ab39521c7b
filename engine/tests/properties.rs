use magebot_engine::effects::begin_turn;
use magebot_engine::resolver::cast;
use magebot_engine::search::evaluate;
use magebot_engine::{
    Combatant, Dice, SearchEngine, SearchState, Side, Spell, SpellCatalog, SpellEffect,
    StatusEffects, StatusKind, StatusProc,
};
use proptest::prelude::*;

fn catalog(magnitude: i32) -> SpellCatalog {
    let spell = |name: &str, effect| Spell {
        name: name.into(),
        description: String::new(),
        cost: 1,
        effect,
    };
    SpellCatalog::new(vec![
        spell(
            "Hit",
            SpellEffect::Damage {
                magnitude,
                status: Some(StatusProc {
                    kind: StatusKind::Burn,
                    duration: 2,
                    chance: 0.5,
                }),
            },
        ),
        spell("Heal", SpellEffect::Healing { magnitude }),
        spell("Ward", SpellEffect::ResistanceBoost { magnitude }),
    ])
    .unwrap()
}

prop_compose! {
    fn combatant()(
        hp in 1..=20i32,
        resistance in 0..30i32,
        mana in 1..=25i32,
        frozen in 0..3u32,
        paralyzed in 0..3u32,
        burned in 0..3u32,
    ) -> Combatant {
        Combatant {
            hp,
            resistance,
            mana,
            status: StatusEffects { frozen, paralyzed, burned },
            ..Combatant::fresh()
        }
    }
}

proptest! {
    #[test]
    fn damage_always_zeroes_resistance(
        mut me in combatant(),
        mut foe in combatant(),
        magnitude in 0..15i32,
        seed in any::<u64>(),
    ) {
        let catalog = catalog(magnitude);
        let mut dice = Dice::from_seed(seed);
        let before = foe;
        cast(&catalog, &mut dice, Side::Player, &mut me, &mut foe, "Hit", |_| {});
        prop_assert_eq!(foe.resistance, 0);
        prop_assert_eq!(foe.hp, (before.hp - (magnitude - before.resistance).max(0)).max(0));
    }

    #[test]
    fn healing_never_exceeds_max(mut me in combatant(), magnitude in 0..30i32) {
        let catalog = catalog(magnitude);
        let mut dice = Dice::from_seed(0);
        let mut foe = Combatant::fresh();
        cast(&catalog, &mut dice, Side::Player, &mut me, &mut foe, "Heal", |_| {});
        prop_assert!(me.hp <= me.max_hp);
        prop_assert!(me.hp >= 0);
    }

    #[test]
    fn boost_adds_exactly_its_magnitude(mut me in combatant(), magnitude in 0..30i32) {
        let catalog = catalog(magnitude);
        let mut dice = Dice::from_seed(0);
        let mut foe = Combatant::fresh();
        let before = me.resistance;
        cast(&catalog, &mut dice, Side::Player, &mut me, &mut foe, "Ward", |_| {});
        prop_assert_eq!(me.resistance, before + magnitude);
    }

    #[test]
    fn turn_start_keeps_counters_and_hp_in_bounds(mut c in combatant()) {
        let before = c.status;
        let disposition = begin_turn(Side::Opponent, &mut c, |_| {});
        prop_assert!(c.hp >= 0);
        prop_assert_eq!(disposition.is_skip(), before.frozen > 0 || before.paralyzed > 0);
        prop_assert_eq!(c.status.burned, before.burned.saturating_sub(1));
    }

    #[test]
    fn evaluate_is_pure(p in combatant(), o in combatant()) {
        let state = SearchState::new(&p, &o);
        let copy = state;
        prop_assert_eq!(evaluate(&state), evaluate(&copy));
        prop_assert_eq!(state, copy);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn search_is_deterministic_and_affordable(p in combatant(), o in combatant()) {
        let catalog = SpellCatalog::default_catalog().unwrap();
        let engine = SearchEngine::new(&catalog);
        let state = SearchState::new(&p, &o);
        let a = engine.decide(&state).map(|s| s.name.clone());
        let b = engine.decide(&state).map(|s| s.name.clone());
        prop_assert_eq!(&a, &b);
        if let Some(name) = a {
            prop_assert!(catalog.get(&name).unwrap().cost <= o.mana);
        }
    }
}
