use magebot_engine::search::{evaluate, WIN_SCORE};
use magebot_engine::{
    Combatant, SearchEngine, SearchState, Side, Spell, SpellCatalog, SpellEffect, Vitals,
};

fn spell(name: &str, cost: i32, effect: SpellEffect) -> Spell {
    Spell {
        name: name.into(),
        description: String::new(),
        cost,
        effect,
    }
}

fn vitals(hp: i32, resistance: i32, mana: i32) -> Vitals {
    Vitals {
        hp,
        max_hp: 20,
        resistance,
        mana,
        max_mana: 25,
    }
}

#[test]
fn evaluate_is_pure_and_signed_for_magebot() {
    let state = SearchState {
        player: vitals(8, 0, 10),
        opponent: vitals(12, 2, 15),
    };
    let copy = state;
    let a = evaluate(&state);
    let b = evaluate(&state);
    assert_eq!(a, b);
    assert_eq!(state, copy);
    // 4*1.0 + 2*0.5 + (5/25)*0.4*20
    assert!((a - 6.6).abs() < 1e-9);
    assert!((evaluate(&state.mirrored()) + a).abs() < 1e-9);
}

#[test]
fn projection_caps_damage_then_zeroes_resistance() {
    let catalog = SpellCatalog::default_catalog().unwrap();
    let state = SearchState::new(&Combatant::fresh(), &Combatant::fresh());

    let next = state.project(catalog.get("Glacies").unwrap(), Side::Opponent);
    assert_eq!(next.player.hp, 10);
    assert_eq!(next.player.resistance, 0);
    assert_eq!(next.opponent.mana, 13);

    let next = next.project(catalog.get("Ignis").unwrap(), Side::Opponent);
    assert_eq!(next.player.hp, 7);

    let healed = state.project(catalog.get("Vitalis").unwrap(), Side::Player);
    assert_eq!(healed.player.hp, 16);
    assert_eq!(healed.player.mana, 11);
    assert_eq!(healed.opponent, state.opponent);
}

#[test]
fn minimax_without_affordable_spells_falls_back_to_heuristic() {
    let catalog = SpellCatalog::default_catalog().unwrap();
    let engine = SearchEngine::new(&catalog);
    let state = SearchState {
        player: vitals(9, 1, 0),
        opponent: vitals(11, 3, 0),
    };
    assert_eq!(engine.minimax(&state, 2, true), evaluate(&state));
    assert_eq!(engine.minimax(&state, 2, false), evaluate(&state));
}

#[test]
fn full_hp_falls_back_to_healing_when_nothing_else_is_affordable() {
    let catalog = SpellCatalog::new(vec![
        spell("Bolt", 5, SpellEffect::Damage { magnitude: 5, status: None }),
        spell("Mend", 1, SpellEffect::Healing { magnitude: 3 }),
    ])
    .unwrap();
    let engine = SearchEngine::new(&catalog);
    let state = SearchState {
        player: vitals(10, 5, 15),
        opponent: vitals(20, 5, 1),
    };
    let affordable = catalog.affordable(state.opponent.mana);
    assert_eq!(affordable.len(), 1);
    let chosen = engine.choose_spell(&state, &affordable).unwrap();
    assert_eq!(chosen.name, "Mend");
}

#[test]
fn full_hp_skips_healing_when_alternatives_exist() {
    let catalog = SpellCatalog::new(vec![
        spell("Mend", 1, SpellEffect::Healing { magnitude: 3 }),
        spell("Ward", 1, SpellEffect::ResistanceBoost { magnitude: 1 }),
    ])
    .unwrap();
    let engine = SearchEngine::new(&catalog);
    let state = SearchState {
        player: vitals(10, 5, 15),
        opponent: vitals(20, 5, 15),
    };
    assert_eq!(engine.decide(&state).unwrap().name, "Ward");
}

#[test]
fn ties_keep_catalog_order() {
    let catalog = SpellCatalog::new(vec![
        spell("First", 1, SpellEffect::ResistanceBoost { magnitude: 1 }),
        spell("Second", 1, SpellEffect::ResistanceBoost { magnitude: 1 }),
    ])
    .unwrap();
    let engine = SearchEngine::new(&catalog);
    let state = SearchState::new(&Combatant::fresh(), &Combatant::fresh());
    assert_eq!(engine.decide(&state).unwrap().name, "First");
}

#[test]
fn takes_the_kill_when_available() {
    let catalog = SpellCatalog::default_catalog().unwrap();
    let engine = SearchEngine::new(&catalog);
    let state = SearchState {
        player: vitals(2, 0, 15),
        opponent: vitals(10, 5, 15),
    };
    let chosen = engine.decide(&state).unwrap();
    assert_eq!(chosen.name, "Ignis");
    let next = state.project(chosen, Side::Opponent);
    assert_eq!(engine.minimax(&next, 2, false), WIN_SCORE);
}

#[test]
fn nothing_affordable_means_no_choice() {
    let catalog = SpellCatalog::default_catalog().unwrap();
    let engine = SearchEngine::new(&catalog);
    let state = SearchState {
        player: vitals(10, 5, 15),
        opponent: vitals(10, 5, 0),
    };
    assert!(engine.decide(&state).is_none());
    assert!(engine.choose_spell(&state, &[]).is_none());
}

#[test]
fn decision_is_deterministic() {
    let catalog = SpellCatalog::default_catalog().unwrap();
    let engine = SearchEngine::new(&catalog);
    let state = SearchState::new(&Combatant::fresh(), &Combatant::fresh());
    let first = engine.decide(&state).map(|s| s.name.clone());
    for _ in 0..5 {
        assert_eq!(engine.decide(&state).map(|s| s.name.clone()), first);
    }
    assert!(first.is_some());
}
