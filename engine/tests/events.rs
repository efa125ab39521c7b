use magebot_engine::events::SideSnapshot;
use magebot_engine::{
    CastRejection, CastReport, Combatant, DuelEvent, DuelOutcome, EffectClass, Side, Snapshot,
    StatusEffects, StatusKind,
};

#[test]
fn damage_cast_line() {
    let e = DuelEvent::Cast(CastReport {
        caster: Side::Player,
        spell: "Glacies".into(),
        class: EffectClass::Damage,
        amount: 0,
        target: Side::Opponent,
    });
    insta::assert_snapshot!(e.to_string(), @"[CAST][You] Glacies (Attack) → 0 magical damage dealt to MageBot");
}

#[test]
fn healing_and_resistance_lines() {
    let heal = DuelEvent::Cast(CastReport {
        caster: Side::Opponent,
        spell: "Vitae".into(),
        class: EffectClass::Healing,
        amount: 4,
        target: Side::Opponent,
    });
    insta::assert_snapshot!(heal.to_string(), @"[CAST][MageBot] Vitae (Healing) → 4 HP restored");

    let ward = DuelEvent::Cast(CastReport {
        caster: Side::Player,
        spell: "Tutela".into(),
        class: EffectClass::ResistanceBoost,
        amount: 1,
        target: Side::Player,
    });
    insta::assert_snapshot!(ward.to_string(), @"[CAST][You] Tutela (Resistance) → resistance +1");
}

#[test]
fn rejection_lines() {
    let unknown = DuelEvent::CastRejected {
        side: Side::Player,
        rejection: CastRejection::UnknownSpell { name: "ignis".into() },
    };
    insta::assert_snapshot!(unknown.to_string(), @"[WASTED][You] unknown spell 'ignis'; turn lost");

    let broke = DuelEvent::CastRejected {
        side: Side::Player,
        rejection: CastRejection::InsufficientMana {
            spell: "Vitalis".into(),
            required: 4,
            available: 3,
        },
    };
    insta::assert_snapshot!(broke.to_string(), @"[WASTED][You] not enough mana to cast Vitalis (required 4, current 3); turn lost");
}

#[test]
fn state_line_lists_active_statuses() {
    let frozen = Combatant {
        status: StatusEffects {
            frozen: 1,
            burned: 2,
            ..Default::default()
        },
        ..Combatant::fresh()
    };
    let s = Snapshot::capture(3, &Combatant::fresh(), &frozen);
    assert_eq!(s.opponent, SideSnapshot::from(&frozen));
    assert_eq!(s.opponent.statuses, vec![StatusKind::Freeze, StatusKind::Burn]);
    insta::assert_snapshot!(
        DuelEvent::Snapshot(s).to_string(),
        @"[STATE] You: 10/20 HP, RES 5, Mana 15/25 | MageBot: 10/20 HP, RES 5, Mana 15/25 [frozen, burned]"
    );
}

#[test]
fn status_and_end_lines() {
    let inflicted = DuelEvent::StatusInflicted {
        side: Side::Opponent,
        kind: StatusKind::Paralyze,
        duration: 1,
    };
    insta::assert_snapshot!(inflicted.to_string(), @"[STATUS][MageBot] is now paralyzed for 1 turn(s)");

    let skipped = DuelEvent::TurnSkipped {
        side: Side::Player,
        cause: StatusKind::Freeze,
    };
    insta::assert_snapshot!(skipped.to_string(), @"[SKIP][You] is frozen and skips the turn");

    let end = DuelEvent::DuelEnded {
        outcome: DuelOutcome::PlayerWins,
    };
    insta::assert_snapshot!(end.to_string(), @"[END] You defeated MageBot!");
}
