use magebot_engine::effects::{begin_turn, TurnDisposition, BURN_DAMAGE};
use magebot_engine::{Combatant, DuelEvent, Side, StatusEffects, StatusKind};

fn with_status(status: StatusEffects) -> Combatant {
    Combatant {
        status,
        ..Combatant::fresh()
    }
}

#[test]
fn freeze_skip_also_ticks_paralysis() {
    let mut c = with_status(StatusEffects {
        frozen: 1,
        ..Default::default()
    });
    let disposition = begin_turn(Side::Player, &mut c, |_| {});
    assert_eq!(disposition, TurnDisposition::Skip(StatusKind::Freeze));
    assert_eq!(c.status.frozen, 0);
    assert_eq!(c.status.paralyzed, 0);
}

#[test]
fn both_counters_decrement_together() {
    let mut c = with_status(StatusEffects {
        frozen: 1,
        paralyzed: 3,
        ..Default::default()
    });
    let disposition = begin_turn(Side::Opponent, &mut c, |_| {});
    assert_eq!(disposition, TurnDisposition::Skip(StatusKind::Freeze));
    assert_eq!((c.status.frozen, c.status.paralyzed), (0, 2));

    let disposition = begin_turn(Side::Opponent, &mut c, |_| {});
    assert_eq!(disposition, TurnDisposition::Skip(StatusKind::Paralyze));
    assert_eq!((c.status.frozen, c.status.paralyzed), (0, 1));
}

#[test]
fn burn_ticks_before_the_skip_check() {
    let mut c = with_status(StatusEffects {
        burned: 2,
        paralyzed: 1,
        ..Default::default()
    });
    let mut events = vec![];
    let disposition = begin_turn(Side::Player, &mut c, |e| events.push(e));

    assert!(disposition.is_skip());
    assert_eq!(c.hp, 10 - BURN_DAMAGE);
    assert_eq!(c.status.burned, 1);
    assert_eq!(
        events,
        vec![
            DuelEvent::BurnTick {
                side: Side::Player,
                damage: 1,
                hp: 9
            },
            DuelEvent::TurnSkipped {
                side: Side::Player,
                cause: StatusKind::Paralyze
            },
        ]
    );
}

#[test]
fn burn_alone_does_not_skip() {
    let mut c = with_status(StatusEffects {
        burned: 1,
        ..Default::default()
    });
    assert_eq!(begin_turn(Side::Player, &mut c, |_| {}), TurnDisposition::Act);
    assert_eq!(c.hp, 9);
    assert!(c.status.is_clear());
}

#[test]
fn burn_cannot_push_hp_below_zero() {
    let mut c = Combatant {
        hp: 0,
        status: StatusEffects {
            burned: 1,
            ..Default::default()
        },
        ..Combatant::fresh()
    };
    begin_turn(Side::Opponent, &mut c, |_| {});
    assert_eq!(c.hp, 0);
}

#[test]
fn clear_combatant_acts_silently() {
    let mut c = Combatant::fresh();
    let mut events = vec![];
    assert_eq!(
        begin_turn(Side::Player, &mut c, |e| events.push(e)),
        TurnDisposition::Act
    );
    assert!(events.is_empty());
    assert_eq!(c, Combatant::fresh());
}
