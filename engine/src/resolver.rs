use serde::Serialize;

use crate::combatant::{Combatant, Side};
use crate::events::{CastReport, DuelEvent};
use crate::spells::{SpellCatalog, SpellEffect};
use crate::Dice;

/// Why a cast consumed the turn without doing anything.
///
/// These are gameplay outcomes, not faults: the caller reports them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CastRejection {
    #[error("unknown spell '{name}'")]
    UnknownSpell { name: String },
    #[error("not enough mana to cast {spell} (required {required}, current {available})")]
    InsufficientMana {
        spell: String,
        required: i32,
        available: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved(CastReport),
    TurnWasted(CastRejection),
}

impl Outcome {
    pub fn is_wasted(&self) -> bool {
        matches!(self, Outcome::TurnWasted(_))
    }
}

/// Resolve `spell_name` cast by `caster` (on `caster_side`) against `target`.
///
/// Rejections leave both combatants untouched. Otherwise the cost is paid
/// first, then the effect applies:
/// - damage: `max(0, magnitude - resistance)` comes off the target's hp and the
///   target's resistance is zeroed unconditionally; a status proc may then
///   overwrite the matching counter on the target.
/// - healing: caster hp rises, capped at its maximum.
/// - resistance boost: caster resistance rises, uncapped.
pub fn cast(
    catalog: &SpellCatalog,
    dice: &mut Dice,
    caster_side: Side,
    caster: &mut Combatant,
    target: &mut Combatant,
    spell_name: &str,
    mut emit: impl FnMut(DuelEvent),
) -> Outcome {
    let Some(spell) = catalog.get(spell_name) else {
        return reject(
            caster_side,
            CastRejection::UnknownSpell {
                name: spell_name.to_string(),
            },
            emit,
        );
    };
    if caster.mana < spell.cost {
        return reject(
            caster_side,
            CastRejection::InsufficientMana {
                spell: spell.name.clone(),
                required: spell.cost,
                available: caster.mana,
            },
            emit,
        );
    }

    caster.mana -= spell.cost;
    let target_side = caster_side.other();

    let report = match spell.effect {
        SpellEffect::Damage { magnitude, status } => {
            let old_res = target.resistance;
            if old_res > 0 && magnitude >= old_res {
                emit(DuelEvent::ResistanceBroken { side: target_side });
            }
            let dealt = (magnitude - old_res).max(0);
            target.take_damage(dealt);
            target.resistance = 0;
            let report = CastReport {
                caster: caster_side,
                spell: spell.name.clone(),
                class: spell.class(),
                amount: dealt,
                target: target_side,
            };
            emit(DuelEvent::Cast(report.clone()));

            if let Some(on_hit) = status {
                if dice.chance(on_hit.chance) {
                    target.status.set(on_hit.kind, on_hit.duration);
                    emit(DuelEvent::StatusInflicted {
                        side: target_side,
                        kind: on_hit.kind,
                        duration: on_hit.duration,
                    });
                }
            }
            report
        }
        SpellEffect::Healing { magnitude } => {
            let restored = caster.heal(magnitude);
            if restored < magnitude {
                emit(DuelEvent::HpCapped { side: caster_side });
            }
            let report = CastReport {
                caster: caster_side,
                spell: spell.name.clone(),
                class: spell.class(),
                amount: restored,
                target: caster_side,
            };
            emit(DuelEvent::Cast(report.clone()));
            report
        }
        SpellEffect::ResistanceBoost { magnitude } => {
            caster.resistance += magnitude;
            let report = CastReport {
                caster: caster_side,
                spell: spell.name.clone(),
                class: spell.class(),
                amount: magnitude,
                target: caster_side,
            };
            emit(DuelEvent::Cast(report.clone()));
            report
        }
    };

    tracing::debug!(
        caster = %caster_side,
        spell = %report.spell,
        amount = report.amount,
        "spell resolved"
    );
    Outcome::Resolved(report)
}

fn reject(
    side: Side,
    rejection: CastRejection,
    mut emit: impl FnMut(DuelEvent),
) -> Outcome {
    tracing::debug!(%side, %rejection, "cast rejected");
    emit(DuelEvent::CastRejected {
        side,
        rejection: rejection.clone(),
    });
    Outcome::TurnWasted(rejection)
}
