//! Structured events handed to the display collaborator.
//!
//! Every event also renders as a single bracketed text line, which is what the
//! headless API stores in its log.

use std::fmt;

use serde::Serialize;

use crate::combatant::{Combatant, Side, StatusKind};
use crate::duel::DuelOutcome;
use crate::resolver::CastRejection;
use crate::spells::EffectClass;

/// Resources of one side at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideSnapshot {
    pub hp: i32,
    pub max_hp: i32,
    pub resistance: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub statuses: Vec<StatusKind>,
}

impl From<&Combatant> for SideSnapshot {
    fn from(c: &Combatant) -> Self {
        Self {
            hp: c.hp,
            max_hp: c.max_hp,
            resistance: c.resistance,
            mana: c.mana,
            max_mana: c.max_mana,
            statuses: c.status.active(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub turn: u32,
    pub player: SideSnapshot,
    pub opponent: SideSnapshot,
}

impl Snapshot {
    pub fn capture(turn: u32, player: &Combatant, opponent: &Combatant) -> Self {
        Self {
            turn,
            player: player.into(),
            opponent: opponent.into(),
        }
    }

    pub fn side(&self, side: Side) -> &SideSnapshot {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

/// A spell that resolved. `amount` is the damage dealt, hp restored, or
/// resistance added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastReport {
    pub caster: Side,
    pub spell: String,
    pub class: EffectClass,
    pub amount: i32,
    pub target: Side,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DuelEvent {
    Snapshot(Snapshot),
    TurnStarted { side: Side, turn: u32 },
    BurnTick { side: Side, damage: i32, hp: i32 },
    TurnSkipped { side: Side, cause: StatusKind },
    Cast(CastReport),
    CastRejected { side: Side, rejection: CastRejection },
    ResistanceBroken { side: Side },
    StatusInflicted { side: Side, kind: StatusKind, duration: u32 },
    HpCapped { side: Side },
    NoAffordableSpell { side: Side, regen: i32, mana: i32, max_mana: i32 },
    ManaRegen { side: Side, gained: i32, mana: i32, max_mana: i32 },
    DuelEnded { outcome: DuelOutcome },
}

impl fmt::Display for SideSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} HP, RES {}, Mana {}/{}",
            self.hp, self.max_hp, self.resistance, self.mana, self.max_mana
        )?;
        if !self.statuses.is_empty() {
            let names: Vec<_> = self.statuses.iter().map(|s| s.condition()).collect();
            write!(f, " [{}]", names.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for DuelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuelEvent::Snapshot(s) => write!(
                f,
                "[STATE] {}: {} | {}: {}",
                Side::Player,
                s.player,
                Side::Opponent,
                s.opponent
            ),
            DuelEvent::TurnStarted { side, turn } => write!(f, "[TURN] {} → {}", turn, side),
            DuelEvent::BurnTick { side, damage, hp } => {
                write!(f, "[BURN][{}] takes {} burn damage (HP {})", side, damage, hp)
            }
            DuelEvent::TurnSkipped { side, cause } => {
                write!(f, "[SKIP][{}] is {} and skips the turn", side, cause.condition())
            }
            DuelEvent::Cast(r) => match r.class {
                EffectClass::Damage => write!(
                    f,
                    "[CAST][{}] {} ({}) → {} magical damage dealt to {}",
                    r.caster,
                    r.spell,
                    r.class.label(),
                    r.amount,
                    r.target
                ),
                EffectClass::Healing => write!(
                    f,
                    "[CAST][{}] {} ({}) → {} HP restored",
                    r.caster,
                    r.spell,
                    r.class.label(),
                    r.amount
                ),
                EffectClass::ResistanceBoost => write!(
                    f,
                    "[CAST][{}] {} ({}) → resistance +{}",
                    r.caster,
                    r.spell,
                    r.class.label(),
                    r.amount
                ),
            },
            DuelEvent::CastRejected { side, rejection } => {
                write!(f, "[WASTED][{}] {}; turn lost", side, rejection)
            }
            DuelEvent::ResistanceBroken { side } => {
                write!(f, "[INFO][{}] resistance broken (RES:0)", side)
            }
            DuelEvent::StatusInflicted {
                side,
                kind,
                duration,
            } => write!(
                f,
                "[STATUS][{}] is now {} for {} turn(s)",
                side,
                kind.condition(),
                duration
            ),
            DuelEvent::HpCapped { side } => write!(f, "[INFO][{}] reached maximum HP", side),
            DuelEvent::NoAffordableSpell {
                side,
                regen,
                mana,
                max_mana,
            } => write!(
                f,
                "[PASS][{}] not enough mana for any spell; recovers {} mana (Mana {}/{})",
                side, regen, mana, max_mana
            ),
            DuelEvent::ManaRegen {
                side,
                gained,
                mana,
                max_mana,
            } => write!(f, "[MANA][{}] +{} (Mana {}/{})", side, gained, mana, max_mana),
            DuelEvent::DuelEnded { outcome } => write!(f, "[END] {}", outcome),
        }
    }
}
