use crate::combatant::{Combatant, Side, StatusKind};
use crate::events::DuelEvent;

/// Hp lost at the start of each turn while burned.
pub const BURN_DAMAGE: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDisposition {
    Act,
    /// The turn is lost; carries the status narrated as the cause.
    Skip(StatusKind),
}

impl TurnDisposition {
    pub fn is_skip(self) -> bool {
        matches!(self, TurnDisposition::Skip(_))
    }
}

/// Call at the start of the owner's turn segment (before any action).
///
/// Burn ticks first. Then, if frozen or paralyzed, both counters are
/// decremented together (whichever was active) and the turn is skipped.
pub fn begin_turn(
    side: Side,
    state: &mut Combatant,
    mut emit: impl FnMut(DuelEvent),
) -> TurnDisposition {
    if state.status.burned > 0 {
        state.take_damage(BURN_DAMAGE);
        state.status.burned -= 1;
        tracing::debug!(%side, hp = state.hp, left = state.status.burned, "burn tick");
        emit(DuelEvent::BurnTick {
            side,
            damage: BURN_DAMAGE,
            hp: state.hp,
        });
    }

    if state.status.frozen > 0 || state.status.paralyzed > 0 {
        let cause = if state.status.frozen > 0 {
            StatusKind::Freeze
        } else {
            StatusKind::Paralyze
        };
        state.status.frozen = state.status.frozen.saturating_sub(1);
        state.status.paralyzed = state.status.paralyzed.saturating_sub(1);
        tracing::debug!(%side, %cause, "turn skipped");
        emit(DuelEvent::TurnSkipped { side, cause });
        return TurnDisposition::Skip(cause);
    }

    TurnDisposition::Act
}
