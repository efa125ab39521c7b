use crate::combatant::{Combatant, Side};
use crate::events::DuelEvent;

/// Mana recovered at the end of every turn segment, skipped turns included.
pub const MANA_REGEN: i32 = 2;

/// End-of-segment regeneration. Emits `ManaRegen` only when mana actually rose.
pub fn regen(side: Side, state: &mut Combatant, mut emit: impl FnMut(DuelEvent)) -> i32 {
    let gained = state.restore_mana(MANA_REGEN);
    if gained > 0 {
        emit(DuelEvent::ManaRegen {
            side,
            gained,
            mana: state.mana,
            max_mana: state.max_mana,
        });
    }
    gained
}

/// The extra recovery granted to the computer side when it cannot afford any
/// spell. It runs in addition to [`regen`], so that path recovers up to twice
/// the usual amount in one segment.
pub fn pass_regen(side: Side, state: &mut Combatant, mut emit: impl FnMut(DuelEvent)) -> i32 {
    let gained = state.restore_mana(MANA_REGEN);
    tracing::debug!(%side, gained, mana = state.mana, "no affordable spell, passing");
    emit(DuelEvent::NoAffordableSpell {
        side,
        regen: gained,
        mana: state.mana,
        max_mana: state.max_mana,
    });
    gained
}
