//! MageBot's decision policy: a depth-bounded minimax over a deterministic
//! projection of each spell's direct numeric effect.
//!
//! The projection ignores status procs and turn skips entirely, so the search
//! is a pure function of the state and the catalog.

use crate::combatant::{Combatant, Side};
use crate::spells::{EffectClass, Spell, SpellCatalog, SpellEffect};

/// Plies searched after MageBot's own candidate move.
pub const SEARCH_DEPTH: u32 = 2;
/// Score of a state where the player is down; its negation means MageBot is down.
pub const WIN_SCORE: f64 = 100.0;
pub const HP_WEIGHT: f64 = 1.0;
pub const RESISTANCE_WEIGHT: f64 = 0.5;
pub const MANA_WEIGHT: f64 = 0.4;

/// The numeric part of a combatant the search reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    pub hp: i32,
    pub max_hp: i32,
    pub resistance: i32,
    pub mana: i32,
    pub max_mana: i32,
}

impl From<&Combatant> for Vitals {
    fn from(c: &Combatant) -> Self {
        Self {
            hp: c.hp,
            max_hp: c.max_hp,
            resistance: c.resistance,
            mana: c.mana,
            max_mana: c.max_mana,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    pub player: Vitals,
    pub opponent: Vitals,
}

impl SearchState {
    pub fn new(player: &Combatant, opponent: &Combatant) -> Self {
        Self {
            player: player.into(),
            opponent: opponent.into(),
        }
    }

    pub fn side(&self, side: Side) -> &Vitals {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// The same position seen from the other chair.
    pub fn mirrored(&self) -> Self {
        Self {
            player: self.opponent,
            opponent: self.player,
        }
    }

    /// State after `mover` casts `spell`: cost debited, then the direct effect.
    pub fn project(&self, spell: &Spell, mover: Side) -> SearchState {
        let mut next = *self;
        let (caster, target) = match mover {
            Side::Player => (&mut next.player, &mut next.opponent),
            Side::Opponent => (&mut next.opponent, &mut next.player),
        };
        caster.mana -= spell.cost;
        match spell.effect {
            SpellEffect::Damage { magnitude, .. } => {
                let dealt = (magnitude - target.resistance).max(0);
                target.hp = (target.hp - dealt).max(0);
                target.resistance = 0;
            }
            SpellEffect::Healing { magnitude } => {
                caster.hp = (caster.hp + magnitude).min(caster.max_hp);
            }
            SpellEffect::ResistanceBoost { magnitude } => {
                caster.resistance += magnitude;
            }
        }
        next
    }
}

/// Heuristic score of a non-terminal state; positive favors MageBot.
///
/// The mana difference is normalized by MageBot's mana cap and rescaled by its
/// hp cap so the three terms sit on a comparable scale.
pub fn evaluate(state: &SearchState) -> f64 {
    let (p, o) = (&state.player, &state.opponent);
    let hp = f64::from(o.hp - p.hp) * HP_WEIGHT;
    let res = f64::from(o.resistance - p.resistance) * RESISTANCE_WEIGHT;
    let max_mana = f64::from(o.max_mana.max(1));
    let mana = (f64::from(o.mana - p.mana) / max_mana) * MANA_WEIGHT * f64::from(o.max_hp);
    hp + res + mana
}

pub struct SearchEngine<'a> {
    catalog: &'a SpellCatalog,
    depth: u32,
}

impl<'a> SearchEngine<'a> {
    pub fn new(catalog: &'a SpellCatalog) -> Self {
        Self {
            catalog,
            depth: SEARCH_DEPTH,
        }
    }

    pub fn catalog(&self) -> &'a SpellCatalog {
        self.catalog
    }

    pub fn evaluate(&self, state: &SearchState) -> f64 {
        evaluate(state)
    }

    /// Minimax value of `state`. `maximizing` means MageBot moves next.
    ///
    /// A side with nothing affordable ends the branch at the heuristic value.
    pub fn minimax(&self, state: &SearchState, depth: u32, maximizing: bool) -> f64 {
        if state.player.hp <= 0 {
            return WIN_SCORE;
        }
        if state.opponent.hp <= 0 {
            return -WIN_SCORE;
        }
        if depth == 0 {
            return evaluate(state);
        }

        let mover = if maximizing {
            Side::Opponent
        } else {
            Side::Player
        };
        let mana = state.side(mover).mana;
        let best = self
            .catalog
            .iter()
            .filter(|s| s.is_affordable(mana))
            .map(|s| self.minimax(&state.project(s, mover), depth - 1, !maximizing))
            .fold(None, |acc: Option<f64>, score| {
                Some(match acc {
                    None => score,
                    Some(a) if maximizing => a.max(score),
                    Some(a) => a.min(score),
                })
            });
        best.unwrap_or_else(|| evaluate(state))
    }

    /// Pick MageBot's spell among `affordable` (catalog order).
    ///
    /// At full hp, healing spells are dropped unless that leaves nothing. Each
    /// remaining candidate is projected and scored with the player replying
    /// next; the first strictly best score wins.
    pub fn choose_spell<'s>(
        &self,
        state: &SearchState,
        affordable: &[&'s Spell],
    ) -> Option<&'s Spell> {
        let me = &state.opponent;
        let mut candidates: Vec<&'s Spell> = if me.hp >= me.max_hp {
            affordable
                .iter()
                .copied()
                .filter(|s| s.class() != EffectClass::Healing)
                .collect()
        } else {
            affordable.to_vec()
        };
        if candidates.is_empty() {
            candidates = affordable.to_vec();
        }

        let mut best: Option<(&'s Spell, f64)> = None;
        for spell in candidates {
            if !spell.is_affordable(me.mana) {
                continue;
            }
            let next = state.project(spell, Side::Opponent);
            let score = self.minimax(&next, self.depth, false);
            tracing::debug!(spell = %spell.name, score, "search candidate");
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((spell, score));
            }
        }
        best.map(|(spell, _)| spell)
    }

    /// MageBot's move for `state`, or `None` when it cannot afford any spell.
    pub fn decide(&self, state: &SearchState) -> Option<&'a Spell> {
        let affordable = self.catalog.affordable(state.opponent.mana);
        self.choose_spell(state, &affordable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(p: (i32, i32, i32), o: (i32, i32, i32)) -> SearchState {
        let v = |(hp, resistance, mana): (i32, i32, i32)| Vitals {
            hp,
            max_hp: 20,
            resistance,
            mana,
            max_mana: 25,
        };
        SearchState {
            player: v(p),
            opponent: v(o),
        }
    }

    #[test]
    fn even_position_scores_zero() {
        assert_eq!(evaluate(&state((10, 5, 15), (10, 5, 15))), 0.0);
    }

    #[test]
    fn terminal_checks_beat_depth() {
        let catalog = SpellCatalog::default_catalog().unwrap();
        let engine = SearchEngine::new(&catalog);
        assert_eq!(engine.minimax(&state((0, 0, 0), (5, 0, 0)), 0, true), WIN_SCORE);
        assert_eq!(engine.minimax(&state((5, 0, 0), (0, 0, 0)), 3, false), -WIN_SCORE);
    }

    #[test]
    fn mana_term_is_normalized() {
        // 5 mana ahead: 5/25 * 0.4 * 20 = 1.6
        let score = evaluate(&state((10, 0, 10), (10, 0, 15)));
        assert!((score - 1.6).abs() < 1e-9);
    }
}
