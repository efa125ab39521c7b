//! Ready-made player input sources for headless duels and tests.

use std::collections::VecDeque;

use crate::duel::{PlayerInput, TurnView};
use crate::search::{SearchEngine, SearchState};
use crate::spells::SpellCatalog;
use crate::Dice;

/// Replays a fixed list of spell names, then reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    spells: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(spells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            spells: spells.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.spells.len()
    }
}

impl PlayerInput for ScriptedInput {
    fn next_spell(&mut self, _view: &TurnView<'_>) -> Option<String> {
        self.spells.pop_front()
    }
}

/// Picks uniformly among the spells the player can afford.
///
/// With nothing affordable it still names the first catalog spell, which the
/// resolver rejects, wasting the turn like a human would.
pub struct RandomInput {
    dice: Dice,
}

impl RandomInput {
    pub fn new(dice: Dice) -> Self {
        Self { dice }
    }
}

impl PlayerInput for RandomInput {
    fn next_spell(&mut self, view: &TurnView<'_>) -> Option<String> {
        let affordable = view.catalog.affordable(view.player.mana);
        if affordable.is_empty() {
            return view.catalog.names().next().map(str::to_string);
        }
        let idx = self.dice.pick(affordable.len());
        Some(affordable[idx].name.clone())
    }
}

/// Plays the player's side with MageBot's own search, seen from the other chair.
pub struct SearchInput<'a> {
    engine: SearchEngine<'a>,
}

impl<'a> SearchInput<'a> {
    pub fn new(catalog: &'a SpellCatalog) -> Self {
        Self {
            engine: SearchEngine::new(catalog),
        }
    }
}

impl PlayerInput for SearchInput<'_> {
    fn next_spell(&mut self, view: &TurnView<'_>) -> Option<String> {
        let state = SearchState::new(view.player, view.opponent).mirrored();
        match self.engine.decide(&state) {
            Some(spell) => Some(spell.name.clone()),
            None => self.engine.catalog().names().next().map(str::to_string),
        }
    }
}
