//! Turn sequencing for one duel: the player always opens, segments alternate,
//! and the duel ends as soon as a terminal check fires.

use std::fmt;

use serde::Serialize;

use crate::combatant::{Combatant, Side};
use crate::effects::{begin_turn, TurnDisposition};
use crate::events::{DuelEvent, Snapshot};
use crate::search::{SearchEngine, SearchState};
use crate::spells::SpellCatalog;
use crate::{mana, resolver, Dice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelOutcome {
    PlayerWins,
    OpponentWins,
    /// Input ended before the duel was decided.
    Aborted,
    /// Headless turn cap reached.
    Stalemate,
}

impl DuelOutcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            DuelOutcome::PlayerWins => Some(Side::Player),
            DuelOutcome::OpponentWins => Some(Side::Opponent),
            DuelOutcome::Aborted | DuelOutcome::Stalemate => None,
        }
    }
}

impl fmt::Display for DuelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DuelOutcome::PlayerWins => "You defeated MageBot!",
            DuelOutcome::OpponentWins => "You lost against MageBot...",
            DuelOutcome::Aborted => "Duel aborted.",
            DuelOutcome::Stalemate => "Stalemate: turn limit reached.",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelPhase {
    PlayerTurn,
    OpponentTurn,
    Finished(DuelOutcome),
}

/// Read-only view handed to the player's input source.
pub struct TurnView<'a> {
    pub catalog: &'a SpellCatalog,
    pub player: &'a Combatant,
    pub opponent: &'a Combatant,
    pub turn: u32,
}

/// Supplies the player's spell name for each segment the player gets to act in.
pub trait PlayerInput {
    /// `None` means input is exhausted and the duel is aborted.
    fn next_spell(&mut self, view: &TurnView<'_>) -> Option<String>;
}

/// Receives every event of the duel, in order.
pub trait DuelDisplay {
    fn show(&mut self, event: &DuelEvent);
}

impl<F: FnMut(&DuelEvent)> DuelDisplay for F {
    fn show(&mut self, event: &DuelEvent) {
        self(event)
    }
}

pub struct Duel<'a> {
    catalog: &'a SpellCatalog,
    search: SearchEngine<'a>,
    dice: Dice,
    player: Combatant,
    opponent: Combatant,
    phase: DuelPhase,
    turn: u32,
}

impl<'a> Duel<'a> {
    /// A duel between two fresh combatants; the player moves first.
    pub fn new(catalog: &'a SpellCatalog, dice: Dice) -> Self {
        Self::with_combatants(catalog, dice, Combatant::fresh(), Combatant::fresh())
    }

    pub fn with_combatants(
        catalog: &'a SpellCatalog,
        dice: Dice,
        player: Combatant,
        opponent: Combatant,
    ) -> Self {
        Self {
            catalog,
            search: SearchEngine::new(catalog),
            dice,
            player,
            opponent,
            phase: DuelPhase::PlayerTurn,
            turn: 0,
        }
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn phase(&self) -> DuelPhase {
        self.phase
    }

    /// Number of turn segments started so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<DuelOutcome> {
        match self.phase {
            DuelPhase::Finished(o) => Some(o),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.turn, &self.player, &self.opponent)
    }

    /// Plays segments until the duel is decided or input ends.
    pub fn run<I, D>(&mut self, input: &mut I, display: &mut D) -> DuelOutcome
    where
        I: PlayerInput + ?Sized,
        D: DuelDisplay + ?Sized,
    {
        self.run_capped(input, display, None)
    }

    /// Like [`Duel::run`], but ends in `Stalemate` once `max_turns` segments
    /// have been played without a decision.
    pub fn run_capped<I, D>(
        &mut self,
        input: &mut I,
        display: &mut D,
        max_turns: Option<u32>,
    ) -> DuelOutcome
    where
        I: PlayerInput + ?Sized,
        D: DuelDisplay + ?Sized,
    {
        tracing::info!("duel started");
        loop {
            if let DuelPhase::Finished(outcome) = self.phase {
                return outcome;
            }
            if max_turns.is_some_and(|cap| self.turn >= cap) {
                self.finish(DuelOutcome::Stalemate, display);
                continue;
            }
            self.step(input, display);
        }
    }

    /// Plays exactly one turn segment and returns the phase that follows.
    pub fn step<I, D>(&mut self, input: &mut I, display: &mut D) -> DuelPhase
    where
        I: PlayerInput + ?Sized,
        D: DuelDisplay + ?Sized,
    {
        match self.phase {
            DuelPhase::PlayerTurn => self.player_segment(input, display),
            DuelPhase::OpponentTurn => self.opponent_segment(display),
            DuelPhase::Finished(_) => {}
        }
        self.phase
    }

    fn player_segment<I, D>(&mut self, input: &mut I, display: &mut D)
    where
        I: PlayerInput + ?Sized,
        D: DuelDisplay + ?Sized,
    {
        self.turn += 1;
        display.show(&DuelEvent::Snapshot(self.snapshot()));
        display.show(&DuelEvent::TurnStarted {
            side: Side::Player,
            turn: self.turn,
        });

        let disposition = begin_turn(Side::Player, &mut self.player, |e| display.show(&e));
        if disposition == TurnDisposition::Act {
            let view = TurnView {
                catalog: self.catalog,
                player: &self.player,
                opponent: &self.opponent,
                turn: self.turn,
            };
            let Some(spell) = input.next_spell(&view) else {
                self.finish(DuelOutcome::Aborted, display);
                return;
            };
            resolver::cast(
                self.catalog,
                &mut self.dice,
                Side::Player,
                &mut self.player,
                &mut self.opponent,
                &spell,
                |e| display.show(&e),
            );
        }
        mana::regen(Side::Player, &mut self.player, |e| display.show(&e));

        if self.opponent.is_down() {
            self.finish(DuelOutcome::PlayerWins, display);
        } else {
            self.phase = DuelPhase::OpponentTurn;
        }
    }

    fn opponent_segment<D>(&mut self, display: &mut D)
    where
        D: DuelDisplay + ?Sized,
    {
        self.turn += 1;
        display.show(&DuelEvent::TurnStarted {
            side: Side::Opponent,
            turn: self.turn,
        });

        let disposition = begin_turn(Side::Opponent, &mut self.opponent, |e| display.show(&e));
        if disposition == TurnDisposition::Act {
            let state = SearchState::new(&self.player, &self.opponent);
            match self.search.decide(&state) {
                Some(spell) => {
                    tracing::debug!(spell = %spell.name, "MageBot chose");
                    resolver::cast(
                        self.catalog,
                        &mut self.dice,
                        Side::Opponent,
                        &mut self.opponent,
                        &mut self.player,
                        &spell.name,
                        |e| display.show(&e),
                    );
                }
                None => {
                    mana::pass_regen(Side::Opponent, &mut self.opponent, |e| display.show(&e));
                }
            }
        }
        mana::regen(Side::Opponent, &mut self.opponent, |e| display.show(&e));

        if self.player.is_down() {
            self.finish(DuelOutcome::OpponentWins, display);
        } else if self.opponent.is_down() {
            self.finish(DuelOutcome::PlayerWins, display);
        } else {
            self.phase = DuelPhase::PlayerTurn;
        }
    }

    fn finish<D>(&mut self, outcome: DuelOutcome, display: &mut D)
    where
        D: DuelDisplay + ?Sized,
    {
        self.phase = DuelPhase::Finished(outcome);
        tracing::info!(
            ?outcome,
            turns = self.turn,
            player_hp = self.player.hp,
            opponent_hp = self.opponent.hp,
            "duel ended"
        );
        display.show(&DuelEvent::Snapshot(self.snapshot()));
        display.show(&DuelEvent::DuelEnded { outcome });
    }
}
