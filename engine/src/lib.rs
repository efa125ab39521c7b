use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod combatant;
pub mod content;
pub mod duel;
pub mod effects;
pub mod events;
pub mod mana;
pub mod policy;
pub mod resolver;
pub mod search;
pub mod spells;

pub use combatant::{Combatant, Side, StatusEffects, StatusKind};
pub use duel::{Duel, DuelDisplay, DuelOutcome, DuelPhase, PlayerInput};
pub use events::{CastReport, DuelEvent, Snapshot};
pub use resolver::{CastRejection, Outcome};
pub use search::{SearchEngine, SearchState, Vitals};
pub use spells::{CatalogError, EffectClass, Spell, SpellCatalog, SpellEffect, StatusProc};

/// Source of the uniform rolls used for status procs.
///
/// Seeded dice are reproducible; scripted dice replay a fixed list of rolls
/// (cycling when exhausted) so tests can force a proc to land or miss.
pub struct Dice {
    source: DiceSource,
}

enum DiceSource {
    Seeded(ChaCha8Rng),
    Scripted(VecDeque<f64>),
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: DiceSource::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    pub fn from_scripted(rolls: Vec<f64>) -> Self {
        Self { source: DiceSource::Scripted(rolls.into()) }
    }

    /// Uniform roll in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        match &mut self.source {
            DiceSource::Seeded(rng) => rng.gen_range(0.0..1.0),
            DiceSource::Scripted(rolls) => match rolls.pop_front() {
                Some(r) => {
                    rolls.push_back(r);
                    r
                }
                None => 0.0,
            },
        }
    }

    /// True with probability `chance`.
    pub fn chance(&mut self, chance: f64) -> bool {
        self.unit() < chance
    }

    /// Uniform index in `0..len`; `len` must be non-zero.
    pub fn pick(&mut self, len: usize) -> usize {
        let idx = (self.unit() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}
