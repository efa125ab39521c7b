//! Config-driven headless duels: one game with a full text log, or many games
//! summarized.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::content::DEFAULT_CATALOG;
use crate::duel::{Duel, DuelOutcome, PlayerInput};
use crate::events::DuelEvent;
use crate::policy::{RandomInput, ScriptedInput, SearchInput};
use crate::spells::SpellCatalog;
use crate::Dice;

/// Segment cap for headless duels; interactive duels have none.
pub const DEFAULT_MAX_TURNS: u32 = 200;

/// Offset between the proc stream and the random player's stream.
const POLICY_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Who plays the human side in a headless duel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerPolicy {
    #[default]
    Search,
    Random,
    Scripted { spells: Vec<String> },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DuelConfig {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub catalog_id: Option<String>,
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default)]
    pub player: PlayerPolicy,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            catalog_id: None,
            catalog_path: None,
            player: PlayerPolicy::default(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DuelResult {
    pub winner: String,
    pub outcome: DuelOutcome,
    pub turns: u32,
    pub player_hp_end: i32,
    pub opponent_hp_end: i32,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DuelStats {
    pub samples: u32,
    pub player_wins: u32,
    pub opponent_wins: u32,
    pub stalemates: u32,
    pub aborted: u32,
    pub mean_turns: f64,
}

/// Resolve the catalog named by `cfg`, falling back to the built-in one.
pub fn load_catalog(cfg: &DuelConfig) -> Result<SpellCatalog> {
    match (&cfg.catalog_id, &cfg.catalog_path) {
        (Some(_), Some(_)) => bail!("catalog_id and catalog_path are mutually exclusive"),
        (_, Some(path)) => SpellCatalog::load(path)
            .with_context(|| format!("failed to load spell catalog: {}", path)),
        (id, None) => {
            let id = id.as_deref().unwrap_or(DEFAULT_CATALOG);
            SpellCatalog::builtin(id)
                .with_context(|| format!("failed to load built-in catalog: {}", id))
        }
    }
}

pub fn simulate_duel(cfg: DuelConfig) -> Result<DuelResult> {
    let catalog = load_catalog(&cfg)?;
    Ok(run_duel(&catalog, &cfg))
}

/// Runs `samples` duels with seeds `cfg.seed + i` against one shared catalog.
pub fn simulate_duel_many(cfg: DuelConfig, samples: u32) -> Result<DuelStats> {
    let catalog = load_catalog(&cfg)?;
    run_duels(&catalog, &cfg, samples)
}

/// One duel against an already-loaded catalog; the config's catalog fields are
/// ignored.
pub fn run_duel(catalog: &SpellCatalog, cfg: &DuelConfig) -> DuelResult {
    play(catalog, cfg, cfg.seed)
}

pub fn run_duels(catalog: &SpellCatalog, cfg: &DuelConfig, samples: u32) -> Result<DuelStats> {
    if samples == 0 {
        bail!("samples must be at least 1");
    }

    let mut stats = DuelStats {
        samples,
        ..Default::default()
    };
    let mut total_turns = 0u64;
    for i in 0..samples {
        let res = play(catalog, cfg, cfg.seed.wrapping_add(u64::from(i)));
        total_turns += u64::from(res.turns);
        match res.outcome {
            DuelOutcome::PlayerWins => stats.player_wins += 1,
            DuelOutcome::OpponentWins => stats.opponent_wins += 1,
            DuelOutcome::Stalemate => stats.stalemates += 1,
            DuelOutcome::Aborted => stats.aborted += 1,
        }
    }
    stats.mean_turns = total_turns as f64 / f64::from(samples);
    Ok(stats)
}

fn play(catalog: &SpellCatalog, cfg: &DuelConfig, seed: u64) -> DuelResult {
    let mut input: Box<dyn PlayerInput + '_> = match &cfg.player {
        PlayerPolicy::Search => Box::new(SearchInput::new(catalog)),
        PlayerPolicy::Random => Box::new(RandomInput::new(Dice::from_seed(
            seed.wrapping_add(POLICY_STREAM),
        ))),
        PlayerPolicy::Scripted { spells } => Box::new(ScriptedInput::new(spells.iter().cloned())),
    };

    let mut logs = Vec::new();
    let mut duel = Duel::new(catalog, Dice::from_seed(seed));
    let outcome = duel.run_capped(
        input.as_mut(),
        &mut |e: &DuelEvent| logs.push(e.to_string()),
        Some(cfg.max_turns),
    );

    let winner = match outcome.winner() {
        Some(side) => format!("{:?}", side).to_lowercase(),
        None => "none".to_string(),
    };
    DuelResult {
        winner,
        outcome,
        turns: duel.turn(),
        player_hp_end: duel.player().hp,
        opponent_hp_end: duel.opponent().hp,
        log: logs,
    }
}
