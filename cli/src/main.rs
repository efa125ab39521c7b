use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use engine::api::{run_duel, run_duels, DuelConfig, PlayerPolicy};
use engine::duel::TurnView;
use engine::events::Snapshot;
use engine::{Dice, Duel, DuelDisplay, DuelEvent, EffectClass, PlayerInput, Side, SpellCatalog};
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

#[derive(Copy, Clone, ValueEnum)]
enum Policy {
    Search,
    Random,
}

#[derive(Subcommand)]
enum Cmd {
    /// Duel MageBot interactively: type one spell name per turn (EOF aborts)
    Duel {
        /// RNG seed for status procs
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// List the spell catalog grouped by class
    Spells,
    /// Serialize the spell catalog to JSON (stdout)
    SpellsDump {
        /// Single-line JSON instead of pretty-printed
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Run one headless duel and print its log
    Watch {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Who plays the human side
        #[arg(long, value_enum, default_value_t = Policy::Search)]
        player: Policy,
        /// Print the result as JSON instead of the log
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run many headless duels and summarize the outcomes
    Simulate {
        /// Base seed (duel i uses seed+i)
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Number of duels
        #[arg(long, default_value_t = 100)]
        samples: u32,
        /// Who plays the human side
        #[arg(long, value_enum, default_value_t = Policy::Random)]
        player: Policy,
    },
}

#[derive(Parser)]
#[command(name = "magebot")]
#[command(about = "MageBot duel CLI")]
struct Cli {
    /// Spell catalog file (JSON, or YAML by extension); defaults to the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

fn to_policy(p: Policy) -> PlayerPolicy {
    match p {
        Policy::Search => PlayerPolicy::Search,
        Policy::Random => PlayerPolicy::Random,
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<SpellCatalog> {
    match path {
        Some(p) => {
            SpellCatalog::load(p).with_context(|| format!("invalid catalog: {}", p.display()))
        }
        None => Ok(SpellCatalog::default_catalog()?),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    // Fail fast on a bad catalog before any duel starts.
    let catalog = load_catalog(cli.catalog.as_deref())?;
    tracing::debug!(spells = catalog.len(), "catalog loaded");

    match cli.cmd {
        Cmd::Duel { seed } => {
            println!("The duel begins!");
            print_spells(&catalog);
            let mut duel = Duel::new(&catalog, Dice::from_seed(seed));
            let mut input = PromptInput::new(io::stdin().lock(), io::stdout());
            let mut display = Terminal;
            duel.run(&mut input, &mut display);
        }
        Cmd::Spells => print_spells(&catalog),
        Cmd::SpellsDump { compact } => {
            let spells = catalog.to_vec();
            if compact {
                println!("{}", serde_json::to_string(&spells)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&spells)?);
            }
        }
        Cmd::Watch { seed, player, json } => {
            let cfg = DuelConfig {
                seed,
                player: to_policy(player),
                ..Default::default()
            };
            let res = run_duel(&catalog, &cfg);
            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                for line in &res.log {
                    println!("{}", line);
                }
            }
        }
        Cmd::Simulate {
            seed,
            samples,
            player,
        } => {
            let cfg = DuelConfig {
                seed,
                player: to_policy(player),
                ..Default::default()
            };
            let stats = run_duels(&catalog, &cfg, samples)?;
            println!(
                "samples={} player_wins={} magebot_wins={} stalemates={} mean_turns={:.2}",
                stats.samples,
                stats.player_wins,
                stats.opponent_wins,
                stats.stalemates,
                stats.mean_turns
            );
        }
    }
    Ok(())
}

fn print_spells(catalog: &SpellCatalog) {
    println!("\n=== Available Spells ===");
    for (title, class) in [
        ("Attack Spells", EffectClass::Damage),
        ("Healing Spells", EffectClass::Healing),
        ("Resistance Spells", EffectClass::ResistanceBoost),
    ] {
        println!("\n[{}]", title);
        for spell in catalog.by_class(class) {
            println!("  {}", spell);
        }
    }
    println!("========================\n");
}

/// Prompts on `out` and reads one spell name per line from `input`.
struct PromptInput<R, W> {
    lines: io::Lines<R>,
    out: W,
}

impl<R: BufRead, W: Write> PromptInput<R, W> {
    fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }
}

impl<R: BufRead, W: Write> PlayerInput for PromptInput<R, W> {
    fn next_spell(&mut self, _view: &TurnView<'_>) -> Option<String> {
        // A prompt that cannot be shown ends the duel the same way EOF does.
        write!(self.out, "Your turn! Type a spell name: ").ok()?;
        self.out.flush().ok()?;
        match self.lines.next() {
            Some(Ok(line)) => Some(line.trim().to_string()),
            _ => None,
        }
    }
}

struct Terminal;

impl DuelDisplay for Terminal {
    fn show(&mut self, event: &DuelEvent) {
        match event {
            DuelEvent::Snapshot(s) => print_state(s),
            DuelEvent::TurnStarted {
                side: Side::Player, ..
            } => println!("=== Your Turn ==="),
            DuelEvent::TurnStarted {
                side: Side::Opponent,
                ..
            } => println!("=== MageBot's Turn ==="),
            DuelEvent::DuelEnded { outcome } => println!("{}", outcome),
            other => println!("{}", other),
        }
    }
}

fn print_state(s: &Snapshot) {
    println!("\n--- Duel State ---");
    println!("You      : {}", s.player);
    println!("MageBot  : {}", s.opponent);
    println!("------------------\n");
}
