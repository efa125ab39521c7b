use anyhow::bail;
use clap::Parser;
use engine::api::{load_catalog, run_duel, DuelConfig, PlayerPolicy, DEFAULT_MAX_TURNS};
use engine::DuelOutcome;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "magebot-sim")]
#[command(about = "Monte Carlo sim: many headless duels vs MageBot")]
struct Args {
    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on turn segments per trial
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Player policy: search | random
    #[arg(long, default_value = "random")]
    player: String,

    /// Optional spell catalog file (falls back to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,
}

fn to_policy(s: &str) -> anyhow::Result<PlayerPolicy> {
    match s.to_lowercase().as_str() {
        "search" => Ok(PlayerPolicy::Search),
        "random" => Ok(PlayerPolicy::Random),
        other => bail!("unknown player policy: {} (expected search|random)", other),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.trials == 0 {
        bail!("--trials must be at least 1");
    }
    let policy = to_policy(&args.player)?;
    let base = DuelConfig {
        seed: args.seed,
        catalog_path: args.catalog.map(|p| p.to_string_lossy().into_owned()),
        player: policy,
        max_turns: args.max_turns,
        ..Default::default()
    };
    let catalog = load_catalog(&base)?;

    let mut player_wins = 0u32;
    let mut magebot_wins = 0u32;
    let mut stalemates = 0u32;
    let mut turns_vec: Vec<u32> = Vec::with_capacity(args.trials as usize);

    for i in 0..args.trials {
        let cfg = DuelConfig {
            seed: args.seed.wrapping_add(u64::from(i)),
            ..base.clone()
        };
        let res = run_duel(&catalog, &cfg);
        match res.outcome {
            DuelOutcome::PlayerWins => player_wins += 1,
            DuelOutcome::OpponentWins => magebot_wins += 1,
            DuelOutcome::Stalemate | DuelOutcome::Aborted => stalemates += 1,
        }
        if res.outcome.winner().is_some() {
            turns_vec.push(res.turns);
        }
    }

    turns_vec.sort_unstable();
    let trials_f = f64::from(args.trials);
    let avg_turns = if turns_vec.is_empty() {
        0.0
    } else {
        turns_vec.iter().map(|&t| u64::from(t)).sum::<u64>() as f64 / turns_vec.len() as f64
    };
    let median_turns = if turns_vec.is_empty() {
        0
    } else {
        let m = turns_vec.len() / 2;
        if turns_vec.len() % 2 == 1 {
            turns_vec[m]
        } else {
            (turns_vec[m - 1] + turns_vec[m]) / 2
        }
    };

    println!("magebot-sim results");
    println!("-------------------");
    println!("trials:             {}", args.trials);
    println!("spells:             {}", catalog.len());
    println!("player policy:      {}", args.player);
    println!();
    println!("player win rate:    {:.1}%", f64::from(player_wins) / trials_f * 100.0);
    println!("MageBot win rate:   {:.1}%", f64::from(magebot_wins) / trials_f * 100.0);
    println!("stalemates:         {}", stalemates);
    println!("avg turns (decided): {:.2}", avg_turns);
    println!("median turns:       {}", median_turns);

    Ok(())
}
