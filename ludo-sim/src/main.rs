//! Ludo Simulator
//!
//! Plays batches of policy-vs-policy matches with seeded dice and reports
//! win rates and roll statistics.

mod runner;
mod stats;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use ludo_core::Tier;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::runner::{play_game, seat_match};
use crate::stats::SimStats;

#[derive(Parser, Debug)]
#[command(
    name = "ludo-sim",
    version,
    about = "Run batches of policy-vs-policy Ludo matches"
)]
struct Args {
    /// Number of matches to play
    #[arg(short, long, default_value_t = 100)]
    games: u32,
    /// Players per match (2-4)
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=4))]
    players: u8,
    /// Policy tier: first-available, progress-greedy or oracle (offline: progress-greedy)
    #[arg(short, long, default_value = "progress-greedy")]
    tier: Tier,
    /// Alternate first-available and progress-greedy by seat instead of --tier
    #[arg(long)]
    mix: bool,
    /// Dice seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Turn hand-offs before a match is abandoned
    #[arg(long, default_value_t = 10_000)]
    max_turns: u32,
    /// Print every roll and move
    #[arg(long)]
    trace: bool,
    /// Seconds between progress lines
    #[arg(long, default_value_t = 5)]
    log_interval: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = seat_match(usize::from(args.players), args.tier, args.mix)
        .context("invalid match setup")?;

    println!("Ludo Simulator");
    println!("==============");
    println!("Games: {}", args.games);
    println!(
        "Seats: {}",
        config
            .players()
            .iter()
            .map(|p| format!("{} ({:?})", p.color, p.tier().unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Seed: {}", seed);
    println!();

    // Finish the current match on SIGINT, then report
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, stopping after this game...");
        r.store(false, Ordering::SeqCst);
    })
    .context("setting Ctrl-C handler")?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut stats = SimStats::new();

    for game in 0..args.games {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        if args.trace {
            println!("Game {}", game + 1);
        }
        let record = play_game(config.clone(), &mut rng, args.max_turns, args.trace);
        if args.trace {
            match record.winner {
                Some(color) => println!("  {} wins after {} turns\n", color, record.turns),
                None => println!("  abandoned after {} turns\n", record.turns),
            }
        }
        stats.record(&record);
        if !args.trace && stats.should_log(args.log_interval) {
            stats.log_progress();
        }
    }

    println!("\n==============");
    if running.load(Ordering::SeqCst) {
        println!("Simulation complete!");
    } else {
        println!("Simulation interrupted.");
    }
    println!("==============");
    stats.print_summary();
    Ok(())
}
