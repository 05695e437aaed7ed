//! Aggregate statistics over simulated matches.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use ludo_core::{ColorStats, PlayerColor};

use crate::runner::GameRecord;

/// Format a duration as `HH:MM:SS`.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Statistics collected across a simulation run.
#[derive(Debug)]
pub struct SimStats {
    pub games: u32,
    /// Matches stopped by the turn cap.
    pub capped: u32,
    pub wins: BTreeMap<PlayerColor, u32>,
    pub total_turns: u64,
    /// Rolls, sixes and captures summed per color.
    pub totals: BTreeMap<PlayerColor, ColorStats>,

    start_time: Instant,
    last_log_time: Instant,
}

impl Default for SimStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SimStats {
    pub fn new() -> Self {
        Self {
            games: 0,
            capped: 0,
            wins: BTreeMap::new(),
            total_turns: 0,
            totals: BTreeMap::new(),
            start_time: Instant::now(),
            last_log_time: Instant::now(),
        }
    }

    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_turns += u64::from(game.turns);
        match game.winner {
            Some(color) => *self.wins.entry(color).or_default() += 1,
            None => self.capped += 1,
        }
        for (color, stats) in game.stats.iter() {
            let total = self.totals.entry(color).or_default();
            total.rolls += stats.rolls;
            total.sixes += stats.sixes;
            total.captures += stats.captures;
        }
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / f64::from(self.games)
        }
    }

    fn combined(&self) -> ColorStats {
        self.totals.values().fold(ColorStats::default(), |acc, s| ColorStats {
            rolls: acc.rolls + s.rolls,
            sixes: acc.sixes + s.sixes,
            captures: acc.captures + s.captures,
        })
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        self.last_log_time.elapsed().as_secs() >= interval_secs
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self) {
        let elapsed = self.start_time.elapsed();
        let rate = if elapsed.as_secs_f64() > 0.0 {
            f64::from(self.games) / elapsed.as_secs_f64()
        } else {
            0.0
        };
        println!(
            "[{}] games={} capped={} avg_turns={:.1} rate={:.0}/s",
            format_duration(elapsed),
            self.games,
            self.capped,
            self.average_turns(),
            rate,
        );
        self.last_log_time = Instant::now();
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("Games played: {}", self.games);
        println!("Stopped by turn cap: {}", self.capped);
        println!("Average turns per game: {:.1}", self.average_turns());
        println!("Wins:");
        for color in PlayerColor::ALL {
            let Some(&wins) = self.wins.get(&color) else {
                if self.totals.contains_key(&color) {
                    println!("  - {}: 0", color);
                }
                continue;
            };
            let pct = if self.games > 0 {
                100.0 * f64::from(wins) / f64::from(self.games)
            } else {
                0.0
            };
            println!("  - {}: {} ({:.1}%)", color, wins, pct);
        }

        let all = self.combined();
        let six_pct = if all.rolls > 0 {
            100.0 * f64::from(all.sixes) / f64::from(all.rolls)
        } else {
            0.0
        };
        println!("Rolls: {}", all.rolls);
        println!("Sixes: {} ({:.1}%)", all.sixes, six_pct);
        println!("Capturing moves: {}", all.captures);
        for (color, stats) in &self.totals {
            println!(
                "  - {}: rolls={} sixes={} captures={}",
                color, stats.rolls, stats.sixes, stats.captures
            );
        }
        println!("Time: {}", format_duration(self.start_time.elapsed()));
    }
}
