//! Drive a single all-policy match to completion.

use ludo_core::advisor::local_advisor;
use ludo_core::{
    AutoAction, ConfigError, GameStats, MatchConfig, Player, PlayerColor, PlayerKind, Tier,
    TurnController,
};
use rand::Rng;

/// Outcome of one simulated match.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// `None` when the turn cap stopped the match.
    pub winner: Option<PlayerColor>,
    /// Completed turn hand-offs.
    pub turns: u32,
    pub stats: GameStats,
}

/// Seat `players` policy players. With `mix`, seats alternate between
/// first-available and progress-greedy starting with first-available.
pub fn seat_match(players: usize, tier: Tier, mix: bool) -> Result<MatchConfig, ConfigError> {
    if !mix {
        return MatchConfig::generated(0, players, tier);
    }
    let roster = PlayerColor::ALL
        .into_iter()
        .take(players)
        .enumerate()
        .map(|(i, color)| {
            let tier = if i % 2 == 0 {
                Tier::FirstAvailable
            } else {
                Tier::ProgressGreedy
            };
            Player {
                id: i as u8,
                color,
                name: format!("AI {} ({:?})", i + 1, tier),
                kind: PlayerKind::Policy(tier),
            }
        })
        .collect();
    MatchConfig::roster(roster)
}

/// Play until someone wins or `max_turns` hand-offs have happened.
pub fn play_game<R: Rng + ?Sized>(
    config: MatchConfig,
    rng: &mut R,
    max_turns: u32,
    trace: bool,
) -> GameRecord {
    let mut controller = TurnController::with_match(config);
    let mut turns = 0;

    while turns < max_turns {
        let Some(action) = controller.next_action() else {
            break;
        };
        match action {
            AutoAction::Roll => {
                if let Some(outcome) = controller.roll(rng) {
                    if trace {
                        let moves: Vec<String> =
                            outcome.legal_moves.iter().map(|id| id.to_string()).collect();
                        println!(
                            "  {:<6} rolled {} [{}]",
                            outcome.color,
                            outcome.value,
                            moves.join(" ")
                        );
                    }
                }
            }
            AutoAction::ChooseMove => {
                let Some(request) = controller.advice_request() else {
                    break;
                };
                let tier = controller
                    .current_player()
                    .and_then(Player::tier)
                    .unwrap_or_default();
                let Some(id) = local_advisor(tier).choose(&request) else {
                    break;
                };
                if let Some(result) = controller.select_move(id) {
                    if trace {
                        let captured: Vec<String> =
                            result.captured.iter().map(|id| id.to_string()).collect();
                        println!(
                            "         {} {} -> {}{}",
                            result.piece,
                            result.from,
                            result.to,
                            if captured.is_empty() {
                                String::new()
                            } else {
                                format!(" captures {}", captured.join(" "))
                            }
                        );
                    }
                }
            }
            AutoAction::Advance => {
                controller.advance_turn();
                turns += 1;
            }
        }
    }

    GameRecord {
        winner: controller.winner(),
        turns,
        stats: controller.stats().clone(),
    }
}
