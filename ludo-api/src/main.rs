//! Ludo Web API
//!
//! Hosts one match in memory and exposes it over REST. Humans act through
//! the endpoints; policy players, dice animation and turn hand-off are
//! paced by background tasks (see `session`). An optional advisory oracle
//! answers for oracle-tier players and supplies hints and trivia.

mod config;
mod oracle;
mod session;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use ludo_core::{GameView, Hint, MatchConfig, ParsePieceIdError, PieceId, Player, Tier};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::oracle::{Advisor, OracleClient};
use crate::session::{commit_move, drive, start_roll, AppState, AppStateInner, Session};

// =============================================================================
// JSON Models
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GameModel {
    /// False when the action was not allowed in the current phase.
    accepted: bool,
    #[serde(flatten)]
    view: GameView,
    #[serde(skip_serializing_if = "Option::is_none")]
    flavor: Option<String>,
}

#[derive(Deserialize)]
struct NewGameRequest {
    #[serde(default)]
    humans: usize,
    #[serde(default)]
    policies: usize,
    #[serde(default)]
    tier: Tier,
    /// Explicit seating; overrides the counts when present.
    roster: Option<Vec<Player>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveRequest {
    piece_id: String,
}

#[derive(Serialize)]
struct HealthModel {
    status: String,
    oracle: bool,
}

#[derive(Serialize)]
struct ErrorModel {
    detail: String,
}

type ApiError = (StatusCode, Json<ErrorModel>);

fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorModel {
            detail: detail.into(),
        }),
    )
}

fn game_model(session: &Session, accepted: bool) -> Json<GameModel> {
    Json(GameModel {
        accepted,
        view: session.controller.view(),
        flavor: session.flavor.clone(),
    })
}

/// Manual actions are only taken on behalf of human seats.
fn human_turn(session: &Session) -> bool {
    session
        .controller
        .current_player()
        .is_some_and(|p| p.is_human())
}

// =============================================================================
// API Endpoints
// =============================================================================

async fn get_game(State(state): State<AppState>) -> Json<GameModel> {
    let session = state.lock();
    game_model(&session, true)
}

async fn new_game(
    State(state): State<AppState>,
    Json(req): Json<NewGameRequest>,
) -> Result<Json<GameModel>, ApiError> {
    let config = match req.roster {
        Some(players) => MatchConfig::roster(players),
        None => MatchConfig::generated(req.humans, req.policies, req.tier),
    }
    .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut session = state.lock();
    info!(players = config.players().len(), "new match");
    session.controller.initialize(config);
    session.flavor = None;
    drive(&state, &session, state.pacing.move_advance);
    Ok(game_model(&session, true))
}

async fn reset_game(State(state): State<AppState>) -> Json<GameModel> {
    let mut session = state.lock();
    session.controller.reset();
    session.flavor = None;
    info!("match reset");
    game_model(&session, true)
}

async fn roll(State(state): State<AppState>) -> Json<GameModel> {
    let mut session = state.lock();
    let accepted = human_turn(&session) && start_roll(&state, &mut session);
    game_model(&session, accepted)
}

async fn make_move(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameModel>, ApiError> {
    let id: PieceId = req
        .piece_id
        .parse()
        .map_err(|e: ParsePieceIdError| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut session = state.lock();
    let accepted = human_turn(&session) && commit_move(&state, &mut session, id).is_some();
    Ok(game_model(&session, accepted))
}

async fn undo(State(state): State<AppState>) -> Json<GameModel> {
    let mut session = state.lock();
    let accepted = session.controller.undo();
    if accepted {
        info!(history = session.controller.history_len(), "undo");
        drive(&state, &session, state.pacing.move_advance);
    }
    game_model(&session, accepted)
}

/// Suggest a move for the human whose selection is pending. The oracle is
/// consulted without holding the session; if the game moved on meanwhile
/// the answer is discarded.
async fn hint(State(state): State<AppState>) -> Result<Json<Hint>, ApiError> {
    let (generation, request) = {
        let session = state.lock();
        let request = session
            .controller
            .advice_request()
            .filter(|_| human_turn(&session))
            .ok_or_else(|| api_error(StatusCode::CONFLICT, "no move is awaiting a human"))?;
        (session.controller.generation(), request)
    };

    let hint = state
        .advisor
        .hint(&request)
        .await
        .ok_or_else(|| api_error(StatusCode::CONFLICT, "no legal moves to hint"))?;

    if state.lock().controller.generation() != generation {
        warn!("discarding hint for a turn that has moved on");
        return Err(api_error(
            StatusCode::CONFLICT,
            "the game moved on while the hint was prepared",
        ));
    }
    Ok(Json(hint))
}

async fn health(State(state): State<AppState>) -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
        oracle: state.advisor.is_online(),
    })
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/game", get(get_game).post(new_game))
        .route("/reset", post(reset_game))
        .route("/roll", post(roll))
        .route("/move", post(make_move))
        .route("/undo", post(undo))
        .route("/hint", get(hint))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let advisor = match &config.oracle {
        Some(oracle) => match OracleClient::new(oracle) {
            Ok(client) => {
                info!(url = %client.base_url(), "advisory oracle enabled");
                Advisor::with_oracle(client)
            }
            Err(e) => {
                warn!(error = %e, "could not build oracle client, running offline");
                Advisor::offline()
            }
        },
        None => {
            info!("no advisory oracle configured, oracle tier plays progress-greedy");
            Advisor::offline()
        }
    };

    let state = AppStateInner::new(advisor, config.pacing);
    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!(addr = %config.bind_addr, "Ludo API listening");
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server stopped");
    }
}
