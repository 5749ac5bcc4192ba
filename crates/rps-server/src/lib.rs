//! RPS Server
//!
//! HTTP service exposing the stake-backed Rock-Paper-Scissors engine.

pub mod config;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use handlers::*;
pub use config::ServerConfig;
pub use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Games
        .route("/api/commitments", post(create_commitment))
        .route("/api/games", post(new_game).get(list_open_games))
        .route("/api/games/:commitment", get(get_game))
        .route("/api/games/:commitment/move", post(submit_second_move))
        .route("/api/games/:commitment/refund", post(refund_player2))
        .route("/api/resolve", post(resolve_game))
        .route("/api/refund/player1", post(refund_player1))
        // Balances
        .route("/api/balance", get(get_balance))
        .route("/api/withdraw", post(withdraw))
        .route("/api/wallet/faucet", post(faucet))
        // Admin
        .route("/api/admin", get(get_admin))
        .route("/api/admin/owner", post(change_owner))
        .route("/api/admin/pause", post(pause))
        .route("/api/admin/resume", post(resume))
        .route("/api/admin/kill", post(kill))
        // System
        .route("/api/events", get(drain_events))
        .route("/api/system/tick", post(tick))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
