//! HTTP API handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rps_core::{
    Commitment, GameError, GameEvent, GameRecord, Move, Outcome, PlayerId, Secret,
    TransferError,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::state::AppState;

// ============ Error type ============

/// Application error type
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({"error": self.message})),
        )
            .into_response()
    }
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        let status = match e {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::NotAuthorized | GameError::Unverified => StatusCode::FORBIDDEN,
            GameError::AlreadyExists(_) | GameError::InvalidState { .. } => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, e.to_string())
    }
}

impl From<TransferError> for ApiError {
    fn from(e: TransferError) -> Self {
        let status = match e {
            TransferError::InsufficientFunds { .. } => StatusCode::PAYMENT_REQUIRED,
            TransferError::TransferFailed(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, e.to_string())
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ============ Request/Response types ============

#[derive(Deserialize)]
pub struct CommitRequest {
    #[serde(rename = "move")]
    pub mv: Move,
    /// Generated when omitted
    pub secret: Option<Secret>,
}

#[derive(Serialize)]
pub struct CommitResponse {
    pub commitment: Commitment,
    pub secret: Secret,
}

#[derive(Deserialize)]
pub struct NewGameRequest {
    pub commitment: Commitment,
    pub join_expiry_secs: u64,
    pub amount: u64,
}

#[derive(Deserialize)]
pub struct SecondMoveRequest {
    #[serde(rename = "move")]
    pub mv: Move,
    pub amount: u64,
}

#[derive(Deserialize)]
pub struct RevealRequest {
    #[serde(rename = "move")]
    pub mv: Move,
    pub secret: Secret,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub commitment: Commitment,
    pub outcome: Outcome,
}

#[derive(Serialize)]
pub struct GamesResponse {
    pub games: Vec<GameRecord>,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub player: PlayerId,
    pub balance: u64,
    pub wallet: u64,
}

#[derive(Serialize)]
pub struct WithdrawResponse {
    pub amount: u64,
}

#[derive(Deserialize)]
pub struct ChangeOwnerRequest {
    pub new_owner: PlayerId,
}

#[derive(Serialize)]
pub struct AdminResponse {
    pub owner: PlayerId,
    pub running: bool,
    pub killed: bool,
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub events: Vec<GameEvent>,
}

#[derive(Deserialize)]
pub struct TickRequest {
    pub seconds: u64,
}

#[derive(Serialize)]
pub struct TickResponse {
    pub now: u64,
}

// ============ Helpers ============

fn caller_id(headers: &HeaderMap) -> Result<PlayerId, ApiError> {
    headers
        .get("X-Player-Id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<PlayerId>().ok())
        .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "Missing X-Player-Id header"))
}

fn parse_commitment(raw: &str) -> Result<Commitment, ApiError> {
    raw.parse::<Commitment>()
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("Invalid commitment: {}", e)))
}

/// Return a deposit the registry refused. If the transfer back fails, the
/// deposit is held as ledger balance so it can be withdrawn later.
async fn return_deposit(state: &AppState, player: &PlayerId, amount: u64) {
    if let Err(e) = state.transfer().pay(player, amount).await {
        error!(%player, amount, "Failed to return rejected deposit: {}", e);
        state.with_registry(|r| r.credit_unreturned_deposit(*player, amount));
    }
}

fn admin_response(state: &AppState) -> AdminResponse {
    state.with_registry(|r| AdminResponse {
        owner: r.admin().owner(),
        running: r.admin().is_running(),
        killed: r.admin().is_killed(),
    })
}

// ============ Game handlers ============

pub async fn create_commitment(
    headers: HeaderMap,
    Json(req): Json<CommitRequest>,
) -> ApiResult<CommitResponse> {
    let caller = caller_id(&headers)?;
    let secret = req.secret.unwrap_or_else(Secret::random);
    let commitment = Commitment::new(req.mv, &secret, &caller);
    Ok(Json(CommitResponse { commitment, secret }))
}

pub async fn new_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewGameRequest>,
) -> ApiResult<GameRecord> {
    let caller = caller_id(&headers)?;
    state.transfer().collect(&caller, req.amount).await?;

    let now = state.now_secs();
    let result = state.with_registry(|r| {
        r.new_game(req.commitment, req.join_expiry_secs, req.amount, now, caller)
    });

    match result {
        Ok(record) => {
            info!("Player {} opened game {}", caller, record.commitment);
            Ok(Json(record))
        }
        Err(e) => {
            return_deposit(&state, &caller, req.amount).await;
            Err(e.into())
        }
    }
}

pub async fn list_open_games(State(state): State<AppState>) -> Json<GamesResponse> {
    let now = state.now_secs();
    let games: Vec<GameRecord> =
        state.with_registry(|r| r.open_games(now).into_iter().cloned().collect());
    Json(GamesResponse { games })
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(commitment): Path<String>,
) -> ApiResult<GameRecord> {
    let commitment = parse_commitment(&commitment)?;
    state
        .with_registry(|r| r.game(&commitment).cloned())
        .map(Json)
        .ok_or_else(|| GameError::NotFound(commitment).into())
}

pub async fn submit_second_move(
    State(state): State<AppState>,
    Path(commitment): Path<String>,
    headers: HeaderMap,
    Json(req): Json<SecondMoveRequest>,
) -> ApiResult<GameRecord> {
    let caller = caller_id(&headers)?;
    let commitment = parse_commitment(&commitment)?;
    state.transfer().collect(&caller, req.amount).await?;

    let now = state.now_secs();
    let result = state.with_registry(|r| {
        r.submit_second_move(commitment, req.mv, req.amount, now, caller)?;
        Ok::<_, GameError>(r.game(&commitment).cloned())
    });

    match result {
        Ok(Some(record)) => {
            info!("Player {} joined game {}", caller, commitment);
            Ok(Json(record))
        }
        Ok(None) => Err(GameError::NotFound(commitment).into()),
        Err(e) => {
            return_deposit(&state, &caller, req.amount).await;
            Err(e.into())
        }
    }
}

pub async fn resolve_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RevealRequest>,
) -> ApiResult<ResolveResponse> {
    let caller = caller_id(&headers)?;
    let now = state.now_secs();
    let outcome = state.with_registry(|r| r.resolve_game(req.mv, &req.secret, now, caller))?;
    let commitment = Commitment::new(req.mv, &req.secret, &caller);

    info!("Game {} resolved: {}", commitment, outcome);
    Ok(Json(ResolveResponse {
        commitment,
        outcome,
    }))
}

pub async fn refund_player1(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RevealRequest>,
) -> ApiResult<GameRecord> {
    let caller = caller_id(&headers)?;
    let now = state.now_secs();
    let commitment = Commitment::new(req.mv, &req.secret, &caller);
    let record = state.with_registry(|r| {
        r.refund_player1(req.mv, &req.secret, now, caller)?;
        r.game(&commitment).cloned().ok_or(GameError::Unverified)
    })?;
    Ok(Json(record))
}

pub async fn refund_player2(
    State(state): State<AppState>,
    Path(commitment): Path<String>,
    headers: HeaderMap,
) -> ApiResult<GameRecord> {
    let caller = caller_id(&headers)?;
    let commitment = parse_commitment(&commitment)?;
    let now = state.now_secs();
    let record = state.with_registry(|r| {
        r.refund_player2(commitment, now, caller)?;
        r.game(&commitment)
            .cloned()
            .ok_or(GameError::NotFound(commitment))
    })?;
    Ok(Json(record))
}

// ============ Balance handlers ============

pub async fn get_balance(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<BalanceResponse> {
    let caller = caller_id(&headers)?;
    let balance = state.with_registry(|r| r.balance(&caller));
    let wallet = state.transfer().wallet_balance(&caller).await?;
    Ok(Json(BalanceResponse {
        player: caller,
        balance,
        wallet,
    }))
}

/// Drain the ledger under the lock, then pay out with the lock released
pub async fn withdraw(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<WithdrawResponse> {
    let caller = caller_id(&headers)?;
    let amount = state.with_registry(|r| r.withdraw(caller))?;

    if let Err(e) = state.transfer().pay(&caller, amount).await {
        warn!(%caller, amount, "Payout failed, restoring balance: {}", e);
        state.with_registry(|r| r.revert_withdrawal(caller, amount));
        return Err(e.into());
    }

    info!("Player {} withdrew {}", caller, amount);
    Ok(Json(WithdrawResponse { amount }))
}

/// Demo wallets only
pub async fn faucet(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<BalanceResponse> {
    let caller = caller_id(&headers)?;
    let (wallets, amount) = state
        .faucet()
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Faucet not available"))?;
    wallets.fund(caller, amount);

    let balance = state.with_registry(|r| r.balance(&caller));
    Ok(Json(BalanceResponse {
        player: caller,
        balance,
        wallet: wallets.balance(&caller),
    }))
}

// ============ Admin handlers ============

pub async fn get_admin(State(state): State<AppState>) -> Json<AdminResponse> {
    Json(admin_response(&state))
}

pub async fn change_owner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ChangeOwnerRequest>,
) -> ApiResult<AdminResponse> {
    let caller = caller_id(&headers)?;
    state.with_registry(|r| r.change_owner(caller, req.new_owner))?;
    Ok(Json(admin_response(&state)))
}

pub async fn pause(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<AdminResponse> {
    let caller = caller_id(&headers)?;
    state.with_registry(|r| r.pause(caller))?;
    Ok(Json(admin_response(&state)))
}

pub async fn resume(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<AdminResponse> {
    let caller = caller_id(&headers)?;
    state.with_registry(|r| r.resume(caller))?;
    Ok(Json(admin_response(&state)))
}

pub async fn kill(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<AdminResponse> {
    let caller = caller_id(&headers)?;
    state.with_registry(|r| r.kill(caller))?;
    Ok(Json(admin_response(&state)))
}

// ============ System handlers ============

pub async fn drain_events(State(state): State<AppState>) -> Json<EventsResponse> {
    let events = state.with_registry(|r| r.take_events());
    Json(EventsResponse { events })
}

pub async fn tick(
    State(state): State<AppState>,
    Json(req): Json<TickRequest>,
) -> ApiResult<TickResponse> {
    state
        .advance_time(req.seconds)
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "Tick is out of range"))?;
    Ok(Json(TickResponse {
        now: state.now_secs(),
    }))
}

pub async fn health() -> &'static str {
    "ok"
}
