//! Game registry and state machine.
//!
//! Games are keyed by their commitment. Player 1 never presents a handle to
//! their game: resolving or reclaiming it means re-supplying the move and
//! secret, from which the registry recomputes the key.
//!
//! Every operation checks all of its preconditions before touching any state,
//! so a rejected call leaves records, ledger, counters and the event outbox
//! exactly as they were.

mod admin;
mod record;

pub use admin::AdminState;
pub use record::GameRecord;

use crate::config::EngineConfig;
use crate::crypto::{Commitment, Secret};
use crate::error::GameError;
use crate::games::{resolve, Move};
use crate::ledger::Ledger;
use crate::policy::TimeoutPolicy;
use crate::protocol::{GameEvent, GameStatus, Outcome, PlayerId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRegistry {
    config: EngineConfig,
    admin: AdminState,
    games: HashMap<Commitment, GameRecord>,
    ledger: Ledger,
    /// Gross value ever accepted, fees included
    total_deposited: u128,
    total_withdrawn: u128,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameRegistry {
    pub fn new(config: EngineConfig) -> Self {
        let admin = AdminState::new(config.owner, config.start_running);
        Self {
            config,
            admin,
            games: HashMap::new(),
            ledger: Ledger::new(),
            total_deposited: 0,
            total_withdrawn: 0,
            events: Vec::new(),
        }
    }

    /// Compute the commitment `caller` would publish for `mv` and `secret`
    pub fn generate_commitment(&self, mv: Move, secret: &Secret, caller: &PlayerId) -> Commitment {
        Commitment::new(mv, secret, caller)
    }

    // Game operations

    /// Open a game. The fee is taken from `deposited`; the rest is the stake.
    pub fn new_game(
        &mut self,
        commitment: Commitment,
        join_expiry: u64,
        deposited: u64,
        now: Timestamp,
        caller: PlayerId,
    ) -> Result<GameRecord, GameError> {
        self.admin.require_running()?;
        if self.games.contains_key(&commitment) {
            return Err(GameError::AlreadyExists(commitment));
        }
        let stake = self.config.fee_policy().net_stake(deposited)?;
        if stake > u64::MAX / 2 {
            return Err(GameError::StakeTooLarge(stake));
        }
        let join_deadline = self
            .config
            .timeout_policy()
            .join_deadline(now, join_expiry)?;

        let mut events = Vec::with_capacity(2);
        self.total_deposited += u128::from(deposited);
        self.charge_fee(commitment, caller, &mut events);

        let record = GameRecord::new(commitment, caller, stake, join_deadline, now);
        self.games.insert(commitment, record.clone());

        events.push(GameEvent::GameStarted {
            commitment,
            player1: caller,
            stake,
            expiry: join_expiry,
        });
        self.publish(events);
        Ok(record)
    }

    /// Join an open game with a matching deposit and reveal the second move.
    pub fn submit_second_move(
        &mut self,
        commitment: Commitment,
        mv: Move,
        deposited: u64,
        now: Timestamp,
        caller: PlayerId,
    ) -> Result<(), GameError> {
        let fees = self.config.fee_policy();
        let resolve_deadline = self.config.timeout_policy().resolve_deadline(now);

        let game = self
            .games
            .get(&commitment)
            .ok_or(GameError::NotFound(commitment))?;
        game.expect_status(GameStatus::Created)?;
        if TimeoutPolicy::is_expired(game.join_deadline, now) {
            return Err(GameError::Expired {
                deadline: game.join_deadline,
            });
        }
        let stake = fees.net_stake(deposited)?;
        if stake != game.stake {
            return Err(GameError::MismatchedStake {
                expected: game.stake,
                actual: stake,
            });
        }

        let mut events = Vec::with_capacity(2);
        self.total_deposited += u128::from(deposited);
        self.charge_fee(commitment, caller, &mut events);

        if let Some(game) = self.games.get_mut(&commitment) {
            game.player2 = Some(caller);
            game.second_move = Some(mv);
            game.resolve_deadline = Some(resolve_deadline);
            game.status = GameStatus::SecondMoveSubmitted;
        }

        events.push(GameEvent::SecondMoveSubmitted {
            commitment,
            player2: caller,
            second_move: mv,
        });
        self.publish(events);
        Ok(())
    }

    /// Player 1 reveals and the pot is settled.
    ///
    /// Accepted after the resolve deadline as long as player 2 has not
    /// claimed the refund yet.
    pub fn resolve_game(
        &mut self,
        mv: Move,
        secret: &Secret,
        now: Timestamp,
        caller: PlayerId,
    ) -> Result<Outcome, GameError> {
        let commitment = Commitment::new(mv, secret, &caller);
        let game = self
            .games
            .get_mut(&commitment)
            .ok_or(GameError::Unverified)?;
        game.expect_status(GameStatus::SecondMoveSubmitted)?;
        let (player2, second_move) = match (game.player2, game.second_move) {
            (Some(player2), Some(second_move)) => (player2, second_move),
            _ => {
                return Err(GameError::invalid_state(
                    GameStatus::SecondMoveSubmitted,
                    game.status,
                ))
            }
        };

        let outcome = resolve(mv, second_move);
        let stake = game.stake;
        let winner = match outcome {
            Outcome::Draw => {
                self.ledger.credit(game.player1, stake);
                self.ledger.credit(player2, stake);
                None
            }
            Outcome::Player1Wins => {
                self.ledger.credit(game.player1, stake * 2);
                Some(game.player1)
            }
            Outcome::Player2Wins => {
                self.ledger.credit(player2, stake * 2);
                Some(player2)
            }
        };
        game.status = GameStatus::Resolved;
        game.outcome = Some(outcome);
        game.settled_at = Some(now);

        self.publish(vec![GameEvent::GameResolved {
            commitment,
            outcome,
            winner,
            stake,
        }]);
        Ok(outcome)
    }

    /// Player 1 reclaims the stake of a game nobody joined in time.
    /// The fee is not returned.
    pub fn refund_player1(
        &mut self,
        mv: Move,
        secret: &Secret,
        now: Timestamp,
        caller: PlayerId,
    ) -> Result<(), GameError> {
        let commitment = Commitment::new(mv, secret, &caller);
        let game = self
            .games
            .get_mut(&commitment)
            .ok_or(GameError::Unverified)?;
        game.expect_status(GameStatus::Created)?;
        if !TimeoutPolicy::is_expired(game.join_deadline, now) {
            return Err(GameError::NotExpired {
                deadline: game.join_deadline,
            });
        }

        let amount = game.stake;
        self.ledger.credit(game.player1, amount);
        game.status = GameStatus::Refunded;
        game.settled_at = Some(now);

        self.publish(vec![GameEvent::GameRefunded {
            commitment,
            refund_to: caller,
            amount,
        }]);
        Ok(())
    }

    /// Player 2 takes both stakes when player 1 never revealed in time.
    pub fn refund_player2(
        &mut self,
        commitment: Commitment,
        now: Timestamp,
        caller: PlayerId,
    ) -> Result<(), GameError> {
        let game = self
            .games
            .get_mut(&commitment)
            .ok_or(GameError::NotFound(commitment))?;
        game.expect_status(GameStatus::SecondMoveSubmitted)?;
        if game.player2 != Some(caller) {
            return Err(GameError::NotAuthorized);
        }
        let deadline = match game.resolve_deadline {
            Some(deadline) => deadline,
            None => {
                return Err(GameError::invalid_state(
                    GameStatus::SecondMoveSubmitted,
                    game.status,
                ))
            }
        };
        if !TimeoutPolicy::is_expired(deadline, now) {
            return Err(GameError::NotExpired { deadline });
        }

        let amount = game.stake * 2;
        self.ledger.credit(caller, amount);
        game.status = GameStatus::Refunded;
        game.settled_at = Some(now);

        self.publish(vec![GameEvent::GameRefunded {
            commitment,
            refund_to: caller,
            amount,
        }]);
        Ok(())
    }

    /// Drain the caller's balance. The returned amount is owed to the caller
    /// and must be transferred out after this call returns.
    pub fn withdraw(&mut self, caller: PlayerId) -> Result<u64, GameError> {
        let amount = self.ledger.withdraw(&caller)?;
        self.total_withdrawn += u128::from(amount);
        self.publish(vec![GameEvent::BalanceWithdrawn {
            player: caller,
            amount,
        }]);
        Ok(amount)
    }

    /// Put back a withdrawal whose external transfer failed
    pub fn revert_withdrawal(&mut self, player: PlayerId, amount: u64) {
        warn!(%player, amount, "Reverting failed withdrawal");
        self.total_withdrawn = self.total_withdrawn.saturating_sub(u128::from(amount));
        self.ledger.credit(player, amount);
        self.publish(vec![GameEvent::WithdrawalReverted { player, amount }]);
    }

    /// Keep a deposit the host already collected but could neither accept
    /// nor send back. It becomes withdrawable balance.
    pub fn credit_unreturned_deposit(&mut self, player: PlayerId, amount: u64) {
        if amount == 0 {
            return;
        }
        warn!(%player, amount, "Holding unreturned deposit as balance");
        self.total_deposited += u128::from(amount);
        self.ledger.credit(player, amount);
        self.publish(vec![GameEvent::DepositCredited { player, amount }]);
    }

    // Admin operations

    pub fn change_owner(&mut self, caller: PlayerId, new_owner: PlayerId) -> Result<(), GameError> {
        let event = self.admin.change_owner(&caller, new_owner)?;
        self.publish(vec![event]);
        Ok(())
    }

    pub fn pause(&mut self, caller: PlayerId) -> Result<(), GameError> {
        let event = self.admin.pause(&caller)?;
        self.publish(vec![event]);
        Ok(())
    }

    pub fn resume(&mut self, caller: PlayerId) -> Result<(), GameError> {
        let event = self.admin.resume(&caller)?;
        self.publish(vec![event]);
        Ok(())
    }

    pub fn kill(&mut self, caller: PlayerId) -> Result<(), GameError> {
        let event = self.admin.kill(&caller)?;
        self.publish(vec![event]);
        Ok(())
    }

    // Views

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn admin(&self) -> &AdminState {
        &self.admin
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn game(&self, commitment: &Commitment) -> Option<&GameRecord> {
        self.games.get(commitment)
    }

    pub fn games(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.values()
    }

    /// Games still waiting for a counterparty at `now`
    pub fn open_games(&self, now: Timestamp) -> Vec<&GameRecord> {
        let mut open: Vec<&GameRecord> = self
            .games
            .values()
            .filter(|g| {
                g.status == GameStatus::Created && !TimeoutPolicy::is_expired(g.join_deadline, now)
            })
            .collect();
        open.sort_by_key(|g| (g.created_at, g.commitment));
        open
    }

    pub fn balance(&self, player: &PlayerId) -> u64 {
        self.ledger.balance(player)
    }

    /// Value held by non-terminal games
    pub fn escrowed(&self) -> u128 {
        self.games.values().map(GameRecord::escrowed).sum()
    }

    pub fn total_deposited(&self) -> u128 {
        self.total_deposited
    }

    pub fn total_withdrawn(&self) -> u128 {
        self.total_withdrawn
    }

    /// Ledger plus escrow equals everything deposited minus everything paid out
    pub fn is_conserved(&self) -> bool {
        self.ledger.total() + self.escrowed() == self.total_deposited - self.total_withdrawn
    }

    /// Drain the event outbox
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn charge_fee(&mut self, commitment: Commitment, sender: PlayerId, events: &mut Vec<GameEvent>) {
        let fee = self.config.fee;
        if fee == 0 {
            return;
        }
        self.ledger.credit(self.admin.owner(), fee);
        events.push(GameEvent::FeePaid {
            commitment,
            sender,
            amount: fee,
        });
    }

    fn publish(&mut self, events: Vec<GameEvent>) {
        for event in events {
            info!(event = event.name(), "{:?}", event);
            self.events.push(event);
        }
        debug!(
            games = self.games.len(),
            escrowed = %self.escrowed(),
            "Registry updated"
        );
    }
}
