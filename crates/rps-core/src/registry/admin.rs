//! Owner, pause and kill switch.

use crate::error::GameError;
use crate::protocol::{GameEvent, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminState {
    owner: PlayerId,
    running: bool,
    killed: bool,
}

impl AdminState {
    pub fn new(owner: PlayerId, running: bool) -> Self {
        Self {
            owner,
            running,
            killed: false,
        }
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    fn require_owner(&self, caller: &PlayerId) -> Result<(), GameError> {
        if *caller != self.owner {
            return Err(GameError::NotAuthorized);
        }
        Ok(())
    }

    /// Gate for operations that open new games
    pub fn require_running(&self) -> Result<(), GameError> {
        if self.killed {
            return Err(GameError::Killed);
        }
        if !self.running {
            return Err(GameError::Paused);
        }
        Ok(())
    }

    pub fn change_owner(
        &mut self,
        caller: &PlayerId,
        new_owner: PlayerId,
    ) -> Result<GameEvent, GameError> {
        self.require_owner(caller)?;
        let previous = self.owner;
        self.owner = new_owner;
        Ok(GameEvent::OwnerChanged {
            previous,
            new_owner,
        })
    }

    pub fn pause(&mut self, caller: &PlayerId) -> Result<GameEvent, GameError> {
        self.require_owner(caller)?;
        if !self.running {
            return Err(GameError::Paused);
        }
        self.running = false;
        Ok(GameEvent::Paused { by: *caller })
    }

    pub fn resume(&mut self, caller: &PlayerId) -> Result<GameEvent, GameError> {
        self.require_owner(caller)?;
        if self.killed {
            return Err(GameError::Killed);
        }
        if self.running {
            return Err(GameError::NotPaused);
        }
        self.running = true;
        Ok(GameEvent::Resumed { by: *caller })
    }

    /// Irreversible; only valid while paused
    pub fn kill(&mut self, caller: &PlayerId) -> Result<GameEvent, GameError> {
        self.require_owner(caller)?;
        if self.killed {
            return Err(GameError::Killed);
        }
        if self.running {
            return Err(GameError::NotPaused);
        }
        self.killed = true;
        Ok(GameEvent::Killed { by: *caller })
    }
}
