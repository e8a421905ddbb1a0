//! Game session
//!
//! Holds the live game for a front end. Actions that fail leave the game as
//! it was and record the error so it can be shown to the player.

use rand::Rng;

use super::engine::{create_game_with, process_guess, reset_game, start_new_round, Game, Rules};
use super::panel::PanelId;
use crate::error::{Error, Result};

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartNewRound,
    MakeGuess(PanelId),
    Reset,
}

/// A game plus the random source that drives it
#[derive(Debug)]
pub struct GameSession<R> {
    game: Game,
    last_error: Option<Error>,
    rng: R,
}

impl<R: Rng> GameSession<R> {
    /// Start a session, rejecting rules that cannot be played.
    pub fn new(rules: Rules, rng: R) -> Result<Self> {
        Ok(Self {
            game: create_game_with(rules)?,
            last_error: None,
            rng,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    pub fn can_start_new_round(&self) -> bool {
        self.game.can_start_new_round()
    }

    /// Apply `action`, replacing the game on success.
    pub fn dispatch(&mut self, action: Action) -> Result<&Game> {
        let outcome = match action {
            Action::StartNewRound => start_new_round(&self.game, &mut self.rng),
            Action::MakeGuess(id) => process_guess(&self.game, id),
            Action::Reset => Ok(reset_game(&self.game)),
        };

        match outcome {
            Ok(game) => {
                self.game = game;
                self.last_error = None;
                Ok(&self.game)
            }
            Err(err) => {
                tracing::debug!(?action, error = %err, "action rejected");
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }
}
