//! Color Match - pick the panel that matches the target color
//!
//! The engine is a set of pure transitions over immutable values:
//! - `color`: validated RGB colors, hex conversion, distance, generators
//! - `game`: rounds, difficulty curve, game state machine and session
//! - `config`: TOML configuration for rules and display
//!
//! Randomness is always passed in, so a seeded generator reproduces a game.

pub mod color;
pub mod config;
pub mod error;
pub mod game;

pub use color::Rgb;
pub use error::{Error, Result};
pub use game::{
    create_game, process_guess, start_new_round, Game, GameRound, GameStatus, PanelId, Rules,
};
