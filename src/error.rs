//! Engine errors
//!
//! Every fallible engine operation returns one of these instead of panicking.
//! The `Display` text is meant to be shown to the player as-is.

use thiserror::Error;

use crate::game::{PanelId, RulesError};

/// Engine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid RGB values: R={r}, G={g}, B={b}")]
    InvalidColor { r: i32, g: i32, b: i32 },

    #[error("Invalid hex format: {0}")]
    InvalidFormat(String),

    #[error("Invalid level: {0}")]
    InvalidLevel(u32),

    #[error("Failed to generate colors: {0}")]
    GenerationFailure(String),

    #[error("Round already answered")]
    AlreadyAnswered,

    #[error("Invalid panel ID: {0}")]
    InvalidPanel(PanelId),

    #[error("No active round")]
    NoActiveRound,

    #[error("Game is over")]
    GameOver,

    #[error("Invalid rules: {0}")]
    InvalidRules(#[from] RulesError),
}

pub type Result<T> = std::result::Result<T, Error>;
