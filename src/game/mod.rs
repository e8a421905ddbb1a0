//! Game module
//!
//! Round generation, difficulty scaling and the game state machine.

mod difficulty;
mod engine;
mod panel;
mod round;
mod session;

pub use difficulty::{difficulty_for, DifficultyCurve, DifficultySettings};
pub use engine::{
    can_start_new_round, create_game, create_game_with, get_score, get_status, is_game_over,
    process_guess, reset_game, start_new_round, Game, GameStatus, Rules, RulesError,
    MAX_CHOICES_LIMIT,
};
pub use panel::{create_color_panel, ColorPanel, PanelId, PanelIdGenerator};
pub use round::{create_game_round, generate_choice_panels, make_guess, GameRound};
pub use session::{Action, GameSession};
