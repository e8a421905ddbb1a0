//! Game rounds
//!
//! A round is one target color plus a shuffled set of choices. It starts
//! unanswered and accepts exactly one guess.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::difficulty::DifficultyCurve;
use super::panel::{create_color_panel, ColorPanel, PanelId, PanelIdGenerator};
use crate::color::similar_color;
use crate::error::{Error, Result};

/// One round of the game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRound {
    level: u32,
    target: ColorPanel,
    choices: Vec<ColorPanel>,
    answered: bool,
    correct: bool,
}

impl GameRound {
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn target(&self) -> &ColorPanel {
        &self.target
    }

    /// Choices in display order; the target appears exactly once.
    pub fn choices(&self) -> &[ColorPanel] {
        &self.choices
    }

    pub fn choice(&self, id: PanelId) -> Option<&ColorPanel> {
        self.choices.iter().find(|panel| panel.id == id)
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// Only meaningful once answered; always false before that.
    pub fn is_correct(&self) -> bool {
        self.correct
    }
}

/// Build `count` shuffled panels: the target plus `count - 1` colors within
/// `max_distance` of it, each with a fresh id from `ids`.
pub fn generate_choice_panels<R: Rng + ?Sized>(
    target: &ColorPanel,
    count: usize,
    max_distance: f64,
    ids: &mut PanelIdGenerator,
    rng: &mut R,
) -> Result<Vec<ColorPanel>> {
    if count == 0 {
        return Err(Error::GenerationFailure(
            "choice count must include the target".to_string(),
        ));
    }

    let mut panels = Vec::with_capacity(count);
    panels.push(*target);
    for _ in 1..count {
        panels.push(ColorPanel {
            id: ids.next_id(),
            color: similar_color(&target.color, max_distance, rng),
        });
    }

    panels.shuffle(rng);
    Ok(panels)
}

/// Create an unanswered round for `level` using `curve`.
pub fn create_game_round<R: Rng + ?Sized>(
    level: u32,
    curve: &DifficultyCurve,
    rng: &mut R,
) -> Result<GameRound> {
    if level < 1 {
        return Err(Error::InvalidLevel(level));
    }

    let settings = curve.settings(level);
    let mut ids = PanelIdGenerator::new();
    let target = create_color_panel(&mut ids, rng);
    let choices =
        generate_choice_panels(&target, settings.choice_count, settings.max_distance, &mut ids, rng)?;

    tracing::debug!(
        level,
        choices = choices.len(),
        max_distance = settings.max_distance,
        target = %target.color,
        "created round"
    );

    Ok(GameRound {
        level,
        target,
        choices,
        answered: false,
        correct: false,
    })
}

/// Answer `round` with the panel `id`, returning the answered round.
pub fn make_guess(round: &GameRound, id: PanelId) -> Result<GameRound> {
    if round.answered {
        return Err(Error::AlreadyAnswered);
    }

    let chosen = round.choice(id).ok_or(Error::InvalidPanel(id))?;

    Ok(GameRound {
        answered: true,
        correct: chosen.id == round.target.id,
        ..round.clone()
    })
}
