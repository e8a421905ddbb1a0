//! Game state machine
//!
//! A [`Game`] is a value. Every transition takes the current game by
//! reference and returns a new one; a rejected transition leaves the input
//! exactly as it was.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::difficulty::DifficultyCurve;
use super::panel::PanelId;
use super::round::{create_game_round, make_guess, GameRound};
use crate::error::{Error, Result};

/// Rules a game is played under
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Lives at the start of a game
    #[serde(default = "default_lives")]
    pub lives: u32,

    /// Consecutive correct guesses needed to advance a level
    #[serde(default = "default_streak_threshold")]
    pub streak_threshold: u32,

    /// Highest reachable level
    #[serde(default = "default_max_level")]
    pub max_level: u32,

    #[serde(default)]
    pub difficulty: DifficultyCurve,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            lives: default_lives(),
            streak_threshold: default_streak_threshold(),
            max_level: default_max_level(),
            difficulty: DifficultyCurve::default(),
        }
    }
}

fn default_lives() -> u32 {
    3
}

fn default_streak_threshold() -> u32 {
    3
}

fn default_max_level() -> u32 {
    10
}

/// Largest number of choices a round may show
pub const MAX_CHOICES_LIMIT: usize = 64;

/// Why a set of [`Rules`] cannot be played
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesError {
    #[error("lives must be at least 1")]
    NoLives,

    #[error("streak_threshold must be at least 1")]
    NoStreakThreshold,

    #[error("max_level must be at least 1")]
    NoMaxLevel,

    #[error("every round needs at least 2 choices")]
    TooFewChoices,

    #[error("choice counts must not exceed {}", MAX_CHOICES_LIMIT)]
    TooManyChoices,

    #[error("distances must be finite and non-negative")]
    InvalidDistance,
}

impl Rules {
    /// Check that a game played under these rules keeps its invariants.
    pub fn validate(&self) -> std::result::Result<(), RulesError> {
        let curve = &self.difficulty;
        if self.lives == 0 {
            return Err(RulesError::NoLives);
        }
        if self.streak_threshold == 0 {
            return Err(RulesError::NoStreakThreshold);
        }
        if self.max_level == 0 {
            return Err(RulesError::NoMaxLevel);
        }
        if curve.base_choices < 1 || curve.max_choices < 2 {
            return Err(RulesError::TooFewChoices);
        }
        if curve.base_choices > MAX_CHOICES_LIMIT || curve.max_choices > MAX_CHOICES_LIMIT {
            return Err(RulesError::TooManyChoices);
        }
        let distances = [curve.base_distance, curve.distance_step, curve.min_distance];
        if distances.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(RulesError::InvalidDistance);
        }
        Ok(())
    }
}

/// Whether the game still accepts rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Playing,
    GameOver,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Playing => write!(f, "Playing"),
            GameStatus::GameOver => write!(f, "Game over"),
        }
    }
}

/// Snapshot of a whole game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    current_round: Option<GameRound>,
    score: u32,
    level: u32,
    streak: u32,
    lives: u32,
    status: GameStatus,
    #[serde(skip)]
    rules: Rules,
}

impl Game {
    fn new(rules: Rules) -> Self {
        Self {
            current_round: None,
            score: 0,
            level: 1,
            streak: 0,
            lives: rules.lives,
            status: GameStatus::Playing,
            rules,
        }
    }

    pub fn current_round(&self) -> Option<&GameRound> {
        self.current_round.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// True while playing with no round, or with the current round answered.
    pub fn can_start_new_round(&self) -> bool {
        self.status == GameStatus::Playing
            && self
                .current_round
                .as_ref()
                .map_or(true, GameRound::is_answered)
    }
}

/// Fresh game under the default rules.
pub fn create_game() -> Game {
    Game::new(Rules::default())
}

/// Fresh game under `rules`, rejecting rules that cannot be played.
pub fn create_game_with(rules: Rules) -> Result<Game> {
    rules.validate()?;
    Ok(Game::new(rules))
}

/// Fresh game under the rules `game` was created with.
pub fn reset_game(game: &Game) -> Game {
    Game::new(game.rules)
}

/// Apply level progression, then install a new round for the resulting level.
pub fn start_new_round<R: Rng + ?Sized>(game: &Game, rng: &mut R) -> Result<Game> {
    if game.is_game_over() {
        return Err(Error::GameOver);
    }

    let (level, streak) = if game.streak >= game.rules.streak_threshold {
        let level = game.level.saturating_add(1).min(game.rules.max_level);
        if level != game.level {
            tracing::debug!(from = game.level, to = level, "level up");
        }
        (level, 0)
    } else {
        (game.level, game.streak)
    };

    let round = create_game_round(level, &game.rules.difficulty, rng)?;

    Ok(Game {
        current_round: Some(round),
        level,
        streak,
        ..game.clone()
    })
}

/// Answer the current round with `id` and update score, streak and lives.
pub fn process_guess(game: &Game, id: PanelId) -> Result<Game> {
    let round = game.current_round.as_ref().ok_or(Error::NoActiveRound)?;
    let answered = make_guess(round, id)?;

    let next = if answered.is_correct() {
        Game {
            score: game.score.saturating_add(1),
            streak: game.streak.saturating_add(1),
            ..game.clone()
        }
    } else {
        let lives = game.lives.saturating_sub(1);
        Game {
            streak: 0,
            lives,
            status: if lives == 0 {
                GameStatus::GameOver
            } else {
                GameStatus::Playing
            },
            ..game.clone()
        }
    };

    tracing::debug!(
        panel = %id,
        correct = answered.is_correct(),
        score = next.score,
        streak = next.streak,
        lives = next.lives,
        "processed guess"
    );
    if next.is_game_over() {
        tracing::info!(score = next.score, level = next.level, "game over");
    }

    Ok(Game {
        current_round: Some(answered),
        ..next
    })
}

pub fn is_game_over(game: &Game) -> bool {
    game.is_game_over()
}

pub fn can_start_new_round(game: &Game) -> bool {
    game.can_start_new_round()
}

pub fn get_score(game: &Game) -> u32 {
    game.score()
}

pub fn get_status(game: &Game) -> GameStatus {
    game.status()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn target_of(game: &Game) -> PanelId {
        game.current_round().unwrap().target().id
    }

    fn wrong_choice(game: &Game) -> PanelId {
        let round = game.current_round().unwrap();
        round
            .choices()
            .iter()
            .map(|panel| panel.id)
            .find(|id| *id != round.target().id)
            .unwrap()
    }

    fn play_correct(game: &Game, rng: &mut StdRng) -> Game {
        let started = start_new_round(game, rng).unwrap();
        process_guess(&started, target_of(&started)).unwrap()
    }

    fn play_wrong(game: &Game, rng: &mut StdRng) -> Game {
        let started = start_new_round(game, rng).unwrap();
        process_guess(&started, wrong_choice(&started)).unwrap()
    }

    #[test]
    fn test_create_game_initial_state() {
        let game = create_game();
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.lives(), 3);
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.current_round().is_none());
        assert!(game.can_start_new_round());
    }

    #[test]
    fn test_start_first_round() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = start_new_round(&create_game(), &mut rng).unwrap();
        let round = game.current_round().unwrap();
        assert_eq!(round.level(), 1);
        assert_eq!(round.choices().len(), 3);
        assert!(!game.can_start_new_round());
    }

    #[test]
    fn test_correct_guess_scores() {
        let mut rng = StdRng::seed_from_u64(2);
        let game = play_correct(&create_game(), &mut rng);
        assert_eq!(game.score(), 1);
        assert_eq!(game.streak(), 1);
        assert_eq!(game.lives(), 3);
        assert!(game.current_round().unwrap().is_answered());
        assert!(game.can_start_new_round());
    }

    #[test]
    fn test_incorrect_guess_costs_life_and_streak() {
        let mut rng = StdRng::seed_from_u64(3);
        let game = play_correct(&create_game(), &mut rng);
        let game = play_wrong(&game, &mut rng);
        assert_eq!(game.score(), 1);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.lives(), 2);
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_streak_levels_up_on_next_round() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut game = create_game();
        for _ in 0..3 {
            game = play_correct(&game, &mut rng);
        }
        assert_eq!(game.streak(), 3);
        assert_eq!(game.level(), 1);

        let next = start_new_round(&game, &mut rng).unwrap();
        assert_eq!(next.level(), 2);
        assert_eq!(next.streak(), 0);
        let round = next.current_round().unwrap();
        assert_eq!(round.level(), 2);
        assert_eq!(round.choices().len(), 4);
    }

    #[test]
    fn test_level_capped_at_max() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = create_game();
        for _ in 0..40 {
            game = play_correct(&game, &mut rng);
        }
        let game = start_new_round(&game, &mut rng).unwrap();
        assert_eq!(game.level(), 10);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut game = create_game();
        for _ in 0..2 {
            game = play_wrong(&game, &mut rng);
        }
        assert_eq!(game.lives(), 1);

        let game = play_wrong(&game, &mut rng);
        assert_eq!(game.lives(), 0);
        assert_eq!(game.status(), GameStatus::GameOver);
        assert!(is_game_over(&game));
        assert!(!can_start_new_round(&game));
        assert_eq!(start_new_round(&game, &mut rng), Err(Error::GameOver));
    }

    #[test]
    fn test_guess_without_round() {
        assert_eq!(
            process_guess(&create_game(), PanelId::new(0)),
            Err(Error::NoActiveRound)
        );
    }

    #[test]
    fn test_round_errors_surface_unchanged() {
        let mut rng = StdRng::seed_from_u64(7);
        let started = start_new_round(&create_game(), &mut rng).unwrap();

        let unknown = PanelId::new(42);
        assert_eq!(process_guess(&started, unknown), Err(Error::InvalidPanel(unknown)));

        let answered = process_guess(&started, target_of(&started)).unwrap();
        assert_eq!(
            process_guess(&answered, target_of(&answered)),
            Err(Error::AlreadyAnswered)
        );
    }

    #[test]
    fn test_transitions_leave_input_untouched() {
        let mut rng = StdRng::seed_from_u64(8);
        let started = start_new_round(&create_game(), &mut rng).unwrap();
        let snapshot = started.clone();

        let _ = process_guess(&started, target_of(&started)).unwrap();
        let _ = process_guess(&started, PanelId::new(42));
        assert_eq!(started, snapshot);
    }

    #[test]
    fn test_accessors() {
        let mut rng = StdRng::seed_from_u64(9);
        let game = play_correct(&create_game(), &mut rng);
        assert_eq!(get_score(&game), 1);
        assert_eq!(get_status(&game), GameStatus::Playing);
    }

    #[test]
    fn test_custom_rules() {
        let rules = Rules {
            lives: 1,
            streak_threshold: 1,
            ..Rules::default()
        };
        let mut rng = StdRng::seed_from_u64(10);
        let game = play_correct(&create_game_with(rules).unwrap(), &mut rng);
        let game = start_new_round(&game, &mut rng).unwrap();
        assert_eq!(game.level(), 2);

        let game = process_guess(&game, wrong_choice(&game)).unwrap();
        assert!(game.is_game_over());
    }

    #[test]
    fn test_rules_validation() {
        assert_eq!(Rules::default().validate(), Ok(()));

        let cases = [
            (Rules { lives: 0, ..Rules::default() }, RulesError::NoLives),
            (
                Rules {
                    streak_threshold: 0,
                    ..Rules::default()
                },
                RulesError::NoStreakThreshold,
            ),
            (
                Rules {
                    max_level: 0,
                    ..Rules::default()
                },
                RulesError::NoMaxLevel,
            ),
        ];
        for (rules, expected) in cases {
            assert_eq!(rules.validate(), Err(expected));
        }

        let mut rules = Rules::default();
        rules.difficulty.base_choices = 0;
        rules.difficulty.max_choices = 1;
        assert_eq!(rules.validate(), Err(RulesError::TooFewChoices));

        let mut rules = Rules::default();
        rules.difficulty.max_choices = 1_000_000_000_000;
        assert_eq!(rules.validate(), Err(RulesError::TooManyChoices));

        let mut rules = Rules::default();
        rules.difficulty.base_choices = MAX_CHOICES_LIMIT + 1;
        assert_eq!(rules.validate(), Err(RulesError::TooManyChoices));

        let mut rules = Rules::default();
        rules.difficulty.min_distance = f64::NAN;
        assert_eq!(rules.validate(), Err(RulesError::InvalidDistance));
    }

    #[test]
    fn test_create_game_with_rejects_unplayable_rules() {
        let no_lives = Rules {
            lives: 0,
            ..Rules::default()
        };
        assert_eq!(
            create_game_with(no_lives),
            Err(Error::InvalidRules(RulesError::NoLives))
        );

        let no_max_level = Rules {
            max_level: 0,
            streak_threshold: 1,
            ..Rules::default()
        };
        assert_eq!(
            create_game_with(no_max_level),
            Err(Error::InvalidRules(RulesError::NoMaxLevel))
        );

        let mut single_choice = Rules::default();
        single_choice.difficulty.base_choices = 0;
        single_choice.difficulty.max_choices = 1;
        assert_eq!(
            create_game_with(single_choice),
            Err(Error::InvalidRules(RulesError::TooFewChoices))
        );
    }

    #[test]
    fn test_reset_keeps_rules() {
        let rules = Rules {
            lives: 5,
            ..Rules::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        let game = play_wrong(&create_game_with(rules).unwrap(), &mut rng);
        assert_eq!(game.lives(), 4);

        let fresh = reset_game(&game);
        assert_eq!(fresh.lives(), 5);
        assert_eq!(fresh.rules(), &rules);
        assert!(fresh.current_round().is_none());
    }

    #[test]
    fn test_status_serializes_camel_case() {
        #[derive(Serialize)]
        struct Wrapper {
            status: GameStatus,
        }
        let toml = toml::to_string(&Wrapper {
            status: GameStatus::GameOver,
        })
        .unwrap();
        assert_eq!(toml.trim(), "status = \"gameOver\"");
    }
}
