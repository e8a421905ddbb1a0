//! Color Match - terminal front end
//!
//! Plays the game in the terminal:
//! - Shows the target color and numbered choices as 24-bit color swatches
//! - Reads the player's pick from stdin
//! - Reports score, streak and lives after each round

use anyhow::Result;
use clap::{Parser, Subcommand};
use color_match::config::{self, Config, DisplayConfig};
use color_match::game::{Action, DifficultyCurve, GameRound, GameSession, PanelId};
use color_match::{Game, Rgb};
use colored::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, IsTerminal, Write};

/// Color Match - find the panel that matches the target
#[derive(Parser)]
#[command(name = "color-match")]
#[command(version)]
#[command(about = "Pick the panel that matches the target color")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal (default)
    Play {
        /// Seed the color generator to replay the same game
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show choice count and color distance per level
    Curve {
        /// Number of levels to show (defaults to the max level)
        #[arg(short, long)]
        levels: Option<u32>,
    },

    /// Show two hex colors side by side with their distance
    Compare {
        /// First color, e.g. "#80c832"
        first: String,

        /// Second color, e.g. "#7fc02e"
        second: String,
    },

    /// Show configuration path and active rules
    Config,
}

/// What the player typed at the choice prompt
#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Panel(PanelId),
    Quit,
    Invalid,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { seed }) => run_play(seed)?,
        None => run_play(None)?,
        Some(Commands::Curve { levels }) => {
            let cfg = load_config_or_default();
            print_difficulty_curve(
                &cfg.rules.difficulty,
                levels.unwrap_or(cfg.rules.max_level),
            );
        }
        Some(Commands::Compare { first, second }) => {
            let cfg = load_config_or_default();
            compare_colors(&first, &second, &cfg.display);
        }
        Some(Commands::Config) => {
            show_config_info()?;
        }
    }

    Ok(())
}

/// Load the config file, falling back to defaults when it cannot be used.
fn load_config_or_default() -> Config {
    config_or_default(Config::load())
}

fn config_or_default(loaded: Result<Config>) -> Config {
    loaded.unwrap_or_else(|err| {
        tracing::warn!(error = %format!("{err:#}"), "ignoring config file, using defaults");
        Config::default()
    })
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_play(seed: Option<u64>) -> Result<()> {
    let cfg = Config::load()?;
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::new(cfg.rules, rng)?;

    print_welcome();
    print!("{}", "Press Enter to start...".bright_black());
    if read_line().is_none() {
        return Ok(());
    }

    let mut notice: Option<ColoredString> = None;

    loop {
        if session.is_game_over() {
            print_game_over(session.game());
            print!("{}", "Play again? [Y/n] ".bright_cyan());
            if !prompt_yes_no(true) {
                break;
            }
            session.dispatch(Action::Reset)?;
            continue;
        }

        if session.can_start_new_round() {
            session.dispatch(Action::StartNewRound)?;
        }

        let game = session.game();
        let Some(round) = game.current_round() else {
            break;
        };

        clear_screen();
        print_status(game);
        print_round(round, &cfg.display);
        if let Some(err) = session.last_error() {
            println!("{} {}", "Error:".bright_red(), err.to_string().bright_red());
        }
        if let Some(message) = notice.take() {
            println!("{message}");
        }

        print!(
            "{}",
            format!("Pick a panel (1-{}, q to quit): ", round.choices().len()).bright_cyan()
        );
        let Some(input) = read_line() else {
            break;
        };

        match parse_choice(&input, round) {
            Choice::Quit => break,
            Choice::Invalid => {
                notice = Some("Enter one of the panel numbers.".bright_yellow());
                continue;
            }
            Choice::Panel(id) => {
                // Rejected guesses are shown from `last_error` on the next redraw.
                if session.dispatch(Action::MakeGuess(id)).is_err() {
                    continue;
                }
            }
        }

        print_guess_feedback(session.game(), &cfg.display);
        if !session.is_game_over() {
            print!("{}", "Press Enter for the next round...".bright_black());
            if read_line().is_none() {
                break;
            }
        }
    }

    println!(
        "\n{} {}",
        "Final score:".bright_yellow().bold(),
        session.game().score().to_string().bright_white().bold()
    );
    Ok(())
}

fn parse_choice(input: &str, round: &GameRound) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Choice::Quit;
    }

    match input.parse::<usize>() {
        Ok(number) if number >= 1 => round
            .choices()
            .get(number - 1)
            .map_or(Choice::Invalid, |panel| Choice::Panel(panel.id)),
        _ => Choice::Invalid,
    }
}

fn swatch(color: &Rgb, width: usize) -> ColoredString {
    " ".repeat(width.max(1))
        .on_truecolor(color.r(), color.g(), color.b())
}

fn print_welcome() {
    clear_screen();
    println!("{}", "COLOR MATCH".bright_cyan().bold());
    println!(
        "{}",
        "Find the panel that matches the target. Three in a row raises the level.\n"
            .bright_white()
    );
}

fn print_status(game: &Game) {
    println!(
        "{} {}   {} {}   {} {}   {} {}\n",
        "Level:".bright_yellow(),
        game.level().to_string().bright_white().bold(),
        "Score:".bright_yellow(),
        game.score().to_string().bright_white().bold(),
        "Streak:".bright_yellow(),
        game.streak().to_string().bright_white(),
        "Lives:".bright_yellow(),
        "♥ ".repeat(game.lives() as usize).bright_red()
    );
}

fn print_round(round: &GameRound, display: &DisplayConfig) {
    let width = display.swatch_width;
    let target = round.target().color;

    println!("{}", "TARGET".bright_white().bold());
    println!("  {}", swatch(&target, width.saturating_mul(2)));
    println!("  {}", swatch(&target, width.saturating_mul(2)));
    println!();

    println!("{}", "CHOICES".bright_white().bold());
    for (i, panel) in round.choices().iter().enumerate() {
        let hex = if display.show_hex {
            panel.color.to_hex().bright_black()
        } else {
            "".normal()
        };
        println!("  {:2}. {} {}", i + 1, swatch(&panel.color, width), hex);
    }
    println!();
}

fn print_guess_feedback(game: &Game, display: &DisplayConfig) {
    let Some(round) = game.current_round() else {
        return;
    };

    if round.is_correct() {
        println!("\n{}", "Correct!".bright_green().bold());
    } else {
        let position = round
            .choices()
            .iter()
            .position(|panel| panel.id == round.target().id)
            .map(|i| i + 1)
            .unwrap_or_default();
        println!(
            "\n{} {} {}",
            "Wrong.".bright_red().bold(),
            format!("The match was panel {position}").bright_white(),
            swatch(&round.target().color, display.swatch_width)
        );
    }
}

fn print_game_over(game: &Game) {
    println!("\n{}", "GAME OVER".bright_red().bold());
    println!(
        "{} {}   {} {}",
        "Final score:".bright_yellow(),
        game.score().to_string().bright_white().bold(),
        "Level reached:".bright_yellow(),
        game.level().to_string().bright_white()
    );
}

fn print_difficulty_curve(curve: &DifficultyCurve, levels: u32) {
    println!("{}", "DIFFICULTY CURVE\n".bright_yellow().bold());
    println!(
        "  {}  {}  {}",
        "Level".bright_cyan(),
        "Choices".bright_cyan(),
        "Max distance".bright_cyan()
    );
    for level in 1..=levels.max(1) {
        let settings = curve.settings(level);
        println!(
            "  {:>5}  {:>7}  {:>12.1}",
            level, settings.choice_count, settings.max_distance
        );
    }
}

fn compare_colors(first: &str, second: &str, display: &DisplayConfig) {
    let parsed = Rgb::from_hex(first).and_then(|a| Ok((a, Rgb::from_hex(second)?)));
    match parsed {
        Ok((a, b)) => {
            println!("  {} {}", swatch(&a, display.swatch_width), a.to_hex().bright_white());
            println!("  {} {}", swatch(&b, display.swatch_width), b.to_hex().bright_white());
            println!(
                "{} {:.2}",
                "Distance:".bright_yellow(),
                a.distance(&b)
            );
        }
        Err(err) => {
            println!("{} {}", "Error:".bright_red(), err.to_string().bright_red());
        }
    }
}

fn show_config_info() -> Result<()> {
    println!("{}", "Color Match Configuration\n".bright_cyan().bold());

    match config::get_config_path() {
        Ok(path) => {
            println!("{} {}", "Config file:".bright_yellow(), path.bright_white());
            if std::path::Path::new(&path).exists() {
                println!("  {} {}", "Status:".bright_cyan(), "Exists".bright_green());
            } else {
                println!(
                    "  {} {}",
                    "Status:".bright_cyan(),
                    "Not created yet (will use defaults)".bright_yellow()
                );
            }
        }
        Err(e) => {
            println!(
                "{} Could not determine config path: {}",
                "Error:".bright_red(),
                e
            );
        }
    }

    let cfg = match config::init_config() {
        Ok(cfg) => cfg,
        Err(err) => {
            println!(
                "  {} {}",
                "Note:".bright_yellow(),
                format!("Could not load or create config file: {err}").bright_black()
            );
            Config::default()
        }
    };

    let rules = &cfg.rules;
    let curve = &rules.difficulty;
    println!("\n{}", "Rules:".bright_yellow());
    println!("  {} {}", "Lives:".bright_cyan(), rules.lives);
    println!("  {} {}", "Streak to level up:".bright_cyan(), rules.streak_threshold);
    println!("  {} {}", "Max level:".bright_cyan(), rules.max_level);
    println!(
        "  {} {} + level (max {})",
        "Choices:".bright_cyan(),
        curve.base_choices,
        curve.max_choices
    );
    println!(
        "  {} {} - {} per level (min {})",
        "Max distance:".bright_cyan(),
        curve.base_distance,
        curve.distance_step,
        curve.min_distance
    );

    println!("\n{}", "Display:".bright_yellow());
    println!("  {} {}", "Swatch width:".bright_cyan(), cfg.display.swatch_width);
    println!("  {} {}", "Show hex:".bright_cyan(), cfg.display.show_hex);

    Ok(())
}

fn clear_screen() {
    if !io::stdout().is_terminal() {
        return;
    }
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

/// Read one trimmed line; `None` at end of input.
fn read_line() -> Option<String> {
    let _ = io::stdout().flush();
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt_yes_no(default_yes: bool) -> bool {
    let Some(answer) = read_line() else {
        return false;
    };

    match answer.to_ascii_lowercase().as_str() {
        "" => default_yes,
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default_yes,
    }
}
