use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use hackterm::config::{DEFAULT_MAX_TRIES, DEFAULT_MIN_GAP, TerminalConfig};
use hackterm::errors::ConfigError;
use hackterm::generator::GenerateError;
use hackterm::grid::{Direction, GridShape};
use hackterm::palette::Palette;
use hackterm::terminal::{Selection, Terminal, TerminalError};
use hackterm::word_list::WordList;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Hacking-terminal puzzle generator
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// Word list file, one word per line (defaults to the built-in five-letter words)
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// Seed for a reproducible terminal
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid shape as COLUMNSxROWSxCHARS
    #[arg(short, long, default_value_t = GridShape::default())]
    grid: GridShape,

    /// Glyphs strictly exceeded between two words
    #[arg(short = 'm', long, default_value_t = DEFAULT_MIN_GAP)]
    min_gap: usize,

    /// Wrong guesses allowed before lockout
    #[arg(short, long, default_value_t = DEFAULT_MAX_TRIES, value_parser = clap::value_parser!(u32).range(1..))]
    tries: u32,

    /// Noise palette; every 'w' is a word marker
    #[arg(long)]
    palette: Option<Palette>,

    /// Play interactively on stdin
    #[arg(short, long)]
    play: bool,

    /// Print the placed words and the solution on stderr
    #[arg(short, long)]
    reveal: bool,
}

/// Entry point of the hackterm CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("HACKTERM_DEBUG").is_ok();
    hackterm::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        // Print the error message to stderr, with detailed formatting for our own errors
        if let Some(te) = e.downcast_ref::<TerminalError>() {
            eprintln!("Error: {}", te.display_detailed());
        } else if let Some(ge) = e.downcast_ref::<GenerateError>() {
            eprintln!("Error: {}", ge.display_detailed());
        } else if let Some(ce) = e.downcast_ref::<ConfigError>() {
            eprintln!("Error: {}", ce.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Build the terminal from the CLI flags, print it, and optionally play it.
fn try_main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let words = match &cli.words {
        Some(path) => WordList::load_from_path(path)?,
        None => WordList::default(),
    };
    let config = TerminalConfig {
        grid: cli.grid,
        min_gap: cli.min_gap,
        max_tries: cli.tries,
        palette: cli.palette.unwrap_or_default(),
        ..TerminalConfig::default()
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("dealing a {} terminal from {} words", config.grid, words.len());

    let mut terminal = Terminal::new(config, words, &mut rng)?;

    if cli.reveal {
        eprintln!("placed: {}", terminal.message().placed_words().join(", "));
        eprintln!("solution: {}", terminal.solution());
    }

    println!("{}", terminal.render());
    if cli.play {
        play(&mut terminal, &mut rng)?;
    }
    Ok(())
}

/// Read commands from stdin until the terminal is finished or the player quits.
///
/// A number selects that span, a word selects that word, `q` quits, an empty
/// line selects the span under the cursor and `left`/`right`/`up`/`down` move it.
fn play(terminal: &mut Terminal, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    while !terminal.is_finished() {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        let selection = match input {
            "q" | "quit" => break,
            "" => terminal.select_cursor(rng)?,
            "left" | "right" | "up" | "down" => {
                let direction = match input {
                    "left" => Direction::Left,
                    "right" => Direction::Right,
                    "up" => Direction::Up,
                    _ => Direction::Down,
                };
                if terminal.move_cursor(direction).is_none() {
                    eprintln!("cursor is at the edge");
                }
                println!("{}", terminal.render());
                continue;
            }
            _ => match input.parse::<usize>() {
                Ok(index) => match terminal.select(index, rng) {
                    Ok(selection) => selection,
                    // a typo should not end the game
                    Err(e @ TerminalError::IndexOutOfRange { .. }) => {
                        eprintln!("{}", e.display_detailed());
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                },
                Err(_) => terminal.select_word(input, rng)?,
            },
        };

        if selection.is_ignored() {
            eprintln!("nothing to select there");
        }
        println!("{}", terminal.render());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["hackterm"]).unwrap();
        assert_eq!(cli.grid, GridShape::default());
        assert_eq!(cli.min_gap, 3);
        assert_eq!(cli.tries, 4);
        assert!(!cli.play);
    }

    #[test]
    fn test_grid_and_palette_flags() {
        let cli = Cli::try_parse_from(["hackterm", "--grid", "1x8x10", "--palette", ".:ww", "--seed", "9"]).unwrap();
        assert_eq!(cli.grid.total_length(), 80);
        assert_eq!(cli.palette.unwrap().to_string(), ".:ww");
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn test_bad_flags_rejected() {
        assert!(Cli::try_parse_from(["hackterm", "--grid", "2x16"]).is_err());
        assert!(Cli::try_parse_from(["hackterm", "--tries", "0"]).is_err());
        assert!(Cli::try_parse_from(["hackterm", "--palette", "..."]).is_err());
    }
}
