//! `bench_local.rs` — quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing of message generation plus tokenizing on *your* machine.
//! - Each case is a grid shape and palette; every run deals `--seeds` terminals.
//! - Reports the median run time and the average number of words and commands.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Own word list:                  `cargo run --bin bench_local --release -- -w words.txt`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - One warm-up run per case is done (not included in timing).
//! - We report the *median* over repeats (more robust than mean for small _N_).

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::Instant;

use hackterm::generator::generate;
use hackterm::grid::{GridShape, chunk_rows};
use hackterm::palette::Palette;
use hackterm::tokenizer::{BracketChannels, TokenizerOptions, tokenize};
use hackterm::word_list::{WordList, WordPool};

/// Simple local benchmark runner: time generate + tokenize over many seeds.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Word list file (defaults to the built-in words)
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// Number of repeats per case (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 3)]
    num_repeats: usize,

    /// Terminals dealt per run
    #[arg(short = 's', long = "seeds", default_value_t = 1000)]
    num_seeds: u64,
}

/// A benchmark case: a grid shape and palette, both in text form.
#[derive(Clone)]
struct Case {
    grid: &'static str,
    palette: &'static str,
}

/// Edit/add new cases here.
fn get_cases() -> Vec<Case> {
    vec![
        Case { grid: "2x16x12", palette: hackterm::glyph::DEFAULT_PALETTE },
        Case { grid: "2x16x12", palette: "<>{}[]().:;ww" },
        Case { grid: "4x32x16", palette: hackterm::glyph::DEFAULT_PALETTE },
        Case { grid: "1x8x8", palette: ".w" },
    ]
}

/// Word and command counts summed over one run.
#[derive(Default)]
struct Counts {
    words: usize,
    regions: usize,
}

/// Deal `num_seeds` terminals.
fn run_case(list: &WordList, shape: GridShape, palette: &Palette, num_seeds: u64) -> Counts {
    let channels = BracketChannels::default();
    let mut counts = Counts::default();
    for seed in 0..num_seeds {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = WordPool::from_list(list);
        let Ok(message) = generate(&mut pool, palette, shape.total_length(), 3, &mut rng) else {
            continue;
        };
        let rows = chunk_rows(message.text(), shape.chars_per_row);
        let tokens = tokenize(&rows, &channels, &message.placed_words(), TokenizerOptions::default());
        counts.words += black_box(tokens.words().len());
        counts.regions += black_box(tokens.regions().len());
    }
    counts
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let list = match &cli.words {
        Some(path) => WordList::load_from_path(path)?,
        None => WordList::default(),
    };
    eprintln!("Using {} words of length {}", list.len(), list.word_len());

    let mut summary: Vec<(String, f64, f64, f64)> = Vec::new();

    for (idx, case) in get_cases().iter().enumerate() {
        let shape: GridShape = case.grid.parse()?;
        let palette: Palette = case.palette.parse()?;
        eprintln!("\n[{:02}] {} with palette {}", idx + 1, shape, palette);

        // warm-up, not timed
        black_box(run_case(&list, shape, &palette, cli.num_seeds.min(10)));

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last = Counts::default();
        for rep in 0..cli.num_repeats {
            let t_run = Instant::now();
            last = run_case(&list, shape, &palette, black_box(cli.num_seeds));
            let secs = t_run.elapsed().as_secs_f64();
            times.push(secs);
            eprintln!("  run {:>2}/{:>2}: {:.3}s", rep + 1, cli.num_repeats, secs);
        }

        let med = median(times);
        let per_seed = cli.num_seeds.max(1) as f64;
        let avg_words = last.words as f64 / per_seed;
        let avg_regions = last.regions as f64 / per_seed;
        eprintln!("  → median {med:.3}s; {avg_words:.1} words and {avg_regions:.1} commands per terminal");
        summary.push((format!("{shape} {palette}"), med, avg_words, avg_regions));
    }

    eprintln!("\n==== Summary ====");
    eprintln!("{:<32} | {:>10} | {:>7} | {:>8}", "case", "median (s)", "words", "commands");
    eprintln!("{:-<32}-+-{:-<10}-+-{:-<7}-+-{:-<8}", "", "", "", "");
    for (name, med, words, regions) in &summary {
        let display: String = name.chars().take(32).collect();
        eprintln!("{display:<32} | {med:>10.3} | {words:>7.1} | {regions:>8.1}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(median(vec![]), 0.0);
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(vec![4.0, 1.0, 2.0, 3.0]), 2.5);
    }

    #[test]
    fn test_cases_parse() {
        for case in get_cases() {
            assert!(case.grid.parse::<GridShape>().is_ok());
            assert!(case.palette.parse::<Palette>().is_ok());
        }
    }

    #[test]
    fn test_run_case_counts_words() {
        let counts = run_case(&WordList::default(), GridShape::default(), &Palette::default(), 5);
        assert!(counts.words >= 5);
    }
}
