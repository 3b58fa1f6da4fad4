//! The message generator: fixed-length terminal noise with candidate words hidden in it.
//!
//! # Error Handling
//!
//! The generator uses [`GenerateError`] with two variants:
//!
//! - G001: `InvalidConfig` (Invalid generation input (wraps [`ConfigError`]))
//! - G002: `NoWordsPlaced` (No word fits, so no solution can be elected)
//!
//! # Algorithm
//!
//! One append-only pass draws palette entries until the text reaches `total_length`:
//!
//! - a glyph is appended as-is;
//! - a word marker places the next word from the pool, unless the previous draw
//!   already placed one or the gap since the last word is still too short, in
//!   which case a glyph is drawn instead;
//! - when a word no longer fits in the remaining space, the rest of the text is
//!   filled with glyphs and no further words are placed.
//!
//! The marker is excluded from draws once the pool is empty, so the loop always
//! moves forward.
//!
//! # Examples
//!
//! ```
//! use hackterm::generator::generate;
//! use hackterm::palette::Palette;
//! use hackterm::word_list::{WordList, WordPool};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let list = WordList::default();
//! let mut pool = WordPool::from_list(&list);
//! let mut rng = StdRng::seed_from_u64(2024);
//! let message = generate(&mut pool, &Palette::default(), 384, 3, &mut rng)?;
//!
//! assert_eq!(message.text().chars().count(), 384);
//! let solution = message.solution()?;
//! assert!(message.placed_words().iter().any(|w| w == solution));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::errors::ConfigError;
use crate::palette::{Palette, Symbol};
use crate::random;
use crate::word_list::WordPool;

/// Unified error type for message generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// Input rejected before any text was generated.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] Box<ConfigError>),

    /// The run placed no words, so there is nothing to elect as the solution.
    #[error("no words placed in {total_length} characters (word length {word_len})")]
    NoWordsPlaced { total_length: usize, word_len: usize },
}

impl GenerateError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::InvalidConfig(_) => "G001",
            GenerateError::NoWordsPlaced { .. } => "G002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GenerateError::InvalidConfig(_) => "Invalid generation input",
            GenerateError::NoWordsPlaced { .. } => "No word fits, so no solution can be elected",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            GenerateError::InvalidConfig(_) => "The generator was called with input that cannot produce a terminal. This wraps an underlying ConfigError (see Config Errors section for specific error codes).",
            GenerateError::NoWordsPlaced { .. } => "The message was generated, but it is pure noise: either the pool was empty when the run started or the text is shorter than one word.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GenerateError::NoWordsPlaced { .. } => Some("Use a larger grid, shorter words, or reset the word pool before generating"),
            GenerateError::InvalidConfig(_) => None, // ConfigError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            GenerateError::InvalidConfig(ce) => {
                format!("{}\n  caused by: {}", self.code(), ce.display_detailed())
            }
            GenerateError::NoWordsPlaced { .. } => {
                crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
            }
        }
    }
}

/// Where one placed word sits in the message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub word: String,
    /// Char offset of the word's first letter.
    pub offset: usize,
}

/// The generated puzzle text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    text: String,
    placements: Vec<Placement>,
    solution: Option<String>,
    word_len: usize,
    filled_from: Option<usize>,
}

impl Message {
    /// Uppercase text, exactly `total_length` chars long.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placed words in the order they appear in the text.
    #[must_use]
    pub fn placed_words(&self) -> Vec<String> {
        self.placements.iter().map(|p| p.word.clone()).collect()
    }

    /// The elected solution word.
    ///
    /// # Errors
    ///
    /// `NoWordsPlaced` when the message is pure noise.
    pub fn solution(&self) -> Result<&str, GenerateError> {
        self.solution.as_deref().ok_or(GenerateError::NoWordsPlaced {
            total_length: self.text.chars().count(),
            word_len: self.word_len,
        })
    }

    /// Length shared by every candidate word of the run.
    #[must_use]
    pub fn word_len(&self) -> usize {
        self.word_len
    }

    /// Offset where the tail fill began, if a word stopped fitting.
    #[must_use]
    pub fn filled_from(&self) -> Option<usize> {
        self.filled_from
    }
}

/// Generation state for one run.
struct Builder<'a, R: Rng + ?Sized> {
    pool: &'a mut WordPool,
    palette: &'a Palette,
    rng: &'a mut R,
    total_length: usize,
    text: String,
    // tracked separately from `text.len()` so non-ASCII glyphs count as one
    len: usize,
    placements: Vec<Placement>,
}

impl<R: Rng + ?Sized> Builder<'_, R> {
    fn push_glyph(&mut self) {
        let c = self.palette.draw_glyph(&mut *self.rng);
        self.text.push(c);
        self.len += 1;
    }

    fn remaining(&self) -> usize {
        self.total_length - self.len
    }
}

/// Generate one message of exactly `total_length` chars.
///
/// Draws destructively from `pool`; pass a fresh (or reset) pool for every run.
/// Consecutive words are separated by more than `min_gap` glyphs.
///
/// # Errors
///
/// `InvalidConfig` when `total_length` is zero. An empty pool is not an error:
/// the message is pure noise and [`Message::solution`] reports `NoWordsPlaced`.
pub fn generate<R: Rng + ?Sized>(
    pool: &mut WordPool,
    palette: &Palette,
    total_length: usize,
    min_gap: usize,
    rng: &mut R,
) -> Result<Message, GenerateError> {
    if total_length == 0 {
        return Err(GenerateError::InvalidConfig(Box::new(ConfigError::InvalidGridShape {
            columns: 0,
            rows_per_column: 0,
            chars_per_row: 0,
        })));
    }

    let word_len = pool.word_len();
    let mut b = Builder {
        pool,
        palette,
        rng,
        total_length,
        text: String::with_capacity(total_length),
        len: 0,
        placements: Vec::new(),
    };

    let mut skipping_words = false;
    let mut chars_since_last_word = 0usize;
    let mut last_draw_was_marker = false;
    let mut filled_from = None;

    while b.len < total_length {
        let symbol = b.palette.draw(&mut *b.rng, b.pool.is_empty());

        match symbol {
            Symbol::WordMarker if last_draw_was_marker => {
                // a word was just placed; force at least one glyph after it
                b.push_glyph();
                skipping_words = true;
                chars_since_last_word = 1;
                last_draw_was_marker = false;
            }
            Symbol::WordMarker if skipping_words => {
                b.push_glyph();
                chars_since_last_word += 1;
                last_draw_was_marker = false;
            }
            Symbol::WordMarker => {
                if b.remaining() >= word_len
                    && let Some(word) = b.pool.draw(&mut *b.rng)
                {
                    b.placements.push(Placement { word: word.clone(), offset: b.len });
                    b.text.push_str(&word);
                    b.len += word_len;
                    chars_since_last_word = 0;
                    skipping_words = true;
                    last_draw_was_marker = true;
                } else {
                    filled_from = Some(b.len);
                    while b.len < total_length {
                        b.push_glyph();
                    }
                }
            }
            Symbol::Glyph(c) => {
                b.text.push(c);
                b.len += 1;
                if skipping_words {
                    chars_since_last_word += 1;
                }
                last_draw_was_marker = false;
            }
        }

        if skipping_words && chars_since_last_word > min_gap {
            skipping_words = false;
        }
    }

    let Builder { text, placements, rng, .. } = b;
    let text = text.to_uppercase();
    let solution = random::pick(&placements, rng).map(|p| p.word.clone());

    debug!(
        "generated {} chars with {} word(s) [{}], solution {:?}",
        total_length,
        placements.len(),
        placements.iter().map(|p| p.word.as_str()).collect::<Vec<_>>().join(", "),
        solution
    );

    Ok(Message { text, placements, solution, word_len, filled_from })
}
