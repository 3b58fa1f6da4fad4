//! `word_list` — the master list of candidate words and the per-run pool drawn from it.
//!
//! A [`WordList`] is validated once and never changes: all words are ASCII letters,
//! all share one length, duplicates are dropped (first occurrence wins) and every
//! word is normalized to uppercase, since the terminal shows uppercase text and
//! words are compared case-insensitively.
//!
//! A [`WordPool`] is the mutable multiset one generation run draws from. Each run
//! gets a fresh pool built from the list, so a run never sees words an earlier
//! run already consumed.
//!
//! Loading mirrors the rest of the crate's WASM story:
//! - `parse_from_str(...)` — works everywhere, including WASM.
//! - `load_from_path(...)` — **native-only** convenience method to read from a file path.

use rand::Rng;

use crate::errors::ConfigError;
use crate::glyph::{DEFAULT_WORDS, TerminalGlyph};

/// Validated, immutable candidate words of one shared length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
    word_len: usize,
}

impl WordList {
    /// Validate and normalize a list of words.
    ///
    /// # Errors
    ///
    /// - `EmptyWordList` when no word is given
    /// - `InvalidWordChar` when a word has anything but ASCII letters
    /// - `UnequalWordLengths` when a word's length differs from the first word's
    pub fn new<I, S>(words: I) -> Result<WordList, Box<ConfigError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for raw in words {
            let word = raw.as_ref().trim().to_ascii_uppercase();
            if let Some(invalid_char) = word.chars().find(|c| !c.is_word_char()) {
                return Err(Box::new(ConfigError::InvalidWordChar { word, invalid_char }));
            }
            if word.is_empty() || normalized.contains(&word) {
                continue;
            }
            if let Some(first) = normalized.first() && first.len() != word.len() {
                return Err(Box::new(ConfigError::UnequalWordLengths {
                    first: first.clone(),
                    expected: first.len(),
                    found: word.len(),
                    word,
                }));
            }
            normalized.push(word);
        }

        let word_len = normalized.first().map(String::len).ok_or(ConfigError::EmptyWordList)?;
        Ok(WordList { words: normalized, word_len })
    }

    /// Parse a word list from an in-memory string.
    ///
    /// One word per line. Blank lines and lines starting with `#` are skipped, and an
    /// `entry;score` style suffix is ignored so scored dictionaries can be used as-is.
    ///
    /// # Errors
    ///
    /// Same as [`WordList::new`].
    pub fn parse_from_str(contents: &str) -> Result<WordList, Box<ConfigError>> {
        let words = contents.lines().filter_map(|raw_line| {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                // only the part before the first ';' is the word
                Some(line.split_once(';').map_or(line, |(word, _)| word))
            }
        });
        WordList::new(words)
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`, or if its
    /// contents are not a valid word list.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {}", path_ref.display(), e),
            )
        })?;

        Self::parse_from_str(&data).map_err(|ce| (*ce).into())
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Length shared by every word.
    #[must_use]
    pub fn word_len(&self) -> usize {
        self.word_len
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` is in the list, ignoring case.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.eq_ignore_ascii_case(word))
    }
}

impl Default for WordList {
    fn default() -> Self {
        WordList {
            words: DEFAULT_WORDS.iter().map(|w| w.to_ascii_uppercase()).collect(),
            word_len: DEFAULT_WORDS[0].len(),
        }
    }
}

/// Words still available to one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    remaining: Vec<String>,
    word_len: usize,
}

impl WordPool {
    /// A full pool holding every word of `list`.
    #[must_use]
    pub fn from_list(list: &WordList) -> WordPool {
        WordPool { remaining: list.words.clone(), word_len: list.word_len }
    }

    /// Restore the pool to the full contents of `list`.
    pub fn reset(&mut self, list: &WordList) {
        self.remaining.clone_from(&list.words);
        self.word_len = list.word_len;
    }

    /// Remove and return one word chosen uniformly at random.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if self.remaining.is_empty() {
            return None;
        }
        let i = rng.gen_range(0..self.remaining.len());
        Some(self.remaining.remove(i))
    }

    #[must_use]
    pub fn word_len(&self) -> usize {
        self.word_len
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    #[must_use]
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }
}
