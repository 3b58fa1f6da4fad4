//! The playable terminal: one generated message plus tries, feed, cursor and commands.
//!
//! # Error Handling
//!
//! - T001: `UnequalLengthLikeness` (Likeness of words with different lengths)
//! - T002: `IndexOutOfRange` (Selection outside the message)
//! - T003: `NoSolution` (Generation failed or placed no word (wraps [`GenerateError`]))
//! - T004: `InvalidConfig` (Rejected configuration (wraps [`ConfigError`]))
//!
//! # Gameplay
//!
//! Selecting a span resolves to one [`Selection`]:
//!
//! - a word: the solution unlocks the terminal; any other word costs a try and
//!   reports its likeness, and the last try locks the terminal out;
//! - an unused, activated bracket endpoint: runs one [`Action`] and consumes the region;
//! - anything else: an `ERROR` line in the feed.
//!
//! Once unlocked or locked out, the terminal ignores selections and cursor moves.

use std::collections::VecDeque;

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::config::{Action, TerminalConfig};
use crate::errors::ConfigError;
use crate::generator::{GenerateError, Message, generate};
use crate::glyph::DUD_GLYPH;
use crate::grid::{Direction, chunk_rows};
use crate::random;
use crate::tokenizer::{Tokenized, tokenize};
use crate::word_list::{WordList, WordPool};

/// Errors raised while building or playing a terminal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerminalError {
    #[error("cannot compare \"{candidate}\" with \"{solution}\": lengths differ")]
    UnequalLengthLikeness { candidate: String, solution: String },

    #[error("index {index} is outside the message (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no playable terminal: {0}")]
    NoSolution(#[from] GenerateError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] Box<ConfigError>),
}

impl TerminalError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            TerminalError::UnequalLengthLikeness { .. } => "T001",
            TerminalError::IndexOutOfRange { .. } => "T002",
            TerminalError::NoSolution(_) => "T003",
            TerminalError::InvalidConfig(_) => "T004",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            TerminalError::UnequalLengthLikeness { .. } => "Likeness of words with different lengths",
            TerminalError::IndexOutOfRange { .. } => "Selection outside the message",
            TerminalError::NoSolution(_) => "Generation failed or placed no word",
            TerminalError::InvalidConfig(_) => "Rejected configuration",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            TerminalError::UnequalLengthLikeness { .. } => "Likeness counts positions where two words agree, so both words must have the same length.",
            TerminalError::IndexOutOfRange { .. } => "Span indices run from 0 to the message length minus one.",
            TerminalError::NoSolution(_) => "A terminal needs at least one placed word to elect as the solution. This wraps an underlying GenerateError (see Generate Errors section).",
            TerminalError::InvalidConfig(_) => "The terminal configuration failed validation. This wraps an underlying ConfigError (see Config Errors section for specific error codes).",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            TerminalError::UnequalLengthLikeness { .. } => Some("Compare words from the same word list"),
            TerminalError::IndexOutOfRange { .. } => Some("Pick an index shown on the grid"),
            // wrapped errors carry their own help
            TerminalError::NoSolution(_) | TerminalError::InvalidConfig(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            TerminalError::NoSolution(ge) => format!("{}\n  caused by: {}", self.code(), ge.display_detailed()),
            TerminalError::InvalidConfig(ce) => format!("{}\n  caused by: {}", self.code(), ce.display_detailed()),
            _ => crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// Number of index-aligned positions where `candidate` and `solution` agree, ignoring case.
///
/// # Errors
///
/// `UnequalLengthLikeness` when the words differ in length.
pub fn likeness(candidate: &str, solution: &str) -> Result<usize, TerminalError> {
    if candidate.chars().count() != solution.chars().count() {
        return Err(TerminalError::UnequalLengthLikeness {
            candidate: candidate.to_string(),
            solution: solution.to_string(),
        });
    }
    Ok(candidate
        .chars()
        .zip(solution.chars())
        .filter(|(a, b)| a.eq_ignore_ascii_case(b))
        .count())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Idle,
    Unlocked,
    LockedOut,
}

/// Outcome of one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Selection {
    /// Nothing happened: the terminal is finished or the span is a removed dud.
    Ignored,
    Unlocked { word: String },
    Denied { word: String, likeness: usize, tries_left: u32 },
    LockedOut { word: String, likeness: usize },
    /// A bracket command ran. `applied` is false when there was no dud left to remove.
    Command { text: String, action: Action, applied: bool },
    Error { glyph: char },
}

/// The scrolling log next to the grid. Oldest lines drop off the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feed {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Feed {
    #[must_use]
    pub fn new(capacity: usize) -> Feed {
        Feed { lines: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn replace(&mut self, old: &str, new: &str) {
        for line in self.lines.iter_mut().filter(|l| l.as_str() == old) {
            new.clone_into(line);
        }
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

/// One dealt puzzle: everything regenerated by a reset.
#[derive(Debug, Clone)]
struct Round {
    message: Message,
    tokens: Tokenized,
    solution: String,
    base_address: usize,
}

impl Round {
    fn deal<R: Rng + ?Sized>(config: &TerminalConfig, words: &WordList, rng: &mut R) -> Result<Round, TerminalError> {
        let mut pool = WordPool::from_list(words);
        let message = generate(&mut pool, &config.palette, config.total_length(), config.min_gap, rng)?;
        let solution = message.solution()?.to_string();
        let tokens = {
            let rows = chunk_rows(message.text(), config.grid.chars_per_row);
            tokenize(&rows, &config.channels, &message.placed_words(), config.tokenizer)
        };
        let base_address = config.grid.random_base_address(rng);
        Ok(Round { message, tokens, solution, base_address })
    }
}

/// A playable terminal.
#[derive(Debug, Clone)]
pub struct Terminal {
    config: TerminalConfig,
    words: WordList,
    round: Round,
    // current glyphs; duds are overwritten with dots
    display: Vec<char>,
    duds: Vec<usize>,
    used_regions: Vec<bool>,
    tries_left: u32,
    status: Status,
    feed: Feed,
    cursor: usize,
    last_action: Option<Action>,
}

impl Terminal {
    /// Validate `config` and deal the first round.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for a rejected configuration, `NoSolution` when no word
    /// could be placed.
    pub fn new<R: Rng + ?Sized>(config: TerminalConfig, words: WordList, rng: &mut R) -> Result<Terminal, TerminalError> {
        config.validate()?;
        let round = Round::deal(&config, &words, rng)?;
        let mut terminal = Terminal {
            feed: Feed::new(config.feed_capacity()),
            display: Vec::new(),
            duds: Vec::new(),
            used_regions: Vec::new(),
            tries_left: config.max_tries,
            status: Status::Idle,
            cursor: 0,
            last_action: None,
            config,
            words,
            round,
        };
        terminal.restart();
        Ok(terminal)
    }

    /// Deal a new round from a full word pool and clear all play state.
    ///
    /// # Errors
    ///
    /// `NoSolution` when no word could be placed; the old round is kept.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), TerminalError> {
        self.round = Round::deal(&self.config, &self.words, rng)?;
        self.restart();
        Ok(())
    }

    fn restart(&mut self) {
        self.display = self.round.message.text().chars().collect();
        self.duds.clear();
        self.used_regions = vec![false; self.round.tokens.regions().len()];
        self.tries_left = self.config.max_tries;
        self.status = Status::Idle;
        self.feed.clear();
        self.cursor = 0;
        self.last_action = None;
        info!(
            "terminal ready: {} word(s), {} command(s)",
            self.round.tokens.words().len(),
            self.used_regions.len()
        );
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status != Status::Idle
    }

    #[must_use]
    pub fn tries_left(&self) -> u32 {
        self.tries_left
    }

    #[must_use]
    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    #[must_use]
    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    #[must_use]
    pub fn message(&self) -> &Message {
        &self.round.message
    }

    #[must_use]
    pub fn tokens(&self) -> &Tokenized {
        &self.round.tokens
    }

    #[must_use]
    pub fn solution(&self) -> &str {
        &self.round.solution
    }

    #[must_use]
    pub fn base_address(&self) -> usize {
        self.round.base_address
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Ordinals of the words removed as duds.
    #[must_use]
    pub fn duds(&self) -> &[usize] {
        &self.duds
    }

    /// The message as currently shown, duds included.
    #[must_use]
    pub fn display_text(&self) -> String {
        self.display.iter().collect()
    }

    fn check_index(&self, index: usize) -> Result<(), TerminalError> {
        if index >= self.display.len() {
            return Err(TerminalError::IndexOutOfRange { index, len: self.display.len() });
        }
        Ok(())
    }

    /// Region ordinal of an activated endpoint whose command has not run yet.
    fn unused_region_at(&self, index: usize) -> Option<usize> {
        let region = self.round.tokens.region_at(index)?;
        (!self.used_regions[region.ordinal]).then_some(region.ordinal)
    }

    fn is_dud(&self, word_ordinal: usize) -> bool {
        self.duds.contains(&word_ordinal)
    }

    /// What the cursor line shows for `index`.
    fn cursor_text(&self, index: usize) -> String {
        if let Some(word) = self.round.tokens.word_at(index) {
            return word.indices().map(|i| self.display[i]).collect();
        }
        if self.unused_region_at(index).is_some()
            && let Some(text) = self.round.tokens.command_text(index)
        {
            return text;
        }
        self.display[index].to_string()
    }

    /// Span indices to highlight while the cursor is on `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` past the end of the message.
    pub fn highlight(&self, index: usize) -> Result<Vec<usize>, TerminalError> {
        self.check_index(index)?;
        if let Some(word) = self.round.tokens.word_at(index) {
            return Ok(word.indices().collect());
        }
        if let Some(ordinal) = self.unused_region_at(index)
            && let Some(region) = self.round.tokens.region(ordinal)
        {
            return Ok(region.members.clone());
        }
        Ok(vec![index])
    }

    /// Put the cursor on `index` and return the cursor text. `None` once the terminal is finished.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` past the end of the message.
    pub fn hover(&mut self, index: usize) -> Result<Option<String>, TerminalError> {
        self.check_index(index)?;
        if self.is_finished() {
            return Ok(None);
        }
        self.cursor = index;
        Ok(Some(self.cursor_text(index)))
    }

    /// Move the cursor one step. `None` at a grid edge or once the terminal is finished.
    pub fn move_cursor(&mut self, direction: Direction) -> Option<String> {
        if self.is_finished() {
            return None;
        }
        let next = self.config.grid.move_cursor(self.cursor, direction)?;
        self.cursor = next;
        Some(self.cursor_text(next))
    }

    /// Select the span at the cursor.
    ///
    /// # Errors
    ///
    /// Same as [`Terminal::select`].
    pub fn select_cursor<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Selection, TerminalError> {
        self.select(self.cursor, rng)
    }

    /// Select the span at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` past the end of the message.
    pub fn select<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> Result<Selection, TerminalError> {
        self.check_index(index)?;
        if self.is_finished() {
            return Ok(Selection::Ignored);
        }
        self.cursor = index;

        if let Some(word) = self.round.tokens.word_at(index) {
            if self.is_dud(word.ordinal) {
                return Ok(Selection::Ignored);
            }
            let word = word.text.clone();
            return self.guess(word);
        }

        if let Some(ordinal) = self.unused_region_at(index) {
            let text = self.cursor_text(index);
            return Ok(self.run_command(ordinal, text, rng));
        }

        let glyph = self.display[index];
        self.feed.push(glyph.to_string());
        self.feed.push("ERROR");
        Ok(Selection::Error { glyph })
    }

    /// Select the first visible occurrence of `word`, ignoring case.
    ///
    /// # Errors
    ///
    /// Same as [`Terminal::select`]. A word that is not on the grid selects nothing.
    pub fn select_word<R: Rng + ?Sized>(&mut self, word: &str, rng: &mut R) -> Result<Selection, TerminalError> {
        let found = self
            .round
            .tokens
            .words()
            .iter()
            .find(|w| w.text.eq_ignore_ascii_case(word) && !self.is_dud(w.ordinal))
            .map(|w| w.start);
        match found {
            Some(start) => self.select(start, rng),
            None => Ok(Selection::Ignored),
        }
    }

    fn guess(&mut self, word: String) -> Result<Selection, TerminalError> {
        let likeness = likeness(&word, &self.round.solution)?;
        self.feed.push(word.clone());

        if likeness == word.chars().count() {
            self.status = Status::Unlocked;
            self.feed.push("EXACT MATCH!");
            self.feed.push("UNLOCKED!!");
            info!("terminal unlocked with {word}");
            return Ok(Selection::Unlocked { word });
        }

        self.tries_left = self.tries_left.saturating_sub(1);
        self.feed.push("ENTRY DENIED");
        self.feed.push(format!("LIKENESS={likeness}"));
        if self.tries_left == 0 {
            self.status = Status::LockedOut;
            self.feed.push("INIT LOCKOUT");
            info!("terminal locked out after guessing {word}");
            return Ok(Selection::LockedOut { word, likeness });
        }
        debug!("denied {word} (likeness {likeness}), {} tries left", self.tries_left);
        Ok(Selection::Denied { word, likeness, tries_left: self.tries_left })
    }

    fn draw_action<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Action {
        let drawn = random::pick(&self.config.actions, rng).copied().unwrap_or(Action::RemoveDud);
        // never two resets in a row
        let action = if drawn == Action::ResetTries && self.last_action == Some(Action::ResetTries) {
            Action::RemoveDud
        } else {
            drawn
        };
        self.last_action = Some(action);
        action
    }

    fn run_command<R: Rng + ?Sized>(&mut self, region: usize, text: String, rng: &mut R) -> Selection {
        self.used_regions[region] = true;
        let action = self.draw_action(rng);
        let applied = match action {
            Action::RemoveDud => self.remove_dud(rng),
            Action::ResetTries => {
                self.tries_left = self.config.max_tries;
                true
            }
        };
        debug!("command {text} ran {action:?} (applied: {applied})");

        self.feed.push(text.clone());
        if applied {
            self.feed.push(action.to_string());
        } else {
            self.feed.push("ERROR");
        }
        Selection::Command { text, action, applied }
    }

    fn remove_dud<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let candidates: Vec<usize> = self
            .round
            .tokens
            .words()
            .iter()
            .filter(|w| w.text != self.round.solution && !self.is_dud(w.ordinal))
            .map(|w| w.ordinal)
            .collect();
        let Some(&ordinal) = random::pick(&candidates, rng) else {
            return false;
        };
        let Some(word) = self.round.tokens.word(ordinal) else {
            return false;
        };

        for i in word.indices() {
            self.display[i] = DUD_GLYPH;
        }
        let dots: String = std::iter::repeat_n(DUD_GLYPH, word.len).collect();
        self.feed.replace(&word.text, &dots);
        debug!("removed dud {}", word.text);
        self.duds.push(ordinal);
        true
    }

    /// The terminal as plain text: the address-prefixed grid, then tries, feed and cursor line.
    #[must_use]
    pub fn render(&self) -> String {
        let grid = self.config.grid;
        let text = self.display_text();
        let rows = chunk_rows(&text, grid.chars_per_row);

        let mut lines: Vec<String> = Vec::with_capacity(grid.rows_per_column + self.feed.len() + 3);
        for r in 0..grid.rows_per_column {
            let cells: Vec<String> = (0..grid.columns)
                .map(|c| c * grid.rows_per_column + r)
                .filter_map(|row| rows.get(row))
                .map(|row| format!("{} {}", grid.row_address(self.round.base_address, row.index), row.text))
                .collect();
            lines.push(cells.join("  "));
        }

        lines.push(String::new());
        lines.push(format!("ATTEMPTS LEFT: {}", "■ ".repeat(self.tries_left as usize).trim_end()));
        lines.extend(self.feed.lines().map(|l| format!(">{l}")));
        if !self.is_finished() {
            lines.push(format!(">{}", self.cursor_text(self.cursor)));
        }
        lines.join("\n")
    }
}

impl Selection {
    /// Whether the selection changed the terminal.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Selection::Ignored)
    }
}
