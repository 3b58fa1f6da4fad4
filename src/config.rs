//! Terminal configuration: every tunable of one puzzle in a single validated value.

use std::fmt;

use serde::Serialize;

use crate::errors::ConfigError;
use crate::grid::GridShape;
use crate::palette::Palette;
use crate::tokenizer::{BracketChannels, TokenizerOptions};

/// Default minimum number of glyphs strictly exceeded between two words.
pub const DEFAULT_MIN_GAP: usize = 3;
/// Default number of wrong guesses before lockout.
pub const DEFAULT_MAX_TRIES: u32 = 4;

/// What an activated bracket region does when selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Turn one wrong candidate into dots.
    RemoveDud,
    /// Restore the full number of tries.
    ResetTries,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::RemoveDud => write!(f, "DUD REMOVED"),
            Action::ResetTries => write!(f, "TRIES RESET"),
        }
    }
}

/// Default action palette: seven dud removals for every three resets.
#[must_use]
pub fn default_actions() -> Vec<Action> {
    let mut actions = vec![Action::RemoveDud; 7];
    actions.extend([Action::ResetTries; 3]);
    actions
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    pub grid: GridShape,
    pub min_gap: usize,
    pub max_tries: u32,
    pub palette: Palette,
    pub channels: BracketChannels,
    pub tokenizer: TokenizerOptions,
    /// Drawn uniformly; repeat an entry to make it more likely.
    pub actions: Vec<Action>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig {
            grid: GridShape::default(),
            min_gap: DEFAULT_MIN_GAP,
            max_tries: DEFAULT_MAX_TRIES,
            palette: Palette::default(),
            channels: BracketChannels::default(),
            tokenizer: TokenizerOptions::default(),
            actions: default_actions(),
        }
    }
}

impl TerminalConfig {
    /// Check what the component constructors cannot: the fields that are plain values.
    ///
    /// # Errors
    ///
    /// `InvalidGridShape` for an out-of-range grid, `EmptyActionPalette` when
    /// there are no actions to draw.
    pub fn validate(&self) -> Result<(), Box<ConfigError>> {
        self.grid.validate()?;
        if self.actions.is_empty() {
            return Err(Box::new(ConfigError::EmptyActionPalette));
        }
        Ok(())
    }

    /// Message length the grid holds.
    #[must_use]
    pub fn total_length(&self) -> usize {
        self.grid.total_length()
    }

    /// Lines the feed can show next to the grid.
    #[must_use]
    pub fn feed_capacity(&self) -> usize {
        self.grid.rows_per_column.saturating_sub(2).max(1)
    }
}
