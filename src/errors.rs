//! Validation errors for terminal inputs, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each variant has a unique code (E001-E011) for documentation lookup:
//!
//! - E001: `EmptyWordList` (No candidate words)
//! - E002: `UnequalWordLengths` (Words of different lengths)
//! - E003: `InvalidWordChar` (Non-letter character in a word)
//! - E004: `MissingWordMarker` (Palette has no word marker)
//! - E005: `NoFillSymbols` (Palette has only word markers)
//! - E006: `LetterInPalette` (Palette glyph is a letter)
//! - E007: `InvalidGridShape` (Grid dimension out of range)
//! - E008: `DuplicateBracketGlyph` (Glyph claimed by two bracket channels)
//! - E009: `AlphabeticBracketGlyph` (Bracket glyph is a letter)
//! - E010: `InvalidGridSpec` (Unparseable grid string)
//! - E011: `EmptyActionPalette` (No bracket command actions)
//!
//! # Examples
//!
//! ```
//! use hackterm::errors::ConfigError;
//! use hackterm::word_list::WordList;
//!
//! match WordList::new(["frost", "ghosts"]) {
//!     Err(e) => {
//!         assert_eq!(e.code(), "E002");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! # let _ = ConfigError::EmptyWordList;
//! ```

use std::io;

/// Error raised while validating words, palettes, grids or bracket channels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Word list is empty")]
    EmptyWordList,

    #[error("Word \"{word}\" has length {found}, expected {expected} (like \"{first}\")")]
    UnequalWordLengths {
        first: String,
        expected: usize,
        word: String,
        found: usize,
    },

    #[error("Word \"{word}\" contains invalid character '{invalid_char}' (only A-Z allowed)")]
    InvalidWordChar { word: String, invalid_char: char },

    #[error("Palette \"{palette}\" has no word marker")]
    MissingWordMarker { palette: String },

    #[error("Palette \"{palette}\" has no fill symbols")]
    NoFillSymbols { palette: String },

    #[error("Palette glyph '{glyph}' is a letter")]
    LetterInPalette { glyph: char },

    #[error("Invalid grid shape: {columns}x{rows_per_column}x{chars_per_row}")]
    InvalidGridShape {
        columns: usize,
        rows_per_column: usize,
        chars_per_row: usize,
    },

    #[error("Bracket glyph '{glyph}' is claimed by more than one channel")]
    DuplicateBracketGlyph { glyph: char },

    #[error("Bracket glyph '{glyph}' is a letter")]
    AlphabeticBracketGlyph { glyph: char },

    #[error("Invalid grid spec: \"{input}\"")]
    InvalidGridSpec { input: String },

    #[error("Action palette is empty")]
    EmptyActionPalette,
}

impl From<ConfigError> for io::Error {
    fn from(ce: ConfigError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, ce.to_string())
    }
}

impl ConfigError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::EmptyWordList => "E001",
            ConfigError::UnequalWordLengths { .. } => "E002",
            ConfigError::InvalidWordChar { .. } => "E003",
            ConfigError::MissingWordMarker { .. } => "E004",
            ConfigError::NoFillSymbols { .. } => "E005",
            ConfigError::LetterInPalette { .. } => "E006",
            ConfigError::InvalidGridShape { .. } => "E007",
            ConfigError::DuplicateBracketGlyph { .. } => "E008",
            ConfigError::AlphabeticBracketGlyph { .. } => "E009",
            ConfigError::InvalidGridSpec { .. } => "E010",
            ConfigError::EmptyActionPalette => "E011",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ConfigError::EmptyWordList => "No candidate words",
            ConfigError::UnequalWordLengths { .. } => "Words of different lengths",
            ConfigError::InvalidWordChar { .. } => "Non-letter character in a word",
            ConfigError::MissingWordMarker { .. } => "Palette has no word marker",
            ConfigError::NoFillSymbols { .. } => "Palette has only word markers",
            ConfigError::LetterInPalette { .. } => "Palette glyph is a letter",
            ConfigError::InvalidGridShape { .. } => "Grid dimension out of range",
            ConfigError::DuplicateBracketGlyph { .. } => "Glyph claimed by two bracket channels",
            ConfigError::AlphabeticBracketGlyph { .. } => "Bracket glyph is a letter",
            ConfigError::InvalidGridSpec { .. } => "Unparseable grid string",
            ConfigError::EmptyActionPalette => "No bracket command actions",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ConfigError::EmptyWordList => "At least one candidate word is needed to hide a solution in the terminal.",
            ConfigError::UnequalWordLengths { .. } => "Every word in one list must have the same length, so likeness scores and word spacing are well defined.",
            ConfigError::InvalidWordChar { .. } => "Words are found again in the generated text by their letters; any other character would split or hide the word.",
            ConfigError::MissingWordMarker { .. } => "The palette needs at least one word-marker entry (`w` in text form), otherwise no word can ever be placed.",
            ConfigError::NoFillSymbols { .. } => "The palette needs at least one non-marker glyph to fill the gaps between words.",
            ConfigError::LetterInPalette { .. } => "Noise glyphs must not be letters, or they would be read back as part of a word.",
            ConfigError::InvalidGridShape { .. } => "Columns, rows per column and characters per row must all be at least 1, and their product at most 1048576.",
            ConfigError::DuplicateBracketGlyph { .. } => "Each opener or closer glyph may belong to a single bracket channel.",
            ConfigError::AlphabeticBracketGlyph { .. } => "Bracket glyphs must be noise characters; letters always belong to words.",
            ConfigError::InvalidGridSpec { .. } => "A grid is written as COLUMNSxROWSxCHARS, e.g. `2x16x12`.",
            ConfigError::EmptyActionPalette => "Every bracket command draws its effect from the action palette, so it needs at least one entry.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ConfigError::EmptyWordList => Some("Provide one word per line, e.g. 'frost', 'ghost', 'froze'"),
            ConfigError::UnequalWordLengths { .. } => Some("Remove the words whose length differs from the first word"),
            ConfigError::InvalidWordChar { .. } => Some("Only the letters a-z (either case) are allowed in words"),
            ConfigError::MissingWordMarker { .. } => Some("Add one or more 'w' entries to the palette, e.g. '.:;<>ww'"),
            ConfigError::NoFillSymbols { .. } => Some("Add noise glyphs next to the markers, e.g. '.:;<>ww'"),
            ConfigError::LetterInPalette { .. } => Some("Use punctuation or digits for noise glyphs"),
            ConfigError::InvalidGridShape { .. } => Some("Example: 2 columns of 16 rows with 12 characters each"),
            ConfigError::InvalidGridSpec { .. } => Some("Expected format: CxRxW with positive integers (e.g., '2x16x12')"),
            _ => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<ConfigError> {
        vec![
            ConfigError::EmptyWordList,
            ConfigError::UnequalWordLengths {
                first: "FROST".to_string(),
                expected: 5,
                word: "GHOSTS".to_string(),
                found: 6,
            },
            ConfigError::InvalidWordChar { word: "FR0ST".to_string(), invalid_char: '0' },
            ConfigError::MissingWordMarker { palette: ".:".to_string() },
            ConfigError::NoFillSymbols { palette: "ww".to_string() },
            ConfigError::LetterInPalette { glyph: 'x' },
            ConfigError::InvalidGridShape { columns: 0, rows_per_column: 16, chars_per_row: 12 },
            ConfigError::DuplicateBracketGlyph { glyph: '<' },
            ConfigError::AlphabeticBracketGlyph { glyph: 'q' },
            ConfigError::InvalidGridSpec { input: "2by16".to_string() },
            ConfigError::EmptyActionPalette,
        ]
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = ConfigError::EmptyWordList;
        assert_eq!(err.code(), "E001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("E001"));
        assert!(detailed.contains("one word per line"));
    }

    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in all_variants() {
            assert!(codes.insert(err.code()), "Duplicate error code found: {}", err.code());
        }
        assert_eq!(codes.len(), 11);
    }

    #[test]
    fn test_error_code_format() {
        for err in all_variants() {
            let code = err.code();
            assert_eq!(code.len(), 4, "Error code '{}' should be 4 characters (E0XX)", code);
            assert!(code.starts_with("E0"), "Error code '{}' should start with 'E0'", code);
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{}' should end with a number", code);
        }
    }

    #[test]
    fn test_unequal_lengths_message_is_actionable() {
        let err = ConfigError::UnequalWordLengths {
            first: "FROST".to_string(),
            expected: 5,
            word: "GHOSTS".to_string(),
            found: 6,
        };
        let detailed = err.display_detailed();
        assert!(detailed.contains("GHOSTS"));
        assert!(detailed.contains('5') && detailed.contains('6'));
        assert!(detailed.contains("E002"));
    }

    #[test]
    fn test_display_detailed_without_help() {
        let err = ConfigError::DuplicateBracketGlyph { glyph: '<' };
        assert!(err.help().is_none());
        assert_eq!(err.display_detailed(), format!("{} (E008)", err));
    }

    #[test]
    fn test_descriptions_differ_from_details() {
        for err in all_variants() {
            assert_ne!(err.description(), err.details());
            assert!(err.details().len() > 10);
        }
    }

    #[test]
    fn test_into_io_error() {
        let io_err: io::Error = ConfigError::EmptyWordList.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
        assert!(io_err.to_string().contains("empty"));
    }
}
