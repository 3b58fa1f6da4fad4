//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `ConfigError`, `GenerateError` and `TerminalError`
//! implementations via their `code()`, `description()`, `details()`, and
//! `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;

use hackterm::errors::ConfigError;
use hackterm::generator::GenerateError;
use hackterm::terminal::TerminalError;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($out:expr, $errors:expr) => {
        for error in $errors {
            let _ = writeln!($out, "### {}: {}\n", error.code(), error.description());
            let _ = writeln!($out, "**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                let _ = writeln!($out, "**How to fix:**");
                let _ = writeln!($out, "```");
                let _ = writeln!($out, "{help_text}");
                let _ = writeln!($out, "```\n");
            }

            let _ = writeln!($out, "**Example error message:**");
            let _ = writeln!($out, "```");
            let _ = writeln!($out, "{error}");
            let _ = writeln!($out, "```\n");

            let _ = writeln!($out, "**Detailed format:**");
            let _ = writeln!($out, "```");
            let _ = writeln!($out, "{}", error.display_detailed());
            let _ = writeln!($out, "```\n");

            let _ = writeln!($out, "---\n");
        }
    };
}

/// Helper to create all `ConfigError` variants for documentation
fn all_config_error_variants() -> Vec<ConfigError> {
    vec![
        ConfigError::EmptyWordList,
        ConfigError::UnequalWordLengths {
            first: "FROST".to_string(),
            expected: 5,
            word: "GHOSTS".to_string(),
            found: 6,
        },
        ConfigError::InvalidWordChar { word: "FR0ST".to_string(), invalid_char: '0' },
        ConfigError::MissingWordMarker { palette: ".:;<>".to_string() },
        ConfigError::NoFillSymbols { palette: "ww".to_string() },
        ConfigError::LetterInPalette { glyph: 'x' },
        ConfigError::InvalidGridShape { columns: 0, rows_per_column: 16, chars_per_row: 12 },
        ConfigError::DuplicateBracketGlyph { glyph: '<' },
        ConfigError::AlphabeticBracketGlyph { glyph: 'q' },
        ConfigError::InvalidGridSpec { input: "2by16".to_string() },
        ConfigError::EmptyActionPalette,
    ]
}

/// Helper to create all `GenerateError` variants for documentation
fn all_generate_error_variants() -> Vec<GenerateError> {
    vec![
        GenerateError::InvalidConfig(Box::new(ConfigError::InvalidGridShape {
            columns: 0,
            rows_per_column: 0,
            chars_per_row: 0,
        })),
        GenerateError::NoWordsPlaced { total_length: 4, word_len: 5 },
    ]
}

/// Helper to create all `TerminalError` variants for documentation
fn all_terminal_error_variants() -> Vec<TerminalError> {
    vec![
        TerminalError::UnequalLengthLikeness { candidate: "FROST".to_string(), solution: "GHOSTS".to_string() },
        TerminalError::IndexOutOfRange { index: 400, len: 384 },
        TerminalError::NoSolution(GenerateError::NoWordsPlaced { total_length: 4, word_len: 5 }),
        TerminalError::InvalidConfig(Box::new(ConfigError::EmptyWordList)),
    ]
}

fn render_docs() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Error Code Reference\n");
    let _ = writeln!(out, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    let _ = writeln!(out, "## Table of Contents\n");
    let _ = writeln!(out, "- [Terminal Errors (T001–T004)](#terminal-errors)");
    let _ = writeln!(out, "- [Generate Errors (G001–G002)](#generate-errors)");
    let _ = writeln!(out, "- [Config Errors (E001–E011)](#config-errors)\n");

    let _ = writeln!(out, "## Terminal Errors\n");
    let _ = writeln!(out, "Errors from building or playing a terminal. Some wrap lower-level errors.\n");
    generate_error_docs!(out, all_terminal_error_variants());

    let _ = writeln!(out, "## Generate Errors\n");
    let _ = writeln!(out, "Errors from message generation.\n");
    generate_error_docs!(out, all_generate_error_variants());

    let _ = writeln!(out, "## Config Errors\n");
    let _ = writeln!(out, "Errors from validating word lists, palettes, grids and bracket channels.\n");
    generate_error_docs!(out, all_config_error_variants());

    let _ = writeln!(out, "## Error Display Formats\n");
    let _ = writeln!(out, "### Detailed Format (via `display_detailed()`)");
    let _ = writeln!(out, "```");
    let _ = writeln!(out, "<message> (<code>)");
    let _ = writeln!(out, "<help text if available>");
    let _ = writeln!(out, "```");
    out
}

fn main() {
    print!("{}", render_docs());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_code_documented_once() {
        let docs = render_docs();
        let mut codes = HashSet::new();
        let all = all_config_error_variants()
            .iter()
            .map(|e| e.code())
            .chain(all_generate_error_variants().iter().map(|e| e.code()))
            .chain(all_terminal_error_variants().iter().map(|e| e.code()))
            .collect::<Vec<_>>();
        for code in all {
            assert!(codes.insert(code), "duplicate code {code}");
            assert!(docs.contains(&format!("### {code}: ")), "{code} missing from docs");
        }
        assert_eq!(codes.len(), 17);
    }
}
