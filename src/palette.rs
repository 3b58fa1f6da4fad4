//! The symbol palette: noise glyphs plus the reserved word marker.
//!
//! A palette is an ordered list of [`Symbol`]s. Draws are uniform over the
//! entries, so repeating the marker raises word density.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::errors::ConfigError;
use crate::glyph::{DEFAULT_PALETTE, MARKER_CHAR, TerminalGlyph};
use crate::random;

/// One palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A noise character that is written to the message as-is.
    Glyph(char),
    /// "Place the next word here". Never rendered.
    WordMarker,
}

impl Symbol {
    #[must_use]
    pub fn is_word_marker(&self) -> bool {
        matches!(self, Symbol::WordMarker)
    }
}

/// Validated palette: at least one marker, at least one glyph, no letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    symbols: Vec<Symbol>,
}

impl Palette {
    /// Build a palette from explicit symbols.
    ///
    /// # Errors
    ///
    /// `MissingWordMarker`, `NoFillSymbols` or `LetterInPalette` when the
    /// symbols cannot drive a generation run.
    pub fn new(symbols: Vec<Symbol>) -> Result<Palette, Box<ConfigError>> {
        let palette = Palette { symbols };
        if !palette.symbols.iter().any(Symbol::is_word_marker) {
            return Err(Box::new(ConfigError::MissingWordMarker { palette: palette.to_string() }));
        }
        if palette.symbols.iter().all(Symbol::is_word_marker) {
            return Err(Box::new(ConfigError::NoFillSymbols { palette: palette.to_string() }));
        }
        if let Some(glyph) = palette.glyphs().find(|c| c.is_letter_like()) {
            return Err(Box::new(ConfigError::LetterInPalette { glyph }));
        }
        Ok(palette)
    }

    /// Parse the text form, where every `marker` char is a word marker.
    ///
    /// # Errors
    ///
    /// Same as [`Palette::new`].
    pub fn from_text(text: &str, marker: char) -> Result<Palette, Box<ConfigError>> {
        let symbols = text
            .chars()
            .map(|c| if c == marker { Symbol::WordMarker } else { Symbol::Glyph(c) })
            .collect();
        Palette::new(symbols)
    }

    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Noise glyphs in palette order (with repetition).
    pub fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().filter_map(|s| match s {
            Symbol::Glyph(c) => Some(*c),
            Symbol::WordMarker => None,
        })
    }

    /// Share of entries that are word markers.
    #[must_use]
    pub fn word_density(&self) -> f64 {
        let markers = self.symbols.iter().filter(|s| s.is_word_marker()).count();
        markers as f64 / self.symbols.len() as f64
    }

    /// Draw any entry, or only noise glyphs when `skip_words` is set.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, skip_words: bool) -> Symbol {
        let picked = random::pick_excluding(&self.symbols, rng, |s| skip_words && s.is_word_marker());
        // construction guarantees at least one glyph, so a filtered draw cannot be empty
        picked.copied().unwrap_or(Symbol::WordMarker)
    }

    /// Draw a noise glyph.
    pub fn draw_glyph<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        match self.draw(rng, true) {
            Symbol::Glyph(c) => c,
            Symbol::WordMarker => '.',
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let symbols = DEFAULT_PALETTE
            .chars()
            .map(|c| if c == MARKER_CHAR { Symbol::WordMarker } else { Symbol::Glyph(c) })
            .collect();
        Palette { symbols }
    }
}

impl FromStr for Palette {
    type Err = Box<ConfigError>;

    /// Text form with `w` as the marker.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::from_text(s, MARKER_CHAR)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self
            .symbols
            .iter()
            .map(|s| match s {
                Symbol::Glyph(c) => *c,
                Symbol::WordMarker => MARKER_CHAR,
            })
            .collect();
        write!(f, "{s}")
    }
}
