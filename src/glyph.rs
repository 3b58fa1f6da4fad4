//! Character classes and the default terminal data set.

/// Text form of the word marker inside a palette string.
pub const MARKER_CHAR: char = 'w';

/// Default candidate words (all length 5).
pub const DEFAULT_WORDS: &[&str] = &[
    "frost", "ghost", "froze", "glaze", "plaza", "prose", "floss", "piece", "mists", "maize",
    "mango", "tango", "trash", "teach", "lease", "leach", "tease", "abode", "blows", "brats",
    "blaze", "broom", "heist", "halos", "plots", "tarot", "rooms", "terms", "biome", "vault",
];

/// Default palette in text form. Each `w` is one word-marker entry; two of them
/// give the original word density.
pub const DEFAULT_PALETTE: &str = "[{(<*_/\\'`.$=+@|;:^?#-!\">)}]ww";

/// Default bracket channels, as `(opener, closer)` pairs.
pub const DEFAULT_CHANNELS: [(char, char); 4] = [('<', '>'), ('{', '}'), ('[', ']'), ('(', ')')];

/// Glyph a removed dud is drawn with.
pub const DUD_GLYPH: char = '.';

pub(crate) trait TerminalGlyph {
    /// Letters form words; everything else is noise.
    fn is_word_char(&self) -> bool;
    /// Letters of any script, which would be mistaken for word text.
    fn is_letter_like(&self) -> bool;
}

impl TerminalGlyph for char {
    fn is_word_char(&self) -> bool {
        self.is_ascii_alphabetic()
    }
    fn is_letter_like(&self) -> bool {
        self.is_alphabetic()
    }
}
