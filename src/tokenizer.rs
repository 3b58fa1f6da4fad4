//! The span tokenizer: classify every char of the chunked message and track bracket regions.
//!
//! Each char becomes one [`Span`]. Letters are word chars; a maximal run of them is
//! one word occurrence. Every other char is a symbol, and symbols that belong to one
//! of the four [`BracketChannels`] can open or close a region:
//!
//! - an opener is recorded on its channel's stack but stays inactive;
//! - a closer on a channel with recorded openers activates all of them, together
//!   with itself, as one region with a fresh ordinal, then clears the stack;
//! - every channel's stack is cleared at the start of a row, so regions never
//!   cross a row break;
//! - by default a word char abandons every open stack, since words and bracket
//!   commands never overlap.
//!
//! Words, unlike regions, may continue across a row break: the generator is not
//! row-aware and a word that wraps is still one word.
//!
//! Spans are immutable once returned. The [`Tokenized`] result also carries a word
//! index and a region index, so a consumer can find "every span of this word" or
//! "every span of this region" without scanning.
//!
//! ```
//! use hackterm::grid::chunk_rows;
//! use hackterm::tokenizer::{tokenize, BracketChannels, BracketRole, TokenizerOptions};
//!
//! let rows = chunk_rows("<..>FROST.", 5);
//! let placed = vec!["FROST".to_string()];
//! let tokens = tokenize(&rows, &BracketChannels::default(), &placed, TokenizerOptions::default());
//!
//! assert_eq!(tokens.spans().len(), 10);
//! assert_eq!(tokens.spans()[0].role, BracketRole::Opens);
//! assert!(tokens.spans()[0].region_active);
//! assert_eq!(tokens.words()[0].text, "FROST");
//! ```

use log::{debug, warn};
use serde::Serialize;

use crate::errors::ConfigError;
use crate::glyph::{DEFAULT_CHANNELS, TerminalGlyph};
use crate::grid::Row;

/// Number of independently tracked bracket channels.
pub const NUM_CHANNELS: usize = 4;

/// One opener/closer glyph pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketChannel {
    pub opener: char,
    pub closer: char,
}

/// The four bracket channels, validated so no glyph is claimed twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketChannels {
    channels: [BracketChannel; NUM_CHANNELS],
}

impl BracketChannels {
    /// # Errors
    ///
    /// `DuplicateBracketGlyph` when a glyph appears twice (including an opener equal
    /// to its own closer), `AlphabeticBracketGlyph` when a glyph is a letter.
    pub fn new(pairs: [(char, char); NUM_CHANNELS]) -> Result<BracketChannels, Box<ConfigError>> {
        let mut seen: Vec<char> = Vec::with_capacity(NUM_CHANNELS * 2);
        for glyph in pairs.iter().flat_map(|&(o, c)| [o, c]) {
            if glyph.is_letter_like() {
                return Err(Box::new(ConfigError::AlphabeticBracketGlyph { glyph }));
            }
            if seen.contains(&glyph) {
                return Err(Box::new(ConfigError::DuplicateBracketGlyph { glyph }));
            }
            seen.push(glyph);
        }
        Ok(BracketChannels { channels: pairs.map(|(opener, closer)| BracketChannel { opener, closer }) })
    }

    #[must_use]
    pub fn get(&self, channel: usize) -> Option<&BracketChannel> {
        self.channels.get(channel)
    }

    #[must_use]
    pub fn channel_opened_by(&self, glyph: char) -> Option<usize> {
        self.channels.iter().position(|ch| ch.opener == glyph)
    }

    #[must_use]
    pub fn channel_closed_by(&self, glyph: char) -> Option<usize> {
        self.channels.iter().position(|ch| ch.closer == glyph)
    }
}

impl Default for BracketChannels {
    fn default() -> Self {
        BracketChannels { channels: DEFAULT_CHANNELS.map(|(opener, closer)| BracketChannel { opener, closer }) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpanKind {
    Symbol,
    WordChar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BracketRole {
    None,
    Opens,
    Closes,
}

/// Classification of one message char.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    /// Linear, 0-based position in the message.
    pub index: usize,
    pub glyph: char,
    pub kind: SpanKind,
    /// Which word this char belongs to (word chars only).
    pub word_ordinal: Option<usize>,
    /// Channel of a bracket endpoint (`role != None` only).
    pub channel: Option<usize>,
    pub role: BracketRole,
    /// Set once a closer has matched this endpoint.
    pub region_active: bool,
    pub region_ordinal: Option<usize>,
}

impl Span {
    fn new(index: usize, glyph: char) -> Span {
        let kind = if glyph.is_word_char() { SpanKind::WordChar } else { SpanKind::Symbol };
        Span {
            index,
            glyph,
            kind,
            word_ordinal: None,
            channel: None,
            role: BracketRole::None,
            region_active: false,
            region_ordinal: None,
        }
    }
}

/// One word found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordOccurrence {
    pub ordinal: usize,
    /// The placed word with this ordinal, or the raw letters if there is none.
    pub text: String,
    pub start: usize,
    pub len: usize,
}

impl WordOccurrence {
    /// Span indices covered by the word.
    #[must_use]
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

/// One activated bracket region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub ordinal: usize,
    pub channel: usize,
    /// Every opener the closer activated, ascending.
    pub openers: Vec<usize>,
    pub closer: usize,
    /// The highlight group, per [`RegionExtent`], ascending.
    pub members: Vec<usize>,
}

/// Which spans make up a region's highlight group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionExtent {
    /// The first opener, the closer and everything between them.
    #[default]
    Whole,
    /// Only the activated openers and the closer.
    Endpoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// A word char abandons every open bracket.
    pub words_break_regions: bool,
    pub extent: RegionExtent,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions { words_break_regions: true, extent: RegionExtent::Whole }
    }
}

/// Spans plus word and region indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tokenized {
    spans: Vec<Span>,
    words: Vec<WordOccurrence>,
    regions: Vec<Region>,
    #[serde(skip)]
    membership: Vec<Vec<usize>>,
}

impl Tokenized {
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    #[must_use]
    pub fn words(&self) -> &[WordOccurrence] {
        &self.words
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn word(&self, ordinal: usize) -> Option<&WordOccurrence> {
        self.words.get(ordinal)
    }

    #[must_use]
    pub fn region(&self, ordinal: usize) -> Option<&Region> {
        self.regions.get(ordinal)
    }

    /// The word a span belongs to.
    #[must_use]
    pub fn word_at(&self, index: usize) -> Option<&WordOccurrence> {
        self.spans.get(index)?.word_ordinal.and_then(|o| self.word(o))
    }

    /// The region a bracket endpoint activated.
    #[must_use]
    pub fn region_at(&self, index: usize) -> Option<&Region> {
        self.spans.get(index)?.region_ordinal.and_then(|o| self.region(o))
    }

    /// Every region whose highlight group contains `index`.
    pub fn regions_containing(&self, index: usize) -> impl Iterator<Item = &Region> + '_ {
        self.membership
            .get(index)
            .into_iter()
            .flatten()
            .filter_map(|&o| self.regions.get(o))
    }

    /// Text of the command started at an active endpoint: from that opener (or, for
    /// the closer, from the region's first opener) through the closer.
    #[must_use]
    pub fn command_text(&self, index: usize) -> Option<String> {
        let region = self.region_at(index)?;
        let from = if self.spans[index].role == BracketRole::Opens { index } else { region.openers[0] };
        Some(self.spans[from..=region.closer].iter().map(|s| s.glyph).collect())
    }

    /// The full text again.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.glyph).collect()
    }
}

/// Running state of one tokenizer pass.
struct Scan<'a> {
    channels: &'a BracketChannels,
    placed_words: &'a [String],
    options: TokenizerOptions,
    spans: Vec<Span>,
    words: Vec<WordOccurrence>,
    regions: Vec<Region>,
    open: [Vec<usize>; NUM_CHANNELS],
    // the word currently being read: (start, raw letters)
    current_word: Option<(usize, String)>,
}

impl Scan<'_> {
    fn clear_open(&mut self) {
        for stack in &mut self.open {
            stack.clear();
        }
    }

    fn close_word(&mut self) {
        let Some((start, raw)) = self.current_word.take() else {
            return;
        };
        let ordinal = self.words.len();
        let text = match self.placed_words.get(ordinal) {
            Some(placed) => {
                if !placed.eq_ignore_ascii_case(&raw) {
                    warn!("word {ordinal} reads \"{raw}\" but was placed as \"{placed}\"");
                }
                placed.clone()
            }
            None => raw.to_ascii_uppercase(),
        };
        let len = raw.chars().count();
        self.words.push(WordOccurrence { ordinal, text, start, len });
    }

    fn word_char(&mut self, span: &mut Span) {
        if self.options.words_break_regions {
            self.clear_open();
        }
        let ordinal = self.words.len();
        self.current_word.get_or_insert_with(|| (span.index, String::new())).1.push(span.glyph);
        span.word_ordinal = Some(ordinal);
    }

    fn symbol(&mut self, span: &mut Span) {
        self.close_word();

        if let Some(channel) = self.channels.channel_opened_by(span.glyph) {
            self.open[channel].push(span.index);
            span.channel = Some(channel);
            span.role = BracketRole::Opens;
        } else if let Some(channel) = self.channels.channel_closed_by(span.glyph)
            && !self.open[channel].is_empty()
        {
            let ordinal = self.regions.len();
            let openers = std::mem::take(&mut self.open[channel]);
            for &o in &openers {
                let opener = &mut self.spans[o];
                opener.region_active = true;
                opener.region_ordinal = Some(ordinal);
            }
            span.channel = Some(channel);
            span.role = BracketRole::Closes;
            span.region_active = true;
            span.region_ordinal = Some(ordinal);

            let members = match self.options.extent {
                RegionExtent::Whole => (openers[0]..=span.index).collect(),
                RegionExtent::Endpoints => openers.iter().copied().chain([span.index]).collect(),
            };
            self.regions.push(Region { ordinal, channel, openers, closer: span.index, members });
        }
    }
}

/// Classify every char of `rows` into spans.
///
/// `placed_words` supplies the text of each word occurrence by ordinal, so a
/// consumer gets the generator's ground truth rather than re-reading letters.
#[must_use]
pub fn tokenize(
    rows: &[Row<'_>],
    channels: &BracketChannels,
    placed_words: &[String],
    options: TokenizerOptions,
) -> Tokenized {
    let capacity = rows.iter().map(Row::len).sum();
    let mut scan = Scan {
        channels,
        placed_words,
        options,
        spans: Vec::with_capacity(capacity),
        words: Vec::new(),
        regions: Vec::new(),
        open: Default::default(),
        current_word: None,
    };

    for row in rows {
        // regions never cross a row break
        scan.clear_open();

        for glyph in row.text.chars() {
            let mut span = Span::new(scan.spans.len(), glyph);
            match span.kind {
                SpanKind::WordChar => scan.word_char(&mut span),
                SpanKind::Symbol => scan.symbol(&mut span),
            }
            scan.spans.push(span);
        }
    }
    scan.close_word();

    let mut membership = vec![Vec::new(); scan.spans.len()];
    for region in &scan.regions {
        for &m in &region.members {
            membership[m].push(region.ordinal);
        }
    }

    debug!(
        "tokenized {} spans into {} word(s) and {} region(s)",
        scan.spans.len(),
        scan.words.len(),
        scan.regions.len()
    );

    Tokenized { spans: scan.spans, words: scan.words, regions: scan.regions, membership }
}
