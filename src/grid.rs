//! Grid geometry: the row chunker, grid shape parsing, cursor moves and row addresses.
//!
//! The message is one flat string. The grid lays it out as `columns` side-by-side
//! columns of `rows_per_column` rows, each `chars_per_row` wide; rows are
//! numbered through the first column, then the second, and so on.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use crate::errors::ConfigError;

/// Largest base-address multiplier; addresses start at `rand(0..170) * total_length`.
const MAX_ADDRESS_SLOT: usize = 170;

/// One fixed-width slice of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Row<'a> {
    pub index: usize,
    /// Linear index of the row's first char.
    pub start: usize,
    pub text: &'a str,
}

impl Row<'_> {
    /// Number of chars in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split `text` into consecutive rows of `chars_per_row` chars.
///
/// Only the final row may be shorter. A width of zero yields no rows.
#[must_use]
pub fn chunk_rows(text: &str, chars_per_row: usize) -> Vec<Row<'_>> {
    if chars_per_row == 0 {
        return Vec::new();
    }

    let mut rows = Vec::new();
    let mut row_start_byte = 0;
    let mut row_start = 0;
    for (i, (byte, _)) in text.char_indices().enumerate() {
        if i > row_start && (i - row_start) == chars_per_row {
            rows.push(Row { index: rows.len(), start: row_start, text: &text[row_start_byte..byte] });
            row_start_byte = byte;
            row_start = i;
        }
    }
    if row_start_byte < text.len() {
        rows.push(Row { index: rows.len(), start: row_start, text: &text[row_start_byte..] });
    }
    rows
}

/// Arrow-key direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Grid dimensions. `total_length()` is the message length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridShape {
    pub columns: usize,
    pub rows_per_column: usize,
    pub chars_per_row: usize,
}

/// Largest message a grid may describe.
pub const MAX_TOTAL_LENGTH: usize = 1 << 20;

impl Default for GridShape {
    fn default() -> Self {
        GridShape { columns: 2, rows_per_column: 16, chars_per_row: 12 }
    }
}

impl GridShape {
    /// # Errors
    ///
    /// `InvalidGridShape` when any dimension is zero or the message would
    /// exceed [`MAX_TOTAL_LENGTH`].
    pub fn new(columns: usize, rows_per_column: usize, chars_per_row: usize) -> Result<GridShape, Box<ConfigError>> {
        let shape = GridShape { columns, rows_per_column, chars_per_row };
        shape.validate()?;
        Ok(shape)
    }

    /// # Errors
    ///
    /// `InvalidGridShape` when any dimension is zero or the message would
    /// exceed [`MAX_TOTAL_LENGTH`].
    pub fn validate(&self) -> Result<(), Box<ConfigError>> {
        let total = self
            .columns
            .checked_mul(self.rows_per_column)
            .and_then(|rows| rows.checked_mul(self.chars_per_row))
            .unwrap_or(usize::MAX);
        if total == 0 || total > MAX_TOTAL_LENGTH {
            return Err(Box::new(ConfigError::InvalidGridShape {
                columns: self.columns,
                rows_per_column: self.rows_per_column,
                chars_per_row: self.chars_per_row,
            }));
        }
        Ok(())
    }

    /// Message length `T = columns × rows_per_column × chars_per_row`.
    ///
    /// Exact for a validated shape; saturates otherwise.
    #[must_use]
    pub fn total_length(&self) -> usize {
        self.total_rows().saturating_mul(self.chars_per_row)
    }

    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.columns.saturating_mul(self.rows_per_column)
    }

    #[must_use]
    pub fn row_of(&self, index: usize) -> usize {
        index / self.chars_per_row
    }

    #[must_use]
    pub fn column_of(&self, index: usize) -> usize {
        self.row_of(index) / self.rows_per_column
    }

    /// New cursor position after one move, or `None` at a grid edge.
    ///
    /// Left/right stay inside the current row. Up/down move one row and may
    /// cross from the bottom of one column to the top of the next.
    #[must_use]
    pub fn move_cursor(&self, index: usize, direction: Direction) -> Option<usize> {
        let cpr = self.chars_per_row;
        let total = self.total_length();
        if index >= total {
            return None;
        }
        match direction {
            Direction::Left if index % cpr > 0 => Some(index - 1),
            Direction::Right if index % cpr < cpr - 1 && index + 1 < total => Some(index + 1),
            Direction::Up if index >= cpr => Some(index - cpr),
            Direction::Down if index + cpr < total => Some(index + cpr),
            _ => None,
        }
    }

    /// Display address of a row, `base + row * chars_per_row`.
    #[must_use]
    pub fn row_address(&self, base: usize, row: usize) -> String {
        format!("0x{:04X}", base + row * self.chars_per_row)
    }

    /// A random base address, a multiple of the message length.
    pub fn random_base_address<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..MAX_ADDRESS_SLOT) * self.total_length()
    }
}

impl FromStr for GridShape {
    type Err = Box<ConfigError>;

    /// Parse `COLUMNSxROWSxCHARS`, e.g. `2x16x12`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Box::new(ConfigError::InvalidGridSpec { input: s.to_string() });
        let dims = s
            .trim()
            .split(['x', 'X'])
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        match dims.as_slice() {
            &[columns, rows_per_column, chars_per_row] => GridShape::new(columns, rows_per_column, chars_per_row),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.columns, self.rows_per_column, self.chars_per_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_chunk_even() {
        let rows = chunk_rows("ABCDEFGHIJKL", 4);
        let texts: Vec<&str> = rows.iter().map(|r| r.text).collect();
        assert_eq!(texts, ["ABCD", "EFGH", "IJKL"]);
        assert_eq!(rows.iter().map(|r| r.start).collect::<Vec<_>>(), [0, 4, 8]);
        assert_eq!(rows.iter().map(|r| r.index).collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn test_chunk_short_tail() {
        let rows = chunk_rows("ABCDEFGHIJ", 4);
        let texts: Vec<&str> = rows.iter().map(|r| r.text).collect();
        assert_eq!(texts, ["ABCD", "EFGH", "IJ"]);
        assert_eq!(rows[2].len(), 2);
    }

    #[test]
    fn test_chunk_rejoins() {
        let text = "<.>FROST{}[]()#$%^&*GHOST..";
        for width in 1..=text.len() + 1 {
            let joined: String = chunk_rows(text, width).iter().map(|r| r.text).collect();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn test_chunk_multibyte_glyphs() {
        let rows = chunk_rows("··AB··", 2);
        let texts: Vec<&str> = rows.iter().map(|r| r.text).collect();
        assert_eq!(texts, ["··", "AB", "··"]);
        assert_eq!(rows[2].start, 4);
    }

    #[test]
    fn test_chunk_degenerate() {
        assert!(chunk_rows("", 4).is_empty());
        assert!(chunk_rows("ABC", 0).is_empty());
        assert_eq!(chunk_rows("ABC", 10).len(), 1);
    }

    #[test]
    fn test_default_shape() {
        let shape = GridShape::default();
        assert_eq!(shape.total_length(), 384);
        assert_eq!(shape.total_rows(), 32);
        assert_eq!(shape.to_string(), "2x16x12");
    }

    #[test]
    fn test_parse_shape() {
        assert_eq!("2x16x12".parse::<GridShape>().unwrap(), GridShape::default());
        assert_eq!(" 1 X 2 x 3 ".parse::<GridShape>().unwrap(), GridShape { columns: 1, rows_per_column: 2, chars_per_row: 3 });
        assert_eq!("2x16".parse::<GridShape>().unwrap_err().code(), "E010");
        assert_eq!("2xax12".parse::<GridShape>().unwrap_err().code(), "E010");
        assert_eq!("0x16x12".parse::<GridShape>().unwrap_err().code(), "E007");
    }

    #[test]
    fn test_oversized_shape_rejected() {
        let err = "5000000x5000000x5000000".parse::<GridShape>().unwrap_err();
        assert_eq!(err.code(), "E007");
        assert_eq!(GridShape::new(1, 1024, 1025).unwrap_err().code(), "E007");
        assert_eq!(GridShape::new(1, 1024, 1024).unwrap().total_length(), MAX_TOTAL_LENGTH);

        // an unvalidated shape saturates instead of overflowing
        let huge = GridShape { columns: usize::MAX, rows_per_column: 2, chars_per_row: 2 };
        assert!(huge.validate().is_err());
        assert_eq!(huge.total_length(), usize::MAX);
    }

    #[test]
    fn test_rows_and_columns() {
        let shape = GridShape::default();
        assert_eq!(shape.row_of(0), 0);
        assert_eq!(shape.row_of(11), 0);
        assert_eq!(shape.row_of(12), 1);
        assert_eq!(shape.column_of(191), 0);
        assert_eq!(shape.column_of(192), 1);
    }

    #[test]
    fn test_move_cursor_edges() {
        let shape = GridShape::default();
        assert_eq!(shape.move_cursor(0, Direction::Left), None);
        assert_eq!(shape.move_cursor(0, Direction::Up), None);
        assert_eq!(shape.move_cursor(0, Direction::Right), Some(1));
        assert_eq!(shape.move_cursor(0, Direction::Down), Some(12));
        assert_eq!(shape.move_cursor(11, Direction::Right), None);
        assert_eq!(shape.move_cursor(12, Direction::Left), None);
        assert_eq!(shape.move_cursor(383, Direction::Down), None);
        assert_eq!(shape.move_cursor(383, Direction::Up), Some(371));
        assert_eq!(shape.move_cursor(400, Direction::Left), None);
    }

    #[test]
    fn test_move_down_crosses_into_next_column() {
        let shape = GridShape::default();
        // last row of column 0 continues at the first row of column 1
        assert_eq!(shape.move_cursor(180, Direction::Down), Some(192));
        assert_eq!(shape.column_of(192), 1);
    }

    #[test]
    fn test_row_address() {
        let shape = GridShape::default();
        assert_eq!(shape.row_address(0xF000, 0), "0xF000");
        assert_eq!(shape.row_address(0xF000, 2), "0xF018");
        assert_eq!(shape.row_address(0, 1), "0x000C");
    }

    #[test]
    fn test_random_base_address_is_multiple_of_length() {
        let shape = GridShape::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let base = shape.random_base_address(&mut rng);
            assert_eq!(base % shape.total_length(), 0);
            assert!(base < MAX_ADDRESS_SLOT * shape.total_length());
        }
    }
}
