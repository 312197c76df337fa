//! Lengths, positions and cell ranges
//!
//! All lengths are in hundredths of a millimeter (1/100 mm), the native unit
//! of the office document model.

use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};
use crate::{MAX_COLUMNS, MAX_ROWS};

/// A width/height pair in 1/100 mm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeBox {
    pub width: i32,
    pub height: i32,
}

impl SizeBox {
    /// Zero-sized box
    pub const ZERO: SizeBox = SizeBox {
        width: 0,
        height: 0,
    };

    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum of two boxes
    pub fn max(self, other: SizeBox) -> SizeBox {
        SizeBox {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// True when this box is at least as large as `other` in both dimensions
    pub fn covers(&self, other: &SizeBox) -> bool {
        self.width >= other.width && self.height >= other.height
    }
}

impl fmt::Display for SizeBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A position on a sheet's draw page, in 1/100 mm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A cell position (0-based column and row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPos {
    pub col: u32,
    pub row: u32,
}

impl CellPos {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Parse an A1-style address (`$` markers are accepted and ignored)
    ///
    /// # Examples
    /// ```
    /// use sheetfit_model::CellPos;
    ///
    /// let pos = CellPos::parse("C10").unwrap();
    /// assert_eq!(pos, CellPos::new(2, 9));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();
        let mut pos = 0;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let col_start = pos;
        let mut col: u64 = 0;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            col = col * 26 + u64::from(bytes[pos].to_ascii_uppercase() - b'A' + 1);
            if col > u64::from(MAX_COLUMNS) {
                return Err(ModelError::InvalidAddress(s.to_string()));
            }
            pos += 1;
        }
        if pos == col_start {
            return Err(ModelError::InvalidAddress(s.to_string()));
        }

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let row: u32 = s[pos..]
            .parse()
            .map_err(|_| ModelError::InvalidAddress(s.to_string()))?;
        // Rows are 1-based in A1 notation
        if row == 0 || row > MAX_ROWS {
            return Err(ModelError::InvalidAddress(s.to_string()));
        }

        Ok(Self {
            col: (col - 1) as u32,
            row: row - 1,
        })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col as u64 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellPos {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        CellPos::parse(s)
    }
}

/// The end of a sheet's used area
///
/// The used area always starts at A1, so only its last column and row are
/// stored. An empty sheet reports `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsedRange {
    pub end_column: u32,
    pub end_row: u32,
}

impl UsedRange {
    pub fn new(end_column: u32, end_row: u32) -> Self {
        Self {
            end_column,
            end_row,
        }
    }

    /// Number of columns covered (`end_column + 1`)
    pub fn column_count(&self) -> u32 {
        self.end_column + 1
    }

    /// Number of rows covered (`end_row + 1`)
    pub fn row_count(&self) -> u32 {
        self.end_row + 1
    }

    /// True when `pos` lies inside the range
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.col <= self.end_column && pos.row <= self.end_row
    }
}

impl fmt::Display for UsedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A1:{}",
            CellPos::new(self.end_column, self.end_row)
        )
    }
}

/// A rectangular cell range, used for print areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRangeAddress {
    pub start: CellPos,
    pub end: CellPos,
}

impl CellRangeAddress {
    /// Create a range, normalizing so that `start` is the top-left corner
    pub fn new(a: CellPos, b: CellPos) -> Self {
        Self {
            start: CellPos::new(a.col.min(b.col), a.row.min(b.row)),
            end: CellPos::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }
}

impl fmt::Display for CellRangeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(CellPos::column_to_letters(0), "A");
        assert_eq!(CellPos::column_to_letters(25), "Z");
        assert_eq!(CellPos::column_to_letters(26), "AA");
        assert_eq!(CellPos::column_to_letters(701), "ZZ");
        assert_eq!(CellPos::column_to_letters(702), "AAA");
    }

    #[test]
    fn test_parse() {
        assert_eq!(CellPos::parse("A1").unwrap(), CellPos::new(0, 0));
        assert_eq!(CellPos::parse("$AA$3").unwrap(), CellPos::new(26, 2));
        assert_eq!("xfd1".parse::<CellPos>().unwrap(), CellPos::new(16383, 0));
        assert!(CellPos::parse("").is_err());
        assert!(CellPos::parse("A0").is_err());
        assert!(CellPos::parse("11").is_err());
        assert!(CellPos::parse("XFE1").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellPos::new(2, 9).to_string(), "C10");
        assert_eq!(UsedRange::new(4, 9).to_string(), "A1:E10");
        assert_eq!(SizeBox::new(10000, 4000).to_string(), "10000x4000");
    }

    #[test]
    fn test_size_box_max_and_covers() {
        let a = SizeBox::new(100, 50);
        let b = SizeBox::new(80, 70);
        assert_eq!(a.max(b), SizeBox::new(100, 70));
        assert!(!a.covers(&b));
        assert!(a.max(b).covers(&a));
        assert!(a.max(b).covers(&b));
    }

    #[test]
    fn test_range_normalizes() {
        let r = CellRangeAddress::new(CellPos::new(3, 1), CellPos::new(0, 5));
        assert_eq!(r.start, CellPos::new(0, 1));
        assert_eq!(r.end, CellPos::new(3, 5));
    }
}
