//! The [`Grid`] type — a 2D map of obstacle flags.
//!
//! Cells are stored one bit each, column-major (the x coordinate is the
//! outer axis). Any point outside the grid reads as an obstacle, so callers
//! never need a separate bounds check before asking whether a cell is
//! walkable.
//!
//! Cloning a `Grid` is a deep copy that shares nothing with the original.
//! Search code relies on this to fork per-branch visited maps.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geom::Point;

const WORD_BITS: usize = u64::BITS as usize;

/// A 2D grid of boolean cells. `true` means obstacle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct Grid {
    width: i32,
    height: i32,
    bits: Vec<u64>,
}

impl Grid {
    /// Create an obstacle-free grid. Negative dimensions are clamped to 0.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, false)
    }

    /// Create a grid with every cell set to `value`.
    pub fn filled(width: i32, height: i32, value: bool) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let len = (width as usize) * (height as usize);
        let mut grid = Self {
            width,
            height,
            bits: vec![0; len.div_ceil(WORD_BITS)],
        };
        if value {
            grid.fill(true);
        }
        grid
    }

    /// Create a grid whose cell at `p` is `f(p)`.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> bool) -> Self {
        let mut grid = Self::new(width, height);
        for x in 0..grid.width {
            for y in 0..grid.height {
                let p = Point::new(x, y);
                if f(p) {
                    grid.set(p, true);
                }
            }
        }
        grid
    }

    /// Rebuild a grid from its packed cells, as produced by serialization.
    ///
    /// `bits` must hold exactly `ceil(width * height / 64)` words; padding
    /// bits past the last cell are cleared.
    pub fn from_bits(
        width: i32,
        height: i32,
        mut bits: Vec<u64>,
    ) -> Result<Self, GridDataError> {
        if width < 0 || height < 0 {
            return Err(GridDataError::NegativeSize { width, height });
        }
        let len = (width as usize) * (height as usize);
        let expected = len.div_ceil(WORD_BITS);
        if bits.len() != expected {
            return Err(GridDataError::WordCount {
                expected,
                found: bits.len(),
            });
        }
        let tail = len % WORD_BITS;
        if tail != 0 {
            if let Some(last) = bits.last_mut() {
                *last &= (1 << tail) - 1;
            }
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the grid has no cells at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.x as usize) * (self.height as usize) + (p.y as usize))
        } else {
            None
        }
    }

    /// Read the cell at `p`. Out-of-range points read as `true`.
    #[inline]
    pub fn get(&self, p: Point) -> bool {
        match self.index(p) {
            Some(i) => self.bits[i / WORD_BITS] & (1 << (i % WORD_BITS)) != 0,
            None => true,
        }
    }

    /// Set the cell at `p`. No-op if `p` is outside the grid.
    #[inline]
    pub fn set(&mut self, p: Point, value: bool) {
        let Some(i) = self.index(p) else {
            return;
        };
        let mask = 1 << (i % WORD_BITS);
        if value {
            self.bits[i / WORD_BITS] |= mask;
        } else {
            self.bits[i / WORD_BITS] &= !mask;
        }
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: bool) {
        let len = (self.width as usize) * (self.height as usize);
        if !value {
            self.bits.iter_mut().for_each(|w| *w = 0);
            return;
        }
        self.bits.iter_mut().for_each(|w| *w = u64::MAX);
        // Keep the padding bits of the last word clear so equality only
        // depends on real cells.
        let tail = len % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last = (1 << tail) - 1;
            }
        }
    }

    /// Number of obstacle cells.
    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl fmt::Display for Grid {
    /// One text line per row: `#` for obstacles, `.` for free cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = if self.get(Point::new(x, y)) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Text parsing
// ---------------------------------------------------------------------------

/// Errors produced when parsing a [`Grid`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    /// The input had no non-blank rows.
    #[error("grid text has no rows")]
    Empty,

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character other than `#`, `.` or `-`.
    #[error("unknown cell {ch:?} at ({x}, {y})")]
    UnknownCell { ch: char, x: usize, y: usize },
}

/// Packed cell data that does not describe a valid [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridDataError {
    #[error("negative grid size {width}x{height}")]
    NegativeSize { width: i32, height: i32 },

    #[error("grid data has {found} words, expected {expected}")]
    WordCount { expected: usize, found: usize },
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    width: i32,
    height: i32,
    bits: Vec<u64>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridDataError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        Grid::from_bits(repr.width, repr.height, repr.bits)
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    /// Parse the [`Display`](fmt::Display) format. `-` is accepted as a
    /// free cell too; blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(GridParseError::Empty);
        };
        let width = first.chars().count();

        let mut grid = Grid::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridParseError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let blocked = match ch {
                    '#' => true,
                    '.' | '-' => false,
                    _ => return Err(GridParseError::UnknownCell { ch, x, y }),
                };
                grid.set(Point::new(x as i32, y as i32), blocked);
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_new_is_free() {
        let g = Grid::new(4, 3);
        assert_eq!((g.width(), g.height()), (4, 3));
        assert_eq!(g.count(), 0);
    }

    #[test]
    fn out_of_range_reads_as_obstacle() {
        let g = Grid::new(2, 2);
        assert!(g.get(Point::new(-1, 0)));
        assert!(g.get(Point::new(0, -1)));
        assert!(g.get(Point::new(2, 0)));
        assert!(g.get(Point::new(0, 2)));
        assert!(!g.get(Point::new(1, 1)));
    }

    #[test]
    fn set_and_get() {
        let mut g = Grid::new(70, 3);
        g.set(Point::new(65, 2), true);
        assert!(g.get(Point::new(65, 2)));
        assert_eq!(g.count(), 1);
        g.set(Point::new(65, 2), false);
        assert!(!g.get(Point::new(65, 2)));
        // out of bounds is ignored
        g.set(Point::new(100, 100), true);
        assert_eq!(g.count(), 0);
    }

    #[test]
    fn clone_is_independent() {
        let mut a = Grid::new(3, 3);
        let b = a.clone();
        a.set(Point::new(1, 1), true);
        assert!(a.get(Point::new(1, 1)));
        assert!(!b.get(Point::new(1, 1)));
    }

    #[test]
    fn filled_keeps_padding_clear() {
        let g = Grid::filled(3, 3, true);
        assert_eq!(g.count(), 9);
        assert_eq!(g, Grid::from_fn(3, 3, |_| true));
    }

    #[test]
    fn zero_sized_grid() {
        let g = Grid::new(0, 5);
        assert!(g.is_empty());
        assert!(g.get(Point::ZERO));
        let g = Grid::new(-3, 2);
        assert_eq!(g.width(), 0);
    }

    #[test]
    fn from_bits_checks_word_count() {
        assert_eq!(
            Grid::from_bits(100, 100, vec![]),
            Err(GridDataError::WordCount {
                expected: 157,
                found: 0
            })
        );
        assert_eq!(
            Grid::from_bits(-1, 2, vec![]),
            Err(GridDataError::NegativeSize {
                width: -1,
                height: 2
            })
        );
        // Padding past the 9th cell is dropped.
        let g = Grid::from_bits(3, 3, vec![u64::MAX]).unwrap();
        assert_eq!(g.count(), 9);
        assert_eq!(g, Grid::filled(3, 3, true));
    }

    #[test]
    fn display_and_parse() {
        let text = "#..\n.#-\n";
        let g: Grid = text.parse().unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
        assert!(g.get(Point::new(0, 0)));
        assert!(g.get(Point::new(1, 1)));
        assert!(!g.get(Point::new(2, 1)));
        assert_eq!(g.to_string(), "#..\n.#.\n");
        assert_eq!(g.to_string().parse::<Grid>().unwrap(), g);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("  \n".parse::<Grid>(), Err(GridParseError::Empty));
        assert_eq!(
            "...\n..".parse::<Grid>(),
            Err(GridParseError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "..x".parse::<Grid>(),
            Err(GridParseError::UnknownCell { ch: 'x', x: 2, y: 0 })
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g: Grid = "#.#\n...".parse().unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn grid_with_short_data_is_rejected() {
        let err = serde_json::from_str::<Grid>(r#"{"width":100,"height":100,"bits":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("expected 157"));
    }

    #[test]
    fn padding_bits_are_cleared() {
        let g: Grid = serde_json::from_str(r#"{"width":2,"height":2,"bits":[255]}"#).unwrap();
        assert_eq!(g.count(), 4);
        assert_eq!(g, Grid::filled(2, 2, true));
    }
}
