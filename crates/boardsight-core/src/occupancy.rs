//! Per-square occupancy of an 8x8 board.
//!
//! Row 0 is the far edge of the board as seen by the camera (rank 8 for the
//! standard orientation), column 0 is file `a`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

pub const BOARD_SIZE: usize = 8;

const FILES: &[u8; 8] = b"abcdefgh";

/// Color of whatever occupies a square. Piece identity is not observable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    #[default]
    Empty,
    Light,
    Dark,
}

impl Occupancy {
    pub fn is_empty(self) -> bool {
        self == Occupancy::Empty
    }

    /// Diagnostic symbol: `' '` empty, `'o'` light, `'x'` dark.
    pub fn symbol(self) -> char {
        match self {
            Occupancy::Empty => ' ',
            Occupancy::Light => 'o',
            Occupancy::Dark => 'x',
        }
    }
}

/// Deserialization goes through [`SquarePosition::checked`], so squares read
/// from JSON are always on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct SquarePosition {
    pub row: usize,
    pub col: usize,
}

#[derive(Deserialize)]
struct RawSquare {
    row: usize,
    col: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OffBoardSquare {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for OffBoardSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "square ({}, {}) is off the board", self.row, self.col)
    }
}

impl std::error::Error for OffBoardSquare {}

impl TryFrom<RawSquare> for SquarePosition {
    type Error = OffBoardSquare;

    fn try_from(raw: RawSquare) -> Result<Self, OffBoardSquare> {
        Self::checked(raw.row, raw.col)
    }
}

impl SquarePosition {
    /// Panics if `row` or `col` is outside `0..8`.
    pub fn new(row: usize, col: usize) -> Self {
        match Self::checked(row, col) {
            Ok(p) => p,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn checked(row: usize, col: usize) -> Result<Self, OffBoardSquare> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self { row, col })
        } else {
            Err(OffBoardSquare { row, col })
        }
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = SquarePosition> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Self { row, col }))
    }

    /// File letter plus rank digit, e.g. `(6, 4)` is `e2`.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", FILES[self.col] as char, BOARD_SIZE - self.row)
    }
}

impl fmt::Display for SquarePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

/// Immutable snapshot of all 64 squares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupancyGrid {
    cells: [[Occupancy; BOARD_SIZE]; BOARD_SIZE],
}

impl OccupancyGrid {
    pub fn from_rows(cells: [[Occupancy; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn from_fn(mut f: impl FnMut(SquarePosition) -> Occupancy) -> Self {
        let mut cells = [[Occupancy::Empty; BOARD_SIZE]; BOARD_SIZE];
        for p in SquarePosition::all() {
            cells[p.row][p.col] = f(p);
        }
        Self { cells }
    }

    /// Parse eight lines of `.` (empty), `o` (light) and `x` (dark); whitespace is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if rows.len() != BOARD_SIZE {
            return None;
        }
        let mut cells = [[Occupancy::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.trim().chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return None;
            }
            for (c, s) in symbols.into_iter().enumerate() {
                cells[r][c] = match s {
                    '.' => Occupancy::Empty,
                    'o' => Occupancy::Light,
                    'x' => Occupancy::Dark,
                    _ => return None,
                };
            }
        }
        Some(Self { cells })
    }

    pub fn rows(&self) -> &[[Occupancy; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn count(&self, occupancy: Occupancy) -> usize {
        self.cells.iter().flatten().filter(|&&o| o == occupancy).count()
    }
}

impl Index<SquarePosition> for OccupancyGrid {
    type Output = Occupancy;

    fn index(&self, p: SquarePosition) -> &Occupancy {
        &self.cells[p.row][p.col]
    }
}

/// Eight lines of eight occupancy symbols, for diagnostics.
pub fn render_grid(grid: &OccupancyGrid) -> String {
    let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
    for row in grid.rows() {
        out.extend(row.iter().map(|o| o.symbol()));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_names_follow_board_orientation() {
        assert_eq!(SquarePosition::new(0, 0).to_algebraic(), "a8");
        assert_eq!(SquarePosition::new(7, 7).to_algebraic(), "h1");
        assert_eq!(SquarePosition::new(6, 4).to_algebraic(), "e2");
    }

    #[test]
    fn parse_and_render_use_the_same_layout() {
        let text = "\
            xxxxxxxx
            xxxxxxxx
            ........
            ........
            ....o...
            ........
            oooo.ooo
            oooooooo";
        let grid = OccupancyGrid::parse(text).expect("grid");
        assert_eq!(grid[SquarePosition::new(4, 4)], Occupancy::Light);
        assert_eq!(grid[SquarePosition::new(6, 4)], Occupancy::Empty);
        assert_eq!(grid.count(Occupancy::Dark), 16);

        let rendered = render_grid(&grid);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "xxxxxxxx");
        assert_eq!(lines[4], "    o   ");
    }

    #[test]
    fn parse_rejects_short_rows() {
        assert!(OccupancyGrid::parse("oooo\n").is_none());
    }

    #[test]
    fn deserialized_squares_stay_on_the_board() {
        let p: SquarePosition = serde_json::from_str(r#"{"row":7,"col":0}"#).expect("square");
        assert_eq!(p.to_algebraic(), "a1");

        for json in [r#"{"row":9,"col":0}"#, r#"{"row":3,"col":12}"#] {
            let err = serde_json::from_str::<SquarePosition>(json).expect_err("off board");
            assert!(err.to_string().contains("off the board"), "{err}");
        }
    }

    #[test]
    fn checked_rejects_off_board_coordinates() {
        assert_eq!(
            SquarePosition::checked(8, 2),
            Err(OffBoardSquare { row: 8, col: 2 })
        );
        assert_eq!(SquarePosition::checked(0, 7), Ok(SquarePosition::new(0, 7)));
    }

    #[test]
    #[should_panic]
    fn off_board_square_panics() {
        let _ = SquarePosition::new(8, 0);
    }
}
