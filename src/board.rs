use std::{
    fmt::{Display, Write},
    ops::Index,
    str::FromStr,
};

use itertools::Itertools;

use crate::error::ParseError;

pub const SIDE: usize = 3;
pub const CELLS: usize = SIDE * SIDE;
pub const BLANK: u8 = 0;

/// A 3×3 board in row-major order. `0` marks a blank cell, `1..=8` are tiles.
///
/// Boards are plain values: moves produce new boards and equality/hashing
/// cover all nine cells.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [u8; CELLS],
}

impl Board {
    /// Builds a board from raw cell values without checking any domain rules.
    pub const fn new(cells: [u8; CELLS]) -> Board {
        Board { cells }
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    /// Indices of every blank cell, ascending.
    pub fn blanks(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().positions(|&c| c == BLANK)
    }

    /// `positions()[t]` is the cell index currently holding tile `t`.
    /// Entry 0 is meaningless when there is more than one blank. Panics on a
    /// cell above 8; `search` validates boards before calling it.
    pub fn positions(&self) -> [usize; CELLS] {
        let mut result = [0; CELLS];
        for (ix, &c) in self.cells.iter().enumerate() {
            result[c as usize] = ix;
        }

        result
    }

    pub fn swapped(&self, a: usize, b: usize) -> Board {
        let mut cells = self.cells;
        cells.swap(a, b);
        Board { cells }
    }

    /// Number of tile pairs (blanks ignored) that appear in the opposite
    /// order to their numbering.
    pub fn inversions(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c != BLANK)
            .tuple_combinations()
            .filter(|(a, b)| a > b)
            .count()
    }

    pub fn grid(&self) -> Grid<'_> {
        Grid(self)
    }
}

impl Index<usize> for Board {
    type Output = u8;
    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl Index<(usize, usize)> for Board {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index.0 * SIDE + index.1]
    }
}

/// Accepts nine digit symbols, either concatenated or separated by any
/// whitespace (including line breaks). Only the shape is checked here;
/// see [`crate::Domain::parse`] for the tile/blank rules.
impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != CELLS {
            return Err(ParseError::SymbolCount {
                found: symbols.len(),
            });
        }

        let mut cells = [BLANK; CELLS];
        for (cell, symbol) in cells.iter_mut().zip_eq(symbols) {
            *cell = symbol
                .to_digit(10)
                .ok_or(ParseError::InvalidSymbol { symbol })? as u8;
        }

        Ok(Board { cells })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.cells {
            f.write_char((b'0' + c) as char)?;
        }

        Ok(())
    }
}

pub struct Grid<'a>(&'a Board);

impl Display for Grid<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.0.cells.chunks(SIDE) {
            writeln!(f, "{}", row.iter().format(" "))?;
        }

        Ok(())
    }
}
