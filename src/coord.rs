use std::fmt;

use itertools::Itertools;
use shakmaty::{File, Rank, Square};


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


// Row ('1'..'8') of a board square, 0-based internally.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8,
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        let idx = (ch as i32) - ('1' as i32);
        (0..NUM_ROWS as i32).contains(&idx).then(|| Self::from_zero_based(idx as u8))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'1') as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(Self::from_zero_based)
    }
}


// Column ('a'..'h') of a board square, 0-based internally.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8,
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_COLS);
        Self { idx }
    }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        let idx = (ch as i32) - ('a' as i32);
        (0..NUM_COLS as i32).contains(&idx).then(|| Self::from_zero_based(idx as u8))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'a') as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_COLS).map(Self::from_zero_based)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }

    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (col_ch, row_ch) = s.chars().collect_tuple()?;
        Some(Coord {
            row: Row::from_algebraic(row_ch)?,
            col: Col::from_algebraic(col_ch)?,
        })
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Coord { row, col })
    }

    // Light/dark square parity: 0 for a1 (dark), 1 for h1 (light).
    pub fn parity(self) -> u8 { (self.row.to_zero_based() + self.col.to_zero_based()) % 2 }

    pub fn to_square(self) -> Square {
        Square::from_coords(
            File::new(self.col.to_zero_based().into()),
            Rank::new(self.row.to_zero_based().into()),
        )
    }
    pub fn from_square(sq: Square) -> Self {
        Coord {
            row: Row::from_zero_based(u32::from(sq.rank()) as u8),
            col: Col::from_zero_based(u32::from(sq.file()) as u8),
        }
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self.to_algebraic())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_round_trip() {
        for coord in Coord::all() {
            assert_eq!(Coord::from_algebraic(&coord.to_algebraic()), Some(coord));
        }
        assert_eq!(Coord::from_algebraic("e9"), None);
        assert_eq!(Coord::from_algebraic("i1"), None);
        assert_eq!(Coord::from_algebraic("e44"), None);
    }

    #[test]
    fn square_round_trip() {
        for coord in Coord::all() {
            assert_eq!(Coord::from_square(coord.to_square()), coord);
        }
        assert_eq!(Coord::from_algebraic("e4").unwrap().to_square(), Square::E4);
    }

    #[test]
    fn square_parity() {
        assert_eq!(Coord::from_algebraic("a1").unwrap().parity(), 0);
        assert_eq!(Coord::from_algebraic("h1").unwrap().parity(), 1);
        assert_eq!(Coord::from_algebraic("e4").unwrap().parity(), 1);
    }
}
