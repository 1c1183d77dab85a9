use std::fmt;

use enum_map::EnumMap;
use ndarray::Array3;

use crate::constants::{SquareState, FACES, SIDE};
use crate::topology::SquareId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: Array3<SquareState>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            squares: Array3::default([FACES, SIDE, SIDE]),
        }
    }

    pub fn get(&self, id: SquareId) -> SquareState {
        self.squares[id.index()]
    }

    pub fn set(&mut self, id: SquareId, state: SquareState) {
        self.squares[id.index()] = state;
    }

    pub fn is_empty(&self, id: SquareId) -> bool {
        self.get(id).is_empty()
    }

    /// Every square id in the fixed face, row, column order.
    pub fn ids(&self) -> impl Iterator<Item = SquareId> {
        SquareId::all()
    }

    pub fn squares(&self) -> impl Iterator<Item = (SquareId, SquareState)> + '_ {
        self.ids().map(|id| (id, self.get(id)))
    }

    pub fn occupied(&self) -> impl Iterator<Item = SquareId> + '_ {
        self.squares()
            .filter_map(|(id, state)| (!state.is_empty()).then_some(id))
    }

    pub fn count(&self, state: SquareState) -> usize {
        self.squares.iter().filter(|s| **s == state).count()
    }

    pub fn counts(&self) -> EnumMap<SquareState, usize> {
        let mut counts = EnumMap::default();
        for state in self.squares.iter() {
            counts[*state] += 1;
        }
        counts
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| !s.is_empty())
    }

    pub fn clear_all(&mut self) {
        self.squares.fill(SquareState::Empty);
    }
}

// Faces side by side, row 2 (the rim) on top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in 0..FACES {
            write!(f, "{:<width$}", format!("face {face}"), width = SIDE * 2 + 2)?;
        }
        writeln!(f)?;
        for row in (0..SIDE).rev() {
            for face in 0..FACES {
                for col in 0..SIDE {
                    write!(f, "{} ", self.squares[[face, row, col]].glyph())?;
                }
                write!(f, "  ")?;
            }
            writeln!(f, "r{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(face: usize, row: usize, col: usize) -> SquareId {
        SquareId::new(face, row, col).unwrap()
    }

    #[test]
    fn starts_empty() {
        let board = Board::new();
        assert_eq!(board.count(SquareState::Empty), 27);
        assert_eq!(board.occupied().count(), 0);
        assert!(!board.is_full());
    }

    #[test]
    fn set_and_get_address_the_same_square() {
        let mut board = Board::new();
        board.set(sq(2, 0, 1), SquareState::Golden);
        assert_eq!(board.get(sq(2, 0, 1)), SquareState::Golden);
        assert_eq!(board.get(sq(2, 1, 0)), SquareState::Empty);
        assert!(!board.is_empty(sq(2, 0, 1)));
        assert_eq!(board.occupied().collect::<Vec<_>>(), vec![sq(2, 0, 1)]);
    }

    #[test]
    fn counts_by_state() {
        let mut board = Board::new();
        board.set(sq(0, 0, 0), SquareState::Normal);
        board.set(sq(0, 0, 1), SquareState::Normal);
        board.set(sq(1, 2, 2), SquareState::Destroyer);
        let counts = board.counts();
        assert_eq!(counts[SquareState::Normal], 2);
        assert_eq!(counts[SquareState::Destroyer], 1);
        assert_eq!(counts[SquareState::Empty], 24);

        board.clear_all();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn ids_are_in_face_row_col_order() {
        let board = Board::new();
        let ids: Vec<_> = board.ids().collect();
        assert_eq!(ids.len(), 27);
        assert_eq!(ids[0], sq(0, 0, 0));
        assert_eq!(ids[1], sq(0, 0, 1));
        assert_eq!(ids[3], sq(0, 1, 0));
        assert_eq!(ids[9], sq(1, 0, 0));
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn renders_rim_row_first() {
        let mut board = Board::new();
        board.set(sq(0, 2, 0), SquareState::Golden);
        board.set(sq(2, 0, 2), SquareState::Destroyer);
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("G . ."));
        assert!(lines[1].ends_with("r2"));
        assert!(lines[3].contains(". . X"));
    }
}
