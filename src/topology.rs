//! Coordinates and stepping on the open cube corner.
//!
//! The playfield is three 3x3 faces meeting at one vertex. Row 0 of face `f`
//! is glued to column 0 of face `f + 1`, so stepping Down off row 0 lands on
//! the next face and stepping Left off column 0 lands on the previous one.
//! Row 2 and column 2 are the outer rim and have nothing beyond them.

use std::fmt;

use enum_map::{Enum, EnumMap};

use crate::constants::{Direction, FACES, SIDE};

const LAST: usize = SIDE - 1;

/// Address of one of the 27 squares. Always in range: the only ways to get one
/// are the checked constructor and the stepping functions below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquareId {
    face: usize,
    row: usize,
    col: usize,
}

impl SquareId {
    pub fn new(face: usize, row: usize, col: usize) -> Option<Self> {
        (face < FACES && row < SIDE && col < SIDE).then_some(Self { face, row, col })
    }

    pub fn face(&self) -> usize {
        self.face
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn index(&self) -> [usize; 3] {
        [self.face, self.row, self.col]
    }

    /// All squares, face-major then row then column.
    pub fn all() -> impl Iterator<Item = SquareId> {
        (0..FACES).flat_map(|face| {
            (0..SIDE).flat_map(move |row| (0..SIDE).map(move |col| SquareId { face, row, col }))
        })
    }
}

impl fmt::Display for SquareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.face, self.row, self.col)
    }
}

pub fn next_face(face: usize) -> usize {
    (face + 1) % FACES
}

pub fn prev_face(face: usize) -> usize {
    (face + FACES - 1) % FACES
}

impl Direction {
    /// One quarter turn in the `Up -> Right -> Down -> Left` cycle.
    pub fn rotate(self, clockwise: bool) -> Direction {
        self.turn(if clockwise { 1 } else { 3 })
    }

    pub fn opposite(self) -> Direction {
        self.turn(2)
    }

    fn turn(self, quarter_turns: usize) -> Direction {
        Direction::from_usize((self.into_usize() + quarter_turns) % 4)
    }
}

pub fn rotate_direction(direction: Direction, clockwise: bool) -> Direction {
    direction.rotate(clockwise)
}

fn wrap_down(from: SquareId) -> SquareId {
    SquareId {
        face: next_face(from.face),
        row: from.col,
        col: 0,
    }
}

fn wrap_left(from: SquareId) -> SquareId {
    SquareId {
        face: prev_face(from.face),
        row: 0,
        col: from.row,
    }
}

/// The neighbor of `id` in each direction. Up and Right are `None` on the rim.
pub fn adjacent_of(id: SquareId) -> EnumMap<Direction, Option<SquareId>> {
    let SquareId { face, row, col } = id;
    EnumMap::from_array([
        (row < LAST).then(|| SquareId { face, row: row + 1, col }),
        (col < LAST).then(|| SquareId { face, row, col: col + 1 }),
        Some(if row > 0 {
            SquareId { face, row: row - 1, col }
        } else {
            wrap_down(id)
        }),
        Some(if col > 0 {
            SquareId { face, row, col: col - 1 }
        } else {
            wrap_left(id)
        }),
    ])
}

/// Existing neighbors in `Up, Right, Down, Left` order.
pub fn neighbors(id: SquareId) -> impl Iterator<Item = SquareId> {
    adjacent_of(id).into_values().flatten()
}

/// Walks a piece offset from `from`. Up/Right never leave the face; Down/Left
/// fold onto the neighboring face and turn the rest of the walk with them,
/// clockwise for Down and counter-clockwise for Left. `None` means the
/// offset falls off the rim.
pub fn step_piece(sequence: &[Direction], from: SquareId) -> Option<SquareId> {
    let mut at = from;
    // quarter turns (clockwise) applied to the steps not taken yet
    let mut turns = 0;
    for &step in sequence {
        let SquareId { face, row, col } = at;
        at = match step.turn(turns) {
            Direction::Up if row < LAST => SquareId { face, row: row + 1, col },
            Direction::Right if col < LAST => SquareId { face, row, col: col + 1 },
            Direction::Up | Direction::Right => return None,
            Direction::Down if row > 0 => SquareId { face, row: row - 1, col },
            Direction::Down => {
                turns = (turns + 1) % 4;
                wrap_down(at)
            }
            Direction::Left if col > 0 => SquareId { face, row, col: col - 1 },
            Direction::Left => {
                turns = (turns + 3) % 4;
                wrap_left(at)
            }
        };
    }
    Some(at)
}
