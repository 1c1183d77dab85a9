use enum_map::{enum_map, Enum, EnumMap};
use lazy_static::lazy_static;
use nanorand::{RandomGen, Rng};

use crate::pieces::PieceShape;

pub const FACES: usize = 3;
pub const SIDE: usize = 3;
pub const SQUARE_COUNT: usize = FACES * SIDE * SIDE;
pub const PIECE_SIZE: usize = 4;
pub const PIECE_OFFSETS: usize = PIECE_SIZE - 1;
pub const LOOKAHEAD: usize = 2;
pub const RING_LEN: usize = 2 * SIDE;
pub const RING_COUNT: usize = FACES * SIDE;
pub const DEFAULT_STARTING_PIECES: u32 = 30;

// A Normal square turns Golden once it has more than this many Golden neighbors.
pub const SPREAD_THRESHOLD: usize = 1;

#[rustfmt::skip]
lazy_static! {
    static ref SHAPES: EnumMap<ShapeId, PieceShape> = {
        use Direction as D;
        enum_map! {
            ShapeId::L => PieceShape::new(ShapeId::L, [
                vec![D::Up],
                vec![D::Down],
                vec![D::Down, D::Right],
            ], false),
            ShapeId::J => PieceShape::new(ShapeId::J, [
                vec![D::Up],
                vec![D::Down],
                vec![D::Down, D::Left],
            ], false),
            ShapeId::S => PieceShape::new(ShapeId::S, [
                vec![D::Down],
                vec![D::Left],
                vec![D::Left, D::Up],
            ], false),
            ShapeId::Z => PieceShape::new(ShapeId::Z, [
                vec![D::Down],
                vec![D::Right],
                vec![D::Right, D::Up],
            ], false),
            // the only shape with three arms on its center, so a rotation can reach
            // around the open corner onto all three faces at once
            ShapeId::T => PieceShape::new(ShapeId::T, [
                vec![D::Down],
                vec![D::Up],
                vec![D::Right],
            ], true),
            ShapeId::I => PieceShape::new(ShapeId::I, [
                vec![D::Up],
                vec![D::Up, D::Up],
                vec![D::Down],
            ], false),
        }
    };
}

/// Local step directions on a face. Declaration order is the clockwise cycle
/// `Up -> Right -> Down -> Left`, which is also the neighbor order of
/// [`adjacent_of`](crate::topology::adjacent_of).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum SquareState {
    #[default]
    Empty,
    Normal,
    Golden,
    Destroyer,
}

impl SquareState {
    const GLYPHS: EnumMap<SquareState, char> = EnumMap::from_array(['.', '#', 'G', 'X']);

    pub fn glyph(&self) -> char {
        Self::GLYPHS[*self]
    }

    pub fn is_empty(&self) -> bool {
        *self == SquareState::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum ShapeId {
    L,
    J,
    S,
    Z,
    T,
    I,
}

impl ShapeId {
    pub const ALL: [ShapeId; 6] = [
        ShapeId::L,
        ShapeId::J,
        ShapeId::S,
        ShapeId::Z,
        ShapeId::T,
        ShapeId::I,
    ];

    pub fn shape(&self) -> &'static PieceShape {
        &SHAPES[*self]
    }
}

impl<Generator: Rng<OUTPUT>, const OUTPUT: usize> RandomGen<Generator, OUTPUT> for ShapeId {
    fn random(rng: &mut Generator) -> Self {
        Self::ALL[rng.generate_range(0..Self::ALL.len())]
    }
}
