use nanorand::{RandomGen, Rng};

use crate::constants::{Direction, ShapeId, PIECE_OFFSETS};
use crate::topology::SquareId;

/// Three direction sequences, one per non-center square, each walked from the
/// implicit center square.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceShape {
    id: ShapeId,
    offsets: [Vec<Direction>; PIECE_OFFSETS],
    guards_face_span: bool,
}

impl PieceShape {
    pub fn new(
        id: ShapeId,
        offsets: [Vec<Direction>; PIECE_OFFSETS],
        guards_face_span: bool,
    ) -> Self {
        Self {
            id,
            offsets,
            guards_face_span,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn offsets(&self) -> &[Vec<Direction>; PIECE_OFFSETS] {
        &self.offsets
    }

    /// Whether a placement touching all three faces is rejected for this shape.
    pub fn guards_face_span(&self) -> bool {
        self.guards_face_span
    }

    pub fn rotate(&mut self, clockwise: bool) {
        for step in self.offsets.iter_mut().flatten() {
            *step = step.rotate(clockwise);
        }
    }

    /// This shape and its three other orientations, clockwise.
    pub fn orientations(&self) -> impl Iterator<Item = PieceShape> {
        let mut shape = self.clone();
        (0..4).map(move |_| {
            let current = shape.clone();
            shape.rotate(true);
            current
        })
    }
}

/// Rotation lives in piece-local direction space, so it is the same wherever
/// the piece is hovering.
pub fn rotate_shape(shape: &PieceShape, clockwise: bool) -> PieceShape {
    let mut rotated = shape.clone();
    rotated.rotate(clockwise);
    rotated
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialIndex {
    Offset(usize),
    Center,
}

impl SpecialIndex {
    pub fn offset(index: usize) -> Option<Self> {
        (index < PIECE_OFFSETS).then_some(SpecialIndex::Offset(index))
    }
}

impl<Generator: Rng<OUTPUT>, const OUTPUT: usize> RandomGen<Generator, OUTPUT> for SpecialIndex {
    fn random(rng: &mut Generator) -> Self {
        match rng.generate_range(0..=PIECE_OFFSETS) {
            PIECE_OFFSETS => SpecialIndex::Center,
            i => SpecialIndex::Offset(i),
        }
    }
}

/// Uniform over the catalog, redrawn until it differs from `excluding`.
pub fn draw_shape<R: Rng<OUTPUT>, const OUTPUT: usize>(
    rng: &mut R,
    excluding: Option<ShapeId>,
) -> ShapeId {
    loop {
        let id: ShapeId = rng.generate();
        if Some(id) != excluding {
            return id;
        }
    }
}

pub fn draw_special_index<R: Rng<OUTPUT>, const OUTPUT: usize>(rng: &mut R) -> SpecialIndex {
    rng.generate()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OriginalPiece {
    pub shape: ShapeId,
    pub special: SpecialIndex,
}

impl OriginalPiece {
    pub fn new(shape: ShapeId, special: SpecialIndex) -> Self {
        Self { shape, special }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub origin: OriginalPiece,
    pub rotated: PieceShape,
    pub hover: Option<SquareId>,
}

impl ActivePiece {
    pub fn new(origin: OriginalPiece) -> Self {
        Self {
            origin,
            rotated: origin.shape.shape().clone(),
            hover: None,
        }
    }

    pub fn special(&self) -> SpecialIndex {
        self.origin.special
    }
}

impl From<OriginalPiece> for ActivePiece {
    fn from(origin: OriginalPiece) -> Self {
        Self::new(origin)
    }
}
