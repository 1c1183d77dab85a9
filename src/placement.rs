use std::fmt;

use tracing::trace;

use crate::board::Board;
use crate::constants::{FACES, PIECE_SIZE};
use crate::pieces::{ActivePiece, PieceShape, SpecialIndex};
use crate::topology::{step_piece, SquareId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSquare {
    /// `None` when the offset walks off the rim.
    pub target: Option<SquareId>,
    pub is_special: bool,
    pub is_overlapped: bool,
}

impl PlacedSquare {
    pub fn is_out_of_bounds(&self) -> bool {
        self.target.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStatus {
    Valid,
    OutOfBounds,
    Overlapping,
    SelfOverlapping,
    SpansAllFaces,
}

/// The four squares a piece would cover from one hover square. The center
/// comes first, then the offsets in shape order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub hover: SquareId,
    pub squares: [PlacedSquare; PIECE_SIZE],
    pub status: PlacementStatus,
}

impl Placement {
    pub fn is_valid(&self) -> bool {
        self.status == PlacementStatus::Valid
    }

    pub fn targets(&self) -> impl Iterator<Item = SquareId> + '_ {
        self.squares.iter().filter_map(|s| s.target)
    }

    pub fn special(&self) -> Option<SquareId> {
        self.squares
            .iter()
            .find(|s| s.is_special)
            .and_then(|s| s.target)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {}", self.status, self.hover)
    }
}

fn classify(squares: &[PlacedSquare; PIECE_SIZE], guards_face_span: bool) -> PlacementStatus {
    if squares.iter().any(PlacedSquare::is_out_of_bounds) {
        return PlacementStatus::OutOfBounds;
    }
    if squares.iter().any(|s| s.is_overlapped) {
        return PlacementStatus::Overlapping;
    }
    let targets: Vec<SquareId> = squares.iter().filter_map(|s| s.target).collect();
    if (1..targets.len()).any(|i| targets[..i].contains(&targets[i])) {
        return PlacementStatus::SelfOverlapping;
    }
    if guards_face_span {
        let mut faces = [false; FACES];
        for t in &targets {
            faces[t.face()] = true;
        }
        if faces.iter().all(|f| *f) {
            return PlacementStatus::SpansAllFaces;
        }
    }
    PlacementStatus::Valid
}

pub fn resolve_shape(
    board: &Board,
    hover: SquareId,
    shape: &PieceShape,
    special: SpecialIndex,
) -> Placement {
    let place = |target: Option<SquareId>, is_special: bool| PlacedSquare {
        target,
        is_special,
        is_overlapped: target.is_some_and(|t| !board.is_empty(t)),
    };
    let [a, b, c] = shape.offsets();
    let squares = [
        place(Some(hover), special == SpecialIndex::Center),
        place(step_piece(a, hover), special == SpecialIndex::Offset(0)),
        place(step_piece(b, hover), special == SpecialIndex::Offset(1)),
        place(step_piece(c, hover), special == SpecialIndex::Offset(2)),
    ];
    Placement {
        hover,
        status: classify(&squares, shape.guards_face_span()),
        squares,
    }
}

/// Resolves the piece at its own hover square, if it has one.
pub fn resolve(board: &Board, piece: &ActivePiece) -> Option<Placement> {
    piece
        .hover
        .map(|hover| resolve_shape(board, hover, &piece.rotated, piece.special()))
}

/// Tries every empty square with every orientation of the piece.
pub fn has_any_legal_placement(board: &Board, piece: &ActivePiece) -> bool {
    let orientations: Vec<PieceShape> = piece.rotated.orientations().collect();
    let found = board
        .ids()
        .filter(|id| board.is_empty(*id))
        .find(|hover| {
            orientations
                .iter()
                .any(|shape| resolve_shape(board, *hover, shape, piece.special()).is_valid())
        });
    trace!(?found, shape = ?piece.origin.shape, "legal placement search");
    found.is_some()
}
