use lazy_static::lazy_static;
use ndarray::Array3;
use tracing::trace;

use crate::board::Board;
use crate::constants::{SquareState, FACES, RING_COUNT, RING_LEN, SIDE};
use crate::topology::{neighbors, next_face, SquareId};

lazy_static! {
    /// Column `r` of face `f` read from the rim inwards, continued by row `r`
    /// of the next face across the fold.
    pub static ref RINGS: [[SquareId; RING_LEN]; RING_COUNT] = {
        let at = |face, row, col| SquareId::new(face, row, col).expect("ring square in range");
        let mut rings = [[at(0, 0, 0); RING_LEN]; RING_COUNT];
        for f in 0..FACES {
            let nf = next_face(f);
            for r in 0..SIDE {
                rings[f * SIDE + r] = [
                    at(f, 2, r),
                    at(f, 1, r),
                    at(f, 0, r),
                    at(nf, r, 0),
                    at(nf, r, 1),
                    at(nf, r, 2),
                ];
            }
        }
        rings
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedSquare {
    pub square: SquareId,
    pub previous: SquareState,
}

/// Rings whose six squares are all occupied.
pub fn completed_rings(
    board: &Board,
) -> impl Iterator<Item = &'static [SquareId; RING_LEN]> + '_ {
    RINGS
        .iter()
        .filter(|ring| ring.iter().all(|id| !board.is_empty(*id)))
}

/// Clears destroyer blasts and completed rings against one snapshot of the
/// board. `destroyer` is the square of a Destroyer placed this turn, if any.
/// Each square is reported once, with the state it had before clearing.
pub fn run_clear(board: &mut Board, destroyer: Option<SquareId>) -> Vec<ClearedSquare> {
    let mut marked = Array3::<bool>::default([FACES, SIDE, SIDE]);
    let mut cleared = Vec::new();
    let mut mark = |id: SquareId| {
        if !std::mem::replace(&mut marked[id.index()], true) {
            cleared.push(ClearedSquare {
                square: id,
                previous: board.get(id),
            });
        }
    };

    if let Some(origin) = destroyer.filter(|id| board.get(*id) == SquareState::Destroyer) {
        mark(origin);
        neighbors(origin)
            .filter(|n| !board.is_empty(*n))
            .for_each(&mut mark);
    }

    for ring in completed_rings(board) {
        trace!(start = %ring[0], "ring complete");
        ring.iter().copied().for_each(&mut mark);
    }

    for c in &cleared {
        board.set(c.square, SquareState::Empty);
    }
    cleared
}
