use std::collections::VecDeque;

use tracing::trace;

use crate::board::Board;
use crate::constants::{SquareState, SPREAD_THRESHOLD};
use crate::topology::{neighbors, SquareId};

fn golden_neighbors(board: &Board, id: SquareId) -> usize {
    neighbors(id)
        .filter(|n| board.get(*n) == SquareState::Golden)
        .count()
}

/// Turns Normal squares Golden wherever more than one neighbor is Golden,
/// breadth-first. Every occupied square seeds the queue, not only the ones
/// placed this turn, and each conversion is queued again so it can carry the
/// spread further. Returns the converted squares in conversion order.
pub fn run_spread(board: &mut Board) -> Vec<SquareId> {
    let mut queue: VecDeque<SquareId> = board.occupied().collect();
    let mut converted = Vec::new();

    while let Some(source) = queue.pop_front() {
        for n in neighbors(source) {
            if board.get(n) != SquareState::Normal {
                continue;
            }
            if golden_neighbors(board, n) > SPREAD_THRESHOLD {
                board.set(n, SquareState::Golden);
                converted.push(n);
                queue.push_back(n);
                trace!(square = %n, from = %source, "spread");
            }
        }
    }

    converted
}
