use nanorand::Rng;

use crate::constants::{ShapeId, LOOKAHEAD};
use crate::pieces::{draw_shape, draw_special_index, ActivePiece, OriginalPiece};

/// What the inventory display needs: the piece in hand, the lookahead and
/// how many pieces are left including the one in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub current: Option<OriginalPiece>,
    pub next: [Option<OriginalPiece>; LOOKAHEAD],
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceQueue {
    current: Option<ActivePiece>,
    next: [Option<OriginalPiece>; LOOKAHEAD],
    remaining: u32,
    last_drawn: Option<ShapeId>,
}

impl PieceQueue {
    /// Fills the hand and the lookahead as far as `remaining` allows.
    pub fn new<R: Rng<OUTPUT>, const OUTPUT: usize>(rng: &mut R, remaining: u32) -> Self {
        let mut queue = Self {
            current: None,
            next: [None; LOOKAHEAD],
            remaining,
            last_drawn: None,
        };
        queue.current = queue.draw_if(rng, remaining > 0).map(ActivePiece::new);
        queue.next[0] = queue.draw_if(rng, remaining > 1);
        queue.next[1] = queue.draw_if(rng, remaining > 2);
        queue
    }

    fn draw_if<R: Rng<OUTPUT>, const OUTPUT: usize>(
        &mut self,
        rng: &mut R,
        available: bool,
    ) -> Option<OriginalPiece> {
        if !available {
            return None;
        }
        let shape = draw_shape(rng, self.last_drawn);
        self.last_drawn = Some(shape);
        Some(OriginalPiece::new(shape, draw_special_index(rng)))
    }

    /// Consumes the piece in hand and shifts the lookahead forward.
    pub fn advance<R: Rng<OUTPUT>, const OUTPUT: usize>(&mut self, rng: &mut R) {
        self.remaining = self.remaining.saturating_sub(1);
        self.current = self.next[0].take().map(ActivePiece::new);
        self.next[0] = self.next[1].take();
        self.next[1] = self.draw_if(rng, self.remaining > 2);
    }

    pub fn current(&self) -> Option<&ActivePiece> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut ActivePiece> {
        self.current.as_mut()
    }

    pub fn next(&self) -> &[Option<OriginalPiece>; LOOKAHEAD] {
        &self.next
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            current: self.current.as_ref().map(|p| p.origin),
            next: self.next,
            remaining: self.remaining,
        }
    }
}
