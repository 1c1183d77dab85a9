pub mod board;
pub mod clear;
pub mod constants;
pub mod game;
pub mod pieces;
pub mod placement;
pub mod queue;
pub mod spread;
pub mod topology;

pub use board::Board;
pub use clear::{run_clear, ClearedSquare, RINGS};
pub use constants::{Direction, ShapeId, SquareState};
pub use game::{Game, GameConfig, GameOver, PlaceError, TurnResult, TurnState};
pub use pieces::{rotate_shape, ActivePiece, OriginalPiece, PieceShape, SpecialIndex};
pub use placement::{has_any_legal_placement, resolve, resolve_shape, Placement, PlacementStatus};
pub use queue::{PieceQueue, QueueSnapshot};
pub use spread::run_spread;
pub use topology::{adjacent_of, neighbors, rotate_direction, step_piece, SquareId};
