use derivative::Derivative;
use nanorand::WyRand;
use tracing::{debug, info, instrument, trace};

use crate::board::Board;
use crate::clear::{run_clear, ClearedSquare};
use crate::constants::{SquareState, DEFAULT_STARTING_PIECES};
use crate::pieces::ActivePiece;
use crate::placement::{has_any_legal_placement, resolve, Placement};
use crate::queue::{PieceQueue, QueueSnapshot};
use crate::spread::run_spread;
use crate::topology::SquareId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub starting_pieces: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_pieces: DEFAULT_STARTING_PIECES,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameOver {
    #[display("no pieces left")]
    NoPieces,
    #[display("no space left")]
    NoSpace,
}

#[derive(Derivative, Clone, Copy, PartialEq, Eq)]
#[derivative(Debug, Default)]
pub struct TurnState {
    pub score: u32,
    #[derivative(Default(value = "true"))]
    pub use_gold: bool,
    pub game_over: Option<GameOver>,
}

/// Why `place` did nothing.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlaceError {
    #[display("no piece in hand")]
    NoActivePiece,
    #[display("piece is not over the board")]
    NoHover,
    #[display("piece does not fit: {}", _0)]
    InvalidPlacement(Placement),
    #[display("game is over: {}", _0)]
    GameOver(GameOver),
}

impl std::error::Error for PlaceError {}

/// Everything one placement changed, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    pub placement: Placement,
    pub spread: Vec<SquareId>,
    pub cleared: Vec<ClearedSquare>,
    pub score_delta: u32,
    pub score: u32,
    pub use_gold: bool,
    pub queue: QueueSnapshot,
    pub game_over: Option<GameOver>,
    pub board: Board,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Game {
    #[derivative(Debug = "ignore")]
    rng: WyRand,
    config: GameConfig,
    board: Board,
    queue: PieceQueue,
    state: TurnState,
    turns: u32,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };
        let queue = PieceQueue::new(&mut rng, config.starting_pieces);
        Self {
            rng,
            config,
            board: Board::new(),
            queue,
            state: TurnState::default(),
            turns: 0,
        }
    }

    /// Starts over with the same config. The rng keeps running, so the new
    /// piece sequence differs from the last one.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.board.clear_all();
        self.queue = PieceQueue::new(&mut self.rng, self.config.starting_pieces);
        self.state = TurnState::default();
        self.turns = 0;
        info!(pieces = self.config.starting_pieces, "new game");
    }

    pub fn set_hover(&mut self, hover: Option<SquareId>) {
        if let Some(piece) = self.queue.current_mut() {
            piece.hover = hover;
        }
    }

    pub fn rotate(&mut self, clockwise: bool) {
        if let Some(piece) = self.queue.current_mut() {
            piece.rotated.rotate(clockwise);
            trace!(clockwise, "rotate");
        }
    }

    pub fn toggle_special_type(&mut self) {
        if self.queue.current().is_some() {
            self.state.use_gold = !self.state.use_gold;
            trace!(use_gold = self.state.use_gold, "toggle special type");
        }
    }

    /// The placement the current piece would make at its hover square.
    pub fn preview(&self) -> Option<Placement> {
        self.queue.current().and_then(|piece| resolve(&self.board, piece))
    }

    /// Places the current piece and resolves the whole turn. A rejected
    /// placement leaves the game untouched.
    #[instrument(skip(self), fields(turn = self.turns))]
    pub fn place(&mut self) -> Result<TurnResult, PlaceError> {
        if let Some(over) = self.state.game_over {
            return Err(PlaceError::GameOver(over));
        }
        let piece = self.queue.current().ok_or(PlaceError::NoActivePiece)?;
        let placement = resolve(&self.board, piece).ok_or(PlaceError::NoHover)?;
        if !placement.is_valid() {
            return Err(PlaceError::InvalidPlacement(placement));
        }

        let special_state = if self.state.use_gold {
            SquareState::Golden
        } else {
            SquareState::Destroyer
        };
        for square in &placement.squares {
            if let Some(target) = square.target {
                let state = if square.is_special {
                    special_state
                } else {
                    SquareState::Normal
                };
                self.board.set(target, state);
            }
        }
        debug!(hover = %placement.hover, ?special_state, "placed");

        let spread = run_spread(&mut self.board);
        let destroyer = placement
            .special()
            .filter(|_| special_state == SquareState::Destroyer);
        let cleared = run_clear(&mut self.board, destroyer);
        let score_delta = cleared
            .iter()
            .filter(|c| c.previous == SquareState::Golden)
            .count() as u32;
        self.state.score += score_delta;
        debug!(
            spread = spread.len(),
            cleared = cleared.len(),
            score_delta,
            "turn resolved"
        );

        self.queue.advance(&mut self.rng);
        self.state.use_gold = true;
        self.turns += 1;

        self.state.game_over = match self.queue.current() {
            None => Some(GameOver::NoPieces),
            Some(next) if !has_any_legal_placement(&self.board, next) => Some(GameOver::NoSpace),
            Some(_) => None,
        };
        if let Some(over) = self.state.game_over {
            info!(score = self.state.score, turns = self.turns, %over, "game over");
        }

        Ok(TurnResult {
            placement,
            spread,
            cleared,
            score_delta,
            score: self.state.score,
            use_gold: self.state.use_gold,
            queue: self.queue.snapshot(),
            game_over: self.state.game_over,
            board: self.board.clone(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn use_gold(&self) -> bool {
        self.state.use_gold
    }

    pub fn game_over(&self) -> Option<GameOver> {
        self.state.game_over
    }

    pub fn remaining(&self) -> u32 {
        self.queue.remaining()
    }

    pub fn current(&self) -> Option<&ActivePiece> {
        self.queue.current()
    }

    pub fn queue(&self) -> QueueSnapshot {
        self.queue.snapshot()
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
