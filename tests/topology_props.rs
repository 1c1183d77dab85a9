// Properties of the folded corner and of whole-game rollouts.
use pathfinding::directed::bfs::bfs_reach;
use proptest::prelude::*;

use cubetris::{
    adjacent_of, neighbors, rotate_shape, step_piece, Direction, Game, GameConfig, PieceShape,
    ShapeId, SquareId, SquareState,
};

fn turn(d: Direction, quarter_turns: usize) -> Direction {
    (0..quarter_turns).fold(d, |d, _| d.rotate(true))
}

struct Step {
    applied: Direction,
    folded: bool,
}

// Replays a piece walk one step at a time, recording the direction each step
// actually took on its own face.
fn walk(sequence: &[Direction], from: SquareId) -> Option<(SquareId, Vec<Step>)> {
    let mut at = from;
    let mut turns = 0;
    let mut steps = Vec::new();
    for &d in sequence {
        let applied = turn(d, turns);
        let next = step_piece(&[applied], at)?;
        let folded = next.face() != at.face();
        if folded {
            turns = (turns + if applied == Direction::Down { 1 } else { 3 }) % 4;
        }
        steps.push(Step { applied, folded });
        at = next;
    }
    Some((at, steps))
}

// The walk back from the destination, written so that the turns the fold
// applies on the way back cancel out.
fn inverse(steps: &[Step]) -> Vec<Direction> {
    let mut pre = 0;
    let mut back = Vec::new();
    for step in steps.iter().rev() {
        if step.folded {
            let (undo, runtime) = match step.applied {
                Direction::Down => (Direction::Left, 3),
                _ => (Direction::Down, 1),
            };
            back.push(turn(undo, pre));
            pre = (pre + 4 - runtime) % 4;
        } else {
            back.push(turn(step.applied.opposite(), pre));
        }
    }
    back
}

fn square_strategy() -> impl Strategy<Value = SquareId> {
    (0..3usize, 0..3usize, 0..3usize).prop_map(|(f, r, c)| SquareId::new(f, r, c).unwrap())
}

fn direction_strategy() -> prop::sample::Select<Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

#[test]
fn every_neighbor_is_in_range_and_symmetric() {
    let mut links = 0;
    for a in SquareId::all() {
        for b in neighbors(a) {
            assert!(SquareId::new(b.face(), b.row(), b.col()).is_some());
            assert!(neighbors(b).any(|back| back == a), "{a} -> {b} is one-way");
            links += 1;
        }
    }
    // 12 links inside each face, both ways, plus 9 folded Down and 9 folded Left steps
    assert_eq!(links, 3 * 2 * 2 * 6 + 2 * 9);
}

#[test]
fn the_corner_is_one_connected_surface() {
    for start in SquareId::all() {
        let reached = bfs_reach(start, |s| neighbors(*s).collect::<Vec<_>>()).count();
        assert_eq!(reached, 27);
    }
}

#[test]
fn only_the_rim_lacks_up_or_right() {
    for id in SquareId::all() {
        let adj = adjacent_of(id);
        assert_eq!(adj[Direction::Up].is_none(), id.row() == 2);
        assert_eq!(adj[Direction::Right].is_none(), id.col() == 2);
        assert!(adj[Direction::Down].is_some());
        assert!(adj[Direction::Left].is_some());
    }
}

#[test]
fn four_rotations_restore_every_catalog_shape() {
    for id in ShapeId::ALL {
        let shape = id.shape();
        let mut rotated = shape.clone();
        for _ in 0..4 {
            rotated = rotate_shape(&rotated, true);
        }
        assert_eq!(&rotated, shape);
        assert_ne!(&rotate_shape(shape, false), shape);
    }
}

proptest! {
    #[test]
    fn four_rotations_restore_any_shape(
        offsets in prop::array::uniform3(prop::collection::vec(direction_strategy(), 1..3)),
        clockwise in any::<bool>(),
    ) {
        let shape = PieceShape::new(ShapeId::L, offsets, false);
        let mut rotated = shape.clone();
        for _ in 0..4 {
            rotated = rotate_shape(&rotated, clockwise);
        }
        prop_assert_eq!(rotated, shape);
    }

    #[test]
    fn piece_walk_reverses_back_to_its_origin(
        from in square_strategy(),
        sequence in prop::collection::vec(direction_strategy(), 1..5),
    ) {
        let Some((to, steps)) = walk(&sequence, from) else {
            prop_assert_eq!(step_piece(&sequence, from), None);
            return Ok(());
        };
        prop_assert_eq!(step_piece(&sequence, from), Some(to));
        prop_assume!(steps.iter().filter(|s| s.folded).count() <= 1);

        let back = inverse(&steps);
        prop_assert_eq!(step_piece(&back, to), Some(from));
    }

    #[test]
    fn seeded_rollouts_keep_the_board_consistent(
        seed in any::<u64>(),
        pieces in 1u32..40,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 40),
        toggles in prop::collection::vec(any::<bool>(), 40),
    ) {
        let mut game = Game::new(GameConfig { starting_pieces: pieces, seed: Some(seed) });
        let mut score = 0;
        for (pick, toggle) in picks.iter().zip(&toggles) {
            if game.game_over().is_some() {
                break;
            }
            let mut candidates = Vec::new();
            for rotation in 0..4 {
                for id in SquareId::all() {
                    game.set_hover(Some(id));
                    if game.preview().is_some_and(|p| p.is_valid()) {
                        candidates.push((rotation, id));
                    }
                }
                game.rotate(true);
            }
            prop_assert!(!candidates.is_empty());
            let (rotation, hover) = *pick.get(&candidates);
            for _ in 0..rotation {
                game.rotate(true);
            }
            game.set_hover(Some(hover));
            if *toggle {
                game.toggle_special_type();
            }

            let remaining = game.remaining();
            let result = game.place().unwrap();

            prop_assert_eq!(result.queue.remaining, remaining - 1);
            prop_assert!(result.use_gold);
            score += result.score_delta;
            prop_assert_eq!(result.score, score);
            prop_assert_eq!(game.board().count(SquareState::Destroyer), 0);

            let mut cleared: Vec<_> = result.cleared.iter().map(|c| c.square).collect();
            let before = cleared.len();
            cleared.sort();
            cleared.dedup();
            prop_assert_eq!(cleared.len(), before);
            prop_assert!(cleared.iter().all(|id| game.board().is_empty(*id)));

            for id in &result.spread {
                let state = game.board().get(*id);
                prop_assert!(state == SquareState::Golden || cleared.contains(id));
            }
        }
    }
}
