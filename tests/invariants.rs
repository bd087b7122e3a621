use std::collections::HashSet;
use std::time::{Duration, Instant};

use arcade_snake::config::{Difficulty, Grid, Settings};
use arcade_snake::food::FoodKind;
use arcade_snake::game::GameState;
use arcade_snake::input::{Direction, GameInput};
use arcade_snake::snake::Position;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn assert_board_invariants(state: &GameState) {
    let grid = state.grid();

    let obstacles: HashSet<Position> = state.obstacles.iter().copied().collect();
    assert_eq!(obstacles.len(), state.obstacles.len(), "obstacles overlap");
    for obstacle in &state.obstacles {
        assert!(obstacle.is_within_bounds(grid), "obstacle out of bounds");
    }

    if let Some(food) = state.food {
        assert!(food.position.is_within_bounds(grid), "food out of bounds");
        assert!(!obstacles.contains(&food.position), "food on obstacle");
    }

    if !state.is_over() {
        for segment in state.snake.segments() {
            assert!(segment.is_within_bounds(grid), "snake out of bounds");
        }
    }
}

#[rstest]
#[case(1, 20, 5)]
#[case(2, 10, 5)]
#[case(3, 8, 12)]
fn random_play_keeps_invariants(#[case] seed: u64, #[case] tile_count: u16, #[case] obstacles: usize) {
    let settings = Settings {
        grid: Grid::new(tile_count),
        difficulty: Difficulty::Hard,
        obstacle_count: obstacles,
    }
    .validated()
    .expect("test settings are valid");
    let mut state = GameState::new_with_seed(settings, seed);
    let mut inputs = StdRng::seed_from_u64(seed ^ 0x5eed);
    let start = Instant::now();
    let mut games = 0;

    for step in 0..5_000u64 {
        let now = start + Duration::from_millis(step * 250);

        if state.is_over() {
            games += 1;
            state.apply_input(GameInput::Restart);
            assert_eq!(state.score, 0);
            assert_eq!(state.obstacles.len(), obstacles);
            assert_board_invariants(&state);
            continue;
        }

        if inputs.gen_bool(0.3) {
            let direction = DIRECTIONS[inputs.gen_range(0..DIRECTIONS.len())];
            state.apply_input(GameInput::Direction(direction));
        }

        let score_before = state.score;
        let len_before = state.snake.len();
        let food_before = state.food;

        state.tick(now);
        assert_board_invariants(&state);
        assert!(state.score >= score_before, "score decreased");

        if state.snake.velocity().is_zero() {
            continue;
        }

        let eaten = food_before.filter(|food| food.position == state.snake.head());
        match eaten {
            None => {
                assert_eq!(state.score, score_before);
                assert_eq!(state.snake.len(), len_before);
            }
            Some(food) => {
                assert_eq!(state.score, score_before + food.kind.points());
                let expected = if food.kind == FoodKind::Shrink {
                    (len_before + 1).min((len_before + 1).saturating_sub(2).max(3))
                } else {
                    len_before + 1
                };
                assert_eq!(state.snake.len(), expected);

                if let Some(next) = state.food {
                    assert!(!state.snake.occupies(next.position), "food spawned on snake");
                    assert_ne!(next.position, food.position, "food respawned in place");
                }
            }
        }
    }

    assert!(games > 0, "random play should end at least one game");
}
