//! Random placement of food and obstacles.

use rand::Rng;
use thiserror::Error;

use crate::config::Grid;
use crate::food::{FOOD_TABLE, Food, FoodKind};
use crate::snake::{Position, Snake};

/// Uniform samples tried before falling back to a scan of free cells.
pub const MAX_RANDOM_PLACEMENT_ATTEMPTS: usize = 1024;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum SpawnError {
    #[error("no free cell left on the {tile_count}×{tile_count} grid")]
    GridFull { tile_count: u16 },
}

/// Picks a uniformly random cell for which `occupied` is false.
///
/// Rejection sampling is tried first; on a crowded board it gives up after
/// [`MAX_RANDOM_PLACEMENT_ATTEMPTS`] and picks among the remaining free cells
/// instead, so placement always terminates.
pub fn place_random<R, F>(rng: &mut R, grid: Grid, occupied: F) -> Result<Position, SpawnError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let size = i32::from(grid.tile_count);
    if size > 0 {
        for _ in 0..MAX_RANDOM_PLACEMENT_ATTEMPTS {
            let candidate = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if !occupied(candidate) {
                return Ok(candidate);
            }
        }
    }

    let mut candidates = Vec::new();
    for y in 0..size {
        for x in 0..size {
            let position = Position::new(x, y);
            if !occupied(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return Err(SpawnError::GridFull {
            tile_count: grid.tile_count,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

/// Maps a roll in `[0, 1)` to a food kind using [`FOOD_TABLE`].
#[must_use]
pub fn choose_food_kind(roll: f64) -> FoodKind {
    choose_from_table(&FOOD_TABLE, roll)
}

/// Returns the first kind whose cumulative weight reaches `roll`.
///
/// When the weights sum to less than `roll` the last entry absorbs the
/// remainder. An empty table yields [`FoodKind::Normal`].
#[must_use]
pub fn choose_from_table(table: &[(FoodKind, f64)], roll: f64) -> FoodKind {
    let mut cumulative = 0.0;
    for &(kind, weight) in table {
        cumulative += weight;
        if cumulative >= roll {
            return kind;
        }
    }

    table.last().map_or(FoodKind::Normal, |&(kind, _)| kind)
}

/// Spawns food away from the snake, the obstacles and the cell the previous
/// food occupied.
pub fn spawn_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    snake: &Snake,
    obstacles: &[Position],
    previous: Option<Position>,
) -> Result<Food, SpawnError> {
    let position = place_random(rng, grid, |cell| {
        snake.occupies(cell) || obstacles.contains(&cell) || previous == Some(cell)
    })?;
    let kind = choose_food_kind(rng.gen_range(0.0..1.0));

    Ok(Food::new(position, kind))
}

/// Replaces `obstacles` with `count` fresh cells clear of the snake, the food
/// and each other.
///
/// On error the obstacles placed so far are kept.
pub fn init_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    obstacles: &mut Vec<Position>,
    count: usize,
    snake: &Snake,
    food: Option<Position>,
) -> Result<(), SpawnError> {
    obstacles.clear();

    for _ in 0..count {
        let position = place_random(rng, grid, |cell| {
            snake.occupies(cell) || food == Some(cell) || obstacles.contains(&cell)
        })?;
        obstacles.push(position);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    use super::{
        SpawnError, choose_food_kind, choose_from_table, init_obstacles, place_random, spawn_food,
    };
    use crate::config::Grid;
    use crate::food::FoodKind;
    use crate::snake::{Position, Snake, Velocity};

    fn three_segment_snake() -> Snake {
        Snake::from_segments(
            vec![
                Position::new(2, 0),
                Position::new(1, 0),
                Position::new(0, 0),
            ],
            Velocity { dx: 1, dy: 0 },
        )
    }

    #[rstest]
    #[case(0.0, FoodKind::Normal)]
    #[case(0.5, FoodKind::Normal)]
    #[case(0.7, FoodKind::Normal)]
    #[case(0.75, FoodKind::Speed)]
    #[case(0.85, FoodKind::Bonus)]
    #[case(0.95, FoodKind::Shrink)]
    fn weighted_food_kind(#[case] roll: f64, #[case] expected: FoodKind) {
        assert_eq!(choose_food_kind(roll), expected);
    }

    #[test]
    fn roll_past_cumulative_total_lands_on_last_kind() {
        // 0.7 + 0.1 + 0.1 + 0.1 rounds to just under 1.0 in f64.
        assert_eq!(choose_food_kind(1.0), FoodKind::Shrink);
    }

    #[test]
    fn underweight_table_gives_remainder_to_last_entry() {
        let table = [(FoodKind::Bonus, 0.2), (FoodKind::Shrink, 0.3)];
        assert_eq!(choose_from_table(&table, 0.15), FoodKind::Bonus);
        assert_eq!(choose_from_table(&table, 0.4), FoodKind::Shrink);
        assert_eq!(choose_from_table(&table, 0.9), FoodKind::Shrink);
    }

    #[test]
    fn empty_table_yields_normal() {
        assert_eq!(choose_from_table(&[], 0.5), FoodKind::Normal);
    }

    #[test]
    fn overweight_table_truncates_last_entry() {
        let table = [(FoodKind::Speed, 0.6), (FoodKind::Bonus, 0.6)];
        assert_eq!(choose_from_table(&table, 0.59), FoodKind::Speed);
        assert_eq!(choose_from_table(&table, 0.99), FoodKind::Bonus);
    }

    #[test]
    fn place_random_finds_the_only_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let free = Position::new(3, 4);

        let placed = place_random(&mut rng, Grid::new(5), |cell| cell != free);

        assert_eq!(placed, Ok(free));
    }

    #[test]
    fn place_random_reports_full_grid() {
        let mut rng = StdRng::seed_from_u64(12);

        let placed = place_random(&mut rng, Grid::new(5), |_| true);

        assert_eq!(placed, Err(SpawnError::GridFull { tile_count: 5 }));
    }

    #[test]
    fn food_spawn_avoids_snake_obstacles_and_previous_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::new(6);
        let snake = three_segment_snake();
        let obstacles = vec![Position::new(3, 3), Position::new(4, 4)];
        let previous = Some(Position::new(5, 5));

        for _ in 0..200 {
            let food = spawn_food(&mut rng, grid, &snake, &obstacles, previous)
                .expect("grid has free cells");
            assert!(food.position.is_within_bounds(grid));
            assert!(!snake.occupies(food.position));
            assert!(!obstacles.contains(&food.position));
            assert_ne!(Some(food.position), previous);
        }
    }

    #[test]
    fn obstacles_are_distinct_and_clear_of_snake_and_food() {
        let mut rng = StdRng::seed_from_u64(21);
        let grid = Grid::new(8);
        let snake = three_segment_snake();
        let food = Some(Position::new(6, 6));
        let mut obstacles = vec![Position::new(1, 1)];

        init_obstacles(&mut rng, grid, &mut obstacles, 20, &snake, food)
            .expect("grid has room for obstacles");

        assert_eq!(obstacles.len(), 20);
        let unique: HashSet<Position> = obstacles.iter().copied().collect();
        assert_eq!(unique.len(), 20);
        for obstacle in &obstacles {
            assert!(obstacle.is_within_bounds(grid));
            assert!(!snake.occupies(*obstacle));
            assert_ne!(Some(*obstacle), food);
        }
    }

    #[test]
    fn obstacles_stop_at_capacity_and_keep_placed_cells() {
        let mut rng = StdRng::seed_from_u64(5);
        let grid = Grid::new(5);
        let snake = three_segment_snake();

        let result = init_obstacles(&mut rng, grid, &mut Vec::new(), 0, &snake, None);
        assert_eq!(result, Ok(()));

        let mut obstacles = Vec::new();
        let result = init_obstacles(&mut rng, grid, &mut obstacles, 30, &snake, None);
        assert_eq!(result, Err(SpawnError::GridFull { tile_count: 5 }));
        assert_eq!(obstacles.len(), 22);
    }
}
