use crate::config::Grid;
use crate::snake::{Position, Snake};

/// Why the game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    ObstacleCollision,
    SelfCollision,
}

impl DeathReason {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::WallCollision => "hit the wall",
            Self::ObstacleCollision => "hit an obstacle",
            Self::SelfCollision => "hit yourself",
        }
    }
}

/// Checks the snake head against walls, obstacles and its own body, in that
/// order. Every `Some` result ends the game.
#[must_use]
pub fn resolve(snake: &Snake, obstacles: &[Position], grid: Grid) -> Option<DeathReason> {
    let head = snake.head();

    if !head.is_within_bounds(grid) {
        return Some(DeathReason::WallCollision);
    }

    if obstacles.contains(&head) {
        return Some(DeathReason::ObstacleCollision);
    }

    if snake.head_overlaps_body() {
        return Some(DeathReason::SelfCollision);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{DeathReason, resolve};
    use crate::config::Grid;
    use crate::snake::{Position, Snake, Velocity};

    const RIGHT: Velocity = Velocity { dx: 1, dy: 0 };

    #[test]
    fn clear_board_has_no_collision() {
        let snake = Snake::from_segments(vec![Position::new(5, 5), Position::new(4, 5)], RIGHT);

        assert_eq!(resolve(&snake, &[Position::new(0, 0)], Grid::new(10)), None);
    }

    #[test]
    fn head_outside_grid_is_wall_collision() {
        for head in [
            Position::new(-1, 5),
            Position::new(10, 5),
            Position::new(5, -1),
            Position::new(5, 10),
        ] {
            let snake = Snake::from_segments(vec![head], RIGHT);
            assert_eq!(
                resolve(&snake, &[], Grid::new(10)),
                Some(DeathReason::WallCollision)
            );
        }
    }

    #[test]
    fn head_on_obstacle_is_obstacle_collision() {
        let snake = Snake::from_segments(vec![Position::new(6, 5), Position::new(5, 5)], RIGHT);

        assert_eq!(
            resolve(&snake, &[Position::new(6, 5)], Grid::new(10)),
            Some(DeathReason::ObstacleCollision)
        );
    }

    #[test]
    fn head_on_body_is_self_collision() {
        let snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(3, 3),
                Position::new(2, 3),
                Position::new(2, 2),
            ],
            RIGHT,
        );

        assert_eq!(
            resolve(&snake, &[], Grid::new(10)),
            Some(DeathReason::SelfCollision)
        );
    }

    #[test]
    fn obstacle_is_reported_before_self_overlap() {
        let snake = Snake::from_segments(
            vec![Position::new(2, 2), Position::new(3, 2), Position::new(2, 2)],
            RIGHT,
        );

        assert_eq!(
            resolve(&snake, &[Position::new(2, 2)], Grid::new(10)),
            Some(DeathReason::ObstacleCollision)
        );
    }
}
