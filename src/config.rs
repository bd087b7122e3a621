use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;
use ratatui::symbols::border;
use thiserror::Error;

/// Square playing field of `tile_count × tile_count` cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    pub tile_count: u16,
}

impl Grid {
    #[must_use]
    pub fn new(tile_count: u16) -> Self {
        Self { tile_count }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.tile_count) * usize::from(self.tile_count)
    }

    /// Returns the center cell, where a fresh snake starts.
    #[must_use]
    pub fn center(self) -> (i32, i32) {
        let mid = i32::from(self.tile_count / 2);
        (mid, mid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_COUNT)
    }
}

/// Named difficulty presets, each mapping to a base tick interval.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Milliseconds between simulation steps at this difficulty.
    #[must_use]
    pub fn tick_interval_ms(self) -> u64 {
        match self {
            Self::Easy => 500,
            Self::Normal => 333,
            Self::Hard => 250,
        }
    }

    #[must_use]
    pub fn tick_interval(self) -> Duration {
        Duration::from_millis(self.tick_interval_ms())
    }

    /// Human-readable movement rate, as shown in the HUD.
    #[must_use]
    pub fn cells_per_second(self) -> f64 {
        cells_per_second(self.tick_interval())
    }

    /// Next preset in selector order, wrapping from hard back to easy.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Normal,
            Self::Normal => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Converts a tick interval into snake cells travelled per second.
#[must_use]
pub fn cells_per_second(interval: Duration) -> f64 {
    let secs = interval.as_secs_f64();
    if secs <= 0.0 { 0.0 } else { 1.0 / secs }
}

/// Per-game settings chosen at launch.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Settings {
    pub grid: Grid,
    pub difficulty: Difficulty,
    pub obstacle_count: usize,
}

impl Settings {
    /// Validates that the grid has room for the starting snake, one food and
    /// every obstacle.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.grid.tile_count < MIN_TILE_COUNT {
            return Err(ConfigError::GridTooSmall {
                tile_count: self.grid.tile_count,
                min: MIN_TILE_COUNT,
            });
        }

        // The board must keep free cells beyond the initial entities or the
        // game would end before the first move.
        let fits = self
            .obstacle_count
            .checked_add(2)
            .is_some_and(|required| required < self.grid.total_cells());
        if !fits {
            return Err(ConfigError::TooManyObstacles {
                obstacles: self.obstacle_count,
                cells: self.grid.total_cells(),
            });
        }

        Ok(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            difficulty: Difficulty::default(),
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid of {tile_count} tiles per side is too small; need at least {min}")]
    GridTooSmall { tile_count: u16, min: u16 },
    #[error("{obstacles} obstacles leave no room to play on a {cells}-cell grid")]
    TooManyObstacles { obstacles: usize, cells: usize },
}

/// Solid-color palette for every visual element.
#[derive(Debug)]
pub struct Theme {
    pub background: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub obstacle: Color,
    pub food_normal: Color,
    pub food_speed: Color,
    pub food_bonus: Color,
    pub food_shrink: Color,
    /// Hue (degrees) of the snake head; later segments shift along the wheel.
    pub snake_hue_start: f32,
    /// Hue shift applied per segment.
    pub snake_hue_step: f32,
    pub hud_label: Color,
    pub hud_value: Color,
    pub hud_accent: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME: Theme = Theme {
    background: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    obstacle: Color::Gray,
    food_normal: Color::Red,
    food_speed: Color::Yellow,
    food_bonus: Color::Magenta,
    food_shrink: Color::Cyan,
    snake_hue_start: 120.0,
    snake_hue_step: 6.0,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    hud_accent: Color::Green,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Full cell glyph used for snake segments and obstacles.
pub const GLYPH_TILE: &str = "██";

/// Round glyph used for food.
pub const GLYPH_FOOD: &str = "●";

/// Terminal columns per grid cell so cells render roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Cells per side of the default board.
pub const DEFAULT_TILE_COUNT: u16 = 20;

/// Smallest accepted board.
pub const MIN_TILE_COUNT: u16 = 5;

/// Obstacles generated at the start of each game.
pub const DEFAULT_OBSTACLE_COUNT: usize = 5;

/// Tick interval multiplier while a speed boost is active.
pub const SPEED_BOOST_FACTOR: f64 = 0.8;

/// Real-time length of a speed boost.
pub const SPEED_BOOST_DURATION: Duration = Duration::from_secs(5);

/// Tail segments removed by shrink food.
pub const SHRINK_SEGMENTS: usize = 2;

/// Shrink food never leaves the snake shorter than this.
pub const SHRINK_MIN_LENGTH: usize = 3;

/// Target frame period for input polling and redraws.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ConfigError, Difficulty, Grid, Settings, cells_per_second};

    #[test]
    fn difficulty_presets_use_slow_interval_table() {
        assert_eq!(Difficulty::Easy.tick_interval(), Duration::from_millis(500));
        assert_eq!(Difficulty::Normal.tick_interval(), Duration::from_millis(333));
        assert_eq!(Difficulty::Hard.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn cells_per_second_is_reciprocal_of_interval() {
        assert!((Difficulty::Easy.cells_per_second() - 2.0).abs() < 1e-9);
        assert!((Difficulty::Hard.cells_per_second() - 4.0).abs() < 1e-9);
        assert!(cells_per_second(Duration::ZERO).abs() < f64::EPSILON);
    }

    #[test]
    fn difficulty_cycles_through_all_presets() {
        let mut difficulty = Difficulty::Easy;
        for expected in [Difficulty::Normal, Difficulty::Hard, Difficulty::Easy] {
            difficulty = difficulty.next();
            assert_eq!(difficulty, expected);
        }
    }

    #[test]
    fn default_grid_centers_at_ten_ten() {
        assert_eq!(Grid::default().center(), (10, 10));
        assert_eq!(Grid::default().total_cells(), 400);
    }

    #[test]
    fn settings_reject_tiny_grid() {
        let settings = Settings {
            grid: Grid::new(3),
            ..Settings::default()
        };

        assert_eq!(
            settings.validated(),
            Err(ConfigError::GridTooSmall {
                tile_count: 3,
                min: 5
            })
        );
    }

    #[test]
    fn settings_reject_obstacles_that_fill_grid() {
        let settings = Settings {
            grid: Grid::new(5),
            obstacle_count: 23,
            ..Settings::default()
        };

        assert!(matches!(
            settings.validated(),
            Err(ConfigError::TooManyObstacles { .. })
        ));
    }

    #[test]
    fn settings_reject_obstacle_count_near_usize_max() {
        let settings = Settings {
            obstacle_count: usize::MAX,
            ..Settings::default()
        };

        assert_eq!(
            settings.validated(),
            Err(ConfigError::TooManyObstacles {
                obstacles: usize::MAX,
                cells: 400
            })
        );
    }

    #[test]
    fn default_settings_are_valid() {
        assert_eq!(Settings::default().validated(), Ok(Settings::default()));
    }
}
