//! Grid snake arcade game.
//!
//! The simulation core ([`game`], [`spawner`], [`collision`], [`scheduler`])
//! is free of terminal I/O and fully deterministic given a seed. The
//! remaining modules adapt it to a crossterm/ratatui terminal and persist the
//! high score.

pub mod collision;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod spawner;
pub mod terminal_runtime;
pub mod ui;
