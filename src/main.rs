use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use arcade_snake::config::{
    DEFAULT_OBSTACLE_COUNT, DEFAULT_TILE_COUNT, Difficulty, FRAME_INTERVAL, Grid, Settings,
};
use arcade_snake::game::GameState;
use arcade_snake::input::{GameInput, InputHandler};
use arcade_snake::renderer;
use arcade_snake::scheduler::TickScheduler;
use arcade_snake::score::{HighScore, storage_path};
use arcade_snake::terminal_runtime::TerminalSession;
use arcade_snake::ui::hud::HudInfo;
use clap::Parser;
use log::{LevelFilter, error, info};
use simplelog::WriteLogger;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Starting difficulty; change in game with 1/2/3 or Tab.
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,

    /// Cells per side of the square board.
    #[arg(long, default_value_t = DEFAULT_TILE_COUNT)]
    tile_count: u16,

    /// Obstacles placed at the start of each game.
    #[arg(long, default_value_t = DEFAULT_OBSTACLE_COUNT)]
    obstacles: usize,

    /// Seed for a reproducible sequence of food and obstacles.
    #[arg(long)]
    seed: Option<u64>,

    /// Where the high score is stored [default: local data directory].
    #[arg(long, value_name = "PATH")]
    storage_file: Option<PathBuf>,

    /// Write a debug log to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            grid: Grid::new(self.tile_count),
            difficulty: self.difficulty,
            obstacle_count: self.obstacles,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    let settings = match cli.settings().validated() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid settings: {e}");
            return ExitCode::from(2);
        }
    };

    match run(&cli, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Terminal error: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), file)
        .map_err(io::Error::other)
}

fn run(cli: &Cli, settings: Settings) -> io::Result<()> {
    let storage = cli.storage_file.clone().unwrap_or_else(storage_path);
    let mut high_score = HighScore::load(storage);
    info!(
        "Starting: {}x{} grid, {} obstacles, {} difficulty, high score {} from {}",
        settings.grid.tile_count,
        settings.grid.tile_count,
        settings.obstacle_count,
        settings.difficulty,
        high_score.best(),
        high_score.path().display()
    );

    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(settings, seed),
        None => GameState::new(settings),
    };

    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut scheduler = TickScheduler::new(Instant::now());
    let mut reference_high_score = high_score.best();

    loop {
        let now = Instant::now();
        session.terminal_mut().draw(|frame| {
            renderer::render(
                frame,
                &state,
                HudInfo {
                    high_score: high_score.best(),
                    game_over_reference_high_score: reference_high_score,
                    now,
                },
            );
        })?;

        let timeout = if scheduler.is_halted() {
            FRAME_INTERVAL
        } else {
            scheduler
                .time_until_due(now, state.tick_interval())
                .min(FRAME_INTERVAL)
        };

        if let Some(game_input) = input.poll_input(timeout)? {
            if game_input == GameInput::Quit {
                break;
            }

            let was_over = state.is_over();
            state.apply_input(game_input);
            if was_over && !state.is_over() {
                scheduler.resume(Instant::now());
            }
        }

        let now = Instant::now();
        if scheduler.poll(now, state.tick_interval()) {
            state.tick(now);

            if state.is_over() {
                scheduler.halt();
                reference_high_score = high_score.best();
                match high_score.record_final_score(state.score) {
                    Ok(true) => info!("New high score: {}", state.score),
                    Ok(false) => {}
                    Err(e) => error!("Failed to save high score: {e}"),
                }
            }
        }
    }

    info!("Quit with high score {}", high_score.best());
    Ok(())
}
