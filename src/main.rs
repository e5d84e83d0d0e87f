use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{DEFAULT_CELLS, GameConfig, UPDATE_INTERVAL_MS};
use grid_snake::food::RandomPicker;
use grid_snake::game::Simulation;
use grid_snake::input::{self, GameInput};
use grid_snake::renderer::TerminalDisplay;
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};

/// Longest wait for input while no tick is due, so resizes still redraw.
const IDLE_POLL: Duration = Duration::from_millis(100);

type TerminalSimulation = Simulation<TerminalDisplay, RandomPicker>;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Cells along one side of the square board (even, divides 720).
    #[arg(long, default_value_t = DEFAULT_CELLS)]
    cells: u16,

    /// Milliseconds between simulation ticks.
    #[arg(long = "interval-ms", default_value_t = UPDATE_INTERVAL_MS)]
    interval_ms: u64,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Append log records to this file (level from RUST_LOG, default info).
    /// Without it nothing is logged, since stderr is the game screen.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> GameConfig {
        GameConfig {
            update_interval: Duration::from_millis(self.interval_ms),
            ..GameConfig::with_cells(self.cells)
        }
    }

    fn picker(&self) -> RandomPicker {
        self.seed.map_or_else(RandomPicker::from_entropy, RandomPicker::seeded)
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut simulation = Simulation::new(cli.config(), TerminalDisplay::new(), cli.picker())
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    run(&mut session, &mut simulation)
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(session: &mut TerminalSession, simulation: &mut TerminalSimulation) -> io::Result<()> {
    simulation.show_start_screen();
    let geometry = simulation.geometry();

    loop {
        session.draw(simulation.display(), geometry)?;

        let timeout = simulation
            .display()
            .next_deadline()
            .map_or(IDLE_POLL, |due| {
                due.saturating_duration_since(Instant::now()).min(IDLE_POLL)
            });

        if let Some(game_input) = input::poll_input(timeout)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Start => {
                    simulation.on_start_input();
                }
                GameInput::Direction(direction) => simulation.on_direction_input(direction),
            }
        }

        for generation in simulation.display_mut().take_due_ticks(Instant::now()) {
            simulation.on_tick(generation);
        }
    }

    log::info!(
        "quit after round {} with score {}",
        simulation.generation(),
        simulation.state().score
    );
    Ok(())
}
