//! Deterministic grid Snake.
//!
//! The simulation core ([`game::Simulation`]) is front-end agnostic: it talks
//! to a [`display::Display`] for drawing and timer scheduling and receives
//! direction, start and tick events back. [`renderer::TerminalDisplay`] is the
//! terminal front end used by the binary.

pub mod config;
pub mod display;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
