use std::time::Duration;

use crate::grid::Cell;

/// Color of an overlay message.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MessageColor {
    White,
    Red,
    Green,
}

/// Everything the simulation needs from a front end.
///
/// The display owns drawing and the timer. The simulation only asks for a
/// tick to be scheduled and expects `on_tick(generation)` back when it fires.
pub trait Display {
    /// Redraws the snake. The head is `segments[0]`.
    fn render_snake(&mut self, segments: &[Cell]);

    fn render_food(&mut self, position: Cell);

    fn clear_food(&mut self);

    /// Shows a centered overlay. `subtitle` may span several lines.
    fn show_message(&mut self, title: &str, subtitle: &str, color: MessageColor);

    fn clear_message(&mut self);

    fn update_score(&mut self, score: u32);

    /// Requests one `on_tick(generation)` call after `after` has elapsed.
    fn schedule_tick(&mut self, after: Duration, generation: u64);
}
