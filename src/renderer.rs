use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::display::{Display, MessageColor};
use crate::grid::{Cell, GridGeometry};
use crate::ui::menu::render_message;

/// Terminal columns used to draw one grid cell, so cells look square.
const CELL_WIDTH: u16 = 2;

const GLYPH_CELL: &str = "██";

const SNAKE_COLOR: Color = Color::Rgb(0x03, 0x25, 0x4c);
const HEAD_COLOR: Color = Color::Rgb(0x11, 0x67, 0xb1);
const FOOD_COLOR: Color = Color::Rgb(0xff, 0x00, 0x00);
const BACKGROUND_COLOR: Color = Color::Black;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Message {
    title: String,
    subtitle: String,
    color: MessageColor,
}

/// A pending timer entry. Entries cannot be cancelled; the simulation
/// drops the ones whose generation is out of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledTick {
    due: Instant,
    generation: u64,
}

/// Terminal front end: keeps the last scene the simulation pushed and the
/// pending ticks it asked for.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    snake: Vec<Cell>,
    food: Option<Cell>,
    message: Option<Message>,
    score: u32,
    timers: Vec<ScheduledTick>,
}

impl TerminalDisplay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest pending tick deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    /// Removes and returns the generations of every tick due at `now`,
    /// earliest first.
    pub fn take_due_ticks(&mut self, now: Instant) -> Vec<u64> {
        let mut due: Vec<ScheduledTick> = Vec::new();
        self.timers.retain(|timer| {
            if timer.due <= now {
                due.push(*timer);
                false
            } else {
                true
            }
        });

        due.sort_by_key(|timer| timer.due);
        due.into_iter().map(|timer| timer.generation).collect()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Renders the full frame from the recorded scene.
    pub fn render(&self, frame: &mut Frame<'_>, geometry: GridGeometry) {
        let area = frame.area();
        frame.render_widget(Block::new().style(Style::new().bg(BACKGROUND_COLOR)), area);

        let cells = geometry.cells();
        let board_width = cells.saturating_mul(CELL_WIDTH).saturating_add(2);
        let board_height = cells.saturating_add(2);

        // Score is pinned to the top row so overlays never cover it.
        let [score_row, play_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        let [board_row] = Layout::vertical([Constraint::Length(board_height)])
            .flex(Flex::Center)
            .areas(play_area);
        let [board_area] = Layout::horizontal([Constraint::Length(board_width)])
            .flex(Flex::Center)
            .areas(board_row);

        frame.render_widget(
            Paragraph::new(Line::from(format!("Score: {}", self.score)))
                .alignment(Alignment::Center)
                .style(Style::new().fg(Color::White)),
            score_row,
        );

        let block = Block::bordered().border_style(Style::new().fg(Color::DarkGray));
        let inner = block.inner(board_area);
        frame.render_widget(block, board_area);

        if let Some(food) = self.food {
            draw_cell(frame, inner, geometry, food, Style::new().fg(FOOD_COLOR));
        }
        self.draw_snake(frame, inner, geometry);

        if let Some(message) = &self.message {
            render_message(
                frame,
                play_area,
                &message.title,
                &message.subtitle,
                message_color(message.color),
            );
        }
    }

    fn draw_snake(&self, frame: &mut Frame<'_>, inner: Rect, geometry: GridGeometry) {
        // Tail first so the head wins when segments are stacked.
        for (index, segment) in self.snake.iter().enumerate().rev() {
            let style = if index == 0 {
                Style::new().fg(HEAD_COLOR).add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(SNAKE_COLOR)
            };
            draw_cell(frame, inner, geometry, *segment, style);
        }
    }
}

impl Display for TerminalDisplay {
    fn render_snake(&mut self, segments: &[Cell]) {
        self.snake.clear();
        self.snake.extend_from_slice(segments);
    }

    fn render_food(&mut self, position: Cell) {
        self.food = Some(position);
    }

    fn clear_food(&mut self) {
        self.food = None;
    }

    fn show_message(&mut self, title: &str, subtitle: &str, color: MessageColor) {
        self.message = Some(Message {
            title: title.to_owned(),
            subtitle: subtitle.to_owned(),
            color,
        });
    }

    fn clear_message(&mut self) {
        self.message = None;
    }

    fn update_score(&mut self, score: u32) {
        self.score = score;
    }

    fn schedule_tick(&mut self, after: Duration, generation: u64) {
        self.timers.push(ScheduledTick {
            due: Instant::now() + after,
            generation,
        });
    }
}

fn message_color(color: MessageColor) -> Color {
    match color {
        MessageColor::White => Color::White,
        MessageColor::Red => Color::Red,
        MessageColor::Green => Color::Green,
    }
}

fn draw_cell(
    frame: &mut Frame<'_>,
    inner: Rect,
    geometry: GridGeometry,
    cell: Cell,
    style: Style,
) {
    let Some((x, y)) = logical_to_terminal(inner, geometry, cell) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, GLYPH_CELL, style);
}

fn logical_to_terminal(inner: Rect, geometry: GridGeometry, cell: Cell) -> Option<(u16, u16)> {
    if !geometry.is_in_bounds(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.column).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(cell.row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
