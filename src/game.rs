use std::collections::BTreeSet;
use std::time::Duration;

use crate::config::{GameConfig, ORIGIN};
use crate::display::{Display, MessageColor};
use crate::error::Result;
use crate::food::{CellPicker, Food};
use crate::grid::{Cell, GridGeometry};
use crate::input::Direction;
use crate::snake::{DeathReason, Snake};

const START_TITLE: &str = "SNAKE GAME";
const START_SUBTITLE: &str = concat!(
    "Use arrow keys to move\n",
    "Eat the red food to grow\n",
    "Press SPACE to start",
);
const GAME_OVER_TITLE: &str = "GAME OVER";
const WIN_TITLE: &str = "YOU WIN!";
const PLAY_AGAIN: &str = "[Space to Play Again]";

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GamePhase {
    Idle,
    Playing,
    GameOver,
    Won,
}

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Not playing, or the tick belonged to an earlier round.
    Ignored,
    Continue,
    GameOver(DeathReason),
    Won,
}

/// Complete mutable game state for one round.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub phase: GamePhase,
    pub tick_count: u64,
    pub death_reason: Option<DeathReason>,
}

impl GameState {
    #[must_use]
    pub fn new(start_size: usize) -> Self {
        Self {
            snake: Snake::new(ORIGIN, start_size),
            food: Food::default(),
            score: 0,
            phase: GamePhase::Idle,
            tick_count: 0,
            death_reason: None,
        }
    }

    fn restart(&mut self) {
        self.snake.reset();
        self.food = Food::default();
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.tick_count = 0;
        self.death_reason = None;
    }
}

/// Drives one game: owns the state, the display and the food picker.
///
/// Ticks are tagged with a generation that changes on every restart, so a
/// tick scheduled by an earlier round is recognised and dropped.
pub struct Simulation<D, P> {
    state: GameState,
    config: GameConfig,
    geometry: GridGeometry,
    all_cells: BTreeSet<Cell>,
    generation: u64,
    display: D,
    picker: P,
}

impl<D: Display, P: CellPicker> Simulation<D, P> {
    /// Validates `config` and builds an idle simulation.
    pub fn new(config: GameConfig, display: D, picker: P) -> Result<Self> {
        let geometry = config.validate()?;
        log::info!(
            "board {0}x{0} cells, {1}px per cell, tick every {2:?}",
            geometry.cells(),
            geometry.cell_size(),
            config.update_interval
        );

        Ok(Self {
            state: GameState::new(config.start_size),
            all_cells: geometry.all_cells(),
            config,
            geometry,
            generation: 0,
            display,
            picker,
        })
    }

    /// Draws the title screen shown before the first round.
    pub fn show_start_screen(&mut self) {
        self.display.show_message(START_TITLE, START_SUBTITLE, MessageColor::White);
    }

    /// Starts a new round unless one is already running.
    ///
    /// Returns true when a round was started.
    pub fn on_start_input(&mut self) -> bool {
        if self.state.phase == GamePhase::Playing {
            log::debug!("start ignored, round {} in progress", self.generation);
            return false;
        }

        self.generation += 1;
        self.state.restart();
        self.display.clear_message();
        self.place_food();
        self.render_snake();
        self.display.update_score(self.state.score);
        self.display.schedule_tick(Duration::ZERO, self.generation);

        log::info!("round {} started", self.generation);
        true
    }

    /// Buffers a turn for the next tick. Ignored outside a round.
    pub fn on_direction_input(&mut self, direction: Direction) {
        if self.state.phase != GamePhase::Playing {
            log::debug!("direction {direction:?} ignored in {:?}", self.state.phase);
            return;
        }

        self.state.snake.request_direction(direction);
    }

    /// Timer callback. Runs a tick for the current round and schedules the
    /// next one while the round continues.
    pub fn on_tick(&mut self, generation: u64) -> TickOutcome {
        if generation != self.generation || self.state.phase != GamePhase::Playing {
            log::debug!(
                "stale tick for round {generation} dropped (current {}, {:?})",
                self.generation,
                self.state.phase
            );
            return TickOutcome::Ignored;
        }

        let outcome = self.tick();
        if outcome == TickOutcome::Continue {
            self.display.schedule_tick(self.config.update_interval, self.generation);
        }
        outcome
    }

    /// Advances the simulation by one step. Does not schedule anything.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.phase != GamePhase::Playing {
            return TickOutcome::Ignored;
        }

        self.state.tick_count += 1;
        let head = self.state.snake.advance();

        if self.state.food.is_at(head) {
            self.state.score += 1;
            self.display.update_score(self.state.score);

            if self.state.snake.len() >= self.geometry.capacity() {
                self.render_snake();
                return self.win();
            }

            self.place_food();
        } else {
            self.state.snake.trim_tail();
        }

        self.render_snake();

        if let Some(reason) = self.state.snake.collision(&self.geometry) {
            return self.game_over(reason);
        }

        TickOutcome::Continue
    }

    fn win(&mut self) -> TickOutcome {
        self.state.phase = GamePhase::Won;
        self.state.food = Food::default();
        self.display.clear_food();
        self.display.show_message(WIN_TITLE, PLAY_AGAIN, MessageColor::Green);

        log::info!(
            "round {} won with score {} after {} ticks",
            self.generation,
            self.state.score,
            self.state.tick_count
        );
        TickOutcome::Won
    }

    fn game_over(&mut self, reason: DeathReason) -> TickOutcome {
        self.state.phase = GamePhase::GameOver;
        self.state.death_reason = Some(reason);
        self.display.show_message(GAME_OVER_TITLE, PLAY_AGAIN, MessageColor::Red);

        log::info!(
            "round {} over ({reason:?}) with score {}",
            self.generation,
            self.state.score
        );
        TickOutcome::GameOver(reason)
    }

    fn place_food(&mut self) {
        let occupied = self.state.snake.occupied();
        match self.state.food.place(&occupied, &self.all_cells, &mut self.picker) {
            Some(position) => self.display.render_food(position),
            None => self.display.clear_food(),
        }
    }

    fn render_snake(&mut self) {
        let segments: Vec<Cell> = self.state.snake.segments().copied().collect();
        self.display.render_snake(&segments);
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access to the round state, for hosts that stage positions.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Round counter carried by scheduled ticks.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::GameConfig;
    use crate::display::{Display, MessageColor};
    use crate::error::ConfigError;
    use crate::food::{CellPicker, Food};
    use crate::grid::Cell;
    use crate::input::Direction;
    use crate::snake::{DeathReason, Snake};

    use super::{GamePhase, Simulation, TickOutcome};

    #[derive(Debug, Default)]
    struct RecordingDisplay {
        snake: Vec<Cell>,
        food: Option<Cell>,
        message: Option<(String, MessageColor)>,
        score: u32,
        scheduled: Vec<(Duration, u64)>,
    }

    impl Display for RecordingDisplay {
        fn render_snake(&mut self, segments: &[Cell]) {
            self.snake = segments.to_vec();
        }

        fn render_food(&mut self, position: Cell) {
            self.food = Some(position);
        }

        fn clear_food(&mut self) {
            self.food = None;
        }

        fn show_message(&mut self, title: &str, _subtitle: &str, color: MessageColor) {
            self.message = Some((title.to_owned(), color));
        }

        fn clear_message(&mut self) {
            self.message = None;
        }

        fn update_score(&mut self, score: u32) {
            self.score = score;
        }

        fn schedule_tick(&mut self, after: Duration, generation: u64) {
            self.scheduled.push((after, generation));
        }
    }

    /// Always takes the first free cell in column-major order.
    struct FirstFree;

    impl CellPicker for FirstFree {
        fn pick_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn simulation(cells: u16) -> Simulation<RecordingDisplay, FirstFree> {
        Simulation::new(
            GameConfig::with_cells(cells),
            RecordingDisplay::default(),
            FirstFree,
        )
        .expect("test config is valid")
    }

    #[test]
    fn new_simulation_is_idle_and_ignores_ticks() {
        let mut sim = simulation(4);

        assert_eq!(sim.phase(), GamePhase::Idle);
        assert_eq!(sim.tick(), TickOutcome::Ignored);
        assert!(sim.display().scheduled.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_before_any_state() {
        let result = Simulation::new(
            GameConfig::with_cells(3),
            RecordingDisplay::default(),
            FirstFree,
        );

        assert_eq!(result.err(), Some(ConfigError::OddCells(3)));
    }

    #[test]
    fn start_screen_is_white() {
        let mut sim = simulation(4);
        sim.show_start_screen();

        let (title, color) = sim.display().message.clone().expect("message shown");
        assert_eq!(title, "SNAKE GAME");
        assert_eq!(color, MessageColor::White);
    }

    #[test]
    fn start_resets_round_and_schedules_first_tick() {
        let mut sim = simulation(4);
        sim.show_start_screen();

        assert!(sim.on_start_input());

        let state = sim.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.direction(), Direction::Down);
        assert_eq!(state.food.position, Some(Cell::new(0, 1)));

        let display = sim.display();
        assert_eq!(display.snake, vec![Cell::new(0, 0); 3]);
        assert_eq!(display.food, Some(Cell::new(0, 1)));
        assert_eq!(display.message, None);
        assert_eq!(display.scheduled, vec![(Duration::ZERO, 1)]);
    }

    #[test]
    fn start_while_playing_changes_nothing() {
        let mut sim = simulation(4);
        sim.on_start_input();
        sim.state_mut().food = Food::at(Cell::new(2, 2));
        sim.on_tick(1);

        let score = sim.state().score;
        let body: Vec<Cell> = sim.state().snake.segments().copied().collect();
        let food = sim.state().food;

        assert!(!sim.on_start_input());
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.state().score, score);
        assert_eq!(
            sim.state().snake.segments().copied().collect::<Vec<_>>(),
            body
        );
        assert_eq!(sim.state().food, food);
    }

    #[test]
    fn plain_tick_moves_without_growth() {
        let mut sim = simulation(4);
        sim.on_start_input();
        sim.state_mut().food = Food::at(Cell::new(3, 3));

        assert_eq!(sim.on_tick(1), TickOutcome::Continue);

        assert_eq!(sim.state().snake.head(), Cell::new(0, 1));
        assert_eq!(sim.state().snake.len(), 3);
        assert_eq!(sim.state().score, 0);
        assert_eq!(
            sim.display().scheduled.last(),
            Some(&(Duration::from_millis(180), 1))
        );
    }

    #[test]
    fn eating_grows_by_one_and_scores_one() {
        let mut sim = simulation(4);
        sim.on_start_input();

        assert_eq!(sim.on_tick(1), TickOutcome::Continue);

        let state = sim.state();
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        let food = state.food.position.expect("food relocated");
        assert!(!state.snake.occupies(food));
        assert_eq!(sim.display().score, 1);
    }

    #[test]
    fn running_into_the_wall_ends_the_round() {
        let mut sim = simulation(4);
        sim.on_start_input();

        // FirstFree keeps dropping food straight down the first column.
        for _ in 0..3 {
            assert_eq!(sim.on_tick(1), TickOutcome::Continue);
        }
        let scheduled = sim.display().scheduled.len();

        assert_eq!(
            sim.on_tick(1),
            TickOutcome::GameOver(DeathReason::WallCollision)
        );
        assert_eq!(sim.phase(), GamePhase::GameOver);
        assert_eq!(sim.state().score, 3);
        assert_eq!(sim.state().death_reason, Some(DeathReason::WallCollision));
        assert_eq!(sim.display().scheduled.len(), scheduled);

        let (title, color) = sim.display().message.clone().expect("message shown");
        assert_eq!(title, "GAME OVER");
        assert_eq!(color, MessageColor::Red);
    }

    #[test]
    fn left_from_origin_hits_the_wall() {
        let mut sim = simulation(4);
        sim.on_start_input();
        sim.state_mut().snake = Snake::new(Cell::new(0, 0), 3);
        sim.on_direction_input(Direction::Left);

        assert_eq!(
            sim.on_tick(1),
            TickOutcome::GameOver(DeathReason::WallCollision)
        );
    }

    #[test]
    fn self_collision_ends_the_round() {
        let mut sim = simulation(6);
        sim.on_start_input();
        sim.state_mut().food = Food::at(Cell::new(5, 5));
        sim.state_mut().snake = Snake::from_segments(
            vec![
                Cell::new(2, 2),
                Cell::new(1, 2),
                Cell::new(1, 3),
                Cell::new(2, 3),
                Cell::new(3, 3),
                Cell::new(3, 2),
            ],
            Direction::Right,
        );
        sim.on_direction_input(Direction::Down);

        assert_eq!(
            sim.on_tick(1),
            TickOutcome::GameOver(DeathReason::SelfCollision)
        );
    }

    #[test]
    fn filling_the_board_wins() {
        let mut sim = simulation(2);
        sim.on_start_input();
        assert_eq!(sim.state().food.position, Some(Cell::new(0, 1)));
        let scheduled = sim.display().scheduled.len();

        assert_eq!(sim.on_tick(1), TickOutcome::Won);

        assert_eq!(sim.phase(), GamePhase::Won);
        assert_eq!(sim.state().snake.len(), 4);
        assert_eq!(sim.state().score, 1);
        assert_eq!(sim.state().food.position, None);
        assert_eq!(sim.display().food, None);
        assert_eq!(sim.display().scheduled.len(), scheduled);

        let (title, color) = sim.display().message.clone().expect("message shown");
        assert_eq!(title, "YOU WIN!");
        assert_eq!(color, MessageColor::Green);
    }

    #[test]
    fn stale_tick_from_previous_round_is_dropped() {
        let mut sim = simulation(4);
        sim.on_start_input();
        while sim.on_tick(1) == TickOutcome::Continue {}

        assert!(sim.on_start_input());
        assert_eq!(sim.generation(), 2);

        assert_eq!(sim.on_tick(1), TickOutcome::Ignored);
        assert_eq!(sim.state().tick_count, 0);
        assert_eq!(sim.state().snake.head(), Cell::new(0, 0));

        assert_eq!(sim.on_tick(2), TickOutcome::Continue);
        assert_eq!(sim.state().tick_count, 1);
    }

    #[test]
    fn direction_input_is_ignored_when_not_playing() {
        let mut sim = simulation(4);
        sim.on_direction_input(Direction::Right);

        assert_eq!(sim.state().snake.pending_direction(), None);
    }

    #[test]
    fn reversal_input_during_round_is_dropped() {
        let mut sim = simulation(4);
        sim.on_start_input();
        sim.on_direction_input(Direction::Up);

        assert_eq!(sim.state().snake.pending_direction(), None);
        sim.on_tick(1);
        assert_eq!(sim.state().snake.direction(), Direction::Down);
    }
}
