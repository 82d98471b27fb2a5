//! Simulation engine - owns the board and runs the tick transition
//!
//! The engine ties together the grid, the snake, the fruit spawner and the
//! input buffer. It exposes a three-state lifecycle:
//!
//! ```text
//!            start()                 toggle_pause()
//! Stopped ───────────▶ Running ◀──────────────────▶ Paused
//!    ▲                    │                           │
//!    └──── collision ─────┘                           │
//!    └──────────────────── stop() ────────────────────┘
//! ```
//!
//! Time is passed in by the host as a monotonic [`Duration`] since an
//! arbitrary epoch, so tests can drive the clock explicitly. The host calls
//! [`SimulationEngine::frame`] once per frame with that frame's input sample;
//! the input is folded into the buffer every frame but the board only moves
//! when the scheduled tick time has been reached.

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::error::{EngineError, SpawnError};
use crate::events::{dispatch, EngineEvent, GameListener, RenderSurface, RunEnd};
use crate::grid::Grid;
use crate::input_buffer::InputBuffer;
use crate::ledger::ScoreLedger;
use crate::snake::Snake;
use crate::snapshot::GameSnapshot;
use crate::spawner::FruitSpawner;
use crate::types::{
    clamp_tick_rate, speed_tier, CellState, Coord, Direction, DEFAULT_TICKS_PER_SECOND,
    FADED_ALPHA, START, START_DIRECTION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused => "paused",
        }
    }
}

/// Result of one tick transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Committed direction is `None`; nothing moved
    Idle,
    Moved,
    AteFruit { score: u32 },
    /// The run is over and the engine is back in `Stopped`
    Ended { reason: RunEnd, score: u32 },
}

#[derive(Debug, Clone)]
pub struct SimulationEngine {
    grid: Grid,
    snake: Snake,
    fruit: Option<Coord>,
    input: InputBuffer,
    spawner: FruitSpawner,
    state: RunState,
    score: u32,
    ticks_per_second: f32,
    tick_interval: Duration,
    next_tick_at: Duration,
    paused_at: Option<Duration>,
    /// Monotonic run id (increments on every start).
    run_id: u32,
    /// Ticks executed in the current run.
    tick_count: u64,
    /// Pending events. Hosts drain them after every frame with `publish` or
    /// `drain_events`; only `start` trims what a new run supersedes.
    events: Vec<EngineEvent>,
}

impl SimulationEngine {
    /// Create a stopped engine with the given fruit RNG seed
    pub fn new(seed: u32) -> Self {
        let ticks_per_second = DEFAULT_TICKS_PER_SECOND;

        Self {
            grid: Grid::new(),
            snake: Snake::default(),
            fruit: None,
            input: InputBuffer::new(START_DIRECTION),
            spawner: FruitSpawner::new(seed),
            state: RunState::Stopped,
            score: 0,
            ticks_per_second,
            tick_interval: interval_for(ticks_per_second),
            next_tick_at: Duration::ZERO,
            paused_at: None,
            run_id: 0,
            tick_count: 0,
            events: vec![EngineEvent::ResetAll, EngineEvent::FadeAll(FADED_ALPHA)],
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    /// Score of the current run (or of the last finished run while stopped)
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks_per_second(&self) -> f32 {
        self.ticks_per_second
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Score bucket of the active (or last) run
    pub fn tier(&self) -> u32 {
        speed_tier(self.ticks_per_second)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Option<Coord> {
        self.fruit
    }

    pub fn committed_direction(&self) -> Direction {
        self.input.committed()
    }

    pub fn run_id(&self) -> u32 {
        self.run_id
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn next_tick_at(&self) -> Duration {
        self.next_tick_at
    }

    /// Stopped → Running. Returns false if a run is already active.
    ///
    /// The tick rate is clamped and fixed for the whole run; the first tick
    /// fires one interval after `now`.
    pub fn start(&mut self, ticks_per_second: f32, now: Duration) -> bool {
        if self.state != RunState::Stopped {
            return false;
        }

        self.ticks_per_second = clamp_tick_rate(ticks_per_second);
        self.tick_interval = interval_for(self.ticks_per_second);
        self.next_tick_at = now + self.tick_interval;
        self.paused_at = None;
        self.run_id = self.run_id.wrapping_add(1);
        self.tick_count = 0;
        self.score = 0;

        self.grid.clear();
        self.fruit = None;
        self.snake.reset(START);
        self.input.reset(START_DIRECTION);
        self.state = RunState::Running;

        // The reset below supersedes undrained surface and score events.
        self.events
            .retain(|e| matches!(e, EngineEvent::FruitEaten | EngineEvent::RunEnded { .. }));
        self.events.push(EngineEvent::ResetAll);
        self.events.push(EngineEvent::UnfadeAll);
        self.mark(START, CellState::Snake);
        let placed = self.place_fruit();
        debug_assert!(
            matches!(placed, Ok(true)),
            "a one-segment snake leaves free cells: {placed:?}"
        );
        self.events.push(EngineEvent::ScoreChanged(0));

        info!(
            run_id = self.run_id,
            ticks_per_second = self.ticks_per_second,
            fruit = ?self.fruit,
            "run started"
        );
        true
    }

    /// Running ⇄ Paused. Returns false while stopped.
    ///
    /// Time spent paused is added to the tick schedule so resuming never
    /// fires an immediate catch-up tick.
    pub fn toggle_pause(&mut self, now: Duration) -> bool {
        match self.state {
            RunState::Stopped => false,
            RunState::Running => {
                self.state = RunState::Paused;
                self.paused_at = Some(now);
                self.events.push(EngineEvent::Paused);
                debug!(run_id = self.run_id, "paused");
                true
            }
            RunState::Paused => {
                if let Some(paused_at) = self.paused_at.take() {
                    self.next_tick_at += now.saturating_sub(paused_at);
                }
                self.state = RunState::Running;
                self.events.push(EngineEvent::Resumed);
                debug!(run_id = self.run_id, "resumed");
                true
            }
        }
    }

    /// Abandon the active run. The score accrued so far is still recorded.
    pub fn stop(&mut self, ledger: &mut ScoreLedger) -> bool {
        if self.state == RunState::Stopped {
            return false;
        }
        self.end_run(RunEnd::Abandoned, ledger);
        true
    }

    /// Per-frame entry point.
    ///
    /// Folds `swipe` into the input buffer and, if the scheduled tick time has
    /// been reached, runs one tick and schedules the next at
    /// `now + 1 / ticks_per_second`. At most one tick fires per frame.
    pub fn frame(
        &mut self,
        now: Duration,
        swipe: Direction,
        ledger: &mut ScoreLedger,
    ) -> Result<Option<TickOutcome>, EngineError> {
        if self.state != RunState::Running {
            return Ok(None);
        }

        let direction = self.input.sample(swipe, &self.snake);
        if now < self.next_tick_at {
            return Ok(None);
        }

        self.next_tick_at = now + self.tick_interval;
        self.tick(direction, ledger).map(Some)
    }

    /// Run one tick immediately, ignoring the clock.
    pub fn step(
        &mut self,
        swipe: Direction,
        ledger: &mut ScoreLedger,
    ) -> Result<TickOutcome, EngineError> {
        if self.state != RunState::Running {
            return Err(EngineError::NotRunning);
        }
        let direction = self.input.sample(swipe, &self.snake);
        self.tick(direction, ledger)
    }

    fn tick(
        &mut self,
        direction: Direction,
        ledger: &mut ScoreLedger,
    ) -> Result<TickOutcome, EngineError> {
        let head = self.snake.head().ok_or(EngineError::EmptySnake)?;
        if direction.is_none() {
            return Ok(TickOutcome::Idle);
        }

        let next = head.step(direction);
        if !self.grid.is_in_bounds(next) {
            return Ok(self.end_run(RunEnd::Wall, ledger));
        }

        let target = self.grid.cell_at(next)?;
        let ate_fruit = target == CellState::Fruit;

        // The tail cell is free this tick unless the snake grows.
        if target == CellState::Snake && self.snake.tail() != Some(next) {
            return Ok(self.end_run(RunEnd::Body, ledger));
        }

        if let Some(vacated) = self.snake.advance(next, ate_fruit) {
            self.grid.set_cell(vacated, CellState::Empty)?;
            self.events.push(EngineEvent::CellChanged {
                coord: vacated,
                state: CellState::Empty,
            });
        }
        self.grid.set_cell(next, CellState::Snake)?;
        self.events.push(EngineEvent::CellChanged {
            coord: next,
            state: CellState::Snake,
        });
        self.tick_count += 1;

        trace!(tick = self.tick_count, ?direction, x = next.x, y = next.y, "tick");

        if !ate_fruit {
            return Ok(TickOutcome::Moved);
        }

        self.score += 1;
        self.fruit = None;
        self.events.push(EngineEvent::FruitEaten);
        self.events.push(EngineEvent::ScoreChanged(self.score));

        if !self.place_fruit()? {
            info!(run_id = self.run_id, score = self.score, "board full");
            return Ok(self.end_run(RunEnd::BoardFull, ledger));
        }

        Ok(TickOutcome::AteFruit { score: self.score })
    }

    /// Spawn and mark a new fruit. Returns false when the board is full.
    fn place_fruit(&mut self) -> Result<bool, EngineError> {
        match self.spawner.spawn(&self.grid, &self.snake) {
            Ok(coord) => {
                self.grid.set_cell(coord, CellState::Fruit)?;
                self.fruit = Some(coord);
                self.events.push(EngineEvent::CellChanged {
                    coord,
                    state: CellState::Fruit,
                });
                Ok(true)
            }
            Err(SpawnError::NoFreeCell) => Ok(false),
        }
    }

    /// Any → Stopped: record the score, clear the board, fade the surface.
    fn end_run(&mut self, reason: RunEnd, ledger: &mut ScoreLedger) -> TickOutcome {
        let tier = self.tier();
        ledger.record_run(tier, self.score);

        self.snake.clear();
        self.fruit = None;
        self.grid.clear();
        self.input.reset(START_DIRECTION);
        self.paused_at = None;
        self.state = RunState::Stopped;

        self.events.push(EngineEvent::ResetAll);
        self.events.push(EngineEvent::FadeAll(FADED_ALPHA));
        self.events.push(EngineEvent::RunEnded {
            reason,
            score: self.score,
            tier,
        });

        info!(
            run_id = self.run_id,
            reason = reason.as_str(),
            score = self.score,
            tier,
            ticks = self.tick_count,
            "run ended"
        );

        TickOutcome::Ended {
            reason,
            score: self.score,
        }
    }

    /// Replace the board contents of an active run with a prepared position.
    ///
    /// `segments` is head first. Used for scripted scenarios and tests; the
    /// current score and clock are kept.
    pub fn arrange(
        &mut self,
        segments: &[Coord],
        fruit: Option<Coord>,
        direction: Direction,
    ) -> Result<(), EngineError> {
        if self.state == RunState::Stopped {
            return Err(EngineError::NotRunning);
        }
        if segments.is_empty() {
            return Err(EngineError::EmptySnake);
        }

        let mut grid = Grid::new();
        for &coord in segments {
            if grid.cell_at(coord)? == CellState::Snake {
                return Err(EngineError::InvalidPosition("snake overlaps itself"));
            }
            grid.set_cell(coord, CellState::Snake)?;
        }
        if let Some(coord) = fruit {
            if grid.cell_at(coord)? != CellState::Empty {
                return Err(EngineError::InvalidPosition("fruit on the snake"));
            }
            grid.set_cell(coord, CellState::Fruit)?;
        }

        self.grid = grid;
        self.snake = Snake::from_segments(segments.iter().copied());
        self.fruit = fruit;
        self.input.reset(direction);

        self.events.push(EngineEvent::ResetAll);
        for (coord, state) in self.grid.iter().filter(|(_, s)| *s != CellState::Empty) {
            self.events.push(EngineEvent::CellChanged { coord, state });
        }
        Ok(())
    }

    /// Callers only mark cells the snake or spawner produced, all on the board.
    fn mark(&mut self, coord: Coord, state: CellState) {
        let written = self.grid.set_cell(coord, state);
        debug_assert!(written.is_ok(), "marked off the board: {written:?}");
        if written.is_ok() {
            self.events.push(EngineEvent::CellChanged { coord, state });
        }
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, EngineEvent> {
        self.events.drain(..)
    }

    pub fn pending_events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Drain pending events into the rendering surface and listener.
    pub fn publish<S, L>(&mut self, surface: &mut S, listener: &mut L)
    where
        S: RenderSurface + ?Sized,
        L: GameListener + ?Sized,
    {
        dispatch(self.events.drain(..), surface, listener);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.board);
        out.snake.clear();
        out.snake.extend(self.snake.iter());
        out.fruit = self.fruit;
        out.state = self.state;
        out.direction = self.input.committed();
        out.score = self.score;
        out.ticks_per_second = self.ticks_per_second;
        out.tier = self.tier();
        out.run_id = self.run_id;
        out.tick = self.tick_count;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(1)
    }
}

fn interval_for(ticks_per_second: f32) -> Duration {
    Duration::from_secs_f32(1.0 / ticks_per_second)
}
