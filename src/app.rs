//! Host composition: one engine, its score ledger, the user settings and the
//! store they persist to.
//!
//! The app owns every collaborator the simulation core deliberately does not
//! know about. It applies control actions, forwards frames to the engine and
//! checkpoints the ledger and settings at the moments a player could walk
//! away: pause, suspend, the end of a run and shutdown.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::core::{
    GameListener, KeyValueStore, RenderSurface, RunEnd, RunState, ScoreLedger, Settings,
    SimulationEngine, StoreError, TickOutcome,
};
use crate::term::StatusView;
use crate::types::{clamp_tick_rate, speed_tier, ControlAction, Direction};

pub struct App<S: KeyValueStore> {
    engine: SimulationEngine,
    ledger: ScoreLedger,
    settings: Settings,
    settings_dirty: bool,
    store: S,
    /// Tick rate forced for this session only (never persisted)
    tick_rate_override: Option<f32>,
    beep_muted: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Load ledger and settings from `store`; unreadable data falls back to defaults.
    pub fn new(store: S, seed: u32) -> Self {
        let ledger = ScoreLedger::load(&store);
        let settings = Settings::load(&store);
        info!(seed, tiers = ledger.tiers().count(), "app ready");
        Self {
            engine: SimulationEngine::new(seed),
            ledger,
            settings,
            settings_dirty: false,
            store,
            tick_rate_override: None,
            beep_muted: false,
        }
    }

    pub fn with_tick_rate_override(mut self, ticks_per_second: Option<f32>) -> Self {
        self.tick_rate_override = ticks_per_second.map(clamp_tick_rate);
        self
    }

    pub fn with_beep_muted(mut self, muted: bool) -> Self {
        self.beep_muted = muted;
        self
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tick rate the next run will start with.
    pub fn tick_rate(&self) -> f32 {
        self.tick_rate_override
            .unwrap_or(self.settings.ticks_per_second)
    }

    pub fn beep_enabled(&self) -> bool {
        self.settings.use_beep && !self.beep_muted
    }

    /// Best/average for the configured tier, for the start screen.
    pub fn status(&self) -> StatusView {
        let tier = speed_tier(self.tick_rate());
        StatusView {
            best: self.ledger.best_for(tier),
            average: self.ledger.average_for(tier),
            tier,
            use_beep: self.beep_enabled(),
        }
    }

    /// Apply a control action. Returns whether anything changed.
    pub fn apply(&mut self, action: ControlAction, now: Duration) -> bool {
        debug!(action = action.as_str(), "control");
        match action {
            ControlAction::Start => self.engine.start(self.tick_rate(), now),
            ControlAction::TogglePause => {
                let changed = self.engine.toggle_pause(now);
                if changed && self.engine.is_paused() {
                    self.checkpoint_or_warn();
                }
                changed
            }
            ControlAction::Stop => {
                let changed = self.engine.stop(&mut self.ledger);
                if changed {
                    self.checkpoint_or_warn();
                }
                changed
            }
            ControlAction::Faster => self.step_tick_rate(Settings::increment_tick_rate),
            ControlAction::Slower => self.step_tick_rate(Settings::decrement_tick_rate),
            ControlAction::ToggleBeep => {
                self.settings.use_beep = !self.settings.use_beep;
                self.settings_dirty = true;
                true
            }
        }
    }

    fn step_tick_rate(&mut self, step: fn(&mut Settings)) -> bool {
        let before = self.tick_rate();
        // Stepping from an overridden rate makes the result the persisted one.
        if let Some(rate) = self.tick_rate_override.take() {
            self.settings.set_tick_rate(rate);
        }
        step(&mut self.settings);
        self.settings_dirty = true;
        self.tick_rate() != before
    }

    /// Forward one host frame to the engine; a finished run is checkpointed.
    pub fn frame(&mut self, now: Duration, swipe: Direction) -> Result<Option<TickOutcome>> {
        let outcome = self.engine.frame(now, swipe, &mut self.ledger)?;
        if let Some(TickOutcome::Ended { reason, score }) = outcome {
            info!(reason = reason.as_str(), score, "run over");
            self.checkpoint_or_warn();
        }
        Ok(outcome)
    }

    /// Drain engine events into the render surface and listener.
    pub fn publish<R, L>(&mut self, surface: &mut R, listener: &mut L)
    where
        R: RenderSurface + ?Sized,
        L: GameListener + ?Sized,
    {
        self.engine.publish(surface, listener);
    }

    /// The host lost focus or is being backgrounded: pause and persist.
    pub fn suspend(&mut self, now: Duration) -> Result<(), StoreError> {
        if self.engine.state() == RunState::Running {
            self.engine.toggle_pause(now);
        }
        self.checkpoint()
    }

    /// Final checkpoint. An active run is ended and its score recorded first.
    pub fn shutdown(&mut self) -> Result<(), StoreError> {
        if self.engine.stop(&mut self.ledger) {
            info!("active run recorded on shutdown");
        }
        self.checkpoint()
    }

    /// Persist the ledger and settings if either changed.
    pub fn checkpoint(&mut self) -> Result<(), StoreError> {
        self.ledger.persist(&mut self.store)?;
        if self.settings_dirty {
            self.settings.save(&mut self.store)?;
            self.settings_dirty = false;
        }
        Ok(())
    }

    fn checkpoint_or_warn(&mut self) {
        if let Err(err) = self.checkpoint() {
            warn!("checkpoint failed, will retry at the next one: {err}");
        }
    }
}

/// Listener that remembers fruit pickups until the host rings the bell.
#[derive(Debug, Clone, Copy, Default)]
pub struct FruitChime {
    pending: u32,
    last_end: Option<(RunEnd, u32)>,
}

impl FruitChime {
    /// Whether any fruit was eaten since the last call.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending) > 0
    }

    pub fn last_end(&self) -> Option<(RunEnd, u32)> {
        self.last_end
    }
}

impl GameListener for FruitChime {
    fn on_fruit_eaten(&mut self) {
        self.pending += 1;
    }

    fn on_game_over(&mut self, reason: RunEnd, score: u32) {
        self.last_end = Some((reason, score));
    }
}
