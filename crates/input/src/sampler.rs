//! Per-frame input reduction for terminal hosts.
//!
//! Terminals deliver key events one at a time and at arbitrary moments, but
//! the engine expects exactly one direction sample per frame. The sampler
//! buffers everything pressed since the last frame: the most recent steering
//! key becomes the frame's sample and control actions are kept in order.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, KeyCommand};
use crate::types::{ControlAction, Direction};

/// Control actions beyond this many in one frame are dropped.
pub const MAX_CONTROLS_PER_FRAME: usize = 8;

/// Everything the host needs from one frame of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub swipe: Direction,
    pub controls: ArrayVec<ControlAction, MAX_CONTROLS_PER_FRAME>,
}

#[derive(Debug, Clone, Default)]
pub struct SwipeSampler {
    pending: FrameInput,
}

impl SwipeSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a key event. Releases are ignored; auto-repeat steers like a press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        match handle_key_event(key) {
            Some(KeyCommand::Steer(direction)) => self.pending.swipe = direction,
            Some(KeyCommand::Control(action)) => {
                if key.kind == KeyEventKind::Press {
                    let _ = self.pending.controls.try_push(action);
                }
            }
            None => {}
        }
    }

    /// Take this frame's input and start a fresh frame.
    pub fn take_frame(&mut self) -> FrameInput {
        std::mem::take(&mut self.pending)
    }
}
