//! Gesture action dispatcher.
//!
//! Turns the per-frame [`GestureSignal`] into at most one [`Action`] per frame.
//! A held pinch is a continuous volume control, rate limited by a short
//! cooldown. An open palm is a discrete play/pause toggle, gated by a longer
//! cooldown and edge latched so a held palm fires only once.
//!
//! The dispatcher never reads a clock. Callers pass a monotonic millisecond
//! timestamp with every evaluation, which keeps [`dispatch`] a pure function of
//! its inputs.

use crate::{
    classifier::GestureSignal,
    constants::{TOGGLE_COOLDOWN_MS, VOLUME_COOLDOWN_MS, VOLUME_DEAD_ZONE_PX},
};
use log::debug;
use std::fmt;

/// Command emitted by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Raise system volume one step
    VolumeUp,
    /// Lower system volume one step
    VolumeDown,
    /// Toggle media playback
    PlayPauseToggle,
    /// Nothing to do this frame
    #[default]
    None,
}

impl Action {
    /// Human readable label for overlays and logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::VolumeUp => "Volume Up",
            Self::VolumeDown => "Volume Down",
            Self::PlayPauseToggle => "Play/Pause",
            Self::None => "",
        }
    }

    /// True for every variant except [`Action::None`]
    #[must_use]
    pub const fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            other => f.write_str(other.label()),
        }
    }
}

/// State carried between dispatcher evaluations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatcherState {
    /// Timestamp of the last emitted action, `None` before the first one
    pub last_action_ms: Option<u64>,
    /// An open palm has already been consumed and must close before re-firing
    pub palm_latched: bool,
}

impl DispatcherState {
    /// Fresh state: no action emitted yet, palm unlatched
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_action_ms: None,
            palm_latched: false,
        }
    }

    /// State whose last action happened at `timestamp_ms`
    #[must_use]
    pub const fn with_last_action(timestamp_ms: u64) -> Self {
        Self {
            last_action_ms: Some(timestamp_ms),
            palm_latched: false,
        }
    }

    /// True when strictly more than `cooldown_ms` has passed since the last action
    #[must_use]
    pub fn cooldown_elapsed(&self, now_ms: u64, cooldown_ms: u64) -> bool {
        self.last_action_ms
            .map_or(true, |last| now_ms.saturating_sub(last) > cooldown_ms)
    }
}

/// Volume action for an index tip row, or `None` inside the dead zone
#[must_use]
pub const fn volume_action(index_tip_pixel_y: i32, mid_y: i32) -> Action {
    if index_tip_pixel_y < mid_y.saturating_sub(VOLUME_DEAD_ZONE_PX) {
        Action::VolumeUp
    } else if index_tip_pixel_y > mid_y.saturating_add(VOLUME_DEAD_ZONE_PX) {
        Action::VolumeDown
    } else {
        Action::None
    }
}

/// Evaluate one frame.
///
/// Returns the updated state and the action to execute. Pinching takes
/// priority over palm detection and always clears the palm latch.
#[must_use]
pub fn dispatch(state: DispatcherState, signal: &GestureSignal, now_ms: u64) -> (DispatcherState, Action) {
    let mut next = state;

    if signal.is_pinching {
        next.palm_latched = false;

        if !state.cooldown_elapsed(now_ms, VOLUME_COOLDOWN_MS) {
            return (next, Action::None);
        }

        let action = volume_action(signal.index_tip_pixel_y, signal.mid_y);
        if action.is_some() {
            next.last_action_ms = Some(now_ms);
        }
        return (next, action);
    }

    match (signal.is_palm_open, state.palm_latched) {
        (true, false) => {
            // The edge is consumed even when the cooldown suppresses the toggle.
            next.palm_latched = true;
            if state.cooldown_elapsed(now_ms, TOGGLE_COOLDOWN_MS) {
                next.last_action_ms = Some(now_ms);
                (next, Action::PlayPauseToggle)
            } else {
                debug!("Open palm at {now_ms} ms suppressed by cooldown");
                (next, Action::None)
            }
        }
        (false, true) => {
            next.palm_latched = false;
            (next, Action::None)
        }
        _ => (next, Action::None),
    }
}

/// Owns a [`DispatcherState`] across frames
#[derive(Debug, Default)]
pub struct GestureDispatcher {
    state: DispatcherState,
}

impl GestureDispatcher {
    /// Create a dispatcher in the initial state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DispatcherState::new(),
        }
    }

    /// Create a dispatcher resuming from an existing state
    #[must_use]
    pub const fn with_state(state: DispatcherState) -> Self {
        Self { state }
    }

    /// Evaluate one frame and keep the resulting state
    pub fn update(&mut self, signal: &GestureSignal, now_ms: u64) -> Action {
        let (next, action) = dispatch(self.state, signal, now_ms);
        self.state = next;
        action
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> DispatcherState {
        self.state
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        self.state = DispatcherState::new();
    }
}
