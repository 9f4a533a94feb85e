//! Main application loop for gesture media control.
//!
//! Pulls frames from a [`PoseSource`], classifies the tracked hand, runs the
//! dispatcher and hands emitted actions to an [`ActionSink`]. This is the only
//! place that reads a clock.

use crate::{
    action_sink::ActionSink,
    classifier::classify,
    dispatcher::{Action, DispatcherState, GestureDispatcher},
    error::{Error, Result},
    overlay::status_line,
    pose_source::{Frame, PoseSource},
};
use log::{debug, info, warn};
use std::time::Instant;

/// Counters collected while running
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames accepted from the source
    pub frames: u64,
    /// Accepted frames that contained a hand
    pub hand_frames: u64,
    /// Frames rejected as malformed
    pub rejected_frames: u64,
    /// Volume up actions emitted
    pub volume_up: u64,
    /// Volume down actions emitted
    pub volume_down: u64,
    /// Play/pause toggles emitted
    pub play_pause: u64,
    /// Actions the sink failed to execute
    pub sink_failures: u64,
}

impl RunStats {
    /// Total number of emitted actions
    #[must_use]
    pub const fn actions(&self) -> u64 {
        self.volume_up + self.volume_down + self.play_pause
    }

    fn record(&mut self, action: Action) {
        match action {
            Action::VolumeUp => self.volume_up += 1,
            Action::VolumeDown => self.volume_down += 1,
            Action::PlayPauseToggle => self.play_pause += 1,
            Action::None => {}
        }
    }
}

/// Application options that are not part of the source or sink
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Log a status line per hand frame
    pub overlay: bool,
    /// Stop after this many accepted frames
    pub max_frames: Option<u64>,
}

/// Where frame times come from, fixed by the first frame of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBase {
    /// Estimator `timestamp_ms`; frames without one advance by wall time
    /// since the last stamped frame
    Estimator,
    /// Wall time since the app started; estimator stamps are ignored
    Clock,
}

/// Main application struct
pub struct GestureApp<S, K> {
    source: S,
    sink: K,
    options: AppOptions,
    dispatcher: GestureDispatcher,
    started: Instant,
    time_base: Option<TimeBase>,
    last_stamp: Option<(u64, Instant)>,
    last_timestamp_ms: u64,
    stats: RunStats,
}

impl<S: PoseSource, K: ActionSink> GestureApp<S, K> {
    /// Create a new application around a pose source and an action sink
    pub fn new(source: S, sink: K, options: AppOptions) -> Self {
        info!("Initializing gesture media control with '{}' sink", sink.name());

        Self {
            source,
            sink,
            options,
            dispatcher: GestureDispatcher::new(),
            started: Instant::now(),
            time_base: None,
            last_stamp: None,
            last_timestamp_ms: 0,
            stats: RunStats::default(),
        }
    }

    /// Run until the pose stream ends or the frame limit is reached
    ///
    /// # Errors
    ///
    /// Returns an error if reading the pose source fails. Malformed frames
    /// and sink failures are logged and skipped.
    pub fn run(&mut self) -> Result<RunStats> {
        info!("Starting main application loop");

        loop {
            if self.options.max_frames.is_some_and(|limit| self.stats.frames >= limit) {
                info!("Frame limit reached");
                break;
            }

            match self.source.next_frame() {
                Ok(Some(frame)) => {
                    self.process_frame(&frame);
                }
                Ok(None) => {
                    info!("End of pose stream reached");
                    break;
                }
                Err(e @ (Error::InvalidInput(_) | Error::PoseStream(_))) => {
                    warn!("Skipping frame: {}", e);
                    self.stats.rejected_frames += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Application shutting down: {} frames ({} with hand, {} rejected), {} actions \
             (up {}, down {}, play/pause {}), {} sink failures",
            self.stats.frames,
            self.stats.hand_frames,
            self.stats.rejected_frames,
            self.stats.actions(),
            self.stats.volume_up,
            self.stats.volume_down,
            self.stats.play_pause,
            self.stats.sink_failures,
        );

        Ok(self.stats.clone())
    }

    /// Process a single frame and return the action it produced
    pub fn process_frame(&mut self, frame: &Frame) -> Action {
        self.stats.frames += 1;
        let now_ms = self.timestamp_for(frame);

        // No hand: the dispatcher keeps its cooldown and latch untouched.
        let Some(hand) = &frame.hand else {
            return Action::None;
        };
        self.stats.hand_frames += 1;

        let signal = classify(hand, frame.size);
        let action = self.dispatcher.update(&signal, now_ms);

        if self.options.overlay {
            debug!("[{} ms] {}", now_ms, status_line(&signal, action));
        }

        if action.is_some() {
            self.stats.record(action);
            if let Err(e) = self.sink.execute(action) {
                warn!("Failed to execute {}: {}", action, e);
                self.stats.sink_failures += 1;
            }
        }

        action
    }

    /// Frame time in the run's time base, never moving backwards
    fn timestamp_for(&mut self, frame: &Frame) -> u64 {
        let base = *self.time_base.get_or_insert_with(|| {
            let base = if frame.timestamp_ms.is_some() {
                TimeBase::Estimator
            } else {
                TimeBase::Clock
            };
            info!("Using {:?} time base", base);
            base
        });

        let raw = match (base, frame.timestamp_ms) {
            (TimeBase::Estimator, Some(stamp)) => {
                self.last_stamp = Some((stamp, Instant::now()));
                stamp
            }
            (TimeBase::Estimator, None) => {
                debug!("Frame without timestamp, extrapolating from the last stamped frame");
                self.last_stamp.map_or(self.last_timestamp_ms, |(stamp, seen)| {
                    stamp.saturating_add(elapsed_ms(seen))
                })
            }
            (TimeBase::Clock, _) => elapsed_ms(self.started),
        };

        let now = raw.max(self.last_timestamp_ms);
        if now != raw {
            debug!("Clamped regressing timestamp {} to {}", raw, now);
        }
        self.last_timestamp_ms = now;
        now
    }

    /// Time base chosen for this run, once the first frame has arrived
    pub fn time_base(&self) -> Option<TimeBase> {
        self.time_base
    }

    /// Statistics collected so far
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Current dispatcher state
    pub fn dispatcher_state(&self) -> DispatcherState {
        self.dispatcher.state()
    }

    /// Action sink in use
    pub fn sink(&self) -> &K {
        &self.sink
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
