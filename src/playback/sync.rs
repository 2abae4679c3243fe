// SPDX-License-Identifier: MPL-2.0
//! Audio/Video synchronization decisions.
//!
//! Audio is the reference clock. For every candidate video frame the engine
//! measures how far the tracked (video) clock is from where the reference
//! says it should be, and picks one [`ClockAction`] for the renderer.
//!
//! # Hysteresis
//!
//! The only state is a strike counter that grows while video lags by more
//! than [`LAG_TOLERANCE_SECS`]. Disruptive recovery is spaced out by modulo
//! gates on that counter:
//!
//! ```text
//!  drift (s)          action                               strikes
//!  > 10 or < -10      Advance                              unchanged
//!  [1/120, 10]        Remain                               reset
//!  [-0.1, 1/120)      Advance                              reset
//!  [-10, -0.1)        Seek     if < -8 and strikes % 100   += 1
//!                     Flush    if < -1 and strikes % 10
//!                     DropNextFrame on even strikes
//!                     Advance  otherwise
//! ```
//!
//! The engine must be asked once per candidate frame; the cadence of calls
//! sets the recovery speed.

use super::clock::{monotonic_now, PlaybackClock};
use crate::domain::playback::ClockAction;

/// Drift beyond this (either direction) is treated as a discontinuity.
pub const MAX_TRACKED_DRIFT_SECS: f64 = 10.0;

/// Video at least this far ahead holds the current frame (one 120 Hz tick).
pub const EARLY_THRESHOLD_SECS: f64 = 1.0 / 120.0;

/// Lag tolerated before strikes accumulate.
pub const LAG_TOLERANCE_SECS: f64 = 0.1;

/// Lag above which a periodic flush is issued.
pub const FLUSH_LAG_SECS: f64 = 1.0;

/// Lag above which a periodic seek is issued.
pub const SEEK_LAG_SECS: f64 = 8.0;

/// Strike periods of the escalated actions.
const SEEK_PERIOD: u32 = 100;
const FLUSH_PERIOD: u32 = 10;
const DROP_PERIOD: u32 = 2;

/// A clock action together with the drift it was decided on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncDecision {
    /// Positive when video is ahead of its schedule.
    pub drift_secs: f64,
    pub action: ClockAction,
}

/// Hysteresis state for one video stream.
///
/// Each independently synchronized stream owns its own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockSyncState {
    delay_strikes: u32,
}

impl ClockSyncState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consecutive ticks spent lagging beyond the tolerance.
    #[must_use]
    pub fn delay_strikes(&self) -> u32 {
        self.delay_strikes
    }

    /// Clears the hysteresis counter, e.g. after a seek.
    pub fn reset(&mut self) {
        self.delay_strikes = 0;
    }

    /// Advances the state machine by one tick for a measured drift.
    ///
    /// Positive drift means video is ahead of the reference.
    pub fn step(&mut self, diff: f64) -> ClockAction {
        if !(-MAX_TRACKED_DRIFT_SECS..=MAX_TRACKED_DRIFT_SECS).contains(&diff) {
            return ClockAction::Advance;
        }
        if diff >= EARLY_THRESHOLD_SECS {
            self.delay_strikes = 0;
            return ClockAction::Remain;
        }
        if diff >= -LAG_TOLERANCE_SECS {
            self.delay_strikes = 0;
            return ClockAction::Advance;
        }

        self.delay_strikes = self.delay_strikes.wrapping_add(1);
        if diff < -SEEK_LAG_SECS && self.delay_strikes % SEEK_PERIOD == 0 {
            ClockAction::Seek
        } else if diff < -FLUSH_LAG_SECS && self.delay_strikes % FLUSH_PERIOD == 0 {
            ClockAction::Flush
        } else if self.delay_strikes % DROP_PERIOD == 0 {
            ClockAction::DropNextFrame
        } else {
            ClockAction::Advance
        }
    }
}

/// Signed distance between the tracked clock and its scheduled position.
///
/// `reference_now` is the reference clock's estimate for the current tick.
#[must_use]
pub fn drift(
    reference_now: f64,
    tracked: &PlaybackClock,
    video_delay_secs: f64,
    extra_output_latency_secs: f64,
) -> f64 {
    let desired = reference_now - video_delay_secs - extra_output_latency_secs;
    tracked.next_presentation_time() - desired
}

/// Decides the action for the next video frame, reading the wall clock now.
pub fn decide(
    state: &mut ClockSyncState,
    reference: &PlaybackClock,
    tracked: &PlaybackClock,
    video_delay_secs: f64,
    extra_output_latency_secs: f64,
) -> ClockAction {
    decide_at(
        state,
        reference,
        tracked,
        video_delay_secs,
        extra_output_latency_secs,
        monotonic_now(),
    )
}

/// Decides the action for the next video frame at an explicit wall time.
pub fn decide_at(
    state: &mut ClockSyncState,
    reference: &PlaybackClock,
    tracked: &PlaybackClock,
    video_delay_secs: f64,
    extra_output_latency_secs: f64,
    wall_time: f64,
) -> ClockAction {
    measure_at(
        state,
        reference,
        tracked,
        video_delay_secs,
        extra_output_latency_secs,
        wall_time,
    )
    .action
}

/// Like [`decide_at`], also returning the measured drift.
pub fn measure_at(
    state: &mut ClockSyncState,
    reference: &PlaybackClock,
    tracked: &PlaybackClock,
    video_delay_secs: f64,
    extra_output_latency_secs: f64,
    wall_time: f64,
) -> SyncDecision {
    let drift_secs = drift(
        reference.estimated_now_at(wall_time),
        tracked,
        video_delay_secs,
        extra_output_latency_secs,
    );
    SyncDecision {
        drift_secs,
        action: state.step(drift_secs),
    }
}
