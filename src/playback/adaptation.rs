// SPDX-License-Identifier: MPL-2.0
//! Bitrate ladder adaptation.
//!
//! Steps one rung up when the video buffer holds more than half the
//! read-ahead ceiling, one rung down otherwise. A step is only proposed
//! when the playability flag agrees with the buffering trend, and at most
//! once per half read-ahead period since the last switch.

use super::clock::monotonic_now;
use crate::domain::playback::{AdaptationState, BitrateStep};

/// Evaluates the ladder against the current wall time.
#[must_use]
pub fn evaluate(state: &AdaptationState, max_buffer_secs: f64) -> Option<BitrateStep> {
    evaluate_at(state, max_buffer_secs, monotonic_now())
}

/// Evaluates the ladder at an explicit wall time.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn evaluate_at(
    state: &AdaptationState,
    max_buffer_secs: f64,
    wall_time: f64,
) -> Option<BitrateStep> {
    let last = state.last_sample()?;
    if wall_time - last.wall_time < max_buffer_secs / 2.0 {
        return None;
    }
    let index = state.index_of(last.bitrate)?;

    let threshold = (f64::from(state.fps) * max_buffer_secs / 2.0).floor() as usize;
    let is_up = state.loaded_unit_count > threshold;
    if is_up != state.is_currently_playable {
        return None;
    }

    let ladder = state.available_bitrates();
    let target = if is_up {
        ladder.get(index + 1)
    } else {
        index.checked_sub(1).and_then(|i| ladder.get(i))
    };
    target.map(|&to| BitrateStep {
        from: last.bitrate,
        to,
    })
}
