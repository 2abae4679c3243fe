// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! Bounds live next to the newtypes that enforce them in
//! [`crate::domain`]; this module re-states the defaults the settings file
//! falls back to and checks at compile time that they agree.
//!
//! # Categories
//!
//! - **Buffering**: forward buffer target and read-ahead ceiling
//! - **Sync**: video delay and output latency
//! - **Diagnostics**: event log capacity

use crate::domain::diagnostics::event_capacity_bounds;
use crate::domain::playback::newtypes::{
    forward_buffer_bounds, max_buffer_bounds, video_delay_bounds,
};

// ==========================================================================
// Buffering Defaults
// ==========================================================================

/// Seconds of media buffered before playback counts as smooth.
pub const DEFAULT_FORWARD_BUFFER_SECS: f64 = 3.0;

/// Read-ahead ceiling in seconds.
pub const DEFAULT_MAX_BUFFER_SECS: f64 = 30.0;

// ==========================================================================
// Sync Defaults
// ==========================================================================

/// Offset added to the audio clock when syncing video (seconds).
pub const DEFAULT_VIDEO_DELAY_SECS: f64 = 0.0;

/// Audio output latency compensated during video sync (seconds).
pub const DEFAULT_OUTPUT_LATENCY_SECS: f64 = 0.0;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Number of diagnostic events kept in memory.
pub const DEFAULT_EVENT_CAPACITY: usize = 1_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_FORWARD_BUFFER_SECS >= forward_buffer_bounds::MIN);
    assert!(DEFAULT_FORWARD_BUFFER_SECS <= forward_buffer_bounds::MAX);

    assert!(DEFAULT_MAX_BUFFER_SECS >= max_buffer_bounds::MIN);
    assert!(DEFAULT_MAX_BUFFER_SECS <= max_buffer_bounds::MAX);
    // Reading must not pause before the forward target is reachable.
    assert!(DEFAULT_MAX_BUFFER_SECS > DEFAULT_FORWARD_BUFFER_SECS);

    assert!(DEFAULT_VIDEO_DELAY_SECS >= video_delay_bounds::MIN);
    assert!(DEFAULT_VIDEO_DELAY_SECS <= video_delay_bounds::MAX);

    assert!(DEFAULT_OUTPUT_LATENCY_SECS >= 0.0);

    assert!(DEFAULT_EVENT_CAPACITY >= event_capacity_bounds::MIN);
    assert!(DEFAULT_EVENT_CAPACITY <= event_capacity_bounds::MAX);
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn buffering_defaults_match_domain() {
        assert_abs_diff_eq!(DEFAULT_FORWARD_BUFFER_SECS, forward_buffer_bounds::DEFAULT);
        assert_abs_diff_eq!(DEFAULT_MAX_BUFFER_SECS, max_buffer_bounds::DEFAULT);
    }

    #[test]
    fn sync_defaults_match_domain() {
        assert_abs_diff_eq!(DEFAULT_VIDEO_DELAY_SECS, video_delay_bounds::DEFAULT);
        assert_abs_diff_eq!(DEFAULT_OUTPUT_LATENCY_SECS, 0.0);
    }

    #[test]
    fn diagnostics_defaults_match_domain() {
        assert_eq!(DEFAULT_EVENT_CAPACITY, event_capacity_bounds::DEFAULT);
    }
}
