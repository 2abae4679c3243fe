// SPDX-License-Identifier: MPL-2.0
//! Playback tuning newtypes.
//!
//! This module provides type-safe wrappers for buffering and sync tuning
//! values, ensuring they are always within valid ranges.

// =============================================================================
// ForwardBufferSecs
// =============================================================================

/// Forward buffer target bounds (0.5 to 60 seconds).
pub mod forward_buffer_bounds {
    /// Minimum forward buffer target in seconds.
    pub const MIN: f64 = 0.5;
    /// Maximum forward buffer target in seconds.
    pub const MAX: f64 = 60.0;
    /// Default forward buffer target in seconds.
    pub const DEFAULT: f64 = 3.0;
}

/// Seconds of media that must be buffered before playback is considered
/// smooth, guaranteed to be within 0.5 to 60 seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardBufferSecs(f64);

impl ForwardBufferSecs {
    /// Creates a new forward buffer target, clamping to valid range.
    #[must_use]
    pub fn new(secs: f64) -> Self {
        Self(secs.clamp(forward_buffer_bounds::MIN, forward_buffer_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ForwardBufferSecs {
    fn default() -> Self {
        Self(forward_buffer_bounds::DEFAULT)
    }
}

// =============================================================================
// MaxBufferSecs
// =============================================================================

/// Maximum read-ahead bounds (1 to 600 seconds).
pub mod max_buffer_bounds {
    /// Minimum read-ahead ceiling in seconds.
    pub const MIN: f64 = 1.0;
    /// Maximum read-ahead ceiling in seconds.
    pub const MAX: f64 = 600.0;
    /// Default read-ahead ceiling in seconds.
    pub const DEFAULT: f64 = 30.0;
}

/// Read-ahead ceiling in seconds. Reading pauses above it, resumes below
/// half of it, and the bitrate ladder is re-evaluated every half period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxBufferSecs(f64);

impl MaxBufferSecs {
    /// Creates a new read-ahead ceiling, clamping to valid range.
    #[must_use]
    pub fn new(secs: f64) -> Self {
        Self(secs.clamp(max_buffer_bounds::MIN, max_buffer_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Half of the ceiling, the resume threshold.
    #[must_use]
    pub fn half(self) -> f64 {
        self.0 / 2.0
    }
}

impl Default for MaxBufferSecs {
    fn default() -> Self {
        Self(max_buffer_bounds::DEFAULT)
    }
}

// =============================================================================
// VideoDelaySecs
// =============================================================================

/// Manual video delay bounds (-10 to +10 seconds).
pub mod video_delay_bounds {
    pub const MIN: f64 = -10.0;
    pub const MAX: f64 = 10.0;
    pub const DEFAULT: f64 = 0.0;
}

/// User-configured offset subtracted from the reference clock when
/// scheduling video. Positive values present video later.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VideoDelaySecs(f64);

impl VideoDelaySecs {
    /// Creates a new video delay, clamping to valid range.
    #[must_use]
    pub fn new(secs: f64) -> Self {
        Self(secs.clamp(video_delay_bounds::MIN, video_delay_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

// =============================================================================
// Tests
// =============================================================================
