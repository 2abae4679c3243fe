// SPDX-License-Identifier: MPL-2.0
//! Playback clocks.
//!
//! A [`PlaybackClock`] remembers the last decoded position together with the
//! wall time at which it was written, and extrapolates the current media
//! position from the elapsed wall time. One instance tracks the reference
//! (audio) path, another the tracked (video) path.
//!
//! Clocks are plain values with a single writer. Readers on another thread
//! must receive them through a synchronization point (channel, lock).

use std::sync::OnceLock;
use std::time::Instant;

/// Reference instant for converting `Instant` readings to seconds.
static REFERENCE_INSTANT: OnceLock<Instant> = OnceLock::new();

/// Monotonic wall-clock reading in seconds since the process-wide reference.
#[must_use]
pub fn monotonic_now() -> f64 {
    let reference = REFERENCE_INSTANT.get_or_init(Instant::now);
    reference.elapsed().as_secs_f64()
}

/// Media clock extrapolated from the last stored position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackClock {
    last_sample_wall_time: f64,
    position_time: f64,
    duration: f64,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackClock {
    /// Creates a clock at position zero, stamped now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0.0, monotonic_now())
    }

    /// Creates a clock at `position`, stamped at `wall_time`.
    #[must_use]
    pub fn starting_at(position: f64, wall_time: f64) -> Self {
        Self {
            last_sample_wall_time: wall_time,
            position_time: position,
            duration: 0.0,
        }
    }

    /// Stores a new position and stamps it with the current wall time.
    pub fn set_position(&mut self, value: f64) {
        self.set_position_at(value, monotonic_now());
    }

    /// Stores a new position stamped with an explicit wall time.
    pub fn set_position_at(&mut self, value: f64, wall_time: f64) {
        self.position_time = value;
        self.last_sample_wall_time = wall_time;
    }

    /// Records the duration of the unit presented at the current position.
    ///
    /// Does not restamp the wall time.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    #[must_use]
    pub fn position_time(&self) -> f64 {
        self.position_time
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn last_sample_wall_time(&self) -> f64 {
        self.last_sample_wall_time
    }

    /// Estimated media position right now.
    #[must_use]
    pub fn estimated_now(&self) -> f64 {
        self.estimated_now_at(monotonic_now())
    }

    /// Estimated media position at an explicit wall time.
    #[must_use]
    pub fn estimated_now_at(&self, wall_time: f64) -> f64 {
        self.position_time + (wall_time - self.last_sample_wall_time)
    }

    /// End of the unit presented at the current position.
    #[must_use]
    pub fn next_presentation_time(&self) -> f64 {
        self.position_time + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use std::time::Duration;

    #[test]
    fn monotonic_now_never_goes_backwards() {
        let first = monotonic_now();
        let second = monotonic_now();
        assert!(second >= first);
    }

    #[test]
    fn estimated_now_adds_elapsed_wall_time() {
        let mut clock = PlaybackClock::starting_at(0.0, 0.0);
        clock.set_position_at(12.0, 100.0);
        assert_abs_diff_eq!(clock.estimated_now_at(100.0), 12.0);
        assert_abs_diff_eq!(clock.estimated_now_at(100.5), 12.5, epsilon = 1e-9);
    }

    #[test]
    fn set_duration_keeps_stamp() {
        let mut clock = PlaybackClock::starting_at(4.0, 10.0);
        clock.set_duration(0.04);
        assert_abs_diff_eq!(clock.last_sample_wall_time(), 10.0);
        assert_abs_diff_eq!(clock.next_presentation_time(), 4.04, epsilon = 1e-9);
    }

    #[test]
    fn set_position_stamps_current_wall_time() {
        let mut clock = PlaybackClock::new();
        std::thread::sleep(Duration::from_millis(20));
        clock.set_position(5.0);
        let estimate = clock.estimated_now();
        assert!((5.0..5.5).contains(&estimate));
    }

    #[test]
    fn estimate_is_monotonic_between_stores() {
        let mut clock = PlaybackClock::new();
        clock.set_position(1.0);
        let mut previous = clock.estimated_now();
        for _ in 0..100 {
            let current = clock.estimated_now();
            assert!(current >= previous);
            previous = current;
        }
    }
}
