// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

/// Event log capacity bounds (100 to 10000 events).
pub mod event_capacity_bounds {
    /// Minimum number of retained events.
    pub const MIN: usize = 100;
    /// Maximum number of retained events.
    pub const MAX: usize = 10_000;
    /// Default number of retained events.
    pub const DEFAULT: usize = 1_000;
}

/// Number of playback events kept in memory before the oldest are evicted.
///
/// ```
/// use playsync::domain::diagnostics::EventCapacity;
///
/// assert_eq!(EventCapacity::new(500).value(), 500);
/// // Out-of-range values are clamped
/// assert_eq!(EventCapacity::new(1).value(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCapacity(usize);

impl EventCapacity {
    /// Creates a new capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(event_capacity_bounds::MIN, event_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for EventCapacity {
    fn default() -> Self {
        Self(event_capacity_bounds::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_capacity_clamps() {
        assert_eq!(EventCapacity::new(0).value(), event_capacity_bounds::MIN);
        assert_eq!(EventCapacity::new(50_000).value(), event_capacity_bounds::MAX);
        assert_eq!(EventCapacity::new(2_500).value(), 2_500);
    }

    #[test]
    fn event_capacity_default() {
        assert_eq!(EventCapacity::default().value(), event_capacity_bounds::DEFAULT);
    }
}
