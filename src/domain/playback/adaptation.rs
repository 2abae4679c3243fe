// SPDX-License-Identifier: MPL-2.0
//! Bitrate ladder state for adaptive streaming.

/// One entry in the bitrate switch history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitrateSample {
    pub bitrate: i64,
    /// Monotonic wall time (seconds) at which the rendition became active.
    pub wall_time: f64,
}

/// A proposed ladder step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitrateStep {
    pub from: i64,
    pub to: i64,
}

impl BitrateStep {
    /// Returns true when the step moves to a higher rendition.
    #[must_use]
    pub fn is_up(self) -> bool {
        self.to > self.from
    }
}

/// Adaptation inputs, refreshed by the caller as load history arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptationState {
    /// Available renditions, ascending and unique.
    available_bitrates: Vec<i64>,
    /// Switch history, oldest first.
    samples: Vec<BitrateSample>,
    pub fps: f32,
    pub is_currently_playable: bool,
    /// Video units buffered (packets + frames).
    pub loaded_unit_count: usize,
}

impl AdaptationState {
    /// Creates the state for a ladder, seeded with the initial rendition.
    ///
    /// The ladder is sorted and deduplicated.
    #[must_use]
    pub fn new(mut bitrates: Vec<i64>, fps: f32, initial_bitrate: i64, wall_time: f64) -> Self {
        bitrates.sort_unstable();
        bitrates.dedup();
        Self {
            available_bitrates: bitrates,
            samples: vec![BitrateSample {
                bitrate: initial_bitrate,
                wall_time,
            }],
            fps,
            is_currently_playable: false,
            loaded_unit_count: 0,
        }
    }

    /// Rebuilds the state from a recorded history, which may be empty.
    #[must_use]
    pub fn with_history(mut bitrates: Vec<i64>, samples: Vec<BitrateSample>, fps: f32) -> Self {
        bitrates.sort_unstable();
        bitrates.dedup();
        Self {
            available_bitrates: bitrates,
            samples,
            fps,
            is_currently_playable: false,
            loaded_unit_count: 0,
        }
    }

    #[must_use]
    pub fn available_bitrates(&self) -> &[i64] {
        &self.available_bitrates
    }

    #[must_use]
    pub fn samples(&self) -> &[BitrateSample] {
        &self.samples
    }

    /// The most recent switch, if any.
    #[must_use]
    pub fn last_sample(&self) -> Option<&BitrateSample> {
        self.samples.last()
    }

    /// Position of a bitrate on the ladder.
    #[must_use]
    pub fn index_of(&self, bitrate: i64) -> Option<usize> {
        self.available_bitrates.iter().position(|&b| b == bitrate)
    }

    /// Appends a switch to the history.
    pub fn record_switch(&mut self, bitrate: i64, wall_time: f64) {
        self.samples.push(BitrateSample { bitrate, wall_time });
    }

    /// Refreshes the buffering inputs.
    pub fn update(&mut self, is_playable: bool, loaded_unit_count: usize) {
        self.is_currently_playable = is_playable;
        self.loaded_unit_count = loaded_unit_count;
    }
}
