// SPDX-License-Identifier: MPL-2.0
//! Buffering verdicts and the player's load state.

/// Aggregate buffering verdict, recomputed on every evaluation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingState {
    /// Seconds buffered by the deepest stream.
    pub loaded_time: f64,
    /// `loaded_time` relative to the forward buffer target, in percent.
    pub progress_percent: f64,
    pub max_packet_count: usize,
    pub max_frame_count: usize,
    /// True only when every stream has reached end of file.
    pub is_end_of_file: bool,
    /// Every stream has enough data for playback to start or continue.
    pub is_playable: bool,
    pub is_first_open: bool,
    pub is_seek_resume: bool,
}

impl LoadingState {
    /// Buffering progress for UI indicators, capped at 100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn buffering_progress(&self) -> u8 {
        if self.is_playable {
            100
        } else {
            self.progress_percent.clamp(0.0, 100.0) as u8
        }
    }

    /// True when neither queue holds anything and more data is expected.
    #[must_use]
    pub fn is_starved(&self) -> bool {
        !self.is_end_of_file && self.max_packet_count == 0 && self.max_frame_count == 0
    }
}

/// Coarse load state gating the buffering UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing has been evaluated yet.
    #[default]
    Idle,
    /// Waiting for enough media to be buffered.
    Loading,
    /// Enough media is buffered to present frames.
    Playable,
}

impl LoadState {
    /// Returns true when playback may proceed.
    #[must_use]
    pub fn is_playable(self) -> bool {
        matches!(self, Self::Playable)
    }

    /// Computes the next load state for a fresh verdict.
    ///
    /// A playable stream only falls back to loading once its queues run dry;
    /// any other state follows the verdict's playability flag.
    #[must_use]
    pub fn next(self, verdict: &LoadingState) -> Self {
        match self {
            Self::Playable if verdict.is_starved() => Self::Loading,
            Self::Playable => Self::Playable,
            Self::Idle | Self::Loading if verdict.is_playable => Self::Playable,
            Self::Idle | Self::Loading => Self::Loading,
        }
    }
}

/// Read-ahead instruction for the demuxer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadControl {
    /// The buffer is above the read-ahead ceiling; stop reading packets.
    Pause,
    /// The buffer is low; read packets.
    Resume,
    /// Leave the reader as it is.
    Keep,
}
