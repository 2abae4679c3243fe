// SPDX-License-Identifier: MPL-2.0
//! Host-replaceable playback policy.
//!
//! The session asks a [`PlaybackPolicy`] for every buffering, sync and
//! adaptation decision. Hosts that need different heuristics implement the
//! trait and hand it to [`PlaybackSession::with_policy`]; everyone else uses
//! [`DefaultPolicy`].
//!
//! [`PlaybackSession::with_policy`]: super::PlaybackSession::with_policy

use super::adaptation;
use super::buffering::{self, BufferingContext};
use super::clock::PlaybackClock;
use super::options::PlaybackOptions;
use super::sync::{self, ClockSyncState, SyncDecision};
use crate::domain::playback::{
    AdaptationState, BitrateStep, CapacitySnapshot, LoadingState,
};

/// Decision hooks consulted by a playback session.
pub trait PlaybackPolicy: Send + Sync {
    /// Buffering verdict for the current snapshots.
    fn playable(
        &self,
        snapshots: &[CapacitySnapshot],
        is_first_open: bool,
        is_seek_resume: bool,
    ) -> LoadingState;

    /// Proposed bitrate ladder step, evaluated at `wall_time`.
    fn adaptable(&self, state: &AdaptationState, wall_time: f64) -> Option<BitrateStep>;

    /// Action for the next video frame, evaluated at `wall_time`, and the
    /// drift it was based on.
    fn video_clock_sync(
        &self,
        state: &mut ClockSyncState,
        reference: &PlaybackClock,
        tracked: &PlaybackClock,
        wall_time: f64,
    ) -> SyncDecision;

    /// Decoded-queue high-water mark for a video stream.
    fn video_frame_max_count(&self, _fps: f32, is_live: bool) -> usize {
        buffering::video_frame_max_count(is_live)
    }

    /// Decoded-queue high-water mark for an audio stream.
    fn audio_frame_max_count(&self, fps: f32, channel_count: usize) -> usize {
        buffering::audio_frame_max_count(fps, channel_count)
    }
}

/// The standard buffering, sync and adaptation heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DefaultPolicy {
    options: PlaybackOptions,
}

impl DefaultPolicy {
    #[must_use]
    pub fn new(options: PlaybackOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    fn buffering_context(&self, is_first_open: bool, is_seek_resume: bool) -> BufferingContext {
        BufferingContext {
            is_first_open,
            is_seek_resume,
            target_buffer_secs: self.options.forward_buffer.value(),
            sync_decode_audio: self.options.sync_decode_audio,
            sync_decode_video: self.options.sync_decode_video,
            second_open: self.options.second_open,
        }
    }
}

impl PlaybackPolicy for DefaultPolicy {
    fn playable(
        &self,
        snapshots: &[CapacitySnapshot],
        is_first_open: bool,
        is_seek_resume: bool,
    ) -> LoadingState {
        let ctx = self.buffering_context(is_first_open, is_seek_resume);
        buffering::evaluate(snapshots, &ctx)
    }

    fn adaptable(&self, state: &AdaptationState, wall_time: f64) -> Option<BitrateStep> {
        adaptation::evaluate_at(state, self.options.max_buffer.value(), wall_time)
    }

    fn video_clock_sync(
        &self,
        state: &mut ClockSyncState,
        reference: &PlaybackClock,
        tracked: &PlaybackClock,
        wall_time: f64,
    ) -> SyncDecision {
        sync::measure_at(
            state,
            reference,
            tracked,
            self.options.video_delay.value(),
            self.options.output_latency_secs,
            wall_time,
        )
    }
}
