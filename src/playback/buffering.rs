// SPDX-License-Identifier: MPL-2.0
//! Buffering evaluation.
//!
//! Turns the per-stream capacity snapshots produced by the decode pipeline
//! into a single [`LoadingState`] verdict. The evaluation is pure and cheap
//! enough to run on every decode tick; [`LoadingThrottle`] lets a driver
//! limit how often verdicts are published.
//!
//! # Playability rules
//!
//! A stream is satisfied by the first rule that matches:
//!
//! 1. drained (end of file, no packets left)
//! 2. empty video stream (audio-only media)
//! 3. decoded queue below a quarter of its high-water mark: **not** satisfied
//! 4. end of file
//! 5. decode-locked stream
//! 6. first open or seek resume for audio (or any stream in second-open mode)
//! 7. enough units queued for the forward buffer target

use crate::domain::playback::{CapacitySnapshot, LoadingState, StreamKind};

/// Minimum interval between two throttled verdicts, in seconds.
pub const LOADING_THROTTLE_SECS: f64 = 0.1;

/// Inputs to a buffering evaluation besides the snapshots themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferingContext {
    /// No frame has been presented yet since the media was opened.
    pub is_first_open: bool,
    /// Buffering restarted after a seek.
    pub is_seek_resume: bool,
    /// Forward buffer target in seconds.
    pub target_buffer_secs: f64,
    pub sync_decode_audio: bool,
    pub sync_decode_video: bool,
    /// Start as soon as possible on open and seek, for every stream kind.
    pub second_open: bool,
}

impl Default for BufferingContext {
    fn default() -> Self {
        Self {
            is_first_open: false,
            is_seek_resume: false,
            target_buffer_secs: crate::config::DEFAULT_FORWARD_BUFFER_SECS,
            sync_decode_audio: false,
            sync_decode_video: false,
            second_open: false,
        }
    }
}

/// Evaluates the buffering state of a set of streams.
///
/// Malformed snapshots (zero `fps`) produce division artifacts in
/// `loaded_time`; callers are expected to validate them first.
#[must_use]
pub fn evaluate(snapshots: &[CapacitySnapshot], ctx: &BufferingContext) -> LoadingState {
    let loaded_time = snapshots
        .iter()
        .map(CapacitySnapshot::loaded_time)
        .fold(0.0, f64::max);
    let max_packet_count = snapshots.iter().map(|c| c.packet_count).max().unwrap_or(0);
    let max_frame_count = snapshots.iter().map(|c| c.frame_count).max().unwrap_or(0);
    let is_end_of_file = snapshots.iter().all(|c| c.is_end_of_file);
    let is_playable = snapshots.iter().all(|c| is_stream_satisfied(c, ctx));

    LoadingState {
        loaded_time,
        progress_percent: loaded_time * 100.0 / ctx.target_buffer_secs,
        max_packet_count,
        max_frame_count,
        is_end_of_file,
        is_playable,
        is_first_open: ctx.is_first_open,
        is_seek_resume: ctx.is_seek_resume,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn is_stream_satisfied(c: &CapacitySnapshot, ctx: &BufferingContext) -> bool {
    if c.is_end_of_file && c.packet_count == 0 {
        return true;
    }
    if c.kind == StreamKind::Video && c.frame_count == 0 && c.packet_count == 0 {
        return true;
    }
    if c.frame_count < c.frame_max_count / 4 {
        return false;
    }
    if c.is_end_of_file {
        return true;
    }
    if (ctx.sync_decode_video && c.kind == StreamKind::Video)
        || (ctx.sync_decode_audio && c.kind == StreamKind::Audio)
    {
        return true;
    }
    if (ctx.is_first_open || ctx.is_seek_resume) && (c.kind == StreamKind::Audio || ctx.second_open)
    {
        if ctx.is_first_open {
            return true;
        }
        // Seek resume needs roughly one second of packets.
        if c.packet_count >= c.fps as usize {
            return true;
        }
    }
    let target_units = (f64::from(c.fps) * ctx.target_buffer_secs).floor() as usize;
    c.packet_count + c.frame_count >= target_units
}

/// Decoded-queue high-water mark for a video stream.
#[must_use]
pub fn video_frame_max_count(is_live: bool) -> usize {
    if is_live {
        4
    } else {
        16
    }
}

/// Decoded-queue high-water mark for an audio stream, at most 255.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn audio_frame_max_count(fps: f32, channel_count: usize) -> usize {
    (((fps as usize) * channel_count) >> 2).min(usize::from(u8::MAX))
}

/// Rate limiter for publishing buffering verdicts.
///
/// First-open and seek-resume evaluations always pass, so the player never
/// waits an extra throttle period before starting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingThrottle {
    last_wall_time: Option<f64>,
    interval_secs: f64,
}

impl Default for LoadingThrottle {
    fn default() -> Self {
        Self::new(LOADING_THROTTLE_SECS)
    }
}

impl LoadingThrottle {
    #[must_use]
    pub fn new(interval_secs: f64) -> Self {
        Self {
            last_wall_time: None,
            interval_secs,
        }
    }

    /// Returns true if an evaluation should run at `wall_time`, and records it.
    pub fn should_evaluate(&mut self, ctx: &BufferingContext, wall_time: f64) -> bool {
        let throttled = matches!(
            self.last_wall_time,
            Some(last) if wall_time - last < self.interval_secs
        );
        if throttled && !ctx.is_first_open && !ctx.is_seek_resume {
            return false;
        }
        self.last_wall_time = Some(wall_time);
        true
    }
}
