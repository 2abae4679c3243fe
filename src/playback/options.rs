// SPDX-License-Identifier: MPL-2.0
//! Runtime playback options.

use crate::config::PlaybackConfig;
use crate::domain::playback::{ForwardBufferSecs, MaxBufferSecs, VideoDelaySecs};

/// Validated tuning values used by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackOptions {
    pub forward_buffer: ForwardBufferSecs,
    pub max_buffer: MaxBufferSecs,
    pub second_open: bool,
    pub sync_decode_audio: bool,
    pub sync_decode_video: bool,
    pub video_delay: VideoDelaySecs,
    /// Extra latency of the audio output device, in seconds.
    pub output_latency_secs: f64,
    pub video_adaptable: bool,
    pub video_disabled: bool,
    pub is_live: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self::from(&PlaybackConfig::default())
    }
}

impl From<&PlaybackConfig> for PlaybackOptions {
    fn from(config: &PlaybackConfig) -> Self {
        Self {
            forward_buffer: ForwardBufferSecs::new(config.preferred_forward_buffer_secs),
            max_buffer: MaxBufferSecs::new(config.max_buffer_secs),
            second_open: config.second_open,
            sync_decode_audio: config.sync_decode_audio,
            sync_decode_video: config.sync_decode_video,
            video_delay: VideoDelaySecs::new(config.video_delay_secs),
            output_latency_secs: config.output_latency_secs.max(0.0),
            video_adaptable: config.video_adaptable,
            video_disabled: config.video_disabled,
            is_live: config.is_live,
        }
    }
}
