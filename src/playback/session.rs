// SPDX-License-Identifier: MPL-2.0
//! Playback session driver.
//!
//! A [`PlaybackSession`] owns the mutable state the decision engine needs
//! between ticks: both clocks, the sync hysteresis counter, the load state,
//! the bitrate history and the open/seek flags. The decode pipeline feeds it
//! capacity snapshots and presented positions; the session answers with
//! buffering verdicts, read-ahead instructions, bitrate steps and per-frame
//! clock actions.
//!
//! Every operation has an `_at` variant taking an explicit wall time so the
//! session can be driven deterministically.

use std::fmt;

use super::buffering::{BufferingContext, LoadingThrottle};
use super::clock::{monotonic_now, PlaybackClock};
use super::options::PlaybackOptions;
use super::policy::{DefaultPolicy, PlaybackPolicy};
use super::sync::ClockSyncState;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::domain::playback::{
    AdaptationState, BitrateStep, CapacitySnapshot, ClockAction, LoadState, LoadingState,
    ReadControl, StreamKind,
};

/// Everything decided on one capacity change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityOutcome {
    pub loading: LoadingState,
    pub load_state: LoadState,
    /// Progress (0-100) for a buffering indicator.
    pub buffering_progress: u8,
    pub read_control: ReadControl,
    /// Bitrate switch the host must apply, if any.
    pub bitrate_step: Option<BitrateStep>,
}

/// Stateful driver for one opened media item.
pub struct PlaybackSession {
    policy: Box<dyn PlaybackPolicy>,
    options: PlaybackOptions,
    audio_clock: PlaybackClock,
    video_clock: PlaybackClock,
    sync_state: ClockSyncState,
    load_state: LoadState,
    throttle: LoadingThrottle,
    is_first_open: bool,
    is_seek_resume: bool,
    is_seeking: bool,
    /// Video drives the playback position while set.
    is_audio_stalled: bool,
    has_audio: bool,
    read_paused: bool,
    adaptation: Option<AdaptationState>,
    diagnostics: Option<DiagnosticsHandle>,
    media_duration: f64,
    current_position: f64,
    playable_time: f64,
}

impl fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("options", &self.options)
            .field("load_state", &self.load_state)
            .field("delay_strikes", &self.sync_state.delay_strikes())
            .field("is_first_open", &self.is_first_open)
            .field("is_seek_resume", &self.is_seek_resume)
            .field("is_seeking", &self.is_seeking)
            .field("is_audio_stalled", &self.is_audio_stalled)
            .field("playable_time", &self.playable_time)
            .finish_non_exhaustive()
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new(PlaybackOptions::default())
    }
}

impl PlaybackSession {
    /// Creates a session using the standard heuristics.
    #[must_use]
    pub fn new(options: PlaybackOptions) -> Self {
        Self::with_policy(options, Box::new(DefaultPolicy::new(options)))
    }

    /// Creates a session that consults a host-supplied policy.
    #[must_use]
    pub fn with_policy(options: PlaybackOptions, policy: Box<dyn PlaybackPolicy>) -> Self {
        Self::with_policy_at(options, policy, monotonic_now())
    }

    /// Creates a session whose clocks are stamped at `wall_time`.
    #[must_use]
    pub fn with_policy_at(
        options: PlaybackOptions,
        policy: Box<dyn PlaybackPolicy>,
        wall_time: f64,
    ) -> Self {
        Self {
            policy,
            options,
            audio_clock: PlaybackClock::starting_at(0.0, wall_time),
            video_clock: PlaybackClock::starting_at(0.0, wall_time),
            sync_state: ClockSyncState::new(),
            load_state: LoadState::Idle,
            throttle: LoadingThrottle::default(),
            is_first_open: true,
            is_seek_resume: false,
            is_seeking: false,
            is_audio_stalled: true,
            has_audio: false,
            read_paused: false,
            adaptation: None,
            diagnostics: None,
            media_duration: 0.0,
            current_position: 0.0,
            playable_time: 0.0,
        }
    }

    /// Attaches a diagnostics handle; decisions are reported through it.
    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    /// Enables bitrate adaptation with the given ladder state.
    pub fn set_adaptation(&mut self, state: AdaptationState) {
        self.adaptation = Some(state);
    }

    pub fn set_media_duration(&mut self, duration: f64) {
        self.media_duration = duration;
    }

    // =========================================================================
    // Buffering
    // =========================================================================

    /// Re-evaluates buffering after a queue changed, reading the wall clock.
    pub fn on_capacity_change(&mut self, snapshots: &[CapacitySnapshot]) -> Option<CapacityOutcome> {
        self.on_capacity_change_at(snapshots, monotonic_now())
    }

    /// Re-evaluates buffering at `wall_time`.
    ///
    /// Returns `None` when the evaluation was throttled.
    pub fn on_capacity_change_at(
        &mut self,
        snapshots: &[CapacitySnapshot],
        wall_time: f64,
    ) -> Option<CapacityOutcome> {
        let ctx = BufferingContext {
            is_first_open: self.is_first_open,
            is_seek_resume: self.is_seek_resume,
            ..BufferingContext::default()
        };
        if !self.throttle.should_evaluate(&ctx, wall_time) {
            return None;
        }

        let loading = self
            .policy
            .playable(snapshots, self.is_first_open, self.is_seek_resume);

        let audio = snapshots.iter().find(|c| c.kind == StreamKind::Audio);
        self.has_audio = audio.is_some();
        if audio.is_none_or(CapacitySnapshot::is_drained) {
            self.is_audio_stalled = true;
        }

        self.playable_time = if loading.is_end_of_file {
            self.media_duration
        } else {
            self.current_position + loading.loaded_time
        };

        let previous = self.load_state;
        self.load_state = previous.next(&loading);
        let buffering_progress = match (previous, self.load_state) {
            (LoadState::Playable, LoadState::Loading) => 0,
            (_, LoadState::Playable) => 100,
            _ => loading.buffering_progress(),
        };
        if previous != self.load_state {
            self.log(DiagnosticEventKind::LoadStateChanged {
                from: previous.into(),
                to: self.load_state.into(),
                progress: buffering_progress,
            });
        }

        let max_buffer = self.options.max_buffer;
        let mut bitrate_step = None;
        let read_control = if loading.is_playable {
            self.is_first_open = false;
            self.is_seek_resume = false;
            if loading.loaded_time > max_buffer.value() {
                bitrate_step = self.adapt_video(snapshots, &loading, wall_time);
                ReadControl::Pause
            } else if loading.loaded_time < max_buffer.half() {
                ReadControl::Resume
            } else {
                ReadControl::Keep
            }
        } else {
            bitrate_step = self.adapt_video(snapshots, &loading, wall_time);
            ReadControl::Resume
        };
        self.track_read_control(read_control, loading.loaded_time);

        Some(CapacityOutcome {
            loading,
            load_state: self.load_state,
            buffering_progress,
            read_control,
            bitrate_step,
        })
    }

    /// True when every stream reached end of file with nothing left queued.
    #[must_use]
    pub fn is_drained(&self, snapshots: &[CapacitySnapshot]) -> bool {
        snapshots.iter().all(CapacitySnapshot::is_drained)
    }

    fn adapt_video(
        &mut self,
        snapshots: &[CapacitySnapshot],
        loading: &LoadingState,
        wall_time: f64,
    ) -> Option<BitrateStep> {
        if !self.options.video_adaptable
            || self.options.video_disabled
            || loading.is_end_of_file
            || loading.is_seek_resume
            || self.is_seeking
        {
            return None;
        }
        let video = snapshots.iter().find(|c| c.kind == StreamKind::Video)?;
        let state = self.adaptation.as_mut()?;
        state.update(loading.is_playable, video.packet_count + video.frame_count);

        let step = self.policy.adaptable(state, wall_time)?;
        if step.from == step.to {
            return None;
        }
        state.record_switch(step.to, wall_time);
        self.log(DiagnosticEventKind::BitrateSwitch {
            from: step.from,
            to: step.to,
        });
        Some(step)
    }

    fn track_read_control(&mut self, control: ReadControl, loaded_secs: f64) {
        let paused = match control {
            ReadControl::Pause => true,
            ReadControl::Resume => false,
            ReadControl::Keep => return,
        };
        if paused != self.read_paused {
            self.read_paused = paused;
            self.log(DiagnosticEventKind::ReadAhead {
                paused,
                loaded_secs,
            });
        }
    }

    // =========================================================================
    // Clocks
    // =========================================================================

    /// Records the position of the audio unit just handed to the output.
    pub fn set_audio_position(&mut self, position: f64) {
        self.set_audio_position_at(position, monotonic_now());
    }

    /// Ignored while a seek is in progress.
    pub fn set_audio_position_at(&mut self, position: f64, wall_time: f64) {
        if self.is_seeking {
            return;
        }
        self.audio_clock.set_position_at(position, wall_time);
        self.is_audio_stalled = false;
        self.current_position = position;
    }

    /// Records the position and duration of the video frame just presented.
    pub fn set_video_position(&mut self, position: f64, duration: f64) {
        self.set_video_position_at(position, duration, monotonic_now());
    }

    /// Ignored while a seek is in progress. Moves the playback position
    /// when there is no audio or the audio has drained.
    pub fn set_video_position_at(&mut self, position: f64, duration: f64, wall_time: f64) {
        if self.is_seeking {
            return;
        }
        self.video_clock.set_position_at(position, wall_time);
        self.video_clock.set_duration(duration);
        if self.is_audio_stalled {
            self.current_position = position;
        }
    }

    /// Decides what to do with the next video frame, reading the wall clock.
    pub fn next_video_action(&mut self) -> ClockAction {
        self.next_video_action_at(monotonic_now())
    }

    /// Decides what to do with the next video frame at `wall_time`.
    pub fn next_video_action_at(&mut self, wall_time: f64) -> ClockAction {
        let decision = self.policy.video_clock_sync(
            &mut self.sync_state,
            &self.audio_clock,
            &self.video_clock,
            wall_time,
        );
        let action = decision.action;
        if action.is_disruptive() || action == ClockAction::DropNextFrame {
            self.log(DiagnosticEventKind::ClockCorrection {
                action: action.into(),
                drift_secs: decision.drift_secs,
                delay_strikes: self.sync_state.delay_strikes(),
            });
        }
        action
    }

    // =========================================================================
    // Seeking
    // =========================================================================

    /// Starts a seek to `target` seconds.
    pub fn seek(&mut self, target: f64) {
        self.seek_at(target, monotonic_now());
    }

    pub fn seek_at(&mut self, target: f64, wall_time: f64) {
        self.is_seek_resume = true;
        self.is_seeking = true;
        self.is_audio_stalled = !self.has_audio;
        self.sync_state.reset();
        self.audio_clock.set_position_at(target, wall_time);
        self.video_clock.set_position_at(target, wall_time);
        self.current_position = target;
    }

    /// Marks the demuxer reposition as complete. Buffering still runs in
    /// seek-resume mode until the next playable verdict.
    pub fn finish_seek(&mut self) {
        self.is_seeking = false;
    }

    // =========================================================================
    // Queue sizing
    // =========================================================================

    #[must_use]
    pub fn video_frame_max_count(&self, fps: f32) -> usize {
        self.policy.video_frame_max_count(fps, self.options.is_live)
    }

    #[must_use]
    pub fn audio_frame_max_count(&self, fps: f32, channel_count: usize) -> usize {
        self.policy.audio_frame_max_count(fps, channel_count)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Furthest media time that can be presented without new data.
    #[must_use]
    pub fn playable_time(&self) -> f64 {
        self.playable_time
    }

    #[must_use]
    pub fn is_first_open(&self) -> bool {
        self.is_first_open
    }

    #[must_use]
    pub fn is_seek_resume(&self) -> bool {
        self.is_seek_resume
    }

    #[must_use]
    pub fn is_seeking(&self) -> bool {
        self.is_seeking
    }

    /// True while video positions drive [`playable_time`](Self::playable_time).
    #[must_use]
    pub fn is_audio_stalled(&self) -> bool {
        self.is_audio_stalled
    }

    #[must_use]
    pub fn delay_strikes(&self) -> u32 {
        self.sync_state.delay_strikes()
    }

    #[must_use]
    pub fn adaptation(&self) -> Option<&AdaptationState> {
        self.adaptation.as_ref()
    }

    #[must_use]
    pub fn audio_clock(&self) -> &PlaybackClock {
        &self.audio_clock
    }

    #[must_use]
    pub fn video_clock(&self) -> &PlaybackClock {
        &self.video_clock
    }

    fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.log(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Correction, DiagnosticsCollector, LoadPhase};
    use crate::test_utils::assert_abs_diff_eq;

    fn session() -> PlaybackSession {
        PlaybackSession::with_policy_at(
            PlaybackOptions::default(),
            Box::new(DefaultPolicy::default()),
            0.0,
        )
    }

    fn audio(packets: usize, frames: usize) -> CapacitySnapshot {
        CapacitySnapshot::new(StreamKind::Audio, 50.0, 40).with_counts(packets, frames)
    }

    fn video(packets: usize, frames: usize) -> CapacitySnapshot {
        CapacitySnapshot::new(StreamKind::Video, 25.0, 16).with_counts(packets, frames)
    }

    #[test]
    fn first_open_becomes_playable_and_clears_flag() {
        let mut session = session();
        let outcome = session
            .on_capacity_change_at(&[audio(10, 10), video(60, 16)], 0.0)
            .expect("first open is never throttled");

        assert!(outcome.loading.is_playable);
        assert_eq!(outcome.load_state, LoadState::Playable);
        assert_eq!(outcome.buffering_progress, 100);
        assert_eq!(outcome.read_control, ReadControl::Resume);
        assert!(!session.is_first_open());
    }

    #[test]
    fn steady_evaluations_are_throttled() {
        let mut session = session();
        let snapshots = [audio(10, 10), video(60, 16)];
        assert!(session.on_capacity_change_at(&snapshots, 1.0).is_some());
        assert!(session.on_capacity_change_at(&snapshots, 1.05).is_none());
        assert!(session.on_capacity_change_at(&snapshots, 1.2).is_some());
    }

    #[test]
    fn playable_session_drops_to_loading_when_dry() {
        let mut session = session();
        session.on_capacity_change_at(&[audio(10, 10), video(60, 16)], 0.0);
        let outcome = session
            .on_capacity_change_at(&[audio(0, 0), video(0, 0)], 1.0)
            .expect("not throttled");

        assert_eq!(outcome.load_state, LoadState::Loading);
        assert_eq!(outcome.buffering_progress, 0);
        assert_eq!(outcome.read_control, ReadControl::Resume);
    }

    #[test]
    fn overfull_buffer_pauses_reading() {
        let mut session = session();
        // 31s of audio against a 30s ceiling.
        let outcome = session
            .on_capacity_change_at(&[audio(1_510, 40)], 0.0)
            .expect("not throttled");
        assert_eq!(outcome.read_control, ReadControl::Pause);

        // 20s is between half and the full ceiling.
        let outcome = session
            .on_capacity_change_at(&[audio(960, 40)], 1.0)
            .expect("not throttled");
        assert_eq!(outcome.read_control, ReadControl::Keep);
    }

    #[test]
    fn playable_time_follows_position_or_duration() {
        let mut session = session();
        session.set_media_duration(120.0);
        session.set_audio_position_at(10.0, 0.0);
        session.on_capacity_change_at(&[audio(100, 50)], 0.0);
        assert_abs_diff_eq!(session.playable_time(), 13.0, epsilon = 1e-9);

        session.on_capacity_change_at(&[audio(0, 10).at_end_of_file()], 1.0);
        assert_abs_diff_eq!(session.playable_time(), 120.0);
    }

    #[test]
    fn seek_resets_sync_and_enters_seek_resume() {
        let mut session = session();
        session.set_audio_position_at(5.0, 0.0);
        session.set_video_position_at(0.0, 0.04, 0.0);
        for _ in 0..3 {
            session.next_video_action_at(0.0);
        }
        assert_eq!(session.delay_strikes(), 3);

        session.seek_at(42.0, 1.0);
        assert_eq!(session.delay_strikes(), 0);
        assert!(session.is_seeking());
        assert!(session.is_seek_resume());
        assert_abs_diff_eq!(session.audio_clock().position_time(), 42.0);
        assert_abs_diff_eq!(session.video_clock().position_time(), 42.0);

        session.finish_seek();
        assert!(!session.is_seeking());
        assert!(session.is_seek_resume());
    }

    #[test]
    fn video_only_media_tracks_video_position() {
        let mut session = session();
        assert!(session.is_audio_stalled());
        session.set_video_position_at(50.0, 0.04, 0.0);
        session.on_capacity_change_at(&[video(60, 16)], 0.0);

        // 76 units at 25 fps past the presented frame.
        assert_abs_diff_eq!(session.playable_time(), 53.04, epsilon = 1e-9);
        assert!(session.is_audio_stalled());
    }

    #[test]
    fn drained_audio_hands_position_to_video() {
        let mut session = session();
        session.set_media_duration(120.0);
        session.set_audio_position_at(30.0, 0.0);
        session.set_video_position_at(29.0, 0.04, 0.0);
        assert!(!session.is_audio_stalled());

        session.on_capacity_change_at(&[audio(0, 0).at_end_of_file(), video(60, 16)], 0.0);
        assert!(session.is_audio_stalled());
        session.set_video_position_at(40.0, 0.04, 1.0);
        session.on_capacity_change_at(&[audio(0, 0).at_end_of_file(), video(60, 16)], 1.0);
        assert_abs_diff_eq!(session.playable_time(), 43.04, epsilon = 1e-9);
    }

    #[test]
    fn positions_are_ignored_while_seeking() {
        let mut session = session();
        session.seek_at(100.0, 0.0);
        session.set_audio_position_at(3.0, 0.01);
        session.set_video_position_at(2.0, 0.04, 0.01);
        assert_abs_diff_eq!(session.audio_clock().position_time(), 100.0);
        assert_abs_diff_eq!(session.video_clock().position_time(), 100.0);

        session.on_capacity_change_at(&[audio(50, 50)], 0.02);
        assert_abs_diff_eq!(session.playable_time(), 102.0, epsilon = 1e-9);

        session.finish_seek();
        session.set_audio_position_at(100.5, 0.5);
        assert_abs_diff_eq!(session.audio_clock().position_time(), 100.5);
    }

    #[test]
    fn video_in_sync_advances() {
        let mut session = session();
        session.set_audio_position_at(1.0, 0.0);
        session.set_video_position_at(0.96, 0.04, 0.0);
        assert_eq!(session.next_video_action_at(0.0), ClockAction::Advance);
    }

    #[test]
    fn corrections_and_transitions_are_logged() {
        let mut collector = DiagnosticsCollector::default();
        let mut session = session().with_diagnostics(collector.handle());

        session.on_capacity_change_at(&[audio(10, 10)], 0.0);
        session.set_audio_position_at(5.0, 0.0);
        session.set_video_position_at(0.0, 0.04, 0.0);
        // Strikes 1 and 2: advance, then drop.
        session.next_video_action_at(0.0);
        session.next_video_action_at(0.0);

        collector.process_pending();
        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&DiagnosticEventKind::LoadStateChanged {
            from: LoadPhase::Idle,
            to: LoadPhase::Playable,
            progress: 100,
        }));
        assert!(kinds.iter().any(|k| matches!(
            k,
            DiagnosticEventKind::ClockCorrection {
                action: Correction::DropNextFrame,
                delay_strikes: 2,
                ..
            }
        )));
    }

    #[test]
    fn is_drained_requires_every_stream_empty_at_eof() {
        let session = session();
        assert!(session.is_drained(&[audio(0, 0).at_end_of_file(), video(0, 0).at_end_of_file()]));
        assert!(!session.is_drained(&[audio(0, 1).at_end_of_file()]));
        assert!(!session.is_drained(&[audio(0, 0)]));
    }

    #[test]
    fn queue_sizes_come_from_policy() {
        let session = session();
        assert_eq!(session.video_frame_max_count(30.0), 16);
        assert_eq!(session.audio_frame_max_count(48_000.0 / 1024.0, 2), 23);
    }
}
