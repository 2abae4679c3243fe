// SPDX-License-Identifier: MPL-2.0
//! Playback diagnostic events.
//!
//! Events record what the decision engine did and why, so that stalls and
//! sync corrections can be reconstructed after the fact.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::domain::playback::{ClockAction, LoadState};

/// Serializable mirror of [`LoadState`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    Idle,
    Loading,
    Playable,
}

impl From<LoadState> for LoadPhase {
    fn from(state: LoadState) -> Self {
        match state {
            LoadState::Idle => Self::Idle,
            LoadState::Loading => Self::Loading,
            LoadState::Playable => Self::Playable,
        }
    }
}

/// Serializable mirror of [`ClockAction`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Correction {
    Remain,
    Advance,
    DropNextFrame,
    DropNextPacket,
    DropGroupOfPictures,
    Flush,
    Seek,
}

impl From<ClockAction> for Correction {
    fn from(action: ClockAction) -> Self {
        match action {
            ClockAction::Remain => Self::Remain,
            ClockAction::Advance => Self::Advance,
            ClockAction::DropNextFrame => Self::DropNextFrame,
            ClockAction::DropNextPacket => Self::DropNextPacket,
            ClockAction::DropGroupOfPictures => Self::DropGroupOfPictures,
            ClockAction::Flush => Self::Flush,
            ClockAction::Seek => Self::Seek,
        }
    }
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// The load state changed.
    LoadStateChanged {
        from: LoadPhase,
        to: LoadPhase,
        /// Buffering progress (0-100) at the time of the change.
        progress: u8,
    },

    /// The sync engine asked the renderer to drop, flush or seek.
    ClockCorrection {
        action: Correction,
        /// Video position minus scheduled position, in seconds.
        drift_secs: f64,
        delay_strikes: u32,
    },

    /// The active rendition changed.
    BitrateSwitch { from: i64, to: i64 },

    /// The demuxer was told to pause or resume reading.
    ReadAhead { paused: bool, loaded_secs: f64 },

    /// Free-form warning.
    Warning { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_is_stamped_now() {
        let before = Instant::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::BitrateSwitch { from: 1, to: 2 });
        assert!(event.timestamp >= before);
        assert!(event.timestamp <= Instant::now());
    }

    #[test]
    fn clock_correction_serializes_with_tag() {
        let kind = DiagnosticEventKind::ClockCorrection {
            action: ClockAction::Flush.into(),
            drift_secs: -2.5,
            delay_strikes: 10,
        };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(json.contains("\"type\":\"clock_correction\""));
        assert!(json.contains("\"action\":\"flush\""));
        assert!(json.contains("\"delay_strikes\":10"));
    }

    #[test]
    fn load_state_change_deserializes() {
        let json = r#"{"type":"load_state_changed","from":"loading","to":"playable","progress":100}"#;
        let kind: DiagnosticEventKind =
            serde_json::from_str(json).expect("deserialization should succeed");
        assert_eq!(
            kind,
            DiagnosticEventKind::LoadStateChanged {
                from: LoadPhase::Loading,
                to: LoadPhase::Playable,
                progress: 100,
            }
        );
    }

    #[test]
    fn mirrors_cover_domain_enums() {
        assert_eq!(LoadPhase::from(LoadState::Idle), LoadPhase::Idle);
        assert_eq!(Correction::from(ClockAction::Seek), Correction::Seek);
        assert_eq!(
            Correction::from(ClockAction::DropGroupOfPictures),
            Correction::DropGroupOfPictures
        );
    }
}
