// SPDX-License-Identifier: MPL-2.0
//! Corrective actions issued to the video renderer.

/// What the renderer must do with the next video frame to stay aligned
/// with the reference clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockAction {
    /// Hold the current frame; video is ahead of schedule.
    Remain,
    /// Present the next frame.
    Advance,
    /// Discard the next decoded frame without presenting it.
    DropNextFrame,
    /// Discard the next compressed packet.
    DropNextPacket,
    /// Discard packets up to the next keyframe.
    DropGroupOfPictures,
    /// Discard the whole pending decode queue of the video stream.
    Flush,
    /// Request a discontinuous reposition of the video stream.
    Seek,
}

impl ClockAction {
    /// Returns true for actions that discard media.
    #[must_use]
    pub fn is_drop(self) -> bool {
        matches!(
            self,
            Self::DropNextFrame | Self::DropNextPacket | Self::DropGroupOfPictures | Self::Flush
        )
    }

    /// Returns true for the escalated recovery actions.
    #[must_use]
    pub fn is_disruptive(self) -> bool {
        matches!(self, Self::Flush | Self::Seek)
    }
}
