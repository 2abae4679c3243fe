// SPDX-License-Identifier: MPL-2.0
//! Elementary stream types and per-stream buffer snapshots.

/// Kind of elementary stream a snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Audio,
    Video,
    Subtitle,
}

impl StreamKind {
    /// Returns true for audio streams.
    #[must_use]
    pub fn is_audio(self) -> bool {
        matches!(self, Self::Audio)
    }

    /// Returns true for video streams.
    #[must_use]
    pub fn is_video(self) -> bool {
        matches!(self, Self::Video)
    }
}

/// Read-only view of one stream's buffer depth at a point in time.
///
/// The decode pipeline builds a fresh snapshot per stream on every
/// evaluation tick. Counts are never negative; `fps` must be positive
/// before the snapshot is handed to the buffering evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacitySnapshot {
    /// Effective frame rate of the stream (frames per second).
    pub fps: f32,
    /// Compressed units still waiting to be decoded.
    pub packet_count: usize,
    /// Decoded units waiting to be rendered.
    pub frame_count: usize,
    /// High-water mark of the decoded queue.
    pub frame_max_count: usize,
    /// The source will produce no more packets for this stream.
    pub is_end_of_file: bool,
    pub kind: StreamKind,
}

impl CapacitySnapshot {
    /// Creates a snapshot with empty queues.
    #[must_use]
    pub fn new(kind: StreamKind, fps: f32, frame_max_count: usize) -> Self {
        Self {
            fps,
            packet_count: 0,
            frame_count: 0,
            frame_max_count,
            is_end_of_file: false,
            kind,
        }
    }

    /// Sets the queue depths.
    #[must_use]
    pub fn with_counts(mut self, packet_count: usize, frame_count: usize) -> Self {
        self.packet_count = packet_count;
        self.frame_count = frame_count;
        self
    }

    /// Marks the stream as having reached end of file.
    #[must_use]
    pub fn at_end_of_file(mut self) -> Self {
        self.is_end_of_file = true;
        self
    }

    /// Seconds of media buffered across both queues.
    #[must_use]
    pub fn loaded_time(&self) -> f64 {
        (self.packet_count + self.frame_count) as f64 / f64::from(self.fps)
    }

    /// True once the stream is at end of file and every queue is empty.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.is_end_of_file && self.packet_count == 0 && self.frame_count == 0
    }
}
