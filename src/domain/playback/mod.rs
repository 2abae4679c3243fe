// SPDX-License-Identifier: MPL-2.0
//! Playback decision domain types.
//!
//! Value objects exchanged between the decode pipeline, the decision
//! engine, and the renderer. None of them perform I/O.

pub mod adaptation;
pub mod clock;
pub mod loading;
pub mod newtypes;
pub mod stream;

// Re-export commonly used types
pub use adaptation::{AdaptationState, BitrateSample, BitrateStep};
pub use clock::ClockAction;
pub use loading::{LoadState, LoadingState, ReadControl};
pub use newtypes::{ForwardBufferSecs, MaxBufferSecs, VideoDelaySecs};
pub use stream::{CapacitySnapshot, StreamKind};
