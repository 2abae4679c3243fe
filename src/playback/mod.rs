// SPDX-License-Identifier: MPL-2.0
//! Playback decision engine.
//!
//! Stateless decision functions ([`buffering`], [`sync`], [`adaptation`])
//! plus the stateful [`PlaybackSession`] that drives them for one media
//! item through a [`PlaybackPolicy`].

pub mod adaptation;
pub mod buffering;
pub mod clock;
pub mod options;
pub mod policy;
pub mod session;
pub mod sync;

pub use buffering::{BufferingContext, LoadingThrottle, LOADING_THROTTLE_SECS};
pub use clock::{monotonic_now, PlaybackClock};
pub use options::PlaybackOptions;
pub use policy::{DefaultPolicy, PlaybackPolicy};
pub use session::{CapacityOutcome, PlaybackSession};
pub use sync::{ClockSyncState, SyncDecision};
