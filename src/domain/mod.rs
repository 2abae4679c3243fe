// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core playback types with ZERO external dependencies.
//!
//! This module contains pure value objects and the rules attached to them.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`EventCapacity`](diagnostics::EventCapacity))
//! - [`playback`]: Decision inputs and outputs ([`CapacitySnapshot`](playback::CapacitySnapshot),
//!   [`LoadingState`](playback::LoadingState), [`ClockAction`](playback::ClockAction),
//!   [`AdaptationState`](playback::AdaptationState))

pub mod diagnostics;
pub mod playback;
