// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! - [`EventCapacity`]: how many playback events the in-memory log retains

mod newtypes;

pub use newtypes::{event_capacity_bounds, EventCapacity};
