// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the playback decision engine.
//!
//! Decisions that change what the user sees (load state transitions,
//! sync corrections, bitrate switches, read-ahead toggles) are recorded as
//! structured events. Events travel through a bounded channel into a
//! memory-bounded log that can be exported as JSON.
//!
//! # Architecture
//!
//! - [`DiagnosticsHandle`]: cloneable, non-blocking sender
//! - [`DiagnosticsCollector`]: owns the [`EventLog`] and exports reports
//! - [`DiagnosticEvent`]: timestamped [`DiagnosticEventKind`]

mod buffer;
mod collector;
mod events;

pub use buffer::{EventCapacity, EventLog};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{Correction, DiagnosticEvent, DiagnosticEventKind, LoadPhase};
