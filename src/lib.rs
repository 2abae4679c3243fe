// SPDX-License-Identifier: MPL-2.0
//! `playsync` is the decision core of a media player.
//!
//! It decides when enough media is buffered to start or continue playback,
//! keeps video presentation aligned with the audio clock, and steps the
//! video bitrate ladder up or down with the buffer. It performs no decoding,
//! rendering or network I/O; the host pipeline feeds it queue snapshots and
//! presented positions and applies the decisions it returns.

#![doc(html_root_url = "https://docs.rs/playsync/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod playback;

#[cfg(test)]
pub(crate) mod test_utils;
