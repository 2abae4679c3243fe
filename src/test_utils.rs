// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Clock positions, drifts and buffer durations are all `f64` seconds, so
//! tests compare them with the `approx` macros instead of `assert_eq!`.

pub use approx::assert_abs_diff_eq;
