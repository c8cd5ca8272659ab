//! Unified result type for sdkgen.
//!
//! All fallible functions in this crate return the `Result<T>` alias below,
//! which is backed by `color_eyre` for contextual error reports. Use
//! `.wrap_err()` to add context as errors propagate.

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout sdkgen.
pub type Result<T> = EyreResult<T>;
