//! Workflow entry points for the generation pipeline.
//!
//! Three workflows compose the same building blocks into different
//! control-flow shapes: the CI batch attempts every readme and reports all
//! failures together after the output file is written; the full refresh
//! attempts every RP/namespace the same way; the single release fails fast
//! on the first error.

/// Shared collaborator wiring and filesystem helpers.
pub mod common;

/// CI batch generation driven by a job description file.
pub mod automation;

/// Full regeneration of every package under the resource-manager tree.
pub mod refresh;

/// Single-package generation and release.
pub mod release;
