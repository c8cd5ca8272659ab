//! External code-generator invocation boundary.
//!
//! The generator itself is a black box to this crate: these modules define
//! the call contract, the result types the orchestration consumes, and the
//! process-spawning implementation used outside of tests.

/// Process-spawning generator implementation.
pub mod external;

/// The `CodeGenerator` collaborator contract.
pub mod traits;

/// Parameter and result types exchanged with the generator.
pub mod types;
