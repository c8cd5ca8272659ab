//! Typed request/response contracts exchanged with the calling CI system.

/// Generation job description consumed from the CI-supplied input file.
pub mod job;

/// Package-result list written back for downstream pipeline consumers.
pub mod output;
