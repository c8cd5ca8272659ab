//! Collaborator contract for the specification-to-source code generator.

use std::path::Path;

use crate::{
    error::GenerateError,
    generator::types::{NamespaceResult, SingleNamespaceParams},
    result::Result,
};

/// The external code generator, modeled as an explicit interface so the
/// orchestration core can be tested against fakes.
///
/// This core neither times out nor cancels the underlying call; the CI
/// job's own timeout is the only bound on a run.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator {
    /// Generate every namespace configured by one readme.
    ///
    /// A non-empty error list means the readme's entire fan-out must be
    /// discarded by the caller; no partial namespace results from a failed
    /// readme are surfaced.
    fn generate_for_automation(
        &self,
        readme: &str,
        spec_root: &Path,
        repo_url: &str,
        go_version: &str,
    ) -> (Vec<NamespaceResult>, Vec<GenerateError>);

    /// Generate a single explicit RP/namespace target.
    fn generate_for_single_rp_namespace(
        &self,
        params: &SingleNamespaceParams,
    ) -> Result<NamespaceResult>;
}
