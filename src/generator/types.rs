use chrono::NaiveDate;
use semver::Version;

use crate::model::output::Changelog;

/// One generated namespace produced by the external generator.
///
/// A single readme may fan out into several of these when it configures
/// multiple API versions or services.
#[derive(Debug, Clone)]
pub struct NamespaceResult {
    pub rp_name: String,
    pub package_name: String,
    pub version: String,
    pub changelog: Changelog,
}

/// Parameters for a single explicit RP/namespace generation.
#[derive(Debug, Clone, Default)]
pub struct SingleNamespaceParams {
    pub rp_name: String,
    pub namespace: String,
    /// Spec-side RP name when it differs from the SDK-side one.
    pub spec_rp_name: Option<String>,
    /// Explicit version override; the generator computes one otherwise.
    pub version: Option<Version>,
    pub package_title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub skip_generate_example: bool,
    pub update_spec_version: bool,
    pub package_config: Option<String>,
    pub go_version: Option<String>,
}
