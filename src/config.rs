//! Shared constants and naming helpers for the generation pipeline.
//!
//! Every name pattern used by more than one workflow lives here so the
//! release-branch and commit formats cannot drift between commands.

use chrono::{NaiveDate, Utc};

/// Root of the generated resource-manager packages inside the SDK
/// repository working tree.
pub const SDK_RESOURCE_MANAGER_ROOT: &str = "sdk/resourcemanager";

/// Go module prefix for generated packages.
pub const SDK_MODULE_PREFIX: &str = "github.com/Azure/azure-sdk-for-go";

/// Directory segment that anchors a service's ARM specs inside the
/// specification repository.
pub const SPEC_ANCHOR_SEGMENT: &str = "resource-manager";

/// Language tag reported in every package result.
pub const LANGUAGE: &str = "Go";

/// File extension for API-review source archives.
pub const API_VIEW_EXTENSION: &str = "gosource";

/// Prefix shared by all release branch names.
const RELEASE_BRANCH_PREFIX: &str = "release";

/// Deterministic release branch name for one package release.
///
/// The unix-timestamp suffix keeps temporally-separated runs from
/// colliding; two runs within the same clock-second are not protected.
pub fn release_branch_name(rp: &str, namespace: &str, version: &str) -> String {
    release_branch_name_at(rp, namespace, version, Utc::now().timestamp())
}

pub(crate) fn release_branch_name_at(
    rp: &str,
    namespace: &str,
    version: &str,
    unix_ts: i64,
) -> String {
    format!("{RELEASE_BRANCH_PREFIX}-{rp}-{namespace}-{version}-{unix_ts}")
}

/// Branch name for a full-refresh run, which releases many packages on a
/// single branch.
pub fn refresh_branch_name(release_date: NaiveDate) -> String {
    format!(
        "{RELEASE_BRANCH_PREFIX}-refresh-{release_date}-{}",
        Utc::now().timestamp()
    )
}

/// Commit message recording the released package and the spec commit pin.
pub fn release_commit_message(
    rp: &str,
    namespace: &str,
    version: &str,
    spec_commit: &str,
) -> String {
    format!(
        "[Release] {SDK_RESOURCE_MANAGER_ROOT}/{rp}/{namespace}/{version} generation from spec commit: {spec_commit}"
    )
}

/// Repository-relative directory of one generated package.
pub fn package_folder(rp: &str, package_name: &str) -> String {
    format!("{SDK_RESOURCE_MANAGER_ROOT}/{rp}/{package_name}")
}

/// Repository-relative path of the API-review archive for one package.
pub fn api_view_artifact_path(rp: &str, package_name: &str) -> String {
    format!("{}.{API_VIEW_EXTENSION}", package_folder(rp, package_name))
}

/// Full Go module path of one generated package.
pub fn module_path(rp: &str, package_name: &str) -> String {
    format!("{SDK_MODULE_PREFIX}/{}", package_folder(rp, package_name))
}
