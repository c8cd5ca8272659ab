//! Readme/spec path resolution for generator invocation.
//!
//! CI payloads may name a readme either relative to the spec root
//! (`network/resource-manager/readme.md`) or with repository-relative
//! prefixes in front (`specification/network/resource-manager/readme.md`).
//! The generator expects the former, with any leading segments folded into
//! the effective spec root instead.

use std::path::{Path, PathBuf};

use crate::config::SPEC_ANCHOR_SEGMENT;

/// Outcome of resolving a readme path against a spec root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeResolution {
    /// Leading segments were folded into the spec root.
    Resolved { readme: String, spec_root: PathBuf },
    /// Already in the shape the generator expects; nothing to rewrite.
    ///
    /// This also covers paths with no anchor segment at all: malformed
    /// input is passed through untouched and surfaces as a downstream
    /// generation failure rather than an error here.
    Unchanged,
}

/// Normalize a possibly deeply-nested readme path.
///
/// Splits on `/` (after backslash normalization) and scans for the anchor
/// segment. Anchor at index `i > 1`: the readme becomes the subsequence
/// starting at `i - 1` (service directory onward) and the segments before
/// that join onto the spec root. Anchor at `i <= 1` or absent: unchanged.
///
/// Resolution is idempotent: re-resolving an already-resolved path is a
/// no-op because its anchor sits at index 1.
pub fn resolve_readme(spec_root: &Path, readme: &str) -> ReadmeResolution {
    let normalized = readme.replace('\\', "/");
    let segments: Vec<&str> = normalized.split('/').collect();

    let Some(anchor) = segments.iter().position(|s| *s == SPEC_ANCHOR_SEGMENT)
    else {
        return ReadmeResolution::Unchanged;
    };

    if anchor <= 1 {
        return ReadmeResolution::Unchanged;
    }

    ReadmeResolution::Resolved {
        readme: segments[anchor - 1..].join("/"),
        spec_root: spec_root.join(segments[..anchor - 1].join("/")),
    }
}

/// Apply resolution, yielding the effective readme and spec root for the
/// generator call.
pub fn effective_readme(spec_root: &Path, readme: &str) -> (String, PathBuf) {
    match resolve_readme(spec_root, readme) {
        ReadmeResolution::Resolved { readme, spec_root } => (readme, spec_root),
        ReadmeResolution::Unchanged => {
            (readme.replace('\\', "/"), spec_root.to_path_buf())
        }
    }
}
