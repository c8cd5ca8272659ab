//! Shared helpers for the workflow commands.
use color_eyre::eyre::WrapErr;
use log::*;
use regex::Regex;
use std::{fs, path::Path};

use crate::{repo::GitRepository, result::Result};

/// Open the SDK and spec working trees named on the command line.
pub fn open_repositories(
    sdk_path: &Path,
    spec_path: &Path,
) -> Result<(GitRepository, GitRepository)> {
    let sdk = GitRepository::open(sdk_path)
        .wrap_err("failed to open SDK repository")?;
    let spec = GitRepository::open(spec_path)
        .wrap_err("failed to open spec repository")?;
    Ok((sdk, spec))
}

/// Default namespace for an RP when none is given explicitly.
pub fn default_namespace(rp_name: &str) -> String {
    format!("arm{rp_name}")
}

/// Extract the spec-side RP name recorded in a package's autorest.md.
///
/// Falls back to the SDK-side RP name when the file carries no
/// specification path.
pub fn resolve_spec_rp_name(package_dir: &Path, rp_name: &str) -> Result<String> {
    let autorest = package_dir.join("autorest.md");
    let content = fs::read_to_string(&autorest)
        .wrap_err_with(|| format!("failed to read {}", autorest.display()))?;

    let pattern = Regex::new(r"specification/([^/]+)/resource-manager")?;

    Ok(match pattern.captures(&content) {
        Some(captures) => captures[1].to_string(),
        None => {
            warn!(
                "no specification path in {}: falling back to rp name {rp_name}",
                autorest.display()
            );
            rp_name.to_string()
        }
    })
}

/// Enumerate the immediate subdirectories of `dir`, sorted by name.
pub fn subdirectories(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .wrap_err_with(|| format!("failed to enumerate {}", dir.display()))?;

    let mut names = vec![];
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir()
            && let Some(name) = entry.file_name().to_str()
        {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_namespace_prefixes_arm() {
        assert_eq!(default_namespace("network"), "armnetwork");
    }

    #[test]
    fn spec_rp_name_comes_from_autorest_md() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("autorest.md"),
            "``` yaml\nrequire:\n- https://github.com/Azure/azure-rest-api-specs/blob/abc123/specification/azsadmin/resource-manager/network/readme.md\n```\n",
        )
        .unwrap();

        let name = resolve_spec_rp_name(dir.path(), "network").unwrap();
        assert_eq!(name, "azsadmin");
    }

    #[test]
    fn spec_rp_name_falls_back_to_sdk_rp_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("autorest.md"), "no spec path here\n")
            .unwrap();

        let name = resolve_spec_rp_name(dir.path(), "network").unwrap();
        assert_eq!(name, "network");
    }

    #[test]
    fn missing_autorest_md_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_spec_rp_name(dir.path(), "network").is_err());
    }

    #[test]
    fn subdirectories_skips_plain_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("file.txt"), "not a dir").unwrap();

        assert_eq!(subdirectories(dir.path()).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn subdirectories_errors_on_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(subdirectories(&dir.path().join("missing")).is_err());
    }
}
