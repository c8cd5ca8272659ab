//! Process-spawning implementation of the [`CodeGenerator`] contract.
//!
//! Invokes the generator executable once per call and parses the
//! per-namespace results it prints as JSON on stdout. Everything the tool
//! does internally (autorest, changelog computation, version math) stays
//! behind this boundary.

use color_eyre::eyre::{WrapErr, eyre};
use log::*;
use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    error::GenerateError,
    generator::{
        traits::CodeGenerator,
        types::{NamespaceResult, SingleNamespaceParams},
    },
    model::output::Changelog,
    result::Result,
};

/// Generator executable invoked when `SDKGEN_CODEGEN` is not set.
const DEFAULT_CODEGEN_COMMAND: &str = "go-codegen";

/// Runs the generator executable against local SDK and spec working trees.
pub struct ExternalGenerator {
    program: String,
    spec_root: PathBuf,
    sdk_root: PathBuf,
}

/// Wire shape of one namespace result on the generator's stdout.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawNamespaceResult {
    rp_name: String,
    package_name: String,
    version: String,
    changelog: String,
    breaking_change_items: Vec<String>,
}

impl From<RawNamespaceResult> for NamespaceResult {
    fn from(raw: RawNamespaceResult) -> Self {
        Self {
            rp_name: raw.rp_name,
            package_name: raw.package_name,
            version: raw.version,
            changelog: Changelog::new(raw.changelog, raw.breaking_change_items),
        }
    }
}

fn parse_results(stdout: &[u8]) -> Result<Vec<NamespaceResult>> {
    let raw: Vec<RawNamespaceResult> = serde_json::from_slice(stdout)
        .wrap_err("failed to parse generator output")?;
    Ok(raw.into_iter().map(NamespaceResult::from).collect())
}

impl ExternalGenerator {
    pub fn new(spec_root: PathBuf, sdk_root: PathBuf) -> Self {
        let program = env::var("SDKGEN_CODEGEN")
            .unwrap_or_else(|_| DEFAULT_CODEGEN_COMMAND.to_string());
        Self {
            program,
            spec_root,
            sdk_root,
        }
    }

    fn run(&self, args: &[String]) -> Result<Vec<NamespaceResult>> {
        debug!("invoking {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.sdk_root)
            .output()
            .wrap_err_with(|| {
                format!("failed to invoke generator '{}'", self.program)
            })?;

        if !output.status.success() {
            return Err(eyre!(
                "generator exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        parse_results(&output.stdout)
    }
}

impl CodeGenerator for ExternalGenerator {
    fn generate_for_automation(
        &self,
        readme: &str,
        spec_root: &Path,
        repo_url: &str,
        go_version: &str,
    ) -> (Vec<NamespaceResult>, Vec<GenerateError>) {
        let args = vec![
            "automation".to_string(),
            "--readme".to_string(),
            readme.to_string(),
            "--repo-url".to_string(),
            repo_url.to_string(),
            "--go-version".to_string(),
            go_version.to_string(),
            "--spec-root".to_string(),
            spec_root.display().to_string(),
        ];

        match self.run(&args) {
            Ok(results) => (results, vec![]),
            Err(err) => (
                vec![],
                vec![GenerateError::Readme {
                    readme: readme.to_string(),
                    message: format!("{err:#}"),
                }],
            ),
        }
    }

    fn generate_for_single_rp_namespace(
        &self,
        params: &SingleNamespaceParams,
    ) -> Result<NamespaceResult> {
        let mut args = vec![
            "package".to_string(),
            "--rp".to_string(),
            params.rp_name.clone(),
            "--namespace".to_string(),
            params.namespace.clone(),
            "--spec-root".to_string(),
            self.spec_root.display().to_string(),
        ];

        if let Some(spec_rp_name) = &params.spec_rp_name {
            args.push("--spec-rp-name".to_string());
            args.push(spec_rp_name.clone());
        }

        if let Some(version) = &params.version {
            args.push("--version-number".to_string());
            args.push(version.to_string());
        }

        if let Some(title) = &params.package_title {
            args.push("--package-title".to_string());
            args.push(title.clone());
        }

        if let Some(date) = &params.release_date {
            args.push("--release-date".to_string());
            args.push(date.to_string());
        }

        if let Some(package_config) = &params.package_config {
            args.push("--package-config".to_string());
            args.push(package_config.clone());
        }

        if let Some(go_version) = &params.go_version {
            args.push("--go-version".to_string());
            args.push(go_version.clone());
        }

        if params.skip_generate_example {
            args.push("--skip-generate-example".to_string());
        }

        if params.update_spec_version {
            args.push("--update-spec-version".to_string());
        }

        let results = self.run(&args)?;

        results.into_iter().next().ok_or_else(|| {
            eyre!(
                "generator produced no result for {}/{}",
                params.rp_name,
                params.namespace
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespace_results_with_derived_breaking_flag() {
        let stdout = br####"[
            {
                "rpName": "network",
                "packageName": "armnetwork",
                "version": "v2.0.0",
                "changelog": "### Breaking Changes\n- Function `NewClient` removed",
                "breakingChangeItems": ["Function `NewClient` removed"]
            },
            {
                "rpName": "network",
                "packageName": "armdns",
                "version": "v1.0.1",
                "changelog": "### Other Changes",
                "breakingChangeItems": []
            }
        ]"####;

        let results = parse_results(stdout).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].package_name, "armnetwork");
        assert!(results[0].changelog.has_breaking_change());

        assert_eq!(results[1].package_name, "armdns");
        assert!(!results[1].changelog.has_breaking_change());
    }

    #[test]
    fn rejects_malformed_generator_output() {
        assert!(parse_results(b"not json").is_err());
    }
}
