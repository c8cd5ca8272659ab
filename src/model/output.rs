//! Generation output contract returned to the CI pipeline.
use color_eyre::eyre::WrapErr;
use serde::Serialize;
use std::{fs, path::Path};

use crate::result::Result;

/// Changelog for one generated package.
///
/// The breaking-change flag is derived from the itemized list at
/// construction time and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Changelog {
    content: String,
    has_breaking_change: bool,
    breaking_change_items: Vec<String>,
}

impl Changelog {
    pub fn new(
        content: impl Into<String>,
        breaking_change_items: Vec<String>,
    ) -> Self {
        Self {
            content: content.into(),
            has_breaking_change: !breaking_change_items.is_empty(),
            breaking_change_items,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn has_breaking_change(&self) -> bool {
        self.has_breaking_change
    }

    pub fn breaking_change_items(&self) -> &[String] {
        &self.breaking_change_items
    }
}

/// Install instruction snippets for one package.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallInstructions {
    pub full: String,
}

/// One generated package's result entry, unique per namespace.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResult {
    pub package_name: String,
    pub version: String,
    pub path: Vec<String>,
    pub package_folder: String,
    pub readme_md: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<Changelog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_instructions: Option<InstallInstructions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_view_artifact: Option<String>,
    pub language: String,
    #[serde(
        rename = "typespecProject",
        skip_serializing_if = "Option::is_none"
    )]
    pub typespec_project: Option<Vec<String>>,
    pub has_exceptions: bool,
    pub result: String,
}

/// The full result list serialized once at the end of a batch run.
#[derive(Debug, Default, Serialize)]
pub struct GenerateOutput {
    pub packages: Vec<PackageResult>,
}

impl GenerateOutput {
    /// Write the output file. Failure here is fatal to the run; per-unit
    /// generation failures never are.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .wrap_err("failed to serialize generation output")?;
        fs::write(path, content).wrap_err_with(|| {
            format!("failed to write generation output {}", path.display())
        })
    }
}
