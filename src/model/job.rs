//! CI job description contract.
use color_eyre::eyre::WrapErr;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::result::Result;

/// Parameters for rendering per-package install instructions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallInstructionInput {
    pub is_public: bool,
    pub download_url_prefix: String,
    pub download_command_template: String,
}

/// Generation job description supplied by the CI pipeline.
///
/// Created once per invocation from the input file and read-only after
/// parsing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateInput {
    pub dry_run: bool,
    pub spec_folder: String,
    pub head_sha: String,
    pub head_ref: String,
    pub repo_https_url: String,
    pub trigger: String,
    pub changed_files: Vec<String>,
    /// Single related readme, kept for older pipeline payloads.
    pub related_readme_md_file: String,
    /// Many related readmes; preferred over the single field when present.
    pub related_readme_md_files: Vec<String>,
    pub install_instruction_input: Option<InstallInstructionInput>,
    #[serde(rename = "relatedTypeSpecProjectFolder")]
    pub related_typespec_project_folder: Vec<String>,
}

impl GenerateInput {
    /// Parse a job description from the CI-supplied file. Failure here is
    /// fatal to the whole run.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).wrap_err_with(|| {
            format!("failed to read job description {}", path.display())
        })?;
        let input: Self = serde_json::from_str(&content)
            .wrap_err("failed to parse job description")?;
        Ok(input)
    }

    /// The readmes this job should generate from. The many-file list wins
    /// when both forms are present.
    pub fn readmes(&self) -> Vec<String> {
        if !self.related_readme_md_files.is_empty() {
            return self.related_readme_md_files.clone();
        }

        if !self.related_readme_md_file.is_empty() {
            return vec![self.related_readme_md_file.clone()];
        }

        vec![]
    }
}
