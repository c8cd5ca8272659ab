//! CLI argument parsing for the generation workflows.
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use semver::Version;
use std::path::PathBuf;

/// Global CLI arguments for the release-generation pipeline.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Generation workflow subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Batch generation driven by a CI job description file.
    AutomationV2(AutomationArgs),

    /// Regenerate every package under the SDK resource-manager tree.
    RefreshV2(RefreshArgs),

    /// Generate and release a single RP/namespace package.
    ReleaseV2(ReleaseArgs),
}

#[derive(clap::Args, Debug)]
pub struct AutomationArgs {
    /// Path to the generation job description JSON.
    pub input_file: PathBuf,

    /// Path to write the generation output JSON.
    pub output_file: PathBuf,

    /// Go toolchain version passed to the code generator.
    pub go_version: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RefreshArgs {
    /// Path to the SDK repository working tree.
    pub sdk_path: PathBuf,

    /// Path to the specification repository working tree.
    pub spec_path: PathBuf,

    #[arg(long)]
    /// Override location for the SDK repository.
    pub sdk_repo: Option<PathBuf>,

    #[arg(long)]
    /// Override location for the specification repository.
    pub spec_repo: Option<PathBuf>,

    #[arg(long)]
    /// Release date recorded in generated changelogs (YYYY-MM-DD).
    pub release_date: Option<NaiveDate>,

    #[arg(long, default_value_t = false)]
    /// Skip creating the refresh release branch and release commits.
    pub skip_create_branch: bool,

    #[arg(long, default_value_t = false)]
    /// Skip generating example code for each package.
    pub skip_generate_example: bool,

    #[arg(long, value_delimiter = ',')]
    /// Resource providers to refresh; all of them when omitted.
    pub rps: Vec<String>,

    #[arg(long, default_value_t = false)]
    /// Update the pinned spec reference in each package's autorest.md.
    pub update_spec_version: bool,
}

#[derive(clap::Args, Debug)]
pub struct ReleaseArgs {
    /// Path to the SDK repository working tree.
    pub sdk_path: PathBuf,

    /// Path to the specification repository working tree.
    pub spec_path: PathBuf,

    /// Resource provider to release.
    pub rp_name: String,

    /// Package namespace; defaults to "arm{rp-name}".
    pub namespace: Option<String>,

    #[arg(long)]
    /// Explicit version for the release instead of a computed one.
    pub version_number: Option<Version>,

    #[arg(long)]
    /// Title recorded in the generated package.
    pub package_title: Option<String>,

    #[arg(long)]
    /// Override location for the SDK repository.
    pub sdk_repo: Option<PathBuf>,

    #[arg(long)]
    /// Override location for the specification repository.
    pub spec_repo: Option<PathBuf>,

    #[arg(long)]
    /// Spec-side RP name when it differs from the SDK-side one.
    pub spec_rp_name: Option<String>,

    #[arg(long)]
    /// Release date recorded in the generated changelog (YYYY-MM-DD).
    pub release_date: Option<NaiveDate>,

    #[arg(long, default_value_t = false)]
    /// Skip creating the release branch and release commit.
    pub skip_create_branch: bool,

    #[arg(long, default_value_t = false)]
    /// Skip generating example code for the package.
    pub skip_generate_example: bool,

    #[arg(long)]
    /// Additional package configuration passed to the generator.
    pub package_config: Option<String>,

    #[arg(long)]
    /// Go toolchain version passed to the code generator.
    pub go_version: Option<String>,
}

impl RefreshArgs {
    /// Effective SDK working-tree location.
    pub fn sdk_location(&self) -> &PathBuf {
        self.sdk_repo.as_ref().unwrap_or(&self.sdk_path)
    }

    /// Effective specification working-tree location.
    pub fn spec_location(&self) -> &PathBuf {
        self.spec_repo.as_ref().unwrap_or(&self.spec_path)
    }
}

impl ReleaseArgs {
    /// Effective SDK working-tree location.
    pub fn sdk_location(&self) -> &PathBuf {
        self.sdk_repo.as_ref().unwrap_or(&self.sdk_path)
    }

    /// Effective specification working-tree location.
    pub fn spec_location(&self) -> &PathBuf {
        self.spec_repo.as_ref().unwrap_or(&self.spec_path)
    }
}
