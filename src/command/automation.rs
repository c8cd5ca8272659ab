//! CI batch generation workflow.
use color_eyre::eyre::WrapErr;
use log::*;
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    artifact,
    cli::AutomationArgs,
    config,
    error::ErrorBuilder,
    generator::{
        external::ExternalGenerator, traits::CodeGenerator,
        types::NamespaceResult,
    },
    model::{
        job::GenerateInput,
        output::{GenerateOutput, InstallInstructions, PackageResult},
    },
    result::Result,
    spec_path,
};

/// Go toolchain version used when the job does not pin one.
const DEFAULT_GO_VERSION: &str = "1.23";

/// Execute the automation workflow: read the job description, generate
/// from every related readme, and write the output file before reporting
/// per-readme failures.
pub fn execute(args: &AutomationArgs) -> Result<()> {
    let input = GenerateInput::from_file(&args.input_file)?;
    let sdk_root =
        env::current_dir().wrap_err("failed to resolve SDK working tree")?;
    let go_version = args
        .go_version
        .clone()
        .unwrap_or_else(|| DEFAULT_GO_VERSION.to_string());

    if input.dry_run {
        info!("dry run requested by job description");
    }

    let generator = ExternalGenerator::new(
        PathBuf::from(&input.spec_folder),
        sdk_root.clone(),
    );
    let (output, errors) = run(&input, &generator, &sdk_root, &go_version);

    // The output file is written before any aggregated error is returned,
    // so the pipeline always receives the best-effort partial result list.
    output.write_file(&args.output_file)?;
    info!(
        "wrote {} package result(s) to {}",
        output.packages.len(),
        args.output_file.display()
    );

    errors.into_result()
}

/// Attempt every readme; a failed readme is recorded and the batch moves
/// on. Failed units are never retried.
pub(crate) fn run(
    input: &GenerateInput,
    generator: &dyn CodeGenerator,
    sdk_root: &Path,
    go_version: &str,
) -> (GenerateOutput, ErrorBuilder) {
    let mut errors = ErrorBuilder::default();
    let mut packages = vec![];
    let spec_root = Path::new(&input.spec_folder);

    for readme in input.readmes() {
        let (readme, readme_spec_root) =
            spec_path::effective_readme(spec_root, &readme);
        if readme_spec_root != spec_root {
            debug!(
                "rewrote spec root to {} for readme {readme}",
                readme_spec_root.display()
            );
        }
        info!("generating from readme: {readme}");

        let (results, readme_errors) = generator.generate_for_automation(
            &readme,
            &readme_spec_root,
            &input.repo_https_url,
            go_version,
        );

        if !readme_errors.is_empty() {
            // the readme's entire fan-out is discarded
            errors.add(readme_errors);
            continue;
        }

        for result in results {
            packages.push(package_result(input, sdk_root, &readme, result));
        }
    }

    (GenerateOutput { packages }, errors)
}

fn package_result(
    input: &GenerateInput,
    sdk_root: &Path,
    readme: &str,
    result: NamespaceResult,
) -> PackageResult {
    let package_folder =
        config::package_folder(&result.rp_name, &result.package_name);
    let api_view_artifact = package_artifact(sdk_root, &result);

    let install_instructions =
        input.install_instruction_input.as_ref().map(|_| {
            InstallInstructions {
                full: format!(
                    "go get {}",
                    config::module_path(&result.rp_name, &result.package_name)
                ),
            }
        });

    let typespec_project = (!input.related_typespec_project_folder.is_empty())
        .then(|| input.related_typespec_project_folder.clone());

    PackageResult {
        package_name: result.package_name,
        version: result.version,
        path: vec![package_folder.clone()],
        package_folder,
        readme_md: vec![readme.to_string()],
        changelog: Some(result.changelog),
        artifacts: None,
        install_instructions,
        api_view_artifact,
        language: config::LANGUAGE.to_string(),
        typespec_project,
        has_exceptions: false,
        result: "succeeded".to_string(),
    }
}

/// Best-effort packaging of the generated source for API-review tooling.
/// Failure is logged and never escalates past this function.
fn package_artifact(
    sdk_root: &Path,
    result: &NamespaceResult,
) -> Option<String> {
    let relative =
        config::api_view_artifact_path(&result.rp_name, &result.package_name);
    let source = sdk_root
        .join(config::package_folder(&result.rp_name, &result.package_name));

    match artifact::package(&source, &sdk_root.join(&relative)) {
        Ok(()) => Some(relative),
        Err(err) => {
            warn!(
                "failed to package {}/{} for api review: {err:#}",
                result.rp_name, result.package_name
            );
            None
        }
    }
}
