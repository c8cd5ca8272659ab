//! Full regeneration workflow across the resource-manager tree.
use chrono::Utc;
use log::*;

use crate::{
    cli::RefreshArgs,
    command::common,
    config,
    error::{ErrorBuilder, GenerateError},
    generator::{
        external::ExternalGenerator, traits::CodeGenerator,
        types::SingleNamespaceParams,
    },
    repo::RepositoryController,
    result::Result,
};

/// Execute the refresh workflow against the SDK and spec working trees.
pub fn execute(args: &RefreshArgs) -> Result<()> {
    let (sdk, spec) =
        common::open_repositories(args.sdk_location(), args.spec_location())?;
    let spec_commit = spec.head_commit()?;
    let generator = ExternalGenerator::new(spec.root(), sdk.root());

    run(&sdk, &generator, &spec_commit, args)
}

/// Attempt every RP and namespace; a failed unit is logged, recorded, and
/// skipped while the rest of the batch proceeds.
pub(crate) fn run(
    sdk: &dyn RepositoryController,
    generator: &dyn CodeGenerator,
    spec_commit: &str,
    args: &RefreshArgs,
) -> Result<()> {
    if !args.skip_create_branch {
        let release_date =
            args.release_date.unwrap_or_else(|| Utc::now().date_naive());
        sdk.create_release_branch(&config::refresh_branch_name(release_date))?;
    }

    let rm_root = sdk.root().join(config::SDK_RESOURCE_MANAGER_ROOT);
    let rps = if args.rps.is_empty() {
        common::subdirectories(&rm_root)?
    } else {
        args.rps.clone()
    };

    let mut errors = ErrorBuilder::default();

    for rp in &rps {
        let namespaces = match common::subdirectories(&rm_root.join(rp)) {
            Ok(namespaces) => namespaces,
            Err(err) => {
                warn!("skipping rp {rp}: {err:#}");
                errors.add_one(err);
                continue;
            }
        };

        for namespace in namespaces {
            if let Err(err) =
                refresh_namespace(sdk, generator, spec_commit, args, rp, &namespace)
            {
                warn!("skipping {rp}/{namespace}: {err:#}");
                errors.add_one(GenerateError::Namespace {
                    rp: rp.clone(),
                    namespace,
                    message: format!("{err:#}"),
                });
            }
        }
    }

    errors.into_result()
}

fn refresh_namespace(
    sdk: &dyn RepositoryController,
    generator: &dyn CodeGenerator,
    spec_commit: &str,
    args: &RefreshArgs,
    rp: &str,
    namespace: &str,
) -> Result<()> {
    let package_dir = sdk.root().join(config::package_folder(rp, namespace));
    let spec_rp_name = common::resolve_spec_rp_name(&package_dir, rp)?;

    let params = SingleNamespaceParams {
        rp_name: rp.to_string(),
        namespace: namespace.to_string(),
        spec_rp_name: Some(spec_rp_name),
        release_date: args.release_date,
        skip_generate_example: args.skip_generate_example,
        update_spec_version: args.update_spec_version,
        ..SingleNamespaceParams::default()
    };

    let result = generator.generate_for_single_rp_namespace(&params)?;
    info!("refreshed {rp}/{namespace} at {}", result.version);

    if !args.skip_create_branch {
        sdk.add_release_commit(rp, namespace, spec_commit, &result.version)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generator::{traits::MockCodeGenerator, types::NamespaceResult},
        model::output::Changelog,
        repo::MockRepositoryController,
    };
    use std::{fs, path::Path};

    fn refresh_args(rps: Vec<String>) -> RefreshArgs {
        RefreshArgs {
            sdk_path: "/work/sdk".into(),
            spec_path: "/work/specs".into(),
            sdk_repo: None,
            spec_repo: None,
            release_date: None,
            skip_create_branch: false,
            skip_generate_example: false,
            rps,
            update_spec_version: false,
        }
    }

    fn seed_package(root: &Path, rp: &str, namespace: &str) {
        let dir = root.join(config::package_folder(rp, namespace));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("autorest.md"),
            format!("specification/{rp}/resource-manager/readme.md\n"),
        )
        .unwrap();
    }

    fn generated(rp: &str, namespace: &str) -> NamespaceResult {
        NamespaceResult {
            rp_name: rp.into(),
            package_name: namespace.into(),
            version: "v1.1.0".into(),
            changelog: Changelog::new("### Other Changes", vec![]),
        }
    }

    #[test]
    fn unreadable_rp_is_skipped_and_the_rest_proceed() {
        let tree = tempfile::tempdir().unwrap();
        let root = tree.path().to_path_buf();
        seed_package(&root, "compute", "armcompute");
        // "ghost" has no directory at all, so namespace enumeration fails

        let mut sdk = MockRepositoryController::new();
        let mock_root = root.clone();
        sdk.expect_root().returning(move || mock_root.clone());
        sdk.expect_create_release_branch()
            .times(1)
            .returning(|_| Ok(()));
        sdk.expect_add_release_commit()
            .withf(|rp, namespace, spec_commit, version| {
                rp == "compute"
                    && namespace == "armcompute"
                    && spec_commit == "abc123"
                    && version == "v1.1.0"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate_for_single_rp_namespace()
            .withf(|params| {
                params.rp_name == "compute"
                    && params.namespace == "armcompute"
                    && params.spec_rp_name.as_deref() == Some("compute")
            })
            .times(1)
            .returning(|params| {
                Ok(generated(&params.rp_name, &params.namespace))
            });

        let args =
            refresh_args(vec!["ghost".to_string(), "compute".to_string()]);
        let result = run(&sdk, &generator, "abc123", &args);

        // the unreadable rp surfaces in the combined error, but compute
        // was still processed
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("total 1 error(s): \n"));
        assert!(message.contains("ghost"));
    }

    #[test]
    fn failed_namespace_does_not_stop_the_batch() {
        let tree = tempfile::tempdir().unwrap();
        let root = tree.path().to_path_buf();
        seed_package(&root, "network", "armdns");
        seed_package(&root, "network", "armnetwork");

        let mut sdk = MockRepositoryController::new();
        let mock_root = root.clone();
        sdk.expect_root().returning(move || mock_root.clone());
        sdk.expect_create_release_branch()
            .times(1)
            .returning(|_| Ok(()));
        // only the namespace that generated successfully gets a commit
        sdk.expect_add_release_commit()
            .withf(|_, namespace, _, _| namespace == "armnetwork")
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate_for_single_rp_namespace()
            .times(2)
            .returning(|params| {
                if params.namespace == "armdns" {
                    Err(color_eyre::eyre::eyre!("codegen failed"))
                } else {
                    Ok(generated(&params.rp_name, &params.namespace))
                }
            });

        let args = refresh_args(vec!["network".to_string()]);
        let result = run(&sdk, &generator, "abc123", &args);

        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("total 1 error(s): \n"));
        assert!(
            message.contains("failed to generate network/armdns")
        );
    }

    #[test]
    fn skip_create_branch_skips_all_git_mutation() {
        let tree = tempfile::tempdir().unwrap();
        let root = tree.path().to_path_buf();
        seed_package(&root, "compute", "armcompute");

        let mut sdk = MockRepositoryController::new();
        let mock_root = root.clone();
        sdk.expect_root().returning(move || mock_root.clone());
        // no create_release_branch / add_release_commit expectations:
        // mockall fails the test if either is called

        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate_for_single_rp_namespace()
            .times(1)
            .returning(|params| {
                Ok(generated(&params.rp_name, &params.namespace))
            });

        let mut args = refresh_args(vec![]);
        args.skip_create_branch = true;

        run(&sdk, &generator, "abc123", &args).unwrap();
    }

    #[test]
    fn branch_creation_failure_is_fatal() {
        let mut sdk = MockRepositoryController::new();
        sdk.expect_create_release_branch()
            .times(1)
            .returning(|_| Err(color_eyre::eyre::eyre!("branch exists")));

        let generator = MockCodeGenerator::new();
        let args = refresh_args(vec![]);

        assert!(run(&sdk, &generator, "abc123", &args).is_err());
    }
}
