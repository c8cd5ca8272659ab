//! Single-package generation and release workflow.
use log::*;

use crate::{
    cli::ReleaseArgs,
    command::common,
    config,
    generator::{
        external::ExternalGenerator, traits::CodeGenerator,
        types::{NamespaceResult, SingleNamespaceParams},
    },
    repo::RepositoryController,
    result::Result,
};

/// Execute the release workflow for one explicit RP/namespace target.
/// Unlike the batch workflows, any failure here is immediately fatal.
pub fn execute(args: &ReleaseArgs) -> Result<()> {
    let (sdk, spec) =
        common::open_repositories(args.sdk_location(), args.spec_location())?;
    let spec_commit = spec.head_commit()?;
    let generator = ExternalGenerator::new(spec.root(), sdk.root());

    let result = run(&sdk, &generator, &spec_commit, args)?;
    info!(
        "released {} at {}",
        config::package_folder(&result.rp_name, &result.package_name),
        result.version
    );
    Ok(())
}

pub(crate) fn run(
    sdk: &dyn RepositoryController,
    generator: &dyn CodeGenerator,
    spec_commit: &str,
    args: &ReleaseArgs,
) -> Result<NamespaceResult> {
    let namespace = args
        .namespace
        .clone()
        .unwrap_or_else(|| common::default_namespace(&args.rp_name));

    let params = SingleNamespaceParams {
        rp_name: args.rp_name.clone(),
        namespace: namespace.clone(),
        spec_rp_name: args.spec_rp_name.clone(),
        version: args.version_number.clone(),
        package_title: args.package_title.clone(),
        release_date: args.release_date,
        skip_generate_example: args.skip_generate_example,
        update_spec_version: false,
        package_config: args.package_config.clone(),
        go_version: args.go_version.clone(),
    };

    // no partial-success concept for a single explicit target
    let result = generator.generate_for_single_rp_namespace(&params)?;

    if result.changelog.has_breaking_change() {
        warn!(
            "{}/{namespace} contains breaking changes:\n{}",
            args.rp_name,
            result.changelog.breaking_change_items().join("\n")
        );
    }

    if !args.skip_create_branch {
        // generation output already on disk stays valid even if the
        // branch or commit step fails past this point
        let branch = config::release_branch_name(
            &args.rp_name,
            &namespace,
            &result.version,
        );
        sdk.create_release_branch(&branch)?;
        sdk.add_release_commit(
            &args.rp_name,
            &namespace,
            spec_commit,
            &result.version,
        )?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generator::traits::MockCodeGenerator, model::output::Changelog,
        repo::MockRepositoryController,
    };

    fn release_args(rp: &str, namespace: Option<&str>) -> ReleaseArgs {
        ReleaseArgs {
            sdk_path: "/work/sdk".into(),
            spec_path: "/work/specs".into(),
            rp_name: rp.into(),
            namespace: namespace.map(|n| n.to_string()),
            version_number: None,
            package_title: None,
            sdk_repo: None,
            spec_repo: None,
            spec_rp_name: None,
            release_date: None,
            skip_create_branch: false,
            skip_generate_example: false,
            package_config: None,
            go_version: None,
        }
    }

    fn generated(rp: &str, namespace: &str, version: &str) -> NamespaceResult {
        NamespaceResult {
            rp_name: rp.into(),
            package_name: namespace.into(),
            version: version.into(),
            changelog: Changelog::new("### Other Changes", vec![]),
        }
    }

    #[test]
    fn releases_with_branch_and_scoped_commit() {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate_for_single_rp_namespace()
            .withf(|params| {
                params.rp_name == "network" && params.namespace == "armnetwork"
            })
            .times(1)
            .returning(|_| Ok(generated("network", "armnetwork", "v1.2.0")));

        let mut sdk = MockRepositoryController::new();
        sdk.expect_create_release_branch()
            .withf(|name| name.starts_with("release-network-armnetwork-v1.2.0-"))
            .times(1)
            .returning(|_| Ok(()));
        sdk.expect_add_release_commit()
            .withf(|rp, namespace, spec_commit, version| {
                rp == "network"
                    && namespace == "armnetwork"
                    && spec_commit == "abc123"
                    && version == "v1.2.0"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let args = release_args("network", Some("armnetwork"));
        let result = run(&sdk, &generator, "abc123", &args).unwrap();
        assert_eq!(result.version, "v1.2.0");
    }

    #[test]
    fn namespace_defaults_to_arm_prefix() {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate_for_single_rp_namespace()
            .withf(|params| params.namespace == "armcompute")
            .times(1)
            .returning(|_| Ok(generated("compute", "armcompute", "v3.0.0")));

        let mut sdk = MockRepositoryController::new();
        sdk.expect_create_release_branch().returning(|_| Ok(()));
        sdk.expect_add_release_commit()
            .returning(|_, _, _, _| Ok(()));

        let args = release_args("compute", None);
        run(&sdk, &generator, "abc123", &args).unwrap();
    }

    #[test]
    fn generation_failure_is_fatal_and_skips_git() {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate_for_single_rp_namespace()
            .times(1)
            .returning(|_| Err(color_eyre::eyre::eyre!("codegen failed")));

        // no git expectations: any branch/commit call fails the test
        let sdk = MockRepositoryController::new();

        let args = release_args("network", Some("armnetwork"));
        assert!(run(&sdk, &generator, "abc123", &args).is_err());
    }

    #[test]
    fn skip_create_branch_leaves_the_tree_alone() {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate_for_single_rp_namespace()
            .times(1)
            .returning(|_| Ok(generated("network", "armnetwork", "v1.2.0")));

        let sdk = MockRepositoryController::new();

        let mut args = release_args("network", Some("armnetwork"));
        args.skip_create_branch = true;
        run(&sdk, &generator, "abc123", &args).unwrap();
    }

    #[test]
    fn commit_failure_surfaces_after_generation() {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate_for_single_rp_namespace()
            .times(1)
            .returning(|_| Ok(generated("network", "armnetwork", "v1.2.0")));

        let mut sdk = MockRepositoryController::new();
        sdk.expect_create_release_branch().returning(|_| Ok(()));
        sdk.expect_add_release_commit()
            .times(1)
            .returning(|_, _, _, _| {
                Err(color_eyre::eyre::eyre!("nothing to commit"))
            });

        let args = release_args("network", Some("armnetwork"));
        assert!(run(&sdk, &generator, "abc123", &args).is_err());
    }
}
