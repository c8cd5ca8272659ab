//! Git working-tree operations for release branches and commits.
//!
//! The working tree is assumed to be exclusively owned by the current
//! process for the duration of a run; no file locking or multi-process
//! coordination is performed.

use color_eyre::eyre::{WrapErr, eyre};
use git2::IndexAddOption;
use log::*;
use std::path::{Path, PathBuf};

use crate::{config, result::Result};

/// Contract for version-control operations against an SDK working tree,
/// modeled as an interface so workflows can be tested without touching a
/// real repository.
#[cfg_attr(test, mockall::automock)]
pub trait RepositoryController {
    /// Root of the working tree.
    fn root(&self) -> PathBuf;

    /// Commit hash currently checked out at HEAD. Used to pin the spec
    /// repository state into release commits.
    fn head_commit(&self) -> Result<String>;

    /// Create and check out a release branch. The name's uniqueness is the
    /// caller's responsibility (timestamp suffix); this call does not
    /// guarantee it.
    fn create_release_branch(&self, name: &str) -> Result<()>;

    /// Stage and commit only the files under the released package's
    /// directory, recording the spec commit pin in the message. Never
    /// stages the entire working tree, so sequential releases of unrelated
    /// packages remain independently auditable commits.
    fn add_release_commit(
        &self,
        rp: &str,
        namespace: &str,
        spec_commit: &str,
        version: &str,
    ) -> Result<()>;
}

/// git2-backed repository controller over a local working tree.
pub struct GitRepository {
    root: PathBuf,
    repo: git2::Repository,
}

impl GitRepository {
    /// Open an existing working tree, validating it is usable.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = git2::Repository::open(path).wrap_err_with(|| {
            format!("failed to open repository at {}", path.display())
        })?;
        let root = repo
            .workdir()
            .ok_or_else(|| {
                eyre!(
                    "repository at {} has no working directory",
                    path.display()
                )
            })?
            .to_path_buf();
        Ok(Self { root, repo })
    }

    fn signature(&self) -> Result<git2::Signature<'static>> {
        let cfg = self.repo.config()?.snapshot()?;
        let user = cfg.get_str("user.name")?;
        let email = cfg.get_str("user.email")?;
        Ok(git2::Signature::now(user, email)?)
    }
}

impl RepositoryController for GitRepository {
    fn root(&self) -> PathBuf {
        self.root.clone()
    }

    fn head_commit(&self) -> Result<String> {
        Ok(self.repo.head()?.peel_to_commit()?.id().to_string())
    }

    fn create_release_branch(&self, name: &str) -> Result<()> {
        info!("creating release branch: {name}");
        let commit = self.repo.head()?.peel_to_commit()?;
        self.repo.branch(name, &commit, true)?;

        let ref_name = format!("refs/heads/{name}");
        let target = self.repo.revparse_single(&ref_name)?;
        self.repo.checkout_tree(&target, None)?;
        self.repo.set_head(&ref_name)?;
        Ok(())
    }

    fn add_release_commit(
        &self,
        rp: &str,
        namespace: &str,
        spec_commit: &str,
        version: &str,
    ) -> Result<()> {
        let package_dir = config::package_folder(rp, namespace);
        debug!("staging {package_dir}");

        let mut index = self.repo.index()?;
        index.add_all(
            [package_dir.as_str()],
            IndexAddOption::DEFAULT,
            None,
        )?;
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let parent = self.repo.head()?.peel_to_commit()?;
        let signature = self.signature()?;
        let message =
            config::release_commit_message(rp, namespace, version, spec_commit);

        info!("committing release: {message}");
        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }
}
