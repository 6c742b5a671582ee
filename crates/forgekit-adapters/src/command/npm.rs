//! npm-backed package manager adapter.
//!
//! Commands run blocking, inheriting stdio so the operator sees npm's own
//! progress output. Exit code 0 is success; anything else surfaces as
//! `ApplicationError::CommandFailed` with the command text.

use std::path::Path;
use std::process::Command;

use tracing::{debug, instrument};

use forgekit_core::{
    application::ApplicationError,
    application::ports::PackageManager,
    domain::PackageSpec,
    error::ForgeResult,
};

/// Production package manager using the `npm` CLI and `sh` for
/// post-install commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpmPackageManager;

impl NpmPackageManager {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip_all, fields(root = %root.display(), save_dev, count = specs.len()))]
    fn npm_install(&self, root: &Path, specs: &[PackageSpec], save_dev: bool) -> ForgeResult<()> {
        if specs.is_empty() {
            return Ok(());
        }

        let mut command = Command::new("npm");
        command.current_dir(root).arg("install");
        command.arg(if save_dev { "--save-dev" } else { "--save" });
        for spec in specs {
            command.arg(spec.as_str());
        }

        let status = command.status().map_err(|e| ApplicationError::InstallFailed {
            reason: format!("failed to spawn npm: {e}"),
        })?;
        if !status.success() {
            return Err(ApplicationError::CommandFailed {
                command: format!("npm install {}", if save_dev { "--save-dev" } else { "--save" }),
                code: status.code().unwrap_or(-1),
            }
            .into());
        }
        Ok(())
    }
}

impl PackageManager for NpmPackageManager {
    fn install(
        &self,
        root: &Path,
        dependencies: &[PackageSpec],
        dev_dependencies: &[PackageSpec],
    ) -> ForgeResult<()> {
        self.npm_install(root, dependencies, false)?;
        self.npm_install(root, dev_dependencies, true)
    }

    #[instrument(skip_all, fields(root = %root.display(), command))]
    fn run(&self, root: &Path, command: &str) -> ForgeResult<()> {
        debug!("running post-install command");
        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(root)
            .status()
            .map_err(|e| ApplicationError::CommandFailed {
                command: command.into(),
                code: e.raw_os_error().unwrap_or(-1),
            })?;

        if !status.success() {
            return Err(ApplicationError::CommandFailed {
                command: command.into(),
                code: status.code().unwrap_or(-1),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_install_is_a_no_op() {
        let manager = NpmPackageManager::new();
        // No npm invocation happens for empty lists, so this passes even
        // on machines without npm.
        manager.install(Path::new("/nonexistent"), &[], &[]).unwrap();
    }

    #[test]
    fn shell_exit_codes_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let manager = NpmPackageManager::new();

        manager.run(dir.path(), "true").unwrap();

        let err = manager.run(dir.path(), "exit 3").unwrap_err();
        match err {
            forgekit_core::error::ForgeError::Application(ApplicationError::CommandFailed {
                command,
                code,
            }) => {
                assert_eq!(command, "exit 3");
                assert_eq!(code, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
