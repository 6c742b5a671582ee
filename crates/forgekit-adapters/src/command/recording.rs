//! Recording package manager for tests.

use std::path::Path;
use std::sync::Mutex;

use forgekit_core::{
    application::ApplicationError,
    application::ports::PackageManager,
    domain::PackageSpec,
    error::ForgeResult,
};

/// Records every install and command invocation; optionally fails one
/// configured command to exercise abort behavior.
#[derive(Debug, Default)]
pub struct RecordingPackageManager {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    installs: Vec<(Vec<PackageSpec>, Vec<PackageSpec>)>,
    commands: Vec<String>,
    fail_on: Option<String>,
}

impl RecordingPackageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given command (and only it) exit non-zero.
    pub fn failing_on(command: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                fail_on: Some(command.into()),
                ..Inner::default()
            }),
        }
    }

    pub fn installs(&self) -> Vec<(Vec<PackageSpec>, Vec<PackageSpec>)> {
        self.inner.lock().unwrap().installs.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.inner.lock().unwrap().commands.clone()
    }
}

impl PackageManager for RecordingPackageManager {
    fn install(
        &self,
        _root: &Path,
        dependencies: &[PackageSpec],
        dev_dependencies: &[PackageSpec],
    ) -> ForgeResult<()> {
        self.inner
            .lock()
            .unwrap()
            .installs
            .push((dependencies.to_vec(), dev_dependencies.to_vec()));
        Ok(())
    }

    fn run(&self, _root: &Path, command: &str) -> ForgeResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.commands.push(command.to_string());
        if inner.fail_on.as_deref() == Some(command) {
            return Err(ApplicationError::CommandFailed {
                command: command.into(),
                code: 1,
            }
            .into());
        }
        Ok(())
    }
}
