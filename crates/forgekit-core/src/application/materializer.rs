//! Materializer - main application orchestrator.
//!
//! Turns N preset contribution bundles plus the run options into a
//! [`MergedPlan`], then executes it through the driven ports:
//!
//! 1. Collect one bundle per preset, in registration order
//! 2. Merge (pure, conflict-checked — nothing written on failure)
//! 3. Create directories, write literal files, render templated files
//! 4. Place `.gitkeep` markers, initialise version control
//! 5. Install dependencies, then run post-install commands in order
//!
//! Execution failures abort remaining steps but never roll back: the
//! operator keeps the partial tree and a precise error for inspection.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::application::ApplicationError;
use crate::application::ports::{Filesystem, PackageManager, TemplateRenderer};
use crate::application::preset::{Preset, collect_bundle};
use crate::domain::{FileSource, MergedPlan, Options, PLACEHOLDER_FILE};
use crate::error::ForgeResult;

/// Main materialization service.
///
/// Depends only on the preset contract and the driven ports, never on a
/// concrete preset variant.
pub struct Materializer {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    packages: Box<dyn PackageManager>,
}

impl Materializer {
    /// Create a new materializer with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        packages: Box<dyn PackageManager>,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            packages,
        }
    }

    /// The project root a run will write into.
    pub fn project_root(options: &Options) -> PathBuf {
        options.target_directory().join(options.name())
    }

    /// Build the merged plan without touching the filesystem.
    ///
    /// Used directly for dry runs; [`Self::materialize`] calls it first.
    #[instrument(skip_all, fields(presets = presets.len(), project = %options.name()))]
    pub fn plan(&self, presets: &[Box<dyn Preset>], options: &Options) -> ForgeResult<MergedPlan> {
        let bundles = presets
            .iter()
            .map(|preset| collect_bundle(preset.as_ref()))
            .collect::<ForgeResult<Vec<_>>>()?;
        let plan = MergedPlan::merge(&bundles, options)?;
        debug!(
            files = plan.files().len(),
            directories = plan.directories().len(),
            dev_dependencies = plan.dev_dependencies().len(),
            "plan merged"
        );
        Ok(plan)
    }

    /// Plan and execute a full scaffolding run.
    #[instrument(skip_all, fields(project = %options.name()))]
    pub fn materialize(
        &self,
        presets: &[Box<dyn Preset>],
        options: &Options,
    ) -> ForgeResult<MergedPlan> {
        let root = Self::project_root(options);
        if self.filesystem.exists(&root) {
            return Err(ApplicationError::TargetExists { path: root }.into());
        }

        let plan = self.plan(presets, options)?;
        self.execute(&plan, options, &root)?;
        info!(root = %root.display(), "materialization completed");
        Ok(plan)
    }

    /// Execute an already-merged plan into `root`.
    fn execute(&self, plan: &MergedPlan, options: &Options, root: &Path) -> ForgeResult<()> {
        self.write_tree(plan, options, root)?;

        if options.initialize_vcs() {
            self.packages.run(root, "git init")?;
        }

        if options.install_dependencies() {
            self.packages
                .install(root, plan.dependencies(), plan.dev_dependencies())?;

            // Strictly sequential: later commands may depend on earlier
            // ones' side effects. First failure aborts the rest.
            for command in plan.post_install_commands() {
                self.packages.run(root, command)?;
            }
        }

        Ok(())
    }

    /// Create directories and write all planned files.
    fn write_tree(&self, plan: &MergedPlan, options: &Options, root: &Path) -> ForgeResult<()> {
        self.filesystem.create_dir_all(root)?;

        // Sorted order puts ancestors before their children.
        for dir in plan.directories() {
            self.filesystem.create_dir_all(&root.join(dir))?;
        }

        for (target, file) in plan.files() {
            let path = root.join(target);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            match &file.source {
                FileSource::Literal(content) => {
                    self.filesystem.write_file(&path, content)?;
                }
                FileSource::Template(template) => {
                    let rendered = self.renderer.render(template, plan.variables())?;
                    self.filesystem.write_file(&path, &rendered)?;
                }
            }
        }

        // Keep empty directories alive under version control.
        if options.initialize_vcs() {
            for dir in plan.empty_directories() {
                let marker = root.join(dir).join(PLACEHOLDER_FILE);
                self.filesystem.write_file(&marker, "")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use crate::application::ports::{
        MockFilesystem, MockPackageManager, MockTemplateRenderer,
    };
    use crate::domain::{
        PackageSpec, TargetPath, TemplatePath, TemplateVars,
    };
    use crate::error::ForgeError;

    struct StubPreset {
        id: &'static str,
        files: BTreeMap<TargetPath, String>,
        templates: BTreeMap<TargetPath, TemplatePath>,
        dirs: Vec<TargetPath>,
        commands: Vec<String>,
    }

    impl StubPreset {
        fn new(id: &'static str) -> Self {
            Self {
                id,
                files: BTreeMap::new(),
                templates: BTreeMap::new(),
                dirs: vec![],
                commands: vec![],
            }
        }
    }

    impl Preset for StubPreset {
        fn id(&self) -> &'static str {
            self.id
        }
        fn programmatic_files(&self) -> ForgeResult<BTreeMap<TargetPath, String>> {
            Ok(self.files.clone())
        }
        fn template_files(&self) -> ForgeResult<BTreeMap<TargetPath, TemplatePath>> {
            Ok(self.templates.clone())
        }
        fn template_variables(&self) -> ForgeResult<TemplateVars> {
            Ok(TemplateVars::new())
        }
        fn additional_directories(&self) -> ForgeResult<Vec<TargetPath>> {
            Ok(self.dirs.clone())
        }
        fn dependencies(&self) -> ForgeResult<Vec<PackageSpec>> {
            Ok(vec![])
        }
        fn dev_dependencies(&self) -> ForgeResult<Vec<PackageSpec>> {
            Ok(vec![])
        }
        fn post_install_commands(&self) -> ForgeResult<Vec<String>> {
            Ok(self.commands.clone())
        }
    }

    fn options(install: bool, vcs: bool) -> Options {
        Options::new("my-module", "/projects", install, vcs).unwrap()
    }

    fn boxed(preset: StubPreset) -> Box<dyn Preset> {
        Box::new(preset)
    }

    /// A filesystem mock that records writes and never fails.
    fn permissive_filesystem(writes: Arc<Mutex<Vec<PathBuf>>>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(move |path, _| {
            writes.lock().unwrap().push(path.to_path_buf());
            Ok(())
        });
        fs
    }

    fn no_render() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|_, _| Ok(String::new()));
        renderer
    }

    #[test]
    fn conflicting_presets_write_nothing() {
        let mut first = StubPreset::new("alpha");
        first.files.insert(TargetPath::new("a.txt"), "A".into());
        let mut second = StubPreset::new("beta");
        second.files.insert(TargetPath::new("a.txt"), "B".into());

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        // Planning must fail before any mutation.
        fs.expect_create_dir_all().times(0);
        fs.expect_write_file().times(0);

        let materializer = Materializer::new(
            Box::new(fs),
            Box::new(MockTemplateRenderer::new()),
            Box::new(MockPackageManager::new()),
        );
        let err = materializer
            .materialize(&[boxed(first), boxed(second)], &options(false, false))
            .unwrap_err();
        assert!(err.is_planning_failure());
    }

    #[test]
    fn escaping_path_writes_nothing() {
        // An escaping path cannot even be constructed, so a preset that
        // tries one fails during bundle collection.
        struct EvilPreset;
        impl Preset for EvilPreset {
            fn id(&self) -> &'static str {
                "evil"
            }
            fn programmatic_files(&self) -> ForgeResult<BTreeMap<TargetPath, String>> {
                let mut files = BTreeMap::new();
                files.insert(TargetPath::try_new("../escape.txt")?, "boom".into());
                Ok(files)
            }
            fn template_files(&self) -> ForgeResult<BTreeMap<TargetPath, TemplatePath>> {
                Ok(BTreeMap::new())
            }
            fn template_variables(&self) -> ForgeResult<TemplateVars> {
                Ok(TemplateVars::new())
            }
            fn additional_directories(&self) -> ForgeResult<Vec<TargetPath>> {
                Ok(vec![])
            }
            fn dependencies(&self) -> ForgeResult<Vec<PackageSpec>> {
                Ok(vec![])
            }
            fn dev_dependencies(&self) -> ForgeResult<Vec<PackageSpec>> {
                Ok(vec![])
            }
            fn post_install_commands(&self) -> ForgeResult<Vec<String>> {
                Ok(vec![])
            }
        }

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().times(0);
        fs.expect_write_file().times(0);

        let materializer = Materializer::new(
            Box::new(fs),
            Box::new(MockTemplateRenderer::new()),
            Box::new(MockPackageManager::new()),
        );
        let err = materializer
            .materialize(&[Box::new(EvilPreset) as Box<dyn Preset>], &options(false, false))
            .unwrap_err();
        assert!(err.is_planning_failure());
    }

    #[test]
    fn existing_target_is_rejected_before_planning() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);

        let materializer = Materializer::new(
            Box::new(fs),
            Box::new(MockTemplateRenderer::new()),
            Box::new(MockPackageManager::new()),
        );
        let err = materializer
            .materialize(&[], &options(false, false))
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::TargetExists { .. })
        ));
    }

    #[test]
    fn literal_and_templated_files_are_written() {
        let mut preset = StubPreset::new("alpha");
        preset
            .files
            .insert(TargetPath::new("package.json"), "{}".into());
        preset.templates.insert(
            TargetPath::new("gulpfile.js"),
            TemplatePath::new("gulp-rollup/gulpfile.js"),
        );

        let writes = Arc::new(Mutex::new(Vec::new()));
        let fs = permissive_filesystem(writes.clone());
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .times(1)
            .returning(|_, _| Ok("rendered".into()));

        let materializer = Materializer::new(
            Box::new(fs),
            Box::new(renderer),
            Box::new(MockPackageManager::new()),
        );
        materializer
            .materialize(&[boxed(preset)], &options(false, false))
            .unwrap();

        let written = writes.lock().unwrap();
        assert!(written.contains(&PathBuf::from("/projects/my-module/package.json")));
        assert!(written.contains(&PathBuf::from("/projects/my-module/gulpfile.js")));
    }

    #[test]
    fn placeholder_written_only_under_vcs() {
        let mut preset = StubPreset::new("alpha");
        preset.dirs.push(TargetPath::new("src/packs"));

        let writes = Arc::new(Mutex::new(Vec::new()));
        let fs = permissive_filesystem(writes.clone());
        let mut packages = MockPackageManager::new();
        packages.expect_run().returning(|_, _| Ok(()));

        let materializer =
            Materializer::new(Box::new(fs), Box::new(no_render()), Box::new(packages));
        materializer
            .materialize(&[boxed(preset)], &options(false, true))
            .unwrap();
        assert_eq!(
            *writes.lock().unwrap(),
            [PathBuf::from("/projects/my-module/src/packs/.gitkeep")]
        );

        // Without VCS initialisation, the directory stays empty.
        let mut preset = StubPreset::new("alpha");
        preset.dirs.push(TargetPath::new("src/packs"));
        let writes = Arc::new(Mutex::new(Vec::new()));
        let fs = permissive_filesystem(writes.clone());
        let materializer = Materializer::new(
            Box::new(fs),
            Box::new(no_render()),
            Box::new(MockPackageManager::new()),
        );
        materializer
            .materialize(&[boxed(preset)], &options(false, false))
            .unwrap();
        assert!(writes.lock().unwrap().is_empty());
    }

    #[test]
    fn post_install_aborts_on_first_failure() {
        let mut preset = StubPreset::new("alpha");
        preset.commands = vec!["c1".into(), "c2".into(), "c3".into()];

        let writes = Arc::new(Mutex::new(Vec::new()));
        let fs = permissive_filesystem(writes);

        let ran = Arc::new(Mutex::new(Vec::new()));
        let ran_in_mock = ran.clone();
        let mut packages = MockPackageManager::new();
        packages.expect_install().returning(|_, _, _| Ok(()));
        packages.expect_run().returning(move |_, command| {
            ran_in_mock.lock().unwrap().push(command.to_string());
            if command == "c2" {
                Err(ApplicationError::CommandFailed {
                    command: command.into(),
                    code: 1,
                }
                .into())
            } else {
                Ok(())
            }
        });

        let materializer =
            Materializer::new(Box::new(fs), Box::new(no_render()), Box::new(packages));
        let err = materializer
            .materialize(&[boxed(preset)], &options(true, false))
            .unwrap_err();

        assert_eq!(*ran.lock().unwrap(), ["c1", "c2"]);
        match err {
            ForgeError::Application(ApplicationError::CommandFailed { command, code }) => {
                assert_eq!(command, "c2");
                assert_eq!(code, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn install_skipped_when_not_requested() {
        let mut preset = StubPreset::new("alpha");
        preset.commands = vec!["c1".into()];

        let writes = Arc::new(Mutex::new(Vec::new()));
        let fs = permissive_filesystem(writes);
        let mut packages = MockPackageManager::new();
        packages.expect_install().times(0);
        packages.expect_run().times(0);

        let materializer =
            Materializer::new(Box::new(fs), Box::new(no_render()), Box::new(packages));
        materializer
            .materialize(&[boxed(preset)], &options(false, false))
            .unwrap();
    }
}
