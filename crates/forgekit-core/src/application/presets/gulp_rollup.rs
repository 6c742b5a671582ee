//! The Gulp+Rollup preset: a Foundry VTT module/system project built and
//! bundled by gulp and rollup, with optional TypeScript, linting, unit
//! testing, and a CSS pre-processor.
//!
//! Feature flags are frozen at construction (interactive or defaults);
//! every contribution below is a pure function of that snapshot.

use std::collections::BTreeMap;

use serde_json::json;
use tracing::{debug, instrument};

use crate::application::ports::{Choice, MultiSelectPrompt, Prompter, SelectPrompt};
use crate::application::preset::Preset;
use crate::domain::{
    GulpRollupFeatures, Options, PackageSpec, StyleKind, TargetPath, TemplatePath, TemplateVars,
    dev_dependencies,
};
use crate::domain::error::DomainError;
use crate::error::ForgeResult;

/// Preset for the Gulp+Rollup Foundry VTT project flavour.
#[derive(Debug)]
pub struct GulpRollupPreset {
    options: Options,
    features: GulpRollupFeatures,
}

impl GulpRollupPreset {
    pub const ID: &'static str = "gulp-rollup";

    /// Construct with an explicit, already-decided feature set.
    pub fn with_features(options: &Options, features: GulpRollupFeatures) -> Self {
        Self {
            options: options.clone(),
            features,
        }
    }

    /// Interactive construction: prompt for the feature set.
    ///
    /// The style kind is only asked when the pre-processor feature was
    /// selected; otherwise it is fixed to plain CSS without prompting.
    #[instrument(skip_all)]
    pub fn create(options: &Options, prompter: &dyn Prompter) -> ForgeResult<Self> {
        let feature_prompt = MultiSelectPrompt {
            id: "features",
            message: "Check the features needed for your project:",
            choices: vec![
                Choice::new("typescript", "TypeScript"),
                Choice::checked("linter", "Linter / Formatter"),
                Choice::new("test", "Unit Testing"),
                Choice::new("cssPreProcessor", "CSS Pre-processor"),
            ],
        };

        let answers = prompter.multi_select(&feature_prompt)?;
        validate_answers(&feature_prompt.choices, feature_prompt.id, &answers)?;

        let selected = |value: &str| answers.iter().any(|a| a == value);
        let use_css_pre_processor = selected("cssPreProcessor");

        let features = GulpRollupFeatures {
            use_typescript: selected("typescript"),
            use_linting: selected("linter"),
            use_testing: selected("test"),
            style: resolve_style(use_css_pre_processor, prompter)?,
        };
        debug!(?features, "feature selection frozen");

        Ok(Self::with_features(options, features))
    }

    /// Non-interactive construction with the documented defaults.
    pub fn create_default(options: &Options) -> Self {
        Self::with_features(options, GulpRollupFeatures::defaults())
    }

    pub fn features(&self) -> &GulpRollupFeatures {
        &self.features
    }

    fn name(&self) -> &str {
        self.options.name()
    }

    /// The generated `package.json`, emitted as literal content.
    fn package_manifest(&self) -> String {
        let name = self.name();
        let mut scripts = serde_json::Map::new();
        scripts.insert("build".into(), json!("gulp build"));
        scripts.insert("build:watch".into(), json!("gulp watch"));
        scripts.insert("link-project".into(), json!("gulp link"));
        scripts.insert("clean".into(), json!("gulp clean"));
        scripts.insert("bump-version".into(), json!("gulp bumpVersion"));
        if self.features.use_linting {
            let ext = if self.features.use_typescript {
                ".ts,.js"
            } else {
                ".js"
            };
            scripts.insert("lint".into(), json!(format!("eslint --ext {ext} .")));
            scripts.insert(
                "lint:fix".into(),
                json!(format!("eslint --ext {ext} --fix .")),
            );
            scripts.insert(
                "format".into(),
                json!("prettier --write \"./**/*.(js|ts|json|css|less|scss)\""),
            );
        }
        if self.features.use_testing {
            scripts.insert("test".into(), json!("jest"));
            scripts.insert(
                "test:ci".into(),
                json!("jest --ci --reporters=default --reporters=jest-junit"),
            );
        }

        let mut manifest = json!({
            "private": true,
            "name": name,
            "version": "1.0.0",
            "description": "",
            "license": "",
            "scripts": scripts,
        });
        if self.features.use_linting {
            let pattern = if self.features.use_typescript {
                "*.(ts|js)"
            } else {
                "*.js"
            };
            let mut lint_staged = serde_json::Map::new();
            lint_staged.insert(pattern.into(), json!("eslint --fix"));
            lint_staged.insert("*.(json|css|less|scss)".into(), json!("prettier --write"));
            manifest["lint-staged"] = lint_staged.into();
        }

        // to_string_pretty cannot fail on a Value we just built.
        let mut rendered = serde_json::to_string_pretty(&manifest).unwrap_or_default();
        rendered.push('\n');
        rendered
    }

    /// The module entry point source.
    fn entry_source(&self) -> String {
        let name = self.name();
        format!(
            "// Import JavaScript modules\n\n\
             // Initialize module\n\
             Hooks.once('init', async () => {{\n\
             \tconsole.log('{name} | Initializing {name}');\n\
             }});\n\n\
             // Setup module\n\
             Hooks.once('setup', async () => {{\n\
             \t// Do anything after initialization but before ready\n\
             }});\n\n\
             // When ready\n\
             Hooks.once('ready', async () => {{\n\
             \t// Do anything once the module is ready\n\
             }});\n"
        )
    }
}

impl Preset for GulpRollupPreset {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn programmatic_files(&self) -> ForgeResult<BTreeMap<TargetPath, String>> {
        let name = self.name();
        let source_ext = self.features.source_extension();
        let style_ext = self.features.style.extension();

        let mut files = BTreeMap::new();
        files.insert(TargetPath::new("package.json"), self.package_manifest());
        files.insert(
            TargetPath::new("foundryconfig.json"),
            "{\n    \"dataPath\": \"\"\n}\n".to_string(),
        );
        files.insert(
            TargetPath::try_new(format!("src/module/{name}.{source_ext}"))?,
            self.entry_source(),
        );
        files.insert(
            TargetPath::try_new(format!("src/styles/{name}.{style_ext}"))?,
            format!("/* Styles for {name} */\n"),
        );
        if self.features.use_linting {
            files.insert(
                TargetPath::new(".prettierrc.json"),
                "{\n    \"singleQuote\": true,\n    \"printWidth\": 120\n}\n".to_string(),
            );
        }
        Ok(files)
    }

    fn template_files(&self) -> ForgeResult<BTreeMap<TargetPath, TemplatePath>> {
        let mut files = BTreeMap::new();
        files.insert(
            TargetPath::new("gulpfile.js"),
            TemplatePath::new("gulp-rollup/gulpfile.js"),
        );
        files.insert(
            TargetPath::new("rollup.config.js"),
            TemplatePath::new("gulp-rollup/rollup.config.js"),
        );
        files.insert(
            TargetPath::new("src/module.json"),
            TemplatePath::new("gulp-rollup/module.json"),
        );
        files.insert(
            TargetPath::new("README.md"),
            TemplatePath::new("gulp-rollup/README.md"),
        );
        files.insert(
            TargetPath::new(".gitignore"),
            TemplatePath::new("gulp-rollup/gitignore"),
        );
        if self.features.use_typescript {
            files.insert(
                TargetPath::new("tsconfig.json"),
                TemplatePath::new("gulp-rollup/tsconfig.json"),
            );
        }
        if self.features.use_linting {
            files.insert(
                TargetPath::new(".eslintrc.js"),
                TemplatePath::new("gulp-rollup/eslintrc.js"),
            );
        }
        if self.features.use_testing {
            files.insert(
                TargetPath::new("jest.config.js"),
                TemplatePath::new("gulp-rollup/jest.config.js"),
            );
        }
        Ok(files)
    }

    fn template_variables(&self) -> ForgeResult<TemplateVars> {
        let features = &self.features;
        let mut vars = TemplateVars::new();
        vars.insert("use_typescript".into(), features.use_typescript.into());
        vars.insert("use_linting".into(), features.use_linting.into());
        vars.insert("use_testing".into(), features.use_testing.into());
        vars.insert("style_type".into(), features.style.as_str().into());
        vars.insert("style_extension".into(), features.style.extension().into());
        vars.insert(
            "source_extension".into(),
            features.source_extension().into(),
        );

        // Computed fragments the substitution-only renderer cannot derive.
        let mut eslint_plugins = Vec::new();
        if features.use_typescript {
            eslint_plugins.push("'@typescript-eslint'");
        }
        if features.use_testing {
            eslint_plugins.push("'jest'");
        }
        vars.insert("eslint_plugins".into(), eslint_plugins.join(", ").into());

        let (eslint_parser, eslint_extends) = if features.use_typescript {
            (
                "parser: '@typescript-eslint/parser',",
                "'plugin:@typescript-eslint/recommended', 'plugin:prettier/recommended'",
            )
        } else {
            (
                "",
                "'@typhonjs-fvtt/eslint-config-foundry.js', 'plugin:prettier/recommended'",
            )
        };
        vars.insert("eslint_parser".into(), eslint_parser.into());
        vars.insert("eslint_extends".into(), eslint_extends.into());
        vars.insert(
            "jest_preset".into(),
            if features.use_typescript {
                "preset: 'ts-jest',"
            } else {
                ""
            }
            .into(),
        );

        let (style_require, style_pipe) = match features.style {
            StyleKind::Scss => (
                "const sass = require('gulp-sass')(require('sass'));",
                ".pipe(sass().on('error', sass.logError))",
            ),
            StyleKind::Less => ("const less = require('gulp-less');", ".pipe(less())"),
            StyleKind::Css => ("", ""),
        };
        vars.insert("style_require".into(), style_require.into());
        vars.insert("style_pipe".into(), style_pipe.into());

        let (rollup_ts_require, rollup_ts_plugin) = if features.use_typescript {
            (
                "const typescript = require('rollup-plugin-typescript2');",
                ", typescript()",
            )
        } else {
            ("", "")
        };
        vars.insert("rollup_ts_require".into(), rollup_ts_require.into());
        vars.insert("rollup_ts_plugin".into(), rollup_ts_plugin.into());

        Ok(vars)
    }

    fn additional_directories(&self) -> ForgeResult<Vec<TargetPath>> {
        Ok(["assets", "fonts", "lang", "packs"]
            .iter()
            .map(|dir| TargetPath::new("src").join(dir))
            .collect::<Result<_, _>>()?)
    }

    fn dependencies(&self) -> ForgeResult<Vec<PackageSpec>> {
        Ok(vec![])
    }

    fn dev_dependencies(&self) -> ForgeResult<Vec<PackageSpec>> {
        Ok(dev_dependencies(&self.features))
    }

    fn post_install_commands(&self) -> ForgeResult<Vec<String>> {
        if self.features.use_linting && self.options.install_dependencies() {
            Ok(vec![
                "npm exec husky install".into(),
                "npx husky add .husky/pre-commit 'npx lint-staged'".into(),
                "npm run format".into(),
            ])
        } else {
            Ok(vec![])
        }
    }
}

/// Reject any answer that is not a declared choice value.
fn validate_answers(
    choices: &[Choice],
    prompt_id: &str,
    answers: &[String],
) -> Result<(), DomainError> {
    for answer in answers {
        if !choices.iter().any(|c| c.value == answer) {
            return Err(DomainError::InvalidSelection {
                id: prompt_id.into(),
                answer: answer.clone(),
            });
        }
    }
    Ok(())
}

/// Derive the style kind, prompting only when a pre-processor was requested.
fn resolve_style(use_css_pre_processor: bool, prompter: &dyn Prompter) -> ForgeResult<StyleKind> {
    if !use_css_pre_processor {
        return Ok(StyleKind::Css);
    }
    let prompt = SelectPrompt {
        id: "styleType",
        message: "Pick a CSS pre-processor",
        choices: vec![
            Choice::new("scss", "Sass (.scss)"),
            Choice::new("less", "Less"),
        ],
    };
    let answer = prompter.select(&prompt)?;
    validate_answers(&prompt.choices, prompt.id, std::slice::from_ref(&answer))?;
    Ok(answer.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockPrompter;
    use crate::domain::TemplateValue;

    fn options() -> Options {
        Options::new("my-module", "/projects", true, true).unwrap()
    }

    fn preset(features: GulpRollupFeatures) -> GulpRollupPreset {
        GulpRollupPreset::with_features(&options(), features)
    }

    // ── Construction ──────────────────────────────────────────────────────

    #[test]
    fn default_construction_uses_documented_defaults() {
        let preset = GulpRollupPreset::create_default(&options());
        assert_eq!(*preset.features(), GulpRollupFeatures::defaults());
    }

    #[test]
    fn interactive_construction_freezes_selected_features() {
        let mut prompter = MockPrompter::new();
        prompter.expect_multi_select().times(1).returning(|_| {
            Ok(vec![
                "typescript".into(),
                "linter".into(),
                "test".into(),
                "cssPreProcessor".into(),
            ])
        });
        prompter
            .expect_select()
            .times(1)
            .returning(|_| Ok("scss".into()));

        let preset = GulpRollupPreset::create(&options(), &prompter).unwrap();
        assert_eq!(
            *preset.features(),
            GulpRollupFeatures {
                use_typescript: true,
                use_linting: true,
                use_testing: true,
                style: StyleKind::Scss,
            }
        );
    }

    #[test]
    fn style_prompt_is_skipped_without_pre_processor() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_multi_select()
            .times(1)
            .returning(|_| Ok(vec!["linter".into()]));
        prompter.expect_select().times(0);

        let preset = GulpRollupPreset::create(&options(), &prompter).unwrap();
        assert_eq!(preset.features().style, StyleKind::Css);
    }

    #[test]
    fn unknown_feature_answer_is_rejected() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_multi_select()
            .returning(|_| Ok(vec!["webpack".into()]));

        let err = GulpRollupPreset::create(&options(), &prompter).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ForgeError::Domain(DomainError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn unknown_style_answer_is_rejected() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_multi_select()
            .returning(|_| Ok(vec!["cssPreProcessor".into()]));
        prompter
            .expect_select()
            .returning(|_| Ok("stylus".into()));

        assert!(GulpRollupPreset::create(&options(), &prompter).is_err());
    }

    // ── Contributions ─────────────────────────────────────────────────────

    #[test]
    fn default_dev_dependencies_are_base_plus_lint_groups() {
        let preset = GulpRollupPreset::create_default(&options());
        let deps = preset.dev_dependencies().unwrap();
        let names: Vec<&str> = deps.iter().map(|d| d.as_str()).collect();
        assert_eq!(
            names,
            [
                "@rollup/plugin-node-resolve",
                "chalk",
                "fs-extra",
                "gulp",
                "rollup",
                "semver",
                "yargs",
                "eslint",
                "eslint-config-prettier",
                "eslint-plugin-prettier",
                "husky",
                "lint-staged",
                "prettier",
                "@typhonjs-fvtt/eslint-config-foundry.js@0.7.9",
            ]
        );
    }

    #[test]
    fn runtime_dependencies_are_empty() {
        let preset = GulpRollupPreset::create_default(&options());
        assert!(preset.dependencies().unwrap().is_empty());
    }

    #[test]
    fn entry_and_style_files_follow_feature_extensions() {
        let preset = preset(GulpRollupFeatures {
            use_typescript: true,
            use_linting: false,
            use_testing: false,
            style: StyleKind::Scss,
        });
        let files = preset.programmatic_files().unwrap();
        assert!(files.contains_key(&TargetPath::new("src/module/my-module.ts")));
        assert!(files.contains_key(&TargetPath::new("src/styles/my-module.scss")));
    }

    #[test]
    fn package_manifest_reflects_feature_scripts() {
        let preset = preset(GulpRollupFeatures {
            use_typescript: false,
            use_linting: true,
            use_testing: true,
            style: StyleKind::Css,
        });
        let files = preset.programmatic_files().unwrap();
        let manifest = &files[&TargetPath::new("package.json")];
        assert!(manifest.contains("\"build\": \"gulp build\""));
        assert!(manifest.contains("\"lint\""));
        assert!(manifest.contains("\"test\": \"jest\""));
        assert!(manifest.contains("lint-staged"));
        assert!(manifest.contains("\"name\": \"my-module\""));
    }

    #[test]
    fn conditional_templates_track_flags() {
        let all = preset(GulpRollupFeatures {
            use_typescript: true,
            use_linting: true,
            use_testing: true,
            style: StyleKind::Less,
        });
        let files = all.template_files().unwrap();
        assert!(files.contains_key(&TargetPath::new("tsconfig.json")));
        assert!(files.contains_key(&TargetPath::new(".eslintrc.js")));
        assert!(files.contains_key(&TargetPath::new("jest.config.js")));

        let none = preset(GulpRollupFeatures {
            use_typescript: false,
            use_linting: false,
            use_testing: false,
            style: StyleKind::Css,
        });
        let files = none.template_files().unwrap();
        assert!(!files.contains_key(&TargetPath::new("tsconfig.json")));
        assert!(!files.contains_key(&TargetPath::new(".eslintrc.js")));
        assert!(!files.contains_key(&TargetPath::new("jest.config.js")));
        // The unconditional set is always present.
        assert!(files.contains_key(&TargetPath::new("gulpfile.js")));
    }

    #[test]
    fn eslint_plugins_variable_tracks_flags() {
        let preset = preset(GulpRollupFeatures {
            use_typescript: true,
            use_linting: true,
            use_testing: true,
            style: StyleKind::Css,
        });
        let vars = preset.template_variables().unwrap();
        assert_eq!(
            vars["eslint_plugins"],
            TemplateValue::Str("'@typescript-eslint', 'jest'".into())
        );
    }

    #[test]
    fn additional_directories_live_under_src() {
        let preset = GulpRollupPreset::create_default(&options());
        let dirs = preset.additional_directories().unwrap();
        assert_eq!(
            dirs,
            [
                TargetPath::new("src/assets"),
                TargetPath::new("src/fonts"),
                TargetPath::new("src/lang"),
                TargetPath::new("src/packs"),
            ]
        );
    }

    #[test]
    fn post_install_requires_linting_and_install() {
        let linted = GulpRollupPreset::create_default(&options());
        let commands = linted.post_install_commands().unwrap();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], "npm exec husky install");

        let no_install = GulpRollupPreset::with_features(
            &Options::new("my-module", "/projects", false, true).unwrap(),
            GulpRollupFeatures::defaults(),
        );
        assert!(no_install.post_install_commands().unwrap().is_empty());

        let no_lint = preset(GulpRollupFeatures {
            use_linting: false,
            ..GulpRollupFeatures::defaults()
        });
        assert!(no_lint.post_install_commands().unwrap().is_empty());
    }
}
