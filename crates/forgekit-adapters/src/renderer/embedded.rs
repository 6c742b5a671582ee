//! Renderer over the template assets compiled into the binary.
//!
//! Templates use `{{variable}}` placeholders. Unknown variables render as
//! empty text rather than failing — disabled feature flags simply erase
//! their snippet. Only an unknown template path is an error.

use forgekit_core::{
    application::ports::TemplateRenderer,
    domain::{TemplatePath, TemplateVars},
    error::ForgeResult,
};
use tracing::instrument;

/// The assets shipped with this build, keyed by logical template path.
const TEMPLATES: &[(&str, &str)] = &[
    (
        "gulp-rollup/gulpfile.js",
        include_str!("../../templates/gulp-rollup/gulpfile.js"),
    ),
    (
        "gulp-rollup/rollup.config.js",
        include_str!("../../templates/gulp-rollup/rollup.config.js"),
    ),
    (
        "gulp-rollup/module.json",
        include_str!("../../templates/gulp-rollup/module.json"),
    ),
    (
        "gulp-rollup/README.md",
        include_str!("../../templates/gulp-rollup/README.md"),
    ),
    (
        "gulp-rollup/gitignore",
        include_str!("../../templates/gulp-rollup/gitignore"),
    ),
    (
        "gulp-rollup/tsconfig.json",
        include_str!("../../templates/gulp-rollup/tsconfig.json"),
    ),
    (
        "gulp-rollup/eslintrc.js",
        include_str!("../../templates/gulp-rollup/eslintrc.js"),
    ),
    (
        "gulp-rollup/jest.config.js",
        include_str!("../../templates/gulp-rollup/jest.config.js"),
    ),
];

/// Renderer backed by the embedded template table.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedRenderer;

impl EmbeddedRenderer {
    pub fn new() -> Self {
        Self
    }

    fn lookup(template: &TemplatePath) -> Option<&'static str> {
        TEMPLATES
            .iter()
            .find(|(path, _)| *path == template.as_str())
            .map(|(_, content)| *content)
    }
}

impl TemplateRenderer for EmbeddedRenderer {
    #[instrument(skip_all, fields(template = %template))]
    fn render(&self, template: &TemplatePath, vars: &TemplateVars) -> ForgeResult<String> {
        let source = Self::lookup(template).ok_or_else(|| {
            forgekit_core::application::ApplicationError::RenderFailed {
                template: template.to_string(),
                reason: "no such embedded template".into(),
            }
        })?;
        Ok(substitute(source, vars))
    }
}

/// Replace every `{{name}}` placeholder; unknown names become empty text.
fn substitute(source: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                if let Some(value) = vars.get(key) {
                    out.push_str(value.render());
                }
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated placeholder: keep the raw text.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
