//! Feature-flag value objects for the Gulp+Rollup preset.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! A [`GulpRollupFeatures`] snapshot is frozen when the preset is
//! constructed (interactively or from defaults) and never mutated
//! afterwards; every contribution method is a pure function of it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

// ── StyleKind ─────────────────────────────────────────────────────────────────

/// The stylesheet dialect the generated pipeline compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Css,
    Less,
    Scss,
}

impl StyleKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Less => "less",
            Self::Scss => "scss",
        }
    }

    /// File extension of source stylesheets, without the dot.
    pub const fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Whether a pre-processor is involved at all.
    pub const fn is_preprocessed(&self) -> bool {
        !matches!(self, Self::Css)
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "less" => Ok(Self::Less),
            "scss" | "sass" => Ok(Self::Scss),
            other => Err(DomainError::InvalidStyleKind(other.into())),
        }
    }
}

// ── GulpRollupFeatures ────────────────────────────────────────────────────────

/// Frozen feature selection for the Gulp+Rollup flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GulpRollupFeatures {
    pub use_typescript: bool,
    pub use_linting: bool,
    pub use_testing: bool,
    pub style: StyleKind,
}

impl GulpRollupFeatures {
    /// The documented non-interactive defaults: linting on, everything else
    /// off, plain CSS.
    pub const fn defaults() -> Self {
        Self {
            use_typescript: false,
            use_linting: true,
            use_testing: false,
            style: StyleKind::Css,
        }
    }

    /// File extension of source code, without the dot.
    pub const fn source_extension(&self) -> &'static str {
        if self.use_typescript { "ts" } else { "js" }
    }
}

impl Default for GulpRollupFeatures {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_kind_parses_aliases() {
        assert_eq!("scss".parse::<StyleKind>().unwrap(), StyleKind::Scss);
        assert_eq!("sass".parse::<StyleKind>().unwrap(), StyleKind::Scss);
        assert_eq!("LESS".parse::<StyleKind>().unwrap(), StyleKind::Less);
        assert!("stylus".parse::<StyleKind>().is_err());
    }

    #[test]
    fn css_is_not_preprocessed() {
        assert!(!StyleKind::Css.is_preprocessed());
        assert!(StyleKind::Less.is_preprocessed());
        assert!(StyleKind::Scss.is_preprocessed());
    }

    #[test]
    fn defaults_enable_only_linting() {
        let f = GulpRollupFeatures::defaults();
        assert!(f.use_linting);
        assert!(!f.use_typescript);
        assert!(!f.use_testing);
        assert_eq!(f.style, StyleKind::Css);
    }

    #[test]
    fn source_extension_follows_typescript_flag() {
        let mut f = GulpRollupFeatures::defaults();
        assert_eq!(f.source_extension(), "js");
        f.use_typescript = true;
        assert_eq!(f.source_extension(), "ts");
    }
}
