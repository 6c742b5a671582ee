use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::error::DomainError;

/// A destination path, relative to the target project root.
///
/// Invariants: never absolute, never empty, never contains a `..` segment.
/// Enforced at construction, so a `TargetPath` held by a plan is always safe
/// to join onto the target root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetPath(PathBuf);

impl TargetPath {
    /// Create a new target path.
    ///
    /// # Panics
    /// Panics if the path violates the containment invariants (use `try_new`
    /// for fallible construction).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::try_new(path).expect("TargetPath invariant violated")
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(DomainError::EmptyPath);
        }
        if path.is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        for component in path.components() {
            match component {
                Component::ParentDir => {
                    return Err(DomainError::PathEscape {
                        path: path.display().to_string(),
                    });
                }
                // `Prefix` covers Windows drive/UNC prefixes that slip past
                // `is_absolute` when no root follows.
                Component::Prefix(_) | Component::RootDir => {
                    return Err(DomainError::AbsolutePathNotAllowed {
                        path: path.display().to_string(),
                    });
                }
                Component::CurDir | Component::Normal(_) => {}
            }
        }
        Ok(Self(path))
    }

    /// Whether `other` lives inside this directory path.
    pub fn contains(&self, other: &TargetPath) -> bool {
        other.0.starts_with(&self.0) && other.0 != self.0
    }

    /// Join a trailing segment, maintaining the containment invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment.as_ref()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or("")
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for TargetPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for TargetPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A logical path to a template asset, resolved by the renderer adapter
/// (e.g. `gulp-rollup/gulpfile.js`). Read-only input, never a write target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplatePath(String);

impl TemplatePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplatePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for TemplatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_relative_paths() {
        assert!(TargetPath::try_new("src/module/entry.js").is_ok());
        assert!(TargetPath::try_new("gulpfile.js").is_ok());
    }

    #[test]
    fn rejects_parent_traversal() {
        assert_eq!(
            TargetPath::try_new("../escape.txt"),
            Err(DomainError::PathEscape {
                path: "../escape.txt".into()
            })
        );
        // Traversal buried mid-path is just as fatal.
        assert!(matches!(
            TargetPath::try_new("src/../../escape.txt"),
            Err(DomainError::PathEscape { .. })
        ));
    }

    #[test]
    fn rejects_absolute_paths() {
        assert!(matches!(
            TargetPath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn rejects_empty_paths() {
        assert_eq!(TargetPath::try_new(""), Err(DomainError::EmptyPath));
    }

    #[test]
    fn join_rechecks_invariants() {
        let dir = TargetPath::new("src");
        assert!(dir.join("styles").is_ok());
        assert!(dir.join("../outside").is_err());
    }

    #[test]
    fn contains_is_strict() {
        let dir = TargetPath::new("src/lang");
        assert!(dir.contains(&TargetPath::new("src/lang/en.json")));
        assert!(!dir.contains(&TargetPath::new("src/lang")));
        assert!(!dir.contains(&TargetPath::new("src/packs/init.db")));
    }
}
