//! Asset resolution
//!
//! Audio files are referenced by name and resolved against one base
//! directory. Names that could escape that directory are rejected.

use mindful_core::{MindfulError, Result};
use std::path::{Component, Path, PathBuf};

/// Resolves asset names against a fixed base directory
#[derive(Debug, Clone)]
pub struct AssetLibrary {
    base_dir: PathBuf,
}

impl AssetLibrary {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `name` to a path inside the base directory
    ///
    /// Nested names such as `ambient/rain.mp3` are allowed; empty names,
    /// absolute paths, `.`/`..` components and backslashes are not.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(MindfulError::validation("file name must not be empty"));
        }

        if name.contains('\\') || name.contains('\0') {
            return Err(MindfulError::validation(format!(
                "file name contains an illegal character: {name:?}"
            )));
        }

        let relative = Path::new(name);
        let all_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if !all_plain {
            return Err(MindfulError::validation(format!(
                "file name must stay inside the assets directory: {name:?}"
            )));
        }

        Ok(self.base_dir.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> AssetLibrary {
        AssetLibrary::new("/srv/assets")
    }

    #[test]
    fn resolves_plain_and_nested_names() {
        assert_eq!(
            library().resolve("a.mp3").unwrap(),
            PathBuf::from("/srv/assets/a.mp3")
        );
        assert_eq!(
            library().resolve("ambient/rain.mp3").unwrap(),
            PathBuf::from("/srv/assets/ambient/rain.mp3")
        );
    }

    #[test]
    fn rejects_empty_names() {
        assert!(matches!(
            library().resolve(""),
            Err(MindfulError::Validation(_))
        ));
        assert!(matches!(
            library().resolve("   "),
            Err(MindfulError::Validation(_))
        ));
    }

    #[test]
    fn rejects_traversal() {
        for name in [
            "../secret.mp3",
            "ambient/../../etc/passwd",
            "/etc/passwd",
            "./a.mp3",
            "..\\windows.mp3",
            "nul\0byte.mp3",
        ] {
            assert!(
                matches!(library().resolve(name), Err(MindfulError::Validation(_))),
                "{name:?} should be rejected"
            );
        }
    }
}
