use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::DomainError;

/// A normalised filesystem path guaranteed to be **relative** and to stay
/// inside the directory it is joined onto.
///
/// Every path the hooks reason about (desired-structure entries, walk
/// results, report entries) is a `RelativePath`, so membership tests are
/// component-wise comparisons and never string prefix checks.
///
/// Normalisation:
/// - `\` is treated as a separator;
/// - `.` components and trailing separators are dropped;
/// - `..`, absolute roots and empty paths are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Parse and normalise a user- or manifest-supplied path.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.replace('\\', "/");
        Self::from_path(Path::new(&normalized)).map_err(|reason| DomainError::InvalidPath {
            path: raw.to_string(),
            reason,
        })
    }

    /// Build from an already-relative `Path` (e.g. a walk entry stripped of
    /// its root).
    pub fn try_from_path(path: &Path) -> Result<Self, DomainError> {
        Self::from_path(path).map_err(|reason| DomainError::InvalidPath {
            path: path.display().to_string(),
            reason,
        })
    }

    fn from_path(path: &Path) -> Result<Self, String> {
        let mut out = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => out.push(part),
                Component::CurDir => {}
                Component::ParentDir => return Err("parent components are not allowed".into()),
                Component::RootDir | Component::Prefix(_) => {
                    return Err("absolute paths are not allowed".into());
                }
            }
        }
        if out.as_os_str().is_empty() {
            return Err("path is empty".into());
        }
        Ok(Self(out))
    }

    /// Join a relative path onto this one.
    pub fn join(&self, other: &RelativePath) -> Self {
        Self(self.0.join(&other.0))
    }

    /// `true` if `self` equals `other` or lies underneath it.
    pub fn is_within(&self, other: &RelativePath) -> bool {
        self.0.starts_with(&other.0)
    }

    /// `true` if `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &RelativePath) -> bool {
        self != other && other.is_within(self)
    }

    /// Number of components; top-level entries have depth 1.
    pub fn depth(&self) -> usize {
        self.0.components().count()
    }

    /// Borrow as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolve against an absolute root.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in self.0.components() {
            if !first {
                f.write_str("/")?;
            }
            write!(f, "{}", component.as_os_str().to_string_lossy())?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RelativePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_current_dir_and_trailing_slash() {
        let p = RelativePath::parse("./docs/").unwrap();
        assert_eq!(p.to_string(), "docs");
        assert_eq!(p.depth(), 1);
    }

    #[test]
    fn parse_accepts_backslashes() {
        let p = RelativePath::parse("src\\pkg\\__init__.py").unwrap();
        assert_eq!(p.to_string(), "src/pkg/__init__.py");
        assert_eq!(p.depth(), 3);
    }

    #[test]
    fn parse_rejects_parent_components() {
        assert!(matches!(
            RelativePath::parse("../etc/passwd"),
            Err(DomainError::InvalidPath { .. })
        ));
        assert!(RelativePath::parse("a/../../b").is_err());
    }

    #[test]
    fn parse_rejects_absolute_and_empty() {
        assert!(RelativePath::parse("/etc").is_err());
        assert!(RelativePath::parse("").is_err());
        assert!(RelativePath::parse("./").is_err());
    }

    #[test]
    fn within_is_component_wise() {
        let a = RelativePath::parse("a").unwrap();
        let ab = RelativePath::parse("a/b.txt").unwrap();
        let abc = RelativePath::parse("abc").unwrap();

        assert!(ab.is_within(&a));
        assert!(a.is_within(&a));
        assert!(!abc.is_within(&a), "'abc' must not match prefix 'a'");
        assert!(a.is_ancestor_of(&ab));
        assert!(!a.is_ancestor_of(&a));
    }

    #[test]
    fn deserialize_validates() {
        use serde::de::IntoDeserializer;
        use serde::de::value::Error;

        let ok = RelativePath::deserialize(
            IntoDeserializer::<Error>::into_deserializer("docs/index.md"),
        )
        .unwrap();
        assert_eq!(ok.to_string(), "docs/index.md");

        let bad = RelativePath::deserialize(IntoDeserializer::<Error>::into_deserializer("../x"));
        assert!(bad.is_err());
    }
}
