//! Infrastructure adapters for stamp.
//!
//! This crate implements the ports defined in `stamp-core::application::ports`
//! and everything else that touches the real filesystem or environment:
//! templates-root discovery and `template.toml` manifests.

pub mod catalog;
pub mod filesystem;
pub mod template_paths;

// Re-export commonly used adapters
pub use catalog::{ManifestLoader, builtin_catalog, load_catalog};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_paths::{TEMPLATES_DIR_ENV, TemplateRootLocator};
