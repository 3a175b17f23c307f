//! Core domain layer for stamp.
//!
//! This module contains pure logic with no I/O. Walking, copying and
//! deleting are handled via the `Filesystem` port defined in the
//! application layer.
//!
//! - **Paths**: [`RelativePath`] normalises and confines every path
//! - **Desired structure**: allow-lists and pure removal planning
//! - **Templates**: per-template hook configuration and the catalog
//! - **Registry**: well-known locations under the templates root
//! - **Reports**: outcome records returned by services

pub mod error;
pub mod path;
pub mod registry;
pub mod report;
pub mod structure;
pub mod template;

pub use error::{DomainError, ErrorCategory};
pub use path::RelativePath;
pub use registry::PathRegistry;
pub use report::{
    FilterReport, LicenseReport, MergeConflict, MergeReport, PostHookReport, PreHookReport,
};
pub use structure::{Decision, DesiredStructure, EntryKind, FilterPlan, WalkEntry};
pub use template::{LicenseName, TemplateCatalog, TemplateDefinition};
