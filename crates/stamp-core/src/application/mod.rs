//! Application layer for stamp.
//!
//! This layer contains:
//! - **Services**: the hook operations (license injection, inheritance merge,
//!   structure filtering) and the hook sequencing on top of them
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Decisions (what to keep, what counts as a conflict) live in
//! `crate::domain`; services only apply them through the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{HookService, LicenseInjector, StructureFilter, TemplateMerger};

pub use ports::Filesystem;

pub use error::ApplicationError;
