//! stamp Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the stamp
//! template hooks, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            stamp-cli (CLI)              │
//! │   (hook pre / hook post / keep / ...)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (HookService, LicenseInjector,          │
//! │  TemplateMerger, StructureFilter)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │             (Filesystem)                │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stamp-adapters (Infrastructure)      │
//! │  (LocalFilesystem, MemoryFilesystem)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (DesiredStructure, TemplateDefinition,  │
//! │   PathRegistry, RelativePath)           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::{path::Path, sync::Arc};
//! use stamp_core::prelude::*;
//!
//! # fn run(filesystem: Arc<dyn Filesystem>) -> StampResult<()> {
//! let hooks = HookService::new(filesystem);
//! let desired = DesiredStructure::new(["src", "tests", "LICENSE"])?;
//! hooks.filter().keep_files(Path::new("./my-project"), &desired)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        HookService, LicenseInjector, StructureFilter, TemplateMerger, ports::Filesystem,
    };
    pub use crate::domain::{
        DesiredStructure, EntryKind, FilterPlan, FilterReport, LicenseName, LicenseReport,
        MergeReport, PathRegistry, PostHookReport, PreHookReport, RelativePath, TemplateCatalog,
        TemplateDefinition, WalkEntry,
    };
    pub use crate::error::{StampError, StampResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
