//! Application services - the hook operations.
//!
//! Each service applies one domain decision through the `Filesystem` port;
//! `HookService` sequences them into the pre- and post-generate hooks.

pub mod filter_service;
pub mod hook_service;
pub mod license_service;
pub mod merge_service;

pub use filter_service::StructureFilter;
pub use hook_service::HookService;
pub use license_service::{LICENSE_FILE_NAME, LicenseInjector};
pub use merge_service::TemplateMerger;
