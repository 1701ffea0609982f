//! Bundled capabilities for repository-management CLIs
//!
//! These are the concrete service objects an embedding application
//! registers into a CRK program:
//!
//! - [`basics`] - version, help, logging and working-directory changes
//! - [`repository`] - git clone/pull/fetch over a configured target list
//! - [`orchestrator`] - auth patching and local MFE module wiring
//!
//! Each lives behind the trait-object boundary of
//! [`crate::capability::Capability`]; route handlers reach them by name
//! through the registry view and never see their internal state.

/// Version/help/log/cwd capability (enabled with the `observability` feature)
#[cfg(feature = "observability")]
pub mod basics;

/// Git repository capability (enabled with the `repository` feature)
#[cfg(feature = "repository")]
pub mod repository;

/// Orchestrator patching capability (enabled with the `orchestrator` feature)
#[cfg(feature = "orchestrator")]
pub mod orchestrator;

#[cfg(feature = "observability")]
pub use basics::BasicsCapability;

#[cfg(feature = "repository")]
pub use repository::{RepoTarget, RepositoryCapability};

#[cfg(feature = "orchestrator")]
pub use orchestrator::{MfeConfig, OperationResult, OrchestratorCapability, PatchConfig};
