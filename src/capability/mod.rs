//! CRK capability registry - named service objects behind a call-only view.
//!
//! A capability is a named bag of callable operations contributed by the
//! embedding application (a git-operations capability, a version/help
//! capability, and so on). The registry composes capabilities into an
//! immutable dependency bag:
//!
//! - Construction fails fast on duplicate names.
//! - Consumers only ever see a [`CapabilityView`], a call-only facade over
//!   the trait object. Whatever state a concrete capability carries is
//!   unreachable through the view; this is the module's encapsulation
//!   boundary.
//! - Two registries merge into a new one with a right-biased union: when
//!   both define the same name, the second registry's capability wins,
//!   silently.
//!
//! # Example
//!
//! ```
//! use crk::capability::{Capability, CapabilityError, CapabilityRegistry};
//! use async_trait::async_trait;
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct Version;
//!
//! #[async_trait]
//! impl Capability for Version {
//!     fn name(&self) -> &str {
//!         "version"
//!     }
//!
//!     fn operations(&self) -> Vec<&'static str> {
//!         vec!["get"]
//!     }
//!
//!     async fn call(&self, operation: &str, _args: Value) -> Result<Value, CapabilityError> {
//!         match operation {
//!             "get" => Ok(json!("0.3.2")),
//!             _ => Err(CapabilityError::unknown_operation(self.name(), operation)),
//!         }
//!     }
//! }
//!
//! let registry = CapabilityRegistry::new(vec![Arc::new(Version) as Arc<dyn Capability>]).unwrap();
//! assert!(registry.view().get("version").is_some());
//! ```

mod error;
mod registry;
mod traits;
mod view;

pub use error::CapabilityError;
pub use registry::CapabilityRegistry;
pub use traits::Capability;
pub use view::{CapabilityView, RegistryView};
