//! The capability trait.

use crate::capability::CapabilityError;
use async_trait::async_trait;
use serde_json::Value;

/// A named bag of callable operations.
///
/// Capabilities are contributed by the embedding application and reach
/// route handlers only through the registry's call-only view. The trait
/// object itself is the methods-only projection: whatever non-callable
/// state a concrete capability holds cannot be reached through it.
///
/// # Object Safety
///
/// This trait is object-safe; registries store `Arc<dyn Capability>`.
///
/// # Example
///
/// ```
/// use crk::capability::{Capability, CapabilityError};
/// use async_trait::async_trait;
/// use serde_json::{json, Value};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Capability for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn operations(&self) -> Vec<&'static str> {
///         vec!["echo"]
///     }
///
///     async fn call(&self, operation: &str, args: Value) -> Result<Value, CapabilityError> {
///         match operation {
///             "echo" => Ok(args),
///             _ => Err(CapabilityError::unknown_operation(self.name(), operation)),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Capability: Send + Sync {
	/// The unique name this capability registers under.
	fn name(&self) -> &str;

	/// The operations this capability exposes, for introspection.
	fn operations(&self) -> Vec<&'static str>;

	/// Invoke one operation with a JSON argument payload.
	///
	/// Implementations return [`CapabilityError::UnknownOperation`] for
	/// operations they do not expose. Domain-level failures are the
	/// capability's own concern; the kernel does not interpret them.
	async fn call(&self, operation: &str, args: Value) -> Result<Value, CapabilityError>;
}
