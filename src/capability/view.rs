//! Call-only facades over registered capabilities.

use crate::capability::{Capability, CapabilityError};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A call-only facade over one registered capability.
///
/// Cloning is cheap (one `Arc` bump). The view deliberately exposes
/// nothing but the capability's name, its operation list and `call`.
#[derive(Clone)]
pub struct CapabilityView {
	inner: Arc<dyn Capability>,
}

impl CapabilityView {
	pub(crate) fn new(inner: Arc<dyn Capability>) -> Self {
		Self { inner }
	}

	/// The name of the wrapped capability.
	pub fn name(&self) -> &str {
		self.inner.name()
	}

	/// The operations the wrapped capability exposes.
	pub fn operations(&self) -> Vec<&'static str> {
		self.inner.operations()
	}

	/// Invoke one operation on the wrapped capability.
	pub async fn call(&self, operation: &str, args: Value) -> Result<Value, CapabilityError> {
		self.inner.call(operation, args).await
	}
}

impl fmt::Debug for CapabilityView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CapabilityView")
			.field("name", &self.inner.name())
			.field("operations", &self.inner.operations())
			.finish()
	}
}

/// A read-only mapping from capability name to [`CapabilityView`].
///
/// This is what route handlers see. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct RegistryView {
	capabilities: Arc<HashMap<String, CapabilityView>>,
}

impl RegistryView {
	pub(crate) fn new(capabilities: HashMap<String, CapabilityView>) -> Self {
		Self {
			capabilities: Arc::new(capabilities),
		}
	}

	/// Look up a capability by name.
	pub fn get(&self, name: &str) -> Option<&CapabilityView> {
		self.capabilities.get(name)
	}

	/// Look up a capability by name, failing with
	/// [`CapabilityError::UnknownCapability`] when absent.
	pub fn require(&self, name: &str) -> Result<CapabilityView, CapabilityError> {
		self.capabilities
			.get(name)
			.cloned()
			.ok_or_else(|| CapabilityError::unknown_capability(name))
	}

	/// Whether a capability with this name is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.capabilities.contains_key(name)
	}

	/// All registered capability names.
	pub fn names(&self) -> Vec<&str> {
		self.capabilities.keys().map(String::as_str).collect()
	}

	/// The number of registered capabilities.
	pub fn len(&self) -> usize {
		self.capabilities.len()
	}

	/// Whether the view is empty.
	pub fn is_empty(&self) -> bool {
		self.capabilities.is_empty()
	}
}
