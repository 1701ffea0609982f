//! The immutable capability registry and its merge law.

use crate::capability::{Capability, CapabilityError, CapabilityView, RegistryView};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An immutable mapping from capability name to capability.
///
/// Built once at program construction and only ever extended by producing
/// a *new* registry through [`CapabilityRegistry::merge`]; existing
/// registries are never mutated.
///
/// # Example
///
/// ```ignore
/// let registry = CapabilityRegistry::new(vec![
///     Arc::new(BasicsCapability::new(logger)) as Arc<dyn Capability>,
///     Arc::new(RepositoryCapability::from_config(&config)?),
/// ])?;
/// let view = registry.view();
/// ```
#[derive(Clone)]
pub struct CapabilityRegistry {
	capabilities: HashMap<String, Arc<dyn Capability>>,
}

impl CapabilityRegistry {
	/// Build a registry from a list of capabilities.
	///
	/// Fails with [`CapabilityError::DuplicateName`] if two supplied
	/// capabilities share a name.
	pub fn new(capabilities: Vec<Arc<dyn Capability>>) -> Result<Self, CapabilityError> {
		let mut map: HashMap<String, Arc<dyn Capability>> = HashMap::with_capacity(capabilities.len());
		for capability in capabilities {
			let name = capability.name().to_string();
			if map.contains_key(&name) {
				return Err(CapabilityError::duplicate_name(name));
			}
			map.insert(name, capability);
		}
		Ok(Self { capabilities: map })
	}

	/// Build an empty registry.
	pub fn empty() -> Self {
		Self {
			capabilities: HashMap::new(),
		}
	}

	/// The call-only view handed to route handlers.
	pub fn view(&self) -> RegistryView {
		let views = self
			.capabilities
			.iter()
			.map(|(name, capability)| (name.clone(), CapabilityView::new(Arc::clone(capability))))
			.collect();
		RegistryView::new(views)
	}

	/// Merge two registries into a new one.
	///
	/// The capability set is the union of both; name collisions resolve in
	/// favor of `other` (right-biased), silently. Neither input is mutated.
	pub fn merge(&self, other: &CapabilityRegistry) -> CapabilityRegistry {
		let mut capabilities = self.capabilities.clone();
		for (name, capability) in &other.capabilities {
			capabilities.insert(name.clone(), Arc::clone(capability));
		}
		CapabilityRegistry { capabilities }
	}

	/// Whether a capability with this name is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.capabilities.contains_key(name)
	}

	/// The number of registered capabilities.
	pub fn len(&self) -> usize {
		self.capabilities.len()
	}

	/// Whether the registry is empty.
	pub fn is_empty(&self) -> bool {
		self.capabilities.is_empty()
	}
}

impl fmt::Debug for CapabilityRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CapabilityRegistry")
			.field("names", &self.capabilities.keys().collect::<Vec<_>>())
			.finish()
	}
}
