//! The per-invocation run context.

use crate::capability::{CapabilityError, CapabilityView, RegistryView};
use crate::engine::ResultBus;
use crate::parser::{Argument, ParamValue};
use crate::router::RouteInfo;
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a route handler gets to see, assembled per invocation.
///
/// The argument list, registry view, route snapshots and params
/// projection are shared, read-only state; the bus is a snapshot of the
/// entries recorded by routes that already ran in this pass.
#[derive(Debug, Clone)]
pub struct RunContext {
	/// The full parsed argument list, in source order.
	pub args: Arc<Vec<Argument>>,
	/// The read-only capability view, keyed by capability name.
	pub capabilities: RegistryView,
	/// Every registered route (pattern + description), for introspection.
	pub routes: Arc<Vec<RouteInfo>>,
	/// The result bus accumulated so far in this run.
	pub bus: ResultBus,
	/// Every param-kind argument projected name to value; when a name
	/// appears more than once, the last occurrence wins.
	pub params: Arc<HashMap<String, ParamValue>>,
}

impl RunContext {
	/// Look up a capability by name, failing with
	/// [`CapabilityError::UnknownCapability`] when absent.
	pub fn capability(&self, name: &str) -> Result<CapabilityView, CapabilityError> {
		self.capabilities.require(name)
	}

	/// Look up a projected parameter value by name.
	pub fn param(&self, name: &str) -> Option<&ParamValue> {
		self.params.get(name)
	}
}
