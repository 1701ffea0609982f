//! The ordered route table.

use crate::router::{HandlerOutput, Route, RouteInfo};
use crate::engine::RunContext;
use std::future::Future;

/// An ordered, append-only collection of routes.
///
/// # Example
///
/// ```
/// use crk::router::RouteTable;
///
/// let table = RouteTable::new()
///     .register("--version", |_ctx| async move { Ok(None) })
///     .register_described("--help", "Print usage", |_ctx| async move { Ok(None) });
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RouteTable {
	routes: Vec<Route>,
}

impl RouteTable {
	/// Build an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a route. Duplicate patterns are never rejected; every route
	/// registered under a matching pattern fires, in registration order.
	pub fn register<F, Fut>(mut self, pattern: impl Into<String>, handler: F) -> Self
	where
		F: Fn(RunContext) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = HandlerOutput> + Send + 'static,
	{
		self.routes.push(Route::new(pattern, handler));
		self
	}

	/// Append a route with a description for help output.
	pub fn register_described<F, Fut>(
		mut self,
		pattern: impl Into<String>,
		description: impl Into<String>,
		handler: F,
	) -> Self
	where
		F: Fn(RunContext) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = HandlerOutput> + Send + 'static,
	{
		self.routes.push(Route::described(pattern, description, handler));
		self
	}

	/// Append an already-built route.
	pub fn push(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	/// Concatenate two tables: `self`'s routes first, then `other`'s,
	/// preserving each side's internal order.
	pub fn merge(mut self, other: RouteTable) -> Self {
		self.routes.extend(other.routes);
		self
	}

	/// The routes, in registration order.
	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Introspectable snapshots of every route, in registration order.
	pub fn infos(&self) -> Vec<RouteInfo> {
		self.routes.iter().map(Route::info).collect()
	}

	/// The number of registered routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Whether the table has no routes.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}
