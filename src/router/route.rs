//! A single route binding.

use crate::capability::CapabilityError;
use crate::engine::RunContext;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// What a handler produces: an optional value for the result bus, or an
/// error that aborts the remaining route scan.
pub type HandlerOutput = Result<Option<Value>, CapabilityError>;

/// The boxed future returned by a route handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = HandlerOutput> + Send>>;

type BoxedHandler = Box<dyn Fn(RunContext) -> HandlerFuture + Send + Sync>;

/// An introspectable snapshot of a route: pattern plus description.
///
/// Handed to handlers through the run context so a help route can print
/// every registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
	/// The exact pattern string the route was registered under.
	pub pattern: String,
	/// The optional human-readable description.
	pub description: Option<String>,
}

/// One (pattern, handler, description) binding.
pub struct Route {
	pattern: String,
	description: Option<String>,
	handler: BoxedHandler,
}

impl Route {
	/// Build a route without a description.
	pub fn new<F, Fut>(pattern: impl Into<String>, handler: F) -> Self
	where
		F: Fn(RunContext) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = HandlerOutput> + Send + 'static,
	{
		Self {
			pattern: pattern.into(),
			description: None,
			handler: Box::new(move |ctx| Box::pin(handler(ctx))),
		}
	}

	/// Build a route with a description for help output.
	pub fn described<F, Fut>(pattern: impl Into<String>, description: impl Into<String>, handler: F) -> Self
	where
		F: Fn(RunContext) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = HandlerOutput> + Send + 'static,
	{
		Self {
			description: Some(description.into()),
			..Self::new(pattern, handler)
		}
	}

	/// The exact pattern string this route is registered under.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// The optional description.
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// The introspectable snapshot of this route.
	pub fn info(&self) -> RouteInfo {
		RouteInfo {
			pattern: self.pattern.clone(),
			description: self.description.clone(),
		}
	}

	/// Invoke the handler with a run context.
	pub fn invoke(&self, ctx: RunContext) -> HandlerFuture {
		(self.handler)(ctx)
	}
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern)
			.field("description", &self.description)
			.finish()
	}
}
