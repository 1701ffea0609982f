//! Error types for the engine module.

use crate::capability::CapabilityError;
use thiserror::Error;

/// Errors that can abort an engine run.
#[derive(Debug, Error)]
pub enum EngineError {
	/// No arguments at all were supplied; the engine refuses to run.
	///
	/// This is a hard stop before any matching begins, not a route.
	#[error("empty invocation: no arguments were supplied")]
	EmptyInvocation,

	/// A matched handler failed. The remaining route scan was aborted;
	/// earlier handlers' bus entries and side effects stand.
	#[error("route {pattern} failed: {source}")]
	Handler {
		/// The pattern of the route whose handler failed.
		pattern: String,
		/// The underlying failure.
		#[source]
		source: CapabilityError,
	},
}

impl EngineError {
	/// Create a Handler error for the given route pattern.
	pub fn handler(pattern: impl Into<String>, source: CapabilityError) -> Self {
		Self::Handler {
			pattern: pattern.into(),
			source,
		}
	}
}
