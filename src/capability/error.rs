//! Error types for the capability module.

use thiserror::Error;

/// Errors that can occur during capability registration and invocation.
#[derive(Debug, Error)]
pub enum CapabilityError {
	/// Two capabilities supplied to one registry share a name.
	#[error("duplicate capability name: {name}")]
	DuplicateName {
		/// The colliding capability name.
		name: String,
	},

	/// A handler referenced a capability name absent from the registry.
	///
	/// Not statically preventable in a dynamically-composed registry;
	/// surfaces at the point of use.
	#[error("unknown capability: {name}")]
	UnknownCapability {
		/// The missing capability name.
		name: String,
	},

	/// The capability exists but does not expose the requested operation.
	#[error("capability {capability} has no operation {operation}")]
	UnknownOperation {
		/// The capability that was called.
		capability: String,
		/// The operation that does not exist on it.
		operation: String,
	},

	/// The arguments supplied to an operation were invalid.
	#[error("invalid arguments for {operation}: {message}")]
	InvalidArguments {
		/// The operation that rejected its arguments.
		operation: String,
		/// Description of the validation failure.
		message: String,
	},

	/// Execution of an operation failed.
	#[error("execution failed for {operation}: {message}")]
	ExecutionFailed {
		/// The operation that failed.
		operation: String,
		/// Description of the failure.
		message: String,
	},

	/// A serialization or deserialization error occurred.
	#[error("serialization error: {message}")]
	Serialization {
		/// Description of the serialization error.
		message: String,
	},
}

impl CapabilityError {
	/// Create a DuplicateName error for the given capability name.
	pub fn duplicate_name(name: impl Into<String>) -> Self {
		Self::DuplicateName { name: name.into() }
	}

	/// Create an UnknownCapability error for the given capability name.
	pub fn unknown_capability(name: impl Into<String>) -> Self {
		Self::UnknownCapability { name: name.into() }
	}

	/// Create an UnknownOperation error.
	pub fn unknown_operation(capability: impl Into<String>, operation: impl Into<String>) -> Self {
		Self::UnknownOperation {
			capability: capability.into(),
			operation: operation.into(),
		}
	}

	/// Create an InvalidArguments error.
	pub fn invalid_arguments(operation: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidArguments {
			operation: operation.into(),
			message: message.into(),
		}
	}

	/// Create an ExecutionFailed error.
	pub fn execution_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
		Self::ExecutionFailed {
			operation: operation.into(),
			message: message.into(),
		}
	}
}

impl From<serde_json::Error> for CapabilityError {
	fn from(err: serde_json::Error) -> Self {
		Self::Serialization {
			message: err.to_string(),
		}
	}
}
