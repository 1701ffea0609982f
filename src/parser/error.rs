//! Error types for the parser module.

use thiserror::Error;

/// Errors that can occur while parsing command-line tokens.
///
/// Parsing is all-or-nothing: the first malformed token aborts the scan
/// and nothing is run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
	/// A token matched none of the recognized shapes.
	#[error("malformed argument: {token}")]
	MalformedToken {
		/// The offending token, verbatim.
		token: String,
	},

	/// A token had a recognized shape but an invalid identifier part.
	#[error("invalid identifier in argument: {token}")]
	InvalidIdentifier {
		/// The offending token, verbatim.
		token: String,
	},
}

impl ParseError {
	/// Create a MalformedToken error for the given token.
	pub fn malformed(token: impl Into<String>) -> Self {
		Self::MalformedToken {
			token: token.into(),
		}
	}

	/// Create an InvalidIdentifier error for the given token.
	pub fn invalid_identifier(token: impl Into<String>) -> Self {
		Self::InvalidIdentifier {
			token: token.into(),
		}
	}
}
