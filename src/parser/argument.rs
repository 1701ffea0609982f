//! Parsed argument types.

/// The value carried by a parameter argument.
///
/// Parameters are either single-valued (`cwd:/tmp`) or list-valued
/// (`repos:[a,b]`, or the trailing tokens of a prefixed multi-value flag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
	/// A single raw string value.
	Single(String),
	/// An ordered list of string values. May be empty.
	List(Vec<String>),
}

impl ParamValue {
	/// Build a list value from anything iterable over string-likes.
	pub fn list<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::List(values.into_iter().map(Into::into).collect())
	}

	/// Build a single value.
	pub fn single(value: impl Into<String>) -> Self {
		Self::Single(value.into())
	}

	/// The value as a single string, if it is single-valued.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Single(value) => Some(value),
			Self::List(_) => None,
		}
	}

	/// The value flattened to a list of strings.
	///
	/// A single value becomes a one-element list.
	pub fn to_vec(&self) -> Vec<String> {
		match self {
			Self::Single(value) => vec![value.clone()],
			Self::List(values) => values.clone(),
		}
	}
}

/// One parsed token group.
///
/// Duplicate names may appear in a parsed sequence; the parser never
/// de-duplicates or reorders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
	/// A bare flag such as `--clone`. Carries no value.
	Flag {
		/// Normalized flag name, without leading dashes.
		name: String,
	},
	/// A value-bearing parameter such as `cwd:/tmp` or `--repo-include a b`.
	Param {
		/// Normalized parameter name, without leading dashes.
		name: String,
		/// The carried value.
		value: ParamValue,
	},
}

impl Argument {
	/// Build a flag argument.
	pub fn flag(name: impl Into<String>) -> Self {
		Self::Flag { name: name.into() }
	}

	/// Build a parameter argument.
	pub fn param(name: impl Into<String>, value: ParamValue) -> Self {
		Self::Param {
			name: name.into(),
			value,
		}
	}

	/// The normalized argument name.
	pub fn name(&self) -> &str {
		match self {
			Self::Flag { name } | Self::Param { name, .. } => name,
		}
	}

	/// The carried value, if this is a parameter.
	pub fn value(&self) -> Option<&ParamValue> {
		match self {
			Self::Flag { .. } => None,
			Self::Param { value, .. } => Some(value),
		}
	}

	/// Whether this argument is a bare flag.
	pub fn is_flag(&self) -> bool {
		matches!(self, Self::Flag { .. })
	}

	/// Whether this argument is a value-bearing parameter.
	pub fn is_param(&self) -> bool {
		matches!(self, Self::Param { .. })
	}
}
