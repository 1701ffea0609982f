//! The per-run result bus.

use serde_json::Value;
use std::collections::HashMap;

/// A mapping from route pattern to the non-empty value that route's
/// handler returned.
///
/// The bus is created empty at the start of one engine run, populated
/// incrementally as handlers return values, and discarded at the run's
/// end. A handler sees exactly the entries produced by routes that ran
/// *before* it in the same pass.
///
/// Keys are the exact registered pattern strings, leading dashes
/// included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultBus {
	entries: HashMap<String, Value>,
}

impl ResultBus {
	/// Build an empty bus.
	pub fn new() -> Self {
		Self::default()
	}

	/// Look up the value recorded under a route pattern.
	pub fn get(&self, pattern: &str) -> Option<&Value> {
		self.entries.get(pattern)
	}

	/// Record a value under a route pattern, overwriting any prior entry.
	pub fn insert(&mut self, pattern: impl Into<String>, value: Value) {
		self.entries.insert(pattern.into(), value);
	}

	/// Whether a value was recorded under this pattern.
	pub fn contains(&self, pattern: &str) -> bool {
		self.entries.contains_key(pattern)
	}

	/// The recorded patterns.
	pub fn patterns(&self) -> Vec<&str> {
		self.entries.keys().map(String::as_str).collect()
	}

	/// The number of recorded entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the bus has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
