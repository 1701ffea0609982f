//! Single-pass token scanner.

use crate::parser::{Argument, ParamValue, ParseError};

/// Parse raw command-line tokens into an ordered argument list.
///
/// The scan is left to right with no backtracking:
///
/// - `--<ident>` (no inner dash, no `:`) emits a bare flag.
/// - `--<verb>-<rest>` emits a list parameter named `<verb>-<rest>` that
///   collects every immediately following token not starting with `--`.
/// - `<ident>:<value>` emits a parameter; a `[a,b,c]` value is split on
///   `,` with each element trimmed (`[]` is an empty list, not an error).
/// - Anything else fails with [`ParseError`] and rejects the whole
///   invocation.
///
/// Parsing performs no I/O and never reorders tokens.
///
/// # Example
///
/// ```
/// use crk::parser::{parse, Argument, ParamValue};
///
/// let args = parse(["--repo-include", "esd", "orchestrator", "--clone"]).unwrap();
/// assert_eq!(
///     args[0],
///     Argument::param("repo-include", ParamValue::list(["esd", "orchestrator"])),
/// );
/// assert_eq!(args[1], Argument::flag("clone"));
/// ```
pub fn parse<I, S>(tokens: I) -> Result<Vec<Argument>, ParseError>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let tokens: Vec<String> = tokens.into_iter().map(|t| t.as_ref().to_string()).collect();
	let mut arguments = Vec::with_capacity(tokens.len());

	let mut i = 0;
	while i < tokens.len() {
		let token = &tokens[i];

		if let Some(name) = token.strip_prefix("--") {
			if name.contains(':') {
				return Err(ParseError::malformed(token));
			}
			if !is_identifier(name) {
				return Err(ParseError::invalid_identifier(token));
			}
			if name.contains('-') {
				// Prefixed multi-value flag: collect until the next -- token.
				let mut values = Vec::new();
				while i + 1 < tokens.len() && !tokens[i + 1].starts_with("--") {
					values.push(tokens[i + 1].clone());
					i += 1;
				}
				arguments.push(Argument::param(name, ParamValue::List(values)));
			} else {
				arguments.push(Argument::flag(name));
			}
		} else if let Some((name, raw)) = token.split_once(':') {
			if !is_identifier(name) {
				return Err(ParseError::invalid_identifier(token));
			}
			arguments.push(Argument::param(name, param_value(raw)));
		} else {
			return Err(ParseError::malformed(token));
		}

		i += 1;
	}

	Ok(arguments)
}

/// Interpret the raw value part of a `<name>:<value>` token.
fn param_value(raw: &str) -> ParamValue {
	match raw.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
		Some(interior) if interior.trim().is_empty() => ParamValue::List(Vec::new()),
		Some(interior) => ParamValue::List(interior.split(',').map(|e| e.trim().to_string()).collect()),
		None => ParamValue::Single(raw.to_string()),
	}
}

fn is_identifier(name: &str) -> bool {
	!name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
