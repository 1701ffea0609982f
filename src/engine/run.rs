//! The single-pass execution loop.

use crate::capability::CapabilityRegistry;
use crate::engine::{EngineError, ResultBus, RunContext};
use crate::parser::{Argument, ParamValue};
use crate::router::RouteTable;
use std::collections::HashMap;
use std::sync::Arc;

/// Execute one pass over the route table.
///
/// Fails fast with [`EngineError::EmptyInvocation`] when `args` is empty.
/// Otherwise every route whose pattern (leading dashes stripped) names
/// some argument fires, in registration order; each handler is awaited to
/// completion before the next route's matching step. A handler's non-null
/// return value is recorded on the bus under the route's exact registered
/// pattern, visible to later handlers in the same pass.
///
/// Handler errors are not caught: the first failure propagates as
/// [`EngineError::Handler`] and aborts the remaining scan without rolling
/// back what earlier handlers already did.
///
/// On success the final bus is returned; callers that only care about the
/// handlers' side effects may ignore it.
pub async fn run(
	args: &[Argument],
	registry: &CapabilityRegistry,
	table: &RouteTable,
) -> Result<ResultBus, EngineError> {
	if args.is_empty() {
		return Err(EngineError::EmptyInvocation);
	}

	let args = Arc::new(args.to_vec());
	let params = Arc::new(project_params(&args));
	let capabilities = registry.view();
	let routes = Arc::new(table.infos());

	let mut bus = ResultBus::new();
	for route in table.routes() {
		if !matches(route.pattern(), &args) {
			continue;
		}

		let ctx = RunContext {
			args: Arc::clone(&args),
			capabilities: capabilities.clone(),
			routes: Arc::clone(&routes),
			bus: bus.clone(),
			params: Arc::clone(&params),
		};

		let produced = route
			.invoke(ctx)
			.await
			.map_err(|source| EngineError::handler(route.pattern(), source))?;

		if let Some(value) = produced {
			if !value.is_null() {
				bus.insert(route.pattern(), value);
			}
		}
	}

	Ok(bus)
}

/// A route matches iff some argument's name equals the pattern with any
/// leading dashes stripped. Flags and params match identically; kind is
/// not part of the predicate.
fn matches(pattern: &str, args: &[Argument]) -> bool {
	let needle = pattern.trim_start_matches('-');
	args.iter().any(|arg| arg.name() == needle)
}

/// Fold every param-kind argument into a name-to-value mapping.
/// The last occurrence of a name wins.
fn project_params(args: &[Argument]) -> HashMap<String, ParamValue> {
	let mut params = HashMap::new();
	for arg in args {
		if let Argument::Param { name, value } = arg {
			params.insert(name.clone(), value.clone());
		}
	}
	params
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::capability::{Capability, CapabilityError};
	use crate::parser::parse;
	use async_trait::async_trait;
	use serde_json::{json, Value};
	use std::sync::Mutex;

	struct Recorder {
		calls: Mutex<Vec<String>>,
	}

	#[async_trait]
	impl Capability for Recorder {
		fn name(&self) -> &str {
			"recorder"
		}

		fn operations(&self) -> Vec<&'static str> {
			vec!["record"]
		}

		async fn call(&self, operation: &str, args: Value) -> Result<Value, CapabilityError> {
			match operation {
				"record" => {
					let entry = args.as_str().unwrap_or_default().to_string();
					self.calls.lock().unwrap().push(entry);
					Ok(Value::Null)
				}
				_ => Err(CapabilityError::unknown_operation("recorder", operation)),
			}
		}
	}

	fn recording_registry() -> (CapabilityRegistry, Arc<Recorder>) {
		let recorder = Arc::new(Recorder {
			calls: Mutex::new(Vec::new()),
		});
		let registry =
			CapabilityRegistry::new(vec![Arc::clone(&recorder) as Arc<dyn Capability>]).unwrap();
		(registry, recorder)
	}

	#[tokio::test]
	async fn test_empty_invocation_refused() {
		let (registry, recorder) = recording_registry();
		let table = RouteTable::new().register("--x", |ctx| async move {
			ctx.capability("recorder")?.call("record", json!("x")).await?;
			Ok(None)
		});

		let err = run(&[], &registry, &table).await.unwrap_err();
		assert!(matches!(err, EngineError::EmptyInvocation));
		assert!(recorder.calls.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_match_strips_leading_dashes_and_ignores_kind() {
		let (registry, recorder) = recording_registry();
		let table = RouteTable::new()
			.register("--clone", |ctx| async move {
				ctx.capability("recorder")?.call("record", json!("clone")).await?;
				Ok(None)
			})
			.register("cwd", |ctx| async move {
				ctx.capability("recorder")?.call("record", json!("cwd")).await?;
				Ok(None)
			});

		let args = parse(["cwd:/tmp", "--clone"]).unwrap();
		run(&args, &registry, &table).await.unwrap();
		assert_eq!(*recorder.calls.lock().unwrap(), vec!["clone", "cwd"]);
	}

	#[tokio::test]
	async fn test_unmatched_routes_do_not_fire() {
		let (registry, recorder) = recording_registry();
		let table = RouteTable::new().register("--pull", |ctx| async move {
			ctx.capability("recorder")?.call("record", json!("pull")).await?;
			Ok(None)
		});

		let args = parse(["--clone"]).unwrap();
		let bus = run(&args, &registry, &table).await.unwrap();
		assert!(bus.is_empty());
		assert!(recorder.calls.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_result_bus_visible_to_later_routes_only() {
		let registry = CapabilityRegistry::empty();
		let table = RouteTable::new()
			.register("repos", |_ctx| async move { Ok(Some(json!(["u1", "u2"]))) })
			.register("--clone", |ctx| async move {
				Ok(Some(json!({ "saw": ctx.bus.get("repos").cloned() })))
			});

		let args = parse(["repos:[a]", "--clone"]).unwrap();
		let bus = run(&args, &registry, &table).await.unwrap();
		assert_eq!(bus.get("repos"), Some(&json!(["u1", "u2"])));
		assert_eq!(bus.get("--clone"), Some(&json!({ "saw": ["u1", "u2"] })));
	}

	#[tokio::test]
	async fn test_result_bus_absent_when_producer_registered_later() {
		let registry = CapabilityRegistry::empty();
		let table = RouteTable::new()
			.register("--clone", |ctx| async move {
				Ok(Some(json!({ "saw": ctx.bus.get("repos").cloned() })))
			})
			.register("repos", |_ctx| async move { Ok(Some(json!(["u1", "u2"]))) });

		let args = parse(["repos:[a]", "--clone"]).unwrap();
		let bus = run(&args, &registry, &table).await.unwrap();
		assert_eq!(bus.get("--clone"), Some(&json!({ "saw": null })));
	}

	#[tokio::test]
	async fn test_duplicate_pattern_fan_out_in_order() {
		let (registry, recorder) = recording_registry();
		let table = RouteTable::new()
			.register("--x", |ctx| async move {
				ctx.capability("recorder")?.call("record", json!("first")).await?;
				Ok(None)
			})
			.register("--x", |ctx| async move {
				ctx.capability("recorder")?.call("record", json!("second")).await?;
				Ok(None)
			});

		let args = parse(["--x"]).unwrap();
		run(&args, &registry, &table).await.unwrap();
		assert_eq!(*recorder.calls.lock().unwrap(), vec!["first", "second"]);
	}

	#[tokio::test]
	async fn test_null_return_not_recorded() {
		let registry = CapabilityRegistry::empty();
		let table = RouteTable::new()
			.register("--x", |_ctx| async move { Ok(Some(Value::Null)) })
			.register("--y", |_ctx| async move { Ok(None) });

		let args = parse(["--x", "--y"]).unwrap();
		let bus = run(&args, &registry, &table).await.unwrap();
		assert!(bus.is_empty());
	}

	#[tokio::test]
	async fn test_duplicate_bus_writes_overwrite() {
		let registry = CapabilityRegistry::empty();
		let table = RouteTable::new()
			.register("--x", |_ctx| async move { Ok(Some(json!(1))) })
			.register("--x", |_ctx| async move { Ok(Some(json!(2))) });

		let args = parse(["--x"]).unwrap();
		let bus = run(&args, &registry, &table).await.unwrap();
		assert_eq!(bus.get("--x"), Some(&json!(2)));
	}

	#[tokio::test]
	async fn test_handler_error_aborts_scan() {
		let (registry, recorder) = recording_registry();
		let table = RouteTable::new()
			.register("--x", |ctx| async move {
				ctx.capability("recorder")?.call("record", json!("ran")).await?;
				Ok(None)
			})
			.register("--x", |_ctx| async move {
				Err(CapabilityError::execution_failed("boom", "deliberate"))
			})
			.register("--x", |ctx| async move {
				ctx.capability("recorder")?.call("record", json!("never")).await?;
				Ok(None)
			});

		let args = parse(["--x"]).unwrap();
		let err = run(&args, &registry, &table).await.unwrap_err();
		match err {
			EngineError::Handler { pattern, .. } => assert_eq!(pattern, "--x"),
			other => panic!("expected Handler error, got {other:?}"),
		}
		// The first handler ran and is not rolled back; the third never ran.
		assert_eq!(*recorder.calls.lock().unwrap(), vec!["ran"]);
	}

	#[tokio::test]
	async fn test_unknown_capability_surfaces_at_point_of_use() {
		let registry = CapabilityRegistry::empty();
		let table = RouteTable::new().register("--x", |ctx| async move {
			ctx.capability("ghost")?;
			Ok(None)
		});

		let args = parse(["--x"]).unwrap();
		let err = run(&args, &registry, &table).await.unwrap_err();
		match err {
			EngineError::Handler { source, .. } => {
				assert!(matches!(source, CapabilityError::UnknownCapability { .. }));
			}
			other => panic!("expected Handler error, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_params_projection_last_wins() {
		let registry = CapabilityRegistry::empty();
		let table = RouteTable::new().register("cwd", |ctx| async move {
			let value = ctx.param("cwd").and_then(ParamValue::as_str).map(String::from);
			Ok(Some(json!(value)))
		});

		let args = parse(["cwd:/first", "cwd:/second"]).unwrap();
		let bus = run(&args, &registry, &table).await.unwrap();
		assert_eq!(bus.get("cwd"), Some(&json!("/second")));
	}

	#[tokio::test]
	async fn test_params_cover_whole_argument_list() {
		let registry = CapabilityRegistry::empty();
		let table = RouteTable::new().register("--clone", |ctx| async move {
			// A firing route sees params from arguments it did not match.
			Ok(Some(json!(ctx.param("cwd").and_then(ParamValue::as_str))))
		});

		let args = parse(["cwd:/tmp", "--clone"]).unwrap();
		let bus = run(&args, &registry, &table).await.unwrap();
		assert_eq!(bus.get("--clone"), Some(&json!("/tmp")));
	}

	#[tokio::test]
	async fn test_routes_snapshot_available_for_introspection() {
		let registry = CapabilityRegistry::empty();
		let table = RouteTable::new()
			.register_described("--help", "Print usage", |ctx| async move {
				let patterns: Vec<String> =
					ctx.routes.iter().map(|info| info.pattern.clone()).collect();
				Ok(Some(json!(patterns)))
			})
			.register("--version", |_ctx| async move { Ok(None) });

		let args = parse(["--help"]).unwrap();
		let bus = run(&args, &registry, &table).await.unwrap();
		assert_eq!(bus.get("--help"), Some(&json!(["--help", "--version"])));
	}
}
