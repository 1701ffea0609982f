//! CRK program - a frozen registry + route table pair.
//!
//! A [`Program`] is how an embedding application assembles a CLI: create
//! it from a list of capabilities, chain `when` calls to register routes,
//! optionally merge in a second independently-built program, then run it
//! once against parsed arguments. Merging is pure composition: routes
//! concatenate (left side first) and capability sets union with a
//! right-biased collision rule.

use crate::capability::{Capability, CapabilityError, CapabilityRegistry};
use crate::engine::{self, EngineError, ResultBus};
use crate::parser::Argument;
use crate::router::{HandlerOutput, RouteTable};
use crate::RunContext;
use std::future::Future;
use std::sync::Arc;

/// A runnable pairing of capability registry and route table.
///
/// # Example
///
/// ```
/// use crk::program::Program;
/// use crk::parser::parse;
/// use serde_json::json;
///
/// # async fn example() -> anyhow::Result<()> {
/// let base = Program::create(vec![])?
///     .when("repos", |_ctx| async move { Ok(Some(json!(["u1"]))) });
///
/// let extension = Program::create(vec![])?
///     .when("--clone", |ctx| async move {
///         Ok(ctx.bus.get("repos").cloned())
///     });
///
/// let program = base.merge(extension);
/// let bus = program.run(&parse(["repos:[]", "--clone"])?).await?;
/// assert_eq!(bus.get("--clone"), Some(&json!(["u1"])));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Program {
	registry: CapabilityRegistry,
	table: RouteTable,
}

impl Program {
	/// Create a program from a list of capabilities and no routes.
	///
	/// Fails with [`CapabilityError::DuplicateName`] if two capabilities
	/// share a name.
	pub fn create(capabilities: Vec<Arc<dyn Capability>>) -> Result<Self, CapabilityError> {
		Ok(Self {
			registry: CapabilityRegistry::new(capabilities)?,
			table: RouteTable::new(),
		})
	}

	/// Add a route to the program.
	pub fn when<F, Fut>(mut self, pattern: impl Into<String>, handler: F) -> Self
	where
		F: Fn(RunContext) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = HandlerOutput> + Send + 'static,
	{
		self.table = self.table.register(pattern, handler);
		self
	}

	/// Add a route with a description for help output.
	pub fn when_described<F, Fut>(
		mut self,
		pattern: impl Into<String>,
		description: impl Into<String>,
		handler: F,
	) -> Self
	where
		F: Fn(RunContext) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = HandlerOutput> + Send + 'static,
	{
		self.table = self.table.register_described(pattern, description, handler);
		self
	}

	/// Merge two programs into one.
	///
	/// Routes concatenate, `self`'s first; capability sets union with
	/// collisions resolving to `other`'s capability. Neither input
	/// survives; the result is a new frozen pair.
	pub fn merge(self, other: Program) -> Program {
		Program {
			registry: self.registry.merge(&other.registry),
			table: self.table.merge(other.table),
		}
	}

	/// The program's capability registry.
	pub fn registry(&self) -> &CapabilityRegistry {
		&self.registry
	}

	/// The program's route table.
	pub fn table(&self) -> &RouteTable {
		&self.table
	}

	/// Run the program once against parsed arguments.
	///
	/// See [`crate::engine::run`] for the execution contract.
	pub async fn run(&self, args: &[Argument]) -> Result<ResultBus, EngineError> {
		engine::run(args, &self.registry, &self.table).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parser::parse;
	use async_trait::async_trait;
	use serde_json::{json, Value};

	struct Named {
		name: &'static str,
		tag: &'static str,
	}

	#[async_trait]
	impl Capability for Named {
		fn name(&self) -> &str {
			self.name
		}

		fn operations(&self) -> Vec<&'static str> {
			vec!["tag"]
		}

		async fn call(&self, operation: &str, _args: Value) -> Result<Value, CapabilityError> {
			match operation {
				"tag" => Ok(json!(self.tag)),
				_ => Err(CapabilityError::unknown_operation(self.name, operation)),
			}
		}
	}

	fn named(name: &'static str, tag: &'static str) -> Arc<dyn Capability> {
		Arc::new(Named { name, tag })
	}

	#[tokio::test]
	async fn test_merged_program_sees_both_capability_sets() {
		let basics = Program::create(vec![named("basics", "b")])
			.unwrap()
			.when("--intro", |ctx| async move {
				Ok(Some(ctx.capability("basics")?.call("tag", Value::Null).await?))
			});

		let repos = Program::create(vec![named("repository", "r")])
			.unwrap()
			.when("--repos", |ctx| async move {
				Ok(Some(ctx.capability("repository")?.call("tag", Value::Null).await?))
			});

		let merged = basics.merge(repos).when("--merged", |ctx| async move {
			let b = ctx.capability("basics")?.call("tag", Value::Null).await?;
			let r = ctx.capability("repository")?.call("tag", Value::Null).await?;
			Ok(Some(json!([b, r])))
		});

		let args = parse(["--intro", "--repos", "--merged"]).unwrap();
		let bus = merged.run(&args).await.unwrap();
		assert_eq!(bus.get("--intro"), Some(&json!("b")));
		assert_eq!(bus.get("--repos"), Some(&json!("r")));
		assert_eq!(bus.get("--merged"), Some(&json!(["b", "r"])));
	}

	#[tokio::test]
	async fn test_merge_capability_collision_right_biased() {
		let left = Program::create(vec![named("svc", "left")]).unwrap();
		let right = Program::create(vec![named("svc", "right")]).unwrap();

		let program = left.merge(right).when("--which", |ctx| async move {
			Ok(Some(ctx.capability("svc")?.call("tag", Value::Null).await?))
		});

		let bus = program.run(&parse(["--which"]).unwrap()).await.unwrap();
		assert_eq!(bus.get("--which"), Some(&json!("right")));
	}

	#[test]
	fn test_create_rejects_duplicate_capabilities() {
		let result = Program::create(vec![named("svc", "a"), named("svc", "b")]);
		assert!(matches!(
			result.unwrap_err(),
			CapabilityError::DuplicateName { .. }
		));
	}

	#[tokio::test]
	async fn test_merge_preserves_route_order_across_sides() {
		let order = Arc::new(std::sync::Mutex::new(Vec::new()));

		let o1 = Arc::clone(&order);
		let o2 = Arc::clone(&order);
		let o3 = Arc::clone(&order);
		let left = Program::create(vec![])
			.unwrap()
			.when("--x", move |_ctx| {
				let order = Arc::clone(&o1);
				async move {
					order.lock().unwrap().push("p1");
					Ok(None)
				}
			})
			.when("--x", move |_ctx| {
				let order = Arc::clone(&o2);
				async move {
					order.lock().unwrap().push("p2");
					Ok(None)
				}
			});
		let right = Program::create(vec![]).unwrap().when("--x", move |_ctx| {
			let order = Arc::clone(&o3);
			async move {
				order.lock().unwrap().push("p3");
				Ok(None)
			}
		});

		let program = left.merge(right);
		program.run(&parse(["--x"]).unwrap()).await.unwrap();
		assert_eq!(*order.lock().unwrap(), vec!["p1", "p2", "p3"]);
	}
}
