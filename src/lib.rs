//! Command Routing Kit (CRK) - An embeddable command-routing kernel
//!
//! CRK builds command-line programs out of independently-registered
//! "capabilities" (named service objects exposing callable operations)
//! bound to string patterns. The kernel is made of four small pieces:
//!
//! - **`parser`** - Turns raw command-line tokens into an ordered argument
//!   list distinguishing bare flags from value-bearing parameters.
//! - **`capability`** - Composes named service objects into an immutable
//!   registry with a right-biased merge law.
//! - **`router`** - An ordered table of (pattern, handler) bindings.
//! - **`engine`** - Matches patterns against parsed arguments, invokes
//!   handlers in registration order and threads a shared result bus
//!   between them within a single run.
//!
//! The `program` module ties the four together behind a chainable builder
//! so two independently-built programs can be merged and run as one.
//!
//! # Features
//!
//! The kernel is always available. Everything else is feature-gated:
//!
//! ```toml
//! [dependencies]
//! crk = { version = "0.3", default-features = false }
//! # Or enable the bundled services and CLI:
//! crk = { version = "0.3", features = ["cli"] }
//! ```
//!
//! - **`observability`** - Colored console logging
//! - **`config`** - TOML configuration loading
//! - **`repository`** - Git repository capability (clone/pull/fetch)
//! - **`orchestrator`** - Auth-patching and MFE wiring capability
//! - **`cli`** - Default program assembly, exit-code mapping and the
//!   `crk` binary
//!
//! # Example
//!
//! ```
//! use crk::capability::{Capability, CapabilityError};
//! use crk::parser::parse;
//! use crk::program::Program;
//! use async_trait::async_trait;
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct Greeter;
//!
//! #[async_trait]
//! impl Capability for Greeter {
//!     fn name(&self) -> &str {
//!         "greeter"
//!     }
//!
//!     fn operations(&self) -> Vec<&'static str> {
//!         vec!["greet"]
//!     }
//!
//!     async fn call(&self, operation: &str, _args: Value) -> Result<Value, CapabilityError> {
//!         match operation {
//!             "greet" => Ok(json!("hello")),
//!             _ => Err(CapabilityError::unknown_operation(self.name(), operation)),
//!         }
//!     }
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let program = Program::create(vec![Arc::new(Greeter) as Arc<dyn Capability>])?
//!     .when("--greet", |ctx| async move {
//!         let greeter = ctx.capability("greeter")?;
//!         let greeting = greeter.call("greet", Value::Null).await?;
//!         Ok(Some(greeting))
//!     });
//!
//! let args = parse(["--greet"])?;
//! let bus = program.run(&args).await?;
//! assert_eq!(bus.get("--greet"), Some(&json!("hello")));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod capability;
pub mod engine;
pub mod parser;
pub mod program;
pub mod router;

/// Observability utilities (enabled with the `observability` feature)
#[cfg(feature = "observability")]
pub mod observability;

/// Configuration management (enabled with the `config` feature)
#[cfg(feature = "config")]
pub mod config;

/// Bundled capabilities (enabled with the `repository` / `orchestrator` features)
#[cfg(any(feature = "observability", feature = "repository", feature = "orchestrator"))]
pub mod services;

/// CLI assembly and exit-code mapping (enabled with the `cli` feature)
#[cfg(feature = "cli")]
pub mod cli;

pub use capability::{Capability, CapabilityError, CapabilityRegistry, CapabilityView, RegistryView};
pub use engine::{EngineError, ResultBus, RunContext};
pub use parser::{parse, Argument, ParamValue, ParseError};
pub use program::Program;
pub use router::{Route, RouteInfo, RouteTable};
