//! CLI feature - the default CRK program and its process surface
//!
//! This module is the embedding application the kernel was built for: it
//! wires the bundled capabilities into a [`crate::program::Program`] with
//! the standard routes, parses `argv` with the kernel parser and maps
//! outcomes to exit codes.
//!
//! The kernel itself never prints; rendering errors and help is this
//! layer's job.
//!
//! # Example
//!
//! ```ignore
//! use crk::cli;
//!
//! #[tokio::main]
//! async fn main() {
//!     let tokens: Vec<String> = std::env::args().skip(1).collect();
//!     std::process::exit(cli::run_cli(&tokens).await);
//! }
//! ```

pub mod error;
pub mod runner;

pub use error::{CliError, CliResult};
pub use runner::{build_program, execute, run_cli};
