//! Observability feature - console logging for CRK programs
//!
//! CRK capabilities log through a small colored console logger carrying
//! an origin tag and the crate version, in the
//! `[ORIGIN][vX.Y.Z] message` format.

pub mod logger;

pub use logger::{ConsoleLogger, LogLevel};
