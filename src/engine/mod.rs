//! CRK execution engine - one pass over the route table.
//!
//! Given parsed arguments, a capability registry and a route table, the
//! engine performs a single sequential scan: it matches each route's
//! pattern against the argument names (leading dashes stripped, flag and
//! param matched identically), awaits each matching handler to completion
//! before the next route, and threads a per-run [`ResultBus`] so a
//! handler's output becomes input to later-running handlers.
//!
//! The engine never catches handler errors: the first failure aborts the
//! remaining scan and propagates to the caller, without rolling back
//! already-recorded bus entries or side effects. It is single-threaded
//! and cooperative; any internal fan-out is a handler's own business.

mod bus;
mod context;
mod error;
mod run;

pub use bus::ResultBus;
pub use context::RunContext;
pub use error::EngineError;
pub use run::run;
