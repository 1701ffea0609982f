//! CRK route table - ordered (pattern, handler) bindings.
//!
//! Routes bind a string pattern to an async handler and an optional
//! description. Registration is append-only; duplicate patterns are a
//! valid, intentional way to fan one invocation out to several handlers.
//! Merging two tables concatenates them, left side first, preserving each
//! side's internal order - this is what backs composing two
//! independently-built programs without reordering either's routes.

mod route;
mod table;

pub use route::{HandlerFuture, HandlerOutput, Route, RouteInfo};
pub use table::RouteTable;
