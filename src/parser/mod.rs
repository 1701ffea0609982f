//! CRK argument parser - raw tokens to an ordered argument list.
//!
//! The parser is a pure, single-pass, left-to-right scan with no
//! backtracking. It distinguishes three token shapes:
//!
//! - `--clone` - a bare flag
//! - `cwd:/tmp` / `repos:[a,b]` - a parameter carrying a single string or
//!   a bracketed list
//! - `--repo-include esd orchestrator` - a prefixed multi-value flag that
//!   greedily collects the following bare tokens into a list
//!
//! Any other token aborts the whole parse; there are no partial results.
//! Source order is preserved and duplicate names are kept per occurrence.
//!
//! # Example
//!
//! ```
//! use crk::parser::{parse, Argument, ParamValue};
//!
//! let args = parse(["--clone", "repos:[esd,orchestrator]"]).unwrap();
//! assert_eq!(args.len(), 2);
//! assert_eq!(args[0], Argument::flag("clone"));
//! assert_eq!(
//!     args[1],
//!     Argument::param("repos", ParamValue::list(["esd", "orchestrator"])),
//! );
//! ```

mod argument;
mod error;
mod scanner;

pub use argument::{Argument, ParamValue};
pub use error::ParseError;
pub use scanner::parse;
