//! The basics capability: version, help, logging, working directory.

use crate::capability::{Capability, CapabilityError};
use crate::observability::ConsoleLogger;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::Path;

/// Short usage banner returned by the `help` operation.
///
/// The full per-route command list is the `--help` route's business; it
/// introspects the route table and does not live here.
const HELP_BANNER: &str = "crk - capability-routed repository management CLI";

/// Version, help, logging and working-directory operations.
///
/// Registered under the name `basics`. Operations:
///
/// | operation | args | returns |
/// |-----------|------|---------|
/// | `version` | - | version string |
/// | `help` | - | usage banner |
/// | `log` | `{message, origin?}` | null |
/// | `set_cwd` | `{path}` | null |
pub struct BasicsCapability {
    logger: ConsoleLogger,
}

impl BasicsCapability {
    /// Create the capability with the program-wide logger.
    pub fn new(logger: ConsoleLogger) -> Self {
        Self { logger }
    }

    /// The crate version string.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// The short usage banner.
    pub fn help(&self) -> &'static str {
        HELP_BANNER
    }

    /// Log a message, optionally under a caller-supplied origin tag.
    pub fn log(&self, message: &str, origin: Option<&str>) {
        match origin {
            Some(origin) => self.logger.scoped(origin).info(message),
            None => self.logger.info(message),
        }
    }

    /// Change the process working directory.
    pub fn set_cwd(&self, path: &Path) -> Result<(), CapabilityError> {
        std::env::set_current_dir(path).map_err(|e| {
            CapabilityError::execution_failed("set_cwd", format!("{}: {e}", path.display()))
        })?;
        self.logger.debug(&format!("working directory set to {}", path.display()));
        Ok(())
    }
}

#[async_trait]
impl Capability for BasicsCapability {
    fn name(&self) -> &str {
        "basics"
    }

    fn operations(&self) -> Vec<&'static str> {
        vec!["version", "help", "log", "set_cwd"]
    }

    async fn call(&self, operation: &str, args: Value) -> Result<Value, CapabilityError> {
        match operation {
            "version" => Ok(json!(self.version())),
            "help" => Ok(json!(self.help())),
            "log" => {
                let message = args
                    .get("message")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        CapabilityError::invalid_arguments("log", "missing string field: message")
                    })?;
                let origin = args.get("origin").and_then(Value::as_str);
                self.log(message, origin);
                Ok(Value::Null)
            }
            "set_cwd" => {
                let path = args
                    .get("path")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        CapabilityError::invalid_arguments("set_cwd", "missing string field: path")
                    })?;
                self.set_cwd(Path::new(path))?;
                Ok(Value::Null)
            }
            _ => Err(CapabilityError::unknown_operation(self.name(), operation)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basics() -> BasicsCapability {
        BasicsCapability::new(ConsoleLogger::new("TEST"))
    }

    #[tokio::test]
    async fn test_version_matches_crate() {
        let value = basics().call("version", Value::Null).await.unwrap();
        assert_eq!(value, json!(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_help_banner() {
        let value = basics().call("help", Value::Null).await.unwrap();
        assert!(value.as_str().unwrap().contains("crk"));
    }

    #[tokio::test]
    async fn test_log_requires_message() {
        let err = basics().call("log", json!({})).await.unwrap_err();
        assert!(matches!(err, CapabilityError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let err = basics().call("frobnicate", Value::Null).await.unwrap_err();
        assert!(matches!(err, CapabilityError::UnknownOperation { .. }));
    }

    #[tokio::test]
    async fn test_set_cwd_rejects_missing_directory() {
        let err = basics()
            .call("set_cwd", json!({ "path": "/definitely/not/a/dir" }))
            .await
            .unwrap_err();
        assert!(matches!(err, CapabilityError::ExecutionFailed { .. }));
    }
}
