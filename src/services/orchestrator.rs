//! The orchestrator capability: auth patching and local MFE wiring.

use crate::capability::{Capability, CapabilityError};
use crate::observability::ConsoleLogger;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Outcome of an orchestrator operation.
///
/// Domain failures (missing marker, bad port, absent module) come back as
/// `{success: false, message}` rather than hard errors; the kernel never
/// interprets them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OperationResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
}

impl OperationResult {
    /// A successful outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    fn to_value(&self) -> Result<Value, CapabilityError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Where the MFE import map and module packages live.
#[derive(Debug, Clone)]
pub struct MfeConfig {
    /// Root of the orchestrator checkout.
    pub orchestrator_root: PathBuf,
    /// Directory containing the module checkouts.
    pub modules_root: PathBuf,
    /// Product whose import map gets rewritten.
    pub product: String,
    /// Import-map key prefix; the module name is appended.
    pub module_key_prefix: String,
    /// Bundle file prefix; `<prefix><name>.js` is served locally.
    pub bundle_prefix: String,
}

impl Default for MfeConfig {
    fn default() -> Self {
        Self {
            orchestrator_root: PathBuf::from("./orchestrator"),
            modules_root: PathBuf::from("."),
            product: "default".to_string(),
            module_key_prefix: "@mfe/module-".to_string(),
            bundle_prefix: "module-".to_string(),
        }
    }
}

impl MfeConfig {
    /// Path of the product's local import map.
    pub fn import_map_path(&self) -> PathBuf {
        self.orchestrator_root
            .join("products")
            .join(&self.product)
            .join("importmaps")
            .join("importmap.local.json")
    }

    /// Path of a module's package.json.
    pub fn package_json_path(&self, name: &str) -> PathBuf {
        self.modules_root
            .join(format!("{}{name}", self.bundle_prefix))
            .join("package.json")
    }

    /// The module's import-map key.
    pub fn module_key(&self, name: &str) -> String {
        format!("{}{name}", self.module_key_prefix)
    }

    /// The locally served bundle URL.
    pub fn module_url(&self, port: u16, name: &str) -> String {
        format!("http://localhost:{port}/{}{name}.js", self.bundle_prefix)
    }
}

/// How the auth block in the orchestrator root config gets patched.
#[derive(Debug, Clone)]
pub struct PatchConfig {
    /// How many lines after the marker get commented out.
    pub lines_to_comment: usize,
    /// The root config file to patch.
    pub root_config_path: PathBuf,
    /// Prefix identifying the first line of the auth block.
    pub start_marker: String,
    /// The permission grant inserted after the commented block.
    pub permission_line: String,
    /// Indentation used for commented lines and the inserted grant.
    pub indent: String,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            lines_to_comment: 8,
            root_config_path: PathBuf::from("./orchestrator/src/root-config.js"),
            start_marker: "AuthenticationManager.on('login".to_string(),
            permission_line: "permissionManager.addPermissions(\"admin\", \"read\")".to_string(),
            indent: " ".repeat(2),
        }
    }
}

/// Auth patching and local MFE module wiring.
///
/// Registered under the name `orchestrator`. Operations:
///
/// | operation | args | returns |
/// |-----------|------|---------|
/// | `patch_auth` | - | `{success, message}` |
/// | `unpatch_auth` | - | `{success, message}` |
/// | `connect_mfe_module` | `{port, name}` | `{success, message}` |
///
/// File mutations go through a backup discipline: the original content is
/// saved next to the file, restored on failure and deleted on success.
pub struct OrchestratorCapability {
    mfe: MfeConfig,
    patch: PatchConfig,
    logger: ConsoleLogger,
}

impl OrchestratorCapability {
    /// Create the capability with explicit configs.
    pub fn new(mfe: MfeConfig, patch: PatchConfig, logger: ConsoleLogger) -> Self {
        Self {
            mfe,
            patch,
            logger: logger.scoped("orchestrator"),
        }
    }

    /// Create the capability with the default configs.
    pub fn with_defaults(logger: ConsoleLogger) -> Self {
        Self::new(MfeConfig::default(), PatchConfig::default(), logger)
    }

    /// Comment out the auth block and insert the permission grant.
    pub async fn patch_auth(&self) -> OperationResult {
        let path = self.patch.root_config_path.clone();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => return OperationResult::failure(format!("failed to patch auth: {e}")),
        };

        let mut buffer: Vec<String> = Vec::new();
        let mut in_target_block = false;
        let mut found = false;
        let mut modified = 0usize;

        for line in content.lines() {
            if in_target_block {
                if modified < self.patch.lines_to_comment {
                    modified += 1;
                    buffer.push(format!("{}//{line}", self.patch.indent));
                    continue;
                }
                buffer.push(format!("{}{}", self.patch.indent, self.patch.permission_line));
                in_target_block = false;
            }
            if line.starts_with(&self.patch.start_marker) {
                in_target_block = true;
                found = true;
            }
            buffer.push(line.to_string());
        }

        if !found {
            return OperationResult::failure(format!(
                "no target block found in {}",
                path.display()
            ));
        }

        match write_with_backup(&path, &buffer.join("\n")).await {
            Ok(()) => {
                self.logger.info(&format!("patched {modified} lines in {}", path.display()));
                OperationResult::success(format!("patched {modified} lines in {}", path.display()))
            }
            Err(e) => OperationResult::failure(format!("failed to patch auth: {e}")),
        }
    }

    /// Undo [`Self::patch_auth`]: uncomment the block, drop the grant.
    pub async fn unpatch_auth(&self) -> OperationResult {
        let path = self.patch.root_config_path.clone();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => return OperationResult::failure(format!("failed to unpatch auth: {e}")),
        };

        let comment_prefix = format!("{}//", self.patch.indent);
        let grant_prefix = format!("{}{}", self.patch.indent, self.patch.permission_line);

        let mut buffer: Vec<String> = Vec::new();
        let mut in_target_block = false;
        let mut found = false;
        let mut modified = 0usize;

        for line in content.lines() {
            if line.starts_with(&grant_prefix) {
                in_target_block = false;
                continue;
            }
            if in_target_block {
                if let Some(original) = line.strip_prefix(&comment_prefix) {
                    modified += 1;
                    buffer.push(original.to_string());
                    continue;
                }
            }
            if line.starts_with(&self.patch.start_marker) {
                in_target_block = true;
                found = true;
            }
            buffer.push(line.to_string());
        }

        if !found {
            return OperationResult::failure(format!(
                "no target block found in {}",
                path.display()
            ));
        }

        match write_with_backup(&path, &buffer.join("\n")).await {
            Ok(()) => {
                self.logger.info(&format!("unpatched {modified} lines in {}", path.display()));
                OperationResult::success(format!("unpatched {modified} lines in {}", path.display()))
            }
            Err(e) => OperationResult::failure(format!("failed to unpatch auth: {e}")),
        }
    }

    /// Point the product import map and the module's dev script at a
    /// locally served bundle.
    pub async fn connect_mfe_module(&self, port: i64, name: &str) -> OperationResult {
        if name.is_empty() {
            return OperationResult::failure("MFE name must be a non-empty string");
        }
        let port = match u16::try_from(port) {
            Ok(port) if port >= 1024 => port,
            _ => return OperationResult::failure(format!("invalid port: {port}")),
        };

        match self.rewire_module(port, name).await {
            Ok(()) => {
                let message = format!("connected {name} on port {port}");
                self.logger.info(&message);
                OperationResult::success(message)
            }
            Err(e) => OperationResult::failure(format!("failed to connect module: {e}")),
        }
    }

    async fn rewire_module(&self, port: u16, name: &str) -> Result<(), CapabilityError> {
        let import_map_path = self.mfe.import_map_path();
        let module_key = self.mfe.module_key(name);

        let mut import_map: Value = read_json(&import_map_path).await?;
        let imports = import_map
            .get_mut("imports")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                CapabilityError::execution_failed(
                    "connect_mfe_module",
                    format!("no imports object in {}", import_map_path.display()),
                )
            })?;
        if !imports.contains_key(&module_key) {
            return Err(CapabilityError::execution_failed(
                "connect_mfe_module",
                format!("module \"{name}\" not found in import map"),
            ));
        }
        imports.insert(module_key, json!(self.mfe.module_url(port, name)));
        write_json_with_backup(&import_map_path, &import_map).await?;

        let package_json_path = self.mfe.package_json_path(name);
        let mut package_json: Value = read_json(&package_json_path).await?;
        let scripts = package_json
            .get_mut("scripts")
            .and_then(Value::as_object_mut)
            .filter(|scripts| scripts.contains_key("start:dev"))
            .ok_or_else(|| {
                CapabilityError::execution_failed(
                    "connect_mfe_module",
                    format!("no \"start:dev\" script found in {}", package_json_path.display()),
                )
            })?;
        scripts.insert("start:dev".to_string(), json!(format!("webpack serve --port {port}")));
        write_json_with_backup(&package_json_path, &package_json).await?;

        Ok(())
    }
}

async fn read_json(path: &Path) -> Result<Value, CapabilityError> {
    let text = fs::read_to_string(path).await.map_err(|e| {
        CapabilityError::execution_failed("read", format!("{}: {e}", path.display()))
    })?;
    serde_json::from_str(&text).map_err(CapabilityError::from)
}

async fn write_json_with_backup(path: &Path, value: &Value) -> Result<(), CapabilityError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    write_with_backup(path, &text).await
}

/// Write new content under backup protection: the original is saved to
/// `<path>.backup`, restored if the write fails and removed on success.
async fn write_with_backup(path: &Path, content: &str) -> Result<(), CapabilityError> {
    let backup_path = PathBuf::from(format!("{}.backup", path.display()));

    let original = fs::read_to_string(path).await.map_err(|e| {
        CapabilityError::execution_failed("backup", format!("{}: {e}", path.display()))
    })?;
    fs::write(&backup_path, &original).await.map_err(|e| {
        CapabilityError::execution_failed("backup", format!("{}: {e}", backup_path.display()))
    })?;

    match fs::write(path, content).await {
        Ok(()) => {
            let _ = fs::remove_file(&backup_path).await;
            Ok(())
        }
        Err(e) => {
            if let Ok(backup) = fs::read_to_string(&backup_path).await {
                let _ = fs::write(path, backup).await;
            }
            let _ = fs::remove_file(&backup_path).await;
            Err(CapabilityError::execution_failed(
                "write",
                format!("{}: {e}", path.display()),
            ))
        }
    }
}

#[async_trait]
impl Capability for OrchestratorCapability {
    fn name(&self) -> &str {
        "orchestrator"
    }

    fn operations(&self) -> Vec<&'static str> {
        vec!["patch_auth", "unpatch_auth", "connect_mfe_module"]
    }

    async fn call(&self, operation: &str, args: Value) -> Result<Value, CapabilityError> {
        match operation {
            "patch_auth" => self.patch_auth().await.to_value(),
            "unpatch_auth" => self.unpatch_auth().await.to_value(),
            "connect_mfe_module" => {
                let port = args.get("port").and_then(Value::as_i64).ok_or_else(|| {
                    CapabilityError::invalid_arguments(
                        "connect_mfe_module",
                        "missing integer field: port",
                    )
                })?;
                let name = args.get("name").and_then(Value::as_str).ok_or_else(|| {
                    CapabilityError::invalid_arguments(
                        "connect_mfe_module",
                        "missing string field: name",
                    )
                })?;
                self.connect_mfe_module(port, name).await.to_value()
            }
            _ => Err(CapabilityError::unknown_operation(self.name(), operation)),
        }
    }
}
