//! The repository capability: git clone/pull/fetch over a target list.

use crate::capability::{Capability, CapabilityError};
use crate::config::Configuration;
use crate::observability::ConsoleLogger;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::PathBuf;
use tokio::process::Command;
use tokio::task::JoinSet;

/// One configured repository target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    /// Directory name, inferred from the final URL segment minus `.git`.
    pub path: String,
    /// The clone URL.
    pub url: String,
    /// The branch named after `@` in the target string, `main` otherwise.
    pub branch: String,
}

impl RepoTarget {
    /// Parse a `<url>[@<branch>]` target string.
    pub fn parse(raw: &str) -> Result<Self, CapabilityError> {
        let (url, branch) = match raw.rsplit_once('@') {
            Some((url, suffix))
                if !url.is_empty() && !suffix.is_empty() && !suffix.contains('/') && !suffix.contains(':') =>
            {
                (url, suffix)
            }
            _ => (raw, "main"),
        };
        let path = infer_path(url).ok_or_else(|| {
            CapabilityError::invalid_arguments(
                "target",
                format!("could not infer repository path from {raw}"),
            )
        })?;
        Ok(Self {
            path,
            url: url.to_string(),
            branch: branch.to_string(),
        })
    }
}

/// The final URL segment without its `.git` suffix.
fn infer_path(url: &str) -> Option<String> {
    let segment = url.trim_end_matches('/').rsplit(['/', ':']).next()?;
    let path = segment.strip_suffix(".git").unwrap_or(segment);
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GitVerb {
    Clone,
    Pull,
    Fetch,
}

impl GitVerb {
    fn as_str(self) -> &'static str {
        match self {
            Self::Clone => "clone",
            Self::Pull => "pull",
            Self::Fetch => "fetch",
        }
    }
}

/// Git operations over a configured repository target list.
///
/// Registered under the name `repository`. Operations:
///
/// | operation | args | returns |
/// |-----------|------|---------|
/// | `get_urls` | `{paths?: [..]}` | URLs whose path contains a fragment |
/// | `list` | - | configured target paths |
/// | `clone` / `pull` / `fetch` | `{urls?: [..]}` | `{succeeded, failed}` |
///
/// The git operations fan one subprocess out per URL and await the whole
/// batch; a spawn failure or non-zero exit lands the URL in `failed`
/// rather than erroring the operation.
pub struct RepositoryCapability {
    targets: Vec<RepoTarget>,
    clone_dir: PathBuf,
    logger: ConsoleLogger,
}

impl RepositoryCapability {
    /// Build from raw `<url>[@<branch>]` target strings.
    pub fn new(
        target_urls: &[String],
        clone_dir: impl Into<PathBuf>,
        logger: ConsoleLogger,
    ) -> Result<Self, CapabilityError> {
        let targets = target_urls
            .iter()
            .map(|raw| RepoTarget::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            targets,
            clone_dir: clone_dir.into(),
            logger: logger.scoped("repository"),
        })
    }

    /// Build from a loaded configuration.
    pub fn from_config(config: &Configuration, logger: ConsoleLogger) -> Result<Self, CapabilityError> {
        Self::new(&config.repositories, &config.clone.dir, logger)
    }

    /// The configured targets.
    pub fn targets(&self) -> &[RepoTarget] {
        &self.targets
    }

    /// URLs of targets whose path contains one of the given fragments;
    /// all URLs when `paths` is absent or empty.
    pub fn get_urls(&self, paths: Option<&[String]>) -> Vec<String> {
        match paths {
            Some(fragments) if !fragments.is_empty() => self
                .targets
                .iter()
                .filter(|t| fragments.iter().any(|f| !f.is_empty() && t.path.contains(f)))
                .map(|t| t.url.clone())
                .collect(),
            _ => self.targets.iter().map(|t| t.url.clone()).collect(),
        }
    }

    /// The configured target paths.
    pub fn list(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.path.clone()).collect()
    }

    fn target_for_url(&self, url: &str) -> Option<&RepoTarget> {
        self.targets.iter().find(|t| t.url == url)
    }

    /// The git invocation for one URL: argument list plus working directory.
    fn command_for(&self, verb: GitVerb, url: &str) -> Result<(Vec<String>, PathBuf), String> {
        match verb {
            GitVerb::Clone => {
                let mut args = vec!["clone".to_string()];
                if let Some(target) = self.target_for_url(url) {
                    args.push("--branch".to_string());
                    args.push(target.branch.clone());
                }
                args.push(url.to_string());
                Ok((args, self.clone_dir.clone()))
            }
            GitVerb::Pull | GitVerb::Fetch => {
                let path = self
                    .target_for_url(url)
                    .map(|t| t.path.clone())
                    .or_else(|| infer_path(url))
                    .ok_or_else(|| format!("could not infer repository path from {url}"))?;
                Ok((vec![verb.as_str().to_string()], self.clone_dir.join(path)))
            }
        }
    }

    async fn git_fanout(&self, verb: GitVerb, urls: Vec<String>) -> Value {
        if verb == GitVerb::Clone {
            if let Err(e) = tokio::fs::create_dir_all(&self.clone_dir).await {
                self.logger
                    .warn(&format!("could not create {}: {e}", self.clone_dir.display()));
            }
        }

        let mut set: JoinSet<(String, bool)> = JoinSet::new();
        for url in urls {
            let spec = self.command_for(verb, &url);
            let logger = self.logger.clone();
            let verb_name = verb.as_str();
            if let Ok((_, dir)) = &spec {
                logger.info(&format!("{verb_name}: {url} ({})", dir.display()));
            }
            set.spawn(async move {
                let succeeded = match spec {
                    Ok((args, dir)) => {
                        let mut cmd = Command::new("git");
                        cmd.args(&args).current_dir(&dir);
                        match cmd.output().await {
                            Ok(output) => {
                                if !output.status.success() {
                                    let stderr = String::from_utf8_lossy(&output.stderr);
                                    logger.warn(&format!(
                                        "git {verb_name} failed for {url}: {}",
                                        stderr.trim()
                                    ));
                                }
                                output.status.success()
                            }
                            Err(e) => {
                                logger.warn(&format!("could not run git {verb_name} for {url}: {e}"));
                                false
                            }
                        }
                    }
                    Err(message) => {
                        logger.warn(&message);
                        false
                    }
                };
                (url, succeeded)
            });
        }

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((url, true)) => succeeded.push(url),
                Ok((url, false)) => failed.push(url),
                Err(e) => self.logger.error(&format!("git task failed: {e}")),
            }
        }
        self.logger.info(&format!(
            "{}: {} succeeded, {} failed",
            verb.as_str(),
            succeeded.len(),
            failed.len()
        ));
        json!({ "succeeded": succeeded, "failed": failed })
    }

    /// URLs from the `urls` argument field, all configured URLs when absent.
    fn urls_argument(&self, args: &Value) -> Result<Vec<String>, CapabilityError> {
        match args.get("urls") {
            None | Some(Value::Null) => Ok(self.get_urls(None)),
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|v| {
                    v.as_str().map(String::from).ok_or_else(|| {
                        CapabilityError::invalid_arguments("urls", "expected an array of strings")
                    })
                })
                .collect(),
            Some(_) => Err(CapabilityError::invalid_arguments(
                "urls",
                "expected an array of strings",
            )),
        }
    }
}

#[async_trait]
impl Capability for RepositoryCapability {
    fn name(&self) -> &str {
        "repository"
    }

    fn operations(&self) -> Vec<&'static str> {
        vec!["get_urls", "list", "clone", "pull", "fetch"]
    }

    async fn call(&self, operation: &str, args: Value) -> Result<Value, CapabilityError> {
        match operation {
            "get_urls" => {
                let paths = match args.get("paths") {
                    None | Some(Value::Null) => None,
                    Some(Value::Array(entries)) => Some(
                        entries
                            .iter()
                            .map(|v| {
                                v.as_str().map(String::from).ok_or_else(|| {
                                    CapabilityError::invalid_arguments(
                                        "get_urls",
                                        "expected an array of strings",
                                    )
                                })
                            })
                            .collect::<Result<Vec<_>, _>>()?,
                    ),
                    Some(_) => {
                        return Err(CapabilityError::invalid_arguments(
                            "get_urls",
                            "paths must be an array of strings",
                        ))
                    }
                };
                Ok(json!(self.get_urls(paths.as_deref())))
            }
            "list" => Ok(json!(self.list())),
            "clone" => Ok(self.git_fanout(GitVerb::Clone, self.urls_argument(&args)?).await),
            "pull" => Ok(self.git_fanout(GitVerb::Pull, self.urls_argument(&args)?).await),
            "fetch" => Ok(self.git_fanout(GitVerb::Fetch, self.urls_argument(&args)?).await),
            _ => Err(CapabilityError::unknown_operation(self.name(), operation)),
        }
    }
}
