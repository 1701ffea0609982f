//! Default program assembly and the process entry path.

use crate::capability::Capability;
use crate::cli::{CliError, CliResult};
use crate::config::{Configuration, ConfigurationLoader};
use crate::engine::{EngineError, ResultBus};
use crate::observability::{ConsoleLogger, LogLevel};
use crate::parser::{parse, ParamValue};
use crate::program::Program;
use crate::router::RouteInfo;
use crate::services::{BasicsCapability, OrchestratorCapability, RepositoryCapability};
use colored::Colorize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Render the usage text from a route list.
pub fn render_usage(routes: &[RouteInfo]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} v{}\n\n",
        "crk - Repository Management CLI".yellow().bold(),
        env!("CARGO_PKG_VERSION"),
    ));
    out.push_str(&format!("{}\n  crk [commands]\n\n", "Usage:".bold()));
    out.push_str(&format!("{}\n", "Commands:".bold()));
    for route in routes {
        match &route.description {
            Some(description) => {
                out.push_str(&format!("  {:<24} {description}\n", route.pattern))
            }
            None => out.push_str(&format!("  {}\n", route.pattern)),
        }
    }
    out
}

/// Assemble the default program from a configuration.
///
/// Registers the basics, repository and orchestrator capabilities and
/// the standard routes.
pub fn build_program(config: &Configuration) -> CliResult<Program> {
    let level: LogLevel = config
        .logging
        .level
        .parse()
        .map_err(CliError::ConfigError)?;
    let logger = ConsoleLogger::with_level(config.logging.origin.as_str(), level);

    let basics = BasicsCapability::new(logger.clone());
    let repository = RepositoryCapability::from_config(config, logger.clone())?;
    let orchestrator = OrchestratorCapability::with_defaults(logger);

    let program = Program::create(vec![
        Arc::new(basics) as Arc<dyn Capability>,
        Arc::new(repository),
        Arc::new(orchestrator),
    ])?
    .when_described("--version", "Print the crk version", |ctx| async move {
        let basics = ctx.capability("basics")?;
        let version = basics.call("version", Value::Null).await?;
        basics
            .call("log", json!({ "message": version.as_str().unwrap_or_default() }))
            .await?;
        Ok(None)
    })
    .when_described("--help", "Show this help message", |ctx| async move {
        println!("{}", render_usage(&ctx.routes));
        Ok(None)
    })
    .when_described("cwd", "cwd:<dir> - change the working directory", |ctx| async move {
        let path = ctx
            .param("cwd")
            .and_then(ParamValue::as_str)
            .map(String::from)
            .unwrap_or_default();
        ctx.capability("basics")?
            .call("set_cwd", json!({ "path": path }))
            .await?;
        Ok(None)
    })
    .when_described(
        "repos",
        "repos:[a,b] - select repository URLs by path fragment",
        |ctx| async move {
            let paths = ctx.param("repos").map(ParamValue::to_vec);
            let urls = ctx
                .capability("repository")?
                .call("get_urls", json!({ "paths": paths }))
                .await?;
            Ok(Some(urls))
        },
    )
    .when_described("--repo-list", "List the configured repositories", |ctx| async move {
        let basics = ctx.capability("basics")?;
        let paths = ctx.capability("repository")?.call("list", Value::Null).await?;
        for path in paths.as_array().into_iter().flatten() {
            basics
                .call(
                    "log",
                    json!({ "message": path.as_str().unwrap_or_default(), "origin": "repository" }),
                )
                .await?;
        }
        Ok(None)
    })
    .when_described("--clone", "Clone the selected repositories", |ctx| async move {
        let report = ctx
            .capability("repository")?
            .call("clone", json!({ "urls": ctx.bus.get("repos").cloned() }))
            .await?;
        Ok(Some(report))
    })
    .when_described("--pull", "Pull the selected repositories", |ctx| async move {
        let report = ctx
            .capability("repository")?
            .call("pull", json!({ "urls": ctx.bus.get("repos").cloned() }))
            .await?;
        Ok(Some(report))
    })
    .when_described("--fetch", "Fetch the selected repositories", |ctx| async move {
        let report = ctx
            .capability("repository")?
            .call("fetch", json!({ "urls": ctx.bus.get("repos").cloned() }))
            .await?;
        Ok(Some(report))
    })
    .when_described("--patch-auth", "Bypass the orchestrator auth block", |ctx| async move {
        let result = ctx
            .capability("orchestrator")?
            .call("patch_auth", Value::Null)
            .await?;
        log_operation_result(&ctx, &result).await?;
        Ok(Some(result))
    })
    .when_described("--unpatch-auth", "Restore the orchestrator auth block", |ctx| async move {
        let result = ctx
            .capability("orchestrator")?
            .call("unpatch_auth", Value::Null)
            .await?;
        log_operation_result(&ctx, &result).await?;
        Ok(Some(result))
    })
    .when_described(
        "local-mfe",
        "local-mfe:[name,port] - serve an MFE module locally",
        |ctx| async move {
            let (name, port) = local_mfe_arguments(&ctx)?;
            let result = ctx
                .capability("orchestrator")?
                .call("connect_mfe_module", json!({ "port": port, "name": name }))
                .await?;
            log_operation_result(&ctx, &result).await?;
            Ok(Some(result))
        },
    );

    Ok(program)
}

/// Pull `name` and `port` out of the `local-mfe:[name,port]` parameter.
fn local_mfe_arguments(
    ctx: &crate::engine::RunContext,
) -> Result<(String, i64), crate::capability::CapabilityError> {
    use crate::capability::CapabilityError;

    let values = ctx
        .param("local-mfe")
        .map(ParamValue::to_vec)
        .unwrap_or_default();
    if values.len() != 2 {
        return Err(CapabilityError::invalid_arguments(
            "local-mfe",
            "expected local-mfe:[name,port]",
        ));
    }
    let port = values[1].parse::<i64>().map_err(|_| {
        CapabilityError::invalid_arguments("local-mfe", format!("invalid port: {}", values[1]))
    })?;
    Ok((values[0].clone(), port))
}

/// Log an orchestrator `{success, message}` result through basics.
async fn log_operation_result(
    ctx: &crate::engine::RunContext,
    result: &Value,
) -> Result<(), crate::capability::CapabilityError> {
    let message = result
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    ctx.capability("basics")?
        .call("log", json!({ "message": message, "origin": "orchestrator" }))
        .await?;
    Ok(())
}

/// Parse tokens and run the default program against a configuration.
pub async fn execute(config: &Configuration, tokens: &[String]) -> CliResult<ResultBus> {
    let program = build_program(config)?;
    let args = parse(tokens)?;
    Ok(program.run(&args).await?)
}

/// The full process path: load `crk.toml`, run, map to an exit code.
///
/// Prints usage on an empty invocation and the error message on any other
/// failure; the exit-code convention is 0 on success, 2 on usage errors,
/// 1 otherwise.
pub async fn run_cli(tokens: &[String]) -> i32 {
    let loader = match ConfigurationLoader::new(None) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            return 1;
        }
    };

    match execute(&loader.config, tokens).await {
        Ok(_) => 0,
        Err(CliError::EngineError(EngineError::EmptyInvocation)) => {
            match build_program(&loader.config) {
                Ok(program) => println!("{}", render_usage(&program.table().infos())),
                Err(e) => eprintln!("{} {e}", "error:".red().bold()),
            }
            2
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(repositories: &[&str]) -> Configuration {
        Configuration {
            repositories: repositories.iter().map(|s| s.to_string()).collect(),
            ..Configuration::default()
        }
    }

    #[tokio::test]
    async fn test_repos_route_populates_bus() {
        let config = test_config(&[
            "https://github.com/example/module-esd.git@main",
            "https://github.com/example/module-sidebar.git@main",
        ]);

        let tokens = vec!["repos:[esd]".to_string()];
        let bus = execute(&config, &tokens).await.unwrap();
        assert_eq!(
            bus.get("repos"),
            Some(&json!(["https://github.com/example/module-esd.git"])),
        );
    }

    #[tokio::test]
    async fn test_empty_invocation_maps_to_usage_exit_code() {
        let config = test_config(&[]);
        let err = execute(&config, &[]).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_malformed_token_maps_to_usage_exit_code() {
        let config = test_config(&[]);
        let tokens = vec!["not a command".to_string()];
        let err = execute(&config, &tokens).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_local_mfe_requires_name_and_port() {
        let config = test_config(&[]);
        let tokens = vec!["local-mfe:[esd]".to_string()];
        let err = execute(&config, &tokens).await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_usage_lists_routes() {
        let config = test_config(&[]);
        let program = build_program(&config).unwrap();
        let usage = render_usage(&program.table().infos());
        for pattern in ["--version", "--help", "cwd", "repos", "--clone", "--patch-auth", "local-mfe"] {
            assert!(usage.contains(pattern), "usage is missing {pattern}");
        }
    }

    #[test]
    fn test_bad_log_level_is_a_config_error() {
        let mut config = test_config(&[]);
        config.logging.level = "loud".to_string();
        assert!(matches!(
            build_program(&config).unwrap_err(),
            CliError::ConfigError(_)
        ));
    }
}
