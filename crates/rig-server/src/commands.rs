//! Subcommand dispatch. Results are printed to stdout as pretty JSON.

use std::io::BufRead;

use anyhow::{Context, bail};
use rig_auth::hash_password;
use rig_catalog::backfill_fields;
use rig_config::RigConfig;
use rig_core::enums::UserRole;
use rig_db::service::RigService;
use serde::Serialize;

use crate::cli::{Cli, Commands};
use crate::context::AppContext;

pub async fn dispatch(cli: Cli, config: RigConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { bind } => serve(config, bind).await,
        Commands::Sync { name, url, branch } => sync(config, &name, &url, &branch).await,
        Commands::Backfill => backfill(&config).await,
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => create_admin(&config, &username, &email, password).await,
        Commands::Migrate => migrate(&config).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn open(config: &RigConfig) -> anyhow::Result<RigService> {
    RigService::new_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))
}

async fn serve(config: RigConfig, bind: Option<String>) -> anyhow::Result<()> {
    let addr = bind.unwrap_or_else(|| config.server.bind.clone());
    let ctx = AppContext::init(config).await?.shared();
    crate::http::serve(ctx, &addr).await
}

async fn sync(config: RigConfig, name: &str, url: &str, branch: &str) -> anyhow::Result<()> {
    let ctx = AppContext::init(config).await?;
    let outcome = ctx
        .mirrors
        .sync_repository(&ctx.service, name, url, branch)
        .await
        .with_context(|| format!("failed to sync repository '{name}'"))?;
    print_json(&outcome.into_response())
}

async fn backfill(config: &RigConfig) -> anyhow::Result<()> {
    let service = open(config).await?;
    let report = backfill_fields(&service).await?;
    tracing::info!(scanned = report.scanned, updated = report.updated, "backfill finished");
    print_json(&report)
}

async fn create_admin(
    config: &RigConfig,
    username: &str,
    email: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let service = open(config).await?;
    if service.find_user_by_username(username).await?.is_some() {
        bail!("user '{username}' already exists");
    }
    let password = match password {
        Some(password) => password,
        None => read_password_line()?,
    };
    if password.is_empty() {
        bail!("password must not be empty");
    }
    let hashed = hash_password(&password, config.auth.bcrypt_cost)?;
    let user = service
        .create_user(username, email, &hashed, UserRole::Admin)
        .await?;
    print_json(&user)
}

fn read_password_line() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn migrate(config: &RigConfig) -> anyhow::Result<()> {
    open(config).await?;
    print_json(&serde_json::json!({
        "msg": "database is up to date",
        "path": config.database.path,
    }))
}
