//! mist: reconcile one Mist resource against a desired-state manifest.
//!
//! The manifest names a site, site group, WLAN or switch and whether it
//! should be present. The result is printed to stdout as
//! `{"changed": bool, "data": ...}`; logs go to stderr.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use mist_client::{DEFAULT_BASE_URL, Session, SessionConfig};
use mist_reconcile::{NamePolicy, apply};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod manifest;

/// Apply a desired-state manifest to a Mist organization
#[derive(Parser, Debug)]
#[command(name = "mist", version, about)]
struct Args {
    /// Desired-state manifest (.json, or YAML otherwise)
    #[arg(short, long)]
    file: PathBuf,

    /// API token (read from MIST_API_KEY, then MIST_API_TOKEN)
    #[arg(long, env = "MIST_API_KEY", hide_env_values = true)]
    api_token: Option<String>,

    /// Organization ID
    #[arg(long, env = "MIST_ORG_ID")]
    org_id: String,

    /// API base URL
    #[arg(long, env = "MIST_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Fail when several objects share the target name instead of using the last one
    #[arg(long)]
    strict_names: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Checked when neither `--api-token` nor `MIST_API_KEY` is set.
const TOKEN_FALLBACK_ENV: &str = "MIST_API_TOKEN";

/// Pick the API token from the flag (or `MIST_API_KEY`), then `lookup`.
fn pick_token(flag: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    if let Some(token) = flag.filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }
    match lookup(TOKEN_FALLBACK_ENV) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => bail!("no API token given, use --api-token, MIST_API_KEY or MIST_API_TOKEN"),
    }
}

impl Args {
    fn api_token(&self) -> Result<String> {
        pick_token(self.api_token.as_deref(), |key| std::env::var(key).ok())
    }

    fn policy(&self) -> NamePolicy {
        if self.strict_names {
            NamePolicy::Strict
        } else {
            NamePolicy::LastWins
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "mist=debug,mist_reconcile=debug,mist_client=debug"
    } else {
        "mist=info,mist_reconcile=info,mist_client=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let manifest = manifest::load(&args.file)?;
    info!(
        kind = %manifest.resource.kind(),
        name = manifest.resource.name(),
        state = ?manifest.state,
        "Loaded manifest"
    );

    let config = SessionConfig {
        base_url: args.base_url.clone(),
        timeout: Duration::from_secs(args.timeout),
        ..SessionConfig::new(args.api_token()?, args.org_id.clone())
    };
    let session = Session::connect(config)
        .await
        .context("Failed to open Mist API session")?;

    let result = apply(&session, &manifest, args.policy())
        .await
        .with_context(|| format!("Failed to reconcile {}", manifest.resource.kind()))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
