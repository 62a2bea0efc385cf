//! Command-line driver for the ydyd session gate.
//!
//! Runs the same cache and guard the browser uses against a live server, so
//! auth endpoints and redirect behavior can be checked without a browser.

mod transport;

use std::rc::Rc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use ydyd_gate::{AuthCache, Credential, GateConfig, GuardDecision, NavigationGuard, RouteTable, SystemClock};

use transport::ReqwestTransport;

type CliCache = AuthCache<ReqwestTransport, SystemClock>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ydyd_gate::ConfigError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("login failed: {0}")]
    Login(#[from] ydyd_gate::LoginError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "ydyd-cli", about = "Check ydyd auth status and route gating from the command line")]
struct Cli {
    #[arg(long, env = "YDYD_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(long, env = "YDYD_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the status endpoint whether this client is authorized.
    Status {
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Log in with a password.
    Login(PasswordArgs),
    /// Log out; the local state is cleared even if the server is unreachable.
    Logout,
    /// Run one or more paths through the navigation guard.
    Navigate(NavigateArgs),
}

#[derive(Args, Debug)]
struct PasswordArgs {
    #[arg(long, env = "YDYD_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct NavigateArgs {
    /// Full paths, e.g. `/play/42?type=Movie`.
    #[arg(required = true)]
    paths: Vec<String>,

    /// Log in with this password before navigating.
    #[arg(long, env = "YDYD_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = GateConfig::from_env()?;
    let transport = ReqwestTransport::new(&cli.base_url, Duration::from_secs(cli.timeout_secs))?;
    let cache = Rc::new(AuthCache::new(transport, SystemClock::new(), config.endpoints.clone()));

    match cli.command {
        Command::Status { force } => run_status(&cache, force).await,
        Command::Login(args) => run_login(&cache, &args.password).await,
        Command::Logout => run_logout(&cache).await,
        Command::Navigate(args) => run_navigate(&cache, &config, args).await,
    }
}

async fn run_status(cache: &CliCache, force: bool) -> Result<(), CliError> {
    let authorized = cache.fetch_status(force).await;
    print_json(&json!({ "authorized": authorized, "state": cache.state().as_str() }))
}

async fn run_login(cache: &CliCache, password: &str) -> Result<(), CliError> {
    match cache.login(&Credential::password(password)).await {
        Ok(()) => print_json(&json!({ "ok": true })),
        Err(e) => {
            print_json(&json!({ "ok": false, "error": e.to_string() }))?;
            Err(e.into())
        }
    }
}

async fn run_logout(cache: &CliCache) -> Result<(), CliError> {
    cache.logout().await;
    print_json(&json!({ "state": cache.state().as_str() }))
}

async fn run_navigate(cache: &Rc<CliCache>, config: &GateConfig, args: NavigateArgs) -> Result<(), CliError> {
    if let Some(password) = args.password.as_deref() {
        run_login(cache, password).await?;
    }

    let guard = NavigationGuard::from_config(cache.clone(), config);
    let table = RouteTable::default();
    for path in &args.paths {
        let intent = table.resolve(path);
        let decision = guard.evaluate(&intent).await;
        print_json(&decision_json(&intent.full_path, intent.name.as_deref(), &decision))?;
    }
    Ok(())
}

fn decision_json(path: &str, route: Option<&str>, decision: &GuardDecision) -> Value {
    match decision {
        GuardDecision::Allow => json!({ "path": path, "route": route, "decision": "allow", "redirect": null }),
        GuardDecision::Redirect(redirect) => json!({
            "path": path,
            "route": route,
            "decision": "redirect",
            "redirect": redirect.href(),
        }),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
