//! Quill command-line front end.
//!
//! Plays the UI-consumer role for the startup sequencer: runs the bootstrap
//! flow, prints observed state transitions, and exposes the logout and
//! health-notice operations as flags.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use quill_api::{ApiClient, ApiConfig};
use quill_core::KvStorage;
use quill_startup::{
    ConnectivityProbe, StartupRuntime, StartupState, StaticConnectivityProbe,
    SystemConnectivityProbe, DESTINATION_LOGIN_GREETING,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "quill",
    about = "Quill chat client core: startup bootstrap and session tools",
    version
)]
struct Cli {
    #[arg(
        long,
        env = "QUILL_API_BASE",
        default_value = "https://api.quill.chat",
        help = "Backend API base URL."
    )]
    api_base: String,

    #[arg(
        long,
        env = "QUILL_KV_PATH",
        default_value = ".quill/kv.json",
        help = "Path of the persisted key-value store."
    )]
    kv_path: PathBuf,

    #[arg(
        long,
        env = "QUILL_REQUEST_TIMEOUT_MS",
        default_value_t = 15_000,
        help = "Per-request timeout in milliseconds."
    )]
    request_timeout_ms: u64,

    #[arg(
        long,
        help = "Skip the system connectivity probe and assume a transport is active."
    )]
    assume_online: bool,

    #[arg(long, help = "Clear the stored session and exit.")]
    logout: bool,

    #[arg(long, help = "Fetch and print the service health notice, then exit.")]
    health_only: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn build_runtime(cli: &Cli) -> Result<StartupRuntime> {
    let kv = KvStorage::open(&cli.kv_path)
        .with_context(|| format!("failed to open key-value store {}", cli.kv_path.display()))?;
    let api = ApiClient::new(ApiConfig {
        api_base: cli.api_base.clone(),
        request_timeout_ms: cli.request_timeout_ms,
        user_agent: format!("quill-cli/{}", env!("CARGO_PKG_VERSION")),
    })
    .context("failed to build API client")?;
    let connectivity: Arc<dyn ConnectivityProbe> = if cli.assume_online {
        Arc::new(StaticConnectivityProbe { connected: true })
    } else {
        Arc::new(SystemConnectivityProbe)
    };
    Ok(StartupRuntime::new(kv, api, connectivity))
}

fn report_transitions(previous: &StartupState, state: &StartupState) {
    if state.connected != previous.connected {
        println!("network transport active: {}", state.connected);
    }
    if state.transient_notice != previous.transient_notice {
        if let Some(notice) = &state.transient_notice {
            println!("notice: {notice}");
        }
    }
    if state.alert_active && !previous.alert_active {
        if let Some(alert) = &state.active_alert {
            println!("health alert: {}", alert.text);
            if let Some(link) = &alert.link {
                println!("health alert details: {link}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let runtime = Arc::new(build_runtime(&cli)?);

    if cli.logout {
        runtime.log_out()?;
        println!("session cleared, next destination: {DESTINATION_LOGIN_GREETING}");
        return Ok(());
    }

    if cli.health_only {
        runtime.run_health_check().await;
        match runtime.state().active_alert {
            Some(alert) => {
                println!("active health alert: {}", alert.text);
                if let Some(link) = alert.link {
                    println!("health alert details: {link}");
                }
            }
            None => println!("no active health alert"),
        }
        return Ok(());
    }

    let mut rx = runtime.subscribe();
    let flow = {
        let runtime = Arc::clone(&runtime);
        tokio::spawn(async move {
            runtime.run_pre_startup_tasks().await;
            runtime.check_logged_in_state().await;
        })
    };

    let mut previous = StartupState::default();
    let terminal = loop {
        let state = rx.borrow_and_update().clone();
        report_transitions(&previous, &state);
        if state.ready || state.could_not_log_in {
            break state;
        }
        previous = state;
        if rx.changed().await.is_err() {
            break previous.clone();
        }
    };
    flow.await.context("startup task panicked")?;

    if terminal.could_not_log_in {
        bail!("could not log in with the stored session");
    }
    match terminal.next_destination.as_deref() {
        Some(destination) => {
            println!("next destination: {destination}");
            if let Some(session) = runtime.session() {
                println!(
                    "logged in as {} ({})",
                    session.user.username, session.user.id
                );
            }
        }
        None if !terminal.connected => {
            println!("offline: no usable network transport, retry once connectivity returns");
        }
        None => {
            println!("startup deferred, no destination decided");
        }
    }

    Ok(())
}
