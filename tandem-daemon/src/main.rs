//! Tandem sync daemon.
//!
//! Loads the config, builds provider-backed stores for both sides, and
//! drives reconciliation passes at a fixed interval (or once, with
//! `--once`).

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tandem_core::baseline::Baseline;
use tandem_core::config::Config;
use tandem_core::remote::{EventRemote, Provider, TaskRemote};
use tandem_core::scheduler::Scheduler;
use tandem_core::sync::run_pass;
use tandem_core::window::SyncWindow;

#[derive(Parser, Debug)]
#[command(
    name = "tandemd",
    about = "Keep a task store and a calendar in tandem",
    version
)]
struct Args {
    /// Path to the config file (default: ~/.config/tandem/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,

    /// Override the configured interval (e.g. "5m", "90s")
    #[arg(short, long)]
    interval: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", env = "TANDEM_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let config = Config::load(args.config.as_deref())?;

    let tasks = TaskRemote::new(
        Provider::from_name(&config.tasks.provider),
        config.tasks.params.clone(),
    );
    let events = EventRemote::new(
        Provider::from_name(&config.events.provider),
        config.events.params.clone(),
    );

    if args.once {
        let window = SyncWindow::around_now(config.lookback_days, config.lookahead_days);
        let mut baseline = Baseline::new();
        let stats = run_pass(&tasks, &events, &config.schema, &window, &mut baseline).await?;
        info!(pairs = stats.pairs, "single pass complete");
        return Ok(());
    }

    let interval = match &args.interval {
        Some(s) => humantime::parse_duration(s)
            .map_err(|e| anyhow::anyhow!("Invalid interval '{}': {}", s, e))?,
        None => config.interval()?,
    };

    info!(
        tasks = %config.tasks.provider,
        events = %config.events.provider,
        interval = %humantime::format_duration(interval),
        "starting"
    );

    let scheduler = Scheduler {
        interval,
        lookback_days: config.lookback_days,
        lookahead_days: config.lookahead_days,
        schema: config.schema.clone(),
    };
    scheduler.run(&tasks, &events).await;

    Ok(())
}

fn init_tracing(args: &Args) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
