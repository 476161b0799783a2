//! Vigil binary - liveness monitor with a polling status endpoint.
//!
//! Wires three workers together:
//! - the acquisition supervisor sampling the frame source,
//! - the HTTP status server publishing the debounced state,
//! - optionally (`--watch`) the terminal display poller.
//!
//! All three share one cancellation token; Ctrl-C shuts them down
//! gracefully within one backoff interval.

use anyhow::{Context, Result};
use clap::Parser;

use vigil::capture::SyntheticSource;
use vigil::classifier::LumaPresenceClassifier;
use vigil::cli::Args;
use vigil::monitor::AcquisitionSupervisor;
use vigil::status::StatusPublisher;
use vigil::{display, server, settings};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "vigil=debug" } else { "vigil=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse().unwrap()),
        )
        .init();

    let mut cfg = match &args.config {
        Some(path) => settings::load_from_path(path).await?,
        None => settings::load_default().await?,
    };
    args.apply_overrides(&mut cfg);

    let publisher = StatusPublisher::new();
    let (addr, shutdown) = server::start_server(&cfg.server.host, cfg.server.port, publisher.clone())
        .await
        .context("Failed to start status server")?;

    // The synthetic source stands in for a camera backend; real
    // capture devices plug in through the FrameSource trait.
    let supervisor = AcquisitionSupervisor::new(
        SyntheticSource::bright(),
        LumaPresenceClassifier::default(),
        publisher.clone(),
        cfg.monitor.clone(),
        shutdown.clone(),
    );
    let monitor_task = tokio::spawn(supervisor.run());

    let display_task = args.watch.then(|| {
        tokio::spawn(display::run(
            format!("http://{}/status", addr),
            cfg.display.poll_interval(),
            shutdown.clone(),
        ))
    });

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    tracing::info!("Shutting down");
    shutdown.cancel();

    monitor_task.await.context("Monitor task panicked")?;
    if let Some(task) = display_task {
        task.await.context("Display task panicked")??;
    }

    Ok(())
}
