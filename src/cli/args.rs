//! CLI argument parsing using clap.
//!
//! Flags override the settings file; everything has a working default
//! so `vigil` with no arguments starts the monitor and the status
//! server on port 5001.

use std::path::PathBuf;

use clap::Parser;

use crate::settings::VigilSettings;

/// Vigil - debounced sleep/awake liveness monitor
#[derive(Parser, Debug, Clone)]
#[command(name = "vigil")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Settings file (default: ~/.vigil/settings.toml if present)
    #[arg(short = 'c', long, env = "VIGIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the status server port from settings
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Override the debounce threshold (consecutive absent samples)
    #[arg(short = 't', long)]
    pub threshold: Option<u32>,

    /// Also run the terminal display poller against the local endpoint
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Show verbose output (debug information)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// Apply flag overrides on top of loaded settings.
    pub fn apply_overrides(&self, settings: &mut VigilSettings) {
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(threshold) = self.threshold {
            settings.monitor.threshold = threshold;
        }
    }
}
