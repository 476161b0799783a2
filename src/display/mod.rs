//! Terminal display client.
//!
//! Polls the status endpoint on a fixed interval and renders a
//! human-readable state line. Transport and decode failures degrade
//! the rendered state to `Error`; they never stop the poller.

use std::io::{self, Write};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::status::PublishedStatus;

/// What the display shows for one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Awake,
    Sleeping,
    /// Status endpoint unreachable or response undecodable.
    Error,
}

impl DisplayState {
    pub fn label(self) -> &'static str {
        match self {
            DisplayState::Awake => "Awake",
            DisplayState::Sleeping => "Sleeping",
            DisplayState::Error => "Error",
        }
    }
}

impl From<PublishedStatus> for DisplayState {
    fn from(status: PublishedStatus) -> Self {
        if status.sleeping {
            DisplayState::Sleeping
        } else {
            DisplayState::Awake
        }
    }
}

/// Fetch one status snapshot, folding every failure into `Error`.
pub async fn fetch_state(client: &reqwest::Client, status_url: &str) -> DisplayState {
    match fetch_status(client, status_url).await {
        Ok(status) => DisplayState::from(status),
        Err(e) => {
            tracing::warn!("Could not fetch status: {}", e);
            DisplayState::Error
        }
    }
}

async fn fetch_status(
    client: &reqwest::Client,
    status_url: &str,
) -> std::result::Result<PublishedStatus, reqwest::Error> {
    client
        .get(status_url)
        .send()
        .await?
        .error_for_status()?
        .json::<PublishedStatus>()
        .await
}

/// Run the polling loop until cancelled.
///
/// Prints `Status: <label>` to stdout whenever the rendered state
/// changes (and once for the initial state).
pub async fn run(
    status_url: String,
    poll_interval: Duration,
    cancel: CancellationToken,
) -> Result<()> {
    let client = reqwest::Client::new();
    let mut rendered: Option<DisplayState> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(poll_interval) => {}
        }

        let state = fetch_state(&client, &status_url).await;
        if rendered != Some(state) {
            let mut stdout = io::stdout();
            writeln!(stdout, "Status: {}", state.label())?;
            stdout.flush()?;
            rendered = Some(state);
        }
    }

    Ok(())
}
