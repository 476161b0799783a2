//! Settings schema definitions for the vigil monitor.
//!
//! All settings structs use `#[serde(default)]` so partial TOML files
//! work; missing fields fall back to the defaults baked in here, which
//! match the tuning the monitor shipped with (threshold 30, 100 ms
//! sampling, 5 s open backoff, 2 s read backoff, port 5001).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::monitor::{RetryPolicy, DEFAULT_THRESHOLD};

/// Root settings structure, loaded from `~/.vigil/settings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VigilSettings {
    /// Acquisition loop and debounce tuning
    pub monitor: MonitorSettings,

    /// Status endpoint binding
    pub server: ServerSettings,

    /// Display poller tuning
    pub display: DisplaySettings,
}

/// Acquisition loop and hysteresis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Consecutive absent samples required before declaring sleep
    pub threshold: u32,

    /// Delay between frame reads, in milliseconds
    pub sample_interval_ms: u64,

    /// Backoff after a failed device open, in milliseconds
    pub open_retry_ms: u64,

    /// Backoff after losing an open device, in milliseconds
    pub read_retry_ms: u64,

    /// Maximum device-open attempts; 0 means retry forever
    pub max_open_attempts: u32,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            sample_interval_ms: 100,
            open_retry_ms: 5_000,
            read_retry_ms: 2_000,
            max_open_attempts: 0,
        }
    }
}

impl MonitorSettings {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn read_retry(&self) -> Duration {
        Duration::from_millis(self.read_retry_ms)
    }

    /// Open-retry policy implied by these settings.
    pub fn open_retry_policy(&self) -> RetryPolicy {
        let backoff = Duration::from_millis(self.open_retry_ms);
        if self.max_open_attempts == 0 {
            RetryPolicy::fixed(backoff)
        } else {
            RetryPolicy::capped(backoff, self.max_open_attempts)
        }
    }
}

/// Status endpoint binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
        }
    }
}

/// Display poller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Delay between status polls, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1_000,
        }
    }
}

impl DisplaySettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_tuning() {
        let settings = VigilSettings::default();
        assert_eq!(settings.monitor.threshold, 30);
        assert_eq!(settings.monitor.sample_interval_ms, 100);
        assert_eq!(settings.monitor.open_retry_ms, 5_000);
        assert_eq!(settings.monitor.read_retry_ms, 2_000);
        assert_eq!(settings.monitor.max_open_attempts, 0);
        assert_eq!(settings.server.port, 5001);
        assert_eq!(settings.display.poll_interval_ms, 1_000);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let settings: VigilSettings = toml::from_str(
            r#"
            [monitor]
            threshold = 10
            "#,
        )
        .unwrap();

        assert_eq!(settings.monitor.threshold, 10);
        assert_eq!(settings.monitor.sample_interval_ms, 100);
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn zero_max_attempts_means_unbounded_policy() {
        let settings = MonitorSettings::default();
        let policy = settings.open_retry_policy();
        assert!(policy.next_delay(1_000_000).is_some());
    }

    #[test]
    fn nonzero_max_attempts_caps_policy() {
        let settings = MonitorSettings {
            max_open_attempts: 2,
            ..Default::default()
        };
        let policy = settings.open_retry_policy();
        assert!(policy.next_delay(1).is_some());
        assert!(policy.next_delay(2).is_none());
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let settings = VigilSettings::default();
        let toml_string = toml::to_string_pretty(&settings).unwrap();
        let parsed: VigilSettings = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.monitor.threshold, settings.monitor.threshold);
        assert_eq!(parsed.server.port, settings.server.port);
    }
}
