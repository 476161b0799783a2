//! Acquisition supervisor - the resilient sampling loop.
//!
//! Owns the capture lifecycle end to end: open the source, read frames,
//! classify, feed the state machine, publish, and recover from every
//! device fault without ever taking the process down. Open failures and
//! read failures are retried on different backoffs because a device
//! that was never ready takes longer to clear than a transient read
//! glitch.

use tokio_util::sync::CancellationToken;

use crate::capture::{FrameHandle, FrameSource};
use crate::classifier::PresenceClassifier;
use crate::settings::MonitorSettings;
use crate::status::StatusPublisher;

use super::hysteresis::HysteresisStateMachine;

/// Consumer of the sleep-onset edge.
///
/// Called exactly once per sleep episode, on the sample that flipped
/// the machine to `Asleep` - never again while it stays asleep.
/// `Sync` because the supervisor holds it across await points inside a
/// spawned task.
pub trait AlertSink: Send + Sync {
    fn alert(&self);
}

/// Default sink: one log line per sleep onset.
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn alert(&self) {
        tracing::info!("Sleep detected!");
    }
}

/// Drives the capture -> classify -> debounce -> publish pipeline.
pub struct AcquisitionSupervisor<S, C> {
    source: S,
    classifier: C,
    machine: HysteresisStateMachine,
    publisher: StatusPublisher,
    alert_sink: Box<dyn AlertSink>,
    settings: MonitorSettings,
    cancel: CancellationToken,
}

impl<S, C> AcquisitionSupervisor<S, C>
where
    S: FrameSource,
    C: PresenceClassifier,
{
    pub fn new(
        source: S,
        classifier: C,
        publisher: StatusPublisher,
        settings: MonitorSettings,
        cancel: CancellationToken,
    ) -> Self {
        let machine = HysteresisStateMachine::new(settings.threshold);
        Self {
            source,
            classifier,
            machine,
            publisher,
            alert_sink: Box::new(LogAlertSink),
            settings,
            cancel,
        }
    }

    /// Replace the default log alert sink.
    pub fn with_alert_sink(mut self, sink: Box<dyn AlertSink>) -> Self {
        self.alert_sink = sink;
        self
    }

    /// Run the supervisory loop until cancelled (or, with a capped
    /// retry policy, until the policy is exhausted).
    ///
    /// Device faults are never fatal: a failed open is retried on the
    /// open backoff, a lost device is dropped and reacquired on the
    /// shorter read backoff.
    pub async fn run(mut self) {
        let retry = self.settings.open_retry_policy();
        let mut failed_opens: u32 = 0;

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            let handle = match self.source.open() {
                Ok(handle) => {
                    failed_opens = 0;
                    tracing::info!("Capture source opened successfully");
                    handle
                }
                Err(e) => {
                    failed_opens += 1;
                    let Some(delay) = retry.next_delay(failed_opens) else {
                        tracing::error!(
                            "Capture source not accessible after {} attempts, giving up",
                            failed_opens
                        );
                        break;
                    };
                    tracing::error!(
                        "Capture source not accessible: {}. Retrying in {:?}...",
                        e,
                        delay
                    );
                    if self.wait(delay).await {
                        break;
                    }
                    continue;
                }
            };

            if !self.sample_until_lost(handle).await {
                // Cancelled mid-sampling
                break;
            }

            tracing::warn!("Lost capture source. Attempting to reacquire...");
            if self.wait(self.settings.read_retry()).await {
                break;
            }
        }

        tracing::debug!("Acquisition supervisor stopped");
    }

    /// Inner sampling loop. Returns `true` when the device was lost
    /// (caller reacquires), `false` on cancellation.
    async fn sample_until_lost(&mut self, mut handle: S::Handle) -> bool {
        loop {
            let frame = match handle.read_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("Frame not received: {}", e);
                    // Dropping the handle releases the device before
                    // the reacquire backoff starts.
                    drop(handle);
                    return true;
                }
            };

            let presence_detected = self.classifier.classify(&frame);
            let transition = self.machine.update(presence_detected);
            self.publisher.publish(transition.state);

            if transition.alert_edge {
                self.alert_sink.alert();
            }

            if self.wait(self.settings.sample_interval()).await {
                return false;
            }
        }
    }

    /// Sleep for `delay`, returning `true` if cancelled first.
    async fn wait(&self, delay: std::time::Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => true,
            _ = tokio::time::sleep(delay) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::capture::SyntheticSource;
    use crate::classifier::{LumaPresenceClassifier, ScriptedClassifier};
    use crate::settings::MonitorSettings;

    struct CountingAlertSink(Arc<AtomicUsize>);

    impl AlertSink for CountingAlertSink {
        fn alert(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn fast_settings() -> MonitorSettings {
        MonitorSettings {
            threshold: 30,
            sample_interval_ms: 100,
            open_retry_ms: 5_000,
            read_retry_ms: 2_000,
            max_open_attempts: 0,
        }
    }

    async fn wait_for<F: Fn() -> bool>(cond: F) {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[test]
    fn alert_sink_is_shareable_across_threads() {
        // The supervisor future only satisfies tokio::spawn's bounds if
        // the boxed sink is Send + Sync.
        fn assert_shareable<T: Send + Sync + ?Sized>() {}
        assert_shareable::<dyn AlertSink>();
    }

    #[tokio::test(start_paused = true)]
    async fn bright_source_stays_awake() {
        let publisher = StatusPublisher::new();
        let cancel = CancellationToken::new();
        let supervisor = AcquisitionSupervisor::new(
            SyntheticSource::bright(),
            LumaPresenceClassifier::default(),
            publisher.clone(),
            fast_settings(),
            cancel.clone(),
        );

        let task = tokio::spawn(supervisor.run());
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!publisher.read().sleeping);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn sustained_absence_publishes_sleeping_with_one_alert() {
        let publisher = StatusPublisher::new();
        let cancel = CancellationToken::new();
        let alerts = Arc::new(AtomicUsize::new(0));

        // 40 absent samples, then sustained presence.
        let mut script = vec![false; 40];
        script.push(true);
        let supervisor = AcquisitionSupervisor::new(
            SyntheticSource::bright(),
            ScriptedClassifier::new(script),
            publisher.clone(),
            fast_settings(),
            cancel.clone(),
        )
        .with_alert_sink(Box::new(CountingAlertSink(alerts.clone())));

        let task = tokio::spawn(supervisor.run());

        let p = publisher.clone();
        wait_for(move || p.read().sleeping).await;
        assert_eq!(alerts.load(Ordering::SeqCst), 1);

        // Instant wake on the first present sample.
        let p = publisher.clone();
        wait_for(move || !p.read().sleeping).await;
        assert_eq!(alerts.load(Ordering::SeqCst), 1);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn alert_fires_once_per_episode() {
        let publisher = StatusPublisher::new();
        let cancel = CancellationToken::new();
        let alerts = Arc::new(AtomicUsize::new(0));

        // Two sleep episodes separated by a single wake sample.
        let mut script = vec![false; 40];
        script.push(true);
        script.extend(vec![false; 40]);
        let settings = MonitorSettings {
            threshold: 30,
            ..fast_settings()
        };
        let supervisor = AcquisitionSupervisor::new(
            SyntheticSource::bright(),
            ScriptedClassifier::new(script),
            publisher.clone(),
            settings,
            cancel.clone(),
        )
        .with_alert_sink(Box::new(CountingAlertSink(alerts.clone())));

        let task = tokio::spawn(supervisor.run());

        let a = alerts.clone();
        wait_for(move || a.load(Ordering::SeqCst) == 2).await;
        assert!(publisher.read().sleeping);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn open_failures_back_off_then_recover() {
        // Two failed opens cost two full open backoffs (5 s each)
        // before the third attempt succeeds and sampling proceeds.
        let source = SyntheticSource::bright().fail_opens(2);
        let attempts = source.open_attempts();
        let publisher = StatusPublisher::new();
        let cancel = CancellationToken::new();
        let supervisor = AcquisitionSupervisor::new(
            source,
            LumaPresenceClassifier::default(),
            publisher.clone(),
            fast_settings(),
            cancel.clone(),
        );

        let start = tokio::time::Instant::now();
        let task = tokio::spawn(supervisor.run());

        let a = attempts.clone();
        wait_for(move || a.load(std::sync::atomic::Ordering::SeqCst) >= 3).await;
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_secs(10),
            "expected two 5s backoffs, got {:?}",
            elapsed
        );
        assert!(elapsed < Duration::from_secs(11), "backoff overshoot: {:?}", elapsed);

        // Monitoring proceeds normally after recovery.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!publisher.read().sleeping);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn lost_device_is_reacquired_on_read_backoff() {
        let source = SyntheticSource::bright().lose_after_reads(3);
        let attempts = source.open_attempts();
        let publisher = StatusPublisher::new();
        let cancel = CancellationToken::new();
        let supervisor = AcquisitionSupervisor::new(
            source,
            LumaPresenceClassifier::default(),
            publisher.clone(),
            fast_settings(),
            cancel.clone(),
        );

        let task = tokio::spawn(supervisor.run());

        // The source dies every 3 reads; the supervisor must keep
        // reopening it without ever returning.
        let a = attempts.clone();
        wait_for(move || a.load(std::sync::atomic::Ordering::SeqCst) >= 3).await;
        assert!(!publisher.read().sleeping);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn capped_retry_policy_exhausts() {
        let source = SyntheticSource::bright().fail_opens(10);
        let attempts = source.open_attempts();
        let settings = MonitorSettings {
            max_open_attempts: 3,
            ..fast_settings()
        };
        let supervisor = AcquisitionSupervisor::new(
            source,
            LumaPresenceClassifier::default(),
            StatusPublisher::new(),
            settings,
            CancellationToken::new(),
        );

        // run() returns on its own once the policy is exhausted.
        supervisor.run().await;
        assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_the_loop_during_backoff() {
        // With an unopenable source the supervisor sits in the open
        // backoff; cancellation must still end it within one interval.
        let source = SyntheticSource::bright().fail_opens(u32::MAX);
        let cancel = CancellationToken::new();
        let supervisor = AcquisitionSupervisor::new(
            source,
            LumaPresenceClassifier::default(),
            StatusPublisher::new(),
            fast_settings(),
            cancel.clone(),
        );

        let task = tokio::spawn(supervisor.run());
        tokio::time::sleep(Duration::from_secs(1)).await;
        cancel.cancel();
        task.await.unwrap();
    }
}
