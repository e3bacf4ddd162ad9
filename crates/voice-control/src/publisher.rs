//! Fixed-rate republishing of the current motion intent.

use crate::config::VoiceControlConfig;
use crate::rate::Rate;
use crate::shutdown::ShutdownSignal;
use crate::sink::VelocitySink;
use crate::store::IntentStore;
use crate::types::VelocityCommand;
use crate::{ControlError, Result};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublisherState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishStats {
    /// Regular ticks published, not counting the final stop.
    pub ticks: u64,
    pub late_ticks: u64,
    pub final_stop_sent: bool,
}

/// Sends the zero command when dropped, whichever way the loop exits.
struct StopOnExit<'a, S: VelocitySink> {
    sink: &'a mut S,
    sent: &'a mut bool,
}

impl<S: VelocitySink> Drop for StopOnExit<'_, S> {
    fn drop(&mut self) {
        match self.sink.publish(&VelocityCommand::ZERO) {
            Ok(()) => {
                *self.sent = true;
                info!("final zero velocity command sent");
            }
            Err(e) => warn!(error = %e, "failed to send final zero velocity command"),
        }
    }
}

pub struct CommandPublisher<S> {
    store: Arc<IntentStore>,
    sink: S,
    period: Duration,
    signal: ShutdownSignal,
}

impl<S: VelocitySink> CommandPublisher<S> {
    pub fn new(store: Arc<IntentStore>, sink: S, period: Duration) -> Self {
        Self {
            store,
            sink,
            period,
            signal: ShutdownSignal::new(),
        }
    }

    pub fn from_config(
        store: Arc<IntentStore>,
        sink: S,
        config: &VoiceControlConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(store, sink, config.period()))
    }

    /// Share an existing signal instead of the publisher's own.
    pub fn with_signal(mut self, signal: ShutdownSignal) -> Self {
        self.signal = signal;
        self
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    /// Publish until the shutdown signal is raised or the sink fails, then
    /// emit a single zero command.
    pub fn run(self) -> Result<PublishStats> {
        info!(
            period_ms = self.period.as_secs_f64() * 1000.0,
            "voice control base command publisher thread is running"
        );
        let CommandPublisher {
            store,
            mut sink,
            period,
            signal,
        } = self;

        let mut stats = PublishStats::default();
        let mut rate = Rate::new(period);
        let mut final_sent = false;
        let outcome = {
            let guard = StopOnExit {
                sink: &mut sink,
                sent: &mut final_sent,
            };
            tick_loop(&store, &mut *guard.sink, &signal, &mut rate, &mut stats)
        };
        stats.late_ticks = rate.late_ticks();
        stats.final_stop_sent = final_sent;
        outcome.map(|()| stats)
    }

    /// Run on a dedicated thread.
    pub fn spawn(self) -> Result<PublisherHandle>
    where
        S: 'static,
    {
        let signal = self.signal.clone();
        let thread = std::thread::Builder::new()
            .name("cmd-vel-publisher".to_string())
            .spawn(move || self.run())
            .map_err(ControlError::Spawn)?;
        Ok(PublisherHandle { signal, thread })
    }
}

fn tick_loop<S: VelocitySink>(
    store: &IntentStore,
    sink: &mut S,
    signal: &ShutdownSignal,
    rate: &mut Rate,
    stats: &mut PublishStats,
) -> Result<()> {
    let mut state = PublisherState::Running;
    while state == PublisherState::Running {
        // Intent lock is released before the sink is touched.
        let command = store.snapshot().command();
        // A raise() racing this publish waits for it, so once raise() returns
        // only the final stop goes out.
        let Some(published) = signal.unless_raised(|| sink.publish(&command)) else {
            state = PublisherState::Stopped;
            continue;
        };
        if let Err(e) = published {
            error!(error = %e, "velocity publish failed");
            return Err(e);
        }
        stats.ticks += 1;

        if signal.wait_timeout(rate.next_wait()) {
            state = PublisherState::Stopped;
        }
    }
    Ok(())
}

/// Owner side of a publisher running on its own thread.
pub struct PublisherHandle {
    signal: ShutdownSignal,
    thread: JoinHandle<Result<PublishStats>>,
}

impl PublisherHandle {
    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    pub fn state(&self) -> PublisherState {
        if self.thread.is_finished() {
            PublisherState::Stopped
        } else {
            PublisherState::Running
        }
    }

    /// Wait for the thread to finish on its own.
    pub fn join(self) -> Result<PublishStats> {
        self.thread
            .join()
            .map_err(|_| ControlError::PublisherPanicked)?
    }

    /// Raise the signal and wait for the final stop command to go out.
    pub fn shutdown(self) -> Result<PublishStats> {
        self.signal.raise();
        self.join()
    }
}
