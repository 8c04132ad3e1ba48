//! The continuous-reporting timer thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Sender};
use motebridge_scheduler::TickScheduler;
use tracing::{debug, error, info, warn};

/// A running timer thread. Dropping the handle without [`stop`](Self::stop)
/// leaves the thread running until the process exits.
#[derive(Debug)]
pub(crate) struct TimerHandle {
    running: Arc<AtomicBool>,
    shutdown_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl TimerHandle {
    /// Spawn a thread calling `tick` every `period_ns`.
    pub(crate) fn spawn(
        period_ns: u64,
        mut tick: impl FnMut() + Send + 'static,
    ) -> std::io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let (shutdown_tx, shutdown_rx) = channel::bounded::<()>(1);
        let thread_running = Arc::clone(&running);

        let thread = thread::Builder::new()
            .name("motebridge-timer".into())
            .spawn(move || {
                let mut scheduler = TickScheduler::with_period(period_ns);
                let mut overrun_logged = false;
                while thread_running.load(Ordering::Acquire) {
                    if shutdown_rx.try_recv().is_ok() {
                        break;
                    }
                    if let Err(err) = scheduler.wait_for_tick() {
                        if !overrun_logged {
                            overrun_logged = true;
                            warn!(%err, "report timer overran");
                        }
                    }
                    tick();
                }
                let metrics = scheduler.metrics();
                debug!(
                    ticks = metrics.total_ticks,
                    missed = metrics.missed_ticks,
                    p99_jitter_ns = metrics.p99_jitter_ns(),
                    "report timer exiting"
                );
            })?;

        info!(period_ns, "report timer started");
        Ok(Self {
            running,
            shutdown_tx,
            thread,
        })
    }

    /// Signal the thread and wait for it. At most one tick still runs.
    pub(crate) fn stop(self) {
        self.running.store(false, Ordering::Release);
        // Full or disconnected both mean the thread is already on its way out.
        if self.shutdown_tx.try_send(()).is_err() {
            debug!("timer shutdown already signalled");
        }
        if self.thread.join().is_err() {
            error!("report timer thread panicked");
        } else {
            info!("report timer stopped");
        }
    }
}
