use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};
use tracing::{debug, error, trace};

use crate::common::config::RepeaterSettings;
use crate::model::event_container::panic_message;

/// Messages posted from background threads and drained on the thread that
/// owns the layouts.
pub struct MainQueue<M> {
    tx: Sender<M>,
    rx: Receiver<M>,
}

impl<M> Default for MainQueue<M> {
    fn default() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }
}

impl<M> MainQueue<M> {
    pub fn new() -> Self { Self::default() }

    pub fn sender(&self) -> Sender<M> { self.tx.clone() }

    /// Handles everything already queued without blocking.
    pub fn run_pending(&self, mut handle: impl FnMut(M)) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            handle(msg);
            handled += 1;
        }
        handled
    }

    pub fn wait(&self, timeout: Duration) -> Option<M> { self.rx.recv_timeout(timeout).ok() }
}

/// A background thread that posts a message every `interval` until stopped.
///
/// The message is built on the background thread but is meant to be acted on
/// by whoever drains the receiving [`MainQueue`].
pub struct Repeater {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Repeater {
    pub fn spawn<M: Send + 'static>(
        name: &str,
        interval: Duration,
        sender: Sender<M>,
        mut make: impl FnMut(u64) -> M + Send + 'static,
    ) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let thread_name = name.to_string();
        let handle = thread::Builder::new().name(thread_name.clone()).spawn(move || {
            debug!(name = %thread_name, ?interval, "repeater started");
            let mut tick = 0;
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                tick += 1;
                trace!(name = %thread_name, tick, "repeater tick");
                if sender.send(make(tick)).is_err() {
                    break;
                }
            }
            debug!(name = %thread_name, "repeater stopped");
        })?;

        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn from_settings<M: Send + 'static>(
        name: &str,
        settings: &RepeaterSettings,
        sender: Sender<M>,
        make: impl FnMut(u64) -> M + Send + 'static,
    ) -> std::io::Result<Self> {
        Self::spawn(name, Duration::from_millis(settings.interval_ms), sender, make)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the thread and waits for it to exit.
    pub fn stop(&mut self) {
        self.stop.take();
        let Some(handle) = self.handle.take() else { return };
        let name = handle.thread().name().unwrap_or("repeater").to_string();
        if let Err(payload) = handle.join() {
            let message = panic_message(payload.as_ref());
            error!(%name, %message, "repeater thread panicked");
        }
    }
}

impl Drop for Repeater {
    fn drop(&mut self) { self.stop(); }
}
