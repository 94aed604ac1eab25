use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::common::config::TooltipSettings;
use crate::model::arena::ElementId;

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub target: ElementId,
    pub text: String,
    pub show_at: Instant,
}

#[derive(Debug, Default)]
struct Inner {
    pending: Option<Tooltip>,
    shown: Option<Tooltip>,
}

/// Hover tooltip bookkeeping shared between the hover source and the thread
/// that draws.
///
/// Scheduling may happen from any thread; [`TooltipState::due`] is polled by
/// the owner of the layouts and promotes the pending tooltip once its delay
/// has elapsed.
#[derive(Debug, Clone)]
pub struct TooltipState {
    inner: Arc<Mutex<Inner>>,
    delay: Duration,
}

impl TooltipState {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            delay,
        }
    }

    pub fn from_settings(settings: &TooltipSettings) -> Self {
        Self::new(Duration::from_millis(settings.delay_ms))
    }

    pub fn delay(&self) -> Duration { self.delay }

    /// Replaces any pending tooltip. Hovering the target that is already
    /// shown keeps it up without restarting the delay.
    pub fn schedule(&self, target: ElementId, text: impl Into<String>, now: Instant) {
        let text = text.into();
        let mut inner = self.inner.lock();
        if inner.shown.as_ref().is_some_and(|t| t.target == target && t.text == text) {
            inner.pending = None;
            return;
        }
        trace!(element = ?target, %text, "tooltip scheduled");
        inner.shown = None;
        inner.pending = Some(Tooltip {
            target,
            text,
            show_at: now + self.delay,
        });
    }

    /// Drops the pending or shown tooltip for `target`.
    pub fn cancel(&self, target: ElementId) -> bool {
        let mut inner = self.inner.lock();
        let mut cancelled = false;
        if inner.pending.as_ref().is_some_and(|t| t.target == target) {
            inner.pending = None;
            cancelled = true;
        }
        if inner.shown.as_ref().is_some_and(|t| t.target == target) {
            inner.shown = None;
            cancelled = true;
        }
        cancelled
    }

    pub fn hide(&self) {
        let mut inner = self.inner.lock();
        inner.pending = None;
        inner.shown = None;
    }

    /// Returns the tooltip that became visible at `now`, if any.
    pub fn due(&self, now: Instant) -> Option<Tooltip> {
        let mut inner = self.inner.lock();
        if inner.pending.as_ref().is_none_or(|t| t.show_at > now) {
            return None;
        }
        let tooltip = inner.pending.take()?;
        debug!(element = ?tooltip.target, text = %tooltip.text, "tooltip shown");
        inner.shown = Some(tooltip.clone());
        Some(tooltip)
    }

    pub fn shown(&self) -> Option<Tooltip> { self.inner.lock().shown.clone() }

    pub fn is_pending(&self) -> bool { self.inner.lock().pending.is_some() }
}
