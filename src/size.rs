//! Debounced container size observation.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// What the host can observe. Element observation reports the container's
/// own box; without it we fall back to whole-window resize notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverSource {
    Element,
    Window,
}

impl ObserverSource {
    pub fn detect(element_observation_available: bool) -> Self {
        if element_observation_available {
            Self::Element
        } else {
            Self::Window
        }
    }
}

/// Collapses bursts of size notifications into one update after a quiet
/// period.
#[derive(Debug, Clone)]
pub struct SizeObserver {
    source: ObserverSource,
    debounce_ms: f64,
    last_notified: Option<f64>,
    pending: Option<Size>,
    last_applied: Size,
    disposed: bool,
}

impl SizeObserver {
    pub fn observe(initial: Size, source: ObserverSource, debounce_ms: f64) -> Self {
        tracing::debug!(
            ?source,
            width = initial.width,
            height = initial.height,
            "size observer attached"
        );
        Self {
            source,
            debounce_ms: debounce_ms.max(0.0),
            last_notified: None,
            pending: None,
            last_applied: initial,
            disposed: false,
        }
    }

    pub fn source(&self) -> ObserverSource {
        self.source
    }

    pub fn size(&self) -> Size {
        self.last_applied
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Record a size report. Window-sourced reports carry the container's
    /// re-measured size, same as element reports.
    pub fn notify(&mut self, size: Size, now_ms: f64) {
        if self.disposed {
            return;
        }
        if self.pending.is_none() && size == self.last_applied {
            return;
        }
        self.pending = Some(size);
        self.last_notified = Some(now_ms);
    }

    /// The settled size, once no report has arrived for the debounce period.
    pub fn poll(&mut self, now_ms: f64) -> Option<Size> {
        if self.disposed {
            return None;
        }
        let pending = self.pending?;
        let last = self.last_notified?;
        if now_ms - last < self.debounce_ms {
            return None;
        }
        self.pending = None;
        self.last_notified = None;
        if pending == self.last_applied {
            return None;
        }
        self.last_applied = pending;
        tracing::debug!(
            width = pending.width,
            height = pending.height,
            "applying debounced resize"
        );
        Some(pending)
    }

    /// Stop observing. Safe to call more than once.
    pub fn dispose(&mut self) {
        if !self.disposed {
            tracing::debug!(source = ?self.source, "size observer detached");
        }
        self.disposed = true;
        self.pending = None;
        self.last_notified = None;
    }
}

impl Drop for SizeObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}
