//! Poll/flush debouncing for burst-prone triggers.
//!
//! A trigger marks the debouncer pending and stamps the time; the owner polls
//! `should_execute` from its event loop (native) or arms a single timer that
//! calls the flush path (wasm). A new trigger inside the window restamps, so
//! only the latest burst member executes.

/// Milliseconds since an arbitrary fixed origin.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;
    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Milliseconds since the Unix epoch, from the JS clock.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Tracks when a debounced action should run after a period of inactivity.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: f64,
    last_event_ms: Option<f64>,
    pending: bool,
}

impl Debouncer {
    /// Create a debouncer with the given inactivity window.
    pub fn new(delay_ms: u64) -> Self {
        Debouncer {
            delay_ms: delay_ms as f64,
            last_event_ms: None,
            pending: false,
        }
    }

    /// Register that a trigger occurred; restarts the window.
    pub fn trigger(&mut self) {
        self.last_event_ms = Some(now_ms());
        self.pending = true;
    }

    /// True exactly once per settled burst: when a trigger is pending and the
    /// window has elapsed. Consumes the pending state.
    pub fn should_execute(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        if let Some(last) = self.last_event_ms {
            if now_ms() - last >= self.delay_ms {
                self.pending = false;
                self.last_event_ms = None;
                return true;
            }
        }
        false
    }

    /// Cancel any pending trigger.
    pub fn reset(&mut self) {
        self.last_event_ms = None;
        self.pending = false;
    }

    /// Whether a trigger is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
