//! Bounded on-screen debug log.
//!
//! `DebugLog` is shared between the frame loop (which snapshots it for the
//! overlay) and any thread that logs through `tracing`. `DebugLogLayer`
//! forwards every `tracing` event into it while debug mode is on.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::config::UiConfig;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Fixed-capacity message queue; the oldest message is evicted on overflow.
#[derive(Debug)]
pub struct DebugLog {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
    enabled: AtomicBool,
}

impl DebugLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity + 1)),
            capacity,
            enabled: AtomicBool::new(false),
        }
    }

    /// Log sized by `ui.max_debug_logs`.
    pub fn from_config(ui: &UiConfig) -> Self {
        Self::new(ui.max_debug_logs)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Flip debug mode and return the new state.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::Relaxed)
    }

    /// Append a message. Dropped unless debug mode is on.
    pub fn push(&self, message: impl Into<String>) {
        if !self.is_enabled() {
            return;
        }
        let mut lines = self.lines.lock();
        lines.push_back(message.into());
        while lines.len() > self.capacity {
            lines.pop_front();
        }
    }

    /// Copy of the current messages, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

/// `tracing` layer that copies event messages into a `DebugLog`.
#[derive(Debug, Clone)]
pub struct DebugLogLayer {
    log: Arc<DebugLog>,
}

impl DebugLogLayer {
    pub fn new(log: Arc<DebugLog>) -> Self {
        Self { log }
    }
}

impl<S: Subscriber> Layer<S> for DebugLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !self.log.is_enabled() {
            return;
        }
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let line = visitor.finish();
        if !line.is_empty() {
            self.log.push(line);
        }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

/// Install the global subscriber: env-filtered console output plus the
/// on-screen debug log.
///
/// `default_filter` applies when `RUST_LOG` is unset.
pub fn init_logging(log: Arc<DebugLog>, default_filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(DebugLogLayer::new(log))
        .try_init()
}

#[cfg(test)]
mod tests {
    use std::thread;

    use tracing::{info, warn};
    use tracing_subscriber::registry;

    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_configured_capacity_evicts() {
        let config = AppConfig::from_yaml("ui:\n  max_debug_logs: 4\n").unwrap();
        let log = DebugLog::from_config(&config.ui);
        log.set_enabled(true);
        for i in 0..5 {
            log.push(format!("line {}", i));
        }
        assert_eq!(log.capacity(), 4);
        assert_eq!(log.snapshot(), vec!["line 1", "line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_evicts_oldest() {
        let log = DebugLog::new(3);
        log.set_enabled(true);
        for i in 0..5 {
            log.push(format!("msg {}", i));
        }
        assert_eq!(log.snapshot(), vec!["msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn test_disabled_drops_messages() {
        let log = DebugLog::new(3);
        log.push("ignored");
        assert!(log.is_empty());

        assert!(log.toggle());
        log.push("kept");
        assert!(!log.toggle());
        log.push("ignored again");
        assert_eq!(log.snapshot(), vec!["kept"]);
    }

    #[test]
    fn test_concurrent_appends_stay_bounded() {
        let log = Arc::new(DebugLog::new(10));
        log.set_enabled(true);
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..250 {
                        log.push(format!("{}-{}", t, i));
                        assert!(log.snapshot().len() <= 10);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(log.len(), 10);
    }

    #[test]
    fn test_layer_captures_events() {
        let log = Arc::new(DebugLog::new(5));
        let subscriber = registry().with(DebugLogLayer::new(Arc::clone(&log)));

        tracing::subscriber::with_default(subscriber, || {
            info!("before debug mode");
            log.set_enabled(true);
            info!("Tracking failure {}/{}", 3, 12);
            warn!(ratio = 6.5, "drift");
        });

        assert_eq!(log.snapshot(), vec!["Tracking failure 3/12", "drift ratio=6.5"]);
    }
}
