//! Observability subsystem
//!
//! JSON-line logging of typed lifecycle events, begin/complete scopes around
//! import and build, and per-handle query counters.
//!
//! Observability is read-only: it never changes what an operation returns.
//!
//! ```ignore
//! use elimination_index::observability::{Event, log_event_with_fields};
//!
//! log_event_with_fields(Event::HandleReady, &[("labels", "42")]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{ObservationScope, Phase};

/// Log a lifecycle event with fields
///
/// Failure events are logged at WARN since the caller also receives the
/// error as a return value.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = match event {
        Event::QueryExecuted => Severity::Trace,
        e if e.is_failure() => Severity::Warn,
        _ => Severity::Info,
    };
    Logger::log(severity, event.as_str(), fields);
}
