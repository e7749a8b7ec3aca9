//! Begin/complete logging around a unit of work
//!
//! A scope logs the phase's BEGIN event when opened and exactly one of
//! COMPLETE or FAILED when closed. A scope dropped while still open logs
//! FAILED.

use std::time::Instant;

use super::events::Event;
use super::log_event_with_fields;

/// Units of work that are logged as a begin/complete pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    LabelImport,
    IndexBuild,
}

impl Phase {
    fn begin(self) -> Event {
        match self {
            Phase::LabelImport => Event::LabelImportBegin,
            Phase::IndexBuild => Event::IndexBuildBegin,
        }
    }

    fn complete(self) -> Event {
        match self {
            Phase::LabelImport => Event::LabelImportComplete,
            Phase::IndexBuild => Event::IndexBuildComplete,
        }
    }

    fn failed(self) -> Event {
        match self {
            Phase::LabelImport => Event::LabelImportFailed,
            Phase::IndexBuild => Event::IndexBuildFailed,
        }
    }
}

/// An open phase.
///
/// ```ignore
/// let scope = ObservationScope::open(Phase::IndexBuild, &[("labels", "10")]);
/// // ... do work ...
/// scope.complete(&[("nodes", "3")]);
/// ```
pub struct ObservationScope {
    phase: Phase,
    fields: Vec<(&'static str, String)>,
    started: Instant,
    closed: bool,
}

impl ObservationScope {
    /// Logs the BEGIN event; `fields` are repeated on every line of the scope.
    pub fn open(phase: Phase, fields: &[(&'static str, &str)]) -> Self {
        log_event_with_fields(phase.begin(), fields);

        Self {
            phase,
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            started: Instant::now(),
            closed: false,
        }
    }

    /// Logs COMPLETE with `extra` fields and the elapsed milliseconds.
    pub fn complete(mut self, extra: &[(&str, &str)]) {
        let elapsed = self.started.elapsed().as_millis().to_string();
        let mut fields = self.own_fields();
        fields.extend_from_slice(extra);
        fields.push(("elapsed_ms", elapsed.as_str()));

        log_event_with_fields(self.phase.complete(), &fields);
        self.closed = true;
    }

    /// Logs FAILED with the reason.
    pub fn fail(mut self, reason: &str) {
        self.log_failed(reason);
        self.closed = true;
    }

    fn own_fields(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    fn log_failed(&self, reason: &str) {
        let mut fields = self.own_fields();
        fields.push(("reason", reason));
        log_event_with_fields(self.phase.failed(), &fields);
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.closed {
            self.log_failed("dropped before completion");
        }
    }
}
