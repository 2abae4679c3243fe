// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector.
//!
//! Playback drivers hold a [`DiagnosticsHandle`] and fire events into a
//! bounded channel; the owner of the [`DiagnosticsCollector`] drains them
//! into an [`EventLog`] and exports the log as a JSON report.

use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{DiagnosticEvent, DiagnosticEventKind, EventCapacity, EventLog};
use crate::config::DiagnosticsConfig;
use crate::error::Result;

/// Events that may wait in the channel before new ones are dropped.
const CHANNEL_CAPACITY: usize = 256;

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone. Sending never blocks: when the channel is full the event
/// is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    pub fn log_warning(&self, message: impl Into<String>) {
        self.log(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }
}

/// Receives events from handles and keeps the most recent ones.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    log: EventLog<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(EventCapacity::default())
    }
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: EventCapacity) -> Self {
        let (event_tx, event_rx) = bounded(CHANNEL_CAPACITY);
        Self {
            log: EventLog::new(capacity),
            event_tx,
            event_rx,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    /// Creates a collector sized by the `[diagnostics]` settings.
    #[must_use]
    pub fn from_config(config: &DiagnosticsConfig) -> Self {
        Self::new(EventCapacity::from(config))
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every pending event from the channel into the log.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.log.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Maximum number of events kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.log.capacity()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.log.iter()
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// Serializes the stored events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    /// Writes the JSON report to `path` through a temporary file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.export_json()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn build_report(&self) -> Report<'_> {
        Report {
            generated_at: Utc::now(),
            collection_started_at: self.started_at_utc,
            event_count: self.log.len(),
            events: self
                .log
                .iter()
                .map(|event| ReportEvent {
                    offset_ms: event.timestamp.duration_since(self.started_at).as_millis() as u64,
                    kind: &event.kind,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    collection_started_at: DateTime<Utc>,
    event_count: usize,
    events: Vec<ReportEvent<'a>>,
}

#[derive(Serialize)]
struct ReportEvent<'a> {
    /// Milliseconds since the collector was created.
    offset_ms: u64,
    #[serde(flatten)]
    kind: &'a DiagnosticEventKind,
}
