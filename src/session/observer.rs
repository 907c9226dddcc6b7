//! Session callbacks surfaced to the caller.

use crate::error::ErrorKind;
use std::sync::{Arc, Mutex};

/// A normalized recognition result.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptUpdate {
    /// Normalized text, ready for display.
    pub text: String,
    /// False for interim hypotheses, true for the final result.
    pub is_final: bool,
    /// Advisory only; the engine reports no real confidence signal.
    pub confidence: f32,
}

/// Receives session lifecycle callbacks.
///
/// Registered per attempt via `RecognitionSession::start` and dropped on
/// every return to idle, so a stale observer can never fire against a new
/// attempt.
pub trait SessionObserver: Send {
    /// Capture is live.
    fn on_start(&mut self) {}

    /// A normalized partial or final result.
    fn on_result(&mut self, update: TranscriptUpdate);

    /// The attempt failed; the session is back to idle.
    fn on_error(&mut self, kind: ErrorKind);

    /// The attempt finished; the session is back to idle.
    fn on_end(&mut self) {}
}

/// Everything a [`CollectorObserver`] saw, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    Started,
    Result(TranscriptUpdate),
    Error(ErrorKind),
    Ended,
}

/// Observer that records every callback for inspection in tests.
///
/// Clones share the same event log, so a test can keep one handle and move
/// the other into the session.
#[derive(Debug, Clone, Default)]
pub struct CollectorObserver {
    events: Arc<Mutex<Vec<ObservedEvent>>>,
}

impl CollectorObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything observed so far.
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Only the results, in delivery order.
    pub fn results(&self) -> Vec<TranscriptUpdate> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ObservedEvent::Result(update) => Some(update),
                _ => None,
            })
            .collect()
    }

    /// Only the reported error kinds.
    pub fn errors(&self) -> Vec<ErrorKind> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ObservedEvent::Error(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    /// Number of `on_start` invocations.
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, ObservedEvent::Started))
            .count()
    }

    /// Number of `on_end` invocations.
    pub fn ended_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, ObservedEvent::Ended))
            .count()
    }

    fn push(&self, event: ObservedEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl SessionObserver for CollectorObserver {
    fn on_start(&mut self) {
        self.push(ObservedEvent::Started);
    }

    fn on_result(&mut self, update: TranscriptUpdate) {
        self.push(ObservedEvent::Result(update));
    }

    fn on_error(&mut self, kind: ErrorKind) {
        self.push(ObservedEvent::Error(kind));
    }

    fn on_end(&mut self) {
        self.push(ObservedEvent::Ended);
    }
}
