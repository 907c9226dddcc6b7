//! The external recognition-engine capability.
//!
//! The engine performs the actual acoustic recognition; this crate only
//! drives it. Implementations deliver events over a channel returned from
//! `begin`, in the order start → (partial|final)* → end, with errors able
//! to arrive at any point.

use crate::error::{Result, ScribeError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{mpsc, Mutex};

/// Options passed to the engine when capture begins.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Deliver interim hypotheses, not only finals.
    pub partial_results: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            partial_results: true,
        }
    }
}

/// Raw events emitted by a recognition engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Capture is live.
    Started,
    /// Interim hypothesis.
    Partial(String),
    /// Final hypothesis.
    Final(String),
    /// Capture finished.
    Ended,
    /// Engine-native error code.
    Error(i32),
}

/// Speech recognition capability consumed by [`crate::RecognitionSession`].
///
/// This trait allows swapping implementations (a platform recognizer vs the
/// in-crate mock).
#[async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Begin capturing for `locale`. Returns the event stream for this
    /// attempt.
    async fn begin(
        &self,
        locale: &str,
        options: EngineOptions,
    ) -> Result<mpsc::Receiver<EngineEvent>>;

    /// Finish gracefully; the engine emits any pending final result and then
    /// `Ended`.
    async fn end(&self) -> Result<()>;

    /// Abandon capture; nothing further is emitted.
    async fn cancel(&self) -> Result<()>;

    /// Whether the engine can currently recognize speech.
    async fn is_available(&self) -> bool;
}

/// Scripted engine for tests.
///
/// Events queued with [`MockEngine::with_events`] are delivered as soon as
/// `begin` is called. `end` emits an `Ended` event; `cancel` closes the
/// stream without emitting anything.
pub struct MockEngine {
    scripted: Vec<EngineEvent>,
    available: bool,
    fail_begin: bool,
    live_tx: Mutex<Option<mpsc::Sender<EngineEvent>>>,
    begin_calls: AtomicUsize,
    end_calls: AtomicUsize,
    cancel_calls: AtomicUsize,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            scripted: Vec::new(),
            available: true,
            fail_begin: false,
            live_tx: Mutex::new(None),
            begin_calls: AtomicUsize::new(0),
            end_calls: AtomicUsize::new(0),
            cancel_calls: AtomicUsize::new(0),
        }
    }

    /// Queue events delivered on `begin`.
    pub fn with_events(mut self, events: Vec<EngineEvent>) -> Self {
        self.scripted = events;
        self
    }

    /// Report the engine as unavailable.
    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Make `begin` fail.
    pub fn with_begin_failure(mut self) -> Self {
        self.fail_begin = true;
        self
    }

    pub fn begin_calls(&self) -> usize {
        self.begin_calls.load(Ordering::SeqCst)
    }

    pub fn end_calls(&self) -> usize {
        self.end_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecognitionEngine for MockEngine {
    async fn begin(
        &self,
        _locale: &str,
        _options: EngineOptions,
    ) -> Result<mpsc::Receiver<EngineEvent>> {
        self.begin_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_begin {
            return Err(ScribeError::EngineUnavailable {
                message: "mock engine refused to start".to_string(),
            });
        }

        let (tx, rx) = mpsc::channel(self.scripted.len().max(1) + 4);
        for event in &self.scripted {
            // Capacity covers the whole script, so this cannot fail.
            tx.try_send(event.clone()).ok();
        }
        *self.live_tx.lock().await = Some(tx);
        Ok(rx)
    }

    async fn end(&self) -> Result<()> {
        self.end_calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.live_tx.lock().await;
        if let Some(tx) = guard.as_ref() {
            tx.try_send(EngineEvent::Ended).ok();
        }
        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        // Dropping the sender closes the stream without emitting anything.
        self.live_tx.lock().await.take();
        Ok(())
    }

    async fn is_available(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_delivers_scripted_events() {
        let engine = MockEngine::new().with_events(vec![
            EngineEvent::Started,
            EngineEvent::Final("hello".to_string()),
            EngineEvent::Ended,
        ]);

        let mut rx = engine.begin("en-US", EngineOptions::default()).await.unwrap();
        assert_eq!(rx.recv().await, Some(EngineEvent::Started));
        assert_eq!(rx.recv().await, Some(EngineEvent::Final("hello".into())));
        assert_eq!(rx.recv().await, Some(EngineEvent::Ended));
    }

    #[tokio::test]
    async fn test_mock_begin_failure() {
        let engine = MockEngine::new().with_begin_failure();
        let result = engine.begin("en-US", EngineOptions::default()).await;
        assert!(matches!(
            result,
            Err(ScribeError::EngineUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_mock_end_emits_ended() {
        let engine = MockEngine::new().with_events(vec![EngineEvent::Started]);
        let mut rx = engine.begin("en-US", EngineOptions::default()).await.unwrap();
        assert_eq!(rx.recv().await, Some(EngineEvent::Started));

        engine.end().await.unwrap();
        assert_eq!(rx.recv().await, Some(EngineEvent::Ended));
        assert_eq!(engine.end_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_cancel_closes_stream() {
        let engine = MockEngine::new();
        let mut rx = engine.begin("en-US", EngineOptions::default()).await.unwrap();

        engine.cancel().await.unwrap();
        assert_eq!(rx.recv().await, None);
        assert_eq!(engine.cancel_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_availability() {
        assert!(MockEngine::new().is_available().await);
        assert!(!MockEngine::new().with_availability(false).is_available().await);
    }

    #[tokio::test]
    async fn test_engine_trait_is_object_safe() {
        let engine: Box<dyn RecognitionEngine> =
            Box::new(MockEngine::new().with_events(vec![EngineEvent::Ended]));
        let mut rx = engine.begin("en-US", EngineOptions::default()).await.unwrap();
        assert_eq!(rx.recv().await, Some(EngineEvent::Ended));
    }
}
