//! The recognition-session coordinator.
//!
//! A `RecognitionSession` is an explicit, caller-owned instance: it holds at
//! most one recognition attempt, drives the state machine in
//! [`crate::session::machine`], and forwards normalized text to the
//! registered observer. Starting a new attempt always fully resets the
//! previous one first, so a stale timer or callback can never fire against
//! the new attempt.

use crate::defaults;
use crate::error::{ErrorKind, Result, ScribeError};
use crate::lang;
use crate::session::engine::{EngineEvent, EngineOptions, RecognitionEngine};
use crate::session::machine::{transition, SessionAction, SessionEvent, SessionState};
use crate::session::observer::{SessionObserver, TranscriptUpdate};
use crate::session::permission::MicrophonePermission;
use crate::text::normalizer::normalize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How long `stop` waits for the engine's end confirmation to drain.
const STOP_GRACE: Duration = Duration::from_secs(5);

/// Tunables for one session instance.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Hard cap on recording duration; the timeout error fires past it.
    pub max_recording: Duration,
    /// Ask the engine for interim hypotheses.
    pub partial_results: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_recording: Duration::from_secs(defaults::MAX_RECORDING_SECS),
            partial_results: true,
        }
    }
}

/// Per-attempt state behind the session mutex.
struct Inner {
    state: SessionState,
    language: String,
    latest_text: String,
    observer: Option<Box<dyn SessionObserver>>,
    timeout_disarmed: Arc<AtomicBool>,
}

/// Coordinates one recognition attempt at a time against an external engine.
pub struct RecognitionSession {
    engine: Arc<dyn RecognitionEngine>,
    permission: Arc<dyn MicrophonePermission>,
    config: SessionConfig,
    inner: Arc<Mutex<Inner>>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl RecognitionSession {
    pub fn new(
        engine: Arc<dyn RecognitionEngine>,
        permission: Arc<dyn MicrophonePermission>,
    ) -> Self {
        Self::with_config(engine, permission, SessionConfig::default())
    }

    pub fn with_config(
        engine: Arc<dyn RecognitionEngine>,
        permission: Arc<dyn MicrophonePermission>,
        config: SessionConfig,
    ) -> Self {
        Self {
            engine,
            permission,
            config,
            inner: Arc::new(Mutex::new(Inner {
                state: SessionState::Idle,
                language: defaults::FALLBACK_LANGUAGE.to_string(),
                latest_text: String::new(),
                observer: None,
                timeout_disarmed: Arc::new(AtomicBool::new(true)),
            })),
            pump: Mutex::new(None),
        }
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    /// True while an attempt is starting, listening, or stopping.
    pub async fn is_active(&self) -> bool {
        self.state().await != SessionState::Idle
    }

    /// Start a recognition attempt for `language`.
    ///
    /// Any in-flight attempt is cancelled and discarded first. Precondition
    /// failures (permission, engine availability) report through the
    /// observer's `on_error` and return an error without the session ever
    /// leaving idle; `on_start` is never invoked on those paths.
    pub async fn start(
        &self,
        language: &str,
        mut observer: Box<dyn SessionObserver>,
    ) -> Result<()> {
        self.reset_in_flight().await;

        if !self.permission.request_access().await {
            debug!("microphone permission denied");
            observer.on_error(ErrorKind::PermissionDenied);
            return Err(ScribeError::PermissionDenied);
        }

        if !self.engine.is_available().await {
            observer.on_error(ErrorKind::EngineUnavailable);
            return Err(ScribeError::EngineUnavailable {
                message: "recognition engine is not available".to_string(),
            });
        }

        let disarmed = Arc::new(AtomicBool::new(false));
        {
            let mut inner = self.inner.lock().await;
            inner.state = SessionState::Starting;
            inner.language = language.to_string();
            inner.latest_text.clear();
            inner.observer = Some(observer);
            inner.timeout_disarmed = disarmed.clone();
        }

        let locale = lang::engine_locale(language);
        let options = EngineOptions {
            partial_results: self.config.partial_results,
        };

        let rx = match self.engine.begin(locale, options).await {
            Ok(rx) => rx,
            Err(e) => {
                let observer = {
                    let mut inner = self.inner.lock().await;
                    inner.state = SessionState::Idle;
                    inner.latest_text.clear();
                    inner.observer.take()
                };
                if let Some(mut observer) = observer {
                    observer.on_error(ErrorKind::EngineUnavailable);
                }
                return Err(e);
            }
        };

        self.inner.lock().await.state = SessionState::Listening;
        debug!(language, locale, "recognition session listening");

        let pump = tokio::spawn(pump_events(
            self.engine.clone(),
            self.inner.clone(),
            rx,
            self.config.max_recording,
            disarmed,
        ));
        *self.pump.lock().await = Some(pump);
        Ok(())
    }

    /// Stop the current attempt gracefully.
    ///
    /// No-op from idle. Otherwise the timeout is disarmed, the engine is
    /// asked to end, and this call waits for the engine's confirmation to
    /// drain so `on_end` has fired by the time it returns.
    pub async fn stop(&self) -> Result<()> {
        let proceed = {
            let mut inner = self.inner.lock().await;
            let (next, actions) = transition(inner.state, SessionEvent::StopRequested);
            if actions.is_empty() {
                false
            } else {
                inner.state = next;
                inner.timeout_disarmed.store(true, Ordering::SeqCst);
                true
            }
        };
        if !proceed {
            return Ok(());
        }

        if let Err(e) = self.engine.end().await {
            warn!(error = %e, "engine refused to stop; forcing session reset");
            if let Some(handle) = self.pump.lock().await.take() {
                handle.abort();
            }
            let observer = {
                let mut inner = self.inner.lock().await;
                inner.state = SessionState::Idle;
                inner.latest_text.clear();
                inner.observer.take()
            };
            if let Some(mut observer) = observer {
                observer.on_error(ErrorKind::Unknown);
            }
            return Err(e);
        }

        let handle = self.pump.lock().await.take();
        if let Some(mut handle) = handle
            && tokio::time::timeout(STOP_GRACE, &mut handle).await.is_err()
        {
            warn!("session pump did not finish within the stop grace period");
            handle.abort();
        }
        Ok(())
    }

    /// Cancel and discard any in-flight attempt without notifying its
    /// observer; buffered text, timer and callbacks are all reset.
    async fn reset_in_flight(&self) {
        let was_active = self.inner.lock().await.state != SessionState::Idle;

        if let Some(handle) = self.pump.lock().await.take() {
            handle.abort();
        }
        if was_active {
            debug!("discarding in-flight session before restart");
            if let Err(e) = self.engine.cancel().await {
                warn!(error = %e, "engine cancel failed");
            }
        }

        let mut inner = self.inner.lock().await;
        inner.state = SessionState::Idle;
        inner.observer = None;
        inner.latest_text.clear();
        inner.timeout_disarmed.store(true, Ordering::SeqCst);
    }
}

fn to_session_event(event: EngineEvent) -> SessionEvent {
    match event {
        EngineEvent::Started => SessionEvent::EngineStarted,
        EngineEvent::Partial(text) => SessionEvent::Partial(text),
        EngineEvent::Final(text) => SessionEvent::Final(text),
        EngineEvent::Ended => SessionEvent::Ended,
        EngineEvent::Error(code) => SessionEvent::EngineError(code),
    }
}

/// Drives engine events and the single-shot timeout through the machine
/// until the attempt finishes.
async fn pump_events(
    engine: Arc<dyn RecognitionEngine>,
    inner: Arc<Mutex<Inner>>,
    mut rx: mpsc::Receiver<EngineEvent>,
    max_recording: Duration,
    disarmed: Arc<AtomicBool>,
) {
    let deadline = tokio::time::Instant::now() + max_recording;

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline), if !disarmed.load(Ordering::SeqCst) => {
                apply_event(&engine, &inner, &disarmed, SessionEvent::TimeoutElapsed).await;
                break;
            }
            received = rx.recv() => {
                let event = match received {
                    Some(engine_event) => to_session_event(engine_event),
                    // Closed stream without an explicit end event.
                    None => SessionEvent::Ended,
                };
                if apply_event(&engine, &inner, &disarmed, event).await {
                    break;
                }
            }
        }
    }
}

/// Run one event through the transition function and execute its actions.
/// Returns true when the attempt is over.
async fn apply_event(
    engine: &Arc<dyn RecognitionEngine>,
    inner: &Mutex<Inner>,
    disarmed: &AtomicBool,
    event: SessionEvent,
) -> bool {
    let mut guard = inner.lock().await;
    let (next, actions) = transition(guard.state, event);
    guard.state = next;

    let mut finished = false;
    for action in actions {
        match action {
            SessionAction::NotifyStarted => {
                if let Some(observer) = guard.observer.as_mut() {
                    observer.on_start();
                }
            }
            SessionAction::EmitTranscript { text, is_final } => {
                let normalized = normalize(&text, &guard.language);
                guard.latest_text = normalized.clone();
                let confidence = if is_final {
                    defaults::FINAL_CONFIDENCE
                } else {
                    defaults::PARTIAL_CONFIDENCE
                };
                if let Some(observer) = guard.observer.as_mut() {
                    observer.on_result(TranscriptUpdate {
                        text: normalized,
                        is_final,
                        confidence,
                    });
                }
            }
            SessionAction::DisarmTimeout => {
                disarmed.store(true, Ordering::SeqCst);
            }
            SessionAction::RequestEngineEnd => {
                if let Err(e) = engine.end().await {
                    warn!(error = %e, "engine end failed");
                }
            }
            SessionAction::CancelEngine => {
                if let Err(e) = engine.cancel().await {
                    warn!(error = %e, "engine cancel failed");
                }
            }
            SessionAction::NotifyError(kind) => {
                debug!(%kind, "recognition session error");
                if let Some(observer) = guard.observer.as_mut() {
                    observer.on_error(kind);
                }
            }
            SessionAction::NotifyEnded => {
                if let Some(observer) = guard.observer.as_mut() {
                    observer.on_end();
                }
            }
            SessionAction::ClearSession => {
                guard.observer = None;
                guard.latest_text.clear();
                finished = true;
            }
        }
    }
    finished
}
