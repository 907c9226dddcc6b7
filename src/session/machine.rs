//! The recognition-session state machine.
//!
//! All lifecycle decisions live in [`transition`]: a pure function from
//! (state, event) to the next state plus the actions the runtime must carry
//! out. The session coordinator executes actions; it never decides them.
//! The transient Error/TimedOut conditions are expressed as `NotifyError`
//! actions on the direct path back to `Idle`, so a session can never be
//! observed stuck in them.

use crate::error::ErrorKind;

/// Lifecycle states of one recognition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No attempt in flight; callbacks cleared.
    Idle,
    /// Preconditions passed, engine capture being established.
    Starting,
    /// Engine is capturing; the timeout is armed.
    Listening,
    /// Stop requested; waiting for the engine to confirm termination.
    Stopping,
}

/// Everything that can happen to an in-flight session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Engine confirmed it is capturing.
    EngineStarted,
    /// Interim hypothesis from the engine.
    Partial(String),
    /// Final hypothesis from the engine.
    Final(String),
    /// Engine confirmed termination.
    Ended,
    /// Engine reported a native error code.
    EngineError(i32),
    /// The recording-duration timer fired.
    TimeoutElapsed,
    /// The caller asked the session to stop.
    StopRequested,
}

/// Side effects the coordinator must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Invoke the observer's `on_start`.
    NotifyStarted,
    /// Normalize and deliver a result to the observer.
    EmitTranscript { text: String, is_final: bool },
    /// Prevent the timeout from firing.
    DisarmTimeout,
    /// Ask the engine to finish gracefully.
    RequestEngineEnd,
    /// Ask the engine to abandon capture.
    CancelEngine,
    /// Invoke the observer's `on_error` with the mapped kind.
    NotifyError(ErrorKind),
    /// Invoke the observer's `on_end`.
    NotifyEnded,
    /// Drop callbacks and buffered text; the attempt is over.
    ClearSession,
}

/// Apply one event to the machine.
///
/// Events that make no sense in the current state (a stale timeout after
/// stop, engine chatter after reset) resolve to no actions instead of
/// panicking: the engine is an external component and may race the caller.
pub fn transition(state: SessionState, event: SessionEvent) -> (SessionState, Vec<SessionAction>) {
    use SessionAction as A;
    use SessionEvent as E;
    use SessionState as S;

    match (state, event) {
        // Nothing to do when idle; StopRequested is the documented no-op.
        (S::Idle, _) => (S::Idle, vec![]),

        (S::Starting | S::Listening, E::EngineStarted) => (S::Listening, vec![A::NotifyStarted]),

        (S::Listening | S::Stopping, E::Partial(text)) => (
            state,
            vec![A::EmitTranscript {
                text,
                is_final: false,
            }],
        ),

        (S::Listening | S::Stopping, E::Final(text)) => (
            state,
            vec![
                A::DisarmTimeout,
                A::EmitTranscript {
                    text,
                    is_final: true,
                },
            ],
        ),

        (_, E::Ended) => (
            S::Idle,
            vec![A::DisarmTimeout, A::NotifyEnded, A::ClearSession],
        ),

        (_, E::EngineError(code)) => (
            S::Idle,
            vec![
                A::DisarmTimeout,
                A::NotifyError(ErrorKind::from_engine_code(code)),
                A::ClearSession,
            ],
        ),

        (S::Listening, E::TimeoutElapsed) => (
            S::Idle,
            vec![
                A::CancelEngine,
                A::NotifyError(ErrorKind::Timeout),
                A::ClearSession,
            ],
        ),

        (S::Starting | S::Listening, E::StopRequested) => (
            S::Stopping,
            vec![A::DisarmTimeout, A::RequestEngineEnd],
        ),

        // Stale or duplicate events while starting/stopping.
        (S::Starting | S::Stopping, E::TimeoutElapsed)
        | (S::Stopping, E::EngineStarted | E::StopRequested)
        | (S::Starting, E::Partial(_) | E::Final(_)) => (state, vec![]),
    }
}
