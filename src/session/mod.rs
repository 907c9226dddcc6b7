//! Recognition-session lifecycle: state machine, engine capability, and the
//! coordinator that ties them together.

pub mod engine;
pub mod machine;
pub mod observer;
pub mod permission;
#[allow(clippy::module_inception)]
pub mod session;

pub use engine::{EngineEvent, EngineOptions, MockEngine, RecognitionEngine};
pub use machine::{transition, SessionAction, SessionEvent, SessionState};
pub use observer::{CollectorObserver, ObservedEvent, SessionObserver, TranscriptUpdate};
pub use permission::{MicrophonePermission, StaticPermission};
pub use session::{RecognitionSession, SessionConfig};
