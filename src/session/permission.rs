//! The microphone-permission capability.

use async_trait::async_trait;

/// Recording-permission source consumed by [`crate::RecognitionSession`].
#[async_trait]
pub trait MicrophonePermission: Send + Sync {
    /// Request microphone access. Returns whether it was granted.
    async fn request_access(&self) -> bool;
}

/// Fixed-response permission source, for tests and headless use.
#[derive(Debug, Clone, Copy)]
pub struct StaticPermission {
    granted: bool,
}

impl StaticPermission {
    pub fn granted() -> Self {
        Self { granted: true }
    }

    pub fn denied() -> Self {
        Self { granted: false }
    }
}

#[async_trait]
impl MicrophonePermission for StaticPermission {
    async fn request_access(&self) -> bool {
        self.granted
    }
}
