//! Port definition for the messaging-SDK attachment codec.

use async_trait::async_trait;

use crate::domain::entities::{Attachment, RemoteAttachment};
use crate::domain::errors::LoadError;

/// Port for fetching and decoding remote attachments.
///
/// Implementations wrap the messaging client handle and the content codec;
/// transport, decryption, and the binary format stay behind this seam. An
/// absent or disconnected client surfaces as `LoadError::ClientUnavailable`.
#[async_trait]
pub trait AttachmentCodecPort: Send + Sync {
    /// Fetches and decodes the payload a descriptor points at.
    async fn load(&self, descriptor: &RemoteAttachment) -> Result<Attachment, LoadError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::RwLock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    /// Mock codec with a programmable outcome and call counter.
    pub struct MockAttachmentCodec {
        response: RwLock<Result<Attachment, LoadError>>,
        calls: AtomicUsize,
        delay: Option<Duration>,
    }

    impl MockAttachmentCodec {
        /// Creates a codec that returns the given payload.
        pub fn succeeding(attachment: Attachment) -> Self {
            Self {
                response: RwLock::new(Ok(attachment)),
                calls: AtomicUsize::new(0),
                delay: None,
            }
        }

        /// Creates a codec that fails with the given error.
        pub fn failing(error: LoadError) -> Self {
            Self {
                response: RwLock::new(Err(error)),
                calls: AtomicUsize::new(0),
                delay: None,
            }
        }

        /// Adds an artificial delay before each response.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Replaces the programmed outcome.
        pub fn set_response(&self, response: Result<Attachment, LoadError>) {
            *self.response.write().unwrap() = response;
        }

        /// Returns how many loads reached the codec.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AttachmentCodecPort for MockAttachmentCodec {
        async fn load(&self, _descriptor: &RemoteAttachment) -> Result<Attachment, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.response.read().unwrap().clone()
        }
    }
}
