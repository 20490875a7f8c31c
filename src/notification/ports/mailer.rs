//! Mail transport port.

use crate::notification::domain::EmailMessage;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Outbound email transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends a rendered message.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] when the provider rejects the message or
    /// cannot be reached.
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}

/// Errors returned by mail transports.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// The provider refused the message.
    #[error("message rejected by provider: {0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeliveryError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
