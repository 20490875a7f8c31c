//! SMS provider port.

use crate::verification::domain::PhoneNumber;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Outbound SMS transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Sends `body` to `phone`.
    ///
    /// # Errors
    ///
    /// Returns [`SmsError`] when the provider rejects or cannot accept the
    /// message.
    async fn send(&self, phone: &PhoneNumber, body: &str) -> Result<(), SmsError>;
}

/// Errors returned by SMS gateways.
#[derive(Debug, Clone, Error)]
pub enum SmsError {
    /// The provider refused the message.
    #[error("sms rejected by provider: {0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("sms transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl SmsError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
