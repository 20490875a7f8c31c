//! Sends and checks one-time codes.

use crate::verification::{
    domain::{PhoneNumber, VerificationCode, VerificationEntry},
    ports::{SmsError, SmsGateway, VerificationCodeStore, VerificationStoreError},
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Timing and attempt limits for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationSettings {
    /// How long a code is accepted.
    pub code_ttl: Duration,
    /// Minimum time between two codes for the same number.
    pub resend_cooldown: Duration,
    /// Wrong guesses allowed before the code is discarded.
    pub max_attempts: u32,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            code_ttl: Duration::minutes(10),
            resend_cooldown: Duration::seconds(60),
            max_attempts: 5,
        }
    }
}

/// Result of a send request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// A new code was sent.
    Sent {
        /// When the code stops being accepted.
        expires_at: DateTime<Utc>,
    },
    /// A code was sent too recently; nothing was sent.
    Throttled {
        /// Time left until a new code may be requested.
        retry_after: Duration,
    },
}

/// Errors returned by [`VerificationService`].
#[derive(Debug, Error)]
pub enum VerificationError {
    /// No code is outstanding, or it has expired.
    #[error("Verification code has expired. Please request a new code.")]
    CodeExpired,

    /// The code does not match.
    #[error("Incorrect verification code. Please try again.")]
    IncorrectCode {
        /// Guesses left before the code is discarded.
        remaining_attempts: u32,
    },

    /// Too many wrong guesses; the code was discarded.
    #[error("Too many incorrect attempts. Please request a new code.")]
    TooManyAttempts,

    /// The code store failed.
    #[error(transparent)]
    Store(#[from] VerificationStoreError),

    /// The SMS could not be sent.
    #[error(transparent)]
    Sms(#[from] SmsError),
}

/// Phone verification service.
#[derive(Clone)]
pub struct VerificationService<S, G, C>
where
    S: VerificationCodeStore,
    G: SmsGateway,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    gateway: Arc<G>,
    clock: Arc<C>,
    settings: VerificationSettings,
}

impl<S, G, C> VerificationService<S, G, C>
where
    S: VerificationCodeStore,
    G: SmsGateway,
    C: Clock + Send + Sync,
{
    /// Creates a service with default settings.
    #[must_use]
    pub fn new(store: Arc<S>, gateway: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            store,
            gateway,
            clock,
            settings: VerificationSettings::default(),
        }
    }

    /// Replaces the settings.
    #[must_use]
    pub const fn with_settings(mut self, settings: VerificationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sends a new code to `phone` unless one was sent within the cooldown.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::Store`] or [`VerificationError::Sms`] when
    /// the store or gateway fails. A failed SMS leaves no code behind.
    pub async fn send(&self, phone: &PhoneNumber) -> Result<SendOutcome, VerificationError> {
        let now = self.clock.utc();
        let existing = self.store.get(phone, now).await?;
        let cooldown_left = existing
            .map(|entry| entry.resend_available_at() - now)
            .filter(|remaining| *remaining > Duration::zero());
        if let Some(retry_after) = cooldown_left {
            info!(
                phone = %phone,
                retry_after_seconds = retry_after.num_seconds(),
                "verification code resend throttled"
            );
            return Ok(SendOutcome::Throttled { retry_after });
        }

        let code = VerificationCode::generate();
        let expires_at = offset(now, self.settings.code_ttl);
        let entry = VerificationEntry::new(
            phone.clone(),
            code.digest_for(phone),
            expires_at,
            offset(now, self.settings.resend_cooldown),
        );
        self.store.put(&entry).await?;

        let body = format!(
            "Your MPCN verification code is {}. It expires in {} minutes.",
            code.as_str(),
            self.settings.code_ttl.num_minutes()
        );
        if let Err(err) = self.gateway.send(phone, &body).await {
            warn!(phone = %phone, error = %err, "verification sms failed");
            self.store.remove(phone).await?;
            return Err(err.into());
        }
        info!(phone = %phone, "verification code sent");
        Ok(SendOutcome::Sent { expires_at })
    }

    /// Checks `code` against the outstanding code for `phone`.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::CodeExpired`] when no code is outstanding,
    /// [`VerificationError::IncorrectCode`] for a wrong guess, and
    /// [`VerificationError::TooManyAttempts`] once the guess budget is spent.
    pub async fn verify(&self, phone: &PhoneNumber, code: &str) -> Result<(), VerificationError> {
        let now = self.clock.utc();
        let entry = self
            .store
            .get(phone, now)
            .await?
            .ok_or(VerificationError::CodeExpired)?;

        if entry.matches(code) {
            self.store.remove(phone).await?;
            info!(phone = %phone, "phone number verified");
            return Ok(());
        }

        let failures = self
            .store
            .record_failure(phone)
            .await?
            .ok_or(VerificationError::CodeExpired)?;
        if failures >= self.settings.max_attempts {
            self.store.remove(phone).await?;
            warn!(phone = %phone, failures, "verification code discarded");
            return Err(VerificationError::TooManyAttempts);
        }
        Err(VerificationError::IncorrectCode {
            remaining_attempts: self.settings.max_attempts - failures,
        })
    }
}

/// Adds `delay` to `now`, saturating at the latest representable instant.
fn offset(now: DateTime<Utc>, delay: Duration) -> DateTime<Utc> {
    now.checked_add_signed(delay)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
