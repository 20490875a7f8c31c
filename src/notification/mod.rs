//! Notification outbox and delivery.
//!
//! Workflow services publish [`domain::OutboxMessage`]s instead of calling an
//! email function inline. A separate [`services::OutboxDispatcher`] drains
//! due messages, resolves recipients through the user directory, renders the
//! email and hands it to the mailer, retrying failed deliveries with
//! exponential back-off until the attempt budget is spent.
//!
//! In-app notification rows are written directly through the
//! [`ports::InAppNotifications`] port.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
