//! Email templates for notification payloads.

use crate::notification::domain::{
    NotificationPayload, ReviewNotification, SlaAlert, SlaAlertKind,
};
use minijinja::Environment;
use serde_json::{Map, Value};
use thiserror::Error;

const REVIEW_SUBJECT: &str =
    r#"Your {{ item_label }} "{{ item_title }}" was {{ action }}{% if is_override %} (override){% endif %}"#;

const REVIEW_BODY: &str = r#"Hello,

Your {{ item_label }} "{{ item_title }}" on {{ platform }} for {{ work_date }} has been {{ action }}{% if is_override %} by an administrator, overriding the team lead decision{% endif %}.
{% if reviewer_name %}
Reviewed by: {{ reviewer_name }}
{% endif %}{% if reason %}
Reason: {{ reason }}
{% endif %}"#;

const SLA_SUBJECT: &str =
    r#"{% if breach %}SLA breached{% else %}SLA approaching{% endif %}: {{ title }}"#;

const SLA_BODY: &str = r#"Resolution request "{{ title }}" {% if breach %}missed{% else %}is approaching{% endif %} its SLA due time of {{ sla_due }}.

Request ID: {{ request_id }}"#;

/// Subject and body produced for a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Error returned when a template fails to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {template} template: {reason}")]
pub struct RenderError {
    /// Template that failed.
    pub template: &'static str,
    /// Renderer message.
    pub reason: String,
}

/// Renders notification payloads into email content.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailRenderer;

impl EmailRenderer {
    /// Creates a renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders `payload` into a subject and body.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when a template cannot be rendered.
    pub fn render(&self, payload: &NotificationPayload) -> Result<RenderedEmail, RenderError> {
        let (subject, body) = match payload {
            NotificationPayload::ReviewDecision(notice) => {
                let context = review_context(notice);
                (
                    render_template("review subject", REVIEW_SUBJECT, &context)?,
                    render_template("review body", REVIEW_BODY, &context)?,
                )
            }
            NotificationPayload::SlaAlert(alert) => {
                let context = sla_context(alert);
                (
                    render_template("sla subject", SLA_SUBJECT, &context)?,
                    render_template("sla body", SLA_BODY, &context)?,
                )
            }
        };
        Ok(RenderedEmail {
            subject: subject.trim().to_owned(),
            body,
        })
    }
}

fn render_template(
    name: &'static str,
    template: &str,
    context: &Map<String, Value>,
) -> Result<String, RenderError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| RenderError {
            template: name,
            reason: error.to_string(),
        })
}

fn review_context(notice: &ReviewNotification) -> Map<String, Value> {
    let item_label = if notice.item_type == "report" {
        "work report"
    } else {
        "task"
    };
    let mut context = Map::new();
    context.insert("item_label".to_owned(), Value::from(item_label));
    context.insert("item_title".to_owned(), Value::from(notice.item_title.clone()));
    context.insert("action".to_owned(), Value::from(notice.action.clone()));
    context.insert("platform".to_owned(), Value::from(notice.platform.clone()));
    context.insert(
        "work_date".to_owned(),
        Value::from(notice.work_date.format("%Y-%m-%d").to_string()),
    );
    context.insert("is_override".to_owned(), Value::from(notice.is_override));
    if let Some(reason) = &notice.reason {
        context.insert("reason".to_owned(), Value::from(reason.clone()));
    }
    if let Some(reviewer_name) = &notice.reviewer_name {
        context.insert("reviewer_name".to_owned(), Value::from(reviewer_name.clone()));
    }
    context
}

fn sla_context(alert: &SlaAlert) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert("title".to_owned(), Value::from(alert.title.clone()));
    context.insert(
        "sla_due".to_owned(),
        Value::from(alert.sla_due.format("%Y-%m-%d %H:%M UTC").to_string()),
    );
    context.insert(
        "breach".to_owned(),
        Value::from(alert.kind == SlaAlertKind::Breach),
    );
    context.insert(
        "request_id".to_owned(),
        Value::from(alert.request_id.to_string()),
    );
    context
}
