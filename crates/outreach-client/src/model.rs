//! Wire models for the outreach backend.
//!
//! Field names follow the backend's JSON conventions (camelCase, Mongo-style
//! `_id` identifiers), so these types deserialize responses as-is.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A person the organization has reached, eligible to receive campaigns.
///
/// Owned by the backend's user directory; immutable from the composer's
/// perspective.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number, if provided.
    #[serde(default)]
    pub phone: Option<String>,
    /// Group label, if the person picked one.
    #[serde(default)]
    pub group_name: Option<String>,
    /// Free-form message left when submitting the contact form.
    #[serde(default)]
    pub message: Option<String>,
    /// When the person was first reached.
    pub created_at: DateTime<Utc>,
    /// Whether a campaign email has already been sent to this person.
    #[serde(default)]
    pub email_sent: bool,
}

/// A reusable subject/body pair stored on the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Template name shown in the library.
    pub name: String,
    /// Email subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating or updating a template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplatePayload {
    /// Template name (required).
    pub name: String,
    /// Email subject line (required).
    pub subject: String,
    /// HTML body (required).
    pub html: String,
    /// Optional description.
    pub description: String,
}

impl TemplatePayload {
    /// Returns true when every required field is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.subject.trim().is_empty()
            && !self.html.trim().is_empty()
    }
}

/// Aggregate result of one send call, as reported by the backend.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SendOutcome {
    /// Number of recipients the backend attempted to reach.
    #[serde(default)]
    pub total: u32,
    /// Number of emails delivered to the mail relay.
    #[serde(default)]
    pub success: u32,
    /// Number of emails that failed to send.
    #[serde(default)]
    pub failed: u32,
}

/// Named relative date filter for the recipient directory.
///
/// Mutually exclusive with explicit from/to dates; the exclusion is enforced
/// by the filter state in `outreach-core`, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeFrame {
    /// Reached today.
    #[serde(rename = "today")]
    Today,
    /// Reached this week.
    #[serde(rename = "thisWeek")]
    ThisWeek,
    /// Reached this month.
    #[serde(rename = "thisMonth")]
    ThisMonth,
    /// Reached this year.
    #[serde(rename = "thisYear")]
    ThisYear,
}

impl TimeFrame {
    /// Wire value sent as the `timeFrame` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "thisWeek",
            Self::ThisMonth => "thisMonth",
            Self::ThisYear => "thisYear",
        }
    }

    /// Parses a wire value, returning `None` for anything unknown.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "today" => Some(Self::Today),
            "thisWeek" => Some(Self::ThisWeek),
            "thisMonth" => Some(Self::ThisMonth),
            "thisYear" => Some(Self::ThisYear),
            _ => None,
        }
    }
}

/// Query parameters for the recipient directory endpoint.
///
/// Only populated fields are serialized, matching the original client which
/// omitted empty filters entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientQuery {
    /// Free-text search over name, email and phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Lower bound on the acquisition date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    /// Upper bound on the acquisition date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    /// Named relative date filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<TimeFrame>,
}

/// Body of `POST /email/send-all`.
#[derive(Debug, Clone, Serialize)]
pub struct SendAllPayload {
    /// Email subject.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Body of `POST /email/send-selected`.
#[derive(Debug, Clone, Serialize)]
pub struct SendSelectedPayload {
    /// Email subject.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Identifiers of the manually selected recipients.
    #[serde(rename = "userIds")]
    pub user_ids: Vec<String>,
}

/// Body of `POST /email/send-newcomers`.
#[derive(Debug, Clone, Serialize)]
pub struct SendNewcomersPayload {
    /// Email subject.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Window length in days; the backend resolves the audience.
    #[serde(rename = "daysSinceRegistration")]
    pub days_since_registration: u32,
}
