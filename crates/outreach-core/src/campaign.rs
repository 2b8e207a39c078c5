//! Campaign composition and sending.
//!
//! The composer validates the draft, requires an explicit confirmation step
//! (sending is an irrevocable fan-out side effect), dispatches exactly one
//! request for the chosen targeting mode and interprets the aggregate
//! outcome. The backend iterates the recipients; there is no client-side
//! batching.

use outreach_client::{
    ApiClient, SendAllPayload, SendNewcomersPayload, SendOutcome, SendSelectedPayload,
};
use tracing::{debug, warn};

use crate::error::{Error, Result, ValidationError};
use crate::selection::SelectionSet;

/// Newcomer window applied when none (or a non-positive one) is given.
pub const DEFAULT_NEWCOMER_DAYS: u32 = 7;

/// Audience-selection strategy for one send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMode {
    /// Every current recipient.
    #[default]
    All,
    /// The manually selected recipients.
    Selected,
    /// Recipients reached within the newcomer window, resolved server-side.
    Newcomers,
}

/// The campaign being composed.
#[derive(Debug, Clone)]
pub struct CampaignDraft {
    /// Email subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Targeting mode for the next send.
    pub target_mode: TargetMode,
    /// Window length in days, used when targeting newcomers.
    pub newcomer_days: u32,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self {
            subject: String::new(),
            html: String::new(),
            target_mode: TargetMode::All,
            newcomer_days: DEFAULT_NEWCOMER_DAYS,
        }
    }
}

impl CampaignDraft {
    /// Sets the newcomer window, coercing non-positive values to the default.
    pub const fn set_newcomer_days(&mut self, days: u32) {
        self.newcomer_days = if days == 0 { DEFAULT_NEWCOMER_DAYS } else { days };
    }
}

/// Outcome of one send attempt, displayed until the next send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReport {
    /// Recipients the backend attempted to reach.
    pub total: u32,
    /// Emails handed off successfully.
    pub succeeded: u32,
    /// Emails that failed to send.
    pub failed: u32,
    /// Set when the send request itself failed before any fan-out.
    pub error: Option<String>,
}

impl SendReport {
    fn from_outcome(outcome: SendOutcome) -> Self {
        Self {
            total: outcome.total,
            succeeded: outcome.success,
            failed: outcome.failed,
            error: None,
        }
    }

    fn from_error(message: String) -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failed: 0,
            error: Some(message),
        }
    }

    /// Returns true when the send went through but some emails failed.
    ///
    /// This is a warning condition, not an error; the composer stays usable.
    #[must_use]
    pub const fn is_partial_failure(&self) -> bool {
        self.failed > 0 && self.error.is_none()
    }

    /// One-line human-readable summary, e.g. "38 succeeded, 2 failed".
    #[must_use]
    pub fn summary(&self) -> String {
        self.error.as_ref().map_or_else(
            || format!("{} succeeded, {} failed", self.succeeded, self.failed),
            Clone::clone,
        )
    }
}

/// The single request shape a confirmed send will issue.
#[derive(Debug, Clone)]
enum SendRequest {
    All(SendAllPayload),
    Selected(SendSelectedPayload),
    Newcomers(SendNewcomersPayload),
}

impl SendRequest {
    const fn mode(&self) -> TargetMode {
        match self {
            Self::All(_) => TargetMode::All,
            Self::Selected(_) => TargetMode::Selected,
            Self::Newcomers(_) => TargetMode::Newcomers,
        }
    }
}

/// A validated send awaiting user confirmation.
///
/// Only obtainable from [`Composer::request_send`], so a send can never be
/// dispatched without passing validation and showing the prompt.
#[derive(Debug, Clone)]
pub struct PendingSend {
    request: SendRequest,
    prompt: String,
}

impl PendingSend {
    /// Mode-specific confirmation text echoing the affected audience.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The targeting mode this send will use.
    #[must_use]
    pub const fn mode(&self) -> TargetMode {
        self.request.mode()
    }
}

/// Orchestrates campaign validation, confirmation and dispatch.
#[derive(Debug, Default)]
pub struct Composer {
    /// The campaign being edited.
    pub draft: CampaignDraft,
    sending: bool,
    last_report: Option<SendReport>,
}

impl Composer {
    /// Creates a composer with an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a send request is in flight.
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        self.sending
    }

    /// The report of the most recent send attempt, if any.
    #[must_use]
    pub const fn last_report(&self) -> Option<&SendReport> {
        self.last_report.as_ref()
    }

    /// Checks the client-side preconditions for the current draft.
    ///
    /// # Errors
    ///
    /// Returns the first failing precondition; no request is issued.
    pub fn validate(&self, selection: &SelectionSet) -> std::result::Result<(), ValidationError> {
        if self.draft.subject.trim().is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        if self.draft.html.trim().is_empty() {
            return Err(ValidationError::MissingBody);
        }
        if self.draft.target_mode == TargetMode::Selected && selection.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        Ok(())
    }

    /// Validates the draft and prepares a send for confirmation.
    ///
    /// The returned token snapshots the audience (selected ids, newcomer
    /// window) so the prompt and the eventual request always agree.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a precondition fails; nothing is
    /// sent.
    pub fn request_send(
        &self,
        selection: &SelectionSet,
    ) -> std::result::Result<PendingSend, ValidationError> {
        self.validate(selection)?;

        let subject = self.draft.subject.clone();
        let html = self.draft.html.clone();

        let (request, prompt) = match self.draft.target_mode {
            TargetMode::All => (
                SendRequest::All(SendAllPayload { subject, html }),
                "Are you sure you want to send this email to all reached people?".to_string(),
            ),
            TargetMode::Selected => {
                let user_ids = selection.to_vec();
                let prompt = format!(
                    "Are you sure you want to send this email to {} selected person(s)?",
                    user_ids.len()
                );
                (
                    SendRequest::Selected(SendSelectedPayload {
                        subject,
                        html,
                        user_ids,
                    }),
                    prompt,
                )
            }
            TargetMode::Newcomers => {
                // The field is freely writable, so coerce here as well as in
                // the setter; a zero window must never reach the wire.
                let days = if self.draft.newcomer_days == 0 {
                    DEFAULT_NEWCOMER_DAYS
                } else {
                    self.draft.newcomer_days
                };
                (
                    SendRequest::Newcomers(SendNewcomersPayload {
                        subject,
                        html,
                        days_since_registration: days,
                    }),
                    format!(
                        "Are you sure you want to send this email to people reached in the last {days} days?"
                    ),
                )
            }
        };

        Ok(PendingSend { request, prompt })
    }

    /// Dispatches a confirmed send.
    ///
    /// On success the composer applies the mode-specific reset: an "all"
    /// send clears subject and body (the selection is untouched); a
    /// "selected" send clears the selection but keeps subject and body so
    /// variations can be resent; a "newcomers" send resets nothing.
    ///
    /// # Errors
    ///
    /// Returns the transport or server error; the draft and selection are
    /// left exactly as they were so the send can be retried.
    pub async fn send_confirmed(
        &mut self,
        client: &ApiClient,
        pending: PendingSend,
        selection: &mut SelectionSet,
    ) -> Result<SendReport> {
        let mode = pending.mode();
        debug!(?mode, "dispatching campaign send");

        self.sending = true;
        let result = match &pending.request {
            SendRequest::All(payload) => client.send_all(payload).await,
            SendRequest::Selected(payload) => client.send_selected(payload).await,
            SendRequest::Newcomers(payload) => client.send_newcomers(payload).await,
        };
        self.sending = false;

        match result {
            Ok(outcome) => {
                let report = self.apply_outcome(mode, outcome, selection);
                Ok(report)
            }
            Err(err) => {
                self.last_report = Some(SendReport::from_error(err.to_string()));
                Err(Error::Api(err))
            }
        }
    }

    /// Interprets a successful outcome and applies the post-send reset.
    fn apply_outcome(
        &mut self,
        mode: TargetMode,
        outcome: SendOutcome,
        selection: &mut SelectionSet,
    ) -> SendReport {
        let report = SendReport::from_outcome(outcome);
        if report.is_partial_failure() {
            warn!(failed = report.failed, "some emails failed to send");
        }

        match mode {
            TargetMode::All => {
                self.draft.subject.clear();
                self.draft.html.clear();
            }
            TargetMode::Selected => selection.clear(),
            TargetMode::Newcomers => {}
        }

        self.last_report = Some(report.clone());
        report
    }
}
