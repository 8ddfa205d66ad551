//! Request (ticket) payloads for ServiceDesk Plus API.
//!
//! Responses are passed through to the agent untouched, so only the
//! outbound shapes are modelled here.

use serde::Serialize;

use super::NameRef;

/// Status name applied by [`RequestUpdate::closure`].
pub const CLOSED_STATUS: &str = "Closed";

/// Prefix put in front of closure comments when closing a ticket.
pub const CLOSURE_COMMENTS_PREFIX: &str = "Closure Comments: ";

/// Fields for a new request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRequest {
    /// Ticket subject.
    pub subject: String,

    /// Ticket description.
    pub description: String,

    /// Requester, matched by display name.
    pub requester: NameRef,
}

impl NewRequest {
    /// Creates a new request payload.
    pub fn new(
        subject: impl Into<String>,
        description: impl Into<String>,
        requester_name: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            description: description.into(),
            requester: NameRef::new(requester_name),
        }
    }
}

/// Partial update of an existing request.
///
/// Absent fields are omitted from the payload entirely, never sent as
/// `null`. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestUpdate {
    /// New subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// New description (replaces the existing one).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New status, by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NameRef>,

    /// New priority, by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NameRef>,
}

fn present(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

impl RequestUpdate {
    /// Creates an update with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an update from optional tool arguments, dropping empty ones.
    pub fn from_fields(
        subject: Option<String>,
        description: Option<String>,
        status: Option<String>,
        priority: Option<String>,
    ) -> Self {
        Self {
            subject: subject.and_then(present),
            description: description.and_then(present),
            status: status.and_then(present).map(NameRef::new),
            priority: priority.and_then(present).map(NameRef::new),
        }
    }

    /// The update used to close a ticket.
    ///
    /// Sets the status to `Closed` and overwrites the description with the
    /// closure comments.
    pub fn closure(comments: &str) -> Self {
        Self::new()
            .with_status(CLOSED_STATUS)
            .with_description(format!("{}{}", CLOSURE_COMMENTS_PREFIX, comments))
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = present(description.into());
        self
    }

    /// Sets the status name.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = present(status.into()).map(NameRef::new);
        self
    }

    /// Sets the priority name.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = present(priority.into()).map(NameRef::new);
        self
    }

    /// Returns true if no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}
