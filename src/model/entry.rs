//! Chat transcript entries.

use crate::model::RequestId;
use chrono::{DateTime, Utc};

/// Who authored an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A request typed by the user. The latest one is the pinned row.
    User,
    /// A response from the assistant.
    Assistant,
}

impl Role {
    /// Parse the transcript's role string.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }

    /// Display label used in row headers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message in the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    id: RequestId,
    role: Role,
    text: String,
    timestamp: DateTime<Utc>,
}

impl ChatEntry {
    pub fn new(id: RequestId, role: Role, text: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            role,
            text,
            timestamp,
        }
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Number of text lines in the body. Empty text still occupies one line.
    pub fn text_line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }
}
