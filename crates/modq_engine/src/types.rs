use std::fmt;

use modq_core::EntityId;

/// Logical slot for a cancelable request. At most one request per key is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestKey {
    List,
    Poll,
    Detail(EntityId),
    Stats,
    Moderator,
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKey::List => write!(f, "list"),
            RequestKey::Poll => write!(f, "poll"),
            RequestKey::Detail(id) => write!(f, "detail-{id}"),
            RequestKey::Stats => write!(f, "stats"),
            RequestKey::Moderator => write!(f, "moderator"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn cancelled(key: RequestKey) -> Self {
        Self::new(FailureKind::Cancelled, format!("request {key} cancelled"))
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == FailureKind::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Cancelled,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FailureKind, RequestKey, TransportError};

    #[test]
    fn request_keys_render_as_names() {
        assert_eq!(RequestKey::List.to_string(), "list");
        assert_eq!(RequestKey::Poll.to_string(), "poll");
        assert_eq!(RequestKey::Detail(42).to_string(), "detail-42");
        assert_eq!(RequestKey::Stats.to_string(), "stats");
    }

    #[test]
    fn error_message_leads_with_kind() {
        let err = TransportError::new(FailureKind::HttpStatus(503), "Service Unavailable");
        assert_eq!(err.to_string(), "http status 503: Service Unavailable");
    }
}
