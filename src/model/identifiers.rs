//! Identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time; the raw
//! constructor is never exported.

use std::fmt;

/// Logical id of a chat request, keying sticky preview clones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Smart constructor: validates a non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidRequestId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidRequestId::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRequestId {
    #[error("Request ID cannot be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_non_empty() {
        let id = RequestId::new("req-1").unwrap();
        assert_eq!(id.as_str(), "req-1");
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(RequestId::new(""), Err(InvalidRequestId::Empty));
    }

    #[test]
    fn display_shows_raw_id() {
        let id = RequestId::new("req-42").unwrap();
        assert_eq!(id.to_string(), "req-42");
    }

    #[test]
    fn hash_and_eq_by_value() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(RequestId::new("a").unwrap());
        set.insert(RequestId::new("b").unwrap());
        set.insert(RequestId::new("a").unwrap());
        assert_eq!(set.len(), 2);
    }
}
