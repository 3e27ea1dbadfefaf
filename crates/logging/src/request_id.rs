//! # Request ID Tracking
//!
//! Request identifiers propagated through the `x-request-id` header.
//! Uses CUID2 for collision-resistant, URL-safe identifiers.

use std::{fmt, str::FromStr};

/// Header carrying the request id in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A request ID type using CUID2.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID.
    #[inline]
    pub fn new() -> Self { Self(cuid2::create_id()) }

    /// Reuse an id supplied by a caller if it looks like one we would issue,
    /// otherwise generate a fresh id.
    pub fn from_header_or_new(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Get the request ID as a string.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Consume and return the inner string.
    #[inline]
    pub fn into_string(self) -> String { self.0 }
}

impl Default for RequestId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for RequestId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid_len = (20 ..= 64).contains(&s.len());
        if valid_len && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            Ok(Self(s.to_string()))
        }
        else {
            Err("Invalid request ID format".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_uniqueness() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_request_id_from_str() {
        let raw = "k192v2g4w3zq8h6j5k1abc";
        let id: RequestId = raw.parse().unwrap();
        assert_eq!(id.as_str(), raw);
    }

    #[test]
    fn test_request_id_from_str_invalid() {
        assert!("short".parse::<RequestId>().is_err());
        assert!("invalid!@#invalid!@#invalid".parse::<RequestId>().is_err());
    }

    #[test]
    fn test_from_header_reuses_valid_id() {
        let raw = "upstream-request-0000000001";
        assert_eq!(RequestId::from_header_or_new(Some(raw)).as_str(), raw);
    }

    #[test]
    fn test_from_header_replaces_invalid_id() {
        let id = RequestId::from_header_or_new(Some("bad id"));
        assert_ne!(id.as_str(), "bad id");
        assert!(!id.as_str().is_empty());
    }

    #[test]
    fn test_request_id_display() {
        let id = RequestId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }
}
