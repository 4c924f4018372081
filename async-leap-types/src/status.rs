// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The header `StatusCode` field, a string of the form `"<code> <reason>"`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Parsed form of a header status such as `"200 OK"` or `"404 NotFound"`.
///
/// The code is absent when the wire string carries no numeric prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStatus {
    /// Numeric status code, HTTP-flavoured.
    pub code: Option<u16>,
    /// The reason phrase.
    pub message: String,
}

impl ResponseStatus {
    /// Build a status from a code and reason phrase.
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    /// Parse the wire form. Everything before the first space is the code;
    /// if there is no space, or the prefix is not an integer, the code is
    /// absent and the full string becomes the message.
    pub fn parse(data: &str) -> Self {
        if let Some(space) = data.find(' ') {
            if let Ok(code) = data[..space].parse() {
                return Self {
                    code: Some(code),
                    message: data[space + 1..].to_string(),
                };
            }
        }
        Self {
            code: None,
            message: data.to_string(),
        }
    }

    /// Check if the status code is in the range `[200, 300)`.
    pub fn is_successful(&self) -> bool {
        matches!(self.code, Some(code) if (200..300).contains(&code))
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} {}", code, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl Serialize for ResponseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResponseStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ResponseStatus::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_render_round_trip() {
        let status = ResponseStatus::parse("200 OK");
        assert_eq!(status.code, Some(200));
        assert_eq!(status.message, "OK");
        assert!(status.is_successful());
        assert_eq!(status.to_string(), "200 OK");
    }

    #[test]
    fn parse_multi_word_reason() {
        let status = ResponseStatus::parse("204 No Content");
        assert_eq!(status.code, Some(204));
        assert_eq!(status.message, "No Content");
        assert!(status.is_successful());
    }

    #[test]
    fn parse_without_code() {
        let status = ResponseStatus::parse("NoSpaceHere");
        assert_eq!(status.code, None);
        assert_eq!(status.message, "NoSpaceHere");
        assert!(!status.is_successful());

        let status = ResponseStatus::parse("NotANumber OK");
        assert_eq!(status.code, None);
        assert_eq!(status.message, "NotANumber OK");
    }

    #[test]
    fn error_codes_are_not_successful() {
        assert!(!ResponseStatus::new(404, "NotFound").is_successful());
        assert!(!ResponseStatus::new(199, "Early").is_successful());
        assert!(!ResponseStatus::new(300, "Late").is_successful());
        assert!(ResponseStatus::new(299, "EdgeOfFine").is_successful());
    }

    #[test]
    fn serde_uses_the_wire_string() {
        let status = ResponseStatus::new(200, "OK");
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"200 OK\"");

        let parsed: ResponseStatus = serde_json::from_str("\"404 NotFound\"").unwrap();
        assert_eq!(parsed, ResponseStatus::new(404, "NotFound"));
    }
}
