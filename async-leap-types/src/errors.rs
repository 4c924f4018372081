// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! LEAP client errors.

use thiserror::Error;

use crate::message::Message;
use crate::status::ResponseStatus;

/// Errors surfaced to callers of the session and protocol engine.
///
/// Only peer disconnects and explicit response failures propagate; parse
/// and integrity faults on inbound frames are logged and absorbed so a
/// single malformed push cannot kill a session.
#[derive(Error, Debug)]
pub enum LeapError {
    /// The underlying stream closed while a response was outstanding.
    #[error("session disconnected")]
    SessionDisconnected,

    /// The peer answered with a non-2xx status code. Carries the full
    /// response so the caller can inspect the code and body.
    #[error("request failed: {}", status_text(.0))]
    Response(Box<Message>),

    /// The caller misused the API; rejected before any I/O.
    #[error("{0}")]
    Validation(String),

    /// A connect or request deadline elapsed.
    #[error("timed out")]
    Timeout,

    /// Transport-level I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The TLS configuration could not be built.
    #[error("tls configuration error: {0}")]
    TlsConfig(String),
}

impl LeapError {
    /// Wrap an error response.
    pub fn response(message: Message) -> Self {
        LeapError::Response(Box::new(message))
    }

    /// The status code returned by the peer, for response errors.
    pub fn status(&self) -> Option<&ResponseStatus> {
        match self {
            LeapError::Response(message) => message.header.status_code.as_ref(),
            _ => None,
        }
    }
}

fn status_text(message: &Message) -> String {
    message
        .header
        .status_code
        .as_ref()
        .map(|status| status.to_string())
        .unwrap_or_else(|| "no status code".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::CommuniqueType;
    use crate::message::Header;

    #[test]
    fn response_error_exposes_the_status() {
        let mut header = Header::new("/zone/842/commandprocessor");
        header.status_code = Some(ResponseStatus::new(404, "NotFound"));
        let error = LeapError::response(Message::new(CommuniqueType::CreateResponse, header));

        assert_eq!(error.status().unwrap().code, Some(404));
        assert_eq!(error.to_string(), "request failed: 404 NotFound");
    }
}
