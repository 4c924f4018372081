// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The LEAP wire codec.
//!
//! Each frame is one UTF-8 JSON object terminated by `\r\n`. On egress any
//! null field, and any nested object left empty after pruning, is omitted.
//! On ingress a frame that fails to parse is logged and skipped rather than
//! failing the stream; an empty line signals disconnect.

use std::io;

use bytes::{BufMut, BytesMut};
use log::error;
use serde_json::Value;
use tokio_util::codec::{Decoder, Encoder};

use leap_types::Message;

/// Upper bound on a single frame. Device enumerations on large systems run
/// to hundreds of kilobytes; anything beyond this is not LEAP.
const MAX_FRAME_LENGTH: usize = 4 * 1024 * 1024;

/// Codec turning a byte stream into [`Message`] frames and back.
#[derive(Debug, Default)]
pub struct LeapCodec {
    // Offset into the buffer already scanned for a newline.
    next_index: usize,
}

impl LeapCodec {
    /// Create a codec.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for LeapCodec {
    type Item = Message;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Message>, io::Error> {
        loop {
            let Some(offset) = buf[self.next_index..].iter().position(|b| *b == b'\n') else {
                if buf.len() > MAX_FRAME_LENGTH {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "frame exceeds maximum length",
                    ));
                }
                self.next_index = buf.len();
                return Ok(None);
            };

            let line = buf.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            let line = trim_line(&line);
            if line.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "peer sent an empty frame",
                ));
            }

            match serde_json::from_slice::<Message>(line) {
                Ok(message) => return Ok(Some(message)),
                Err(err) => {
                    // A bad frame must not kill the session.
                    error!("discarding undecodable frame: {err}");
                }
            }
        }
    }
}

impl Encoder<Message> for LeapCodec {
    type Error = io::Error;

    fn encode(&mut self, message: Message, dst: &mut BytesMut) -> Result<(), io::Error> {
        let value = serde_json::to_value(&message)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        let value = strip_empty(value).unwrap_or(Value::Object(Default::default()));
        let encoded = serde_json::to_vec(&value)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        dst.reserve(encoded.len() + 2);
        dst.put_slice(&encoded);
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

fn trim_line(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Recursively drop nulls and objects that prune down to nothing. Returns
/// `None` when the value itself vanishes.
pub fn strip_empty(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let pruned: serde_json::Map<String, Value> = map
                .into_iter()
                .filter_map(|(key, value)| strip_empty(value).map(|value| (key, value)))
                .collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Object(pruned))
            }
        }
        Value::Array(items) => Some(Value::Array(
            items.into_iter().filter_map(strip_empty).collect(),
        )),
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leap_types::{CommuniqueType, Header, Message};
    use serde_json::json;

    fn decode_all(codec: &mut LeapCodec, buf: &mut BytesMut) -> Vec<Message> {
        let mut out = Vec::new();
        while let Ok(Some(message)) = codec.decode(buf) {
            out.push(message);
        }
        out
    }

    #[test]
    fn encode_terminates_with_crlf() {
        let mut codec = LeapCodec::new();
        let mut buf = BytesMut::new();
        let message = Message::new(
            CommuniqueType::ReadRequest,
            Header::new("/server/status/ping").with_tag("T"),
        );
        codec.encode(message, &mut buf).unwrap();

        let text = std::str::from_utf8(&buf).unwrap();
        assert!(text.ends_with("\r\n"));
        assert_eq!(text.matches('\n').count(), 1);

        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(
            value,
            json!({
                "CommuniqueType": "ReadRequest",
                "Header": {"Url": "/server/status/ping", "ClientTag": "T"},
            })
        );
    }

    #[test]
    fn decode_round_trips_an_encoded_frame() {
        let mut codec = LeapCodec::new();
        let mut buf = BytesMut::new();
        let message = Message::new(
            CommuniqueType::SubscribeRequest,
            Header::new("/zone/status")
                .with_tag("abc")
                .with_directives(leap_types::Directives::suppress_body()),
        );
        codec.encode(message.clone(), &mut buf).unwrap();

        let decoded = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(decoded, message);
        assert!(buf.is_empty());
    }

    #[test]
    fn decode_handles_partial_and_multiple_frames() {
        let mut codec = LeapCodec::new();
        let mut buf = BytesMut::new();

        buf.extend_from_slice(b"{\"CommuniqueType\":\"ReadResponse\",\"Head");
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"er\":{\"Url\":\"/a\"}}\r\n{\"CommuniqueType\":\"ReadResponse\",\"Header\":{\"Url\":\"/b\"}}\r\n");
        let messages = decode_all(&mut codec, &mut buf);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].header.url, "/a");
        assert_eq!(messages[1].header.url, "/b");
    }

    #[test]
    fn malformed_line_is_skipped() {
        let mut codec = LeapCodec::new();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(b"this is not json\r\n{\"CommuniqueType\":\"ReadResponse\",\"Header\":{\"Url\":\"/ok\"}}\r\n");

        let message = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(message.header.url, "/ok");
    }

    #[test]
    fn empty_line_signals_disconnect() {
        let mut codec = LeapCodec::new();
        let mut buf = BytesMut::from(&b"\r\n"[..]);
        let err = codec.decode(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn strip_empty_prunes_recursively() {
        let pruned = strip_empty(json!({
            "Header": {
                "Url": "/login",
                "ClientTag": null,
                "Directives": {},
                "Nested": {"Inner": {}, "AlsoNull": null},
            },
            "Keep": [1, null, {"Empty": {}}],
        }))
        .unwrap();

        assert_eq!(
            pruned,
            json!({
                "Header": {"Url": "/login"},
                "Keep": [1],
            })
        );
    }
}
