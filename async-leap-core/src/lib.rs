// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

#![warn(missing_docs)]

//! The LEAP core module holds the communication plumbing shared by anything
//! that speaks LEAP: the newline-delimited JSON wire codec and the protocol
//! engine that correlates tagged requests with responses and fans pushes
//! out to subscriptions.

pub mod comms;

pub use comms::codec::LeapCodec;
pub use comms::protocol::{FnCallback, LeapProtocol, MessageCallback};
