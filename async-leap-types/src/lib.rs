// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Message model for the Lutron LEAP protocol.
//!
//! LEAP frames are single-line JSON objects with three members:
//! `CommuniqueType`, `Header` and an optional `Body`. The body is a tagged
//! union whose concrete shape is named by the header's `MessageBodyType`.
//! This crate holds the frame model, the body payload types, the protocol
//! enumerations and the error taxonomy shared by the wire codec and the
//! client session.

mod errors;
mod href;
mod message;
mod status;

pub mod area;
pub mod button;
pub mod command;
pub mod device;
pub mod emergency;
pub mod enums;
pub mod lighting;
pub mod loadshed;
pub mod login;
pub mod occupancy;
pub mod ping;
pub mod processor;
pub mod version;
pub mod zone;

pub use errors::LeapError;
pub use href::{id_from_href, HRef};
pub use message::{Directives, ExceptionDetail, Header, Message, MessageBody};
pub use status::ResponseStatus;

pub use enums::{CommandType, CommuniqueType, ContextType, MessageBodyType};
