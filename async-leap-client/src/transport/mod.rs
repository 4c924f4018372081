// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Connection establishment.
//!
//! The session reaches its processor through a [`Connector`], which yields
//! a ready [`LeapProtocol`] over an established stream. The stock
//! implementation is [`TlsConnector`]; tests and alternative transports
//! substitute their own.

mod tls;

use async_trait::async_trait;

use leap_core::LeapProtocol;
use leap_types::LeapError;

use crate::config::SessionConfig;

pub use tls::TlsConnector;

/// Establishes one connection attempt to the processor.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connect and wrap the stream in a protocol engine. Implementations
    /// apply their own connect deadline.
    async fn connect(&self, config: &SessionConfig) -> Result<LeapProtocol, LeapError>;
}
