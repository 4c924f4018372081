// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Client for Lutron LEAP processors.
//!
//! A [`Session`] owns a long-lived, mutually-authenticated TLS connection
//! to a processor. It logs in, subscribes to zone, area and occupancy
//! status, enumerates devices, and from then on keeps an in-memory catalog
//! of [`model::Area`], [`model::Zone`] and [`model::Device`] entities
//! consistent with the processor as pushes arrive. The connection is
//! re-established automatically after any failure; the catalog survives
//! reconnects.
//!
//! ```no_run
//! use leap_client::{LeapError, Session, SessionConfig};
//!
//! # async fn run() -> Result<(), LeapError> {
//! let mut config = SessionConfig::new("192.168.1.40");
//! config.keyfile = Some("leap.key".into());
//! config.certfile = Some("leap.crt".into());
//! let (session, event_loop) = Session::new(config)?;
//! event_loop.spawn();
//!
//! session.wait_for_ready().await;
//! for zone in session.zones() {
//!     println!("{:?} {:?}", zone.name, zone.level);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
pub mod model;
pub mod requests;
pub mod session;
pub mod transport;

pub use config::{
    SessionConfig, CONNECT_TIMEOUT, LEAP_PORT, PING_INTERVAL, RECONNECT_DELAY, REQUEST_TIMEOUT,
};
pub use session::{Session, SessionEventLoop, SessionState};
pub use transport::{Connector, TlsConnector};

pub use leap_types::LeapError;
