// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Session configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use leap_types::LeapError;

/// Port LEAP processors listen on.
pub const LEAP_PORT: u16 = 8081;

/// Interval between keepalive pings.
pub const PING_INTERVAL: Duration = Duration::from_secs(60);

/// Deadline for establishing the TCP connection and the TLS handshake.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Deadline applied to keepalive and convenience requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause between reconnect attempts.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Everything needed to reach and authenticate against one processor.
///
/// LEAP authentication is mutual TLS: `keyfile` and `certfile` name the
/// client credential pair and must be given together. Processors present
/// server certificates that do not match their address, so hostname and
/// chain verification are off by default; set `verify_tls` together with a
/// `ca_chain` bundle to enforce them, or set `ca_chain` alone to pin the
/// chain while still skipping the hostname check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Host name or address of the processor.
    pub host: String,
    /// Port, 8081 unless the processor is behind a forwarder.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Login id for the `/login` exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password for the `/login` exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// PEM file holding the client private key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyfile: Option<PathBuf>,
    /// PEM file holding the client certificate chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certfile: Option<PathBuf>,
    /// PEM bundle the server certificate must chain to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_chain: Option<PathBuf>,
    /// Enforce full server certificate verification.
    #[serde(default)]
    pub verify_tls: bool,
}

fn default_port() -> u16 {
    LEAP_PORT
}

impl SessionConfig {
    /// A configuration with library defaults for everything but the host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: LEAP_PORT,
            username: None,
            password: None,
            keyfile: None,
            certfile: None,
            ca_chain: None,
            verify_tls: false,
        }
    }

    /// Reject configurations that cannot produce a working connection.
    /// Runs before any I/O.
    pub fn validate(&self) -> Result<(), LeapError> {
        if self.host.is_empty() {
            return Err(LeapError::Validation("host must not be empty".to_string()));
        }
        if self.keyfile.is_some() != self.certfile.is_some() {
            return Err(LeapError::Validation(
                "both keyfile and certfile are required for TLS client auth".to_string(),
            ));
        }
        if self.verify_tls && self.ca_chain.is_none() {
            return Err(LeapError::Validation(
                "verify_tls requires a ca_chain bundle to verify against".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::new("bridge.local");
        assert_eq!(config.port, LEAP_PORT);
        assert!(!config.verify_tls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_client_credentials_are_rejected() {
        let mut config = SessionConfig::new("bridge.local");
        config.keyfile = Some("leap.key".into());
        assert!(matches!(
            config.validate(),
            Err(LeapError::Validation(_))
        ));

        config.certfile = Some("leap.crt".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn verification_requires_a_ca_bundle() {
        let mut config = SessionConfig::new("bridge.local");
        config.verify_tls = true;
        assert!(matches!(config.validate(), Err(LeapError::Validation(_))));

        config.ca_chain = Some("ca.pem".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"host": "192.168.1.40"}"#).unwrap();
        assert_eq!(config.port, LEAP_PORT);
        assert_eq!(config.username, None);
        assert!(!config.verify_tls);
    }
}
