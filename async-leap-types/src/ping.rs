// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The `/server/status/ping` response body.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResponse {
    #[serde(rename = "LEAPVersion", skip_serializing_if = "Option::is_none")]
    pub leap_version: Option<f64>,
}

/// Body of `OnePingResponse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OnePingResponseBody {
    pub ping_response: PingResponse,
}
