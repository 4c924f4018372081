// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The `/clientsetting` body: negotiated version and session permissions.

use serde::{Deserialize, Serialize};

use crate::enums::SessionRole;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Permissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_role: Option<SessionRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientSetting {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_major_version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_minor_version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

/// Body of `OneClientSettingDefinition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneClientSettingBody {
    pub client_setting: ClientSetting,
}
