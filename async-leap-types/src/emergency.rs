// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Emergency status bodies.

use serde::{Deserialize, Serialize};

use crate::enums::EmergencyState;
use crate::href::HRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmergencyStatus {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency: Option<HRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_state: Option<EmergencyState>,
}

/// Body of `OneEmergencyStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneEmergencyStatusBody {
    pub emergency_status: EmergencyStatus,
}

/// Body of `MultipleEmergencyStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipleEmergencyStatusBody {
    #[serde(default)]
    pub emergency_statuses: Vec<EmergencyStatus>,
}
