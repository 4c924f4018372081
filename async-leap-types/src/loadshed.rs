// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Load shedding status bodies.

use serde::{Deserialize, Serialize};

use crate::enums::LoadShedState;
use crate::href::HRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SystemLoadSheddingStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<LoadShedState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_load_shedding: Option<HRef>,
}

/// Body of `OneSystemLoadSheddingStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneSystemLoadSheddingStatusBody {
    pub system_load_shedding_status: SystemLoadSheddingStatus,
}
