// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Button status bodies.

use serde::{Deserialize, Serialize};

use crate::enums::{ButtonEventState, ButtonEventType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ButtonEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<ButtonEventType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ButtonStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_event: Option<ButtonEvent>,
}

/// Body of `OneButtonStatusEvent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneButtonStatusEventBody {
    pub button_status: ButtonStatus,
}

/// Body of a button command request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ButtonCommandBody {
    pub command: ButtonCommand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ButtonCommand {
    pub command_type: ButtonEventState,
}
