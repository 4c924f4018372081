// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Color tuning payloads shared by zone status and command parameters.

use serde::{Deserialize, Serialize};

use crate::enums::EnableState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HsvTuningLevel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VibrancyStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrancy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_vibrancy: Option<EnableState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WhiteTuningLevel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kelvin: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WhiteTuningLevelRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyTuningLevel {
    #[serde(rename = "X", skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(rename = "Y", skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Tuning capabilities advertised in a zone definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColorTuningProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_tuning_level_range: Option<WhiteTuningLevelRange>,
}

/// Current tuning state in a zone status. Exactly one of the levels is
/// populated depending on the tuning mode in effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTuningStatus {
    #[serde(rename = "HSVTuningLevel", skip_serializing_if = "Option::is_none")]
    pub hsv_tuning_level: Option<HsvTuningLevel>,
    #[serde(rename = "WhiteTuningLevel", skip_serializing_if = "Option::is_none")]
    pub white_tuning_level: Option<WhiteTuningLevel>,
    #[serde(rename = "XYTuningLevel", skip_serializing_if = "Option::is_none")]
    pub xy_tuning_level: Option<XyTuningLevel>,
}
