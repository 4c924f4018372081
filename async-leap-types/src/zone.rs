// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Zone definition and status bodies.

use serde::{Deserialize, Serialize};

use crate::enums::{Availability, CcoLevel, FanSpeed, ReceptacleState, SwitchedState, ZoneControlType};
use crate::href::{id_from_href, HRef};
use crate::lighting::{ColorTuningProperties, ColorTuningStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZoneCategory {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_light: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZonePhaseSettings {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZoneTuningSettings {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_end_trim: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_end_trim: Option<f64>,
}

/// Definition of a zone: how it is named, driven and wired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZoneDefinition {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_type: Option<ZoneControlType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ZoneCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<HRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_tuning_properties: Option<ColorTuningProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_settings: Option<ZonePhaseSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuning_settings: Option<ZoneTuningSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_area: Option<HRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_facade: Option<HRef>,
}

impl ZoneDefinition {
    /// Zone id named by the entry's href.
    pub fn id(&self) -> Option<u32> {
        id_from_href(&self.href)
    }
}

/// One entry of a zone status body. Expanded statuses additionally embed
/// the zone definition under `Zone`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZoneStatus {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switched_level: Option<SwitchedState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tilt: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrancy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_tuning_status: Option<ColorTuningStatus>,
    #[serde(rename = "CCOLevel", skip_serializing_if = "Option::is_none")]
    pub cco_level: Option<CcoLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receptacle_level: Option<ReceptacleState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_speed: Option<FanSpeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<ZoneDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_accuracy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

impl ZoneStatus {
    /// Zone id named by the entry's href.
    pub fn id(&self) -> Option<u32> {
        id_from_href(&self.href)
    }
}

/// Body of `OneZoneDefinition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneZoneDefinitionBody {
    pub zone: ZoneDefinition,
}

/// Body of `OneZoneStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneZoneStatusBody {
    pub zone_status: ZoneStatus,
}

/// Body of `MultipleZoneDefinition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipleZoneDefinitionBody {
    #[serde(default)]
    pub zones: Vec<ZoneDefinition>,
}

/// Body of `MultipleZoneStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipleZoneStatusBody {
    #[serde(default)]
    pub zone_statuses: Vec<ZoneStatus>,
}

/// Body of `MultipleZoneExpandedStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipleZoneExpandedStatusBody {
    #[serde(default)]
    pub zone_expanded_statuses: Vec<ZoneStatus>,
}

/// Body of `OneZoneTypeGroupStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneZoneTypeGroupStatusBody {
    pub zone_type_group_status: ZoneStatus,
}

/// Body of `MultipleZoneTypeGroupStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipleZoneTypeGroupStatusBody {
    #[serde(default)]
    pub zone_type_group_statuses: Vec<ZoneStatus>,
}
