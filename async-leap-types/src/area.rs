// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Area definition and status bodies.

use serde::{Deserialize, Serialize};

use crate::enums::OccupiedState;
use crate::href::{id_from_href, HRef};

/// One entry of an area status body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AreaStatus {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_scene: Option<HRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy_status: Option<OccupiedState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instantaneous_power: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instantaneous_max_power: Option<i32>,
}

impl AreaStatus {
    /// Area id named by the entry's href.
    pub fn id(&self) -> Option<u32> {
        id_from_href(&self.href)
    }
}

/// One entry of an area definition body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AreaDefinition {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_leaf: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<HRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_zones: Option<Vec<HRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_control_stations: Option<Vec<HRef>>,
}

impl AreaDefinition {
    /// Area id named by the entry's href.
    pub fn id(&self) -> Option<u32> {
        id_from_href(&self.href)
    }
}

/// Body of `OneAreaDefinition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneAreaDefinitionBody {
    pub area: AreaDefinition,
}

/// Body of `OneAreaStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneAreaStatusBody {
    pub area_status: AreaStatus,
}

/// Body of `MultipleAreaDefinition` and `MultipleAreaSummaryDefinition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipleAreaDefinitionBody {
    #[serde(default)]
    pub areas: Vec<AreaDefinition>,
}

/// Body of `MultipleAreaStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipleAreaStatusBody {
    #[serde(default)]
    pub area_statuses: Vec<AreaStatus>,
}
