// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Occupancy sensor status bodies.

use serde::{Deserialize, Serialize};

use crate::enums::OccupiedState;
use crate::href::{id_from_href, HRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OccupancySensorStatus {
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy_status: Option<OccupiedState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy_sensor: Option<HRef>,
}

impl OccupancySensorStatus {
    /// Sensor id named by the entry's href.
    pub fn id(&self) -> Option<u32> {
        id_from_href(&self.href)
    }
}

/// Body of `OneOccupancySensorStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneOccupancySensorStatusBody {
    pub occupancy_sensor_status: OccupancySensorStatus,
}

/// Body of `MultipleOccupancySensorStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultipleOccupancySensorStatusBody {
    #[serde(default)]
    pub occupancy_sensor_statuses: Vec<OccupancySensorStatus>,
}
