// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Command bodies sent to `/zone/<id>/commandprocessor` and
//! `/device/<id>/commandprocessor`, and their parameter families.

use serde::{Deserialize, Serialize};

use crate::enums::{CcoLevel, CommandType, FanSpeed, ReceptacleState, SwitchedState};
use crate::href::HRef;
use crate::lighting::{ColorTuningStatus, VibrancyStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SwitchedLevelParameters {
    pub switched_level: SwitchedState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DimmedLevelParameters {
    pub level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShadeLevelParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShadeWithTiltLevelParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tilt: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpectrumTuningLevelParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrancy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_tuning_status: Option<ColorTuningStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcoLevelParameters {
    #[serde(rename = "CCOLevel")]
    pub cco_level: CcoLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceptacleLevelParameters {
    pub receptacle_level: ReceptacleState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FanSpeedParameters {
    pub fan_speed: FanSpeed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupLightingLevelParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrancy_status: Option<VibrancyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_tuning_status: Option<ColorTuningStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GoToSceneParameters {
    pub current_scene: HRef,
}

/// A command with at most one parameter family populated, matching the
/// command type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Command {
    pub command_type: CommandType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switched_level_parameters: Option<SwitchedLevelParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimmed_level_parameters: Option<DimmedLevelParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade_level_parameters: Option<ShadeLevelParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade_with_tilt_level_parameters: Option<ShadeWithTiltLevelParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectrum_tuning_level_parameters: Option<SpectrumTuningLevelParameters>,
    #[serde(rename = "CCOLevelParameters", skip_serializing_if = "Option::is_none")]
    pub cco_level_parameters: Option<CcoLevelParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receptacle_level_parameters: Option<ReceptacleLevelParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_speed_parameters: Option<FanSpeedParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_lighting_level_parameters: Option<GroupLightingLevelParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_to_scene_parameters: Option<GoToSceneParameters>,
}

impl Command {
    /// A bare command with no parameters, e.g. `Raise` or `Stop`.
    pub fn new(command_type: CommandType) -> Self {
        Self {
            command_type,
            switched_level_parameters: None,
            dimmed_level_parameters: None,
            shade_level_parameters: None,
            shade_with_tilt_level_parameters: None,
            spectrum_tuning_level_parameters: None,
            cco_level_parameters: None,
            receptacle_level_parameters: None,
            fan_speed_parameters: None,
            group_lighting_level_parameters: None,
            go_to_scene_parameters: None,
        }
    }
}

/// Body of a command request, `{"Command": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandBody {
    pub command: Command,
}

impl From<Command> for CommandBody {
    fn from(command: Command) -> Self {
        Self { command }
    }
}
