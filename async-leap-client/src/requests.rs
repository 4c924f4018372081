// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Pure constructors for the request frames the library sends.
//!
//! Commands never mutate local state; the effect of a zone command arrives
//! through the subscribed zone status stream.

use leap_types::command::{
    CcoLevelParameters, Command, CommandBody, DimmedLevelParameters, FanSpeedParameters,
    GoToSceneParameters, GroupLightingLevelParameters, ReceptacleLevelParameters,
    ShadeLevelParameters, ShadeWithTiltLevelParameters, SpectrumTuningLevelParameters,
    SwitchedLevelParameters,
};
use leap_types::enums::{CcoLevel, FanSpeed, ReceptacleState, SwitchedState};
use leap_types::login::{Login, LoginBody};
use leap_types::{
    CommandType, CommuniqueType, ContextType, Directives, HRef, Header, Message, MessageBody,
    MessageBodyType,
};

/// Subscribe to status for every zone. The body is suppressed because the
/// initial payload on a large system is enormous; definitions are fetched
/// separately.
pub fn subscribe_all_zones() -> Message {
    Message::new(
        CommuniqueType::SubscribeRequest,
        Header::new("/zone/status").with_directives(Directives::suppress_body()),
    )
}

/// Subscribe to status for every area.
pub fn subscribe_all_areas() -> Message {
    Message::new(CommuniqueType::SubscribeRequest, Header::new("/area/status"))
}

/// Subscribe to status for every zone type group.
pub fn subscribe_all_zone_type_groups() -> Message {
    Message::new(
        CommuniqueType::SubscribeRequest,
        Header::new("/zonetypegroup/status"),
    )
}

/// Subscribe to occupancy group status events.
pub fn subscribe_all_occupancy() -> Message {
    Message::new(
        CommuniqueType::SubscribeRequest,
        Header::new("/occupancygroup/status"),
    )
}

/// Subscribe to load shedding status.
pub fn subscribe_all_loadshed() -> Message {
    Message::new(
        CommuniqueType::SubscribeRequest,
        Header::new("/system/loadshedding/status"),
    )
}

/// Subscribe to emergency status.
pub fn subscribe_all_emergency() -> Message {
    Message::new(
        CommuniqueType::SubscribeRequest,
        Header::new("/emergency/status"),
    )
}

/// The login exchange. Sent as an update to `/login` before anything else.
pub fn login(username: Option<String>, password: Option<String>) -> Message {
    Message::new(
        CommuniqueType::UpdateRequest,
        Header::new("/login").with_body_type(MessageBodyType::OneLoginDefinition),
    )
    .with_body(MessageBody::Login(LoginBody {
        login: Login {
            context_type: ContextType::Application,
            href: String::new(),
            login_id: username,
            password,
        },
    }))
}

/// Keepalive request.
pub fn ping() -> Message {
    Message::new(
        CommuniqueType::ReadRequest,
        Header::new("/server/status/ping"),
    )
}

/// Current privilege level and configured LEAP version.
pub fn read_client_setting() -> Message {
    Message::new(CommuniqueType::ReadRequest, Header::new("/clientsetting"))
}

/// The device the session is connected to, i.e. the processor itself.
pub fn read_this_device() -> Message {
    Message::new(
        CommuniqueType::ReadRequest,
        Header::new("/device?where=IsThisDevice:true"),
    )
}

/// Every device other than the connected processor.
pub fn read_other_devices() -> Message {
    Message::new(
        CommuniqueType::ReadRequest,
        Header::new("/device?where=IsThisDevice:false"),
    )
}

/// Devices associated with one area.
pub fn read_devices_in_area(area_id: u32) -> Message {
    Message::new(
        CommuniqueType::ReadRequest,
        Header::new(format!("/device?where=AssociatedArea.href:\"/area/{area_id}\"")),
    )
}

/// Definition of one area.
pub fn read_area(area_id: u32) -> Message {
    Message::new(
        CommuniqueType::ReadRequest,
        Header::new(format!("/area/{area_id}")),
    )
}

/// Status of one area.
pub fn read_area_status(area_id: u32) -> Message {
    Message::new(
        CommuniqueType::ReadRequest,
        Header::new(format!("/area/{area_id}/status")),
    )
}

/// Expanded status (status plus embedded definition) of every zone
/// associated with one area.
pub fn read_area_zones_expanded(area_id: u32) -> Message {
    Message::new(
        CommuniqueType::ReadRequest,
        Header::new(format!("/area/{area_id}/associatedzone/status/expanded")),
    )
}

/// Status of one zone.
pub fn read_zone_status(zone_id: u32) -> Message {
    Message::new(
        CommuniqueType::ReadRequest,
        Header::new(format!("/zone/{zone_id}/status")),
    )
}

/// The project master device list.
pub fn master_device_list() -> Message {
    Message::new(
        CommuniqueType::CreateRequest,
        Header::new("/project/masterdevicelist"),
    )
}

/// An arbitrary command aimed at one zone's command processor.
pub fn zone_command(zone_id: u32, command: Command) -> Message {
    Message::new(
        CommuniqueType::CreateRequest,
        Header::new(format!("/zone/{zone_id}/commandprocessor")),
    )
    .with_body(MessageBody::Command(CommandBody { command }))
}

/// Switch a zone fully on or off.
pub fn go_to_switched_level(zone_id: u32, level: SwitchedState) -> Message {
    let mut command = Command::new(CommandType::GoToSwitchedLevel);
    command.switched_level_parameters = Some(SwitchedLevelParameters {
        switched_level: level,
    });
    zone_command(zone_id, command)
}

/// Dim a zone to a percentage, with an optional fade time.
pub fn go_to_dimmed_level(zone_id: u32, level: i32, fade_time: Option<String>) -> Message {
    let mut command = Command::new(CommandType::GoToDimmedLevel);
    command.dimmed_level_parameters = Some(DimmedLevelParameters { level, fade_time });
    zone_command(zone_id, command)
}

/// Move a shade to a lift percentage.
pub fn go_to_shade_level(zone_id: u32, level: i32) -> Message {
    let mut command = Command::new(CommandType::GoToShadeLevel);
    command.shade_level_parameters = Some(ShadeLevelParameters { level: Some(level) });
    zone_command(zone_id, command)
}

/// Move a shade to a lift and tilt position.
pub fn go_to_shade_level_with_tilt(zone_id: u32, level: Option<i32>, tilt: Option<i32>) -> Message {
    let mut command = Command::new(CommandType::GoToShadeLevelWithTilt);
    command.shade_with_tilt_level_parameters =
        Some(ShadeWithTiltLevelParameters { level, tilt });
    zone_command(zone_id, command)
}

/// Set a spectrum tuning zone's level.
pub fn go_to_spectrum_tuning_level(zone_id: u32, level: i32) -> Message {
    let mut command = Command::new(CommandType::GoToSpectrumTuningLevel);
    command.spectrum_tuning_level_parameters = Some(SpectrumTuningLevelParameters {
        level: Some(level),
        vibrancy: None,
        fade_time: None,
        color_tuning_status: None,
    });
    zone_command(zone_id, command)
}

/// Open or close a contact closure output.
pub fn go_to_cco_level(zone_id: u32, level: CcoLevel) -> Message {
    let mut command = Command::new(CommandType::GoToCCOLevel);
    command.cco_level_parameters = Some(CcoLevelParameters { cco_level: level });
    zone_command(zone_id, command)
}

/// Switch a controlled receptacle.
pub fn go_to_receptacle_level(zone_id: u32, level: ReceptacleState) -> Message {
    let mut command = Command::new(CommandType::GoToReceptacleLevel);
    command.receptacle_level_parameters = Some(ReceptacleLevelParameters {
        receptacle_level: level,
    });
    zone_command(zone_id, command)
}

/// Set a fan zone's speed.
pub fn go_to_fan_speed(zone_id: u32, speed: FanSpeed) -> Message {
    let mut command = Command::new(CommandType::GoToFanSpeed);
    command.fan_speed_parameters = Some(FanSpeedParameters { fan_speed: speed });
    zone_command(zone_id, command)
}

/// Set a group lighting level.
pub fn go_to_group_lighting_level(zone_id: u32, level: i32) -> Message {
    let mut command = Command::new(CommandType::GoToGroupLightingLevel);
    command.group_lighting_level_parameters = Some(GroupLightingLevelParameters {
        level: Some(level),
        vibrancy_status: None,
        fade_time: None,
        color_tuning_status: None,
    });
    zone_command(zone_id, command)
}

/// Activate a scene on a zone group.
pub fn go_to_scene(zone_id: u32, scene: HRef) -> Message {
    let mut command = Command::new(CommandType::GoToScene);
    command.go_to_scene_parameters = Some(GoToSceneParameters {
        current_scene: scene,
    });
    zone_command(zone_id, command)
}

/// Reboot a processor through its device command processor.
pub fn reboot_device(device_id: u32) -> Message {
    Message::new(
        CommuniqueType::CreateRequest,
        Header::new(format!("/device/{device_id}/commandprocessor")),
    )
    .with_body(MessageBody::Command(CommandBody {
        command: Command::new(CommandType::Reboot),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zone_subscribe_suppresses_the_body() {
        let message = subscribe_all_zones();
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "CommuniqueType": "SubscribeRequest",
                "Header": {
                    "Url": "/zone/status",
                    "Directives": {"SuppressMessageBody": true},
                },
            })
        );
    }

    #[test]
    fn login_body_shape() {
        let message = login(Some("leap".to_string()), Some("hunter2".to_string()));
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "CommuniqueType": "UpdateRequest",
                "Header": {
                    "Url": "/login",
                    "MessageBodyType": "OneLoginDefinition",
                },
                "Body": {
                    "Login": {
                        "ContextType": "Application",
                        "LoginId": "leap",
                        "Password": "hunter2",
                    },
                },
            })
        );
    }

    #[test]
    fn dimmed_level_command_carries_one_parameter_family() {
        let message = go_to_dimmed_level(842, 75, None);
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "CommuniqueType": "CreateRequest",
                "Header": {"Url": "/zone/842/commandprocessor"},
                "Body": {
                    "Command": {
                        "CommandType": "GoToDimmedLevel",
                        "DimmedLevelParameters": {"Level": 75},
                    },
                },
            })
        );
    }

    #[test]
    fn fan_speed_command_shape() {
        let message = go_to_fan_speed(17, FanSpeed::MediumHigh);
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "CommuniqueType": "CreateRequest",
                "Header": {"Url": "/zone/17/commandprocessor"},
                "Body": {
                    "Command": {
                        "CommandType": "GoToFanSpeed",
                        "FanSpeedParameters": {"FanSpeed": "MediumHigh"},
                    },
                },
            })
        );
    }

    #[test]
    fn device_query_urls() {
        assert_eq!(read_this_device().header.url, "/device?where=IsThisDevice:true");
        assert_eq!(
            read_other_devices().header.url,
            "/device?where=IsThisDevice:false"
        );
        assert_eq!(
            read_devices_in_area(407).header.url,
            "/device?where=AssociatedArea.href:\"/area/407\""
        );
    }

    #[test]
    fn reboot_targets_the_device_command_processor() {
        let message = reboot_device(128);
        assert_eq!(message.header.url, "/device/128/commandprocessor");
        assert_eq!(
            serde_json::to_value(&message).unwrap()["Body"]["Command"]["CommandType"],
            "Reboot"
        );
    }
}
