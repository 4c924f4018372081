// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Protocol enumerations.
//!
//! Wire values are the member names. Enumerations whose first member is
//! `Unknown` default to it and absorb unrecognized wire strings, so a
//! firmware update adding a new value never breaks decoding; the rest
//! reject unknown values, which keeps a corrupt field from being folded
//! into the model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an enumeration from an unrecognized wire
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant;

macro_rules! leap_enum_common {
    ($name:ident { $($variant:ident),+ }) => {
        impl $name {
            /// Wire names of every member.
            pub fn items() -> &'static [&'static str] {
                &[$(stringify!($variant)),+]
            }

            /// The wire name of this member.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, UnknownVariant> {
                match value {
                    $(stringify!($variant) => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

/// An enumeration that rejects unrecognized wire values.
macro_rules! leap_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        leap_enum_common!($name { $($variant),+ });

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                value
                    .parse()
                    .map_err(|_| serde::de::Error::unknown_variant(&value, Self::items()))
            }
        }
    };
}

/// An enumeration that defaults to its first member and maps unrecognized
/// wire values to it.
macro_rules! leap_enum_defaulted {
    ($(#[$meta:meta])* $name:ident {
        $(#[$fmeta:meta])* $first:ident
        $(, $(#[$vmeta:meta])* $rest:ident)* $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(#[$fmeta])* $first,
            $($(#[$vmeta])* $rest,)*
        }

        leap_enum_common!($name { $first $(, $rest)* });

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                Ok(value.parse().unwrap_or_default())
            }
        }
    };
}

leap_enum_defaulted! {
    /// The kind of communique a frame represents.
    CommuniqueType {
        Unknown,
        CreateRequest,
        CreateResponse,
        ExceptionResponse,
        ReadRequest,
        ReadResponse,
        SubscribeRequest,
        SubscribeResponse,
        UpdateRequest,
        UpdateResponse,
    }
}

leap_enum_defaulted! {
    /// Names the concrete body variant carried by a frame.
    MessageBodyType {
        Unknown,
        AdvancedToggleProgrammingModel,
        DualActionProgrammingModel,
        ExceptionDetail,
        MultipleAreaDefinition,
        MultipleAreaStatus,
        MultipleAreaSummaryDefinition,
        MultipleButtonGroupDefinition,
        MultipleButtonStatusEvent,
        MultipleCCOLevelAssignmentDefinition,
        MultipleControlStationDefinition,
        MultipleDeviceDefinition,
        MultipleDeviceStatus,
        MultipleDimmedLevelAssignmentDefinition,
        MultipleEmergencyDefinition,
        MultipleEmergencyStatus,
        MultipleFanSpeedAssignmentDefinition,
        MultipleOccupancyGroupDefinition,
        MultipleOccupancyGroupStatus,
        MultipleOccupancySensorStatus,
        MultipleProgrammingModelDefinition,
        MultipleReceptacleLevelAssignmentDefinition,
        MultipleSpectrumTuningLevelAssignmentDefinition,
        MultipleSwitchedLevelAssignmentDefinition,
        MultipleVirtualButtonDefinition,
        MultipleVirtualButtonDefinitionSummary,
        MultipleZoneDefinition,
        MultipleZoneExpandedStatus,
        MultipleZoneStatus,
        MultipleZoneTypeGroupStatus,
        OneAreaDefinition,
        OneAreaStatus,
        OneButtonDefinition,
        OneButtonGroupDefinition,
        OneButtonStatusEvent,
        OneClientSettingDefinition,
        OneDeviceStatus,
        OneEmergencyStatus,
        OneLEDDefinition,
        OneLEDStatus,
        OneLoginDefinition,
        OneMasterDeviceListDefinition,
        OneOccupancySensorDefinition,
        OneOccupancySensorStatus,
        OnePingResponse,
        OnePresetDefinition,
        OneProgrammingModelDefinition,
        OneProjectDefinition,
        OneSystemLoadSheddingStatus,
        OneVirtualButtonDefinition,
        OneZoneDefinition,
        OneZoneStatus,
        OneZoneTypeGroupStatus,
        SingleActionProgrammingModel,
        SingleSceneRaiseProgrammingModel,
    }
}

leap_enum_defaulted! {
    /// Commands accepted by zone and device command processors.
    CommandType {
        Unknown,
        Activate,
        GoToCCOLevel,
        GoToDimmedLevel,
        GoToFanSpeed,
        GoToGroupLightingLevel,
        GoToReceptacleLevel,
        GoToScene,
        GoToShadeLevel,
        GoToShadeLevelWithTilt,
        GoToSpectrumTuningLevel,
        GoToSwitchedLevel,
        Lower,
        LowerTilt,
        Raise,
        RaiseTilt,
        Reboot,
        Stop,
        StopTilt,
    }
}

leap_enum_defaulted! {
    /// Login context, always `Application` for library sessions.
    ContextType {
        Unknown,
        Application,
    }
}

leap_enum_defaulted! {
    /// How an area is driven.
    AreaMode {
        Unknown,
        DimLevel,
        Switched,
    }
}

leap_enum_defaulted! {
    /// Whether a zone or device is reachable.
    Availability {
        Unknown,
        Available,
        Mixed,
        Unavailable,
    }
}

leap_enum_defaulted! {
    /// Battery condition of battery powered devices.
    BatteryState {
        Unknown,
        Bad,
        Good,
    }
}

leap_enum_defaulted! {
    /// What a button just did.
    ButtonEventType {
        Unknown,
        LongHold,
        MultiTap,
        Press,
        Release,
    }
}

leap_enum! {
    /// Button press model for button commands.
    ButtonEventState {
        MultiTap,
        PressAndHold,
        PressAndRelease,
        Release,
    }
}

leap_enum! {
    /// Button programming mode.
    ButtonMode {
        Auto,
        MultiTap,
        PressRelease,
    }
}

leap_enum! {
    /// Contact closure output level.
    CcoLevel {
        Closed,
        Open,
    }
}

leap_enum! {
    /// Whether an emergency condition is in effect.
    EmergencyState {
        Inactive,
        Active,
    }
}

leap_enum! {
    /// Generic enable/disable state.
    EnableState {
        Disabled,
        Enabled,
    }
}

leap_enum_defaulted! {
    /// Speed of a fan zone.
    FanSpeed {
        Unknown,
        Off,
        Low,
        Medium,
        MediumHigh,
        High,
    }
}

leap_enum_defaulted! {
    /// State of a keypad LED.
    LedState {
        Unknown,
        On,
        Off,
        NormalFlash,
        RapidFlash,
    }
}

leap_enum! {
    /// Whether load shedding is in effect.
    LoadShedState {
        Disabled,
        Enabled,
    }
}

leap_enum_defaulted! {
    /// Occupancy reported for an area or sensor.
    OccupiedState {
        Unknown,
        Occupied,
        Unoccupied,
    }
}

leap_enum! {
    /// State of a controlled receptacle.
    ReceptacleState {
        Off,
        On,
    }
}

leap_enum! {
    /// Privilege level granted to the session.
    SessionRole {
        Unauthorized,
        ControlAndMonitor,
        Admin,
    }
}

leap_enum_defaulted! {
    /// Movement capabilities of a shade.
    ShadeMode {
        Unknown,
        Lift,
        LiftAndTilt,
    }
}

leap_enum_defaulted! {
    /// Active spectrum tuning mode.
    SpectrumTuningType {
        Unknown,
        HueAndSaturation,
        WhiteTuning,
        ColorXY,
        Vibrancy,
    }
}

leap_enum_defaulted! {
    /// On/off state of a switched zone.
    SwitchedState {
        Unknown,
        Off,
        On,
    }
}

leap_enum_defaulted! {
    /// How a zone is driven.
    ZoneControlType {
        Unknown,
        Switched,
        Dimmed,
        FanSpeed,
    }
}

leap_enum_defaulted! {
    /// Output mode of a zone.
    ZoneMode {
        Unknown,
        CCO,
        DimLevel,
        Receptical,
        Switched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_is_the_default() {
        assert_eq!(AreaMode::default(), AreaMode::Unknown);
        assert_eq!(CommuniqueType::default(), CommuniqueType::Unknown);
        assert_eq!(FanSpeed::default(), FanSpeed::Unknown);
    }

    #[test]
    fn items_lists_the_wire_names() {
        assert_eq!(AreaMode::items(), &["Unknown", "DimLevel", "Switched"]);
        assert_eq!(AreaMode::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn wire_names_are_the_member_names() {
        assert_eq!(
            serde_json::to_string(&CommuniqueType::ReadRequest).unwrap(),
            "\"ReadRequest\""
        );
        assert_eq!(
            serde_json::to_string(&MessageBodyType::OneZoneStatus).unwrap(),
            "\"OneZoneStatus\""
        );
        assert_eq!(
            serde_json::to_string(&CommandType::GoToFanSpeed).unwrap(),
            "\"GoToFanSpeed\""
        );

        let parsed: FanSpeed = serde_json::from_str("\"MediumHigh\"").unwrap();
        assert_eq!(parsed, FanSpeed::MediumHigh);
    }

    #[test]
    fn defaulted_enums_absorb_unrecognized_values() {
        let parsed: MessageBodyType = serde_json::from_str("\"OneFluxCapacitorStatus\"").unwrap();
        assert_eq!(parsed, MessageBodyType::Unknown);

        let parsed: FanSpeed = serde_json::from_str("\"Hyper\"").unwrap();
        assert_eq!(parsed, FanSpeed::Unknown);
    }

    #[test]
    fn strict_enums_reject_unrecognized_values() {
        assert!(serde_json::from_str::<CcoLevel>("\"Half\"").is_err());
        assert_eq!(CcoLevel::from_str("Open"), Ok(CcoLevel::Open));
        assert_eq!(FanSpeed::from_str("Hyper"), Err(UnknownVariant));
    }
}
