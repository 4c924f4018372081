// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The zone entity and its update handlers.

use log::error;

use leap_types::enums::{
    Availability, CcoLevel, FanSpeed, ReceptacleState, SwitchedState, ZoneControlType,
};
use leap_types::lighting::{ColorTuningProperties, ColorTuningStatus};
use leap_types::zone::{
    ZoneCategory, ZoneDefinition, ZonePhaseSettings, ZoneStatus, ZoneTuningSettings,
};
use leap_types::{HRef, Message, MessageBody, MessageBodyType};

use super::{ModelKey, ModelStore};

/// A controllable output: a light, shade, fan, receptacle or contact
/// closure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Zone {
    /// Primary key in the session catalog.
    pub leap_id: u32,

    // Definition fields.
    /// Display name.
    pub name: Option<String>,
    /// Ordering among siblings.
    pub sort_order: Option<i32>,
    /// How the zone is driven.
    pub control_type: Option<ZoneControlType>,
    /// Fixture category.
    pub category: Option<ZoneCategory>,
    /// Id of the device driving this zone, resolved through the catalog.
    pub device: Option<u32>,
    /// Color tuning capabilities.
    pub color_tuning_properties: Option<ColorTuningProperties>,
    /// Phase dimming settings.
    pub phase_settings: Option<ZonePhaseSettings>,
    /// Trim settings.
    pub tuning_settings: Option<ZoneTuningSettings>,
    /// Href of the containing area.
    pub associated_area: Option<HRef>,
    /// Href of the containing facade.
    pub associated_facade: Option<HRef>,

    // Status fields.
    /// On/off state of switched zones.
    pub switched_level: Option<SwitchedState>,
    /// Dim level in percent.
    pub level: Option<i32>,
    /// Shade tilt in percent.
    pub tilt: Option<i32>,
    /// Vibrancy in percent.
    pub vibrancy: Option<i32>,
    /// Current color tuning state.
    pub color_tuning_status: Option<ColorTuningStatus>,
    /// Contact closure state.
    pub cco_level: Option<CcoLevel>,
    /// Receptacle state.
    pub receptacle_level: Option<ReceptacleState>,
    /// Fan speed.
    pub fan_speed: Option<FanSpeed>,
    /// Confidence the processor has in this status.
    pub status_accuracy: Option<String>,
    /// Whether the zone is reachable.
    pub availability: Option<Availability>,
}

impl Zone {
    pub(crate) fn new(leap_id: u32) -> Self {
        Self {
            leap_id,
            ..Default::default()
        }
    }

    /// The canonical href of this zone.
    pub fn href(&self) -> String {
        format!("/zone/{}", self.leap_id)
    }

    fn apply_status(&mut self, status: &ZoneStatus) {
        if let Some(switched_level) = status.switched_level {
            self.switched_level = Some(switched_level);
        }
        if let Some(level) = status.level {
            self.level = Some(level);
        }
        if let Some(tilt) = status.tilt {
            self.tilt = Some(tilt);
        }
        if let Some(vibrancy) = status.vibrancy {
            self.vibrancy = Some(vibrancy);
        }
        if let Some(color_tuning_status) = &status.color_tuning_status {
            self.color_tuning_status = Some(color_tuning_status.clone());
        }
        if let Some(cco_level) = status.cco_level {
            self.cco_level = Some(cco_level);
        }
        if let Some(receptacle_level) = status.receptacle_level {
            self.receptacle_level = Some(receptacle_level);
        }
        if let Some(fan_speed) = status.fan_speed {
            self.fan_speed = Some(fan_speed);
        }
        if let Some(status_accuracy) = &status.status_accuracy {
            self.status_accuracy = Some(status_accuracy.clone());
        }
        if let Some(availability) = status.availability {
            self.availability = Some(availability);
        }
    }
}

const ZONE_BODY_TYPES: [MessageBodyType; 7] = [
    MessageBodyType::OneZoneDefinition,
    MessageBodyType::OneZoneStatus,
    MessageBodyType::OneZoneTypeGroupStatus,
    MessageBodyType::MultipleZoneDefinition,
    MessageBodyType::MultipleZoneStatus,
    MessageBodyType::MultipleZoneTypeGroupStatus,
    MessageBodyType::MultipleZoneExpandedStatus,
];

pub(super) fn can_handle(message: &Message) -> bool {
    message
        .header
        .message_body_type
        .is_some_and(|body_type| ZONE_BODY_TYPES.contains(&body_type))
}

pub(super) fn handle(store: &mut ModelStore, message: &Message) -> Vec<ModelKey> {
    let mut updated = Vec::new();
    match &message.body {
        Some(MessageBody::OneZoneStatus(body)) => {
            apply_status(store, &body.zone_status, &mut updated);
        }
        Some(MessageBody::MultipleZoneStatus(body)) => {
            for entry in &body.zone_statuses {
                apply_status(store, entry, &mut updated);
            }
        }
        Some(MessageBody::OneZoneTypeGroupStatus(body)) => {
            apply_status(store, &body.zone_type_group_status, &mut updated);
        }
        Some(MessageBody::MultipleZoneTypeGroupStatus(body)) => {
            for entry in &body.zone_type_group_statuses {
                apply_status(store, entry, &mut updated);
            }
        }
        Some(MessageBody::OneZoneDefinition(body)) => {
            apply_definition_entry(store, &body.zone, &mut updated);
        }
        Some(MessageBody::MultipleZoneDefinition(body)) => {
            for entry in &body.zones {
                apply_definition_entry(store, entry, &mut updated);
            }
        }
        Some(MessageBody::MultipleZoneExpandedStatus(body)) => {
            // Each entry carries both a status and a nested definition.
            for entry in &body.zone_expanded_statuses {
                let Some(id) = entry.id() else {
                    error!(
                        "protocol error: no zone id in expanded status entry {:?}",
                        entry.href
                    );
                    continue;
                };
                store.get_or_create_zone(id).apply_status(entry);
                if let Some(definition) = &entry.zone {
                    apply_definition(store, id, definition);
                }
                updated.push(ModelKey::zone(id));
            }
        }
        _ => {}
    }
    updated
}

fn apply_status(store: &mut ModelStore, status: &ZoneStatus, updated: &mut Vec<ModelKey>) {
    let Some(id) = status.id() else {
        error!("protocol error: no zone id in status entry {:?}", status.href);
        return;
    };
    store.get_or_create_zone(id).apply_status(status);
    updated.push(ModelKey::zone(id));
}

fn apply_definition_entry(
    store: &mut ModelStore,
    definition: &ZoneDefinition,
    updated: &mut Vec<ModelKey>,
) {
    let Some(id) = definition.id() else {
        error!(
            "protocol error: no zone id in definition entry {:?}",
            definition.href
        );
        return;
    };
    apply_definition(store, id, definition);
    updated.push(ModelKey::zone(id));
}

/// Sparse merge of a zone definition. The referenced device is created
/// through the catalog so the cross-reference always resolves.
fn apply_definition(store: &mut ModelStore, id: u32, definition: &ZoneDefinition) {
    let device_id = definition.device.as_ref().and_then(|device| device.id());
    if let Some(device_id) = device_id {
        let device = store.get_or_create_device(device_id);
        if !device.local_zones.contains(&id) {
            device.local_zones.push(id);
        }
    }

    let zone = store.get_or_create_zone(id);
    if let Some(name) = &definition.name {
        zone.name = Some(name.clone());
    }
    if let Some(sort_order) = definition.sort_order {
        zone.sort_order = Some(sort_order);
    }
    if let Some(control_type) = definition.control_type {
        zone.control_type = Some(control_type);
    }
    if let Some(category) = &definition.category {
        zone.category = Some(category.clone());
    }
    if let Some(device_id) = device_id {
        zone.device = Some(device_id);
    }
    if let Some(properties) = &definition.color_tuning_properties {
        zone.color_tuning_properties = Some(properties.clone());
    }
    if let Some(phase_settings) = &definition.phase_settings {
        zone.phase_settings = Some(phase_settings.clone());
    }
    if let Some(tuning_settings) = &definition.tuning_settings {
        zone.tuning_settings = Some(tuning_settings.clone());
    }
    if let Some(associated_area) = &definition.associated_area {
        zone.associated_area = Some(associated_area.clone());
    }
    if let Some(associated_facade) = &definition.associated_facade {
        zone.associated_facade = Some(associated_facade.clone());
    }
}
