// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The device entity and its update handlers.

use log::error;

use leap_types::device::{
    BatteryStatus, DatabaseInfo, DeviceClass, DeviceDefinition, DeviceFirmwarePackage,
    DeviceStatus, FirmwareImage, LinkInfo, NetworkInterface, Transfers,
};
use leap_types::enums::Availability;
use leap_types::{HRef, Message, MessageBody, MessageBodyType};

use super::{ModelKey, ModelStore};

/// A physical piece of hardware: a processor, dimmer, keypad, sensor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Device {
    /// Primary key in the session catalog.
    pub leap_id: u32,

    // Identity and definition fields.
    /// Display name.
    pub name: Option<String>,
    /// Parent id; usually absent since devices hang off `/project`.
    pub parent: Option<u32>,
    /// Factory serial number.
    pub serial_number: Option<u64>,
    /// Model, e.g. `RRD-PRO`.
    pub model_number: Option<String>,
    /// Device type, e.g. `RadioRa3Processor`.
    pub device_type: Option<String>,
    /// Rule references, shape undocumented.
    pub device_rules: Option<Vec<HRef>>,
    /// Installed firmware.
    pub firmware_image: Option<FirmwareImage>,
    /// Firmware package.
    pub device_firmware_package: Option<DeviceFirmwarePackage>,
    /// Databases hosted on the device.
    pub databases: Option<Vec<DatabaseInfo>>,
    /// Links the device owns.
    pub owned_links: Option<Vec<LinkInfo>>,
    /// Addressing state on its link.
    pub addressed_state: Option<String>,
    /// Link node references.
    pub link_nodes: Option<Vec<HRef>>,
    /// Network interfaces, processors only.
    pub network_interfaces: Option<Vec<NetworkInterface>>,
    /// Packed device class.
    pub device_class: Option<DeviceClass>,

    // Status fields.
    /// Whether the device is reachable.
    pub availability: Option<Availability>,
    /// Battery state for battery powered devices.
    pub battery_status: Option<BatteryStatus>,
    /// Failed transfer count.
    pub failed_transfers: Option<Transfers>,

    // Associations, resolved through the catalog.
    /// Id of the containing area.
    pub associated_area: Option<u32>,
    /// Ids of the zones this device drives.
    pub local_zones: Vec<u32>,
}

impl Device {
    pub(crate) fn new(leap_id: u32) -> Self {
        Self {
            leap_id,
            ..Default::default()
        }
    }

    /// The canonical href of this device.
    pub fn href(&self) -> String {
        format!("/device/{}", self.leap_id)
    }

    fn apply_status(&mut self, status: &DeviceStatus) {
        if let Some(availability) = status.availability {
            self.availability = Some(availability);
        }
        if let Some(battery_status) = &status.battery_status {
            self.battery_status = Some(battery_status.clone());
        }
        if let Some(failed_transfers) = &status.failed_transfers {
            self.failed_transfers = Some(failed_transfers.clone());
        }
    }
}

const DEVICE_BODY_TYPES: [MessageBodyType; 4] = [
    MessageBodyType::OneDeviceStatus,
    MessageBodyType::MultipleDeviceStatus,
    MessageBodyType::MultipleDeviceDefinition,
    MessageBodyType::OneMasterDeviceListDefinition,
];

pub(super) fn can_handle(message: &Message) -> bool {
    message
        .header
        .message_body_type
        .is_some_and(|body_type| DEVICE_BODY_TYPES.contains(&body_type))
}

pub(super) fn handle(store: &mut ModelStore, message: &Message) -> Vec<ModelKey> {
    let mut updated = Vec::new();
    match &message.body {
        Some(MessageBody::OneDeviceStatus(body)) => {
            apply_status(store, &body.device_status, &mut updated);
        }
        Some(MessageBody::MultipleDeviceStatus(body)) => {
            for entry in &body.device_statuses {
                apply_status(store, entry, &mut updated);
            }
        }
        Some(MessageBody::MultipleDeviceDefinition(body)) => {
            for entry in &body.devices {
                apply_definition(store, entry, &mut updated);
            }
        }
        Some(MessageBody::MasterDeviceList(body)) => {
            // The master list names every processor on the project; fold
            // the identifying fields into the device catalog.
            for entry in &body.master_device_list.devices {
                let Some(id) = entry.id() else {
                    error!(
                        "protocol error: no device id in master list entry {:?}",
                        entry.href
                    );
                    continue;
                };
                let device = store.get_or_create_device(id);
                if let Some(serial_number) = entry.serial_number {
                    device.serial_number = Some(serial_number);
                }
                updated.push(ModelKey::device(id));
            }
        }
        _ => {}
    }
    updated
}

fn apply_status(store: &mut ModelStore, status: &DeviceStatus, updated: &mut Vec<ModelKey>) {
    let Some(id) = status.id() else {
        error!(
            "protocol error: no device id in status entry {:?}",
            status.href
        );
        return;
    };
    store.get_or_create_device(id).apply_status(status);
    updated.push(ModelKey::device(id));
}

/// Sparse merge of a device definition. The associated area and local
/// zones are created through the catalog so the cross-references always
/// resolve; each local zone gets its back-reference to this device.
fn apply_definition(
    store: &mut ModelStore,
    definition: &DeviceDefinition,
    updated: &mut Vec<ModelKey>,
) {
    let Some(id) = definition.id() else {
        error!(
            "protocol error: no device id in definition entry {:?}",
            definition.href
        );
        return;
    };

    let area_id = definition.associated_area.as_ref().and_then(|a| a.id());
    if let Some(area_id) = area_id {
        store.get_or_create_area(area_id);
    }

    let zone_ids: Vec<u32> = definition
        .local_zones
        .iter()
        .flatten()
        .filter_map(|zone| zone.id())
        .collect();
    for zone_id in &zone_ids {
        store.get_or_create_zone(*zone_id).device = Some(id);
    }

    let device = store.get_or_create_device(id);
    if let Some(name) = &definition.name {
        device.name = Some(name.clone());
    }
    if let Some(parent) = &definition.parent {
        device.parent = parent.id();
    }
    if let Some(serial_number) = definition.serial_number {
        device.serial_number = Some(serial_number);
    }
    if let Some(model_number) = &definition.model_number {
        device.model_number = Some(model_number.clone());
    }
    if let Some(device_type) = &definition.device_type {
        device.device_type = Some(device_type.clone());
    }
    if let Some(device_rules) = &definition.device_rules {
        device.device_rules = Some(device_rules.clone());
    }
    if let Some(firmware_image) = &definition.firmware_image {
        device.firmware_image = Some(firmware_image.clone());
    }
    if let Some(package) = &definition.device_firmware_package {
        device.device_firmware_package = Some(package.clone());
    }
    if let Some(databases) = &definition.databases {
        device.databases = Some(databases.clone());
    }
    if let Some(owned_links) = &definition.owned_links {
        device.owned_links = Some(owned_links.clone());
    }
    if let Some(addressed_state) = &definition.addressed_state {
        device.addressed_state = Some(addressed_state.clone());
    }
    if let Some(link_nodes) = &definition.link_nodes {
        device.link_nodes = Some(link_nodes.clone());
    }
    if let Some(network_interfaces) = &definition.network_interfaces {
        device.network_interfaces = Some(network_interfaces.clone());
    }
    if let Some(device_class) = &definition.device_class {
        device.device_class = Some(device_class.clone());
    }
    if let Some(area_id) = area_id {
        device.associated_area = Some(area_id);
    }
    for zone_id in zone_ids {
        if !device.local_zones.contains(&zone_id) {
            device.local_zones.push(zone_id);
        }
    }

    updated.push(ModelKey::device(id));
}
