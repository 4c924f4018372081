// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The in-memory object model.
//!
//! A [`ModelStore`] is a flat catalog of [`Area`], [`Zone`] and [`Device`]
//! entities keyed by the integer id extracted from their hrefs. Response
//! and push bodies are folded in by [`ModelStore::handle_response`], which
//! routes each recognized `MessageBodyType` to exactly one entity handler.
//! Updates are sparse: only fields present in the body overwrite prior
//! state. Cross-references between entities are stored as ids and resolved
//! through the catalog, never as owning references.
//!
//! The store is only mutated from the session's dispatch path, so the
//! handlers themselves need no locking; the session wraps the store in a
//! lock only to let other tasks read it.

mod area;
mod device;
mod processor;
mod zone;

use hashbrown::HashMap;
use log::debug;

use leap_types::Message;

pub use area::Area;
pub use device::Device;
pub use processor::Processor;
pub use zone::Zone;

/// Which entity map a [`ModelKey`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// An [`Area`].
    Area,
    /// A [`Device`].
    Device,
    /// A [`Zone`].
    Zone,
}

/// Identity of one entity in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelKey {
    /// The entity map.
    pub kind: ModelKind,
    /// The entity id.
    pub id: u32,
}

impl ModelKey {
    pub(crate) fn area(id: u32) -> Self {
        Self {
            kind: ModelKind::Area,
            id,
        }
    }

    pub(crate) fn device(id: u32) -> Self {
        Self {
            kind: ModelKind::Device,
            id,
        }
    }

    pub(crate) fn zone(id: u32) -> Self {
        Self {
            kind: ModelKind::Zone,
            id,
        }
    }
}

/// The session-scoped entity catalog.
#[derive(Debug, Default)]
pub struct ModelStore {
    areas: HashMap<u32, Area>,
    devices: HashMap<u32, Device>,
    zones: HashMap<u32, Zone>,
}

impl ModelStore {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one message into the catalog. Returns the keys of every entity
    /// that was created or updated, in body order. Messages with no
    /// recognized body type leave the catalog untouched.
    pub fn handle_response(&mut self, message: &Message) -> Vec<ModelKey> {
        debug!(
            "handling message for {} ({:?})",
            message.header.url, message.header.message_body_type
        );

        if area::can_handle(message) {
            area::handle(self, message)
        } else if device::can_handle(message) {
            device::handle(self, message)
        } else if zone::can_handle(message) {
            zone::handle(self, message)
        } else {
            Vec::new()
        }
    }

    /// Look up an area.
    pub fn area(&self, id: u32) -> Option<&Area> {
        self.areas.get(&id)
    }

    /// Look up a device.
    pub fn device(&self, id: u32) -> Option<&Device> {
        self.devices.get(&id)
    }

    /// Look up a zone.
    pub fn zone(&self, id: u32) -> Option<&Zone> {
        self.zones.get(&id)
    }

    /// Every area, ordered by id.
    pub fn areas(&self) -> Vec<&Area> {
        let mut areas: Vec<_> = self.areas.values().collect();
        areas.sort_by_key(|area| area.leap_id);
        areas
    }

    /// Every device, ordered by id.
    pub fn devices(&self) -> Vec<&Device> {
        let mut devices: Vec<_> = self.devices.values().collect();
        devices.sort_by_key(|device| device.leap_id);
        devices
    }

    /// Every zone, ordered by id.
    pub fn zones(&self) -> Vec<&Zone> {
        let mut zones: Vec<_> = self.zones.values().collect();
        zones.sort_by_key(|zone| zone.leap_id);
        zones
    }

    /// Areas whose parent is `id`, by reverse lookup.
    pub fn area_children(&self, id: u32) -> Vec<&Area> {
        let mut children: Vec<_> = self
            .areas
            .values()
            .filter(|area| area.parent == Some(id))
            .collect();
        children.sort_by_key(|area| area.leap_id);
        children
    }

    /// The parent of an area, if it has one in the catalog.
    pub fn area_parent(&self, id: u32) -> Option<&Area> {
        let parent = self.areas.get(&id)?.parent?;
        self.areas.get(&parent)
    }

    pub(crate) fn get_or_create_area(&mut self, id: u32) -> &mut Area {
        self.areas.entry(id).or_insert_with(|| Area::new(id))
    }

    pub(crate) fn get_or_create_device(&mut self, id: u32) -> &mut Device {
        self.devices.entry(id).or_insert_with(|| Device::new(id))
    }

    pub(crate) fn get_or_create_zone(&mut self, id: u32) -> &mut Zone {
        self.zones.entry(id).or_insert_with(|| Zone::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leap_types::enums::{FanSpeed, OccupiedState, SwitchedState};
    use serde_json::json;

    fn message(value: serde_json::Value) -> Message {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn zone_status_push_creates_and_updates_sparsely() {
        let mut store = ModelStore::new();

        let updated = store.handle_response(&message(json!({
            "CommuniqueType": "ReadResponse",
            "Header": {
                "ClientTag": "T1",
                "MessageBodyType": "OneZoneStatus",
                "Url": "/zone/842/status",
            },
            "Body": {"ZoneStatus": {"href": "/zone/842/status", "Level": 75}},
        })));
        assert_eq!(updated, vec![ModelKey::zone(842)]);

        let zone = store.zone(842).unwrap();
        assert_eq!(zone.level, Some(75));
        assert_eq!(zone.switched_level, None);
        assert_eq!(zone.name, None);

        // A later status naming only the switched level leaves the dim
        // level untouched.
        store.handle_response(&message(json!({
            "CommuniqueType": "ReadResponse",
            "Header": {
                "ClientTag": "T1",
                "MessageBodyType": "OneZoneStatus",
                "Url": "/zone/842/status",
            },
            "Body": {"ZoneStatus": {"href": "/zone/842/status", "SwitchedLevel": "On"}},
        })));

        let zone = store.zone(842).unwrap();
        assert_eq!(zone.level, Some(75));
        assert_eq!(zone.switched_level, Some(SwitchedState::On));
    }

    #[test]
    fn multi_area_definition_populates_the_catalog() {
        let mut store = ModelStore::new();

        let updated = store.handle_response(&message(json!({
            "CommuniqueType": "ReadResponse",
            "Header": {
                "MessageBodyType": "MultipleAreaDefinition",
                "StatusCode": "200 OK",
                "Url": "/area",
            },
            "Body": {"Areas": [
                {
                    "href": "/area/5",
                    "Name": "Kitchen",
                    "SortOrder": 1,
                    "IsLeaf": true,
                    "Parent": {"href": "/area/1"},
                },
                {
                    "href": "/area/1",
                    "Name": "Home",
                    "SortOrder": 0,
                    "IsLeaf": false,
                },
            ]},
        })));
        assert_eq!(updated, vec![ModelKey::area(5), ModelKey::area(1)]);

        let kitchen = store.area(5).unwrap();
        assert_eq!(kitchen.name.as_deref(), Some("Kitchen"));
        assert_eq!(kitchen.parent, Some(1));
        assert_eq!(kitchen.sort_order, Some(1));
        assert_eq!(kitchen.is_leaf, Some(true));

        assert_eq!(store.area_parent(5).unwrap().leap_id, 1);
        assert_eq!(store.area_children(1)[0].leap_id, 5);
    }

    #[test]
    fn area_status_merges_over_the_definition() {
        let mut store = ModelStore::new();
        store.handle_response(&message(json!({
            "CommuniqueType": "ReadResponse",
            "Header": {"MessageBodyType": "OneAreaDefinition", "Url": "/area/117"},
            "Body": {"Area": {"href": "/area/117", "Name": "Porch", "SortOrder": 3, "IsLeaf": true}},
        })));

        store.handle_response(&message(json!({
            "CommuniqueType": "ReadResponse",
            "Header": {"MessageBodyType": "OneAreaStatus", "Url": "/area/117/status"},
            "Body": {"AreaStatus": {"href": "/area/117/status", "OccupancyStatus": "Occupied"}},
        })));

        let porch = store.area(117).unwrap();
        assert_eq!(porch.name.as_deref(), Some("Porch"));
        assert_eq!(porch.occupancy, Some(OccupiedState::Occupied));
    }

    #[test]
    fn device_definition_wires_areas_and_zones() {
        let mut store = ModelStore::new();

        store.handle_response(&message(json!({
            "CommuniqueType": "ReadResponse",
            "Header": {
                "MessageBodyType": "MultipleDeviceDefinition",
                "StatusCode": "200 OK",
                "Url": "/device?where=IsThisDevice:false",
            },
            "Body": {"Devices": [{
                "href": "/device/1835",
                "Name": "Position 2",
                "DeviceType": "Unknown",
                "AssociatedArea": {"href": "/area/6176"},
                "SerialNumber": 12345678u32,
                "Parent": {"href": "/project"},
                "ModelNumber": "RRD-PRO",
                "LocalZones": [{"href": "/zone/1845"}],
                "LinkNodes": [{"href": "/device/1835/linknode/1836"}],
                "DeviceClass": {"HexadecimalEncoding": "4520101"},
                "AddressedState": "Addressed",
            }]},
        })));

        let device = store.device(1835).unwrap();
        assert_eq!(device.name.as_deref(), Some("Position 2"));
        assert_eq!(device.model_number.as_deref(), Some("RRD-PRO"));
        assert_eq!(device.serial_number, Some(12345678));
        assert_eq!(device.parent, None);
        assert_eq!(device.associated_area, Some(6176));
        assert_eq!(device.local_zones, vec![1845]);

        // Referenced entities were created through the catalog.
        assert!(store.area(6176).is_some());
        assert_eq!(store.zone(1845).unwrap().device, Some(1835));
    }

    #[test]
    fn expanded_zone_status_applies_status_and_definition() {
        let mut store = ModelStore::new();

        store.handle_response(&message(json!({
            "CommuniqueType": "ReadResponse",
            "Header": {
                "MessageBodyType": "MultipleZoneExpandedStatus",
                "StatusCode": "200 OK",
                "Url": "/area/407/associatedzone/status/expanded",
            },
            "Body": {"ZoneExpandedStatuses": [{
                "href": "/zone/842/status",
                "FanSpeed": "Off",
                "StatusAccuracy": "Good",
                "Zone": {
                    "href": "/zone/842",
                    "Name": "Fan1",
                    "ControlType": "FanSpeed",
                    "Category": {"Type": "CeilingFan", "IsLight": false},
                    "AssociatedArea": {"href": "/area/407"},
                    "SortOrder": 0,
                },
            }]},
        })));

        let zone = store.zone(842).unwrap();
        assert_eq!(zone.fan_speed, Some(FanSpeed::Off));
        assert_eq!(zone.status_accuracy.as_deref(), Some("Good"));
        assert_eq!(zone.name.as_deref(), Some("Fan1"));
        assert_eq!(zone.sort_order, Some(0));
        assert_eq!(
            zone.associated_area.as_ref().map(|a| a.href.as_str()),
            Some("/area/407")
        );
    }

    #[test]
    fn get_or_create_returns_the_same_entity() {
        let mut store = ModelStore::new();
        store.get_or_create_zone(842).level = Some(10);
        assert_eq!(store.get_or_create_zone(842).level, Some(10));
        assert_eq!(store.zones().len(), 1);
    }

    #[test]
    fn entries_without_ids_are_skipped_but_the_batch_continues() {
        let mut store = ModelStore::new();

        let updated = store.handle_response(&message(json!({
            "CommuniqueType": "ReadResponse",
            "Header": {"MessageBodyType": "MultipleZoneStatus", "Url": "/zone/status"},
            "Body": {"ZoneStatuses": [
                {"href": "/nonumber", "Level": 1},
                {"href": "/zone/7/status", "Level": 2},
            ]},
        })));

        assert_eq!(updated, vec![ModelKey::zone(7)]);
        assert_eq!(store.zone(7).unwrap().level, Some(2));
    }

    #[test]
    fn unrecognized_bodies_leave_the_catalog_untouched() {
        let mut store = ModelStore::new();
        let updated = store.handle_response(&message(json!({
            "CommuniqueType": "ExceptionResponse",
            "Header": {"Url": "/bad"},
            "Body": {"Message": "Nope"},
        })));
        assert!(updated.is_empty());
        assert!(store.areas().is_empty());
        assert!(store.zones().is_empty());
        assert!(store.devices().is_empty());
    }
}
