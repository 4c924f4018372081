// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The area entity and its update handlers.

use log::error;

use leap_types::area::{AreaDefinition, AreaStatus};
use leap_types::enums::OccupiedState;
use leap_types::{Message, MessageBody, MessageBodyType};

use super::{ModelKey, ModelStore};

/// A logical grouping of zones and devices, optionally hierarchical.
///
/// Fields are populated sparsely as definitions and statuses arrive; `None`
/// means the processor has not told us yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Area {
    /// Primary key in the session catalog.
    pub leap_id: u32,
    /// Display name.
    pub name: Option<String>,
    /// Parent area id; the root area has none.
    pub parent: Option<u32>,
    /// Ordering among siblings.
    pub sort_order: Option<i32>,
    /// Whether the area has no child areas.
    pub is_leaf: Option<bool>,
    /// Latest occupancy state.
    pub occupancy: Option<OccupiedState>,
    /// Href of the active scene.
    pub current_scene: Option<String>,
    /// Group dimming level.
    pub level: Option<i32>,
    /// Measured power draw.
    pub instantaneous_power: Option<i32>,
    /// Peak power draw.
    pub instantaneous_max_power: Option<i32>,
}

impl Area {
    pub(crate) fn new(leap_id: u32) -> Self {
        Self {
            leap_id,
            ..Default::default()
        }
    }

    /// The canonical href of this area.
    pub fn href(&self) -> String {
        format!("/area/{}", self.leap_id)
    }

    fn apply_status(&mut self, status: &AreaStatus) {
        if let Some(occupancy) = status.occupancy_status {
            self.occupancy = Some(occupancy);
        }
        if let Some(scene) = &status.current_scene {
            self.current_scene = Some(scene.href.clone());
        }
        if let Some(level) = status.level {
            self.level = Some(level);
        }
        if let Some(power) = status.instantaneous_power {
            self.instantaneous_power = Some(power);
        }
        if let Some(power) = status.instantaneous_max_power {
            self.instantaneous_max_power = Some(power);
        }
    }

    fn apply_definition(&mut self, definition: &AreaDefinition) {
        if let Some(name) = &definition.name {
            self.name = Some(name.clone());
        }
        if let Some(parent) = &definition.parent {
            self.parent = parent.id();
        }
        if let Some(sort_order) = definition.sort_order {
            self.sort_order = Some(sort_order);
        }
        if let Some(is_leaf) = definition.is_leaf {
            self.is_leaf = Some(is_leaf);
        }
    }
}

const AREA_BODY_TYPES: [MessageBodyType; 5] = [
    MessageBodyType::OneAreaDefinition,
    MessageBodyType::OneAreaStatus,
    MessageBodyType::MultipleAreaDefinition,
    MessageBodyType::MultipleAreaStatus,
    MessageBodyType::MultipleAreaSummaryDefinition,
];

pub(super) fn can_handle(message: &Message) -> bool {
    message
        .header
        .message_body_type
        .is_some_and(|body_type| AREA_BODY_TYPES.contains(&body_type))
}

pub(super) fn handle(store: &mut ModelStore, message: &Message) -> Vec<ModelKey> {
    let mut updated = Vec::new();
    match &message.body {
        Some(MessageBody::OneAreaStatus(body)) => {
            apply_status(store, &body.area_status, &mut updated);
        }
        Some(MessageBody::MultipleAreaStatus(body)) => {
            for entry in &body.area_statuses {
                apply_status(store, entry, &mut updated);
            }
        }
        Some(MessageBody::OneAreaDefinition(body)) => {
            apply_definition(store, &body.area, &mut updated);
        }
        Some(MessageBody::MultipleAreaDefinition(body))
        | Some(MessageBody::MultipleAreaSummaryDefinition(body)) => {
            for entry in &body.areas {
                apply_definition(store, entry, &mut updated);
            }
        }
        _ => {}
    }
    updated
}

fn apply_status(store: &mut ModelStore, status: &AreaStatus, updated: &mut Vec<ModelKey>) {
    let Some(id) = status.id() else {
        error!("protocol error: no area id in status entry {:?}", status.href);
        return;
    };
    store.get_or_create_area(id).apply_status(status);
    updated.push(ModelKey::area(id));
}

fn apply_definition(
    store: &mut ModelStore,
    definition: &AreaDefinition,
    updated: &mut Vec<ModelKey>,
) {
    let Some(id) = definition.id() else {
        error!(
            "protocol error: no area id in definition entry {:?}",
            definition.href
        );
        return;
    };
    store.get_or_create_area(id).apply_definition(definition);
    updated.push(ModelKey::area(id));
}
