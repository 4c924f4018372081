// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! Processor summaries from the project master device list.

use leap_types::processor::MasterDeviceList;

/// Identity of one processor on the project, extracted from a
/// `OneMasterDeviceListDefinition` body.
#[derive(Debug, Clone, PartialEq)]
pub struct Processor {
    /// Device id of the processor.
    pub leap_id: u32,
    /// Factory serial number.
    pub serial_number: Option<u64>,
    /// MAC addresses of its network interfaces.
    pub mac_addresses: Vec<String>,
    /// Position of the processor on the inter-processor link.
    pub processor_id: Option<u32>,
}

impl Processor {
    /// Extract processor summaries from a master device list body.
    /// Entries without an id are skipped.
    pub fn from_master_device_list(list: &MasterDeviceList) -> Vec<Processor> {
        list.devices
            .iter()
            .filter_map(|entry| {
                let leap_id = entry.id()?;
                Some(Processor {
                    leap_id,
                    serial_number: entry.serial_number,
                    mac_addresses: entry
                        .network_interfaces
                        .iter()
                        .flatten()
                        .filter_map(|interface| interface.mac_address.clone())
                        .collect(),
                    processor_id: entry.ipl.as_ref().and_then(|ipl| ipl.processor_id),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summaries_from_master_list() {
        let list: MasterDeviceList = serde_json::from_value(json!({
            "Devices": [
                {
                    "href": "/device/128",
                    "SerialNumber": 12345678u32,
                    "NetworkInterfaces": [{"MACAddress": "30:e2:83:01:23:45"}],
                    "IPL": {"ProcessorID": 1},
                },
                {"href": "/project"},
            ],
            "SignedWhiteList": {"JWT": "opaque"},
        }))
        .unwrap();

        let processors = Processor::from_master_device_list(&list);
        assert_eq!(processors.len(), 1);
        assert_eq!(processors[0].leap_id, 128);
        assert_eq!(processors[0].serial_number, Some(12345678));
        assert_eq!(processors[0].mac_addresses, vec!["30:e2:83:01:23:45"]);
        assert_eq!(processors[0].processor_id, Some(1));
    }
}
