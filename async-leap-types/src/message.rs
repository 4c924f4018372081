// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The LEAP frame: communique type, header and the tagged body union.

use serde::de::Deserializer;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::area::{
    MultipleAreaDefinitionBody, MultipleAreaStatusBody, OneAreaDefinitionBody, OneAreaStatusBody,
};
use crate::button::OneButtonStatusEventBody;
use crate::command::CommandBody;
use crate::device::{MultipleDeviceDefinitionBody, MultipleDeviceStatusBody, OneDeviceStatusBody};
use crate::emergency::{MultipleEmergencyStatusBody, OneEmergencyStatusBody};
use crate::enums::{CommuniqueType, MessageBodyType};
use crate::href::id_from_href;
use crate::loadshed::OneSystemLoadSheddingStatusBody;
use crate::login::LoginBody;
use crate::occupancy::{MultipleOccupancySensorStatusBody, OneOccupancySensorStatusBody};
use crate::ping::OnePingResponseBody;
use crate::processor::OneMasterDeviceListBody;
use crate::status::ResponseStatus;
use crate::version::OneClientSettingBody;
use crate::zone::{
    MultipleZoneDefinitionBody, MultipleZoneExpandedStatusBody, MultipleZoneStatusBody,
    MultipleZoneTypeGroupStatusBody, OneZoneDefinitionBody, OneZoneStatusBody,
    OneZoneTypeGroupStatusBody,
};

/// Header directives. Currently only body suppression is known.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Directives {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_message_body: Option<bool>,
}

impl Directives {
    /// Directives asking the peer to omit the message body from responses.
    pub fn suppress_body() -> Self {
        Self {
            suppress_message_body: Some(true),
        }
    }
}

/// The frame header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<ResponseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directives: Option<Directives>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_body_type: Option<MessageBodyType>,
}

impl Header {
    /// A header naming only a url.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client_tag: None,
            status_code: None,
            directives: None,
            message_body_type: None,
        }
    }

    /// Attach a body type tag.
    pub fn with_body_type(mut self, body_type: MessageBodyType) -> Self {
        self.message_body_type = Some(body_type);
        self
    }

    /// Attach directives.
    pub fn with_directives(mut self, directives: Directives) -> Self {
        self.directives = Some(directives);
        self
    }

    /// Attach a client tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.client_tag = Some(tag.into());
        self
    }
}

/// Body of an `ExceptionResponse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExceptionDetail {
    pub message: String,
}

/// The body tagged union. The concrete variant is selected by the header's
/// `MessageBodyType` (or by the communique type for exceptions); bodies of
/// unrecognized or undecodable shape are retained as [`MessageBody::Raw`]
/// for forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum MessageBody {
    Exception(ExceptionDetail),
    Login(LoginBody),
    PingResponse(OnePingResponseBody),
    ClientSetting(OneClientSettingBody),
    Command(CommandBody),
    OneAreaDefinition(OneAreaDefinitionBody),
    MultipleAreaDefinition(MultipleAreaDefinitionBody),
    MultipleAreaSummaryDefinition(MultipleAreaDefinitionBody),
    OneAreaStatus(OneAreaStatusBody),
    MultipleAreaStatus(MultipleAreaStatusBody),
    OneZoneDefinition(OneZoneDefinitionBody),
    MultipleZoneDefinition(MultipleZoneDefinitionBody),
    OneZoneStatus(OneZoneStatusBody),
    MultipleZoneStatus(MultipleZoneStatusBody),
    MultipleZoneExpandedStatus(MultipleZoneExpandedStatusBody),
    OneZoneTypeGroupStatus(OneZoneTypeGroupStatusBody),
    MultipleZoneTypeGroupStatus(MultipleZoneTypeGroupStatusBody),
    OneDeviceStatus(OneDeviceStatusBody),
    MultipleDeviceStatus(MultipleDeviceStatusBody),
    MultipleDeviceDefinition(MultipleDeviceDefinitionBody),
    MasterDeviceList(OneMasterDeviceListBody),
    ButtonStatusEvent(OneButtonStatusEventBody),
    OneEmergencyStatus(OneEmergencyStatusBody),
    MultipleEmergencyStatus(MultipleEmergencyStatusBody),
    LoadShedding(OneSystemLoadSheddingStatusBody),
    OneOccupancySensorStatus(OneOccupancySensorStatusBody),
    MultipleOccupancySensorStatus(MultipleOccupancySensorStatusBody),
    Raw(Value),
}

impl MessageBody {
    /// Select and decode the body variant for a frame. `body_type` is the
    /// header tag supplied at decode time; exceptions are recognized by the
    /// communique type since they carry no tag. Decode failures are logged
    /// and the body is retained raw, so a malformed push can never poison
    /// the stream.
    pub fn from_parts(
        communique_type: CommuniqueType,
        body_type: Option<MessageBodyType>,
        value: Value,
    ) -> Self {
        if communique_type == CommuniqueType::ExceptionResponse {
            return match ExceptionDetail::deserialize(&value) {
                Ok(detail) => MessageBody::Exception(detail),
                Err(_) => MessageBody::Raw(value),
            };
        }

        let Some(tag) = body_type else {
            return MessageBody::Raw(value);
        };

        macro_rules! decode {
            ($variant:ident, $body:ty) => {
                match <$body>::deserialize(&value) {
                    Ok(body) => MessageBody::$variant(body),
                    Err(err) => {
                        log::error!("undecodable {tag:?} body kept raw: {err}");
                        MessageBody::Raw(value)
                    }
                }
            };
        }

        match tag {
            MessageBodyType::ExceptionDetail => decode!(Exception, ExceptionDetail),
            MessageBodyType::OneLoginDefinition => decode!(Login, LoginBody),
            MessageBodyType::OnePingResponse => decode!(PingResponse, OnePingResponseBody),
            MessageBodyType::OneClientSettingDefinition => {
                decode!(ClientSetting, OneClientSettingBody)
            }
            MessageBodyType::OneAreaDefinition => decode!(OneAreaDefinition, OneAreaDefinitionBody),
            MessageBodyType::MultipleAreaDefinition => {
                decode!(MultipleAreaDefinition, MultipleAreaDefinitionBody)
            }
            MessageBodyType::MultipleAreaSummaryDefinition => {
                decode!(MultipleAreaSummaryDefinition, MultipleAreaDefinitionBody)
            }
            MessageBodyType::OneAreaStatus => decode!(OneAreaStatus, OneAreaStatusBody),
            MessageBodyType::MultipleAreaStatus => {
                decode!(MultipleAreaStatus, MultipleAreaStatusBody)
            }
            MessageBodyType::OneZoneDefinition => decode!(OneZoneDefinition, OneZoneDefinitionBody),
            MessageBodyType::MultipleZoneDefinition => {
                decode!(MultipleZoneDefinition, MultipleZoneDefinitionBody)
            }
            MessageBodyType::OneZoneStatus => decode!(OneZoneStatus, OneZoneStatusBody),
            MessageBodyType::MultipleZoneStatus => {
                decode!(MultipleZoneStatus, MultipleZoneStatusBody)
            }
            MessageBodyType::MultipleZoneExpandedStatus => {
                decode!(MultipleZoneExpandedStatus, MultipleZoneExpandedStatusBody)
            }
            MessageBodyType::OneZoneTypeGroupStatus => {
                decode!(OneZoneTypeGroupStatus, OneZoneTypeGroupStatusBody)
            }
            MessageBodyType::MultipleZoneTypeGroupStatus => {
                decode!(MultipleZoneTypeGroupStatus, MultipleZoneTypeGroupStatusBody)
            }
            MessageBodyType::OneDeviceStatus => decode!(OneDeviceStatus, OneDeviceStatusBody),
            MessageBodyType::MultipleDeviceStatus => {
                decode!(MultipleDeviceStatus, MultipleDeviceStatusBody)
            }
            MessageBodyType::MultipleDeviceDefinition => {
                decode!(MultipleDeviceDefinition, MultipleDeviceDefinitionBody)
            }
            MessageBodyType::OneMasterDeviceListDefinition => {
                decode!(MasterDeviceList, OneMasterDeviceListBody)
            }
            MessageBodyType::OneButtonStatusEvent => {
                decode!(ButtonStatusEvent, OneButtonStatusEventBody)
            }
            MessageBodyType::OneEmergencyStatus => {
                decode!(OneEmergencyStatus, OneEmergencyStatusBody)
            }
            MessageBodyType::MultipleEmergencyStatus => {
                decode!(MultipleEmergencyStatus, MultipleEmergencyStatusBody)
            }
            MessageBodyType::OneSystemLoadSheddingStatus => {
                decode!(LoadShedding, OneSystemLoadSheddingStatusBody)
            }
            MessageBodyType::OneOccupancySensorStatus => {
                decode!(OneOccupancySensorStatus, OneOccupancySensorStatusBody)
            }
            MessageBodyType::MultipleOccupancySensorStatus => {
                decode!(MultipleOccupancySensorStatus, MultipleOccupancySensorStatusBody)
            }
            _ => MessageBody::Raw(value),
        }
    }

    /// Ids of the entities the body refers to, in body order.
    pub fn related_ids(&self) -> Vec<u32> {
        match self {
            MessageBody::OneAreaDefinition(body) => body.area.id().into_iter().collect(),
            MessageBody::MultipleAreaDefinition(body)
            | MessageBody::MultipleAreaSummaryDefinition(body) => {
                body.areas.iter().filter_map(|a| a.id()).collect()
            }
            MessageBody::OneAreaStatus(body) => body.area_status.id().into_iter().collect(),
            MessageBody::MultipleAreaStatus(body) => {
                body.area_statuses.iter().filter_map(|s| s.id()).collect()
            }
            MessageBody::OneZoneDefinition(body) => body.zone.id().into_iter().collect(),
            MessageBody::MultipleZoneDefinition(body) => {
                body.zones.iter().filter_map(|z| z.id()).collect()
            }
            MessageBody::OneZoneStatus(body) => body.zone_status.id().into_iter().collect(),
            MessageBody::MultipleZoneStatus(body) => {
                body.zone_statuses.iter().filter_map(|s| s.id()).collect()
            }
            MessageBody::MultipleZoneExpandedStatus(body) => body
                .zone_expanded_statuses
                .iter()
                .filter_map(|s| s.id())
                .collect(),
            MessageBody::OneZoneTypeGroupStatus(body) => {
                body.zone_type_group_status.id().into_iter().collect()
            }
            MessageBody::MultipleZoneTypeGroupStatus(body) => body
                .zone_type_group_statuses
                .iter()
                .filter_map(|s| s.id())
                .collect(),
            MessageBody::OneDeviceStatus(body) => body.device_status.id().into_iter().collect(),
            MessageBody::MultipleDeviceStatus(body) => {
                body.device_statuses.iter().filter_map(|s| s.id()).collect()
            }
            MessageBody::MultipleDeviceDefinition(body) => {
                body.devices.iter().filter_map(|d| d.id()).collect()
            }
            MessageBody::MasterDeviceList(body) => body
                .master_device_list
                .devices
                .iter()
                .filter_map(|d| d.id())
                .collect(),
            MessageBody::OneOccupancySensorStatus(body) => {
                body.occupancy_sensor_status.id().into_iter().collect()
            }
            MessageBody::MultipleOccupancySensorStatus(body) => body
                .occupancy_sensor_statuses
                .iter()
                .filter_map(|s| s.id())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A complete LEAP frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// The communique type.
    pub communique_type: CommuniqueType,
    /// The frame header.
    pub header: Header,
    /// The body, absent on most requests.
    pub body: Option<MessageBody>,
}

impl Message {
    /// A bodyless frame.
    pub fn new(communique_type: CommuniqueType, header: Header) -> Self {
        Self {
            communique_type,
            header,
            body: None,
        }
    }

    /// Attach a body.
    pub fn with_body(mut self, body: MessageBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Ids of the entities the frame refers to: the header url id first
    /// (when present), then the body entry ids.
    pub fn related_ids(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        if let Some(id) = id_from_href(&self.header.url) {
            ids.push(id);
        }
        if let Some(body) = &self.body {
            ids.extend(body.related_ids());
        }
        ids
    }

    /// Whether the header carries a 2xx status code.
    pub fn is_successful(&self) -> bool {
        self.header
            .status_code
            .as_ref()
            .is_some_and(|status| status.is_successful())
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.body.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("Message", fields)?;
        state.serialize_field("CommuniqueType", &self.communique_type)?;
        state.serialize_field("Header", &self.header)?;
        if let Some(body) = &self.body {
            state.serialize_field("Body", body)?;
        }
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMessage {
    #[serde(default)]
    communique_type: CommuniqueType,
    header: Header,
    #[serde(default)]
    body: Option<Value>,
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawMessage::deserialize(deserializer)?;
        let body = raw.body.map(|value| {
            MessageBody::from_parts(raw.communique_type, raw.header.message_body_type, value)
        });
        Ok(Message {
            communique_type: raw.communique_type,
            header: raw.header,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::EmergencyState;
    use crate::emergency::{EmergencyStatus, OneEmergencyStatusBody};
    use serde_json::json;

    #[test]
    fn bare_header_round_trip() {
        let header = Header::new("/server/status/ping");
        let value = serde_json::to_value(&header).unwrap();
        assert_eq!(value, json!({"Url": "/server/status/ping"}));

        let parsed: Header = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.client_tag, None);
        assert_eq!(parsed, header);
    }

    #[test]
    fn full_header_round_trip() {
        let wire = json!({
            "StatusCode": "200 OK",
            "ClientTag": "c66a3051-5355-497f-8958-02f9fb2c607d",
            "Url": "/not/a/real/endpoint",
            "MessageBodyType": "OneAreaStatus",
            "Directives": {"SuppressMessageBody": false},
        });

        let header: Header = serde_json::from_value(wire.clone()).unwrap();
        assert!(header.status_code.as_ref().unwrap().is_successful());
        assert_eq!(
            header.client_tag.as_deref(),
            Some("c66a3051-5355-497f-8958-02f9fb2c607d")
        );
        assert_eq!(
            header.message_body_type,
            Some(MessageBodyType::OneAreaStatus)
        );
        assert_eq!(
            header.directives,
            Some(Directives {
                suppress_message_body: Some(false)
            })
        );

        assert_eq!(serde_json::to_value(&header).unwrap(), wire);
    }

    #[test]
    fn bodyless_message_serializes_without_body_member() {
        let message = Message::new(
            CommuniqueType::ReadRequest,
            Header::new("/server/status/ping"),
        );
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "CommuniqueType": "ReadRequest",
                "Header": {"Url": "/server/status/ping"},
            })
        );
    }

    #[test]
    fn exception_body_selected_by_communique_type() {
        let wire = json!({
            "CommuniqueType": "ExceptionResponse",
            "Header": {"Url": "/bad"},
            "Body": {"Message": "Nope"},
        });

        let message: Message = serde_json::from_value(wire).unwrap();
        match &message.body {
            Some(MessageBody::Exception(detail)) => assert_eq!(detail.message, "Nope"),
            other => panic!("expected exception body, got {other:?}"),
        }
    }

    #[test]
    fn emergency_message_round_trip() {
        let wire = json!({
            "CommuniqueType": "UpdateRequest",
            "Header": {"Url": "/emergency/flash/status"},
            "Body": {"EmergencyStatus": {"ActiveState": "Active"}},
        });

        let message = Message::new(
            CommuniqueType::UpdateRequest,
            Header::new("/emergency/flash/status"),
        )
        .with_body(MessageBody::OneEmergencyStatus(OneEmergencyStatusBody {
            emergency_status: EmergencyStatus {
                href: String::new(),
                emergency: None,
                active_state: Some(EmergencyState::Active),
            },
        }));

        assert_eq!(serde_json::to_value(&message).unwrap(), wire);
    }

    #[test]
    fn body_variant_selected_by_header_tag() {
        let wire = json!({
            "CommuniqueType": "ReadResponse",
            "Header": {
                "ClientTag": "T1",
                "MessageBodyType": "OneZoneStatus",
                "Url": "/zone/842/status",
            },
            "Body": {"ZoneStatus": {"href": "/zone/842/status", "Level": 75}},
        });

        let message: Message = serde_json::from_value(wire).unwrap();
        let Some(MessageBody::OneZoneStatus(body)) = &message.body else {
            panic!("expected zone status body, got {:?}", message.body);
        };
        assert_eq!(body.zone_status.level, Some(75));
        assert_eq!(body.zone_status.id(), Some(842));
        assert_eq!(message.related_ids(), vec![842, 842]);
    }

    #[test]
    fn unknown_tags_keep_the_body_raw() {
        let wire = json!({
            "CommuniqueType": "ReadResponse",
            "Header": {
                "MessageBodyType": "OneProjectDefinition",
                "Url": "/project",
            },
            "Body": {"Project": {"href": "/project"}},
        });

        let message: Message = serde_json::from_value(wire).unwrap();
        assert!(matches!(message.body, Some(MessageBody::Raw(_))));
    }

    #[test]
    fn malformed_known_body_is_kept_raw() {
        let wire = json!({
            "CommuniqueType": "ReadResponse",
            "Header": {
                "MessageBodyType": "OneZoneStatus",
                "Url": "/zone/842/status",
            },
            "Body": {"ZoneStatus": {"href": "/zone/842/status", "Level": "notanumber"}},
        });

        let message: Message = serde_json::from_value(wire).unwrap();
        assert!(matches!(message.body, Some(MessageBody::Raw(_))));
    }
}
