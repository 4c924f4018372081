// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! End-to-end session tests against a scripted mock processor.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, WriteHalf};
use tokio::sync::mpsc;

use leap_client::{requests, Connector, LeapError, Session, SessionConfig};
use leap_core::LeapProtocol;
use leap_types::enums::FanSpeed;

#[derive(Debug)]
enum PeerEvent {
    Login { login_id: Value },
    ZoneSubscribed { connection: u32, tag: String },
    Command { connection: u32, body: Value },
}

/// Hands the session an in-memory duplex per connection attempt and runs a
/// scripted processor on the far end.
struct MockConnector {
    connections: Arc<AtomicU32>,
    events: mpsc::UnboundedSender<PeerEvent>,
    drop_first_connection: bool,
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, _config: &SessionConfig) -> Result<LeapProtocol, LeapError> {
        let connection = self.connections.fetch_add(1, Ordering::SeqCst);
        let (client, server) = tokio::io::duplex(64 * 1024);
        let (client_read, client_write) = tokio::io::split(client);

        let events = self.events.clone();
        let drop_connection = self.drop_first_connection && connection == 0;
        tokio::spawn(run_peer(server, connection, events, drop_connection));

        Ok(LeapProtocol::new(client_read, client_write))
    }
}

fn response(
    communique: &str,
    url: &str,
    tag: &Value,
    status: &str,
    body_type: Option<&str>,
    body: Option<Value>,
) -> Value {
    let mut message = json!({
        "CommuniqueType": communique,
        "Header": {"Url": url, "ClientTag": tag, "StatusCode": status},
    });
    if let Some(body_type) = body_type {
        message["Header"]["MessageBodyType"] = json!(body_type);
    }
    if let Some(body) = body {
        message["Body"] = body;
    }
    message
}

async fn send(write: &mut WriteHalf<DuplexStream>, message: &Value) {
    let mut text = message.to_string();
    text.push_str("\r\n");
    let _ = write.write_all(text.as_bytes()).await;
}

async fn run_peer(
    server: DuplexStream,
    connection: u32,
    events: mpsc::UnboundedSender<PeerEvent>,
    drop_after_bootstrap: bool,
) {
    let (read, mut write) = tokio::io::split(server);
    let mut lines = BufReader::new(read).lines();
    let mut zone_tag: Option<Value> = None;

    while let Ok(Some(line)) = lines.next_line().await {
        let request: Value = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(_) => continue,
        };
        let url = request["Header"]["Url"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        let tag = request["Header"]["ClientTag"].clone();

        match url.as_str() {
            "/login" => {
                let _ = events.send(PeerEvent::Login {
                    login_id: request["Body"]["Login"]["LoginId"].clone(),
                });
                send(
                    &mut write,
                    &response("UpdateResponse", &url, &tag, "200 OK", None, None),
                )
                .await;
            }
            "/zone/status" => {
                let _ = events.send(PeerEvent::ZoneSubscribed {
                    connection,
                    tag: tag.as_str().unwrap_or_default().to_string(),
                });
                zone_tag = Some(tag.clone());
                send(
                    &mut write,
                    &response("SubscribeResponse", &url, &tag, "200 OK", None, None),
                )
                .await;
            }
            "/area/status" => {
                send(
                    &mut write,
                    &response(
                        "SubscribeResponse",
                        &url,
                        &tag,
                        "200 OK",
                        Some("MultipleAreaStatus"),
                        Some(json!({"AreaStatuses": [
                            {"href": "/area/117/status", "OccupancyStatus": "Occupied"},
                        ]})),
                    ),
                )
                .await;
            }
            "/occupancygroup/status" => {
                send(
                    &mut write,
                    &response("SubscribeResponse", &url, &tag, "200 OK", None, None),
                )
                .await;
            }
            "/device?where=IsThisDevice:true" => {
                send(
                    &mut write,
                    &response(
                        "ReadResponse",
                        &url,
                        &tag,
                        "200 OK",
                        Some("MultipleDeviceDefinition"),
                        Some(json!({"Devices": [{
                            "href": "/device/128",
                            "Name": "Enclosure Device 001",
                            "Parent": {"href": "/project"},
                            "ModelNumber": "JanusProcRA3",
                            "DeviceType": "RadioRa3Processor",
                            "AssociatedArea": {"href": "/area/117"},
                            "IsThisDevice": true,
                        }]})),
                    ),
                )
                .await;
            }
            "/device?where=IsThisDevice:false" => {
                send(
                    &mut write,
                    &response(
                        "ReadResponse",
                        &url,
                        &tag,
                        "200 OK",
                        Some("MultipleDeviceDefinition"),
                        Some(json!({"Devices": [{
                            "href": "/device/1835",
                            "Name": "Position 2",
                            "Parent": {"href": "/project"},
                            "ModelNumber": "RRD-PRO",
                            "AssociatedArea": {"href": "/area/6176"},
                            "LocalZones": [{"href": "/zone/842"}],
                            "AddressedState": "Addressed",
                        }]})),
                    ),
                )
                .await;
            }
            "/clientsetting" => {
                send(
                    &mut write,
                    &response(
                        "ReadResponse",
                        &url,
                        &tag,
                        "200 OK",
                        Some("OneClientSettingDefinition"),
                        Some(json!({"ClientSetting": {
                            "href": "/clientsetting",
                            "ClientMajorVersion": 1,
                            "Permissions": {"SessionRole": "Admin"},
                        }})),
                    ),
                )
                .await;

                // The client setting read is the tail of bootstrap. Push a
                // zone status on the standing subscription, then
                // optionally hang up to exercise the reconnect path.
                if let Some(zone_tag) = &zone_tag {
                    send(
                        &mut write,
                        &json!({
                            "CommuniqueType": "ReadResponse",
                            "Header": {
                                "Url": "/zone/842/status",
                                "ClientTag": zone_tag,
                                "StatusCode": "200 OK",
                                "MessageBodyType": "OneZoneStatus",
                            },
                            "Body": {"ZoneStatus": {"href": "/zone/842/status", "Level": 75}},
                        }),
                    )
                    .await;
                }
                if drop_after_bootstrap {
                    return;
                }
            }
            "/server/status/ping" => {
                send(
                    &mut write,
                    &response(
                        "ReadResponse",
                        &url,
                        &tag,
                        "200 OK",
                        Some("OnePingResponse"),
                        Some(json!({"PingResponse": {"LEAPVersion": 1.115}})),
                    ),
                )
                .await;
            }
            url_str if url_str.contains("/commandprocessor") => {
                let _ = events.send(PeerEvent::Command {
                    connection,
                    body: request["Body"].clone(),
                });
                send(
                    &mut write,
                    &response("CreateResponse", &url, &tag, "201 Created", None, None),
                )
                .await;
            }
            _ => {
                send(
                    &mut write,
                    &response("ReadResponse", &url, &tag, "404 NotFound", None, None),
                )
                .await;
            }
        }
    }
}

fn test_config() -> SessionConfig {
    let mut config = SessionConfig::new("processor.test");
    config.username = Some("leap".to_string());
    config.password = Some("hunter2".to_string());
    config
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met in time");
}

#[tokio::test(start_paused = true)]
async fn session_bootstraps_pushes_and_reconnects() {
    let connections = Arc::new(AtomicU32::new(0));
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let connector = MockConnector {
        connections: connections.clone(),
        events: events_tx,
        drop_first_connection: true,
    };

    let (session, event_loop) =
        Session::new_with_connector(test_config(), Box::new(connector)).unwrap();
    let handle = event_loop.spawn();

    assert!(session.wait_for_ready().await);
    assert!(session.is_logged_in());

    // Login carried the configured credentials.
    let login = loop {
        match events.recv().await.unwrap() {
            PeerEvent::Login { login_id } => break login_id,
            _ => continue,
        }
    };
    assert_eq!(login, json!("leap"));

    // Device enumeration and the area status subscription response
    // populated the catalog, wiring cross-references by id.
    let device = session.device(1835).unwrap();
    assert_eq!(device.associated_area, Some(6176));
    assert_eq!(device.local_zones, vec![842]);
    assert!(session.area(6176).is_some());
    assert_eq!(
        session.area(117).unwrap().occupancy,
        Some(leap_types::enums::OccupiedState::Occupied)
    );

    // The push on the standing zone subscription lands in the catalog.
    {
        let session = session.clone();
        wait_until(move || session.zone(842).is_some_and(|zone| zone.level == Some(75))).await;
    }
    assert_eq!(session.zone(842).unwrap().device, Some(1835));

    // The peer hung up after bootstrap; the session reconnects by itself
    // and re-subscribes under fresh tags.
    {
        let connections = connections.clone();
        let session = session.clone();
        wait_until(move || connections.load(Ordering::SeqCst) >= 2 && session.is_logged_in())
            .await;
    }

    let mut zone_tags = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let PeerEvent::ZoneSubscribed { tag, .. } = event {
            zone_tags.push(tag);
        }
    }
    assert!(zone_tags.len() >= 2);
    assert_ne!(zone_tags[0], zone_tags[1]);

    // The catalog survived the reconnect.
    assert_eq!(session.zone(842).unwrap().level, Some(75));
    assert_eq!(session.device(1835).unwrap().model_number.as_deref(), Some("RRD-PRO"));

    session.close().await;
    handle.await.unwrap();

    assert!(!session.wait_for_ready().await);
    assert!(matches!(
        session.request(requests::ping()).await,
        Err(LeapError::SessionDisconnected)
    ));
}

#[tokio::test(start_paused = true)]
async fn commands_and_error_responses() {
    let connections = Arc::new(AtomicU32::new(0));
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let connector = MockConnector {
        connections,
        events: events_tx,
        drop_first_connection: false,
    };

    let (session, event_loop) =
        Session::new_with_connector(test_config(), Box::new(connector)).unwrap();
    let handle = event_loop.spawn();

    assert!(session.wait_for_ready().await);

    // Commands resolve on a 2xx status; the state change itself would
    // arrive through the zone status stream.
    session.set_fan_speed(842, FanSpeed::MediumHigh).await.unwrap();
    let command = loop {
        match events.recv().await.unwrap() {
            PeerEvent::Command { body, .. } => break body,
            _ => continue,
        }
    };
    assert_eq!(command["Command"]["CommandType"], "GoToFanSpeed");
    assert_eq!(
        command["Command"]["FanSpeedParameters"]["FanSpeed"],
        "MediumHigh"
    );

    // A non-2xx response surfaces as a response error with the original
    // message attached.
    let err = session
        .request_checked(requests::read_area(999))
        .await
        .unwrap_err();
    match &err {
        LeapError::Response(response) => {
            assert_eq!(response.header.status_code.as_ref().unwrap().code, Some(404));
        }
        other => panic!("expected response error, got {other:?}"),
    }
    assert_eq!(err.status().unwrap().code, Some(404));

    // The ping keepalive is answered and keeps the session alive across
    // several intervals.
    tokio::time::sleep(Duration::from_secs(185)).await;
    assert!(session.is_logged_in());

    session.close().await;
    handle.await.unwrap();
}
