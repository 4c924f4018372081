// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The LEAP session.
//!
//! A session owns the connection lifecycle and the model catalog. Callers
//! get request/subscribe access gated on readiness; the
//! [`SessionEventLoop`] drives connect, login, bootstrap, keepalive and
//! reconnect.

mod event_loop;

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;

use leap_core::{LeapProtocol, MessageCallback};
use leap_types::enums::FanSpeed;
use leap_types::version::ClientSetting;
use leap_types::{LeapError, Message, MessageBody};

use crate::config::SessionConfig;
use crate::model::{Area, Device, ModelKey, ModelKind, ModelStore, Processor, Zone};
use crate::requests;
use crate::transport::{Connector, TlsConnector};

pub use event_loop::SessionEventLoop;

#[allow(unused)]
macro_rules! session_warn {
    ($session: expr, $($arg:tt)*) =>  {
        { log::warn!("session:{} {}", $session.session_id(), format!($($arg)*)); }
    }
}
#[allow(unused)]
pub(crate) use session_warn;

#[allow(unused)]
macro_rules! session_error {
    ($session: expr, $($arg:tt)*) =>  {
        { log::error!("session:{} {}", $session.session_id(), format!($($arg)*)); }
    }
}
#[allow(unused)]
pub(crate) use session_error;

#[allow(unused)]
macro_rules! session_debug {
    ($session: expr, $($arg:tt)*) =>  {
        log::debug!("session:{} {}", $session.session_id(), format!($($arg)*));
    }
}
#[allow(unused)]
pub(crate) use session_debug;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No connection.
    Disconnected,
    /// TCP and TLS establishment in progress.
    Connecting,
    /// Connected, `/login` outstanding.
    Authenticating,
    /// Logged in, issuing the initial subscriptions and enumerations.
    Bootstrapping,
    /// Fully operational.
    Ready,
    /// Waiting out the reconnect delay after a failure.
    Reconnecting,
    /// Closed by the caller; terminal.
    Closed,
}

/// Tags of the standing subscriptions installed at bootstrap, usable with
/// [`Session::unsubscribe`].
#[derive(Debug, Clone, Default)]
pub struct SubscriptionTags {
    /// Tag of the `/zone/status` subscription.
    pub zone: Option<String>,
    /// Tag of the `/area/status` subscription.
    pub area: Option<String>,
    /// Tag of the `/occupancygroup/status` subscription.
    pub occupancy: Option<String>,
}

static NEXT_SESSION_ID: AtomicU32 = AtomicU32::new(1);

/// A LEAP session against one processor.
///
/// Created together with its [`SessionEventLoop`]; nothing happens until
/// the event loop is polled or spawned. The model catalog lives for the
/// whole session and survives reconnects.
pub struct Session {
    config: SessionConfig,
    connector: Box<dyn Connector>,
    leap: ArcSwapOption<LeapProtocol>,
    models: RwLock<ModelStore>,
    state_watch_rx: watch::Receiver<SessionState>,
    state_watch_tx: watch::Sender<SessionState>,
    should_reconnect: AtomicBool,
    internal_session_id: AtomicU32,
    subscription_tags: Mutex<SubscriptionTags>,
}

impl Session {
    /// Create a session using the stock TLS connector.
    pub fn new(config: SessionConfig) -> Result<(Arc<Session>, SessionEventLoop), LeapError> {
        Self::new_with_connector(config, Box::new(TlsConnector))
    }

    /// Create a session with a custom [`Connector`], e.g. for tests or
    /// tunnelled transports.
    pub fn new_with_connector(
        config: SessionConfig,
        connector: Box<dyn Connector>,
    ) -> Result<(Arc<Session>, SessionEventLoop), LeapError> {
        config.validate()?;

        let (state_watch_tx, state_watch_rx) = watch::channel(SessionState::Disconnected);
        let session = Arc::new(Session {
            config,
            connector,
            leap: ArcSwapOption::empty(),
            models: RwLock::new(ModelStore::new()),
            state_watch_rx,
            state_watch_tx,
            should_reconnect: AtomicBool::new(true),
            internal_session_id: AtomicU32::new(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed)),
            subscription_tags: Mutex::new(SubscriptionTags::default()),
        });

        let event_loop = SessionEventLoop::new(session.clone());
        Ok((session, event_loop))
    }

    /// The internal id of the session, used to tell multiple sessions
    /// apart in logs.
    pub fn session_id(&self) -> u32 {
        self.internal_session_id.load(Ordering::Relaxed)
    }

    /// The configuration the session was created with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state_watch_rx.borrow()
    }

    /// Whether the session is connected, logged in and bootstrapped.
    pub fn is_logged_in(&self) -> bool {
        self.state() == SessionState::Ready
    }

    /// Wait until the session is ready. Returns `false` if it was closed
    /// first.
    pub async fn wait_for_ready(&self) -> bool {
        let mut rx = self.state_watch_rx.clone();
        let result = rx
            .wait_for(|state| matches!(state, SessionState::Ready | SessionState::Closed))
            .await
            .map(|state| *state == SessionState::Ready);
        match result {
            Ok(ready) => ready,
            Err(_) => false,
        }
    }

    /// A receiver for observing state transitions.
    pub fn state_watch(&self) -> watch::Receiver<SessionState> {
        self.state_watch_rx.clone()
    }

    async fn ensure_connected(&self) -> Result<Arc<LeapProtocol>, LeapError> {
        if !self.is_logged_in() && !self.wait_for_ready().await {
            return Err(LeapError::SessionDisconnected);
        }
        self.leap
            .load_full()
            .ok_or(LeapError::SessionDisconnected)
    }

    /// Make a request, waiting for readiness first.
    pub async fn request(&self, message: Message) -> Result<Message, LeapError> {
        let leap = self.ensure_connected().await?;
        leap.request(message).await
    }

    /// Make a request and fail with [`LeapError::Response`] unless the
    /// peer answered 2xx.
    pub async fn request_checked(&self, message: Message) -> Result<Message, LeapError> {
        let response = self.request(message).await?;
        if response.is_successful() {
            Ok(response)
        } else {
            Err(LeapError::response(response))
        }
    }

    /// Install a subscription, waiting for readiness first. Note that
    /// subscriptions installed this way are lost on reconnect; the
    /// standing bootstrap subscriptions are re-established automatically.
    pub async fn subscribe(
        &self,
        message: Message,
        callback: Arc<dyn MessageCallback>,
    ) -> Result<(Message, String), LeapError> {
        let leap = self.ensure_connected().await?;
        session_debug!(self, "subscribing from session");
        leap.subscribe(message, callback).await
    }

    /// Drop a tagged subscription on the live connection.
    pub fn unsubscribe(&self, tag: &str) -> bool {
        match self.leap.load_full() {
            Some(leap) => leap.unsubscribe(tag),
            None => false,
        }
    }

    /// Tags of the standing subscriptions installed at bootstrap.
    pub fn subscription_tags(&self) -> SubscriptionTags {
        self.subscription_tags.lock().clone()
    }

    /// Fold a message into the model catalog, returning the keys of the
    /// entities it touched.
    pub fn handle_response(&self, message: &Message) -> Vec<ModelKey> {
        self.models.write().handle_response(message)
    }

    /// Snapshot of one area.
    pub fn area(&self, id: u32) -> Option<Area> {
        self.models.read().area(id).cloned()
    }

    /// Snapshot of one device.
    pub fn device(&self, id: u32) -> Option<Device> {
        self.models.read().device(id).cloned()
    }

    /// Snapshot of one zone.
    pub fn zone(&self, id: u32) -> Option<Zone> {
        self.models.read().zone(id).cloned()
    }

    /// Snapshots of every area, ordered by id.
    pub fn areas(&self) -> Vec<Area> {
        self.models.read().areas().into_iter().cloned().collect()
    }

    /// Snapshots of every device, ordered by id.
    pub fn devices(&self) -> Vec<Device> {
        self.models.read().devices().into_iter().cloned().collect()
    }

    /// Snapshots of every zone, ordered by id.
    pub fn zones(&self) -> Vec<Zone> {
        self.models.read().zones().into_iter().cloned().collect()
    }

    /// Snapshots of the child areas of `id`.
    pub fn area_children(&self, id: u32) -> Vec<Area> {
        self.models
            .read()
            .area_children(id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Run a closure against the catalog without cloning. The store is
    /// read-locked for the duration; keep it short.
    pub fn with_models<R>(&self, f: impl FnOnce(&ModelStore) -> R) -> R {
        f(&self.models.read())
    }

    /// Close the session. Terminal: pending requests fail with
    /// [`LeapError::SessionDisconnected`] and the event loop exits instead
    /// of reconnecting.
    pub async fn close(&self) {
        self.should_reconnect.store(false, Ordering::Relaxed);
        if let Some(leap) = self.leap.load_full() {
            leap.close().await;
        }
        let _ = self.state_watch_tx.send(SessionState::Closed);
    }

    // Lifecycle plumbing used by the event loop.

    pub(crate) fn connector(&self) -> &dyn Connector {
        self.connector.as_ref()
    }

    pub(crate) fn should_reconnect(&self) -> bool {
        self.should_reconnect.load(Ordering::Relaxed)
    }

    pub(crate) fn set_leap(&self, leap: Option<Arc<LeapProtocol>>) {
        self.leap.store(leap);
    }

    /// Move to a new state unless the session was closed; `Closed` is
    /// terminal.
    pub(crate) fn transition(&self, state: SessionState) {
        self.state_watch_tx.send_if_modified(|current| {
            if *current == SessionState::Closed || *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }

    pub(crate) async fn login(&self, leap: &LeapProtocol) -> Result<(), LeapError> {
        session_debug!(self, "logging in");
        let response = leap
            .request(requests::login(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .await?;
        if !response.is_successful() {
            session_error!(self, "login rejected: {:?}", response.header.status_code);
            return Err(LeapError::response(response));
        }
        session_debug!(self, "login response: {:?}", response.header.status_code);
        Ok(())
    }

    /// Initial setup after login: install the standing subscriptions,
    /// enumerate devices and funnel everything else into the model
    /// catalog.
    pub(crate) async fn bootstrap(
        self: &Arc<Self>,
        leap: &Arc<LeapProtocol>,
    ) -> Result<(), LeapError> {
        let funnel = self.response_funnel();

        session_debug!(self, "subscribing to all zones");
        let (response, tag) = leap
            .subscribe(requests::subscribe_all_zones(), funnel.clone())
            .await?;
        self.subscription_tags.lock().zone = Some(tag);
        self.handle_response(&response);

        session_debug!(self, "subscribing to all areas");
        let (response, tag) = leap
            .subscribe(requests::subscribe_all_areas(), funnel.clone())
            .await?;
        self.subscription_tags.lock().area = Some(tag);
        self.handle_response(&response);

        session_debug!(self, "subscribing to occupancy groups");
        let (response, tag) = leap
            .subscribe(requests::subscribe_all_occupancy(), funnel.clone())
            .await?;
        self.subscription_tags.lock().occupancy = Some(tag);
        self.handle_response(&response);

        session_debug!(self, "querying processor information");
        let response = leap.request(requests::read_this_device()).await?;
        self.handle_response(&response);

        session_debug!(self, "querying other devices");
        let response = leap.request(requests::read_other_devices()).await?;
        self.handle_response(&response);

        // Everything the processor sends without a tag still feeds the
        // catalog.
        leap.subscribe_unsolicited(funnel);

        let response = leap.request(requests::read_client_setting()).await?;
        if let Some(MessageBody::ClientSetting(body)) = &response.body {
            session_debug!(self, "client setting: {:?}", body.client_setting);
        }

        Ok(())
    }

    fn response_funnel(self: &Arc<Self>) -> Arc<dyn MessageCallback> {
        Arc::new(ResponseFunnel {
            session: Arc::downgrade(self),
        })
    }

    // Convenience operations over the catalog.

    /// Current privilege level and configured LEAP version.
    pub async fn client_setting(&self) -> Result<Option<ClientSetting>, LeapError> {
        let response = self.request_checked(requests::read_client_setting()).await?;
        match response.body {
            Some(MessageBody::ClientSetting(body)) => Ok(Some(body.client_setting)),
            _ => {
                session_error!(self, "unexpected body for /clientsetting");
                Ok(None)
            }
        }
    }

    /// Identify every processor on the project.
    pub async fn processors(&self) -> Result<Vec<Processor>, LeapError> {
        let response = self.request_checked(requests::master_device_list()).await?;
        self.handle_response(&response);
        match &response.body {
            Some(MessageBody::MasterDeviceList(body)) => {
                Ok(Processor::from_master_device_list(&body.master_device_list))
            }
            _ => {
                session_error!(self, "unexpected body for master device list");
                Ok(Vec::new())
            }
        }
    }

    /// Reboot a processor.
    pub async fn reboot_processor(&self, device_id: u32) -> Result<(), LeapError> {
        self.request_checked(requests::reboot_device(device_id))
            .await?;
        Ok(())
    }

    /// Re-read one area's definition and return the updated snapshot.
    pub async fn refresh_area(&self, area_id: u32) -> Result<Option<Area>, LeapError> {
        let response = self.request_checked(requests::read_area(area_id)).await?;
        self.handle_response(&response);
        Ok(self.area(area_id))
    }

    /// Re-read one area's status and return the updated snapshot.
    pub async fn refresh_area_status(&self, area_id: u32) -> Result<Option<Area>, LeapError> {
        let response = self
            .request_checked(requests::read_area_status(area_id))
            .await?;
        self.handle_response(&response);
        Ok(self.area(area_id))
    }

    /// Enumerate the devices associated with one area.
    pub async fn area_devices(&self, area_id: u32) -> Result<Vec<Device>, LeapError> {
        let response = self
            .request_checked(requests::read_devices_in_area(area_id))
            .await?;
        let updated = self.handle_response(&response);
        Ok(updated
            .into_iter()
            .filter(|key| key.kind == ModelKind::Device)
            .filter_map(|key| self.device(key.id))
            .collect())
    }

    /// Enumerate the zones associated with one area, with definitions,
    /// through the expanded status read.
    pub async fn area_zones(&self, area_id: u32) -> Result<Vec<Zone>, LeapError> {
        let response = self
            .request_checked(requests::read_area_zones_expanded(area_id))
            .await?;
        let updated = self.handle_response(&response);
        Ok(updated
            .into_iter()
            .filter(|key| key.kind == ModelKind::Zone)
            .filter_map(|key| self.zone(key.id))
            .collect())
    }

    /// Re-read one zone's status and return the updated snapshot.
    pub async fn refresh_zone_status(&self, zone_id: u32) -> Result<Option<Zone>, LeapError> {
        let response = self
            .request_checked(requests::read_zone_status(zone_id))
            .await?;
        self.handle_response(&response);
        Ok(self.zone(zone_id))
    }

    /// Send an arbitrary command to a zone. State changes arrive through
    /// the zone status subscription, not the command response.
    pub async fn command_zone(
        &self,
        zone_id: u32,
        command: leap_types::command::Command,
    ) -> Result<(), LeapError> {
        self.request_checked(requests::zone_command(zone_id, command))
            .await?;
        Ok(())
    }

    /// Set a fan zone's speed.
    pub async fn set_fan_speed(&self, zone_id: u32, speed: FanSpeed) -> Result<(), LeapError> {
        self.request_checked(requests::go_to_fan_speed(zone_id, speed))
            .await?;
        Ok(())
    }

    /// Read back a fan zone's current speed.
    pub async fn fan_speed(&self, zone_id: u32) -> Result<Option<FanSpeed>, LeapError> {
        let zone = self.refresh_zone_status(zone_id).await?;
        Ok(zone.and_then(|zone| zone.fan_speed))
    }
}

struct ResponseFunnel {
    session: Weak<Session>,
}

#[async_trait]
impl MessageCallback for ResponseFunnel {
    async fn on_message(&self, message: Message) {
        if let Some(session) = self.session.upgrade() {
            session.handle_response(&message);
        }
    }
}
