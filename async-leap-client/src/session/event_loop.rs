// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The session event loop: connect, authenticate, bootstrap, keep alive,
//! reconnect.

use std::sync::Arc;

use leap_core::LeapProtocol;
use leap_types::LeapError;

use crate::config::{PING_INTERVAL, RECONNECT_DELAY, REQUEST_TIMEOUT};
use crate::requests;
use crate::session::{session_debug, session_warn, Session, SessionState};

/// Drives a [`Session`]. Must be polled for anything to happen at all.
#[must_use = "the session event loop must be run for the session to work"]
pub struct SessionEventLoop {
    inner: Arc<Session>,
}

impl SessionEventLoop {
    pub(crate) fn new(inner: Arc<Session>) -> Self {
        Self { inner }
    }

    /// Run the event loop on a tokio task. The task ends when the session
    /// is closed.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::task::spawn(self.run())
    }

    /// Run the event loop until the session is closed. Each pass connects,
    /// logs in, bootstraps and services the connection; any failure or EOF
    /// leads back here after [`RECONNECT_DELAY`].
    pub async fn run(self) {
        loop {
            if !self.inner.should_reconnect() {
                break;
            }
            self.inner.transition(SessionState::Connecting);

            match self.monitor_once().await {
                Ok(()) => session_warn!(self.inner, "LEAP session ended, reconnecting"),
                Err(err) => session_warn!(self.inner, "LEAP session failed ({err}), reconnecting"),
            }

            if !self.inner.should_reconnect() {
                break;
            }
            self.inner.transition(SessionState::Reconnecting);
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
        session_debug!(self.inner, "event loop exiting");
    }

    /// One connection's lifetime: returns when the connection dies, with
    /// the error that killed it if it was not a clean EOF.
    async fn monitor_once(&self) -> Result<(), LeapError> {
        let session = &self.inner;

        session_debug!(session, "connecting to processor over TLS");
        let leap = Arc::new(session.connector().connect(session.config()).await?);
        session_debug!(session, "connected to processor");
        session.set_leap(Some(leap.clone()));

        // A close racing the connect may have missed the engine; it must
        // not be serviced in that case.
        let result = if session.should_reconnect() {
            self.drive(&leap).await
        } else {
            Err(LeapError::SessionDisconnected)
        };

        leap.close().await;
        session.set_leap(None);
        session.transition(SessionState::Disconnected);
        result
    }

    async fn drive(&self, leap: &Arc<LeapProtocol>) -> Result<(), LeapError> {
        let session = &self.inner;

        // The read loop services in-flight responses for the whole
        // connection; login and bootstrap race against it so a dead
        // connection fails them promptly.
        let run_fut = {
            let leap = leap.clone();
            async move { leap.run().await }
        };
        tokio::pin!(run_fut);

        session.transition(SessionState::Authenticating);
        tokio::select! {
            _ = &mut run_fut => return Err(LeapError::SessionDisconnected),
            result = session.login(leap) => result?,
        }

        session.transition(SessionState::Bootstrapping);
        tokio::select! {
            _ = &mut run_fut => return Err(LeapError::SessionDisconnected),
            result = session.bootstrap(leap) => result?,
        }

        session.transition(SessionState::Ready);
        session_debug!(session, "session ready");

        let mut ping_interval =
            tokio::time::interval_at(tokio::time::Instant::now() + PING_INTERVAL, PING_INTERVAL);
        ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = &mut run_fut => return Ok(()),
                _ = ping_interval.tick() => self.ping(leap).await,
            }
        }
    }

    /// Keepalive. Timeouts and failures close the engine, which ends the
    /// read loop and forces a reconnect.
    async fn ping(&self, leap: &LeapProtocol) {
        let session = &self.inner;
        match tokio::time::timeout(REQUEST_TIMEOUT, leap.request(requests::ping())).await {
            Ok(Ok(response)) => {
                session_debug!(session, "ping response: {:?}", response.header.status_code);
            }
            Ok(Err(err)) => {
                session_warn!(session, "ping failed ({err}), closing connection");
                leap.close().await;
            }
            Err(_) => {
                session_warn!(session, "ping was not answered, closing connection");
                leap.close().await;
            }
        }
    }
}
