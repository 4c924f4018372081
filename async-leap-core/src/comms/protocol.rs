// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The protocol engine.
//!
//! [`LeapProtocol`] owns the two halves of an established (usually TLS)
//! stream. It correlates request frames with their responses through the
//! header `ClientTag`, delivers pushes for promoted subscription tags to
//! their callbacks, and broadcasts untagged frames to unsolicited
//! listeners. Frames are dispatched strictly in arrival order; subscription
//! callbacks are awaited before the next frame is read, so the peer is the
//! sole source of backpressure.

use std::sync::Arc;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use hashbrown::HashMap;
use log::{debug, error};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::oneshot;
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use leap_types::{CommuniqueType, LeapError, Message};

use super::codec::LeapCodec;

type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// A callback invoked with subscription pushes or unsolicited frames.
#[async_trait]
pub trait MessageCallback: Send + Sync {
    /// Handle one inbound frame. Runs on the read loop; the next frame is
    /// not read until this returns.
    async fn on_message(&self, message: Message);
}

/// Adapter turning an async closure into a [`MessageCallback`].
pub struct FnCallback<F>(pub F);

#[async_trait]
impl<F, Fut> MessageCallback for FnCallback<F>
where
    F: Fn(Message) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = ()> + Send,
{
    async fn on_message(&self, message: Message) {
        (self.0)(message).await
    }
}

#[derive(Default)]
struct Dispatch {
    in_flight: HashMap<String, oneshot::Sender<Message>>,
    subscriptions: HashMap<String, Arc<dyn MessageCallback>>,
    unsolicited: Vec<Arc<dyn MessageCallback>>,
}

enum Target {
    InFlight(oneshot::Sender<Message>),
    Subscription(Arc<dyn MessageCallback>),
    Nobody,
}

/// A wrapper for making LEAP calls over an established stream.
///
/// One instance exists per connection; the session replaces it on
/// reconnect. [`LeapProtocol::run`] must be polled for anything inbound to
/// happen at all.
pub struct LeapProtocol {
    reader: tokio::sync::Mutex<FramedRead<BoxedReader, LeapCodec>>,
    writer: tokio::sync::Mutex<FramedWrite<BoxedWriter, LeapCodec>>,
    dispatch: parking_lot::Mutex<Dispatch>,
    closed: CancellationToken,
}

fn make_tag() -> String {
    Uuid::new_v4().to_string()
}

/// Set the header tag if the caller left it empty, returning the effective
/// tag.
fn ensure_tag(message: &mut Message) -> String {
    match &message.header.client_tag {
        Some(tag) => tag.clone(),
        None => {
            let tag = make_tag();
            message.header.client_tag = Some(tag.clone());
            tag
        }
    }
}

// Removes the in-flight slot when a request future is dropped before its
// response arrives, so a cancelled wait does not leak the tag.
struct TagGuard<'a> {
    protocol: &'a LeapProtocol,
    tag: &'a str,
}

impl Drop for TagGuard<'_> {
    fn drop(&mut self) {
        self.protocol.dispatch.lock().in_flight.remove(self.tag);
    }
}

impl LeapProtocol {
    /// Wrap the two halves of an established stream.
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            reader: tokio::sync::Mutex::new(FramedRead::new(
                Box::new(read) as BoxedReader,
                LeapCodec::new(),
            )),
            writer: tokio::sync::Mutex::new(FramedWrite::new(
                Box::new(write) as BoxedWriter,
                LeapCodec::new(),
            )),
            dispatch: parking_lot::Mutex::new(Dispatch::default()),
            closed: CancellationToken::new(),
        }
    }

    /// Make a request and wait for the correlated response.
    ///
    /// A `ClientTag` is generated when the message has none. Fails with
    /// [`LeapError::SessionDisconnected`] if the stream closes while the
    /// response is outstanding.
    pub async fn request(&self, mut message: Message) -> Result<Message, LeapError> {
        let tag = ensure_tag(&mut message);

        let (sender, receiver) = oneshot::channel();
        if self
            .dispatch
            .lock()
            .in_flight
            .insert(tag.clone(), sender)
            .is_some()
        {
            debug!("tag {tag} reused while outstanding, previous waiter dropped");
        }
        let _guard = TagGuard {
            protocol: self,
            tag: &tag,
        };

        self.send(message).await?;
        receiver.await.map_err(|_| LeapError::SessionDisconnected)
    }

    /// Subscribe to events from the peer.
    ///
    /// This is a [`LeapProtocol::request`] whose tag, on a successful
    /// response, is promoted to a persistent subscription: later frames
    /// carrying the same tag are delivered to `callback`. An unsuccessful
    /// response leaves no registration. Returns the initial response and
    /// the tag usable with [`LeapProtocol::unsubscribe`].
    pub async fn subscribe(
        &self,
        mut message: Message,
        callback: Arc<dyn MessageCallback>,
    ) -> Result<(Message, String), LeapError> {
        if message.communique_type != CommuniqueType::SubscribeRequest {
            return Err(LeapError::Validation(
                "subscribe requires a SubscribeRequest communique".to_string(),
            ));
        }

        let tag = ensure_tag(&mut message);
        let url = message.header.url.clone();

        let response = self.request(message).await?;

        if response.is_successful() {
            self.dispatch
                .lock()
                .subscriptions
                .insert(tag.clone(), callback);
            debug!("subscribed to {url} as {tag}");
        } else {
            error!("subscription to {url} failed");
        }

        Ok((response, tag))
    }

    /// Drop a tagged subscription. Returns whether one was registered.
    pub fn unsubscribe(&self, tag: &str) -> bool {
        self.dispatch.lock().subscriptions.remove(tag).is_some()
    }

    /// Register a callback for frames that carry no tag.
    pub fn subscribe_unsolicited(&self, callback: Arc<dyn MessageCallback>) {
        self.dispatch.lock().unsolicited.push(callback);
    }

    /// Remove a previously registered unsolicited callback.
    pub fn unsubscribe_unsolicited(&self, callback: &Arc<dyn MessageCallback>) {
        self.dispatch
            .lock()
            .unsolicited
            .retain(|existing| !Arc::ptr_eq(existing, callback));
    }

    async fn send(&self, message: Message) -> Result<(), LeapError> {
        let mut writer = self.writer.lock().await;
        if self.closed.is_cancelled() {
            return Err(LeapError::SessionDisconnected);
        }
        debug!("sending {}", message.header.url);
        writer
            .send(message)
            .await
            .map_err(|_| LeapError::SessionDisconnected)
    }

    /// The read loop. Returns when the peer closes the stream, the stream
    /// errors, or [`LeapProtocol::close`] is called.
    pub async fn run(&self) {
        let mut reader = self.reader.lock().await;
        debug!("entering read loop");
        loop {
            tokio::select! {
                _ = self.closed.cancelled() => break,
                frame = reader.next() => match frame {
                    Some(Ok(message)) => self.dispatch_message(message).await,
                    Some(Err(err)) => {
                        debug!("read loop ending: {err}");
                        break;
                    }
                    None => break,
                },
            }
        }
    }

    async fn dispatch_message(&self, message: Message) {
        let Some(tag) = message.header.client_tag.clone() else {
            // Untagged frames go to every unsolicited listener in order.
            let handlers: Vec<_> = self.dispatch.lock().unsolicited.clone();
            debug!("received untagged message for {}", message.header.url);
            for handler in handlers {
                handler.on_message(message.clone()).await;
            }
            return;
        };

        let target = {
            let mut dispatch = self.dispatch.lock();
            if let Some(sender) = dispatch.in_flight.remove(&tag) {
                Target::InFlight(sender)
            } else if let Some(callback) = dispatch.subscriptions.get(&tag) {
                Target::Subscription(callback.clone())
            } else {
                Target::Nobody
            }
        };

        match target {
            Target::InFlight(sender) => {
                if sender.send(message).is_err() {
                    debug!("response for cancelled request {tag} dropped");
                }
            }
            Target::Subscription(callback) => callback.on_message(message).await,
            Target::Nobody => error!("was not expecting message with tag {tag}"),
        }
    }

    /// Disconnect. Every pending request future resolves with
    /// [`LeapError::SessionDisconnected`] and both dispatch maps are
    /// cleared.
    pub async fn close(&self) {
        self.closed.cancel();
        {
            let mut dispatch = self.dispatch.lock();
            // Dropping the senders wakes the waiting request futures.
            dispatch.in_flight.clear();
            dispatch.subscriptions.clear();
        }
        let mut writer = self.writer.lock().await;
        let _ = writer.close().await;
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.dispatch.lock().in_flight.len()
    }
}
