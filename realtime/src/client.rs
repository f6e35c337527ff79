/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::fmt;
use std::sync::{Arc, Mutex};

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;

use crate::reconnect::ReconnectPolicy;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Lifecycle and payload events delivered to subscribers. Payloads are
/// opaque text; decoding them is the consumer's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketEvent {
    Connected,
    Disconnected,
    Error(String),
    Message(String),
}

#[derive(Debug, Clone)]
pub enum RealtimeError {
    Connection(String),
}

impl fmt::Display for RealtimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RealtimeError::Connection(msg) => write!(f, "Socket connection failed: {}", msg),
        }
    }
}

impl std::error::Error for RealtimeError {}

type EventObserver = Box<dyn Fn(&SocketEvent) + Send + Sync>;

/// Connection state shared with the spawned reader task.
struct Channel {
    url: String,
    policy: ReconnectPolicy,
    observers: Mutex<Vec<EventObserver>>,
}

impl Channel {
    fn emit(&self, event: &SocketEvent) {
        let observers = self.observers.lock().expect("observer lock");
        for observer in observers.iter() {
            observer(event);
        }
    }

    async fn dial(&self) -> Result<WsStream, RealtimeError> {
        let (stream, _response) = connect_async(self.url.as_str())
            .await
            .map_err(|err| RealtimeError::Connection(err.to_string()))?;

        tracing::info!(url = %self.url, "event socket connected");
        Ok(stream)
    }

    async fn run(self: Arc<Self>, mut stream: WsStream, cancel: CancellationToken) {
        loop {
            match self.read_until_closed(&mut stream, &cancel).await {
                ReaderExit::Cancelled => {
                    self.emit(&SocketEvent::Disconnected);
                    return;
                }
                ReaderExit::ConnectionLost => {
                    self.emit(&SocketEvent::Disconnected);

                    match self.reconnect(&cancel).await {
                        Some(next) => {
                            stream = next;
                            self.emit(&SocketEvent::Connected);
                        }
                        None => return,
                    }
                }
            }
        }
    }

    async fn read_until_closed(
        &self,
        stream: &mut WsStream,
        cancel: &CancellationToken,
    ) -> ReaderExit {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return ReaderExit::Cancelled,
                frame = stream.next() => match frame {
                    Some(Ok(Message::Text(text))) => self.emit(&SocketEvent::Message(text)),
                    Some(Ok(Message::Close(_))) | None => return ReaderExit::ConnectionLost,
                    // Binary and control frames carry nothing for us.
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        self.emit(&SocketEvent::Error(err.to_string()));
                        return ReaderExit::ConnectionLost;
                    }
                },
            }
        }
    }

    /// Bounded fixed-delay redial. Returns `None` once the retry budget
    /// is spent or the channel was cancelled; the exhausted case is
    /// reported to subscribers as a [`SocketEvent::Error`].
    async fn reconnect(&self, cancel: &CancellationToken) -> Option<WsStream> {
        let mut attempts_made = 0;

        while self.policy.should_retry(attempts_made) {
            tokio::select! {
                _ = cancel.cancelled() => return None,
                _ = tokio::time::sleep(self.policy.delay) => {}
            }

            attempts_made += 1;
            tracing::info!(
                url = %self.url,
                attempt = attempts_made,
                max_attempts = self.policy.max_attempts,
                "reconnecting event socket",
            );

            match self.dial().await {
                Ok(stream) => return Some(stream),
                Err(err) => {
                    tracing::warn!(url = %self.url, error = %err, "reconnect attempt failed");
                }
            }
        }

        self.emit(&SocketEvent::Error(format!(
            "gave up after {} reconnect attempts",
            self.policy.max_attempts
        )));
        None
    }
}

enum ReaderExit {
    Cancelled,
    ConnectionLost,
}

/// Client for the live-update socket. Construction does not dial out;
/// the channel stays down until [`connect`](Self::connect) is called.
/// After a drop the connection is retried per the [`ReconnectPolicy`],
/// then the client goes quiet until the next explicit `connect()`.
pub struct RealtimeClient {
    channel: Arc<Channel>,
    cancel: Mutex<Option<CancellationToken>>,
}

impl RealtimeClient {
    pub fn new(url: impl Into<String>) -> Self {
        RealtimeClient::with_policy(url, ReconnectPolicy::default())
    }

    pub fn with_policy(url: impl Into<String>, policy: ReconnectPolicy) -> Self {
        RealtimeClient {
            channel: Arc::new(Channel {
                url: url.into(),
                policy,
                observers: Mutex::new(Vec::new()),
            }),
            cancel: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.channel.url
    }

    /// Registers an observer for socket events. Observers run on the
    /// reader task.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&SocketEvent) + Send + Sync + 'static,
    {
        self.channel
            .observers
            .lock()
            .expect("observer lock")
            .push(Box::new(observer));
    }

    /// Establishes the connection and spawns the reader task. A prior
    /// connection held by this client is shut down first.
    pub async fn connect(&self) -> Result<(), RealtimeError> {
        let stream = self.channel.dial().await?;

        let cancel = CancellationToken::new();
        if let Some(previous) = self
            .cancel
            .lock()
            .expect("cancel lock")
            .replace(cancel.clone())
        {
            previous.cancel();
        }

        self.channel.emit(&SocketEvent::Connected);
        tokio::spawn(Arc::clone(&self.channel).run(stream, cancel));

        Ok(())
    }

    /// Shuts the channel down. No reconnection is attempted after an
    /// explicit disconnect.
    pub fn disconnect(&self) {
        if let Some(cancel) = self.cancel.lock().expect("cancel lock").take() {
            cancel.cancel();
        }
    }
}
