//! Live connection lifecycle.
//!
//! `ConnectionManager` owns at most one transport session and drives the
//! `Disconnected -> Connecting -> Connected -> Reconnecting -> Connecting`
//! state machine. Every transition goes through the state channel's lock
//! together with an attempt epoch: `connect()` and `close()` start a new
//! epoch, and a session task or reconnect timer from an older epoch can no
//! longer change the state. `close()` also aborts the pending timer by its
//! handle and waits for the live session to shut down, so no reconnect
//! fires and no update is buffered after an explicit close.

use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::StreamConfig;
use crate::core::constants::stream::{RECONNECT_DELAY, UPDATE_BUFFER_CAPACITY};
use crate::core::errors::ConnectionError;
use crate::core::traits::{Transport, TransportSession};
use crate::core::types::{ConnectionState, UpdateEvent};
use crate::stream::message::InboundMessage;
use crate::stream::update_buffer::UpdateBuffer;

const COMMAND_QUEUE_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&[UpdateEvent]) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub reconnect_delay: Duration,
    pub buffer_capacity: usize,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            reconnect_delay: RECONNECT_DELAY,
            buffer_capacity: UPDATE_BUFFER_CAPACITY,
        }
    }
}

impl From<&StreamConfig> for ConnectionOptions {
    fn from(config: &StreamConfig) -> Self {
        Self {
            reconnect_delay: config.reconnect_delay(),
            buffer_capacity: config.buffer_capacity,
        }
    }
}

enum Command {
    Send {
        text: String,
        reply: oneshot::Sender<Result<(), ConnectionError>>,
    },
    Close { done: oneshot::Sender<()> },
}

struct Inner<T> {
    endpoint: String,
    transport: T,
    options: ConnectionOptions,
    state: watch::Sender<ConnectionState>,
    /// Only modified while holding the `state` channel lock
    epoch: AtomicU64,
    session: Mutex<Option<(u64, mpsc::Sender<Command>)>>,
    reconnect_timer: Mutex<Option<(u64, JoinHandle<()>)>>,
    buffer: RwLock<UpdateBuffer>,
    last_message: RwLock<Option<InboundMessage>>,
    subscribers: RwLock<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

/// Cloneable handle to one streaming connection
pub struct ConnectionManager<T: Transport> {
    inner: Arc<Inner<T>>,
}

impl<T: Transport> Clone for ConnectionManager<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> ConnectionManager<T> {
    pub fn new(endpoint: impl Into<String>, transport: T, options: ConnectionOptions) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            inner: Arc::new(Inner {
                endpoint: endpoint.into(),
                transport,
                options,
                state,
                epoch: AtomicU64::new(0),
                session: Mutex::new(None),
                reconnect_timer: Mutex::new(None),
                buffer: RwLock::new(UpdateBuffer::new(options.buffer_capacity)),
                last_message: RwLock::new(None),
                subscribers: RwLock::new(Vec::new()),
                next_subscription: AtomicU64::new(1),
            }),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn state(&self) -> ConnectionState {
        *self.inner.state.borrow()
    }

    /// Receiver that observes every state transition
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state.subscribe()
    }

    /// Newest-first snapshot of the live update buffer
    pub async fn updates(&self) -> Vec<UpdateEvent> {
        self.inner.buffer.read().await.snapshot()
    }

    /// Last successfully parsed message of any type
    pub async fn last_message(&self) -> Option<InboundMessage> {
        self.inner.last_message.read().await.clone()
    }

    /// Register a callback that receives the buffer snapshot after every
    /// accepted update.
    pub async fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&[UpdateEvent]) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner
            .subscribers
            .write()
            .await
            .push((id, Box::new(callback)));
        id
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.inner.subscribers.write().await;
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    /// Start a connection attempt. Ignored while connecting or connected.
    pub fn connect(&self) {
        let Some(epoch) = self.begin_attempt(None) else {
            debug!("connect() ignored while {}", self.state());
            return;
        };
        self.cancel_reconnect();
        self.spawn_session(epoch);
    }

    /// Disconnect and cancel any pending reconnect.
    pub async fn close(&self) {
        self.inner.state.send_modify(|state| {
            self.inner.epoch.fetch_add(1, Ordering::SeqCst);
            *state = ConnectionState::Disconnected;
        });
        self.cancel_reconnect();

        let session = self
            .inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        // Frames already being applied finish before the buffer lock is
        // released; later ones see the new epoch and are dropped.
        drop(self.inner.buffer.write().await);

        if let Some((_, commands)) = session {
            let (done, closed) = oneshot::channel();
            // The session task may already be gone; nothing left to close then.
            if commands.send(Command::Close { done }).await.is_ok() {
                let _ = closed.await;
            }
        }
        info!("Connection to {} closed", self.inner.endpoint);
    }

    /// Serialize `message` as JSON and send it on the live session.
    pub async fn send<M: Serialize>(&self, message: &M) -> Result<(), ConnectionError> {
        let state = self.state();
        if state != ConnectionState::Connected {
            warn!("Cannot send message while {}", state);
            return Err(ConnectionError::NotConnected { state });
        }

        let text = serde_json::to_string(message).map_err(ConnectionError::Encode)?;
        let commands = self
            .inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, commands)| commands.clone())
            .ok_or(ConnectionError::NotConnected { state })?;

        let (reply, outcome) = oneshot::channel();
        commands
            .send(Command::Send { text, reply })
            .await
            .map_err(|_| ConnectionError::SessionGone)?;
        outcome.await.map_err(|_| ConnectionError::SessionGone)?
    }

    /// Move to `Connecting` under a fresh epoch.
    ///
    /// A user call is refused while an attempt is in flight; a timer call
    /// only proceeds if its epoch is still current and we are reconnecting.
    fn begin_attempt(&self, timer_epoch: Option<u64>) -> Option<u64> {
        let mut started = None;
        self.inner.state.send_if_modified(|state| {
            let allowed = match timer_epoch {
                None => !state.is_attempt_in_flight(),
                Some(epoch) => {
                    *state == ConnectionState::Reconnecting
                        && self.inner.epoch.load(Ordering::SeqCst) == epoch
                }
            };
            if !allowed {
                return false;
            }
            let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ConnectionState::Connecting;
            started = Some(epoch);
            true
        });
        started
    }

    /// Apply `next` only if `epoch` is still current.
    fn transition(&self, epoch: u64, next: ConnectionState) -> bool {
        self.inner.state.send_if_modified(|state| {
            if self.inner.epoch.load(Ordering::SeqCst) != epoch {
                return false;
            }
            *state = next;
            true
        })
    }

    fn cancel_reconnect(&self) {
        let pending = self
            .inner
            .reconnect_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some((epoch, handle)) = pending {
            debug!("Cancelling reconnect scheduled in epoch {}", epoch);
            handle.abort();
        }
    }

    fn schedule_reconnect(&self, epoch: u64) {
        let delay = self.inner.options.reconnect_delay;
        info!("Reconnecting to {} in {:?}", self.inner.endpoint, delay);

        let manager = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            manager.fire_reconnect(epoch);
        });

        let previous = self
            .inner
            .reconnect_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace((epoch, handle));
        if let Some((_, stale)) = previous {
            stale.abort();
        }
    }

    fn fire_reconnect(&self, epoch: u64) {
        {
            let mut slot = self
                .inner
                .reconnect_timer
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if slot.as_ref().is_some_and(|(owner, _)| *owner == epoch) {
                slot.take();
            }
        }

        match self.begin_attempt(Some(epoch)) {
            Some(next) => self.spawn_session(next),
            None => debug!("Stale reconnect timer from epoch {} ignored", epoch),
        }
    }

    fn spawn_session(&self, epoch: u64) {
        let manager = self.clone();
        tokio::spawn(async move { manager.run_session(epoch).await });
    }

    async fn run_session(self, epoch: u64) {
        debug!("Opening session to {} (epoch {})", self.inner.endpoint, epoch);
        let opened = self.inner.transport.open(&self.inner.endpoint).await;
        let mut session: Box<dyn TransportSession> = match opened {
            Ok(session) => session,
            Err(e) => {
                warn!("Connection attempt failed: {}", e);
                if self.transition(epoch, ConnectionState::Reconnecting) {
                    self.schedule_reconnect(epoch);
                }
                return;
            }
        };

        let (commands, mut inbox) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let installed = {
            let mut slot = self
                .inner
                .session
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            // Slot and state change together so `close()` either sees this
            // session or has already fenced it out.
            let current = self.transition(epoch, ConnectionState::Connected);
            if current {
                // Dropping a leftover sender ends that session's loop.
                slot.replace((epoch, commands));
            }
            current
        };
        if !installed {
            debug!("Session opened for a superseded attempt, closing it");
            session.close().await;
            return;
        }
        info!("Connected to {}", self.inner.endpoint);

        loop {
            tokio::select! {
                biased;

                command = inbox.recv() => match command {
                    Some(Command::Send { text, reply }) => {
                        let outcome = session.send(text).await;
                        if let Err(e) = &outcome {
                            warn!("Failed to send message: {}", e);
                        }
                        let _ = reply.send(outcome);
                    }
                    Some(Command::Close { done }) => {
                        session.close().await;
                        let _ = done.send(());
                        return;
                    }
                    None => {
                        session.close().await;
                        return;
                    }
                },
                inbound = session.recv() => match inbound {
                    Some(Ok(text)) => self.handle_message(epoch, &text).await,
                    Some(Err(e)) => {
                        warn!("Transport error: {}", e);
                        break;
                    }
                    None => {
                        info!("Connection closed by peer");
                        break;
                    }
                },
            }
        }

        self.release_session(epoch);
        if self.transition(epoch, ConnectionState::Reconnecting) {
            self.schedule_reconnect(epoch);
        }
    }

    fn release_session(&self, epoch: u64) {
        let mut slot = self
            .inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|(owner, _)| *owner == epoch) {
            slot.take();
        }
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.inner.epoch.load(Ordering::SeqCst) == epoch
    }

    /// Parse one inbound frame and apply it. Malformed input never touches
    /// the connection state, and frames from a superseded session are dropped.
    async fn handle_message(&self, epoch: u64, text: &str) {
        if !self.is_current(epoch) {
            debug!("Dropping frame from superseded session (epoch {})", epoch);
            return;
        }
        let message = match InboundMessage::parse(text) {
            Ok(message) => message,
            Err(e) => {
                warn!("Dropping inbound message: {}", e);
                return;
            }
        };
        *self.inner.last_message.write().await = Some(message.clone());

        if !message.is_performance_update() {
            debug!("Ignoring '{}' message", message.kind);
            return;
        }

        let record = match message.performance_record(Utc::now()) {
            Ok(record) => record,
            Err(e) => {
                warn!("Dropping performance update: {}", e);
                return;
            }
        };
        debug!(
            "Live update for campaign {} ({})",
            record.campaign_name, record.platform
        );

        let mut buffer = self.inner.buffer.write().await;
        if !self.is_current(epoch) {
            debug!("Connection closed before update for {} was applied", record.campaign_id);
            return;
        }
        buffer.push(record);
        let snapshot = buffer.snapshot();
        for (_, subscriber) in self.inner.subscribers.read().await.iter() {
            subscriber(&snapshot);
        }
    }
}
