use anyhow::Result;
use async_trait::async_trait;
use campaign_pulse::core::errors::ConnectionError;
use campaign_pulse::core::traits::{Transport, TransportSession};
use campaign_pulse::core::types::ConnectionState;
use campaign_pulse::stream::{ConnectionManager, ConnectionOptions, ReplayTransport};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::common::test_helpers::update_frame;

/// Every session fails with a transport error as soon as it is read
#[derive(Default)]
struct BrokenTransport {
    opens: AtomicUsize,
}

struct BrokenSession;

/// Local wrapper so the foreign `Transport` trait can be implemented for a shared `BrokenTransport`
struct SharedBroken(Arc<BrokenTransport>);

#[async_trait]
impl Transport for SharedBroken {
    async fn open(&self, _endpoint: &str) -> Result<Box<dyn TransportSession>, ConnectionError> {
        self.0.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(BrokenSession))
    }
}

#[async_trait]
impl TransportSession for BrokenSession {
    async fn recv(&mut self) -> Option<Result<String, ConnectionError>> {
        Some(Err(ConnectionError::Transport {
            reason: "connection reset".to_string(),
        }))
    }

    async fn send(&mut self, _text: String) -> Result<(), ConnectionError> {
        Ok(())
    }

    async fn close(&mut self) {}
}

#[tokio::test(start_paused = true)]
async fn test_replay_fills_buffer_newest_first() -> Result<()> {
    let mut frames: Vec<String> = (0..12)
        .map(|n| update_frame(&format!("c{n}"), 10.0, 20.0))
        .collect();
    frames.insert(3, "{broken".to_string());
    frames.insert(5, r#"{"type":"echo","message":"Received: hi"}"#.to_string());

    let manager = ConnectionManager::new(
        "ws://localhost:8000/ws",
        ReplayTransport::from_lines(&frames.join("\n")),
        ConnectionOptions::default(),
    );
    let mut states = manager.watch_state();
    manager.connect();
    states
        .wait_for(|s| *s == ConnectionState::Reconnecting)
        .await?;
    manager.close().await;

    let updates = manager.updates().await;
    let ids: Vec<&str> = updates.iter().map(|u| u.record.campaign_id.as_str()).collect();
    assert_eq!(ids, vec!["c11", "c10", "c9", "c8", "c7", "c6", "c5", "c4", "c3", "c2"]);
    assert_eq!(updates[0].record.date, "2024-03-05");
    assert_eq!(manager.state(), ConnectionState::Disconnected);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_no_transition_after_close_following_error() -> Result<()> {
    let transport = Arc::new(BrokenTransport::default());
    let manager = ConnectionManager::new(
        "ws://localhost:8000/ws",
        SharedBroken(Arc::clone(&transport)),
        ConnectionOptions {
            reconnect_delay: Duration::from_secs(5),
            buffer_capacity: 10,
        },
    );

    let mut states = manager.watch_state();
    manager.connect();
    states
        .wait_for(|s| *s == ConnectionState::Reconnecting)
        .await?;
    manager.close().await;
    states.mark_unchanged();

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(!states.has_changed()?);
    assert_eq!(manager.state(), ConnectionState::Disconnected);
    assert_eq!(transport.opens.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reconnect_again_after_close_and_connect() -> Result<()> {
    let transport = Arc::new(BrokenTransport::default());
    let manager = ConnectionManager::new(
        "ws://localhost:8000/ws",
        SharedBroken(Arc::clone(&transport)),
        ConnectionOptions::default(),
    );

    let mut states = manager.watch_state();
    manager.connect();
    states
        .wait_for(|s| *s == ConnectionState::Reconnecting)
        .await?;
    manager.close().await;

    manager.connect();
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert_eq!(transport.opens.load(Ordering::SeqCst), 3);
    assert_eq!(manager.state(), ConnectionState::Reconnecting);
    Ok(())
}
