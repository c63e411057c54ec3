use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use crate::core::errors::ConnectionError;
use crate::core::traits::{Transport, TransportSession};

/// Transport that plays back recorded frames, one per line.
///
/// The first session yields every non-blank line and then reports the peer
/// as closed. Later attempts to open fail, so a replay is never repeated.
pub struct ReplayTransport {
    frames: Mutex<Option<VecDeque<String>>>,
}

impl ReplayTransport {
    pub fn from_lines(content: &str) -> Self {
        let frames = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            frames: Mutex::new(Some(frames)),
        }
    }
}

#[async_trait]
impl Transport for ReplayTransport {
    async fn open(&self, endpoint: &str) -> Result<Box<dyn TransportSession>, ConnectionError> {
        let frames = self
            .frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| ConnectionError::Open {
                endpoint: endpoint.to_string(),
                reason: "replay already consumed".to_string(),
            })?;
        debug!("Replaying {} frames as {}", frames.len(), endpoint);
        Ok(Box::new(ReplaySession { frames }))
    }
}

struct ReplaySession {
    frames: VecDeque<String>,
}

#[async_trait]
impl TransportSession for ReplaySession {
    async fn recv(&mut self) -> Option<Result<String, ConnectionError>> {
        self.frames.pop_front().map(Ok)
    }

    async fn send(&mut self, text: String) -> Result<(), ConnectionError> {
        debug!("Replay session discarding outbound frame: {}", text);
        Ok(())
    }

    async fn close(&mut self) {
        self.frames.clear();
    }
}
