use crate::core::errors::{ConnectionError, FetchError};
use crate::core::types::*;
use async_trait::async_trait;

/// Opens streaming sessions. Implemented by the network layer (websocket
/// client, test doubles, file replay).
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Open one session against `endpoint`
    async fn open(&self, endpoint: &str) -> Result<Box<dyn TransportSession>, ConnectionError>;
}

/// One live streaming session.
#[async_trait]
pub trait TransportSession: Send {
    /// Next inbound text frame; `None` once the peer has closed the session.
    ///
    /// Must be cancel safe: the connection manager polls it inside `select!`.
    async fn recv(&mut self) -> Option<Result<String, ConnectionError>>;

    /// Send one text frame
    async fn send(&mut self, text: String) -> Result<(), ConnectionError>;

    /// Close the session from our side
    async fn close(&mut self);
}

/// Historical campaign and performance data (the REST collaborator).
///
/// Implementations attach credentials themselves; an expired token surfaces
/// as [`FetchError::Unauthorized`] and is left for the auth layer to handle.
#[async_trait]
pub trait PerformanceSource: Send + Sync {
    /// `GET /campaigns?platform=`
    async fn campaigns(&self, platform: Option<Platform>) -> Result<Vec<Campaign>, FetchError>;

    /// `GET /campaigns/summary`
    async fn summary(&self) -> Result<Summary, FetchError>;

    /// `GET /performance?days=&campaign_id=`
    async fn performance(
        &self,
        query: &PerformanceQuery,
    ) -> Result<Vec<PerformanceRecord>, FetchError>;

    /// `POST /sync`
    async fn sync(&self) -> Result<SyncReport, FetchError>;
}
