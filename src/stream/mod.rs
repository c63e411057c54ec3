//! Live performance stream: connection lifecycle, message decoding and
//! the recent-update buffer.

pub mod connection_manager;
pub mod message;
pub mod replay;
pub mod update_buffer;

pub use connection_manager::{ConnectionManager, ConnectionOptions, SubscriptionId};
pub use message::InboundMessage;
pub use replay::ReplayTransport;
pub use update_buffer::UpdateBuffer;
