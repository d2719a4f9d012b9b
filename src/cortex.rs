use crate::types::{CortexEvent, StreamKind};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors surfaced by a headset-communication client implementation.
#[derive(Debug, Error)]
pub enum CortexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event log parse error: {0}")]
    Parse(String),

    #[error("Client not connected")]
    NotConnected,
}

pub type CortexResult<T> = Result<T, CortexError>;

/// Contract for the external headset-communication collaborator.
///
/// Implementations own the entire connection lifecycle: device discovery,
/// authorization, session management, retry policy. This crate only drives
/// the subscribe flow and consumes the resulting [`CortexEvent`] stream.
///
/// `open` must deliver a `SessionCreated` event once the session is
/// established, followed by label and data events, all on the provided
/// channel. Events are consumed serially; no handler runs concurrently.
#[async_trait]
pub trait CortexClient: Send {
    /// Pick a specific headset before opening. Without this call the client
    /// selects the first available headset.
    async fn set_wanted_headset(&mut self, headset_id: &str) -> CortexResult<()>;

    /// Run the connect/authorize/create-session sequence and start
    /// delivering events on `events`.
    async fn open(&mut self, events: mpsc::Sender<CortexEvent>) -> CortexResult<()>;

    /// Subscribe to the given streams on the open session.
    async fn sub_request(&mut self, streams: &[StreamKind]) -> CortexResult<()>;

    /// Unsubscribe from the given streams.
    async fn unsub_request(&mut self, streams: &[StreamKind]) -> CortexResult<()>;

    /// Tear down the connection. Terminal.
    async fn close(&mut self) -> CortexResult<()>;
}
