//! Request/response channel to the host environment.
//!
//! The sync engine runs inside a sandbox that does not own the theme
//! definitions. Before a run it asks the host for them over a
//! [`MessageChannel`]; the host side answers through a [`HostEndpoint`].
//! Each request carries its own reply slot, so answers can never be paired
//! with the wrong request.
//!
//! This round trip is the only suspension point of a run. Everything after
//! it is synchronous.
//!
//! # Example
//!
//! ```rust
//! use tokensync::host::{channel, HostRequest, HostResponse};
//! use tokensync::ThemeDescriptor;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let (client, endpoint) = channel(4);
//! tokio::spawn(endpoint.serve(|request| match request {
//!     HostRequest::GetThemeInfo => Ok(HostResponse::ThemeInfo {
//!         themes: vec![ThemeDescriptor::new("t1", "light")],
//!     }),
//! }));
//!
//! let themes = client.theme_info().await.unwrap();
//! assert_eq!(themes[0].name, "light");
//! # });
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::theme::ThemeDescriptor;

/// A request to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostRequest {
    GetThemeInfo,
}

/// A host answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostResponse {
    ThemeInfo { themes: Vec<ThemeDescriptor> },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The endpoint was dropped or dropped the reply.
    #[error("host is not answering")]
    Unavailable,
    #[error("host failed: {0}")]
    Failed(String),
}

struct Envelope {
    request: HostRequest,
    reply: oneshot::Sender<Result<HostResponse, HostError>>,
}

/// Creates a connected client/endpoint pair.
///
/// `buffer` bounds the number of requests waiting for the endpoint.
pub fn channel(buffer: usize) -> (MessageChannel, HostEndpoint) {
    let (sender, receiver) = mpsc::channel(buffer);
    (MessageChannel { sender }, HostEndpoint { receiver })
}

/// The sandbox side: sends requests and awaits their answers.
#[derive(Debug, Clone)]
pub struct MessageChannel {
    sender: mpsc::Sender<Envelope>,
}

impl MessageChannel {
    /// Sends a request and waits for its answer.
    pub async fn message(&self, request: HostRequest) -> Result<HostResponse, HostError> {
        let (reply, answer) = oneshot::channel();
        self.sender
            .send(Envelope { request, reply })
            .await
            .map_err(|_| HostError::Unavailable)?;
        answer.await.map_err(|_| HostError::Unavailable)?
    }

    /// Fetches the theme definitions.
    pub async fn theme_info(&self) -> Result<Vec<ThemeDescriptor>, HostError> {
        match self.message(HostRequest::GetThemeInfo).await? {
            HostResponse::ThemeInfo { themes } => Ok(themes),
        }
    }
}

/// The host side: answers requests until every [`MessageChannel`] is gone.
pub struct HostEndpoint {
    receiver: mpsc::Receiver<Envelope>,
}

impl HostEndpoint {
    /// Answers requests with `handler` until the channel closes.
    pub async fn serve<F>(mut self, mut handler: F)
    where
        F: FnMut(HostRequest) -> Result<HostResponse, HostError>,
    {
        while let Some(Envelope { request, reply }) = self.receiver.recv().await {
            debug!(?request, "host request");
            // The requester may have stopped waiting.
            let _ = reply.send(handler(request));
        }
    }
}
