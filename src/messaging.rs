/// One-shot messages between the page context and the background coordinator
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::error::{ExtensionError, Result};

/// Request to open a foreground tab at `url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTabRequest {
    pub url: String,
}

/// Messages understood by the background coordinator.
/// Serialized as `{"action": "openNewTab", "url": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ExtensionMessage {
    #[serde(rename = "openNewTab")]
    OpenNewTab(OpenTabRequest),
}

/// Fire-and-forget delivery of a message. No reply is read.
pub trait MessageSink {
    fn send(&self, message: ExtensionMessage) -> Result<()>;
}

/// Opens browser tabs
#[allow(async_fn_in_trait)]
pub trait TabOpener {
    async fn open_tab(&self, url: &str) -> Result<()>;
}

/// Sending half of the in-process coordinator channel
#[derive(Debug, Clone)]
pub struct MessageSender {
    inner: UnboundedSender<ExtensionMessage>,
}

impl MessageSink for MessageSender {
    fn send(&self, message: ExtensionMessage) -> Result<()> {
        self.inner
            .unbounded_send(message)
            .map_err(|e| ExtensionError::Messaging(format!("Coordinator gone: {}", e)))
    }
}

/// Unbounded channel feeding a `BackgroundCoordinator`
pub fn channel() -> (MessageSender, UnboundedReceiver<ExtensionMessage>) {
    let (inner, receiver) = mpsc::unbounded();
    (MessageSender { inner }, receiver)
}

/// Background-side entry for raw runtime messages. Anything that is not an
/// `ExtensionMessage` is ignored. Accepted messages wait in the channel until
/// the coordinator polls, so nothing sent before it runs is lost.
#[derive(Debug, Clone)]
pub struct Inbox {
    sender: MessageSender,
}

impl Inbox {
    pub fn new(sender: MessageSender) -> Self {
        Inbox { sender }
    }

    /// Returns whether the message was queued for the coordinator
    pub fn accept(&self, raw: serde_json::Value) -> Result<bool> {
        match serde_json::from_value::<ExtensionMessage>(raw) {
            Ok(message) => self.sender.send(message).map(|_| true),
            Err(e) => {
                log::debug!("Ignoring message: {}", e);
                Ok(false)
            }
        }
    }
}

/// Drains open-tab requests and fulfils each one exactly once
pub struct BackgroundCoordinator<O: TabOpener> {
    opener: O,
    receiver: UnboundedReceiver<ExtensionMessage>,
}

impl<O: TabOpener> BackgroundCoordinator<O> {
    pub fn new(opener: O, receiver: UnboundedReceiver<ExtensionMessage>) -> Self {
        BackgroundCoordinator { opener, receiver }
    }

    /// Run until every sender is dropped. Returns the number of tabs opened.
    /// A failed open is logged and dropped; there are no retries.
    pub async fn run(mut self) -> usize {
        let mut opened = 0;

        while let Some(message) = self.receiver.next().await {
            match self.handle(message).await {
                Ok(()) => opened += 1,
                Err(e) => log::warn!("Dropping background request: {}", e),
            }
        }

        log::debug!("Background coordinator stopped after {} tab(s)", opened);
        opened
    }

    async fn handle(&self, message: ExtensionMessage) -> Result<()> {
        match message {
            ExtensionMessage::OpenNewTab(request) => {
                log::info!("Opening tab: {}", request.url);
                self.opener.open_tab(&request.url).await
            }
        }
    }
}
