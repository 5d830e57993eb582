//! Page driver abstraction
//!
//! The crawl controller never talks to a browser directly. It launches a
//! [`PageDriver`] through a [`DriverLauncher`] and asks it to navigate,
//! report the current URL, list anchors and optionally imitate a human.
//! Network responses flow back separately through a [`ResponseObserver`].
//!
//! Two drivers ship with the crate:
//! - [`ChromiumDriver`] renders pages in Chromium and reports every
//!   sub-request the page makes
//! - [`HttpDriver`] fetches documents with a plain HTTP client and reports
//!   only the document requests and their redirects

mod chromium;
mod http;
mod human;

pub use chromium::ChromiumDriver;
pub use http::{build_http_client, HttpDriver};
pub use human::HumanStep;

use crate::config::DriverKind;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Errors raised by page drivers
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Failed to launch driver: {0}")]
    Launch(String),

    #[error("Navigation to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Failed to extract anchors: {0}")]
    Extraction(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

/// A network response seen by the page driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEvent {
    /// The request URL as reported by the driver
    pub url: String,

    /// The HTTP status code
    pub status: u16,
}

/// Sending half of the response side channel
///
/// Cloneable; the channel closes once every clone has been dropped.
#[derive(Debug, Clone)]
pub struct ResponseObserver {
    tx: UnboundedSender<ResponseEvent>,
}

impl ResponseObserver {
    /// Creates an observer and the receiver that drains it
    pub fn channel() -> (Self, UnboundedReceiver<ResponseEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Reports one response
    ///
    /// Events sent after the receiver is gone are silently discarded.
    pub fn observe(&self, url: impl Into<String>, status: u16) {
        let event = ResponseEvent {
            url: url.into(),
            status,
        };
        if self.tx.send(event).is_err() {
            tracing::trace!("Response observer closed, event discarded");
        }
    }
}

/// Options every driver is launched with
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Run without a visible window
    pub headless: bool,

    /// Explicit browser executable; located automatically when None
    pub chrome_path: Option<PathBuf>,

    /// Upper bound for a single navigation
    pub navigation_timeout: Duration,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            navigation_timeout: Duration::from_secs(10),
        }
    }
}

/// A single browsing context the crawl controller steers
#[async_trait]
pub trait PageDriver: Send {
    /// Navigates to `url`, giving up after `timeout`
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), DriverError>;

    /// Returns the URL of the loaded document, after redirects
    async fn current_url(&self) -> Option<String>;

    /// Returns the raw `href` of every anchor on the current page
    async fn anchor_hrefs(&mut self) -> Result<Vec<String>, DriverError>;

    /// Moves the mouse, scrolls and pauses like a person reading the page
    async fn simulate_human(&mut self) -> Result<(), DriverError>;

    /// Releases every resource held by the driver
    ///
    /// After this returns, the driver holds no [`ResponseObserver`] clone.
    async fn close(self: Box<Self>) -> Result<(), DriverError>;
}

/// Creates page drivers
#[async_trait]
pub trait DriverLauncher: Send + Sync {
    /// Launches a driver that reports responses to `observer`
    async fn launch(
        &self,
        options: &DriverOptions,
        observer: ResponseObserver,
    ) -> Result<Box<dyn PageDriver>, DriverError>;
}

/// Launches the driver selected in configuration
#[derive(Debug, Clone, Copy)]
pub struct DefaultLauncher {
    kind: DriverKind,
}

impl DefaultLauncher {
    pub fn new(kind: DriverKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl DriverLauncher for DefaultLauncher {
    async fn launch(
        &self,
        options: &DriverOptions,
        observer: ResponseObserver,
    ) -> Result<Box<dyn PageDriver>, DriverError> {
        match self.kind {
            DriverKind::Chromium => {
                let driver = ChromiumDriver::launch(options, observer).await?;
                Ok(Box::new(driver))
            }
            DriverKind::Http => {
                let driver = HttpDriver::launch(options, observer)?;
                Ok(Box::new(driver))
            }
        }
    }
}
