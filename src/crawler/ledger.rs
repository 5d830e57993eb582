//! Request ledger for network responses observed by the page driver
//!
//! Page drivers report responses through a [`ResponseObserver`] while a page
//! is loading, independently of the navigation loop. Those events travel
//! over a channel to a single collector task that owns the ledger, so no
//! lock is shared with the crawl loop.
//!
//! [`ResponseObserver`]: crate::driver::ResponseObserver

use crate::driver::ResponseEvent;
use crate::url::{extract_host, ScopeSpec};
use crate::UrlError;
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use url::Url;

/// Last observed status per request URL, plus every host contacted
#[derive(Debug, Clone)]
pub struct RequestLedger {
    scope: ScopeSpec,

    /// In-scope request URL -> last observed HTTP status
    requests: HashMap<String, u16>,

    /// Every host seen in any response, in scope or not
    domains: HashSet<String>,
}

impl RequestLedger {
    /// Creates an empty ledger that keeps requests matching `scope`
    pub fn new(scope: ScopeSpec) -> Self {
        Self {
            scope,
            requests: HashMap::new(),
            domains: HashSet::new(),
        }
    }

    /// Records one observed response
    ///
    /// The host is always added to the domain set. The status is stored
    /// under the raw URL (fragment and all) only if the host is in scope;
    /// a repeated URL overwrites the previous status.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The event was recorded
    /// * `Err(UrlError)` - The URL could not be parsed or has no host
    pub fn record(&mut self, url: &str, status: u16) -> Result<(), UrlError> {
        let parsed = Url::parse(url).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;
        let host =
            extract_host(&parsed).ok_or_else(|| UrlError::MissingHost(url.to_string()))?;

        if self.scope.matches_host(&host) {
            self.requests.insert(url.to_string(), status);
        }
        self.domains.insert(host);

        Ok(())
    }

    /// Returns the in-scope requests
    pub fn requests(&self) -> &HashMap<String, u16> {
        &self.requests
    }

    /// Returns every host contacted
    pub fn domains(&self) -> &HashSet<String> {
        &self.domains
    }

    /// Consumes the ledger, returning the request map and the domain set
    pub fn into_parts(self) -> (HashMap<String, u16>, HashSet<String>) {
        (self.requests, self.domains)
    }
}

/// Spawns the task that owns the ledger and drains response events
///
/// The task finishes, yielding the ledger, once every sender for `events`
/// has been dropped. Events whose URL cannot be classified are dropped.
pub fn spawn_collector(
    scope: ScopeSpec,
    mut events: UnboundedReceiver<ResponseEvent>,
) -> JoinHandle<RequestLedger> {
    tokio::spawn(async move {
        let mut ledger = RequestLedger::new(scope);

        while let Some(event) = events.recv().await {
            if let Err(e) = ledger.record(&event.url, event.status) {
                tracing::debug!("Dropping response event: {}", e);
                continue;
            }
            tracing::trace!("Response {} {}", event.status, event.url);
        }

        ledger
    })
}
