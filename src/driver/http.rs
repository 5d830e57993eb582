//! Browserless page driver backed by reqwest
//!
//! This driver fetches documents without executing scripts or loading
//! sub-resources. It follows redirects by hand so that every hop shows up
//! as a response event, the way a browser would report them.

use super::{DriverError, DriverOptions, PageDriver, ResponseObserver};
use crate::crawler::extract_anchor_hrefs;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{redirect::Policy, Client};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed for one navigation
const MAX_REDIRECTS: usize = 10;

/// User agent sent with every request
const USER_AGENT: &str = concat!("sumi-drift/", env!("CARGO_PKG_VERSION"));

/// The document loaded by the last successful navigation
#[derive(Debug)]
struct LoadedPage {
    /// Final URL after redirects
    url: String,

    /// Body, if the response was HTML
    body: Option<String>,
}

/// Page driver that fetches documents over plain HTTP
pub struct HttpDriver {
    client: Client,
    observer: ResponseObserver,
    current: Option<LoadedPage>,
}

impl HttpDriver {
    /// Builds the HTTP client and returns a ready driver
    pub fn launch(options: &DriverOptions, observer: ResponseObserver) -> Result<Self, DriverError> {
        let client = build_http_client(options.navigation_timeout)
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        tracing::debug!("HTTP driver ready (user agent {})", USER_AGENT);

        Ok(Self {
            client,
            observer,
            current: None,
        })
    }

    /// Fetches `url`, following redirects and reporting every hop
    async fn fetch(&self, url: &str) -> Result<LoadedPage, DriverError> {
        let mut current = Url::parse(url).map_err(|e| DriverError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let mut seen = HashSet::new();

        for _ in 0..=MAX_REDIRECTS {
            if !seen.insert(current.to_string()) {
                return Err(DriverError::Navigation {
                    url: url.to_string(),
                    message: format!("redirect loop at {}", current),
                });
            }

            let response = self
                .client
                .get(current.clone())
                .send()
                .await
                .map_err(|e| classify_error(url, e))?;

            let status = response.status();
            self.observer.observe(current.as_str(), status.as_u16());

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);

                if let Some(location) = location {
                    current = current.join(&location).map_err(|e| DriverError::Navigation {
                        url: url.to_string(),
                        message: format!("bad redirect target {:?}: {}", location, e),
                    })?;
                    continue;
                }
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_ascii_lowercase();

            let body = if is_html(&content_type) {
                let text = response.text().await.map_err(|e| DriverError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
                Some(text)
            } else {
                tracing::debug!("{} is {}, not parsing", current, content_type);
                None
            };

            return Ok(LoadedPage {
                url: current.to_string(),
                body,
            });
        }

        Err(DriverError::Navigation {
            url: url.to_string(),
            message: format!("more than {} redirects", MAX_REDIRECTS),
        })
    }
}

#[async_trait]
impl PageDriver for HttpDriver {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        self.current = None;

        match tokio::time::timeout(timeout, self.fetch(url)).await {
            Ok(Ok(page)) => {
                self.current = Some(page);
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(DriverError::Timeout {
                url: url.to_string(),
                timeout,
            }),
        }
    }

    async fn current_url(&self) -> Option<String> {
        self.current.as_ref().map(|page| page.url.clone())
    }

    async fn anchor_hrefs(&mut self) -> Result<Vec<String>, DriverError> {
        match &self.current {
            Some(LoadedPage {
                body: Some(body), ..
            }) => Ok(extract_anchor_hrefs(body)),
            Some(_) => Ok(Vec::new()),
            None => Err(DriverError::Extraction("no page loaded".to_string())),
        }
    }

    async fn simulate_human(&mut self) -> Result<(), DriverError> {
        tracing::debug!("HTTP driver has no pointer or viewport, skipping human simulation");
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Builds the HTTP client used by the driver
///
/// Redirects are disabled on the client so the driver can report each hop.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true for content types worth parsing for anchors
///
/// A missing content type is treated as HTML, as browsers sniff it.
fn is_html(content_type: &str) -> bool {
    content_type.is_empty()
        || content_type.contains("text/html")
        || content_type.contains("application/xhtml+xml")
}

/// Maps a transport error to a driver error
fn classify_error(url: &str, e: reqwest::Error) -> DriverError {
    let message = if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        "connection refused".to_string()
    } else {
        e.to_string()
    };

    DriverError::Navigation {
        url: url.to_string(),
        message,
    }
}
