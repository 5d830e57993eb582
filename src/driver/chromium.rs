//! Chromium-based page driver using chromiumoxide.

use super::human::{self, HumanStep};
use super::{DriverError, DriverOptions, PageDriver, ResponseObserver};
use crate::crawler::extract_anchor_hrefs;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType,
};
use chromiumoxide::cdp::browser_protocol::network::{EnableParams, EventResponseReceived};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Page driver that renders pages in a real Chromium instance
///
/// Every `Network.responseReceived` event of the page, sub-resources
/// included, is forwarded to the response observer.
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
    /// CDP handler loop and response listener
    tasks: Vec<JoinHandle<()>>,
}

impl ChromiumDriver {
    /// Launches Chromium, opens a blank tab and starts forwarding responses
    pub async fn launch(
        options: &DriverOptions,
        observer: ResponseObserver,
    ) -> Result<Self, DriverError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(options.navigation_timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &options.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(DriverError::Launch)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
        });

        let error = match open_page(&browser, observer).await {
            Ok((page, listener_task)) => {
                tracing::info!(
                    "Chromium launched ({})",
                    if options.headless { "headless" } else { "visible" }
                );
                return Ok(Self {
                    browser,
                    page,
                    tasks: vec![handler_task, listener_task],
                });
            }
            Err(e) => e,
        };

        // Tab setup failed after the process started: shut it down again
        let _ = browser.close().await;
        handler_task.abort();
        Err(error)
    }
}

/// Opens the crawl tab and spawns the task forwarding its responses
async fn open_page(
    browser: &Browser,
    observer: ResponseObserver,
) -> Result<(Page, JoinHandle<()>), DriverError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| DriverError::Launch(format!("failed to open tab: {}", e)))?;

    page.execute(EnableParams::default())
        .await
        .map_err(|e| DriverError::Launch(format!("failed to enable network events: {}", e)))?;

    let mut responses = page
        .event_listener::<EventResponseReceived>()
        .await
        .map_err(|e| DriverError::Launch(format!("failed to listen for responses: {}", e)))?;

    let listener_task = tokio::spawn(async move {
        while let Some(event) = responses.next().await {
            match u16::try_from(event.response.status) {
                Ok(status) => observer.observe(event.response.url.clone(), status),
                Err(_) => tracing::debug!(
                    "Dropping response with status {} for {}",
                    event.response.status,
                    event.response.url
                ),
            }
        }
    });

    Ok((page, listener_task))
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(DriverError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(DriverError::Timeout {
                url: url.to_string(),
                timeout,
            }),
        }
    }

    async fn current_url(&self) -> Option<String> {
        self.page.url().await.ok().flatten()
    }

    async fn anchor_hrefs(&mut self) -> Result<Vec<String>, DriverError> {
        let html = self
            .page
            .content()
            .await
            .map_err(|e| DriverError::Extraction(e.to_string()))?;

        Ok(extract_anchor_hrefs(&html))
    }

    async fn simulate_human(&mut self) -> Result<(), DriverError> {
        for step in human::plan() {
            match step {
                HumanStep::MoveMouse { x, y } => {
                    let params =
                        DispatchMouseEventParams::new(DispatchMouseEventType::MouseMoved, x, y);
                    self.page
                        .execute(params)
                        .await
                        .map_err(|e| DriverError::Browser(e.to_string()))?;
                }
                HumanStep::Scroll(dy) => {
                    let script = format!("window.scrollBy(0, {})", dy);
                    self.page
                        .evaluate(script.as_str())
                        .await
                        .map_err(|e| DriverError::Browser(e.to_string()))?;
                }
                HumanStep::Pause(duration) => tokio::time::sleep(duration).await,
            }
        }

        Ok(())
    }

    async fn close(mut self: Box<Self>) -> Result<(), DriverError> {
        let result = self.browser.close().await;
        if result.is_ok() {
            if let Err(e) = self.browser.wait().await {
                tracing::debug!("Waiting for Chromium to exit failed: {}", e);
            }
        }

        // Aborting the listener drops its observer, closing the response channel
        for task in self.tasks.drain(..) {
            task.abort();
        }

        result
            .map(|_| ())
            .map_err(|e| DriverError::Browser(e.to_string()))
    }
}

impl Drop for ChromiumDriver {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
