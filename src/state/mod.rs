//! State module for tracking crawl progress
//!
//! The crawl controller moves through a small state machine:
//!
//! ```text
//! Idle -> Running -> { Exhausted | PageBudgetReached } -> Done
//! ```
//!
//! `Exhausted` and `PageBudgetReached` record why the navigation loop
//! stopped. `Done` is entered as soon as the loop exits and covers the
//! teardown: releasing the driver and writing the report.

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
