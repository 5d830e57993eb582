/// Crawl phase definitions for the crawl controller
use std::fmt;

/// Represents the current phase of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Controller created, page driver not launched yet
    Idle,

    /// Page driver launched, navigation loop in progress
    Running,

    // ===== Loop Exit States =====
    /// Every discovered link has been visited
    Exhausted,

    /// The configured page budget has been spent
    PageBudgetReached,

    /// Tearing down: releasing the driver and writing the report
    Done,
}

impl CrawlPhase {
    /// Returns true if the navigation loop has stopped
    pub fn is_loop_exit(&self) -> bool {
        matches!(self, Self::Exhausted | Self::PageBudgetReached)
    }

    /// Returns true if a transition from this phase to `next` is allowed
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Exhausted)
                | (Self::Running, Self::PageBudgetReached)
                | (Self::Exhausted, Self::Done)
                | (Self::PageBudgetReached, Self::Done)
        )
    }

    /// Returns a short human-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Exhausted => "exhausted",
            Self::PageBudgetReached => "page_budget_reached",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
