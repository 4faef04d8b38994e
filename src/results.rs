use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One saved page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpRecord {
    /// Ordinal used for the file name
    pub index: u64,

    /// URL the page was loaded from
    pub url: String,

    /// File the markup was written to
    pub path: PathBuf,

    /// Link extracted from the page, if the listing continues
    pub next: Option<String>,
}

/// Why a walk ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The last page had no link to a following page
    Exhausted,
    /// The configured page limit was reached
    PageLimit,
    /// A shutdown was requested
    Shutdown,
}

/// Outcome of a walk that stopped cleanly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkSummary {
    pub reason: StopReason,

    /// Number of dump files written
    pub pages_saved: u64,

    /// Page cursor at the time the walk stopped
    pub cursor: String,

    /// Most recently saved page
    pub last: Option<DumpRecord>,
}
