//! Core domain types for Versefeed.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// VerseId
// ---------------------------------------------------------------------------

/// A verse identifier: a 1-based position within the reference corpus.
///
/// Valid identifiers lie in `[1, universe_size]`, where `universe_size` is a
/// deployment-time constant (see `UpstreamConfig`). The identifier is opaque
/// to the pipeline — it is only ever forwarded to upstream endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerseId(pub u32);

impl VerseId {
    /// The raw 1-based verse number.
    pub fn number(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for VerseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VerseId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}
