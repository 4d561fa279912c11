//! Brain reply type.

use serde::{Deserialize, Serialize};

/// Label served when nothing better applies. Its response bank is the
/// universal "didn't understand" answer.
pub const FALLBACK_LABEL: &str = "fallback";

/// What the brain answers for one user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainReply {
    /// Label chosen for the message.
    pub label: String,
    /// Response text sampled from the label's bank (or the fallback bank).
    pub response: String,
    /// Raw classifier score, kept for diagnostics. `-inf` when the
    /// classifier had nothing to rank.
    pub score: f64,
}

impl BrainReply {
    /// True if the reply was served for the fallback label.
    pub fn is_fallback(&self) -> bool {
        self.label == FALLBACK_LABEL
    }
}
