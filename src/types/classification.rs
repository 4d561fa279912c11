//! Classifier output types.

use serde::{Deserialize, Serialize};

/// Score of one label for one input text.
///
/// `score` is a log-probability: always `<= 0`, more negative means less
/// likely. A ranking is a `Vec<Classification>` sorted best-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f64,
}

impl Classification {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Probability in `[0, 1]` recovered from the log score.
    ///
    /// Unnormalised: this is the joint probability of the label and the
    /// input tokens, not a posterior over labels.
    pub fn probability(&self) -> f64 {
        self.score.exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_of_log_zero_is_one() {
        assert_eq!(Classification::new("greeting", 0.0).probability(), 1.0);
    }

    #[test]
    fn probability_of_neg_infinity_is_zero() {
        assert_eq!(
            Classification::new("fallback", f64::NEG_INFINITY).probability(),
            0.0
        );
    }
}
