//! Knowledge base: what the brain learns from and what it answers with.
//!
//! A knowledge base bundles three things:
//! 1. **Training examples**: labeled utterances for the classifier
//! 2. **Response bank**: label → response templates, including the
//!    mandatory `"fallback"` bank
//! 3. **Sommelier picks**: beers the sommelier flow can recommend
//!
//! The default knowledge base is compiled into the binary
//! ([`KnowledgeBase::embedded`]). Hosts may load a replacement from a JSON
//! file with the same shape ([`KnowledgeBase::load`]).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{FALLBACK_LABEL, TrainingExample};
use crate::{BachuError, Result};

/// A beer the sommelier flow can recommend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SommelierPick {
    pub name: String,
    /// Taste words that point at this beer. Matched after stemming.
    pub keywords: Vec<String>,
    pub description: String,
}

/// Training data, response bank and sommelier picks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub examples: Vec<TrainingExample>,
    pub responses: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub sommelier: Vec<SommelierPick>,
}

/// Raw JSON knowledge base compiled into the binary.
const EMBEDDED_SEED: &str = include_str!("seed.json");

impl KnowledgeBase {
    /// The compiled-in brewery knowledge base.
    ///
    /// The seed is covered by tests; if it ever failed to parse, the
    /// result is an empty knowledge base and every message falls back.
    pub fn embedded() -> Self {
        match serde_json::from_str::<Self>(EMBEDDED_SEED) {
            Ok(kb) => kb,
            Err(e) => {
                tracing::error!(error = %e, "failed to parse embedded knowledge base");
                Self::default()
            }
        }
    }

    /// Parse and validate a knowledge base from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let kb: Self = serde_json::from_str(json)?;
        kb.validate()?;
        Ok(kb)
    }

    /// Read, parse and validate a knowledge base file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| BachuError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let kb = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            examples = kb.examples.len(),
            "loaded knowledge base"
        );
        Ok(kb)
    }

    /// Check that this knowledge base can drive a brain.
    ///
    /// Rejects an empty example set, examples with a blank label, and a
    /// missing or empty fallback bank.
    pub fn validate(&self) -> Result<()> {
        if self.examples.is_empty() {
            return Err(BachuError::InvalidKnowledgeBase(
                "no training examples".to_string(),
            ));
        }
        if let Some(pos) = self.examples.iter().position(|e| e.label.trim().is_empty()) {
            return Err(BachuError::InvalidKnowledgeBase(format!(
                "example {pos} ({:?}) has an empty label",
                self.examples[pos].text
            )));
        }
        if self.responses(FALLBACK_LABEL).is_none_or(|bank| bank.is_empty()) {
            return Err(BachuError::InvalidKnowledgeBase(format!(
                "missing \"{FALLBACK_LABEL}\" responses"
            )));
        }
        Ok(())
    }

    /// Response templates for `label`, if the bank has an entry.
    pub fn responses(&self, label: &str) -> Option<&[String]> {
        self.responses.get(label).map(Vec::as_slice)
    }

    /// Distinct trained labels in first-seen order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for example in &self.examples {
            if !labels.contains(&example.label.as_str()) {
                labels.push(&example.label);
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_seed_parses_and_validates() {
        let kb = serde_json::from_str::<KnowledgeBase>(EMBEDDED_SEED).unwrap();
        kb.validate().unwrap();
        assert_eq!(kb, KnowledgeBase::embedded());
    }

    #[test]
    fn embedded_seed_shape() {
        let kb = KnowledgeBase::embedded();
        assert_eq!(kb.examples.len(), 99);
        assert_eq!(kb.labels().len(), 17);
        assert_eq!(kb.labels()[0], "greeting");
        assert_eq!(kb.responses("booking.request").unwrap().len(), 2);
        assert_eq!(kb.sommelier.len(), 4);
    }

    #[test]
    fn every_trained_label_has_responses() {
        let kb = KnowledgeBase::embedded();
        for label in kb.labels() {
            let bank = kb.responses(label);
            assert!(
                bank.is_some_and(|b| !b.is_empty()),
                "label {label} has no responses"
            );
        }
    }

    #[test]
    fn from_json_requires_fallback_bank() {
        let json = r#"{
            "examples": [{ "text": "hola", "label": "greeting" }],
            "responses": { "greeting": ["¡Hola!"] }
        }"#;
        let err = KnowledgeBase::from_json(json).unwrap_err();
        assert!(matches!(err, BachuError::InvalidKnowledgeBase(_)));
        assert!(err.to_string().contains("fallback"));
    }

    #[test]
    fn from_json_rejects_empty_fallback_bank() {
        let json = r#"{
            "examples": [{ "text": "hola", "label": "greeting" }],
            "responses": { "fallback": [] }
        }"#;
        assert!(matches!(
            KnowledgeBase::from_json(json),
            Err(BachuError::InvalidKnowledgeBase(_))
        ));
    }

    #[test]
    fn from_json_rejects_no_examples() {
        let json = r#"{ "examples": [], "responses": { "fallback": ["?"] } }"#;
        let err = KnowledgeBase::from_json(json).unwrap_err();
        assert!(err.to_string().contains("no training examples"));
    }

    #[test]
    fn from_json_rejects_blank_label() {
        let json = r#"{
            "examples": [{ "text": "hola", "label": "  " }],
            "responses": { "fallback": ["?"] }
        }"#;
        let err = KnowledgeBase::from_json(json).unwrap_err();
        assert!(err.to_string().contains("empty label"));
    }

    #[test]
    fn from_json_reports_syntax_errors() {
        assert!(matches!(
            KnowledgeBase::from_json("{ not json"),
            Err(BachuError::Json(_))
        ));
    }

    #[test]
    fn sommelier_section_is_optional() {
        let json = r#"{
            "examples": [{ "text": "hola", "label": "greeting" }],
            "responses": { "fallback": ["?"] }
        }"#;
        let kb = KnowledgeBase::from_json(json).unwrap();
        assert!(kb.sommelier.is_empty());
    }

    #[test]
    fn labels_are_distinct_in_first_seen_order() {
        let kb = KnowledgeBase {
            examples: vec![
                TrainingExample::new("a", "x"),
                TrainingExample::new("b", "y"),
                TrainingExample::new("c", "x"),
            ],
            ..Default::default()
        };
        assert_eq!(kb.labels(), vec!["x", "y"]);
    }
}
