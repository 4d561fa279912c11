//! Multinomial Naive Bayes intent classifier.
//!
//! Bag-of-stems model with add-one (Laplace) smoothing over the whole
//! trained vocabulary. Training accumulates counts; classification is
//! read-only, so a trained classifier can be shared across threads and
//! queried concurrently. Training needs `&mut self` and therefore
//! exclusive access.
//!
//! # Scoring
//!
//! For each known label `L` and input stems `w1..wn`:
//!
//! ```text
//! score(L) = ln(docs(L) / docs)
//!          + Σ ln((count(L, wi) + 1) / (words(L) + |V|))
//! ```
//!
//! Repeated stems contribute once per occurrence. There is no confidence
//! threshold: callers always get the full ranking and decide what to do
//! with the top entry.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::tokenizer::analyze;
use crate::types::{Classification, TrainingExample};

/// Per-label counts.
#[derive(Debug, Clone)]
struct ClassStats {
    label: String,
    documents: usize,
    word_counts: HashMap<String, usize>,
    total_words: usize,
}

impl ClassStats {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            documents: 0,
            word_counts: HashMap::new(),
            total_words: 0,
        }
    }

    fn count(&self, stem: &str) -> usize {
        self.word_counts.get(stem).copied().unwrap_or(0)
    }
}

/// Naive Bayes classifier over stemmed tokens.
///
/// Labels are kept in first-seen order; that order breaks score ties.
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    classes: Vec<ClassStats>,
    index: HashMap<String, usize>,
    vocabulary: HashSet<String>,
    document_count: usize,
    vocabulary_size: usize,
}

impl IntentClassifier {
    /// Create an empty, untrained classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate counts from `examples`.
    ///
    /// Not idempotent: training twice on the same data doubles every count.
    /// Guard at a higher level (see [`crate::Brain::init`]) if that matters.
    pub fn train(&mut self, examples: &[TrainingExample]) {
        for example in examples {
            self.document_count += 1;
            let slot = match self.index.get(&example.label) {
                Some(&slot) => slot,
                None => {
                    self.classes.push(ClassStats::new(&example.label));
                    let slot = self.classes.len() - 1;
                    self.index.insert(example.label.clone(), slot);
                    slot
                }
            };
            let class = &mut self.classes[slot];
            class.documents += 1;
            for stem in analyze(&example.text) {
                class.total_words += 1;
                *class.word_counts.entry(stem.clone()).or_insert(0) += 1;
                self.vocabulary.insert(stem);
            }
        }
        self.vocabulary_size = self.vocabulary.len();
        debug!(
            examples = examples.len(),
            documents = self.document_count,
            labels = self.classes.len(),
            vocabulary = self.vocabulary_size,
            "classifier trained"
        );
    }

    /// Rank every known label for `text`, best first.
    ///
    /// Returns an empty ranking before any training. Input with no tokens
    /// is ranked by priors alone. Equal scores keep label insertion order.
    pub fn classify(&self, text: &str) -> Vec<Classification> {
        if self.classes.is_empty() {
            return Vec::new();
        }

        let stems = analyze(text);
        let documents = self.document_count as f64;
        let vocabulary = self.vocabulary_size as f64;

        let mut ranking: Vec<Classification> = self
            .classes
            .iter()
            .map(|class| {
                // Only zero when every example so far had no tokens.
                let denominator = (class.total_words as f64 + vocabulary).max(1.0);
                let mut score = (class.documents as f64 / documents).ln();
                for stem in &stems {
                    score += ((class.count(stem) + 1) as f64 / denominator).ln();
                }
                Classification::new(&class.label, score)
            })
            .collect();

        // Stable sort: ties stay in insertion order.
        ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranking
    }

    /// Best label for `text`, if the classifier has been trained.
    pub fn top(&self, text: &str) -> Option<Classification> {
        self.classify(text).into_iter().next()
    }

    /// Total number of training examples seen.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of distinct stems seen, as of the last `train` call.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Number of training examples seen for `label`.
    pub fn class_count(&self, label: &str) -> usize {
        self.index
            .get(label)
            .map(|&slot| self.classes[slot].documents)
            .unwrap_or(0)
    }

    /// Known labels in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.label.as_str())
    }

    /// Log prior `ln(docs(label) / docs)`, or `None` for an unknown label.
    pub fn prior(&self, label: &str) -> Option<f64> {
        let slot = *self.index.get(label)?;
        Some((self.classes[slot].documents as f64 / self.document_count as f64).ln())
    }

    /// True once at least one example has been trained.
    pub fn is_trained(&self) -> bool {
        self.document_count > 0
    }
}
