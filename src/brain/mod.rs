//! Dialogue brain: classifier + knowledge base + response sampling.
//!
//! The brain is constructed once by the host and passed to whatever handles
//! chat messages. Initialisation (training) is lazy and happens at most
//! once; after that every [`Brain::process`] call is a pure
//! request/response with no conversation memory. Multi-turn flows live in
//! [`crate::flow`].
//!
//! Response selection draws from an injected RNG so tests can seed it.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::classifier::IntentClassifier;
use crate::knowledge::KnowledgeBase;
use crate::telemetry;
use crate::types::{BrainReply, Classification, FALLBACK_LABEL};

/// Intent classifier wrapped with canned responses.
pub struct Brain<R = StdRng> {
    classifier: IntentClassifier,
    knowledge: KnowledgeBase,
    initialized: bool,
    rng: R,
}

impl Brain<StdRng> {
    /// Create a brain whose response selection is seeded from OS entropy.
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self::with_rng(knowledge, StdRng::from_entropy())
    }

    /// Create a brain with reproducible response selection.
    pub fn seeded(knowledge: KnowledgeBase, seed: u64) -> Self {
        Self::with_rng(knowledge, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Brain<R> {
    /// Create a brain that samples responses with `rng`.
    pub fn with_rng(knowledge: KnowledgeBase, rng: R) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            knowledge,
            initialized: false,
            rng,
        }
    }

    /// Train the classifier on the knowledge base. Later calls are no-ops.
    pub fn init(&mut self) {
        if self.initialized {
            debug!("brain already initialized");
            return;
        }
        self.classifier.train(&self.knowledge.examples);
        self.initialized = true;
        metrics::counter!(telemetry::TRAINING_EXAMPLES_TOTAL)
            .increment(self.knowledge.examples.len() as u64);
        info!(
            examples = self.classifier.document_count(),
            labels = self.classifier.labels().count(),
            vocabulary = self.classifier.vocabulary_size(),
            "brain initialized"
        );
    }

    /// Whether [`Brain::init`] has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Answer one user message.
    ///
    /// Initialises on first use. Never fails: an empty ranking becomes the
    /// `"fallback"` label with score `-inf`, and a label without responses
    /// is answered from the fallback bank.
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    pub fn process(&mut self, text: &str) -> BrainReply {
        if !self.initialized {
            self.init();
        }

        let start = Instant::now();
        let top = self.classifier.top(text);
        metrics::histogram!(telemetry::CLASSIFY_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());

        let Some(Classification { label, score }) = top else {
            debug!(reason = "untrained", "serving fallback");
            return self.fallback_reply("untrained", FALLBACK_LABEL.to_string(), f64::NEG_INFINITY);
        };

        if !self
            .knowledge
            .responses(&label)
            .is_some_and(|bank| !bank.is_empty())
        {
            debug!(%label, reason = "no_responses", "serving fallback");
            return self.fallback_reply("no_responses", label, score);
        }

        if label == FALLBACK_LABEL {
            metrics::counter!(telemetry::FALLBACKS_TOTAL, "reason" => "classified").increment(1);
        }
        metrics::counter!(telemetry::MESSAGES_TOTAL, "label" => label.clone()).increment(1);
        debug!(%label, score, "classified message");

        let response = self.get_random_response(&label);
        BrainReply {
            label,
            response,
            score,
        }
    }

    /// Pick one response for `label` uniformly at random.
    ///
    /// Returns an empty string if the label has no bank or an empty one.
    pub fn get_random_response(&mut self, label: &str) -> String {
        self.knowledge
            .responses(label)
            .and_then(|bank| bank.choose(&mut self.rng))
            .cloned()
            .unwrap_or_default()
    }

    /// Rank labels for `text` without sampling a response.
    ///
    /// Does not initialise: an uninitialised brain returns an empty ranking.
    pub fn classify(&self, text: &str) -> Vec<Classification> {
        self.classifier.classify(text)
    }

    /// The underlying classifier.
    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// The knowledge base this brain answers from.
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    fn fallback_reply(&mut self, reason: &'static str, label: String, score: f64) -> BrainReply {
        metrics::counter!(telemetry::FALLBACKS_TOTAL, "reason" => reason).increment(1);
        metrics::counter!(telemetry::MESSAGES_TOTAL, "label" => label.clone()).increment(1);
        BrainReply {
            label,
            response: self.get_random_response(FALLBACK_LABEL),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrainingExample;
    use rand::rngs::mock::StepRng;
    use std::collections::HashMap;

    fn tiny_knowledge() -> KnowledgeBase {
        KnowledgeBase {
            examples: vec![
                TrainingExample::new("hola", "greeting"),
                TrainingExample::new("buenas", "greeting"),
                TrainingExample::new("chiste", "joke"),
                TrainingExample::new("asdf", "fallback"),
            ],
            responses: HashMap::from([
                (
                    "greeting".to_string(),
                    vec!["¡Hola!".to_string(), "¡Buenas!".to_string()],
                ),
                ("fallback".to_string(), vec!["No entendí.".to_string()]),
            ]),
            sommelier: Vec::new(),
        }
    }

    fn first_pick(knowledge: KnowledgeBase) -> Brain<StepRng> {
        Brain::with_rng(knowledge, StepRng::new(0, 0))
    }

    #[test]
    fn init_is_idempotent() {
        let mut brain = first_pick(tiny_knowledge());
        assert!(!brain.is_initialized());
        brain.init();
        brain.init();
        assert!(brain.is_initialized());
        assert_eq!(brain.classifier().document_count(), 4);
        assert_eq!(brain.classifier().class_count("greeting"), 2);
    }

    #[test]
    fn process_initializes_lazily() {
        let mut brain = first_pick(tiny_knowledge());
        let reply = brain.process("hola");
        assert!(brain.is_initialized());
        assert_eq!(reply.label, "greeting");
        assert_eq!(reply.response, "¡Hola!");
        assert!(reply.score < 0.0);
    }

    #[test]
    fn process_then_init_does_not_retrain() {
        let mut brain = first_pick(tiny_knowledge());
        brain.process("hola");
        brain.init();
        assert_eq!(brain.classifier().document_count(), 4);
    }

    #[test]
    fn label_without_responses_uses_fallback_bank() {
        let mut brain = first_pick(tiny_knowledge());
        let reply = brain.process("chiste");
        assert_eq!(reply.label, "joke");
        assert_eq!(reply.response, "No entendí.");
        assert!(reply.score.is_finite());
    }

    #[test]
    fn empty_knowledge_base_falls_back_with_neg_infinity() {
        let knowledge = KnowledgeBase {
            examples: Vec::new(),
            ..tiny_knowledge()
        };
        let mut brain = first_pick(knowledge);
        let reply = brain.process("hola");
        assert!(reply.is_fallback());
        assert_eq!(reply.response, "No entendí.");
        assert_eq!(reply.score, f64::NEG_INFINITY);
    }

    #[test]
    fn random_response_for_unknown_label_is_empty() {
        let mut brain = first_pick(tiny_knowledge());
        assert_eq!(brain.get_random_response("nope"), "");
    }

    #[test]
    fn random_response_comes_from_bank() {
        let mut brain = Brain::seeded(tiny_knowledge(), 7);
        for _ in 0..20 {
            let response = brain.get_random_response("greeting");
            assert!(response == "¡Hola!" || response == "¡Buenas!");
        }
    }

    #[test]
    fn same_seed_same_responses() {
        let mut a = Brain::seeded(tiny_knowledge(), 42);
        let mut b = Brain::seeded(tiny_knowledge(), 42);
        for _ in 0..10 {
            assert_eq!(a.process("hola"), b.process("hola"));
        }
    }

    #[test]
    fn classify_does_not_initialize() {
        let brain = first_pick(tiny_knowledge());
        assert!(brain.classify("hola").is_empty());
        assert!(!brain.is_initialized());
    }
}
