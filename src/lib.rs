//! Bachu - intent classifier and dialogue brain for the brewery chat assistant
//!
//! Bachu answers short Spanish chat messages with canned replies. A
//! multinomial Naive Bayes classifier over crude Spanish stems picks an
//! intent label; the [`Brain`] samples a response for that label from the
//! knowledge base, falling back to a generic "didn't understand" answer
//! when nothing fits. Nothing here performs I/O on the message path and
//! nothing here fails: every input ends in a [`BrainReply`].
//!
//! # Example
//!
//! ```rust
//! use bachu::{Brain, KnowledgeBase};
//!
//! let mut brain = Brain::seeded(KnowledgeBase::embedded(), 42);
//! let reply = brain.process("quiero reservar una mesa");
//! assert_eq!(reply.label, "booking.request");
//! println!("{}", reply.response);
//! ```
//!
//! # Multi-turn flows
//!
//! The brain keeps no memory between messages. Hosts that want guided
//! exchanges (booking capture, sommelier recommendation) keep a
//! [`Conversation`] per chat session:
//!
//! ```rust
//! use bachu::{Brain, Conversation, FlowState, KnowledgeBase};
//!
//! let mut brain = Brain::seeded(KnowledgeBase::embedded(), 7);
//! let mut chat = Conversation::new();
//!
//! chat.handle(&mut brain, "recomiendame una cerveza");
//! assert_eq!(chat.state(), FlowState::AwaitingSommelierPreference);
//!
//! let turn = chat.handle(&mut brain, "algo amargo");
//! assert!(turn.reply.starts_with("IPA Muisca"));
//! assert_eq!(chat.state(), FlowState::Idle);
//! ```

pub mod brain;
pub mod classifier;
pub mod config;
pub mod error;
pub mod flow;
pub mod knowledge;
pub mod telemetry;
pub mod tokenizer;
pub mod types;
mod version;

// Re-export main types at crate root
pub use brain::Brain;
pub use classifier::IntentClassifier;
pub use config::Config;
pub use error::{BachuError, Result};
pub use flow::Conversation;
pub use knowledge::{KnowledgeBase, SommelierPick};
pub use version::{PKG_VERSION, version_string};

pub use types::{
    BookingDetails, BrainReply, Classification, FALLBACK_LABEL, FlowState, FlowTurn,
    TrainingExample,
};
