//! Public types for the Bachu API.

mod classification;
mod example;
mod flow;
mod reply;

pub use classification::Classification;
pub use example::TrainingExample;
pub use flow::{BookingDetails, FlowState, FlowTurn};
pub use reply::{BrainReply, FALLBACK_LABEL};
