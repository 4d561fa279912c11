//! Multi-turn flow types.
//!
//! The brain is stateless between calls; these types belong to the caller
//! that tracks where a conversation is (see [`crate::flow::Conversation`]).

use serde::{Deserialize, Serialize};

/// Where a conversation currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// Free-form questions; every message goes through the brain.
    #[default]
    Idle,
    /// The next message is taken as the booking details.
    AwaitingBookingDetails,
    /// The next message is taken as a taste preference.
    AwaitingSommelierPreference,
}

/// Booking details captured from the message after a booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    /// The message as typed by the user.
    pub raw: String,
    /// First integer found in the message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u32>,
}

/// Outcome of one conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowTurn {
    /// Label that drove the turn. Flow-internal turns use the response
    /// bank they answered from (e.g. "booking.confirm").
    pub label: String,
    /// Text to show the user.
    pub reply: String,
    /// State after this turn.
    pub state: FlowState,
    /// Set on the turn that captured booking details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingDetails>,
}
