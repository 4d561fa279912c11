//! Caller-owned multi-turn conversation flow.
//!
//! The brain answers each message in isolation. A chat host that wants
//! short guided exchanges (capture booking details, ask a taste preference
//! before recommending a beer) keeps a [`Conversation`] per chat session and
//! feeds every message through it.
//!
//! ```text
//!                 booking.request               any message
//!   Idle ─────────────────────────▶ AwaitingBookingDetails ───────▶ Idle
//!    │                                   (farewell cancels)
//!    │ sommelier.request                       any message
//!    └──────────────────────▶ AwaitingSommelierPreference ─────────▶ Idle
//! ```

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::brain::Brain;
use crate::knowledge::SommelierPick;
use crate::tokenizer::{analyze, stem};
use crate::types::{BookingDetails, FALLBACK_LABEL, FlowState, FlowTurn};

/// Label that opens the booking flow.
pub const BOOKING_REQUEST: &str = "booking.request";
/// Label that opens the sommelier flow.
pub const SOMMELIER_REQUEST: &str = "sommelier.request";
/// Label that cancels a pending booking.
pub const FAREWELL: &str = "farewell";

/// Response bank used to confirm a booking. `{details}` is replaced with
/// the captured message.
pub const BOOKING_CONFIRM: &str = "booking.confirm";
/// Response bank used when a pending booking is cancelled.
pub const BOOKING_CANCELLED: &str = "booking.cancelled";
/// Label reported when the sommelier recommends a beer.
pub const SOMMELIER_PICK: &str = "sommelier.pick";
/// Response bank used when no taste keyword matched.
pub const SOMMELIER_UNKNOWN: &str = "sommelier.unknown";

/// Conversation state for one chat session.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    state: FlowState,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Drop any pending flow and go back to [`FlowState::Idle`].
    pub fn reset(&mut self) {
        self.state = FlowState::Idle;
    }

    /// Handle one user message and advance the flow.
    pub fn handle<R: Rng>(&mut self, brain: &mut Brain<R>, text: &str) -> FlowTurn {
        let turn = match self.state {
            FlowState::Idle => self.idle(brain, text),
            FlowState::AwaitingBookingDetails => self.booking_details(brain, text),
            FlowState::AwaitingSommelierPreference => self.sommelier_preference(brain, text),
        };
        debug!(label = %turn.label, state = ?turn.state, "conversation turn");
        turn
    }

    fn idle<R: Rng>(&mut self, brain: &mut Brain<R>, text: &str) -> FlowTurn {
        let reply = brain.process(text);
        self.state = match reply.label.as_str() {
            BOOKING_REQUEST => FlowState::AwaitingBookingDetails,
            SOMMELIER_REQUEST => FlowState::AwaitingSommelierPreference,
            _ => FlowState::Idle,
        };
        FlowTurn {
            label: reply.label,
            reply: reply.response,
            state: self.state,
            booking: None,
        }
    }

    fn booking_details<R: Rng>(&mut self, brain: &mut Brain<R>, text: &str) -> FlowTurn {
        self.state = FlowState::Idle;

        brain.init();
        let cancelled = brain
            .classifier()
            .top(text)
            .is_some_and(|top| top.label == FAREWELL);
        if cancelled {
            return FlowTurn {
                label: BOOKING_CANCELLED.to_string(),
                reply: flow_response(brain, BOOKING_CANCELLED),
                state: self.state,
                booking: None,
            };
        }

        let raw = text.trim().to_string();
        let reply = flow_response(brain, BOOKING_CONFIRM).replace("{details}", &raw);
        FlowTurn {
            label: BOOKING_CONFIRM.to_string(),
            reply,
            state: self.state,
            booking: Some(BookingDetails {
                party_size: first_number(&raw),
                raw,
            }),
        }
    }

    fn sommelier_preference<R: Rng>(&mut self, brain: &mut Brain<R>, text: &str) -> FlowTurn {
        self.state = FlowState::Idle;

        let pick = recommend(&brain.knowledge().sommelier, text)
            .map(|pick| format!("{}: {}", pick.name, pick.description));
        let (label, reply) = match pick {
            Some(reply) => (SOMMELIER_PICK, reply),
            None => (SOMMELIER_UNKNOWN, flow_response(brain, SOMMELIER_UNKNOWN)),
        };
        FlowTurn {
            label: label.to_string(),
            reply,
            state: self.state,
            booking: None,
        }
    }
}

/// Random response from `label`'s bank, or from the fallback bank if the
/// knowledge base has nothing for it.
fn flow_response<R: Rng>(brain: &mut Brain<R>, label: &str) -> String {
    let response = brain.get_random_response(label);
    if response.is_empty() {
        brain.get_random_response(FALLBACK_LABEL)
    } else {
        response
    }
}

/// Pick with the most keyword hits in `text`; first pick wins ties.
fn recommend<'a>(picks: &'a [SommelierPick], text: &str) -> Option<&'a SommelierPick> {
    let stems: HashSet<String> = analyze(text).into_iter().collect();
    let mut best: Option<(&SommelierPick, usize)> = None;
    for pick in picks {
        let hits = pick
            .keywords
            .iter()
            .filter(|keyword| stems.contains(&stem(&keyword.to_lowercase())))
            .count();
        if hits > 0 && best.is_none_or(|(_, most)| hits > most) {
            best = Some((pick, hits));
        }
    }
    best.map(|(pick, _)| pick)
}

/// First run of ASCII digits in `text`, if it fits a `u32`.
fn first_number(text: &str) -> Option<u32> {
    text.split(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .and_then(|run| run.parse().ok())
}
