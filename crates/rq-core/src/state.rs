//! Queue occupancy state and the event alphabet.
//!
//! # Design
//!
//! The whole system state is the integer triple (queued males, queued
//! females, customers in service).  Events mutate it one at a time through
//! [`QueueState::apply`]; the batching policy (the *conductor*, defined in
//! `rq-sim`) then reshapes the post-event state.  The all-empty state is the
//! regeneration point: the process restarts statistically afresh every time
//! it returns there, which is what makes per-cycle observations i.i.d.

use std::fmt;

// ── Event ─────────────────────────────────────────────────────────────────────

/// One transition of the queueing system.
///
/// `BalkMale`/`BalkFemale` fire when an arrival clock wins the race while its
/// queue is at capacity: the customer is turned away and the occupancy does
/// not change, but the arrival clock is still consumed and redrawn — the
/// arrival *process* continues, only this customer is lost.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    ArrivalMale,
    ArrivalFemale,
    ServiceCompletion,
    BalkMale,
    BalkFemale,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Event::ArrivalMale       => "arrival(male)",
            Event::ArrivalFemale     => "arrival(female)",
            Event::ServiceCompletion => "served",
            Event::BalkMale          => "balk(male)",
            Event::BalkFemale        => "balk(female)",
        };
        f.write_str(name)
    }
}

// ── QueueState ────────────────────────────────────────────────────────────────

/// The occupancy triple `(queued_male, queued_female, in_service)`.
///
/// All components are non-negative by construction (`u32`).  `in_service` is
/// bounded by the batching policy's capacity, not by this type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueState {
    /// Males waiting in their queue.
    pub queued_male: u32,
    /// Females waiting in their queue.
    pub queued_female: u32,
    /// Customers currently being served as a batch.
    pub in_service: u32,
}

impl QueueState {
    /// The all-empty state — the regeneration point.
    pub const EMPTY: QueueState = QueueState {
        queued_male:   0,
        queued_female: 0,
        in_service:    0,
    };

    pub fn new(queued_male: u32, queued_female: u32, in_service: u32) -> Self {
        Self { queued_male, queued_female, in_service }
    }

    /// `true` iff both queues and the server are empty (regeneration point).
    #[inline]
    pub fn is_empty(self) -> bool {
        self.queued_male == 0 && self.queued_female == 0 && self.in_service == 0
    }

    /// Total customers present (queued + in service).
    #[inline]
    pub fn total(self) -> u32 {
        self.queued_male + self.queued_female + self.in_service
    }

    /// Apply one event to the occupancy counts.
    ///
    /// Balk events leave the state unchanged (informational only); service
    /// completions release one customer from the in-service batch.
    ///
    /// # Panics
    /// Debug builds panic on `ServiceCompletion` with an empty server — the
    /// clock bank never produces one, because the service clock is inactive
    /// whenever `in_service == 0`.
    #[must_use]
    pub fn apply(self, event: Event) -> QueueState {
        let mut next = self;
        match event {
            Event::ArrivalMale       => next.queued_male += 1,
            Event::ArrivalFemale     => next.queued_female += 1,
            Event::ServiceCompletion => next.in_service -= 1,
            Event::BalkMale | Event::BalkFemale => {}
        }
        next
    }
}

impl fmt::Display for QueueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.queued_male, self.queued_female, self.in_service
        )
    }
}
