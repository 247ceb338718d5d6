//! Request generation tokens.
//!
//! A view takes a [`Ticket`] before each fetch and applies the response only
//! if no newer fetch has started since.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request counter owned by one view.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: AtomicU64,
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, invalidating every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recently started request.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}
