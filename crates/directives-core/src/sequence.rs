//! Request sequencing for superseded completions.
//!
//! Editors fire a completion request on nearly every keystroke, and remote
//! lookups for an older prefix can finish after the lookup for a newer one.
//! Each request takes a ticket for its context (typically the document URI);
//! once a newer ticket has been issued for the same context, the older
//! result is stale and must be dropped instead of shown.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one in-flight request within a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    context: String,
    sequence: u64,
}

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Issues monotonically increasing tickets per context.
///
/// # Examples
///
/// ```
/// use directives_core::sequence::RequestSequencer;
///
/// let sequencer = RequestSequencer::new();
/// let first = sequencer.begin("file:///app.cs");
/// let second = sequencer.begin("file:///app.cs");
///
/// assert!(!sequencer.is_current(&first));
/// assert!(sequencer.is_current(&second));
/// ```
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: AtomicU64,
    latest: DashMap<String, u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket for `context`, superseding any earlier ticket.
    pub fn begin(&self, context: impl Into<String>) -> RequestTicket {
        let context = context.into();
        let sequence = self.next.fetch_add(1, Ordering::SeqCst) + 1;

        // Only move forward: a late `begin` racing with a newer one must not win.
        self.latest
            .entry(context.clone())
            .and_modify(|latest| *latest = (*latest).max(sequence))
            .or_insert(sequence);

        RequestTicket { context, sequence }
    }

    /// Returns `true` if no newer ticket has been issued for the ticket's context.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest
            .get(&ticket.context)
            .is_some_and(|latest| *latest == ticket.sequence)
    }

    /// Drops bookkeeping for `context`; outstanding tickets become stale.
    pub fn forget(&self, context: &str) {
        self.latest.remove(context);
    }
}
