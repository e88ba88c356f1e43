//! Request tickets
//!
//! Every fetch carries a ticket. Only the newest ticket issued for a target
//! may write its result back; anything older is stale and gets dropped.

use std::collections::HashMap;

use crate::domain::repository::RepoId;

/// What a request writes into when it completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    RepoList,
    Branches(RepoId),
    Commits(RepoId),
}

/// Handle identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    target: Target,
    seq: u64,
}

impl Ticket {
    pub fn target(&self) -> Target {
        self.target
    }
}

/// Tracks the newest outstanding ticket per target
#[derive(Debug, Default)]
pub struct TicketBook {
    next_seq: u64,
    outstanding: HashMap<Target, u64>,
}

impl TicketBook {
    /// Issues a ticket, superseding any outstanding one for the same target
    pub fn issue(&mut self, target: Target) -> Ticket {
        self.next_seq += 1;
        self.outstanding.insert(target, self.next_seq);
        Ticket {
            target,
            seq: self.next_seq,
        }
    }

    /// Whether a request for `target` is still waiting on its result
    pub fn in_flight(&self, target: Target) -> bool {
        self.outstanding.contains_key(&target)
    }

    /// Consumes the ticket if it is the newest one for its target
    ///
    /// Returns `false` for stale or already redeemed tickets.
    pub fn redeem(&mut self, ticket: Ticket) -> bool {
        match self.outstanding.get(&ticket.target) {
            Some(&seq) if seq == ticket.seq => {
                self.outstanding.remove(&ticket.target);
                true
            }
            _ => false,
        }
    }
}
