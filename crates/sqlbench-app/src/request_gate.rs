//! Request gates - explicit stale-response suppression
//!
//! Every asynchronous context (problem load, run, grade, actor lookup, movie
//! page, ...) owns a [`RequestGate`]. Issuing a request hands out a
//! [`RequestTicket`]; the completion message carries the ticket back and is
//! applied only if that ticket is still the latest one issued by the gate.
//!
//! The epoch part of a ticket ties it to one session lifetime. Reinitializing
//! a session (new problem id, remount) moves its gates to a fresh epoch, so
//! every ticket from the previous lifetime is rejected without bookkeeping.

use serde::Serialize;

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestTicket {
    epoch: u64,
    seq: u64,
}

impl RequestTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Latest-wins gate for one request context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestGate {
    epoch: u64,
    latest: u64,
}

impl RequestGate {
    pub fn new(epoch: u64) -> Self {
        Self { epoch, latest: 0 }
    }

    /// Issue a new ticket, superseding every earlier one
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket {
            epoch: self.epoch,
            seq: self.latest,
        }
    }

    /// True if `ticket` is the most recent one issued in the current epoch
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.epoch == self.epoch && ticket.seq == self.latest
    }

    /// Supersede any outstanding ticket without issuing a new one
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    /// Move to a new epoch; all earlier tickets become stale
    pub fn reset(&mut self, epoch: u64) {
        self.epoch = epoch;
        self.latest = 0;
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Monotonic source of session epochs.
///
/// Lives in `AppState`, so epochs are unique for the whole process.
#[derive(Debug, Clone, Default)]
pub struct EpochCounter {
    last: u64,
}

impl EpochCounter {
    pub fn next(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}
