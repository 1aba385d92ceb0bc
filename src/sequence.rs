use std::cell::Cell;

/// Monotonic sequence numbers for one kind of request.
///
/// Every request takes a number when it is issued. When it settles, its result
/// is applied only if no newer request of the same kind has already been applied.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next sequence number
    pub fn issue(&self) -> u64 {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        next
    }

    /// Mark `seq` as applied. Returns false when a newer result already won.
    pub fn try_apply(&self, seq: u64) -> bool {
        if seq < self.applied.get() {
            return false;
        }
        self.applied.set(seq);
        true
    }

    pub fn last_issued(&self) -> u64 {
        self.issued.get()
    }

    pub fn last_applied(&self) -> u64 {
        self.applied.get()
    }
}
