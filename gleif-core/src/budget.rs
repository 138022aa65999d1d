use std::sync::atomic::{AtomicU32, Ordering};

/// Counter bounding the number of enrichment sub-requests in one search call.
///
/// Shared by reference across every per-record enrichment. A unit is taken
/// before each sub-request is issued, whatever its outcome; once the counter
/// reaches zero no further sub-requests are made. The decrement is atomic, so
/// the check-then-take rule also holds if callers fan out.
#[derive(Debug)]
pub struct EnrichmentBudget {
    remaining: AtomicU32,
}

impl EnrichmentBudget {
    /// Budget allowing `units` sub-requests.
    #[must_use]
    pub const fn new(units: u32) -> Self {
        Self {
            remaining: AtomicU32::new(units),
        }
    }

    /// Take one unit. Returns `false`, taking nothing, when none remain.
    pub fn try_consume(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }

    /// Units left.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::Acquire)
    }

    /// True once every unit has been taken.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
