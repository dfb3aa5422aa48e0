use std::sync::atomic::{AtomicU64, Ordering};

/// Shared request budget for count-boxed runs. Claims are atomic with
/// respect to other workers; the number of successful claims never exceeds
/// the cap, regardless of contention.
#[derive(Debug)]
pub(crate) struct RequestBudget {
    cap: u64,
    claimed: AtomicU64,
}

impl RequestBudget {
    pub(crate) const fn new(cap: u64) -> Self {
        Self {
            cap,
            claimed: AtomicU64::new(0),
        }
    }

    /// Claims one request slot. Returns `false` once the cap is reached;
    /// the caller must not issue a request it failed to claim.
    pub(crate) fn try_claim(&self) -> bool {
        loop {
            let current = self.claimed.load(Ordering::Relaxed);
            if current >= self.cap {
                return false;
            }
            let Some(next) = current.checked_add(1) else {
                return false;
            };
            if self
                .claimed
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return true;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn claimed(&self) -> u64 {
        self.claimed.load(Ordering::Relaxed)
    }
}
