use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// A shared, monotonically increasing generation counter.
///
/// Each new alert session takes the next number; timers scheduled under an older number
/// find it no longer matches the installed session and drop themselves.
#[derive(Clone, Debug)]
pub struct Generation {
    value: Arc<AtomicU64>,
}

impl Default for Generation {
    fn default() -> Self {
        Self::new()
    }
}

impl Generation {
    pub fn new() -> Self {
        Self {
            value: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Issue the next number. Every number is handed out exactly once.
    pub fn advance(&self) -> u64 {
        self.value.fetch_add(1, Ordering::AcqRel) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_issues_increasing_numbers() {
        let generation = Generation::new();
        let first = generation.advance();
        let second = generation.advance();
        assert_eq!(first, 1);
        assert!(second > first);
    }

    #[test]
    fn test_clones_share_the_counter() {
        let generation = Generation::new();
        let clone = generation.clone();
        assert_eq!(clone.advance(), 1);
        assert_eq!(generation.advance(), 2);
    }
}
