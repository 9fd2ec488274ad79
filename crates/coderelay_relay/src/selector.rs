// --- File: crates/coderelay_relay/src/selector.rs ---

use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("round robin needs at least one item")]
pub struct EmptyRotation;

/// Hands out items in a fixed cyclic order.
///
/// The cursor is advanced with a single atomic read-modify-write, so requests
/// racing each other still receive consecutive items and the cursor always
/// stays in `[0, len)`. There is no weighting and no health awareness: an item
/// that keeps failing still gets its turn.
#[derive(Debug)]
pub struct RoundRobin<T> {
    items: Vec<T>,
    cursor: AtomicUsize,
}

impl<T> RoundRobin<T> {
    pub fn new(items: Vec<T>) -> Result<Self, EmptyRotation> {
        if items.is_empty() {
            return Err(EmptyRotation);
        }
        Ok(Self {
            items,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Returns the item under the cursor and its position, then advances.
    pub fn next(&self) -> (usize, &T) {
        let len = self.items.len();
        let position = match self
            .cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| Some((c + 1) % len))
        {
            Ok(previous) | Err(previous) => previous,
        };
        (position, &self.items[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_empty_is_rejected() {
        assert_eq!(RoundRobin::<u8>::new(vec![]).unwrap_err(), EmptyRotation);
    }

    #[test]
    fn test_sequential_order_wraps() {
        let rr = RoundRobin::new(vec!["a", "b", "c"]).unwrap();
        let picked: Vec<_> = (0..7).map(|_| *rr.next().1).collect();
        assert_eq!(picked, vec!["a", "b", "c", "a", "b", "c", "a"]);
    }

    #[test]
    fn test_single_item_always_returned() {
        let rr = RoundRobin::new(vec![42]).unwrap();
        for _ in 0..5 {
            assert_eq!(rr.next(), (0, &42));
        }
    }

    #[test]
    fn test_concurrent_callers_share_turns_evenly() {
        let rr = Arc::new(RoundRobin::new(vec![0usize, 1, 2, 3]).unwrap());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let rr = rr.clone();
                std::thread::spawn(move || (0..1000).map(|_| rr.next().0).collect::<Vec<_>>())
            })
            .collect();

        let mut counts: HashMap<usize, usize> = HashMap::new();
        for handle in threads {
            for position in handle.join().unwrap() {
                *counts.entry(position).or_default() += 1;
            }
        }

        // 8000 picks over 4 items: an atomic cursor never repeats or skips.
        for position in 0..4 {
            assert_eq!(counts[&position], 2000);
        }
    }
}
