//! Delayed Callbacks
//!
//! Timed waits scheduled against the host clock. Nothing here sleeps: the
//! host advances the queue by the frame delta and receives whatever fired.

/// Queue of payloads that fire after a delay in game-clock seconds.
///
/// Entries with equal due time fire in scheduling order.
#[derive(Debug, Clone)]
pub struct DelayedQueue<T> {
    /// Current clock time in seconds
    now: f64,
    /// Pending entries: (due time, sequence number, payload)
    pending: Vec<(f64, u64, T)>,
    next_seq: u64,
}

impl<T> Default for DelayedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DelayedQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `payload` to fire `delay` seconds from now.
    pub fn schedule(&mut self, delay: f32, payload: T) {
        let due = self.now + delay.max(0.0) as f64;
        self.pending.push((due, self.next_seq, payload));
        self.next_seq += 1;
    }

    /// Advance the clock and return every payload that became due.
    pub fn advance(&mut self, delta_seconds: f32) -> Vec<T> {
        self.now += delta_seconds.max(0.0) as f64;
        let now = self.now;

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].0 <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, payload)| payload).collect()
    }

    /// Drop every pending entry.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Seconds since the queue was created.
    pub fn now(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut queue = DelayedQueue::new();
        queue.schedule(0.25, "reset_jump");

        assert!(queue.advance(0.1).is_empty());
        assert!(queue.advance(0.1).is_empty());
        assert_eq!(queue.advance(0.1), vec!["reset_jump"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = DelayedQueue::new();
        queue.schedule(2.0, 2);
        queue.schedule(1.0, 1);
        queue.schedule(1.0, 3);

        assert_eq!(queue.advance(5.0), vec![1, 3, 2]);
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut queue = DelayedQueue::new();
        queue.schedule(0.0, ());
        assert_eq!(queue.advance(0.0).len(), 1);
    }
}
