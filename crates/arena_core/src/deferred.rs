//! Time-keyed queue of deferred actions
//!
//! Actions come back out in due order, ties in scheduling order. The queue
//! knows nothing about what an action refers to; actions that name a pooled
//! actor should carry its [`Handle`](crate::Handle) and be checked against
//! the pool when they fire.

/// An action waiting for its due time
#[derive(Debug, Clone)]
struct Scheduled<A> {
    due: f32,
    seq: u64,
    action: A,
}

/// Queue of actions keyed by simulation time
#[derive(Debug, Clone)]
pub struct DeferredQueue<A> {
    entries: Vec<Scheduled<A>>,
    next_seq: u64,
}

impl<A> DeferredQueue<A> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule an action for simulation time `due`
    pub fn schedule(&mut self, due: f32, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Scheduled { due, seq, action });
    }

    /// Remove and return every action due at or before `now`
    pub fn drain_due(&mut self, now: f32) -> Vec<A> {
        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.due <= now {
                due.push(entry);
            } else {
                pending.push(entry);
            }
        }
        self.entries = pending;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|entry| entry.action).collect()
    }

    /// Earliest due time among pending actions
    pub fn next_due(&self) -> Option<f32> {
        self.entries.iter().map(|e| e.due).min_by(|a, b| a.total_cmp(b))
    }

    /// Number of pending actions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending action
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<A> Default for DeferredQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_due_respects_time() {
        let mut queue = DeferredQueue::new();
        queue.schedule(1.0, "a");
        queue.schedule(0.5, "b");
        queue.schedule(2.0, "c");

        assert!(queue.drain_due(0.4).is_empty());
        assert_eq!(queue.drain_due(1.0), vec!["b", "a"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_due(), Some(2.0));
        assert_eq!(queue.drain_due(10.0), vec!["c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_keep_schedule_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(1.0, 1);
        queue.schedule(1.0, 2);
        queue.schedule(1.0, 3);
        assert_eq!(queue.drain_due(1.0), vec![1, 2, 3]);
    }
}
