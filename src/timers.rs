//! One-shot scheduled events.
//!
//! Abilities schedule delayed actions (cooldowns, recharges, effect ends)
//! against a clock they are handed each tick. Pending events are never
//! cancelled; guards on the ability state keep overlapping triggers apart.

/// Pending `(due time, event)` pairs, drained once per tick.
///
/// Kept sorted by due time; events due at the same time stay in scheduling
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvents<E> {
    pending: Vec<(f32, E)>,
}

impl<E> Default for ScheduledEvents<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E> ScheduledEvents<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire `delay` seconds after `now`.
    pub fn schedule(&mut self, now: f32, delay: f32, event: E) {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        let due = now + delay;
        let index = self.pending.partition_point(|(at, _)| *at <= due);
        self.pending.insert(index, (due, event));
    }

    /// Remove and return every event due at or before `now`, earliest first.
    ///
    /// Returns an empty, unallocated `Vec` when nothing is due.
    pub fn drain_due(&mut self, now: f32) -> Vec<E> {
        let split = self.pending.partition_point(|(at, _)| *at <= now);
        if split == 0 {
            return Vec::new();
        }
        self.pending.drain(..split).map(|(_, event)| event).collect()
    }

    /// Drop every pending event for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&E) -> bool) {
        self.pending.retain(|(_, event)| keep(event));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending event.
    pub fn next_due(&self) -> Option<f32> {
        self.pending.first().map(|(at, _)| *at)
    }
}
