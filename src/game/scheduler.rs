//! # Scheduler
//!
//! A single-threaded timer queue on a virtual clock.
//!
//! The engine has two fixed suspensions: the settle delay after an accepted
//! move and the display delay after death or victory. Both are scheduled here
//! and fire when the presentation layer advances the clock. Timers carry the
//! epoch of the level attempt that scheduled them; the owner drops any timer
//! whose epoch no longer matches.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Identifier returned by [`Scheduler::schedule`].
pub type TimerId = u64;

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Commit the move that is currently settling
    MoveSettle,
    /// Leave the death or victory display
    OutcomeDisplay,
}

/// A timer waiting in the queue.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledTimer {
    pub id: TimerId,
    pub due: f64,
    pub epoch: u64,
    pub kind: TimerKind,
}

impl PartialEq for ScheduledTimer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ScheduledTimer {}

impl PartialOrd for ScheduledTimer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTimer {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior in BinaryHeap, earlier ids first on ties
        other
            .due
            .partial_cmp(&self.due)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Timer queue driven by [`advance`](Scheduler::advance).
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: f64,
    next_id: TimerId,
    queue: BinaryHeap<ScheduledTimer>,
    cancelled: HashSet<TimerId>,
}

impl Scheduler {
    /// Creates an empty scheduler at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedules a timer `delay` seconds from now.
    pub fn schedule(&mut self, delay: f64, kind: TimerKind, epoch: u64) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push(ScheduledTimer {
            id,
            due: self.now + delay.max(0.0),
            epoch,
            kind,
        });
        id
    }

    /// Cancels a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if self.is_pending(id) {
            self.cancelled.insert(id)
        } else {
            false
        }
    }

    /// Cancels every pending timer.
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.cancelled.clear();
    }

    /// Whether the timer is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        !self.cancelled.contains(&id) && self.queue.iter().any(|timer| timer.id == id)
    }

    /// Number of live timers.
    pub fn pending_count(&self) -> usize {
        self.queue
            .iter()
            .filter(|timer| !self.cancelled.contains(&timer.id))
            .count()
    }

    /// Pops the earliest live timer due at or before `deadline`, moving the
    /// clock to its due time.
    ///
    /// Timers scheduled while handling the popped one are measured from its
    /// due time, so a long frame still fires chained timers in order.
    pub fn next_due(&mut self, deadline: f64) -> Option<ScheduledTimer> {
        while let Some(timer) = self.queue.peek().copied() {
            if timer.due > deadline {
                return None;
            }
            self.queue.pop();
            if self.cancelled.remove(&timer.id) {
                continue;
            }
            self.now = self.now.max(timer.due);
            return Some(timer);
        }
        None
    }

    /// Moves the clock forward to `deadline` without firing anything.
    pub fn settle_clock(&mut self, deadline: f64) {
        self.now = self.now.max(deadline);
    }

    /// Advances the clock by `dt` and returns every timer that fired, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailmaze::{Scheduler, TimerKind};
    ///
    /// let mut scheduler = Scheduler::new();
    /// scheduler.schedule(1.5, TimerKind::OutcomeDisplay, 0);
    /// scheduler.schedule(0.5, TimerKind::MoveSettle, 0);
    ///
    /// assert!(scheduler.advance(0.25).is_empty());
    /// let fired = scheduler.advance(0.25);
    /// assert_eq!(fired.len(), 1);
    /// assert_eq!(fired[0].kind, TimerKind::MoveSettle);
    /// assert_eq!(scheduler.advance(1.0)[0].kind, TimerKind::OutcomeDisplay);
    /// ```
    pub fn advance(&mut self, dt: f64) -> Vec<ScheduledTimer> {
        let deadline = self.now + dt.max(0.0);
        let mut fired = Vec::new();
        while let Some(timer) = self.next_due(deadline) {
            fired.push(timer);
        }
        self.settle_clock(deadline);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_due_order() {
        let mut scheduler = Scheduler::new();
        let late = scheduler.schedule(2.0, TimerKind::OutcomeDisplay, 0);
        let early = scheduler.schedule(1.0, TimerKind::MoveSettle, 0);

        let fired = scheduler.advance(5.0);
        let ids: Vec<TimerId> = fired.iter().map(|timer| timer.id).collect();
        assert_eq!(ids, vec![early, late]);
        assert_eq!(scheduler.now(), 5.0);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule(1.0, TimerKind::MoveSettle, 0);
        let second = scheduler.schedule(1.0, TimerKind::OutcomeDisplay, 0);
        let fired = scheduler.advance(1.0);
        assert_eq!(fired[0].id, first);
        assert_eq!(fired[1].id, second);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(0.5, TimerKind::MoveSettle, 3);
        assert!(scheduler.is_pending(id));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(!scheduler.is_pending(id));

        assert!(scheduler.advance(1.0).is_empty());
    }

    #[test]
    fn test_cancel_all_clears_queue() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.5, TimerKind::MoveSettle, 0);
        scheduler.schedule(1.5, TimerKind::OutcomeDisplay, 0);
        scheduler.cancel_all();
        assert_eq!(scheduler.pending_count(), 0);
        assert!(scheduler.advance(10.0).is_empty());
    }

    #[test]
    fn test_next_due_moves_clock_to_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.5, TimerKind::MoveSettle, 0);

        let timer = scheduler.next_due(10.0).unwrap();
        assert_eq!(timer.due, 0.5);
        assert_eq!(scheduler.now(), 0.5);

        // Chained timer measured from the fired timer's due time
        scheduler.schedule(1.5, TimerKind::OutcomeDisplay, 0);
        let chained = scheduler.next_due(10.0).unwrap();
        assert_eq!(chained.due, 2.0);
        assert!(scheduler.next_due(10.0).is_none());
    }

    #[test]
    fn test_timer_keeps_epoch() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.1, TimerKind::MoveSettle, 7);
        assert_eq!(scheduler.advance(0.2)[0].epoch, 7);
    }
}
