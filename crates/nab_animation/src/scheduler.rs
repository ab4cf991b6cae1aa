//! Timer scheduler
//!
//! Holds one-shot and repeating timers keyed by [`TimerId`]. Timers carry an
//! event payload instead of a callback; the owner drains due events with
//! [`TimerQueue::pop_due`] and dispatches them itself. Times are milliseconds
//! on whatever origin the owner chooses (usually "since mount").

use crate::error::{AnimationError, Result};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TimerId;
}

#[derive(Clone, Debug)]
struct Timer<E> {
    fire_at: u64,
    period_ms: Option<u64>,
    /// Insertion order, breaks ties between timers due at the same instant
    seq: u64,
    event: E,
}

/// A timer that came due
#[derive(Clone, Debug, PartialEq)]
pub struct DueTimer<E> {
    pub id: TimerId,
    /// Scheduled fire time (not the time it was drained)
    pub fire_at: u64,
    pub event: E,
}

/// Pending timers for one owner
#[derive(Clone, Debug)]
pub struct TimerQueue<E> {
    timers: SlotMap<TimerId, Timer<E>>,
    next_seq: u64,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Fire `event` once at `fire_at`
    pub fn schedule_once(&mut self, fire_at: u64, event: E) -> TimerId {
        self.insert(fire_at, None, event)
    }

    /// Fire `event` at `first_at`, then every `period_ms` until cancelled
    pub fn schedule_repeating(&mut self, first_at: u64, period_ms: u64, event: E) -> Result<TimerId> {
        if period_ms == 0 {
            return Err(AnimationError::invalid("period_ms", 0.0));
        }
        Ok(self.insert(first_at, Some(period_ms), event))
    }

    fn insert(&mut self, fire_at: u64, period_ms: Option<u64>, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Timer {
            fire_at,
            period_ms,
            seq,
            event,
        })
    }

    /// Cancel one timer; returns whether it was still pending
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Cancel every pending timer; returns how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        if count > 0 {
            tracing::debug!(count, "cancelled pending timers");
        }
        count
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Earliest scheduled fire time
    pub fn next_fire_at(&self) -> Option<u64> {
        self.timers.values().map(|t| t.fire_at).min()
    }

    fn earliest_due(&self, now: u64) -> Option<TimerId> {
        self.timers
            .iter()
            .filter(|(_, t)| t.fire_at <= now)
            .min_by_key(|(_, t)| (t.fire_at, t.seq))
            .map(|(id, _)| id)
    }
}

impl<E: Clone> TimerQueue<E> {
    /// Take the earliest timer due at or before `now`.
    ///
    /// One-shot timers are removed; repeating timers are re-armed one period
    /// later. Call in a loop to drain everything due, including timers the
    /// caller schedules while handling earlier events.
    pub fn pop_due(&mut self, now: u64) -> Option<DueTimer<E>> {
        let id = self.earliest_due(now)?;
        let timer = self.timers.get_mut(id)?;
        let due = DueTimer {
            id,
            fire_at: timer.fire_at,
            event: timer.event.clone(),
        };

        let period_ms = timer.period_ms;
        match period_ms {
            Some(period) => {
                timer.fire_at = timer.fire_at.saturating_add(period);
                timer.seq = self.next_seq;
                self.next_seq += 1;
            }
            None => {
                self.timers.remove(id);
            }
        }
        Some(due)
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        Fade,
        Done,
        Rearm(usize),
    }

    fn drain(queue: &mut TimerQueue<Event>, now: u64) -> Vec<(u64, Event)> {
        let mut out = Vec::new();
        while let Some(due) = queue.pop_due(now) {
            out.push((due.fire_at, due.event));
        }
        out
    }

    #[test]
    fn test_nothing_due_before_fire_time() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(4000, Event::Fade);
        assert!(queue.pop_due(3999).is_none());
        assert_eq!(queue.next_fire_at(), Some(4000));
        assert_eq!(drain(&mut queue, 4000), vec![(4000, Event::Fade)]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_due_events_come_out_in_time_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(4800, Event::Done);
        queue.schedule_once(4000, Event::Fade);
        queue.schedule_once(4000, Event::Rearm(0));
        assert_eq!(
            drain(&mut queue, 10_000),
            vec![(4000, Event::Fade), (4000, Event::Rearm(0)), (4800, Event::Done)]
        );
    }

    #[test]
    fn test_repeating_timer_rearms() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_repeating(4150, 4000, Event::Rearm(1)).unwrap();

        let fired = drain(&mut queue, 12_150);
        assert_eq!(
            fired.iter().map(|(at, _)| *at).collect::<Vec<_>>(),
            vec![4150, 8150, 12_150]
        );
        assert!(queue.is_pending(id));
        assert_eq!(queue.next_fire_at(), Some(16_150));
    }

    #[test]
    fn test_zero_period_is_rejected() {
        let mut queue: TimerQueue<Event> = TimerQueue::new();
        assert!(matches!(
            queue.schedule_repeating(0, 0, Event::Fade),
            Err(AnimationError::InvalidParameter { name: "period_ms", .. })
        ));
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let fade = queue.schedule_once(4000, Event::Fade);
        queue.schedule_repeating(0, 4000, Event::Rearm(0)).unwrap();

        assert!(queue.cancel(fade));
        assert!(!queue.cancel(fade));
        assert_eq!(queue.pending(), 1);

        assert_eq!(queue.cancel_all(), 1);
        assert!(queue.pop_due(u64::MAX / 2).is_none());
    }

    #[test]
    fn test_timer_scheduled_while_draining_is_picked_up() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(4000, Event::Fade);

        let mut fired = Vec::new();
        while let Some(due) = queue.pop_due(5000) {
            if due.event == Event::Fade {
                queue.schedule_once(due.fire_at + 800, Event::Done);
            }
            fired.push((due.fire_at, due.event));
        }
        assert_eq!(fired, vec![(4000, Event::Fade), (4800, Event::Done)]);
    }
}
