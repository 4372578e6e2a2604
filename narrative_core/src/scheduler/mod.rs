//! Virtual-time scheduler for the global clock and scene timers.
//!
//! Jobs sit in a priority queue ordered by due time, with scheduling order
//! breaking ties. Nothing is ever removed early: every job carries the
//! [`SessionId`] of the night that scheduled it, and the session drops jobs
//! whose token no longer matches or whose night has ended.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use game_rules::SessionId;

use crate::graph::{SceneId, Transition};

/// Deferred work.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// One beat of the global clock.
    ClockTick,
    /// A timed reveal inside a scene.
    Beat { scene: SceneId, index: usize },
    /// A delayed transition.
    Transition(Transition),
}

/// A job waiting in the queue.
#[derive(Debug, Clone)]
pub struct ScheduledJob {
    pub due_ms: u64,
    pub token: SessionId,
    pub job: Job,
    seq: u64,
}

impl PartialEq for ScheduledJob {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl Eq for ScheduledJob {}

impl PartialOrd for ScheduledJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledJob {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_ms
            .cmp(&other.due_ms)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Discrete-event queue over a virtual millisecond clock.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<ScheduledJob>>,
    now_ms: u64,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue a job `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, token: SessionId, job: Job) {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(ScheduledJob {
            due_ms,
            token,
            job,
            seq,
        }));
    }

    /// Pop the next job due at or before `until_ms`, moving the clock to its
    /// due time. Returns `None` when nothing else is due.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledJob> {
        let next_due = self.queue.peek()?.0.due_ms;
        if next_due > until_ms {
            return None;
        }
        let Reverse(job) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(job.due_ms);
        Some(job)
    }

    /// Move the clock forward without running anything.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    /// Due time of the next job.
    pub fn peek_next_due(&self) -> Option<u64> {
        self.queue.peek().map(|job| job.0.due_ms)
    }

    /// Number of queued jobs, live or stale.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Cancellation flag for one night's global clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockHandle {
    token: SessionId,
    cancelled: bool,
}

impl ClockHandle {
    pub fn new(token: SessionId) -> Self {
        Self {
            token,
            cancelled: false,
        }
    }

    pub fn token(&self) -> SessionId {
        self.token
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether a tick scheduled under `token` may still act.
    pub fn is_live_for(&self, token: SessionId) -> bool {
        !self.cancelled && self.token == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::EndingKind;

    #[test]
    fn test_jobs_pop_in_due_order() {
        let token = SessionId::nil();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(7_000, token, Job::Transition(Transition::End(EndingKind::Crash)));
        scheduler.schedule(3_000, token, Job::ClockTick);

        let first = scheduler.pop_due(10_000).unwrap();
        assert_eq!(first.job, Job::ClockTick);
        assert_eq!(scheduler.now_ms(), 3_000);

        let second = scheduler.pop_due(10_000).unwrap();
        assert_eq!(second.due_ms, 7_000);
        assert!(scheduler.pop_due(10_000).is_none());
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let token = SessionId::nil();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1_000, token, Job::Transition(Transition::Goto(SceneId::Chase)));
        scheduler.schedule(1_000, token, Job::ClockTick);

        assert_eq!(
            scheduler.pop_due(1_000).unwrap().job,
            Job::Transition(Transition::Goto(SceneId::Chase))
        );
        assert_eq!(scheduler.pop_due(1_000).unwrap().job, Job::ClockTick);
    }

    #[test]
    fn test_pop_due_respects_horizon() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(5_000, SessionId::nil(), Job::ClockTick);

        assert!(scheduler.pop_due(4_999).is_none());
        assert_eq!(scheduler.now_ms(), 0);
        assert_eq!(scheduler.peek_next_due(), Some(5_000));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(2_000);
        scheduler.schedule(500, SessionId::nil(), Job::ClockTick);
        assert_eq!(scheduler.peek_next_due(), Some(2_500));

        scheduler.advance_to(1_000);
        assert_eq!(scheduler.now_ms(), 2_000);
    }

    #[test]
    fn test_clock_handle() {
        let token = SessionId::new();
        let mut handle = ClockHandle::new(token);
        assert!(handle.is_live_for(token));
        assert!(!handle.is_live_for(SessionId::new()));

        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(!handle.is_live_for(token));
    }
}
