//! Deterministic task scheduling
//!
//! Settle passes and input windows are driven through an explicit scheduler
//! over an injectable clock, so tests advance a virtual clock instead of
//! racing real timers.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock (for testing)
///
/// Clones share the same underlying time, so a test can hold one handle
/// and advance it while the scheduler reads another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Task {
    id: u64,
    due: Instant,
}

/// Explicit cancellable task queue
///
/// Tasks are unit markers: `take_due` removes everything whose deadline has
/// passed and reports how many fired. Callers decide what a firing means.
#[derive(Debug)]
pub struct Scheduler<C: Clock> {
    clock: C,
    tasks: Vec<Task>,
    next_id: u64,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule a task to fire after `delay`
    pub fn schedule(&mut self, delay: Duration) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due: self.clock.now() + delay,
        });
        TaskId(id)
    }

    /// Cancel a pending task. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id.0);
        self.tasks.len() != before
    }

    /// Remove all tasks whose deadline has passed, returning the count
    pub fn take_due(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.tasks.len();
        self.tasks.retain(|t| t.due > now);
        before - self.tasks.len()
    }

    /// Number of tasks still pending
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Deadline of the soonest pending task
    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|t| t.due).min()
    }

    /// The scheduler's clock
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
