//! Repeating timers driven by the frame loop.
//!
//! Tasks never run callbacks themselves; `advance` reports which tasks fired and
//! the owner dispatches. A task fires at most once per `advance`, however much
//! time passed: late ticks are skipped, never replayed.

use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identifies a scheduled task in fire reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Owning cancel handle. Not `Clone`: cancelling consumes it, so a task is
/// cancelled at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a TaskHandle leaves the task running with no way to cancel it"]
pub struct TaskHandle(TaskId);

impl TaskHandle {
    #[must_use]
    pub fn id(&self) -> TaskId {
        self.0
    }
}

#[derive(Debug)]
struct RepeatingTask {
    id: TaskId,
    period: Duration,
    elapsed: Duration,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    tasks: Vec<RepeatingTask>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, period: Duration) -> TaskHandle {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(RepeatingTask {
            id,
            period: period.max(MIN_PERIOD),
            elapsed: Duration::ZERO,
        });
        TaskHandle(id)
    }

    /// Returns false if the task was no longer scheduled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != handle.0);
        self.tasks.len() != before
    }

    #[must_use]
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance every task by `delta` and return the ones that fired, in schedule order.
    pub fn advance(&mut self, delta: Duration) -> Vec<TaskId> {
        let mut fired = Vec::new();
        for task in &mut self.tasks {
            task.elapsed = task.elapsed.saturating_add(delta);
            if task.elapsed >= task.period {
                let period_nanos = task.period.as_nanos();
                let rem = task.elapsed.as_nanos() % period_nanos;
                task.elapsed = Duration::from_nanos(rem as u64);
                fired.push(task.id);
            }
        }
        fired
    }
}
