//! Cooperative task runner

use heapless::Vec;

use super::task::PeriodicTask;

/// Runner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunnerError {
    /// No room for another task
    Full,
}

struct Entry<'a> {
    task: &'a mut dyn PeriodicTask,
    due_us: u64,
}

/// Runs up to `N` periodic tasks from a polling loop
///
/// Each task has a deadline on the caller's monotonic microsecond clock.
/// When a deadline passes, the task is asked for its next delay and the
/// deadline advances by that delay. Deadlines never move backwards and
/// never land in the past, so a late poll does not cause a burst of runs.
pub struct TaskRunner<'a, const N: usize> {
    entries: Vec<Entry<'a>, N>,
}

impl<'a, const N: usize> TaskRunner<'a, N> {
    /// Create an empty runner
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register a task, due immediately
    ///
    /// Returns the task's index.
    pub fn add(&mut self, task: &'a mut dyn PeriodicTask, now_us: u64) -> Result<usize, RunnerError> {
        let index = self.entries.len();
        self.entries
            .push(Entry { task, due_us: now_us })
            .map_err(|_| RunnerError::Full)?;
        Ok(index)
    }

    /// Run every task whose deadline has passed
    ///
    /// Returns how many task bodies ran.
    pub fn poll(&mut self, now_us: u64) -> usize {
        let mut ran = 0;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.due_us > now_us {
                continue;
            }

            let delay = entry.task.time_of_next_check();
            let mut next = entry.due_us.saturating_add(delay);
            if next <= now_us {
                next = now_us.saturating_add(delay);
            }
            entry.due_us = next;
            trace!("Task {} next due at {} us", index, next);

            if entry.task.is_triggered() {
                entry.task.clear_triggered();
                entry.task.exec();
                ran += 1;
            }
        }
        ran
    }

    /// Earliest deadline, if any task is registered
    pub fn next_due(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_us).min()
    }

    /// Deadline of one task
    pub fn due_at(&self, index: usize) -> Option<u64> {
        self.entries.get(index).map(|e| e.due_us)
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no task is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> Default for TaskRunner<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        interval_us: u64,
        arm: bool,
        triggered: bool,
        runs: u32,
        checks: u32,
    }

    impl Counter {
        fn new(interval_us: u64) -> Self {
            Self {
                interval_us,
                arm: true,
                triggered: false,
                runs: 0,
                checks: 0,
            }
        }
    }

    impl PeriodicTask for Counter {
        fn exec(&mut self) {
            self.runs += 1;
        }

        fn time_of_next_check(&mut self) -> u64 {
            self.checks += 1;
            if self.arm {
                self.triggered = true;
            }
            self.interval_us
        }

        fn is_triggered(&self) -> bool {
            self.triggered
        }

        fn clear_triggered(&mut self) {
            self.triggered = false;
        }
    }

    #[test]
    fn test_runs_on_first_poll_then_waits() {
        let mut task = Counter::new(1_000);
        {
            let mut runner: TaskRunner<'_, 2> = TaskRunner::new();
            runner.add(&mut task, 0).unwrap();

            assert_eq!(runner.poll(0), 1);
            assert_eq!(runner.next_due(), Some(1_000));
            assert_eq!(runner.poll(999), 0);
            assert_eq!(runner.poll(1_000), 1);
            assert_eq!(runner.next_due(), Some(2_000));
        }
        assert_eq!(task.runs, 2);
        assert!(!task.triggered);
    }

    #[test]
    fn test_late_poll_does_not_burst() {
        let mut task = Counter::new(1_000);
        {
            let mut runner: TaskRunner<'_, 1> = TaskRunner::new();
            runner.add(&mut task, 0).unwrap();
            runner.poll(0);

            // Five periods late: one run, next deadline in the future
            assert_eq!(runner.poll(5_500), 1);
            assert_eq!(runner.next_due(), Some(6_500));
            assert_eq!(runner.poll(5_600), 0);
        }
        assert_eq!(task.runs, 2);
    }

    #[test]
    fn test_slightly_late_poll_keeps_cadence() {
        let mut task = Counter::new(1_000);
        let mut runner: TaskRunner<'_, 1> = TaskRunner::new();
        runner.add(&mut task, 0).unwrap();
        runner.poll(0);
        runner.poll(1_200);
        assert_eq!(runner.next_due(), Some(2_000));
    }

    #[test]
    fn test_untriggered_task_is_rescheduled_not_run() {
        let mut task = Counter::new(500);
        task.arm = false;
        {
            let mut runner: TaskRunner<'_, 1> = TaskRunner::new();
            runner.add(&mut task, 100).unwrap();
            assert_eq!(runner.poll(100), 0);
            assert_eq!(runner.due_at(0), Some(600));
        }
        assert_eq!(task.checks, 1);
        assert_eq!(task.runs, 0);
    }

    #[test]
    fn test_full_runner() {
        let mut a = Counter::new(1);
        let mut b = Counter::new(1);
        let mut runner: TaskRunner<'_, 1> = TaskRunner::new();
        assert_eq!(runner.add(&mut a, 0), Ok(0));
        assert_eq!(runner.add(&mut b, 0), Err(RunnerError::Full));
        assert_eq!(runner.len(), 1);
    }

    #[test]
    fn test_next_due_is_earliest() {
        let mut slow = Counter::new(10_000);
        let mut fast = Counter::new(100);
        let mut runner: TaskRunner<'_, 2> = TaskRunner::new();
        assert!(runner.is_empty());
        assert_eq!(runner.next_due(), None);

        runner.add(&mut slow, 0).unwrap();
        runner.add(&mut fast, 0).unwrap();
        assert_eq!(runner.poll(0), 2);
        assert_eq!(runner.next_due(), Some(100));
        assert_eq!(runner.due_at(0), Some(10_000));
    }
}
