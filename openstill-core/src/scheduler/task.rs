//! Periodic task trait

/// Convert milliseconds to the scheduler's microsecond time unit
pub const fn millis_to_micros(ms: u32) -> u64 {
    ms as u64 * 1_000
}

/// Work invoked at a cadence chosen by the task itself
///
/// The host asks [`time_of_next_check`](Self::time_of_next_check) for the
/// delay until the next run, then calls [`exec`](Self::exec) once that delay
/// has passed if the task reports itself triggered. Task bodies run to
/// completion; there is no preemption between them.
pub trait PeriodicTask {
    /// Run one iteration
    fn exec(&mut self);

    /// Delay in microseconds until the task wants to run again
    fn time_of_next_check(&mut self) -> u64;

    /// Check if the task is eligible to run
    fn is_triggered(&self) -> bool;

    /// Withdraw eligibility until the next `time_of_next_check`
    fn clear_triggered(&mut self);
}

impl<T: PeriodicTask + ?Sized> PeriodicTask for &mut T {
    fn exec(&mut self) {
        (**self).exec()
    }

    fn time_of_next_check(&mut self) -> u64 {
        (**self).time_of_next_check()
    }

    fn is_triggered(&self) -> bool {
        (**self).is_triggered()
    }

    fn clear_triggered(&mut self) {
        (**self).clear_triggered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_micros() {
        assert_eq!(millis_to_micros(0), 0);
        assert_eq!(millis_to_micros(10_000), 10_000_000);
        assert_eq!(millis_to_micros(u32::MAX), u32::MAX as u64 * 1_000);
    }
}
