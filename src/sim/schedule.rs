//! Cooperative fixed-period scheduler
//!
//! The host feeds wall-clock deltas in; due jobs come out one at a time in
//! timestamp order. Everything runs on the caller's thread, so the spawn job,
//! the frame job and selection handling never interleave.
//!
//! Timers are owned through [`ScheduleHandle`]s. Cancelling a handle removes
//! the timer immediately, including between two fires of the same
//! `advance`, so nothing runs on a cancelled schedule.

use crate::consts::{MAX_FRAME_GAP_MS, MIN_PERIOD_MS};

/// Identifies one armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleHandle(u64);

/// Work a timer triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Spawn,
    Frame,
}

/// A due timer fire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fire {
    pub handle: ScheduleHandle,
    pub job: Job,
    /// Scheduler time the fire was due at
    pub at_ms: f64,
}

/// End of the window being advanced through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon(f64);

#[derive(Debug, Clone)]
struct Timer {
    handle: ScheduleHandle,
    job: Job,
    period_ms: f64,
    next_due_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    clock_ms: f64,
    next_handle: u64,
    /// Kept in arming order; ties fire in this order
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler time
    pub fn now_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Arm a periodic timer. First fire is one period from now.
    ///
    /// Periods shorter than `MIN_PERIOD_MS` (or NaN) are raised to it.
    pub fn schedule(&mut self, job: Job, period_ms: f64) -> ScheduleHandle {
        let period_ms = period_ms.max(MIN_PERIOD_MS);
        let handle = ScheduleHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            job,
            period_ms,
            next_due_ms: self.clock_ms + period_ms,
        });
        handle
    }

    /// Disarm a timer. `false` if it was not armed.
    pub fn cancel(&mut self, handle: ScheduleHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Disarm everything, returning how many timers were armed
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    pub fn is_active(&self, handle: ScheduleHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Open a window of `elapsed_ms` for [`Scheduler::pop_due`].
    ///
    /// Gaps longer than `MAX_FRAME_GAP_MS` are clamped so a stalled host
    /// does not trigger a burst of catch-up work.
    pub fn horizon(&self, elapsed_ms: f64) -> Horizon {
        let elapsed = if elapsed_ms.is_finite() {
            elapsed_ms.clamp(0.0, MAX_FRAME_GAP_MS)
        } else {
            0.0
        };
        Horizon(self.clock_ms + elapsed)
    }

    /// Next fire due inside the window, earliest first.
    ///
    /// Returns `None` once nothing else is due and moves the clock to the
    /// end of the window.
    pub fn pop_due(&mut self, horizon: Horizon) -> Option<Fire> {
        let Horizon(until) = horizon;
        let next = self
            .timers
            .iter_mut()
            .filter(|t| t.next_due_ms <= until)
            .min_by(|a, b| a.next_due_ms.total_cmp(&b.next_due_ms));

        match next {
            Some(timer) => {
                let fire = Fire {
                    handle: timer.handle,
                    job: timer.job,
                    at_ms: timer.next_due_ms,
                };
                timer.next_due_ms = next_after(timer.next_due_ms, timer.period_ms);
                self.clock_ms = fire.at_ms;
                Some(fire)
            }
            None => {
                self.clock_ms = self.clock_ms.max(until);
                None
            }
        }
    }
}

/// Due time following `due_ms`, at least one ulp later even when the
/// period is lost to rounding at large clock values
fn next_after(due_ms: f64, period_ms: f64) -> f64 {
    let next = due_ms + period_ms;
    if next > due_ms {
        next
    } else {
        // due_ms is positive and finite here, so the next bit pattern is the next float up
        f64::from_bits(due_ms.to_bits() + 1)
    }
}
