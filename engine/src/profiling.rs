use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct StepTimings {
    pub handle: Duration,
    pub tick: Duration,
    pub total: Duration,
}

/// Optional hook interface for capturing per-frame timings.
pub trait Profiler {
    fn on_step(&mut self, _frame: usize, _timings: StepTimings) {}
}

/// Profiler that keeps running totals, enough for a one-line summary at the end of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepStats {
    pub steps: usize,
    pub total: Duration,
    pub worst: Duration,
}

impl StepStats {
    pub fn mean(&self) -> Duration {
        if self.steps == 0 {
            Duration::ZERO
        } else {
            self.total / self.steps as u32
        }
    }
}

impl Profiler for StepStats {
    fn on_step(&mut self, _frame: usize, timings: StepTimings) {
        self.steps += 1;
        self.total += timings.total;
        self.worst = self.worst.max(timings.total);
    }
}
