//! Fixed-step clock
//!
//! Converts variable frame deltas into whole simulation steps, and keeps the
//! simulated clock the sign spawner reads.

use crate::consts::MAX_SUBSTEPS;

/// Accumulator driving a fixed tick rate
///
/// Time is accumulated in whole microseconds so exact multiples of the step
/// always release the same number of steps.
#[derive(Debug, Clone)]
pub struct FixedStep {
    tick_rate: u32,
    step_us: u64,
    accumulator_us: u64,
    steps: u64,
}

impl FixedStep {
    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_rate,
            step_us: 1_000_000 / tick_rate as u64,
            accumulator_us: 0,
            steps: 0,
        }
    }

    /// Length of one step in milliseconds
    pub fn step_ms(&self) -> f64 {
        self.step_us as f64 / 1000.0
    }

    /// Feed elapsed wall time and return how many steps to run now
    ///
    /// A frame never contributes more than `MAX_SUBSTEPS` steps of time, so a
    /// long stall (tab switch, debugger) is dropped instead of replayed.
    pub fn advance(&mut self, frame_ms: f64) -> u32 {
        let max_frame_us = MAX_SUBSTEPS as u64 * self.step_us;
        let frame_us = if frame_ms.is_finite() && frame_ms > 0.0 {
            ((frame_ms * 1000.0).round() as u64).min(max_frame_us)
        } else {
            0
        };
        self.accumulator_us += frame_us;

        let mut substeps = 0;
        while self.accumulator_us >= self.step_us && substeps < MAX_SUBSTEPS {
            self.accumulator_us -= self.step_us;
            substeps += 1;
        }
        substeps
    }

    /// Mark one step as executed and return the simulated clock after it
    pub fn complete_step(&mut self) -> u64 {
        self.steps += 1;
        self.now_ms()
    }

    /// Simulated time covered by the executed steps
    pub fn now_ms(&self) -> u64 {
        self.steps * 1000 / self.tick_rate as u64
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
