//! Scheduling the exponent of importance weight correction.
use serde::{Deserialize, Serialize};

/// Linear schedule of the importance-weight exponent beta.
///
/// Beta ramps from `beta_0` to `beta_final` over `n_samples_final` sample
/// calls and stays at `beta_final` afterwards.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct BetaSchedule {
    /// Initial value of beta.
    pub beta_0: f32,

    /// Final value of beta.
    pub beta_final: f32,

    /// Sample calls at which beta reaches its final value.
    pub n_samples_final: usize,
}

impl BetaSchedule {
    /// Creates a schedule.
    pub fn new(beta_0: f32, beta_final: f32, n_samples_final: usize) -> Self {
        Self {
            beta_0,
            beta_final,
            n_samples_final,
        }
    }

    /// A schedule that always evaluates to `beta`.
    pub fn constant(beta: f32) -> Self {
        Self::new(beta, beta, 0)
    }

    /// Evaluates the schedule at sample call `n`.
    pub fn beta(&self, n: usize) -> f32 {
        if n >= self.n_samples_final {
            self.beta_final
        } else {
            let d = self.beta_final - self.beta_0;
            self.beta_0 + d * (n as f32 / self.n_samples_final as f32)
        }
    }
}

impl Default for BetaSchedule {
    fn default() -> Self {
        Self::new(0.4, 1.0, 500_000)
    }
}
