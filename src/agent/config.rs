use std::str::FromStr;

use crate::error::{Error, Result};
use crate::trace::TraceMode;

/// Which next-state value the TD error bootstraps from in `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootstrapTarget {
    /// Value of the action actually selected next.
    #[default]
    Sarsa,
    /// Value of the best next action.
    ///
    /// Traces are never cut after an exploratory action, so together with
    /// eligibility traces this is naive Q(λ) rather than Watkins's Q(λ).
    QLearning,
    /// Expected value under the ε-greedy policy.
    ExpectedSarsa,
}

impl FromStr for BootstrapTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "sarsa" => Ok(BootstrapTarget::Sarsa),
            "qlearning" => Ok(BootstrapTarget::QLearning),
            "expectedsarsa" => Ok(BootstrapTarget::ExpectedSarsa),
            other => Err(format!("unknown bootstrap target {}", other)),
        }
    }
}

/// Hyperparameters of [`LinearSarsaLambdaAgent`](super::LinearSarsaLambdaAgent).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarsaLambdaConfig {
    pub num_actions: usize,
    pub epsilon: f64,
    /// Discount factor.
    pub gamma: f64,
    /// Step size.
    pub alpha: f64,
    /// Trace decay.
    pub lambda: f64,
    pub trace_mode: TraceMode,
    pub target: BootstrapTarget,
}

impl Default for SarsaLambdaConfig {
    fn default() -> Self {
        Self {
            num_actions: 3,
            epsilon: 0.1,
            gamma: 1.0,
            alpha: 0.1,
            lambda: 0.9,
            trace_mode: TraceMode::default(),
            target: BootstrapTarget::default(),
        }
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidHyperparameter {
            name,
            value,
            reason: "must lie in [0, 1]",
        })
    }
}

impl SarsaLambdaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_actions == 0 {
            return Err(Error::InvalidHyperparameter {
                name: "num_actions",
                value: 0.0,
                reason: "at least one action is required",
            });
        }
        unit_interval("epsilon", self.epsilon)?;
        unit_interval("gamma", self.gamma)?;
        unit_interval("lambda", self.lambda)?;
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(Error::InvalidHyperparameter {
                name: "alpha",
                value: self.alpha,
                reason: "must be positive and finite",
            });
        }
        Ok(())
    }
}
