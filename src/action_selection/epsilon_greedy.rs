use ndarray::Array1;
use rand::{distributions::Uniform, prelude::Distribution, Rng};

use crate::utils::argmax;

/// Two-branch ε-greedy: one uniform draw per decision, explore iff it falls
/// below `epsilon`, otherwise take the first best action.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    exploration_decider: Uniform<f64>,
    rand_action_selecter: Uniform<usize>,
    epsilon: f64,
    action_count: usize,
}

impl EpsilonGreedy {
    /// `action_count` must be at least one.
    pub fn new(epsilon: f64, action_count: usize) -> Self {
        Self {
            exploration_decider: Uniform::from(0.0..1.0),
            rand_action_selecter: Uniform::from(0..action_count),
            epsilon,
            action_count,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn should_explore<R: Rng>(&self, rng: &mut R) -> bool {
        self.exploration_decider.sample(rng) < self.epsilon
    }

    pub fn get_action<R: Rng>(&self, rng: &mut R, values: &Array1<f64>) -> usize {
        if self.should_explore(rng) {
            self.rand_action_selecter.sample(rng)
        } else {
            argmax(values)
        }
    }

    /// Probability of each action under this policy given `values`.
    pub fn get_exploration_probs(&self, values: &Array1<f64>) -> Array1<f64> {
        let mut policy_probs: Array1<f64> =
            Array1::from_elem(self.action_count, self.epsilon / self.action_count as f64);
        policy_probs[argmax(values)] += 1.0 - self.epsilon;
        policy_probs
    }
}
