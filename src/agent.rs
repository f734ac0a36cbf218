mod config;
mod linear_sarsa_lambda;

use ndarray::Array1;

pub use config::{BootstrapTarget, SarsaLambdaConfig};
pub use linear_sarsa_lambda::LinearSarsaLambdaAgent;

use crate::utils::argmax;

/// Value of the next state given its action values, the selected next
/// action and the policy's action probabilities.
pub type FutureValue = fn(&Array1<f64>, usize, &Array1<f64>) -> f64;

pub fn sarsa(next_q_values: &Array1<f64>, next_action: usize, _policy_probs: &Array1<f64>) -> f64 {
    next_q_values[next_action]
}

pub fn qlearning(
    next_q_values: &Array1<f64>,
    _next_action: usize,
    _policy_probs: &Array1<f64>,
) -> f64 {
    next_q_values[argmax(next_q_values)]
}

pub fn expected_sarsa(
    next_q_values: &Array1<f64>,
    _next_action: usize,
    policy_probs: &Array1<f64>,
) -> f64 {
    next_q_values.dot(policy_probs)
}

impl BootstrapTarget {
    pub fn future_value(self) -> FutureValue {
        match self {
            BootstrapTarget::Sarsa => sarsa,
            BootstrapTarget::QLearning => qlearning,
            BootstrapTarget::ExpectedSarsa => expected_sarsa,
        }
    }
}
