mod mountain_car;

use crate::error::Result;

pub use mountain_car::MountainCarEnv;

/// Episodic environment with a discrete action set.
pub trait Env<T> {
    fn reset(&mut self) -> T;

    /// Next observation, reward and whether the episode is over. Fails with
    /// [`Error::EnvNotReady`](crate::error::Error::EnvNotReady) until `reset`
    /// is called and after an episode finishes.
    fn step(&mut self, action: usize) -> Result<(T, f64, bool)>;

    fn action_count(&self) -> usize;

    fn get_action_label(&self, action: usize) -> &str;
}
