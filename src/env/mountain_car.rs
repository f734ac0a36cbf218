use rand::distributions::Uniform;
use rand::prelude::Distribution;
use rand::{rngs::StdRng, SeedableRng};

use crate::error::{Error, Result};

use super::Env;

/// Underpowered car in a valley that has to rock back and forth to reach
/// the flag on the right hill. Observations are `[position, velocity]`.
#[derive(Debug, Clone)]
pub struct MountainCarEnv {
    ready: bool,
    max_steps: u128,
    curr_step: u128,

    min_position: f64,
    max_position: f64,
    max_speed: f64,
    goal_position: f64,
    goal_velocity: f64,
    force: f64,
    gravity: f64,
    state: [f64; 2],

    dist: Uniform<f64>,
    rng: StdRng,
}

impl MountainCarEnv {
    pub const ACTIONS: [&'static str; 3] = [
        "ACCELERATE TO THE LEFT",
        "DONT ACCELERATE",
        "ACCELERATE TO THE RIGHT",
    ];

    pub const POSITION_BOUNDS: (f64, f64) = (-1.2, 0.6);
    pub const VELOCITY_BOUNDS: (f64, f64) = (-0.07, 0.07);

    pub fn new(max_steps: u128, seed: u64) -> Self {
        let mut env: MountainCarEnv = Self {
            ready: false,
            curr_step: 0,
            max_steps,
            min_position: Self::POSITION_BOUNDS.0,
            max_position: Self::POSITION_BOUNDS.1,
            max_speed: Self::VELOCITY_BOUNDS.1,
            goal_position: 0.5,
            goal_velocity: 0.0,
            force: 0.001,
            gravity: 0.0025,
            state: [0.0, 0.0],
            dist: Uniform::from(-0.6..-0.4),
            rng: StdRng::seed_from_u64(seed),
        };
        env.state = env.initialize_car();
        env
    }

    fn initialize_car(&mut self) -> [f64; 2] {
        [self.dist.sample(&mut self.rng), 0.0]
    }
}

impl Default for MountainCarEnv {
    fn default() -> Self {
        Self::new(500, 42)
    }
}

impl Env<[f64; 2]> for MountainCarEnv {
    fn reset(&mut self) -> [f64; 2] {
        self.state = self.initialize_car();
        self.ready = true;
        self.curr_step = 0;
        self.state
    }

    /// Truncated episodes report `true` like terminal ones.
    fn step(&mut self, action: usize) -> Result<([f64; 2], f64, bool)> {
        if !self.ready {
            return Err(Error::EnvNotReady);
        }
        if self.curr_step >= self.max_steps {
            self.ready = false;
            return Ok((self.state, -1.0, true));
        }
        self.curr_step += 1;

        let [mut position, mut velocity] = self.state;
        velocity += (action as f64 - 1.0) * self.force + (3.0 * position).cos() * (-self.gravity);
        velocity = velocity.clamp(-self.max_speed, self.max_speed);
        position += velocity;
        position = position.clamp(self.min_position, self.max_position);
        if position == self.min_position && velocity < 0.0 {
            velocity = 0.0
        }
        self.state = [position, velocity];
        let terminated = position >= self.goal_position && velocity >= self.goal_velocity;
        if terminated {
            self.ready = false;
        }
        Ok((self.state, -1.0, terminated))
    }

    fn action_count(&self) -> usize {
        Self::ACTIONS.len()
    }

    fn get_action_label(&self, action: usize) -> &str {
        Self::ACTIONS[action]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_before_reset_fails() {
        let mut env = MountainCarEnv::default();
        assert!(matches!(env.step(1), Err(Error::EnvNotReady)));
    }

    #[test]
    fn reset_starts_in_valley() {
        let mut env = MountainCarEnv::new(10, 3);
        for _ in 0..20 {
            let [position, velocity] = env.reset();
            assert!((-0.6..-0.4).contains(&position));
            assert_eq!(velocity, 0.0);
        }
    }

    #[test]
    fn truncates_after_max_steps() {
        let mut env = MountainCarEnv::new(5, 0);
        env.reset();
        let mut steps = 0;
        loop {
            let (_, reward, done) = env.step(1).unwrap();
            assert_eq!(reward, -1.0);
            steps += 1;
            if done {
                break;
            }
        }
        assert_eq!(steps, 6);
        assert!(matches!(env.step(1), Err(Error::EnvNotReady)));
    }

    #[test]
    fn state_stays_in_bounds() {
        let mut env = MountainCarEnv::new(1000, 0);
        env.reset();
        for i in 0..1000 {
            let ([position, velocity], _, done) = env.step(if (i / 40) % 2 == 0 { 0 } else { 2 }).unwrap();
            assert!((-1.2..=0.6).contains(&position));
            assert!(velocity.abs() <= 0.07);
            if done {
                break;
            }
        }
    }
}
