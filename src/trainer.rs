use kdam::{tqdm, BarExt};
use log::info;
use rand::Rng;

use crate::agent::LinearSarsaLambdaAgent;
use crate::env::Env;
use crate::error::Result;
use crate::tile_coding::TileEncoder;

/// Per-episode reward, length and final TD error.
pub type TrainResults = (Vec<f64>, Vec<u128>, Vec<f64>);

/// Drives `start`, `step` and `end` against an environment.
#[derive(Debug, Clone)]
pub struct Trainer {
    pub n_episodes: u128,
    /// Episodes between progress reports.
    pub report_every: u128,
}

impl Trainer {
    pub fn new(n_episodes: u128, report_every: u128) -> Self {
        Self {
            n_episodes,
            report_every: report_every.max(1),
        }
    }

    /// One full episode. Truncation by the environment is treated as the
    /// end of the episode.
    pub fn run_episode<S, T, E, R>(
        agent: &mut LinearSarsaLambdaAgent<S, E, R>,
        env: &mut dyn Env<T>,
    ) -> Result<(f64, u128, f64)>
    where
        S: ?Sized,
        T: AsRef<S>,
        E: TileEncoder<S>,
        R: Rng,
    {
        let mut action_counter: u128 = 0;
        let mut epi_reward: f64 = 0.0;
        let curr_obs: T = env.reset();
        let mut curr_action: usize = agent.start(curr_obs.as_ref())?;
        loop {
            action_counter += 1;
            let (next_obs, reward, terminated) = env.step(curr_action)?;
            epi_reward += reward;
            if terminated {
                agent.end(reward)?;
                break;
            }
            curr_action = agent.step(next_obs.as_ref(), reward)?;
        }
        let td = agent.last_td_error().unwrap_or(0.0);
        Ok((epi_reward, action_counter, td))
    }

    pub fn train<S, T, E, R>(
        &self,
        agent: &mut LinearSarsaLambdaAgent<S, E, R>,
        env: &mut dyn Env<T>,
    ) -> Result<TrainResults>
    where
        S: ?Sized,
        T: AsRef<S>,
        E: TileEncoder<S>,
        R: Rng,
    {
        let mut training_reward: Vec<f64> = vec![];
        let mut training_length: Vec<u128> = vec![];
        let mut training_error: Vec<f64> = vec![];

        let mut pb = tqdm!(total = self.n_episodes as usize);
        pb.set_description(format!("EPISODE {}", 0));
        pb.refresh();

        for episode in 0..self.n_episodes {
            let (reward, length, td) = Self::run_episode(agent, env)?;
            training_reward.push(reward);
            training_length.push(length);
            training_error.push(td);

            if (episode + 1) % self.report_every == 0 {
                let window = self.report_every as usize;
                let recent = &training_reward[training_reward.len() - window..];
                let mean_reward: f64 = recent.iter().sum::<f64>() / window as f64;
                info!("episode {}: mean reward {:.2}", episode + 1, mean_reward);
                pb.set_postfix(format!("mean reward={:.2}", mean_reward));
                pb.set_description(format!("EPISODE {}", episode + 1));
            }
            pb.update(1);
        }
        Ok((training_reward, training_length, training_error))
    }
}
