use std::time::Instant;

use log::info;
use plotters::style::{RGBColor, BLUE, GREEN, RED};

use linear_sarsa::agent::{BootstrapTarget, LinearSarsaLambdaAgent, SarsaLambdaConfig};
use linear_sarsa::env::{Env, MountainCarEnv};
use linear_sarsa::tile_coding::{TileCoder, TileCoderConfig};
use linear_sarsa::trace::TraceMode;
use linear_sarsa::trainer::Trainer;
use linear_sarsa::utils::{moving_average, plot_moving_average};

extern crate structopt;

use structopt::StructOpt;

/// Train tile-coded SARSA(λ) agents on Mountain Car and plot their results
#[derive(StructOpt, Debug)]
#[structopt(name = "linear_sarsa - MountainCar")]
struct Cli {
    /// Number of episodes for the training
    #[structopt(long = "n_episodes", short = "n", default_value = "500")]
    n_episodes: u128,

    /// Maximum number of steps per episode
    #[structopt(long = "max_steps", default_value = "1000")]
    max_steps: u128,

    /// Seed shared by the environment and the agents
    #[structopt(long = "seed", default_value = "42")]
    seed: u64,

    /// Step size, divided by the number of tilings
    #[structopt(long = "learning_rate", default_value = "0.5")]
    learning_rate: f64,

    /// Exploration ratio
    #[structopt(long = "epsilon", default_value = "0.0")]
    epsilon: f64,

    /// Discount factor to be used on the temporal difference calculation
    #[structopt(long = "discount_factor", default_value = "1.0")]
    discount_factor: f64,

    /// Lambda factor of the eligibility traces
    #[structopt(long = "lambda_factor", default_value = "0.9")]
    lambda_factor: f64,

    /// Eligibility trace update: replacing or accumulating
    #[structopt(long = "trace_mode", default_value = "replacing")]
    trace_mode: TraceMode,

    /// Capacity of the index hash table
    #[structopt(long = "iht_size", default_value = "4096")]
    iht_size: usize,

    /// Number of tilings
    #[structopt(long = "num_tilings", default_value = "8")]
    num_tilings: usize,

    /// Tiles per dimension in each tiling
    #[structopt(long = "num_tiles", default_value = "8")]
    num_tiles: usize,

    /// Moving average window to be used on the visualization of results
    #[structopt(long = "moving_average_window", default_value = "10")]
    moving_average_window: usize,
}

fn main() -> linear_sarsa::Result<()> {
    env_logger::init();
    let cli: Cli = Cli::from_args();

    let mut env = MountainCarEnv::new(cli.max_steps, cli.seed);
    let trainer = Trainer::new(cli.n_episodes, cli.moving_average_window as u128);

    let targets = [
        BootstrapTarget::Sarsa,
        BootstrapTarget::QLearning,
        BootstrapTarget::ExpectedSarsa,
    ];
    let legends: Vec<&str> = ["Sarsa(λ)", "Naive Q(λ)", "Expected Sarsa(λ)"].to_vec();
    let colors: Vec<&RGBColor> = [&BLUE, &GREEN, &RED].to_vec();

    let mut rewards: Vec<Vec<f64>> = vec![];
    let mut episodes_length: Vec<Vec<f64>> = vec![];
    let mut errors: Vec<Vec<f64>> = vec![];

    for (target, legend) in targets.iter().zip(&legends) {
        let coder = TileCoder::new(TileCoderConfig {
            iht_size: cli.iht_size,
            num_tilings: cli.num_tilings,
            tiles_per_dimension: cli.num_tiles,
            bounds: vec![
                MountainCarEnv::POSITION_BOUNDS,
                MountainCarEnv::VELOCITY_BOUNDS,
            ],
        })?;
        let config = SarsaLambdaConfig {
            num_actions: env.action_count(),
            epsilon: cli.epsilon,
            gamma: cli.discount_factor,
            alpha: cli.learning_rate / cli.num_tilings as f64,
            lambda: cli.lambda_factor,
            trace_mode: cli.trace_mode,
            target: *target,
        };
        let mut agent: LinearSarsaLambdaAgent<[f64], TileCoder> =
            LinearSarsaLambdaAgent::with_config(coder, config, cli.seed)?;

        let now: Instant = Instant::now();
        let (reward_history, episode_length, training_error) = trainer.train(&mut agent, &mut env)?;
        info!(
            "{} trained in {:.2?}, {} of {} tiles in use",
            legend,
            now.elapsed(),
            agent.encoder().iht().count(),
            cli.iht_size
        );

        rewards.push(moving_average(cli.moving_average_window, &reward_history));
        episodes_length.push(moving_average(
            cli.moving_average_window,
            &episode_length.iter().map(|x| *x as f64).collect::<Vec<f64>>(),
        ));
        errors.push(moving_average(cli.moving_average_window, &training_error));
    }

    plot_moving_average(&rewards, &colors, &legends, "Rewards")?;
    plot_moving_average(&episodes_length, &colors, &legends, "Episodes Length")?;
    plot_moving_average(&errors, &colors, &legends, "Training Error")?;
    Ok(())
}
