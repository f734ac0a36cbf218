use std::marker::PhantomData;

use log::{debug, trace};
use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{FutureValue, SarsaLambdaConfig};
use crate::action_selection::EpsilonGreedy;
use crate::error::{Error, Result};
use crate::tile_coding::TileEncoder;
use crate::trace::EligibilityTrace;

/// Decision taken at the previous call, waiting for its reward.
#[derive(Debug, Clone)]
struct Transition {
    action: usize,
    tiles: Vec<usize>,
}

/// On-policy SARSA(λ) over tile-coded binary features.
///
/// The action value of `(state, action)` is the sum of `weights[action, t]`
/// over the state's active tiles `t`. Weights and traces are
/// `num_actions x table_size` tables; every update touches the whole weight
/// table in proportion to the traces.
///
/// An episode is `start`, then any number of `step`, then `end`. Calls out
/// of that order fail without changing any state.
///
/// The agent holds no locks. Run parallel episodes on separate agents.
pub struct LinearSarsaLambdaAgent<S: ?Sized, E, R = StdRng> {
    encoder: E,
    config: Option<SarsaLambdaConfig>,
    action_selection: Option<EpsilonGreedy>,
    future_q_value: FutureValue,
    weights: Array2<f64>,
    traces: Array2<f64>,
    pending: Option<Transition>,
    last_td_error: Option<f64>,
    rng: R,
    _state: PhantomData<fn(&S)>,
}

impl<S: ?Sized, E: TileEncoder<S>> LinearSarsaLambdaAgent<S, E, StdRng> {
    /// Unconfigured agent with a seeded generator.
    pub fn new(encoder: E, seed: u64) -> Self {
        Self::with_rng(encoder, StdRng::seed_from_u64(seed))
    }

    pub fn with_config(encoder: E, config: SarsaLambdaConfig, seed: u64) -> Result<Self> {
        let mut agent = Self::new(encoder, seed);
        agent.configure(config)?;
        Ok(agent)
    }
}

impl<S: ?Sized, E: TileEncoder<S>, R: Rng> LinearSarsaLambdaAgent<S, E, R> {
    pub fn with_rng(encoder: E, rng: R) -> Self {
        let table_size = encoder.table_size();
        Self {
            encoder,
            config: None,
            action_selection: None,
            future_q_value: super::sarsa,
            weights: Array2::zeros((0, table_size)),
            traces: Array2::zeros((0, table_size)),
            pending: None,
            last_td_error: None,
            rng,
            _state: PhantomData,
        }
    }

    /// Sets the hyperparameters and allocates zeroed weight and trace tables.
    /// Can only be done once.
    pub fn configure(&mut self, config: SarsaLambdaConfig) -> Result<()> {
        if self.config.is_some() {
            return Err(Error::AlreadyConfigured);
        }
        config.validate()?;
        let table_size = self.encoder.table_size();
        if table_size == 0 {
            return Err(Error::InvalidTileCoder("table size must be positive".into()));
        }
        self.weights = Array2::zeros((config.num_actions, table_size));
        self.traces = Array2::zeros((config.num_actions, table_size));
        self.action_selection = Some(EpsilonGreedy::new(config.epsilon, config.num_actions));
        self.future_q_value = config.target.future_value();
        self.config = Some(config);
        debug!(
            "configured agent with {} actions over {} tiles: {:?}",
            config.num_actions, table_size, config
        );
        Ok(())
    }

    pub fn config(&self) -> Option<&SarsaLambdaConfig> {
        self.config.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Whether a `step` or `end` call is currently valid.
    pub fn in_episode(&self) -> bool {
        self.pending.is_some()
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn traces(&self) -> &Array2<f64> {
        &self.traces
    }

    /// TD error of the most recent `step` or `end`.
    pub fn last_td_error(&self) -> Option<f64> {
        self.last_td_error
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Replaces the weight table, e.g. to warm start from a previous run.
    pub fn set_weights(&mut self, weights: Array2<f64>) -> Result<()> {
        if self.config.is_none() {
            return Err(Error::NotConfigured);
        }
        if weights.dim() != self.weights.dim() {
            return Err(Error::WeightShape {
                expected: self.weights.dim(),
                got: weights.dim(),
            });
        }
        self.weights = weights;
        Ok(())
    }

    fn check_tiles(&self, tiles: &[usize]) -> Result<()> {
        let size = self.weights.ncols();
        match tiles.iter().find(|&&t| t >= size) {
            Some(&index) => Err(Error::TileOutOfRange { index, size }),
            None => Ok(()),
        }
    }

    fn tile_value(&self, action: usize, tiles: &[usize]) -> f64 {
        tiles.iter().map(|&t| self.weights[[action, t]]).sum()
    }

    fn values_of(&self, tiles: &[usize]) -> Array1<f64> {
        Array1::from_shape_fn(self.weights.nrows(), |action| self.tile_value(action, tiles))
    }

    /// Summed weights of `tiles` for every action.
    pub fn action_values(&self, tiles: &[usize]) -> Result<Array1<f64>> {
        if self.config.is_none() {
            return Err(Error::NotConfigured);
        }
        self.check_tiles(tiles)?;
        Ok(self.values_of(tiles))
    }

    /// ε-greedy choice over the action values of `tiles`. Ties between
    /// greedy actions go to the lowest index.
    pub fn select_action(&mut self, tiles: &[usize]) -> Result<usize> {
        let values = self.action_values(tiles)?;
        let selection = self.action_selection.as_ref().ok_or(Error::NotConfigured)?;
        Ok(selection.get_action(&mut self.rng, &values))
    }

    fn encode(&mut self, state: &S) -> Result<Vec<usize>> {
        let tiles = self.encoder.encode(state)?;
        self.check_tiles(&tiles)?;
        Ok(tiles)
    }

    fn check_reward(reward: f64) -> Result<()> {
        if reward.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidReward(reward))
        }
    }

    pub fn start(&mut self, state: &S) -> Result<usize> {
        if self.config.is_none() {
            return Err(Error::NotConfigured);
        }
        let tiles = self.encode(state)?;
        let action = self.select_action(&tiles)?;
        self.traces.fill(0.0);
        debug!("episode started with action {} over {} tiles", action, tiles.len());
        self.pending = Some(Transition { action, tiles });
        Ok(action)
    }

    pub fn step(&mut self, state: &S, reward: f64) -> Result<usize> {
        let config = self.config.ok_or(Error::NotConfigured)?;
        if self.pending.is_none() {
            return Err(Error::EpisodeNotStarted);
        }
        Self::check_reward(reward)?;
        let tiles = self.encode(state)?;
        let next_values = self.values_of(&tiles);
        let selection = self.action_selection.as_ref().ok_or(Error::NotConfigured)?;
        let action = selection.get_action(&mut self.rng, &next_values);
        let policy_probs = selection.get_exploration_probs(&next_values);
        let future_q_value = (self.future_q_value)(&next_values, action, &policy_probs);

        let last = self.pending.take().ok_or(Error::EpisodeNotStarted)?;
        let delta =
            reward - self.tile_value(last.action, &last.tiles) + config.gamma * future_q_value;
        self.apply(&config, &last, delta);
        self.traces *= config.gamma * config.lambda;

        trace!("step reward {} delta {} next action {}", reward, delta, action);
        self.last_td_error = Some(delta);
        self.pending = Some(Transition { action, tiles });
        Ok(action)
    }

    /// Terminal update. The TD error has no bootstrap term.
    pub fn end(&mut self, reward: f64) -> Result<()> {
        let config = self.config.ok_or(Error::NotConfigured)?;
        if self.pending.is_none() {
            return Err(Error::EpisodeNotStarted);
        }
        Self::check_reward(reward)?;

        let last = self.pending.take().ok_or(Error::EpisodeNotStarted)?;
        let delta = reward - self.tile_value(last.action, &last.tiles);
        self.apply(&config, &last, delta);

        debug!("episode ended with reward {} delta {}", reward, delta);
        self.last_td_error = Some(delta);
        Ok(())
    }

    /// Marks the traces of `last` and moves every weight along its trace.
    fn apply(&mut self, config: &SarsaLambdaConfig, last: &Transition, delta: f64) {
        config
            .trace_mode
            .mark(&mut self.traces, last.action, &last.tiles);
        self.weights.scaled_add(config.alpha * delta, &self.traces);
    }
}
