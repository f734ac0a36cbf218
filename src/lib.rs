//! SARSA(λ) with replacing eligibility traces over tile-coded linear
//! features.
//!
//! A [`TileCoder`](tile_coding::TileCoder) turns a continuous state into a
//! handful of active tile indices, and a
//! [`LinearSarsaLambdaAgent`](agent::LinearSarsaLambdaAgent) learns one
//! weight per `(action, tile)` pair over episodes driven by `start`, `step`
//! and `end`.

pub mod action_selection;
pub mod agent;
pub mod env;
pub mod error;
pub mod tile_coding;
pub mod trace;
pub mod trainer;
pub mod utils;

pub use agent::{LinearSarsaLambdaAgent, SarsaLambdaConfig};
pub use error::{Error, Result};
pub use tile_coding::{TileCoder, TileCoderConfig, TileEncoder};
