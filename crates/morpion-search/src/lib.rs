//! Self-play search for Morpion Solitaire: NRPA with online policy
//! adaptation, NMCS, and a root-parallel NRPA pool.

pub mod control;
pub mod error;
pub mod nmcs;
pub mod nrpa;
pub mod policy;
pub mod pool;
pub mod select;
pub mod stats;

mod playout;

pub use control::SearchControl;
pub use error::SearchError;
pub use nmcs::Nmcs;
pub use nrpa::{Nrpa, NrpaConfig, NrpaOutcome, adapt};
pub use policy::{Policy, PolicyListing};
pub use pool::RolloutPool;
pub use select::{scaled_weight, select_move, selection_probabilities};
pub use stats::SearchStats;
