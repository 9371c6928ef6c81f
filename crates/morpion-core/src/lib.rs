//! Core Morpion Solitaire 5T types: the lattice, move encoding, legal move
//! generation, move execution, and game replay.

mod cell;
mod direction;
mod dump;
mod error;
mod feature;
mod grid;
mod line_move;
mod movegen;
mod play;
mod replay;

pub use cell::Cell;
pub use direction::Direction;
pub use dump::PrettyGrid;
pub use error::GridError;
pub use feature::{FEATURE_COUNT, feature_code};
pub use grid::{GRID_SIZE, Grid, HISTORY_CAPACITY};
pub use line_move::{Move, SEGMENT_LEN};
pub use movegen::{CANDIDATE_CAPACITY, Candidate, CandidateList, Priority};
pub use replay::{construct_game, replay_history};
