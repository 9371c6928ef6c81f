//! Run summary.

use std::fmt;
use std::time::Duration;

use morpion_search::SearchStats;

use crate::config::Algorithm;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Algorithm used.
    pub algorithm: Algorithm,
    /// Top-level nesting level.
    pub level: u32,
    /// Seed of the run.
    pub seed: u64,
    /// Moves in the best game.
    pub moves: usize,
    /// Signature of the best game.
    pub signature: u64,
    /// Outer steps taken.
    pub steps: usize,
    /// Work done by the searches.
    pub stats: SearchStats,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl RunReport {
    /// Mean time per move of the best game.
    pub fn time_per_move(&self) -> Duration {
        if self.moves == 0 {
            Duration::ZERO
        } else {
            self.elapsed / self.moves as u32
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} level={} seed={} moves={} signature={:010} steps={} time={:.2}s ({})",
            self.algorithm,
            self.level,
            self.seed,
            self.moves,
            self.signature,
            self.steps,
            self.elapsed.as_secs_f64(),
            self.stats
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use morpion_search::SearchStats;

    use super::RunReport;
    use crate::config::Algorithm;

    fn report(moves: usize) -> RunReport {
        RunReport {
            algorithm: Algorithm::Nrpa,
            level: 2,
            seed: 1,
            moves,
            signature: 35_721,
            steps: 1,
            stats: SearchStats::default(),
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn display() {
        assert_eq!(
            report(60).to_string(),
            "nrpa level=2 seed=1 moves=60 signature=0000035721 steps=1 time=1.50s \
             (playouts=0 adaptations=0 longest=0)"
        );
    }

    #[test]
    fn time_per_move() {
        assert_eq!(report(60).time_per_move(), Duration::from_millis(25));
        assert_eq!(report(0).time_per_move(), Duration::ZERO);
    }
}
