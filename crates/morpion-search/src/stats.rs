//! Counters collected while searching.

use std::fmt;

/// Work done by a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Level-0 playouts completed.
    pub playouts: u64,
    /// Policy adaptations performed.
    pub adaptations: u64,
    /// Length of the longest playout seen.
    pub longest_playout: usize,
}

impl SearchStats {
    /// Count one finished playout of `moves` total moves.
    pub fn record_playout(&mut self, moves: usize) {
        self.playouts += 1;
        self.longest_playout = self.longest_playout.max(moves);
    }

    /// Fold another worker's counters into these.
    pub fn merge(&mut self, other: &SearchStats) {
        self.playouts += other.playouts;
        self.adaptations += other.adaptations;
        self.longest_playout = self.longest_playout.max(other.longest_playout);
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "playouts={} adaptations={} longest={}",
            self.playouts, self.adaptations, self.longest_playout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::SearchStats;

    #[test]
    fn record_and_merge() {
        let mut a = SearchStats::default();
        a.record_playout(30);
        a.record_playout(25);
        let mut b = SearchStats::default();
        b.record_playout(41);
        b.adaptations = 2;
        a.merge(&b);
        assert_eq!(a, SearchStats { playouts: 3, adaptations: 2, longest_playout: 41 });
        assert_eq!(format!("{a}"), "playouts=3 adaptations=2 longest=41");
    }
}
