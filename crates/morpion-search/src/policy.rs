//! Learned move-scoring policy indexed by feature code.

use std::fmt;

use morpion_core::FEATURE_COUNT;

/// Flat table of real-valued weights, one per feature code, all zero at start.
///
/// Selection reads `exp(weight)`; adaptation adds to raw weights.
#[derive(Clone, PartialEq)]
pub struct Policy {
    table: Vec<f64>,
}

impl Policy {
    /// Create a policy with every weight zero.
    pub fn new() -> Self {
        Self {
            table: vec![0.0; FEATURE_COUNT],
        }
    }

    /// Raw weight of `code`.
    #[inline]
    pub fn raw(&self, code: u16) -> f64 {
        self.table[code as usize]
    }

    /// Exponentiated weight of `code`.
    #[inline]
    pub fn weight(&self, code: u16) -> f64 {
        self.table[code as usize].exp()
    }

    /// Add `delta` to the raw weight of `code`.
    #[inline]
    pub fn add(&mut self, code: u16, delta: f64) {
        self.table[code as usize] += delta;
    }

    /// Iterate over `(code, raw weight)` for every non-zero entry, by code.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w != 0.0)
            .map(|(code, &w)| (code as u16, w))
    }

    /// Number of non-zero entries.
    pub fn nonzero_count(&self) -> usize {
        self.iter_nonzero().count()
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("nonzero", &self.nonzero_count())
            .finish()
    }
}

/// Wrapper for listing a policy's non-zero entries one per line.
pub struct PolicyListing<'a>(pub &'a Policy);

impl fmt::Display for PolicyListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (code, w) in self.0.iter_nonzero() {
            writeln!(f, "code={code:05} policy={w:.6} exp={:.6}", w.exp())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Policy, PolicyListing};
    use morpion_core::FEATURE_COUNT;

    #[test]
    fn starts_at_zero() {
        let p = Policy::new();
        assert_eq!(p.nonzero_count(), 0);
        assert_eq!(p.raw(0), 0.0);
        assert_eq!(p.weight((FEATURE_COUNT - 1) as u16), 1.0);
    }

    #[test]
    fn add_accumulates() {
        let mut p = Policy::new();
        p.add(42, 1.0);
        p.add(42, -0.25);
        assert_eq!(p.raw(42), 0.75);
        assert!((p.weight(42) - 0.75f64.exp()).abs() < 1e-12);
        assert_eq!(p.iter_nonzero().collect::<Vec<_>>(), vec![(42, 0.75)]);
    }

    #[test]
    fn clone_is_independent() {
        let mut a = Policy::new();
        let b = a.clone();
        a.add(7, 2.0);
        assert_eq!(b.raw(7), 0.0);
        assert_ne!(a, b);
    }

    #[test]
    fn listing_format() {
        let mut p = Policy::new();
        p.add(3, 1.0);
        let text = format!("{}", PolicyListing(&p));
        assert_eq!(text, "code=00003 policy=1.000000 exp=2.718282\n");
    }
}
