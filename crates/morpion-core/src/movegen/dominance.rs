//! Forced-move domination.

use super::CandidateList;

impl CandidateList {
    /// Point every non-forced candidate at a forced candidate that places the
    /// same point in the same direction, if one exists.
    ///
    /// When several forced candidates qualify the one latest in the list wins.
    pub(crate) fn resolve_dominators(&mut self) {
        for c in &mut self.items {
            c.dominator = None;
        }
        for i in 0..self.items.len() {
            if !self.items[i].is_forced() {
                continue;
            }
            let forced = self.items[i].mv;
            for (j, other) in self.items.iter_mut().enumerate() {
                if j != i && !other.is_forced() && other.mv.same_placement(forced) {
                    other.dominator = Some(i);
                }
            }
        }
    }
}
