//! Legal move generation: full and incremental scans, priorities, domination.

mod dominance;
mod window;

use std::fmt;
use std::ops::RangeInclusive;

use tracing::{error, trace};

use crate::direction::Direction;
use crate::error::GridError;
use crate::feature::feature_code;
use crate::grid::{GRID_SIZE, Grid};
use crate::line_move::{Move, SEGMENT_LEN};

use self::window::evaluate;

/// Maximum number of candidates a position may hold.
pub const CANDIDATE_CAPACITY: usize = 1000;

/// Heuristic class of a legal move.
///
/// The discriminant is the raw priority value shown in diagnostic dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Priority {
    /// Blocks a nearby line end from ever reaching this segment.
    Weak = 1000,
    /// Neither forced nor weak.
    Neutral = 1005,
    /// Continues an existing line through a shared endpoint.
    Forced = 1010,
}

impl Priority {
    /// Return the raw priority value.
    #[inline]
    pub const fn value(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A legal move of the current position with its scan annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// The move itself.
    pub mv: Move,
    /// Heuristic class.
    pub priority: Priority,
    /// Index of a forced candidate that replaces this one when played.
    pub dominator: Option<usize>,
    /// Policy-table key.
    pub code: u16,
}

impl Candidate {
    fn new(mv: Move, priority: Priority) -> Candidate {
        Candidate {
            mv,
            priority,
            dominator: None,
            code: feature_code(mv),
        }
    }

    /// Return `true` if this candidate is forced.
    #[inline]
    pub fn is_forced(&self) -> bool {
        self.priority == Priority::Forced
    }
}

/// Ordered list of the legal moves of a position.
///
/// Indices are stable until the next scan; dominators refer to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    items: Vec<Candidate>,
}

impl CandidateList {
    /// Create an empty list.
    pub fn new() -> CandidateList {
        CandidateList { items: Vec::new() }
    }

    /// Remove every candidate.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Append a candidate, failing once the capacity is reached.
    fn push(&mut self, candidate: Candidate) -> Result<(), GridError> {
        if self.items.len() >= CANDIDATE_CAPACITY {
            error!(capacity = CANDIDATE_CAPACITY, "candidate list full");
            return Err(GridError::CapacityExceeded {
                what: "candidate list",
                capacity: CANDIDATE_CAPACITY,
            });
        }
        self.items.push(candidate);
        Ok(())
    }

    /// Return the number of candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return `true` if there are no candidates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return a slice of the candidates.
    #[inline]
    pub fn as_slice(&self) -> &[Candidate] {
        &self.items
    }

    /// Return the candidate at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.items.get(index)
    }

    /// Iterate over the candidates in list order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.items.iter()
    }

    /// Iterate over the moves in list order.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.items.iter().map(|c| c.mv)
    }

    /// Return the index of `mv`, if present.
    pub fn position(&self, mv: Move) -> Option<usize> {
        self.items.iter().position(|c| c.mv == mv)
    }

    /// Return `true` if `mv` is in the list.
    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.position(mv).is_some()
    }

    /// Return the move actually played when candidate `index` is chosen:
    /// its dominator's move if it has one, its own otherwise.
    pub fn resolve(&self, index: usize) -> Result<Move, GridError> {
        let count = self.items.len();
        let candidate = self
            .items
            .get(index)
            .ok_or(GridError::NoSuchCandidate { index, count })?;
        match candidate.dominator {
            Some(d) => self
                .items
                .get(d)
                .map(|c| c.mv)
                .ok_or(GridError::NoSuchCandidate { index: d, count }),
            None => Ok(candidate.mv),
        }
    }
}

impl std::ops::Index<usize> for CandidateList {
    type Output = Candidate;
    #[inline]
    fn index(&self, index: usize) -> &Candidate {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Lowest and highest coordinate a scan visits.
const SCAN_MIN: i32 = 1;
const SCAN_MAX: i32 = GRID_SIZE as i32 - 2;

/// Half-width of the square re-scanned around a newly placed point.
const RESCAN_RADIUS: i32 = SEGMENT_LEN - 1;

/// Return `true` if a legal move at `(x, y)` sits too close to the lattice
/// edge for the next scan to see all of its continuations.
#[inline]
fn on_rim(x: i32, y: i32) -> bool {
    x <= SCAN_MIN || y <= SCAN_MIN || x >= SCAN_MAX || y >= SCAN_MAX
}

impl Grid {
    /// Rebuild the candidate list from scratch by scanning every interior point.
    ///
    /// Returns [`GridError::LatticeTooSmall`] if a legal move is found on the
    /// lattice rim and [`GridError::CapacityExceeded`] if the list overflows.
    pub fn search_moves(&mut self) -> Result<(), GridError> {
        let mut list = std::mem::take(&mut self.candidates);
        list.clear();
        let scanned = self.scan_region(SCAN_MIN..=SCAN_MAX, SCAN_MIN..=SCAN_MAX, &mut list, false);
        list.resolve_dominators();
        self.candidates = list;
        trace!(candidates = self.candidates.len(), "full scan");
        scanned
    }

    /// Rebuild the candidate list of this grid, which must be `previous`
    /// after playing candidate `played`, reusing `previous`'s list.
    ///
    /// Old candidates are re-validated; only the square of radius four around
    /// the new point is scanned for fresh ones. The result holds the same
    /// moves with the same priorities as [`Grid::search_moves`], possibly in
    /// a different order.
    pub fn search_moves_incremental(&mut self, previous: &Grid, played: usize) -> Result<(), GridError> {
        let played_mv = previous.candidates.resolve(played)?;
        let mut list = std::mem::take(&mut self.candidates);
        list.clear();
        let scanned = self.revalidate(previous, &mut list).and_then(|()| {
            let (px, py) = (played_mv.x() as i32, played_mv.y() as i32);
            let xs = (px - RESCAN_RADIUS).max(SCAN_MIN)..=(px + RESCAN_RADIUS).min(SCAN_MAX);
            let ys = (py - RESCAN_RADIUS).max(SCAN_MIN)..=(py + RESCAN_RADIUS).min(SCAN_MAX);
            self.scan_region(xs, ys, &mut list, true)
        });
        list.resolve_dominators();
        self.candidates = list;
        trace!(candidates = self.candidates.len(), "incremental scan");
        scanned
    }

    /// Append the moves of `previous`'s list that are still legal here.
    fn revalidate(&self, previous: &Grid, list: &mut CandidateList) -> Result<(), GridError> {
        for old in &previous.candidates {
            let (x, y) = (old.mv.x() as i32, old.mv.y() as i32);
            if !self.cell(x, y).is_empty() {
                continue;
            }
            if let Some(priority) = evaluate(self, old.mv) {
                list.push(Candidate::new(old.mv, priority))?;
            }
        }
        Ok(())
    }

    /// Scan every point of the rectangle `xs` by `ys`, x-major.
    fn scan_region(
        &self,
        xs: RangeInclusive<i32>,
        ys: RangeInclusive<i32>,
        list: &mut CandidateList,
        dedup: bool,
    ) -> Result<(), GridError> {
        for x in xs {
            for y in ys.clone() {
                self.scan_point(x, y, list, dedup)?;
            }
        }
        Ok(())
    }

    /// Append every legal move that places `(x, y)`.
    ///
    /// With `dedup`, moves already present in `list` are skipped.
    fn scan_point(&self, x: i32, y: i32, list: &mut CandidateList, dedup: bool) -> Result<(), GridError> {
        if !self.cell(x, y).is_empty() || !self.has_neighbor(x, y) {
            return Ok(());
        }
        for dir in Direction::ALL {
            let (dx, dy) = (dir.dx(), dir.dy());
            if self.cell(x + dx, y + dy).is_empty() && self.cell(x - dx, y - dy).is_empty() {
                continue;
            }
            for offset in 0..SEGMENT_LEN as u8 {
                let mv = Move::new(x as u8, y as u8, dir, offset);
                let Some(priority) = evaluate(self, mv) else {
                    continue;
                };
                if dedup && list.contains(mv) {
                    continue;
                }
                if on_rim(x, y) {
                    error!(%mv, "legal move on the lattice rim");
                    error!("\n{}", self.pretty());
                    return Err(GridError::LatticeTooSmall { mv });
                }
                list.push(Candidate::new(mv, priority))?;
            }
        }
        Ok(())
    }

    /// Return `true` if any of the eight neighbours of `(x, y)` is non-empty.
    fn has_neighbor(&self, x: i32, y: i32) -> bool {
        (-1..=1).any(|dx| (-1..=1).any(|dy| (dx, dy) != (0, 0) && !self.cell(x + dx, y + dy).is_empty()))
    }
}
