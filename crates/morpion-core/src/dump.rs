//! Human-readable diagnostic dump of a grid.

use std::collections::HashMap;
use std::fmt;

use crate::direction::Direction;
use crate::grid::Grid;

/// Wrapper for pretty-printing a grid: summary, history, candidates, and an
/// ASCII drawing of the occupied region with every drawn segment.
///
/// Each point is drawn as a 5x5 character block. Placed points show their
/// move number, start points show `+`, and the strokes around them show which
/// segment ends and interiors pass through.
pub struct PrettyGrid<'a>(&'a Grid);

impl<'a> PrettyGrid<'a> {
    pub(crate) fn new(grid: &'a Grid) -> PrettyGrid<'a> {
        PrettyGrid(grid)
    }
}

impl fmt::Display for PrettyGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.0;
        writeln!(
            f,
            "points={} moves={} signature={}",
            grid.point_count(),
            grid.moves_played(),
            grid.signature()
        )?;
        let Some((x0, x1, y0, y1)) = grid.bounds() else {
            return writeln!(f, "(empty)");
        };
        writeln!(f, "x={x0}..{x1} y={y0}..{y1}")?;

        writeln!(f, "history:")?;
        for (i, mv) in grid.history().iter().enumerate() {
            writeln!(f, "  {:03} {:06} {mv}", i + 1, mv.key())?;
        }
        writeln!(f, "candidates:")?;
        for (i, c) in grid.candidates().iter().enumerate() {
            let dominator = c.dominator.map_or_else(|| "-".to_string(), |d| d.to_string());
            writeln!(
                f,
                "  {i:03} {:06} {} dom={dominator} p={} c={}",
                c.mv.key(),
                c.mv,
                c.priority,
                c.code
            )?;
        }

        let numbers: HashMap<(i32, i32), usize> = grid
            .history()
            .iter()
            .enumerate()
            .map(|(i, mv)| ((mv.x() as i32, mv.y() as i32), i + 1))
            .collect();

        let (v, d, h, a) = (
            Direction::Vertical,
            Direction::Diagonal,
            Direction::Horizontal,
            Direction::AntiDiagonal,
        );
        for y in (y0..=y1).rev() {
            let mut lines: [String; 5] = Default::default();
            lines[0].push_str("    | ");
            lines[1].push_str("    | ");
            lines[2].push_str(&format!("{y:03} | "));
            lines[3].push_str("    | ");
            lines[4].push_str("    | ");
            for x in x0..=x1 {
                let c = grid.cell(x, y);
                let pick = |on: bool, s: &'static str, blank: &'static str| if on { s } else { blank };
                // Up-left, up, up-right.
                lines[0].push_str(pick(c.backward_used(a), "\\ ", "  "));
                lines[0].push_str(pick(c.forward_used(v), "|", " "));
                lines[0].push_str(pick(c.forward_used(d), " /", "  "));
                lines[1].push_str(pick(c.backward_used(a), " \\", "  "));
                lines[1].push_str(pick(c.forward_used(v), "|", " "));
                lines[1].push_str(pick(c.forward_used(d), "/ ", "  "));
                // Left, the point, right.
                lines[2].push_str(pick(c.backward_used(h), "-", " "));
                let label = match numbers.get(&(x, y)) {
                    Some(n) => format!("{n:03}"),
                    None if c.is_occupied() => " + ".to_string(),
                    None => "   ".to_string(),
                };
                lines[2].push_str(&label);
                lines[2].push_str(pick(c.forward_used(h), "-", " "));
                // Down-left, down, down-right.
                lines[3].push_str(pick(c.backward_used(d), " /", "  "));
                lines[3].push_str(pick(c.backward_used(v), "|", " "));
                lines[3].push_str(pick(c.forward_used(a), "\\ ", "  "));
                lines[4].push_str(pick(c.backward_used(d), "/ ", "  "));
                lines[4].push_str(pick(c.backward_used(v), "|", " "));
                lines[4].push_str(pick(c.forward_used(a), " \\", "  "));
            }
            for line in &lines {
                writeln!(f, "{}", line.trim_end())?;
            }
        }
        write!(f, "----+-")?;
        for x in x0..=x1 {
            write!(f, "-{x:03}-")?;
        }
        writeln!(f)
    }
}
