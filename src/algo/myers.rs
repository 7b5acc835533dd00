//! The classical Myers shortest-edit-script search, tracing the edit
//! graph from the start all the way to the end.
//!
//! The graph has `left_len + 1` columns and `right_len + 1` rows; moving
//! right deletes an atom from the left, moving down adds one from the
//! right, and diagonals ("snakes") cover identical atoms on both sides.
//! Only the x coordinate is stored per diagonal `k`, since `y = x - k`.
//! Keeping one state column per step `d` needs quadratic memory, which is
//! why this pass is bounded by `permitted_state_size` and defers to its
//! fallback above that.

use tracing::trace;

use crate::engine::config::AlgoConfig;
use crate::engine::data::same_atom;
use crate::engine::error::DiffError;
use crate::engine::state::{DiffState, Verdict};

/// The full `(max + 1) x (2 * max + 1)` state matrix, one row per step
/// `d`, centred so diagonal indexes may be negative.
struct KdMatrix {
    cells: Vec<i32>,
    width: usize,
    mid: isize,
}

impl KdMatrix {
    fn new(max: usize, cell_count: usize) -> Result<Self, DiffError> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(cell_count)?;
        cells.resize(cell_count, -1);
        Ok(KdMatrix {
            cells,
            width: 2 * max + 1,
            mid: max as isize,
        })
    }

    /// The x value recorded for diagonal `k` at step `d`, or -1 when that
    /// diagonal was never reached.
    fn at(&self, d: usize, k: isize) -> i32 {
        let column = self.mid + k;
        if column < 0 || column >= self.width as isize {
            return -1;
        }
        self.cells[d * self.width + column as usize]
    }

    fn set(&mut self, d: usize, k: isize, x: i32) {
        let column = (self.mid + k) as usize;
        self.cells[d * self.width + column] = x;
    }

    /// Once step `d` has been backtracked its row is no longer needed as
    /// diagonal state, so its two centre cells store the chosen (x, y)
    /// waypoint instead.
    fn set_waypoint(&mut self, d: usize, x: i32, y: i32) {
        let base = d * self.width + self.mid as usize;
        self.cells[base] = x;
        self.cells[base + 1] = y;
    }

    fn waypoint(&self, d: usize) -> (isize, isize) {
        let base = d * self.width + self.mid as usize;
        (self.cells[base] as isize, self.cells[base + 1] as isize)
    }
}

pub(crate) fn solve(
    algo_config: &AlgoConfig,
    state: &mut DiffState<'_, '_>,
) -> Result<Verdict, DiffError> {
    let left = state.left;
    let right = state.right;
    let llen = left.len() as isize;
    let rlen = right.len() as isize;

    let max = left.len() + right.len();
    if max == 0 {
        return Ok(Verdict::Done);
    }

    // Size the state up front; past the permitted budget this pass steps
    // aside instead of allocating.
    let width = 2 * max + 1;
    let Some(cell_count) = (max + 1).checked_mul(width) else {
        return Ok(Verdict::UseFallback);
    };
    let Some(byte_size) = cell_count.checked_mul(size_of::<i32>()) else {
        return Ok(Verdict::UseFallback);
    };
    if algo_config.permitted_state_size != 0 && byte_size > algo_config.permitted_state_size {
        trace!(
            byte_size,
            permitted = algo_config.permitted_state_size,
            "myers state too large"
        );
        return Ok(Verdict::UseFallback);
    }

    let mut kd = KdMatrix::new(max, cell_count)?;

    // Forward sweep until some diagonal reaches the bottom-right corner.
    let mut backtrack_d: isize = -1;
    let mut backtrack_k: isize = 0;
    'sweep: for d in 0..=max {
        let di = d as isize;
        let mut k = di;
        while k >= -di {
            if k < -rlen || k > llen {
                // Diagonal entirely outside the graph. Below the graph the
                // remaining (smaller) k are outside as well.
                if k < 0 {
                    break;
                }
                k -= 2;
                continue;
            }

            let mut x: isize;
            if d == 0 {
                x = 0;
            } else if k > -di
                && (k == di
                    || (k - 1 >= -rlen && kd.at(d - 1, k - 1) >= kd.at(d - 1, k + 1)))
            {
                // Step right from k - 1: delete one atom from the left.
                // Preferring this side on ties emits "-" lines first.
                x = kd.at(d - 1, k - 1) as isize + 1;
            } else {
                // Step down from k + 1: add one atom from the right.
                x = kd.at(d - 1, k + 1) as isize;
            }

            while x >= 0 && x < llen && x - k >= 0 && x - k < rlen
                && same_atom(&left, x as usize, &right, (x - k) as usize)
            {
                x += 1;
            }
            kd.set(d, k, x as i32);

            if x == llen && x - k == rlen {
                backtrack_d = di;
                backtrack_k = k;
                break 'sweep;
            }
            k -= 2;
        }
    }

    if backtrack_d < 0 {
        return Ok(Verdict::UseFallback);
    }

    // Backtrack from the end, keeping for every d the position on the
    // chosen shortest path.
    let mut d = backtrack_d;
    let mut k = backtrack_k;
    loop {
        let x = kd.at(d as usize, k) as isize;
        let y = x - k;
        kd.set_waypoint(d as usize, x as i32, y as i32);

        if d == 0 {
            break;
        }
        // When y == 0 only a rightward lead-in can precede this position;
        // when x == 0 only a downward one.
        if y == 0 || (x > 0 && kd.at(d as usize - 1, k - 1) >= kd.at(d as usize - 1, k + 1)) {
            k -= 1;
        } else {
            k += 1;
        }
        d -= 1;
    }

    // Forwards again, emitting chunks between consecutive waypoints. Each
    // step is a pure horizontal (delete one), a pure vertical (insert
    // one), or a single edit leading into a snake.
    let mut x: isize = 0;
    let mut y: isize = 0;
    for d in 0..=backtrack_d as usize {
        let (next_x, next_y) = kd.waypoint(d);

        let mut left_at = x;
        let mut right_at = y;
        let mut left_section = next_x - x;
        let mut right_section = next_y - y;

        if left_section > 0 && right_section > 0 {
            if left_section == right_section + 1 {
                state.push_chunk(true, left_at as usize, 1, right_at as usize, 0)?;
                left_at += 1;
                left_section -= 1;
            } else if right_section == left_section + 1 {
                state.push_chunk(true, left_at as usize, 0, right_at as usize, 1)?;
                right_at += 1;
                right_section -= 1;
            } else if left_section != right_section {
                // The waypoints make no sense. Should never happen.
                return Ok(Verdict::UseFallback);
            }
            state.push_chunk(
                true,
                left_at as usize,
                left_section as usize,
                right_at as usize,
                right_section as usize,
            )?;
        } else if left_section > 0 {
            state.push_chunk(true, left_at as usize, left_section as usize, right_at as usize, 0)?;
        } else if right_section > 0 {
            state.push_chunk(true, left_at as usize, 0, right_at as usize, right_section as usize)?;
        }

        x = next_x;
        y = next_y;
    }

    Ok(Verdict::Done)
}

#[cfg(test)]
mod tests {
    use crate::engine::chunk::ChunkKind;
    use crate::engine::config::{AlgoConfig, AlgoId, Algorithm, DiffConfig};
    use crate::engine::{DiffResult, diff};
    use bytes::Bytes;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn myers_only(permitted_state_size: usize) -> DiffConfig {
        DiffConfig {
            algos: vec![
                AlgoConfig::new(Algorithm::Myers, permitted_state_size, None, Some(AlgoId(1))),
                AlgoConfig::new(Algorithm::None, 0, None, None),
            ],
            root: AlgoId(0),
            ..DiffConfig::standard()
        }
    }

    fn run(config: &DiffConfig, left: &str, right: &str) -> DiffResult {
        diff(
            config,
            Bytes::copy_from_slice(left.as_bytes()),
            Bytes::copy_from_slice(right.as_bytes()),
        )
        .expect("diff")
    }

    fn summary(result: &DiffResult) -> Vec<(ChunkKind, usize, usize)> {
        result
            .chunks
            .iter()
            .map(|c| (c.kind(), c.left_count, c.right_count))
            .collect()
    }

    #[rstest]
    fn classic_myers_example() {
        let result = run(&myers_only(0), "A\nB\nC\nD\nE\n", "X\nB\nC\nY\n");

        assert_eq!(
            summary(&result),
            vec![
                (ChunkKind::Minus, 1, 0),
                (ChunkKind::Plus, 0, 1),
                (ChunkKind::Equal, 2, 2),
                (ChunkKind::Minus, 2, 0),
                (ChunkKind::Plus, 0, 1),
            ]
        );
    }

    #[rstest]
    fn equal_inputs_become_one_equal_chunk() {
        let result = run(&myers_only(0), "a\nb\nc\n", "a\nb\nc\n");
        assert_eq!(summary(&result), vec![(ChunkKind::Equal, 3, 3)]);
    }

    #[rstest]
    fn pure_insertion_and_deletion() {
        let result = run(&myers_only(0), "", "x\n");
        assert_eq!(summary(&result), vec![(ChunkKind::Plus, 0, 1)]);

        let result = run(&myers_only(0), "x\n", "");
        assert_eq!(summary(&result), vec![(ChunkKind::Minus, 1, 0)]);
    }

    #[rstest]
    fn deletion_is_preferred_before_insertion() {
        // Replacing a line must list the removal before the addition.
        let result = run(&myers_only(0), "a\nmid\nz\n", "a\nMID\nz\n");
        assert_eq!(
            summary(&result),
            vec![
                (ChunkKind::Equal, 1, 1),
                (ChunkKind::Minus, 1, 0),
                (ChunkKind::Plus, 0, 1),
                (ChunkKind::Equal, 1, 1),
            ]
        );
    }

    #[rstest]
    fn tight_state_budget_falls_back() {
        // A one-byte budget can never fit the matrix, so the fallback
        // (trivial) pass must produce the result instead.
        let bounded = run(&myers_only(1), "a\nb\nc\n", "a\nx\nc\n");
        assert_eq!(
            summary(&bounded),
            vec![
                (ChunkKind::Equal, 1, 1),
                (ChunkKind::Minus, 2, 0),
                (ChunkKind::Plus, 0, 2),
            ]
        );
    }

    #[rstest]
    fn unbounded_budget_never_falls_back() {
        // With no byte cap the full pass handles arbitrary shapes; the
        // minimal script keeps the shared middle as one equal run.
        let result = run(&myers_only(0), "p\nq\nsame\nr\n", "x\nsame\ny\nz\n");
        let kinds: Vec<_> = result.chunks.iter().map(|c| c.kind()).collect();
        assert!(kinds.contains(&ChunkKind::Equal));

        let equal_total: usize = result
            .chunks
            .iter()
            .filter(|c| c.kind() == ChunkKind::Equal)
            .map(|c| c.left_count)
            .sum();
        assert_eq!(equal_total, 1);
    }
}
