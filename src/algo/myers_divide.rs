//! Myers "divide and conquer": trace the edit graph forwards from the
//! start and backwards from the end until the two sweeps meet, then split
//! the problem at that mid-snake.
//!
//! Only one forward column and one backward column of the graph are kept,
//! so the memory use stays linear. The forward sweep indexes diagonals by
//! `k = x - y`; the backward sweep by `c = k + delta` where
//! `delta = right_len - left_len`, so both can centre their column at 0.
//! Forward positions can only meet backward ones on a shared diagonal
//! when `delta` is odd, and vice versa when it is even.

use tracing::trace;

use crate::engine::data::{Section, same_atom};
use crate::engine::error::DiffError;
use crate::engine::state::{DiffState, Verdict};

/// The snake on which the two sweeps met, in local atom indices.
#[derive(Debug, Clone, Copy)]
struct MidSnake {
    left_start: usize,
    left_end: usize,
    right_start: usize,
    right_end: usize,
}

/// One centred column of x values, indexed by a possibly negative
/// diagonal number. Unreached diagonals read as -1.
struct KdColumn {
    cells: Vec<i32>,
    mid: isize,
}

impl KdColumn {
    fn new(len: usize, mid: usize) -> Result<Self, DiffError> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, -1);
        Ok(KdColumn {
            cells,
            mid: mid as isize,
        })
    }

    fn at(&self, k: isize) -> isize {
        let column = self.mid + k;
        if column < 0 || column >= self.cells.len() as isize {
            return -1;
        }
        self.cells[column as usize] as isize
    }

    fn set(&mut self, k: isize, x: isize) {
        let column = (self.mid + k) as usize;
        self.cells[column] = x as i32;
    }
}

/// One forward step at distance `d`. Returns the mid-snake if this step
/// walked onto or past the backward sweep (which is still at `d - 1`).
fn forward_step(
    left: &Section<'_>,
    right: &Section<'_>,
    kd_forward: &mut KdColumn,
    kd_backward: &KdColumn,
    d: isize,
) -> Option<MidSnake> {
    let llen = left.len() as isize;
    let rlen = right.len() as isize;
    let delta = rlen - llen;

    let mut k = d;
    while k >= -d {
        if k < -rlen || k > llen {
            if k < 0 {
                break;
            }
            k -= 2;
            continue;
        }

        let prev_x;
        let prev_y;
        let mut x;
        if d == 0 {
            prev_x = 0;
            prev_y = 0;
            x = 0;
        } else if k > -d
            && (k == d || (k - 1 >= -rlen && kd_forward.at(k - 1) >= kd_forward.at(k + 1)))
        {
            // Step right from k - 1 (delete one left atom). Ties resolve
            // to this side so removals come before additions.
            prev_x = kd_forward.at(k - 1);
            prev_y = prev_x - (k - 1);
            x = prev_x + 1;
        } else {
            // Step down from k + 1 (add one right atom).
            prev_x = kd_forward.at(k + 1);
            prev_y = prev_x - (k + 1);
            x = prev_x;
        }

        while x >= 0 && x < llen && x - k >= 0 && x - k < rlen
            && same_atom(left, x as usize, right, (x - k) as usize)
        {
            x += 1;
        }
        kd_forward.set(k, x);

        if x < 0 || x > llen || x - k < 0 || x - k > rlen {
            k -= 2;
            continue;
        }

        // Forward and backward positions share diagonals only when the
        // length delta is odd; the backward sweep is still at d - 1.
        let backwards_d = d - 1;
        if (delta & 1) != 0 && backwards_d >= 0 {
            let c = k + delta;
            if c >= -backwards_d && c <= backwards_d {
                let backward_x = kd_backward.at(c);
                let backward_y = backward_x - c + delta;
                // Guard against two sweeps that sneaked past each other
                // on adjacent diagonals: the previous forward position
                // must not already have been past the backward one.
                if backward_x >= 0
                    && backward_y >= 0
                    && prev_x <= backward_x
                    && prev_y <= backward_y
                    && x >= backward_x
                {
                    return Some(MidSnake {
                        left_start: backward_x as usize,
                        left_end: x as usize,
                        right_start: backward_y as usize,
                        right_end: (x - k) as usize,
                    });
                }
            }
        }
        k -= 2;
    }
    None
}

/// One backward step at distance `d`, symmetric to [`forward_step`] but
/// walking up and left from the bottom-right corner.
fn backward_step(
    left: &Section<'_>,
    right: &Section<'_>,
    kd_forward: &KdColumn,
    kd_backward: &mut KdColumn,
    d: isize,
) -> Option<MidSnake> {
    let llen = left.len() as isize;
    let rlen = right.len() as isize;
    let delta = rlen - llen;

    let mut c = d;
    while c >= -d {
        if c < -llen || c > rlen {
            if c < 0 {
                break;
            }
            c -= 2;
            continue;
        }

        let prev_x;
        let prev_y;
        let mut x;
        if d == 0 {
            prev_x = llen;
            prev_y = rlen;
            x = llen;
        } else if c > -d
            && (c == d || (c - 1 >= -rlen && kd_backward.at(c - 1) <= kd_backward.at(c + 1)))
        {
            // Step up from c - 1: y -= 1 while x stays.
            prev_x = kd_backward.at(c - 1);
            prev_y = prev_x - (c - 1) + delta;
            x = prev_x;
        } else {
            // Step left from c + 1: x -= 1.
            prev_x = kd_backward.at(c + 1);
            prev_y = prev_x - (c + 1) + delta;
            x = prev_x - 1;
        }

        while x > 0 && x - c + delta > 0
            && x <= llen && x - c + delta <= rlen
            && same_atom(left, (x - 1) as usize, right, (x - c + delta - 1) as usize)
        {
            x -= 1;
        }
        kd_backward.set(c, x);

        if x < 0 || x > llen || x - c + delta < 0 || x - c + delta > rlen {
            c -= 2;
            continue;
        }

        // The two sweeps are at the same d now, so diagonals line up only
        // when the delta is even.
        if (delta & 1) == 0 {
            let k = c - delta;
            if k >= -d && k <= d {
                let forward_x = kd_forward.at(k);
                let forward_y = forward_x - k;
                if forward_y >= 0
                    && forward_x <= prev_x
                    && forward_y <= prev_y
                    && forward_x >= x
                {
                    return Some(MidSnake {
                        left_start: x as usize,
                        left_end: forward_x as usize,
                        right_start: (x - c + delta) as usize,
                        right_end: forward_y as usize,
                    });
                }
            }
        }
        c -= 2;
    }
    None
}

pub(crate) fn solve(state: &mut DiffState<'_, '_>) -> Result<Verdict, DiffError> {
    let left = state.left;
    let right = state.right;

    let max = left.len() + right.len();
    let column_len = max + 1;
    let mut kd_forward = KdColumn::new(column_len, max / 2)?;
    let mut kd_backward = KdColumn::new(column_len, max / 2)?;

    let mut mid_snake = None;
    for d in 0..=(max / 2) as isize {
        mid_snake = forward_step(&left, &right, &mut kd_forward, &kd_backward, d);
        if mid_snake.is_some() {
            break;
        }
        mid_snake = backward_step(&left, &right, &kd_forward, &mut kd_backward, d);
        if mid_snake.is_some() {
            break;
        }
    }

    // A snake ending at the left origin cannot subdivide anything; treat
    // it like a miss and let the fallback handle the whole section.
    let Some(snake) = mid_snake.filter(|s| s.left_end > 0) else {
        trace!("no usable mid-snake found");
        return Ok(Verdict::UseFallback);
    };
    trace!(?snake, "mid-snake found");

    // Section before the mid-snake.
    let left_section = snake.left_start;
    let right_section = snake.right_start;
    if left_section > 0 && right_section > 0 {
        state.push_chunk(false, 0, left_section, 0, right_section)?;
    } else if left_section > 0 {
        state.push_chunk(true, 0, left_section, 0, 0)?;
    } else if right_section > 0 {
        state.push_chunk(true, 0, 0, 0, right_section)?;
    }

    // The mid-snake itself: identical atoms on both sides.
    state.push_chunk(
        true,
        snake.left_start,
        snake.left_end - snake.left_start,
        snake.right_start,
        snake.right_end - snake.right_start,
    )?;

    // Section after the mid-snake.
    let left_section = left.len() - snake.left_end;
    let right_section = right.len() - snake.right_end;
    if left_section > 0 && right_section > 0 {
        state.push_chunk(false, snake.left_end, left_section, snake.right_end, right_section)?;
    } else if left_section > 0 {
        state.push_chunk(true, snake.left_end, left_section, snake.right_end, 0)?;
    } else if right_section > 0 {
        state.push_chunk(true, snake.left_end, 0, snake.right_end, right_section)?;
    }

    Ok(Verdict::Done)
}
