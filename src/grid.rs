// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Reversible grid transforms.
//!
//! Every function treats axis 0 as rows and axis 1 as columns.
//! Any further axes (pixel channels, for example) move together
//! with their cell.

use ndarray::prelude::*;
use ndarray::{RemoveAxis, Slice};

use crate::key::Key;
use crate::network::{Direction, Turn};

/// Copy `src` into `dst`, rolled left by `n` along axis 0.
fn roll_into<A, D>(src: ArrayView<'_, A, D>, mut dst: ArrayViewMut<'_, A, D>, n: isize)
where
    A: Clone,
    D: Dimension,
{
    let len = src.len_of(Axis(0));
    if len == 0 {
        return;
    }
    let n = n.rem_euclid(len as isize) as usize;

    dst.slice_axis_mut(Axis(0), Slice::from(..len - n))
        .assign(&src.slice_axis(Axis(0), Slice::from(n..)));
    dst.slice_axis_mut(Axis(0), Slice::from(len - n..))
        .assign(&src.slice_axis(Axis(0), Slice::from(..n)));
}

/// Circularly shift a sequence left by `n` along axis 0.
///
/// `out[i] = seq[(i + n) mod len]`. Negative `n` shifts right.
pub fn rotate_1d<A, D>(seq: ArrayView<'_, A, D>, n: isize) -> Array<A, D>
where
    A: Clone,
    D: Dimension,
{
    let mut out = seq.to_owned();
    roll_into(seq, out.view_mut(), n);
    out
}

/// Rotate a grid by 90°. Row and column counts swap.
///
/// Panics if `grid` has fewer than 2 dimensions.
pub fn rotate_2d<A, D>(grid: ArrayView<'_, A, D>, turn: Turn) -> Array<A, D>
where
    A: Clone,
    D: Dimension,
{
    assert!(grid.ndim() >= 2, "Grid must have at least 2 dimensions");

    let mut view = grid;
    view.swap_axes(0, 1);
    match turn {
        // out[y][x] = in[rows - 1 - x][y]
        Turn::Clockwise => view.invert_axis(Axis(1)),
        // out[y][x] = in[x][cols - 1 - y]
        Turn::CounterClockwise => view.invert_axis(Axis(0)),
    }
    view.as_standard_layout().into_owned()
}

/// Diagonal shear: row `i` is rotated by `floor(cols * i / rows)`.
///
/// [`Direction::Backward`] applies the exact negated shifts.
///
/// Panics if `grid` has fewer than 2 dimensions.
pub fn slant<A, D>(grid: ArrayView<'_, A, D>, direction: Direction) -> Array<A, D>
where
    A: Clone,
    D: RemoveAxis,
{
    assert!(grid.ndim() >= 2, "Grid must have at least 2 dimensions");

    let rows = grid.len_of(Axis(0));
    let cols = grid.len_of(Axis(1));
    let mut out = grid.to_owned();

    for (i, (src, dst)) in grid
        .axis_iter(Axis(0))
        .zip(out.axis_iter_mut(Axis(0)))
        .enumerate()
    {
        let shift = (cols * i / rows) as isize;
        roll_into(src, dst, direction.signed(shift));
    }

    out
}

/// Keyed row permutation.
///
/// Key entries that do not address a row are skipped. Going forward,
/// the `j`-th accepted entry names the input row that lands at row `j`.
/// Going backward, input row `j` is sent back to that entry.
/// Rows the key never reaches keep their position.
pub fn scramble<A, D>(grid: ArrayView<'_, A, D>, key: &Key, direction: Direction) -> Array<A, D>
where
    A: Clone,
    D: RemoveAxis,
{
    let rows = grid.len_of(Axis(0));

    let mut order: Vec<usize> = key.iter().copied().filter(|&k| k < rows).collect();
    order.extend(order.len()..rows);

    match direction {
        Direction::Forward => grid.select(Axis(0), &order),
        Direction::Backward => {
            let mut inverse = vec![0; rows];
            for (j, &k) in order.iter().enumerate() {
                inverse[k] = j;
            }
            grid.select(Axis(0), &inverse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(v: &[usize]) -> Key {
        Key::new(v.to_vec()).unwrap()
    }

    #[test]
    fn rotate_1d_left() {
        let a = array![0, 1, 2, 3, 4];
        assert_eq!(rotate_1d(a.view(), 2), array![2, 3, 4, 0, 1]);
        assert_eq!(rotate_1d(a.view(), -2), array![3, 4, 0, 1, 2]);
        assert_eq!(rotate_1d(a.view(), 5), a);
        assert_eq!(rotate_1d(a.view(), 12), rotate_1d(a.view(), 2));
    }

    #[test]
    fn rotate_1d_empty() {
        let a = Array1::<u8>::zeros(0);
        assert_eq!(rotate_1d(a.view(), 3), a);
    }

    #[test]
    fn rotate_1d_moves_trailing_axes() {
        let a = array![[0, 0], [1, 1], [2, 2]];
        assert_eq!(rotate_1d(a.view(), 1), array![[1, 1], [2, 2], [0, 0]]);
    }

    #[test]
    fn rotate_2d_clockwise() {
        let a = array![[1, 2, 3], [4, 5, 6]];
        let cw = rotate_2d(a.view(), Turn::Clockwise);
        assert_eq!(cw, array![[4, 1], [5, 2], [6, 3]]);
        assert!(cw.is_standard_layout());
    }

    #[test]
    fn rotate_2d_counter_clockwise() {
        let a = array![[1, 2, 3], [4, 5, 6]];
        let ccw = rotate_2d(a.view(), Turn::CounterClockwise);
        assert_eq!(ccw, array![[3, 6], [2, 5], [1, 4]]);
        assert_eq!(rotate_2d(ccw.view(), Turn::Clockwise), a);
    }

    #[test]
    fn rotate_2d_keeps_channels() {
        let a = array![[[1, 10], [2, 20]], [[3, 30], [4, 40]]];
        let cw = rotate_2d(a.view(), Turn::Clockwise);
        assert_eq!(cw, array![[[3, 30], [1, 10]], [[4, 40], [2, 20]]]);
    }

    #[test]
    fn slant_shears_rows() {
        let a = array![[0, 1, 2, 3], [0, 1, 2, 3], [0, 1, 2, 3], [0, 1, 2, 3]];
        let s = slant(a.view(), Direction::Forward);
        assert_eq!(
            s,
            array![[0, 1, 2, 3], [1, 2, 3, 0], [2, 3, 0, 1], [3, 0, 1, 2]]
        );
        assert_eq!(slant(s.view(), Direction::Backward), a);
    }

    #[test]
    fn slant_wide_grid() {
        // cols / rows = 3, so row 1 moves by 3
        let a = array![[0, 1, 2, 3, 4, 5], [0, 1, 2, 3, 4, 5]];
        let s = slant(a.view(), Direction::Forward);
        assert_eq!(s, array![[0, 1, 2, 3, 4, 5], [3, 4, 5, 0, 1, 2]]);
    }

    #[test]
    fn slant_empty() {
        let a = Array2::<u8>::zeros((0, 4));
        assert_eq!(slant(a.view(), Direction::Forward), a);
    }

    #[test]
    fn scramble_forward_picks_rows() {
        let a = array![[0], [1], [2]];
        let k = key(&[4, 2, 0, 3, 1]);
        let s = scramble(a.view(), &k, Direction::Forward);
        assert_eq!(s, array![[2], [0], [1]]);
        assert_eq!(scramble(s.view(), &k, Direction::Backward), a);
    }

    #[test]
    fn scramble_short_key_keeps_tail() {
        let a = array![[0], [1], [2], [3], [4]];
        let k = key(&[2, 0, 1]);
        let s = scramble(a.view(), &k, Direction::Forward);
        assert_eq!(s, array![[2], [0], [1], [3], [4]]);
        assert_eq!(scramble(s.view(), &k, Direction::Backward), a);
    }
}
