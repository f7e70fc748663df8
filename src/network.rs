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

//! The permutation network.
//!
//! Three rounds of scramble/slant/scramble, separated by a clockwise and
//! a counter-clockwise quarter turn. The turn exposes the sheared columns
//! as rows for the next keyed scramble, so a cell's final position depends
//! on both its original row and column.
//!
//! Unscrambling runs the very same table with [`Direction::Backward`].
//! The table is a palindrome whose rotations sit at mirrored positions,
//! and the inverse of a clockwise turn is a counter-clockwise one, so the
//! backward pass undoes the forward pass stage by stage.

use ndarray::prelude::*;
use ndarray::RemoveAxis;
use tracing::trace;

use crate::grid::{rotate_2d, scramble, slant};
use crate::key::Key;

/// Whether to apply the permutation or its inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub(crate) fn signed(self, n: isize) -> isize {
        match self {
            Self::Forward => n,
            Self::Backward => -n,
        }
    }
}

/// Quarter turn direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

/// A single network stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Keyed row permutation, see [`scramble`](crate::grid::scramble).
    Scramble,
    /// Diagonal shear, see [`slant`](crate::grid::slant).
    Slant,
    /// Quarter turn. Same turn in both directions.
    Rotate(Turn),
}

/// Stage order, used as-is for both directions.
pub const NETWORK: [Stage; 11] = [
    Stage::Scramble,
    Stage::Slant,
    Stage::Scramble,
    Stage::Rotate(Turn::Clockwise),
    Stage::Scramble,
    Stage::Slant,
    Stage::Scramble,
    Stage::Rotate(Turn::CounterClockwise),
    Stage::Scramble,
    Stage::Slant,
    Stage::Scramble,
];

impl Stage {
    /// Run this stage on `grid`.
    ///
    /// Panics if `grid` has fewer than 2 dimensions and the stage is
    /// [`Stage::Slant`] or [`Stage::Rotate`].
    pub fn apply<A, D>(
        self,
        grid: ArrayView<'_, A, D>,
        key: &Key,
        direction: Direction,
    ) -> Array<A, D>
    where
        A: Clone,
        D: RemoveAxis,
    {
        match self {
            Self::Scramble => scramble(grid, key, direction),
            Self::Slant => slant(grid, direction),
            Self::Rotate(turn) => rotate_2d(grid, turn),
        }
    }
}

/// Push `grid` through every stage of [`NETWORK`].
///
/// Parameters:
/// * `grid` : Grid to permute. Can be multidimensional,
///   but only the first 2 dimensions are permuted.
/// * `key` : Row permutation key. Should be at least as long as
///   the larger of the first 2 dimensions, otherwise some rows are
///   left in place by the scramble stages.
/// * `direction` : [`Direction::Backward`] undoes [`Direction::Forward`].
///
/// Panics if `grid` has fewer than 2 dimensions.
pub fn permute<A, D>(grid: Array<A, D>, key: &Key, direction: Direction) -> Array<A, D>
where
    A: Clone,
    D: RemoveAxis,
{
    NETWORK
        .iter()
        .enumerate()
        .fold(grid, |grid, (i, stage)| {
            let out = stage.apply(grid.view(), key, direction);
            trace!(stage = i, ?stage, shape = ?out.shape(), "network stage");
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(len: usize) -> Key {
        // Deterministic non-trivial permutation: multiply by a unit mod len.
        let step = (1..len).rev().find(|s| gcd(*s, len) == 1).unwrap_or(1);
        Key::new((0..len).map(|i| i * step % len).collect()).unwrap()
    }

    fn gcd(a: usize, b: usize) -> usize {
        if b == 0 {
            a
        } else {
            gcd(b, a % b)
        }
    }

    #[test]
    fn network_is_palindrome_of_stages() {
        for (a, b) in NETWORK.iter().zip(NETWORK.iter().rev()) {
            match (a, b) {
                (Stage::Rotate(x), Stage::Rotate(y)) => assert_ne!(x, y),
                _ => assert_eq!(a, b),
            }
        }
    }

    #[test]
    fn each_stage_inverts() {
        let grid = Array2::from_shape_fn((5, 7), |(y, x)| y * 7 + x);
        let k = key(9);
        for stage in NETWORK {
            let fwd = stage.apply(grid.view(), &k, Direction::Forward);
            let undo = match stage {
                Stage::Rotate(Turn::Clockwise) => Stage::Rotate(Turn::CounterClockwise),
                Stage::Rotate(Turn::CounterClockwise) => Stage::Rotate(Turn::Clockwise),
                _ => stage,
            };
            let back = undo.apply(fwd.view(), &k, Direction::Backward);
            assert_eq!(back, grid, "{stage:?}");
        }
    }

    #[test]
    fn permute_round_trip_square() {
        let grid = Array2::from_shape_fn((8, 8), |(y, x)| y * 8 + x);
        let k = key(8);
        let fwd = permute(grid.clone(), &k, Direction::Forward);
        assert_ne!(fwd, grid);
        assert_eq!(permute(fwd, &k, Direction::Backward), grid);
    }

    #[test]
    fn permute_round_trip_non_square() {
        for (rows, cols) in [(3, 11), (11, 3), (1, 6), (6, 1), (10, 7)] {
            let grid = Array2::from_shape_fn((rows, cols), |(y, x)| y * cols + x);
            let k = key(rows.max(cols) + 2);
            let fwd = permute(grid.clone(), &k, Direction::Forward);
            assert_eq!(fwd.dim(), (rows, cols));
            assert_eq!(permute(fwd, &k, Direction::Backward), grid);
        }
    }

    #[test]
    fn permute_keeps_shape_with_channels() {
        let grid = Array3::from_shape_fn((4, 6, 3), |(y, x, c)| (y * 6 + x) * 3 + c);
        let k = key(6);
        let fwd = permute(grid.clone(), &k, Direction::Forward);
        assert_eq!(fwd.dim(), (4, 6, 3));
        for pixel in fwd.lanes(Axis(2)) {
            assert_eq!(pixel[1], pixel[0] + 1);
            assert_eq!(pixel[2], pixel[0] + 2);
        }
        assert_eq!(permute(fwd, &k, Direction::Backward), grid);
    }

    #[test]
    fn direction_sign() {
        assert_eq!(Direction::Forward.signed(3), 3);
        assert_eq!(Direction::Backward.signed(3), -3);
    }

    #[test]
    #[should_panic(expected = "at least 2 dimensions")]
    fn permute_rejects_1d() {
        let seq = Array1::from_iter(0..6usize);
        permute(seq, &key(6), Direction::Forward);
    }
}
