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

use ndarray::prelude::*;
use ndarray::RemoveAxis;
use tracing::warn;

use crate::config::Config;
use crate::key::{derive_key, Key};
use crate::network::{permute, Direction};

/// Password-keyed pixel scrambler.
///
/// The key is derived once on construction and reused for every grid.
#[derive(Debug, Clone)]
pub struct Scrambler {
    key: Key,
}

impl Scrambler {
    pub fn new(password: &str, config: &Config) -> Self {
        Self::with_key(derive_key(password, config))
    }

    pub fn with_key(key: Key) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Permute the first 2 dimensions of `grid`.
    ///
    /// Running [`Direction::Backward`] on the output of
    /// [`Direction::Forward`] restores the input exactly.
    pub fn transform<A, D>(&self, grid: Array<A, D>, direction: Direction) -> Array<A, D>
    where
        A: Clone,
        D: RemoveAxis,
    {
        let reach = grid.shape().iter().take(2).copied().max().unwrap_or(0);
        if reach > self.key.len() {
            warn!(
                reach,
                key_len = self.key.len(),
                "grid is larger than the key, some rows will not be scrambled"
            );
        }

        permute(grid, &self.key, direction)
    }

    pub fn scramble<A, D>(&self, grid: Array<A, D>) -> Array<A, D>
    where
        A: Clone,
        D: RemoveAxis,
    {
        self.transform(grid, Direction::Forward)
    }

    pub fn unscramble<A, D>(&self, grid: Array<A, D>) -> Array<A, D>
    where
        A: Clone,
        D: RemoveAxis,
    {
        self.transform(grid, Direction::Backward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    #[test]
    fn round_trip() {
        let config = ConfigBuilder::new().grid_side(8).build().unwrap();
        let scrambler = Scrambler::new("secret", &config);
        let grid = Array2::from_shape_fn((13, 21), |(y, x)| (y * 21 + x) as u16);

        let scrambled = scrambler.scramble(grid.clone());
        assert_ne!(scrambled, grid);
        assert_eq!(scrambler.unscramble(scrambled), grid);
    }

    #[test]
    fn key_shorter_than_grid_still_round_trips() {
        let scrambler = Scrambler::with_key(Key::new(vec![2, 0, 1]).unwrap());
        let grid = Array2::from_shape_fn((5, 9), |(y, x)| y * 9 + x);

        let scrambled = scrambler.scramble(grid.clone());
        assert_eq!(scrambler.unscramble(scrambled), grid);
    }

    #[test]
    fn same_password_same_key() {
        let config = ConfigBuilder::new().grid_side(4).build().unwrap();
        let a = Scrambler::new("pw", &config);
        let b = Scrambler::new("pw", &config);
        assert_eq!(a.key(), b.key());
    }
}
