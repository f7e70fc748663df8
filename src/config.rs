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

use tracing::warn;

use crate::error::{Result, ScrambleError};
use crate::key::EXTENDED_KEY_LEN;

/// Default side of the square index grid used to build the derived key.
pub const DEFAULT_GRID_SIDE: usize = 128;

/// Largest accepted key grid side. The derived key then has 16M entries.
pub const MAX_GRID_SIDE: usize = 4096;

/// Key derivation settings.
///
/// The derived key has `grid_side²` entries, and the largest image dimension
/// it can fully permute is that length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    grid_side: usize,
}

impl Config {
    pub fn grid_side(&self) -> usize {
        self.grid_side
    }

    /// Length of the key derived under this config.
    pub fn derived_key_len(&self) -> usize {
        self.grid_side * self.grid_side
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_side: DEFAULT_GRID_SIDE,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    grid_side: Option<usize>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid_side(mut self, grid_side: usize) -> Self {
        self.grid_side = Some(grid_side);
        self
    }

    pub fn build(self) -> Result<Config> {
        let grid_side = self.grid_side.unwrap_or(DEFAULT_GRID_SIDE);
        if grid_side == 0 {
            return Err(ScrambleError::EmptyKeyGrid);
        }
        if grid_side > MAX_GRID_SIDE || grid_side.checked_mul(grid_side).is_none() {
            return Err(ScrambleError::KeyGridTooLarge {
                grid_side,
                max: MAX_GRID_SIDE,
            });
        }
        if grid_side > EXTENDED_KEY_LEN {
            warn!(
                grid_side,
                extended_key_len = EXTENDED_KEY_LEN,
                "key grid is taller than the extended key, trailing rows stay in place"
            );
        }

        Ok(Config { grid_side })
    }
}
