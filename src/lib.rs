//! Library to reversibly scramble the pixel positions of an image.
//!
//! A password is turned into a permutation key, which drives a fixed
//! network of row permutations, diagonal shears and quarter turns.
//! Running the network backward with the same key restores the
//! original exactly:
//!
//! * No element is duplicated nor removed, only moved.
//! * Every cell's final position depends on both its row and column.
//! * Pixel values are left untouched, so this is obfuscation and
//!   not encryption.
//!
//! ```
//! use ndarray::Array2;
//! use pixel_scrambler::{Config, Scrambler};
//!
//! let scrambler = Scrambler::new("hunter2", &Config::default());
//! let grid = Array2::from_shape_fn((30, 40), |(y, x)| y * 40 + x);
//!
//! let scrambled = scrambler.scramble(grid.clone());
//! assert_eq!(scrambler.unscramble(scrambled), grid);
//! ```

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
//

pub mod config;
pub mod error;
pub mod grid;
pub mod key;
pub mod network;
pub mod picture;
mod scrambler;

#[doc(inline)]
pub use crate::config::{Config, ConfigBuilder, DEFAULT_GRID_SIDE, MAX_GRID_SIDE};
#[doc(inline)]
pub use crate::error::{Result, ScrambleError};
#[doc(inline)]
pub use crate::key::{derive_key, Key};
#[doc(inline)]
pub use crate::network::{permute, Direction, Stage, Turn, NETWORK};
#[doc(inline)]
pub use crate::picture::Picture;
#[doc(inline)]
pub use crate::scrambler::Scrambler;
