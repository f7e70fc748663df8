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

//! Error type shared by the library.

use thiserror::Error;

/// Errors produced while building keys or moving pictures in and out of grids.
///
/// Key derivation and the permutation network themselves cannot fail.
#[derive(Debug, Error)]
pub enum ScrambleError {
    /// Key entries are not a permutation of `0..len`.
    #[error("key is not a permutation of 0..{len}")]
    InvalidKey { len: usize },

    /// The key grid must have at least one cell.
    #[error("key grid side must be at least 1")]
    EmptyKeyGrid,

    /// The key grid would be too large to build.
    #[error("key grid side {grid_side} exceeds the maximum of {max}")]
    KeyGridTooLarge { grid_side: usize, max: usize },

    /// Grid shape cannot be represented as an image.
    #[error("grid of {width}x{height} pixels cannot be stored as an image")]
    Dimensions { width: usize, height: usize },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T, E = ScrambleError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_key() {
        let err = ScrambleError::InvalidKey { len: 4 };
        assert_eq!(err.to_string(), "key is not a permutation of 0..4");
    }

    #[test]
    fn display_key_grid_too_large() {
        let err = ScrambleError::KeyGridTooLarge {
            grid_side: 5000,
            max: 4096,
        };
        assert_eq!(
            err.to_string(),
            "key grid side 5000 exceeds the maximum of 4096"
        );
    }

    #[test]
    fn display_dimensions() {
        let err = ScrambleError::Dimensions {
            width: 3,
            height: 0,
        };
        assert_eq!(
            err.to_string(),
            "grid of 3x0 pixels cannot be stored as an image"
        );
    }

    #[test]
    fn io_error_converts() {
        let err: ScrambleError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(err, ScrambleError::Io(_)));
    }
}
