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

//! Image files to pixel grids and back.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::io::Reader as ImageReader;
use image::{ColorType, DynamicImage, ImageEncoder};
use ndarray::prelude::*;

use crate::error::{Result, ScrambleError};

/// A decoded image as a `(height, width, bytes per pixel)` grid.
///
/// Samples keep their native layout, so a pixel is moved as one unit
/// whatever its colour type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub pixels: Array3<u8>,
    pub color: ColorType,
}

impl Picture {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let im = ImageReader::new(BufReader::new(File::open(path)?))
            .with_guessed_format()?
            .decode()?;
        Self::from_image(im)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let im = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()?;
        Self::from_image(im)
    }

    /// Float images are widened to 16-bit RGBA, since PNG cannot store them.
    pub fn from_image(im: DynamicImage) -> Result<Self> {
        let im = match im.color() {
            ColorType::Rgb32F | ColorType::Rgba32F => DynamicImage::ImageRgba16(im.to_rgba16()),
            _ => im,
        };

        let color = im.color();
        let shape = (
            im.height() as usize,
            im.width() as usize,
            color.bytes_per_pixel() as usize,
        );
        let pixels = Array3::from_shape_vec(shape, im.into_bytes())?;

        Ok(Self { pixels, color })
    }

    pub fn width(&self) -> usize {
        self.pixels.len_of(Axis(1))
    }

    pub fn height(&self) -> usize {
        self.pixels.len_of(Axis(0))
    }

    /// Replace the pixel grid, keeping the colour type.
    pub fn map_pixels<F>(self, f: F) -> Self
    where
        F: FnOnce(Array3<u8>) -> Array3<u8>,
    {
        Self {
            pixels: f(self.pixels),
            color: self.color,
        }
    }

    /// Encode as PNG. Lossless, so unscrambling gets back every pixel.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        let (height, width, depth) = self.pixels.dim();
        let dims_err = || ScrambleError::Dimensions { width, height };
        if depth != self.color.bytes_per_pixel() as usize {
            return Err(dims_err());
        }
        let w = u32::try_from(width).map_err(|_| dims_err())?;
        let h = u32::try_from(height).map_err(|_| dims_err())?;

        let pixels = self.pixels.as_standard_layout();
        PngEncoder::new(writer).write_image(
            pixels.as_slice().expect("Should be standard-layout"),
            w,
            h,
            self.color,
        )?;

        Ok(())
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_png(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
