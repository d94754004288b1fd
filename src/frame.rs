// ============================================================================
// FRAME — RGBA pixel grid and frame-level filter application
// ============================================================================
//
// Every pixel is transformed independently, so frames are split into rows and
// processed via rayon. A frame is either fully transformed or not produced at
// all; there are no partial results.
// ============================================================================

use std::fmt;

use image::RgbaImage;
use rayon::prelude::*;

use crate::filter::{ColorInversionFilter, Pixel};

#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// The pixel buffer does not hold exactly `width * height` pixels.
    DimensionMismatch { expected: usize, actual: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::DimensionMismatch { expected, actual } => write!(
                f,
                "frame buffer holds {} pixels, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for FrameError {}

/// A rendered image in normalized float space, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Frame {
    /// Fully transparent black frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width as usize * height as usize],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(FrameError::DimensionMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    pub fn filled(width: u32, height: u32, px: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![px; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Returns `false` when `(x, y)` is outside the frame.
    pub fn set(&mut self, x: u32, y: u32, px: Pixel) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.index(x, y);
        self.pixels[idx] = px;
        true
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        let pixels = img
            .as_raw()
            .par_chunks_exact(4)
            .map(|c| Pixel::from_rgba8([c[0], c[1], c[2], c[3]]))
            .collect();
        Self {
            width: img.width(),
            height: img.height(),
            pixels,
        }
    }

    /// Quantize to 8 bits. Components outside [0,1] saturate.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let raw: Vec<u8> = self
            .pixels
            .par_iter()
            .flat_map_iter(|px| px.to_rgba8())
            .collect();
        // Length is width * height * 4 by construction.
        RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

impl ColorInversionFilter {
    /// Apply the filter to a whole frame when `enabled`, otherwise return an
    /// identical copy. The input frame is never modified.
    pub fn apply_to_frame(&self, frame: &Frame, enabled: bool) -> Frame {
        if !enabled {
            return frame.clone();
        }
        let mut out = frame.clone();
        self.apply_in_place(&mut out);
        out
    }

    /// Transform every pixel of `frame` in place.
    pub fn apply_in_place(&self, frame: &mut Frame) {
        let w = frame.width as usize;
        if w == 0 || frame.height == 0 {
            return;
        }
        frame.pixels.par_chunks_mut(w).for_each(|row| {
            for px in row.iter_mut() {
                *px = self.apply(*px);
            }
        });
    }

    /// 8-bit counterpart of [`apply_to_frame`](Self::apply_to_frame).
    /// Alpha bytes are copied through unchanged.
    pub fn apply_to_rgba_image(&self, img: &RgbaImage, enabled: bool) -> RgbaImage {
        let w = img.width() as usize;
        let h = img.height() as usize;
        if !enabled || w == 0 || h == 0 {
            return img.clone();
        }

        let src_raw = img.as_raw();
        let mut dst_raw = vec![0u8; w * h * 4];
        let stride = w * 4;

        dst_raw.par_chunks_mut(stride).enumerate().for_each(|(y, row_out)| {
            let row_in = &src_raw[y * stride..(y + 1) * stride];
            for x in 0..w {
                let pi = x * 4;
                let px = [row_in[pi], row_in[pi + 1], row_in[pi + 2], row_in[pi + 3]];
                row_out[pi..pi + 4].copy_from_slice(&self.apply_rgba8(px));
            }
        });

        RgbaImage::from_raw(img.width(), img.height(), dst_raw)
            .unwrap_or_else(|| img.clone())
    }
}
