//! In-memory image sink.
//!
//! Pixels hold unclamped linear RGB. The buffer is stored column-major so a
//! contiguous range of columns is a contiguous slice, which lets the renderer
//! hand each worker a disjoint `&mut` region without locking.

use std::ops::Range;

use image::{Rgb, RgbImage};

use crate::error::{RenderError, Result};

/// Per-pixel RGB accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    data: Vec<[f64; 3]>,
}

impl FrameBuffer {
    /// A black buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![[0.0; 3]; width * height],
        }
    }

    /// Resize and clear to black.
    pub fn initialize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x * self.height + y)
    }

    /// Store the color of pixel `(x, y)`.
    pub fn set_pixel(&mut self, x: usize, y: usize, r: f64, g: f64, b: f64) -> Result<()> {
        let idx = self.index(x, y).ok_or(RenderError::PixelOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.data[idx] = [r, g, b];
        Ok(())
    }

    /// Color of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[f64; 3]> {
        self.index(x, y).map(|idx| self.data[idx])
    }

    /// Largest channel value in the buffer (zero for an all-black buffer).
    pub fn max_value(&self) -> f64 {
        self.data
            .iter()
            .flatten()
            .fold(0.0, |max, &c| if c > max { c } else { max })
    }

    /// Split into `chunks` disjoint column spans.
    ///
    /// Each span covers `width / chunks` columns; the last also takes the
    /// remainder. `chunks` must be non-zero.
    pub(crate) fn column_spans(&mut self, chunks: usize) -> Vec<ColumnSpan<'_>> {
        let chunk_width = self.width / chunks;
        let height = self.height;
        let mut spans = Vec::with_capacity(chunks);
        let mut rest = self.data.as_mut_slice();

        for i in 0..chunks {
            let start = i * chunk_width;
            let end = if i == chunks - 1 {
                self.width
            } else {
                start + chunk_width
            };
            let (head, tail) = std::mem::take(&mut rest).split_at_mut((end - start) * height);
            spans.push(ColumnSpan {
                columns: start..end,
                height,
                data: head,
            });
            rest = tail;
        }
        spans
    }

    /// Quantize to 8-bit, scaling every channel by `255 / max`.
    ///
    /// Values are truncated. An all-black buffer stays black.
    pub fn to_rgb8(&self) -> RgbImage {
        let max = self.max_value();
        let quantize = |c: f64| {
            if max > 0.0 {
                (c / max * 255.0) as u8
            } else {
                0
            }
        };
        let mut img = RgbImage::new(self.width as u32, self.height as u32);
        for x in 0..self.width {
            for y in 0..self.height {
                let [r, g, b] = self.data[x * self.height + y];
                img.put_pixel(x as u32, y as u32, Rgb([quantize(r), quantize(g), quantize(b)]));
            }
        }
        img
    }
}

/// Mutable view of a contiguous range of columns.
#[derive(Debug)]
pub(crate) struct ColumnSpan<'a> {
    columns: Range<usize>,
    height: usize,
    data: &'a mut [[f64; 3]],
}

impl ColumnSpan<'_> {
    /// Columns covered by this span.
    pub(crate) fn columns(&self) -> Range<usize> {
        self.columns.clone()
    }

    /// Write pixel `(x, y)`; `x` must lie in [`columns`](Self::columns).
    #[inline]
    pub(crate) fn set_pixel(&mut self, x: usize, y: usize, rgb: [f64; 3]) {
        debug_assert!(self.columns.contains(&x) && y < self.height);
        self.data[(x - self.columns.start) * self.height + y] = rgb;
    }
}
