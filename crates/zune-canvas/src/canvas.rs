/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Floating point RGB pixel storage
use alloc::vec;
use alloc::vec::Vec;

use crate::errors::CanvasErrors;

/// An RGB canvas with one `f32` sample per channel per pixel.
///
/// Channels are stored separately (planar) and row-major, so
/// iterating `x` in the inner loop and `y` in the outer loop walks
/// memory linearly.
///
/// Pixel coordinates start at `1`, `(1,1)` is the first pixel of the
/// first row stored in the file.
///
/// Samples are normalized intensities, nothing keeps them inside `0.0..=1.0`,
/// values outside that range are clamped when the canvas is encoded.
///
/// # Example
/// ```
/// use zune_canvas::Canvas;
///
/// let mut canvas = Canvas::new(4, 3).unwrap();
/// canvas.set_pixel(2, 3, 1.0, 0.5, 0.0).unwrap();
///
/// assert_eq!(canvas.get_pixel(2, 3).unwrap(), (1.0, 0.5, 0.0));
/// assert!(canvas.get_pixel(5, 1).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width:  usize,
    height: usize,
    red:    Vec<f32>,
    green:  Vec<f32>,
    blue:   Vec<f32>,
    gamma:  bool
}

impl Canvas {
    /// Create a black canvas
    ///
    /// # Errors
    /// - [`CanvasErrors::InvalidDimensions`] if either dimension is zero
    pub fn new(width: usize, height: usize) -> Result<Canvas, CanvasErrors> {
        Canvas::from_color(width, height, 0.0, 0.0, 0.0)
    }

    /// Create a canvas where every pixel has the color `(r,g,b)`
    ///
    /// The color is stored as is, no range validation happens here.
    ///
    /// # Errors
    /// - [`CanvasErrors::InvalidDimensions`] if either dimension is zero or
    ///  `width*height` overflows
    pub fn from_color(
        width: usize, height: usize, r: f32, g: f32, b: f32
    ) -> Result<Canvas, CanvasErrors> {
        let size = pixel_count(width, height)?;

        Ok(Canvas {
            width,
            height,
            red: vec![r; size],
            green: vec![g; size],
            blue: vec![b; size],
            gamma: false
        })
    }

    /// Create a canvas from already filled channel buffers
    ///
    /// All buffers must hold exactly `width*height` samples.
    pub(crate) fn from_channels(
        width: usize, height: usize, red: Vec<f32>, green: Vec<f32>, blue: Vec<f32>,
        gamma: bool
    ) -> Result<Canvas, CanvasErrors> {
        let size = pixel_count(width, height)?;

        if red.len() != size || green.len() != size || blue.len() != size {
            return Err(CanvasErrors::InvalidDimensions(width, height));
        }
        Ok(Canvas {
            width,
            height,
            red,
            green,
            blue,
            gamma
        })
    }

    /// Return the canvas width
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Return the canvas height
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return the width and height of the canvas
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Whether the canvas prefers gamma correction when it
    /// is saved.
    ///
    /// This is the flag the canvas was loaded with, or the one set by
    /// [`set_gamma`](Self::set_gamma)
    pub const fn gamma(&self) -> bool {
        self.gamma
    }

    /// Change the default gamma setting used when saving
    pub fn set_gamma(&mut self, gamma: bool) {
        self.gamma = gamma;
    }

    /// Return the `(r,g,b)` samples of the pixel at `(x,y)`
    ///
    /// # Errors
    /// - [`CanvasErrors::OutOfBounds`] if `x` is not in `1..=width` or `y`
    ///  is not in `1..=height`
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<(f32, f32, f32), CanvasErrors> {
        let pos = self.index(x, y)?;

        Ok((self.red[pos], self.green[pos], self.blue[pos]))
    }

    /// Overwrite the pixel at `(x,y)` with `(r,g,b)`
    ///
    /// Values are not clamped.
    ///
    /// # Errors
    /// - [`CanvasErrors::OutOfBounds`] if `x` is not in `1..=width` or `y`
    ///  is not in `1..=height`
    pub fn set_pixel(
        &mut self, x: usize, y: usize, r: f32, g: f32, b: f32
    ) -> Result<(), CanvasErrors> {
        let pos = self.index(x, y)?;

        self.red[pos] = r;
        self.green[pos] = g;
        self.blue[pos] = b;

        Ok(())
    }

    /// Red samples, row-major
    pub fn red(&self) -> &[f32] {
        &self.red
    }

    /// Green samples, row-major
    pub fn green(&self) -> &[f32] {
        &self.green
    }

    /// Blue samples, row-major
    pub fn blue(&self) -> &[f32] {
        &self.blue
    }

    /// Mutable access to the red, green and blue channels
    ///
    /// Useful for whole-canvas operations where a bounds check
    /// per pixel would be wasteful.
    ///
    /// ```
    /// use zune_canvas::Canvas;
    ///
    /// let mut canvas = Canvas::new(2, 2).unwrap();
    /// let (r, _, _) = canvas.channels_mut();
    /// r.fill(1.0);
    /// assert_eq!(canvas.get_pixel(2, 2).unwrap(), (1.0, 0.0, 0.0));
    /// ```
    pub fn channels_mut(&mut self) -> (&mut [f32], &mut [f32], &mut [f32]) {
        (&mut self.red, &mut self.green, &mut self.blue)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize, CanvasErrors> {
        if x == 0 || y == 0 || x > self.width || y > self.height {
            return Err(CanvasErrors::OutOfBounds(x, y, self.width, self.height));
        }
        Ok((y - 1) * self.width + (x - 1))
    }
}

fn pixel_count(width: usize, height: usize) -> Result<usize, CanvasErrors> {
    if width == 0 || height == 0 {
        return Err(CanvasErrors::InvalidDimensions(width, height));
    }
    width
        .checked_mul(height)
        .ok_or(CanvasErrors::InvalidDimensions(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_black() {
        let canvas = Canvas::new(3, 2).unwrap();

        assert_eq!(canvas.dimensions(), (3, 2));
        assert!(!canvas.gamma());

        for y in 1..=2 {
            for x in 1..=3 {
                assert_eq!(canvas.get_pixel(x, y).unwrap(), (0.0, 0.0, 0.0));
            }
        }
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            Canvas::new(0, 5).unwrap_err(),
            CanvasErrors::InvalidDimensions(0, 5)
        );
        assert_eq!(
            Canvas::new(5, 0).unwrap_err(),
            CanvasErrors::InvalidDimensions(5, 0)
        );
        assert!(Canvas::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn out_of_range_values_are_kept() {
        let mut canvas = Canvas::from_color(2, 2, 0.25, 0.5, 0.75).unwrap();
        assert_eq!(canvas.get_pixel(2, 2).unwrap(), (0.25, 0.5, 0.75));

        canvas.set_pixel(1, 2, 2.0, -1.0, 0.5).unwrap();
        assert_eq!(canvas.get_pixel(1, 2).unwrap(), (2.0, -1.0, 0.5));
        // neighbours untouched
        assert_eq!(canvas.get_pixel(2, 2).unwrap(), (0.25, 0.5, 0.75));
        assert_eq!(canvas.get_pixel(1, 1).unwrap(), (0.25, 0.5, 0.75));
    }

    #[test]
    fn storage_is_row_major() {
        let mut canvas = Canvas::new(3, 2).unwrap();
        canvas.set_pixel(2, 2, 1.0, 0.0, 0.0).unwrap();

        assert_eq!(canvas.red()[4], 1.0);
        assert_eq!(canvas.red().iter().filter(|x| **x != 0.0).count(), 1);
    }

    #[test]
    fn bounds_are_one_based() {
        let mut canvas = Canvas::new(2, 3).unwrap();

        assert!(canvas.get_pixel(1, 1).is_ok());
        assert!(canvas.get_pixel(2, 3).is_ok());
        assert_eq!(
            canvas.get_pixel(0, 1).unwrap_err(),
            CanvasErrors::OutOfBounds(0, 1, 2, 3)
        );
        assert!(canvas.get_pixel(1, 0).is_err());
        assert!(canvas.get_pixel(3, 1).is_err());
        assert!(canvas.get_pixel(1, 4).is_err());
        assert!(canvas.set_pixel(3, 3, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn from_channels_checks_lengths() {
        assert!(Canvas::from_channels(2, 1, vec![0.0; 2], vec![0.0; 2], vec![0.0; 1], false).is_err());

        let canvas =
            Canvas::from_channels(2, 1, vec![0.0; 2], vec![0.0; 2], vec![0.0; 2], true).unwrap();
        assert!(canvas.gamma());
    }
}
