/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Encoding support for canvases
use alloc::vec;
use alloc::vec::Vec;

use log::trace;
use zune_core::bytestream::{ZByteWriterTrait, ZWriter};

use crate::canvas::Canvas;
use crate::common::{
    row_padding, BITS_PER_PIXEL, COLOR_PLANES, COMPRESSION_NONE, HEADER_SIZE, INFO_HEADER_SIZE,
    MAGIC_BYTES, RESERVED_TRAILER
};
use crate::errors::CanvasEncodeErrors;
use crate::gamma::encode_sample;

/// Calculate the total size of a file holding a `width` by `height`
/// canvas, header included.
///
/// # Errors
/// - [`CanvasEncodeErrors::FileTooLarge`] if the size does not fit in the
///   format's 32 bit size field
///
/// # Example
/// ```
/// use zune_canvas::calculate_file_size;
///
/// // 2 pixels * 3 bytes + 2 bytes of padding
/// assert_eq!(calculate_file_size(2, 1).unwrap(), 54 + 8);
/// assert!(calculate_file_size(40_000, 40_000).is_err());
/// ```
pub fn calculate_file_size(width: usize, height: usize) -> Result<u32, CanvasEncodeErrors> {
    let width = width as u64;
    let height = height as u64;

    let stride = width
        .checked_mul(3)
        .and_then(|x| x.checked_add(row_padding(width as usize) as u64))
        .ok_or(CanvasEncodeErrors::FileTooLarge(u64::MAX))?;

    let total = stride
        .checked_mul(height)
        .and_then(|x| x.checked_add(u64::from(HEADER_SIZE)))
        .ok_or(CanvasEncodeErrors::FileTooLarge(u64::MAX))?;

    u32::try_from(total).map_err(|_| CanvasEncodeErrors::FileTooLarge(total))
}

/// A canvas encoder
///
/// Writes a 54 byte header followed by the pixel rows, each pixel as a blue,green,red
/// byte triplet and each row padded with zeroes to a multiple of four bytes.
///
/// Rows are written in the order they are stored in the canvas, so
/// decoding the output gives back the same layout.
///
/// # Gamma
/// By default the encoder follows the canvas' own [`gamma`](Canvas::gamma) flag,
/// [`set_gamma`](Self::set_gamma) overrides it for this encoder only.
///
/// # Example
/// - Encode a red 2x1 canvas
/// ```
/// use zune_canvas::{Canvas, CanvasEncoder};
///
/// let canvas = Canvas::from_color(2, 1, 1.0, 0.0, 0.0).unwrap();
/// let bytes = CanvasEncoder::new(&canvas).encode_to_vec().unwrap();
///
/// assert_eq!(bytes.len(), 58);
/// assert_eq!(&bytes[54..], &[0, 0, 255, 0, 0, 255, 0, 0]);
/// ```
///
/// - Encode straight to a file
/// ```no_run
/// use std::fs::File;
/// use std::io::BufWriter;
/// use zune_canvas::{Canvas, CanvasEncoder};
///
/// let canvas = Canvas::new(10, 10).unwrap();
/// let mut file = BufWriter::new(File::create("black.bmp").unwrap());
///
/// CanvasEncoder::new(&canvas).encode(&mut file).unwrap();
/// ```
pub struct CanvasEncoder<'a> {
    canvas: &'a Canvas,
    gamma:  Option<bool>
}

impl<'a> CanvasEncoder<'a> {
    /// Create a new encoder which will encode `canvas`
    pub fn new(canvas: &'a Canvas) -> CanvasEncoder<'a> {
        CanvasEncoder {
            canvas,
            gamma: None
        }
    }

    /// Override the canvas gamma setting for this encoder
    ///
    /// With gamma on, samples are compressed as `v^(1/2.2)` before
    /// being scaled to bytes.
    #[must_use]
    pub fn set_gamma(mut self, gamma: bool) -> Self {
        self.gamma = Some(gamma);
        self
    }

    /// Return the gamma setting the encoder will use
    pub fn gamma(&self) -> bool {
        self.gamma.unwrap_or(self.canvas.gamma())
    }

    /// Size of the output in bytes
    ///
    /// # Errors
    /// - [`CanvasEncodeErrors::FileTooLarge`] if the canvas cannot be encoded
    pub fn expected_buffer_size(&self) -> Result<usize, CanvasEncodeErrors> {
        let (width, height) = self.canvas.dimensions();

        Ok(calculate_file_size(width, height)? as usize)
    }

    fn encode_headers<T: ZByteWriterTrait>(
        &self, writer: &mut ZWriter<T>, file_size: u32
    ) -> Result<(), CanvasEncodeErrors> {
        let (width, height) = self.canvas.dimensions();
        // file size fits in 32 bits, so must the smaller values
        let image_size = file_size - HEADER_SIZE;

        writer.write_const_bytes(MAGIC_BYTES)?;
        writer.write_u32_le_err(file_size)?;
        writer.write_u32_le_err(0)?;
        writer.write_u32_le_err(HEADER_SIZE)?;
        writer.write_u32_le_err(INFO_HEADER_SIZE)?;
        writer.write_u32_le_err(width as u32)?;
        writer.write_u32_le_err(height as u32)?;
        writer.write_u16_le_err(COLOR_PLANES)?;
        writer.write_u16_le_err(BITS_PER_PIXEL)?;
        writer.write_u32_le_err(COMPRESSION_NONE)?;
        writer.write_u32_le_err(image_size)?;
        writer.write_const_bytes(&[0; RESERVED_TRAILER])?;

        Ok(())
    }

    /// Encode the canvas into `sink`
    ///
    /// Nothing is written if the canvas is too large for the format.
    ///
    /// # Returns
    /// - `Ok(usize)`: The number of bytes written
    /// - `Err(CanvasEncodeErrors)`: The canvas is too large, or the sink failed
    pub fn encode<T: ZByteWriterTrait>(&self, sink: T) -> Result<usize, CanvasEncodeErrors> {
        let (width, height) = self.canvas.dimensions();
        let file_size = calculate_file_size(width, height)?;
        let gamma = self.gamma();

        trace!("Encoding {width}x{height} canvas, gamma: {gamma}");

        let mut writer = ZWriter::new(sink);
        writer.reserve(file_size as usize)?;

        self.encode_headers(&mut writer, file_size)?;

        let padding = row_padding(width);
        let mut row = vec![0_u8; width * 3 + padding];

        for ((r_row, g_row), b_row) in self
            .canvas
            .red()
            .chunks_exact(width)
            .zip(self.canvas.green().chunks_exact(width))
            .zip(self.canvas.blue().chunks_exact(width))
        {
            // padding at the end of `row` stays zero
            for (((pixel, r), g), b) in row
                .chunks_exact_mut(3)
                .zip(r_row)
                .zip(g_row)
                .zip(b_row)
            {
                pixel[0] = encode_sample(*b, gamma);
                pixel[1] = encode_sample(*g, gamma);
                pixel[2] = encode_sample(*r, gamma);
            }
            writer.write_all(&row)?;
        }
        Ok(writer.bytes_written())
    }

    /// Encode the canvas into a newly allocated vector
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, CanvasEncodeErrors> {
        let mut output = Vec::with_capacity(self.expected_buffer_size()?);
        self.encode(&mut output)?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_fields() {
        let canvas = Canvas::new(5, 3).unwrap();
        let bytes = CanvasEncoder::new(&canvas).encode_to_vec().unwrap();

        let u32_at = |pos: usize| u32::from_le_bytes(bytes[pos..pos + 4].try_into().unwrap());
        let u16_at = |pos: usize| u16::from_le_bytes(bytes[pos..pos + 2].try_into().unwrap());

        // 5 pixels => 15 bytes + 1 padding
        let image_size = 16 * 3;

        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(u32_at(2), 54 + image_size);
        assert_eq!(u32_at(6), 0);
        assert_eq!(u32_at(10), 54);
        assert_eq!(u32_at(14), 40);
        assert_eq!(u32_at(18), 5);
        assert_eq!(u32_at(22), 3);
        assert_eq!(u16_at(26), 1);
        assert_eq!(u16_at(28), 24);
        assert_eq!(u32_at(30), 0);
        assert_eq!(u32_at(34), image_size);
        assert!(bytes[38..54].iter().all(|x| *x == 0));
        assert_eq!(bytes.len(), (54 + image_size) as usize);
    }

    #[test]
    fn gamma_follows_canvas_unless_overridden() {
        let mut canvas = Canvas::new(1, 1).unwrap();
        assert!(!CanvasEncoder::new(&canvas).gamma());

        canvas.set_gamma(true);
        assert!(CanvasEncoder::new(&canvas).gamma());
        assert!(!CanvasEncoder::new(&canvas).set_gamma(false).gamma());
    }

    #[test]
    fn file_size_limit() {
        // largest square that fits: 54 + h*stride <= u32::MAX
        assert!(calculate_file_size(37_000, 37_000).is_ok());
        assert!(matches!(
            calculate_file_size(1 << 16, 1 << 16),
            Err(CanvasEncodeErrors::FileTooLarge(_))
        ));
        assert!(matches!(
            calculate_file_size(usize::MAX, 2),
            Err(CanvasEncodeErrors::FileTooLarge(_))
        ));
    }
}
