/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use log::{info, trace};
use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::options::DecoderOptions;

use crate::canvas::Canvas;
use crate::common::{
    row_padding, row_stride, HEADER_SIZE, HEADER_TAIL, INFO_HEADER_SIZE, MAGIC_BYTES
};
use crate::errors::{CanvasDecodeErrors, CanvasErrors};
use crate::gamma::decode_table;

/// Upper bound on samples reserved per channel before any pixel is read
const MAX_PREALLOC: usize = 1 << 16;

/// Probe some bytes to see if they look like
/// a file this crate can decode.
///
/// This checks the `BM` magic bytes and the three fixed
/// header fields (reserved, pixel offset and info header size)
pub fn probe_canvas(bytes: &[u8]) -> bool {
    let read_u32 = |start: usize| -> Option<u32> {
        let field = bytes.get(start..start + 4)?;
        Some(u32::from_le_bytes(field.try_into().ok()?))
    };

    if bytes.get(0..2) != Some(&MAGIC_BYTES[..]) {
        return false;
    }
    read_u32(6) == Some(0)
        && read_u32(10) == Some(HEADER_SIZE)
        && read_u32(14) == Some(INFO_HEADER_SIZE)
}

/// A decoder turning uncompressed 24 bit BMP files into a [`Canvas`]
///
/// Only the layout written by [`CanvasEncoder`](crate::CanvasEncoder) is understood,
/// a 54 byte header followed by rows of BGR triplets, each row padded to four bytes.
///
/// Rows are placed into the canvas in the order they appear in the file.
///
/// # Example
/// ```
/// use zune_canvas::{Canvas, CanvasDecoder, CanvasEncoder};
/// use zune_core::bytestream::ZCursor;
///
/// let canvas = Canvas::from_color(3, 2, 0.0, 1.0, 0.0).unwrap();
/// let bytes = CanvasEncoder::new(&canvas).encode_to_vec().unwrap();
///
/// let mut decoder = CanvasDecoder::new(ZCursor::new(&bytes));
/// decoder.decode_headers().unwrap();
/// assert_eq!(decoder.dimensions(), Some((3, 2)));
///
/// let decoded = decoder.decode().unwrap();
/// assert_eq!(decoded.get_pixel(3, 2).unwrap(), (0.0, 1.0, 0.0));
/// ```
pub struct CanvasDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:          ZReader<T>,
    options:         DecoderOptions,
    width:           usize,
    height:          usize,
    gamma:           bool,
    decoded_headers: bool
}

impl<T> CanvasDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new decoder reading from `data`
    /// with default options and gamma correction off
    ///
    /// The default options cap width and height at 16384,
    /// see [`load`](crate::load) for a decode without that cap.
    pub fn new(data: T) -> CanvasDecoder<T> {
        CanvasDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// Only the maximum width and height are respected
    pub fn new_with_options(data: T, options: DecoderOptions) -> CanvasDecoder<T> {
        CanvasDecoder {
            stream: ZReader::new(data),
            options,
            width: 0,
            height: 0,
            gamma: false,
            decoded_headers: false
        }
    }

    /// Expand stored bytes with the `2.2` power curve
    /// when converting them to samples.
    ///
    /// The decoded canvas remembers this flag and uses it as the
    /// default when encoded again.
    pub fn set_gamma(&mut self, gamma: bool) {
        self.gamma = gamma;
    }

    /// Decode the 54 byte header, storing the image dimensions
    ///
    /// # Errors
    /// - [`CanvasDecodeErrors::UnsupportedFormat`] if the reserved field is not zero,
    ///  the pixel offset is not 54 or the info header size is not 40
    /// - [`CanvasDecodeErrors::TooLargeDimensions`] if the image exceeds the
    ///  options' limits
    /// - [`CanvasDecodeErrors::IoErrors`] if the header is truncated
    pub fn decode_headers(&mut self) -> Result<(), CanvasDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        // magic bytes are not validated, see probe_canvas for that
        self.stream.skip(2)?;
        // file size, recomputed from the dimensions so ignored
        let file_size = self.stream.get_u32_le_err()?;
        trace!("Reported file size: {}", file_size);

        let reserved = self.stream.get_u32_le_err()?;
        if reserved != 0 {
            return Err(CanvasDecodeErrors::UnsupportedFormat(
                "reserved field",
                0,
                reserved
            ));
        }
        let offset = self.stream.get_u32_le_err()?;
        if offset != HEADER_SIZE {
            return Err(CanvasDecodeErrors::UnsupportedFormat(
                "pixel data offset",
                HEADER_SIZE,
                offset
            ));
        }
        let ihsize = self.stream.get_u32_le_err()?;
        if ihsize != INFO_HEADER_SIZE {
            return Err(CanvasDecodeErrors::UnsupportedFormat(
                "info header size",
                INFO_HEADER_SIZE,
                ihsize
            ));
        }

        let width = self.stream.get_u32_le_err()? as usize;
        let height = self.stream.get_u32_le_err()? as usize;

        if width > self.options.max_width() {
            return Err(CanvasDecodeErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(CanvasDecodeErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                height
            ));
        }
        if width == 0 || height == 0 {
            return Err(CanvasErrors::InvalidDimensions(width, height).into());
        }
        // planes, depth, compression, image size and the trailing fields
        // carry nothing we need
        self.stream.skip(HEADER_TAIL)?;

        info!("Width: {}", width);
        info!("Height: {}", height);

        self.width = width;
        self.height = height;
        self.decoded_headers = true;

        Ok(())
    }

    /// Return the image width and height, or `None` if
    /// the headers haven't been decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            return Some((self.width, self.height));
        }
        None
    }

    /// Decode the image into a new canvas
    ///
    /// Headers are decoded first if that hasn't happened yet.
    ///
    /// # Errors
    /// Anything [`decode_headers`](Self::decode_headers) returns, or
    /// [`CanvasDecodeErrors::IoErrors`] if the pixel data is truncated
    pub fn decode(&mut self) -> Result<Canvas, CanvasDecodeErrors> {
        self.decode_headers()?;

        let (width, height) = (self.width, self.height);
        let size = width
            .checked_mul(height)
            .ok_or(CanvasErrors::InvalidDimensions(width, height))?;
        let stride = row_stride(width).ok_or(CanvasErrors::InvalidDimensions(width, height))?;
        let padding = row_padding(width);

        trace!("Pixels: {}, row stride: {}", size, stride);

        let table = decode_table(self.gamma);

        // channels grow as rows arrive, so a short file with large
        // dimensions fails on the read instead of on the allocation
        let mut red: Vec<f32> = Vec::with_capacity(width.min(MAX_PREALLOC));
        let mut green: Vec<f32> = Vec::with_capacity(width.min(MAX_PREALLOC));
        let mut blue: Vec<f32> = Vec::with_capacity(width.min(MAX_PREALLOC));

        let mut pixel = [0_u8; 3];
        let mut pad = [0_u8; 3];

        for _ in 0..height {
            for _ in 0..width {
                self.stream.read_exact_bytes(&mut pixel)?;

                blue.push(table[usize::from(pixel[0])]);
                green.push(table[usize::from(pixel[1])]);
                red.push(table[usize::from(pixel[2])]);
            }
            self.stream.read_exact_bytes(&mut pad[..padding])?;
        }

        Ok(Canvas::from_channels(
            width, height, red, green, blue, self.gamma
        )?)
    }
}

#[cfg(test)]
mod tests {
    use zune_core::bytestream::ZCursor;

    use super::*;

    fn header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"BM");
        bytes.extend_from_slice(&0_u32.to_le_bytes());
        bytes.extend_from_slice(&0_u32.to_le_bytes());
        bytes.extend_from_slice(&54_u32.to_le_bytes());
        bytes.extend_from_slice(&40_u32.to_le_bytes());
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes.extend_from_slice(&1_u16.to_le_bytes());
        bytes.extend_from_slice(&24_u16.to_le_bytes());
        bytes.resize(54, 0);
        bytes
    }

    #[test]
    fn headers_report_dimensions() {
        let bytes = header(7, 3);
        let mut decoder = CanvasDecoder::new(ZCursor::new(&bytes));

        assert_eq!(decoder.dimensions(), None);
        decoder.decode_headers().unwrap();
        assert_eq!(decoder.dimensions(), Some((7, 3)));
    }

    #[test]
    fn zero_width_is_rejected() {
        let bytes = header(0, 3);
        let err = CanvasDecoder::new(ZCursor::new(&bytes)).decode().err().unwrap();

        assert!(matches!(
            err,
            CanvasDecodeErrors::Canvas(CanvasErrors::InvalidDimensions(0, 3))
        ));
    }

    #[test]
    fn options_limit_dimensions() {
        let bytes = header(100, 1);
        let options = DecoderOptions::default().set_max_width(50);
        let err = CanvasDecoder::new_with_options(ZCursor::new(&bytes), options)
            .decode_headers()
            .err()
            .unwrap();

        assert!(matches!(
            err,
            CanvasDecodeErrors::TooLargeDimensions("width", 50, 100)
        ));
    }

    #[test]
    fn rows_are_bgr_and_skip_padding() {
        // width 1 => 3 bytes of pixel + 1 padding byte per row
        let mut bytes = header(1, 2);
        bytes.extend_from_slice(&[0, 0, 255, 0xAA]);
        bytes.extend_from_slice(&[255, 0, 0, 0xAA]);

        let canvas = CanvasDecoder::new(ZCursor::new(&bytes)).decode().unwrap();

        assert_eq!(canvas.get_pixel(1, 1).unwrap(), (1.0, 0.0, 0.0));
        assert_eq!(canvas.get_pixel(1, 2).unwrap(), (0.0, 0.0, 1.0));
    }

    #[test]
    fn large_dimensions_without_pixels() {
        let bytes = header(60_000, 60_000);
        let options = DecoderOptions::default()
            .set_max_width(usize::MAX)
            .set_max_height(usize::MAX);

        let err = CanvasDecoder::new_with_options(ZCursor::new(&bytes), options)
            .decode()
            .err()
            .unwrap();

        assert!(matches!(err, CanvasDecodeErrors::IoErrors(_)));
    }

    #[test]
    fn missing_row_padding_is_truncation() {
        let mut bytes = header(1, 1);
        bytes.extend_from_slice(&[1, 2, 3]);

        let err = CanvasDecoder::new(ZCursor::new(&bytes)).decode().err().unwrap();
        assert!(matches!(err, CanvasDecodeErrors::IoErrors(_)));
    }

    #[test]
    fn probe_checks_fixed_fields() {
        let mut bytes = header(1, 1);
        assert!(probe_canvas(&bytes));

        bytes[14] = 124;
        assert!(!probe_canvas(&bytes));
        assert!(!probe_canvas(b"BM"));
        assert!(!probe_canvas(&[]));
    }
}
