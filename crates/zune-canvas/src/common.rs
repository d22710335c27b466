/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Header layout shared by the decoder and encoder
//!
//! ```text
//! offset  size  field
//!  0      2     "BM"
//!  2      4     file size
//!  6      4     reserved (0)
//! 10      4     pixel data offset (54)
//! 14      4     info header size (40)
//! 18      4     width
//! 22      4     height
//! 26      2     planes (1)
//! 28      2     bits per pixel (24)
//! 30      4     compression (0)
//! 34      4     pixel data size
//! 38      16    resolution and palette fields (0)
//! ```

pub(crate) const MAGIC_BYTES: &[u8; 2] = b"BM";

/// Size of the file header plus the info header,
/// pixel data starts right after it
pub(crate) const HEADER_SIZE: u32 = 54;

/// Size of the `BITMAPINFOHEADER` part
pub(crate) const INFO_HEADER_SIZE: u32 = 40;

pub(crate) const COLOR_PLANES: u16 = 1;

pub(crate) const BITS_PER_PIXEL: u16 = 24;

pub(crate) const COMPRESSION_NONE: u32 = 0;

/// Trailing resolution and palette fields, always written as zero
pub(crate) const RESERVED_TRAILER: usize = 16;

/// Bytes between the end of the height field and the start of pixel data
pub(crate) const HEADER_TAIL: usize = 2 + 2 + 4 + 4 + RESERVED_TRAILER;

/// Number of zero bytes needed to align a row of `width` pixels
/// to a multiple of four bytes
#[inline]
pub(crate) const fn row_padding(width: usize) -> usize {
    // same as (-3*width) mod 4
    (4 - (width.wrapping_mul(3) % 4)) % 4
}

/// Number of bytes a row occupies in the file, including padding
///
/// Returns `None` on overflow
#[inline]
pub(crate) fn row_stride(width: usize) -> Option<usize> {
    width.checked_mul(3)?.checked_add(row_padding(width))
}
