/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use zune_core::bytestream::ZByteIoError;

/// Errors raised when creating or accessing a canvas
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum CanvasErrors {
    /// Width or height is zero, or `width*height` cannot be
    /// represented in memory
    InvalidDimensions(usize, usize),
    /// A pixel access was outside the canvas.
    ///
    /// Contains the requested `(x,y)` followed by the canvas
    /// width and height
    OutOfBounds(usize, usize, usize, usize)
}

impl Debug for CanvasErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CanvasErrors::InvalidDimensions(width, height) => {
                writeln!(f, "Invalid canvas dimensions {width}x{height}")
            }
            CanvasErrors::OutOfBounds(x, y, width, height) => {
                writeln!(
                    f,
                    "Pixel ({x},{y}) is outside a canvas of {width}x{height}, coordinates start at 1"
                )
            }
        }
    }
}

impl Display for CanvasErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for CanvasErrors {}

/// Errors that can occur when decoding a canvas
pub enum CanvasDecodeErrors {
    /// One of the fixed header fields did not carry the value
    /// this format requires.
    ///
    /// Contains the field name, the expected value and the value found
    UnsupportedFormat(&'static str, u32, u32),
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// The header describes a canvas that cannot be created
    Canvas(CanvasErrors),
    IoErrors(ZByteIoError)
}

impl Debug for CanvasDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CanvasDecodeErrors::UnsupportedFormat(field, expected, found) => {
                writeln!(
                    f,
                    "Unsupported format, expected {field} to be {expected} but found {found}"
                )
            }
            CanvasDecodeErrors::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            CanvasDecodeErrors::Canvas(err) => {
                writeln!(f, "{:?}", err)
            }
            CanvasDecodeErrors::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for CanvasDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for CanvasDecodeErrors {}

impl From<ZByteIoError> for CanvasDecodeErrors {
    fn from(value: ZByteIoError) -> Self {
        CanvasDecodeErrors::IoErrors(value)
    }
}

impl From<CanvasErrors> for CanvasDecodeErrors {
    fn from(value: CanvasErrors) -> Self {
        CanvasDecodeErrors::Canvas(value)
    }
}

/// Errors that can occur when encoding a canvas
pub enum CanvasEncodeErrors {
    /// The encoded file would not fit in the 32 bit
    /// size field, contains the size the file would have had
    FileTooLarge(u64),
    IoErrors(ZByteIoError)
}

impl Debug for CanvasEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CanvasEncodeErrors::FileTooLarge(size) => {
                writeln!(
                    f,
                    "File too large, {size} bytes exceeds the maximum of {} bytes",
                    u32::MAX
                )
            }
            CanvasEncodeErrors::IoErrors(err) => writeln!(f, "I/O error {:?}", err)
        }
    }
}

impl Display for CanvasEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for CanvasEncodeErrors {}

impl From<ZByteIoError> for CanvasEncodeErrors {
    fn from(value: ZByteIoError) -> Self {
        CanvasEncodeErrors::IoErrors(value)
    }
}
