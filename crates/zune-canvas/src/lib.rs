/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A floating point RGB canvas stored as uncompressed 24 bit BMP
//!
//! This crate provides a [`Canvas`], an RGB image whose samples are `f32`
//! normalized intensities, and a codec that turns canvases into the
//! classic 54 byte header BMP layout and back.
//!
//! # Features
//! - Planar `f32` storage with bound checked pixel access
//! - Optional gamma correction (a `2.2` power curve) when converting
//!   between samples and bytes
//! - Decoding from any [`ZByteReaderTrait`](zune_core::bytestream::ZByteReaderTrait)
//!   and encoding into any [`ZByteWriterTrait`](zune_core::bytestream::ZByteWriterTrait)
//!
//! # Supported files
//! Only uncompressed 24 bit images with a `BITMAPINFOHEADER` and
//! pixel data starting right after the 54 byte header are read.
//! There is no palette, alpha, compression or metadata support.
//!
//! # Usage
//! ```
//! use zune_canvas::{load, save, Canvas};
//!
//! let mut canvas = Canvas::new(4, 4).unwrap();
//! canvas.set_pixel(1, 1, 1.0, 1.0, 1.0).unwrap();
//!
//! let bytes = save(&canvas, None).unwrap();
//! let decoded = load(&bytes, false).unwrap();
//!
//! assert_eq!(decoded.get_pixel(1, 1).unwrap(), (1.0, 1.0, 1.0));
//! ```
#![forbid(unsafe_code)]
extern crate alloc;
pub extern crate zune_core;

use alloc::vec::Vec;

use zune_core::bytestream::ZCursor;
use zune_core::options::DecoderOptions;

pub use crate::canvas::Canvas;
pub use crate::decoder::{probe_canvas, CanvasDecoder};
pub use crate::encoder::{calculate_file_size, CanvasEncoder};
pub use crate::errors::{CanvasDecodeErrors, CanvasEncodeErrors, CanvasErrors};
pub use crate::gamma::GAMMA;

mod canvas;
mod common;
mod decoder;
mod encoder;
mod errors;
mod gamma;

/// Decode a canvas from an in memory file
///
/// With `gamma`, bytes are expanded as `(byte/255)^2.2`, and the returned
/// canvas keeps the flag as its default for [`save`].
///
/// Width and height are not capped, anything [`save`] can write is read back.
/// Use [`CanvasDecoder::new_with_options`] to limit dimensions of untrusted input.
///
/// # Errors
/// See [`CanvasDecoder::decode`]
pub fn load(bytes: &[u8], gamma: bool) -> Result<Canvas, CanvasDecodeErrors> {
    let options = DecoderOptions::default()
        .set_max_width(usize::MAX)
        .set_max_height(usize::MAX);

    let mut decoder = CanvasDecoder::new_with_options(ZCursor::new(bytes), options);
    decoder.set_gamma(gamma);
    decoder.decode()
}

/// Encode a canvas into a new buffer
///
/// `gamma` overrides the canvas' own gamma flag when present.
///
/// # Errors
/// - [`CanvasEncodeErrors::FileTooLarge`] if the file would be 4 GiB or larger
pub fn save(canvas: &Canvas, gamma: Option<bool>) -> Result<Vec<u8>, CanvasEncodeErrors> {
    let mut encoder = CanvasEncoder::new(canvas);

    if let Some(gamma) = gamma {
        encoder = encoder.set_gamma(gamma);
    }
    encoder.encode_to_vec()
}
