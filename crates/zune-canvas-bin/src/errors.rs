/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

use zune_canvas::{CanvasDecodeErrors, CanvasEncodeErrors, CanvasErrors};

/// Errors a command can fail with
pub enum CliErrors {
    Canvas(CanvasErrors),
    Decode(CanvasDecodeErrors),
    Encode(CanvasEncodeErrors),
    IoErrors(std::io::Error),
    GenericString(String)
}

impl Debug for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CliErrors::Canvas(err) => writeln!(f, "{:?}", err),
            CliErrors::Decode(err) => writeln!(f, "Decoding failed: {:?}", err),
            CliErrors::Encode(err) => writeln!(f, "Encoding failed: {:?}", err),
            CliErrors::IoErrors(err) => writeln!(f, "I/O error: {}", err),
            CliErrors::GenericString(err) => writeln!(f, "{}", err)
        }
    }
}

impl From<CanvasErrors> for CliErrors {
    fn from(value: CanvasErrors) -> Self {
        CliErrors::Canvas(value)
    }
}

impl From<CanvasDecodeErrors> for CliErrors {
    fn from(value: CanvasDecodeErrors) -> Self {
        CliErrors::Decode(value)
    }
}

impl From<CanvasEncodeErrors> for CliErrors {
    fn from(value: CanvasEncodeErrors) -> Self {
        CliErrors::Encode(value)
    }
}

impl From<std::io::Error> for CliErrors {
    fn from(value: std::io::Error) -> Self {
        CliErrors::IoErrors(value)
    }
}
