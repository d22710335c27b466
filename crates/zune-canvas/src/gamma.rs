/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversion between stored bytes and linear samples

/// Exponent of the power curve used when gamma correction is on
pub const GAMMA: f32 = 2.2;

/// Build a table mapping every possible byte to its
/// normalized sample.
///
/// With `gamma` the byte is expanded as `(byte/255)^2.2`,
/// otherwise it is just `byte/255`
pub(crate) fn decode_table(gamma: bool) -> [f32; 256] {
    let mut table = [0.0; 256];

    for (byte, value) in table.iter_mut().enumerate() {
        let normalized = byte as f32 / 255.0;

        *value = if gamma {
            normalized.powf(GAMMA)
        } else {
            normalized
        };
    }
    table
}

/// Convert a sample to a byte.
///
/// The value is scaled (and gamma compressed with `v^(1/2.2)` when asked to),
/// clamped to `0..=255` and rounded to the nearest integer.
/// NaN maps to zero.
#[inline]
pub(crate) fn encode_sample(value: f32, gamma: bool) -> u8 {
    let scaled = if gamma {
        255.0 * value.powf(1.0 / GAMMA)
    } else {
        255.0 * value
    };
    // `as` saturates and turns NaN into 0
    scaled.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_table_is_division() {
        let table = decode_table(false);
        assert_eq!(table[0], 0.0);
        assert_eq!(table[255], 1.0);
        assert!((table[51] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn gamma_table_expands() {
        let table = decode_table(true);
        assert_eq!(table[0], 0.0);
        assert!((table[255] - 1.0).abs() < 1e-6);
        // mid gray is darker in linear light
        assert!(table[128] < 0.5);
        assert!((table[128] - (128.0_f32 / 255.0).powf(2.2)).abs() < 1e-6);
    }

    #[test]
    fn encode_clamps_and_rounds() {
        assert_eq!(encode_sample(2.0, false), 255);
        assert_eq!(encode_sample(-1.0, false), 0);
        assert_eq!(encode_sample(0.5, false), 128);
        assert_eq!(encode_sample(f32::NAN, false), 0);
        assert_eq!(encode_sample(-1.0, true), 0);
        assert_eq!(encode_sample(4.0, true), 255);
        // 255 * 0.5^(1/2.2) = 186.07...
        assert_eq!(encode_sample(0.5, true), 186);
    }
}
