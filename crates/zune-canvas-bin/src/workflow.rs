/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ArgMatches;
use log::{debug, info, warn};
use zune_canvas::{load, probe_canvas, Canvas, CanvasEncoder};

use crate::errors::CliErrors;

pub(crate) fn exec_subcommand(args: &ArgMatches) -> Result<(), CliErrors> {
    match args.subcommand() {
        Some(("fill", sub_args)) => fill(sub_args),
        Some(("info", sub_args)) => print_info(sub_args),
        Some(("convert", sub_args)) => convert(sub_args),
        Some((name, _)) => Err(CliErrors::GenericString(format!(
            "Unknown subcommand {name}"
        ))),
        None => Err(CliErrors::GenericString("No subcommand given".to_string()))
    }
}

/// Parse an `r,g,b` triplet of floats
pub(crate) fn parse_color(color: &str) -> Result<(f32, f32, f32), CliErrors> {
    let values = color
        .split(',')
        .map(|x| x.trim().parse::<f32>())
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|e| CliErrors::GenericString(format!("Invalid color {color:?}: {e}")))?;

    match values[..] {
        [r, g, b] => Ok((r, g, b)),
        _ => Err(CliErrors::GenericString(format!(
            "Expected three comma separated values for color but found {}",
            values.len()
        )))
    }
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a OsStr, CliErrors> {
    args.get_raw(name)
        .and_then(|mut x| x.next())
        .ok_or_else(|| CliErrors::GenericString(format!("Missing argument {name}")))
}

fn read_canvas(path: &OsStr, gamma: bool) -> Result<Canvas, CliErrors> {
    let data = std::fs::read(path)?;
    debug!("Read {} bytes from {:?}", data.len(), path);

    if !probe_canvas(&data) {
        warn!("{:?} does not look like an uncompressed 24 bit BMP", path);
    }
    Ok(load(&data, gamma)?)
}

fn write_canvas(path: &OsStr, encoder: CanvasEncoder<'_>) -> Result<(), CliErrors> {
    // fail before creating the file if the canvas can't be encoded
    let size = encoder.expected_buffer_size()?;

    let mut writer = BufWriter::new(File::create(path)?);
    let written = encoder.encode(&mut writer)?;
    writer.flush()?;

    debug!("Expected {} bytes, wrote {} bytes", size, written);
    info!("Wrote {:?}", path);
    Ok(())
}

fn fill(args: &ArgMatches) -> Result<(), CliErrors> {
    let width = *args.get_one::<usize>("width").unwrap_or(&0);
    let height = *args.get_one::<usize>("height").unwrap_or(&0);
    let color = args
        .get_one::<String>("color")
        .map(String::as_str)
        .unwrap_or("0,0,0");
    let (r, g, b) = parse_color(color)?;

    info!("Creating {width}x{height} canvas filled with ({r},{g},{b})");

    let mut canvas = Canvas::from_color(width, height, r, g, b)?;
    canvas.set_gamma(args.get_flag("gamma"));

    write_canvas(required(args, "out")?, CanvasEncoder::new(&canvas))
}

fn print_info(args: &ArgMatches) -> Result<(), CliErrors> {
    let path = required(args, "in")?;
    let canvas = read_canvas(path, args.get_flag("gamma"))?;

    let (width, height) = canvas.dimensions();
    let (r, g, b) = canvas.get_pixel(1, 1)?;

    println!("File       : {:?}", path);
    println!("Dimensions : {width}x{height}");
    println!("Gamma      : {}", canvas.gamma());
    println!("Pixel(1,1) : ({r:.4}, {g:.4}, {b:.4})");

    Ok(())
}

fn convert(args: &ArgMatches) -> Result<(), CliErrors> {
    let in_file = required(args, "in")?;
    let out_file = required(args, "out")?;

    verify_file_paths(in_file, out_file)?;

    let canvas = read_canvas(in_file, args.get_flag("in-gamma"))?;

    let mut encoder = CanvasEncoder::new(&canvas);

    if let Some(gamma) = args.get_one::<bool>("out-gamma") {
        encoder = encoder.set_gamma(*gamma);
    }
    info!("Saving with gamma correction: {}", encoder.gamma());

    write_canvas(out_file, encoder)
}

fn verify_file_paths(p0: &OsStr, p1: &OsStr) -> Result<(), CliErrors> {
    if p0 == p1 {
        return Err(CliErrors::GenericString(format!(
            "Cannot use {:?} as both input and output",
            p0
        )));
    }
    let in_path = Path::new(p0);

    if !in_path.is_file() {
        return Err(CliErrors::GenericString(format!(
            "Path {:?} is not a file",
            in_path
        )));
    }
    Ok(())
}
