/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
fn fill() -> Command {
    Command::new("fill")
        .about("Create a canvas of a single color and save it")
        .arg(Arg::new("width")
            .long("width")
            .help("Canvas width in pixels")
            .value_parser(value_parser!(usize))
            .required(true))
        .arg(Arg::new("height")
            .long("height")
            .help("Canvas height in pixels")
            .value_parser(value_parser!(usize))
            .required(true))
        .arg(Arg::new("color")
            .long("color")
            .help("Fill color as r,g,b samples, e.g 1.0,0.5,0")
            .default_value("0,0,0"))
        .arg(Arg::new("gamma")
            .long("gamma")
            .action(ArgAction::SetTrue)
            .help("Gamma correct samples when writing"))
        .arg(Arg::new("out")
            .short('o')
            .long("out")
            .help("File to write the canvas to")
            .required(true))
}

#[rustfmt::skip]
fn info() -> Command {
    Command::new("info")
        .about("Print information about a canvas file")
        .arg(Arg::new("in")
            .help("File to read")
            .required(true))
        .arg(Arg::new("gamma")
            .long("gamma")
            .action(ArgAction::SetTrue)
            .help("Gamma expand samples when reading"))
}

#[rustfmt::skip]
fn convert() -> Command {
    Command::new("convert")
        .about("Load a canvas and save it again, optionally changing gamma correction")
        .arg(Arg::new("in")
            .help("File to read")
            .required(true))
        .arg(Arg::new("out")
            .help("File to write")
            .required(true))
        .arg(Arg::new("in-gamma")
            .long("in-gamma")
            .action(ArgAction::SetTrue)
            .help("Gamma expand samples when reading"))
        .arg(Arg::new("out-gamma")
            .long("out-gamma")
            .help("Gamma correct samples when writing")
            .long_help("Gamma correct samples when writing.\nDefaults to the value of --in-gamma")
            .value_parser(value_parser!(bool)))
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("zune-canvas")
        .about("Create, inspect and convert 24 bit BMP canvases")
        .subcommand_required(true)
        .subcommand(fill())
        .subcommand(info())
        .subcommand(convert())
        .arg(Arg::new("debug")
            .long("debug")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cmd() {
        create_cmd_args().debug_assert();
    }

    #[test]
    fn parses_fill() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "zune-canvas", "fill", "--width", "4", "--height", "2", "-o", "out.bmp"
            ])
            .unwrap();
        let (name, fill) = matches.subcommand().unwrap();

        assert_eq!(name, "fill");
        assert_eq!(fill.get_one::<usize>("width"), Some(&4));
        assert_eq!(fill.get_one::<String>("color").map(String::as_str), Some("0,0,0"));
        assert!(!fill.get_flag("gamma"));
    }
}
