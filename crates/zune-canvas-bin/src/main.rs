/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use clap::ArgMatches;
use log::{error, info, Level};

use crate::workflow::exec_subcommand;

mod cmd_args;
mod errors;
mod workflow;

/// Log level picked by the LOGGING flags, first match wins
fn log_level(options: &ArgMatches) -> Level {
    [
        ("debug", Level::Debug),
        ("trace", Level::Trace),
        ("warn", Level::Warn),
        ("info", Level::Info)
    ]
    .into_iter()
    .find(|(flag, _)| options.get_flag(flag))
    .map_or(Level::Warn, |(_, level)| level)
}

fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    let level = log_level(&options);

    match simple_logger::init_with_level(level) {
        Ok(()) => info!("Log level: {}", level),
        Err(err) => eprintln!("Could not initialize logger: {err}")
    }

    if let Err(err) = exec_subcommand(&options) {
        println!();
        error!(" Could not complete command, reason {:?}", err);
        println!();
        exit(-1);
    }
}
