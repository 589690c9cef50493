// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Write a binary image to the board's SPI flash through the minipro programmer.
//!
//! Usage:
//!   rm04-flash                       pick an image from ../../bin, auto-detect the part
//!   rm04-flash --detect              print the attached flash id and name
//!   rm04-flash -f image.bin -p W25Q32BV

mod cli;
mod minipro;
mod prompt;
mod report;

use std::panic;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use rm04_common::exit_code;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let rendered = e.render().to_string();
            let first = rendered.lines().next().unwrap_or("invalid arguments");
            let _ = cli::Cli::command().print_help();
            println!();
            report::print(exit_code::USAGE, first.strip_prefix("error: ").unwrap_or(first));
            return ExitCode::from(exit_code::USAGE as u8);
        }
    };

    init_logging(args.verbose);

    // Panics end up as an unclassified failure, not a backtrace.
    panic::set_hook(Box::new(|info| log::debug!("{}", info)));

    if let Err(e) = prompt::install_interrupt_handler() {
        log::debug!("Ctrl+C handler not installed: {}", e);
    }

    let (code, message) = match panic::catch_unwind(|| cli::run(args)) {
        Ok(Ok(())) => return ExitCode::SUCCESS,
        Ok(Err(e)) => report::classify(&e),
        Err(_) => (
            exit_code::UNCLASSIFIED,
            rm04_common::error::UNCLASSIFIED_MESSAGE.to_string(),
        ),
    };

    report::print(code, &message);
    ExitCode::from(code as u8)
}
