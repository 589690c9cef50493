// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use rm04_common::programmer::print_flash_info;
use rm04_common::{supported_part_names, FlashConfig, FlashWriter};

use crate::minipro::Minipro;
use crate::prompt::TerminalSelector;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "rm04-flash")]
#[command(about = "Write a binary image file to the specified flash memory")]
#[command(
    after_help = "With no options the image is picked from the image directory and the flash part is auto-detected."
)]
pub struct Cli {
    /// Auto-detect flash memory id and name
    #[arg(short, long)]
    pub detect: bool,

    /// Binary image filename
    #[arg(short, long, value_name = "FILENAME", value_parser = trimmed)]
    pub file: Option<String>,

    #[arg(
        short,
        long,
        value_name = "PARTNAME",
        value_parser = trimmed,
        help = part_help()
    )]
    pub part: Option<String>,

    /// Programmer executable (default: ../minipro/minipro next to this tool)
    #[arg(long, env = "RM04_PROGRAMMER", value_name = "PATH")]
    pub programmer: Option<PathBuf>,

    /// Directory searched for images (default: ../../bin next to this tool)
    #[arg(long, env = "RM04_IMAGE_DIR", value_name = "DIR")]
    pub image_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn part_help() -> String {
    format!(
        "Flash memory part name - one of: {}",
        supported_part_names().join(", ")
    )
}

fn trimmed(value: &str) -> Result<String, std::convert::Infallible> {
    Ok(value.trim().to_string())
}

impl Cli {
    /// Build the run configuration, filling unset paths from the tool's location.
    pub fn config(&self) -> Result<FlashConfig> {
        let exe = std::env::current_exe().context("cannot locate the running executable")?;
        let exe_dir = exe.parent().unwrap_or_else(|| Path::new("."));
        let mut config = FlashConfig::from_exe_dir(exe_dir);

        if let Some(programmer) = &self.programmer {
            config.programmer = programmer.clone();
        }
        if let Some(image_dir) = &self.image_dir {
            config.image_dir = image_dir.clone();
        }
        log::debug!("{:?}", config);
        Ok(config)
    }

    fn image(&self) -> Option<&Path> {
        self.file.as_deref().filter(|f| !f.is_empty()).map(Path::new)
    }

    fn part(&self) -> Option<&str> {
        self.part.as_deref().filter(|p| !p.is_empty())
    }
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    let mut programmer = Minipro::new(&config.programmer);
    let mut out = io::stdout();

    if cli.detect {
        print_flash_info(&mut programmer, &mut out)?;
        return Ok(());
    }

    let mut selector = TerminalSelector::stdio();
    FlashWriter::new(&config, &mut programmer, &mut selector).write(
        cli.image(),
        cli.part(),
        &mut out,
    )?;
    Ok(())
}
