// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Failure kinds and their process exit codes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Process exit codes, one per failure kind. 7 is reserved and never used.
pub mod exit_code {
    pub const USAGE: i32 = 1;
    pub const FLASH_LOOKUP: i32 = 2;
    pub const FLASH_UNKNOWN: i32 = 3;
    pub const FLASH_INVALID: i32 = 4;
    pub const IMAGE_UNKNOWN: i32 = 5;
    pub const IMAGE_INVALID: i32 = 6;
    pub const IO: i32 = 8;
    pub const UNCLASSIFIED: i32 = 9;
}

/// Message reported for failures that fit no other kind.
/// Must match the `Unclassified` variant's display text.
pub const UNCLASSIFIED_MESSAGE: &str = "programming failed";

/// Why the external programmer could not be used. Only shown in debug logs.
#[derive(Debug, Error)]
pub enum ProgrammerFault {
    #[error("failed to run programmer: {0}")]
    Spawn(#[source] io::Error),

    #[error("failed waiting for programmer: {0}")]
    Wait(#[source] io::Error),

    #[error("programmer exited with status {0:?}")]
    Exited(Option<i32>),

    #[error("no device id line in programmer output")]
    NoDeviceId,

    #[error("programmer reported a zero device id")]
    ZeroDeviceId,

    #[error("programmer write failed: {0}")]
    WriteFailed(String),
}

#[derive(Debug, Error)]
pub enum FlashError {
    #[error("flash name lookup failed (flash is not one of: {})", .supported.join(", "))]
    FlashLookup {
        id: u32,
        supported: Vec<&'static str>,
    },

    #[error("unknown flash device name specified")]
    FlashUnknown { part: String },

    #[error("invalid flash device name specified: {detail}")]
    FlashInvalid { part: String, detail: String },

    #[error("specify the binary image file to write to flash")]
    ImageNotSelected,

    #[error("cannot find the binary image file specified: {}", .path.display())]
    ImageNotFound { path: PathBuf },

    #[error("incorrect binary file size - expected: {expected} got {actual}")]
    ImageInvalid {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("flash device programming failed, check connections and try again")]
    Programmer(#[source] ProgrammerFault),

    #[error("programming failed")]
    Unclassified(#[from] io::Error),
}

impl FlashError {
    /// Exit code reported for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            FlashError::FlashLookup { .. } => exit_code::FLASH_LOOKUP,
            FlashError::FlashUnknown { .. } => exit_code::FLASH_UNKNOWN,
            FlashError::FlashInvalid { .. } => exit_code::FLASH_INVALID,
            FlashError::ImageNotSelected | FlashError::ImageNotFound { .. } => {
                exit_code::IMAGE_UNKNOWN
            }
            FlashError::ImageInvalid { .. } => exit_code::IMAGE_INVALID,
            FlashError::Programmer(_) => exit_code::IO,
            FlashError::Unclassified(_) => exit_code::UNCLASSIFIED,
        }
    }
}

impl From<ProgrammerFault> for FlashError {
    fn from(fault: ProgrammerFault) -> Self {
        FlashError::Programmer(fault)
    }
}
