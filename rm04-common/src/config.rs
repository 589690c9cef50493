// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Tool configuration: where the programmer and the images live.

use std::path::{Path, PathBuf};

/// Exact size of a valid firmware image (4 MiB, the whole SPI flash).
pub const IMAGE_FILE_BYTES: u64 = 0x40_0000;

/// Programmer executable, relative to the directory holding this tool.
pub const DEFAULT_PROGRAMMER: &str = "../minipro/minipro";

/// Image directory, relative to the directory holding this tool.
pub const DEFAULT_IMAGE_DIR: &str = "../../bin";

/// Immutable settings shared by every component for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashConfig {
    /// Path of the external programmer executable.
    pub programmer: PathBuf,
    /// Directory scanned for images when no file is given.
    pub image_dir: PathBuf,
    /// Required image length in bytes.
    pub image_size: u64,
}

impl FlashConfig {
    pub fn new(programmer: impl Into<PathBuf>, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            programmer: programmer.into(),
            image_dir: image_dir.into(),
            image_size: IMAGE_FILE_BYTES,
        }
    }

    /// Default layout: programmer and images placed next to the tool's directory.
    pub fn from_exe_dir(dir: &Path) -> Self {
        Self::new(dir.join(DEFAULT_PROGRAMMER), dir.join(DEFAULT_IMAGE_DIR))
    }

    pub fn with_image_size(mut self, image_size: u64) -> Self {
        self.image_size = image_size;
        self
    }
}
