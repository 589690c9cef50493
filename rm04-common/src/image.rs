// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Image file discovery and validation.
//!
//! An image is valid when it is a regular file of exactly the configured size;
//! its contents are opaque. When no file is named, the image directory is
//! scanned and the user picks among the matches if there is more than one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::config::FlashConfig;
use crate::error::FlashError;

/// A file in the image directory with the expected size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageCandidate {
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

/// Source of the user's choice when several images match.
pub trait Selector {
    /// Pick one of `count` numbered entries. Returns the 1-based index, or
    /// `None` to quit.
    fn select(&mut self, count: usize) -> Option<usize>;
}

/// Parse a menu choice in `1..=max`. Anything else means quit.
pub fn parse_choice(input: &str, max: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(choice) if (1..=max).contains(&choice) => Some(choice),
        _ => None,
    }
}

/// List regular files in `dir` of exactly `size` bytes, newest first.
pub fn scan_image_dir(dir: &Path, size: u64) -> Result<Vec<ImageCandidate>, FlashError> {
    let mut matches = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) => {
                log::debug!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        if !meta.is_file() || meta.len() != size {
            continue;
        }
        let modified = meta.modified()?;
        matches.push(ImageCandidate {
            path,
            size: meta.len(),
            modified,
        });
    }

    matches.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));
    log::debug!(
        "found {} image(s) of {} bytes in {}",
        matches.len(),
        size,
        dir.display()
    );
    Ok(matches)
}

/// Check that `path` is a regular file of exactly `expected` bytes.
pub fn validate_image(path: &Path, expected: u64) -> Result<u64, FlashError> {
    let meta = match fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta,
        _ => {
            return Err(FlashError::ImageNotFound {
                path: path.to_path_buf(),
            })
        }
    };

    let actual = meta.len();
    if actual != expected {
        return Err(FlashError::ImageInvalid {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(actual)
}

/// Pick the image to flash from the configured image directory.
///
/// Returns `None` when there is no match or the user quits the menu.
pub fn resolve_image<S, W>(
    config: &FlashConfig,
    selector: &mut S,
    out: &mut W,
) -> Result<Option<PathBuf>, FlashError>
where
    S: Selector + ?Sized,
    W: Write,
{
    let mut matches = scan_image_dir(&config.image_dir, config.image_size)?;

    match matches.len() {
        0 => return Ok(None),
        1 => return Ok(Some(matches.remove(0).path)),
        _ => {}
    }

    let dir_name = display_dir_name(&config.image_dir);
    writeln!(out)?;
    writeln!(out, "Select the image file to flash:")?;
    writeln!(out)?;
    for (i, candidate) in matches.iter().enumerate() {
        let stamp: DateTime<Local> = candidate.modified.into();
        let file_name = candidate
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        writeln!(
            out,
            "  {:>2}) {} {}/{}",
            i + 1,
            stamp.format("%Y-%m-%d %H:%M:%S"),
            dir_name,
            file_name
        )?;
    }
    writeln!(out, "   q) quit")?;
    writeln!(out)?;
    out.flush()?;

    let count = matches.len();
    match selector.select(count) {
        Some(choice) if (1..=count).contains(&choice) => {
            Ok(Some(matches.swap_remove(choice - 1).path))
        }
        _ => {
            log::debug!("image selection cancelled");
            Ok(None)
        }
    }
}

fn display_dir_name(dir: &Path) -> String {
    let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    match dir.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => dir.display().to_string(),
    }
}
