// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Single exit point: failure kind to exit code and one `error N:` line.

use std::io::Write;

use rm04_common::error::UNCLASSIFIED_MESSAGE;
use rm04_common::{exit_code, FlashError};

/// Exit code and message for any failure coming out of a command.
pub fn classify(err: &anyhow::Error) -> (i32, String) {
    log::debug!("{:#}", err);
    match err
        .chain()
        .find_map(|cause| cause.downcast_ref::<FlashError>())
    {
        Some(flash) => classify_flash(flash),
        None => (exit_code::UNCLASSIFIED, UNCLASSIFIED_MESSAGE.to_string()),
    }
}

pub fn classify_flash(err: &FlashError) -> (i32, String) {
    if let Some(source) = std::error::Error::source(err) {
        log::debug!("caused by: {}", source);
    }
    (err.exit_code(), err.to_string())
}

/// Write the failure line to stderr.
pub fn print(code: i32, message: &str) {
    let _ = writeln!(std::io::stderr(), "error {}: {}", code, message);
}

/// Report `err` and terminate the process.
///
/// Second exit path besides `main`, used by the Ctrl+C handler while the image
/// menu is blocked in `read_line`: the read cannot be woken to return `None`,
/// so the handler thread reports the same failure a quit would produce.
pub fn exit_with(err: &FlashError) -> ! {
    let (code, message) = classify_flash(err);
    print(code, &message);
    std::process::exit(code)
}
