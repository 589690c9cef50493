// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Interface to the external flash programmer and interpretation of its output.
//!
//! The programmer is driven in two modes only: an identity query, which prints
//! a `Device Id: 0x...` line, and a write, which reports failures on its error
//! stream. The parsing helpers here are independent of how the programmer is
//! actually run so they can be checked against captured output.

use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{FlashError, ProgrammerFault};
use crate::parts::lookup_part_name;

/// The two operations this tool needs from a programmer.
pub trait ProgrammerClient {
    /// Query the attached chip and return its non-zero JEDEC id.
    fn query_device_id(&mut self) -> Result<u32, FlashError>;

    /// Write `image` to the chip, programming it as device `part`.
    fn write_image(&mut self, part: &str, image: &Path) -> Result<(), FlashError>;
}

/// Detected flash chip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashIdentity {
    pub id: u32,
    pub name: &'static str,
}

fn device_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^Device Id: 0x([0-9a-fA-F]+)\r?$").expect("device id pattern is valid")
    })
}

/// Extract the device id from the programmer's query output.
///
/// A missing line, an unparsable value and a zero id all count as a
/// programmer failure: a zero id is what the programmer reports when no chip
/// answers.
pub fn parse_device_id(output: &str) -> Result<u32, FlashError> {
    let caps = device_id_regex()
        .captures(output)
        .ok_or(ProgrammerFault::NoDeviceId)?;
    let id = u32::from_str_radix(&caps[1], 16).map_err(|_| ProgrammerFault::NoDeviceId)?;
    if id == 0 {
        return Err(ProgrammerFault::ZeroDeviceId.into());
    }
    log::debug!("programmer reported device id 0x{:x}", id);
    Ok(id)
}

/// Map the error text of a failed write to the matching failure kind.
pub fn classify_write_failure(part: &str, stderr: &str) -> FlashError {
    let text = stderr.trim();
    // ASCII lowering keeps byte offsets aligned with `text`.
    let lowered = text.to_ascii_lowercase();

    if lowered.starts_with("unknown device") {
        FlashError::FlashUnknown {
            part: part.to_string(),
        }
    } else if lowered.starts_with("invalid device") {
        let detail = match lowered.find("expect") {
            Some(pos) => &text[pos..],
            None => text,
        };
        FlashError::FlashInvalid {
            part: part.to_string(),
            detail: detail.to_string(),
        }
    } else {
        ProgrammerFault::WriteFailed(text.to_string()).into()
    }
}

/// Query the programmer and resolve the chip's part name.
pub fn detect_part<C>(client: &mut C) -> Result<FlashIdentity, FlashError>
where
    C: ProgrammerClient + ?Sized,
{
    let id = client.query_device_id()?;
    let name = lookup_part_name(id)?;
    Ok(FlashIdentity { id, name })
}

/// Detect the chip and print its id and name.
///
/// The id is printed before the lookup so an unsupported chip still shows it.
pub fn print_flash_info<C, W>(client: &mut C, out: &mut W) -> Result<FlashIdentity, FlashError>
where
    C: ProgrammerClient + ?Sized,
    W: Write,
{
    let id = client.query_device_id()?;
    writeln!(out, "Flash device id: 0x{:x}", id)?;
    let name = lookup_part_name(id)?;
    writeln!(out, "Flash device name: {}", name)?;
    Ok(FlashIdentity { id, name })
}
