// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types and decision logic for the rm04 flash programming tool.
//!
//! Everything that interprets the outside world lives here: picking the image
//! file, identifying the flash part, and turning the programmer's exit status
//! and diagnostics into a [`FlashError`]. The process, terminal and
//! filesystem bindings stay in the `rm04-flash` binary, behind the
//! [`ProgrammerClient`] and [`Selector`] traits.

pub mod config;
pub mod error;
pub mod image;
pub mod parts;
pub mod programmer;
pub mod writer;

// Re-export commonly used types
pub use config::{FlashConfig, IMAGE_FILE_BYTES};
pub use error::{exit_code, FlashError, ProgrammerFault};
pub use image::{ImageCandidate, Selector};
pub use parts::{lookup_part_name, supported_part_names, FlashPart, FLASH_PARTS};
pub use programmer::{FlashIdentity, ProgrammerClient};
pub use writer::{FlashWriter, Invocation};
