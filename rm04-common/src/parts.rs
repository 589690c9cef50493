// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Supported SPI flash parts, keyed by their JEDEC id.

use crate::error::FlashError;

/// A flash part the programmer knows by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashPart {
    /// 24-bit JEDEC id (manufacturer, type, capacity).
    pub id: u32,
    /// Device name as understood by `minipro -p`.
    pub name: &'static str,
}

pub const FLASH_PARTS: &[FlashPart] = &[
    FlashPart {
        id: 0x9d_467f,
        name: "PM25LQ032C",
    },
    FlashPart {
        id: 0xc2_2016,
        name: "MX25L3206E",
    },
    FlashPart {
        id: 0xef_4016,
        name: "W25Q32BV",
    },
];

/// Names of all supported parts, in table order.
pub fn supported_part_names() -> Vec<&'static str> {
    FLASH_PARTS.iter().map(|part| part.name).collect()
}

/// Look up the programmer device name for a detected flash id.
pub fn lookup_part_name(id: u32) -> Result<&'static str, FlashError> {
    FLASH_PARTS
        .iter()
        .find(|part| part.id == id)
        .map(|part| part.name)
        .ok_or_else(|| FlashError::FlashLookup {
            id,
            supported: supported_part_names(),
        })
}
