// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for the flash part table and error taxonomy.

use rm04_common::{exit_code, lookup_part_name, supported_part_names, FlashError, FLASH_PARTS};

// --- Part table ---

#[test]
fn test_known_ids_map_to_names() {
    assert_eq!(lookup_part_name(0x9d467f).unwrap(), "PM25LQ032C");
    assert_eq!(lookup_part_name(0xc22016).unwrap(), "MX25L3206E");
    assert_eq!(lookup_part_name(0xef4016).unwrap(), "W25Q32BV");
}

#[test]
fn test_table_has_three_unique_ids() {
    assert_eq!(FLASH_PARTS.len(), 3);
    for (i, a) in FLASH_PARTS.iter().enumerate() {
        for b in &FLASH_PARTS[i + 1..] {
            assert_ne!(a.id, b.id);
        }
    }
}

#[test]
fn test_ids_fit_in_24_bits() {
    assert!(FLASH_PARTS.iter().all(|part| part.id <= 0xff_ffff));
}

#[test]
fn test_unknown_id_lists_supported_parts() {
    for id in [0x1, 0xef4017, 0xc22015, 0x9d4670, 0xff_ffff] {
        let err = lookup_part_name(id).unwrap_err();
        assert!(matches!(err, FlashError::FlashLookup { id: got, .. } if got == id));
        assert_eq!(err.exit_code(), exit_code::FLASH_LOOKUP);
        assert_eq!(
            err.to_string(),
            "flash name lookup failed (flash is not one of: PM25LQ032C, MX25L3206E, W25Q32BV)"
        );
    }
}

#[test]
fn test_supported_names_in_table_order() {
    assert_eq!(
        supported_part_names(),
        ["PM25LQ032C", "MX25L3206E", "W25Q32BV"]
    );
}

// --- Exit codes ---

#[test]
fn test_exit_code_values() {
    assert_eq!(exit_code::USAGE, 1);
    assert_eq!(exit_code::FLASH_LOOKUP, 2);
    assert_eq!(exit_code::FLASH_UNKNOWN, 3);
    assert_eq!(exit_code::FLASH_INVALID, 4);
    assert_eq!(exit_code::IMAGE_UNKNOWN, 5);
    assert_eq!(exit_code::IMAGE_INVALID, 6);
    assert_eq!(exit_code::IO, 8);
    assert_eq!(exit_code::UNCLASSIFIED, 9);
}

#[test]
fn test_exit_code_seven_is_reserved() {
    let codes = [
        exit_code::USAGE,
        exit_code::FLASH_LOOKUP,
        exit_code::FLASH_UNKNOWN,
        exit_code::FLASH_INVALID,
        exit_code::IMAGE_UNKNOWN,
        exit_code::IMAGE_INVALID,
        exit_code::IO,
        exit_code::UNCLASSIFIED,
    ];
    assert!(!codes.contains(&7));
}
