// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Flags of standard INQUIRY data that decoders do not name individually;
//! they are read back out of the raw response.

use std::collections::BTreeMap;

use crate::error::FormatError;

/// A named bit run inside a raw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    pub name: &'static str,
    pub byte: usize,
    /// Position of the least significant bit of the run.
    pub bit: u8,
    pub width: u8,
}

impl BitField {
    pub const fn new(name: &'static str, byte: usize, bit: u8, width: u8) -> Self {
        Self {
            name,
            byte,
            bit,
            width,
        }
    }

    /// Caller guarantees `raw.len() > self.byte`.
    #[inline]
    fn extract(&self, raw: &[u8]) -> u8 {
        let mask = ((1u16 << self.width) - 1) as u8;
        (raw[self.byte] >> self.bit) & mask
    }
}

/// Standard INQUIRY flags recovered from bytes 3, 6 and 7.
pub const STANDARD_INQUIRY_FLAGS: &[BitField] = &[
    BitField::new("aerc", 3, 7, 1),
    BitField::new("trmtsk", 3, 6, 1),
    BitField::new("bque", 6, 7, 1),
    BitField::new("mchngr", 6, 3, 1),
    BitField::new("ackreqq", 6, 2, 1),
    BitField::new("addr16", 6, 0, 1),
    BitField::new("reladr", 7, 7, 1),
    BitField::new("wbus16", 7, 5, 1),
    BitField::new("sync", 7, 4, 1),
    BitField::new("linked", 7, 3, 1),
    BitField::new("trandis", 7, 2, 1),
    BitField::new("cmdque", 7, 1, 1),
];

/// Extract every field of `table` from `raw`.
pub fn recover_flags(
    what: &'static str,
    table: &[BitField],
    raw: &[u8],
) -> Result<BTreeMap<&'static str, u8>, FormatError> {
    let need = table.iter().map(|f| f.byte + 1).max().unwrap_or(0);
    FormatError::ensure_len(what, raw, need)?;
    Ok(table.iter().map(|f| (f.name, f.extract(raw))).collect())
}

/// Recover the unnamed standard INQUIRY flags; a buffer that does not reach
/// byte 7 is malformed.
pub fn recover_standard_inquiry_flags(
    raw: &[u8],
) -> Result<BTreeMap<&'static str, u8>, FormatError> {
    recover_flags("standard INQUIRY flags", STANDARD_INQUIRY_FLAGS, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_each_flag_at_its_offset() {
        for f in STANDARD_INQUIRY_FLAGS {
            let mut raw = [0u8; 8];
            raw[f.byte] = 1 << f.bit;
            let flags = recover_standard_inquiry_flags(&raw).expect("WTF");
            for (name, value) in &flags {
                let expected = u8::from(*name == f.name);
                assert_eq!(*value, expected, "flag {name} while setting {}", f.name);
            }
        }
    }

    #[test]
    fn all_ones_sets_every_flag() {
        let flags = recover_standard_inquiry_flags(&[0xFF; 8]).expect("WTF");
        assert_eq!(flags.len(), STANDARD_INQUIRY_FLAGS.len());
        assert!(flags.values().all(|&v| v == 1));
    }

    #[test]
    fn short_buffer_is_fatal() {
        assert!(matches!(
            recover_standard_inquiry_flags(&[0u8; 7]),
            Err(FormatError::Truncated { need: 8, got: 7, .. })
        ));
    }

    #[test]
    fn multi_bit_fields() {
        let tpgs = [BitField::new("tpgs", 0, 4, 2)];
        let flags = recover_flags("byte 5", &tpgs, &[0x30]).expect("WTF");
        assert_eq!(flags["tpgs"], 3);
    }
}
