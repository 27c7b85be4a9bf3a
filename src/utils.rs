// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Encode a byte run as `0x` + lowercase hex; an empty run yields `""`.
pub fn hex_prefixed(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }
    let mut s = String::with_capacity(2 + bytes.len() * 2);
    s.push_str("0x");
    s.push_str(&hex::encode(bytes));
    s
}

/// ASCII field decode: non-ASCII bytes become `?`, surrounding blanks and
/// NULs are dropped.
pub fn trim_ascii(bytes: &[u8]) -> String {
    let s: String = bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect();
    s.trim_matches(|c: char| c == '\0' || c.is_ascii_whitespace())
        .to_string()
}

/// Big-endian unsigned integer of up to 8 bytes.
pub fn be_uint(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_prefixed_empty_is_empty() {
        assert_eq!(hex_prefixed(&[]), "");
        assert_eq!(hex_prefixed(&[0x00, 0xAB]), "0x00ab");
    }

    #[test]
    fn trim_ascii_strips_padding() {
        assert_eq!(trim_ascii(b"LIO-ORG \0\0"), "LIO-ORG");
        assert_eq!(trim_ascii(&[b'A', 0xFF, b'B']), "A?B");
    }

    #[test]
    fn be_uint_reads_big_endian() {
        assert_eq!(be_uint(&[0x01, 0x02]), 0x0102);
        assert_eq!(be_uint(&[]), 0);
    }
}
