// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! REPORT LUNS — CDB filler (12-byte CDB written into a 16-byte buffer) and
//! parameter data decoder.
//!
//! CDB layout (SPC):
//!   [0]  = 0xA0 (REPORT LUNS)
//!   [2]  = SELECT REPORT
//!   [6..9]  = ALLOCATION LENGTH (big-endian u32)
//!   [11] = CONTROL
//!
//! Response starts with:
//!   [0..3] = LUN LIST LENGTH (big-endian u32, multiple of 8)
//!   [4..7] = reserved
//!   [8..]  = LUN entries (8 bytes each)

use crate::{
    error::FormatError,
    models::response::{Field, StructuredResponse},
};

pub const REPORT_LUNS: u8 = 0xA0;
const HEADER_LEN: usize = 8;
const LUN_ENTRY_LEN: usize = 8;

/// Common SELECT REPORT values (byte 2).
pub mod select_report {
    /// All logical unit addresses.
    pub const ALL: u8 = 0x00;
    /// Well known logical unit addresses.
    pub const WELL_KNOWN: u8 = 0x01;
    /// All logical unit addresses (excluding well known) — commonly used.
    pub const ALL_MAPPED: u8 = 0x02;
}

/// Fill a REPORT LUNS CDB into `cdb[0..12]`.
#[inline]
pub fn fill_report_luns(
    cdb: &mut [u8; 16],
    select: u8,
    allocation_len: u32,
    control: u8,
) {
    cdb.fill(0);
    cdb[0] = REPORT_LUNS;
    cdb[2] = select;
    cdb[6..10].copy_from_slice(&allocation_len.to_be_bytes());
    cdb[11] = control;
}

/// Outgoing REPORT LUNS, echoed in verbose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLunsCommand {
    pub select_report: u8,
    pub allocation_length: u32,
    pub control: u8,
}

impl ReportLunsCommand {
    pub fn new(select_report: u8) -> Self {
        Self {
            select_report,
            allocation_length: 4096,
            control: 0,
        }
    }
}

impl StructuredResponse for ReportLunsCommand {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("opcode", REPORT_LUNS.into()),
            ("select_report", self.select_report.into()),
            ("allocation_length", self.allocation_length.into()),
            ("control", self.control.into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut cdb = [0u8; 16];
        fill_report_luns(
            &mut cdb,
            self.select_report,
            self.allocation_length,
            self.control,
        );
        cdb[..12].to_vec()
    }
}

/// Decode one 8-byte LUN entry into the number a user would type.
///
/// Peripheral addressing yields byte 1, flat addressing the 14-bit LUN;
/// any other method is reported as the whole 64-bit entry.
pub fn decode_lun(entry: [u8; 8]) -> u64 {
    let single_level = entry[2..].iter().all(|&b| b == 0);
    match entry[0] >> 6 {
        0b00 if single_level && entry[0] & 0x3F == 0 => u64::from(entry[1]),
        0b01 if single_level => (u64::from(entry[0] & 0x3F) << 8) | u64::from(entry[1]),
        _ => u64::from_be_bytes(entry),
    }
}

/// Decoded REPORT LUNS parameter data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLunsData {
    pub lun_list_length: u32,
    pub lun_list: Vec<u64>,
    raw: Vec<u8>,
}

impl ReportLunsData {
    /// Entries past the end of `buf` (allocation length too small) are
    /// not decoded.
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        FormatError::ensure_len("REPORT LUNS", buf, HEADER_LEN)?;
        let lun_list_length = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let end = buf.len().min(HEADER_LEN + lun_list_length as usize);
        let lun_list = buf[HEADER_LEN..end]
            .chunks_exact(LUN_ENTRY_LEN)
            .map(|c| {
                let mut e = [0u8; LUN_ENTRY_LEN];
                e.copy_from_slice(c);
                decode_lun(e)
            })
            .collect();
        Ok(Self {
            lun_list_length,
            lun_list,
            raw: buf.to_vec(),
        })
    }
}

impl StructuredResponse for ReportLunsData {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("lun_list_length", self.lun_list_length.into()),
            (
                "lun_list",
                Field::List(self.lun_list.iter().map(|&l| l.into()).collect()),
            ),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}
