// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::fmt;

use crate::{
    error::FormatError,
    models::response::{Field, StructuredResponse},
};

/// Sense data must be ≥ 18 bytes for fixed format.
pub const FIXED_MIN_LEN: usize = 18;

/// Additional Sense Code / Qualifier pair, named through [`asc_ascq_to_str`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdditionalSenseCode {
    pub asc: u8,
    pub ascq: u8,
}

impl AdditionalSenseCode {
    #[inline]
    pub fn code_name(&self) -> &'static str {
        asc_ascq_to_str(self.asc, self.ascq)
    }
}

impl StructuredResponse for AdditionalSenseCode {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("asc", self.asc.into()),
            ("ascq", self.ascq.into()),
            ("code_name", Field::Text(self.code_name())),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        vec![self.asc, self.ascq]
    }
}

/// SPC-4 Table 43 — Fixed format sense-data byte layout
#[derive(Default, PartialEq)]
pub struct SenseData {
    pub valid: bool,        // bit7 of byte0
    pub response_code: u8,  // low-7 bits of byte0
    pub filemark: bool,     // bit7 of byte2
    pub eom: bool,          // bit6 of byte2
    pub ili: bool,          // bit5 of byte2
    pub sense_key: u8,      // low-4 bits of byte2
    pub information: u32,   // bytes 3-6
    pub additional_len: u8, // byte7
    pub cmd_specific: u32,  // bytes 8-11
    pub additional_sense_code: AdditionalSenseCode, // bytes 12-13
    pub fru_code: u8,       // byte14
    pub sense_key_specific: [u8; 3], // bytes 15-17
    raw: Vec<u8>,
}

impl SenseData {
    /// Parse *fixed-format* sense-data (SPC-4 § 4.5.3).
    ///
    /// The buffer must be at least 18 bytes long; anything past
    /// `7 + additional_len` is kept for `to_bytes` but not decoded.
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        FormatError::ensure_len("sense data", buf, FIXED_MIN_LEN)?;

        let information = u32::from_be_bytes([buf[3], buf[4], buf[5], buf[6]]);
        let cmd_specific = u32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]);

        Ok(Self {
            valid: buf[0] & 0x80 != 0,
            response_code: buf[0] & 0x7F,
            filemark: buf[2] & 0x80 != 0,
            eom: buf[2] & 0x40 != 0,
            ili: buf[2] & 0x20 != 0,
            sense_key: buf[2] & 0x0F,
            information,
            additional_len: buf[7],
            cmd_specific,
            additional_sense_code: AdditionalSenseCode {
                asc: buf[12],
                ascq: buf[13],
            },
            fru_code: buf[14],
            sense_key_specific: [buf[15], buf[16], buf[17]],
            raw: buf.to_vec(),
        })
    }

    #[inline]
    pub fn asc(&self) -> u8 {
        self.additional_sense_code.asc
    }

    #[inline]
    pub fn ascq(&self) -> u8 {
        self.additional_sense_code.ascq
    }
}

impl StructuredResponse for SenseData {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("valid", self.valid.into()),
            ("response_code", self.response_code.into()),
            ("filemark", self.filemark.into()),
            ("eom", self.eom.into()),
            ("ili", self.ili.into()),
            ("sense_key", self.sense_key.into()),
            ("information", self.information.into()),
            ("additional_sense_length", self.additional_len.into()),
            ("command_specific_information", self.cmd_specific.into()),
            (
                "additional_sense_code",
                Field::Struct(&self.additional_sense_code),
            ),
            ("field_replaceable_unit_code", self.fru_code.into()),
            ("sense_key_specific", Field::Bytes(&self.sense_key_specific)),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }

    fn byte_size(&self) -> usize {
        self.raw.len()
    }
}

impl fmt::Debug for SenseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenseData")
            .field("valid", &self.valid)
            .field(
                "response_code",
                &format_args!("{:#04x}", self.response_code),
            )
            .field("sense_key", &format_args!("{:#x}", self.sense_key))
            .field("filemark", &self.filemark)
            .field("eom", &self.eom)
            .field("ili", &self.ili)
            .field("information", &self.information)
            .field("additional_len", &self.additional_len)
            .field("cmd_specific", &self.cmd_specific)
            .field("asc", &format_args!("{:#04x}", self.asc()))
            .field("ascq", &format_args!("{:#04x}", self.ascq()))
            .field("description", &self.additional_sense_code.code_name())
            .finish()
    }
}

/// Return the SPC-4 description for a given ASC/ASCQ pair.
///
/// * If the pair is not present in the table, returns `"UNSPECIFIED /
///   vendor specific"`.
#[inline]
pub fn asc_ascq_to_str(asc: u8, ascq: u8) -> &'static str {
    hot_table(asc, ascq).unwrap_or("UNSPECIFIED / vendor specific")
}

fn hot_table(asc: u8, ascq: u8) -> Option<&'static str> {
    Some(match (asc, ascq) {
        (0x00, 0x00) => "No additional sense information",
        (0x00, 0x06) => "I/O process terminated",
        (0x04, 0x00) => "Logical unit not ready, cause not reportable",
        (0x04, 0x01) => "Logical unit is in process of becoming ready",
        (0x04, 0x02) => "Logical unit not ready, initializing command required",
        (0x04, 0x03) => "Logical unit not ready, manual intervention required",
        (0x04, 0x04) => "Logical unit not ready, format in progress",
        (0x04, 0x0A) => "Logical unit not accessible, asymmetric access state transition",
        (0x04, 0x0B) => "Logical unit not accessible, target port in standby state",
        (0x04, 0x0C) => "Logical unit not accessible, target port in unavailable state",
        (0x08, 0x00) => "Logical unit communication failure",
        (0x0C, 0x00) => "Write error",
        (0x11, 0x00) => "Unrecovered read error",
        (0x1A, 0x00) => "Parameter list length error",
        (0x20, 0x00) => "Invalid command operation code",
        (0x21, 0x00) => "Logical block address out of range",
        (0x24, 0x00) => "Invalid field in CDB",
        (0x25, 0x00) => "Logical unit not supported",
        (0x26, 0x00) => "Invalid field in parameter list",
        (0x27, 0x00) => "Write protected",
        (0x28, 0x00) => "Not ready to ready change, medium may have changed",
        (0x29, 0x00) => "Power on, reset, or bus device reset occurred",
        (0x2A, 0x01) => "Mode parameters changed",
        (0x2A, 0x03) => "Reservations preempted",
        (0x2A, 0x06) => "Asymmetric access state changed",
        (0x3A, 0x00) => "Medium not present",
        (0x3F, 0x0E) => "Reported LUNs data has changed",
        (0x40, 0x00) => "Data integrity error",
        (0x44, 0x00) => "Internal target failure",
        (0x47, 0x00) => "SCSI parity error",
        (0x4B, 0x00) => "Data phase error",
        (0x55, 0x03) => "Insufficient resources",
        _ => return None,
    })
}
