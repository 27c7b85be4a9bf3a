// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! REQUEST SENSE — 6-byte CDB filler written into a provided 16-byte buffer.
//!
//! CDB layout (SPC):
//!   [0] = 0x03 (REQUEST SENSE)
//!   [1] = DESC (bit 0), other bits reserved=0
//!   [4] = ALLOCATION LENGTH (number of bytes to return)
//!   [5] = CONTROL
//!
//! The returned data is decoded by [`crate::models::sense_data::SenseData`].

use crate::models::response::{Field, StructuredResponse};

pub const REQUEST_SENSE: u8 = 0x03;

/// Fill a REQUEST SENSE (6) CDB into `cdb[0..6]`.
#[inline]
pub fn fill_request_sense(
    cdb: &mut [u8; 16],
    desc: bool,
    allocation_len: u8,
    control: u8,
) {
    cdb.fill(0);
    cdb[0] = REQUEST_SENSE;
    cdb[1] = (desc as u8) & 0x01; // DESC bit (bit 0)
    cdb[4] = allocation_len;
    cdb[5] = control;
}

/// Outgoing REQUEST SENSE, echoed in verbose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSenseCommand {
    pub desc: bool,
    pub allocation_length: u8,
    pub control: u8,
}

impl Default for RequestSenseCommand {
    fn default() -> Self {
        Self {
            desc: false,
            allocation_length: 252,
            control: 0,
        }
    }
}

impl StructuredResponse for RequestSenseCommand {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("opcode", REQUEST_SENSE.into()),
            ("desc", self.desc.into()),
            ("allocation_length", self.allocation_length.into()),
            ("control", self.control.into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut cdb = [0u8; 16];
        fill_request_sense(&mut cdb, self.desc, self.allocation_length, self.control);
        cdb[..6].to_vec()
    }
}
