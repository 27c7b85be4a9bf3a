// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! REPORT TARGET PORT GROUPS — MAINTENANCE IN (0xA3), service action 0x0A.
//!
//! CDB layout (SPC):
//!   [0]    = 0xA3
//!   [1]    = PARAMETER DATA FORMAT (7..5) | SERVICE ACTION (4..0)
//!   [6..9] = ALLOCATION LENGTH (big-endian u32)
//!   [11]   = CONTROL
//!
//! Length-only parameter data: RETURN DATA LENGTH (u32), then target port
//! group descriptors of 8 bytes plus 4 bytes per relative target port.

use bitflags::bitflags;

use crate::{
    error::FormatError,
    models::response::{Field, StructuredResponse},
};

pub const MAINTENANCE_IN: u8 = 0xA3;
pub const REPORT_TARGET_PORT_GROUPS_SA: u8 = 0x0A;
const HEADER_LEN: usize = 4;
const DESCRIPTOR_LEN: usize = 8;
const PORT_LEN: usize = 4;

/// Fill a REPORT TARGET PORT GROUPS CDB into `cdb[0..12]`.
#[inline]
pub fn fill_report_target_port_groups(cdb: &mut [u8; 16], allocation_len: u32, control: u8) {
    cdb.fill(0);
    cdb[0] = MAINTENANCE_IN;
    cdb[1] = REPORT_TARGET_PORT_GROUPS_SA;
    cdb[6..10].copy_from_slice(&allocation_len.to_be_bytes());
    cdb[11] = control;
}

/// Outgoing REPORT TARGET PORT GROUPS, echoed in verbose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTargetPortGroupsCommand {
    pub allocation_length: u32,
    pub control: u8,
}

impl Default for ReportTargetPortGroupsCommand {
    fn default() -> Self {
        Self {
            allocation_length: 4096,
            control: 0,
        }
    }
}

impl StructuredResponse for ReportTargetPortGroupsCommand {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("opcode", MAINTENANCE_IN.into()),
            ("service_action", REPORT_TARGET_PORT_GROUPS_SA.into()),
            ("allocation_length", self.allocation_length.into()),
            ("control", self.control.into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut cdb = [0u8; 16];
        fill_report_target_port_groups(&mut cdb, self.allocation_length, self.control);
        cdb[..12].to_vec()
    }
}

bitflags! {
    /// Byte 1 of a target port group descriptor: supported access states.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct SupportedStates: u8 {
        const T_SUP   = 0b1000_0000;
        const O_SUP   = 0b0100_0000;
        const LBD_SUP = 0b0001_0000;
        const U_SUP   = 0b0000_1000;
        const S_SUP   = 0b0000_0100;
        const AN_SUP  = 0b0000_0010;
        const AO_SUP  = 0b0000_0001;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTargetPort {
    pub relative_target_port_identifier: u16,
}

impl StructuredResponse for RelativeTargetPort {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![(
            "relative_target_port_identifier",
            self.relative_target_port_identifier.into(),
        )]
    }

    fn to_bytes(&self) -> Vec<u8> {
        let id = self.relative_target_port_identifier.to_be_bytes();
        vec![0, 0, id[0], id[1]]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPortGroupDescriptor {
    pub pref: bool,
    pub asymmetric_access_state: u8,
    pub supported: SupportedStates,
    pub target_port_group: u16,
    pub status_code: u8,
    pub vendor_specific: u8,
    pub relative_target_ports: Vec<RelativeTargetPort>,
    raw: Vec<u8>,
}

impl TargetPortGroupDescriptor {
    fn parse(buf: &[u8]) -> Result<(Self, usize), FormatError> {
        FormatError::ensure_len("target port group descriptor", buf, DESCRIPTOR_LEN)?;
        let count = buf[7] as usize;
        let end = DESCRIPTOR_LEN + count * PORT_LEN;
        FormatError::ensure_len("target port group descriptor", buf, end)?;
        let relative_target_ports = buf[DESCRIPTOR_LEN..end]
            .chunks_exact(PORT_LEN)
            .map(|c| RelativeTargetPort {
                relative_target_port_identifier: u16::from_be_bytes([c[2], c[3]]),
            })
            .collect();
        Ok((
            Self {
                pref: buf[0] & 0x80 != 0,
                asymmetric_access_state: buf[0] & 0x0F,
                supported: SupportedStates::from_bits_truncate(buf[1]),
                target_port_group: u16::from_be_bytes([buf[2], buf[3]]),
                status_code: buf[5],
                vendor_specific: buf[6],
                relative_target_ports,
                raw: buf[..end].to_vec(),
            },
            end,
        ))
    }
}

impl StructuredResponse for TargetPortGroupDescriptor {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        let s = self.supported;
        vec![
            ("pref", self.pref.into()),
            ("asymmetric_access_state", self.asymmetric_access_state.into()),
            ("t_sup", s.contains(SupportedStates::T_SUP).into()),
            ("o_sup", s.contains(SupportedStates::O_SUP).into()),
            ("lbd_sup", s.contains(SupportedStates::LBD_SUP).into()),
            ("u_sup", s.contains(SupportedStates::U_SUP).into()),
            ("s_sup", s.contains(SupportedStates::S_SUP).into()),
            ("an_sup", s.contains(SupportedStates::AN_SUP).into()),
            ("ao_sup", s.contains(SupportedStates::AO_SUP).into()),
            ("target_port_group", self.target_port_group.into()),
            ("status_code", self.status_code.into()),
            ("vendor_specific", self.vendor_specific.into()),
            (
                "target_port_count",
                (self.relative_target_ports.len() as u64).into(),
            ),
            (
                "relative_target_ports",
                Field::List(
                    self.relative_target_ports
                        .iter()
                        .map(|p| Field::Struct(p))
                        .collect(),
                ),
            ),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}

/// REPORT TARGET PORT GROUPS parameter data (length-only header format).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPortGroupsData {
    pub return_data_length: u32,
    pub target_port_group_descriptors: Vec<TargetPortGroupDescriptor>,
    raw: Vec<u8>,
}

impl TargetPortGroupsData {
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        FormatError::ensure_len("REPORT TARGET PORT GROUPS", buf, HEADER_LEN)?;
        let return_data_length = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let end = HEADER_LEN + return_data_length as usize;
        FormatError::ensure_len("REPORT TARGET PORT GROUPS", buf, end)?;
        let body = &buf[HEADER_LEN..end];
        let mut target_port_group_descriptors = Vec::new();
        let mut off = 0usize;
        while off < body.len() {
            let (d, used) = TargetPortGroupDescriptor::parse(&body[off..])?;
            target_port_group_descriptors.push(d);
            off += used;
        }
        Ok(Self {
            return_data_length,
            target_port_group_descriptors,
            raw: buf.to_vec(),
        })
    }
}

impl StructuredResponse for TargetPortGroupsData {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("return_data_length", self.return_data_length.into()),
            (
                "target_port_group_descriptors",
                Field::List(
                    self.target_port_group_descriptors
                        .iter()
                        .map(|d| Field::Struct(d))
                        .collect(),
                ),
            ),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}
