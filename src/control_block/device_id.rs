// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! VPD 0x83 — Device Identification.
//!
//! Each identification descriptor:
//!   [0]    = PROTOCOL IDENTIFIER (7..4) | CODE SET (3..0)
//!   [1]    = PIV (7) | reserved (6) | ASSOCIATION (5..4) | DESIGNATOR TYPE (3..0)
//!   [2]    = reserved
//!   [3]    = DESIGNATOR LENGTH (n)
//!   [4..]  = DESIGNATOR (n bytes)

use core::fmt::Write;

use crate::{
    control_block::inquiry::{PeripheralDevice, vpd_payload},
    error::FormatError,
    models::response::{Field, StructuredResponse},
    utils::{be_uint, trim_ascii},
};

/// Fixed part of every identification descriptor.
pub const DESIGNATOR_HEADER_LEN: usize = 4;

/// Designator type codes (SPC-4 Table 460).
pub mod designator_type {
    pub const VENDOR_SPECIFIC: u8 = 0x0;
    pub const T10: u8 = 0x1;
    pub const EUI64: u8 = 0x2;
    pub const NAA: u8 = 0x3;
    pub const RELATIVE_TARGET_PORT: u8 = 0x4;
    pub const TARGET_PORT_GROUP: u8 = 0x5;
    pub const LOGICAL_UNIT_GROUP: u8 = 0x6;
    pub const MD5_LOGICAL_UNIT: u8 = 0x7;
    pub const SCSI_NAME_STRING: u8 = 0x8;
    pub const PROTOCOL_SPECIFIC_PORT: u8 = 0x9;
    pub const UUID: u8 = 0xA;
}

/// NAA identifier, keyed by its 4-bit selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaaIdentifier {
    /// NAA 2 — IEEE Extended.
    IeeeExtended {
        vendor_specific_identifier_a: u16,
        ieee_company_id: u32,
        vendor_specific_identifier_b: u32,
    },
    /// NAA 5 — IEEE Registered.
    IeeeRegistered {
        ieee_company_id: u32,
        vendor_specific_identifier: u64,
    },
    /// NAA 6 — IEEE Registered Extended.
    IeeeRegisteredExtended {
        ieee_company_id: u32,
        vendor_specific_identifier: u64,
        vendor_specific_identifier_extension: u64,
    },
    /// Locally assigned or reserved selectors: only the selector is kept.
    Other(u8),
}

impl NaaIdentifier {
    pub fn naa(&self) -> u8 {
        match self {
            NaaIdentifier::IeeeExtended { .. } => 2,
            NaaIdentifier::IeeeRegistered { .. } => 5,
            NaaIdentifier::IeeeRegisteredExtended { .. } => 6,
            NaaIdentifier::Other(n) => *n,
        }
    }

    fn parse(p: &[u8]) -> Result<Self, FormatError> {
        FormatError::ensure_len("NAA designator", p, 1)?;
        let naa = p[0] >> 4;
        Ok(match naa {
            2 => {
                FormatError::ensure_len("NAA 2 designator", p, 8)?;
                NaaIdentifier::IeeeExtended {
                    vendor_specific_identifier_a: u16::from_be_bytes([p[0] & 0x0F, p[1]]),
                    ieee_company_id: be_uint(&p[2..5]) as u32,
                    vendor_specific_identifier_b: be_uint(&p[5..8]) as u32,
                }
            },
            5 | 6 => {
                let need = if naa == 5 { 8 } else { 16 };
                FormatError::ensure_len("NAA designator", p, need)?;
                let head = be_uint(&p[..8]);
                let ieee_company_id = ((head >> 36) & 0xFF_FFFF) as u32;
                let vendor_specific_identifier = head & 0xF_FFFF_FFFF;
                if naa == 5 {
                    NaaIdentifier::IeeeRegistered {
                        ieee_company_id,
                        vendor_specific_identifier,
                    }
                } else {
                    NaaIdentifier::IeeeRegisteredExtended {
                        ieee_company_id,
                        vendor_specific_identifier,
                        vendor_specific_identifier_extension: be_uint(&p[8..16]),
                    }
                }
            },
            other => NaaIdentifier::Other(other),
        })
    }
}

/// EUI-64 based designator in its 8, 12 or 16 byte form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eui64 {
    pub identifier_extension: Option<u64>,
    pub ieee_company_id: u32,
    pub vendor_specific_extension_identifier: u64,
    pub directory_id: Option<u32>,
}

impl Eui64 {
    fn parse(p: &[u8]) -> Result<Self, FormatError> {
        Ok(match p.len() {
            16 => Self {
                identifier_extension: Some(be_uint(&p[0..8])),
                ieee_company_id: be_uint(&p[8..11]) as u32,
                vendor_specific_extension_identifier: be_uint(&p[11..16]),
                directory_id: None,
            },
            12 => Self {
                identifier_extension: None,
                ieee_company_id: be_uint(&p[0..3]) as u32,
                vendor_specific_extension_identifier: be_uint(&p[3..8]),
                directory_id: Some(be_uint(&p[8..12]) as u32),
            },
            8 => Self {
                identifier_extension: None,
                ieee_company_id: be_uint(&p[0..3]) as u32,
                vendor_specific_extension_identifier: be_uint(&p[3..8]),
                directory_id: None,
            },
            len => return Err(FormatError::BadDesignatorLength { what: "EUI-64", len }),
        })
    }
}

/// Type-specific part of a designator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignatorPayload {
    /// Vendor-specific, protocol-specific port and reserved types: the
    /// designator bytes are not modelled further.
    Raw(Vec<u8>),
    T10 {
        vendor_id: String,
        vendor_specific: String,
    },
    Eui64(Eui64),
    Naa(NaaIdentifier),
    RelativeTargetPort(u16),
    TargetPortGroup(u16),
    LogicalUnitGroup(u16),
    Md5(Vec<u8>),
    ScsiName(String),
    Uuid(String),
}

/// One identification descriptor of VPD page 0x83.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Designator {
    pub protocol_identifier: u8,
    pub code_set: u8,
    pub piv: bool,
    pub association: u8,
    /// Raw 4-bit value; reserved values are kept so the renderer can refuse them.
    pub designator_type: u8,
    pub payload: DesignatorPayload,
    raw: Vec<u8>,
}

fn low_u16(p: &[u8], what: &'static str) -> Result<u16, FormatError> {
    // two reserved bytes, then the 16-bit identifier
    FormatError::ensure_len(what, p, 4)?;
    Ok(u16::from_be_bytes([p[2], p[3]]))
}

fn format_uuid(u: &[u8]) -> String {
    let mut s = String::with_capacity(36);
    for (i, b) in u.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            s.push('-');
        }
        let _ = write!(&mut s, "{b:02x}");
    }
    s
}

impl Designator {
    /// Parse one descriptor from the start of `buf`; returns it and the
    /// number of bytes consumed.
    pub fn parse(buf: &[u8]) -> Result<(Self, usize), FormatError> {
        FormatError::ensure_len("designator header", buf, DESIGNATOR_HEADER_LEN)?;
        let b0 = buf[0];
        let b1 = buf[1];
        let len = buf[3] as usize;
        let end = DESIGNATOR_HEADER_LEN + len;
        FormatError::ensure_len("designator", buf, end)?;
        let p = &buf[DESIGNATOR_HEADER_LEN..end];

        let designator_type = b1 & 0x0F;
        let payload = {
            use self::designator_type::*;
            match designator_type {
                T10 => {
                    let split = p.len().min(8);
                    DesignatorPayload::T10 {
                        vendor_id: trim_ascii(&p[..split]),
                        vendor_specific: trim_ascii(&p[split..]),
                    }
                },
                EUI64 => DesignatorPayload::Eui64(Eui64::parse(p)?),
                NAA => DesignatorPayload::Naa(NaaIdentifier::parse(p)?),
                RELATIVE_TARGET_PORT => DesignatorPayload::RelativeTargetPort(low_u16(
                    p,
                    "relative target port designator",
                )?),
                TARGET_PORT_GROUP => DesignatorPayload::TargetPortGroup(low_u16(
                    p,
                    "target port group designator",
                )?),
                LOGICAL_UNIT_GROUP => DesignatorPayload::LogicalUnitGroup(low_u16(
                    p,
                    "logical unit group designator",
                )?),
                MD5_LOGICAL_UNIT => DesignatorPayload::Md5(p.to_vec()),
                SCSI_NAME_STRING => DesignatorPayload::ScsiName(
                    String::from_utf8_lossy(p)
                        .trim_end_matches('\0')
                        .to_string(),
                ),
                UUID => {
                    FormatError::ensure_len("UUID designator", p, 18)?;
                    DesignatorPayload::Uuid(format_uuid(&p[2..18]))
                },
                _ => DesignatorPayload::Raw(p.to_vec()),
            }
        };

        Ok((
            Self {
                protocol_identifier: b0 >> 4,
                code_set: b0 & 0x0F,
                piv: (b1 & 0x80) != 0,
                association: (b1 >> 4) & 0x03,
                designator_type,
                payload,
                raw: buf[..end].to_vec(),
            },
            end,
        ))
    }

    /// The designator bytes that follow the fixed 4-byte header.
    #[inline]
    pub fn designator_bytes(&self) -> &[u8] {
        &self.raw[DESIGNATOR_HEADER_LEN..]
    }
}

impl StructuredResponse for Designator {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        let mut f = vec![
            ("protocol_identifier", self.protocol_identifier.into()),
            ("code_set", self.code_set.into()),
            ("piv", self.piv.into()),
            ("association", self.association.into()),
            ("designator_type", self.designator_type.into()),
            (
                "designator_length",
                (self.designator_bytes().len() as u64).into(),
            ),
        ];
        match &self.payload {
            DesignatorPayload::Raw(bytes) => {
                let name = match self.designator_type {
                    designator_type::VENDOR_SPECIFIC => "vendor_specific_identifier",
                    designator_type::PROTOCOL_SPECIFIC_PORT => {
                        "protocol_specific_port_identifier"
                    },
                    _ => "designator",
                };
                f.push((name, Field::Bytes(bytes)));
            },
            DesignatorPayload::T10 {
                vendor_id,
                vendor_specific,
            } => {
                f.push(("t10_vendor_identification", Field::Text(vendor_id)));
                f.push(("vendor_specific_identifier", Field::Text(vendor_specific)));
            },
            DesignatorPayload::Eui64(e) => {
                f.push(("identifier_extension", e.identifier_extension.into()));
                f.push(("ieee_company_id", e.ieee_company_id.into()));
                f.push((
                    "vendor_specific_extension_identifier",
                    e.vendor_specific_extension_identifier.into(),
                ));
                f.push(("directory_id", e.directory_id.into()));
            },
            DesignatorPayload::Naa(naa) => {
                f.push(("naa", naa.naa().into()));
                match *naa {
                    NaaIdentifier::IeeeExtended {
                        vendor_specific_identifier_a,
                        ieee_company_id,
                        vendor_specific_identifier_b,
                    } => {
                        f.push((
                            "vendor_specific_identifier_a",
                            vendor_specific_identifier_a.into(),
                        ));
                        f.push(("ieee_company_id", ieee_company_id.into()));
                        f.push((
                            "vendor_specific_identifier_b",
                            vendor_specific_identifier_b.into(),
                        ));
                    },
                    NaaIdentifier::IeeeRegistered {
                        ieee_company_id,
                        vendor_specific_identifier,
                    } => {
                        f.push(("ieee_company_id", ieee_company_id.into()));
                        f.push((
                            "vendor_specific_identifier",
                            vendor_specific_identifier.into(),
                        ));
                    },
                    NaaIdentifier::IeeeRegisteredExtended {
                        ieee_company_id,
                        vendor_specific_identifier,
                        vendor_specific_identifier_extension,
                    } => {
                        f.push(("ieee_company_id", ieee_company_id.into()));
                        f.push((
                            "vendor_specific_identifier",
                            vendor_specific_identifier.into(),
                        ));
                        f.push((
                            "vendor_specific_identifier_extension",
                            vendor_specific_identifier_extension.into(),
                        ));
                    },
                    NaaIdentifier::Other(_) => {},
                }
            },
            DesignatorPayload::RelativeTargetPort(id) => {
                f.push(("relative_target_port_identifier", (*id).into()));
            },
            DesignatorPayload::TargetPortGroup(id) => {
                f.push(("target_port_group", (*id).into()));
            },
            DesignatorPayload::LogicalUnitGroup(id) => {
                f.push(("logical_unit_group", (*id).into()));
            },
            DesignatorPayload::Md5(bytes) => {
                f.push(("md5_logical_unit_identifier", Field::Bytes(bytes)));
            },
            DesignatorPayload::ScsiName(name) => {
                f.push(("scsi_name_string", Field::Text(name)));
            },
            DesignatorPayload::Uuid(uuid) => {
                f.push(("uuid", Field::Text(uuid)));
            },
        }
        f
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }

    fn byte_size(&self) -> usize {
        self.raw.len()
    }
}

/// VPD 0x83 — Device Identification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentification {
    pub peripheral_device: PeripheralDevice,
    pub page_code: u8,
    pub page_length: u16,
    pub designators_list: Vec<Designator>,
    raw: Vec<u8>,
}

impl DeviceIdentification {
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        let (peripheral_device, page_code, p) = vpd_payload(buf)?;
        let mut designators_list = Vec::new();
        let mut off = 0usize;
        while off < p.len() {
            let (d, used) = Designator::parse(&p[off..])?;
            designators_list.push(d);
            off += used;
        }
        Ok(Self {
            peripheral_device,
            page_code,
            page_length: p.len() as u16,
            designators_list,
            raw: buf.to_vec(),
        })
    }
}

impl StructuredResponse for DeviceIdentification {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("peripheral_device", Field::Struct(&self.peripheral_device)),
            ("page_code", self.page_code.into()),
            ("page_length", self.page_length.into()),
            (
                "designators_list",
                Field::List(
                    self.designators_list
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
