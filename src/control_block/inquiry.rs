// SPDX-License-Identifier: AGPL-3.0-or-later GPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! INQUIRY (6) — CDB fillers and decoders for the returned parameter data.
//!
//! CDB layout (SPC):
//!   [0] = 0x12 (INQUIRY)
//!   [1] = EVPD (bit 0); other bits reserved (CMDDT obsolete → 0)
//!   [2] = Page Code (only when EVPD=1; else 0)
//!   [3] = Subpage Code (only meaningful for some VPD pages; usually 0)
//!   [4] = Allocation Length (u8)
//!   [5] = Control

use bitflags::bitflags;

use crate::{
    control_block::device_id::DeviceIdentification,
    error::FormatError,
    models::response::{Field, StructuredResponse},
    utils::trim_ascii,
};

pub const INQUIRY_OPCODE: u8 = 0x12;
/// Bytes 0..36 are mandatory in a standard INQUIRY response.
pub const STANDARD_INQUIRY_MIN_LEN: usize = 36;

const SERIAL_RANGE: core::ops::Range<usize> = 36..56;
const SPI_BYTE: usize = 56;
const VERSION_DESCRIPTORS: core::ops::Range<usize> = 58..74;

/// Common VPD page codes (subset).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VpdPage {
    SupportedPages = 0x00,
    UnitSerial = 0x80,
    DeviceId = 0x83,
    ExtendedInquiry = 0x86,
    BlockLimits = 0xB0,                // SBC
    BlockDeviceCharacteristics = 0xB1, // SBC
    LbProvisioning = 0xB2,             // SBC
}

impl From<VpdPage> for u8 {
    #[inline]
    fn from(p: VpdPage) -> u8 {
        p as u8
    }
}

impl TryFrom<u8> for VpdPage {
    /// The unrecognized page code.
    type Error = u8;

    #[inline]
    fn try_from(v: u8) -> Result<Self, u8> {
        use VpdPage::*;
        Ok(match v {
            0x00 => SupportedPages,
            0x80 => UnitSerial,
            0x83 => DeviceId,
            0x86 => ExtendedInquiry,
            0xB0 => BlockLimits,
            0xB1 => BlockDeviceCharacteristics,
            0xB2 => LbProvisioning,
            other => return Err(other),
        })
    }
}

/// Fill a **Standard INQUIRY (EVPD=0)** CDB.
/// Sets Page Code/Subpage to 0.
#[inline]
pub fn fill_inquiry_standard(cdb: &mut [u8; 16], allocation_len: u8, control: u8) {
    cdb.fill(0);
    cdb[0] = INQUIRY_OPCODE;
    cdb[1] = 0x00; // EVPD=0
    cdb[4] = allocation_len;
    cdb[5] = control;
}

/// Fill a **VPD INQUIRY (EVPD=1, explicit subpage)** CDB.
#[inline]
pub fn fill_inquiry_vpd(
    cdb: &mut [u8; 16],
    page_code: u8,
    subpage_code: u8,
    allocation_len: u8,
    control: u8,
) {
    cdb.fill(0);
    cdb[0] = INQUIRY_OPCODE;
    cdb[1] = 0x01; // EVPD=1
    cdb[2] = page_code;
    cdb[3] = subpage_code;
    cdb[4] = allocation_len;
    cdb[5] = control;
}

/// Outgoing INQUIRY, echoed in verbose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InquiryCommand {
    /// `None` requests standard INQUIRY data.
    pub page_code: Option<u8>,
    pub allocation_length: u8,
    pub control: u8,
}

impl InquiryCommand {
    pub const CDB_LEN: usize = 6;

    pub fn standard(allocation_length: u8) -> Self {
        Self {
            page_code: None,
            allocation_length,
            control: 0,
        }
    }

    pub fn vpd(page: impl Into<u8>, allocation_length: u8) -> Self {
        Self {
            page_code: Some(page.into()),
            allocation_length,
            control: 0,
        }
    }
}

impl StructuredResponse for InquiryCommand {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("opcode", INQUIRY_OPCODE.into()),
            ("evpd", self.page_code.is_some().into()),
            ("page_code", self.page_code.unwrap_or(0).into()),
            ("allocation_length", self.allocation_length.into()),
            ("control", self.control.into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut cdb = [0u8; 16];
        match self.page_code {
            None => fill_inquiry_standard(&mut cdb, self.allocation_length, self.control),
            Some(pc) => {
                fill_inquiry_vpd(&mut cdb, pc, 0, self.allocation_length, self.control)
            },
        }
        cdb[..Self::CDB_LEN].to_vec()
    }
}

/// Byte 0 of every INQUIRY response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeripheralDevice {
    pub qualifier: u8,   // bits 7..5
    pub device_type: u8, // bits 4..0
}

impl From<u8> for PeripheralDevice {
    #[inline]
    fn from(b0: u8) -> Self {
        Self {
            qualifier: (b0 >> 5) & 0x07,
            device_type: b0 & 0x1F,
        }
    }
}

impl StructuredResponse for PeripheralDevice {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("qualifier", self.qualifier.into()),
            ("type", self.device_type.into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        vec![(self.qualifier << 5) | (self.device_type & 0x1F)]
    }
}

bitflags! {
    /// Byte 5 of standard INQUIRY data.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct InquiryByte5: u8 {
        const SCCS    = 0b1000_0000;
        const ACC     = 0b0100_0000;
        const TPGS    = 0b0011_0000;
        const TPC     = 0b0000_1000;
        const PROTECT = 0b0000_0001;
    }
}

bitflags! {
    /// Byte 6 of standard INQUIRY data (the bits a decoder names).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct InquiryByte6: u8 {
        const ENC_SERV = 0b0100_0000;
        const VS       = 0b0010_0000;
        const MULTI_P  = 0b0001_0000;
    }
}

impl InquiryByte5 {
    #[inline]
    pub fn tpgs(self) -> u8 {
        (self & Self::TPGS).bits() >> 4
    }
}

/// SPI-specific byte 56 and the version descriptors that follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpiExtension {
    pub clocking: u8, // bits 3..2
    pub qas: bool,    // bit 1
    pub ius: bool,    // bit 0
    pub version_descriptors: Vec<u16>,
    raw: Vec<u8>,
}

impl StructuredResponse for SpiExtension {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("clocking", self.clocking.into()),
            ("qas", self.qas.into()),
            ("ius", self.ius.into()),
            (
                "version_descriptors",
                Field::List(
                    self.version_descriptors
                        .iter()
                        .map(|&v| v.into())
                        .collect(),
                ),
            ),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}

/// Standard INQUIRY (EVPD=0) parameter data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardInquiry {
    pub peripheral_device: PeripheralDevice,
    pub rmb: bool,                // byte1 bit7
    pub version: u8,              // byte2
    pub normaca: bool,            // byte3 bit5
    pub hisup: bool,              // byte3 bit4
    pub response_data_format: u8, // byte3 low nibble
    pub additional_length: u8,    // byte4
    pub byte5: InquiryByte5,
    pub byte6: InquiryByte6,
    pub vendor_id: String,   // bytes 8..16
    pub product_id: String,  // bytes 16..32
    pub product_rev: String, // bytes 32..36
    /// Vendor-specific bytes 36..56 when returned and not blank.
    pub product_serial_number: Option<String>,
    pub extended: Option<SpiExtension>,
    raw: Vec<u8>,
}

impl StandardInquiry {
    /// Parse a Standard INQUIRY (EVPD=0) response (minimum 36 bytes).
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        FormatError::ensure_len("standard INQUIRY", buf, STANDARD_INQUIRY_MIN_LEN)?;

        let b1 = buf[1];
        let b3 = buf[3];

        let product_serial_number = buf
            .get(SERIAL_RANGE)
            .map(trim_ascii)
            .filter(|s| !s.is_empty());

        let extended = buf.get(SPI_BYTE).map(|&spi| {
            let end = buf.len().min(VERSION_DESCRIPTORS.end);
            let version_descriptors = buf
                .get(VERSION_DESCRIPTORS.start..end)
                .unwrap_or_default()
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .filter(|&v| v != 0)
                .collect();
            SpiExtension {
                clocking: (spi >> 2) & 0x03,
                qas: spi & 0x02 != 0,
                ius: spi & 0x01 != 0,
                version_descriptors,
                raw: buf[SPI_BYTE..end.max(SPI_BYTE + 1)].to_vec(),
            }
        });

        Ok(Self {
            peripheral_device: buf[0].into(),
            rmb: (b1 & 0x80) != 0,
            version: buf[2],
            normaca: b3 & 0x20 != 0,
            hisup: b3 & 0x10 != 0,
            response_data_format: b3 & 0x0F,
            additional_length: buf[4],
            byte5: InquiryByte5::from_bits_retain(buf[5]),
            byte6: InquiryByte6::from_bits_truncate(buf[6]),
            vendor_id: trim_ascii(&buf[8..16]),
            product_id: trim_ascii(&buf[16..32]),
            product_rev: trim_ascii(&buf[32..36]),
            product_serial_number,
            extended,
            raw: buf.to_vec(),
        })
    }
}

impl StructuredResponse for StandardInquiry {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        let b5 = self.byte5;
        let b6 = self.byte6;
        vec![
            ("peripheral_device", Field::Struct(&self.peripheral_device)),
            ("rmb", self.rmb.into()),
            ("version", self.version.into()),
            ("normaca", self.normaca.into()),
            ("hisup", self.hisup.into()),
            ("response_data_format", self.response_data_format.into()),
            ("additional_length", self.additional_length.into()),
            ("sccs", b5.contains(InquiryByte5::SCCS).into()),
            ("acc", b5.contains(InquiryByte5::ACC).into()),
            ("tpgs", b5.tpgs().into()),
            ("threepc", b5.contains(InquiryByte5::TPC).into()),
            ("protect", b5.contains(InquiryByte5::PROTECT).into()),
            ("encserv", b6.contains(InquiryByte6::ENC_SERV).into()),
            ("vs", b6.contains(InquiryByte6::VS).into()),
            ("multip", b6.contains(InquiryByte6::MULTI_P).into()),
            ("t10_vendor_identification", Field::Text(&self.vendor_id)),
            ("product_identification", Field::Text(&self.product_id)),
            ("product_revision_level", Field::Text(&self.product_rev)),
            (
                "product_serial_number",
                self.product_serial_number
                    .as_deref()
                    .map_or(Field::Absent, Field::Text),
            ),
            (
                "extended",
                self.extended
                    .as_ref()
                    .map_or(Field::Absent, |e| Field::Struct(e)),
            ),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }

    fn byte_size(&self) -> usize {
        self.raw.len()
    }
}

/// Generic VPD header view: returns (byte0, page_code, payload)
pub(crate) fn vpd_payload(buf: &[u8]) -> Result<(PeripheralDevice, u8, &[u8]), FormatError> {
    FormatError::ensure_len("VPD page header", buf, 4)?;
    // byte0: PQ/DT, byte1: page code, byte2..3: page length (BE)
    let page_code = buf[1];
    let len = u16::from_be_bytes([buf[2], buf[3]]) as usize;
    FormatError::ensure_len("VPD page", buf, 4 + len)?;
    Ok((buf[0].into(), page_code, &buf[4..4 + len]))
}

/// VPD 0x00 — Supported VPD Pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedVpdPages {
    pub peripheral_device: PeripheralDevice,
    pub page_code: u8,
    /// Each byte is a supported page code.
    pub vpd_parameters: Vec<u8>,
    raw: Vec<u8>,
}

impl SupportedVpdPages {
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        let (peripheral_device, page_code, payload) = vpd_payload(buf)?;
        Ok(Self {
            peripheral_device,
            page_code,
            vpd_parameters: payload.to_vec(),
            raw: buf.to_vec(),
        })
    }
}

impl StructuredResponse for SupportedVpdPages {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("peripheral_device", Field::Struct(&self.peripheral_device)),
            ("page_code", self.page_code.into()),
            ("page_length", (self.vpd_parameters.len() as u64).into()),
            (
                "vpd_parameters",
                Field::List(self.vpd_parameters.iter().map(|&p| p.into()).collect()),
            ),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}

/// VPD 0x80 — Unit Serial Number (ASCII, space-padded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSerialNumber {
    pub peripheral_device: PeripheralDevice,
    pub page_code: u8,
    pub page_length: u16,
    pub product_serial_number: String,
    raw: Vec<u8>,
}

impl UnitSerialNumber {
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        let (peripheral_device, page_code, payload) = vpd_payload(buf)?;
        Ok(Self {
            peripheral_device,
            page_code,
            page_length: payload.len() as u16,
            product_serial_number: trim_ascii(payload),
            raw: buf.to_vec(),
        })
    }
}

impl StructuredResponse for UnitSerialNumber {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("peripheral_device", Field::Struct(&self.peripheral_device)),
            ("page_code", self.page_code.into()),
            ("page_length", self.page_length.into()),
            (
                "product_serial_number",
                Field::Text(&self.product_serial_number),
            ),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}

/// Any VPD page without a dedicated decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericVpdPage {
    pub peripheral_device: PeripheralDevice,
    pub page_code: u8,
    pub data: Vec<u8>,
    raw: Vec<u8>,
}

impl GenericVpdPage {
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        let (peripheral_device, page_code, payload) = vpd_payload(buf)?;
        Ok(Self {
            peripheral_device,
            page_code,
            data: payload.to_vec(),
            raw: buf.to_vec(),
        })
    }
}

impl StructuredResponse for GenericVpdPage {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("peripheral_device", Field::Struct(&self.peripheral_device)),
            ("page_code", self.page_code.into()),
            ("page_length", (self.data.len() as u64).into()),
            ("data", Field::Bytes(&self.data)),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}

/// Decoded INQUIRY parameter data, one variant per supported layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InquiryResponse {
    Standard(Box<StandardInquiry>),
    SupportedPages(SupportedVpdPages),
    UnitSerial(UnitSerialNumber),
    DeviceId(DeviceIdentification),
    Other(GenericVpdPage),
}

impl InquiryResponse {
    fn inner(&self) -> &dyn StructuredResponse {
        match self {
            InquiryResponse::Standard(s) => s.as_ref(),
            InquiryResponse::SupportedPages(p) => p,
            InquiryResponse::UnitSerial(p) => p,
            InquiryResponse::DeviceId(p) => p,
            InquiryResponse::Other(p) => p,
        }
    }
}

impl StructuredResponse for InquiryResponse {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        self.inner().fields()
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.inner().to_bytes()
    }

    fn byte_size(&self) -> usize {
        self.inner().byte_size()
    }
}

/// Decode INQUIRY parameter data. With `evpd` the page code is taken from
/// byte 1 of the response.
pub fn parse_inquiry(buf: &[u8], evpd: bool) -> Result<InquiryResponse, FormatError> {
    if !evpd {
        return Ok(InquiryResponse::Standard(Box::new(StandardInquiry::parse(
            buf,
        )?)));
    }
    FormatError::ensure_len("VPD page header", buf, 4)?;
    Ok(match VpdPage::try_from(buf[1]) {
        Ok(VpdPage::SupportedPages) => {
            InquiryResponse::SupportedPages(SupportedVpdPages::parse(buf)?)
        },
        Ok(VpdPage::UnitSerial) => InquiryResponse::UnitSerial(UnitSerialNumber::parse(buf)?),
        Ok(VpdPage::DeviceId) => {
            InquiryResponse::DeviceId(DeviceIdentification::parse(buf)?)
        },
        _ => InquiryResponse::Other(GenericVpdPage::parse(buf)?),
    })
}
