// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use zerocopy::{
    FromBytes, Immutable, KnownLayout,
    byteorder::{BigEndian, U16, U32, U64},
};

use crate::{
    error::FormatError,
    models::response::{Field, StructuredResponse},
};

/// Build a padded 16-byte **SCSI READ CAPACITY(10)** CDB (opcode 0x25).
///
/// Parameters:
/// - `cdb`     : output buffer (zeroed; first 10 bytes used)
/// - `lba`     : 32-bit LBA hint (meaningful only when `pmi` = true; else set
///   0)
/// - `pmi`     : Partial Medium Indicator (true => return info for `lba`)
/// - `control` : CONTROL byte
///
/// Notes:
/// - If the device is larger than 2 TB, the Max LBA will be `0xFFFF_FFFF`,
///   which is a hint to issue **READ CAPACITY(16)** instead.
#[inline]
pub fn build_read_capacity10(cdb: &mut [u8; 16], lba: u32, pmi: bool, control: u8) {
    cdb.fill(0);
    cdb[0] = 0x25; // READ CAPACITY(10)
    cdb[2..6].copy_from_slice(&lba.to_be_bytes()); // only used if PMI=1
    cdb[8] = if pmi { 0x01 } else { 0x00 }; // PMI bit (bit 0)
    cdb[9] = control;
}

/// Build a 16-byte **SCSI READ CAPACITY(16)** CDB via SERVICE ACTION IN(16)
/// (opcode 0x9E, SA=0x10).
///
/// - `alloc_len` : Allocation length for the parameter data (big-endian). Use
///   **32** to get full data.
#[inline]
pub fn build_read_capacity16(
    cdb: &mut [u8; 16],
    lba: u64,
    pmi: bool,
    alloc_len: u32,
    control: u8,
) {
    cdb.fill(0);
    cdb[0] = 0x9E; // SERVICE ACTION IN(16)
    cdb[1] = 0x10; // Service Action = READ CAPACITY(16)
    cdb[2..10].copy_from_slice(&lba.to_be_bytes()); // only used if PMI=1
    cdb[10..14].copy_from_slice(&alloc_len.to_be_bytes()); // recommended 32
    cdb[14] = if pmi { 0x01 } else { 0x00 }; // PMI bit (bit 0)
    cdb[15] = control;
}

/// Outgoing READ CAPACITY(10), echoed in verbose mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadCapacity10Command {
    pub lba: u32,
    pub pmi: bool,
    pub control: u8,
}

impl StructuredResponse for ReadCapacity10Command {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("opcode", 0x25u8.into()),
            ("logical_block_address", self.lba.into()),
            ("pmi", self.pmi.into()),
            ("control", self.control.into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut cdb = [0u8; 16];
        build_read_capacity10(&mut cdb, self.lba, self.pmi, self.control);
        cdb[..10].to_vec()
    }
}

/// Outgoing READ CAPACITY(16), echoed in verbose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadCapacity16Command {
    pub lba: u64,
    pub pmi: bool,
    pub allocation_length: u32,
    pub control: u8,
}

impl Default for ReadCapacity16Command {
    fn default() -> Self {
        Self {
            lba: 0,
            pmi: false,
            allocation_length: 32,
            control: 0,
        }
    }
}

impl StructuredResponse for ReadCapacity16Command {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("opcode", 0x9Eu8.into()),
            ("service_action", 0x10u8.into()),
            ("logical_block_address", self.lba.into()),
            ("allocation_length", self.allocation_length.into()),
            ("pmi", self.pmi.into()),
            ("control", self.control.into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut cdb = [0u8; 16];
        build_read_capacity16(
            &mut cdb,
            self.lba,
            self.pmi,
            self.allocation_length,
            self.control,
        );
        cdb.to_vec()
    }
}

/// Raw 8-byte parameter data returned by READ CAPACITY(10) command
///
/// All fields are stored in big-endian format as per SCSI specification.
#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Debug)]
pub struct Rc10Raw {
    /// Maximum logical block address (bytes 0-3) - highest valid LBA on the device
    pub max_lba: U32<BigEndian>,
    /// Block length in bytes (bytes 4-7) - size of each logical block
    pub block_len: U32<BigEndian>,
}

/// Raw head (first 16 bytes) of READ CAPACITY(16) parameter data
///
/// The target may return up to 32 bytes; bytes 16.. are reserved.
#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Debug)]
pub struct Rc16Raw {
    /// Maximum logical block address (bytes 0-7) - 64-bit LBA for large devices
    pub max_lba: U64<BigEndian>,
    /// Block length in bytes (bytes 8-11) - size of each logical block
    pub block_len: U32<BigEndian>,
    /// byte 12: RC BASIS (5..4) | P_TYPE (3..1) | PROT_EN (0)
    pub protection: u8,
    /// byte 13: P_I_EXPONENT (7..4) | LOGICAL BLOCKS PER PHYSICAL BLOCK EXPONENT (3..0)
    pub exponents: u8,
    /// bytes 14-15: LBPME (15) | LBPRZ (14) | LOWEST ALIGNED LBA (13..0)
    pub provisioning: U16<BigEndian>,
}

/// Decoded READ CAPACITY(10) parameter data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCapacity10Data {
    pub last_logical_block_address: u32,
    pub block_length_in_bytes: u32,
    raw: Vec<u8>,
}

impl ReadCapacity10Data {
    /// Parse READ CAPACITY(10) parameter data (needs ≥ 8 bytes).
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        let (raw, _rest) =
            Rc10Raw::ref_from_prefix(buf).map_err(|_| FormatError::Truncated {
                what: "READ CAPACITY(10)",
                need: size_of::<Rc10Raw>(),
                got: buf.len(),
            })?;
        Ok(Self {
            last_logical_block_address: raw.max_lba.get(),
            block_length_in_bytes: raw.block_len.get(),
            raw: buf[..size_of::<Rc10Raw>()].to_vec(),
        })
    }

    #[inline]
    pub fn total_bytes(&self) -> u64 {
        (self.last_logical_block_address as u64 + 1) * self.block_length_in_bytes as u64
    }

    /// If true, target likely needs READ CAPACITY(16).
    #[inline]
    pub fn indicates_overflow(&self) -> bool {
        self.last_logical_block_address == u32::MAX
    }
}

impl StructuredResponse for ReadCapacity10Data {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            (
                "last_logical_block_address",
                self.last_logical_block_address.into(),
            ),
            ("block_length_in_bytes", self.block_length_in_bytes.into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}

/// Decoded READ CAPACITY(16) parameter data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCapacity16Data {
    pub last_logical_block_address: u64,
    pub block_length_in_bytes: u32,
    pub p_type: u8,
    pub prot_en: bool,
    pub p_i_exponent: u8,
    pub logical_blocks_per_physical_block: u8,
    /// LBPME
    pub tpe: bool,
    /// LBPRZ
    pub troz: bool,
    pub lowest_aligned_lba_msb: u8,
    pub lowest_aligned_lba_lsb: u8,
    raw: Vec<u8>,
}

impl ReadCapacity16Data {
    /// Parse READ CAPACITY(16) parameter data head (needs ≥ 16 bytes).
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        let (raw, _rest) =
            Rc16Raw::ref_from_prefix(buf).map_err(|_| FormatError::Truncated {
                what: "READ CAPACITY(16)",
                need: size_of::<Rc16Raw>(),
                got: buf.len(),
            })?;
        let prov = raw.provisioning.get();
        Ok(Self {
            last_logical_block_address: raw.max_lba.get(),
            block_length_in_bytes: raw.block_len.get(),
            p_type: (raw.protection >> 1) & 0x07,
            prot_en: raw.protection & 0x01 != 0,
            p_i_exponent: raw.exponents >> 4,
            logical_blocks_per_physical_block: raw.exponents & 0x0F,
            tpe: prov & 0x8000 != 0,
            troz: prov & 0x4000 != 0,
            lowest_aligned_lba_msb: ((prov >> 8) & 0x3F) as u8,
            lowest_aligned_lba_lsb: (prov & 0xFF) as u8,
            raw: buf.to_vec(),
        })
    }

    #[inline]
    pub fn total_bytes(&self) -> u128 {
        (self.last_logical_block_address as u128 + 1) * self.block_length_in_bytes as u128
    }

    #[inline]
    pub fn lowest_aligned_lba(&self) -> u16 {
        256 * self.lowest_aligned_lba_msb as u16 + self.lowest_aligned_lba_lsb as u16
    }
}

impl StructuredResponse for ReadCapacity16Data {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            (
                "last_logical_block_address",
                self.last_logical_block_address.into(),
            ),
            ("block_length_in_bytes", self.block_length_in_bytes.into()),
            ("p_type", self.p_type.into()),
            ("prot_en", self.prot_en.into()),
            ("p_i_exponent", self.p_i_exponent.into()),
            (
                "logical_blocks_per_physical_block",
                self.logical_blocks_per_physical_block.into(),
            ),
            ("tpe", self.tpe.into()),
            ("troz", self.troz.into()),
            ("lowest_aligned_lba_msb", self.lowest_aligned_lba_msb.into()),
            ("lowest_aligned_lba_lsb", self.lowest_aligned_lba_lsb.into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}
