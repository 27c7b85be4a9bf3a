// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! PERSISTENT RESERVE IN — READ KEYS / READ RESERVATION.
//!
//! CDB layout (SPC):
//!   [0]    = 0x5E
//!   [1]    = SERVICE ACTION (4..0)
//!   [7..8] = ALLOCATION LENGTH (big-endian u16)
//!   [9]    = CONTROL
//!
//! Parameter data starts with PRGENERATION (u32) and ADDITIONAL LENGTH (u32).

use crate::{
    error::FormatError,
    models::response::{Field, StructuredResponse},
};

pub const PERSISTENT_RESERVE_IN: u8 = 0x5E;
const HEADER_LEN: usize = 8;
const RESERVATION_DESCRIPTOR_LEN: usize = 16;

#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ServiceAction {
    ReadKeys = 0x00,
    ReadReservation = 0x01,
}

/// Fill a PERSISTENT RESERVE IN CDB into `cdb[0..10]`.
#[inline]
pub fn fill_persistent_reserve_in(
    cdb: &mut [u8; 16],
    action: ServiceAction,
    allocation_len: u16,
    control: u8,
) {
    cdb.fill(0);
    cdb[0] = PERSISTENT_RESERVE_IN;
    cdb[1] = action as u8 & 0x1F;
    cdb[7..9].copy_from_slice(&allocation_len.to_be_bytes());
    cdb[9] = control;
}

/// Outgoing PERSISTENT RESERVE IN, echoed in verbose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistentReserveInCommand {
    pub service_action: ServiceAction,
    pub allocation_length: u16,
    pub control: u8,
}

impl PersistentReserveInCommand {
    pub fn new(service_action: ServiceAction) -> Self {
        Self {
            service_action,
            allocation_length: 1024,
            control: 0,
        }
    }
}

impl StructuredResponse for PersistentReserveInCommand {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("opcode", PERSISTENT_RESERVE_IN.into()),
            ("service_action", (self.service_action as u8).into()),
            ("allocation_length", self.allocation_length.into()),
            ("control", self.control.into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut cdb = [0u8; 16];
        fill_persistent_reserve_in(
            &mut cdb,
            self.service_action,
            self.allocation_length,
            self.control,
        );
        cdb[..10].to_vec()
    }
}

fn header(buf: &[u8], what: &'static str) -> Result<(u32, u32), FormatError> {
    FormatError::ensure_len(what, buf, HEADER_LEN)?;
    Ok((
        u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
        u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]),
    ))
}

/// READ KEYS parameter data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadKeysData {
    pub pr_generation: u32,
    pub additional_length: u32,
    pub key_list: Vec<u64>,
    raw: Vec<u8>,
}

impl ReadKeysData {
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        let (pr_generation, additional_length) = header(buf, "READ KEYS")?;
        let end = buf.len().min(HEADER_LEN + additional_length as usize);
        let key_list = buf[HEADER_LEN..end]
            .chunks_exact(8)
            .map(|c| u64::from_be_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect();
        Ok(Self {
            pr_generation,
            additional_length,
            key_list,
            raw: buf.to_vec(),
        })
    }
}

impl StructuredResponse for ReadKeysData {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![
            ("pr_generation", self.pr_generation.into()),
            ("additional_length", self.additional_length.into()),
            (
                "key_list",
                Field::List(self.key_list.iter().map(|&k| k.into()).collect()),
            ),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}

/// The reservation descriptor of READ RESERVATION, when one is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub reservation_key: u64,
    pub scope: u8,
    pub reservation_type: u8,
}

/// READ RESERVATION parameter data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadReservationData {
    pub pr_generation: u32,
    pub additional_length: u32,
    pub reservation: Option<Reservation>,
    raw: Vec<u8>,
}

impl ReadReservationData {
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        let (pr_generation, additional_length) = header(buf, "READ RESERVATION")?;
        let reservation = if additional_length as usize >= RESERVATION_DESCRIPTOR_LEN {
            FormatError::ensure_len(
                "READ RESERVATION descriptor",
                buf,
                HEADER_LEN + RESERVATION_DESCRIPTOR_LEN,
            )?;
            let mut key = [0u8; 8];
            key.copy_from_slice(&buf[8..16]);
            Some(Reservation {
                reservation_key: u64::from_be_bytes(key),
                scope: buf[21] >> 4,
                reservation_type: buf[21] & 0x0F,
            })
        } else {
            None
        };
        Ok(Self {
            pr_generation,
            additional_length,
            reservation,
            raw: buf.to_vec(),
        })
    }
}

impl StructuredResponse for ReadReservationData {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        let r = self.reservation;
        vec![
            ("pr_generation", self.pr_generation.into()),
            ("additional_length", self.additional_length.into()),
            ("reservation_key", r.map(|r| r.reservation_key).into()),
            ("scope", r.map(|r| r.scope).into()),
            ("type", r.map(|r| r.reservation_type).into()),
        ]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }
}
