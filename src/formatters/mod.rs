// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Rendering of decoded SCSI responses.
//!
//! Every command kind has one [`Formatter`], picked by the caller. Page
//! specific renderers normalize the response into a [`FieldMap`], branch on
//! the discriminating field and build their lines explicitly; whatever has
//! no dedicated renderer degrades to [`DefaultFormatter`].

use enum_dispatch::enum_dispatch;

use crate::{error::FormatError, models::response::StructuredResponse};

pub mod bitfield;
pub mod designator;
pub mod generic;
pub mod inquiry;
pub mod luns;
pub mod normalize;
pub mod read_capacity;
pub mod reservation;
pub mod rtpg;
pub mod sense;
pub mod tables;

pub use bitfield::recover_standard_inquiry_flags;
pub use generic::{DefaultFormatter, HexFormatter, JsonFormatter, RawFormatter, hexdump};
pub use inquiry::InquiryFormatter;
pub use luns::LunsFormatter;
pub use normalize::{FieldMap, normalize};
pub use read_capacity::ReadCapacityFormatter;
pub use reservation::{ReadKeysFormatter, ReadReservationFormatter};
pub use rtpg::TargetPortGroupsFormatter;
pub use sense::ErrorFormatter;

/// Output of a formatter: text for the terminal, or bytes for raw mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    Bytes(Vec<u8>),
}

impl Rendered {
    /// Text view; `None` for raw bytes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendered::Text(s) => Some(s),
            Rendered::Bytes(_) => None,
        }
    }
}

#[enum_dispatch]
pub trait OutputFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError>;
}

/// Closed set of formatters, dispatched without a vtable.
#[enum_dispatch(OutputFormatter)]
#[derive(Debug, Clone, Copy)]
pub enum Formatter {
    Raw(RawFormatter),
    Hex(HexFormatter),
    Json(JsonFormatter),
    Default(DefaultFormatter),
    Error(ErrorFormatter),
    Inquiry(InquiryFormatter),
    ReadCapacity(ReadCapacityFormatter),
    Luns(LunsFormatter),
    ReadKeys(ReadKeysFormatter),
    ReadReservation(ReadReservationFormatter),
    TargetPortGroups(TargetPortGroupsFormatter),
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Default(DefaultFormatter)
    }
}

/// Join rendered lines the way every text renderer does.
#[inline]
pub(crate) fn lines_to_text(lines: Vec<String>) -> Rendered {
    Rendered::Text(lines.join("\n"))
}
