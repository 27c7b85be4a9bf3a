// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Formatters that work on any structured response: exact bytes, hex dump,
//! JSON and the unquoted "default" JSON used as the universal fallback.

use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};

use crate::{
    error::FormatError,
    formatters::{
        OutputFormatter, Rendered,
        normalize::{FieldMap, normalize},
    },
    models::response::StructuredResponse,
};

const HEXDUMP_LINE: usize = 16;
const HEXDUMP_HALF: usize = 8;

/// Canonical hex dump: `OFFSET: XX XX ...  XX ...  ASCII`, 16 bytes per line,
/// an extra gap after the eighth byte, `.` for bytes outside 0x20..=0x7e.
pub fn hexdump(data: &[u8]) -> String {
    data.chunks(HEXDUMP_LINE)
        .enumerate()
        .map(|(i, chunk)| hexdump_line(i * HEXDUMP_LINE, chunk))
        .collect::<Vec<_>>()
        .join("\n")
}

fn hexdump_line(addr: usize, chunk: &[u8]) -> String {
    let dump = chunk
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ");
    let split = dump.len().min(HEXDUMP_HALF * 3);

    let mut line = format!("{addr:08X}: ");
    line.push_str(&dump[..split]);
    if chunk.len() > HEXDUMP_HALF {
        line.push(' ');
        line.push_str(&dump[split..]);
    }

    let mut pad = 2;
    if chunk.len() < HEXDUMP_LINE {
        pad += 3 * (HEXDUMP_LINE - chunk.len());
    }
    if chunk.len() <= HEXDUMP_HALF {
        pad += 1;
    }
    line.extend(std::iter::repeat_n(' ', pad));
    line.extend(chunk.iter().map(|&b| {
        if (0x20..=0x7E).contains(&b) {
            b as char
        } else {
            '.'
        }
    }));
    line
}

/// Indented (4 spaces), recursively key-sorted JSON.
pub fn to_json(map: &FieldMap) -> Result<String, FormatError> {
    let mut value = Value::Object(map.clone());
    value.sort_all_objects();

    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// JSON with every `"` and `,` removed.
pub fn to_default_text(map: &FieldMap) -> Result<String, FormatError> {
    Ok(to_json(map)?.replace(['"', ','], ""))
}

/// Exact byte representation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawFormatter;

impl OutputFormatter for RawFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        Ok(Rendered::Bytes(item.to_bytes()))
    }
}

/// Hex dump of the byte representation.
#[derive(Debug, Default, Clone, Copy)]
pub struct HexFormatter;

impl OutputFormatter for HexFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        Ok(Rendered::Text(hexdump(&item.to_bytes())))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        Ok(Rendered::Text(to_json(&normalize(item))?))
    }
}

/// Fallback for anything without a dedicated renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl OutputFormatter for DefaultFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        Ok(Rendered::Text(to_default_text(&normalize(item))?))
    }
}
