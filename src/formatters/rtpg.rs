// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use serde_json::Value;

use crate::{
    error::FormatError,
    formatters::{
        OutputFormatter, Rendered,
        generic::to_default_text,
        normalize::{FieldMap, normalize},
    },
    models::response::StructuredResponse,
};

/// Integers above this stay decimal; larger ones become hex strings.
const HEX_THRESHOLD: u64 = 2;

fn hexify(v: &mut Value) {
    match v {
        Value::Number(n) => {
            if let Some(n) = n.as_u64().filter(|&n| n > HEX_THRESHOLD) {
                *v = Value::String(format!("{n:#x}"));
            }
        },
        Value::Object(m) => m.values_mut().for_each(hexify),
        Value::Array(a) => a.iter_mut().for_each(hexify),
        _ => {},
    }
}

/// REPORT TARGET PORT GROUPS: the default layout with identifiers, lengths
/// and states above 2 shown in hex.
#[derive(Debug, Default, Clone, Copy)]
pub struct TargetPortGroupsFormatter;

impl OutputFormatter for TargetPortGroupsFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        let mut data = Value::Object(normalize(item));
        hexify(&mut data);
        let data: FieldMap = match data {
            Value::Object(m) => m,
            _ => FieldMap::new(),
        };
        Ok(Rendered::Text(to_default_text(&data)?))
    }
}
