// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use serde_json::Value;
use tracing::trace;

use crate::{
    error::FormatError,
    models::response::{Field, StructuredResponse},
    utils::hex_prefixed,
};

/// Field name → value, in wire order.
pub type FieldMap = serde_json::Map<String, Value>;

/// Convert a decoded object into its generic field map.
///
/// Nested structures become nested maps, lists are normalized element-wise,
/// byte runs become `0x`-prefixed lowercase hex (`""` when empty) and
/// absent optional fields become `null`.
pub fn normalize(item: &dyn StructuredResponse) -> FieldMap {
    let fields = item.fields();
    trace!(count = fields.len(), "normalizing structured response");
    fields
        .into_iter()
        .map(|(name, field)| (name.to_string(), normalize_field(field)))
        .collect()
}

pub fn normalize_field(field: Field<'_>) -> Value {
    match field {
        Field::Uint(v) => Value::from(v),
        Field::Text(s) => Value::from(s),
        Field::Bytes(b) => Value::String(hex_prefixed(b)),
        Field::Struct(s) => Value::Object(normalize(s)),
        Field::List(items) => Value::Array(items.into_iter().map(normalize_field).collect()),
        Field::Absent => Value::Null,
    }
}

/// A present (non-null) value.
#[inline]
pub(crate) fn present<'m>(map: &'m FieldMap, key: &str) -> Option<&'m Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// A present integer value, `None` when absent or null.
#[inline]
pub(crate) fn opt_u64(map: &FieldMap, key: &str) -> Option<u64> {
    present(map, key).and_then(Value::as_u64)
}

/// A required integer value.
#[inline]
pub(crate) fn req_u64(map: &FieldMap, key: &'static str) -> Result<u64, FormatError> {
    opt_u64(map, key).ok_or(FormatError::MissingField(key))
}

/// A required nested map.
#[inline]
pub(crate) fn req_map<'m>(map: &'m FieldMap, key: &'static str) -> Result<&'m FieldMap, FormatError> {
    present(map, key)
        .and_then(Value::as_object)
        .ok_or(FormatError::MissingField(key))
}

/// A required value rendered the way a template would print it.
#[inline]
pub(crate) fn req_display(map: &FieldMap, key: &'static str) -> Result<String, FormatError> {
    present(map, key)
        .map(display_value)
        .ok_or(FormatError::MissingField(key))
}

/// Strings as-is, everything else in its JSON spelling.
pub(crate) fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
