// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! PERSISTENT RESERVE IN renderers.

use crate::{
    error::FormatError,
    formatters::{
        OutputFormatter, Rendered, lines_to_text,
        normalize::{normalize, opt_u64, present, req_u64},
    },
    models::response::StructuredResponse,
};

/// READ KEYS: `Reservation keys:` followed by one `Key: 0x..` line per key.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadKeysFormatter;

impl OutputFormatter for ReadKeysFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        let data = normalize(item);
        let keys = present(&data, "key_list")
            .and_then(|v| v.as_array())
            .ok_or(FormatError::MissingField("key_list"))?;

        let mut lines = vec!["Reservation keys:".to_string()];
        for key in keys {
            let key = key.as_u64().ok_or(FormatError::MissingField("key_list"))?;
            lines.push(format!("Key: {key:#x}"));
        }
        Ok(lines_to_text(lines))
    }
}

/// READ RESERVATION. Lines for fields the device did not return are left out.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadReservationFormatter;

impl OutputFormatter for ReadReservationFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        let data = normalize(item);
        let mut lines = vec![format!("Generation: {:#x}", req_u64(&data, "pr_generation")?)];
        lines.extend(
            [
                ("Reservation key", "reservation_key"),
                ("Scope", "scope"),
                ("Type", "type"),
            ]
            .into_iter()
            .filter_map(|(label, key)| opt_u64(&data, key).map(|v| format!("{label}: {v:#x}"))),
        );
        Ok(lines_to_text(lines))
    }
}
