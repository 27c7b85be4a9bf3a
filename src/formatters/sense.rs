// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    error::FormatError,
    formatters::{
        OutputFormatter, Rendered,
        normalize::{normalize, req_display, req_map, req_u64},
        tables::sense_key_name,
    },
    models::response::StructuredResponse,
};

/// Sense data as a single `ERROR: <sense key> (<asc/ascq name>)` line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorFormatter;

impl OutputFormatter for ErrorFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        let data = normalize(item);
        let sense_key = req_u64(&data, "sense_key")? as u8;
        let asc = req_map(&data, "additional_sense_code")?;
        Ok(Rendered::Text(format!(
            "ERROR: {} ({})",
            sense_key_name(sense_key),
            req_display(asc, "code_name")?
        )))
    }
}
