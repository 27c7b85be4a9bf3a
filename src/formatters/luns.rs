// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    error::FormatError,
    formatters::{
        OutputFormatter, Rendered, lines_to_text,
        normalize::{display_value, normalize, present},
    },
    models::response::StructuredResponse,
};

/// REPORT LUNS: one decimal LUN per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LunsFormatter;

impl OutputFormatter for LunsFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        let data = normalize(item);
        let luns = present(&data, "lun_list")
            .and_then(|v| v.as_array())
            .ok_or(FormatError::MissingField("lun_list"))?;
        Ok(lines_to_text(luns.iter().map(display_value).collect()))
    }
}
