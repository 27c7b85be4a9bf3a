// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use thiserror::Error;

/// Failures surfaced by the decoders and the formatting engine.
///
/// Unsupported pages are not errors (they degrade to the default renderer)
/// and sense data is rendered, not raised; everything here is a malformed
/// input or an I/O failure of the output sink.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("{what}: need at least {need} bytes, got {got}")]
    Truncated {
        what: &'static str,
        need: usize,
        got: usize,
    },

    #[error("{what} designator: invalid length {len}")]
    BadDesignatorLength { what: &'static str, len: usize },

    #[error("unmapped designator type: {0:#x}")]
    UnknownDesignatorType(u8),

    #[error("unknown NAA sub-format: {0}")]
    UnknownNaaFormat(u8),

    #[error("missing field `{0}` in decoded response")]
    MissingField(&'static str),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("output write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    #[inline]
    pub(crate) fn ensure_len(
        what: &'static str,
        buf: &[u8],
        need: usize,
    ) -> Result<(), FormatError> {
        if buf.len() < need {
            return Err(FormatError::Truncated {
                what,
                need,
                got: buf.len(),
            });
        }
        Ok(())
    }
}
