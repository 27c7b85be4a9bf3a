//! Data model shared by the decoders and the formatting engine.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// `StructuredResponse` capability and its field values.
pub mod response;
/// Fixed-format sense data.
pub mod sense_data;
