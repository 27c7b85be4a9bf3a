//! Rendering of decoded SCSI command responses (INQUIRY and its VPD pages,
//! READ CAPACITY, REPORT LUNS, PERSISTENT RESERVE IN, REPORT TARGET PORT
//! GROUPS, sense data) as diagnostic text, raw bytes, hex dumps or JSON.
// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Handles output mode configuration and logging.
pub mod cfg;
/// CDB builders and response decoders, one module per command.
pub mod control_block;
/// Error taxonomy of the decoders and the formatting engine.
pub mod error;
/// Normalization, bit-field recovery and per-page renderers.
pub mod formatters;
/// The structured response data model and sense data.
pub mod models;
/// Output context sequencing command echo and result emission.
pub mod output;
/// Provides utility functions used throughout the crate.
pub mod utils;
