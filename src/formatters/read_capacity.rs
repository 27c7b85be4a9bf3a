// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::debug;

use crate::{
    error::FormatError,
    formatters::{
        OutputFormatter, Rendered, lines_to_text,
        normalize::{normalize, opt_u64, req_u64},
    },
    models::response::StructuredResponse,
};

/// Capacity figures derived from the last LBA and the block length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacity {
    pub blocks: u128,
    pub bytes: u128,
}

impl Capacity {
    pub fn new(last_logical_block_address: u64, block_length: u64) -> Self {
        let blocks = u128::from(last_logical_block_address) + 1;
        Self {
            blocks,
            bytes: blocks * u128::from(block_length),
        }
    }

    /// 1024-based.
    pub fn mib(&self) -> f64 {
        self.bytes as f64 / 1024.0 / 1024.0
    }

    /// 1000-based.
    pub fn gb(&self) -> f64 {
        self.bytes as f64 / 1000.0 / 1000.0 / 1000.0
    }
}

/// READ CAPACITY (10) and (16); the protection and provisioning lines only
/// appear for the 16-byte variant.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadCapacityFormatter;

impl OutputFormatter for ReadCapacityFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        let data = normalize(item);
        let last_lba = req_u64(&data, "last_logical_block_address")?;
        let block_length = req_u64(&data, "block_length_in_bytes")?;
        let cap = Capacity::new(last_lba, block_length);
        let prot_en = opt_u64(&data, "prot_en");
        debug!(extended = prot_en.is_some(), "rendering capacity");

        let mut lines = vec!["Read Capacity results:".to_string()];
        if let Some(prot_en) = prot_en {
            let p_type = req_u64(&data, "p_type")?;
            let mut protection = format!(
                "   Protection: prot_en={prot_en}, p_type={p_type}, p_i_exponent={}",
                req_u64(&data, "p_i_exponent")?
            );
            if prot_en != 0 {
                protection.push_str(&format!(" [type {} protection]", p_type + 1));
            }
            lines.push(protection);
            lines.push(format!(
                "   Logical block provisioning: lbpme={}, lbprz={}",
                req_u64(&data, "tpe")?,
                req_u64(&data, "troz")?
            ));
        }
        lines.push(format!(
            "   Last logical block address={last_lba} ({last_lba:#x}), Number of blocks={}",
            cap.blocks
        ));
        lines.push(format!("   Logical block length={block_length} bytes"));
        if prot_en.is_some() {
            lines.push(format!(
                "   Logical blocks per physical block exponent={}",
                req_u64(&data, "logical_blocks_per_physical_block")?
            ));
            let lowest = 256 * req_u64(&data, "lowest_aligned_lba_msb")?
                + req_u64(&data, "lowest_aligned_lba_lsb")?;
            lines.push(format!("   Lowest aligned logical block address={lowest}"));
        }
        lines.push("Hence:".to_string());
        lines.push(format!(
            "   Device size: {} bytes, {:.1} MiB, {:.2} GB",
            cap.bytes,
            cap.mib(),
            cap.gb()
        ));
        Ok(lines_to_text(lines))
    }
}
