use std::fs;

use anyhow::{Context, Result, bail};
use hex::FromHex;
use scsi_render_rs::{
    formatters::{OutputFormatter, Rendered},
    models::response::StructuredResponse,
};

pub fn load_fixture(name: &str) -> Result<Vec<u8>> {
    let path = format!("tests/unit_tests/fixtures/{name}");
    let s = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let cleaned = s.trim().replace(|c: char| c.is_whitespace(), "");
    Ok(Vec::from_hex(&cleaned)?)
}

pub fn render_text(
    formatter: &impl OutputFormatter,
    item: &dyn StructuredResponse,
) -> Result<String> {
    match formatter.format(item)? {
        Rendered::Text(t) => Ok(t),
        Rendered::Bytes(b) => bail!("expected text, got {} raw bytes", b.len()),
    }
}
