use anyhow::Result;
use hex_literal::hex;
use scsi_render_rs::{
    control_block::{inquiry::parse_inquiry, read_capacity::ReadCapacity16Data},
    formatters::{
        DefaultFormatter, HexFormatter, JsonFormatter, OutputFormatter, RawFormatter,
        Rendered, hexdump, normalize,
    },
    models::response::RawBuffer,
};

use super::common::{load_fixture, render_text};

#[test]
fn test_hex_single_zero_byte() -> Result<()> {
    let text = render_text(&HexFormatter, &RawBuffer(vec![0x00]))?;
    assert_eq!(
        text,
        "00000000: 00                                                ."
    );
    Ok(())
}

#[test]
fn test_raw_returns_exact_bytes() -> Result<()> {
    assert_eq!(
        RawFormatter.format(&RawBuffer(vec![0x00]))?,
        Rendered::Bytes(vec![0x00])
    );

    let raw = load_fixture("vpd_device_id.hex")?;
    let inq = parse_inquiry(&raw, true)?;
    assert_eq!(RawFormatter.format(&inq)?, Rendered::Bytes(raw));
    Ok(())
}

#[test]
fn test_hexdump_of_standard_inquiry() -> Result<()> {
    let raw = load_fixture("standard_inquiry.hex")?;
    let dump = hexdump(&raw);
    let expected = "\
00000000: 00 00 06 12 1F 18 10 02  4C 49 4F 2D 4F 52 47 20  ........LIO-ORG 
00000010: 54 43 4D 55 20 64 65 76  69 63 65 20 20 20 20 20  TCMU device     
00000020: 30 30 30 32                                       0002";
    assert_eq!(dump, expected);
    Ok(())
}

#[test]
fn test_default_never_has_quotes_or_commas() -> Result<()> {
    for fixture in [
        "standard_inquiry_spi.hex",
        "vpd_supported_pages.hex",
        "vpd_device_id.hex",
        "vpd_unit_serial.hex",
    ] {
        let raw = load_fixture(fixture)?;
        let evpd = fixture.starts_with("vpd");
        let text = render_text(&DefaultFormatter, &parse_inquiry(&raw, evpd)?)?;
        assert!(!text.contains('"'), "{fixture}: {text}");
        assert!(!text.contains(','), "{fixture}: {text}");
    }
    Ok(())
}

#[test]
fn test_json_is_sorted_and_indented() -> Result<()> {
    let data = ReadCapacity16Data::parse(&load_fixture("read_capacity16.hex")?)?;
    let text = render_text(&JsonFormatter, &data)?;

    let expected = r#"{
    "block_length_in_bytes": 512,
    "last_logical_block_address": 99,
    "logical_blocks_per_physical_block": 3,
    "lowest_aligned_lba_lsb": 8,
    "lowest_aligned_lba_msb": 0,
    "p_i_exponent": 1,
    "p_type": 1,
    "prot_en": 1,
    "tpe": 1,
    "troz": 1
}"#;
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn test_json_sorts_keys_inside_lists() -> Result<()> {
    // relative target port designator, decoded in wire order
    let raw = hex!("00 83 00 08 61 94 00 04 00 00 00 01");
    let text = render_text(&JsonFormatter, &parse_inquiry(&raw, true)?)?;

    let expected = r#"{
    "designators_list": [
        {
            "association": 1,
            "code_set": 1,
            "designator_length": 4,
            "designator_type": 4,
            "piv": 1,
            "protocol_identifier": 6,
            "relative_target_port_identifier": 1
        }
    ],
    "page_code": 131,
    "page_length": 8,
    "peripheral_device": {
        "qualifier": 0,
        "type": 0
    }
}"#;
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn test_normalize_nested_and_optional() -> Result<()> {
    let raw = load_fixture("standard_inquiry.hex")?;
    let map = normalize(&parse_inquiry(&raw, false)?);

    assert_eq!(map["peripheral_device"]["type"], 0);
    assert_eq!(map["t10_vendor_identification"], "LIO-ORG");
    assert!(map["product_serial_number"].is_null());
    assert!(map["extended"].is_null());
    // schema order, not sorted
    assert_eq!(map.keys().next().map(String::as_str), Some("peripheral_device"));
    Ok(())
}
