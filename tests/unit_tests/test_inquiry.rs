use anyhow::Result;
use scsi_render_rs::{
    control_block::inquiry::{InquiryResponse, parse_inquiry},
    error::FormatError,
    formatters::{InquiryFormatter, OutputFormatter, inquiry::SUPPORTED_PAGES_NOTE},
    models::response::RawBuffer,
};

use super::common::{load_fixture, render_text};

#[test]
fn test_standard_inquiry_render() -> Result<()> {
    let raw = load_fixture("standard_inquiry.hex")?;
    let inq = parse_inquiry(&raw, false)?;
    let text = render_text(&InquiryFormatter, &inq)?;

    let expected = "\
standard INQUIRY:
  PQual=0  Device_type=0  RMB=0  version=0x06  [SPC-4]
  [AERC=0]  [TrmTsk=0]  NormACA=0  HiSUP=1  Resp_data_format=2
  SCCS=0  ACC=0  TPGS=1  3PC=1  Protect=0  [BQue=0]
  EncServ=0  MultiP=1 (VS=0)  [MChngr=0]  [ACKREQQ=0]  Addr16=0
  [RelAdr=0]  WBus16=0  Sync=0  Linked=0  [TranDis=0]  CmdQue=1
    length=36 (0x24)   Peripheral device type: disk
 Vendor identification: LIO-ORG
 Product identification: TCMU device
 Product revision level: 0002";
    assert_eq!(text, expected);
    assert!(!text.contains("SPI:"));
    assert!(!text.contains("Unit serial number"));
    Ok(())
}

#[test]
fn test_standard_inquiry_optional_lines() -> Result<()> {
    let raw = load_fixture("standard_inquiry_spi.hex")?;
    let inq = parse_inquiry(&raw, false)?;
    let text = render_text(&InquiryFormatter, &inq)?;
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[6], "  [SPI: Clocking=0x3  QAS=0  IUS=1]");
    assert_eq!(
        lines[7],
        "    length=62 (0x3e)   Peripheral device type: disk"
    );
    assert_eq!(lines.last().copied(), Some(" Unit serial number: SN0123456789"));
    Ok(())
}

#[test]
fn test_recovered_flags_are_rendered() -> Result<()> {
    let mut raw = load_fixture("standard_inquiry.hex")?;
    raw[3] |= 0xC0; // AERC, TrmTsk
    raw[6] |= 0x81; // BQue, Addr16
    raw[7] = 0xBE; // RelAdr, WBus16, Sync, Linked, TranDis, CmdQue
    let text = render_text(&InquiryFormatter, &parse_inquiry(&raw, false)?)?;

    assert!(text.contains("[AERC=1]  [TrmTsk=1]"));
    assert!(text.contains("[BQue=1]"));
    assert!(text.contains("Addr16=1"));
    assert!(text.contains("[RelAdr=1]  WBus16=1  Sync=1  Linked=1  [TranDis=1]  CmdQue=1"));
    Ok(())
}

#[test]
fn test_standard_inquiry_short_buffer_is_fatal() {
    // a raw buffer that never went through the decoder
    let err = InquiryFormatter
        .format(&RawBuffer(vec![0u8; 5]))
        .expect_err("render must fail");
    assert!(matches!(err, FormatError::Truncated { need: 8, got: 5, .. }));
}

#[test]
fn test_supported_pages_render() -> Result<()> {
    let raw = load_fixture("vpd_supported_pages.hex")?;
    let text = render_text(&InquiryFormatter, &parse_inquiry(&raw, true)?)?;

    let expected = [
        SUPPORTED_PAGES_NOTE,
        "VPD INQUIRY, page code=0x00:",
        "   [PQual=0  Peripheral device type: disk]",
        "   Supported VPD pages:",
        "      0x0 Supported VPD pages",
        "      0x80 Unit serial number",
        "      0x83 Device identification",
        "      0x86 Extended INQUIRY data",
        "      0xb0 Block limits (SBC)",
        "      0xc4",
    ]
    .join("\n");
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn test_supported_pages_depend_on_device_type() -> Result<()> {
    let mut raw = load_fixture("vpd_supported_pages.hex")?;
    raw[0] = 0x01; // tape
    let text = render_text(&InquiryFormatter, &parse_inquiry(&raw, true)?)?;
    assert!(text.contains("[PQual=0  Peripheral device type: tape]"));
    assert!(text.contains("      0xb0 Sequential-access device capabilities (SSC)"));
    Ok(())
}

#[test]
fn test_rendering_twice_is_stable() -> Result<()> {
    let raw = load_fixture("vpd_supported_pages.hex")?;
    let inq = parse_inquiry(&raw, true)?;
    let first = render_text(&InquiryFormatter, &inq)?;
    let second = render_text(&InquiryFormatter, &inq)?;
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 4 + 6);
    Ok(())
}

#[test]
fn test_unit_serial_render() -> Result<()> {
    let raw = load_fixture("vpd_unit_serial.hex")?;
    let inq = parse_inquiry(&raw, true)?;
    assert!(matches!(inq, InquiryResponse::UnitSerial(_)));
    assert_eq!(
        render_text(&InquiryFormatter, &inq)?,
        "VPD INQUIRY: Unit serial number page\n  Unit serial number: 6001405abcde"
    );
    Ok(())
}

#[test]
fn test_unknown_page_uses_default_renderer() -> Result<()> {
    // Block limits: no dedicated renderer
    let raw = [0x00, 0xB0, 0x00, 0x04, 0x00, 0x00, 0x00, 0x08];
    let text = render_text(&InquiryFormatter, &parse_inquiry(&raw, true)?)?;

    let expected = "\
{
    data: 0x00000008
    page_code: 176
    page_length: 4
    peripheral_device: {
        qualifier: 0
        type: 0
    }
}";
    assert_eq!(text, expected);
    Ok(())
}
