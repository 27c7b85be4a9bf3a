use anyhow::Result;
use hex_literal::hex;
use scsi_render_rs::{
    control_block::{
        device_id::{DeviceIdentification, designator_type},
        inquiry::parse_inquiry,
    },
    error::FormatError,
    formatters::{DefaultFormatter, InquiryFormatter, OutputFormatter},
};

use super::common::{load_fixture, render_text};

#[test]
fn test_device_identification_render() -> Result<()> {
    let raw = load_fixture("vpd_device_id.hex")?;
    let text = render_text(&InquiryFormatter, &parse_inquiry(&raw, true)?)?;

    let expected = "\
VPD INQUIRY: Device Identification page
   Designation descriptor number 1, descriptor length: 20
    designator_type: NAA,  code_set: Binary
    associated with the addressed logical unit
    transport: Fibre Channel (FCP-4),  piv: 0
      NAA 6, IEEE Company_id: 0x1405
      Vendor Specific Identifier: 0xabcdef012
      Vendor Specific Identifier Extension: 0x3456789abcdef001
      [0x6001405abcdef0123456789abcdef001]
   Designation descriptor number 2, descriptor length: 28
    designator_type: T10 vendor identification,  code_set: ASCII
    associated with the addressed logical unit
    transport: Fibre Channel (FCP-4),  piv: 0
      vendor id: LIO-ORG
      vendor specific: abcdef0123456789
   Designation descriptor number 3, descriptor length: 8
    designator_type: Relative target port,  code_set: Binary
    associated with the target port
    transport: SAS Serial SCSI Protocol (SPL-4),  piv: 1
      Relative target port: 0x1
   Designation descriptor number 4, descriptor length: 8
    designator_type: Target port group,  code_set: Binary
    associated with the target port
    transport: Fibre Channel (FCP-4),  piv: 0
      Target port group: 0x2
   Designation descriptor number 5, descriptor length: 16
    designator_type: SCSI name string,  code_set: UTF-8
    associated with the target device that contains addressed lu
    transport: Internet SCSI (iSCSI),  piv: 1
      SCSI name string:
      iqn.test.tg";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn test_decoded_designators() -> Result<()> {
    let raw = load_fixture("vpd_device_id.hex")?;
    let page = DeviceIdentification::parse(&raw)?;
    let types: Vec<u8> = page
        .designators_list
        .iter()
        .map(|d| d.designator_type)
        .collect();
    assert_eq!(
        types,
        vec![
            designator_type::NAA,
            designator_type::T10,
            designator_type::RELATIVE_TARGET_PORT,
            designator_type::TARGET_PORT_GROUP,
            designator_type::SCSI_NAME_STRING,
        ]
    );
    Ok(())
}

#[test]
fn test_naa_unknown_selector_is_fatal() -> Result<()> {
    // NAA 3 (locally assigned) has no output template
    let raw = hex!("00 83 00 0c 01 03 00 08 30 00 00 00 00 00 00 2a");
    let inq = parse_inquiry(&raw, true)?;
    let err = InquiryFormatter.format(&inq).expect_err("render must fail");
    assert!(matches!(err, FormatError::UnknownNaaFormat(3)));
    Ok(())
}

#[test]
fn test_reserved_designator_type_is_fatal() -> Result<()> {
    let raw = hex!("00 83 00 06 01 0c 00 02 de ad");
    let inq = parse_inquiry(&raw, true)?;
    let err = InquiryFormatter.format(&inq).expect_err("render must fail");
    assert!(matches!(err, FormatError::UnknownDesignatorType(0xC)));
    Ok(())
}

#[test]
fn test_truncated_descriptor_is_rejected() {
    // descriptor claims 8 bytes, page carries 4
    let raw = hex!("00 83 00 08 01 03 00 08 60 01 40 5a");
    assert!(matches!(
        parse_inquiry(&raw, true),
        Err(FormatError::Truncated { .. })
    ));
}

#[test]
fn test_eui64_and_uuid_bodies() -> Result<()> {
    let raw = hex!(
        "00 83 00 22
         01 02 00 08 00 14 05 ab cd ef 01 23
         01 0a 00 12 10 00 12 34 56 78 9a bc de f0 11 22 33 44 55 66 77 88"
    );
    let text = render_text(&InquiryFormatter, &parse_inquiry(&raw, true)?)?;
    assert!(text.contains("      EUI-64 based 8 byte identifier\n"));
    assert!(text.contains("      IEEE Company_id: 0x1405\n"));
    assert!(text.contains("      Vendor Specific Extension Identifier: 0xabcdef0123\n"));
    assert!(text.contains("      [0x001405abcdef0123]\n"));
    assert!(!text.contains("Directory ID"));
    assert!(text.ends_with("      Locally assigned UUID: 12345678-9abc-def0-1122-334455667788"));
    Ok(())
}

#[test]
fn test_remaining_designator_bodies() -> Result<()> {
    let raw = load_fixture("vpd_device_id_ext.hex")?;
    let text = render_text(&InquiryFormatter, &parse_inquiry(&raw, true)?)?;

    let expected = "\
VPD INQUIRY: Device Identification page
   Designation descriptor number 1, descriptor length: 12
    designator_type: NAA,  code_set: Binary
    associated with the addressed logical unit
    transport: Fibre Channel (FCP-4),  piv: 0
      NAA 2, vendor specific identifier A: 0x123
      IEEE Company_id: 0x1405
      vendor specific identifier B: 0xabcdef
      [0x2123001405abcdef]
   Designation descriptor number 2, descriptor length: 16
    designator_type: EUI-64 based,  code_set: Binary
    associated with the addressed logical unit
    transport: Fibre Channel (FCP-4),  piv: 0
      EUI-64 based 12 byte identifier
      IEEE Company_id: 0x1405
      Vendor Specific Extension Identifier: 0xabcdef0123
      Directory ID: 0x11223344
      [0x001405abcdef012311223344]
   Designation descriptor number 3, descriptor length: 20
    designator_type: EUI-64 based,  code_set: Binary
    associated with the addressed logical unit
    transport: Fibre Channel (FCP-4),  piv: 0
      EUI-64 based 16 byte identifier
      Identifier extension: 0x1122334455667788
      IEEE Company_id: 0x1405
      Vendor Specific Extension Identifier: 0xabcdef0123
      [0x1122334455667788001405abcdef0123]
   Designation descriptor number 4, descriptor length: 20
    designator_type: MD5 logical unit identifier,  code_set: Binary
    associated with the addressed logical unit
    transport: Fibre Channel (FCP-4),  piv: 0
      MD5 logical unit identifier:
      0x00112233445566778899aabbccddeeff
   Designation descriptor number 5, descriptor length: 8
    designator_type: Logical unit group,  code_set: Binary
    associated with the addressed logical unit
    transport: Fibre Channel (FCP-4),  piv: 0
      Logical unit group: 0x7
   Designation descriptor number 6, descriptor length: 8
    designator_type: Protocol specific port identifier,  code_set: Binary
    associated with the target port
    transport: SAS Serial SCSI Protocol (SPL-4),  piv: 1
      Protocol specific port identifier: 0xdeadbeef";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn test_page_length_from_header() -> Result<()> {
    // one target port group designator followed by 8 padding bytes
    let raw = hex!(
        "00 83 00 08
         01 15 00 04 00 00 00 02
         00 00 00 00 00 00 00 00"
    );
    let text = render_text(&DefaultFormatter, &parse_inquiry(&raw, true)?)?;
    assert!(text.contains("page_length: 8\n"));
    assert!(!text.contains("page_length: 16"));
    Ok(())
}

#[test]
fn test_eui64_length_must_be_8_12_or_16() {
    let raw = hex!("00 83 00 0d 01 02 00 09 00 14 05 ab cd ef 01 23 45");
    assert!(matches!(
        parse_inquiry(&raw, true),
        Err(FormatError::BadDesignatorLength { what: "EUI-64", len: 9 })
    ));
}
