use anyhow::Result;
use hex_literal::hex;
use scsi_render_rs::{
    control_block::{
        persistent_reserve_in::{ReadKeysData, ReadReservationData},
        report_luns::ReportLunsData,
        report_target_port_groups::TargetPortGroupsData,
    },
    formatters::{
        ErrorFormatter, LunsFormatter, ReadKeysFormatter, ReadReservationFormatter,
        TargetPortGroupsFormatter,
    },
    models::sense_data::SenseData,
};

use super::common::{load_fixture, render_text};

#[test]
fn test_report_luns() -> Result<()> {
    let data = ReportLunsData::parse(&hex!(
        "00 00 00 10 00 00 00 00
         00 00 00 00 00 00 00 00
         00 05 00 00 00 00 00 00"
    ))?;
    assert_eq!(render_text(&LunsFormatter, &data)?, "0\n5");
    Ok(())
}

#[test]
fn test_read_keys() -> Result<()> {
    let data = ReadKeysData::parse(&hex!(
        "00 00 00 02 00 00 00 08
         00 00 00 00 00 00 12 34"
    ))?;
    assert_eq!(
        render_text(&ReadKeysFormatter, &data)?,
        "Reservation keys:\nKey: 0x1234"
    );
    Ok(())
}

#[test]
fn test_read_reservation() -> Result<()> {
    let data = ReadReservationData::parse(&hex!(
        "00 00 00 0a 00 00 00 10
         00 00 00 00 00 00 12 34
         00 00 00 00 00 03 00 00"
    ))?;
    assert_eq!(
        render_text(&ReadReservationFormatter, &data)?,
        "Generation: 0xa\nReservation key: 0x1234\nScope: 0x0\nType: 0x3"
    );
    Ok(())
}

#[test]
fn test_target_port_groups() -> Result<()> {
    let data = TargetPortGroupsData::parse(&hex!(
        "00 00 00 1c
         80 0f 00 01 00 00 00 01 00 00 00 01
         01 0f 00 02 00 02 00 02 00 00 00 02 00 00 00 03"
    ))?;
    let text = render_text(&TargetPortGroupsFormatter, &data)?;

    assert!(text.contains("return_data_length: 0x1c"));
    // values up to 2 stay decimal
    assert!(text.contains("target_port_group: 1\n"));
    assert!(text.contains("target_port_group: 2\n"));
    assert!(text.contains("relative_target_port_identifier: 0x3"));
    assert!(text.contains("asymmetric_access_state: 1\n"));
    assert!(!text.contains('"'));
    assert!(!text.contains(','));
    Ok(())
}

#[test]
fn test_sense_error_line() -> Result<()> {
    let sense = SenseData::parse(&load_fixture("sense_illegal_request.hex")?)?;
    assert_eq!(
        render_text(&ErrorFormatter, &sense)?,
        "ERROR: ILLEGAL_REQUEST (Invalid field in CDB)"
    );
    Ok(())
}
