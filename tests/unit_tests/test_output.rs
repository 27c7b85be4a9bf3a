use anyhow::Result;
use scsi_render_rs::{
    cfg::{config::OutputConfig, enums::YesNo},
    control_block::{
        inquiry::{InquiryCommand, VpdPage, parse_inquiry},
        read_capacity::{ReadCapacity10Command, ReadCapacity10Data},
    },
    formatters::{Formatter, InquiryFormatter, ReadCapacityFormatter},
    models::sense_data::SenseData,
    output::OutputContext,
};

use super::common::load_fixture;

fn as_text(out: Vec<u8>) -> String {
    String::from_utf8_lossy(&out).into_owned()
}

#[test]
fn test_default_mode_uses_selected_formatter() -> Result<()> {
    let data = ReadCapacity10Data::parse(&load_fixture("read_capacity10.hex")?)?;
    let mut ctx = OutputContext::new(Vec::new());
    ctx.set_formatter(ReadCapacityFormatter);

    ctx.output_command(&ReadCapacity10Command::default())?;
    ctx.output_result(&data)?;

    let text = as_text(ctx.into_inner());
    assert!(text.starts_with("Read Capacity results:\n"));
    assert!(text.ends_with("0.00 GB\n"));
    Ok(())
}

#[test]
fn test_verbose_echoes_command_first() -> Result<()> {
    let data = ReadCapacity10Data::parse(&load_fixture("read_capacity10.hex")?)?;
    let mut ctx = OutputContext::new(Vec::new());
    ctx.enable_verbose();
    ctx.set_formatter(ReadCapacityFormatter);

    ctx.output_command(&ReadCapacity10Command::default())?;
    ctx.output_result(&data)?;

    let expected = "\
{
    control: 0
    logical_block_address: 0
    opcode: 37
    pmi: 0
}
Read Capacity results:
";
    assert!(as_text(ctx.into_inner()).starts_with(expected));
    Ok(())
}

#[test]
fn test_verbose_command_is_never_raw_or_hex() -> Result<()> {
    let mut ctx = OutputContext::new(Vec::new());
    ctx.enable_verbose();
    ctx.enable_raw();
    ctx.enable_hex();

    ctx.output_command(&InquiryCommand::vpd(VpdPage::UnitSerial, 0xFF))?;

    let text = as_text(ctx.into_inner());
    assert!(text.starts_with("{\n"));
    assert!(text.contains("page_code: 128"));
    assert!(!text.contains("00000000:"));
    Ok(())
}

#[test]
fn test_raw_then_hex_of_same_bytes() -> Result<()> {
    let raw = load_fixture("vpd_unit_serial.hex")?;
    let inq = parse_inquiry(&raw, true)?;
    let mut ctx = OutputContext::new(Vec::new());
    ctx.set_formatter(InquiryFormatter);
    ctx.enable_hex();
    ctx.enable_raw();

    ctx.output_result(&inq)?;

    let out = ctx.into_inner();
    assert_eq!(&out[..raw.len()], raw.as_slice());
    let dump = as_text(out[raw.len()..].to_vec());
    assert!(dump.starts_with("00000000: 00 80 00 0C 36 30 30 31  34 30 35 61 62 63 64 65"));
    assert!(dump.ends_with("....6001405abcde\n"));
    Ok(())
}

#[test]
fn test_raw_only_has_no_newline() -> Result<()> {
    let raw = load_fixture("read_capacity10.hex")?;
    let mut ctx = OutputContext::new(Vec::new());
    ctx.enable_raw();
    ctx.output_result(&ReadCapacity10Data::parse(&raw)?)?;
    assert_eq!(ctx.into_inner(), raw);
    Ok(())
}

#[test]
fn test_json_overrides_selected_formatter() -> Result<()> {
    let data = ReadCapacity10Data::parse(&load_fixture("read_capacity10.hex")?)?;
    let mut ctx = OutputContext::new(Vec::new());
    ctx.set_formatter(ReadCapacityFormatter);
    ctx.enable_json();
    ctx.output_result(&data)?;

    assert_eq!(
        as_text(ctx.into_inner()),
        "{\n    \"block_length_in_bytes\": 512,\n    \"last_logical_block_address\": 99\n}\n"
    );
    Ok(())
}

#[test]
fn test_output_error() -> Result<()> {
    let sense = SenseData::parse(&load_fixture("sense_illegal_request.hex")?)?;
    let mut ctx = OutputContext::new(Vec::new());
    ctx.output_error(&sense)?;
    assert_eq!(
        as_text(ctx.into_inner()),
        "ERROR: ILLEGAL_REQUEST (Invalid field in CDB)\n"
    );
    Ok(())
}

#[test]
fn test_from_config() -> Result<()> {
    let cfg = OutputConfig {
        verbose: YesNo::Yes,
        hex: YesNo::Yes,
        ..OutputConfig::default()
    };
    let data = ReadCapacity10Data::parse(&load_fixture("read_capacity10.hex")?)?;
    let mut ctx = OutputContext::from_config(&cfg, Vec::new());
    assert!(matches!(ctx.formatter(), Formatter::Default(_)));

    ctx.output_command(&ReadCapacity10Command::default())?;
    ctx.output_result(&data)?;

    let text = as_text(ctx.into_inner());
    assert!(text.starts_with("{\n"));
    assert!(text.ends_with("00000000: 00 00 00 63 00 00 02 00                           ...c....\n"));
    Ok(())
}
