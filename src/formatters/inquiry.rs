// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! INQUIRY: standard data and the VPD pages with dedicated layouts.

use tracing::debug;

use crate::{
    error::FormatError,
    formatters::{
        OutputFormatter, Rendered,
        bitfield::recover_standard_inquiry_flags,
        designator::render_designator,
        generic::to_default_text,
        lines_to_text,
        normalize::{
            FieldMap, display_value, normalize, opt_u64, present, req_display, req_map, req_u64,
        },
        tables::{peripheral_device_type_name, version_name, vpd_page_name},
    },
    models::response::{Field, StructuredResponse},
};

/// Line emitted ahead of the supported pages list.
pub const SUPPORTED_PAGES_NOTE: &str = " Only hex output supported. sg_vpd decodes more pages.";

/// Secondary dispatch key of the INQUIRY formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryPage {
    Standard,
    SupportedPages,
    UnitSerialNumber,
    DeviceIdentification,
    Unsupported(u8),
}

impl From<Option<u64>> for InquiryPage {
    fn from(page_code: Option<u64>) -> Self {
        match page_code {
            None => InquiryPage::Standard,
            Some(0x00) => InquiryPage::SupportedPages,
            Some(0x80) => InquiryPage::UnitSerialNumber,
            Some(0x83) => InquiryPage::DeviceIdentification,
            Some(other) => InquiryPage::Unsupported(other as u8),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InquiryFormatter;

impl OutputFormatter for InquiryFormatter {
    fn format(&self, item: &dyn StructuredResponse) -> Result<Rendered, FormatError> {
        let mut data = normalize(item);
        let page = InquiryPage::from(opt_u64(&data, "page_code"));
        debug!(?page, "inquiry dispatch");
        let lines = match page {
            InquiryPage::Standard => {
                let raw = item.to_bytes();
                for (name, value) in recover_standard_inquiry_flags(&raw)? {
                    data.insert(name.to_string(), value.into());
                }
                standard_inquiry(&data, item.byte_size())?
            },
            InquiryPage::SupportedPages => supported_pages(&data)?,
            InquiryPage::UnitSerialNumber => unit_serial_number(&data)?,
            InquiryPage::DeviceIdentification => device_identification(item)?,
            InquiryPage::Unsupported(code) => {
                debug!(page_code = code, "no dedicated renderer, using default");
                return Ok(Rendered::Text(to_default_text(&data)?));
            },
        };
        Ok(lines_to_text(lines))
    }
}

fn standard_inquiry(data: &FieldMap, byte_size: usize) -> Result<Vec<String>, FormatError> {
    let pd = req_map(data, "peripheral_device")?;
    let device_type = req_u64(pd, "type")?;
    let version = req_u64(data, "version")?;

    let mut lines = vec![
        "standard INQUIRY:".to_string(),
        format!(
            "  PQual={}  Device_type={}  RMB={}  version={:#04x}  [{}]",
            req_u64(pd, "qualifier")?,
            device_type,
            req_u64(data, "rmb")?,
            version,
            version_name(version as u8)
        ),
        format!(
            "  [AERC={}]  [TrmTsk={}]  NormACA={}  HiSUP={}  Resp_data_format={}",
            req_u64(data, "aerc")?,
            req_u64(data, "trmtsk")?,
            req_u64(data, "normaca")?,
            req_u64(data, "hisup")?,
            req_u64(data, "response_data_format")?
        ),
        format!(
            "  SCCS={}  ACC={}  TPGS={}  3PC={}  Protect={}  [BQue={}]",
            req_u64(data, "sccs")?,
            req_u64(data, "acc")?,
            req_u64(data, "tpgs")?,
            req_u64(data, "threepc")?,
            req_u64(data, "protect")?,
            req_u64(data, "bque")?
        ),
        format!(
            "  EncServ={}  MultiP={} (VS={})  [MChngr={}]  [ACKREQQ={}]  Addr16={}",
            req_u64(data, "encserv")?,
            req_u64(data, "multip")?,
            req_u64(data, "vs")?,
            req_u64(data, "mchngr")?,
            req_u64(data, "ackreqq")?,
            req_u64(data, "addr16")?
        ),
        format!(
            "  [RelAdr={}]  WBus16={}  Sync={}  Linked={}  [TranDis={}]  CmdQue={}",
            req_u64(data, "reladr")?,
            req_u64(data, "wbus16")?,
            req_u64(data, "sync")?,
            req_u64(data, "linked")?,
            req_u64(data, "trandis")?,
            req_u64(data, "cmdque")?
        ),
    ];

    if let Some(ext) = present(data, "extended").and_then(|v| v.as_object()) {
        lines.push(format!(
            "  [SPI: Clocking={:#x}  QAS={}  IUS={}]",
            req_u64(ext, "clocking")?,
            req_u64(ext, "qas")?,
            req_u64(ext, "ius")?
        ));
    }

    lines.push(format!(
        "    length={byte_size} ({byte_size:#x})   Peripheral device type: {}",
        peripheral_device_type_name(device_type as u8)
    ));
    lines.push(format!(
        " Vendor identification: {}",
        req_display(data, "t10_vendor_identification")?
    ));
    lines.push(format!(
        " Product identification: {}",
        req_display(data, "product_identification")?
    ));
    lines.push(format!(
        " Product revision level: {}",
        req_display(data, "product_revision_level")?
    ));
    if let Some(serial) = present(data, "product_serial_number") {
        lines.push(format!(
            " Unit serial number: {}",
            display_value(serial)
        ));
    }
    Ok(lines)
}

fn supported_pages(data: &FieldMap) -> Result<Vec<String>, FormatError> {
    let pd = req_map(data, "peripheral_device")?;
    let device_type = req_u64(pd, "type")? as u8;
    let pages = present(data, "vpd_parameters")
        .and_then(|v| v.as_array())
        .ok_or(FormatError::MissingField("vpd_parameters"))?;

    let mut lines = vec![
        SUPPORTED_PAGES_NOTE.to_string(),
        "VPD INQUIRY, page code=0x00:".to_string(),
        format!(
            "   [PQual={}  Peripheral device type: {}]",
            req_u64(pd, "qualifier")?,
            peripheral_device_type_name(device_type)
        ),
        "   Supported VPD pages:".to_string(),
    ];
    for page in pages {
        let code = page
            .as_u64()
            .ok_or(FormatError::MissingField("vpd_parameters"))? as u8;
        let entry = format!("      {code:#x} {}", vpd_page_name(code, device_type));
        lines.push(entry.trim_end().to_string());
    }
    Ok(lines)
}

fn unit_serial_number(data: &FieldMap) -> Result<Vec<String>, FormatError> {
    Ok(vec![
        "VPD INQUIRY: Unit serial number page".to_string(),
        format!(
            "  Unit serial number: {}",
            req_display(data, "product_serial_number")?
        ),
    ])
}

fn device_identification(item: &dyn StructuredResponse) -> Result<Vec<String>, FormatError> {
    let Some(Field::List(designators)) = item.field("designators_list") else {
        return Err(FormatError::MissingField("designators_list"));
    };

    let mut lines = vec!["VPD INQUIRY: Device Identification page".to_string()];
    for (i, d) in designators.into_iter().enumerate() {
        let Field::Struct(d) = d else {
            return Err(FormatError::MissingField("designators_list"));
        };
        lines.extend(render_designator(i + 1, d)?);
    }
    Ok(lines)
}
