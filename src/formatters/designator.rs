// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Identification descriptor (VPD 0x83 designator) rendering.

use tracing::debug;

use crate::{
    control_block::device_id::DESIGNATOR_HEADER_LEN,
    error::FormatError,
    formatters::{
        normalize::{FieldMap, normalize, opt_u64, req_display, req_u64},
        tables::{association_name, code_set_name, protocol_identifier_name},
    },
    models::response::StructuredResponse,
    utils::hex_prefixed,
};

const BODY: &str = "      ";

/// DESIGNATOR TYPE values that have an output template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignatorKind {
    VendorSpecific,
    T10,
    Eui64,
    Naa,
    RelativeTargetPort,
    TargetPortGroup,
    LogicalUnitGroup,
    Md5LogicalUnit,
    ScsiNameString,
    ProtocolSpecificPort,
    Uuid,
}

impl TryFrom<u8> for DesignatorKind {
    type Error = FormatError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(match v {
            0x0 => DesignatorKind::VendorSpecific,
            0x1 => DesignatorKind::T10,
            0x2 => DesignatorKind::Eui64,
            0x3 => DesignatorKind::Naa,
            0x4 => DesignatorKind::RelativeTargetPort,
            0x5 => DesignatorKind::TargetPortGroup,
            0x6 => DesignatorKind::LogicalUnitGroup,
            0x7 => DesignatorKind::Md5LogicalUnit,
            0x8 => DesignatorKind::ScsiNameString,
            0x9 => DesignatorKind::ProtocolSpecificPort,
            0xA => DesignatorKind::Uuid,
            other => return Err(FormatError::UnknownDesignatorType(other)),
        })
    }
}

impl DesignatorKind {
    pub fn name(self) -> &'static str {
        match self {
            DesignatorKind::VendorSpecific => "vendor specific [0x0]",
            DesignatorKind::T10 => "T10 vendor identification",
            DesignatorKind::Eui64 => "EUI-64 based",
            DesignatorKind::Naa => "NAA",
            DesignatorKind::RelativeTargetPort => "Relative target port",
            DesignatorKind::TargetPortGroup => "Target port group",
            DesignatorKind::LogicalUnitGroup => "Logical unit group",
            DesignatorKind::Md5LogicalUnit => "MD5 logical unit identifier",
            DesignatorKind::ScsiNameString => "SCSI name string",
            DesignatorKind::ProtocolSpecificPort => "Protocol specific port identifier",
            DesignatorKind::Uuid => "UUID identifier",
        }
    }
}

/// NAA sub-formats with an output template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NaaFormat {
    IeeeExtended,
    IeeeRegistered,
    IeeeRegisteredExtended,
}

impl TryFrom<u64> for NaaFormat {
    type Error = FormatError;

    fn try_from(v: u64) -> Result<Self, Self::Error> {
        match v {
            2 => Ok(NaaFormat::IeeeExtended),
            5 => Ok(NaaFormat::IeeeRegistered),
            6 => Ok(NaaFormat::IeeeRegisteredExtended),
            other => Err(FormatError::UnknownNaaFormat(other as u8)),
        }
    }
}

fn hex_line(label: &str, map: &FieldMap, key: &'static str) -> Result<String, FormatError> {
    Ok(format!("{BODY}{label}: {:#x}", req_u64(map, key)?))
}

/// Render one designator: the four header lines followed by the body for its
/// type. `number` is the 1-based ordinal inside the page.
pub fn render_designator(
    number: usize,
    designator: &dyn StructuredResponse,
) -> Result<Vec<String>, FormatError> {
    let map = normalize(designator);
    let raw = designator.to_bytes();
    let kind = DesignatorKind::try_from(req_u64(&map, "designator_type")? as u8)?;
    debug!(number, ?kind, "rendering designator");

    let code_set = req_u64(&map, "code_set")? as u8;
    let association = req_u64(&map, "association")? as u8;
    let protocol = req_u64(&map, "protocol_identifier")? as u8;

    let mut lines = vec![
        format!(
            "   Designation descriptor number {number}, descriptor length: {}",
            raw.len()
        ),
        format!(
            "    designator_type: {},  code_set: {}",
            kind.name(),
            code_set_name(code_set)
        ),
        format!(
            "    associated with the {}",
            association_name(association).to_lowercase()
        ),
        format!(
            "    transport: {},  piv: {}",
            protocol_identifier_name(protocol),
            req_u64(&map, "piv")?
        ),
    ];

    // trailing designator run, straight from the descriptor's own bytes
    let packed = hex_prefixed(raw.get(DESIGNATOR_HEADER_LEN..).unwrap_or_default());

    match kind {
        DesignatorKind::VendorSpecific => {
            lines.push(format!("{BODY}vendor specific: {packed}"));
        },
        DesignatorKind::T10 => {
            lines.push(format!(
                "{BODY}vendor id: {}",
                req_display(&map, "t10_vendor_identification")?
            ));
            lines.push(format!(
                "{BODY}vendor specific: {}",
                req_display(&map, "vendor_specific_identifier")?
            ));
        },
        DesignatorKind::Eui64 => {
            lines.push(format!(
                "{BODY}EUI-64 based {} byte identifier",
                req_u64(&map, "designator_length")?
            ));
            if let Some(ext) = opt_u64(&map, "identifier_extension") {
                lines.push(format!("{BODY}Identifier extension: {ext:#x}"));
            }
            lines.push(hex_line("IEEE Company_id", &map, "ieee_company_id")?);
            lines.push(hex_line(
                "Vendor Specific Extension Identifier",
                &map,
                "vendor_specific_extension_identifier",
            )?);
            if let Some(dir) = opt_u64(&map, "directory_id") {
                lines.push(format!("{BODY}Directory ID: {dir:#x}"));
            }
            lines.push(format!("{BODY}[{packed}]"));
        },
        DesignatorKind::Naa => {
            let naa = req_u64(&map, "naa")?;
            match NaaFormat::try_from(naa)? {
                NaaFormat::IeeeExtended => {
                    lines.push(hex_line(
                        "NAA 2, vendor specific identifier A",
                        &map,
                        "vendor_specific_identifier_a",
                    )?);
                    lines.push(hex_line("IEEE Company_id", &map, "ieee_company_id")?);
                    lines.push(hex_line(
                        "vendor specific identifier B",
                        &map,
                        "vendor_specific_identifier_b",
                    )?);
                },
                NaaFormat::IeeeRegistered => {
                    lines.push(hex_line("NAA 5, IEEE Company_id", &map, "ieee_company_id")?);
                    lines.push(hex_line(
                        "Vendor Specific Identifier",
                        &map,
                        "vendor_specific_identifier",
                    )?);
                },
                NaaFormat::IeeeRegisteredExtended => {
                    lines.push(hex_line("NAA 6, IEEE Company_id", &map, "ieee_company_id")?);
                    lines.push(hex_line(
                        "Vendor Specific Identifier",
                        &map,
                        "vendor_specific_identifier",
                    )?);
                    lines.push(hex_line(
                        "Vendor Specific Identifier Extension",
                        &map,
                        "vendor_specific_identifier_extension",
                    )?);
                },
            }
            lines.push(format!("{BODY}[{packed}]"));
        },
        DesignatorKind::RelativeTargetPort => {
            lines.push(hex_line(
                "Relative target port",
                &map,
                "relative_target_port_identifier",
            )?);
        },
        DesignatorKind::TargetPortGroup => {
            lines.push(hex_line("Target port group", &map, "target_port_group")?);
        },
        DesignatorKind::LogicalUnitGroup => {
            lines.push(hex_line("Logical unit group", &map, "logical_unit_group")?);
        },
        DesignatorKind::Md5LogicalUnit => {
            lines.push(format!("{BODY}MD5 logical unit identifier:"));
            lines.push(format!(
                "{BODY}{}",
                req_display(&map, "md5_logical_unit_identifier")?
            ));
        },
        DesignatorKind::ScsiNameString => {
            lines.push(format!("{BODY}SCSI name string:"));
            lines.push(format!("{BODY}{}", req_display(&map, "scsi_name_string")?));
        },
        DesignatorKind::ProtocolSpecificPort => {
            lines.push(format!("{BODY}Protocol specific port identifier: {packed}"));
        },
        DesignatorKind::Uuid => {
            lines.push(format!(
                "{BODY}Locally assigned UUID: {}",
                req_display(&map, "uuid")?
            ));
        },
    }

    Ok(lines)
}
