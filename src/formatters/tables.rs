// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Read-only name tables used by the renderers.

/// Peripheral device type (byte 0, bits 4..0) in sg3_utils spelling.
pub fn peripheral_device_type_name(device_type: u8) -> &'static str {
    match device_type {
        0x00 => "disk",
        0x01 => "tape",
        0x02 => "printer",
        0x03 => "processor",
        0x04 => "write once optical disk",
        0x05 => "cd/dvd",
        0x06 => "scanner",
        0x07 => "optical memory device",
        0x08 => "medium changer",
        0x09 => "communications",
        0x0A => "graphics [0xa]",
        0x0B => "graphics [0xb]",
        0x0C => "storage array controller",
        0x0D => "enclosure services device",
        0x0E => "simplified direct access device",
        0x0F => "optical card reader/writer device",
        0x10 => "bridge controller commands",
        0x11 => "object based storage",
        0x12 => "automation/driver interface",
        0x13 => "security manager device",
        0x14 => "host managed zoned block",
        0x1E => "well known logical unit",
        0x1F => "no physical device on this lu",
        _ => "reserved",
    }
}

/// ANSI VERSION field of standard INQUIRY data.
pub fn version_name(version: u8) -> &'static str {
    match version {
        0x00 => "no conformance claimed",
        0x01 | 0x02 => "SCSI-2",
        0x03 => "SPC",
        0x04 => "SPC-2",
        0x05 => "SPC-3",
        0x06 => "SPC-4",
        0x07 => "SPC-5",
        _ => "unknown version",
    }
}

/// VPD page name. Pages 0xb0..=0xbf are defined per device type, so the
/// peripheral device type participates in the lookup for that range only.
pub fn vpd_page_name(page_code: u8, device_type: u8) -> &'static str {
    match page_code {
        0xB0..=0xBF => device_specific_vpd_page_name(page_code, device_type),
        _ => vpd_page_name_common(page_code),
    }
}

fn vpd_page_name_common(page_code: u8) -> &'static str {
    match page_code {
        0x00 => "Supported VPD pages",
        0x80 => "Unit serial number",
        0x81 => "Implemented operating definition (obsolete)",
        0x82 => "ASCII implemented operating definition (obsolete)",
        0x83 => "Device identification",
        0x84 => "Software interface identification",
        0x85 => "Management network addresses",
        0x86 => "Extended INQUIRY data",
        0x87 => "Mode page policy",
        0x88 => "SCSI ports",
        0x89 => "ATA information (SAT)",
        0x8A => "Power condition",
        0x8B => "Device constituents",
        0x8C => "CFA profile information",
        0x8D => "Power consumption",
        0x8F => "Third party copy",
        0x90 => "Protocol specific logical unit information",
        0x91 => "Protocol specific port information",
        0x92 => "SCSI feature sets",
        _ => "",
    }
}

fn device_specific_vpd_page_name(page_code: u8, device_type: u8) -> &'static str {
    match (page_code, device_type) {
        (0xB0, 0x00 | 0x04 | 0x07 | 0x0E | 0x14) => "Block limits (SBC)",
        (0xB0, 0x01 | 0x08) => "Sequential-access device capabilities (SSC)",
        (0xB0, 0x11) => "OSD information (OSD)",
        (0xB1, 0x00 | 0x04 | 0x07 | 0x0E | 0x14) => "Block device characteristics (SBC)",
        (0xB1, 0x01 | 0x08) => "Manufacturer-assigned serial number (SSC)",
        (0xB1, 0x11) => "Security token (OSD)",
        (0xB2, 0x00 | 0x04 | 0x07 | 0x0E | 0x14) => "Logical block provisioning (SBC)",
        (0xB2, 0x01 | 0x08) => "TapeAlert supported flags (SSC)",
        (0xB3, 0x00 | 0x04 | 0x07 | 0x0E | 0x14) => "Referrals (SBC)",
        (0xB3, 0x01 | 0x08) => "Automation device serial number (SSC)",
        (0xB4, 0x00 | 0x04 | 0x07 | 0x0E | 0x14) => {
            "Supported block lengths and protection types (SBC)"
        },
        (0xB4, 0x01 | 0x08) => "Data transfer device element address (SSC)",
        (0xB5, 0x00 | 0x04 | 0x07 | 0x0E | 0x14) => {
            "Block device characteristics extension (SBC)"
        },
        (0xB5, 0x01 | 0x08) => "Logical block protection (SSC)",
        (0xB6, 0x00 | 0x14) => "Zoned block device characteristics (ZBC)",
        (0xB7, 0x00 | 0x04 | 0x07 | 0x0E | 0x14) => "Block limits extension (SBC)",
        _ => "",
    }
}

/// CODE SET of an identification descriptor.
pub fn code_set_name(code_set: u8) -> &'static str {
    match code_set {
        0x1 => "Binary",
        0x2 => "ASCII",
        0x3 => "UTF-8",
        _ => "Reserved",
    }
}

/// ASSOCIATION of an identification descriptor.
pub fn association_name(association: u8) -> &'static str {
    match association {
        0x0 => "Addressed logical unit",
        0x1 => "Target port",
        0x2 => "Target device that contains addressed lu",
        _ => "Reserved [0x3]",
    }
}

/// PROTOCOL IDENTIFIER of an identification descriptor.
pub fn protocol_identifier_name(protocol: u8) -> &'static str {
    match protocol {
        0x0 => "Fibre Channel (FCP-4)",
        0x1 => "Parallel SCSI (SPI-5)",
        0x2 => "SSA (SSA-S3P)",
        0x3 => "IEEE 1394 (SBP-3)",
        0x4 => "SCSI RDMA (SRP)",
        0x5 => "Internet SCSI (iSCSI)",
        0x6 => "SAS Serial SCSI Protocol (SPL-4)",
        0x7 => "Automation/Drive Interface (ADT-2)",
        0x8 => "AT Attachment Interface (ACS-2)",
        0x9 => "USB Attached SCSI (UAS-2)",
        0xA => "SCSI over PCI Express (SOP)",
        0xB => "PCIe",
        0xF => "No specific protocol",
        _ => "Reserved",
    }
}

/// SENSE KEY in the spelling used by error output.
pub fn sense_key_name(sense_key: u8) -> &'static str {
    match sense_key {
        0x0 => "NO_SENSE",
        0x1 => "RECOVERED_ERROR",
        0x2 => "NOT_READY",
        0x3 => "MEDIUM_ERROR",
        0x4 => "HARDWARE_ERROR",
        0x5 => "ILLEGAL_REQUEST",
        0x6 => "UNIT_ATTENTION",
        0x7 => "DATA_PROTECT",
        0x8 => "BLANK_CHECK",
        0x9 => "VENDOR_SPECIFIC",
        0xA => "COPY_ABORTED",
        0xB => "ABORTED_COMMAND",
        0xD => "VOLUME_OVERFLOW",
        0xE => "MISCOMPARE",
        0xF => "COMPLETED",
        _ => "RESERVED",
    }
}
