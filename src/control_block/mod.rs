// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

pub mod device_id;
pub mod inquiry;
pub mod persistent_reserve_in;
pub mod read_capacity;
pub mod report_luns;
pub mod report_target_port_groups;
pub mod request_sense;
