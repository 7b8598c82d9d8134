// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod convert;
mod formats;
mod inspect;

pub use convert::ConvertCmd;
pub use formats::FormatsCmd;
pub use inspect::InspectCmd;
