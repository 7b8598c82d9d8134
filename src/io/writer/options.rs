// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Options for chunked route writes.

use serde::{Deserialize, Serialize};

/// Options controlling how one route is written.
///
/// # Example
///
/// ```rust
/// use navcodec::io::writer::WriteOptions;
///
/// let options = WriteOptions::new()
///     .duplicate_first_position(true)
///     .ignore_maximum_position_count(false);
/// assert!(options.duplicate_first_position);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Insert the format's duplicate of the first position before writing
    pub duplicate_first_position: bool,
    /// Write everything even if it exceeds the format's per-file capacity
    pub ignore_maximum_position_count: bool,
}

impl WriteOptions {
    /// Create options with everything disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the first position is duplicated.
    pub fn duplicate_first_position(mut self, enabled: bool) -> Self {
        self.duplicate_first_position = enabled;
        self
    }

    /// Set whether the per-file capacity is ignored.
    pub fn ignore_maximum_position_count(mut self, enabled: bool) -> Self {
        self.ignore_maximum_position_count = enabled;
        self
    }
}
