// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Physical outputs for written routes.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::route::Route;
use crate::io::traits::FormatRef;
use crate::Result;

/// One physical output of a write.
///
/// Files are opened only when their chunk is written, and never opened at all
/// for formats that [modify their target in place](crate::io::traits::FormatCodec::modifies_target_in_place).
pub enum OutputTarget {
    /// Caller supplied stream, flushed after writing
    Stream(Box<dyn Write + Send>),
    /// File created (or, for in-place formats, updated) when written
    File(PathBuf),
}

impl fmt::Debug for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stream(_) => f.write_str("OutputTarget::Stream"),
            OutputTarget::File(path) => f.debug_tuple("OutputTarget::File").field(path).finish(),
        }
    }
}

impl OutputTarget {
    /// Wrap a stream.
    pub fn stream(writer: impl Write + Send + 'static) -> Self {
        OutputTarget::Stream(Box::new(writer))
    }

    /// Target a file path.
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputTarget::File(path.as_ref().to_path_buf())
    }

    /// File path of this target, if it is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputTarget::File(path) => Some(path),
            OutputTarget::Stream(_) => None,
        }
    }

    /// Encode `start..end` of `route` in `format`.
    pub(crate) fn write_chunk(
        &mut self,
        format: &FormatRef,
        route: &Route,
        start: usize,
        end: usize,
    ) -> Result<()> {
        match self {
            OutputTarget::Stream(writer) => {
                format.encode(route, writer.as_mut(), start, end)?;
                writer.flush()?;
            }
            OutputTarget::File(path) if format.modifies_target_in_place() => {
                format.encode_in_place(route, path, start, end)?;
            }
            OutputTarget::File(path) => {
                let mut writer = BufWriter::new(File::create(&*path)?);
                format.encode(route, &mut writer, start, end)?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    /// Encode all `routes` in one output of `format`.
    pub(crate) fn write_routes(&mut self, format: &FormatRef, routes: &[Route]) -> Result<()> {
        match self {
            OutputTarget::Stream(writer) => {
                format.encode_routes(routes, writer.as_mut())?;
                writer.flush()?;
            }
            OutputTarget::File(path) => {
                let mut writer = BufWriter::new(File::create(&*path)?);
                format.encode_routes(routes, &mut writer)?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}
