// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format detection by trial decoding.
//!
//! Navigation files rarely carry a reliable magic number, so the format is
//! found by handing one rewindable input to an ordered list of candidate
//! codecs until one of them produces a route.
//!
//! # Rules
//!
//! - Candidates are tried in list order; the first one that adds at least one
//!   route wins and is recorded in the [`ParseContext`].
//! - A candidate that fails is logged and skipped.
//! - Between candidates the input is rewound to its mark. If that fails the
//!   whole read fails with [`CodecError::StreamNotRewindable`].
//! - If no candidate produced a route, the first candidate that decoded
//!   without error is recorded anyway: some formats legitimately hold no route.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use navcodec::io::context::ParseContext;
//! use navcodec::io::detection::FormatTrialReader;
//! use navcodec::io::formats::{CsvFormat, GeoJsonFormat};
//! use navcodec::io::stream::RewindableReader;
//! use navcodec::io::traits::FormatRef;
//!
//! let candidates: Vec<FormatRef> = vec![Arc::new(GeoJsonFormat::new()), Arc::new(CsvFormat::new())];
//! let mut context = ParseContext::new();
//! let input = RewindableReader::from_bytes(b"8.5,53.1\n8.6,53.2\n".to_vec());
//! FormatTrialReader::new(&candidates).read(input, 1024, &mut context)?;
//! assert_eq!(context.formats()[0].name(), "CSV");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::io::context::ParseContext;
use crate::io::stream::RewindableReader;
use crate::io::traits::FormatRef;
use crate::Result;

/// Outcome of one trial loop.
#[derive(Debug, Clone, Default)]
pub struct TrialOutcome {
    /// Candidates handed the input, in order
    pub attempted: usize,
    /// Candidates whose decode call failed
    pub failures: usize,
    /// The format that produced routes, or the zero-route fallback
    pub format: Option<FormatRef>,
    /// Whether `format` is the zero-route fallback
    pub fallback: bool,
}

/// Drives the ordered decode attempts over a single rewindable input.
pub struct FormatTrialReader<'a> {
    candidates: &'a [FormatRef],
    on_attempt: Option<&'a dyn Fn(&FormatRef)>,
}

impl<'a> FormatTrialReader<'a> {
    /// Create a trial reader over an ordered candidate list.
    pub fn new(candidates: &'a [FormatRef]) -> Self {
        Self {
            candidates,
            on_attempt: None,
        }
    }

    /// Call `hook` before each decode attempt.
    pub fn on_attempt(mut self, hook: &'a dyn Fn(&FormatRef)) -> Self {
        self.on_attempt = Some(hook);
        self
    }

    /// Try every candidate against `source` until one yields a route.
    ///
    /// `budget` is the number of bytes the input may be replayed over; it must
    /// cover the whole payload. The source is consumed and dropped on every
    /// exit path.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CodecError::StreamNotRewindable`] when the input
    /// cannot be rewound for the next candidate. Decode failures of single
    /// candidates are never returned.
    pub fn read<R: Read>(
        &self,
        mut source: RewindableReader<R>,
        budget: usize,
        context: &mut ParseContext,
    ) -> Result<TrialOutcome> {
        source.mark(budget);

        let routes_before = context.routes().len();
        let mut outcome = TrialOutcome::default();
        let mut first_successful: Option<&FormatRef> = None;

        let last = self.candidates.len().saturating_sub(1);
        for (index, format) in self.candidates.iter().enumerate() {
            if let Some(hook) = self.on_attempt {
                hook(format);
            }
            outcome.attempted += 1;

            debug!(format = format.name(), "Trying to read");
            match format.decode(&mut source, context) {
                Ok(()) => {
                    if first_successful.is_none() {
                        first_successful = Some(format);
                    }
                }
                Err(e) => {
                    outcome.failures += 1;
                    warn!(format = format.name(), error = %e, "Error reading");
                }
            }

            if context.routes().len() > routes_before {
                context.add_format(format.clone());
                outcome.format = Some(format.clone());
                return Ok(outcome);
            }

            if index == last {
                break;
            }
            if let Err(e) = source.rewind() {
                warn!(error = %e, "Cannot rewind stream to mark");
                return Err(e);
            }
        }

        if context.routes().is_empty() && context.formats().is_empty() {
            if let Some(format) = first_successful {
                debug!(
                    format = format.name(),
                    "No routes read, falling back to first successful format"
                );
                context.add_format(format.clone());
                outcome.format = Some(format.clone());
                outcome.fallback = true;
            }
        }

        Ok(outcome)
    }
}

/// Lowercase extension of `path`, without the dot.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.to_lowercase())
}
