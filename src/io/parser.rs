// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Read and write entry points for navigation files.
//!
//! [`NavParser`] ties format detection, route resolution and chunked writing
//! together. Reads always try the candidates of the shared
//! [`FormatRegistry`] in order; listeners are told about every attempt.
//!
//! # Example
//!
//! ```rust,no_run
//! use navcodec::NavParser;
//!
//! let parser = NavParser::with_defaults();
//! let result = parser.read_path("ride.geojson")?;
//! if let Some(format) = result.format() {
//!     println!("{}: {} route(s)", format.name(), result.routes().len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::core::comments::{DefaultRouteComments, RouteComments};
use crate::core::registry::FormatRegistry;
use crate::core::route::Route;
use crate::io::config::ParserConfig;
use crate::io::context::ParseContext;
use crate::io::detection::{extension_of, FormatTrialReader};
use crate::io::formats::CsvFormat;
use crate::io::resolver::{ResolvedResult, RouteModelResolver};
use crate::io::stream::RewindableReader;
use crate::io::traits::{FormatRef, ParserListener};
use crate::io::writer::{
    files_to_write_for, ChunkedWriter, OutputTarget, ParserCallback, WriteOptions, WriteReport,
};
use crate::{CodecError, Result};

const FILE_SCHEME: &str = "file://";

/// Result of a read.
///
/// A read that matched no format is not an error; it yields an unsuccessful
/// result without routes.
#[derive(Debug, Clone, Default)]
pub struct ParserResult {
    resolved: Option<ResolvedResult>,
}

impl ParserResult {
    fn new(resolved: Option<ResolvedResult>) -> Self {
        Self { resolved }
    }

    /// Whether any format was recognized.
    pub fn is_successful(&self) -> bool {
        self.resolved.is_some()
    }

    /// The format all routes were converted to.
    pub fn format(&self) -> Option<&FormatRef> {
        self.resolved.as_ref().map(ResolvedResult::format)
    }

    /// The routes read, empty if unsuccessful.
    pub fn routes(&self) -> &[Route] {
        self.resolved
            .as_ref()
            .map(ResolvedResult::routes)
            .unwrap_or_default()
    }

    /// The first route read.
    pub fn the_route(&self) -> Option<&Route> {
        self.routes().first()
    }

    /// The resolved format and routes.
    pub fn resolved(&self) -> Option<&ResolvedResult> {
        self.resolved.as_ref()
    }

    /// Take ownership of the resolved format and routes.
    pub fn into_resolved(self) -> Option<ResolvedResult> {
        self.resolved
    }
}

/// Facade for reading and writing navigation files.
pub struct NavParser {
    registry: Arc<FormatRegistry>,
    comments: Arc<dyn RouteComments>,
    listeners: RwLock<Vec<Arc<dyn ParserListener>>>,
    config: ParserConfig,
}

impl std::fmt::Debug for NavParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavParser")
            .field("registry", &self.registry)
            .field("listeners", &self.listeners_snapshot().len())
            .field("config", &self.config)
            .finish()
    }
}

impl NavParser {
    /// Create a parser over `registry` with default configuration.
    pub fn new(registry: Arc<FormatRegistry>) -> Self {
        Self {
            registry,
            comments: Arc::new(DefaultRouteComments),
            listeners: RwLock::new(Vec::new()),
            config: ParserConfig::default(),
        }
    }

    /// Create a parser over the bundled formats.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(FormatRegistry::with_defaults()))
    }

    /// Use `config` for buffer sizes and default write options.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Create a parser over the bundled formats set up from `config`.
    ///
    /// Unlike [`with_config`](Self::with_config) this also applies the
    /// per-format settings to the registry.
    pub fn from_config(config: ParserConfig) -> Result<Self> {
        let registry = FormatRegistry::with_defaults();
        if let Some(max_positions) = config.csv.max_positions {
            registry.register(Arc::new(CsvFormat::with_max_positions(max_positions)))?;
        }
        Ok(Self::new(Arc::new(registry)).with_config(config))
    }

    /// Use `comments` to describe positions and name routes.
    pub fn with_comments(mut self, comments: Arc<dyn RouteComments>) -> Self {
        self.comments = comments;
        self
    }

    /// The format registry.
    pub fn registry(&self) -> &Arc<FormatRegistry> {
        &self.registry
    }

    /// The configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Look up a format by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no format of that name is known.
    pub fn format_by_name(&self, name: &str) -> Result<FormatRef> {
        self.registry
            .by_name(name)?
            .ok_or_else(|| CodecError::unknown_format(name))
    }

    /// Register a listener for format attempts.
    pub fn add_listener(&self, listener: Arc<dyn ParserListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Remove a previously added listener.
    ///
    /// Returns `true` if the listener was registered.
    pub fn remove_listener(&self, listener: &Arc<dyn ParserListener>) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    fn listeners_snapshot(&self) -> Vec<Arc<dyn ParserListener>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn notify_attempting(&self, format: &FormatRef) {
        for listener in self.listeners_snapshot() {
            listener.on_attempting_format(format);
        }
    }

    fn read_with<R: Read>(
        &self,
        source: RewindableReader<R>,
        size_hint: Option<usize>,
        candidates: &[FormatRef],
        mut context: ParseContext,
    ) -> Result<ParserResult> {
        let budget = self.config.mark_budget(size_hint);
        debug!(
            budget,
            candidates = candidates.len(),
            "Reading with a rewind budget"
        );

        let hook = |format: &FormatRef| self.notify_attempting(format);
        let outcome = FormatTrialReader::new(candidates)
            .on_attempt(&hook)
            .read(source, budget, &mut context)?;

        if outcome.format.is_none() {
            info!(
                attempted = outcome.attempted,
                failures = outcome.failures,
                "No format matched"
            );
        }

        let resolved = RouteModelResolver::new(
            self.registry.multi_route_default(),
            self.comments.as_ref(),
        )
        .resolve(context);
        Ok(ParserResult::new(resolved))
    }

    /// Read from `reader`, trying `candidates` or every registered format.
    pub fn read_reader<R: Read>(
        &self,
        reader: R,
        candidates: Option<&[FormatRef]>,
    ) -> Result<ParserResult> {
        let all;
        let candidates = match candidates {
            Some(candidates) => candidates,
            None => {
                all = self.registry.all_candidates()?;
                all.as_slice()
            }
        };
        self.read_with(
            RewindableReader::new(reader),
            None,
            candidates,
            ParseContext::new(),
        )
    }

    /// Read from an in-memory buffer.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<ParserResult> {
        let candidates = self.registry.all_candidates()?;
        self.read_with(
            RewindableReader::from_bytes(bytes.to_vec()),
            Some(bytes.len()),
            &candidates,
            ParseContext::new(),
        )
    }

    /// Read from text.
    pub fn read_str(&self, text: &str) -> Result<ParserResult> {
        self.read_bytes(text.as_bytes())
    }

    /// Read a file, trying formats claiming its extension first.
    ///
    /// The file length sizes the rewind budget and the modification time is
    /// the start time hint for formats without timestamps.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<ParserResult> {
        let path = path.as_ref();
        let candidates = self
            .registry
            .candidates_for_extension(extension_of(path).as_deref())?;
        self.read_file(path, candidates)
    }

    fn read_file(&self, path: &Path, candidates: Vec<FormatRef>) -> Result<ParserResult> {
        let file = File::open(path)?;
        let metadata = file.metadata()?;
        let size_hint = usize::try_from(metadata.len()).ok();
        let start_time = metadata.modified().ok().map(DateTime::<Utc>::from);

        info!(
            path = %path.display(),
            size = metadata.len(),
            "Reading file"
        );

        self.read_with(
            RewindableReader::new(BufReader::with_capacity(
                self.config.chunk_buffer_size.max(1),
                file,
            )),
            size_hint,
            &candidates,
            ParseContext::with_source(Some(path.to_path_buf()), start_time),
        )
    }

    /// Read a located resource: a plain path, a `file://` URL, or a URL a
    /// registered format extracts positions from.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Unsupported`] for remote URLs no format parses.
    pub fn read_location(&self, location: &str) -> Result<ParserResult> {
        let path = location_path(location);
        let extension = path.as_deref().and_then(extension_of);
        let mut candidates = self
            .registry
            .candidates_for_extension(extension.as_deref())?;

        if let Some(url_format) = self
            .registry
            .url_parsing_candidates(location)?
            .into_iter()
            .next()
        {
            debug!(format = url_format.name(), "Parsing positions from URL");
            candidates.insert(0, url_format);
            let bytes = location.as_bytes().to_vec();
            let size_hint = bytes.len();
            return self.read_with(
                RewindableReader::from_bytes(bytes),
                Some(size_hint),
                &candidates,
                ParseContext::new(),
            );
        }

        match path {
            Some(path) => self.read_file(&path, candidates),
            None => Err(CodecError::unsupported(format!(
                "reading remote location {location}"
            ))),
        }
    }

    /// Number of outputs needed to write `route` in `format`.
    pub fn files_to_write_for(
        &self,
        route: &Route,
        format: &FormatRef,
        duplicate_first_position: bool,
    ) -> usize {
        files_to_write_for(route, format, duplicate_first_position)
    }

    /// Write `route` as one file in `format` using the configured options.
    pub fn write_route(
        &self,
        route: &Route,
        format: &FormatRef,
        path: impl AsRef<Path>,
    ) -> Result<WriteReport> {
        let mut targets = [OutputTarget::file(path)];
        self.write_route_to(route, format, self.config.write, None, &mut targets)
    }

    /// Write `route` in `format` split across `targets`.
    pub fn write_route_to(
        &self,
        route: &Route,
        format: &FormatRef,
        options: WriteOptions,
        callback: Option<ParserCallback<'_>>,
        targets: &mut [OutputTarget],
    ) -> Result<WriteReport> {
        ChunkedWriter::new(format.clone(), options, self.comments.as_ref())
            .write(route, callback, targets)
    }

    /// Write all `routes` into one `target` of a multi-route `format`.
    pub fn write_routes(
        &self,
        routes: &[Route],
        format: &FormatRef,
        target: &mut OutputTarget,
    ) -> Result<()> {
        ChunkedWriter::new(format.clone(), self.config.write, self.comments.as_ref())
            .write_routes(routes, target)
    }
}

impl Default for NavParser {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Local file path named by `location`, if any.
fn location_path(location: &str) -> Option<PathBuf> {
    if let Some(rest) = location.strip_prefix(FILE_SCHEME) {
        return Some(PathBuf::from(rest));
    }
    if location.contains("://") {
        return None;
    }
    Some(PathBuf::from(location))
}
