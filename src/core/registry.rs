// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registry of known navigation formats.
//!
//! The registry order is the global default detection order. Lookups by
//! extension move the formats claiming that extension to the front and keep
//! the relative order of everything else.

use std::sync::{Arc, RwLock};

use super::error::{CodecError, Result};
use crate::io::formats::{CsvFormat, GeoJsonFormat};
use crate::io::traits::{same_format, FormatRef};

/// Thread-safe, ordered registry of format codecs.
///
/// Uses RwLock for concurrent read access with exclusive write access.
pub struct FormatRegistry {
    formats: RwLock<Vec<FormatRef>>,
    multi_route_default: FormatRef,
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names().unwrap_or_default();
        f.debug_struct("FormatRegistry")
            .field("formats", &names)
            .field("multi_route_default", &self.multi_route_default.name())
            .finish()
    }
}

impl FormatRegistry {
    /// Create an empty registry.
    ///
    /// `multi_route_default` is the container the resolver falls back to when
    /// routes of different formats have to share one result. It is not added
    /// to the detection order.
    pub fn new(multi_route_default: FormatRef) -> Self {
        Self {
            formats: RwLock::new(Vec::new()),
            multi_route_default,
        }
    }

    /// Registry holding the bundled formats, GeoJSON first.
    pub fn with_defaults() -> Self {
        let geojson: FormatRef = Arc::new(GeoJsonFormat::new());
        let registry = Self::new(geojson.clone());
        registry.formats_mut_unchecked().push(geojson);
        registry
            .formats_mut_unchecked()
            .push(Arc::new(CsvFormat::new()));
        registry
    }

    fn formats_mut_unchecked(&self) -> std::sync::RwLockWriteGuard<'_, Vec<FormatRef>> {
        self.formats
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<FormatRef>>> {
        self.formats
            .read()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))
    }

    /// Append a format to the detection order.
    ///
    /// A format with the same name is replaced in place.
    pub fn register(&self, format: FormatRef) -> Result<()> {
        let mut formats = self
            .formats
            .write()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))?;
        match formats.iter().position(|f| same_format(f, &format)) {
            Some(index) => formats[index] = format,
            None => formats.push(format),
        }
        Ok(())
    }

    /// All formats in default detection order.
    pub fn all_candidates(&self) -> Result<Vec<FormatRef>> {
        Ok(self.read()?.clone())
    }

    /// Formats claiming `extension` first, then all others in registry order.
    pub fn candidates_for_extension(&self, extension: Option<&str>) -> Result<Vec<FormatRef>> {
        let formats = self.read()?;
        let Some(extension) = extension.map(str::to_lowercase) else {
            return Ok(formats.clone());
        };

        let (mut preferred, others): (Vec<FormatRef>, Vec<FormatRef>) = formats
            .iter()
            .cloned()
            .partition(|f| f.extensions().iter().any(|e| *e == extension));
        preferred.extend(others);
        Ok(preferred)
    }

    /// Formats that can parse positions out of `url`.
    pub fn url_parsing_candidates(&self, url: &str) -> Result<Vec<FormatRef>> {
        Ok(self
            .read()?
            .iter()
            .filter(|f| f.parses_url(url))
            .cloned()
            .collect())
    }

    /// Look up a format by name, ignoring case.
    ///
    /// The multi-route default is found even when it is not registered.
    pub fn by_name(&self, name: &str) -> Result<Option<FormatRef>> {
        let formats = self.read()?;
        let found = formats
            .iter()
            .chain(std::iter::once(&self.multi_route_default))
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .cloned();
        Ok(found)
    }

    /// General purpose container for many routes of heterogeneous origin.
    pub fn multi_route_default(&self) -> FormatRef {
        self.multi_route_default.clone()
    }

    /// Names of all registered formats, in order.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.read()?.iter().map(|f| f.name().to_string()).collect())
    }

    /// Number of registered formats.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.names().unwrap(), vec!["GeoJSON", "CSV"]);
        assert_eq!(registry.multi_route_default().name(), "GeoJSON");
        assert!(!registry.is_empty().unwrap());
    }

    #[test]
    fn test_candidates_for_extension_moves_match_first() {
        let registry = FormatRegistry::with_defaults();
        let names: Vec<_> = registry
            .candidates_for_extension(Some("CSV"))
            .unwrap()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        assert_eq!(names, vec!["CSV", "GeoJSON"]);

        let unknown = registry.candidates_for_extension(Some("xyz")).unwrap();
        assert_eq!(unknown.len(), 2);
        assert_eq!(unknown[0].name(), "GeoJSON");
    }

    #[test]
    fn test_register_replaces_same_name() {
        let registry = FormatRegistry::with_defaults();
        registry
            .register(Arc::new(CsvFormat::with_max_positions(10)))
            .unwrap();
        assert_eq!(registry.len().unwrap(), 2);
        let csv = registry.by_name("csv").unwrap().unwrap();
        assert_eq!(csv.max_positions_per_output(), 10);
    }

    #[test]
    fn test_by_name_unknown() {
        let registry = FormatRegistry::with_defaults();
        assert!(registry.by_name("kml").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_access() {
        use std::thread;

        let registry = Arc::new(FormatRegistry::with_defaults());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        let _ = registry.all_candidates().unwrap();
                    }
                    if i == 0 {
                        registry
                            .register(Arc::new(CsvFormat::with_max_positions(5)))
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len().unwrap(), 2);
    }
}
