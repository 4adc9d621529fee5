//! Marker handles and the process-wide marker cache.
//!
//! Decoding a path into pixel or path data stays outside this crate; the
//! cache only memoizes whatever an injected [`MarkerLoader`] produces.
//! Markers are immutable once cached, so shared references are handed out
//! freely across concurrent renders.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum MarkerKind {
    Raster,
    Vector,
}

/// A reusable graphic placed along feature geometries.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    bbox: BoundingBox,
    kind: MarkerKind,
}

impl Marker {
    pub fn new(bbox: BoundingBox, kind: MarkerKind) -> Self {
        Self { bbox, kind }
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn is_vector(&self) -> bool {
        self.kind == MarkerKind::Vector
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }
}

impl Default for Marker {
    /// The empty marker used for an empty path: a 4×4 raster placeholder.
    fn default() -> Self {
        Self {
            bbox: BoundingBox::new(0.0, 0.0, 4.0, 4.0),
            kind: MarkerKind::Raster,
        }
    }
}

/// Resolves paths to markers.
pub trait MarkerProvider {
    fn resolve(&self, path: &str, cache: bool) -> Option<Arc<Marker>>;
}

/// Decodes a path into a marker. Implemented for plain closures.
pub trait MarkerLoader: Send + Sync {
    fn load(&self, path: &str) -> Option<Marker>;
}

impl<F> MarkerLoader for F
where
    F: Fn(&str) -> Option<Marker> + Send + Sync,
{
    fn load(&self, path: &str) -> Option<Marker> {
        self(path)
    }
}

/// Memoizing, concurrency-safe marker store.
///
/// Successful loads are cached for the life of the store; failed loads are
/// reported with a warning and retried on the next lookup.
pub struct MarkerCache {
    loader: Box<dyn MarkerLoader>,
    store: RwLock<HashMap<String, Arc<Marker>>>,
}

impl MarkerCache {
    pub fn new<L: MarkerLoader + 'static>(loader: L) -> Self {
        Self {
            loader: Box::new(loader),
            store: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MarkerProvider for MarkerCache {
    fn resolve(&self, path: &str, cache: bool) -> Option<Arc<Marker>> {
        if path.is_empty() {
            return Some(Arc::new(Marker::default()));
        }

        if let Some(found) = self
            .store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
        {
            return Some(Arc::clone(found));
        }

        match self.loader.load(path) {
            Some(marker) => {
                let marker = Arc::new(marker);
                if cache {
                    self.store
                        .write()
                        .unwrap_or_else(PoisonError::into_inner)
                        .entry(path.to_owned())
                        .or_insert_with(|| Arc::clone(&marker));
                }
                Some(marker)
            }
            None => {
                log::warn!("failed to load marker '{path}'");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn square_marker(_path: &str) -> Option<Marker> {
        Some(Marker::new(BoundingBox::new(0.0, 0.0, 8.0, 8.0), MarkerKind::Vector))
    }

    #[test]
    fn empty_path_yields_default_marker() {
        let cache = MarkerCache::new(square_marker);
        let marker = cache.resolve("", true).expect("default marker");
        assert_eq!(*marker, Marker::default());
        assert!(cache.is_empty());
    }

    #[test]
    fn successful_loads_are_memoized() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let cache = MarkerCache::new(|path: &str| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            square_marker(path)
        });
        let a = cache.resolve("arrow.svg", true).expect("marker");
        let b = cache.resolve("arrow.svg", true).expect("marker");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn uncached_resolve_does_not_store() {
        let cache = MarkerCache::new(square_marker);
        cache.resolve("arrow.svg", false).expect("marker");
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_load_is_none() {
        let cache = MarkerCache::new(|_: &str| -> Option<Marker> { None });
        assert!(cache.resolve("missing.svg", true).is_none());
        assert!(cache.is_empty());
    }
}
